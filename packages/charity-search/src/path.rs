//! Existence checks for deeply nested optional fields.
//!
//! Register entries are loosely populated: a charity may have no returns, a
//! return may have no funds breakdown. [`defined`] answers "is this path
//! there?" without erroring on absence.

use serde_json::Value;

/// A nested, map-like record that can be walked one segment at a time.
pub trait RecordLike {
    /// The child named by `segment`, if present.
    fn child(&self, segment: &str) -> Option<&Self>;

    /// Whether this node counts as missing (e.g. `null`).
    fn is_absent(&self) -> bool;
}

impl RecordLike for Value {
    fn child(&self, segment: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

/// Whether every segment of the dot-delimited `path` resolves to a present
/// value, starting from `record`.
///
/// Numeric segments index into arrays, so `"Returns.0.Funds"` reaches into
/// the first return.
pub fn defined<R: RecordLike + ?Sized>(record: &R, path: &str) -> bool {
    let mut current = record;
    for segment in path.split('.') {
        match current.child(segment) {
            Some(next) if !next.is_absent() => current = next,
            _ => return false,
        }
    }
    true
}
