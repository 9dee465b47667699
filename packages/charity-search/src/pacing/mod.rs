//! Courtesy pacing between registry calls.
//!
//! The register tolerates one outstanding request at a time and asks callers
//! not to hammer it. Batches pause for a random delay between calls.

pub mod delay;
pub mod pacer;

pub use delay::{choose, DelayBound, DEFAULT_DELAY_MAX_MS};
pub use pacer::{NoPacing, Pacer, RandomPacer};
