//! Flatten per-keyword hit lists into unique charity numbers.

use indexmap::IndexSet;

use crate::types::record::{CharityNumber, RawSearchResult};

/// Unique charity numbers across all lists, in first-seen order.
///
/// Lists are walked in order and each list front to back. Empty input (or
/// only empty lists) gives an empty result.
pub fn build_charity_number_list<L>(lists: &[L]) -> Vec<CharityNumber>
where
    L: AsRef<[RawSearchResult]>,
{
    lists
        .iter()
        .flat_map(|list| list.as_ref().iter())
        .map(|hit| hit.registered_charity_number)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
