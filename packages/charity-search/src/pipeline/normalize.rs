//! Flat seven-field view of search hits.

use crate::types::record::{NormalizedCharityRecord, RawSearchResult};

impl From<&RawSearchResult> for NormalizedCharityRecord {
    fn from(raw: &RawSearchResult) -> Self {
        Self {
            registered_charity_number: raw.registered_charity_number,
            subsidiary_number: raw.subsidiary_number.clone(),
            charity_name: raw.charity_name.clone(),
            main_charity_name: raw.main_charity_name.clone(),
            registration_status: raw.registration_status.clone(),
            public_email_address: raw.public_email_address.clone(),
            main_phone_number: raw.main_phone_number.clone(),
        }
    }
}

/// Copy the seven named fields of a hit. Nothing is defaulted or invented.
pub fn charity_dataset(raw: &RawSearchResult) -> NormalizedCharityRecord {
    NormalizedCharityRecord::from(raw)
}

/// Normalize every hit of every list, flattened in order.
pub fn normalize_all<L>(lists: &[L]) -> Vec<NormalizedCharityRecord>
where
    L: AsRef<[RawSearchResult]>,
{
    lists
        .iter()
        .flat_map(|list| list.as_ref().iter())
        .map(charity_dataset)
        .collect()
}
