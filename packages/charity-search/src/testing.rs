//! Testing utilities including mock implementations.
//!
//! These are useful for exercising search and fetch batches without making
//! real registry calls.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{Result, SearchError};
use crate::pacing::Pacer;
use crate::traits::registry::CharityRegistry;
use crate::types::criteria::{CharityNumberRequest, SearchCriteria};
use crate::types::record::{CharityNumber, FullCharityRecord, RawSearchResult, CHARITY_RESULT_KEY};

/// Record of a call made to the mock registry, or a pause between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRegistryCall {
    Search { search_term: String },
    GetCharity { number: CharityNumber },
    Pause,
}

/// Failure injected by [`MockRegistry`].
#[derive(Debug, thiserror::Error)]
#[error("mock registry failure: {0}")]
pub struct MockRegistryError(pub String);

/// A mock register for testing.
///
/// Unknown keywords return no hits; unknown numbers fail like a missing
/// register entry would.
#[derive(Default)]
pub struct MockRegistry {
    /// Canned hits by search term
    searches: RwLock<HashMap<String, Vec<RawSearchResult>>>,

    /// Canned full records by number
    charities: RwLock<HashMap<CharityNumber, FullCharityRecord>>,

    failing_terms: RwLock<HashSet<String>>,
    failing_numbers: RwLock<HashSet<CharityNumber>>,

    /// Calls and pauses, shared with pacers from [`Self::recording_pacer`]
    calls: Arc<RwLock<Vec<MockRegistryCall>>>,

    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add canned hits for a search term.
    pub fn with_search(self, term: impl Into<String>, hits: Vec<RawSearchResult>) -> Self {
        self.searches.write().unwrap().insert(term.into(), hits);
        self
    }

    /// Add a canned full record.
    pub fn with_charity(self, number: CharityNumber, record: FullCharityRecord) -> Self {
        self.charities.write().unwrap().insert(number, record);
        self
    }

    /// Add a minimal full record carrying only number and name.
    pub fn with_named_charity(self, number: u32, name: &str) -> Self {
        let mut wrapper = serde_json::Map::new();
        wrapper.insert(
            CHARITY_RESULT_KEY.to_string(),
            serde_json::json!({
                "RegisteredCharityNumber": number.to_string(),
                "CharityName": name,
            }),
        );
        let record = FullCharityRecord::new(Value::Object(wrapper));
        let number = CharityNumber::new(number).expect("mock charity numbers are positive");
        self.with_charity(number, record)
    }

    /// Load searches and charities from a fixture document:
    /// `{"searches": {term: [hit, ...]}, "charities": [record, ...]}`.
    pub fn from_fixture(fixture: &Value) -> Result<Self> {
        let mut mock = Self::new();

        if let Some(searches) = fixture.get("searches").and_then(Value::as_object) {
            for (term, hits) in searches {
                let hits: Vec<RawSearchResult> = serde_json::from_value(hits.clone())
                    .map_err(|e| SearchError::invalid(format!("fixture hits for {term:?}: {e}")))?;
                mock = mock.with_search(term.clone(), hits);
            }
        }

        if let Some(charities) = fixture.get("charities").and_then(Value::as_array) {
            for record in charities {
                let record = FullCharityRecord::new(record.clone());
                let number = record.registered_number().ok_or_else(|| {
                    SearchError::invalid("fixture charity without RegisteredCharityNumber")
                })?;
                mock = mock.with_charity(number, record);
            }
        }

        Ok(mock)
    }

    /// Make searches for `term` fail.
    pub fn fail_search(self, term: impl Into<String>) -> Self {
        self.failing_terms.write().unwrap().insert(term.into());
        self
    }

    /// Make fetches of `number` fail.
    pub fn fail_charity(self, number: CharityNumber) -> Self {
        self.failing_numbers.write().unwrap().insert(number);
        self
    }

    /// A pacer that records its pauses into this registry's call log.
    pub fn recording_pacer(&self) -> RecordingPacer {
        RecordingPacer {
            log: Arc::clone(&self.calls),
        }
    }

    /// Calls and pauses in the order they happened.
    pub fn calls(&self) -> Vec<MockRegistryCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of remote calls (pauses excluded).
    pub fn call_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| !matches!(c, MockRegistryCall::Pause))
            .count()
    }

    /// Highest number of calls that were ever in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self, call: MockRegistryCall) {
        self.calls.write().unwrap().push(call);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        // Give any concurrent caller a chance to overlap.
        tokio::task::yield_now().await;
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CharityRegistry for MockRegistry {
    async fn search_by_keyword(&self, criteria: &SearchCriteria) -> Result<Vec<RawSearchResult>> {
        let term = criteria.search_term().to_string();
        self.enter(MockRegistryCall::Search {
            search_term: term.clone(),
        })
        .await;

        let result = if self.failing_terms.read().unwrap().contains(&term) {
            Err(SearchError::remote(MockRegistryError(format!(
                "search for {term:?} rejected"
            ))))
        } else {
            Ok(self
                .searches
                .read()
                .unwrap()
                .get(&term)
                .cloned()
                .unwrap_or_default())
        };

        self.exit();
        result
    }

    async fn get_charity_by_number(
        &self,
        request: &CharityNumberRequest,
    ) -> Result<FullCharityRecord> {
        let number = request.registered_charity_number;
        self.enter(MockRegistryCall::GetCharity { number }).await;

        let result = if self.failing_numbers.read().unwrap().contains(&number) {
            Err(SearchError::remote(MockRegistryError(format!(
                "fetch of {number} rejected"
            ))))
        } else {
            self.charities
                .read()
                .unwrap()
                .get(&number)
                .cloned()
                .ok_or_else(|| {
                    SearchError::remote(MockRegistryError(format!("no charity {number}")))
                })
        };

        self.exit();
        result
    }
}

/// A pacer that never sleeps and logs each pause.
#[derive(Clone, Default)]
pub struct RecordingPacer {
    log: Arc<RwLock<Vec<MockRegistryCall>>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause_count(&self) -> usize {
        self.log
            .read()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, MockRegistryCall::Pause))
            .count()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self) -> Duration {
        self.log.write().unwrap().push(MockRegistryCall::Pause);
        Duration::ZERO
    }
}
