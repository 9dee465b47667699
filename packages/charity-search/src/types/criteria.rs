//! Request parameters passed into search and fetch batches.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::types::record::CharityNumber;

/// An additional named parameter sent with a keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub name: String,
    pub value: String,
}

impl SearchFilter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parameters of one keyword search.
///
/// Immutable once built; [`SearchCriteria::with_search_term`] derives a new
/// value for each keyword of a batch.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    api_key: SecretString,
    search_term: String,
    filters: Vec<SearchFilter>,
}

impl SearchCriteria {
    pub fn new(api_key: impl Into<SecretString>, search_term: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            search_term: search_term.into(),
            filters: Vec::new(),
        }
    }

    /// Base criteria for a batch: the API key and no search term yet.
    pub fn base(api_key: impl Into<SecretString>) -> Self {
        Self::new(api_key, String::new())
    }

    /// Add a filter shared by every search built from these criteria.
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(SearchFilter::new(name, value));
        self
    }

    /// Copy of these criteria searching for `term`.
    pub fn with_search_term(&self, term: impl Into<String>) -> Self {
        Self {
            api_key: self.api_key.clone(),
            search_term: term.into(),
            filters: self.filters.clone(),
        }
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> &[SearchFilter] {
        &self.filters
    }

    /// Fetch parameters sharing this criteria's API key.
    pub fn fetch_params(&self) -> FetchParams {
        FetchParams::new(self.api_key.clone())
    }
}

/// Parameters shared by every fetch of a batch.
#[derive(Debug, Clone)]
pub struct FetchParams {
    api_key: SecretString,
}

impl FetchParams {
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// Build the request for a single charity number.
    pub fn request_for(&self, number: CharityNumber) -> CharityNumberRequest {
        CharityNumberRequest {
            api_key: self.api_key.clone(),
            registered_charity_number: number,
        }
    }
}

/// Parameters of one get-by-number call.
#[derive(Debug, Clone)]
pub struct CharityNumberRequest {
    pub api_key: SecretString,
    pub registered_charity_number: CharityNumber,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_with_search_term_keeps_key_and_filters() {
        let base = SearchCriteria::base("key").with_filter("RegisteredOnly", "true");
        let criteria = base.with_search_term("madrassa");

        assert_eq!(criteria.search_term(), "madrassa");
        assert_eq!(criteria.api_key().expose_secret(), "key");
        assert_eq!(criteria.filters(), base.filters());
        assert_eq!(base.search_term(), "");
    }

    #[test]
    fn test_request_for_number() {
        let params = FetchParams::new("key");
        let number = CharityNumber::new(1125833).unwrap();
        let request = params.request_for(number);

        assert_eq!(request.registered_charity_number, number);
        assert_eq!(request.api_key.expose_secret(), "key");
    }

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let criteria = SearchCriteria::new("secret-key-123", "madrassa");
        let debug = format!("{criteria:?}");
        assert!(!debug.contains("secret-key-123"));
        assert!(debug.contains("madrassa"));
    }
}
