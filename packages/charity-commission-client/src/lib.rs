//! Pure Charity Commission register search client.
//!
//! A minimal SOAP client for the "SearchCharitiesV1" service. Supports keyword
//! search and fetching a full register entry by registered charity number.
//! Responses are returned as `serde_json::Value` trees (see [`soap`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use charity_commission_client::CharityCommissionClient;
//!
//! let client = CharityCommissionClient::new();
//!
//! let hits = client.get_charities_by_keyword(&api_key, "madrassa", &[]).await?;
//! let record = client.get_charity_by_registered_charity_number(&api_key, 1125833).await?;
//! println!("{}", record["GetCharityByRegisteredCharityNumberResult"]["CharityName"]);
//! ```

pub mod error;
pub mod soap;
pub mod types;

pub use error::{CharityCommissionError, Result};
pub use types::{
    CHARITY_RESULT_ELEMENT, GET_CHARITIES_BY_KEYWORD, GET_CHARITY_BY_REGISTERED_CHARITY_NUMBER,
};

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

/// Production endpoint of the register search service.
pub const DEFAULT_ENDPOINT: &str =
    "https://apps.charitycommission.gov.uk/Showcharity/API/SearchCharitiesV1/SearchCharitiesV1.asmx";

/// Charity Commission SOAP client.
///
/// Holds no per-request state; the API key travels with every call.
#[derive(Debug, Clone)]
pub struct CharityCommissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for CharityCommissionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CharityCommissionClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Set a custom endpoint URL (for proxies and tests).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Search the register by keyword. Returns the `CharityList` entries.
    ///
    /// `filters` are extra `(name, value)` parameters sent after `strSearch`,
    /// in order. An empty or nil result list yields an empty list.
    pub async fn get_charities_by_keyword(
        &self,
        api_key: &str,
        search: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Value>> {
        let mut params = vec![("APIKey", api_key), ("strSearch", search)];
        params.extend_from_slice(filters);

        let response = self.call(GET_CHARITIES_BY_KEYWORD, &params).await?;

        let result_element = format!("{GET_CHARITIES_BY_KEYWORD}Result");
        let result = response
            .get(&result_element)
            .ok_or_else(|| CharityCommissionError::MissingElement(result_element.clone()))?;

        let hits = match result.get("CharityList") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        tracing::debug!(search, count = hits.len(), "Keyword search returned");

        Ok(hits)
    }

    /// Fetch one full register entry.
    ///
    /// The returned value is keyed by `GetCharityByRegisteredCharityNumberResult`.
    pub async fn get_charity_by_registered_charity_number(
        &self,
        api_key: &str,
        registered_charity_number: u32,
    ) -> Result<Value> {
        let number = registered_charity_number.to_string();
        let response = self
            .call(
                GET_CHARITY_BY_REGISTERED_CHARITY_NUMBER,
                &[("APIKey", api_key), ("registeredCharityNumber", number.as_str())],
            )
            .await?;

        if response.get(CHARITY_RESULT_ELEMENT).is_none() {
            return Err(CharityCommissionError::MissingElement(
                CHARITY_RESULT_ELEMENT.to_string(),
            ));
        }

        Ok(response)
    }

    /// Post one SOAP request and decode the `<{operation}Response>` element.
    async fn call(&self, operation: &str, params: &[(&str, &str)]) -> Result<Value> {
        tracing::debug!(operation, endpoint = %self.endpoint, "SOAP request");

        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", soap::soap_action(operation))
            .body(soap::envelope(operation, params))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            // ASMX services report faults with a 500 status.
            if let Some(fault) = soap::parse_fault(&body) {
                return Err(fault);
            }
            return Err(CharityCommissionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        soap::parse_response(&body, operation)
    }
}
