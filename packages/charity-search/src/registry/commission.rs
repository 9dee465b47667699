//! Charity Commission SOAP service as a [`CharityRegistry`].

use async_trait::async_trait;
use charity_commission_client::CharityCommissionClient;
use secrecy::ExposeSecret;

use crate::error::{Result, SearchError};
use crate::traits::registry::CharityRegistry;
use crate::types::criteria::{CharityNumberRequest, SearchCriteria};
use crate::types::record::{FullCharityRecord, RawSearchResult};

#[async_trait]
impl CharityRegistry for CharityCommissionClient {
    async fn search_by_keyword(&self, criteria: &SearchCriteria) -> Result<Vec<RawSearchResult>> {
        let filters: Vec<(&str, &str)> = criteria
            .filters()
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect();

        let hits = self
            .get_charities_by_keyword(
                criteria.api_key().expose_secret(),
                criteria.search_term(),
                &filters,
            )
            .await
            .map_err(SearchError::remote)?;

        hits.into_iter()
            .map(|hit| serde_json::from_value(hit).map_err(SearchError::remote))
            .collect()
    }

    async fn get_charity_by_number(
        &self,
        request: &CharityNumberRequest,
    ) -> Result<FullCharityRecord> {
        self.get_charity_by_registered_charity_number(
            request.api_key.expose_secret(),
            request.registered_charity_number.get(),
        )
        .await
        .map(FullCharityRecord::from)
        .map_err(SearchError::remote)
    }
}
