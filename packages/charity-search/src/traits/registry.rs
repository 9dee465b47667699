//! The remote charity register as seen by the core.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::criteria::{CharityNumberRequest, SearchCriteria};
use crate::types::record::{FullCharityRecord, RawSearchResult};

/// Remote register capability: search by keyword and get by number.
///
/// Implementations report transport failures as
/// [`SearchError::RemoteCall`](crate::error::SearchError::RemoteCall) and must
/// not retry. The core never issues two calls concurrently against one
/// registry, so implementations need no internal locking for ordering.
///
/// # Implementations
///
/// - `CharityCommissionClient` - SOAP register service (feature `commission`)
/// - `MockRegistry` - For testing
#[async_trait]
pub trait CharityRegistry: Send + Sync {
    /// Run one keyword search. An empty list is a normal outcome.
    async fn search_by_keyword(&self, criteria: &SearchCriteria) -> Result<Vec<RawSearchResult>>;

    /// Fetch the full register entry for one charity number.
    async fn get_charity_by_number(
        &self,
        request: &CharityNumberRequest,
    ) -> Result<FullCharityRecord>;
}

#[async_trait]
impl<T: CharityRegistry + ?Sized> CharityRegistry for std::sync::Arc<T> {
    async fn search_by_keyword(&self, criteria: &SearchCriteria) -> Result<Vec<RawSearchResult>> {
        (**self).search_by_keyword(criteria).await
    }

    async fn get_charity_by_number(
        &self,
        request: &CharityNumberRequest,
    ) -> Result<FullCharityRecord> {
        (**self).get_charity_by_number(request).await
    }
}
