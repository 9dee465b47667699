//! Keyword search, single and batched.

use tracing::{debug, info, warn};

use crate::error::{Result, SearchError};
use crate::pacing::Pacer;
use crate::traits::registry::CharityRegistry;
use crate::types::criteria::SearchCriteria;
use crate::types::record::RawSearchResult;

/// Message carried by the error for an empty keyword batch.
pub const EMPTY_KEYWORD_LIST: &str = "Cannot have an empty list of keywords";

/// Run one keyword search. Failures propagate unchanged.
pub async fn search_by_keyword<R>(registry: &R, criteria: &SearchCriteria) -> Result<Vec<RawSearchResult>>
where
    R: CharityRegistry + ?Sized,
{
    debug!(search_term = %criteria.search_term(), "Searching register by keyword");
    let hits = registry.search_by_keyword(criteria).await?;
    debug!(search_term = %criteria.search_term(), count = hits.len(), "Keyword search done");
    Ok(hits)
}

/// Search each keyword in order, pausing between calls.
///
/// Returns one result list per keyword, aligned with `keywords`. An empty
/// keyword list is rejected before any call is made; the first failed search
/// aborts the batch.
pub async fn search_by_keyword_list<R, P, S>(
    registry: &R,
    base: &SearchCriteria,
    keywords: &[S],
    pacer: &P,
) -> Result<Vec<Vec<RawSearchResult>>>
where
    R: CharityRegistry + ?Sized,
    P: Pacer + ?Sized,
    S: AsRef<str>,
{
    if keywords.is_empty() {
        return Err(SearchError::invalid(EMPTY_KEYWORD_LIST));
    }

    info!(keywords = keywords.len(), "Starting keyword search batch");

    let mut results = Vec::with_capacity(keywords.len());
    for (index, keyword) in keywords.iter().enumerate() {
        if index > 0 {
            pacer.pause().await;
        }

        let keyword = keyword.as_ref();
        let criteria = base.with_search_term(keyword);
        match search_by_keyword(registry, &criteria).await {
            Ok(hits) => results.push(hits),
            Err(e) => {
                warn!(keyword, index, error = %e, "Keyword search failed, aborting batch");
                return Err(e);
            }
        }
    }

    info!(
        keywords = results.len(),
        hits = results.iter().map(Vec::len).sum::<usize>(),
        "Keyword search batch complete"
    );
    Ok(results)
}
