//! End-to-end: keywords in, unique full records out.

use tracing::info;

use crate::error::Result;
use crate::pacing::Pacer;
use crate::pipeline::{build_charity_number_list, fetch_all_charities, search_by_keyword_list};
use crate::traits::registry::CharityRegistry;
use crate::types::criteria::SearchCriteria;
use crate::types::record::FullCharityRecord;

/// Search every keyword, deduplicate the hits, and fetch each charity once.
///
/// Records come back in first-seen order of their charity numbers. The pacer
/// also pauses between the last search and the first fetch, so no two
/// registry calls are ever back to back.
pub async fn collect_charities<R, P, S>(
    registry: &R,
    base: &SearchCriteria,
    keywords: &[S],
    pacer: &P,
) -> Result<Vec<FullCharityRecord>>
where
    R: CharityRegistry + ?Sized,
    P: Pacer + ?Sized,
    S: AsRef<str>,
{
    let lists = search_by_keyword_list(registry, base, keywords, pacer).await?;
    let numbers = build_charity_number_list(&lists);
    info!(unique = numbers.len(), "Deduplicated search hits");

    if numbers.is_empty() {
        return Ok(Vec::new());
    }

    pacer.pause().await;
    fetch_all_charities(registry, &base.fetch_params(), &numbers, pacer).await
}
