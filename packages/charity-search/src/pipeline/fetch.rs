//! Fetch full register entries one number at a time.

use async_stream::stream;
use futures::{Stream, TryStreamExt};
use std::pin::Pin;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::pacing::Pacer;
use crate::traits::registry::CharityRegistry;
use crate::types::criteria::FetchParams;
use crate::types::record::{CharityNumber, FullCharityRecord};

/// Stream of fetched records, in input order.
pub type CharityStream<'a> = Pin<Box<dyn Stream<Item = Result<FullCharityRecord>> + Send + 'a>>;

/// Yield one full record per number, pausing between calls.
///
/// The stream ends right after yielding the first error; no call is made for
/// the numbers after it.
pub fn charity_stream<'a, R, P>(
    registry: &'a R,
    params: &'a FetchParams,
    numbers: &'a [CharityNumber],
    pacer: &'a P,
) -> CharityStream<'a>
where
    R: CharityRegistry + ?Sized,
    P: Pacer + ?Sized,
{
    Box::pin(stream! {
        for (index, number) in numbers.iter().enumerate() {
            if index > 0 {
                pacer.pause().await;
            }

            debug!(number = %number, "Fetching charity");
            let request = params.request_for(*number);
            match registry.get_charity_by_number(&request).await {
                Ok(record) => yield Ok(record),
                Err(e) => {
                    warn!(number = %number, index, error = %e, "Charity fetch failed, aborting batch");
                    yield Err(e);
                    return;
                }
            }
        }
    })
}

/// Fetch every number in order, pausing between calls.
///
/// The result is aligned index-for-index with `numbers`. The first failed
/// fetch fails the whole batch.
pub async fn fetch_all_charities<R, P>(
    registry: &R,
    params: &FetchParams,
    numbers: &[CharityNumber],
    pacer: &P,
) -> Result<Vec<FullCharityRecord>>
where
    R: CharityRegistry + ?Sized,
    P: Pacer + ?Sized,
{
    info!(count = numbers.len(), "Starting charity fetch batch");

    let records: Vec<FullCharityRecord> = charity_stream(registry, params, numbers, pacer)
        .try_collect()
        .await?;

    info!(count = records.len(), "Charity fetch batch complete");
    Ok(records)
}
