//! Search, deduplicate, fetch.
//!
//! Every batch here is strictly sequential: one registry call in flight at a
//! time, a pacer pause between consecutive calls, results in input order, and
//! the first failure aborts the batch with no partial results.

pub mod collect;
pub mod dedup;
pub mod fetch;
pub mod normalize;
pub mod search;

pub use collect::collect_charities;
pub use dedup::build_charity_number_list;
pub use fetch::{charity_stream, fetch_all_charities, CharityStream};
pub use normalize::{charity_dataset, normalize_all};
pub use search::{search_by_keyword, search_by_keyword_list, EMPTY_KEYWORD_LIST};
