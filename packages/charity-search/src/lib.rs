//! Paced keyword search against the charity register.
//!
//! Turns a list of keywords into a deduplicated set of full charity records
//! while respecting the register's one-request-at-a-time policy and courtesy
//! pauses between calls.
//!
//! # Usage
//!
//! ```rust,ignore
//! use charity_search::{collect_charities, DelayBound, RandomPacer, SearchCriteria};
//! use charity_commission_client::CharityCommissionClient;
//!
//! let registry = CharityCommissionClient::new();
//! let pacer = RandomPacer::new(DelayBound::new(2000)?);
//! let base = SearchCriteria::base(api_key);
//!
//! // Search, dedup, fetch
//! let records = collect_charities(&registry, &base, &["madrassa", "islamic relief"], &pacer).await?;
//! for record in &records {
//!     println!("{}", record.charity_name().unwrap_or("(unnamed)"));
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The registry capability the core calls into
//! - [`types`] - Criteria, charity numbers and records
//! - [`pipeline`] - Keyword search, dedup, fetch and normalization batches
//! - [`pacing`] - Random courtesy delays between calls
//! - [`path`] - Nested field existence checks
//! - [`registry`] - Registry implementations
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pacing;
pub mod path;
pub mod pipeline;
pub mod registry;
pub mod testing;
pub mod traits;
pub mod types;

pub use error::{Result, SearchError};
pub use secrecy::{ExposeSecret, SecretString};
pub use pacing::{choose, DelayBound, NoPacing, Pacer, RandomPacer, DEFAULT_DELAY_MAX_MS};
pub use path::{defined, RecordLike};
pub use pipeline::{
    build_charity_number_list, charity_dataset, charity_stream, collect_charities,
    fetch_all_charities, normalize_all, search_by_keyword, search_by_keyword_list, CharityStream,
    EMPTY_KEYWORD_LIST,
};
pub use traits::registry::CharityRegistry;
pub use types::{
    criteria::{CharityNumberRequest, FetchParams, SearchCriteria, SearchFilter},
    record::{
        CharityNumber, FullCharityRecord, NormalizedCharityRecord, RawSearchResult,
        CHARITY_RESULT_KEY,
    },
};

pub use testing::{MockRegistry, MockRegistryCall, RecordingPacer};
