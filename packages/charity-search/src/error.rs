//! Typed errors for the charity search core.
//!
//! Two kinds only: caller misuse caught before any remote call, and
//! failures reported by the registry transport.

use thiserror::Error;

/// Errors that can occur during search and fetch batches.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Caller misuse (empty keyword list, negative delay bound)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The registry rejected or failed a remote call
    #[error("remote call failed: {0}")]
    RemoteCall(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SearchError {
    /// Wrap a transport failure without reinterpreting it.
    pub fn remote<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::RemoteCall(Box::new(err))
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type alias for charity search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
