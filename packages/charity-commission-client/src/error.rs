//! Error types for the Charity Commission client.

use thiserror::Error;

/// Result type for Charity Commission client operations.
pub type Result<T> = std::result::Result<T, CharityCommissionError>;

/// Charity Commission client errors.
#[derive(Debug, Error)]
pub enum CharityCommissionError {
    /// Network error (connection failed, timeout, body read failed)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response that did not carry a SOAP fault
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// SOAP fault returned by the service (bad API key, invalid arguments)
    #[error("SOAP fault {code}: {message}")]
    Fault { code: String, message: String },

    /// Response body was not well-formed XML
    #[error("XML error: {0}")]
    Xml(String),

    /// Response was well-formed but lacked the expected element
    #[error("missing element in response: {0}")]
    MissingElement(String),
}

impl From<quick_xml::Error> for CharityCommissionError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for CharityCommissionError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for CharityCommissionError {
    fn from(e: quick_xml::escape::EscapeError) -> Self {
        Self::Xml(e.to_string())
    }
}
