//! Register records: search hits, full entries, and the flat normalized view.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{Result, SearchError};
use crate::path::defined;

/// Key wrapping a full register entry, as returned by the registry.
pub const CHARITY_RESULT_KEY: &str = "GetCharityByRegisteredCharityNumberResult";

/// A registered charity number. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CharityNumber(u32);

impl CharityNumber {
    pub fn new(number: u32) -> Result<Self> {
        if number == 0 {
            return Err(SearchError::invalid("charity number must be positive"));
        }
        Ok(Self(number))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CharityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CharityNumber {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let number = s
            .trim()
            .parse::<u32>()
            .map_err(|_| SearchError::invalid(format!("not a charity number: {s:?}")))?;
        Self::new(number)
    }
}

impl TryFrom<&Value> for CharityNumber {
    type Error = SearchError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => s.parse(),
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| SearchError::invalid(format!("not a charity number: {n}")))
                .and_then(Self::new),
            other => Err(SearchError::invalid(format!(
                "not a charity number: {other}"
            ))),
        }
    }
}

// SOAP payloads carry numbers as text; fixtures carry them as integers.
impl<'de> Deserialize<'de> for CharityNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        CharityNumber::try_from(&value).map_err(de::Error::custom)
    }
}

/// Accept text, numbers or booleans as text; `null` as absent.
fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected text, got {other}"))),
    }
}

/// One hit from a keyword search.
///
/// Only the registered charity number is required. Fields the registry sends
/// beyond the named ones are kept untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSearchResult {
    pub registered_charity_number: CharityNumber,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub subsidiary_number: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub charity_name: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub main_charity_name: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub registration_status: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub public_email_address: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub main_phone_number: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawSearchResult {
    /// A hit carrying only its charity number.
    pub fn new(registered_charity_number: CharityNumber) -> Self {
        Self {
            registered_charity_number,
            subsidiary_number: None,
            charity_name: None,
            main_charity_name: None,
            registration_status: None,
            public_email_address: None,
            main_phone_number: None,
            extra: Map::new(),
        }
    }

    pub fn with_charity_name(mut self, name: impl Into<String>) -> Self {
        self.charity_name = Some(name.into());
        self
    }
}

/// A full register entry as returned by get-by-number.
///
/// Kept as the registry's nested tree, keyed by [`CHARITY_RESULT_KEY`].
/// Optional parts such as historical returns are probed with [`Self::has`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullCharityRecord(Value);

impl FullCharityRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The entry under [`CHARITY_RESULT_KEY`].
    pub fn result(&self) -> Option<&Value> {
        self.0.get(CHARITY_RESULT_KEY)
    }

    pub fn charity_name(&self) -> Option<&str> {
        self.result()?.get("CharityName")?.as_str()
    }

    pub fn registered_number(&self) -> Option<CharityNumber> {
        let value = self.result()?.get("RegisteredCharityNumber")?;
        CharityNumber::try_from(value).ok()
    }

    /// Whether a dot-delimited path below the result entry is present.
    ///
    /// `record.has("Returns.0.AssetsAndLiabilities.Funds.TotalFunds")`
    pub fn has(&self, path: &str) -> bool {
        self.result().is_some_and(|result| defined(result, path))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for FullCharityRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Flat view of a search hit with exactly seven fields.
///
/// Absent source fields stay absent and are omitted when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedCharityRecord {
    pub registered_charity_number: CharityNumber,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsidiary_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charity_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_charity_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_email_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_phone_number: Option<String>,
}
