use anyhow::{Context, Result};
use charity_commission_client::CharityCommissionClient;
use charity_search::{DelayBound, SearchCriteria, SecretString};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Settings file layout, shared with the deployment's settings JSON:
///
/// ```json
/// {
///   "private": {
///     "charity_commission": { "api_key": "...", "url": "..." },
///     "search_terms": ["madrassa", "islamic relief"],
///     "delay_max_ms": 2000
///   }
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    private: PrivateSettings,
}

#[derive(Debug, Default, Deserialize)]
struct PrivateSettings {
    #[serde(default)]
    charity_commission: CommissionSettings,
    #[serde(default)]
    search_terms: Vec<String>,
    delay_max_ms: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct CommissionSettings {
    api_key: Option<String>,
    url: Option<String>,
}

impl SettingsFile {
    fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }
}

/// Application configuration: settings file, then environment overrides.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: SecretString,
    pub search_terms: Vec<String>,
    pub delay: DelayBound,
    pub endpoint: Option<String>,
}

impl Config {
    /// Load configuration from an optional settings file and the environment
    pub fn load(settings_path: Option<&Path>) -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let settings = match settings_path {
            Some(path) => SettingsFile::read(path)?,
            None => SettingsFile::default(),
        };

        Self::resolve(settings, |name| env::var(name).ok())
    }

    fn resolve(settings: SettingsFile, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let PrivateSettings {
            charity_commission,
            search_terms,
            delay_max_ms,
        } = settings.private;

        let api_key = var("CHARITY_COMMISSION_API_KEY")
            .or(charity_commission.api_key)
            .filter(|key| !key.trim().is_empty())
            .context("CHARITY_COMMISSION_API_KEY must be set (or private.charity_commission.api_key)")?;

        let search_terms = match var("CHARITY_SEARCH_TERMS") {
            Some(terms) => terms
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            None => search_terms,
        };

        let delay = match (var("CHARITY_DELAY_MAX_MS"), delay_max_ms) {
            (Some(ms), _) => {
                let ms: i64 = ms
                    .trim()
                    .parse()
                    .context("CHARITY_DELAY_MAX_MS must be a whole number of milliseconds")?;
                DelayBound::new(ms).context("CHARITY_DELAY_MAX_MS is out of range")?
            }
            (None, Some(ms)) => {
                DelayBound::from_f64(ms).context("private.delay_max_ms is out of range")?
            }
            (None, None) => DelayBound::default(),
        };

        Ok(Self {
            api_key: SecretString::from(api_key),
            search_terms,
            delay,
            endpoint: var("CHARITY_COMMISSION_URL").or(charity_commission.url),
        })
    }

    /// Explicit keywords win; otherwise the configured search terms.
    pub fn keywords_or_default(&self, keywords: Vec<String>) -> Vec<String> {
        if keywords.is_empty() {
            self.search_terms.clone()
        } else {
            keywords
        }
    }

    pub fn search_criteria(&self) -> SearchCriteria {
        SearchCriteria::base(self.api_key.clone())
    }

    pub fn registry(&self) -> CharityCommissionClient {
        let client = CharityCommissionClient::new();
        match &self.endpoint {
            Some(url) => client.with_endpoint(url.clone()),
            None => client,
        }
    }
}
