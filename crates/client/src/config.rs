//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `API_BASE_URL` - Base URL for every backend service (default: `http://localhost/api`)
//! - `CATALOGING_URL`, `ORDERING_URL`, `SHIPPING_URL`, `PAYING_URL`, `PROFILING_URL` -
//!   Per-domain base URL override (default: `{API_BASE_URL}/{domain}`)
//! - `FAKE_CATALOGING`, `FAKE_ORDERING`, `FAKE_SHIPPING`, `FAKE_PAYING`, `FAKE_PROFILING` -
//!   Serve the domain from in-memory fixtures instead of HTTP (default: false)
//! - `FAKE_LATENCY` - Emulate network latency in fake-data mode (default: true)
//! - `STORAGE_DIR` - Directory for persisted session and cart state (default: `.boutique`)
//!
//! Booleans are true for `true` (any case) or `1`. Empty values count as unset.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::latency::Latency;

const DEFAULT_API_BASE_URL: &str = "http://localhost/api";
const DEFAULT_STORAGE_DIR: &str = ".boutique";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// The five backend service domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Cataloging,
    Ordering,
    Shipping,
    Paying,
    Profiling,
}

impl Domain {
    /// Every domain.
    pub const ALL: [Self; 5] = [
        Self::Cataloging,
        Self::Ordering,
        Self::Shipping,
        Self::Paying,
        Self::Profiling,
    ];

    /// Lowercase name, also the default path segment under the API base URL.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cataloging => "cataloging",
            Self::Ordering => "ordering",
            Self::Shipping => "shipping",
            Self::Paying => "paying",
            Self::Profiling => "profiling",
        }
    }

    const fn url_var(self) -> &'static str {
        match self {
            Self::Cataloging => "CATALOGING_URL",
            Self::Ordering => "ORDERING_URL",
            Self::Shipping => "SHIPPING_URL",
            Self::Paying => "PAYING_URL",
            Self::Profiling => "PROFILING_URL",
        }
    }

    const fn fake_var(self) -> &'static str {
        match self {
            Self::Cataloging => "FAKE_CATALOGING",
            Self::Ordering => "FAKE_ORDERING",
            Self::Shipping => "FAKE_SHIPPING",
            Self::Paying => "FAKE_PAYING",
            Self::Profiling => "FAKE_PROFILING",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where one domain's calls go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConfig {
    /// Base URL of the domain's REST API.
    pub base_url: Url,
    /// Serve calls from in-memory fixtures instead of HTTP.
    pub use_fake_data: bool,
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Shared API base URL
    pub api_base_url: Url,
    pub cataloging: DomainConfig,
    pub ordering: DomainConfig,
    pub shipping: DomainConfig,
    pub paying: DomainConfig,
    pub profiling: DomainConfig,
    /// Artificial delay applied by in-memory services
    pub latency: Latency,
    /// Directory for persisted local state
    pub storage_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_base_url = parse_url(
            "API_BASE_URL",
            &get("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;

        let domain = |domain: Domain| -> Result<DomainConfig, ConfigError> {
            let base_url = match get(domain.url_var()) {
                Some(value) => parse_url(domain.url_var(), &value)?,
                None => child_url(&api_base_url, domain.name()),
            };
            Ok(DomainConfig {
                base_url,
                use_fake_data: get(domain.fake_var()).is_some_and(|v| parse_bool(&v)),
            })
        };

        let latency = if get("FAKE_LATENCY").is_none_or(|v| parse_bool(&v)) {
            Latency::Simulated
        } else {
            Latency::None
        };

        Ok(Self {
            cataloging: domain(Domain::Cataloging)?,
            ordering: domain(Domain::Ordering)?,
            shipping: domain(Domain::Shipping)?,
            paying: domain(Domain::Paying)?,
            profiling: domain(Domain::Profiling)?,
            api_base_url,
            latency,
            storage_dir: get("STORAGE_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from),
        })
    }

    /// Configuration with every domain in fake-data mode and no latency.
    ///
    /// Nothing touches the network; useful for demos and tests.
    #[must_use]
    pub fn fake(storage_dir: impl Into<PathBuf>) -> Self {
        let api_base_url = Url::parse(DEFAULT_API_BASE_URL)
            .unwrap_or_else(|_| unreachable!("default API base URL is valid"));
        let fake = |domain: Domain| DomainConfig {
            base_url: child_url(&api_base_url, domain.name()),
            use_fake_data: true,
        };

        Self {
            cataloging: fake(Domain::Cataloging),
            ordering: fake(Domain::Ordering),
            shipping: fake(Domain::Shipping),
            paying: fake(Domain::Paying),
            profiling: fake(Domain::Profiling),
            api_base_url,
            latency: Latency::None,
            storage_dir: storage_dir.into(),
        }
    }

    /// Configuration for one domain.
    #[must_use]
    pub const fn domain(&self, domain: Domain) -> &DomainConfig {
        match domain {
            Domain::Cataloging => &self.cataloging,
            Domain::Ordering => &self.ordering,
            Domain::Shipping => &self.shipping,
            Domain::Paying => &self.paying,
            Domain::Profiling => &self.profiling,
        }
    }

    /// Mutable configuration for one domain.
    pub const fn domain_mut(&mut self, domain: Domain) -> &mut DomainConfig {
        match domain {
            Domain::Cataloging => &mut self.cataloging,
            Domain::Ordering => &mut self.ordering,
            Domain::Shipping => &mut self.shipping,
            Domain::Paying => &mut self.paying,
            Domain::Profiling => &mut self.profiling,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a boolean flag (`true` in any case, or `1`).
fn parse_bool(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Parse an http(s) URL from an environment value.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Append one path segment to a base URL, tolerating a trailing slash.
fn child_url(base: &Url, segment: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(segment);
    }
    url
}
