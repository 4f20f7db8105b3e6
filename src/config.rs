use std::num::ParseIntError;
use std::time::Duration;

use reqwest::Url;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://localhost:8000/graphql/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid GRAPHQL_ENDPOINT {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },
    #[error("invalid GRAPHQL_TIMEOUT_SECS {value:?}: {source}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("GRAPHQL_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

/// Where the GraphQL collaborator lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

impl GraphqlConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = lookup("GRAPHQL_ENDPOINT").unwrap_or_else(|| DEFAULT_GRAPHQL_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            reason: e.to_string(),
            value: endpoint.clone(),
        })?;

        let timeout = match lookup("GRAPHQL_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidTimeout { value, source })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout),
        })
    }
}
