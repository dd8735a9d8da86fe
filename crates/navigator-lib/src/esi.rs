//! EVE Swagger Interface client.
//!
//! [`EsiClient`] implements both collaborator contracts: names come from
//! `POST /universe/names/` and routes from `GET /route/{origin}/{destination}/`.
//! Resolved names are memoized for the lifetime of the client.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::location::LocationId;
use crate::resolver::{NameResolver, RouteResolverClient};

const DEFAULT_BASE_URL: &str = "https://esi.evetech.net/latest";
const DEFAULT_DATASOURCE: &str = "tranquility";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BASE_URL_ENV: &str = "NAVIGATOR_ESI_BASE_URL";
const DATASOURCE_ENV: &str = "NAVIGATOR_ESI_DATASOURCE";
const TIMEOUT_ENV: &str = "NAVIGATOR_ESI_TIMEOUT_SECS";

/// Connection settings for the ESI client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsiConfig {
    /// Versioned API root without a trailing slash.
    pub base_url: String,
    /// ESI datasource query parameter.
    pub datasource: String,
    /// Whole-request timeout applied by the HTTP client.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for EsiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            datasource: DEFAULT_DATASOURCE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: user_agent(),
        }
    }
}

impl EsiConfig {
    /// Create configuration from environment variables.
    ///
    /// - `NAVIGATOR_ESI_BASE_URL`: API root (default: `https://esi.evetech.net/latest`)
    /// - `NAVIGATOR_ESI_DATASOURCE`: datasource (default: `tranquility`)
    /// - `NAVIGATOR_ESI_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(BASE_URL_ENV) {
            config.base_url = value;
        }
        if let Ok(value) = std::env::var(DATASOURCE_ENV) {
            config.datasource = value;
        }
        if let Ok(value) = std::env::var(TIMEOUT_ENV) {
            let secs = value.trim().parse::<u64>().map_err(|_| Error::InvalidConfig {
                key: TIMEOUT_ENV.to_string(),
                value: value.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Point the client at a different API root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn user_agent() -> String {
    format!(
        "navigator-lib/{version} (jump distance cache)",
        version = env!("CARGO_PKG_VERSION")
    )
}

#[derive(Debug, Deserialize)]
struct NameEntry {
    id: LocationId,
    name: String,
}

/// HTTP client for ESI name and route lookups.
pub struct EsiClient {
    http: Client,
    config: EsiConfig,
    names: DashMap<LocationId, String>,
}

impl EsiClient {
    pub fn new(config: EsiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            http,
            config,
            names: DashMap::new(),
        })
    }

    pub fn config(&self) -> &EsiConfig {
        &self.config
    }

    fn route_url(&self, from: LocationId, to: LocationId) -> String {
        format!(
            "{}/route/{}/{}/?datasource={}",
            self.base(),
            from,
            to,
            self.config.datasource
        )
    }

    fn names_url(&self) -> String {
        format!(
            "{}/universe/names/?datasource={}",
            self.base(),
            self.config.datasource
        )
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

#[async_trait]
impl NameResolver for EsiClient {
    async fn name(&self, id: LocationId) -> Result<String> {
        if let Some(name) = self.names.get(&id) {
            return Ok(name.value().clone());
        }

        let entries: Vec<NameEntry> = self
            .http
            .post(self.names_url())
            .header(ACCEPT, "application/json")
            .json(&[id])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let name = entries
            .into_iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.name)
            .ok_or(Error::NameNotFound { id })?;

        debug!(id, name = %name, "resolved system name");
        self.names.insert(id, name.clone());
        Ok(name)
    }
}

#[async_trait]
impl RouteResolverClient for EsiClient {
    async fn route(&self, from: LocationId, to: LocationId) -> Result<Vec<LocationId>> {
        let response = self
            .http
            .get(self.route_url(from, to))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(from, to, "route service found no route");
            return Ok(Vec::new());
        }

        let path: Vec<LocationId> = response.error_for_status()?.json().await?;
        hops_from_path(from, to, path)
    }
}

/// ESI paths start at the origin; the cache counts systems entered.
fn hops_from_path(
    from: LocationId,
    to: LocationId,
    mut path: Vec<LocationId>,
) -> Result<Vec<LocationId>> {
    match path.first() {
        Some(&first) if first == from => {
            path.remove(0);
            Ok(path)
        }
        Some(&first) => Err(Error::RouteService {
            from,
            to,
            message: format!("path starts at {first} instead of the origin"),
        }),
        None => Ok(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_dropped_from_paths() {
        let hops = hops_from_path(1, 3, vec![1, 2, 3]).unwrap();
        assert_eq!(hops, vec![2, 3]);
    }

    #[test]
    fn empty_path_stays_empty() {
        assert!(hops_from_path(1, 3, Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn path_from_elsewhere_is_rejected() {
        match hops_from_path(1, 3, vec![9, 3]) {
            Err(Error::RouteService { from, to, .. }) => assert_eq!((from, to), (1, 3)),
            other => panic!("expected RouteService error, got {other:?}"),
        }
    }

    #[test]
    fn urls_carry_datasource_and_ignore_trailing_slash() {
        let config = EsiConfig::default().with_base_url("http://localhost:9000/");
        let client = EsiClient::new(config).expect("client builds");
        assert_eq!(
            client.route_url(30000142, 30000144),
            "http://localhost:9000/route/30000142/30000144/?datasource=tranquility"
        );
        assert_eq!(
            client.names_url(),
            "http://localhost:9000/universe/names/?datasource=tranquility"
        );
    }

    #[test]
    fn default_config_targets_tranquility() {
        let config = EsiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.datasource, "tranquility");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("navigator-lib/"));
    }
}
