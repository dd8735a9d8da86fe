//! Memoized jump distances between solar systems.
//!
//! [`DistanceCache`] is the only writer of the route table. Each ordered pair
//! gets a write-once slot; the first caller to reach an empty slot runs the
//! classification and route lookup while every other caller for that pair
//! waits on the same slot. Distinct pairs never contend beyond the map shard.
//!
//! ```text
//! ensure_route(a, b)
//!   a == b ─────────────────────────────► 0
//!   slot published ─────────────────────► hops
//!   claim slot
//!     name(a), name(b) ── wormhole ─────► publish Excluded, 0
//!     route(a, b) ─────── ok ───────────► publish Resolved, len
//!                  └───── err/timeout ──► publish Failed, 0
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::classifier::is_excluded_class;
use crate::error::{Error, Result};
use crate::location::{validate_location, LocationId};
use crate::metrics;
use crate::resolver::{NameResolver, RouteResolverClient};
use crate::route::{Route, RouteKey};

const NAME_TIMEOUT_ENV: &str = "NAVIGATOR_NAME_TIMEOUT_MS";
const ROUTE_TIMEOUT_ENV: &str = "NAVIGATOR_ROUTE_TIMEOUT_MS";

/// Limits applied to collaborator calls made on a cache miss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceCacheConfig {
    /// Upper bound for each name lookup. `None` waits indefinitely.
    pub name_timeout: Option<Duration>,
    /// Upper bound for the route lookup. `None` waits indefinitely.
    pub route_timeout: Option<Duration>,
}

impl DistanceCacheConfig {
    /// Create configuration from environment variables.
    ///
    /// - `NAVIGATOR_NAME_TIMEOUT_MS`: per-name lookup limit in milliseconds
    /// - `NAVIGATOR_ROUTE_TIMEOUT_MS`: route lookup limit in milliseconds
    ///
    /// Unset variables leave the corresponding limit disabled.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            name_timeout: millis_from_env(NAME_TIMEOUT_ENV)?,
            route_timeout: millis_from_env(ROUTE_TIMEOUT_ENV)?,
        })
    }

    pub fn with_name_timeout(mut self, limit: Duration) -> Self {
        self.name_timeout = Some(limit);
        self
    }

    pub fn with_route_timeout(mut self, limit: Duration) -> Self {
        self.route_timeout = Some(limit);
        self
    }
}

fn millis_from_env(key: &str) -> Result<Option<Duration>> {
    match std::env::var(key) {
        Ok(value) => parse_millis(key, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| Error::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        })
}

struct Inner {
    names: Arc<dyn NameResolver>,
    routes: Arc<dyn RouteResolverClient>,
    config: DistanceCacheConfig,
    slots: DashMap<RouteKey, Arc<OnceCell<Route>>>,
}

/// Process-wide memo of jump distances.
///
/// Cloning is cheap and every clone shares the same table, so the composition
/// root builds one instance and hands clones to whoever needs it.
///
/// Entries are never evicted or refreshed. Memory grows with the number of
/// distinct ordered pairs queried, and a pair whose lookup failed stays at
/// distance 0 until the process restarts.
#[derive(Clone)]
pub struct DistanceCache {
    inner: Arc<Inner>,
}

impl DistanceCache {
    pub fn new(names: Arc<dyn NameResolver>, routes: Arc<dyn RouteResolverClient>) -> Self {
        Self::with_config(names, routes, DistanceCacheConfig::default())
    }

    pub fn with_config(
        names: Arc<dyn NameResolver>,
        routes: Arc<dyn RouteResolverClient>,
        config: DistanceCacheConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                names,
                routes,
                config,
                slots: DashMap::new(),
            }),
        }
    }

    /// Make sure the route `from -> to` is known and return its hop count.
    ///
    /// Concurrent calls for the same pair share a single computation. Lookup
    /// failures are logged and memoized as zero hops rather than returned;
    /// the only error is an invalid location id, which leaves the cache
    /// untouched.
    pub async fn ensure_route(&self, from: LocationId, to: LocationId) -> Result<usize> {
        validate_location(from)?;
        validate_location(to)?;

        if from == to {
            return Ok(0);
        }

        let key = RouteKey::new(from, to);
        let slot = self.slot(key);

        if let Some(route) = slot.get() {
            debug!(from, to, hops = route.hops(), "route cache hit");
            metrics::record_cache_hit();
            return Ok(route.hops());
        }

        let route = slot.get_or_init(|| self.compute(key)).await;
        Ok(route.hops())
    }

    /// Read the memoized hop count for `from -> to` without computing it.
    ///
    /// Returns 0 for identical endpoints and for pairs that have not been
    /// published yet.
    pub fn get_distance(&self, from: LocationId, to: LocationId) -> Result<usize> {
        validate_location(from)?;
        validate_location(to)?;

        if from == to {
            return Ok(0);
        }

        Ok(self
            .published(RouteKey::new(from, to))
            .map(|route| route.hops())
            .unwrap_or(0))
    }

    /// The published route for `from -> to`, if any.
    ///
    /// Unlike [`get_distance`](Self::get_distance) this tells apart a pair
    /// that was never computed from one that resolved to zero hops, was
    /// excluded, or failed.
    pub fn lookup(&self, from: LocationId, to: LocationId) -> Option<Route> {
        self.published(RouteKey::new(from, to))
    }

    /// Number of published routes.
    pub fn len(&self) -> usize {
        self.inner
            .slots
            .iter()
            .filter(|slot| slot.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn published(&self, key: RouteKey) -> Option<Route> {
        self.inner
            .slots
            .get(&key)
            .and_then(|slot| slot.value().get().cloned())
    }

    /// Fetch or create the slot for `key`. The map guard is released before
    /// the caller awaits anything.
    fn slot(&self, key: RouteKey) -> Arc<OnceCell<Route>> {
        if let Some(slot) = self.inner.slots.get(&key) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.inner.slots.entry(key).or_default().value())
    }

    async fn compute(&self, key: RouteKey) -> Route {
        match self.any_endpoint_excluded(key).await {
            Ok(true) => {
                info!(
                    from = key.from,
                    to = key.to,
                    "endpoint in wormhole space; skipping route lookup"
                );
                metrics::record_route_excluded();
                return Route::excluded(key);
            }
            Ok(false) => {}
            Err(err) => return self.failed(key, "name lookup", err),
        }

        let lookup = self.inner.routes.route(key.from, key.to);
        match with_timeout("route lookup", self.inner.config.route_timeout, lookup).await {
            Ok(systems) => {
                let route = Route::resolved(key, systems);
                debug!(from = key.from, to = key.to, hops = route.hops(), "route resolved");
                metrics::record_route_resolved(route.hops());
                route
            }
            Err(err) => self.failed(key, "route lookup", err),
        }
    }

    async fn any_endpoint_excluded(&self, key: RouteKey) -> Result<bool> {
        for id in [key.from, key.to] {
            let lookup = self.inner.names.name(id);
            let name = with_timeout("name lookup", self.inner.config.name_timeout, lookup).await?;
            if is_excluded_class(&name) {
                debug!(id, name = %name, "system classified as wormhole space");
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn failed(&self, key: RouteKey, stage: &'static str, err: Error) -> Route {
        warn!(
            from = key.from,
            to = key.to,
            stage,
            error = %err,
            "route lookup failed; memoizing zero distance"
        );
        metrics::record_route_failed(err.reason());
        Route::failed(key)
    }
}

async fn with_timeout<T, F>(operation: &'static str, limit: Option<Duration>, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| Error::Timeout { operation, limit })?,
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_millis_accepts_integers() {
        assert_eq!(
            parse_millis(ROUTE_TIMEOUT_ENV, " 250 ").unwrap(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn parse_millis_rejects_garbage() {
        match parse_millis(NAME_TIMEOUT_ENV, "soon") {
            Err(Error::InvalidConfig { key, value }) => {
                assert_eq!(key, NAME_TIMEOUT_ENV);
                assert_eq!(value, "soon");
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn config_builders_set_limits() {
        let config = DistanceCacheConfig::default()
            .with_name_timeout(Duration::from_millis(10))
            .with_route_timeout(Duration::from_secs(2));
        assert_eq!(config.name_timeout, Some(Duration::from_millis(10)));
        assert_eq!(config.route_timeout, Some(Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn with_timeout_maps_elapsed_to_timeout_error() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, Error>(1)
        };
        match with_timeout("route lookup", Some(Duration::from_millis(5)), slow).await {
            Err(Error::Timeout { operation, limit }) => {
                assert_eq!(operation, "route lookup");
                assert_eq!(limit, Duration::from_millis(5));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn with_timeout_passes_results_through() {
        let fast = async { Ok::<_, Error>(7) };
        assert_eq!(with_timeout("name lookup", None, fast).await.unwrap(), 7);
    }
}
