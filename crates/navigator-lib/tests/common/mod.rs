#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use navigator_lib::{
    DistanceCache, DistanceCacheConfig, Error, LocationId, NameResolver, Result,
    RouteResolverClient,
};

pub const JITA: LocationId = 30000142;
pub const PERIMETER: LocationId = 30000144;
pub const AMARR: LocationId = 30002187;
pub const WORMHOLE: LocationId = 31000005;
pub const THERA: LocationId = 31001101;

/// In-memory name table that counts lookups.
#[derive(Default)]
pub struct StubNames {
    names: HashMap<LocationId, String>,
    failing: bool,
    calls: AtomicUsize,
}

impl StubNames {
    pub fn new() -> Self {
        Self::default()
            .with(JITA, "Jita")
            .with(PERIMETER, "Perimeter")
            .with(AMARR, "Amarr")
            .with(WORMHOLE, "J123456")
            .with(THERA, "Thera")
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, id: LocationId, name: &str) -> Self {
        self.names.insert(id, name.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NameResolver for StubNames {
    async fn name(&self, id: LocationId) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Error::Timeout {
                operation: "stub name lookup",
                limit: Duration::from_millis(1),
            });
        }
        self.names
            .get(&id)
            .cloned()
            .ok_or(Error::NameNotFound { id })
    }
}

/// Route table keyed by ordered pair, with optional delay and failure.
#[derive(Default)]
pub struct StubRoutes {
    paths: HashMap<(LocationId, LocationId), Vec<LocationId>>,
    delay: Option<Duration>,
    failing: bool,
    calls: AtomicUsize,
}

impl StubRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, from: LocationId, to: LocationId, path: &[LocationId]) -> Self {
        self.paths.insert((from, to), path.to_vec());
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteResolverClient for StubRoutes {
    async fn route(&self, from: LocationId, to: LocationId) -> Result<Vec<LocationId>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(Error::RouteService {
                from,
                to,
                message: "stub outage".to_string(),
            });
        }
        Ok(self.paths.get(&(from, to)).cloned().unwrap_or_default())
    }
}

pub fn cache_with(names: &Arc<StubNames>, routes: &Arc<StubRoutes>) -> DistanceCache {
    cache_with_config(names, routes, DistanceCacheConfig::default())
}

pub fn cache_with_config(
    names: &Arc<StubNames>,
    routes: &Arc<StubRoutes>,
    config: DistanceCacheConfig,
) -> DistanceCache {
    DistanceCache::with_config(names.clone(), routes.clone(), config)
}
