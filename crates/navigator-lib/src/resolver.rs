//! Contracts for the external services the distance cache depends on.

use async_trait::async_trait;

use crate::error::Result;
use crate::location::LocationId;

/// Resolves a location id to its display name.
///
/// Implementations may suspend on network I/O and are expected to cache
/// names themselves; the distance cache asks at most twice per ordered pair.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn name(&self, id: LocationId) -> Result<String>;
}

/// Computes the path between two known-space systems.
///
/// The returned sequence lists the systems entered after leaving `from`, so
/// its length is the jump count. An empty sequence means no route exists.
/// Never called for `from == to` or when either endpoint is wormhole space.
#[async_trait]
pub trait RouteResolverClient: Send + Sync {
    async fn route(&self, from: LocationId, to: LocationId) -> Result<Vec<LocationId>>;
}
