//! Navigator library entry points.
//!
//! This crate memoizes jump distances between solar systems. The
//! [`DistanceCache`] classifies both endpoints through a [`NameResolver`],
//! skips wormhole space entirely, delegates everything else to a
//! [`RouteResolverClient`], and publishes each ordered pair exactly once.
//! Higher-level consumers (the CLI, web front ends) should only depend on the
//! items exported here.
//!

#![deny(warnings)]

pub mod cache;
pub mod classifier;
pub mod error;
pub mod esi;
pub mod location;
pub mod metrics;
pub mod resolver;
pub mod route;

pub use cache::{DistanceCache, DistanceCacheConfig};
pub use classifier::{classify, is_excluded_class, LocationClass};
pub use error::{Error, Result};
pub use esi::{EsiClient, EsiConfig};
pub use location::{validate_location, LocationId};
pub use resolver::{NameResolver, RouteResolverClient};
pub use route::{Route, RouteKey, RouteStatus};
