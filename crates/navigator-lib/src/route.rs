use std::fmt;

use serde::Serialize;

use crate::location::LocationId;

/// Directional cache key. `(a, b)` and `(b, a)` are distinct routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RouteKey {
    pub from: LocationId,
    pub to: LocationId,
}

impl RouteKey {
    pub fn new(from: LocationId, to: LocationId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// How a published route came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// The route service answered. An empty path means it found no route.
    Resolved,
    /// One endpoint is in wormhole space; the route service was not asked.
    Excluded,
    /// A collaborator failed or timed out.
    Failed,
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteStatus::Resolved => "resolved",
            RouteStatus::Excluded => "excluded",
            RouteStatus::Failed => "failed",
        };
        f.write_str(value)
    }
}

/// A memoized route between two systems.
///
/// `systems` lists the systems entered along the way, origin excluded, so the
/// hop count is simply its length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub key: RouteKey,
    pub systems: Vec<LocationId>,
    pub status: RouteStatus,
}

impl Route {
    pub fn resolved(key: RouteKey, systems: Vec<LocationId>) -> Self {
        Self {
            key,
            systems,
            status: RouteStatus::Resolved,
        }
    }

    pub fn excluded(key: RouteKey) -> Self {
        Self {
            key,
            systems: Vec::new(),
            status: RouteStatus::Excluded,
        }
    }

    pub fn failed(key: RouteKey) -> Self {
        Self {
            key,
            systems: Vec::new(),
            status: RouteStatus::Failed,
        }
    }

    /// Number of jumps along the route.
    pub fn hops(&self) -> usize {
        self.systems.len()
    }
}
