//! Distance cache metrics.
//!
//! Everything is emitted through the `metrics` facade; without an installed
//! recorder these calls are no-ops. Binaries that want Prometheus output
//! install an exporter at startup.

/// Record a lookup answered from an already published route.
///
/// Increments the `navigator_route_cache_hits_total` counter.
pub fn record_cache_hit() {
    metrics::counter!("navigator_route_cache_hits_total").increment(1);
}

/// Record a route answered by the route service.
///
/// Increments `navigator_routes_resolved_total` and records the hop count to
/// the `navigator_route_hops` histogram.
pub fn record_route_resolved(hops: usize) {
    metrics::counter!("navigator_routes_resolved_total").increment(1);
    metrics::histogram!("navigator_route_hops").record(hops as f64);
}

/// Record a pair skipped because an endpoint is in wormhole space.
pub fn record_route_excluded() {
    metrics::counter!("navigator_routes_excluded_total").increment(1);
}

/// Record a pair memoized as failed.
///
/// # Arguments
///
/// * `reason` - The failure reason (e.g., "timeout", "http", "name_not_found")
pub fn record_route_failed(reason: &'static str) {
    metrics::counter!("navigator_routes_failed_total", "reason" => reason).increment(1);
}
