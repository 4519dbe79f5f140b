//! Metrics collection and exposition.
//!
//! # Metrics
//! - `spa_navigations_total` (counter): navigations by outcome
//!   (`render`, `redirect`, `unmatched`, `loop`)
//! - `spa_resolution_duration_seconds` (histogram): time spent resolving
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Outcome label is a closed set to keep cardinality fixed

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::{Navigation, Resolution, RoutingError};

pub const NAVIGATIONS_TOTAL: &str = "spa_navigations_total";
pub const RESOLUTION_DURATION: &str = "spa_resolution_duration_seconds";

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Outcome label for a followed navigation.
pub fn navigation_outcome(result: &Result<Navigation, RoutingError>) -> &'static str {
    match result {
        Ok(nav) if nav.redirected_from.is_some() => "redirect",
        Ok(_) => "render",
        Err(e) => error_outcome(e),
    }
}

/// Outcome label for a single-hop resolution.
pub fn resolution_outcome(result: &Result<Resolution, RoutingError>) -> &'static str {
    match result {
        Ok(Resolution::Render(_)) => "render",
        Ok(Resolution::Redirect(_)) => "redirect",
        Err(e) => error_outcome(e),
    }
}

fn error_outcome(error: &RoutingError) -> &'static str {
    match error {
        RoutingError::NoRouteMatched { .. } => "unmatched",
        RoutingError::RedirectLoop { .. } => "loop",
        RoutingError::InvalidPattern { .. } => "invalid",
    }
}

pub fn record_navigation(result: &Result<Navigation, RoutingError>, start: Instant) {
    record(navigation_outcome(result), start);
}

pub fn record_resolution(result: &Result<Resolution, RoutingError>, start: Instant) {
    record(resolution_outcome(result), start);
}

fn record(outcome: &'static str, start: Instant) {
    counter!(NAVIGATIONS_TOTAL, "outcome" => outcome).increment(1);
    histogram!(RESOLUTION_DURATION).record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Router;

    #[test]
    fn test_outcome_labels() {
        let router = Router::default();
        assert_eq!(navigation_outcome(&router.navigate("/todo")), "render");
        assert_eq!(navigation_outcome(&router.navigate("/")), "redirect");
        assert_eq!(resolution_outcome(&router.resolve("/")), "redirect");

        let unmatched = Err(RoutingError::NoRouteMatched { path: "/x".into() });
        assert_eq!(resolution_outcome(&unmatched), "unmatched");
    }
}
