//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the app.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::pages::Page;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application shell settings (mount target, title).
    pub app: AppSection,

    /// Router behaviour.
    pub router: RouterConfig,

    /// Route declarations, in match order.
    pub routes: Vec<RouteConfig>,

    /// Listener configuration for the HTTP host.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSection::default(),
            router: RouterConfig::default(),
            routes: default_routes(),
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// The two routes the application is declared with.
fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            name: None,
            path: "/todo".to_string(),
            component: Some(Page::Todo),
            redirect: None,
        },
        RouteConfig {
            name: None,
            path: "/:pathMatch(.*)*".to_string(),
            component: None,
            redirect: Some("/todo".to_string()),
        },
    ]
}

/// Application shell configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSection {
    /// Mount target selector (e.g., "#app").
    pub mount: String,

    /// Document title.
    pub title: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            mount: "#app".to_string(),
            title: "Todo".to_string(),
        }
    }
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Base path the application is served under.
    pub base: String,

    /// Maximum redirect hops per navigation.
    pub max_redirects: usize,

    /// Case-sensitive literal matching.
    pub sensitive: bool,

    /// Trailing slash is significant.
    pub strict: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            max_redirects: 1,
            sensitive: true,
            strict: true,
        }
    }
}

/// A single route declaration.
///
/// Exactly one of `component` and `redirect` must be set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    #[serde(default)]
    pub name: Option<String>,

    /// Pattern to match (literal or `/:name(.*)*`).
    pub path: String,

    /// Page component to render.
    #[serde(default)]
    pub component: Option<Page>,

    /// Absolute path to redirect to.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
