//! Single-page application bootstrap: route table, resolver and host.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;
pub mod routing;

pub use app::{App, MountedApp};
pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pages::Page;
pub use routing::{Resolution, Router, RoutingError};
