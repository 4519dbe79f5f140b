//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, route compilation)
//!     → AppConfig (validated, immutable)
//!     → Router built once and shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults; an empty file yields the declared routes
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AppConfig, AppSection, ListenerConfig, ObservabilityConfig, RouteConfig, RouterConfig,
    TimeoutConfig,
};
pub use validation::{compile_router, validate_config, ValidationError};

impl AppConfig {
    /// Validate this configuration and build its router.
    pub fn build_router(&self) -> Result<crate::routing::Router, ConfigError> {
        compile_router(self).map_err(ConfigError::Validation)
    }
}
