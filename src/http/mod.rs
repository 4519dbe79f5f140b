//! HTTP host subsystem.
//!
//! Plays the part of the browser's address bar: every GET is one
//! navigation request against the shared router.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, base path stripping)
//!     → router.resolve(path)
//!     → response.rs (HTML document, 302 redirect or error)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdGenerator, X_REQUEST_ID};
pub use server::HttpServer;
