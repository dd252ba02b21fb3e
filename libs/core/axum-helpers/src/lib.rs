//! # Axum Helpers
//!
//! Shared building blocks for the HTTP side of the service.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, liveness endpoint, graceful shutdown
//! - **[`http`]**: Security-header middleware
//! - **[`errors`]**: `AppError` and the JSON error body
//! - **[`extractors`]**: `JsonOrForm` body extractor
//! - **[`audit`]**: Structured audit events and client metadata helpers
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes, None);
//!     create_app(router, &ServerConfig::default()).await
//! }
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    HealthResponse, ShutdownCoordinator, create_app, create_production_app, create_router,
    health_router, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::security_headers;

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::JsonOrForm;

// Re-export audit types
pub use audit::{
    AuditEvent, AuditOutcome, ClientMetadata, extract_ip_from_headers, extract_ip_from_socket,
    extract_user_agent,
};
