//! Web API module.
//!
//! Exposes the folder listing, the banner proxy and the OpenAPI document
//! over HTTP.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{build_app, create_router};
pub use server::WebServer;
