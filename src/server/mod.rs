//! HTTP gateway: thin axum handlers that load a session, run the engine and
//! persist the outcome.

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod logging;
pub mod routes;

pub use bootstrap::{run_server, ServerConfig};
pub use error::ApiError;
pub use routes::{router, AppState};
