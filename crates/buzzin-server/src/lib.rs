//! # buzzin-server
//!
//! REST API over the link store. Routes live under `/api`:
//!
//! - `GET    /api/links/{userId}` lists a user's links, newest first
//! - `POST   /api/links` validates and creates a link
//! - `DELETE /api/links/{id}` deletes a link (idempotent)
//! - `GET    /api/health` liveness probe

pub mod api;
pub mod config;
pub mod error;

pub use api::{build_router, serve, AppState};
pub use config::ServerConfig;
pub use error::ServerError;
