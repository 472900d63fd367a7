//! # buzzin-shared
//!
//! Types shared by the Buzzin store, API server and client: the [`Link`]
//! record, the fixed [`Platform`] set, request validation and the JSON bodies
//! exchanged over HTTP.

pub mod constants;
pub mod error;
pub mod protocol;
pub mod types;

pub use error::ValidationError;
pub use types::{Link, NewLink, Platform};
