//! # buzzin-client
//!
//! Headless client for the Buzzin link board.
//!
//! [`LinkBoard`] holds everything the single-page UI renders (the link list,
//! form fields, per-platform sections and toast) and keeps it in step with
//! the API server through a [`LinkApi`] implementation. When the server
//! cannot be reached on mount, the board falls back to the copy cached in
//! [`LocalStorage`] and says so through [`Provenance`].

pub mod api;
pub mod config;
pub mod error;
pub mod identity;
pub mod state;
pub mod storage;

pub use api::{HttpLinkApi, LinkApi};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use state::{LinkBoard, Phase, PlatformSection, Provenance, Toast, ToastKind};
pub use storage::LocalStorage;
