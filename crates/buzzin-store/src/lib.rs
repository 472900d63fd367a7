//! # buzzin-store
//!
//! Persistent record store for saved links, backed by SQLite.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection`, runs schema migrations on open and provides typed
//! helpers for the three link operations: insert, list by user and delete.

pub mod database;
pub mod links;
pub mod migrations;

mod error;

pub use buzzin_shared::types::{Link, NewLink, Platform};
pub use database::Database;
pub use error::{Result, StoreError};
