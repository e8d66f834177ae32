//! # jotter-core
//!
//! Core types, validation rules and session state for the jotter notes
//! client.
//!
//! This crate provides the data model shared with the notes API, the
//! client-side rules every note and credential must satisfy, the error
//! taxonomy, and the [`SessionState`] context object that every
//! authenticated component reads.
//!
//! ## Logging fields
//!
//! All crates log with `tracing` using one field vocabulary:
//! `subsystem` (`"session"`, `"client"`, `"store"`, `"cli"`), `component`,
//! `op`, `request_id` (UUIDv7 per outbound request), `note_id`, `user_id`,
//! `status`, `duration_ms`, `result_count` and `error`. Bearer tokens and
//! passwords are never logged.

pub mod defaults;
pub mod error;
pub mod models;
pub mod session;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result, ValidationError};
pub use models::*;
pub use session::{Session, SessionEvent, SessionState, SignOutReason};
pub use validation::{validate_content, validate_tags, validate_title, TagSet};
