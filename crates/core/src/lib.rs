//! Core types for Folio
//!
//! This crate defines the foundational types used throughout the system:
//! - TitleId / PatronId: validated opaque identifiers
//! - Error: the operation-failure taxonomy
//! - Limits: identifier and hold-queue size limits
//!
//! Everything here is free of circulation logic; the shelf and engine crates
//! build on these types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use limits::{MAX_HOLD_QUEUE, MAX_ID_LENGTH};
pub use types::{IdError, PatronId, TitleId};
