//! Error types for the circulation engine
//!
//! This module defines all operation-failure types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Taxonomy
//!
//! - **Not-found**: `UnknownTitle`
//! - **Conflict**: `DuplicateTitle`, `AlreadyQueued`, `NotQueued`
//! - **Illegal-state**: `NotAvailable`, `ReservedForOther`, `NotCheckedOut`,
//!   `WrongHolder`, `NotOnShelf`, `TitleInUse`
//! - **Empty-structure**: `EmptyShelf`
//! - **Boundary**: `InvalidId`, `HoldLimitReached`, `SnapshotInvalid`
//!
//! Every precondition violation is detected before any mutation and surfaced
//! synchronously. Internal invariant violations (shelf/status disagreement)
//! are defects, not errors: they are debug-asserted, never returned.

use crate::types::{IdError, PatronId, TitleId};
use thiserror::Error;

/// Result type alias for circulation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for circulation operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Operation referenced a title absent from the catalog
    #[error("unknown title: {0}")]
    UnknownTitle(TitleId),

    /// Title already exists in the catalog
    #[error("duplicate title: {0}")]
    DuplicateTitle(TitleId),

    /// Patron already has a pending hold on the title
    #[error("patron {patron} already holds a reservation on {title}")]
    AlreadyQueued {
        /// Title being reserved
        title: TitleId,
        /// Patron who is already queued
        patron: PatronId,
    },

    /// Patron has no pending hold on the title
    #[error("patron {patron} holds no reservation on {title}")]
    NotQueued {
        /// Title whose queue was searched
        title: TitleId,
        /// Patron who is not queued
        patron: PatronId,
    },

    /// Title is checked out and cannot be checked out again
    #[error("title {0} is not available")]
    NotAvailable(TitleId),

    /// Title is reserved and the requester is not at the head of the queue
    #[error("title {0} is reserved for another patron")]
    ReservedForOther(TitleId),

    /// Return attempted on a title that is not checked out
    #[error("title {0} is not checked out")]
    NotCheckedOut(TitleId),

    /// Returner is not the current holder of the title
    #[error("returner does not hold title {0}")]
    WrongHolder(TitleId),

    /// Shelf operation on a title that is not physically on the shelf
    #[error("title {0} is not on the shelf")]
    NotOnShelf(TitleId),

    /// Removal attempted on a title that is checked out or has pending holds
    #[error("title {0} is in use (checked out or reserved)")]
    TitleInUse(TitleId),

    /// Query on an empty shelf
    #[error("shelf is empty")]
    EmptyShelf,

    /// Identifier failed validation
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// Hold queue for the title is at capacity
    #[error("hold queue for {title} is full (limit {limit})")]
    HoldLimitReached {
        /// Title whose queue is full
        title: TitleId,
        /// The enforced queue limit
        limit: usize,
    },

    /// Snapshot failed invariant re-validation on restore
    #[error("invalid snapshot: {0}")]
    SnapshotInvalid(String),
}
