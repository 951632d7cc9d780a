//! Circulation engine for Folio
//!
//! Three layers, leaf-first:
//! - [`circulation`]: the per-title state machine (status + hold queue)
//! - [`library`]: the coordinator keeping catalog, circulation state, and
//!   the recency shelf consistent under every operation
//! - [`shared`]: the coarse-locked, thread-safe handle with post-commit
//!   hold notifications
//!
//! [`snapshot`] carries the persistence boundary: a serde value that
//! captures and restores the whole state, shelf order included.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod circulation;
pub mod library;
pub mod shared;
pub mod snapshot;

// Re-export the public surface
pub use circulation::{BookState, CirculationStatus, TransitionDenied};
pub use library::{HoldNotice, Library, TitleView};
pub use shared::{HoldObserver, SharedLibrary};
pub use snapshot::{LibrarySnapshot, TitleRecord};
