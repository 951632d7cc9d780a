//! Folio - embedded circulation and shelving engine
//!
//! Folio tracks a physical library's single-copy inventory: where each title
//! sits, who holds or reserved it, and a recency ordering of shelf activity
//! (most recently touched titles up front, least recently touched easy to
//! find for reshelving decisions).
//!
//! # Quick Start
//!
//! ```
//! use folio::{Library, PatronId, TitleId};
//!
//! let dune = TitleId::new("dune").unwrap();
//! let bob = PatronId::new("bob").unwrap();
//!
//! let mut library = Library::new();
//! library.add_title(dune.clone()).unwrap();
//! library.checkout(&dune, &bob).unwrap();
//! library.return_title(&dune, &bob).unwrap();
//! assert!(library.is_available(&dune));
//! ```
//!
//! # Architecture
//!
//! [`Library`] is the single-owner coordinator over the circulation state
//! machine and the recency [`Shelf`]; [`SharedLibrary`] adds the coarse
//! lock and post-commit hold notifications for concurrent callers.
//! Persistence hands off at [`LibrarySnapshot`].

// Re-export the public API from the member crates
pub use folio_core::{Error, IdError, PatronId, Result, TitleId, MAX_HOLD_QUEUE, MAX_ID_LENGTH};
pub use folio_engine::{
    BookState, CirculationStatus, HoldNotice, HoldObserver, Library, LibrarySnapshot,
    SharedLibrary, TitleRecord, TitleView, TransitionDenied,
};
pub use folio_shelf::{Iter as ShelfIter, Shelf};
