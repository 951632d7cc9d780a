//! Thread-safe handle around the library
//!
//! The cross-entity invariant spans two structures, so partial locking is
//! not an option: every operation runs under one coarse mutex. All
//! operations are O(1) or O(queue length) and do no I/O, so holding the
//! lock for a whole operation is cheap.
//!
//! ## Hold notifications
//!
//! `return_title` collects the `HoldNotice` while the lock is held and
//! dispatches it to registered observers strictly after the guard is
//! dropped. An observer is free to call straight back into the library
//! (e.g. to perform the head requester's checkout) without deadlocking;
//! the engine itself never recurses into its own operations.

use std::sync::Arc;

use folio_core::{PatronId, Result, TitleId};
use parking_lot::{Mutex, RwLock};

use crate::library::{HoldNotice, Library, TitleView};
use crate::snapshot::LibrarySnapshot;

/// Observer for "title now claimable" notifications
///
/// Implementations decide what a notice means: log it, page the patron, or
/// auto-checkout on their behalf. Called outside the library lock.
pub trait HoldObserver: Send + Sync {
    /// A returned title has holds pending; `notice.patron` is at the head.
    fn hold_available(&self, notice: &HoldNotice);
}

/// Clonable, thread-safe handle over a [`Library`]
///
/// All clones share the same underlying library and observer list.
#[derive(Clone, Default)]
pub struct SharedLibrary {
    inner: Arc<Mutex<Library>>,
    observers: Arc<RwLock<Vec<Arc<dyn HoldObserver>>>>,
}

impl SharedLibrary {
    /// Create a handle over an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing library (e.g. one restored from a snapshot)
    pub fn from_library(library: Library) -> Self {
        Self {
            inner: Arc::new(Mutex::new(library)),
            observers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register an observer for hold notifications
    pub fn register_observer(&self, observer: Arc<dyn HoldObserver>) {
        self.observers.write().push(observer);
    }

    // ========== Mutations ==========

    /// See [`Library::add_title`]
    pub fn add_title(&self, id: TitleId) -> Result<()> {
        self.inner.lock().add_title(id)
    }

    /// See [`Library::remove_title`]
    pub fn remove_title(&self, id: &TitleId) -> Result<()> {
        self.inner.lock().remove_title(id)
    }

    /// See [`Library::checkout`]
    pub fn checkout(&self, id: &TitleId, patron: &PatronId) -> Result<()> {
        self.inner.lock().checkout(id, patron)
    }

    /// See [`Library::return_title`]; observers are notified after the
    /// lock is released
    pub fn return_title(&self, id: &TitleId, patron: &PatronId) -> Result<Option<HoldNotice>> {
        let notice = self.inner.lock().return_title(id, patron)?;
        if let Some(notice) = &notice {
            // Clone the list out so a re-registering or re-entrant observer
            // cannot deadlock against the observer lock either.
            let observers: Vec<Arc<dyn HoldObserver>> = self.observers.read().clone();
            for observer in observers {
                observer.hold_available(notice);
            }
        }
        Ok(notice)
    }

    /// See [`Library::reserve`]
    pub fn reserve(&self, id: &TitleId, patron: &PatronId) -> Result<()> {
        self.inner.lock().reserve(id, patron)
    }

    /// See [`Library::cancel_reservation`]
    pub fn cancel_reservation(&self, id: &TitleId, patron: &PatronId) -> Result<()> {
        self.inner.lock().cancel_reservation(id, patron)
    }

    /// See [`Library::touch_access`]
    pub fn touch_access(&self, id: &TitleId) -> Result<()> {
        self.inner.lock().touch_access(id)
    }

    // ========== Reads (owned results; the lock never escapes) ==========

    /// See [`Library::least_recent_candidate`]
    pub fn least_recent_candidate(&self) -> Result<TitleId> {
        self.inner.lock().least_recent_candidate().cloned()
    }

    /// See [`Library::most_recent_display`]
    pub fn most_recent_display(&self) -> Option<TitleId> {
        self.inner.lock().most_recent_display().cloned()
    }

    /// See [`Library::status`]
    pub fn status(&self, id: &TitleId) -> Result<TitleView> {
        self.inner.lock().status(id)
    }

    /// See [`Library::is_available`]
    pub fn is_available(&self, id: &TitleId) -> bool {
        self.inner.lock().is_available(id)
    }

    /// See [`Library::is_on_shelf`]
    pub fn is_on_shelf(&self, id: &TitleId) -> bool {
        self.inner.lock().is_on_shelf(id)
    }

    /// Shelf order front-to-back, captured under the lock
    pub fn shelf_sequence(&self) -> Vec<TitleId> {
        self.inner.lock().shelf_sequence().cloned().collect()
    }

    /// See [`Library::inventory`]
    pub fn inventory(&self) -> Vec<TitleView> {
        self.inner.lock().inventory()
    }

    /// See [`Library::len`]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// See [`Library::is_empty`]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// See [`Library::snapshot`]
    pub fn snapshot(&self) -> LibrarySnapshot {
        self.inner.lock().snapshot()
    }
}
