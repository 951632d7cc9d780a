//! The coordinating library
//!
//! `Library` owns the catalog (id → circulation record) and the shelf, and
//! is the only mutator of either. Its single correctness property:
//!
//! > an identifier is on the shelf **iff** its status is `OnShelf`.
//!
//! Every operation validates against the circulation record before touching
//! anything, commits the status change first, then applies the matching
//! shelf mutation. The shelf mutation cannot fail when the invariant holds
//! going in; the seam is debug-asserted rather than error-handled.
//!
//! ## Recency
//!
//! Only `checkout`, `return_title`, and the explicit `touch_access` reorder
//! the shelf. Status lookups and reports never do.

use folio_core::limits::MAX_HOLD_QUEUE;
use folio_core::{Error, PatronId, Result, TitleId};
use folio_shelf::Shelf;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::circulation::{BookState, CirculationStatus, TransitionDenied};

/// Notification that a returned title is claimable by its head requester
///
/// Emitted by [`Library::return_title`] when the returned title has holds
/// pending. This is a notification, not a checkout: the title sits on the
/// shelf until the requester acts (or an external scheduler acts for them).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldNotice {
    /// The title that became claimable
    pub title: TitleId,
    /// The patron at the head of its hold queue
    pub patron: PatronId,
}

/// Point-in-time view of one title, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleView {
    /// The title
    pub id: TitleId,
    /// Physical status at the time of the lookup
    pub status: CirculationStatus,
    /// Pending holds, head first
    pub holds: Vec<PatronId>,
}

/// Coordinator for catalog, circulation state, and shelf
///
/// # Example
///
/// ```
/// use folio_core::{PatronId, TitleId};
/// use folio_engine::Library;
///
/// let t1 = TitleId::new("T1").unwrap();
/// let bob = PatronId::new("bob").unwrap();
///
/// let mut library = Library::new();
/// library.add_title(t1.clone()).unwrap();
/// library.checkout(&t1, &bob).unwrap();
/// assert!(!library.is_on_shelf(&t1));
/// library.return_title(&t1, &bob).unwrap();
/// assert!(library.is_on_shelf(&t1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub(crate) books: FxHashMap<TitleId, BookState>,
    pub(crate) shelf: Shelf,
}

/// Attach title/patron context to a state-machine denial.
fn deny(title: &TitleId, patron: &PatronId, denial: TransitionDenied) -> Error {
    match denial {
        TransitionDenied::NotAvailable => Error::NotAvailable(title.clone()),
        TransitionDenied::ReservedForOther => Error::ReservedForOther(title.clone()),
        TransitionDenied::NotCheckedOut => Error::NotCheckedOut(title.clone()),
        TransitionDenied::WrongHolder => Error::WrongHolder(title.clone()),
        TransitionDenied::AlreadyQueued => Error::AlreadyQueued {
            title: title.clone(),
            patron: patron.clone(),
        },
        TransitionDenied::NotQueued => Error::NotQueued {
            title: title.clone(),
            patron: patron.clone(),
        },
        TransitionDenied::HoldLimitReached => Error::HoldLimitReached {
            title: title.clone(),
            limit: MAX_HOLD_QUEUE,
        },
        TransitionDenied::InUse => Error::TitleInUse(title.clone()),
    }
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    fn book(&self, id: &TitleId) -> Result<&BookState> {
        self.books
            .get(id)
            .ok_or_else(|| Error::UnknownTitle(id.clone()))
    }

    fn book_mut(&mut self, id: &TitleId) -> Result<&mut BookState> {
        self.books
            .get_mut(id)
            .ok_or_else(|| Error::UnknownTitle(id.clone()))
    }

    // ========== Catalog lifecycle ==========

    /// Add a title to the catalog: on shelf, at the front, no holds
    ///
    /// # Errors
    /// `DuplicateTitle` if the id is already cataloged.
    pub fn add_title(&mut self, id: TitleId) -> Result<()> {
        if self.books.contains_key(&id) {
            return Err(Error::DuplicateTitle(id));
        }
        self.books.insert(id.clone(), BookState::new());
        self.shelf.insert_front(id.clone());
        debug!(target: "folio::library", title = %id, "Title added to catalog");
        Ok(())
    }

    /// Remove a title from the catalog permanently
    ///
    /// # Errors
    /// `UnknownTitle` if absent; `TitleInUse` while checked out or with
    /// pending holds.
    pub fn remove_title(&mut self, id: &TitleId) -> Result<()> {
        let book = self.book(id)?;
        if let Err(denial) = book.ensure_idle() {
            warn!(target: "folio::library", title = %id, error = %denial, "Removal rejected");
            return Err(Error::TitleInUse(id.clone()));
        }
        self.books.remove(id);
        // ensure_idle guarantees OnShelf, so the shelf must hold it
        debug_assert!(self.shelf.contains(id), "shelf/status disagreement for {id}");
        self.shelf.remove(id);
        debug!(target: "folio::library", title = %id, "Title removed from catalog");
        Ok(())
    }

    // ========== Circulation ==========

    /// Check a title out to a patron, taking it off the shelf
    ///
    /// # Errors
    /// `UnknownTitle`, `NotAvailable` (already out), `ReservedForOther`
    /// (holds pending and the patron is not at the head).
    pub fn checkout(&mut self, id: &TitleId, patron: &PatronId) -> Result<()> {
        let book = self.book_mut(id)?;
        book.check_out(patron).map_err(|denial| {
            warn!(target: "folio::library", title = %id, patron = %patron, error = %denial, "Checkout rejected");
            deny(id, patron, denial)
        })?;
        debug_assert!(self.shelf.contains(id), "shelf/status disagreement for {id}");
        self.shelf.remove(id);
        debug!(target: "folio::library", title = %id, patron = %patron, "Title checked out");
        Ok(())
    }

    /// Return a checked-out title, reshelving it at the front
    ///
    /// When the title has holds pending, the returned `HoldNotice` names the
    /// head requester. Delivering it is the caller's job (see
    /// `SharedLibrary`), after this call has completed.
    ///
    /// # Errors
    /// `UnknownTitle`, `NotCheckedOut`, `WrongHolder`.
    pub fn return_title(&mut self, id: &TitleId, patron: &PatronId) -> Result<Option<HoldNotice>> {
        let book = self.book_mut(id)?;
        let next = book
            .check_in(patron)
            .map_err(|denial| deny(id, patron, denial))?;
        debug_assert!(!self.shelf.contains(id), "shelf/status disagreement for {id}");
        self.shelf.insert_front(id.clone());
        debug!(target: "folio::library", title = %id, patron = %patron, "Title returned");
        Ok(next.map(|claimant| HoldNotice {
            title: id.clone(),
            patron: claimant,
        }))
    }

    /// Queue a hold for a patron
    ///
    /// # Errors
    /// `UnknownTitle`, `AlreadyQueued`, `HoldLimitReached`.
    pub fn reserve(&mut self, id: &TitleId, patron: &PatronId) -> Result<()> {
        let book = self.book_mut(id)?;
        book.reserve(patron)
            .map_err(|denial| deny(id, patron, denial))?;
        debug!(target: "folio::library", title = %id, patron = %patron, "Hold queued");
        Ok(())
    }

    /// Cancel a patron's pending hold
    ///
    /// # Errors
    /// `UnknownTitle`, `NotQueued`.
    pub fn cancel_reservation(&mut self, id: &TitleId, patron: &PatronId) -> Result<()> {
        let book = self.book_mut(id)?;
        book.cancel_hold(patron)
            .map_err(|denial| deny(id, patron, denial))?;
        debug!(target: "folio::library", title = %id, patron = %patron, "Hold cancelled");
        Ok(())
    }

    // ========== Recency ==========

    /// Record an in-library access, moving the title to the shelf front
    ///
    /// # Errors
    /// `UnknownTitle`, `NotOnShelf` while checked out.
    pub fn touch_access(&mut self, id: &TitleId) -> Result<()> {
        let book = self.book(id)?;
        if !book.is_on_shelf() {
            return Err(Error::NotOnShelf(id.clone()));
        }
        self.shelf.touch(id);
        debug!(target: "folio::library", title = %id, "Shelf access recorded");
        Ok(())
    }

    /// Least-recently-touched shelved title: the first reshelving candidate
    ///
    /// # Errors
    /// `EmptyShelf` when nothing is shelved.
    pub fn least_recent_candidate(&self) -> Result<&TitleId> {
        self.shelf.peek_back()
    }

    // ========== Reports (never recency-affecting) ==========

    /// Status, holder, and hold queue for one title
    ///
    /// # Errors
    /// `UnknownTitle` if absent.
    pub fn status(&self, id: &TitleId) -> Result<TitleView> {
        let book = self.book(id)?;
        Ok(TitleView {
            id: id.clone(),
            status: book.status().clone(),
            holds: book.holds().cloned().collect(),
        })
    }

    /// Whether one copy could be checked out right now by an arbitrary patron
    ///
    /// True iff the title is on the shelf with no pending holds. Unknown
    /// titles are simply unavailable.
    pub fn is_available(&self, id: &TitleId) -> bool {
        self.books
            .get(id)
            .map_or(false, |book| book.is_on_shelf() && book.hold_count() == 0)
    }

    /// Whether the title is physically on the shelf
    pub fn is_on_shelf(&self, id: &TitleId) -> bool {
        self.shelf.contains(id)
    }

    /// Title in the most prominent (front) shelf position, if any
    pub fn most_recent_display(&self) -> Option<&TitleId> {
        self.shelf.peek_front()
    }

    /// Shelved titles front-to-back (most- to least-recently-touched)
    pub fn shelf_sequence(&self) -> folio_shelf::Iter<'_> {
        self.shelf.iter()
    }

    /// Every cataloged title with its current view, sorted by id
    pub fn inventory(&self) -> Vec<TitleView> {
        let mut views: Vec<TitleView> = self
            .books
            .iter()
            .map(|(id, book)| TitleView {
                id: id.clone(),
                status: book.status().clone(),
                holds: book.holds().cloned().collect(),
            })
            .collect();
        views.sort_by(|a, b| a.id.cmp(&b.id));
        views
    }

    /// Number of cataloged titles (shelved or checked out)
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
