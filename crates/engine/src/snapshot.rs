//! Snapshot boundary for the persistence layer
//!
//! The engine has no storage of its own; persistence is an external
//! collaborator. Its boundary is `LibrarySnapshot`: a plain serde value
//! carrying every title's record plus the exact front-to-back shelf order.
//!
//! Restoring trusts nothing: every invariant the engine maintains live is
//! re-derived and re-checked, and any disagreement fails with
//! `SnapshotInvalid` before a `Library` is handed out. Recency semantics
//! survive the round trip because the order list is positional.

use std::collections::VecDeque;

use folio_core::limits::MAX_HOLD_QUEUE;
use folio_core::{Error, PatronId, Result, TitleId};
use folio_shelf::Shelf;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::circulation::{BookState, CirculationStatus};
use crate::library::Library;

/// Serialized record for one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    /// The title
    pub id: TitleId,
    /// Physical status
    pub status: CirculationStatus,
    /// Pending holds, head first
    pub holds: Vec<PatronId>,
}

/// Serialized point-in-time state of a whole library
///
/// `shelf_order` lists shelved titles from most- to least-recently-touched
/// and must agree exactly with the `OnShelf` records in `titles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    /// One record per cataloged title, sorted by id
    pub titles: Vec<TitleRecord>,
    /// Shelf members, front-to-back
    pub shelf_order: Vec<TitleId>,
}

impl Library {
    /// Capture the full library state as a snapshot value
    ///
    /// Title records are sorted by id so equal states serialize identically.
    pub fn snapshot(&self) -> LibrarySnapshot {
        let mut titles: Vec<TitleRecord> = self
            .books
            .iter()
            .map(|(id, book)| TitleRecord {
                id: id.clone(),
                status: book.status().clone(),
                holds: book.holds().cloned().collect(),
            })
            .collect();
        titles.sort_by(|a, b| a.id.cmp(&b.id));
        LibrarySnapshot {
            titles,
            shelf_order: self.shelf.iter().cloned().collect(),
        }
    }

    /// Rebuild a library from a snapshot, re-validating every invariant
    ///
    /// # Errors
    /// `SnapshotInvalid` when the snapshot contains duplicate titles,
    /// duplicate or oversized hold queues, or a shelf order that disagrees
    /// with the recorded statuses.
    pub fn restore(snapshot: &LibrarySnapshot) -> Result<Self> {
        let mut books: FxHashMap<TitleId, BookState> = FxHashMap::default();
        for record in &snapshot.titles {
            if record.holds.len() > MAX_HOLD_QUEUE {
                return Err(Error::SnapshotInvalid(format!(
                    "hold queue for {} exceeds limit {MAX_HOLD_QUEUE}",
                    record.id
                )));
            }
            for (i, patron) in record.holds.iter().enumerate() {
                if record.holds[..i].contains(patron) {
                    return Err(Error::SnapshotInvalid(format!(
                        "duplicate hold for {patron} on {}",
                        record.id
                    )));
                }
            }
            let holds: VecDeque<PatronId> = record.holds.iter().cloned().collect();
            let state = BookState::from_parts(record.status.clone(), holds);
            if books.insert(record.id.clone(), state).is_some() {
                return Err(Error::SnapshotInvalid(format!(
                    "duplicate title record {}",
                    record.id
                )));
            }
        }

        // Rebuild the shelf back-to-front so shelf_order[0] ends up in front.
        let mut shelf = Shelf::new();
        for id in snapshot.shelf_order.iter().rev() {
            let book = books.get(id).ok_or_else(|| {
                Error::SnapshotInvalid(format!("shelf order references unknown title {id}"))
            })?;
            if !book.is_on_shelf() {
                return Err(Error::SnapshotInvalid(format!(
                    "checked-out title {id} present in shelf order"
                )));
            }
            if shelf.contains(id) {
                return Err(Error::SnapshotInvalid(format!(
                    "title {id} appears twice in shelf order"
                )));
            }
            shelf.insert_front(id.clone());
        }
        for (id, book) in &books {
            if book.is_on_shelf() && !shelf.contains(id) {
                return Err(Error::SnapshotInvalid(format!(
                    "on-shelf title {id} missing from shelf order"
                )));
            }
        }

        info!(
            target: "folio::library",
            titles = books.len(),
            shelved = shelf.len(),
            "Library restored from snapshot"
        );
        Ok(Library { books, shelf })
    }
}
