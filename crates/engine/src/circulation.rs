//! Per-title circulation state machine
//!
//! ## Design Principles
//!
//! 1. **Illegal states are unrepresentable**: the holder lives inside the
//!    `CheckedOut` variant, so "holder set while on shelf" cannot be
//!    constructed.
//! 2. **Validate-then-commit**: every transition checks its preconditions
//!    before mutating anything; a denied transition leaves the record
//!    untouched.
//! 3. **No shelf knowledge**: this module tracks *status*, the coordinator
//!    owns the shelf and keeps the two in agreement.
//!
//! ## Status Transitions
//!
//! Valid transitions:
//! - OnShelf → CheckedOut: checkout, gated by hold-queue priority
//! - CheckedOut → OnShelf: return by the current holder
//!
//! Removal from the catalog is terminal and is modeled by dropping the
//! record; it is gated by [`BookState::ensure_idle`] (no holder, no holds).
//! There is no resurrection.
//!
//! ## Holds
//!
//! The hold queue is a FIFO of patrons waiting for the title, orthogonal to
//! physical status: a title can sit on the shelf with holds pending, or be
//! checked out with holds pending. Insertion order is priority order; a
//! title with pending holds may only be checked out by the head requester.

use std::collections::VecDeque;

use folio_core::limits::MAX_HOLD_QUEUE;
use folio_core::PatronId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical circulation status of a title
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CirculationStatus {
    /// Title is physically on the display shelf
    #[default]
    OnShelf,
    /// Title is in a patron's hands
    CheckedOut {
        /// The borrowing patron
        holder: PatronId,
    },
}

impl CirculationStatus {
    /// Whether the title is physically on the shelf
    pub fn is_on_shelf(&self) -> bool {
        matches!(self, CirculationStatus::OnShelf)
    }

    /// Current borrower, if checked out
    pub fn holder(&self) -> Option<&PatronId> {
        match self {
            CirculationStatus::OnShelf => None,
            CirculationStatus::CheckedOut { holder } => Some(holder),
        }
    }

    /// String form for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            CirculationStatus::OnShelf => "OnShelf",
            CirculationStatus::CheckedOut { .. } => "CheckedOut",
        }
    }
}

/// A transition the state machine refused
///
/// Carries no title context; the coordinator maps each denial onto the
/// crate-level [`Error`](folio_core::Error) together with the title (and
/// patron) it was operating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionDenied {
    /// Checkout of a title that is already checked out
    #[error("title is already checked out")]
    NotAvailable,
    /// Checkout by a patron who is not at the head of a non-empty queue
    #[error("title is reserved for another patron")]
    ReservedForOther,
    /// Return of a title that is on the shelf
    #[error("title is not checked out")]
    NotCheckedOut,
    /// Return by a patron who is not the holder
    #[error("returner does not hold this title")]
    WrongHolder,
    /// Hold request from a patron already in the queue
    #[error("patron already holds a reservation")]
    AlreadyQueued,
    /// Hold cancellation for a patron not in the queue
    #[error("patron holds no reservation")]
    NotQueued,
    /// Hold request against a full queue
    #[error("hold queue is at capacity")]
    HoldLimitReached,
    /// Removal of a title that is checked out or has pending holds
    #[error("title is checked out or has pending reservations")]
    InUse,
}

/// Circulation record for a single title
///
/// One exists per catalog entry, living exactly as long as the title does.
/// Fresh records start on the shelf with an empty hold queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookState {
    status: CirculationStatus,
    holds: VecDeque<PatronId>,
}

impl BookState {
    /// New record: on shelf, no holds
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a record from snapshot parts. The caller (snapshot restore)
    /// is responsible for validating the parts first.
    pub(crate) fn from_parts(status: CirculationStatus, holds: VecDeque<PatronId>) -> Self {
        Self { status, holds }
    }

    /// Current physical status
    pub fn status(&self) -> &CirculationStatus {
        &self.status
    }

    /// Current borrower, if checked out
    pub fn holder(&self) -> Option<&PatronId> {
        self.status.holder()
    }

    /// Whether the title is physically on the shelf
    pub fn is_on_shelf(&self) -> bool {
        self.status.is_on_shelf()
    }

    /// Pending holds, head (highest priority) first
    pub fn holds(&self) -> impl Iterator<Item = &PatronId> {
        self.holds.iter()
    }

    /// Number of pending holds
    pub fn hold_count(&self) -> usize {
        self.holds.len()
    }

    /// OnShelf → CheckedOut
    ///
    /// With holds pending only the head requester may check out, and doing so
    /// consumes their hold. With no holds, anyone may.
    pub fn check_out(&mut self, patron: &PatronId) -> Result<(), TransitionDenied> {
        match &self.status {
            CirculationStatus::CheckedOut { .. } => Err(TransitionDenied::NotAvailable),
            CirculationStatus::OnShelf => {
                if let Some(head) = self.holds.front() {
                    if head != patron {
                        return Err(TransitionDenied::ReservedForOther);
                    }
                    self.holds.pop_front();
                }
                self.status = CirculationStatus::CheckedOut {
                    holder: patron.clone(),
                };
                Ok(())
            }
        }
    }

    /// CheckedOut → OnShelf
    ///
    /// Only the current holder may return. When holds are pending, the head
    /// requester is reported so the coordinator can notify them; their hold
    /// stays queued until they check out or cancel.
    pub fn check_in(&mut self, patron: &PatronId) -> Result<Option<PatronId>, TransitionDenied> {
        match &self.status {
            CirculationStatus::OnShelf => Err(TransitionDenied::NotCheckedOut),
            CirculationStatus::CheckedOut { holder } => {
                if holder != patron {
                    return Err(TransitionDenied::WrongHolder);
                }
                self.status = CirculationStatus::OnShelf;
                Ok(self.holds.front().cloned())
            }
        }
    }

    /// Append a patron to the hold queue
    pub fn reserve(&mut self, patron: &PatronId) -> Result<(), TransitionDenied> {
        if self.holds.contains(patron) {
            return Err(TransitionDenied::AlreadyQueued);
        }
        if self.holds.len() >= MAX_HOLD_QUEUE {
            return Err(TransitionDenied::HoldLimitReached);
        }
        self.holds.push_back(patron.clone());
        Ok(())
    }

    /// Remove a patron's hold from anywhere in the queue
    pub fn cancel_hold(&mut self, patron: &PatronId) -> Result<(), TransitionDenied> {
        match self.holds.iter().position(|queued| queued == patron) {
            Some(pos) => {
                self.holds.remove(pos);
                Ok(())
            }
            None => Err(TransitionDenied::NotQueued),
        }
    }

    /// Gate for catalog removal: the record must be on the shelf with no
    /// pending holds.
    pub fn ensure_idle(&self) -> Result<(), TransitionDenied> {
        if !self.status.is_on_shelf() || !self.holds.is_empty() {
            return Err(TransitionDenied::InUse);
        }
        Ok(())
    }
}
