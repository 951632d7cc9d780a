//! Size limits enforced at the catalog boundary
//!
//! These limits are enforced when identifiers are constructed and when hold
//! queues grow. Violations surface as `IdError` / `Error::HoldLimitReached`
//! before any state is mutated.
//!
//! ## Contract
//!
//! The limits are part of the public contract: snapshots produced under the
//! current limits always restore under the same limits.

/// Maximum length of a `TitleId` or `PatronId`, in bytes.
pub const MAX_ID_LENGTH: usize = 128;

/// Maximum number of pending holds on a single title.
///
/// A queue this deep means the title is effectively unobtainable; rejecting
/// further holds keeps per-title memory bounded and keeps `cancel` scans cheap.
pub const MAX_HOLD_QUEUE: usize = 1024;
