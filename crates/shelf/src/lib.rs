//! Recency-ordered shelf for Folio
//!
//! A doubly linked recency list over title identifiers: the front is the
//! most-recently-touched title, the back the least-recently-touched (the
//! first candidate for reshelving or weeding). Insert, touch, and removal
//! by identity are all O(1).
//!
//! ## Design
//!
//! Nodes live in a slot arena (`Vec`) and link to each other by index, with
//! an id-to-slot hash map for identity lookups. Index links instead of
//! pointers keep the structure safe Rust with no aliasing to reason about;
//! a removal is two index rewrites and a map delete.
//!
//! This is the classic LRU-list shape, but eviction is the caller's call:
//! the shelf only reports its least-recent member, it never drops one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod recency;

pub use recency::{Iter, Shelf};
