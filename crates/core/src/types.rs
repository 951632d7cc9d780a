//! Identifier types for the circulation system
//!
//! Two validated string newtypes key everything in the system:
//! - **TitleId**: identifies a title/copy in the catalog
//! - **PatronId**: identifies a borrower or hold requester
//!
//! Both are opaque to the engine: equality, hashing, and ordering are all the
//! engine ever asks of them. Validation happens once, at construction; every
//! value in circulation is known to be well-formed.
//!
//! ## Validation
//!
//! Identifiers must:
//! - Be 1-128 bytes
//! - Contain only alphanumeric, dash, underscore, dot, colon
//! - Not start with a dash or dot

use crate::limits::MAX_ID_LENGTH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error when validating an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdError {
    /// Identifier is empty
    #[error("identifier is empty")]
    Empty,

    /// Identifier exceeds the maximum length
    #[error("identifier is {length} bytes, maximum is {max}")]
    TooLong {
        /// Actual length in bytes
        length: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Identifier contains a character outside `[a-zA-Z0-9_.:-]`
    #[error("identifier contains invalid character {ch:?}")]
    InvalidChar {
        /// The offending character
        ch: char,
    },

    /// Identifier starts with `-` or `.`
    #[error("identifier starts with invalid character {ch:?}")]
    InvalidLeadingChar {
        /// The offending character
        ch: char,
    },
}

fn validate(raw: &str) -> Result<(), IdError> {
    if raw.is_empty() {
        return Err(IdError::Empty);
    }
    if raw.len() > MAX_ID_LENGTH {
        return Err(IdError::TooLong {
            length: raw.len(),
            max: MAX_ID_LENGTH,
        });
    }
    if let Some(first) = raw.chars().next() {
        if first == '-' || first == '.' {
            return Err(IdError::InvalidLeadingChar { ch: first });
        }
    }
    for ch in raw.chars() {
        if !ch.is_ascii_alphanumeric() && !matches!(ch, '-' | '_' | '.' | ':') {
            return Err(IdError::InvalidChar { ch });
        }
    }
    Ok(())
}

/// Opaque identifier for a title/copy in the catalog
///
/// All catalog, shelf, and circulation state keys off this value. It carries
/// no metadata (title text, author, ISBN live outside the system).
///
/// ## Examples
///
/// Valid: `"isbn:978-0134685991"`, `"T42"`, `"dune.folio-ed"`
///
/// Invalid: `""`, `"-leading-dash"`, `"has spaces"`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TitleId(String);

impl TitleId {
    /// Create a validated title identifier
    ///
    /// # Errors
    /// Returns `IdError` if the string violates the validation rules.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        let raw = raw.into();
        validate(&raw)?;
        Ok(Self(raw))
    }

    /// View the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TitleId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TitleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier for a borrower or hold requester
///
/// Validation rules are identical to [`TitleId`]; the two are distinct types
/// so a patron can never be passed where a title is expected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PatronId(String);

impl PatronId {
    /// Create a validated patron identifier
    ///
    /// # Errors
    /// Returns `IdError` if the string violates the validation rules.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        let raw = raw.into();
        validate(&raw)?;
        Ok(Self(raw))
    }

    /// View the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PatronId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatronId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
