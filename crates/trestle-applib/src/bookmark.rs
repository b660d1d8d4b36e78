//! Bookmarks
//!
//! A [`Bookmark`] is the stable external reference to one domain object:
//! logical type name plus an opaque identity string. Bookmarks key the
//! publishing enlistment and render as `ns.Type:identifier`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trestle_ident::{LogicalTypeName, LogicalTypeNameError};

/// Errors raised when parsing a bookmark's string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookmarkError {
    /// No `:` separator between type name and identifier.
    #[error("bookmark '{0}' is missing the ':' separator")]
    MissingSeparator(String),

    /// The identifier part was empty.
    #[error("bookmark '{0}' has an empty identifier")]
    EmptyIdentifier(String),

    /// The type part was not a valid logical type name.
    #[error("bookmark has an invalid type name: {0}")]
    InvalidTypeName(#[from] LogicalTypeNameError),
}

/// Stable external reference to one domain object.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bookmark {
    logical_type_name: LogicalTypeName,
    identifier: String,
}

impl Bookmark {
    /// Reference the object `identifier` of class `logical_type_name`.
    pub fn new(logical_type_name: LogicalTypeName, identifier: &str) -> Self {
        Self {
            logical_type_name,
            identifier: identifier.to_string(),
        }
    }

    /// Parse the `ns.Type:identifier` string form.
    pub fn parse(s: &str) -> Result<Self, BookmarkError> {
        let (type_part, id_part) = s
            .split_once(':')
            .ok_or_else(|| BookmarkError::MissingSeparator(s.to_string()))?;
        if id_part.is_empty() {
            return Err(BookmarkError::EmptyIdentifier(s.to_string()));
        }
        Ok(Self {
            logical_type_name: LogicalTypeName::parse(type_part)?,
            identifier: id_part.to_string(),
        })
    }

    /// The referenced class.
    pub fn logical_type_name(&self) -> &LogicalTypeName {
        &self.logical_type_name
    }

    /// The opaque object identity within that class.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.logical_type_name, self.identifier)
    }
}
