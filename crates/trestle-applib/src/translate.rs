//! Translation SPI
//!
//! The facet system never translates text itself; it hands the
//! untranslated literal and a [`TranslationContext`] to whatever
//! [`TranslationService`] is bound in the metamodel context. The bundled
//! [`IdentityTranslation`] is the no-op binding used when no real
//! translation backend is configured.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a translation backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The backend has no entry for this text in this context.
    #[error("no translation for '{text}' in context '{context}'")]
    Missing {
        /// Translation context of the lookup.
        context: String,
        /// The untranslated text.
        text: String,
    },

    /// The backend itself failed.
    #[error("translation backend failure: {0}")]
    Backend(String),
}

/// Names the place a piece of text is translated for, typically the
/// rendered identifier of the owning class or member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TranslationContext(String);

impl TranslationContext {
    /// Context named after an arbitrary stable string.
    pub fn named(name: &str) -> Self {
        Self(name.to_string())
    }

    /// The context name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TranslationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pluggable translation backend.
pub trait TranslationService: Send + Sync {
    /// Translate `text` for the given context.
    fn translate(
        &self,
        context: &TranslationContext,
        text: &str,
    ) -> Result<String, TranslationError>;
}

/// Pass-through translation; returns the text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslation;

impl TranslationService for IdentityTranslation {
    fn translate(
        &self,
        _context: &TranslationContext,
        text: &str,
    ) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }
}
