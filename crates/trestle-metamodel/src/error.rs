//! Metamodel errors
//!
//! These are the hard startup failures: a half-built specification is
//! unsafe to serve, so anything that goes wrong during class processing
//! aborts metamodel construction outright. Per-class model defects that
//! do not prevent startup go through the validation report instead, see
//! [`crate::validate`].

use thiserror::Error;
use trestle_ident::{Identifier, LogicalTypeName};

/// Hard failures during metamodel construction.
#[derive(Debug, Error)]
pub enum MetaModelError {
    /// A class was referenced but never registered.
    #[error("domain class '{0}' is not registered")]
    UnknownType(LogicalTypeName),

    /// A mixin named on a class is not registered.
    #[error("mixin '{mixin}' on class '{class}' is not registered")]
    UnknownMixin {
        /// The class declaring the mixin.
        class: LogicalTypeName,
        /// The missing mixin.
        mixin: LogicalTypeName,
    },

    /// The superclass chain loops back on itself.
    #[error("cyclic inheritance involving '{0}'")]
    CyclicInheritance(LogicalTypeName),

    /// A facet factory failed while processing a feature.
    #[error("facet factory '{factory}' failed on {identifier}: {message}")]
    FacetFactory {
        /// Name of the failing factory.
        factory: &'static str,
        /// The feature being processed.
        identifier: Identifier,
        /// What went wrong.
        message: String,
    },

    /// A post-processor failed after the member pass.
    #[error("post-processor '{post_processor}' failed on '{class}': {message}")]
    PostProcessor {
        /// Name of the failing post-processor.
        post_processor: &'static str,
        /// The class being post-processed.
        class: LogicalTypeName,
        /// What went wrong.
        message: String,
    },

    /// A layout file was present but malformed.
    #[error(transparent)]
    Layout(#[from] trestle_layout::GridError),
}
