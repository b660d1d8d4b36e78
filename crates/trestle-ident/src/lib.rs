//! Trestle Identifier Model
//!
//! Canonical, immutable naming for every element of the metamodel: domain
//! classes, their members (properties, collections, actions) and action
//! parameters. Identifiers are stable values — they key specification
//! caches, order validation reports, and render the links the UI layers
//! emit.

#![warn(missing_docs)]

pub mod feature_type;
pub mod identifier;
pub mod logical_type;

pub use feature_type::FeatureType;
pub use identifier::Identifier;
pub use logical_type::{LogicalTypeName, LogicalTypeNameError};
