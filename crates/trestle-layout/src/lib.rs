//! Trestle Layout Metadata
//!
//! Grid layout descriptors for domain classes: the data model, the XML
//! and JSON readers, a normalization pass that cross-references slot ids
//! against the class's member set, and a per-class probing loader with
//! production-mode caching.
//!
//! Layout files are optional. One file per class, named after the class's
//! simple name (`Customer.layout.xml` or `Customer.layout.json`), looked
//! up under a configured resources root. Absence is expected and reported
//! as `None`, never as an error.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod xml;

pub use error::GridError;
pub use loader::GridLoader;
pub use model::{
    ActionLayoutData, Col, CollectionLayoutData, FieldSet, Grid, PropertyLayoutData, Row,
};
pub use normalize::{GridIssue, GridMembers, GridSlotKind, NormalizedGrid};
pub use xml::read_xml;

/// Read a [`Grid`] from its `.layout.json` form.
pub fn read_json(json: &str) -> Result<Grid, GridError> {
    Ok(serde_json::from_str(json)?)
}
