//! Layout errors

use thiserror::Error;

/// Errors raised while reading a layout descriptor.
#[derive(Debug, Error)]
pub enum GridError {
    /// The XML form was malformed.
    #[error("malformed layout XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element appeared somewhere the schema does not allow.
    #[error("unexpected layout element <{element}> inside <{parent}>")]
    UnexpectedElement {
        /// The offending element name.
        element: String,
        /// The element it appeared under.
        parent: String,
    },

    /// A required attribute was missing.
    #[error("layout element <{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        /// The element name.
        element: String,
        /// The missing attribute name.
        attribute: String,
    },

    /// An attribute value failed to parse.
    #[error("layout attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        /// The attribute name.
        attribute: String,
        /// The rejected value.
        value: String,
    },

    /// The JSON form was malformed.
    #[error("malformed layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A layout file existed but could not be read.
    #[error("failed to read layout file '{path}': {source}")]
    Io {
        /// The file that failed.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}
