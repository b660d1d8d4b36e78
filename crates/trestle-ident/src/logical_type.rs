//! Logical type names
//!
//! A logical type name is the stable, namespace-qualified identity of a
//! domain class (`"customers.Customer"`). It outlives refactorings of the
//! concrete Rust type path and is the key under which specifications are
//! cached and referenced from layout files.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parsing a logical type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicalTypeNameError {
    /// The name was empty.
    #[error("logical type name must not be empty")]
    Empty,

    /// A segment was empty (leading/trailing/double dot).
    #[error("logical type name '{0}' has an empty segment")]
    EmptySegment(String),

    /// A segment contained a character outside `[A-Za-z0-9_]` or started
    /// with a digit.
    #[error("logical type name '{0}' has an invalid segment '{1}'")]
    InvalidSegment(String, String),
}

/// Namespace-qualified logical name of a domain class.
///
/// Segments are dot-separated identifiers; the last segment is the simple
/// name, everything before it the namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogicalTypeName(String);

impl LogicalTypeName {
    /// Parse and validate a logical type name.
    pub fn parse(name: &str) -> Result<Self, LogicalTypeNameError> {
        if name.is_empty() {
            return Err(LogicalTypeNameError::Empty);
        }
        for segment in name.split('.') {
            if segment.is_empty() {
                return Err(LogicalTypeNameError::EmptySegment(name.to_string()));
            }
            let mut chars = segment.chars();
            let first = chars.next().expect("segment is non-empty");
            let head_ok = first.is_ascii_alphabetic() || first == '_';
            let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !head_ok || !tail_ok {
                return Err(LogicalTypeNameError::InvalidSegment(
                    name.to_string(),
                    segment.to_string(),
                ));
            }
        }
        Ok(LogicalTypeName(name.to_string()))
    }

    /// The full dotted name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace portion, if any (`"customers"` for `"customers.Customer"`).
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(ns, _)| ns)
    }

    /// The simple (unqualified) name (`"Customer"` for `"customers.Customer"`).
    pub fn simple_name(&self) -> &str {
        self.0.rsplit_once('.').map(|(_, s)| s).unwrap_or(&self.0)
    }
}

impl fmt::Display for LogicalTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LogicalTypeName {
    type Error = LogicalTypeNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LogicalTypeName::parse(&value)
    }
}

impl From<LogicalTypeName> for String {
    fn from(value: LogicalTypeName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified_name() {
        let ltn = LogicalTypeName::parse("customers.Customer").unwrap();
        assert_eq!(ltn.as_str(), "customers.Customer");
        assert_eq!(ltn.namespace(), Some("customers"));
        assert_eq!(ltn.simple_name(), "Customer");
    }

    #[test]
    fn test_parse_nested_namespace() {
        let ltn = LogicalTypeName::parse("app.orders.LineItem").unwrap();
        assert_eq!(ltn.namespace(), Some("app.orders"));
        assert_eq!(ltn.simple_name(), "LineItem");
    }

    #[test]
    fn test_parse_unqualified_name() {
        let ltn = LogicalTypeName::parse("Customer").unwrap();
        assert_eq!(ltn.namespace(), None);
        assert_eq!(ltn.simple_name(), "Customer");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(LogicalTypeName::parse(""), Err(LogicalTypeNameError::Empty));
    }

    #[test]
    fn test_parse_rejects_empty_segment() {
        assert!(matches!(
            LogicalTypeName::parse("customers..Customer"),
            Err(LogicalTypeNameError::EmptySegment(_))
        ));
        assert!(matches!(
            LogicalTypeName::parse(".Customer"),
            Err(LogicalTypeNameError::EmptySegment(_))
        ));
        assert!(matches!(
            LogicalTypeName::parse("customers."),
            Err(LogicalTypeNameError::EmptySegment(_))
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_segment() {
        assert!(matches!(
            LogicalTypeName::parse("customers.1Customer"),
            Err(LogicalTypeNameError::InvalidSegment(_, _))
        ));
        assert!(matches!(
            LogicalTypeName::parse("custom-ers.Customer"),
            Err(LogicalTypeNameError::InvalidSegment(_, _))
        ));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = LogicalTypeName::parse("a.First").unwrap();
        let b = LogicalTypeName::parse("b.Second").unwrap();
        assert!(a < b);
    }
}
