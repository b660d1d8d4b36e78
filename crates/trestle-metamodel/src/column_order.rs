//! Column ordering
//!
//! Table column order resolves through a numbered fallback chain of
//! [`TableColumnOrderService`] implementations rather than a single
//! hardcoded policy: lowest priority number is consulted first, first
//! `Some` answer wins, and the identity passthrough at the end of every
//! chain guarantees an answer. The file-based implementation here reads
//! `ClassName.columnOrder.txt` / `ClassName#collectionId.columnOrder.txt`
//! from the resources root; a missing file is expected absence.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, trace};
use trestle_applib::{ColumnOrderDefault, TableColumnOrderService};

/// Keep only the last dot-segment: accepts either a simple name or a
/// full logical type name.
fn simple_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

/// Parse column-order file content: one property id per line, blank
/// lines and `#`-prefixed lines ignored, unknown ids filtered out, file
/// order preserved.
fn parse_column_order(content: &str, known_property_ids: &[String]) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| known_property_ids.iter().any(|id| id == line))
        .map(str::to_string)
        .collect()
}

/// Reads column order from `*.columnOrder.txt` resource files.
pub struct ColumnOrderFromFiles {
    resources_root: PathBuf,
}

impl ColumnOrderFromFiles {
    /// Probe for order files under `resources_root`.
    pub fn new(resources_root: impl Into<PathBuf>) -> Self {
        Self {
            resources_root: resources_root.into(),
        }
    }

    fn read_order(&self, file_name: &str, property_ids: &[String]) -> Option<Vec<String>> {
        let path = self.resources_root.join(file_name);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                debug!(file = %path.display(), "column order file applied");
                Some(parse_column_order(&content, property_ids))
            }
            Err(_) => {
                trace!(file = %path.display(), "no column order file");
                None
            }
        }
    }
}

impl TableColumnOrderService for ColumnOrderFromFiles {
    fn priority(&self) -> u32 {
        100
    }

    fn order_parented(
        &self,
        parent_type: &str,
        collection_id: &str,
        property_ids: &[String],
    ) -> Option<Vec<String>> {
        let parent = simple_name(parent_type);
        self.read_order(
            &format!("{parent}#{collection_id}.columnOrder.txt"),
            property_ids,
        )
        .or_else(|| self.read_order(&format!("{parent}.columnOrder.txt"), property_ids))
    }

    fn order_standalone(
        &self,
        object_type: &str,
        property_ids: &[String],
    ) -> Option<Vec<String>> {
        let name = simple_name(object_type);
        self.read_order(&format!("{name}.columnOrder.txt"), property_ids)
    }
}

/// Priority-ordered chain of column order services, terminated by the
/// identity passthrough.
pub struct ColumnOrderChain {
    services: Vec<Arc<dyn TableColumnOrderService>>,
}

impl ColumnOrderChain {
    /// Chain over `services` plus the terminal identity service, sorted
    /// by ascending priority.
    pub fn new(mut services: Vec<Arc<dyn TableColumnOrderService>>) -> Self {
        services.push(Arc::new(ColumnOrderDefault));
        services.sort_by_key(|s| s.priority());
        Self { services }
    }

    /// The standard chain: file-based lookup, then identity.
    pub fn standard(resources_root: impl Into<PathBuf>) -> Self {
        Self::new(vec![Arc::new(ColumnOrderFromFiles::new(resources_root))])
    }

    /// Resolve the column order of a standalone table. Always answers;
    /// the terminal service is the identity.
    pub fn order_standalone(&self, object_type: &str, property_ids: &[String]) -> Vec<String> {
        self.services
            .iter()
            .find_map(|s| s.order_standalone(object_type, property_ids))
            .unwrap_or_else(|| property_ids.to_vec())
    }

    /// Resolve the column order of a parented collection table.
    pub fn order_parented(
        &self,
        parent_type: &str,
        collection_id: &str,
        property_ids: &[String],
    ) -> Vec<String> {
        self.services
            .iter()
            .find_map(|s| s.order_parented(parent_type, collection_id, property_ids))
            .unwrap_or_else(|| property_ids.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_filters_comments_and_unknown_ids() {
        let order = parse_column_order("b\na\n#comment\nc\n", &ids(&["a", "b", "c"]));
        assert_eq!(order, ids(&["b", "a", "c"]));

        let order = parse_column_order("b\nunknown\n\n  a  \n", &ids(&["a", "b"]));
        assert_eq!(order, ids(&["b", "a"]));
    }

    #[test]
    fn test_missing_file_defers() {
        let dir = tempfile::tempdir().unwrap();
        let service = ColumnOrderFromFiles::new(dir.path());
        assert_eq!(service.order_standalone("t.Customer", &ids(&["a"])), None);
    }

    #[test]
    fn test_standalone_file_applied() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Customer.columnOrder.txt"), "b\na\n#c\nc\n").unwrap();
        let service = ColumnOrderFromFiles::new(dir.path());
        assert_eq!(
            service.order_standalone("t.Customer", &ids(&["a", "b", "c"])),
            Some(ids(&["b", "a", "c"]))
        );
    }

    #[test]
    fn test_parented_prefers_collection_specific_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Customer.columnOrder.txt"), "a\nb\n").unwrap();
        fs::write(dir.path().join("Customer#orders.columnOrder.txt"), "b\na\n").unwrap();
        let service = ColumnOrderFromFiles::new(dir.path());
        assert_eq!(
            service.order_parented("t.Customer", "orders", &ids(&["a", "b"])),
            Some(ids(&["b", "a"]))
        );
        // other collections fall back to the class-level file
        assert_eq!(
            service.order_parented("t.Customer", "invoices", &ids(&["a", "b"])),
            Some(ids(&["a", "b"]))
        );
    }

    #[test]
    fn test_chain_falls_through_to_identity() {
        let dir = tempfile::tempdir().unwrap();
        let chain = ColumnOrderChain::standard(dir.path());
        // no file anywhere: identity passthrough answers
        assert_eq!(
            chain.order_standalone("t.Customer", &ids(&["x", "y"])),
            ids(&["x", "y"])
        );
    }

    #[test]
    fn test_chain_prefers_lower_priority_number() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Customer.columnOrder.txt"), "y\nx\n").unwrap();
        let chain = ColumnOrderChain::standard(dir.path());
        assert_eq!(
            chain.order_standalone("Customer", &ids(&["x", "y"])),
            ids(&["y", "x"])
        );
    }
}
