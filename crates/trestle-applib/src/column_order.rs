//! Table column ordering SPI
//!
//! Column order for rendered tables is resolved through a priority chain
//! of [`TableColumnOrderService`] implementations: the lowest priority
//! number is consulted first, and the first `Some` answer wins. The
//! metamodel crate contributes a file-based implementation; the
//! [`ColumnOrderDefault`] here sits at the end of every chain and answers
//! with the property ids unchanged.

/// Pluggable column ordering hook.
pub trait TableColumnOrderService: Send + Sync {
    /// Chain position; lower numbers are consulted first.
    fn priority(&self) -> u32;

    /// Order the columns of `collection_id` as rendered under a parent of
    /// `parent_type`. `None` defers to the next service in the chain.
    fn order_parented(
        &self,
        parent_type: &str,
        collection_id: &str,
        property_ids: &[String],
    ) -> Option<Vec<String>>;

    /// Order the columns of a standalone table of `object_type` instances.
    /// `None` defers to the next service in the chain.
    fn order_standalone(&self, object_type: &str, property_ids: &[String])
        -> Option<Vec<String>>;
}

/// Identity passthrough; terminates every chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnOrderDefault;

impl TableColumnOrderService for ColumnOrderDefault {
    fn priority(&self) -> u32 {
        u32::MAX
    }

    fn order_parented(
        &self,
        _parent_type: &str,
        _collection_id: &str,
        property_ids: &[String],
    ) -> Option<Vec<String>> {
        Some(property_ids.to_vec())
    }

    fn order_standalone(
        &self,
        _object_type: &str,
        property_ids: &[String],
    ) -> Option<Vec<String>> {
        Some(property_ids.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let service = ColumnOrderDefault;
        let ids = vec!["a".to_string(), "b".to_string()];
        assert_eq!(service.order_standalone("t.T", &ids), Some(ids.clone()));
        assert_eq!(service.order_parented("t.T", "items", &ids), Some(ids));
        assert_eq!(service.priority(), u32::MAX);
    }
}
