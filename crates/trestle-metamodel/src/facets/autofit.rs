//! Collection autofit
//!
//! Maps a declared container type name to one of a fixed set of
//! collection variants and materializes element streams into them.
//! Fitting is advisory: an unrecognized name yields `None` and the
//! caller degrades to a generic list.

use trestle_applib::Value;

/// The concrete collection shapes the framework knows how to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionVariant {
    /// Growable ordered sequence.
    Vec,
    /// Double-ended queue; order-preserving.
    VecDeque,
    /// Linked list; order-preserving.
    LinkedList,
    /// Hash set; duplicates dropped, first occurrence kept.
    HashSet,
    /// Sorted set; duplicates dropped, elements ordered.
    BTreeSet,
    /// Fixed-size array shape.
    Array,
}

impl CollectionVariant {
    /// Whether element order survives population.
    pub fn is_order_preserving(&self) -> bool {
        matches!(
            self,
            CollectionVariant::Vec
                | CollectionVariant::VecDeque
                | CollectionVariant::LinkedList
                | CollectionVariant::Array
        )
    }

    /// Whether duplicate elements are dropped.
    pub fn is_deduplicating(&self) -> bool {
        matches!(self, CollectionVariant::HashSet | CollectionVariant::BTreeSet)
    }
}

/// Fixed lookup table from container type names to variants.
///
/// Both the bare name and the canonical `std` path are recognized.
/// `[T]` / `[T; N]` shapes fit the array variant. Unrecognized names
/// yield `None`.
pub fn variant_for(type_name: &str) -> Option<CollectionVariant> {
    let trimmed = type_name.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return Some(CollectionVariant::Array);
    }
    // strip any generic argument list: "Vec<Order>" fits as "Vec"
    let base = trimmed.split('<').next().unwrap_or(trimmed).trim();
    match base {
        "Vec" | "std::vec::Vec" => Some(CollectionVariant::Vec),
        "VecDeque" | "std::collections::VecDeque" => Some(CollectionVariant::VecDeque),
        "LinkedList" | "std::collections::LinkedList" => Some(CollectionVariant::LinkedList),
        "HashSet" | "std::collections::HashSet" => Some(CollectionVariant::HashSet),
        "BTreeSet" | "std::collections::BTreeSet" => Some(CollectionVariant::BTreeSet),
        _ => None,
    }
}

/// Materialize `elements` into the given variant, as a list value.
///
/// Order-preserving variants keep the input order; `HashSet` drops
/// duplicates keeping the first occurrence; `BTreeSet` drops duplicates
/// and sorts by the total value ordering.
pub fn collect(variant: CollectionVariant, elements: Vec<Value>) -> Value {
    match variant {
        CollectionVariant::Vec
        | CollectionVariant::VecDeque
        | CollectionVariant::LinkedList
        | CollectionVariant::Array => Value::List(elements),
        CollectionVariant::HashSet => {
            let mut unique: Vec<Value> = Vec::with_capacity(elements.len());
            for element in elements {
                if !unique.contains(&element) {
                    unique.push(element);
                }
            }
            Value::List(unique)
        }
        CollectionVariant::BTreeSet => {
            let mut sorted = elements;
            sorted.sort();
            sorted.dedup();
            Value::List(sorted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table() {
        assert_eq!(variant_for("Vec"), Some(CollectionVariant::Vec));
        assert_eq!(variant_for("Vec<Order>"), Some(CollectionVariant::Vec));
        assert_eq!(
            variant_for("std::collections::VecDeque"),
            Some(CollectionVariant::VecDeque)
        );
        assert_eq!(variant_for("LinkedList"), Some(CollectionVariant::LinkedList));
        assert_eq!(variant_for("HashSet<Str>"), Some(CollectionVariant::HashSet));
        assert_eq!(variant_for("BTreeSet"), Some(CollectionVariant::BTreeSet));
    }

    #[test]
    fn test_array_shapes() {
        assert_eq!(variant_for("[Order]"), Some(CollectionVariant::Array));
        assert_eq!(variant_for("[Int; 4]"), Some(CollectionVariant::Array));
    }

    #[test]
    fn test_unrecognized_is_none() {
        assert_eq!(variant_for("HashMap<Str, Int>"), None);
        assert_eq!(variant_for("MyCustomBag"), None);
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&i| Value::Int(i)).collect()
    }

    #[test]
    fn test_collect_preserves_order_for_sequences() {
        for variant in [
            CollectionVariant::Vec,
            CollectionVariant::VecDeque,
            CollectionVariant::LinkedList,
            CollectionVariant::Array,
        ] {
            let collected = collect(variant, ints(&[3, 1, 2, 1]));
            assert_eq!(collected, Value::List(ints(&[3, 1, 2, 1])));
        }
    }

    #[test]
    fn test_collect_hash_set_keeps_first_occurrence() {
        let collected = collect(CollectionVariant::HashSet, ints(&[3, 1, 2, 1, 3]));
        assert_eq!(collected, Value::List(ints(&[3, 1, 2])));
    }

    #[test]
    fn test_collect_btree_set_sorts_and_dedups() {
        let collected = collect(CollectionVariant::BTreeSet, ints(&[3, 1, 2, 1]));
        assert_eq!(collected, Value::List(ints(&[1, 2, 3])));
    }

    #[test]
    fn test_collect_size_preserved_for_order_sensitive_targets() {
        let elements = ints(&[5, 4, 3, 2, 1]);
        for variant in [CollectionVariant::Vec, CollectionVariant::LinkedList] {
            let collected = collect(variant, elements.clone());
            assert_eq!(collected.as_list().unwrap().len(), elements.len());
        }
    }
}
