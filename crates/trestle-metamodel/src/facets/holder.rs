//! Facet holders
//!
//! Every metamodel element (class spec, member spec, parameter spec) owns
//! a [`FacetHolder`]: a map from [`FacetKind`] to at most one facet, with
//! precedence-checked replacement. Holders are mutated only during the
//! loading pass; once a specification is published they are read-only.

use std::collections::BTreeMap;

use trestle_ident::Identifier;

use super::{Facet, FacetKind, Precedence};

/// A facet together with the precedence it was attached at.
#[derive(Debug, Clone)]
pub struct FacetEntry {
    /// The attached facet.
    pub facet: Facet,
    /// Rank it was attached at.
    pub precedence: Precedence,
}

/// A metamodel element's facet map.
#[derive(Debug, Clone)]
pub struct FacetHolder {
    identifier: Identifier,
    facets: BTreeMap<FacetKind, FacetEntry>,
}

impl FacetHolder {
    /// Empty holder for the feature `identifier`.
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            facets: BTreeMap::new(),
        }
    }

    /// The feature this holder belongs to.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Attach `facet` at `precedence`.
    ///
    /// Replaces an existing facet of the same kind only when the new
    /// precedence is greater than or equal; a lower-precedence attachment
    /// is dropped. The displaced facet is discarded silently. Returns
    /// whether the facet was installed.
    pub fn add_facet(&mut self, facet: Facet, precedence: Precedence) -> bool {
        let kind = facet.kind();
        if let Some(existing) = self.facets.get(&kind) {
            if precedence < existing.precedence {
                return false;
            }
        }
        self.facets.insert(kind, FacetEntry { facet, precedence });
        true
    }

    /// Attach at the default precedence.
    pub fn add_facet_default(&mut self, facet: Facet) -> bool {
        self.add_facet(facet, Precedence::Default)
    }

    /// The current facet of this kind, if any.
    pub fn get_facet(&self, kind: FacetKind) -> Option<&Facet> {
        self.facets.get(&kind).map(|entry| &entry.facet)
    }

    /// The current facet and its attachment precedence.
    pub fn get_entry(&self, kind: FacetKind) -> Option<&FacetEntry> {
        self.facets.get(&kind)
    }

    /// Whether a facet of this kind is attached.
    pub fn contains_facet(&self, kind: FacetKind) -> bool {
        self.facets.contains_key(&kind)
    }

    /// All attached facets, in stable kind order.
    pub fn facets(&self) -> impl Iterator<Item = &FacetEntry> {
        self.facets.values()
    }

    /// Number of attached facets.
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trestle_applib::Where;
    use trestle_ident::LogicalTypeName;

    fn holder() -> FacetHolder {
        FacetHolder::new(Identifier::class_identifier(
            LogicalTypeName::parse("t.T").unwrap(),
        ))
    }

    fn hidden(w: Where) -> Facet {
        Facet::Hidden(w)
    }

    #[test]
    fn test_add_and_get() {
        let mut h = holder();
        assert!(!h.contains_facet(FacetKind::Hidden));
        assert!(h.add_facet_default(hidden(Where::Everywhere)));
        assert!(h.contains_facet(FacetKind::Hidden));
        assert!(matches!(
            h.get_facet(FacetKind::Hidden),
            Some(Facet::Hidden(Where::Everywhere))
        ));
        assert_eq!(h.get_facet(FacetKind::MaxLength), None);
    }

    #[test]
    fn test_equal_precedence_replaces() {
        let mut h = holder();
        h.add_facet(hidden(Where::Everywhere), Precedence::Default);
        assert!(h.add_facet(hidden(Where::AllTables), Precedence::Default));
        assert!(matches!(
            h.get_facet(FacetKind::Hidden),
            Some(Facet::Hidden(Where::AllTables))
        ));
    }

    #[test]
    fn test_lower_precedence_never_displaces_higher() {
        let mut h = holder();
        h.add_facet(hidden(Where::Everywhere), Precedence::High);
        assert!(!h.add_facet(hidden(Where::Nowhere), Precedence::Default));
        assert!(!h.add_facet(hidden(Where::Nowhere), Precedence::Fallback));
        assert!(matches!(
            h.get_facet(FacetKind::Hidden),
            Some(Facet::Hidden(Where::Everywhere))
        ));
        assert_eq!(
            h.get_entry(FacetKind::Hidden).unwrap().precedence,
            Precedence::High
        );
    }

    #[test]
    fn test_higher_precedence_displaces() {
        let mut h = holder();
        h.add_facet(hidden(Where::Everywhere), Precedence::Fallback);
        assert!(h.add_facet(hidden(Where::AllTables), Precedence::Event));
        assert!(matches!(
            h.get_facet(FacetKind::Hidden),
            Some(Facet::Hidden(Where::AllTables))
        ));
    }

    #[test]
    fn test_at_most_one_facet_per_kind() {
        let mut h = holder();
        h.add_facet(hidden(Where::Everywhere), Precedence::Fallback);
        h.add_facet(hidden(Where::AllTables), Precedence::Default);
        h.add_facet(Facet::MaxLength(10), Precedence::Default);
        assert_eq!(h.facet_count(), 2);
    }

    #[test]
    fn test_iteration_in_stable_kind_order() {
        let mut h = holder();
        h.add_facet_default(Facet::MaxLength(10));
        h.add_facet_default(hidden(Where::Everywhere));
        let kinds: Vec<FacetKind> = h.facets().map(|e| e.facet.kind()).collect();
        assert_eq!(kinds, vec![FacetKind::Hidden, FacetKind::MaxLength]);
    }
}
