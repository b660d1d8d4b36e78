//! Grid normalization
//!
//! A freshly parsed [`Grid`] is just a tree of ids. Normalization
//! cross-references it against the class's known member ids, building
//! id → slot lookup maps and accumulating issues (duplicate slots,
//! references to members the class does not have). Issues are reported,
//! not thrown: a sloppy layout file degrades, it does not abort.

use rustc_hash::FxHashMap;

use crate::model::Grid;

/// The member ids a grid is normalized against.
#[derive(Debug, Clone, Default)]
pub struct GridMembers {
    /// Known property ids.
    pub properties: Vec<String>,
    /// Known collection ids.
    pub collections: Vec<String>,
    /// Known action ids.
    pub actions: Vec<String>,
}

/// What a grid issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSlotKind {
    /// A property slot.
    Property,
    /// A collection slot.
    Collection,
    /// An action slot.
    Action,
}

/// One defect found during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridIssue {
    /// The same member id was placed in two slots.
    DuplicateId {
        /// Kind of the duplicated slot.
        kind: GridSlotKind,
        /// The duplicated member id.
        id: String,
    },
    /// A slot references a member the class does not have.
    UnresolvedId {
        /// Kind of the dangling slot.
        kind: GridSlotKind,
        /// The unknown member id.
        id: String,
    },
}

/// A grid cross-referenced against its class's member set.
#[derive(Debug, Clone)]
pub struct NormalizedGrid {
    /// The underlying layout tree.
    pub grid: Grid,
    /// Property id → owning field-set id.
    pub property_field_set: FxHashMap<String, String>,
    /// Collection ids placed somewhere in the grid, in render order.
    pub collection_ids: Vec<String>,
    /// Action ids placed somewhere in the grid, in render order.
    pub action_ids: Vec<String>,
    /// Defects found while normalizing.
    pub issues: Vec<GridIssue>,
}

impl NormalizedGrid {
    /// Field-set id a property is placed in, if the grid places it.
    pub fn field_set_of(&self, property_id: &str) -> Option<&str> {
        self.property_field_set.get(property_id).map(String::as_str)
    }

    /// Whether normalization found no defects.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Grid {
    /// Cross-reference this grid against the class's member ids.
    pub fn normalize(self, members: &GridMembers) -> NormalizedGrid {
        let mut issues = Vec::new();
        let mut property_field_set: FxHashMap<String, String> = FxHashMap::default();
        let mut collection_ids: Vec<String> = Vec::new();
        let mut action_ids: Vec<String> = Vec::new();

        self.visit_properties(&mut |fs, prop| {
            if !members.properties.iter().any(|p| p == &prop.id) {
                issues.push(GridIssue::UnresolvedId {
                    kind: GridSlotKind::Property,
                    id: prop.id.clone(),
                });
            }
            if property_field_set
                .insert(prop.id.clone(), fs.id.clone())
                .is_some()
            {
                issues.push(GridIssue::DuplicateId {
                    kind: GridSlotKind::Property,
                    id: prop.id.clone(),
                });
            }
        });

        self.visit_collections(&mut |coll| {
            if !members.collections.iter().any(|c| c == &coll.id) {
                issues.push(GridIssue::UnresolvedId {
                    kind: GridSlotKind::Collection,
                    id: coll.id.clone(),
                });
            }
            if collection_ids.contains(&coll.id) {
                issues.push(GridIssue::DuplicateId {
                    kind: GridSlotKind::Collection,
                    id: coll.id.clone(),
                });
            } else {
                collection_ids.push(coll.id.clone());
            }
        });

        self.visit_actions(&mut |action| {
            if !members.actions.iter().any(|a| a == &action.id) {
                issues.push(GridIssue::UnresolvedId {
                    kind: GridSlotKind::Action,
                    id: action.id.clone(),
                });
            }
            if action_ids.contains(&action.id) {
                issues.push(GridIssue::DuplicateId {
                    kind: GridSlotKind::Action,
                    id: action.id.clone(),
                });
            } else {
                action_ids.push(action.id.clone());
            }
        });

        NormalizedGrid {
            grid: self,
            property_field_set,
            collection_ids,
            action_ids,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::read_xml;

    fn members() -> GridMembers {
        GridMembers {
            properties: vec!["firstName".to_string(), "lastName".to_string()],
            collections: vec!["orders".to_string()],
            actions: vec!["rename".to_string(), "delete".to_string()],
        }
    }

    #[test]
    fn test_clean_grid_builds_lookup_maps() {
        let grid = read_xml(
            r#"<grid><row>
                 <col span="6">
                   <fieldSet id="identity">
                     <property id="firstName"/>
                     <property id="lastName"/>
                     <action id="rename"/>
                   </fieldSet>
                 </col>
                 <col span="6">
                   <collection id="orders"/>
                   <action id="delete"/>
                 </col>
               </row></grid>"#,
        )
        .unwrap();

        let normalized = grid.normalize(&members());
        assert!(normalized.is_clean());
        assert_eq!(normalized.field_set_of("firstName"), Some("identity"));
        assert_eq!(normalized.field_set_of("missing"), None);
        assert_eq!(normalized.collection_ids, vec!["orders".to_string()]);
        assert_eq!(
            normalized.action_ids,
            vec!["rename".to_string(), "delete".to_string()]
        );
    }

    #[test]
    fn test_unresolved_id_reported() {
        let grid = read_xml(
            r#"<grid><row><col>
                 <fieldSet id="fs"><property id="noSuchProperty"/></fieldSet>
               </col></row></grid>"#,
        )
        .unwrap();
        let normalized = grid.normalize(&members());
        assert_eq!(
            normalized.issues,
            vec![GridIssue::UnresolvedId {
                kind: GridSlotKind::Property,
                id: "noSuchProperty".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_id_reported() {
        let grid = read_xml(
            r#"<grid><row><col>
                 <fieldSet id="a"><property id="firstName"/></fieldSet>
                 <fieldSet id="b"><property id="firstName"/></fieldSet>
               </col></row></grid>"#,
        )
        .unwrap();
        let normalized = grid.normalize(&members());
        assert_eq!(
            normalized.issues,
            vec![GridIssue::DuplicateId {
                kind: GridSlotKind::Property,
                id: "firstName".to_string(),
            }]
        );
        // last placement wins in the lookup map
        assert_eq!(normalized.field_set_of("firstName"), Some("b"));
    }
}
