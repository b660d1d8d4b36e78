//! Grid layout data model
//!
//! A [`Grid`] is the layout descriptor of one domain class: rows of
//! columns, each column holding field sets (groups of properties),
//! collections, actions, and possibly nested rows. The JSON form maps
//! straight onto these structs via serde; the XML form is read by the
//! event walker in [`crate::xml`].

use serde::{Deserialize, Serialize};

/// Layout descriptor of one domain class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Top-level rows, rendered in order.
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// One horizontal band of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Columns within the row, rendered left to right.
    #[serde(default)]
    pub cols: Vec<Col>,
}

/// One column of a row; spans are twelfths of the row width.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Col {
    /// Width in twelfths (1..=12).
    #[serde(default = "default_span")]
    pub span: u8,
    /// Property groups placed in this column.
    #[serde(default, rename = "fieldSets")]
    pub field_sets: Vec<FieldSet>,
    /// Collections placed in this column.
    #[serde(default)]
    pub collections: Vec<CollectionLayoutData>,
    /// Actions placed directly in this column.
    #[serde(default)]
    pub actions: Vec<ActionLayoutData>,
    /// Nested rows, for finer subdivision.
    #[serde(default)]
    pub rows: Vec<Row>,
}

fn default_span() -> u8 {
    12
}

/// A named group of properties, with optional panel-level actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    /// Field-set id, referenced by member-order declarations.
    pub id: String,
    /// Display name of the group; `None` infers from the id.
    #[serde(default)]
    pub name: Option<String>,
    /// Properties in the group, in render order.
    #[serde(default)]
    pub properties: Vec<PropertyLayoutData>,
    /// Actions rendered in the group's panel header.
    #[serde(default)]
    pub actions: Vec<ActionLayoutData>,
}

/// Layout slot of one property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyLayoutData {
    /// Property id.
    pub id: String,
    /// Label override.
    #[serde(default)]
    pub named: Option<String>,
    /// Whether the label renders beside or above the field.
    #[serde(default, rename = "labelPosition")]
    pub label_position: Option<String>,
}

/// Layout slot of one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionLayoutData {
    /// Collection id.
    pub id: String,
    /// Label override.
    #[serde(default)]
    pub named: Option<String>,
    /// Preferred presentation ("table", "hidden", ...).
    #[serde(default, rename = "defaultView")]
    pub default_view: Option<String>,
}

/// Layout slot of one action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLayoutData {
    /// Action id.
    pub id: String,
    /// Label override.
    #[serde(default)]
    pub named: Option<String>,
    /// Button placement hint ("panel", "dropdown", ...).
    #[serde(default)]
    pub position: Option<String>,
}

impl Grid {
    /// Visit every property slot in render order.
    pub fn visit_properties<'a>(&'a self, f: &mut impl FnMut(&'a FieldSet, &'a PropertyLayoutData)) {
        fn walk_rows<'a>(
            rows: &'a [Row],
            f: &mut impl FnMut(&'a FieldSet, &'a PropertyLayoutData),
        ) {
            for row in rows {
                for col in &row.cols {
                    for fs in &col.field_sets {
                        for prop in &fs.properties {
                            f(fs, prop);
                        }
                    }
                    walk_rows(&col.rows, f);
                }
            }
        }
        walk_rows(&self.rows, f);
    }

    /// Visit every collection slot in render order.
    pub fn visit_collections<'a>(&'a self, f: &mut impl FnMut(&'a CollectionLayoutData)) {
        fn walk_rows<'a>(rows: &'a [Row], f: &mut impl FnMut(&'a CollectionLayoutData)) {
            for row in rows {
                for col in &row.cols {
                    for coll in &col.collections {
                        f(coll);
                    }
                    walk_rows(&col.rows, f);
                }
            }
        }
        walk_rows(&self.rows, f);
    }

    /// Visit every action slot (column-level and field-set-level) in
    /// render order.
    pub fn visit_actions<'a>(&'a self, f: &mut impl FnMut(&'a ActionLayoutData)) {
        fn walk_rows<'a>(rows: &'a [Row], f: &mut impl FnMut(&'a ActionLayoutData)) {
            for row in rows {
                for col in &row.cols {
                    for action in &col.actions {
                        f(action);
                    }
                    for fs in &col.field_sets {
                        for action in &fs.actions {
                            f(action);
                        }
                    }
                    walk_rows(&col.rows, f);
                }
            }
        }
        walk_rows(&self.rows, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        Grid {
            rows: vec![Row {
                cols: vec![
                    Col {
                        span: 6,
                        field_sets: vec![FieldSet {
                            id: "identity".to_string(),
                            name: Some("Identity".to_string()),
                            properties: vec![
                                PropertyLayoutData {
                                    id: "firstName".to_string(),
                                    ..Default::default()
                                },
                                PropertyLayoutData {
                                    id: "lastName".to_string(),
                                    ..Default::default()
                                },
                            ],
                            actions: vec![ActionLayoutData {
                                id: "rename".to_string(),
                                ..Default::default()
                            }],
                        }],
                        collections: vec![],
                        actions: vec![],
                        rows: vec![],
                    },
                    Col {
                        span: 6,
                        field_sets: vec![],
                        collections: vec![CollectionLayoutData {
                            id: "orders".to_string(),
                            ..Default::default()
                        }],
                        actions: vec![ActionLayoutData {
                            id: "delete".to_string(),
                            ..Default::default()
                        }],
                        rows: vec![],
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_visit_properties_in_render_order() {
        let grid = sample_grid();
        let mut seen = Vec::new();
        grid.visit_properties(&mut |fs, prop| seen.push((fs.id.clone(), prop.id.clone())));
        assert_eq!(
            seen,
            vec![
                ("identity".to_string(), "firstName".to_string()),
                ("identity".to_string(), "lastName".to_string()),
            ]
        );
    }

    #[test]
    fn test_visit_actions_covers_columns_and_field_sets() {
        let grid = sample_grid();
        let mut seen = Vec::new();
        grid.visit_actions(&mut |a| seen.push(a.id.clone()));
        assert_eq!(seen, vec!["rename".to_string(), "delete".to_string()]);
    }

    #[test]
    fn test_json_roundtrip() {
        let grid = sample_grid();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
