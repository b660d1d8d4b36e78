//! XML layout reader
//!
//! Event-walk over the `.layout.xml` form with a frame stack mirroring
//! the element nesting: `grid > row > col > (fieldSet | collection |
//! action | row)`, `fieldSet > (property | action)`. Leaf elements may be
//! self-closing.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::GridError;
use crate::model::{
    ActionLayoutData, Col, CollectionLayoutData, FieldSet, Grid, PropertyLayoutData, Row,
};

enum Frame {
    Grid(Grid),
    Row(Row),
    Col(Col),
    FieldSet(FieldSet),
}

impl Frame {
    fn element_name(&self) -> &'static str {
        match self {
            Frame::Grid(_) => "grid",
            Frame::Row(_) => "row",
            Frame::Col(_) => "col",
            Frame::FieldSet(_) => "fieldSet",
        }
    }
}

fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, GridError> {
    for a in e.attributes() {
        let a = a.map_err(quick_xml::Error::from)?;
        if a.key.as_ref() == name.as_bytes() {
            return Ok(Some(String::from_utf8_lossy(&a.value).to_string()));
        }
    }
    Ok(None)
}

fn required_attr(e: &BytesStart<'_>, element: &str, name: &str) -> Result<String, GridError> {
    attr(e, name)?.ok_or_else(|| GridError::MissingAttribute {
        element: element.to_string(),
        attribute: name.to_string(),
    })
}

fn parse_property(e: &BytesStart<'_>) -> Result<PropertyLayoutData, GridError> {
    Ok(PropertyLayoutData {
        id: required_attr(e, "property", "id")?,
        named: attr(e, "named")?,
        label_position: attr(e, "labelPosition")?,
    })
}

fn parse_collection(e: &BytesStart<'_>) -> Result<CollectionLayoutData, GridError> {
    Ok(CollectionLayoutData {
        id: required_attr(e, "collection", "id")?,
        named: attr(e, "named")?,
        default_view: attr(e, "defaultView")?,
    })
}

fn parse_action(e: &BytesStart<'_>) -> Result<ActionLayoutData, GridError> {
    Ok(ActionLayoutData {
        id: required_attr(e, "action", "id")?,
        named: attr(e, "named")?,
        position: attr(e, "position")?,
    })
}

fn open_frame(stack: &[Frame], e: &BytesStart<'_>, name: &str) -> Result<Frame, GridError> {
    let parent = stack.last().map(Frame::element_name).unwrap_or("document");
    match (name, stack.last()) {
        ("grid", None) => Ok(Frame::Grid(Grid::default())),
        ("row", Some(Frame::Grid(_))) | ("row", Some(Frame::Col(_))) => Ok(Frame::Row(Row::default())),
        ("col", Some(Frame::Row(_))) => {
            let span = match attr(e, "span")? {
                Some(raw) => raw.parse::<u8>().ok().filter(|s| (1..=12).contains(s)).ok_or(
                    GridError::InvalidAttribute {
                        attribute: "span".to_string(),
                        value: raw,
                    },
                )?,
                None => 12,
            };
            Ok(Frame::Col(Col {
                span,
                ..Default::default()
            }))
        }
        ("fieldSet", Some(Frame::Col(_))) => Ok(Frame::FieldSet(FieldSet {
            id: required_attr(e, "fieldSet", "id")?,
            name: attr(e, "name")?,
            ..Default::default()
        })),
        _ => Err(GridError::UnexpectedElement {
            element: name.to_string(),
            parent: parent.to_string(),
        }),
    }
}

/// Attach a leaf element to the frame it is nested in.
fn attach_leaf(stack: &mut [Frame], e: &BytesStart<'_>, name: &str) -> Result<(), GridError> {
    let parent = stack.last().map(Frame::element_name).unwrap_or("document");
    match (name, stack.last_mut()) {
        ("property", Some(Frame::FieldSet(fs))) => {
            fs.properties.push(parse_property(e)?);
            Ok(())
        }
        ("action", Some(Frame::FieldSet(fs))) => {
            fs.actions.push(parse_action(e)?);
            Ok(())
        }
        ("action", Some(Frame::Col(col))) => {
            col.actions.push(parse_action(e)?);
            Ok(())
        }
        ("collection", Some(Frame::Col(col))) => {
            col.collections.push(parse_collection(e)?);
            Ok(())
        }
        _ => Err(GridError::UnexpectedElement {
            element: name.to_string(),
            parent: parent.to_string(),
        }),
    }
}

fn close_frame(stack: &mut Vec<Frame>, done: &mut Option<Grid>) {
    let Some(frame) = stack.pop() else { return };
    match (frame, stack.last_mut()) {
        (Frame::Grid(grid), _) => *done = Some(grid),
        (Frame::Row(row), Some(Frame::Grid(grid))) => grid.rows.push(row),
        (Frame::Row(row), Some(Frame::Col(col))) => col.rows.push(row),
        (Frame::Col(col), Some(Frame::Row(row))) => row.cols.push(col),
        (Frame::FieldSet(fs), Some(Frame::Col(col))) => col.field_sets.push(fs),
        // unreachable given open_frame's nesting checks
        _ => {}
    }
}

const LEAF_ELEMENTS: &[&str] = &["property", "collection", "action"];

/// Read a [`Grid`] from its `.layout.xml` form.
pub fn read_xml(xml: &str) -> Result<Grid, GridError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut done: Option<Grid> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if LEAF_ELEMENTS.contains(&name.as_str()) {
                    // leaf with an explicit end tag; the End event is ignored below
                    attach_leaf(&mut stack, e, &name)?;
                    continue;
                }
                let frame = open_frame(&stack, e, &name)?;
                stack.push(frame);
            }
            Event::Empty(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if LEAF_ELEMENTS.contains(&name.as_str()) {
                    attach_leaf(&mut stack, e, &name)?;
                } else {
                    // self-closing structural element, e.g. <row/>
                    let frame = open_frame(&stack, e, &name)?;
                    stack.push(frame);
                    close_frame(&mut stack, &mut done);
                }
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if LEAF_ELEMENTS.contains(&name.as_str()) {
                    continue;
                }
                close_frame(&mut stack, &mut done);
            }
            Event::Eof => break,
            // text, comments and declarations carry no layout data
            _ => {}
        }
    }

    Ok(done.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <grid>
          <row>
            <col span="6">
              <fieldSet id="identity" name="Identity">
                <property id="firstName" named="First name"/>
                <property id="lastName"/>
                <action id="rename"/>
              </fieldSet>
            </col>
            <col span="6">
              <collection id="orders" defaultView="table"/>
              <action id="delete" position="panel"/>
              <row>
                <col>
                  <fieldSet id="notes">
                    <property id="comments"/>
                  </fieldSet>
                </col>
              </row>
            </col>
          </row>
        </grid>
    "#;

    #[test]
    fn test_read_nested_grid() {
        let grid = read_xml(SAMPLE).unwrap();
        assert_eq!(grid.rows.len(), 1);
        let cols = &grid.rows[0].cols;
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].span, 6);
        assert_eq!(cols[0].field_sets[0].id, "identity");
        assert_eq!(cols[0].field_sets[0].name.as_deref(), Some("Identity"));
        assert_eq!(cols[0].field_sets[0].properties.len(), 2);
        assert_eq!(
            cols[0].field_sets[0].properties[0].named.as_deref(),
            Some("First name")
        );
        assert_eq!(cols[1].collections[0].id, "orders");
        assert_eq!(cols[1].collections[0].default_view.as_deref(), Some("table"));
        assert_eq!(cols[1].actions[0].id, "delete");
        // nested row
        assert_eq!(cols[1].rows.len(), 1);
        assert_eq!(
            cols[1].rows[0].cols[0].field_sets[0].properties[0].id,
            "comments"
        );
    }

    #[test]
    fn test_col_span_defaults_to_full_width() {
        let grid = read_xml("<grid><row><col/></row></grid>").unwrap();
        assert_eq!(grid.rows[0].cols[0].span, 12);
    }

    #[test]
    fn test_rejects_property_outside_field_set() {
        let err = read_xml("<grid><row><col><property id=\"x\"/></col></row></grid>");
        assert!(matches!(
            err,
            Err(GridError::UnexpectedElement { ref element, ref parent })
                if element == "property" && parent == "col"
        ));
    }

    #[test]
    fn test_rejects_missing_field_set_id() {
        let err = read_xml("<grid><row><col><fieldSet name=\"x\"/></col></row></grid>");
        assert!(matches!(err, Err(GridError::MissingAttribute { .. })));
    }

    #[test]
    fn test_rejects_invalid_span() {
        let err = read_xml("<grid><row><col span=\"13\"/></row></grid>");
        assert!(matches!(err, Err(GridError::InvalidAttribute { .. })));
    }

    #[test]
    fn test_leaf_with_explicit_end_tag() {
        let grid = read_xml(
            "<grid><row><col><fieldSet id=\"fs\"><property id=\"a\"></property></fieldSet></col></row></grid>",
        )
        .unwrap();
        assert_eq!(grid.rows[0].cols[0].field_sets[0].properties[0].id, "a");
    }
}
