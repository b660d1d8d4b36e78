//! Post-processors
//!
//! Post-processors run after the factory passes, once the full member
//! set of a class is attached, and may still mutate the specification —
//! it has not been published yet. The standard set wires layout grids
//! into the facet model.

use std::sync::Arc;

use tracing::trace;
use trestle_applib::MemberOrder;
use trestle_layout::{GridLoader, GridMembers};

use crate::error::MetaModelError;
use crate::facets::{Facet, FacetKind, Precedence};
use crate::spec::ObjectSpecification;

/// A pass over one freshly-built specification, before publication.
pub trait PostProcessor: Send + Sync {
    /// Stable name, used in error reports.
    fn name(&self) -> &'static str;

    /// Inspect and possibly mutate the specification.
    fn post_process(&self, spec: &mut ObjectSpecification) -> Result<(), MetaModelError>;
}

/// Probes for the class's layout file, normalizes it against the member
/// set, and attaches the result as [`Facet::GridPreference`].
pub struct GridPostProcessor {
    loader: Arc<GridLoader>,
}

impl GridPostProcessor {
    /// Probe layouts through `loader`.
    pub fn new(loader: Arc<GridLoader>) -> Self {
        Self { loader }
    }
}

impl PostProcessor for GridPostProcessor {
    fn name(&self) -> &'static str {
        "Grid"
    }

    fn post_process(&self, spec: &mut ObjectSpecification) -> Result<(), MetaModelError> {
        let simple_name = spec.logical_type_name().simple_name();
        let Some(grid) = self.loader.load(simple_name)? else {
            trace!(class = %spec.logical_type_name(), "no layout grid");
            return Ok(());
        };
        let members = GridMembers {
            properties: spec.property_ids(),
            collections: spec.collections().iter().map(|c| c.id().to_string()).collect(),
            actions: spec.actions().iter().map(|a| a.id().to_string()).collect(),
        };
        let normalized = (*grid).clone().normalize(&members);
        spec.holder_mut()
            .add_facet_default(Facet::GridPreference(Arc::new(normalized)));
        Ok(())
    }
}

/// Derives member-order facets from the layout grid for properties that
/// did not declare a placement. Attached at inferred precedence, so a
/// declared member order always stands.
pub struct GridMemberOrderPostProcessor;

impl PostProcessor for GridMemberOrderPostProcessor {
    fn name(&self) -> &'static str {
        "GridMemberOrder"
    }

    fn post_process(&self, spec: &mut ObjectSpecification) -> Result<(), MetaModelError> {
        let Some(Facet::GridPreference(grid)) = spec.get_facet(FacetKind::GridPreference) else {
            return Ok(());
        };
        let grid = grid.clone();

        let mut placements: Vec<(String, String, String)> = Vec::new();
        let mut sequence = 0usize;
        grid.grid.visit_properties(&mut |fs, prop| {
            sequence += 1;
            placements.push((prop.id.clone(), fs.id.clone(), sequence.to_string()));
        });

        for (prop_id, field_set_id, seq) in placements {
            if let Some(prop) = spec
                .properties_mut()
                .iter_mut()
                .find(|p| p.id() == prop_id)
            {
                prop.holder_mut().add_facet(
                    Facet::MemberOrder(MemberOrder::new(&field_set_id, &seq)),
                    Precedence::Inferred,
                );
            }
        }
        Ok(())
    }
}
