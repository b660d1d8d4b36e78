//! Collection and value-type factories

use trestle_ident::FeatureType;

use crate::error::MetaModelError;
use crate::facets::{autofit, CollectionSemanticsFacet, Facet};
use crate::factory::{FacetFactory, MemberDef, ProcessClassContext, ProcessMemberContext};

/// Attaches [`Facet::CollectionSemantics`] and [`Facet::TypeOfElement`]
/// to collections.
///
/// The declared container type is fitted against the autofit lookup
/// table; an unrecognized container leaves the variant unset and the
/// collection degrades to a generic list.
pub struct CollectionSemanticsFacetFactory;

impl FacetFactory for CollectionSemanticsFacetFactory {
    fn name(&self) -> &'static str {
        "CollectionSemantics"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Collection]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        let MemberDef::Collection(collection) = ctx.member else {
            return Ok(());
        };
        let variant = collection
            .container_type
            .as_deref()
            .and_then(autofit::variant_for);
        ctx.holder
            .add_facet_default(Facet::CollectionSemantics(CollectionSemanticsFacet::new(
                variant,
                &collection.element_type,
            )));
        ctx.holder
            .add_facet_default(Facet::TypeOfElement(collection.element_type.clone()));
        Ok(())
    }
}

/// Attaches [`Facet::ValueSemantics`] to enum-like value types that
/// registered a fixed value set.
pub struct ValueSemanticsFacetFactory;

impl FacetFactory for ValueSemanticsFacetFactory {
    fn name(&self) -> &'static str {
        "ValueSemantics"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Object]
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> Result<(), MetaModelError> {
        if let Some(f) = &ctx.def.value_set {
            ctx.holder.add_facet_default(Facet::ValueSemantics(f.clone()));
        }
        Ok(())
    }
}
