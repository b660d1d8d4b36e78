//! Title factory

use trestle_ident::FeatureType;

use crate::error::MetaModelError;
use crate::facets::{Facet, FacetKind, NounForm, Precedence, TitleFacet};
use crate::factory::{FacetFactory, ProcessClassContext};

/// Attaches [`Facet::Title`] to every class: the declared provider when
/// one was registered, otherwise a fallback literal taken from the
/// class's singular noun (which the naming factory attached earlier in
/// the pass) or, failing that, the simple name.
pub struct TitleFacetFactory;

impl FacetFactory for TitleFacetFactory {
    fn name(&self) -> &'static str {
        "Title"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Object]
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> Result<(), MetaModelError> {
        let fallback = match ctx.holder.get_facet(FacetKind::ObjectNamed) {
            Some(Facet::ObjectNamed(named)) => named
                .noun_forms()
                .get(NounForm::Singular)
                .or_else(|| named.noun_forms().preferred())
                .map(str::to_string),
            _ => None,
        }
        .unwrap_or_else(|| ctx.def.logical_type_name.simple_name().to_string());

        let (facet, precedence) = match &ctx.def.title {
            Some(provider) => (
                TitleFacet::of_provider(provider.clone(), &fallback),
                Precedence::Default,
            ),
            None => (TitleFacet::of_fallback(&fallback), Precedence::Fallback),
        };
        ctx.holder.add_facet(Facet::Title(facet), precedence);
        Ok(())
    }
}
