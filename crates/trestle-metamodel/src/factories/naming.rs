//! Naming and description factories
//!
//! Attach noun-form and description facets from declared literals, or
//! infer a friendly name from the feature's identifier when nothing was
//! declared. Declared literals attach at default precedence, inferred
//! ones at inferred precedence, so a later declared attachment always
//! wins.

use trestle_applib::TranslationContext;
use trestle_ident::FeatureType;

use crate::error::MetaModelError;
use crate::facets::{DescribedFacet, Facet, NamedFacet, NounForms, Precedence};
use crate::factory::{FacetFactory, ProcessClassContext, ProcessMemberContext, ProcessParamContext};

/// Derive a friendly display name from a camelCase identifier:
/// `"firstName"` becomes `"First Name"`.
pub fn friendly_name(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 4);
    for (i, c) in id.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else if c == '_' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// Naive plural used when no plural literal was declared.
fn pluralize(singular: &str) -> String {
    if singular.ends_with('s') || singular.ends_with('x') {
        format!("{singular}es")
    } else if let Some(stem) = singular.strip_suffix('y') {
        format!("{stem}ies")
    } else {
        format!("{singular}s")
    }
}

/// Attaches [`Facet::ObjectNamed`] and [`Facet::Described`] to classes.
pub struct ObjectNamedFacetFactory;

impl FacetFactory for ObjectNamedFacetFactory {
    fn name(&self) -> &'static str {
        "ObjectNamed"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Object]
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> Result<(), MetaModelError> {
        let context = TranslationContext::named(ctx.holder.identifier().to_string().as_str());

        let (noun_forms, precedence) = match &ctx.def.named_singular {
            Some(singular) => {
                let plural = ctx
                    .def
                    .named_plural
                    .clone()
                    .unwrap_or_else(|| pluralize(singular));
                (
                    NounForms::singular_and_plural(singular, Some(&plural)),
                    Precedence::Default,
                )
            }
            None => {
                let singular = friendly_name(ctx.def.logical_type_name.simple_name());
                let plural = pluralize(&singular);
                (
                    NounForms::singular_and_plural(&singular, Some(&plural)),
                    Precedence::Inferred,
                )
            }
        };
        ctx.holder.add_facet(
            Facet::ObjectNamed(NamedFacet::new(noun_forms, context.clone())),
            precedence,
        );

        if let Some(text) = &ctx.def.described_as {
            ctx.holder
                .add_facet_default(Facet::Described(DescribedFacet::new(text, context)));
        }
        Ok(())
    }
}

/// Attaches [`Facet::MemberNamed`] and [`Facet::Described`] to members
/// and parameters.
pub struct MemberNamedFacetFactory;

impl FacetFactory for MemberNamedFacetFactory {
    fn name(&self) -> &'static str {
        "MemberNamed"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[
            FeatureType::Property,
            FeatureType::Collection,
            FeatureType::Action,
            FeatureType::ActionParameter,
        ]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        let context = TranslationContext::named(ctx.holder.identifier().to_string().as_str());

        let (label, precedence) = match ctx.member.named() {
            Some(declared) => (declared.to_string(), Precedence::Default),
            None => (friendly_name(ctx.member.id()), Precedence::Inferred),
        };
        ctx.holder.add_facet(
            Facet::MemberNamed(NamedFacet::new(
                NounForms::indifferent(&label),
                context.clone(),
            )),
            precedence,
        );

        if let Some(text) = ctx.member.described_as() {
            ctx.holder
                .add_facet_default(Facet::Described(DescribedFacet::new(text, context)));
        }
        Ok(())
    }

    fn process_params(&self, ctx: &mut ProcessParamContext<'_>) -> Result<(), MetaModelError> {
        let context = TranslationContext::named(ctx.holder.identifier().to_string().as_str());

        let (label, precedence) = match &ctx.param.named {
            Some(declared) => (declared.clone(), Precedence::Default),
            None => (friendly_name(&ctx.param.name), Precedence::Inferred),
        };
        ctx.holder.add_facet(
            Facet::MemberNamed(NamedFacet::new(
                NounForms::indifferent(&label),
                context.clone(),
            )),
            precedence,
        );

        if let Some(text) = &ctx.param.described_as {
            ctx.holder
                .add_facet_default(Facet::Described(DescribedFacet::new(text, context)));
        }
        Ok(())
    }
}
