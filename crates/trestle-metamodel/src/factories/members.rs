//! Member-level factories
//!
//! Visibility, usability, optionality, length constraints, accessors and
//! layout placement, each on its own behavior axis.

use trestle_applib::{Editing, Where};
use trestle_ident::FeatureType;

use crate::error::MetaModelError;
use crate::facets::{Facet, Precedence};
use crate::factory::{FacetFactory, MemberDef, ProcessMemberContext, ProcessParamContext};

/// Attaches [`Facet::Hidden`] and [`Facet::HideWhen`] to members.
pub struct HiddenFacetFactory;

impl FacetFactory for HiddenFacetFactory {
    fn name(&self) -> &'static str {
        "Hidden"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[
            FeatureType::Property,
            FeatureType::Collection,
            FeatureType::Action,
        ]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        let declared = ctx.member.hidden();
        if declared != Where::Nowhere {
            ctx.holder.add_facet_default(Facet::Hidden(declared));
        }
        let hide = match ctx.member {
            MemberDef::Property(p) => p.hide.clone(),
            MemberDef::Collection(c) => c.hide.clone(),
            MemberDef::Action(a) => a.hide.clone(),
        };
        if let Some(f) = hide {
            ctx.holder.add_facet_default(Facet::HideWhen(f));
        }
        Ok(())
    }
}

/// Attaches [`Facet::Disabled`] and [`Facet::DisableWhen`] to members.
///
/// A non-editable property gets a fallback-precedence disabled facet, so
/// a declared usability rule can still take its place.
pub struct DisabledFacetFactory;

impl FacetFactory for DisabledFacetFactory {
    fn name(&self) -> &'static str {
        "Disabled"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[
            FeatureType::Property,
            FeatureType::Collection,
            FeatureType::Action,
        ]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        if let MemberDef::Property(p) = ctx.member {
            if p.editing == Editing::Disabled {
                ctx.holder.add_facet(
                    Facet::Disabled {
                        r#where: Where::Everywhere,
                        reason: None,
                    },
                    Precedence::Fallback,
                );
            }
        }
        let disable = match ctx.member {
            MemberDef::Property(p) => p.disable.clone(),
            MemberDef::Collection(c) => c.disable.clone(),
            MemberDef::Action(a) => a.disable.clone(),
        };
        if let Some(f) = disable {
            ctx.holder.add_facet_default(Facet::DisableWhen(f));
        }
        Ok(())
    }
}

/// Attaches [`Facet::Optionality`] to properties and parameters.
pub struct OptionalityFacetFactory;

impl FacetFactory for OptionalityFacetFactory {
    fn name(&self) -> &'static str {
        "Optionality"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Property, FeatureType::ActionParameter]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        if let MemberDef::Property(p) = ctx.member {
            ctx.holder
                .add_facet_default(Facet::Optionality(p.optionality));
        }
        Ok(())
    }

    fn process_params(&self, ctx: &mut ProcessParamContext<'_>) -> Result<(), MetaModelError> {
        ctx.holder
            .add_facet_default(Facet::Optionality(ctx.param.optionality));
        Ok(())
    }
}

/// Attaches [`Facet::MaxLength`] where a cap was declared.
pub struct MaxLengthFacetFactory;

impl FacetFactory for MaxLengthFacetFactory {
    fn name(&self) -> &'static str {
        "MaxLength"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Property, FeatureType::ActionParameter]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        if let MemberDef::Property(p) = ctx.member {
            if let Some(max) = p.max_length {
                ctx.holder.add_facet_default(Facet::MaxLength(max));
            }
        }
        Ok(())
    }

    fn process_params(&self, ctx: &mut ProcessParamContext<'_>) -> Result<(), MetaModelError> {
        if let Some(max) = ctx.param.max_length {
            ctx.holder.add_facet_default(Facet::MaxLength(max));
        }
        Ok(())
    }
}

/// Attaches accessor, default, choices and validation facets from the
/// registered callbacks.
pub struct AccessorFacetFactory;

impl FacetFactory for AccessorFacetFactory {
    fn name(&self) -> &'static str {
        "Accessor"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[
            FeatureType::Property,
            FeatureType::Collection,
            FeatureType::ActionParameter,
        ]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        match ctx.member {
            MemberDef::Property(p) => {
                if let Some(f) = &p.getter {
                    ctx.holder
                        .add_facet_default(Facet::PropertyAccessor(f.clone()));
                }
                if let Some(f) = &p.default {
                    ctx.holder.add_facet_default(Facet::DefaultValue(f.clone()));
                }
                if let Some(f) = &p.choices {
                    ctx.holder.add_facet_default(Facet::Choices(f.clone()));
                }
                if let Some(f) = &p.validate {
                    ctx.holder
                        .add_facet_default(Facet::ValidateProperty(f.clone()));
                }
            }
            MemberDef::Collection(c) => {
                if let Some(f) = &c.getter {
                    ctx.holder
                        .add_facet_default(Facet::CollectionAccessor(f.clone()));
                }
            }
            MemberDef::Action(_) => {}
        }
        Ok(())
    }

    fn process_params(&self, ctx: &mut ProcessParamContext<'_>) -> Result<(), MetaModelError> {
        if let Some(f) = &ctx.param.default {
            ctx.holder.add_facet_default(Facet::DefaultValue(f.clone()));
        }
        if let Some(f) = &ctx.param.choices {
            ctx.holder.add_facet_default(Facet::Choices(f.clone()));
        }
        Ok(())
    }
}

/// Attaches [`Facet::MemberOrder`] from declared layout placement.
pub struct MemberOrderFacetFactory;

impl FacetFactory for MemberOrderFacetFactory {
    fn name(&self) -> &'static str {
        "MemberOrder"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[
            FeatureType::Property,
            FeatureType::Collection,
            FeatureType::Action,
        ]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        if let Some(order) = ctx.member.member_order() {
            ctx.holder
                .add_facet_default(Facet::MemberOrder(order.clone()));
        }
        Ok(())
    }
}
