//! Action-level factories

use trestle_applib::SemanticsOf;
use trestle_ident::FeatureType;

use crate::error::MetaModelError;
use crate::facets::{Facet, Precedence};
use crate::factory::{FacetFactory, MemberDef, ProcessClassContext, ProcessMemberContext};

/// Attaches [`Facet::ActionSemantics`]: the declared semantics, or
/// non-idempotent as the safe-side fallback when nothing was declared.
pub struct ActionSemanticsFacetFactory;

impl FacetFactory for ActionSemanticsFacetFactory {
    fn name(&self) -> &'static str {
        "ActionSemantics"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Action]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        let MemberDef::Action(action) = ctx.member else {
            return Ok(());
        };
        match action.semantics {
            Some(declared) => {
                ctx.holder
                    .add_facet_default(Facet::ActionSemantics(declared));
            }
            None => {
                ctx.holder.add_facet(
                    Facet::ActionSemantics(SemanticsOf::NonIdempotent),
                    Precedence::Fallback,
                );
            }
        }
        Ok(())
    }
}

/// Attaches [`Facet::BookmarkPolicy`] to classes and actions that
/// declare one.
pub struct BookmarkPolicyFacetFactory;

impl FacetFactory for BookmarkPolicyFacetFactory {
    fn name(&self) -> &'static str {
        "BookmarkPolicy"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Object, FeatureType::Action]
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> Result<(), MetaModelError> {
        if ctx.def.bookmark_policy != trestle_applib::BookmarkPolicy::NotSpecified {
            ctx.holder
                .add_facet_default(Facet::BookmarkPolicy(ctx.def.bookmark_policy));
        }
        Ok(())
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        let MemberDef::Action(action) = ctx.member else {
            return Ok(());
        };
        if action.bookmark_policy != trestle_applib::BookmarkPolicy::NotSpecified {
            ctx.holder
                .add_facet_default(Facet::BookmarkPolicy(action.bookmark_policy));
        }
        Ok(())
    }
}

/// Attaches [`Facet::ActionInvocation`] and [`Facet::ValidateArgs`] from
/// the registered callbacks.
pub struct ActionInvocationFacetFactory;

impl FacetFactory for ActionInvocationFacetFactory {
    fn name(&self) -> &'static str {
        "ActionInvocation"
    }

    fn feature_types(&self) -> &'static [FeatureType] {
        &[FeatureType::Action]
    }

    fn process_member(&self, ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        let MemberDef::Action(action) = ctx.member else {
            return Ok(());
        };
        if let Some(f) = &action.invoke {
            ctx.holder
                .add_facet_default(Facet::ActionInvocation(f.clone()));
        }
        if let Some(f) = &action.validate_args {
            ctx.holder.add_facet_default(Facet::ValidateArgs(f.clone()));
        }
        Ok(())
    }
}
