//! Facet factory contract
//!
//! A facet factory inspects one feature's descriptor and attaches facets
//! to its holder. Factories declare the feature types they apply to; the
//! specification loader routes each factory to the matching features in
//! a fixed pass order (class, then members, then parameters). A factory
//! error is a hard startup failure: construction of that class aborts.

use trestle_applib::{ActionDef, CollectionDef, MemberOrder, ObjectDef, ParamDef, PropertyDef, Where};
use trestle_ident::FeatureType;

use crate::error::MetaModelError;
use crate::facets::FacetHolder;

/// The descriptor of the member under introspection.
#[derive(Clone, Copy)]
pub enum MemberDef<'a> {
    /// A property declaration.
    Property(&'a PropertyDef),
    /// A collection declaration.
    Collection(&'a CollectionDef),
    /// An action declaration.
    Action(&'a ActionDef),
}

impl<'a> MemberDef<'a> {
    /// The member id.
    pub fn id(&self) -> &'a str {
        match self {
            MemberDef::Property(p) => &p.id,
            MemberDef::Collection(c) => &c.id,
            MemberDef::Action(a) => &a.id,
        }
    }

    /// What kind of member this is.
    pub fn feature_type(&self) -> FeatureType {
        match self {
            MemberDef::Property(_) => FeatureType::Property,
            MemberDef::Collection(_) => FeatureType::Collection,
            MemberDef::Action(_) => FeatureType::Action,
        }
    }

    /// Declared static visibility.
    pub fn hidden(&self) -> Where {
        match self {
            MemberDef::Property(p) => p.hidden,
            MemberDef::Collection(c) => c.hidden,
            MemberDef::Action(a) => a.hidden,
        }
    }

    /// Declared UI label, when present.
    pub fn named(&self) -> Option<&'a str> {
        match self {
            MemberDef::Property(p) => p.named.as_deref(),
            MemberDef::Collection(c) => c.named.as_deref(),
            MemberDef::Action(a) => a.named.as_deref(),
        }
    }

    /// Declared description, when present.
    pub fn described_as(&self) -> Option<&'a str> {
        match self {
            MemberDef::Property(p) => p.described_as.as_deref(),
            MemberDef::Collection(c) => c.described_as.as_deref(),
            MemberDef::Action(a) => a.described_as.as_deref(),
        }
    }

    /// Declared layout placement, when present.
    pub fn member_order(&self) -> Option<&'a MemberOrder> {
        match self {
            MemberDef::Property(p) => p.member_order.as_ref(),
            MemberDef::Collection(c) => c.member_order.as_ref(),
            MemberDef::Action(a) => a.member_order.as_ref(),
        }
    }
}

/// Context of the class-level pass.
pub struct ProcessClassContext<'a> {
    /// The class descriptor under introspection.
    pub def: &'a ObjectDef,
    /// The class-level facet holder being populated.
    pub holder: &'a mut FacetHolder,
}

/// Context of the member-level pass.
pub struct ProcessMemberContext<'a> {
    /// The owning class descriptor.
    pub class_def: &'a ObjectDef,
    /// The member under introspection.
    pub member: MemberDef<'a>,
    /// The member's facet holder being populated.
    pub holder: &'a mut FacetHolder,
}

/// Context of the parameter-level pass.
pub struct ProcessParamContext<'a> {
    /// The owning action descriptor.
    pub action: &'a ActionDef,
    /// The parameter under introspection.
    pub param: &'a ParamDef,
    /// Zero-based parameter position.
    pub index: usize,
    /// The parameter's facet holder being populated.
    pub holder: &'a mut FacetHolder,
}

/// Pluggable unit of the introspection pass.
///
/// Default hook implementations do nothing, so a factory overrides only
/// the passes relevant to its feature types.
pub trait FacetFactory: Send + Sync {
    /// Stable factory name, used in error reports.
    fn name(&self) -> &'static str;

    /// The feature types this factory applies to.
    fn feature_types(&self) -> &'static [FeatureType];

    /// Class-level pass.
    fn process_class(&self, _ctx: &mut ProcessClassContext<'_>) -> Result<(), MetaModelError> {
        Ok(())
    }

    /// Member-level pass.
    fn process_member(&self, _ctx: &mut ProcessMemberContext<'_>) -> Result<(), MetaModelError> {
        Ok(())
    }

    /// Parameter-level pass.
    fn process_params(&self, _ctx: &mut ProcessParamContext<'_>) -> Result<(), MetaModelError> {
        Ok(())
    }

    /// Whether this factory participates in the pass for `feature_type`.
    fn applies_to(&self, feature_type: FeatureType) -> bool {
        self.feature_types().contains(&feature_type)
    }
}
