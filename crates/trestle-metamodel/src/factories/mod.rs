//! Concrete facet factories
//!
//! One factory per behavior axis. The default programming model installs
//! them in a fixed order; see [`crate::progmodel`].

pub mod actions;
pub mod collections;
pub mod members;
pub mod naming;
pub mod title;

pub use actions::{
    ActionInvocationFacetFactory, ActionSemanticsFacetFactory, BookmarkPolicyFacetFactory,
};
pub use collections::{CollectionSemanticsFacetFactory, ValueSemanticsFacetFactory};
pub use members::{
    AccessorFacetFactory, DisabledFacetFactory, HiddenFacetFactory, MaxLengthFacetFactory,
    MemberOrderFacetFactory, OptionalityFacetFactory,
};
pub use naming::{friendly_name, MemberNamedFacetFactory, ObjectNamedFacetFactory};
pub use title::TitleFacetFactory;
