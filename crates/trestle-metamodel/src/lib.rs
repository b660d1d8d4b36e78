//! The trestle metamodel.
//!
//! Builds a queryable model of an application's domain classes from the
//! descriptors registered in a [`DomainRegistry`](trestle_applib::DomainRegistry):
//! an ordered [`ProgrammingModel`] of facet factories introspects each
//! class into an [`ObjectSpecification`] whose behavior hangs off
//! [`Facet`]s, post-processors fold in layout grids, and validators
//! sweep the finished model for soft defects. [`MetaModelContext`] ties
//! it all together at bootstrap.

#![warn(missing_docs)]

pub mod column_order;
pub mod config;
pub mod context;
pub mod error;
pub mod facets;
pub mod factories;
pub mod factory;
pub mod loader;
pub mod managed;
pub mod post;
pub mod progmodel;
pub mod publish;
pub mod spec;
pub mod validate;

pub use column_order::{ColumnOrderChain, ColumnOrderFromFiles};
pub use config::{ConfigError, MetaModelConfig, Strictness};
pub use context::{MetaModelContext, MetaModelContextBuilder};
pub use error::MetaModelError;
pub use facets::{
    CollectionVariant, DescribedFacet, Facet, FacetHolder, FacetKind, NamedFacet, NounForm,
    NounForms, Precedence, TitleFacet,
};
pub use factory::FacetFactory;
pub use loader::SpecificationLoader;
pub use managed::ManagedObject;
pub use post::PostProcessor;
pub use progmodel::{ProgrammingModel, ProgrammingModelBuilder};
pub use publish::{ChangeKind, EnlistedChanges};
pub use spec::{
    ActionParameterSpec, ActionSpec, CollectionSpec, ObjectSpecification, PropertySpec,
};
pub use validate::{
    MessageRegistry, MetaModelValidator, ValidationContext, ValidationFailure, ValidationFailures,
};
