//! The programming model
//!
//! An ordered registry of facet factories, post-processors and
//! validators, assembled once at bootstrap. The loader drives factories
//! over each class in a fixed pass order (class, members, parameters),
//! then post-processors (which see the full member set), then — once the
//! whole metamodel is loaded — the validators.

use std::sync::Arc;

use trestle_layout::GridLoader;

use crate::factories::{
    AccessorFacetFactory, ActionInvocationFacetFactory, ActionSemanticsFacetFactory,
    BookmarkPolicyFacetFactory, CollectionSemanticsFacetFactory, DisabledFacetFactory,
    HiddenFacetFactory, MaxLengthFacetFactory, MemberNamedFacetFactory, MemberOrderFacetFactory,
    ObjectNamedFacetFactory, OptionalityFacetFactory, TitleFacetFactory,
    ValueSemanticsFacetFactory,
};
use crate::factory::FacetFactory;
use crate::post::{GridMemberOrderPostProcessor, GridPostProcessor, PostProcessor};
use crate::validate::{
    BookmarkValidator, GridConsistencyValidator, MemberIdClashValidator, MetaModelValidator,
    TitleValidator, TranslationValidator,
};

/// Ordered factory/post-processor/validator registry.
pub struct ProgrammingModel {
    factories: Vec<Arc<dyn FacetFactory>>,
    post_processors: Vec<Arc<dyn PostProcessor>>,
    validators: Vec<Arc<dyn MetaModelValidator>>,
}

impl ProgrammingModel {
    /// Start assembling a model.
    pub fn builder() -> ProgrammingModelBuilder {
        ProgrammingModelBuilder::default()
    }

    /// The standard model: every built-in factory, the grid
    /// post-processors, and the full validator set.
    ///
    /// Factory order matters: naming runs before title so the title
    /// fallback can read the attached noun forms.
    pub fn default_model(grid_loader: Arc<GridLoader>) -> Self {
        Self::builder()
            .with_factory(Arc::new(ObjectNamedFacetFactory))
            .with_factory(Arc::new(TitleFacetFactory))
            .with_factory(Arc::new(BookmarkPolicyFacetFactory))
            .with_factory(Arc::new(ValueSemanticsFacetFactory))
            .with_factory(Arc::new(MemberNamedFacetFactory))
            .with_factory(Arc::new(HiddenFacetFactory))
            .with_factory(Arc::new(DisabledFacetFactory))
            .with_factory(Arc::new(OptionalityFacetFactory))
            .with_factory(Arc::new(MaxLengthFacetFactory))
            .with_factory(Arc::new(AccessorFacetFactory))
            .with_factory(Arc::new(ActionSemanticsFacetFactory))
            .with_factory(Arc::new(ActionInvocationFacetFactory))
            .with_factory(Arc::new(CollectionSemanticsFacetFactory))
            .with_factory(Arc::new(MemberOrderFacetFactory))
            .with_post_processor(Arc::new(GridPostProcessor::new(grid_loader)))
            .with_post_processor(Arc::new(GridMemberOrderPostProcessor))
            .with_validator(Arc::new(TitleValidator))
            .with_validator(Arc::new(TranslationValidator))
            .with_validator(Arc::new(BookmarkValidator))
            .with_validator(Arc::new(MemberIdClashValidator))
            .with_validator(Arc::new(GridConsistencyValidator))
            .build()
    }

    /// Factories in pass order.
    pub fn factories(&self) -> &[Arc<dyn FacetFactory>] {
        &self.factories
    }

    /// Post-processors in pass order.
    pub fn post_processors(&self) -> &[Arc<dyn PostProcessor>] {
        &self.post_processors
    }

    /// Validators in pass order.
    pub fn validators(&self) -> &[Arc<dyn MetaModelValidator>] {
        &self.validators
    }
}

/// Assembles a [`ProgrammingModel`] piece by piece.
#[derive(Default)]
pub struct ProgrammingModelBuilder {
    factories: Vec<Arc<dyn FacetFactory>>,
    post_processors: Vec<Arc<dyn PostProcessor>>,
    validators: Vec<Arc<dyn MetaModelValidator>>,
}

impl ProgrammingModelBuilder {
    /// Append a facet factory; order is execution order.
    pub fn with_factory(mut self, factory: Arc<dyn FacetFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    /// Append a post-processor.
    pub fn with_post_processor(mut self, post_processor: Arc<dyn PostProcessor>) -> Self {
        self.post_processors.push(post_processor);
        self
    }

    /// Append a validator.
    pub fn with_validator(mut self, validator: Arc<dyn MetaModelValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Finish assembly.
    pub fn build(self) -> ProgrammingModel {
        ProgrammingModel {
            factories: self.factories,
            post_processors: self.post_processors,
            validators: self.validators,
        }
    }
}
