//! Bootstrap context
//!
//! [`MetaModelContext`] wires the configuration, the descriptor
//! registry, the programming model, the translation service and the
//! column-order chain into one bootstrap handle. [`create_metamodel`]
//! is the startup entry point: load everything, validate everything,
//! report soft failures.

use std::sync::Arc;

use tracing::{debug, info, warn};
use trestle_applib::{
    DomainRegistry, IdentityTranslation, TableColumnOrderService, TranslationService, Value,
};
use trestle_ident::LogicalTypeName;
use trestle_layout::GridLoader;

use crate::column_order::ColumnOrderChain;
use crate::config::MetaModelConfig;
use crate::error::MetaModelError;
use crate::loader::SpecificationLoader;
use crate::managed::ManagedObject;
use crate::progmodel::ProgrammingModel;
use crate::spec::ObjectSpecification;
use crate::validate::{MessageRegistry, ValidationContext, ValidationFailures};

/// The assembled metamodel runtime.
pub struct MetaModelContext {
    config: MetaModelConfig,
    loader: SpecificationLoader,
    translation: Arc<dyn TranslationService>,
    column_order: ColumnOrderChain,
    messages: MessageRegistry,
}

impl MetaModelContext {
    /// Start assembling a context over `registry`.
    pub fn builder(registry: DomainRegistry) -> MetaModelContextBuilder {
        MetaModelContextBuilder {
            registry,
            config: MetaModelConfig::default(),
            translation: None,
            model: None,
            column_order_services: Vec::new(),
            extra_messages: Vec::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &MetaModelConfig {
        &self.config
    }

    /// The specification loader.
    pub fn loader(&self) -> &SpecificationLoader {
        &self.loader
    }

    /// The bound translation service.
    pub fn translation(&self) -> &Arc<dyn TranslationService> {
        &self.translation
    }

    /// The column-order service chain.
    pub fn column_order(&self) -> &ColumnOrderChain {
        &self.column_order
    }

    /// The system message registry.
    pub fn messages(&self) -> &MessageRegistry {
        &self.messages
    }

    /// Convenience lookup through the loader.
    pub fn load_spec(
        &self,
        name: &LogicalTypeName,
    ) -> Result<Arc<ObjectSpecification>, MetaModelError> {
        self.loader.load_specification(name)
    }

    /// Manage `value` under the specification of `name`.
    pub fn manage(
        &self,
        name: &LogicalTypeName,
        value: Value,
    ) -> Result<ManagedObject, MetaModelError> {
        Ok(ManagedObject::of_value(self.load_spec(name)?, value))
    }

    /// Build the whole metamodel and run every installed validator.
    ///
    /// Build errors (unknown types, cycles, broken layout files) abort;
    /// validator findings come back as the soft failure report.
    pub fn create_metamodel(&self) -> Result<ValidationFailures, MetaModelError> {
        let specs = self.loader.load_all()?;
        info!(classes = specs.len(), "metamodel loaded");

        let ctx = ValidationContext {
            specs: &specs,
            services: self.loader.registry().services(),
            translation: self.translation.as_ref(),
            messages: &self.messages,
            config: &self.config,
        };

        let mut failures = ValidationFailures::new();
        for validator in self.loader.model().validators() {
            debug!(validator = validator.name(), "running validator");
            validator.validate(&ctx, &mut failures);
        }
        if failures.has_failures() {
            warn!(count = failures.len(), "metamodel validation found defects");
        }
        Ok(failures)
    }
}

/// Assembles a [`MetaModelContext`].
pub struct MetaModelContextBuilder {
    registry: DomainRegistry,
    config: MetaModelConfig,
    translation: Option<Arc<dyn TranslationService>>,
    model: Option<ProgrammingModel>,
    column_order_services: Vec<Arc<dyn TableColumnOrderService>>,
    extra_messages: Vec<String>,
}

impl MetaModelContextBuilder {
    /// Use `config` instead of the defaults.
    pub fn config(mut self, config: MetaModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind a translation service. Defaults to the identity passthrough.
    pub fn translation(mut self, translation: Arc<dyn TranslationService>) -> Self {
        self.translation = Some(translation);
        self
    }

    /// Install a custom programming model instead of the default one.
    pub fn programming_model(mut self, model: ProgrammingModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Contribute a column-order service to the chain.
    pub fn add_column_order(mut self, service: Arc<dyn TableColumnOrderService>) -> Self {
        self.column_order_services.push(service);
        self
    }

    /// Register an additional system message for translation checking.
    pub fn add_message(mut self, message: &str) -> Self {
        self.extra_messages.push(message.to_string());
        self
    }

    /// Finish assembly.
    pub fn build(self) -> MetaModelContext {
        let grid_loader = Arc::new(GridLoader::new(
            self.config.resources_root.clone(),
            self.config.production_mode,
        ));
        let model = self
            .model
            .unwrap_or_else(|| ProgrammingModel::default_model(grid_loader));

        let mut column_order_services = self.column_order_services;
        let standard = ColumnOrderChain::standard(self.config.resources_root.clone());
        let column_order = if column_order_services.is_empty() {
            standard
        } else {
            column_order_services.push(Arc::new(crate::column_order::ColumnOrderFromFiles::new(
                self.config.resources_root.clone(),
            )));
            ColumnOrderChain::new(column_order_services)
        };

        let mut messages = MessageRegistry::new();
        for message in &self.extra_messages {
            messages.add(message);
        }

        MetaModelContext {
            loader: SpecificationLoader::new(self.registry, model),
            translation: self
                .translation
                .unwrap_or_else(|| Arc::new(IdentityTranslation)),
            column_order,
            messages,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trestle_applib::{BeanSort, ObjectDef, PropertyDef, SemanticsOf};
    use trestle_applib::{ActionDef, BookmarkPolicy};

    fn ltn(name: &str) -> LogicalTypeName {
        LogicalTypeName::parse(name).unwrap()
    }

    fn context_with(defs: Vec<ObjectDef>) -> MetaModelContext {
        let mut registry = DomainRegistry::new();
        for def in defs {
            registry.register(def).unwrap();
        }
        MetaModelContext::builder(registry).build()
    }

    #[test]
    fn test_create_metamodel_clean_domain() {
        let ctx = context_with(vec![ObjectDef::new(ltn("t.Customer"), BeanSort::Entity)
            .with_property(PropertyDef::new("name", "Str"))]);
        let failures = ctx.create_metamodel().unwrap();
        assert!(failures.is_empty());
        assert_eq!(ctx.loader().cached_count(), 1);
    }

    #[test]
    fn test_create_metamodel_reports_unsafe_bookmarked_action() {
        let ctx = context_with(vec![ObjectDef::new(ltn("t.Customer"), BeanSort::Entity)
            .with_action(
                ActionDef::new("place", "t.Order")
                    .semantics(SemanticsOf::Idempotent)
                    .bookmark_policy(BookmarkPolicy::AsRoot),
            )]);
        let failures = ctx.create_metamodel().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures
            .iter()
            .any(|f| f.message.contains("bookmarkable")));
    }

    #[test]
    fn test_manage_through_context() {
        let ctx = context_with(vec![ObjectDef::new(ltn("t.Customer"), BeanSort::Entity)]);
        let managed = ctx.manage(&ltn("t.Customer"), Value::Null).unwrap();
        assert_eq!(managed.title().unwrap(), "Customer");
    }

    #[test]
    fn test_unknown_type_aborts_bootstrap() {
        let ctx = context_with(vec![ObjectDef::new(ltn("t.Customer"), BeanSort::Entity)
            .extends(ltn("t.Missing"))]);
        assert!(matches!(
            ctx.create_metamodel(),
            Err(MetaModelError::UnknownType(_))
        ));
    }
}
