//! Specification loading
//!
//! The loader turns registered descriptors into cached
//! [`ObjectSpecification`]s. Inheritance and mixin composition are
//! resolved at introspection time by merging member declarations, so no
//! pointer-chasing happens at lookup time. A specification is published
//! to the shared cache only after its facet set is fully built; readers
//! never observe a partially-built spec.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;
use trestle_applib::{ActionDef, CollectionDef, DomainRegistry, ObjectDef, PropertyDef};
use trestle_ident::{Identifier, LogicalTypeName};

use crate::error::MetaModelError;
use crate::facets::FacetHolder;
use crate::factory::{MemberDef, ProcessClassContext, ProcessMemberContext, ProcessParamContext};
use crate::progmodel::ProgrammingModel;
use crate::spec::{ActionParameterSpec, ActionSpec, CollectionSpec, ObjectSpecification, PropertySpec};

/// Caching, lazily-building loader of object specifications.
pub struct SpecificationLoader {
    registry: DomainRegistry,
    model: ProgrammingModel,
    cache: RwLock<FxHashMap<LogicalTypeName, Arc<ObjectSpecification>>>,
}

impl SpecificationLoader {
    /// Loader over `registry`, introspecting with `model`.
    pub fn new(registry: DomainRegistry, model: ProgrammingModel) -> Self {
        Self {
            registry,
            model,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// The descriptor registry.
    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    /// The installed programming model.
    pub fn model(&self) -> &ProgrammingModel {
        &self.model
    }

    /// The specification of `name`, building and caching it on first
    /// reference.
    pub fn load_specification(
        &self,
        name: &LogicalTypeName,
    ) -> Result<Arc<ObjectSpecification>, MetaModelError> {
        if let Some(cached) = self.cache.read().get(name) {
            return Ok(cached.clone());
        }

        let spec = Arc::new(self.build(name)?);
        let mut cache = self.cache.write();
        // a concurrent builder may have won the race; keep its result
        Ok(cache.entry(name.clone()).or_insert(spec).clone())
    }

    /// Build every registered specification (single-threaded warm-up),
    /// in registration order.
    pub fn load_all(&self) -> Result<Vec<Arc<ObjectSpecification>>, MetaModelError> {
        let names: Vec<LogicalTypeName> = self.registry.registered_names().to_vec();
        let mut specs = Vec::with_capacity(names.len());
        for name in &names {
            specs.push(self.load_specification(name)?);
        }
        Ok(specs)
    }

    /// Drop every cached specification; the next reference rebuilds.
    /// Used for full metamodel rebuilds, e.g. test teardown.
    pub fn invalidate_cache(&self) {
        self.cache.write().clear();
    }

    /// Number of cached specifications.
    pub fn cached_count(&self) -> usize {
        self.cache.read().len()
    }

    fn build(&self, name: &LogicalTypeName) -> Result<ObjectSpecification, MetaModelError> {
        let def = self
            .registry
            .lookup(name)
            .ok_or_else(|| MetaModelError::UnknownType(name.clone()))?;
        debug!(class = %name, "building specification");

        let (properties, collections, actions) = self.effective_members(def, &mut Vec::new())?;

        let mut class_holder = FacetHolder::new(Identifier::class_identifier(name.clone()));
        for factory in self.model.factories() {
            if !factory.applies_to(trestle_ident::FeatureType::Object) {
                continue;
            }
            let mut ctx = ProcessClassContext {
                def,
                holder: &mut class_holder,
            };
            factory.process_class(&mut ctx)?;
        }

        let mut property_specs = Vec::with_capacity(properties.len());
        for property in &properties {
            let holder = self.process_member(def, MemberDef::Property(property))?;
            property_specs.push(PropertySpec::new(&property.id, holder));
        }

        let mut collection_specs = Vec::with_capacity(collections.len());
        for collection in &collections {
            let holder = self.process_member(def, MemberDef::Collection(collection))?;
            collection_specs.push(CollectionSpec::new(&collection.id, holder));
        }

        let mut action_specs = Vec::with_capacity(actions.len());
        for action in &actions {
            let holder = self.process_member(def, MemberDef::Action(action))?;
            let params = self.process_params(name, action)?;
            action_specs.push(ActionSpec::new(&action.id, holder, params));
        }

        let mut spec = ObjectSpecification::new(
            name.clone(),
            def.bean_sort,
            class_holder,
            property_specs,
            collection_specs,
            action_specs,
        );

        for post_processor in self.model.post_processors() {
            post_processor.post_process(&mut spec)?;
        }

        Ok(spec)
    }

    fn process_member(
        &self,
        class_def: &ObjectDef,
        member: MemberDef<'_>,
    ) -> Result<FacetHolder, MetaModelError> {
        let name = class_def.logical_type_name.clone();
        let identifier = match member {
            MemberDef::Property(p) => Identifier::property_identifier(name, &p.id),
            MemberDef::Collection(c) => Identifier::collection_identifier(name, &c.id),
            MemberDef::Action(a) => {
                Identifier::action_identifier(name, &a.id, a.param_type_names())
            }
        };
        let feature_type = member.feature_type();
        let mut holder = FacetHolder::new(identifier);
        for factory in self.model.factories() {
            if !factory.applies_to(feature_type) {
                continue;
            }
            let mut ctx = ProcessMemberContext {
                class_def,
                member,
                holder: &mut holder,
            };
            factory.process_member(&mut ctx)?;
        }
        Ok(holder)
    }

    fn process_params(
        &self,
        name: &LogicalTypeName,
        action: &ActionDef,
    ) -> Result<Vec<ActionParameterSpec>, MetaModelError> {
        let action_identifier =
            Identifier::action_identifier(name.clone(), &action.id, action.param_type_names());
        let mut specs = Vec::with_capacity(action.params.len());
        for (index, param) in action.params.iter().enumerate() {
            let identifier = action_identifier
                .param_identifier(index)
                .expect("built from an action identifier");
            let mut holder = FacetHolder::new(identifier);
            for factory in self.model.factories() {
                if !factory.applies_to(trestle_ident::FeatureType::ActionParameter) {
                    continue;
                }
                let mut ctx = ProcessParamContext {
                    action,
                    param,
                    index,
                    holder: &mut holder,
                };
                factory.process_params(&mut ctx)?;
            }
            specs.push(ActionParameterSpec::new(&param.name, index, holder));
        }
        Ok(specs)
    }

    /// Merge member declarations down the superclass chain, then graft
    /// mixin members. A subclass declaration overrides a superclass
    /// declaration of the same id; a class's own members win over mixin
    /// members.
    fn effective_members(
        &self,
        def: &ObjectDef,
        visiting: &mut Vec<LogicalTypeName>,
    ) -> Result<(Vec<PropertyDef>, Vec<CollectionDef>, Vec<ActionDef>), MetaModelError> {
        if visiting.contains(&def.logical_type_name) {
            return Err(MetaModelError::CyclicInheritance(
                def.logical_type_name.clone(),
            ));
        }
        visiting.push(def.logical_type_name.clone());

        let (mut properties, mut collections, mut actions) = match &def.superclass {
            Some(super_name) => {
                let super_def = self
                    .registry
                    .lookup(super_name)
                    .ok_or_else(|| MetaModelError::UnknownType(super_name.clone()))?;
                self.effective_members(super_def, visiting)?
            }
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        for property in &def.properties {
            merge_by_id(&mut properties, property.clone(), |p| &p.id);
        }
        for collection in &def.collections {
            merge_by_id(&mut collections, collection.clone(), |c| &c.id);
        }
        for action in &def.actions {
            merge_by_id(&mut actions, action.clone(), |a| &a.id);
        }

        for mixin_name in &def.mixins {
            let mixin_def =
                self.registry
                    .lookup(mixin_name)
                    .ok_or_else(|| MetaModelError::UnknownMixin {
                        class: def.logical_type_name.clone(),
                        mixin: mixin_name.clone(),
                    })?;
            for property in &mixin_def.properties {
                graft_by_id(&mut properties, property.clone(), |p| &p.id);
            }
            for collection in &mixin_def.collections {
                graft_by_id(&mut collections, collection.clone(), |c| &c.id);
            }
            for action in &mixin_def.actions {
                graft_by_id(&mut actions, action.clone(), |a| &a.id);
            }
        }

        visiting.pop();
        Ok((properties, collections, actions))
    }
}

/// Replace the same-id entry in place, or append.
fn merge_by_id<T>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> &str) {
    match items.iter().position(|existing| id_of(existing) == id_of(&item)) {
        Some(index) => items[index] = item,
        None => items.push(item),
    }
}

/// Append only when no same-id entry exists.
fn graft_by_id<T>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> &str) {
    if !items.iter().any(|existing| id_of(existing) == id_of(&item)) {
        items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::{Facet, FacetKind};
    use trestle_applib::{BeanSort, PropertyDef};
    use trestle_layout::GridLoader;

    fn ltn(name: &str) -> LogicalTypeName {
        LogicalTypeName::parse(name).unwrap()
    }

    fn loader_with(defs: Vec<ObjectDef>) -> SpecificationLoader {
        let mut registry = DomainRegistry::new();
        for def in defs {
            registry.register(def).unwrap();
        }
        let grid_loader = Arc::new(GridLoader::new(std::env::temp_dir(), false));
        SpecificationLoader::new(registry, ProgrammingModel::default_model(grid_loader))
    }

    #[test]
    fn test_load_caches_by_name() {
        let loader = loader_with(vec![ObjectDef::new(ltn("t.Customer"), BeanSort::Entity)
            .with_property(PropertyDef::new("name", "Str"))]);
        let first = loader.load_specification(&ltn("t.Customer")).unwrap();
        let second = loader.load_specification(&ltn("t.Customer")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.cached_count(), 1);

        loader.invalidate_cache();
        assert_eq!(loader.cached_count(), 0);
        let rebuilt = loader.load_specification(&ltn("t.Customer")).unwrap();
        assert!(!Arc::ptr_eq(&first, &rebuilt));
    }

    #[test]
    fn test_unknown_type_is_hard_failure() {
        let loader = loader_with(vec![]);
        assert!(matches!(
            loader.load_specification(&ltn("t.Missing")),
            Err(MetaModelError::UnknownType(_))
        ));
    }

    #[test]
    fn test_superclass_members_merged_in() {
        let loader = loader_with(vec![
            ObjectDef::new(ltn("t.Base"), BeanSort::Abstract)
                .with_property(PropertyDef::new("id", "Str"))
                .with_property(PropertyDef::new("notes", "Str")),
            ObjectDef::new(ltn("t.Derived"), BeanSort::Entity)
                .extends(ltn("t.Base"))
                // overrides the inherited declaration of the same id
                .with_property(PropertyDef::new("notes", "Str").max_length(10))
                .with_property(PropertyDef::new("extra", "Str")),
        ]);
        let spec = loader.load_specification(&ltn("t.Derived")).unwrap();
        assert_eq!(spec.property_ids(), vec!["id", "notes", "extra"]);
        let notes = spec.property("notes").unwrap();
        assert!(matches!(
            notes.holder().get_facet(FacetKind::MaxLength),
            Some(Facet::MaxLength(10))
        ));
    }

    #[test]
    fn test_mixin_members_grafted() {
        let loader = loader_with(vec![
            ObjectDef::new(ltn("t.AuditMixin"), BeanSort::Mixin)
                .with_property(PropertyDef::new("updatedAt", "Str")),
            ObjectDef::new(ltn("t.Customer"), BeanSort::Entity)
                .with_mixin(ltn("t.AuditMixin"))
                .with_property(PropertyDef::new("name", "Str")),
        ]);
        let spec = loader.load_specification(&ltn("t.Customer")).unwrap();
        assert_eq!(spec.property_ids(), vec!["name", "updatedAt"]);
    }

    #[test]
    fn test_unknown_mixin_is_hard_failure() {
        let loader = loader_with(vec![ObjectDef::new(ltn("t.Customer"), BeanSort::Entity)
            .with_mixin(ltn("t.Missing"))]);
        assert!(matches!(
            loader.load_specification(&ltn("t.Customer")),
            Err(MetaModelError::UnknownMixin { .. })
        ));
    }

    #[test]
    fn test_inheritance_cycle_detected() {
        let loader = loader_with(vec![
            ObjectDef::new(ltn("t.A"), BeanSort::Entity).extends(ltn("t.B")),
            ObjectDef::new(ltn("t.B"), BeanSort::Entity).extends(ltn("t.A")),
        ]);
        assert!(matches!(
            loader.load_specification(&ltn("t.A")),
            Err(MetaModelError::CyclicInheritance(_))
        ));
    }

    #[test]
    fn test_default_model_attaches_baseline_facets() {
        let loader = loader_with(vec![ObjectDef::new(ltn("t.Customer"), BeanSort::Entity)
            .with_property(PropertyDef::new("firstName", "Str"))]);
        let spec = loader.load_specification(&ltn("t.Customer")).unwrap();

        assert!(spec.holder().contains_facet(FacetKind::ObjectNamed));
        assert!(spec.holder().contains_facet(FacetKind::Title));

        let prop = spec.property("firstName").unwrap();
        assert!(prop.holder().contains_facet(FacetKind::MemberNamed));
        assert!(prop.holder().contains_facet(FacetKind::Optionality));
    }
}
