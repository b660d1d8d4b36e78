//! Domain registry
//!
//! The closed set of domain class descriptors the metamodel is built from.
//! Registration happens once at bootstrap; the specification loader then
//! reads descriptors by logical type name.

use rustc_hash::FxHashMap;
use thiserror::Error;
use trestle_ident::LogicalTypeName;

use crate::descriptor::ObjectDef;
use crate::value::DomainObject;

use std::sync::Arc;

/// Errors raised while assembling the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The same logical type name was registered twice.
    #[error("domain class '{0}' is already registered")]
    Duplicate(LogicalTypeName),

    /// A service instance was registered without a matching descriptor.
    #[error("service instance '{0}' has no registered descriptor")]
    UnknownService(LogicalTypeName),

    /// A service instance reported a malformed logical type name.
    #[error("service instance reports invalid logical type name '{0}'")]
    InvalidServiceName(String),
}

/// Registry of domain class descriptors and service instances.
#[derive(Default)]
pub struct DomainRegistry {
    defs: FxHashMap<LogicalTypeName, ObjectDef>,
    order: Vec<LogicalTypeName>,
    services: Vec<(LogicalTypeName, Arc<dyn DomainObject>)>,
}

impl DomainRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class descriptor. Each logical type name may be
    /// registered at most once.
    pub fn register(&mut self, def: ObjectDef) -> Result<(), RegistryError> {
        let name = def.logical_type_name.clone();
        if self.defs.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.order.push(name.clone());
        self.defs.insert(name, def);
        Ok(())
    }

    /// Register a singleton service instance. Its descriptor must already
    /// be registered.
    pub fn register_service(
        &mut self,
        instance: Arc<dyn DomainObject>,
    ) -> Result<(), RegistryError> {
        let name = LogicalTypeName::parse(instance.logical_type_name()).map_err(|_| {
            RegistryError::InvalidServiceName(instance.logical_type_name().to_string())
        })?;
        if !self.defs.contains_key(&name) {
            return Err(RegistryError::UnknownService(name));
        }
        self.services.push((name, instance));
        Ok(())
    }

    /// Look up a descriptor by logical type name.
    pub fn lookup(&self, name: &LogicalTypeName) -> Option<&ObjectDef> {
        self.defs.get(name)
    }

    /// Whether a descriptor is registered under this name.
    pub fn contains(&self, name: &LogicalTypeName) -> bool {
        self.defs.contains_key(name)
    }

    /// All registered logical type names, in registration order.
    pub fn registered_names(&self) -> &[LogicalTypeName] {
        &self.order
    }

    /// All registered service instances with their logical type names.
    pub fn services(&self) -> &[(LogicalTypeName, Arc<dyn DomainObject>)] {
        &self.services
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether no descriptor has been registered.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::BeanSort;
    use std::any::Any;

    fn ltn(name: &str) -> LogicalTypeName {
        LogicalTypeName::parse(name).unwrap()
    }

    struct ClockService;

    impl DomainObject for ClockService {
        fn logical_type_name(&self) -> &str {
            "services.ClockService"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = DomainRegistry::new();
        registry
            .register(ObjectDef::new(ltn("customers.Customer"), BeanSort::Entity))
            .unwrap();

        assert!(registry.contains(&ltn("customers.Customer")));
        assert!(registry.lookup(&ltn("customers.Customer")).is_some());
        assert!(registry.lookup(&ltn("customers.Missing")).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = DomainRegistry::new();
        registry
            .register(ObjectDef::new(ltn("t.T"), BeanSort::Entity))
            .unwrap();
        let err = registry
            .register(ObjectDef::new(ltn("t.T"), BeanSort::ViewModel))
            .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate(ltn("t.T")));
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = DomainRegistry::new();
        registry
            .register(ObjectDef::new(ltn("b.Second"), BeanSort::Entity))
            .unwrap();
        registry
            .register(ObjectDef::new(ltn("a.First"), BeanSort::Entity))
            .unwrap();
        assert_eq!(
            registry.registered_names(),
            &[ltn("b.Second"), ltn("a.First")]
        );
    }

    #[test]
    fn test_service_requires_descriptor() {
        let mut registry = DomainRegistry::new();
        let err = registry
            .register_service(Arc::new(ClockService))
            .unwrap_err();
        assert_eq!(err, RegistryError::UnknownService(ltn("services.ClockService")));

        registry
            .register(ObjectDef::new(ltn("services.ClockService"), BeanSort::Service))
            .unwrap();
        registry.register_service(Arc::new(ClockService)).unwrap();
        assert_eq!(registry.services().len(), 1);
    }
}
