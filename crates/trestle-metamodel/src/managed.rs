//! Managed objects
//!
//! A [`ManagedObject`] pairs a runtime value (usually a live domain
//! object) with its specification, so consumers interact with the pojo
//! through facet-driven behavior only. Queries degrade to `None`/empty
//! when a facet is absent; only the callbacks themselves can fail.

use std::sync::Arc;

use trestle_applib::{CallbackError, CallbackResult, DomainObject, Value};

use crate::facets::{Facet, FacetKind};
use crate::spec::ObjectSpecification;

/// A runtime pojo/value paired with its specification.
#[derive(Clone)]
pub struct ManagedObject {
    spec: Arc<ObjectSpecification>,
    value: Value,
}

impl ManagedObject {
    /// Manage a live domain object.
    pub fn of_object(spec: Arc<ObjectSpecification>, obj: Arc<dyn DomainObject>) -> Self {
        Self {
            spec,
            value: Value::Object(obj),
        }
    }

    /// Manage a plain value.
    pub fn of_value(spec: Arc<ObjectSpecification>, value: Value) -> Self {
        Self { spec, value }
    }

    /// Manage "no instance" of the class (e.g. an empty parameter slot).
    pub fn empty(spec: Arc<ObjectSpecification>) -> Self {
        Self {
            spec,
            value: Value::Null,
        }
    }

    /// The specification.
    pub fn spec(&self) -> &Arc<ObjectSpecification> {
        &self.spec
    }

    /// The underlying value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The underlying domain object, when one is managed.
    pub fn domain_object(&self) -> Option<&Arc<dyn DomainObject>> {
        self.value.as_object()
    }

    /// Render the title through the title facet.
    ///
    /// Scalar values render their literal form; objects go through the
    /// declared provider; everything else falls back to the facet's
    /// fallback literal, then to the class's simple name.
    pub fn title(&self) -> CallbackResult<String> {
        if let Some(literal) = self.value.literal_form() {
            return Ok(literal);
        }
        match self.spec.get_facet(FacetKind::Title) {
            Some(Facet::Title(title)) => match self.value.as_object() {
                Some(obj) => title.title_of(obj.as_ref()),
                None => Ok(title.fallback().to_string()),
            },
            _ => Ok(self.spec.logical_type_name().simple_name().to_string()),
        }
    }

    /// Read a property through its accessor facet.
    ///
    /// `Ok(None)` when the member, its accessor, or the underlying
    /// object is absent; `Err` only when the accessor itself fails.
    pub fn get_property(&self, id: &str) -> CallbackResult<Option<Value>> {
        let Some(property) = self.spec.property(id) else {
            return Ok(None);
        };
        let Some(Facet::PropertyAccessor(getter)) =
            property.holder().get_facet(FacetKind::PropertyAccessor)
        else {
            return Ok(None);
        };
        let Some(obj) = self.value.as_object() else {
            return Ok(None);
        };
        getter(obj.as_ref()).map(Some)
    }

    /// Stream a collection's elements through its accessor facet.
    /// Absent member/accessor/object yields an empty stream.
    pub fn stream_collection(&self, id: &str) -> CallbackResult<Vec<Value>> {
        let Some(collection) = self.spec.collection(id) else {
            return Ok(Vec::new());
        };
        let Some(Facet::CollectionAccessor(getter)) =
            collection.holder().get_facet(FacetKind::CollectionAccessor)
        else {
            return Ok(Vec::new());
        };
        let Some(obj) = self.value.as_object() else {
            return Ok(Vec::new());
        };
        let elements = getter(obj.as_ref())?;
        Ok(match elements {
            Value::List(items) => items,
            Value::Null => Vec::new(),
            single => vec![single],
        })
    }

    /// Number of elements in a collection.
    pub fn collection_size(&self, id: &str) -> CallbackResult<usize> {
        Ok(self.stream_collection(id)?.len())
    }

    /// Materialize `elements` into the collection's fitted container
    /// shape. `None` when the member carries no collection semantics;
    /// the caller degrades to a generic list.
    pub fn populate_collection(&self, id: &str, elements: Vec<Value>) -> Option<Value> {
        let collection = self.spec.collection(id)?;
        match collection.holder().get_facet(FacetKind::CollectionSemantics) {
            Some(Facet::CollectionSemantics(semantics)) => Some(semantics.populate(elements)),
            _ => None,
        }
    }

    /// Invoke an action through its invocation facet, honoring the
    /// usability veto and the argument validator first.
    ///
    /// `Ok(None)` when the action or its implementation is absent.
    pub fn invoke_action(&self, id: &str, args: &[Value]) -> CallbackResult<Option<Value>> {
        let Some(action) = self.spec.action(id) else {
            return Ok(None);
        };
        let Some(Facet::ActionInvocation(invoke)) =
            action.holder().get_facet(FacetKind::ActionInvocation)
        else {
            return Ok(None);
        };
        let Some(obj) = self.value.as_object() else {
            return Ok(None);
        };

        if let Some(Facet::DisableWhen(disable)) =
            action.holder().get_facet(FacetKind::DisableWhen)
        {
            if let Some(reason) = disable(obj.as_ref()) {
                return Err(CallbackError::Domain(reason));
            }
        }
        if let Some(Facet::ValidateArgs(validate)) =
            action.holder().get_facet(FacetKind::ValidateArgs)
        {
            if let Some(reason) = validate(obj.as_ref(), args) {
                return Err(CallbackError::Domain(reason));
            }
        }

        invoke(obj.as_ref(), args).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SpecificationLoader;
    use crate::progmodel::ProgrammingModel;
    use std::any::Any;
    use trestle_applib::{
        callback, ActionDef, BeanSort, CollectionDef, DomainRegistry, ObjectDef, PropertyDef,
    };
    use trestle_ident::LogicalTypeName;
    use trestle_layout::GridLoader;

    struct Customer {
        name: String,
        orders: Vec<i64>,
        suspended: bool,
    }

    impl DomainObject for Customer {
        fn logical_type_name(&self) -> &str {
            "t.Customer"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn customer_spec() -> Arc<ObjectSpecification> {
        let def = ObjectDef::new(
            LogicalTypeName::parse("t.Customer").unwrap(),
            BeanSort::Entity,
        )
        .title_with(callback::title(|c: &Customer| Ok(c.name.clone())))
        .with_property(
            PropertyDef::new("name", "Str")
                .getter(callback::getter(|c: &Customer| Value::Str(c.name.clone()))),
        )
        .with_collection(
            CollectionDef::new("orders", "Int")
                .container_type("BTreeSet")
                .getter(callback::getter(|c: &Customer| {
                    Value::List(c.orders.iter().map(|&i| Value::Int(i)).collect())
                })),
        )
        .with_action(
            ActionDef::new("rename", "Str")
                .disable_when(callback::disable(|c: &Customer| {
                    c.suspended.then(|| "customer is suspended".to_string())
                }))
                .invoke_with(callback::invoke(|c: &Customer, args: &[Value]| {
                    Ok(Value::Str(format!(
                        "{} -> {}",
                        c.name,
                        args.first().and_then(Value::as_str).unwrap_or_default()
                    )))
                })),
        );

        let mut registry = DomainRegistry::new();
        registry.register(def).unwrap();
        let loader = SpecificationLoader::new(
            registry,
            ProgrammingModel::default_model(Arc::new(GridLoader::new(std::env::temp_dir(), false))),
        );
        loader
            .load_specification(&LogicalTypeName::parse("t.Customer").unwrap())
            .unwrap()
    }

    fn ada() -> Arc<dyn DomainObject> {
        Arc::new(Customer {
            name: "Ada".to_string(),
            orders: vec![3, 1, 2, 1],
            suspended: false,
        })
    }

    #[test]
    fn test_title_through_provider() {
        let managed = ManagedObject::of_object(customer_spec(), ada());
        assert_eq!(managed.title().unwrap(), "Ada");
    }

    #[test]
    fn test_title_fallback_without_instance() {
        let managed = ManagedObject::empty(customer_spec());
        // provider cannot run on an empty slot; the noun fallback applies
        assert_eq!(managed.title().unwrap(), "Customer");
    }

    #[test]
    fn test_scalar_value_renders_literal() {
        let managed = ManagedObject::of_value(customer_spec(), Value::Int(42));
        assert_eq!(managed.title().unwrap(), "42");
    }

    #[test]
    fn test_get_property() {
        let managed = ManagedObject::of_object(customer_spec(), ada());
        assert_eq!(
            managed.get_property("name").unwrap(),
            Some(Value::Str("Ada".to_string()))
        );
        assert_eq!(managed.get_property("noSuch").unwrap(), None);
    }

    #[test]
    fn test_stream_and_size() {
        let managed = ManagedObject::of_object(customer_spec(), ada());
        assert_eq!(managed.collection_size("orders").unwrap(), 4);
        assert!(managed.stream_collection("noSuch").unwrap().is_empty());
    }

    #[test]
    fn test_populate_through_collection_semantics() {
        let managed = ManagedObject::of_object(customer_spec(), ada());
        let elements = managed.stream_collection("orders").unwrap();
        // declared container is a sorted set
        let populated = managed.populate_collection("orders", elements).unwrap();
        assert_eq!(
            populated,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(managed.populate_collection("noSuch", Vec::new()), None);
    }

    #[test]
    fn test_invoke_action() {
        let managed = ManagedObject::of_object(customer_spec(), ada());
        let result = managed
            .invoke_action("rename", &[Value::Str("Grace".to_string())])
            .unwrap();
        assert_eq!(result, Some(Value::Str("Ada -> Grace".to_string())));
        assert_eq!(managed.invoke_action("noSuch", &[]).unwrap(), None);
    }

    #[test]
    fn test_disabled_action_is_vetoed() {
        let suspended: Arc<dyn DomainObject> = Arc::new(Customer {
            name: "Ada".to_string(),
            orders: vec![],
            suspended: true,
        });
        let managed = ManagedObject::of_object(customer_spec(), suspended);
        let err = managed.invoke_action("rename", &[]).unwrap_err();
        assert!(matches!(err, CallbackError::Domain(reason) if reason.contains("suspended")));
    }
}
