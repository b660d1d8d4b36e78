//! Sample shop domain: customers placing orders, an audit mixin grafted
//! onto both entities, and a repository service.

use std::any::Any;
use std::sync::Arc;

use trestle_applib::{
    callback, ActionDef, BeanSort, BookmarkPolicy, CollectionDef, DomainObject, DomainRegistry,
    MemberOrder, ObjectDef, ParamDef, PropertyDef, RegistryError, SemanticsOf, Value,
};
use trestle_ident::LogicalTypeName;

/// A customer of the shop.
pub struct Customer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Order numbers placed by this customer.
    pub orders: Vec<String>,
    /// Suspended customers cannot place orders.
    pub suspended: bool,
}

impl DomainObject for Customer {
    fn logical_type_name(&self) -> &str {
        "shop.Customer"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One order line.
pub struct Order {
    /// Stable order number.
    pub number: String,
    /// Ordered product code.
    pub product_code: String,
    /// Ordered quantity.
    pub quantity: i64,
}

impl DomainObject for Order {
    fn logical_type_name(&self) -> &str {
        "shop.Order"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Repository service over customers.
pub struct CustomerRepository;

impl DomainObject for CustomerRepository {
    fn logical_type_name(&self) -> &str {
        "shop.CustomerRepository"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn ltn(name: &str) -> LogicalTypeName {
    LogicalTypeName::parse(name).expect("literal logical type name")
}

fn audit_mixin_def() -> ObjectDef {
    ObjectDef::new(ltn("shop.AuditMixin"), BeanSort::Mixin).with_property(
        PropertyDef::new("lastModified", "Str")
            .named("Last modified")
            .member_order(MemberOrder::new("metadata", "1")),
    )
}

fn customer_def() -> ObjectDef {
    ObjectDef::new(ltn("shop.Customer"), BeanSort::Entity)
        .named_singular("Customer")
        .named_plural("Customers")
        .described_as("Somebody who buys from the shop")
        .icon_name("user")
        .with_mixin(ltn("shop.AuditMixin"))
        .title_with(callback::title(|c: &Customer| {
            Ok(format!("{} {}", c.first_name, c.last_name))
        }))
        .with_property(
            PropertyDef::new("firstName", "Str")
                .editable()
                .max_length(50)
                .member_order(MemberOrder::new("identity", "1"))
                .getter(callback::getter(|c: &Customer| {
                    Value::Str(c.first_name.clone())
                })),
        )
        .with_property(
            PropertyDef::new("lastName", "Str")
                .editable()
                .max_length(50)
                .member_order(MemberOrder::new("identity", "2"))
                .getter(callback::getter(|c: &Customer| {
                    Value::Str(c.last_name.clone())
                })),
        )
        .with_collection(
            CollectionDef::new("orders", "shop.Order")
                .container_type("Vec")
                .getter(callback::getter(|c: &Customer| {
                    Value::List(c.orders.iter().cloned().map(Value::Str).collect())
                })),
        )
        .with_action(
            ActionDef::new("placeOrder", "shop.Order")
                .semantics(SemanticsOf::NonIdempotent)
                .described_as("Place a new order for a product")
                .with_param(ParamDef::new("productCode", "Str").max_length(20))
                .with_param(
                    ParamDef::new("quantity", "Int")
                        .optional()
                        .default_value(callback::default_value(|_: &Customer| Value::Int(1))),
                )
                .disable_when(callback::disable(|c: &Customer| {
                    c.suspended.then(|| "customer is suspended".to_string())
                }))
                .validate_args_with(callback::validate_args(|_: &Customer, args: &[Value]| {
                    match args.get(1).and_then(Value::as_int) {
                        Some(quantity) if quantity < 1 => {
                            Some("quantity must be at least 1".to_string())
                        }
                        _ => None,
                    }
                }))
                .invoke_with(callback::invoke(|c: &Customer, args: &[Value]| {
                    let code = args.first().and_then(Value::as_str).unwrap_or_default();
                    Ok(Value::Str(format!("order for {code} by {}", c.first_name)))
                })),
        )
}

fn order_def() -> ObjectDef {
    ObjectDef::new(ltn("shop.Order"), BeanSort::Entity)
        .named_singular("Order")
        .with_mixin(ltn("shop.AuditMixin"))
        .title_with(callback::title(|o: &Order| Ok(o.number.clone())))
        .with_property(PropertyDef::new("number", "Str").getter(callback::getter(
            |o: &Order| Value::Str(o.number.clone()),
        )))
        .with_property(PropertyDef::new("productCode", "Str").getter(callback::getter(
            |o: &Order| Value::Str(o.product_code.clone()),
        )))
        .with_property(
            PropertyDef::new("quantity", "Int")
                .getter(callback::getter(|o: &Order| Value::Int(o.quantity))),
        )
}

fn repository_def() -> ObjectDef {
    ObjectDef::new(ltn("shop.CustomerRepository"), BeanSort::Service)
        .named_singular("Customers")
        .title_with(callback::title(|_: &CustomerRepository| {
            Ok("Customers".to_string())
        }))
        .with_action(
            ActionDef::new("listAll", "shop.Customer")
                .semantics(SemanticsOf::Safe)
                .bookmark_policy(BookmarkPolicy::AsRoot)
                .invoke_with(callback::invoke(|_: &CustomerRepository, _: &[Value]| {
                    Ok(Value::List(Vec::new()))
                })),
        )
}

/// Build the registry of the sample domain, service instance included.
pub fn build_registry() -> Result<DomainRegistry, RegistryError> {
    let mut registry = DomainRegistry::new();
    registry.register(audit_mixin_def())?;
    registry.register(customer_def())?;
    registry.register(order_def())?;
    registry.register(repository_def())?;
    registry.register_service(Arc::new(CustomerRepository))?;
    Ok(registry)
}

/// A populated customer to poke at from the CLI.
pub fn sample_customer() -> Arc<dyn DomainObject> {
    Arc::new(Customer {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        orders: vec!["O-0001".to_string(), "O-0002".to_string()],
        suspended: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds() {
        let registry = build_registry().unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.services().len(), 1);
        assert!(registry.contains(&ltn("shop.Customer")));
    }
}
