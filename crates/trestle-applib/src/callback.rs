//! Supporting callbacks
//!
//! The original framework discovers supporting methods by naming
//! convention (`hideXxx`, `disableXxx`, `default0Xxx`, ...). Here the same
//! hooks are registered explicitly on descriptors as shared closures over
//! the dynamic object model. Typed constructors do the downcasting once so
//! domain code stays free of `dyn Any` plumbing.

use std::sync::Arc;

use thiserror::Error;

use crate::value::{downcast, DomainObject, Value};

/// Errors raised from inside a domain callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    /// The callback was handed an object of the wrong concrete type.
    #[error("callback expected an instance of '{expected}'")]
    WrongReceiver {
        /// Concrete type the callback was registered for.
        expected: &'static str,
    },

    /// The callback was handed the wrong number of arguments.
    #[error("callback expected {expected} argument(s), got {actual}")]
    ArityMismatch {
        /// Declared parameter count.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },

    /// The domain logic itself failed.
    #[error("{0}")]
    Domain(String),
}

/// Result of a fallible domain callback.
pub type CallbackResult<T> = Result<T, CallbackError>;

/// Reads a property value off a domain object.
pub type GetterFn = Arc<dyn Fn(&dyn DomainObject) -> CallbackResult<Value> + Send + Sync>;

/// Renders the title of a domain object.
pub type TitleFn = Arc<dyn Fn(&dyn DomainObject) -> CallbackResult<String> + Send + Sync>;

/// Decides whether a member is hidden for this instance.
pub type HideFn = Arc<dyn Fn(&dyn DomainObject) -> bool + Send + Sync>;

/// Vetoes member usage; `Some(reason)` disables with that reason.
pub type DisableFn = Arc<dyn Fn(&dyn DomainObject) -> Option<String> + Send + Sync>;

/// Supplies the default value for a property or parameter.
pub type DefaultFn = Arc<dyn Fn(&dyn DomainObject) -> Value + Send + Sync>;

/// Supplies candidate values for a property or parameter.
pub type ChoicesFn = Arc<dyn Fn(&dyn DomainObject) -> Vec<Value> + Send + Sync>;

/// Validates a proposed property value; `Some(reason)` rejects it.
pub type ValidateFn = Arc<dyn Fn(&dyn DomainObject, &Value) -> Option<String> + Send + Sync>;

/// Validates a full action argument list; `Some(reason)` rejects it.
pub type ValidateArgsFn = Arc<dyn Fn(&dyn DomainObject, &[Value]) -> Option<String> + Send + Sync>;

/// Invokes an action against a domain object.
pub type InvokeFn = Arc<dyn Fn(&dyn DomainObject, &[Value]) -> CallbackResult<Value> + Send + Sync>;

/// Enumerates the fixed value set of an enum-like value type.
pub type ValueSetFn = Arc<dyn Fn() -> Vec<Value> + Send + Sync>;

/// Build a [`GetterFn`] from a typed closure over the concrete object.
pub fn getter<T, F>(f: F) -> GetterFn
where
    T: 'static,
    F: Fn(&T) -> Value + Send + Sync + 'static,
{
    Arc::new(move |obj| {
        let typed = downcast::<T>(obj).ok_or(CallbackError::WrongReceiver {
            expected: std::any::type_name::<T>(),
        })?;
        Ok(f(typed))
    })
}

/// Build a [`TitleFn`] from a typed closure.
pub fn title<T, F>(f: F) -> TitleFn
where
    T: 'static,
    F: Fn(&T) -> CallbackResult<String> + Send + Sync + 'static,
{
    Arc::new(move |obj| {
        let typed = downcast::<T>(obj).ok_or(CallbackError::WrongReceiver {
            expected: std::any::type_name::<T>(),
        })?;
        f(typed)
    })
}

/// Build a [`HideFn`] from a typed closure.
pub fn hide<T, F>(f: F) -> HideFn
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Arc::new(move |obj| downcast::<T>(obj).map(&f).unwrap_or(false))
}

/// Build a [`DisableFn`] from a typed closure.
pub fn disable<T, F>(f: F) -> DisableFn
where
    T: 'static,
    F: Fn(&T) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(move |obj| downcast::<T>(obj).and_then(&f))
}

/// Build a [`ValidateFn`] from a typed closure.
pub fn validate<T, F>(f: F) -> ValidateFn
where
    T: 'static,
    F: Fn(&T, &Value) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(move |obj, proposed| downcast::<T>(obj).and_then(|typed| f(typed, proposed)))
}

/// Build an [`InvokeFn`] from a typed closure.
pub fn invoke<T, F>(f: F) -> InvokeFn
where
    T: 'static,
    F: Fn(&T, &[Value]) -> CallbackResult<Value> + Send + Sync + 'static,
{
    Arc::new(move |obj, args| {
        let typed = downcast::<T>(obj).ok_or(CallbackError::WrongReceiver {
            expected: std::any::type_name::<T>(),
        })?;
        f(typed, args)
    })
}

/// Build a [`DefaultFn`] from a typed closure. A wrong receiver yields
/// no default (`Value::Null`).
pub fn default_value<T, F>(f: F) -> DefaultFn
where
    T: 'static,
    F: Fn(&T) -> Value + Send + Sync + 'static,
{
    Arc::new(move |obj| downcast::<T>(obj).map(&f).unwrap_or(Value::Null))
}

/// Build a [`ChoicesFn`] from a typed closure. A wrong receiver yields
/// no candidates.
pub fn choices<T, F>(f: F) -> ChoicesFn
where
    T: 'static,
    F: Fn(&T) -> Vec<Value> + Send + Sync + 'static,
{
    Arc::new(move |obj| downcast::<T>(obj).map(&f).unwrap_or_default())
}

/// Build a [`ValidateArgsFn`] from a typed closure. A wrong receiver
/// vetoes nothing.
pub fn validate_args<T, F>(f: F) -> ValidateArgsFn
where
    T: 'static,
    F: Fn(&T, &[Value]) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(move |obj, args| downcast::<T>(obj).and_then(|typed| f(typed, args)))
}

/// Build a [`ValueSetFn`] from a plain closure.
pub fn value_set<F>(f: F) -> ValueSetFn
where
    F: Fn() -> Vec<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Customer {
        name: String,
        suspended: bool,
    }

    impl DomainObject for Customer {
        fn logical_type_name(&self) -> &str {
            "customers.Customer"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Unrelated;

    impl DomainObject for Unrelated {
        fn logical_type_name(&self) -> &str {
            "other.Unrelated"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_typed_getter_reads_value() {
        let get = getter(|c: &Customer| Value::Str(c.name.clone()));
        let customer = Customer {
            name: "Ada".to_string(),
            suspended: false,
        };
        assert_eq!(get(&customer).unwrap(), Value::Str("Ada".to_string()));
    }

    #[test]
    fn test_typed_getter_rejects_wrong_receiver() {
        let get = getter(|c: &Customer| Value::Str(c.name.clone()));
        let err = get(&Unrelated).unwrap_err();
        assert!(matches!(err, CallbackError::WrongReceiver { .. }));
    }

    #[test]
    fn test_hide_defaults_visible_on_wrong_receiver() {
        let hidden = hide(|c: &Customer| c.suspended);
        assert!(!hidden(&Unrelated));
        let customer = Customer {
            name: "Ada".to_string(),
            suspended: true,
        };
        assert!(hidden(&customer));
    }

    #[test]
    fn test_default_and_choices_degrade_on_wrong_receiver() {
        let default = default_value(|c: &Customer| Value::Str(c.name.clone()));
        let candidates = choices(|_: &Customer| vec![Value::Int(1), Value::Int(2)]);
        let customer = Customer {
            name: "Ada".to_string(),
            suspended: false,
        };
        assert_eq!(default(&customer), Value::Str("Ada".to_string()));
        assert_eq!(default(&Unrelated), Value::Null);
        assert_eq!(candidates(&customer).len(), 2);
        assert!(candidates(&Unrelated).is_empty());
    }

    #[test]
    fn test_validate_args_vetoes_only_the_right_receiver() {
        let check = validate_args(|_: &Customer, args: &[Value]| {
            (args.len() != 1).then(|| "expected one argument".to_string())
        });
        let customer = Customer {
            name: "Ada".to_string(),
            suspended: false,
        };
        assert_eq!(check(&customer, &[Value::Int(1)]), None);
        assert!(check(&customer, &[]).is_some());
        assert_eq!(check(&Unrelated, &[]), None);
    }

    #[test]
    fn test_value_set_enumerates_constants() {
        let constants = value_set(|| vec![Value::Str("ACTIVE".into()), Value::Str("CLOSED".into())]);
        assert_eq!(constants().len(), 2);
    }

    #[test]
    fn test_invoke_passes_arguments() {
        let action = invoke(|c: &Customer, args: &[Value]| {
            if args.len() != 1 {
                return Err(CallbackError::ArityMismatch {
                    expected: 1,
                    actual: args.len(),
                });
            }
            Ok(Value::Str(format!(
                "{}-{}",
                c.name,
                args[0].literal_form().unwrap_or_default()
            )))
        });
        let customer = Customer {
            name: "Ada".to_string(),
            suspended: false,
        };
        assert_eq!(
            action(&customer, &[Value::Int(7)]).unwrap(),
            Value::Str("Ada-7".to_string())
        );
        assert!(matches!(
            action(&customer, &[]),
            Err(CallbackError::ArityMismatch { .. })
        ));
    }
}
