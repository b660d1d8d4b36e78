//! Domain class descriptors
//!
//! One [`ObjectDef`] describes a domain class to the metamodel: its
//! identity, classification, declared UI literals, members and supporting
//! callbacks. Descriptors are assembled with consuming builders at
//! registration time and are immutable afterwards; the metamodel's factory
//! pass reads them and never writes back.

use trestle_ident::LogicalTypeName;

use crate::callback::{
    ChoicesFn, DefaultFn, DisableFn, GetterFn, HideFn, InvokeFn, TitleFn, ValidateArgsFn,
    ValidateFn, ValueSetFn,
};
use crate::semantics::{BeanSort, BookmarkPolicy, Editing, Optionality, SemanticsOf, Where};

/// Placement of a member within the class layout: which field set it
/// belongs to and where it sorts inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberOrder {
    /// Field-set id the member belongs to.
    pub field_set_id: String,
    /// Sort key within the field set ("1", "2.1", ...).
    pub sequence: String,
}

impl MemberOrder {
    /// Place a member in `field_set_id` at position `sequence`.
    pub fn new(field_set_id: &str, sequence: &str) -> Self {
        Self {
            field_set_id: field_set_id.to_string(),
            sequence: sequence.to_string(),
        }
    }
}

/// Declaration of a single-valued member.
#[derive(Clone)]
pub struct PropertyDef {
    /// Member id, unique within the class.
    pub id: String,
    /// Declared value type name (`"Str"`, `"Int"`, or a logical type name).
    pub value_type: String,
    /// Whether an empty value is acceptable.
    pub optionality: Optionality,
    /// Whether the property is editable in place.
    pub editing: Editing,
    /// Maximum accepted text length, when declared.
    pub max_length: Option<usize>,
    /// Contexts the property is hidden in.
    pub hidden: Where,
    /// Declared UI label; `None` infers one from the id.
    pub named: Option<String>,
    /// Declared description text.
    pub described_as: Option<String>,
    /// Layout placement, when declared.
    pub member_order: Option<MemberOrder>,
    /// Reads the current value.
    pub getter: Option<GetterFn>,
    /// Per-instance visibility veto.
    pub hide: Option<HideFn>,
    /// Per-instance usability veto.
    pub disable: Option<DisableFn>,
    /// Default value provider.
    pub default: Option<DefaultFn>,
    /// Candidate value provider.
    pub choices: Option<ChoicesFn>,
    /// Proposed-value validator.
    pub validate: Option<ValidateFn>,
}

impl PropertyDef {
    /// Declare a property `id` of `value_type`.
    pub fn new(id: &str, value_type: &str) -> Self {
        Self {
            id: id.to_string(),
            value_type: value_type.to_string(),
            optionality: Optionality::default(),
            editing: Editing::default(),
            max_length: None,
            hidden: Where::default(),
            named: None,
            described_as: None,
            member_order: None,
            getter: None,
            hide: None,
            disable: None,
            default: None,
            choices: None,
            validate: None,
        }
    }

    /// Accept empty values.
    pub fn optional(mut self) -> Self {
        self.optionality = Optionality::Optional;
        self
    }

    /// Allow in-place editing.
    pub fn editable(mut self) -> Self {
        self.editing = Editing::Enabled;
        self
    }

    /// Cap accepted text length.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Hide in the given contexts.
    pub fn hidden(mut self, r#where: Where) -> Self {
        self.hidden = r#where;
        self
    }

    /// Declare the UI label.
    pub fn named(mut self, name: &str) -> Self {
        self.named = Some(name.to_string());
        self
    }

    /// Declare the description text.
    pub fn described_as(mut self, text: &str) -> Self {
        self.described_as = Some(text.to_string());
        self
    }

    /// Declare layout placement.
    pub fn member_order(mut self, order: MemberOrder) -> Self {
        self.member_order = Some(order);
        self
    }

    /// Register the value accessor.
    pub fn getter(mut self, f: GetterFn) -> Self {
        self.getter = Some(f);
        self
    }

    /// Register a per-instance visibility veto.
    pub fn hide_when(mut self, f: HideFn) -> Self {
        self.hide = Some(f);
        self
    }

    /// Register a per-instance usability veto.
    pub fn disable_when(mut self, f: DisableFn) -> Self {
        self.disable = Some(f);
        self
    }

    /// Register a default value provider.
    pub fn default_value(mut self, f: DefaultFn) -> Self {
        self.default = Some(f);
        self
    }

    /// Register a candidate value provider.
    pub fn choices(mut self, f: ChoicesFn) -> Self {
        self.choices = Some(f);
        self
    }

    /// Register a proposed-value validator.
    pub fn validate_with(mut self, f: ValidateFn) -> Self {
        self.validate = Some(f);
        self
    }
}

/// Declaration of a multi-valued member.
#[derive(Clone)]
pub struct CollectionDef {
    /// Member id, unique within the class.
    pub id: String,
    /// Declared element type name.
    pub element_type: String,
    /// Declared container type name (`"Vec"`, `"BTreeSet"`, ...); drives
    /// collection-semantics fitting.
    pub container_type: Option<String>,
    /// Contexts the collection is hidden in.
    pub hidden: Where,
    /// Declared UI label.
    pub named: Option<String>,
    /// Declared description text.
    pub described_as: Option<String>,
    /// Layout placement, when declared.
    pub member_order: Option<MemberOrder>,
    /// Reads the current elements (as a list value).
    pub getter: Option<GetterFn>,
    /// Per-instance visibility veto.
    pub hide: Option<HideFn>,
    /// Per-instance usability veto.
    pub disable: Option<DisableFn>,
}

impl CollectionDef {
    /// Declare a collection `id` with elements of `element_type`.
    pub fn new(id: &str, element_type: &str) -> Self {
        Self {
            id: id.to_string(),
            element_type: element_type.to_string(),
            container_type: None,
            hidden: Where::default(),
            named: None,
            described_as: None,
            member_order: None,
            getter: None,
            hide: None,
            disable: None,
        }
    }

    /// Declare the concrete container type name.
    pub fn container_type(mut self, name: &str) -> Self {
        self.container_type = Some(name.to_string());
        self
    }

    /// Hide in the given contexts.
    pub fn hidden(mut self, r#where: Where) -> Self {
        self.hidden = r#where;
        self
    }

    /// Declare the UI label.
    pub fn named(mut self, name: &str) -> Self {
        self.named = Some(name.to_string());
        self
    }

    /// Declare the description text.
    pub fn described_as(mut self, text: &str) -> Self {
        self.described_as = Some(text.to_string());
        self
    }

    /// Declare layout placement.
    pub fn member_order(mut self, order: MemberOrder) -> Self {
        self.member_order = Some(order);
        self
    }

    /// Register the element accessor.
    pub fn getter(mut self, f: GetterFn) -> Self {
        self.getter = Some(f);
        self
    }

    /// Register a per-instance visibility veto.
    pub fn hide_when(mut self, f: HideFn) -> Self {
        self.hide = Some(f);
        self
    }

    /// Register a per-instance usability veto.
    pub fn disable_when(mut self, f: DisableFn) -> Self {
        self.disable = Some(f);
        self
    }
}

/// Declaration of one action parameter.
#[derive(Clone)]
pub struct ParamDef {
    /// Parameter name.
    pub name: String,
    /// Declared parameter type name.
    pub param_type: String,
    /// Whether an empty argument is acceptable.
    pub optionality: Optionality,
    /// Maximum accepted text length, when declared.
    pub max_length: Option<usize>,
    /// Declared UI label.
    pub named: Option<String>,
    /// Declared description text.
    pub described_as: Option<String>,
    /// Default argument provider.
    pub default: Option<DefaultFn>,
    /// Candidate argument provider.
    pub choices: Option<ChoicesFn>,
}

impl ParamDef {
    /// Declare a parameter `name` of `param_type`.
    pub fn new(name: &str, param_type: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type: param_type.to_string(),
            optionality: Optionality::default(),
            max_length: None,
            named: None,
            described_as: None,
            default: None,
            choices: None,
        }
    }

    /// Accept empty arguments.
    pub fn optional(mut self) -> Self {
        self.optionality = Optionality::Optional;
        self
    }

    /// Cap accepted text length.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Declare the UI label.
    pub fn named(mut self, name: &str) -> Self {
        self.named = Some(name.to_string());
        self
    }

    /// Declare the description text.
    pub fn described_as(mut self, text: &str) -> Self {
        self.described_as = Some(text.to_string());
        self
    }

    /// Register a default argument provider.
    pub fn default_value(mut self, f: DefaultFn) -> Self {
        self.default = Some(f);
        self
    }

    /// Register a candidate argument provider.
    pub fn choices(mut self, f: ChoicesFn) -> Self {
        self.choices = Some(f);
        self
    }
}

/// Declaration of an invokable member.
#[derive(Clone)]
pub struct ActionDef {
    /// Member id, unique within the class.
    pub id: String,
    /// Declared return type name.
    pub return_type: String,
    /// Declared action semantics; `None` falls back to non-idempotent.
    pub semantics: Option<SemanticsOf>,
    /// Declared bookmark policy.
    pub bookmark_policy: BookmarkPolicy,
    /// Contexts the action is hidden in.
    pub hidden: Where,
    /// Declared UI label.
    pub named: Option<String>,
    /// Declared description text.
    pub described_as: Option<String>,
    /// Layout placement, when declared.
    pub member_order: Option<MemberOrder>,
    /// Declared parameters, in signature order.
    pub params: Vec<ParamDef>,
    /// The implementation.
    pub invoke: Option<InvokeFn>,
    /// Per-instance visibility veto.
    pub hide: Option<HideFn>,
    /// Per-instance usability veto.
    pub disable: Option<DisableFn>,
    /// Whole-argument-list validator.
    pub validate_args: Option<ValidateArgsFn>,
}

impl ActionDef {
    /// Declare an action `id` returning `return_type`.
    pub fn new(id: &str, return_type: &str) -> Self {
        Self {
            id: id.to_string(),
            return_type: return_type.to_string(),
            semantics: None,
            bookmark_policy: BookmarkPolicy::default(),
            hidden: Where::default(),
            named: None,
            described_as: None,
            member_order: None,
            params: Vec::new(),
            invoke: None,
            hide: None,
            disable: None,
            validate_args: None,
        }
    }

    /// Declare the action semantics.
    pub fn semantics(mut self, semantics: SemanticsOf) -> Self {
        self.semantics = Some(semantics);
        self
    }

    /// Declare the bookmark policy.
    pub fn bookmark_policy(mut self, policy: BookmarkPolicy) -> Self {
        self.bookmark_policy = policy;
        self
    }

    /// Hide in the given contexts.
    pub fn hidden(mut self, r#where: Where) -> Self {
        self.hidden = r#where;
        self
    }

    /// Declare the UI label.
    pub fn named(mut self, name: &str) -> Self {
        self.named = Some(name.to_string());
        self
    }

    /// Declare the description text.
    pub fn described_as(mut self, text: &str) -> Self {
        self.described_as = Some(text.to_string());
        self
    }

    /// Declare layout placement.
    pub fn member_order(mut self, order: MemberOrder) -> Self {
        self.member_order = Some(order);
        self
    }

    /// Append a parameter declaration.
    pub fn with_param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    /// Register the implementation.
    pub fn invoke_with(mut self, f: InvokeFn) -> Self {
        self.invoke = Some(f);
        self
    }

    /// Register a per-instance visibility veto.
    pub fn hide_when(mut self, f: HideFn) -> Self {
        self.hide = Some(f);
        self
    }

    /// Register a per-instance usability veto.
    pub fn disable_when(mut self, f: DisableFn) -> Self {
        self.disable = Some(f);
        self
    }

    /// Register a whole-argument-list validator.
    pub fn validate_args_with(mut self, f: ValidateArgsFn) -> Self {
        self.validate_args = Some(f);
        self
    }

    /// Declared parameter type names, in signature order.
    pub fn param_type_names(&self) -> Vec<String> {
        self.params.iter().map(|p| p.param_type.clone()).collect()
    }
}

/// Declaration of one domain class.
#[derive(Clone)]
pub struct ObjectDef {
    /// Stable logical identity of the class.
    pub logical_type_name: LogicalTypeName,
    /// Broad classification.
    pub bean_sort: BeanSort,
    /// Logical name of the superclass, when the class extends one.
    pub superclass: Option<LogicalTypeName>,
    /// Logical names of mixin classes grafting members onto this one.
    pub mixins: Vec<LogicalTypeName>,
    /// Declared singular UI noun; `None` infers one from the simple name.
    pub named_singular: Option<String>,
    /// Declared plural UI noun.
    pub named_plural: Option<String>,
    /// Declared description text.
    pub described_as: Option<String>,
    /// Icon name hint for the UI layers.
    pub icon_name: Option<String>,
    /// CSS class hint for the UI layers.
    pub css_class: Option<String>,
    /// Bookmark policy of the class itself.
    pub bookmark_policy: BookmarkPolicy,
    /// Title provider; `None` falls back to the singular noun.
    pub title: Option<TitleFn>,
    /// Fixed value set, for enum-like value types.
    pub value_set: Option<ValueSetFn>,
    /// Declared properties.
    pub properties: Vec<PropertyDef>,
    /// Declared collections.
    pub collections: Vec<CollectionDef>,
    /// Declared actions.
    pub actions: Vec<ActionDef>,
}

impl ObjectDef {
    /// Declare a class `logical_type_name` of the given sort.
    pub fn new(logical_type_name: LogicalTypeName, bean_sort: BeanSort) -> Self {
        Self {
            logical_type_name,
            bean_sort,
            superclass: None,
            mixins: Vec::new(),
            named_singular: None,
            named_plural: None,
            described_as: None,
            icon_name: None,
            css_class: None,
            bookmark_policy: BookmarkPolicy::default(),
            title: None,
            value_set: None,
            properties: Vec::new(),
            collections: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Declare the superclass.
    pub fn extends(mut self, superclass: LogicalTypeName) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Graft a mixin's members onto this class.
    pub fn with_mixin(mut self, mixin: LogicalTypeName) -> Self {
        self.mixins.push(mixin);
        self
    }

    /// Declare the singular UI noun.
    pub fn named_singular(mut self, noun: &str) -> Self {
        self.named_singular = Some(noun.to_string());
        self
    }

    /// Declare the plural UI noun.
    pub fn named_plural(mut self, noun: &str) -> Self {
        self.named_plural = Some(noun.to_string());
        self
    }

    /// Declare the description text.
    pub fn described_as(mut self, text: &str) -> Self {
        self.described_as = Some(text.to_string());
        self
    }

    /// Declare the icon name hint.
    pub fn icon_name(mut self, name: &str) -> Self {
        self.icon_name = Some(name.to_string());
        self
    }

    /// Declare the CSS class hint.
    pub fn css_class(mut self, class: &str) -> Self {
        self.css_class = Some(class.to_string());
        self
    }

    /// Declare the class's bookmark policy.
    pub fn bookmark_policy(mut self, policy: BookmarkPolicy) -> Self {
        self.bookmark_policy = policy;
        self
    }

    /// Register the title provider.
    pub fn title_with(mut self, f: TitleFn) -> Self {
        self.title = Some(f);
        self
    }

    /// Register the fixed value set of an enum-like value type.
    pub fn value_set(mut self, f: ValueSetFn) -> Self {
        self.value_set = Some(f);
        self
    }

    /// Append a property declaration.
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Append a collection declaration.
    pub fn with_collection(mut self, collection: CollectionDef) -> Self {
        self.collections.push(collection);
        self
    }

    /// Append an action declaration.
    pub fn with_action(mut self, action: ActionDef) -> Self {
        self.actions.push(action);
        self
    }

    /// All declared member ids, in declaration order.
    pub fn member_ids(&self) -> Vec<&str> {
        self.properties
            .iter()
            .map(|p| p.id.as_str())
            .chain(self.collections.iter().map(|c| c.id.as_str()))
            .chain(self.actions.iter().map(|a| a.id.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ltn(name: &str) -> LogicalTypeName {
        LogicalTypeName::parse(name).unwrap()
    }

    #[test]
    fn test_object_def_builder() {
        let def = ObjectDef::new(ltn("customers.Customer"), BeanSort::Entity)
            .named_singular("Customer")
            .named_plural("Customers")
            .with_property(PropertyDef::new("firstName", "Str").optional().max_length(50))
            .with_collection(CollectionDef::new("orders", "orders.Order"))
            .with_action(
                ActionDef::new("placeOrder", "orders.Order")
                    .semantics(SemanticsOf::NonIdempotent)
                    .with_param(ParamDef::new("productCode", "Str")),
            );

        assert_eq!(def.logical_type_name.as_str(), "customers.Customer");
        assert_eq!(def.named_singular.as_deref(), Some("Customer"));
        assert_eq!(def.properties.len(), 1);
        assert_eq!(def.properties[0].max_length, Some(50));
        assert!(def.properties[0].optionality.is_optional());
        assert_eq!(def.actions[0].param_type_names(), vec!["Str".to_string()]);
    }

    #[test]
    fn test_member_ids_in_declaration_order() {
        let def = ObjectDef::new(ltn("t.T"), BeanSort::ViewModel)
            .with_property(PropertyDef::new("a", "Str"))
            .with_collection(CollectionDef::new("b", "t.X"))
            .with_action(ActionDef::new("c", "Str"));
        assert_eq!(def.member_ids(), vec!["a", "b", "c"]);
    }
}
