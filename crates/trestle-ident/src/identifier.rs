//! Identifiers for classes, members and parameters
//!
//! An [`Identifier`] pins down one feature of the metamodel: a class, one
//! of its members, or one parameter of an action. The rendered form is
//! stable (`ns.Type#member(ParamType,...)[index]`) and is what validation
//! failures and UI links carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::feature_type::FeatureType;
use crate::logical_type::LogicalTypeName;

/// Immutable identity of one metamodel feature.
///
/// Identifiers sort by logical type, then feature kind, member name,
/// parameter signature and parameter index — which makes validation
/// reports deterministic without further effort.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identifier {
    logical_type_name: LogicalTypeName,
    feature_type: FeatureType,
    member_name: Option<String>,
    member_parameter_types: Vec<String>,
    parameter_index: Option<usize>,
}

impl Identifier {
    /// Identifier of a domain class itself.
    pub fn class_identifier(logical_type_name: LogicalTypeName) -> Self {
        Self {
            logical_type_name,
            feature_type: FeatureType::Object,
            member_name: None,
            member_parameter_types: Vec::new(),
            parameter_index: None,
        }
    }

    /// Identifier of a property.
    pub fn property_identifier(logical_type_name: LogicalTypeName, member: &str) -> Self {
        Self {
            logical_type_name,
            feature_type: FeatureType::Property,
            member_name: Some(member.to_string()),
            member_parameter_types: Vec::new(),
            parameter_index: None,
        }
    }

    /// Identifier of a collection.
    pub fn collection_identifier(logical_type_name: LogicalTypeName, member: &str) -> Self {
        Self {
            logical_type_name,
            feature_type: FeatureType::Collection,
            member_name: Some(member.to_string()),
            member_parameter_types: Vec::new(),
            parameter_index: None,
        }
    }

    /// Identifier of an action, carrying the parameter type names so that
    /// the rendered form stays unambiguous.
    pub fn action_identifier(
        logical_type_name: LogicalTypeName,
        member: &str,
        parameter_types: Vec<String>,
    ) -> Self {
        Self {
            logical_type_name,
            feature_type: FeatureType::Action,
            member_name: Some(member.to_string()),
            member_parameter_types: parameter_types,
            parameter_index: None,
        }
    }

    /// Identifier of one parameter of this action.
    ///
    /// Returns `None` when called on anything other than an action
    /// identifier.
    pub fn param_identifier(&self, index: usize) -> Option<Self> {
        if self.feature_type != FeatureType::Action {
            return None;
        }
        Some(Self {
            logical_type_name: self.logical_type_name.clone(),
            feature_type: FeatureType::ActionParameter,
            member_name: self.member_name.clone(),
            member_parameter_types: self.member_parameter_types.clone(),
            parameter_index: Some(index),
        })
    }

    /// The owning class's logical type name.
    pub fn logical_type_name(&self) -> &LogicalTypeName {
        &self.logical_type_name
    }

    /// What kind of feature this identifies.
    pub fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    /// Member name, when a member or parameter is identified.
    pub fn member_name(&self) -> Option<&str> {
        self.member_name.as_deref()
    }

    /// Declared parameter type names of the identified action.
    pub fn member_parameter_types(&self) -> &[String] {
        &self.member_parameter_types
    }

    /// Parameter index, when a parameter is identified.
    pub fn parameter_index(&self) -> Option<usize> {
        self.parameter_index
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.logical_type_name)?;
        if let Some(member) = &self.member_name {
            write!(f, "#{}", member)?;
        }
        if self.feature_type == FeatureType::Action
            || self.feature_type == FeatureType::ActionParameter
        {
            write!(f, "({})", self.member_parameter_types.join(","))?;
        }
        if let Some(index) = self.parameter_index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}
