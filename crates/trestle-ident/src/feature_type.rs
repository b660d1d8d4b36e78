//! Feature classification for metamodel elements

use serde::{Deserialize, Serialize};

/// The kind of metamodel feature an element represents.
///
/// Facet factories declare which feature types they apply to; the
/// specification loader uses this to route each factory to the right
/// elements during the introspection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    /// A domain class as a whole.
    Object,
    /// A single-valued member.
    Property,
    /// A multi-valued member.
    Collection,
    /// An invokable member.
    Action,
    /// One parameter of an action.
    ActionParameter,
}

impl FeatureType {
    /// Whether this is the class-level feature.
    pub fn is_object(&self) -> bool {
        matches!(self, FeatureType::Object)
    }

    /// Whether this is a member-level feature (property, collection or action).
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            FeatureType::Property | FeatureType::Collection | FeatureType::Action
        )
    }

    /// Whether this feature holds data (property or collection).
    pub fn is_property_or_collection(&self) -> bool {
        matches!(self, FeatureType::Property | FeatureType::Collection)
    }

    /// Whether this is an action.
    pub fn is_action(&self) -> bool {
        matches!(self, FeatureType::Action)
    }

    /// Whether this is an action parameter.
    pub fn is_action_parameter(&self) -> bool {
        matches!(self, FeatureType::ActionParameter)
    }

    /// Stable lowercase name, used in reports and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Object => "object",
            FeatureType::Property => "property",
            FeatureType::Collection => "collection",
            FeatureType::Action => "action",
            FeatureType::ActionParameter => "action_parameter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_classification() {
        assert!(FeatureType::Property.is_member());
        assert!(FeatureType::Collection.is_member());
        assert!(FeatureType::Action.is_member());
        assert!(!FeatureType::Object.is_member());
        assert!(!FeatureType::ActionParameter.is_member());
    }

    #[test]
    fn test_property_or_collection() {
        assert!(FeatureType::Property.is_property_or_collection());
        assert!(FeatureType::Collection.is_property_or_collection());
        assert!(!FeatureType::Action.is_property_or_collection());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(FeatureType::Object.as_str(), "object");
        assert_eq!(FeatureType::ActionParameter.as_str(), "action_parameter");
    }
}
