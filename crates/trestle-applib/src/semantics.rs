//! Declarative semantics enums
//!
//! Small closed enums that classify domain classes and members. They are
//! recorded on descriptors at declaration time and turned into facets by
//! the metamodel's factory pass.

use serde::{Deserialize, Serialize};

/// Broad classification of a domain class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeanSort {
    /// Persisted domain entity.
    Entity,
    /// Non-persisted presentation object.
    ViewModel,
    /// Singleton domain service.
    Service,
    /// Immutable value type (possibly enum-like with a fixed value set).
    Value,
    /// Contributes members to another class.
    Mixin,
    /// Abstract base; never instantiated directly.
    Abstract,
}

impl BeanSort {
    /// Whether instances of this sort carry domain state.
    pub fn is_instantiable(&self) -> bool {
        matches!(
            self,
            BeanSort::Entity | BeanSort::ViewModel | BeanSort::Value
        )
    }

    /// Whether this sort is registered as a service instance.
    pub fn is_service(&self) -> bool {
        matches!(self, BeanSort::Service)
    }
}

/// Contexts in which a member can be hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Where {
    /// Not hidden anywhere.
    #[default]
    Nowhere,
    /// Hidden in every context.
    Everywhere,
    /// Hidden on standalone and parented tables.
    AllTables,
    /// Hidden on object forms only.
    ObjectForms,
    /// Hidden on parented tables only.
    ParentedTables,
    /// Hidden on standalone tables only.
    StandaloneTables,
}

impl Where {
    /// Whether a member hidden `self` is visible in context `context`.
    pub fn is_visible_in(&self, context: Where) -> bool {
        match self {
            Where::Nowhere => true,
            Where::Everywhere => false,
            _ => *self != context,
        }
    }
}

/// Whether a property or parameter accepts an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optionality {
    /// A value is required.
    #[default]
    Mandatory,
    /// An empty value is acceptable.
    Optional,
}

impl Optionality {
    /// Whether an empty value is acceptable.
    pub fn is_optional(&self) -> bool {
        matches!(self, Optionality::Optional)
    }
}

/// Whether a property can be edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Editing {
    /// Editable in place.
    Enabled,
    /// Read-only; changed only through actions.
    #[default]
    Disabled,
}

/// Declared semantics of an action, from safest to least safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticsOf {
    /// Query-only; no observable side effects.
    Safe,
    /// Query-only and cacheable within a request.
    SafeAndRequestCacheable,
    /// Repeated invocation has the same effect as one.
    Idempotent,
    /// Idempotent, but the UI should confirm first.
    IdempotentAreYouSure,
    /// Each invocation has its own effect.
    NonIdempotent,
    /// Non-idempotent, and the UI should confirm first.
    NonIdempotentAreYouSure,
}

impl SemanticsOf {
    /// Whether the action is read-only by nature (safe to bookmark,
    /// safe to re-run).
    pub fn is_safe_in_nature(&self) -> bool {
        matches!(self, SemanticsOf::Safe | SemanticsOf::SafeAndRequestCacheable)
    }

    /// Whether repeated invocation is harmless.
    pub fn is_idempotent_in_nature(&self) -> bool {
        self.is_safe_in_nature()
            || matches!(
                self,
                SemanticsOf::Idempotent | SemanticsOf::IdempotentAreYouSure
            )
    }

    /// Whether the UI should ask for confirmation before invoking.
    pub fn is_are_you_sure(&self) -> bool {
        matches!(
            self,
            SemanticsOf::IdempotentAreYouSure | SemanticsOf::NonIdempotentAreYouSure
        )
    }
}

/// How a class or action participates in UI bookmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkPolicy {
    /// Bookmarkable as a top-level entry.
    AsRoot,
    /// Bookmarkable underneath its parent's bookmark.
    AsChild,
    /// Explicitly never bookmarked.
    Never,
    /// No declaration was made.
    #[default]
    NotSpecified,
}

impl BookmarkPolicy {
    /// Whether this policy produces a bookmark at all.
    pub fn is_bookmarkable(&self) -> bool {
        matches!(self, BookmarkPolicy::AsRoot | BookmarkPolicy::AsChild)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_in_nature() {
        assert!(SemanticsOf::Safe.is_safe_in_nature());
        assert!(SemanticsOf::SafeAndRequestCacheable.is_safe_in_nature());
        assert!(!SemanticsOf::Idempotent.is_safe_in_nature());
        assert!(!SemanticsOf::NonIdempotent.is_safe_in_nature());
    }

    #[test]
    fn test_idempotent_in_nature_includes_safe() {
        assert!(SemanticsOf::Safe.is_idempotent_in_nature());
        assert!(SemanticsOf::IdempotentAreYouSure.is_idempotent_in_nature());
        assert!(!SemanticsOf::NonIdempotentAreYouSure.is_idempotent_in_nature());
    }

    #[test]
    fn test_bookmark_policy() {
        assert!(BookmarkPolicy::AsRoot.is_bookmarkable());
        assert!(BookmarkPolicy::AsChild.is_bookmarkable());
        assert!(!BookmarkPolicy::Never.is_bookmarkable());
        assert!(!BookmarkPolicy::NotSpecified.is_bookmarkable());
    }

    #[test]
    fn test_where_visibility() {
        assert!(Where::Nowhere.is_visible_in(Where::AllTables));
        assert!(!Where::Everywhere.is_visible_in(Where::ObjectForms));
        assert!(!Where::AllTables.is_visible_in(Where::AllTables));
        assert!(Where::AllTables.is_visible_in(Where::ObjectForms));
    }

    #[test]
    fn test_bean_sort_classification() {
        assert!(BeanSort::Entity.is_instantiable());
        assert!(BeanSort::Value.is_instantiable());
        assert!(!BeanSort::Service.is_instantiable());
        assert!(BeanSort::Service.is_service());
        assert!(!BeanSort::Mixin.is_instantiable());
    }
}
