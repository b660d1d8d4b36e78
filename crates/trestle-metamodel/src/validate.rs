//! Metamodel validation
//!
//! Validators sweep the fully-loaded specification set once, after every
//! class has been built, and accumulate soft failures instead of
//! throwing: one broken title or mistranslated message must not stop the
//! rest of the application from starting. The accumulated report is
//! surfaced to the operator at the end of the startup sequence.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use trestle_applib::{DomainObject, TranslationContext, TranslationService, Value};
use trestle_ident::{Identifier, LogicalTypeName};

use crate::config::MetaModelConfig;
use crate::facets::{Facet, FacetKind};
use crate::spec::ObjectSpecification;

/// One soft model defect.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ValidationFailure {
    /// The feature the defect was found on.
    pub identifier: Identifier,
    /// The class the defect originates from.
    pub origin: LogicalTypeName,
    /// Human-readable description.
    pub message: String,
}

impl ValidationFailure {
    /// Defect on `identifier`, originating from `origin`.
    pub fn new(identifier: Identifier, origin: LogicalTypeName, message: impl Into<String>) -> Self {
        Self {
            identifier,
            origin,
            message: message.into(),
        }
    }
}

/// Accumulating, deduplicating collection of soft defects, kept in
/// deterministic (identifier-sorted) order.
#[derive(Debug, Default, Serialize)]
pub struct ValidationFailures {
    failures: BTreeSet<ValidationFailure>,
}

impl ValidationFailures {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one defect. Duplicates collapse.
    pub fn add(&mut self, failure: ValidationFailure) {
        self.failures.insert(failure);
    }

    /// Whether any defect was recorded.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of distinct defects.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Defects in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.failures.iter()
    }

    /// Export the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.failures)
    }
}

/// The fixed, enumerable set of system message strings the framework
/// emits; every entry must survive the bound translation service.
#[derive(Debug, Clone)]
pub struct MessageRegistry {
    messages: Vec<String>,
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self {
            messages: [
                "Are you sure?",
                "Cancel",
                "Confirm",
                "Nothing to show",
                "No results",
                "OK",
                "Please wait...",
                "Required",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl MessageRegistry {
    /// The standard message set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an additional system message.
    pub fn add(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    /// All registered messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Everything a validator may inspect.
pub struct ValidationContext<'a> {
    /// Every loaded specification.
    pub specs: &'a [Arc<ObjectSpecification>],
    /// Registered service instances.
    pub services: &'a [(LogicalTypeName, Arc<dyn DomainObject>)],
    /// The bound translation service.
    pub translation: &'a dyn TranslationService,
    /// The system message registry.
    pub messages: &'a MessageRegistry,
    /// Active configuration.
    pub config: &'a MetaModelConfig,
}

impl<'a> ValidationContext<'a> {
    /// Look up a loaded specification by logical type name.
    pub fn spec_of(&self, name: &LogicalTypeName) -> Option<&Arc<ObjectSpecification>> {
        self.specs.iter().find(|s| s.logical_type_name() == name)
    }
}

/// One pass of the post-build consistency check.
pub trait MetaModelValidator: Send + Sync {
    /// Stable name, used in log output.
    fn name(&self) -> &'static str;

    /// Inspect the loaded metamodel, recording defects.
    fn validate(&self, ctx: &ValidationContext<'_>, failures: &mut ValidationFailures);
}

/// Renders the title of every registered service instance and of every
/// constant of every enum-like value type. A failing title provider is
/// recorded, never rethrown.
pub struct TitleValidator;

impl MetaModelValidator for TitleValidator {
    fn name(&self) -> &'static str {
        "Title"
    }

    fn validate(&self, ctx: &ValidationContext<'_>, failures: &mut ValidationFailures) {
        for (name, instance) in ctx.services {
            let Some(spec) = ctx.spec_of(name) else {
                continue;
            };
            if let Some(Facet::Title(title)) = spec.get_facet(FacetKind::Title) {
                if let Err(e) = title.title_of(instance.as_ref()) {
                    failures.add(ValidationFailure::new(
                        spec.identifier().clone(),
                        name.clone(),
                        format!("title rendering failed: {e}"),
                    ));
                }
            }
        }

        for spec in ctx.specs {
            let Some(Facet::ValueSemantics(value_set)) = spec.get_facet(FacetKind::ValueSemantics)
            else {
                continue;
            };
            let Some(Facet::Title(title)) = spec.get_facet(FacetKind::Title) else {
                continue;
            };
            for constant in value_set() {
                if let Value::Object(obj) = &constant {
                    if let Err(e) = title.title_of(obj.as_ref()) {
                        failures.add(ValidationFailure::new(
                            spec.identifier().clone(),
                            spec.logical_type_name().clone(),
                            format!("title rendering failed for a value constant: {e}"),
                        ));
                    }
                }
            }
        }
    }
}

/// Feeds every message-registry string through the bound translation
/// service and records any failure per message.
pub struct TranslationValidator;

impl MetaModelValidator for TranslationValidator {
    fn name(&self) -> &'static str {
        "Translation"
    }

    fn validate(&self, ctx: &ValidationContext<'_>, failures: &mut ValidationFailures) {
        let origin = LogicalTypeName::parse("trestle.MessageRegistry")
            .expect("literal logical type name");
        let identifier = Identifier::class_identifier(origin.clone());
        let translation_ctx = TranslationContext::named("trestle.messages");
        for message in ctx.messages.messages() {
            if let Err(e) = ctx.translation.translate(&translation_ctx, message) {
                failures.add(ValidationFailure::new(
                    identifier.clone(),
                    origin.clone(),
                    format!("message '{message}' failed to translate: {e}"),
                ));
            }
        }
    }
}

/// Flags any bookmarkable action whose semantics is not safe: a bookmark
/// re-invokes the action, so bookmarking a mutating action is a design
/// error.
pub struct BookmarkValidator;

impl MetaModelValidator for BookmarkValidator {
    fn name(&self) -> &'static str {
        "Bookmark"
    }

    fn validate(&self, ctx: &ValidationContext<'_>, failures: &mut ValidationFailures) {
        for spec in ctx.specs {
            for action in spec.actions() {
                let bookmarkable = matches!(
                    action.holder().get_facet(FacetKind::BookmarkPolicy),
                    Some(Facet::BookmarkPolicy(policy)) if policy.is_bookmarkable()
                );
                if !bookmarkable {
                    continue;
                }
                let safe = matches!(
                    action.holder().get_facet(FacetKind::ActionSemantics),
                    Some(Facet::ActionSemantics(semantics)) if semantics.is_safe_in_nature()
                );
                if !safe {
                    failures.add(ValidationFailure::new(
                        action.holder().identifier().clone(),
                        spec.logical_type_name().clone(),
                        "action is bookmarkable but not safe (read-only) in nature",
                    ));
                }
            }
        }
    }
}

/// Flags duplicate member ids within one class.
pub struct MemberIdClashValidator;

impl MetaModelValidator for MemberIdClashValidator {
    fn name(&self) -> &'static str {
        "MemberIdClash"
    }

    fn validate(&self, ctx: &ValidationContext<'_>, failures: &mut ValidationFailures) {
        for spec in ctx.specs {
            let ids = spec.member_ids();
            let mut seen: BTreeSet<&str> = BTreeSet::new();
            for id in ids {
                if !seen.insert(id) {
                    failures.add(ValidationFailure::new(
                        spec.identifier().clone(),
                        spec.logical_type_name().clone(),
                        format!("member id '{id}' is used by more than one member"),
                    ));
                }
            }
        }
    }
}

/// In strict mode, surfaces layout-grid defects (dangling or duplicated
/// slot ids) into the validation report.
pub struct GridConsistencyValidator;

impl MetaModelValidator for GridConsistencyValidator {
    fn name(&self) -> &'static str {
        "GridConsistency"
    }

    fn validate(&self, ctx: &ValidationContext<'_>, failures: &mut ValidationFailures) {
        if !ctx.config.is_strict() {
            return;
        }
        for spec in ctx.specs {
            let Some(Facet::GridPreference(grid)) = spec.get_facet(FacetKind::GridPreference)
            else {
                continue;
            };
            for issue in &grid.issues {
                failures.add(ValidationFailure::new(
                    spec.identifier().clone(),
                    spec.logical_type_name().clone(),
                    format!("layout grid issue: {issue:?}"),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(type_name: &str, message: &str) -> ValidationFailure {
        let origin = LogicalTypeName::parse(type_name).unwrap();
        ValidationFailure::new(Identifier::class_identifier(origin.clone()), origin, message)
    }

    #[test]
    fn test_failures_dedupe_and_sort() {
        let mut failures = ValidationFailures::new();
        failures.add(failure("b.T", "second"));
        failures.add(failure("a.T", "first"));
        failures.add(failure("b.T", "second"));
        assert_eq!(failures.len(), 2);
        let origins: Vec<&str> = failures.iter().map(|f| f.origin.as_str()).collect();
        assert_eq!(origins, vec!["a.T", "b.T"]);
    }

    #[test]
    fn test_failures_export_as_json() {
        let mut failures = ValidationFailures::new();
        failures.add(failure("a.T", "broken"));
        let json = failures.to_json().unwrap();
        assert!(json.contains("\"a.T\""));
        assert!(json.contains("broken"));
    }

    #[test]
    fn test_message_registry_defaults_and_add() {
        let mut registry = MessageRegistry::new();
        let before = registry.messages().len();
        assert!(before > 0);
        registry.add("Custom warning");
        assert_eq!(registry.messages().len(), before + 1);
    }
}
