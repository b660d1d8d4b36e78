//! The facet model
//!
//! A facet is one attachable unit of behavior on a metamodel element:
//! how it is named, whether it is hidden, what its action semantics are,
//! and so on. Each behavior axis is a variant of the closed [`Facet`]
//! union, keyed by its [`FacetKind`] discriminant; a [`FacetHolder`]
//! carries at most one facet per kind, with precedence-checked
//! replacement.

pub mod autofit;
pub mod holder;
pub mod noun;

use std::sync::Arc;

use once_cell::sync::OnceCell;
use trestle_applib::{
    BookmarkPolicy, ChoicesFn, DefaultFn, DisableFn, GetterFn, HideFn, InvokeFn, MemberOrder,
    Optionality, SemanticsOf, TitleFn, TranslationContext, TranslationError, TranslationService,
    ValidateArgsFn, ValidateFn, ValueSetFn, Where,
};
use trestle_layout::NormalizedGrid;

pub use autofit::{collect, variant_for, CollectionVariant};
pub use holder::{FacetEntry, FacetHolder};
pub use noun::{NounForm, NounForms};

/// Rank of a facet attachment. A facet replaces an existing facet of the
/// same kind only when its precedence is greater than or equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Precedence {
    /// Last-resort value when nothing was declared or inferred.
    Fallback,
    /// Derived from naming or structure rather than declared.
    Inferred,
    /// Declared on the descriptor.
    #[default]
    Default,
    /// Explicit override of a declared value.
    High,
    /// Installed by event subscribers; always wins.
    Event,
}

/// Discriminant of the [`Facet`] union; one per behavior axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacetKind {
    /// Noun forms of a class.
    ObjectNamed,
    /// Label of a member or parameter.
    MemberNamed,
    /// Description text.
    Described,
    /// Title rendering.
    Title,
    /// Static visibility rule.
    Hidden,
    /// Per-instance visibility veto.
    HideWhen,
    /// Static usability rule.
    Disabled,
    /// Per-instance usability veto.
    DisableWhen,
    /// Whether empty values are acceptable.
    Optionality,
    /// Maximum accepted text length.
    MaxLength,
    /// Declared action semantics.
    ActionSemantics,
    /// Bookmarking policy.
    BookmarkPolicy,
    /// Collection container semantics.
    CollectionSemantics,
    /// Element type of a collection.
    TypeOfElement,
    /// Property value accessor.
    PropertyAccessor,
    /// Collection element accessor.
    CollectionAccessor,
    /// Action implementation.
    ActionInvocation,
    /// Placement within the class layout.
    MemberOrder,
    /// Normalized layout grid of the class.
    GridPreference,
    /// Fixed value set of an enum-like value type.
    ValueSemantics,
    /// Default value provider.
    DefaultValue,
    /// Candidate value provider.
    Choices,
    /// Proposed-property-value validator.
    ValidateProperty,
    /// Action argument-list validator.
    ValidateArgs,
}

/// Label facet payload: untranslated noun forms plus the context they
/// translate in, with the translated forms memoized per facet instance.
#[derive(Debug, Clone)]
pub struct NamedFacet {
    noun_forms: NounForms,
    context: TranslationContext,
    translated: OnceCell<NounForms>,
}

impl NamedFacet {
    /// Label `noun_forms`, translated in `context`.
    pub fn new(noun_forms: NounForms, context: TranslationContext) -> Self {
        Self {
            noun_forms,
            context,
            translated: OnceCell::new(),
        }
    }

    /// The untranslated forms.
    pub fn noun_forms(&self) -> &NounForms {
        &self.noun_forms
    }

    /// The translation context.
    pub fn context(&self) -> &TranslationContext {
        &self.context
    }

    /// The translated forms, computed at most once per facet instance.
    /// Concurrent first access computes once; all callers observe the
    /// same result.
    pub fn translated(
        &self,
        service: &dyn TranslationService,
    ) -> Result<&NounForms, TranslationError> {
        self.translated
            .get_or_try_init(|| self.noun_forms.translate(service, &self.context))
    }

    /// Semantic equality: original text and context only. The translated
    /// output is excluded so a locale change never reads as a facet
    /// change.
    pub fn semantic_equals(&self, other: &NamedFacet) -> bool {
        self.noun_forms == other.noun_forms && self.context == other.context
    }
}

/// Description facet payload; same memoization shape as [`NamedFacet`].
#[derive(Debug, Clone)]
pub struct DescribedFacet {
    text: String,
    context: TranslationContext,
    translated: OnceCell<String>,
}

impl DescribedFacet {
    /// Description `text`, translated in `context`.
    pub fn new(text: &str, context: TranslationContext) -> Self {
        Self {
            text: text.to_string(),
            context,
            translated: OnceCell::new(),
        }
    }

    /// The untranslated text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The translated text, computed at most once per facet instance.
    pub fn translated(&self, service: &dyn TranslationService) -> Result<&str, TranslationError> {
        self.translated
            .get_or_try_init(|| service.translate(&self.context, &self.text))
            .map(String::as_str)
    }

    /// Semantic equality: original text and context only.
    pub fn semantic_equals(&self, other: &DescribedFacet) -> bool {
        self.text == other.text && self.context == other.context
    }
}

/// Title facet payload: a declared provider, or a fallback literal.
#[derive(Clone)]
pub struct TitleFacet {
    provider: Option<TitleFn>,
    fallback: String,
}

impl TitleFacet {
    /// Title from a declared provider, with `fallback` for objects the
    /// provider cannot handle.
    pub fn of_provider(provider: TitleFn, fallback: &str) -> Self {
        Self {
            provider: Some(provider),
            fallback: fallback.to_string(),
        }
    }

    /// Constant fallback title.
    pub fn of_fallback(fallback: &str) -> Self {
        Self {
            provider: None,
            fallback: fallback.to_string(),
        }
    }

    /// Whether a provider was declared.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// The fallback literal.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Render the title of `obj`. Provider failures propagate so the
    /// validator can report them.
    pub fn title_of(
        &self,
        obj: &dyn trestle_applib::DomainObject,
    ) -> Result<String, trestle_applib::CallbackError> {
        match &self.provider {
            Some(provider) => provider(obj),
            None => Ok(self.fallback.clone()),
        }
    }

    fn semantic_equals(&self, other: &TitleFacet) -> bool {
        self.fallback == other.fallback
            && match (&self.provider, &other.provider) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

/// Collection semantics payload: the fitted container variant (when the
/// declared container type is recognized) and the element type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSemanticsFacet {
    variant: Option<CollectionVariant>,
    element_type: String,
}

impl CollectionSemanticsFacet {
    /// Semantics fitted from the declared container and element types.
    pub fn new(variant: Option<CollectionVariant>, element_type: &str) -> Self {
        Self {
            variant,
            element_type: element_type.to_string(),
        }
    }

    /// The fitted variant; `None` degrades to a generic list.
    pub fn variant(&self) -> Option<CollectionVariant> {
        self.variant
    }

    /// The declared element type name.
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    /// Materialize elements into the fitted variant, or a generic list
    /// when no variant fit.
    pub fn populate(&self, elements: Vec<trestle_applib::Value>) -> trestle_applib::Value {
        match self.variant {
            Some(variant) => collect(variant, elements),
            None => trestle_applib::Value::List(elements),
        }
    }
}

/// One attachable unit of behavior; a closed union, one variant per axis.
#[derive(Clone)]
pub enum Facet {
    /// Noun forms of a class.
    ObjectNamed(NamedFacet),
    /// Label of a member or parameter.
    MemberNamed(NamedFacet),
    /// Description text.
    Described(DescribedFacet),
    /// Title rendering.
    Title(TitleFacet),
    /// Static visibility rule.
    Hidden(Where),
    /// Per-instance visibility veto.
    HideWhen(HideFn),
    /// Static usability rule, with the reason shown to the user.
    Disabled {
        /// Contexts the member is disabled in.
        r#where: Where,
        /// Reason surfaced in the UI.
        reason: Option<String>,
    },
    /// Per-instance usability veto.
    DisableWhen(DisableFn),
    /// Whether empty values are acceptable.
    Optionality(Optionality),
    /// Maximum accepted text length.
    MaxLength(usize),
    /// Declared action semantics.
    ActionSemantics(SemanticsOf),
    /// Bookmarking policy.
    BookmarkPolicy(BookmarkPolicy),
    /// Collection container semantics.
    CollectionSemantics(CollectionSemanticsFacet),
    /// Element type of a collection.
    TypeOfElement(String),
    /// Property value accessor.
    PropertyAccessor(GetterFn),
    /// Collection element accessor.
    CollectionAccessor(GetterFn),
    /// Action implementation.
    ActionInvocation(InvokeFn),
    /// Placement within the class layout.
    MemberOrder(MemberOrder),
    /// Normalized layout grid of the class.
    GridPreference(Arc<NormalizedGrid>),
    /// Fixed value set of an enum-like value type.
    ValueSemantics(ValueSetFn),
    /// Default value provider.
    DefaultValue(DefaultFn),
    /// Candidate value provider.
    Choices(ChoicesFn),
    /// Proposed-property-value validator.
    ValidateProperty(ValidateFn),
    /// Action argument-list validator.
    ValidateArgs(ValidateArgsFn),
}

impl Facet {
    /// The axis this facet occupies on its holder.
    pub fn kind(&self) -> FacetKind {
        match self {
            Facet::ObjectNamed(_) => FacetKind::ObjectNamed,
            Facet::MemberNamed(_) => FacetKind::MemberNamed,
            Facet::Described(_) => FacetKind::Described,
            Facet::Title(_) => FacetKind::Title,
            Facet::Hidden(_) => FacetKind::Hidden,
            Facet::HideWhen(_) => FacetKind::HideWhen,
            Facet::Disabled { .. } => FacetKind::Disabled,
            Facet::DisableWhen(_) => FacetKind::DisableWhen,
            Facet::Optionality(_) => FacetKind::Optionality,
            Facet::MaxLength(_) => FacetKind::MaxLength,
            Facet::ActionSemantics(_) => FacetKind::ActionSemantics,
            Facet::BookmarkPolicy(_) => FacetKind::BookmarkPolicy,
            Facet::CollectionSemantics(_) => FacetKind::CollectionSemantics,
            Facet::TypeOfElement(_) => FacetKind::TypeOfElement,
            Facet::PropertyAccessor(_) => FacetKind::PropertyAccessor,
            Facet::CollectionAccessor(_) => FacetKind::CollectionAccessor,
            Facet::ActionInvocation(_) => FacetKind::ActionInvocation,
            Facet::MemberOrder(_) => FacetKind::MemberOrder,
            Facet::GridPreference(_) => FacetKind::GridPreference,
            Facet::ValueSemantics(_) => FacetKind::ValueSemantics,
            Facet::DefaultValue(_) => FacetKind::DefaultValue,
            Facet::Choices(_) => FacetKind::Choices,
            Facet::ValidateProperty(_) => FacetKind::ValidateProperty,
            Facet::ValidateArgs(_) => FacetKind::ValidateArgs,
        }
    }

    /// Semantic equality, used to detect redundant re-attachment.
    ///
    /// Payload-bearing facets compare their payloads; i18n facets compare
    /// untranslated text and context only; closure-carrying facets
    /// compare closure identity, the only stable notion available.
    pub fn semantic_equals(&self, other: &Facet) -> bool {
        match (self, other) {
            (Facet::ObjectNamed(a), Facet::ObjectNamed(b))
            | (Facet::MemberNamed(a), Facet::MemberNamed(b)) => a.semantic_equals(b),
            (Facet::Described(a), Facet::Described(b)) => a.semantic_equals(b),
            (Facet::Title(a), Facet::Title(b)) => a.semantic_equals(b),
            (Facet::Hidden(a), Facet::Hidden(b)) => a == b,
            (Facet::HideWhen(a), Facet::HideWhen(b)) => Arc::ptr_eq(a, b),
            (
                Facet::Disabled {
                    r#where: wa,
                    reason: ra,
                },
                Facet::Disabled {
                    r#where: wb,
                    reason: rb,
                },
            ) => wa == wb && ra == rb,
            (Facet::DisableWhen(a), Facet::DisableWhen(b)) => Arc::ptr_eq(a, b),
            (Facet::Optionality(a), Facet::Optionality(b)) => a == b,
            (Facet::MaxLength(a), Facet::MaxLength(b)) => a == b,
            (Facet::ActionSemantics(a), Facet::ActionSemantics(b)) => a == b,
            (Facet::BookmarkPolicy(a), Facet::BookmarkPolicy(b)) => a == b,
            (Facet::CollectionSemantics(a), Facet::CollectionSemantics(b)) => a == b,
            (Facet::TypeOfElement(a), Facet::TypeOfElement(b)) => a == b,
            (Facet::PropertyAccessor(a), Facet::PropertyAccessor(b))
            | (Facet::CollectionAccessor(a), Facet::CollectionAccessor(b)) => Arc::ptr_eq(a, b),
            (Facet::ActionInvocation(a), Facet::ActionInvocation(b)) => Arc::ptr_eq(a, b),
            (Facet::MemberOrder(a), Facet::MemberOrder(b)) => a == b,
            (Facet::GridPreference(a), Facet::GridPreference(b)) => Arc::ptr_eq(a, b),
            (Facet::ValueSemantics(a), Facet::ValueSemantics(b)) => Arc::ptr_eq(a, b),
            (Facet::DefaultValue(a), Facet::DefaultValue(b)) => Arc::ptr_eq(a, b),
            (Facet::Choices(a), Facet::Choices(b)) => Arc::ptr_eq(a, b),
            (Facet::ValidateProperty(a), Facet::ValidateProperty(b)) => Arc::ptr_eq(a, b),
            (Facet::ValidateArgs(a), Facet::ValidateArgs(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Facet {
    fn eq(&self, other: &Self) -> bool {
        self.semantic_equals(other)
    }
}

impl std::fmt::Debug for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Facet::{:?}", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trestle_applib::IdentityTranslation;

    #[test]
    fn test_kind_discriminants() {
        assert_eq!(Facet::Hidden(Where::Everywhere).kind(), FacetKind::Hidden);
        assert_eq!(Facet::MaxLength(10).kind(), FacetKind::MaxLength);
        assert_eq!(
            Facet::ActionSemantics(SemanticsOf::Safe).kind(),
            FacetKind::ActionSemantics
        );
    }

    #[test]
    fn test_named_facet_translates_at_most_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct Counting(AtomicUsize);

        impl TranslationService for Counting {
            fn translate(
                &self,
                _context: &TranslationContext,
                text: &str,
            ) -> Result<String, TranslationError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(text.to_string())
            }
        }

        let facet = NamedFacet::new(
            NounForms::singular_and_plural("Customer", Some("Customers")),
            TranslationContext::named("t.T"),
        );
        let service = Counting(AtomicUsize::new(0));
        facet.translated(&service).unwrap();
        facet.translated(&service).unwrap();
        facet.translated(&service).unwrap();
        // two literals, each translated exactly once
        assert_eq!(service.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_named_semantic_equals_ignores_translation_state() {
        let ctx = TranslationContext::named("t.T");
        let a = NamedFacet::new(NounForms::indifferent("X"), ctx.clone());
        let b = NamedFacet::new(NounForms::indifferent("X"), ctx.clone());
        // force translation on one side only
        a.translated(&IdentityTranslation).unwrap();
        assert!(a.semantic_equals(&b));

        let c = NamedFacet::new(NounForms::indifferent("Y"), ctx);
        assert!(!a.semantic_equals(&c));
    }

    #[test]
    fn test_closure_facets_compare_by_identity() {
        let f: HideFn = Arc::new(|_| true);
        let a = Facet::HideWhen(f.clone());
        let b = Facet::HideWhen(f);
        let c = Facet::HideWhen(Arc::new(|_| true));
        assert!(a.semantic_equals(&b));
        assert!(!a.semantic_equals(&c));
    }

    #[test]
    fn test_cross_kind_never_equal() {
        let a = Facet::Hidden(Where::Everywhere);
        let b = Facet::MaxLength(1);
        assert!(!a.semantic_equals(&b));
    }

    #[test]
    fn test_precedence_order() {
        assert!(Precedence::Fallback < Precedence::Inferred);
        assert!(Precedence::Inferred < Precedence::Default);
        assert!(Precedence::Default < Precedence::High);
        assert!(Precedence::High < Precedence::Event);
    }
}
