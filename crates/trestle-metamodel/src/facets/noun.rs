//! Noun forms
//!
//! UI labels carry up to three grammatical forms. [`NounForms`] holds the
//! untranslated literals; translation produces a fresh `NounForms` whose
//! memoization happens one level up, on the owning facet, so each facet
//! instance translates its text at most once per process lifetime.

use once_cell::sync::OnceCell;
use trestle_applib::{TranslationContext, TranslationError, TranslationService};

/// A grammatical form of a UI label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NounForm {
    /// Form used when grammatical number does not matter.
    Indifferent,
    /// Singular form.
    Singular,
    /// Plural form.
    Plural,
}

/// Immutable set of noun literals, one per supported grammatical form.
#[derive(Debug, Clone, Default)]
pub struct NounForms {
    indifferent: Option<String>,
    singular: Option<String>,
    plural: Option<String>,
    supported: OnceCell<Vec<NounForm>>,
}

impl NounForms {
    /// Noun with only the indifferent form.
    pub fn indifferent(text: &str) -> Self {
        Self {
            indifferent: Some(text.to_string()),
            ..Default::default()
        }
    }

    /// Noun with singular and optional plural forms.
    pub fn singular_and_plural(singular: &str, plural: Option<&str>) -> Self {
        Self {
            singular: Some(singular.to_string()),
            plural: plural.map(str::to_string),
            ..Default::default()
        }
    }

    /// The literal for a form, when supported.
    pub fn get(&self, form: NounForm) -> Option<&str> {
        match form {
            NounForm::Indifferent => self.indifferent.as_deref(),
            NounForm::Singular => self.singular.as_deref(),
            NounForm::Plural => self.plural.as_deref(),
        }
    }

    /// Best available literal: indifferent, then singular, then plural.
    pub fn preferred(&self) -> Option<&str> {
        self.indifferent
            .as_deref()
            .or(self.singular.as_deref())
            .or(self.plural.as_deref())
    }

    /// Exactly the forms whose literal is present. Computed once and
    /// memoized; idempotent across calls and threads.
    pub fn supported_noun_forms(&self) -> &[NounForm] {
        self.supported
            .get_or_init(|| {
                let mut forms = Vec::new();
                if self.indifferent.is_some() {
                    forms.push(NounForm::Indifferent);
                }
                if self.singular.is_some() {
                    forms.push(NounForm::Singular);
                }
                if self.plural.is_some() {
                    forms.push(NounForm::Plural);
                }
                forms
            })
            .as_slice()
    }

    /// A new `NounForms` with every supported literal passed through the
    /// translation service. Recomputed on each call; callers that need
    /// at-most-once behavior memoize the result (the named facets do).
    pub fn translate(
        &self,
        service: &dyn TranslationService,
        context: &TranslationContext,
    ) -> Result<NounForms, TranslationError> {
        let translate_opt = |literal: &Option<String>| -> Result<Option<String>, TranslationError> {
            match literal {
                Some(text) => Ok(Some(service.translate(context, text)?)),
                None => Ok(None),
            }
        };
        Ok(NounForms {
            indifferent: translate_opt(&self.indifferent)?,
            singular: translate_opt(&self.singular)?,
            plural: translate_opt(&self.plural)?,
            supported: OnceCell::new(),
        })
    }
}

/// Literal-wise equality; the memoized supported-forms set is derived
/// state and takes no part.
impl PartialEq for NounForms {
    fn eq(&self, other: &Self) -> bool {
        self.indifferent == other.indifferent
            && self.singular == other.singular
            && self.plural == other.plural
    }
}

impl Eq for NounForms {}

#[cfg(test)]
mod tests {
    use super::*;
    use trestle_applib::IdentityTranslation;

    struct Uppercasing;

    impl TranslationService for Uppercasing {
        fn translate(
            &self,
            _context: &TranslationContext,
            text: &str,
        ) -> Result<String, TranslationError> {
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn test_supported_forms_match_present_literals() {
        let noun = NounForms::singular_and_plural("Customer", Some("Customers"));
        assert_eq!(
            noun.supported_noun_forms(),
            &[NounForm::Singular, NounForm::Plural]
        );
        // idempotent
        assert_eq!(
            noun.supported_noun_forms(),
            &[NounForm::Singular, NounForm::Plural]
        );

        let indifferent = NounForms::indifferent("Dashboard");
        assert_eq!(indifferent.supported_noun_forms(), &[NounForm::Indifferent]);
    }

    #[test]
    fn test_translate_preserves_supported_forms() {
        let noun = NounForms::singular_and_plural("Customer", Some("Customers"));
        let ctx = TranslationContext::named("t.T");
        let translated = noun.translate(&Uppercasing, &ctx).unwrap();
        assert_eq!(
            translated.supported_noun_forms(),
            noun.supported_noun_forms()
        );
        assert_eq!(translated.get(NounForm::Singular), Some("CUSTOMER"));
        assert_eq!(translated.get(NounForm::Plural), Some("CUSTOMERS"));
        assert_eq!(translated.get(NounForm::Indifferent), None);
    }

    #[test]
    fn test_identity_translation_compares_equal() {
        let noun = NounForms::singular_and_plural("Customer", None);
        let ctx = TranslationContext::named("t.T");
        let translated = noun.translate(&IdentityTranslation, &ctx).unwrap();
        assert_eq!(noun, translated);
    }

    #[test]
    fn test_preferred_order() {
        let noun = NounForms {
            indifferent: Some("I".to_string()),
            singular: Some("S".to_string()),
            plural: Some("P".to_string()),
            supported: OnceCell::new(),
        };
        assert_eq!(noun.preferred(), Some("I"));
        assert_eq!(
            NounForms::singular_and_plural("S", Some("P")).preferred(),
            Some("S")
        );
        assert_eq!(NounForms::default().preferred(), None);
    }
}
