//! Translated facets.
//!
//! A translated facet holds the source text and its context and asks the
//! [`TranslationService`] for the localized value. The value is computed at
//! most once per facet and then kept, even if the locale changes later.

use crate::facet::{DescribedAsFacet, Facet, NamedFacet};
use crate::i18n::{Evaluation, LocaleProvider, TranslationService};
use crate::{Derivation, FacetKind, Identifier};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A source string bound to a translation service, memoized on first use.
pub struct TranslatedText {
    context: String,
    original: String,
    service: Arc<dyn TranslationService>,
    locale_provider: Arc<dyn LocaleProvider>,
    value: OnceLock<String>,
}

impl TranslatedText {
    /// Bind `original` under `context` to a service.
    ///
    /// With [`Evaluation::Eager`] the translation runs before this returns.
    pub fn new(
        context: impl Into<String>,
        original: impl Into<String>,
        service: Arc<dyn TranslationService>,
        locale_provider: Arc<dyn LocaleProvider>,
        evaluation: Evaluation,
    ) -> Self {
        let text = Self {
            context: context.into(),
            original: original.into(),
            service,
            locale_provider,
            value: OnceLock::new(),
        };
        if evaluation == Evaluation::Eager {
            let value = text.value();
            tracing::debug!(context = %text.context, value, "translated eagerly");
        }
        text
    }

    /// The disambiguation context.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The source-language text.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The translated text, computed on first call.
    pub fn value(&self) -> &str {
        self.value.get_or_init(|| {
            let locale = self.locale_provider.locale();
            self.service.translate(&self.context, &self.original, &locale)
        })
    }

    /// Check if the value has been computed.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }
}

impl fmt::Debug for TranslatedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatedText")
            .field("context", &self.context)
            .field("original", &self.original)
            .field("value", &self.value.get())
            .finish_non_exhaustive()
    }
}

/// A name obtained from a translation service.
///
/// The escaped flag is not decided here; it comes from the facet this one
/// decorates, or `false` if there is none.
#[derive(Debug)]
pub struct NamedFacetTranslated {
    holder: Identifier,
    text: TranslatedText,
}

impl NamedFacetTranslated {
    /// Create a translated name; evaluates immediately in write mode.
    pub fn new(
        context: impl Into<String>,
        original: impl Into<String>,
        service: Arc<dyn TranslationService>,
        locale_provider: Arc<dyn LocaleProvider>,
        holder: Identifier,
    ) -> Self {
        let evaluation = Evaluation::from(service.mode());
        Self {
            holder,
            text: TranslatedText::new(context, original, service, locale_provider, evaluation),
        }
    }

    /// The underlying translated text.
    #[must_use]
    pub fn text(&self) -> &TranslatedText {
        &self.text
    }
}

impl Facet for NamedFacetTranslated {
    fn kind(&self) -> FacetKind {
        FacetKind::Named
    }

    fn holder(&self) -> &Identifier {
        &self.holder
    }

    fn derivation(&self) -> Derivation {
        Derivation::NotDerived
    }

    fn as_named(&self) -> Option<&dyn NamedFacet> {
        Some(self)
    }
}

impl NamedFacet for NamedFacetTranslated {
    fn value(&self) -> &str {
        self.text.value()
    }

    fn escaped(&self) -> Option<bool> {
        None
    }
}

/// A description obtained from a translation service.
#[derive(Debug)]
pub struct DescribedAsFacetTranslated {
    holder: Identifier,
    text: TranslatedText,
}

impl DescribedAsFacetTranslated {
    /// Create a translated description; evaluates immediately in write mode.
    pub fn new(
        context: impl Into<String>,
        original: impl Into<String>,
        service: Arc<dyn TranslationService>,
        locale_provider: Arc<dyn LocaleProvider>,
        holder: Identifier,
    ) -> Self {
        let evaluation = Evaluation::from(service.mode());
        Self {
            holder,
            text: TranslatedText::new(context, original, service, locale_provider, evaluation),
        }
    }

    /// The underlying translated text.
    #[must_use]
    pub fn text(&self) -> &TranslatedText {
        &self.text
    }
}

impl Facet for DescribedAsFacetTranslated {
    fn kind(&self) -> FacetKind {
        FacetKind::DescribedAs
    }

    fn holder(&self) -> &Identifier {
        &self.holder
    }

    fn derivation(&self) -> Derivation {
        Derivation::NotDerived
    }

    fn as_described_as(&self) -> Option<&dyn DescribedAsFacet> {
        Some(self)
    }
}

impl DescribedAsFacet for DescribedAsFacetTranslated {
    fn value(&self) -> &str {
        self.text.value()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{FixedLocaleProvider, TranslationMode};
    use crate::Locale;
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Upper-cases the text and counts calls.
    struct CountingService {
        mode: TranslationMode,
        calls: AtomicUsize,
    }

    impl CountingService {
        fn new(mode: TranslationMode) -> Arc<Self> {
            Arc::new(Self {
                mode,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TranslationService for CountingService {
        fn mode(&self) -> TranslationMode {
            self.mode
        }

        fn translate(&self, _context: &str, text: &str, locale: &Locale) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            format!("{}:{}", locale, text.to_uppercase())
        }
    }

    struct SwitchableLocale(RwLock<Locale>);

    impl LocaleProvider for SwitchableLocale {
        fn locale(&self) -> Locale {
            self.0.read().map(|l| l.clone()).expect("locale lock")
        }
    }

    fn en() -> Arc<FixedLocaleProvider> {
        Arc::new(FixedLocaleProvider("en".parse().expect("locale")))
    }

    fn order_status() -> Identifier {
        Identifier::property("com.example.Order", "status").expect("id")
    }

    #[test]
    fn read_mode_defers_until_first_value() {
        let service = CountingService::new(TranslationMode::Read);
        let facet = NamedFacetTranslated::new(
            "Order#status",
            "shipped",
            service.clone(),
            en(),
            order_status(),
        );

        assert_eq!(service.calls(), 0);
        assert!(!facet.text().is_resolved());

        assert_eq!(facet.value(), "en:SHIPPED");
        assert_eq!(facet.value(), "en:SHIPPED");
        assert_eq!(service.calls(), 1);
    }

    #[test]
    fn write_mode_evaluates_during_construction() {
        let service = CountingService::new(TranslationMode::Write);
        let facet = DescribedAsFacetTranslated::new(
            "Order#status",
            "current state",
            service.clone(),
            en(),
            order_status(),
        );

        assert_eq!(service.calls(), 1);
        assert!(facet.text().is_resolved());
        assert_eq!(facet.value(), "en:CURRENT STATE");
        assert_eq!(service.calls(), 1);
    }

    #[test]
    fn cached_value_ignores_later_locale_change() {
        let service = CountingService::new(TranslationMode::Read);
        let locale = Arc::new(SwitchableLocale(RwLock::new("en".parse().expect("en"))));
        let facet = NamedFacetTranslated::new(
            "Order#status",
            "shipped",
            service.clone(),
            locale.clone(),
            order_status(),
        );

        assert_eq!(facet.value(), "en:SHIPPED");
        *locale.0.write().expect("locale lock") = "fr".parse().expect("fr");
        assert_eq!(facet.value(), "en:SHIPPED");
        assert_eq!(service.calls(), 1);
    }

    #[test]
    fn translated_name_does_not_decide_escaping() {
        let service = CountingService::new(TranslationMode::Read);
        let facet = NamedFacetTranslated::new("ctx", "x", service, en(), order_status());
        assert_eq!(facet.escaped(), None);
        assert_eq!(facet.derivation(), Derivation::NotDerived);
        assert_eq!(facet.text().context(), "ctx");
        assert_eq!(facet.text().original(), "x");
    }

    #[test]
    fn concurrent_first_reads_translate_once() {
        let service = CountingService::new(TranslationMode::Read);
        let facet = Arc::new(NamedFacetTranslated::new(
            "Order#status",
            "shipped",
            service.clone(),
            en(),
            order_status(),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let facet = Arc::clone(&facet);
                std::thread::spawn(move || facet.value().to_string())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("join"), "en:SHIPPED");
        }
        assert_eq!(service.calls(), 1);
    }
}
