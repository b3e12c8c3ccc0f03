//! # Property-Based Tests
//!
//! Chain growth and memoization invariants, checked with proptest.

use facetwork_core::{
    FacetHolder, FacetKind, FixedLocaleProvider, Identifier, Locale, Metamodel, NamedFacet,
    NamedFacetAnnotation, NamedFacetTranslated, TranslationMode, TranslationService,
};
use proptest::collection::vec;
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingService {
    mode: TranslationMode,
    calls: AtomicUsize,
}

impl TranslationService for CountingService {
    fn mode(&self) -> TranslationMode {
        self.mode
    }

    fn translate(&self, context: &str, text: &str, locale: &Locale) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        format!("[{}|{}] {}", locale, context, text)
    }
}

fn counting(mode: TranslationMode) -> Arc<CountingService> {
    Arc::new(CountingService {
        mode,
        calls: AtomicUsize::new(0),
    })
}

fn holder_id() -> Identifier {
    "com.example.Order#status".parse().expect("id")
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Each attachment grows the chain by exactly one and keeps every earlier
    /// facet reachable, newest first.
    #[test]
    fn chain_grows_by_one_per_attachment(names in vec("[a-zA-Z]{1,12}", 1..20)) {
        let mut holder = FacetHolder::new(holder_id());

        for (i, name) in names.iter().enumerate() {
            let len = holder
                .add_facet(NamedFacetAnnotation::new(name.clone(), false, holder_id()))
                .expect("add");
            prop_assert_eq!(len, i + 1);
        }

        let active = holder.facet(FacetKind::Named).expect("active");
        prop_assert_eq!(active.depth(), names.len());

        let seen: Vec<String> = active
            .chain()
            .filter_map(|link| link.text().map(str::to_string))
            .collect();
        let expected: Vec<String> = names.iter().rev().cloned().collect();
        prop_assert_eq!(seen, expected);
    }

    /// Repeated reads of a read-mode facet hit the service at most once.
    #[test]
    fn value_is_memoized(reads in 0usize..32, text in "[ -~]{0,40}") {
        let service = counting(TranslationMode::Read);
        let facet = NamedFacetTranslated::new(
            "ctx",
            text,
            service.clone(),
            Arc::new(FixedLocaleProvider("en-US".parse().expect("locale"))),
            holder_id(),
        );

        let mut values = Vec::new();
        for _ in 0..reads {
            values.push(facet.value().to_string());
        }

        prop_assert_eq!(service.calls.load(Ordering::SeqCst), reads.min(1));
        prop_assert!(values.windows(2).all(|w| w[0] == w[1]));
    }

    /// Write mode translates exactly once whatever happens afterwards.
    #[test]
    fn write_mode_translates_exactly_once(reads in 0usize..8) {
        let service = counting(TranslationMode::Write);
        let facet = NamedFacetTranslated::new(
            "ctx",
            "Status",
            service.clone(),
            Arc::new(FixedLocaleProvider("fr".parse().expect("locale"))),
            holder_id(),
        );
        for _ in 0..reads {
            let _ = facet.value();
        }
        prop_assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    /// The translation pass adds exactly one facet per translatable facet.
    #[test]
    fn translation_pass_adds_one_link(members in vec("[a-z]{1,8}", 1..10)) {
        let mut metamodel = Metamodel::new();
        for member in &members {
            let id = Identifier::property("com.example.Order", member.clone()).expect("id");
            metamodel.introduce(id);
        }
        let inferred = metamodel.infer_names().expect("infer");

        let attached = metamodel
            .apply_translations(
                counting(TranslationMode::Read),
                Arc::new(FixedLocaleProvider("en".parse().expect("locale"))),
            )
            .expect("translate");

        prop_assert_eq!(attached, inferred);
        for holder in metamodel.holders() {
            prop_assert_eq!(holder.chain_len(FacetKind::Named), 2);
        }
    }
}
