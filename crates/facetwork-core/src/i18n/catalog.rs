//! Read-mode translation catalog.

use super::{TranslationMode, TranslationService};
use crate::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One translated string.
///
/// An entry without a context applies to every context that has no entry of
/// its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Target locale (`fr`, `fr-CA`).
    pub locale: Locale,
    /// Disambiguation context, usually an element identifier.
    #[serde(default)]
    pub context: Option<String>,
    /// Source-language text.
    pub msgid: String,
    /// Translated text.
    pub msgstr: String,
}

/// Translations keyed by locale, context and source text.
///
/// Lookup order for `(context, text, en-US)`:
/// 1. `en-US` with context
/// 2. `en-US` without context
/// 3. `en` with context
/// 4. `en` without context
/// 5. the source text unchanged
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    translations: BTreeMap<Locale, BTreeMap<(String, String), String>>,
}

impl TranslationCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries; later entries win on duplicates.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, entry: CatalogEntry) {
        let context = entry.context.unwrap_or_default();
        self.translations
            .entry(entry.locale)
            .or_default()
            .insert((context, entry.msgid), entry.msgstr);
    }

    /// Total number of entries across all locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.translations.values().map(BTreeMap::len).sum()
    }

    /// Check if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a translation without falling back to the source text.
    #[must_use]
    pub fn lookup(&self, context: &str, text: &str, locale: &Locale) -> Option<&str> {
        let language = locale.language_only();
        let mut candidates = vec![locale];
        if locale.region().is_some() {
            candidates.push(&language);
        }

        candidates.into_iter().find_map(|candidate| {
            let table = self.translations.get(candidate)?;
            [context, ""].into_iter().find_map(|ctx| {
                table
                    .get(&(ctx.to_string(), text.to_string()))
                    .map(String::as_str)
            })
        })
    }
}

impl TranslationService for TranslationCatalog {
    fn mode(&self) -> TranslationMode {
        TranslationMode::Read
    }

    fn translate(&self, context: &str, text: &str, locale: &Locale) -> String {
        match self.lookup(context, text, locale) {
            Some(translated) => translated.to_string(),
            None => {
                tracing::trace!(context, text, locale = %locale, "no translation, using source text");
                text.to_string()
            }
        }
    }
}
