//! # Translation Module
//!
//! Contracts consumed by translated facets, and two stock services:
//!
//! - [`TranslationCatalog`]: `Read` mode, looks strings up in loaded entries
//! - [`TranslationRecorder`]: `Write` mode, records every string it is asked
//!   for and renders a gettext template
//!
//! ## Evaluation
//!
//! The service mode decides *when* a translated facet evaluates:
//!
//! | Mode | Evaluation | Effect |
//! |------|------------|--------|
//! | `Read` | `Lazy` | translated on first `value()`, cached forever |
//! | `Write` | `Eager` | translated during construction so the string is recorded |

mod catalog;
mod recorder;

pub use catalog::{CatalogEntry, TranslationCatalog};
pub use recorder::TranslationRecorder;

use crate::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode of a translation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationMode {
    /// Normal runtime path: look strings up.
    #[default]
    Read,
    /// Extraction pass: observe every translatable string.
    Write,
}

impl TranslationMode {
    /// Check if this is [`TranslationMode::Write`].
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, TranslationMode::Write)
    }
}

impl fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationMode::Read => f.write_str("read"),
            TranslationMode::Write => f.write_str("write"),
        }
    }
}

/// Maps source-language text to localized text.
pub trait TranslationService: Send + Sync {
    /// The operating mode.
    fn mode(&self) -> TranslationMode;

    /// Translate `text`, disambiguated by `context`, into `locale`.
    fn translate(&self, context: &str, text: &str, locale: &Locale) -> String;
}

/// Supplies the locale of the current request or process.
pub trait LocaleProvider: Send + Sync {
    /// The current locale.
    fn locale(&self) -> Locale;
}

/// A locale provider that always answers the same locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocaleProvider(pub Locale);

impl LocaleProvider for FixedLocaleProvider {
    fn locale(&self) -> Locale {
        self.0.clone()
    }
}

/// When a translated value is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluation {
    /// Compute and cache during construction.
    Eager,
    /// Compute and cache on first read.
    Lazy,
}

impl From<TranslationMode> for Evaluation {
    fn from(mode: TranslationMode) -> Self {
        match mode {
            TranslationMode::Write => Evaluation::Eager,
            TranslationMode::Read => Evaluation::Lazy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_mode_is_eager() {
        assert_eq!(Evaluation::from(TranslationMode::Write), Evaluation::Eager);
        assert_eq!(Evaluation::from(TranslationMode::Read), Evaluation::Lazy);
        assert!(TranslationMode::Write.is_write());
        assert!(!TranslationMode::default().is_write());
    }

    #[test]
    fn fixed_locale_provider_answers_its_locale() {
        let locale: Locale = "fr-CA".parse().expect("locale");
        let provider = FixedLocaleProvider(locale.clone());
        assert_eq!(provider.locale(), locale);
    }
}
