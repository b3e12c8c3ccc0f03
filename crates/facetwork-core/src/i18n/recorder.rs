//! Write-mode translation recorder.

use super::{TranslationMode, TranslationService};
use crate::Locale;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Records every string passed through it and returns it untranslated.
///
/// Used for the extraction pass: build the metamodel against a recorder,
/// then render [`TranslationRecorder::to_pot`] as the catalog template.
/// Empty strings are passed through but not recorded, since `msgid ""` is
/// reserved for the catalog header.
#[derive(Debug, Default)]
pub struct TranslationRecorder {
    recorded: Mutex<BTreeMap<String, BTreeSet<String>>>,
}

impl TranslationRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn recorded(&self) -> MutexGuard<'_, BTreeMap<String, BTreeSet<String>>> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of distinct source strings recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recorded().len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Contexts a source string was recorded under, sorted.
    #[must_use]
    pub fn contexts(&self, msgid: &str) -> Vec<String> {
        self.recorded()
            .get(msgid)
            .map(|contexts| contexts.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Render the recorded strings as a gettext template.
    #[must_use]
    pub fn to_pot(&self) -> String {
        let recorded = self.recorded();
        let mut out = String::new();
        for (msgid, contexts) in recorded.iter() {
            if !out.is_empty() {
                out.push('\n');
            }
            for context in contexts {
                out.push_str(&format!("#: {}\n", reference_line(context)));
            }
            out.push_str(&format!("msgid \"{}\"\n", escape_po(msgid)));
            out.push_str("msgstr \"\"\n");
        }
        out
    }
}

impl TranslationService for TranslationRecorder {
    fn mode(&self) -> TranslationMode {
        TranslationMode::Write
    }

    fn translate(&self, context: &str, text: &str, _locale: &Locale) -> String {
        if text.is_empty() {
            return String::new();
        }
        let newly_seen = self
            .recorded()
            .entry(text.to_string())
            .or_default()
            .insert(context.to_string());
        if newly_seen {
            tracing::debug!(context, text, "recorded translatable string");
        }
        text.to_string()
    }
}

/// A reference comment ends at the line break; fold control characters.
fn reference_line(context: &str) -> String {
    context
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn escape_po(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Locale {
        "en".parse().expect("locale")
    }

    #[test]
    fn returns_source_text_and_records_it() {
        let recorder = TranslationRecorder::new();
        assert!(recorder.is_empty());

        let out = recorder.translate("Order#status", "Status", &en());
        assert_eq!(out, "Status");
        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.contexts("Status"), vec!["Order#status".to_string()]);
        assert_eq!(recorder.mode(), TranslationMode::Write);
    }

    #[test]
    fn same_text_in_two_contexts_is_one_msgid() {
        let recorder = TranslationRecorder::new();
        recorder.translate("Order#status", "Status", &en());
        recorder.translate("Invoice#status", "Status", &en());
        recorder.translate("Invoice#status", "Status", &en());

        assert_eq!(recorder.len(), 1);
        assert_eq!(
            recorder.contexts("Status"),
            vec!["Invoice#status".to_string(), "Order#status".to_string()]
        );
    }

    #[test]
    fn pot_lists_sorted_entries_with_contexts() {
        let recorder = TranslationRecorder::new();
        recorder.translate("Order#status", "Status", &en());
        recorder.translate("Order", "Order", &en());

        let expected = "#: Order\n\
                        msgid \"Order\"\n\
                        msgstr \"\"\n\
                        \n\
                        #: Order#status\n\
                        msgid \"Status\"\n\
                        msgstr \"\"\n";
        assert_eq!(recorder.to_pot(), expected);
    }

    #[test]
    fn empty_text_is_not_recorded() {
        let recorder = TranslationRecorder::new();
        assert_eq!(recorder.translate("Order", "", &en()), "");
        assert!(recorder.is_empty());
        assert!(!recorder.to_pot().contains("msgid \"\""));
    }

    #[test]
    fn context_line_breaks_are_folded() {
        let recorder = TranslationRecorder::new();
        recorder.translate("Order\n#status\r", "Status", &en());
        assert_eq!(
            recorder.to_pot(),
            "#: Order #status \nmsgid \"Status\"\nmsgstr \"\"\n"
        );
    }

    #[test]
    fn pot_escapes_quotes_and_backslashes() {
        assert_eq!(escape_po(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
        assert_eq!(escape_po("a\nb"), "a\\nb");
    }
}
