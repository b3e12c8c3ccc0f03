//! Integration tests for the Facetwork commands.
//!
//! Drive the command functions with configuration written to temp files.

#![allow(clippy::unwrap_used, clippy::panic)]

use facetwork::cli::{clock_report, describe, extract, whoami};
use facetwork::config::{self, FacetworkConfig};
use facetwork_core::{ClockSlot, ClockState, FacetworkError, TranslationMode};
use std::io::Write;
use tempfile::NamedTempFile;

const ORDER_CONFIG: &str = r#"
[translation]
locale = "fr-CA"

[[element]]
id = "com.example.Order#status"
named = "Status"
escaped = true
described_as = "Where the order is"

[[element]]
id = "com.example.Order#totalAmount"
hidden = true

[[element]]
id = "com.example.Order#ship()"

[[translation_entry]]
locale = "fr"
context = "com.example.Order#status"
msgid = "Status"
msgstr = "Statut"

[[translation_entry]]
locale = "fr-CA"
msgid = "Total Amount"
msgstr = "Montant total"
"#;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn load(contents: &str) -> FacetworkConfig {
    let file = write_config(contents);
    config::load(file.path()).unwrap()
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn load_reads_file() {
    let config = load(ORDER_CONFIG);
    assert_eq!(config.elements.len(), 3);
    assert_eq!(config.translation_entries.len(), 2);
    assert_eq!(config.translation.mode, TranslationMode::Read);
}

#[test]
fn malformed_file_is_config_error() {
    let file = write_config("[[element]\nid = 1");
    assert!(matches!(
        config::load(file.path()),
        Err(FacetworkError::Config(_))
    ));
}

// =============================================================================
// DESCRIBE
// =============================================================================

#[test]
fn describe_translates_names() {
    let report = describe(&load(ORDER_CONFIG)).unwrap();
    assert_eq!(report.locale, "fr-CA");
    assert_eq!(report.elements.len(), 3);

    let status = report
        .elements
        .iter()
        .find(|e| e.id == "com.example.Order#status")
        .unwrap();
    assert_eq!(status.name.as_deref(), Some("Statut"));
    assert!(status.escaped);
    // No catalog entry: description falls back to the source text.
    assert_eq!(status.description.as_deref(), Some("Where the order is"));
    assert_eq!(status.chains.get("named"), Some(&2));
    assert_eq!(status.chains.get("described_as"), Some(&2));

    let total = report
        .elements
        .iter()
        .find(|e| e.id == "com.example.Order#totalAmount")
        .unwrap();
    assert_eq!(total.name.as_deref(), Some("Montant total"));
    assert!(total.hidden);
    // Inferred names escape; the translated link delegates to them.
    assert!(total.escaped);
}

#[test]
fn describe_in_write_mode_keeps_source_text() {
    let mut config = load(ORDER_CONFIG);
    config.translation.mode = TranslationMode::Write;

    let report = describe(&config).unwrap();
    let status = report
        .elements
        .iter()
        .find(|e| e.id == "com.example.Order#status")
        .unwrap();
    assert_eq!(status.name.as_deref(), Some("Status"));
    assert_eq!(report.mode, TranslationMode::Write);
}

#[test]
fn describe_renders_json() {
    let report = describe(&load(ORDER_CONFIG)).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "read");
    assert!(json["elements"].as_array().unwrap().len() == 3);
}

#[test]
fn describe_renders_text() {
    let text = describe(&load(ORDER_CONFIG)).unwrap().to_text();
    assert!(text.starts_with("Locale: fr-CA (mode: read)\n"));
    assert!(text.contains(
        "\ncom.example.Order#status\n  name:        Statut\n  description: Where the order is\n  chains:      described_as=2 named=2\n"
    ));
    assert!(text.contains("  name:        Montant total\n  hidden\n  chains:      hidden=1 named=2\n"));
}

// =============================================================================
// EXTRACT
// =============================================================================

#[test]
fn extract_records_every_translatable_string() {
    let recorder = extract(&load(ORDER_CONFIG)).unwrap();
    // Status, Where the order is, Total Amount, Ship
    assert_eq!(recorder.len(), 4);

    let pot = recorder.to_pot();
    assert!(pot.contains("#: com.example.Order#status\nmsgid \"Status\"\nmsgstr \"\"\n"));
    assert!(pot.contains("msgid \"Ship\""));
}

#[test]
fn extract_ignores_configured_mode() {
    let mut config = load(ORDER_CONFIG);
    config.translation.mode = TranslationMode::Read;
    assert_eq!(extract(&config).unwrap().len(), 4);
}

#[test]
fn extract_writes_template_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("messages.pot");

    facetwork::cli::cmd_extract(&load(ORDER_CONFIG), Some(&output), true).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("msgid \"Where the order is\""));
}

// =============================================================================
// CLOCK
// =============================================================================

#[test]
fn clock_uses_configured_fixture() {
    let slot = ClockSlot::new();
    let config = config::parse("[clock]\nfixture_time_millis = 86400000\n").unwrap();

    let report = clock_report(&slot, &config).unwrap();
    assert_eq!(report.time_millis, 86_400_000);
    assert!(report.fixture);
    assert_eq!(report.state, ClockState::Replaceable);
}

#[test]
fn clock_without_fixture_locks_slot() {
    let slot = ClockSlot::new();
    let report = clock_report(&slot, &FacetworkConfig::default()).unwrap();
    assert!(!report.fixture);
    assert_eq!(report.state, ClockState::Locked);

    let config = config::parse("[clock]\nfixture_time_millis = 0\n").unwrap();
    assert!(matches!(
        clock_report(&slot, &config),
        Err(FacetworkError::ConfigurationConflict(_))
    ));
}

// =============================================================================
// WHOAMI
// =============================================================================

#[test]
fn whoami_reports_principal() {
    let report = whoami("sven", &["admin".to_string(), "clerk".to_string()]).unwrap();
    assert_eq!(report.name, "sven");
    assert_eq!(report.roles, vec!["admin", "clerk"]);
    assert_eq!(report.display, "User [name=sven,roles=admin clerk ]");
}

#[test]
fn whoami_rejects_empty_user() {
    assert!(matches!(
        whoami("", &[]),
        Err(FacetworkError::InvalidArgument(_))
    ));
}
