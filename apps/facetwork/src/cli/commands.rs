//! # CLI Command Implementations
//!
//! Each `cmd_*` prints; the function it wraps builds the report and is what
//! the tests call.

use crate::config::{self, FacetworkConfig};
use crate::report::{ClockReport, DescribeReport, ExtractReport, PrincipalReport};
use facetwork_core::{
    ClockSlot, FacetworkError, FixedLocaleProvider, FixtureClock, FixtureUserSwitcher,
    LocaleProvider, Metamodel, SwitchUserService, TranslationMode, TranslationRecorder,
    TranslationService, process_clock,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Render `value` as pretty JSON.
fn render_json(value: &impl Serialize) -> Result<String, FacetworkError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| FacetworkError::Serialization(format!("failed to render JSON: {}", e)))
}

/// Print `value` as pretty JSON.
fn print_json(value: &impl Serialize) -> Result<(), FacetworkError> {
    println!("{}", render_json(value)?);
    Ok(())
}

/// Validate output path.
///
/// The parent directory must exist; the result keeps the canonical parent
/// plus the original file name.
fn validate_output_path(path: &Path) -> Result<PathBuf, FacetworkError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        FacetworkError::Io(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(FacetworkError::Io(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| FacetworkError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Metamodel from `config` with names inferred.
fn prepared_metamodel(config: &FacetworkConfig) -> Result<Metamodel, FacetworkError> {
    let mut metamodel = config::build_metamodel(config)?;
    let inferred = metamodel.infer_names()?;
    tracing::debug!(elements = metamodel.len(), inferred, "metamodel prepared");
    Ok(metamodel)
}

fn locale_provider(config: &FacetworkConfig) -> Result<Arc<dyn LocaleProvider>, FacetworkError> {
    Ok(Arc::new(FixedLocaleProvider(
        config.translation.effective_locale()?,
    )))
}

// =============================================================================
// DESCRIBE COMMAND
// =============================================================================

/// Build, translate and resolve every configured element.
///
/// Read mode translates through the configured catalog; write mode records
/// instead, so names come back untranslated.
pub fn describe(config: &FacetworkConfig) -> Result<DescribeReport, FacetworkError> {
    let mut metamodel = prepared_metamodel(config)?;
    let locale = config.translation.effective_locale()?;
    let mode = config.translation.mode;

    let service: Arc<dyn TranslationService> = match mode {
        TranslationMode::Read => Arc::new(config::catalog(config)),
        TranslationMode::Write => Arc::new(TranslationRecorder::new()),
    };
    metamodel.apply_translations(service, locale_provider(config)?)?;

    Ok(DescribeReport::new(&metamodel, &locale, mode))
}

/// Print the resolved elements.
pub fn cmd_describe(config: &FacetworkConfig, json_mode: bool) -> Result<(), FacetworkError> {
    let report = describe(config)?;
    if json_mode {
        print_json(&report)
    } else {
        print!("{}", report.to_text());
        Ok(())
    }
}

// =============================================================================
// EXTRACT COMMAND
// =============================================================================

/// Run the translation pass in write mode and return the recorder.
///
/// The configured mode is ignored.
pub fn extract(config: &FacetworkConfig) -> Result<Arc<TranslationRecorder>, FacetworkError> {
    let mut metamodel = prepared_metamodel(config)?;
    let recorder = Arc::new(TranslationRecorder::new());
    metamodel.apply_translations(recorder.clone(), locale_provider(config)?)?;
    tracing::info!(strings = recorder.len(), "translatable strings recorded");
    Ok(recorder)
}

/// Write the gettext template to `output`, or stdout.
pub fn cmd_extract(
    config: &FacetworkConfig,
    output: Option<&Path>,
    json_mode: bool,
) -> Result<(), FacetworkError> {
    let recorder = extract(config)?;
    let template = recorder.to_pot();

    let written = match output {
        Some(path) => {
            let validated = validate_output_path(path)?;
            std::fs::write(&validated, &template).map_err(|e| {
                FacetworkError::Io(format!("failed to write {}: {}", validated.display(), e))
            })?;
            tracing::info!(path = %validated.display(), "template written");
            Some(validated.display().to_string())
        }
        None => None,
    };

    if json_mode {
        print_json(&ExtractReport {
            strings: recorder.len(),
            output: written,
        })
    } else {
        if written.is_none() {
            print!("{}", template);
        }
        Ok(())
    }
}

// =============================================================================
// CLOCK COMMAND
// =============================================================================

/// Read `slot`, first installing a fixture clock if one is configured.
pub fn clock_report(
    slot: &ClockSlot,
    config: &FacetworkConfig,
) -> Result<ClockReport, FacetworkError> {
    let fixture = match config.clock.fixture_time_millis {
        Some(millis) => {
            FixtureClock::install(slot, millis)?;
            true
        }
        None => false,
    };

    // One read; the millis are taken from the calendar value.
    let calendar = slot.time_as_calendar()?;
    Ok(ClockReport {
        time_millis: calendar.timestamp_millis(),
        calendar: calendar.to_rfc3339(),
        state: slot.state(),
        fixture,
    })
}

/// Print the process clock.
pub fn cmd_clock(config: &FacetworkConfig, json_mode: bool) -> Result<(), FacetworkError> {
    let report = clock_report(process_clock(), config)?;
    if json_mode {
        print_json(&report)
    } else {
        print!("{}", report.to_text());
        Ok(())
    }
}

// =============================================================================
// WHOAMI COMMAND
// =============================================================================

/// Switch to `user` with `roles` and report the resulting principal.
pub fn whoami(user: &str, roles: &[String]) -> Result<PrincipalReport, FacetworkError> {
    let switcher = FixtureUserSwitcher::new();
    let roles: Vec<&str> = roles.iter().map(String::as_str).collect();
    switcher.switch_user(user, &roles)?;

    let current = switcher
        .current_user()
        .ok_or_else(|| FacetworkError::IllegalState("no current user".to_string()))?;
    Ok(PrincipalReport::from(&current))
}

/// Print the principal after switching.
pub fn cmd_whoami(user: &str, roles: &[String], json_mode: bool) -> Result<(), FacetworkError> {
    let report = whoami(user, roles)?;
    if json_mode {
        print_json(&report)
    } else {
        println!("{}", report.display);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn unserializable_report_is_serialization_error() {
        // JSON object keys must be strings.
        let mut map = BTreeMap::new();
        map.insert((1, 2), "pair");
        assert!(matches!(
            render_json(&map),
            Err(FacetworkError::Serialization(_))
        ));
    }

    #[test]
    fn clock_report_millis_match_calendar() {
        let slot = ClockSlot::new();
        let report = clock_report(&slot, &FacetworkConfig::default()).expect("report");
        assert_eq!(report.state, facetwork_core::ClockState::Locked);

        let calendar = chrono::DateTime::parse_from_rfc3339(&report.calendar).expect("rfc3339");
        assert_eq!(calendar.timestamp_millis(), report.time_millis);
    }

    #[test]
    fn output_path_in_missing_directory_is_rejected() {
        let result = validate_output_path(Path::new("/nonexistent/dir/messages.pot"));
        assert!(matches!(result, Err(FacetworkError::Io(_))));
    }

    #[test]
    fn bare_file_name_resolves_against_cwd() {
        let path = validate_output_path(Path::new("messages.pot")).expect("path");
        assert!(path.ends_with("messages.pot"));
        assert!(path.is_absolute());
    }
}
