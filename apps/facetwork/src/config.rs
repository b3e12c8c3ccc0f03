//! # Configuration
//!
//! `facetwork.toml` describes the model elements, their annotated facets, the
//! translation catalog and an optional fixture time:
//!
//! ```toml
//! [translation]
//! mode = "read"
//! locale = "fr-CA"
//!
//! [clock]
//! fixture_time_millis = 1700000000000
//!
//! [[element]]
//! id = "com.example.Order#status"
//! named = "Status"
//! described_as = "Where the order is"
//!
//! [[translation_entry]]
//! locale = "fr"
//! context = "com.example.Order#status"
//! msgid = "Status"
//! msgstr = "Statut"
//! ```
//!
//! `FACETWORK_LOCALE` and `FACETWORK_TRANSLATION_MODE` override the file.

use facetwork_core::{
    CatalogEntry, DescribedAsFacetAnnotation, FacetworkError, HiddenFacetAnnotation, Identifier,
    Locale, Metamodel, NamedFacetAnnotation, TranslationCatalog, TranslationMode,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "facetwork.toml";

/// Environment variable overriding `[translation] locale`.
pub const ENV_LOCALE: &str = "FACETWORK_LOCALE";

/// Environment variable overriding `[translation] mode`.
pub const ENV_TRANSLATION_MODE: &str = "FACETWORK_TRANSLATION_MODE";

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacetworkConfig {
    pub translation: TranslationConfig,
    pub clock: ClockConfig,
    #[serde(rename = "element")]
    pub elements: Vec<ElementConfig>,
    #[serde(rename = "translation_entry")]
    pub translation_entries: Vec<CatalogEntry>,
}

/// `[translation]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslationConfig {
    pub mode: TranslationMode,
    /// Target locale; `en` when unset.
    pub locale: Option<Locale>,
}

impl TranslationConfig {
    /// The configured locale, or `en`.
    pub fn effective_locale(&self) -> Result<Locale, FacetworkError> {
        match &self.locale {
            Some(locale) => Ok(locale.clone()),
            None => Locale::new("en", None),
        }
    }
}

/// `[clock]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Install a fixture clock at this time instead of the system clock.
    pub fixture_time_millis: Option<i64>,
}

/// One `[[element]]`: a model element and its annotated facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementConfig {
    pub id: Identifier,
    #[serde(default)]
    pub named: Option<String>,
    #[serde(default)]
    pub escaped: bool,
    #[serde(default)]
    pub described_as: Option<String>,
    #[serde(default)]
    pub hidden: Option<bool>,
}

// =============================================================================
// LOADING
// =============================================================================

/// Parse configuration text.
pub fn parse(contents: &str) -> Result<FacetworkConfig, FacetworkError> {
    toml::from_str(contents).map_err(|e| FacetworkError::Config(e.to_string()))
}

/// Read and parse a configuration file.
pub fn load(path: &Path) -> Result<FacetworkConfig, FacetworkError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| FacetworkError::Io(format!("failed to read {}: {e}", path.display())))?;
    let config = toml::from_str::<FacetworkConfig>(&contents).map_err(|e| {
        FacetworkError::Config(format!("failed to parse {}: {e}", path.display()))
    })?;
    tracing::debug!(
        path = %path.display(),
        elements = config.elements.len(),
        entries = config.translation_entries.len(),
        "loaded config"
    );
    Ok(config)
}

/// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if present, else
/// defaults; then apply environment overrides.
pub fn resolve(path: Option<&Path>) -> Result<FacetworkConfig, FacetworkError> {
    let mut config = match path {
        Some(path) => load(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load(default_path)?
            } else {
                tracing::debug!("config file not found, using defaults");
                FacetworkConfig::default()
            }
        }
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Apply `FACETWORK_*` overrides from the process environment.
pub fn apply_env_overrides(config: &mut FacetworkConfig) -> Result<(), FacetworkError> {
    apply_env_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply `FACETWORK_*` overrides read through `lookup`.
///
/// Empty values are ignored.
pub fn apply_env_overrides_from(
    config: &mut FacetworkConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), FacetworkError> {
    if let Some(value) = lookup(ENV_LOCALE).filter(|v| !v.trim().is_empty()) {
        let locale = value
            .trim()
            .parse::<Locale>()
            .map_err(|e| FacetworkError::Config(format!("{ENV_LOCALE}: {e}")))?;
        tracing::debug!(locale = %locale, "locale overridden from environment");
        config.translation.locale = Some(locale);
    }

    if let Some(value) = lookup(ENV_TRANSLATION_MODE).filter(|v| !v.trim().is_empty()) {
        let mode = match value.trim().to_ascii_lowercase().as_str() {
            "read" => TranslationMode::Read,
            "write" => TranslationMode::Write,
            other => {
                return Err(FacetworkError::Config(format!(
                    "{ENV_TRANSLATION_MODE}: expected read or write, got {other:?}"
                )));
            }
        };
        tracing::debug!(mode = %mode, "translation mode overridden from environment");
        config.translation.mode = mode;
    }

    Ok(())
}

// =============================================================================
// BUILDING
// =============================================================================

/// Build a metamodel holding every configured element and its annotations.
///
/// Elements listed twice accumulate facets, the later entry decorating the
/// earlier one.
pub fn build_metamodel(config: &FacetworkConfig) -> Result<Metamodel, FacetworkError> {
    let mut metamodel = Metamodel::new();
    for element in &config.elements {
        let id = element.id.clone();
        let holder = metamodel.introduce(id.clone());
        if let Some(named) = &element.named {
            holder.add_facet(NamedFacetAnnotation::new(
                named.clone(),
                element.escaped,
                id.clone(),
            ))?;
        }
        if let Some(described_as) = &element.described_as {
            holder.add_facet(DescribedAsFacetAnnotation::new(
                described_as.clone(),
                id.clone(),
            ))?;
        }
        if let Some(hidden) = element.hidden {
            holder.add_facet(HiddenFacetAnnotation::new(hidden, id))?;
        }
    }
    Ok(metamodel)
}

/// The read-mode catalog of the configured translation entries.
pub fn catalog(config: &FacetworkConfig) -> TranslationCatalog {
    TranslationCatalog::from_entries(config.translation_entries.iter().cloned())
}

// =============================================================================
// TESTS
// =============================================================================
