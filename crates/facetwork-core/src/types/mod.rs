//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the Facetwork metamodel:
//! - Model element identity (`Identifier`, `Member`)
//! - Capability kinds and derivation (`FacetKind`, `Derivation`)
//! - Locale value (`Locale`)
//! - Error types (`FacetworkError`)
//!
//! ## Ordering Guarantees
//!
//! `Identifier` and `FacetKind` implement `Ord` so that registries keyed by
//! them (`BTreeMap`) iterate in a stable order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// MODEL ELEMENT IDENTITY
// =============================================================================

/// The member part of an [`Identifier`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Member {
    /// A property or collection, rendered `Class#name`.
    Property(String),
    /// An action, rendered `Class#name()`.
    Action(String),
}

impl Member {
    /// Get the member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Member::Property(name) | Member::Action(name) => name,
        }
    }
}

/// Stable identity of a model element (a class or one of its members).
///
/// The textual form (`com.example.Order`, `com.example.Order#status`,
/// `com.example.Order#ship()`) doubles as the translation context of the
/// element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    class_name: String,
    member: Option<Member>,
}

impl Identifier {
    /// Identify a class.
    pub fn class(class_name: impl Into<String>) -> Result<Self, FacetworkError> {
        let class_name = validate_class_name(class_name.into())?;
        Ok(Self {
            class_name,
            member: None,
        })
    }

    /// Identify a property of a class.
    pub fn property(
        class_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, FacetworkError> {
        let class_name = validate_class_name(class_name.into())?;
        let name = validate_member_name(name.into())?;
        Ok(Self {
            class_name,
            member: Some(Member::Property(name)),
        })
    }

    /// Identify an action of a class.
    pub fn action(
        class_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, FacetworkError> {
        let class_name = validate_class_name(class_name.into())?;
        let name = validate_member_name(name.into())?;
        Ok(Self {
            class_name,
            member: Some(Member::Action(name)),
        })
    }

    /// Get the fully qualified class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Get the member, if this identifies a member rather than a class.
    #[must_use]
    pub fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }

    /// Check if this identifies a class.
    #[must_use]
    pub fn is_class(&self) -> bool {
        self.member.is_none()
    }

    /// The unqualified name: the member name, or the last segment of the
    /// class name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        match &self.member {
            Some(member) => member.name(),
            None => self
                .class_name
                .rsplit('.')
                .next()
                .unwrap_or(&self.class_name),
        }
    }

    /// The translation context for this element.
    #[must_use]
    pub fn context(&self) -> String {
        self.to_string()
    }
}

fn validate_class_name(class_name: String) -> Result<String, FacetworkError> {
    if class_name.is_empty() || class_name.contains('#') {
        return Err(FacetworkError::InvalidArgument(format!(
            "invalid class name '{}'",
            class_name
        )));
    }
    Ok(class_name)
}

fn validate_member_name(name: String) -> Result<String, FacetworkError> {
    if name.is_empty() || name.contains(['#', '(', ')']) {
        return Err(FacetworkError::InvalidArgument(format!(
            "invalid member name '{}'",
            name
        )));
    }
    Ok(name)
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            None => write!(f, "{}", self.class_name),
            Some(Member::Property(name)) => write!(f, "{}#{}", self.class_name, name),
            Some(Member::Action(name)) => write!(f, "{}#{}()", self.class_name, name),
        }
    }
}

impl FromStr for Identifier {
    type Err = FacetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('#') {
            None => Self::class(s),
            Some((class_name, member)) => match member.strip_suffix("()") {
                Some(action) => Self::action(class_name, action),
                None => Self::property(class_name, member),
            },
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = FacetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.to_string()
    }
}

// =============================================================================
// CAPABILITY KINDS
// =============================================================================

/// The capability contract a facet implements.
///
/// A holder keeps at most one active facet per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    /// Display name of the element.
    Named,
    /// Longer description of the element.
    DescribedAs,
    /// Visibility of the element.
    Hidden,
}

impl FacetKind {
    /// Every capability kind, in registry order.
    pub const ALL: [FacetKind; 3] = [FacetKind::Named, FacetKind::DescribedAs, FacetKind::Hidden];

    /// Kinds whose values are translatable text.
    pub const TRANSLATABLE: [FacetKind; 2] = [FacetKind::Named, FacetKind::DescribedAs];

    /// Get the kind name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FacetKind::Named => "named",
            FacetKind::DescribedAs => "described_as",
            FacetKind::Hidden => "hidden",
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a facet was authored directly or computed from something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    /// Authored directly (annotation, layout, translation).
    NotDerived,
    /// Computed from another facet or from the element itself.
    Derived,
}

impl Derivation {
    /// Check if this is [`Derivation::Derived`].
    #[must_use]
    pub fn is_derived(&self) -> bool {
        matches!(self, Derivation::Derived)
    }
}

// =============================================================================
// LOCALE
// =============================================================================

/// A language with an optional region, e.g. `en` or `en-US`.
///
/// Parsing accepts `-` or `_` as separator; the language is lowercased and
/// the region uppercased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Create a locale from a language and optional region.
    pub fn new(language: &str, region: Option<&str>) -> Result<Self, FacetworkError> {
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FacetworkError::InvalidArgument(format!(
                "invalid locale language '{}'",
                language
            )));
        }
        let region = match region {
            Some(r) if r.is_empty() || !r.chars().all(|c| c.is_ascii_alphanumeric()) => {
                return Err(FacetworkError::InvalidArgument(format!(
                    "invalid locale region '{}'",
                    r
                )));
            }
            Some(r) => Some(r.to_ascii_uppercase()),
            None => None,
        };
        Ok(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }

    /// Get the language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get the region code, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The same locale with the region dropped.
    #[must_use]
    pub fn language_only(&self) -> Locale {
        Locale {
            language: self.language.clone(),
            region: None,
        }
    }

    /// The tag form, e.g. `en-US`.
    #[must_use]
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = FacetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(['-', '_']) {
            Some((language, region)) => Self::new(language, Some(region)),
            None => Self::new(s, None),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = FacetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.to_string()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Facetwork metamodel.
///
/// - No silent failures
/// - Use `Result<T, FacetworkError>` for fallible operations
/// - Every variant is a fail-fast contract violation; nothing is retried
#[derive(Debug, Error)]
pub enum FacetworkError {
    /// A required argument was missing, empty or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was invoked in a state that does not allow it.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// A locked process-wide slot was asked to change.
    #[error("Configuration conflict: {0}")]
    ConfigurationConflict(String),

    /// Configuration could not be parsed or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// A report or value could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// =============================================================================
// TESTS
// =============================================================================
