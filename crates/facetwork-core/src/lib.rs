//! # facetwork-core
//!
//! The facet-composition metamodel for Facetwork - THE METAMODEL.
//!
//! Model elements (classes and their members) carry *facets*: small
//! capability objects that answer questions such as "what is this called",
//! "how is it described", "is it hidden". Facets are layered: attaching a
//! facet of a kind that is already present decorates the existing one, which
//! stays reachable underneath.
//!
//! ## Layers
//!
//! - `types`: identifiers, capability kinds, locale, errors
//! - `facet` / `holder` / `metamodel`: the facet contract and decoration chains
//! - `facets`: the concrete facet catalog, including translated facets
//! - `i18n`: translation service contracts, read catalog, write recorder
//! - `clock`: the process clock slot and its time sources
//! - `security`: user and role value objects
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no file I/O
//! - Every fallible operation returns `Result<_, FacetworkError>`
//! - Shared state is guarded (`Mutex`, `OnceLock`); nothing needs `unsafe`

// =============================================================================
// MODULES
// =============================================================================

pub mod clock;
pub mod facet;
pub mod facets;
pub mod holder;
pub mod i18n;
pub mod metamodel;
pub mod security;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Derivation, FacetKind, FacetworkError, Identifier, Locale, Member};

// =============================================================================
// RE-EXPORTS: Facets & Metamodel
// =============================================================================

pub use facet::{DescribedAsFacet, Facet, FacetRef, HiddenFacet, NamedFacet};
pub use facets::{
    DescribedAsFacetAnnotation, DescribedAsFacetTranslated, HiddenFacetAnnotation,
    NamedFacetAnnotation, NamedFacetInferred, NamedFacetTranslated, TranslatedText,
};
pub use holder::{FacetHolder, FacetLink};
pub use metamodel::Metamodel;

// =============================================================================
// RE-EXPORTS: Translation
// =============================================================================

pub use i18n::{
    CatalogEntry, Evaluation, FixedLocaleProvider, LocaleProvider, TranslationCatalog,
    TranslationMode, TranslationRecorder, TranslationService,
};

// =============================================================================
// RE-EXPORTS: Clock & Security
// =============================================================================

pub use clock::{ClockSlot, ClockState, FixtureClock, SystemClock, TimeSource, process_clock};
pub use security::{FixtureUserSwitcher, RoleMemento, SwitchUserService, UserMemento};
