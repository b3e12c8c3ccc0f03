//! # Facet Catalog
//!
//! Concrete facets, grouped by capability kind:
//!
//! | Kind | Authored | Derived | Translated |
//! |------|----------|---------|------------|
//! | `Named` | [`NamedFacetAnnotation`] | [`NamedFacetInferred`] | [`NamedFacetTranslated`] |
//! | `DescribedAs` | [`DescribedAsFacetAnnotation`] | | [`DescribedAsFacetTranslated`] |
//! | `Hidden` | [`HiddenFacetAnnotation`] | | |
//!
//! Translated facets are meant to decorate an authored or derived facet of
//! the same kind; see [`Metamodel::apply_translations`](crate::Metamodel::apply_translations).

mod described_as;
mod hidden;
mod named;
mod translated;

pub use described_as::DescribedAsFacetAnnotation;
pub use hidden::HiddenFacetAnnotation;
pub use named::{NamedFacetAnnotation, NamedFacetInferred, natural_name};
pub use translated::{DescribedAsFacetTranslated, NamedFacetTranslated, TranslatedText};
