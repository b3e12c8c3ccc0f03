//! # Facet Contract
//!
//! A facet is one behavioral capability bound to exactly one model element.
//!
//! Facets never point at the facet they decorate. The owning
//! [`FacetHolder`](crate::holder::FacetHolder) keeps one chain per
//! [`FacetKind`] and hands out [`FacetLink`](crate::holder::FacetLink)s, which
//! is where `underlying()` and delegated queries live.
//!
//! Capability-specific behavior is reached through the `as_*` accessors
//! rather than by downcasting: a facet of kind [`FacetKind::Named`] answers
//! [`Facet::as_named`], and so on.

use crate::{Derivation, FacetKind, Identifier};
use std::fmt;
use std::sync::Arc;

/// Shared handle to a facet stored in a holder chain.
pub type FacetRef = Arc<dyn Facet>;

/// The base contract every facet implements.
///
/// Facets must be `Send + Sync`: a built metamodel is read from any thread.
pub trait Facet: Send + Sync + fmt::Debug {
    /// The capability contract this facet implements.
    fn kind(&self) -> FacetKind;

    /// The element this facet is bound to.
    fn holder(&self) -> &Identifier;

    /// Whether this facet was authored or derived.
    fn derivation(&self) -> Derivation;

    /// Shorthand for `derivation().is_derived()`.
    fn is_derived(&self) -> bool {
        self.derivation().is_derived()
    }

    /// Named capability, if this facet provides it.
    fn as_named(&self) -> Option<&dyn NamedFacet> {
        None
    }

    /// Described-as capability, if this facet provides it.
    fn as_described_as(&self) -> Option<&dyn DescribedAsFacet> {
        None
    }

    /// Hidden capability, if this facet provides it.
    fn as_hidden(&self) -> Option<&dyn HiddenFacet> {
        None
    }
}

/// Display name of an element.
pub trait NamedFacet: Facet {
    /// The name.
    fn value(&self) -> &str;

    /// Whether the name must be HTML-escaped when rendered.
    ///
    /// `None` means this facet does not decide; the decision is delegated
    /// down the chain (see [`FacetLink::escaped`](crate::holder::FacetLink::escaped)).
    fn escaped(&self) -> Option<bool>;
}

/// Longer description of an element.
pub trait DescribedAsFacet: Facet {
    /// The description.
    fn value(&self) -> &str;
}

/// Visibility of an element.
pub trait HiddenFacet: Facet {
    /// Whether the element is hidden.
    fn hidden(&self) -> bool;
}

/// Extract the translatable text of a facet, if its kind carries one.
#[must_use]
pub fn text_value(facet: &dyn Facet) -> Option<&str> {
    match facet.kind() {
        FacetKind::Named => facet.as_named().map(|named| named.value()),
        FacetKind::DescribedAs => facet.as_described_as().map(|described| described.value()),
        FacetKind::Hidden => None,
    }
}
