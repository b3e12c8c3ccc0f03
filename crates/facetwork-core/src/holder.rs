//! # Facet Holder
//!
//! A model element (class or member) and the facets attached to it.
//!
//! Each capability kind maps to a chain of facets ordered oldest first. The
//! last facet of a chain is the *active* one; every earlier facet is the
//! *underlying* facet of the one after it. Attaching never drops a facet, it
//! only pushes a new active facet on top.
//!
//! Chains are plain vectors, so walking `underlying()` always terminates.

use crate::facet::{Facet, FacetRef, NamedFacet};
use crate::{Derivation, FacetKind, FacetworkError, Identifier};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A model element owning one facet chain per capability kind.
#[derive(Debug, Clone)]
pub struct FacetHolder {
    identifier: Identifier,
    chains: BTreeMap<FacetKind, Vec<FacetRef>>,
}

impl FacetHolder {
    /// Create an element with no facets.
    #[must_use]
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            chains: BTreeMap::new(),
        }
    }

    /// The identity of this element.
    #[must_use]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Attach a facet, decorating any active facet of the same kind.
    ///
    /// Returns the chain length for that kind after the attachment.
    /// Fails with `InvalidArgument` if the facet is bound to another element.
    pub fn add_facet(&mut self, facet: impl Facet + 'static) -> Result<usize, FacetworkError> {
        self.add_facet_ref(Arc::new(facet))
    }

    /// Attach an already shared facet. See [`FacetHolder::add_facet`].
    pub fn add_facet_ref(&mut self, facet: FacetRef) -> Result<usize, FacetworkError> {
        if facet.holder() != &self.identifier {
            return Err(FacetworkError::InvalidArgument(format!(
                "{} facet bound to '{}' cannot be attached to '{}'",
                facet.kind(),
                facet.holder(),
                self.identifier
            )));
        }

        let kind = facet.kind();
        let chain = self.chains.entry(kind).or_default();
        chain.push(facet);

        if chain.len() > 1 {
            tracing::debug!(
                holder = %self.identifier,
                kind = %kind,
                depth = chain.len(),
                "facet decorated"
            );
        }
        Ok(chain.len())
    }

    /// The active facet of a kind, if any.
    #[must_use]
    pub fn facet(&self, kind: FacetKind) -> Option<FacetLink<'_>> {
        let (active, below) = self.chains.get(&kind)?.split_last()?;
        Some(FacetLink {
            facet: active,
            below,
        })
    }

    /// Check if a facet of the kind is attached.
    #[must_use]
    pub fn contains(&self, kind: FacetKind) -> bool {
        self.chains.get(&kind).is_some_and(|chain| !chain.is_empty())
    }

    /// Number of facets (active plus underlying) attached for a kind.
    #[must_use]
    pub fn chain_len(&self, kind: FacetKind) -> usize {
        self.chains.get(&kind).map_or(0, Vec::len)
    }

    /// Active facets in kind order.
    pub fn facets(&self) -> impl Iterator<Item = FacetLink<'_>> {
        self.chains.keys().filter_map(|kind| self.facet(*kind))
    }
}

/// A position in a holder chain: one facet plus everything beneath it.
#[derive(Debug, Clone, Copy)]
pub struct FacetLink<'a> {
    facet: &'a FacetRef,
    below: &'a [FacetRef],
}

impl<'a> FacetLink<'a> {
    /// The facet at this position.
    #[must_use]
    pub fn facet(&self) -> &'a dyn Facet {
        &**self.facet
    }

    /// Shared handle to the facet at this position.
    #[must_use]
    pub fn facet_ref(&self) -> &'a FacetRef {
        self.facet
    }

    /// The capability kind of the chain.
    #[must_use]
    pub fn kind(&self) -> FacetKind {
        self.facet.kind()
    }

    /// The owning element.
    #[must_use]
    pub fn holder(&self) -> &'a Identifier {
        self.facet().holder()
    }

    /// Derivation of the facet at this position.
    #[must_use]
    pub fn derivation(&self) -> Derivation {
        self.facet.derivation()
    }

    /// Whether the facet at this position is derived.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.facet.is_derived()
    }

    /// The facet this one decorates, if any.
    #[must_use]
    pub fn underlying(&self) -> Option<FacetLink<'a>> {
        let (facet, below) = self.below.split_last()?;
        Some(FacetLink { facet, below })
    }

    /// Number of facets from this position down to the bottom of the chain.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.below.len() + 1
    }

    /// This link followed by each underlying link, nearest first.
    pub fn chain(&self) -> impl Iterator<Item = FacetLink<'a>> + use<'a> {
        std::iter::successors(Some(*self), FacetLink::underlying)
    }

    /// Ask each facet from here down until one answers.
    ///
    /// This is the delegation rule for optional sub-properties: a facet that
    /// does not define the property returns `None` and the query moves to its
    /// underlying facet.
    pub fn resolve<T>(&self, mut query: impl FnMut(&'a dyn Facet) -> Option<T>) -> Option<T> {
        self.chain().find_map(|link| query(link.facet()))
    }

    /// Named capability of the facet at this position.
    #[must_use]
    pub fn named(&self) -> Option<&'a dyn NamedFacet> {
        self.facet().as_named()
    }

    /// Whether the name must be escaped, delegated down the chain.
    ///
    /// Defaults to `false` when no facet in the chain decides.
    #[must_use]
    pub fn escaped(&self) -> bool {
        self.resolve(|facet| facet.as_named().and_then(|named| named.escaped()))
            .unwrap_or(false)
    }

    /// Translatable text of the facet at this position, if its kind has one.
    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        crate::facet::text_value(self.facet())
    }
}

// =============================================================================
// TESTS
// =============================================================================
