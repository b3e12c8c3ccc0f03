//! Described-as facets authored on the element.

use crate::facet::{DescribedAsFacet, Facet};
use crate::{Derivation, FacetKind, Identifier};

/// A description authored directly on the element.
#[derive(Debug, Clone)]
pub struct DescribedAsFacetAnnotation {
    holder: Identifier,
    value: String,
}

impl DescribedAsFacetAnnotation {
    /// Create an authored description.
    #[must_use]
    pub fn new(value: impl Into<String>, holder: Identifier) -> Self {
        Self {
            holder,
            value: value.into(),
        }
    }
}

impl Facet for DescribedAsFacetAnnotation {
    fn kind(&self) -> FacetKind {
        FacetKind::DescribedAs
    }

    fn holder(&self) -> &Identifier {
        &self.holder
    }

    fn derivation(&self) -> Derivation {
        Derivation::NotDerived
    }

    fn as_described_as(&self) -> Option<&dyn DescribedAsFacet> {
        Some(self)
    }
}

impl DescribedAsFacet for DescribedAsFacetAnnotation {
    fn value(&self) -> &str {
        &self.value
    }
}
