//! Hidden facets authored on the element.

use crate::facet::{Facet, HiddenFacet};
use crate::{Derivation, FacetKind, Identifier};

/// Visibility authored directly on the element.
#[derive(Debug, Clone)]
pub struct HiddenFacetAnnotation {
    holder: Identifier,
    hidden: bool,
}

impl HiddenFacetAnnotation {
    /// Create an authored visibility flag.
    #[must_use]
    pub fn new(hidden: bool, holder: Identifier) -> Self {
        Self { holder, hidden }
    }
}

impl Facet for HiddenFacetAnnotation {
    fn kind(&self) -> FacetKind {
        FacetKind::Hidden
    }

    fn holder(&self) -> &Identifier {
        &self.holder
    }

    fn derivation(&self) -> Derivation {
        Derivation::NotDerived
    }

    fn as_hidden(&self) -> Option<&dyn HiddenFacet> {
        Some(self)
    }
}

impl HiddenFacet for HiddenFacetAnnotation {
    fn hidden(&self) -> bool {
        self.hidden
    }
}
