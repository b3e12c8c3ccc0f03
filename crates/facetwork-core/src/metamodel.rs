//! # Metamodel Registry
//!
//! The set of model elements known to the framework, keyed by identifier.
//!
//! Building a metamodel is a sequence of passes over the registry:
//! 1. authored facets are attached while elements are introduced
//! 2. [`Metamodel::infer_names`] fills in names nobody authored
//! 3. [`Metamodel::apply_translations`] decorates every translatable facet
//!
//! Each pass decorates rather than replaces, so earlier facets stay reachable
//! through [`FacetLink::underlying`].

use crate::facet::{Facet, FacetRef};
use crate::facets::{DescribedAsFacetTranslated, NamedFacetInferred, NamedFacetTranslated};
use crate::holder::{FacetHolder, FacetLink};
use crate::i18n::{LocaleProvider, TranslationService};
use crate::{FacetKind, FacetworkError, Identifier};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of model elements.
#[derive(Debug, Clone, Default)]
pub struct Metamodel {
    holders: BTreeMap<Identifier, FacetHolder>,
}

impl Metamodel {
    /// Create an empty metamodel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the element with this identifier.
    pub fn introduce(&mut self, identifier: Identifier) -> &mut FacetHolder {
        self.holders
            .entry(identifier.clone())
            .or_insert_with(|| FacetHolder::new(identifier))
    }

    /// Attach a facet to the element it is bound to, introducing it if needed.
    pub fn add_facet(&mut self, facet: impl Facet + 'static) -> Result<usize, FacetworkError> {
        self.add_facet_ref(Arc::new(facet))
    }

    /// Attach a shared facet. See [`Metamodel::add_facet`].
    pub fn add_facet_ref(&mut self, facet: FacetRef) -> Result<usize, FacetworkError> {
        self.introduce(facet.holder().clone()).add_facet_ref(facet)
    }

    /// Look up an element.
    #[must_use]
    pub fn holder(&self, identifier: &Identifier) -> Option<&FacetHolder> {
        self.holders.get(identifier)
    }

    /// The active facet of a kind on an element.
    #[must_use]
    pub fn facet(&self, identifier: &Identifier, kind: FacetKind) -> Option<FacetLink<'_>> {
        self.holders.get(identifier)?.facet(kind)
    }

    /// All elements in identifier order.
    pub fn holders(&self) -> impl Iterator<Item = &FacetHolder> {
        self.holders.values()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    /// Check if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// Attach an inferred name to every element that has no name yet.
    ///
    /// Returns the number of facets attached.
    pub fn infer_names(&mut self) -> Result<usize, FacetworkError> {
        let mut attached = 0;
        for holder in self.holders.values_mut() {
            if !holder.contains(FacetKind::Named) {
                holder.add_facet(NamedFacetInferred::new(holder.identifier().clone()))?;
                attached += 1;
            }
        }
        Ok(attached)
    }

    /// Decorate every named and described-as facet with a translated facet.
    ///
    /// The context of each translation is the element identifier and the
    /// source text is the value of the facet being decorated. In write mode
    /// every string reaches the service before this returns.
    ///
    /// Returns the number of facets attached.
    pub fn apply_translations(
        &mut self,
        service: Arc<dyn TranslationService>,
        locale_provider: Arc<dyn LocaleProvider>,
    ) -> Result<usize, FacetworkError> {
        let mode = service.mode();
        let mut attached = 0;

        for holder in self.holders.values_mut() {
            let pending: Vec<(FacetKind, String)> = FacetKind::TRANSLATABLE
                .into_iter()
                .filter_map(|kind| {
                    let original = holder.facet(kind)?.text()?.to_string();
                    Some((kind, original))
                })
                .collect();

            let context = holder.identifier().context();
            for (kind, original) in pending {
                let facet: FacetRef = match kind {
                    FacetKind::Named => Arc::new(NamedFacetTranslated::new(
                        context.clone(),
                        original,
                        Arc::clone(&service),
                        Arc::clone(&locale_provider),
                        holder.identifier().clone(),
                    )),
                    FacetKind::DescribedAs => Arc::new(DescribedAsFacetTranslated::new(
                        context.clone(),
                        original,
                        Arc::clone(&service),
                        Arc::clone(&locale_provider),
                        holder.identifier().clone(),
                    )),
                    FacetKind::Hidden => continue,
                };
                holder.add_facet_ref(facet)?;
                attached += 1;
            }
        }

        tracing::info!(mode = %mode, attached, "translations applied");
        Ok(attached)
    }
}

// =============================================================================
// TESTS
// =============================================================================
