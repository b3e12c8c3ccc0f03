//! Named facets: authored names and names inferred from the identifier.

use crate::facet::{Facet, NamedFacet};
use crate::{Derivation, FacetKind, Identifier};

/// A name authored directly on the element.
#[derive(Debug, Clone)]
pub struct NamedFacetAnnotation {
    holder: Identifier,
    value: String,
    escaped: bool,
}

impl NamedFacetAnnotation {
    /// Create an authored name.
    #[must_use]
    pub fn new(value: impl Into<String>, escaped: bool, holder: Identifier) -> Self {
        Self {
            holder,
            value: value.into(),
            escaped,
        }
    }
}

impl Facet for NamedFacetAnnotation {
    fn kind(&self) -> FacetKind {
        FacetKind::Named
    }

    fn holder(&self) -> &Identifier {
        &self.holder
    }

    fn derivation(&self) -> Derivation {
        Derivation::NotDerived
    }

    fn as_named(&self) -> Option<&dyn NamedFacet> {
        Some(self)
    }
}

impl NamedFacet for NamedFacetAnnotation {
    fn value(&self) -> &str {
        &self.value
    }

    fn escaped(&self) -> Option<bool> {
        Some(self.escaped)
    }
}

/// A name derived from the element's own identifier.
///
/// `orderStatus` becomes `Order Status`; a class `com.example.OrderLine`
/// becomes `Order Line`. Inferred names are always escaped.
#[derive(Debug, Clone)]
pub struct NamedFacetInferred {
    holder: Identifier,
    value: String,
}

impl NamedFacetInferred {
    /// Infer the name of an element from its identifier.
    #[must_use]
    pub fn new(holder: Identifier) -> Self {
        let value = natural_name(holder.simple_name());
        Self { holder, value }
    }
}

impl Facet for NamedFacetInferred {
    fn kind(&self) -> FacetKind {
        FacetKind::Named
    }

    fn holder(&self) -> &Identifier {
        &self.holder
    }

    fn derivation(&self) -> Derivation {
        Derivation::Derived
    }

    fn as_named(&self) -> Option<&dyn NamedFacet> {
        Some(self)
    }
}

impl NamedFacet for NamedFacetInferred {
    fn value(&self) -> &str {
        &self.value
    }

    fn escaped(&self) -> Option<bool> {
        Some(true)
    }
}

/// Turn a camel-case or snake-case identifier into words.
///
/// A word starts at an uppercase letter that follows a lowercase letter or a
/// digit, or at the last capital of an acronym (`HTMLPage` → `HTML Page`).
#[must_use]
pub fn natural_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().map(|c| if c == '_' { ' ' } else { c }).collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
        let next = chars.get(i + 1).copied();

        if c.is_uppercase() {
            let after_lower = prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
            let acronym_end =
                prev.is_some_and(char::is_uppercase) && next.is_some_and(char::is_lowercase);
            if (after_lower || acronym_end) && !out.ends_with(' ') {
                out.push(' ');
            }
        }

        if out.is_empty() || out.ends_with(' ') {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_name_splits_camel_case() {
        assert_eq!(natural_name("orderStatus"), "Order Status");
        assert_eq!(natural_name("OrderLine"), "Order Line");
        assert_eq!(natural_name("HTMLPage"), "HTML Page");
        assert_eq!(natural_name("line2Total"), "Line2 Total");
        assert_eq!(natural_name("ship_date"), "Ship Date");
        assert_eq!(natural_name("x"), "X");
    }

    #[test]
    fn inferred_name_is_derived_and_escaped() {
        let id = Identifier::property("com.example.Order", "orderStatus").expect("id");
        let facet = NamedFacetInferred::new(id);

        assert_eq!(facet.value(), "Order Status");
        assert!(facet.is_derived());
        assert_eq!(facet.escaped(), Some(true));
    }

    #[test]
    fn annotation_is_authored() {
        let id = Identifier::class("com.example.Order").expect("id");
        let facet = NamedFacetAnnotation::new("Purchase Order", false, id);

        assert_eq!(facet.derivation(), Derivation::NotDerived);
        assert_eq!(facet.escaped(), Some(false));
        assert!(facet.as_described_as().is_none());
    }
}
