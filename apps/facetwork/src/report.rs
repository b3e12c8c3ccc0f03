//! # Reports
//!
//! What the commands print, as plain data. Each report renders as text or,
//! with `--json-mode`, as JSON.

use facetwork_core::{
    ClockState, FacetHolder, FacetKind, Locale, Metamodel, TranslationMode, UserMemento,
};
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// DESCRIBE
// =============================================================================

/// Resolved facets of one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementReport {
    pub id: String,
    pub name: Option<String>,
    pub escaped: bool,
    pub description: Option<String>,
    pub hidden: bool,
    /// Chain depth per facet kind that is present.
    pub chains: BTreeMap<String, usize>,
}

impl ElementReport {
    /// Resolve the active facets of `holder`.
    #[must_use]
    pub fn from_holder(holder: &FacetHolder) -> Self {
        let named = holder.facet(FacetKind::Named);
        let chains = FacetKind::ALL
            .into_iter()
            .filter(|kind| holder.contains(*kind))
            .map(|kind| (kind.name().to_string(), holder.chain_len(kind)))
            .collect();

        Self {
            id: holder.identifier().to_string(),
            name: named.and_then(|link| link.text()).map(str::to_string),
            escaped: named.is_some_and(|link| link.escaped()),
            description: holder
                .facet(FacetKind::DescribedAs)
                .and_then(|link| link.text())
                .map(str::to_string),
            hidden: holder
                .facet(FacetKind::Hidden)
                .and_then(|link| link.facet().as_hidden().map(|h| h.hidden()))
                .unwrap_or(false),
            chains,
        }
    }
}

/// Output of `describe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescribeReport {
    pub locale: String,
    pub mode: TranslationMode,
    pub elements: Vec<ElementReport>,
}

impl DescribeReport {
    /// Report every element of `metamodel`, in identifier order.
    #[must_use]
    pub fn new(metamodel: &Metamodel, locale: &Locale, mode: TranslationMode) -> Self {
        Self {
            locale: locale.tag(),
            mode,
            elements: metamodel.holders().map(ElementReport::from_holder).collect(),
        }
    }

    /// Render as human-readable text.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("Locale: {} (mode: {})\n", self.locale, self.mode);
        for element in &self.elements {
            out.push_str(&format!("\n{}\n", element.id));
            if let Some(name) = &element.name {
                let marker = if element.escaped { "" } else { " (unescaped)" };
                out.push_str(&format!("  name:        {}{}\n", name, marker));
            }
            if let Some(description) = &element.description {
                out.push_str(&format!("  description: {}\n", description));
            }
            if element.hidden {
                out.push_str("  hidden\n");
            }
            let chains: Vec<String> = element
                .chains
                .iter()
                .map(|(kind, depth)| format!("{}={}", kind, depth))
                .collect();
            out.push_str(&format!("  chains:      {}\n", chains.join(" ")));
        }
        out
    }
}

// =============================================================================
// EXTRACT
// =============================================================================

/// Output of `extract` in JSON mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    /// Distinct source strings recorded.
    pub strings: usize,
    /// Where the template was written; `None` for stdout.
    pub output: Option<String>,
}

// =============================================================================
// CLOCK
// =============================================================================

/// Output of `clock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockReport {
    pub time_millis: i64,
    /// RFC 3339, local time zone.
    pub calendar: String,
    pub state: ClockState,
    pub fixture: bool,
}

impl ClockReport {
    /// Render as human-readable text.
    #[must_use]
    pub fn to_text(&self) -> String {
        let source = if self.fixture { "fixture" } else { "system" };
        format!(
            "Time:     {} ms\nCalendar: {}\nSource:   {}\nState:    {}\n",
            self.time_millis, self.calendar, source, self.state
        )
    }
}

// =============================================================================
// WHOAMI
// =============================================================================

/// Output of `whoami`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalReport {
    pub name: String,
    pub roles: Vec<String>,
    pub display: String,
}

impl From<&UserMemento> for PrincipalReport {
    fn from(user: &UserMemento) -> Self {
        Self {
            name: user.name().to_string(),
            roles: user.roles().iter().map(|r| r.name().to_string()).collect(),
            display: user.to_string(),
        }
    }
}
