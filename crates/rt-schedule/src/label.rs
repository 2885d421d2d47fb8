//! Destination label composition.
//!
//! Terminal names may hold several destinations joined by a separator (a
//! branching line shows every branch end).  Light-rail routes show their
//! route number in front of each one:
//!
//! ```text
//! route 507, terminal "Tuen Mun|Tin King"  →  "507 Tuen Mun|507 Tin King"
//! heavy rail, terminal "Tuen Mun|Tin King" →  "Tuen Mun|Tin King"
//! ```

use crate::{Route, Station};

/// Turns a route and its terminal station into the label passengers see.
pub trait LabelPolicy: Send + Sync {
    fn destination(&self, route: &Route, terminal: &Station) -> String;
}

/// Prefix every destination component with the route number on light-rail
/// routes; use the terminal name unchanged otherwise.
#[derive(Clone, Debug)]
pub struct RouteLabelPolicy {
    separator: String,
}

impl Default for RouteLabelPolicy {
    fn default() -> Self {
        Self::new("|")
    }
}

impl RouteLabelPolicy {
    pub fn new(separator: impl Into<String>) -> Self {
        Self { separator: separator.into() }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl LabelPolicy for RouteLabelPolicy {
    fn destination(&self, route: &Route, terminal: &Station) -> String {
        if !route.light_rail {
            return terminal.name.clone();
        }
        let prefix = if route.route_number.is_empty() {
            String::new()
        } else {
            format!("{} ", route.route_number)
        };
        terminal
            .name
            .split(self.separator.as_str())
            .map(|part| format!("{prefix}{part}"))
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

/// Always the bare terminal name.
pub struct PlainLabelPolicy;

impl LabelPolicy for PlainLabelPolicy {
    #[inline]
    fn destination(&self, _route: &Route, terminal: &Station) -> String {
        terminal.name.clone()
    }
}
