//! Map location status to what a list row shows.

use crate::types::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Check,
    XMark,
    Warning,
}

impl Symbol {
    /// Single-glyph terminal rendering.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Check => "\u{2714}",
            Symbol::XMark => "\u{2718}",
            Symbol::Warning => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Green,
    Red,
    Orange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIcon {
    pub symbol: Symbol,
    pub tint: Tint,
}

/// Icon for an upstream colour name.
///
/// Matching is exact. Anything other than `"green"` or `"red"`, including
/// colours the upstream adds later, renders as an orange warning.
#[must_use]
pub fn icon_for(color_name: &str) -> StatusIcon {
    match color_name {
        "green" => StatusIcon {
            symbol: Symbol::Check,
            tint: Tint::Green,
        },
        "red" => StatusIcon {
            symbol: Symbol::XMark,
            tint: Tint::Red,
        },
        _ => StatusIcon {
            symbol: Symbol::Warning,
            tint: Tint::Orange,
        },
    }
}

#[must_use]
pub fn title(location: &Location) -> &str {
    &location.name
}

#[must_use]
pub fn subtitle(location: &Location) -> &str {
    &location.status.message
}
