//! Partition locations into display sections keyed by their status label.
//!
//! The section key is the raw label with only its first character
//! uppercased. Everything after index 0 passes through untouched, so `"open"`
//! and `"OPEN"` end up in different sections (`"Open"` and `"OPEN"`).
//! Sections appear in the order their key is first seen; locations keep
//! response order within a section.

use std::collections::HashMap;

use crate::types::Location;

/// Section key used when the upstream sends an empty label.
pub const FALLBACK_LABEL: &str = "Unknown";

/// Derive the section key for a raw status label.
///
/// ```
/// use dining_core::format_label;
///
/// assert_eq!(format_label("open"), "Open");
/// assert_eq!(format_label("oPEN"), "OPEN");
/// assert_eq!(format_label(""), "Unknown");
/// ```
#[must_use]
pub fn format_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => FALLBACK_LABEL.to_string(),
    }
}

/// One display section: a formatted label and its locations.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGroup<'a> {
    pub label: String,
    pub locations: Vec<&'a Location>,
}

/// Ordered mapping from formatted label to locations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedLocations<'a> {
    groups: Vec<LabelGroup<'a>>,
}

impl<'a> GroupedLocations<'a> {
    #[must_use]
    pub fn groups(&self) -> &[LabelGroup<'a>] {
        &self.groups
    }

    /// Section keys in display order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }

    /// Locations filed under `label`, if that section exists.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&[&'a Location]> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.locations.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of locations across every section.
    #[must_use]
    pub fn location_count(&self) -> usize {
        self.groups.iter().map(|g| g.locations.len()).sum()
    }
}

/// Group `locations` by formatted label in a single pass.
#[must_use]
pub fn group_by_label(locations: &[Location]) -> GroupedLocations<'_> {
    let mut groups: Vec<LabelGroup<'_>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for location in locations {
        let label = format_label(&location.status.label);
        if let Some(&slot) = index.get(&label) {
            groups[slot].locations.push(location);
        } else {
            index.insert(label.clone(), groups.len());
            groups.push(LabelGroup {
                label,
                locations: vec![location],
            });
        }
    }

    GroupedLocations { groups }
}
