use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Recognized facet names. Anything else in a [`FilterState`] is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FilterCategory {
    Role,
    Location,
    Experience,
    Availability,
    Skills,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::Role,
        FilterCategory::Location,
        FilterCategory::Experience,
        FilterCategory::Availability,
        FilterCategory::Skills,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Role" => Some(Self::Role),
            "Location" => Some(Self::Location),
            "Experience" => Some(Self::Experience),
            "Availability" => Some(Self::Availability),
            "Skills" => Some(Self::Skills),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterCategory::Role => "Role",
            FilterCategory::Location => "Location",
            FilterCategory::Experience => "Experience",
            FilterCategory::Availability => "Availability",
            FilterCategory::Skills => "Skills",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selected option values per category name. Empty or absent lists impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    selections: BTreeMap<String, Vec<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: impl Into<String>, values: &[&str]) -> Self {
        self.select(category, values.iter().map(|value| value.to_string()));
        self
    }

    /// Replaces the selection for one category.
    pub fn select<I>(&mut self, category: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.selections
            .insert(category.into(), values.into_iter().collect());
    }

    /// Adds the value if absent, removes it if present.
    pub fn toggle(&mut self, category: &str, value: &str) {
        let values = self.selections.entry(category.to_string()).or_default();
        if let Some(position) = values.iter().position(|existing| existing == value) {
            values.remove(position);
        } else {
            values.push(value.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn values(&self, category: &str) -> &[String] {
        self.selections
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Categories with a non-empty selection, recognized or not.
    pub fn active(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.selections
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }
}

impl FromIterator<(String, Vec<String>)> for FilterState {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            selections: iter.into_iter().collect(),
        }
    }
}

/// Parsed `"min-max"` experience token. Missing or non-numeric sides mean "no bound".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExperienceRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl ExperienceRange {
    pub fn parse(token: &str) -> Self {
        let mut parts = token.split('-');
        let min = parts.next().and_then(parse_bound);
        // A zero upper bound reads as "open-ended", matching tokens such as "10-0".
        let max = parts.next().and_then(parse_bound).filter(|max| *max > 0);
        Self { min, max }
    }

    pub fn contains(&self, years: u32) -> bool {
        self.min.map_or(true, |min| years >= min) && self.max.map_or(true, |max| years <= max)
    }
}

fn parse_bound(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
