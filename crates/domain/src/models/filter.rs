//! Filter criteria over the device population.

use std::fmt;
use std::str::FromStr;

use super::device::FilterField;

/// Liveness/location classification of a beacon, based on the time since
/// its most recent events and whether those events resolved to a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    ActiveFound,
    ActiveOnRoute,
    ActiveMissing,
    ArrivedAtDestination,
    Deactivated,
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::ActiveFound => "ActiveFound",
            StatusCategory::ActiveOnRoute => "ActiveOnRoute",
            StatusCategory::ActiveMissing => "ActiveMissing",
            StatusCategory::ArrivedAtDestination => "ArrivedAtDestination",
            StatusCategory::Deactivated => "Deactivated",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ActiveFound" => Ok(StatusCategory::ActiveFound),
            "ActiveOnRoute" => Ok(StatusCategory::ActiveOnRoute),
            "ActiveMissing" => Ok(StatusCategory::ActiveMissing),
            "ArrivedAtDestination" => Ok(StatusCategory::ArrivedAtDestination),
            "Deactivated" => Ok(StatusCategory::Deactivated),
            _ => Err(format!(
                "Invalid status category: {}. Must be one of: ActiveFound, ActiveOnRoute, ActiveMissing, ArrivedAtDestination, Deactivated",
                s
            )),
        }
    }
}

/// What subset of the device registry should be visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterCriterion {
    /// No filtering: the full registry.
    #[default]
    None,
    /// Nothing is visible. Produced for a text filter over an unknown
    /// field: no device carries the field, so no device matches.
    MatchNothing,
    /// Case-folded substring match on one device attribute.
    Text { field: FilterField, value: String },
    /// Exclude devices with an event matching the category (see the
    /// filter engine for the exclusion polarity).
    Status(StatusCategory),
}

impl FilterCriterion {
    /// Builds a text criterion from untyped strings, e.g. values coming
    /// from configuration or a query string.
    ///
    /// Never an error: an empty value means no filtering, and an unknown
    /// field name matches nothing (every device "misses" the field).
    pub fn text(field: &str, value: &str) -> Self {
        if value.is_empty() {
            return FilterCriterion::None;
        }
        match field.parse::<FilterField>() {
            Ok(field) => FilterCriterion::Text {
                field,
                value: value.to_string(),
            },
            Err(_) => FilterCriterion::MatchNothing,
        }
    }

    /// Builds a status criterion from an untyped category name.
    ///
    /// An unknown category matches no event, and under the exclusion
    /// polarity that excludes nothing, so the fallback is no filtering.
    pub fn status(category: &str) -> Self {
        match category.parse::<StatusCategory>() {
            Ok(category) => FilterCriterion::Status(category),
            Err(_) => FilterCriterion::None,
        }
    }
}
