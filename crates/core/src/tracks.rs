//! Track kinds and the custom-name rule.
//!
//! A track is a named turn-counter within a relationship. The name is one
//! of a fixed enumeration; the `custom` kind carries a free-form label.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The fixed set of things a pair can keep score on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Coffee,
    Lunch,
    Beer,
    Custom,
}

impl TrackKind {
    /// Canonical lowercase name as stored in the `tracks.name` column.
    pub fn as_str(self) -> &'static str {
        match self {
            TrackKind::Coffee => "coffee",
            TrackKind::Lunch => "lunch",
            TrackKind::Beer => "beer",
            TrackKind::Custom => "custom",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coffee" => Ok(TrackKind::Coffee),
            "lunch" => Ok(TrackKind::Lunch),
            "beer" => Ok(TrackKind::Beer),
            "custom" => Ok(TrackKind::Custom),
            other => Err(CoreError::Validation(format!(
                "Invalid track name '{other}'. Must be coffee, lunch, beer, or custom"
            ))),
        }
    }
}

/// Normalize the optional custom label for a given kind.
///
/// Custom tracks require a non-empty label; for the fixed kinds any
/// submitted label is discarded rather than rejected.
pub fn normalize_custom_name(
    kind: TrackKind,
    custom_name: Option<&str>,
) -> Result<Option<String>, CoreError> {
    match kind {
        TrackKind::Custom => match custom_name.map(str::trim) {
            Some(label) if !label.is_empty() => Ok(Some(label.to_string())),
            _ => Err(CoreError::Validation(
                "custom_name required for custom tracks".to_string(),
            )),
        },
        _ => Ok(None),
    }
}
