//! Serde shapes for rotation input, as produced by the extraction layer.
//!
//! Field names follow the schedule-layer objects of the downstream
//! scheduling API. Nothing here is validated; see
//! [`RotationSpec::from_raw`](super::RotationSpec::from_raw).

use serde::{Deserialize, Serialize};

use super::restriction::RestrictionKind;
use crate::error::ModelResult;

/// A user entry: either a bare name or a `user_reference` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawUser {
    Name(String),
    Reference {
        user_name: String,
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
}

impl RawUser {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Reference { user_name: name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRestriction {
    #[serde(rename = "type")]
    pub kind: RestrictionKind,
    /// `HH:MM:SS` in the layer timezone.
    pub start_time_of_day: String,
    pub duration_seconds: i64,
    /// ISO weekday, 1 = Monday .. 7 = Sunday.
    pub start_day_of_week: i64,
}

const fn default_num_shifts() -> i64 {
    1
}

/// One rotation group ("schedule layer").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRotationSpec {
    pub timezone: String,
    pub users: Vec<RawUser>,
    pub restrictions: Vec<RawRestriction>,
    /// RFC 3339 instant with an explicit offset.
    pub rotation_virtual_start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Cadence: the user changes every `num_shifts` days or weeks.
    #[serde(default = "default_num_shifts")]
    pub num_shifts: i64,
    /// Repeat the first restriction on every weekday.
    #[serde(default)]
    pub everyday: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScheduleConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub timezone: String,
}

/// Accepted layouts of an input document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawScheduleDocument {
    /// `{ "schedule": {...}, "layers": [...] }`
    Schedule {
        #[serde(default)]
        schedule: Option<RawScheduleConfig>,
        layers: Vec<RawRotationSpec>,
    },
    /// A bare list of layers.
    Layers(Vec<RawRotationSpec>),
    /// A single layer.
    Layer(Box<RawRotationSpec>),
}

impl RawScheduleDocument {
    /// ## Summary
    /// Parses a JSON input document.
    ///
    /// ## Errors
    /// Returns `JsonError` if the text matches none of the accepted layouts.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Splits the document into its optional schedule config and layers.
    #[must_use]
    pub fn into_parts(self) -> (Option<RawScheduleConfig>, Vec<RawRotationSpec>) {
        match self {
            Self::Schedule { schedule, layers } => (schedule, layers),
            Self::Layers(layers) => (None, layers),
            Self::Layer(layer) => (None, vec![*layer]),
        }
    }
}
