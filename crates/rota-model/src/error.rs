use chrono::{NaiveTime, Weekday};
use thiserror::Error;

/// Reasons a rotation description is rejected before expansion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecViolation {
    #[error("rotation has no users")]
    NoUsers,

    #[error("user at position {0} has a blank name")]
    BlankUser(usize),

    #[error("rotation has no restrictions")]
    NoRestrictions,

    #[error("restriction duration must be positive, got {0} seconds")]
    NonPositiveDuration(i64),

    #[error("restriction duration of {0} seconds is out of range")]
    DurationOutOfRange(i64),

    #[error("{0} is not a valid ISO weekday (1 = Monday .. 7 = Sunday)")]
    InvalidWeekday(i64),

    #[error("{0:?} is not a valid time of day (expected HH:MM:SS)")]
    InvalidTimeOfDay(String),

    #[error("restrictions mix daily and weekly kinds")]
    MixedRestrictionKinds,

    #[error("duplicate restriction on {day} at {start_time}")]
    DuplicateRestriction { day: Weekday, start_time: NaiveTime },

    #[error("cadence must be a positive integer, got {0}")]
    InvalidCadence(i64),

    #[error("{0:?} has no UTC offset")]
    NaiveInstant(String),

    #[error("{0:?} is not an RFC 3339 date-time")]
    MalformedInstant(String),

    #[error("rotation end {end} is before rotation start {start}")]
    EndBeforeStart { start: String, end: String },

    #[error("timezone is empty")]
    EmptyTimezone,

    #[error("{0:?} is not a recognized timezone")]
    UnknownTimezone(String),

    #[error("horizon must not be negative, got {0} days")]
    NegativeHorizon(i64),

    #[error("schedule name must be between 1 and {max} characters, got {len}")]
    ScheduleNameLength { len: usize, max: usize },

    #[error("schedule description must be at most {max} characters, got {len}")]
    ScheduleDescriptionLength { len: usize, max: usize },
}

/// Model-level errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid specification: {0}")]
    InvalidSpecification(#[from] SpecViolation),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    CoreError(#[from] rota_core::error::CoreError),
}

impl ModelError {
    /// Returns the violation when this is an `InvalidSpecification` error.
    #[must_use]
    pub fn violation(&self) -> Option<&SpecViolation> {
        match self {
            Self::InvalidSpecification(violation) => Some(violation),
            _ => None,
        }
    }
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
