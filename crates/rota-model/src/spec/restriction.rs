//! Recurring weekly on-call windows.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use rota_core::constants::{SECONDS_PER_DAY, SECONDS_PER_WEEK};

use crate::error::{ModelResult, SpecViolation};

/// How often the on-call user hands off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestrictionKind {
    /// Hand off once per day that has at least one window.
    #[serde(rename = "daily_restriction")]
    Daily,
    /// Hand off once per calendar week that has at least one window.
    #[serde(rename = "weekly_restriction")]
    Weekly,
}

impl RestrictionKind {
    /// Returns the wire name for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily_restriction",
            Self::Weekly => "weekly_restriction",
        }
    }

    /// Length of one rotation turn in seconds.
    #[must_use]
    pub const fn turn_length_seconds(self) -> u32 {
        match self {
            Self::Daily => SECONDS_PER_DAY,
            Self::Weekly => SECONDS_PER_WEEK,
        }
    }

    /// Length of one rotation turn.
    #[must_use]
    pub fn turn_length(self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.turn_length_seconds()))
    }
}

impl std::fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One on-call window that repeats every week on the same weekday.
///
/// Construction validates the weekday and duration, so a `Restriction` is
/// always usable by the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Restriction {
    day: Weekday,
    start_time: NaiveTime,
    duration_seconds: u32,
    kind: RestrictionKind,
}

impl Restriction {
    /// ## Summary
    /// Creates a restriction from an ISO weekday (1 = Monday .. 7 = Sunday).
    ///
    /// ## Errors
    /// Returns `InvalidWeekday` for a weekday outside 1..=7,
    /// `NonPositiveDuration` for a duration of zero or less and
    /// `DurationOutOfRange` for durations that do not fit in 32 bits.
    pub fn new(
        iso_day: i64,
        start_time: NaiveTime,
        duration_seconds: i64,
        kind: RestrictionKind,
    ) -> ModelResult<Self> {
        let day = iso_weekday(iso_day).ok_or(SpecViolation::InvalidWeekday(iso_day))?;
        if duration_seconds <= 0 {
            return Err(SpecViolation::NonPositiveDuration(duration_seconds).into());
        }
        let duration_seconds = u32::try_from(duration_seconds)
            .map_err(|_err| SpecViolation::DurationOutOfRange(duration_seconds))?;

        Ok(Self {
            day,
            start_time,
            duration_seconds,
            kind,
        })
    }

    /// ## Summary
    /// Creates a restriction from its wire form, with the start time as
    /// `HH:MM:SS`.
    ///
    /// ## Errors
    /// Returns `InvalidTimeOfDay` if the time does not parse, otherwise the
    /// same errors as [`Restriction::new`].
    pub fn parse(
        iso_day: i64,
        start_time_of_day: &str,
        duration_seconds: i64,
        kind: RestrictionKind,
    ) -> ModelResult<Self> {
        let start_time = parse_time_of_day(start_time_of_day)?;
        Self::new(iso_day, start_time, duration_seconds, kind)
    }

    #[must_use]
    pub const fn day(&self) -> Weekday {
        self.day
    }

    /// ISO weekday number, 1 = Monday .. 7 = Sunday.
    #[must_use]
    pub fn iso_day(&self) -> u32 {
        self.day.number_from_monday()
    }

    #[must_use]
    pub const fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    #[must_use]
    pub const fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.duration_seconds))
    }

    #[must_use]
    pub const fn kind(&self) -> RestrictionKind {
        self.kind
    }

    /// Returns a copy of this restriction moved to another weekday.
    #[must_use]
    pub const fn on_day(self, day: Weekday) -> Self {
        Self { day, ..self }
    }

    /// Whether this window opens on `date`.
    #[must_use]
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        date.weekday() == self.day
    }
}

/// Maps an ISO weekday number to a `Weekday`.
#[must_use]
pub fn iso_weekday(iso_day: i64) -> Option<Weekday> {
    match iso_day {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime, SpecViolation> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M:%S")
        .map_err(|_err| SpecViolation::InvalidTimeOfDay(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_restriction() {
        let restriction =
            Restriction::parse(4, "09:00:00", 10_800, RestrictionKind::Daily).expect("valid");

        assert_eq!(restriction.day(), Weekday::Thu);
        assert_eq!(restriction.iso_day(), 4);
        assert_eq!(
            restriction.start_time(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(restriction.duration(), TimeDelta::hours(3));
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let err = Restriction::parse(1, "09:00:00", 0, RestrictionKind::Daily).unwrap_err();
        assert_eq!(err.violation(), Some(&SpecViolation::NonPositiveDuration(0)));
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let err = Restriction::parse(1, "09:00:00", -60, RestrictionKind::Weekly).unwrap_err();
        assert_eq!(err.violation(), Some(&SpecViolation::NonPositiveDuration(-60)));
    }

    #[test]
    fn test_weekday_out_of_range() {
        for day in [0, 8, -1] {
            let err = Restriction::parse(day, "09:00:00", 60, RestrictionKind::Daily).unwrap_err();
            assert_eq!(err.violation(), Some(&SpecViolation::InvalidWeekday(day)));
        }
    }

    #[test]
    fn test_malformed_time_of_day() {
        for time in ["9am", "24:00:00", "12:61:00", ""] {
            let err = Restriction::parse(1, time, 60, RestrictionKind::Daily).unwrap_err();
            assert!(matches!(
                err.violation(),
                Some(SpecViolation::InvalidTimeOfDay(_))
            ));
        }
    }

    #[test]
    fn test_turn_length() {
        assert_eq!(RestrictionKind::Daily.turn_length_seconds(), 86_400);
        assert_eq!(RestrictionKind::Weekly.turn_length(), TimeDelta::weeks(1));
    }

    #[test]
    fn test_kind_wire_names() {
        let kind: RestrictionKind =
            serde_json::from_str("\"weekly_restriction\"").expect("known kind");
        assert_eq!(kind, RestrictionKind::Weekly);
        assert_eq!(
            serde_json::to_string(&RestrictionKind::Daily).expect("serializes"),
            "\"daily_restriction\""
        );
    }
}
