//! Concrete on-call shifts produced by expanding a rotation.

use chrono::{DateTime, FixedOffset, TimeDelta};
use chrono_tz::Tz;
use serde::Serialize;

use crate::spec::Restriction;

/// One dated occurrence of a restriction, assigned to one user.
///
/// `end` is always strictly after `start`. Both carry their timezone, so a
/// shift can be translated to any wire format without extra context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftInstance {
    user: String,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl ShiftInstance {
    /// Creates the shift `restriction` produces when it opens at `start`.
    #[must_use]
    pub fn for_restriction(
        user: impl Into<String>,
        start: DateTime<Tz>,
        restriction: &Restriction,
    ) -> Self {
        Self {
            user: user.into(),
            start,
            end: start + restriction.duration(),
        }
    }

    /// Creates a shift from explicit bounds. Returns `None` unless
    /// `end > start`.
    #[must_use]
    pub fn try_new(user: impl Into<String>, start: DateTime<Tz>, end: DateTime<Tz>) -> Option<Self> {
        (end > start).then(|| Self {
            user: user.into(),
            start,
            end,
        })
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Same shift seen from another timezone. The instants do not change.
    #[must_use]
    pub fn with_timezone(&self, tz: Tz) -> Self {
        Self {
            user: self.user.clone(),
            start: self.start.with_timezone(&tz),
            end: self.end.with_timezone(&tz),
        }
    }

    /// Serializable projection of this shift.
    #[must_use]
    pub fn to_record(&self) -> ShiftRecord {
        ShiftRecord {
            user: self.user.clone(),
            start: self.start.fixed_offset(),
            end: self.end.fixed_offset(),
            timezone: self.start.timezone().name().to_string(),
            duration_seconds: self.duration().num_seconds(),
        }
    }
}

/// Wire form of a [`ShiftInstance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftRecord {
    pub user: String,
    /// RFC 3339 with the offset in effect at the shift start.
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// IANA name of the zone the shift was expanded in.
    pub timezone: String,
    pub duration_seconds: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::RestrictionKind;
    use chrono::TimeZone;

    #[test]
    fn test_for_restriction_adds_duration() {
        let restriction =
            Restriction::parse(1, "22:00:00", 36_000, RestrictionKind::Daily).expect("valid");
        let start = Tz::Asia__Tokyo.with_ymd_and_hms(2025, 1, 6, 22, 0, 0).unwrap();

        let shift = ShiftInstance::for_restriction("Grogu", start, &restriction);

        assert_eq!(shift.user(), "Grogu");
        assert_eq!(
            shift.end(),
            Tz::Asia__Tokyo.with_ymd_and_hms(2025, 1, 7, 8, 0, 0).unwrap()
        );
        assert_eq!(shift.duration(), TimeDelta::hours(10));
    }

    #[test]
    fn test_try_new_requires_positive_length() {
        let start = Tz::UTC.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
        assert!(ShiftInstance::try_new("A", start, start).is_none());
        assert!(ShiftInstance::try_new("A", start, start - TimeDelta::hours(1)).is_none());
        assert!(ShiftInstance::try_new("A", start, start + TimeDelta::seconds(1)).is_some());
    }

    #[test]
    fn test_with_timezone_keeps_instants() {
        let start = Tz::Asia__Kolkata.with_ymd_and_hms(2025, 1, 9, 9, 0, 0).unwrap();
        let shift = ShiftInstance::try_new("Kelly", start, start + TimeDelta::hours(3))
            .expect("valid shift");

        let projected = shift.with_timezone(Tz::America__Los_Angeles);

        assert_eq!(projected.start(), shift.start());
        assert_eq!(projected.end(), shift.end());
        assert_eq!(projected.start().timezone(), Tz::America__Los_Angeles);
    }

    #[test]
    fn test_record_serializes_with_offsets() {
        let start = Tz::Africa__Nairobi.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let shift = ShiftInstance::try_new("Pam", start, start + TimeDelta::hours(3))
            .expect("valid shift");

        let json = serde_json::to_value(shift.to_record()).expect("serializes");

        assert_eq!(json["user"], "Pam");
        assert_eq!(json["start"], "2025-01-02T09:00:00+03:00");
        assert_eq!(json["end"], "2025-01-02T12:00:00+03:00");
        assert_eq!(json["timezone"], "Africa/Nairobi");
        assert_eq!(json["duration_seconds"], 10_800);
    }
}
