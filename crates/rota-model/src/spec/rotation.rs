//! Validated rotation description.

use std::collections::HashSet;
use std::num::NonZeroU32;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Weekday};
use chrono_tz::Tz;

use super::raw::RawRotationSpec;
use super::restriction::{Restriction, RestrictionKind};
use crate::error::{ModelResult, SpecViolation};
use crate::timezone::{TimezoneValidator, localize};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A rotation of users over a weekly pattern of on-call windows.
///
/// Values of this type are immutable and always satisfy the rotation
/// invariants: at least one user, at least one restriction, a single
/// restriction kind, no duplicate windows, a positive cadence and an end
/// that is not before the start. Corrections build a new spec.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationSpec {
    timezone: Tz,
    users: Vec<String>,
    restrictions: Vec<Restriction>,
    kind: RestrictionKind,
    rotation_start: DateTime<Tz>,
    rotation_end: Option<DateTime<Tz>>,
    cadence: NonZeroU32,
}

impl RotationSpec {
    /// Starts building a spec in `timezone` whose rotation begins at
    /// `rotation_start`.
    #[must_use]
    pub fn builder<Z: TimeZone>(timezone: Tz, rotation_start: &DateTime<Z>) -> RotationSpecBuilder {
        RotationSpecBuilder {
            timezone,
            rotation_start: rotation_start.with_timezone(&timezone),
            rotation_end: None,
            users: Vec::new(),
            restrictions: Vec::new(),
            cadence: 1,
        }
    }

    /// ## Summary
    /// Validates a raw schedule layer into a `RotationSpec`.
    ///
    /// When `everyday` is set, the first restriction's time, duration and
    /// kind are repeated on all seven weekdays.
    ///
    /// ## Errors
    /// Returns `InvalidSpecification` for any violated invariant, including
    /// timezones the validator rejects and instants without a UTC offset.
    pub fn from_raw(raw: &RawRotationSpec, validator: &impl TimezoneValidator) -> ModelResult<Self> {
        let timezone = validator.require(&raw.timezone)?;
        let start = parse_instant(&raw.rotation_virtual_start)?;

        let mut restrictions = raw
            .restrictions
            .iter()
            .map(|r| {
                Restriction::parse(
                    r.start_day_of_week,
                    &r.start_time_of_day,
                    r.duration_seconds,
                    r.kind,
                )
            })
            .collect::<ModelResult<Vec<_>>>()?;

        if raw.everyday {
            let first = *restrictions.first().ok_or(SpecViolation::NoRestrictions)?;
            restrictions = WEEK.iter().map(|day| first.on_day(*day)).collect();
        }

        let mut builder = Self::builder(timezone, &start)
            .users(raw.users.iter().map(|user| user.name().to_string()))
            .restrictions(restrictions)
            .cadence(raw.num_shifts);

        if let Some(end) = raw.end.as_deref() {
            builder = builder.rotation_end(&parse_instant(end)?);
        }

        builder.build()
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    #[must_use]
    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }

    /// Users in rotation order.
    #[must_use]
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Restrictions in declaration order.
    #[must_use]
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    #[must_use]
    pub const fn kind(&self) -> RestrictionKind {
        self.kind
    }

    #[must_use]
    pub fn rotation_start(&self) -> DateTime<Tz> {
        self.rotation_start
    }

    #[must_use]
    pub fn rotation_end(&self) -> Option<DateTime<Tz>> {
        self.rotation_end
    }

    /// Number of completed units between hand-offs.
    #[must_use]
    pub const fn cadence(&self) -> NonZeroU32 {
        self.cadence
    }

    /// Length of one rotation turn, derived from the restriction kind.
    #[must_use]
    pub fn turn_length(&self) -> TimeDelta {
        self.kind.turn_length()
    }

    /// Restrictions opening on `date`, in declaration order.
    pub fn restrictions_on(&self, date: NaiveDate) -> impl Iterator<Item = &Restriction> {
        self.restrictions.iter().filter(move |r| r.applies_on(date))
    }

    /// ## Summary
    /// Resolves the rotation start forward to the first day that has a
    /// window and returns that day's earliest window start.
    ///
    /// Returns `None` only if the search would run past the end of the
    /// supported calendar range.
    #[must_use]
    pub fn first_shift_start(&self) -> Option<DateTime<Tz>> {
        let mut date = self.rotation_start.date_naive();
        for _ in 0..WEEK.len() {
            if let Some(start_time) = self.restrictions_on(date).map(Restriction::start_time).min() {
                return Some(localize(&self.timezone, NaiveDateTime::new(date, start_time)));
            }
            date = date.succ_opt()?;
        }
        None
    }
}

/// Collects the parts of a [`RotationSpec`] and validates them in
/// [`RotationSpecBuilder::build`].
#[derive(Debug, Clone)]
#[must_use]
pub struct RotationSpecBuilder {
    timezone: Tz,
    rotation_start: DateTime<Tz>,
    rotation_end: Option<DateTime<Tz>>,
    users: Vec<String>,
    restrictions: Vec<Restriction>,
    cadence: i64,
}

impl RotationSpecBuilder {
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.users.push(user.into());
        self
    }

    pub fn users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users.extend(users.into_iter().map(Into::into));
        self
    }

    pub fn restriction(mut self, restriction: Restriction) -> Self {
        self.restrictions.push(restriction);
        self
    }

    pub fn restrictions(mut self, restrictions: impl IntoIterator<Item = Restriction>) -> Self {
        self.restrictions.extend(restrictions);
        self
    }

    pub fn rotation_end<Z: TimeZone>(mut self, end: &DateTime<Z>) -> Self {
        self.rotation_end = Some(end.with_timezone(&self.timezone));
        self
    }

    /// Hand off every `cadence` units. Checked in `build`.
    pub fn cadence(mut self, cadence: i64) -> Self {
        self.cadence = cadence;
        self
    }

    /// ## Summary
    /// Validates the collected parts.
    ///
    /// ## Errors
    /// Returns `InvalidSpecification` with the first violated invariant.
    pub fn build(self) -> ModelResult<RotationSpec> {
        if self.users.is_empty() {
            return Err(SpecViolation::NoUsers.into());
        }
        if let Some(position) = self.users.iter().position(|u| u.trim().is_empty()) {
            return Err(SpecViolation::BlankUser(position).into());
        }

        let kind = self
            .restrictions
            .first()
            .map(Restriction::kind)
            .ok_or(SpecViolation::NoRestrictions)?;
        if self.restrictions.iter().any(|r| r.kind() != kind) {
            return Err(SpecViolation::MixedRestrictionKinds.into());
        }

        let mut seen = HashSet::new();
        for restriction in &self.restrictions {
            if !seen.insert((restriction.day(), restriction.start_time())) {
                return Err(SpecViolation::DuplicateRestriction {
                    day: restriction.day(),
                    start_time: restriction.start_time(),
                }
                .into());
            }
        }

        let cadence = u32::try_from(self.cadence)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(SpecViolation::InvalidCadence(self.cadence))?;

        if let Some(end) = self.rotation_end {
            if end < self.rotation_start {
                return Err(SpecViolation::EndBeforeStart {
                    start: self.rotation_start.to_rfc3339(),
                    end: end.to_rfc3339(),
                }
                .into());
            }
        }

        tracing::debug!(
            timezone = self.timezone.name(),
            users = self.users.len(),
            restrictions = self.restrictions.len(),
            %kind,
            cadence = cadence.get(),
            "Rotation spec validated"
        );

        Ok(RotationSpec {
            timezone: self.timezone,
            users: self.users.into_iter().map(|u| u.trim().to_string()).collect(),
            restrictions: self.restrictions,
            kind,
            rotation_start: self.rotation_start,
            rotation_end: self.rotation_end,
            cadence,
        })
    }
}

/// Parses an RFC 3339 instant, telling apart a missing offset from garbage.
fn parse_instant(value: &str) -> Result<DateTime<FixedOffset>, SpecViolation> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value).map_err(|_err| {
        let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok());
        if naive {
            SpecViolation::NaiveInstant(value.to_string())
        } else {
            SpecViolation::MalformedInstant(value.to_string())
        }
    })
}
