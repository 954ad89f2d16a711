//! Rotation expansion.
//!
//! Turns a [`RotationSpec`] into the concrete, time-ordered shifts it
//! describes. The walk visits every calendar day from the rotation start's
//! local date through the end of the horizon (or the rotation end, if
//! earlier), emits one shift per restriction opening that day, and hands the
//! rotation off according to the restriction kind and cadence.

mod cursor;


use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use chrono_tz::Tz;

use rota_core::constants::DEFAULT_HORIZON_WEEKS;
use rota_model::timezone::localize;
use rota_model::{RotationSpec, ShiftInstance, SpecViolation};

use crate::error::ServiceResult;
use cursor::RotationCursor;

/// Horizon used by [`expand_default`]: 52 weeks.
#[must_use]
pub fn default_horizon() -> TimeDelta {
    TimeDelta::weeks(i64::from(DEFAULT_HORIZON_WEEKS))
}

/// Calendar days the walk covers.
#[derive(Debug, Clone, Copy)]
struct ExpansionWindow {
    first: NaiveDate,
    last: NaiveDate,
    rotation_end: Option<DateTime<Tz>>,
}

impl ExpansionWindow {
    fn new(spec: &RotationSpec, horizon: TimeDelta) -> Self {
        let first = spec.rotation_start().date_naive();
        let horizon_last = first
            .checked_add_signed(TimeDelta::days(horizon.num_days()))
            .unwrap_or(NaiveDate::MAX);
        let rotation_end = spec.rotation_end();
        let last = rotation_end.map_or(horizon_last, |end| end.date_naive().min(horizon_last));

        Self {
            first,
            last,
            rotation_end,
        }
    }

    fn dates(self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take_while(move |date| *date <= self.last)
    }

    /// Shifts opening after the rotation end are dropped.
    fn admits(&self, start: DateTime<Tz>) -> bool {
        self.rotation_end.is_none_or(|end| start <= end)
    }
}

/// ## Summary
/// Expands `spec` over `horizon`, measured in whole days from the rotation
/// start's local date.
///
/// The result is sorted by start; shifts with the same start keep the
/// declaration order of their restrictions. An empty result is a valid
/// outcome.
///
/// ## Errors
/// Returns `InvalidSpecification` if `horizon` is negative. Nothing is
/// expanded in that case.
pub fn expand(spec: &RotationSpec, horizon: TimeDelta) -> ServiceResult<Vec<ShiftInstance>> {
    if horizon < TimeDelta::zero() {
        return Err(SpecViolation::NegativeHorizon(horizon.num_days()).into());
    }
    Ok(walk(spec, ExpansionWindow::new(spec, horizon)))
}

/// Expands `spec` over the [default horizon](default_horizon).
#[must_use]
pub fn expand_default(spec: &RotationSpec) -> Vec<ShiftInstance> {
    walk(spec, ExpansionWindow::new(spec, default_horizon()))
}

/// ## Summary
/// Expands several rotation groups and merges their shifts by start.
///
/// Groups are independent: each starts with its own first user. Shifts with
/// the same start keep the order of `specs`.
///
/// ## Errors
/// Returns `InvalidSpecification` if `horizon` is negative.
pub fn expand_all<'a, I>(specs: I, horizon: TimeDelta) -> ServiceResult<Vec<ShiftInstance>>
where
    I: IntoIterator<Item = &'a RotationSpec>,
{
    let mut shifts = Vec::new();
    for spec in specs {
        shifts.extend(expand(spec, horizon)?);
    }
    shifts.sort_by_key(ShiftInstance::start);
    Ok(shifts)
}

fn walk(spec: &RotationSpec, window: ExpansionWindow) -> Vec<ShiftInstance> {
    tracing::debug!(
        timezone = spec.timezone_name(),
        kind = %spec.kind(),
        first = %window.first,
        last = %window.last,
        "Expanding rotation"
    );

    let tz = spec.timezone();
    let mut cursor = RotationCursor::new(spec);
    let mut shifts = Vec::new();

    for date in window.dates() {
        let mut produced = false;

        for restriction in spec.restrictions_on(date) {
            let start = localize(&tz, NaiveDateTime::new(date, restriction.start_time()));
            if !window.admits(start) {
                continue;
            }

            let shift = ShiftInstance::for_restriction(cursor.current_user(), start, restriction);
            tracing::trace!(user = shift.user(), start = %shift.start(), "Shift assigned");
            shifts.push(shift);
            produced = true;
        }

        cursor.finish_day(date, produced);
    }

    // Stable, so equal starts keep declaration order
    shifts.sort_by_key(ShiftInstance::start);

    tracing::debug!(shifts = shifts.len(), "Rotation expanded");
    shifts
}
