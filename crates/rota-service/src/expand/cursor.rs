//! Tracks which user holds the rotation while the expander walks the calendar.

use chrono::{Datelike, NaiveDate, Weekday};
use rota_model::{RestrictionKind, RotationSpec};

/// Rotation position during a walk.
///
/// A unit completes after each day that produced a shift (daily kind) or
/// after each Sunday closing a week that produced a shift (weekly kind). The
/// user index moves one step every `cadence` completed units.
#[derive(Debug, Clone)]
pub(crate) struct RotationCursor<'a> {
    users: &'a [String],
    kind: RestrictionKind,
    cadence: u64,
    index: usize,
    completed_units: u64,
    week_has_shift: bool,
}

impl<'a> RotationCursor<'a> {
    pub(crate) fn new(spec: &'a RotationSpec) -> Self {
        Self {
            users: spec.users(),
            kind: spec.kind(),
            cadence: u64::from(spec.cadence().get()),
            index: 0,
            completed_units: 0,
            week_has_shift: false,
        }
    }

    /// User holding the rotation right now.
    pub(crate) fn current_user(&self) -> &'a str {
        &self.users[self.index]
    }

    /// Closes `date`. `produced` tells whether any shift started on it.
    pub(crate) fn finish_day(&mut self, date: NaiveDate, produced: bool) {
        match self.kind {
            RestrictionKind::Daily => {
                if produced {
                    self.complete_unit();
                }
            }
            RestrictionKind::Weekly => {
                self.week_has_shift |= produced;
                if date.weekday() == Weekday::Sun {
                    if self.week_has_shift {
                        self.complete_unit();
                    }
                    self.week_has_shift = false;
                }
            }
        }
    }

    fn complete_unit(&mut self) {
        self.completed_units += 1;
        if self.completed_units % self.cadence == 0 {
            self.index = (self.index + 1) % self.users.len();
            tracing::trace!(
                units = self.completed_units,
                user = self.current_user(),
                "Rotation handed off"
            );
        }
    }
}
