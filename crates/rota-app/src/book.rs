//! Append-only collection of the rotation groups of one schedule.

use chrono::TimeDelta;
use chrono_tz::Tz;

use rota_model::{
    ModelResult, RawScheduleDocument, RotationSpec, ScheduleConfig, ShiftInstance,
    TimezoneValidator,
};
use rota_service::expand::expand_all;

use crate::error::{AppError, AppResult};

/// Rotation groups collected so far, plus the schedule they belong to.
///
/// Groups are only ever appended or replaced whole; a `RotationSpec` itself
/// is never changed. Expansion reads the book and leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBook {
    schedule: Option<ScheduleConfig>,
    groups: Vec<RotationSpec>,
}

impl ScheduleBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group and returns its position.
    pub fn push(&mut self, spec: RotationSpec) -> usize {
        self.groups.push(spec);
        self.groups.len() - 1
    }

    /// ## Summary
    /// Replaces the group at `index` with a corrected spec and returns the
    /// old one.
    ///
    /// ## Errors
    /// Returns `UnknownGroup` if there is no group at `index`.
    pub fn replace(&mut self, index: usize, spec: RotationSpec) -> AppResult<RotationSpec> {
        let len = self.groups.len();
        let slot = self
            .groups
            .get_mut(index)
            .ok_or(AppError::UnknownGroup { index, len })?;
        Ok(std::mem::replace(slot, spec))
    }

    /// Sets the schedule config. A later document overrides an earlier one.
    pub fn set_schedule(&mut self, schedule: ScheduleConfig) {
        if let Some(previous) = self.schedule.replace(schedule) {
            tracing::warn!(
                previous = previous.name().unwrap_or_default(),
                "Schedule config replaced by a later document"
            );
        }
    }

    /// ## Summary
    /// Validates every layer of a JSON document and appends them.
    ///
    /// Nothing is appended unless the whole document is valid.
    ///
    /// ## Errors
    /// Returns `JsonError` for unreadable documents and
    /// `InvalidSpecification` for the first invalid layer or schedule.
    pub fn load_document(
        &mut self,
        json: &str,
        validator: &impl TimezoneValidator,
    ) -> AppResult<usize> {
        let (schedule, layers) = RawScheduleDocument::from_json(json)?.into_parts();

        let schedule = schedule
            .map(|raw| ScheduleConfig::from_raw(&raw, validator))
            .transpose()?;
        let specs = layers
            .iter()
            .map(|raw| RotationSpec::from_raw(raw, validator))
            .collect::<ModelResult<Vec<_>>>()?;

        if let Some(schedule) = schedule {
            self.set_schedule(schedule);
        }
        let added = specs.len();
        self.groups.extend(specs);

        tracing::debug!(added, total = self.groups.len(), "Rotation groups loaded");
        Ok(added)
    }

    #[must_use]
    pub fn schedule(&self) -> Option<&ScheduleConfig> {
        self.schedule.as_ref()
    }

    #[must_use]
    pub fn groups(&self) -> &[RotationSpec] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Timezone to display the calendar in when none is requested: the
    /// schedule's, else the first group's.
    #[must_use]
    pub fn default_timezone(&self) -> Option<Tz> {
        self.schedule
            .as_ref()
            .map(ScheduleConfig::timezone)
            .or_else(|| self.groups.first().map(RotationSpec::timezone))
    }

    /// ## Summary
    /// Expands all groups over `horizon` and merges the shifts by start.
    ///
    /// ## Errors
    /// Returns `InvalidSpecification` if `horizon` is negative.
    pub fn expand(&self, horizon: TimeDelta) -> AppResult<Vec<ShiftInstance>> {
        Ok(expand_all(&self.groups, horizon)?)
    }
}
