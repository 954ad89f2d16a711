//! Schedule-level settings shared by all rotation groups of one schedule.

use chrono_tz::Tz;

use rota_core::constants::{SCHEDULE_DESCRIPTION_MAX_CHARS, SCHEDULE_NAME_MAX_CHARS};

use super::raw::RawScheduleConfig;
use crate::error::{ModelResult, SpecViolation};
use crate::timezone::TimezoneValidator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    name: Option<String>,
    description: Option<String>,
    timezone: Tz,
}

impl ScheduleConfig {
    /// ## Summary
    /// Creates a schedule config, checking name and description lengths.
    ///
    /// ## Errors
    /// Returns `ScheduleNameLength` for an empty or overlong name and
    /// `ScheduleDescriptionLength` for an overlong description.
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        timezone: Tz,
    ) -> ModelResult<Self> {
        if let Some(name) = &name {
            let len = name.chars().count();
            if len == 0 || len > SCHEDULE_NAME_MAX_CHARS {
                return Err(SpecViolation::ScheduleNameLength {
                    len,
                    max: SCHEDULE_NAME_MAX_CHARS,
                }
                .into());
            }
        }
        if let Some(description) = &description {
            let len = description.chars().count();
            if len > SCHEDULE_DESCRIPTION_MAX_CHARS {
                return Err(SpecViolation::ScheduleDescriptionLength {
                    len,
                    max: SCHEDULE_DESCRIPTION_MAX_CHARS,
                }
                .into());
            }
        }

        Ok(Self {
            name,
            description,
            timezone,
        })
    }

    /// ## Summary
    /// Validates a raw schedule config.
    ///
    /// ## Errors
    /// Returns `InvalidSpecification` if the timezone is rejected or a
    /// length limit is exceeded.
    pub fn from_raw(raw: &RawScheduleConfig, validator: &impl TimezoneValidator) -> ModelResult<Self> {
        let timezone = validator.require(&raw.timezone)?;
        Self::new(raw.name.clone(), raw.description.clone(), timezone)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }
}
