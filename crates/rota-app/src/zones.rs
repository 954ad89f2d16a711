//! Timezone validator selected from configuration.

use chrono_tz::Tz;
use rota_core::config::Settings;
use rota_model::{AllowListTimezones, IanaTimezones, TimezoneValidator};

use crate::error::AppResult;

/// Every IANA zone, or only the configured `timezones.allowed` list.
#[derive(Debug, Clone)]
pub enum ZoneFilter {
    Any(IanaTimezones),
    Allowed(AllowListTimezones),
}

impl ZoneFilter {
    /// ## Summary
    /// Builds the filter described by `settings`.
    ///
    /// ## Errors
    /// Returns `InvalidSpecification` if an allow list entry is not a known
    /// timezone.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        match &settings.timezones.allowed {
            Some(allowed) => {
                let list = AllowListTimezones::new(allowed)?;
                tracing::debug!(zones = list.len(), "Using timezone allow list");
                Ok(Self::Allowed(list))
            }
            None => Ok(Self::Any(IanaTimezones)),
        }
    }
}

impl TimezoneValidator for ZoneFilter {
    fn resolve(&self, name: &str) -> Option<Tz> {
        match self {
            Self::Any(zones) => zones.resolve(name),
            Self::Allowed(zones) => zones.resolve(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_any_zone() {
        let settings = Settings::from_toml_str("").expect("defaults load");
        let filter = ZoneFilter::from_settings(&settings).expect("filter");

        assert_eq!(filter.resolve("Pacific/Auckland"), Some(Tz::Pacific__Auckland));
    }

    #[test]
    fn test_allow_list_from_settings() {
        let settings = Settings::from_toml_str(
            r#"
            [timezones]
            allowed = ["Asia/Tokyo", "europe/london"]
            "#,
        )
        .expect("settings load");
        let filter = ZoneFilter::from_settings(&settings).expect("filter");

        assert_eq!(filter.resolve("Europe/London"), Some(Tz::Europe__London));
        assert_eq!(filter.resolve("Africa/Nairobi"), None);
    }

    #[test]
    fn test_bad_allow_list_entry_is_rejected() {
        let settings = Settings::from_toml_str(
            r#"
            [timezones]
            allowed = ["Mars/Olympus_Mons"]
            "#,
        )
        .expect("settings load");

        assert!(ZoneFilter::from_settings(&settings).is_err());
    }
}
