//! Timezone validation, name normalization and local-time resolution.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and alias
//! canonicalization, and `chrono-tz` for the zone rules themselves.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

use crate::error::{ModelResult, SpecViolation};

/// Decides which timezone names a rotation may use.
///
/// Injected wherever a name is turned into a zone so callers can narrow the
/// accepted set, e.g. to the zones a downstream scheduling API supports.
pub trait TimezoneValidator {
    /// Resolves `name` to a zone, or `None` if it is unknown or not allowed.
    fn resolve(&self, name: &str) -> Option<Tz>;

    /// ## Summary
    /// Resolves `name`, turning a miss into a spec violation.
    ///
    /// ## Errors
    /// Returns `EmptyTimezone` for a blank name and `UnknownTimezone` when
    /// the validator does not accept it.
    fn require(&self, name: &str) -> Result<Tz, SpecViolation> {
        if name.trim().is_empty() {
            return Err(SpecViolation::EmptyTimezone);
        }
        self.resolve(name)
            .ok_or_else(|| SpecViolation::UnknownTimezone(name.to_string()))
    }
}

/// Accepts every zone in the IANA database shipped with `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaTimezones;

impl TimezoneValidator for IanaTimezones {
    fn resolve(&self, name: &str) -> Option<Tz> {
        let resolved = candidate_names(name)
            .into_iter()
            .find_map(|candidate| Tz::from_str(&candidate).ok());
        tracing::trace!(name, resolved = ?resolved.map(Tz::name), "Resolved timezone");
        resolved
    }
}

/// Accepts only the configured subset of IANA zones.
#[derive(Debug, Clone, Default)]
pub struct AllowListTimezones {
    allowed: BTreeSet<&'static str>,
}

impl AllowListTimezones {
    /// ## Summary
    /// Builds an allow list. Every entry is resolved with [`IanaTimezones`],
    /// so aliases and loosely typed names are stored canonically.
    ///
    /// ## Errors
    /// Returns `UnknownTimezone` for the first entry that does not resolve.
    pub fn new<I, S>(names: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = names
            .into_iter()
            .map(|name| IanaTimezones.require(name.as_ref()).map(Tz::name))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { allowed })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

impl TimezoneValidator for AllowListTimezones {
    fn resolve(&self, name: &str) -> Option<Tz> {
        IanaTimezones
            .resolve(name)
            .filter(|tz| self.allowed.contains(tz.name()))
    }
}

/// Names to try, in order, when resolving user input.
fn candidate_names(name: &str) -> Vec<String> {
    let trimmed = name.trim();
    let titled = title_case(trimmed);

    let mut candidates = vec![
        normalize_tzid(trimmed),
        trimmed.to_string(),
        normalize_tzid(&titled),
        titled,
    ];
    candidates.dedup();
    candidates
}

/// Title-cases each word and joins words with underscores, matching the
/// IANA spelling convention: `"america/new york"` becomes `"America/New_York"`.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut previous_is_letter = false;

    for c in name.chars() {
        if c == ' ' {
            out.push('_');
            previous_is_letter = false;
            continue;
        }
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}

/// Maps Windows zone names (`"Tokyo Standard Time"`) and IANA aliases
/// (`"US/Eastern"`) to canonical IANA names with ICU4X. Anything ICU does
/// not know is returned unchanged.
fn normalize_tzid(tzid: &str) -> String {
    let iana = IanaParserExtended::new();

    if let Some(zone) = WindowsParser::new().parse(tzid, None) {
        if let Some(entry) = iana.iter().find(|entry| entry.time_zone == zone) {
            return entry.canonical.to_string();
        }
    }

    let parsed = iana.parse(tzid);
    if parsed.time_zone == icu::time::TimeZone::UNKNOWN {
        tzid.to_string()
    } else {
        parsed.canonical.to_string()
    }
}

/// ## Summary
/// Attaches `tz` to a local wall-clock time.
///
/// Ambiguous times (DST fold) resolve to the earlier instant. Times inside a
/// DST gap are read with the offset in effect before the transition, which
/// moves them forward by the length of the gap (02:30 on a spring-forward
/// night becomes 03:30). Never fails.
#[must_use]
pub fn localize(tz: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _latest) => earliest,
        LocalResult::None => {
            let before_gap = tz
                .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                .fix();
            let utc = local - TimeDelta::seconds(i64::from(before_gap.local_minus_utc()));
            tracing::trace!(%local, tz = tz.name(), "Local time falls in a DST gap");
            tz.from_utc_datetime(&utc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_resolve_standard_timezone() {
        assert_eq!(
            IanaTimezones.resolve("America/New_York"),
            Some(Tz::America__New_York)
        );
    }

    #[test]
    fn test_resolve_loosely_typed_name() {
        assert_eq!(
            IanaTimezones.resolve("america/new york"),
            Some(Tz::America__New_York)
        );
        assert_eq!(
            IanaTimezones.resolve("  Africa/Nairobi "),
            Some(Tz::Africa__Nairobi)
        );
    }

    #[test]
    fn test_resolve_windows_name() {
        assert_eq!(
            IanaTimezones.resolve("Pacific Standard Time"),
            Some(Tz::America__Los_Angeles)
        );
    }

    #[test]
    fn test_resolve_alias_is_canonicalized() {
        assert_eq!(
            IanaTimezones.resolve("US/Eastern"),
            Some(Tz::America__New_York)
        );
    }

    #[test]
    fn test_require_rejects_unknown_and_empty() {
        assert_eq!(
            IanaTimezones.require("Mars/Olympus_Mons"),
            Err(SpecViolation::UnknownTimezone("Mars/Olympus_Mons".to_string()))
        );
        assert_eq!(IanaTimezones.require("   "), Err(SpecViolation::EmptyTimezone));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("america/los angeles"), "America/Los_Angeles");
        assert_eq!(title_case("ASIA/TOKYO"), "Asia/Tokyo");
    }

    #[test]
    fn test_allow_list_filters_zones() {
        let allow = AllowListTimezones::new(["Asia/Tokyo", "Africa/Nairobi"]).expect("valid list");

        assert_eq!(allow.len(), 2);
        assert_eq!(allow.resolve("Asia/Tokyo"), Some(Tz::Asia__Tokyo));
        assert_eq!(allow.resolve("asia/tokyo"), Some(Tz::Asia__Tokyo));
        assert_eq!(allow.resolve("Europe/Paris"), None);
    }

    #[test]
    fn test_allow_list_rejects_unknown_entry() {
        let result = AllowListTimezones::new(["Asia/Tokyo", "Nowhere/Special"]);
        assert!(matches!(
            result.unwrap_err().violation(),
            Some(SpecViolation::UnknownTimezone(_))
        ));
    }

    #[test]
    fn test_localize_plain_time() {
        let dt = localize(&Tz::America__New_York, local(2026, 1, 15, 10, 0));
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 1, 15, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_localize_dst_gap_moves_forward() {
        // 2026-03-08 02:30 does not exist in New York
        let dt = localize(&Tz::America__New_York, local(2026, 3, 8, 2, 30));
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap()
        );
        assert_eq!(dt.naive_local(), local(2026, 3, 8, 3, 30));
    }

    #[test]
    fn test_localize_dst_fold_takes_earliest() {
        // 2026-11-01 01:30 happens twice in New York; EDT comes first
        let dt = localize(&Tz::America__New_York, local(2026, 11, 1, 1, 30));
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap()
        );
    }
}
