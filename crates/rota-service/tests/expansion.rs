//! End-to-end expansion and rendering from JSON schedule documents.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use chrono_tz::Tz;
use rota_model::{IanaTimezones, RawScheduleDocument, RotationSpec, ShiftInstance};
use rota_service::calendar::{MonthGrid, SeededPalette, render, to_html};
use rota_service::expand::{expand, expand_all, expand_default};

const DATABASE_TEAM: &str = include_str!("fixtures/database_team.json");
const HELPDESK_TEAM: &str = include_str!("fixtures/helpdesk_team.json");
const MIXED_LAYERS: &str = include_str!("fixtures/mixed_layers.json");

fn load(json: &str) -> Vec<RotationSpec> {
    let (_, layers) = RawScheduleDocument::from_json(json)
        .expect("fixture parses")
        .into_parts();
    layers
        .iter()
        .map(|raw| RotationSpec::from_raw(raw, &IanaTimezones).expect("fixture is valid"))
        .collect()
}

fn users(shifts: &[ShiftInstance]) -> Vec<&str> {
    shifts.iter().map(ShiftInstance::user).collect()
}

fn dates(shifts: &[ShiftInstance]) -> Vec<NaiveDate> {
    shifts.iter().map(|s| s.start().date_naive()).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test_log::test]
fn test_daily_rotation_hands_off_each_matching_day() {
    let specs = load(DATABASE_TEAM);
    let shifts = expand(&specs[0], TimeDelta::weeks(4)).expect("expands");

    assert_eq!(
        users(&shifts),
        [
            "Pam Beesly",
            "Dwight Schrute",
            "Dwight Schrute",
            "Pam Beesly",
            "Creed Bratton",
            "Creed Bratton",
            "Pam Beesly",
            "Dwight Schrute",
        ]
    );
    assert_eq!(
        dates(&shifts)[..4],
        [date(2025, 1, 2), date(2025, 1, 3), date(2025, 1, 9), date(2025, 1, 10)]
    );
    assert!(
        shifts
            .iter()
            .all(|s| s.duration() == TimeDelta::hours(3) && s.start().timezone() == Tz::Africa__Nairobi)
    );
}

#[test]
fn test_weekly_rotation_hands_off_at_week_boundary() {
    let specs = load(HELPDESK_TEAM);
    let shifts = expand_default(&specs[0]);

    // The first partial week has no windows, so Kelly takes the first full week
    assert_eq!(shifts[0].start().date_naive(), date(2025, 1, 9));
    assert_eq!(
        users(&shifts),
        [
            "Kelly Kapoor",
            "Kelly Kapoor",
            "Bob Vance",
            "Bob Vance",
            "Bob Vance",
            "Bob Vance",
            "Kelly Kapoor",
            "Kelly Kapoor",
            "Toby Flenderson",
            "Toby Flenderson",
            "Toby Flenderson",
            "Toby Flenderson",
            "Kelly Kapoor",
            "Kelly Kapoor",
            "Bob Vance",
            "Bob Vance",
        ]
    );

    // Rotation ends 2025-03-01, so the last window is Friday 2025-02-28
    assert_eq!(shifts.last().map(|s| s.start().date_naive()), Some(date(2025, 2, 28)));
}

#[test]
fn test_mixed_layers_expand_independently() {
    let specs = load(MIXED_LAYERS);
    assert_eq!(specs[0].timezone(), Tz::America__Los_Angeles);
    assert_eq!(specs[1].timezone(), Tz::Asia__Tokyo);

    let support = expand(&specs[0], TimeDelta::weeks(2)).expect("expands");
    assert_eq!(
        support
            .iter()
            .map(|s| (s.start().weekday(), s.user()))
            .collect::<Vec<_>>(),
        [
            (Weekday::Mon, "Saul Goodman"),
            (Weekday::Sat, "Jesse Pinkman"),
            (Weekday::Sun, "Kim Wexler"),
            (Weekday::Mon, "Saul Goodman"),
            (Weekday::Sat, "Jesse Pinkman"),
            (Weekday::Sun, "Kim Wexler"),
            (Weekday::Mon, "Saul Goodman"),
        ]
    );

    let finance = expand(&specs[1], TimeDelta::weeks(5)).expect("expands");
    assert_eq!(
        users(&finance),
        ["Gus Fring", "Gus Fring", "Tuco Salamanca", "Tuco Salamanca", "Gus Fring"]
    );
    assert_eq!(finance[0].end() - finance[0].start(), TimeDelta::hours(10));

    let merged = expand_all(&specs, TimeDelta::weeks(2)).expect("expands");
    assert!(merged.windows(2).all(|pair| pair[0].start() <= pair[1].start()));
}

#[test]
fn test_rendered_calendar_holds_every_shift() {
    let specs = load(DATABASE_TEAM);
    let shifts = expand(&specs[0], TimeDelta::weeks(8)).expect("expands");

    let grid = render(&shifts, Tz::UTC, &mut SeededPalette::new(1));

    let placed: usize = grid
        .months
        .iter()
        .flat_map(MonthGrid::days)
        .map(|day| day.spans.len())
        .sum();
    assert_eq!(placed, shifts.len());

    let titles: Vec<String> = grid.months.iter().map(MonthGrid::title).collect();
    assert_eq!(titles, ["January 2025", "February 2025"]);

    let users: Vec<&str> = grid.legend.iter().map(|(user, _)| user.as_str()).collect();
    assert_eq!(users, ["Pam Beesly", "Dwight Schrute", "Creed Bratton"]);

    // 09:00 in Nairobi is 06:00 UTC
    let html = to_html(&grid);
    assert!(html.contains("Pam Beesly: 06:00 AM - 09:00 AM"));
}

#[test]
fn test_overnight_layer_renders_on_two_days() {
    let specs = load(MIXED_LAYERS);
    let shifts = expand(&specs[1], TimeDelta::weeks(1)).expect("expands");
    assert_eq!(shifts.len(), 1);

    let grid = render(&shifts, Tz::Asia__Tokyo, &mut SeededPalette::new(1));
    let days: Vec<NaiveDate> = grid
        .months
        .iter()
        .flat_map(MonthGrid::days)
        .filter(|day| !day.spans.is_empty())
        .map(|day| day.date)
        .collect();

    assert_eq!(days, [date(2025, 1, 9), date(2025, 1, 10)]);
}
