use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta};
use chrono_tz::Tz;

use rota_model::ShiftInstance;

use super::color::{Color, ColorSource};

/// A shift as it appears in one day cell, in the display timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSpan {
    pub user: String,
    pub color: Color,
    /// Bounds of the whole shift, not clipped to the day.
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    /// The shift started on an earlier day.
    pub continues_from_previous_day: bool,
    /// The shift runs past the end of this day.
    pub continues_to_next_day: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Shifts overlapping this day, in input order.
    pub spans: Vec<ShiftSpan>,
}

/// One month laid out Monday-first. Cells outside the month are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub first_day: NaiveDate,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthGrid {
    #[must_use]
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Heading such as `January 2025`.
    #[must_use]
    pub fn title(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub timezone: Tz,
    pub months: Vec<MonthGrid>,
    /// Users with their colors, in order of first appearance.
    pub legend: Vec<(String, Color)>,
}

impl CalendarGrid {
    fn empty(timezone: Tz) -> Self {
        Self {
            timezone,
            months: Vec::new(),
            legend: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    #[must_use]
    pub fn color_of(&self, user: &str) -> Option<Color> {
        self.legend
            .iter()
            .find_map(|(name, color)| (name == user).then_some(*color))
    }
}

/// ## Summary
/// Lays `shifts` out month by month in `display_tz`.
///
/// A shift is placed in every day whose local 00:00-24:00 window overlaps
/// it, so overnight shifts show up on both days. Every month from the one
/// holding the earliest start to the one holding the latest end gets a
/// grid, including months without shifts in between. Each distinct user
/// draws one color from `colors` on first appearance.
///
/// The input is not modified.
#[must_use]
pub fn render(shifts: &[ShiftInstance], display_tz: Tz, colors: &mut impl ColorSource) -> CalendarGrid {
    let mut palette: HashMap<&str, Color> = HashMap::new();
    let mut legend = Vec::new();
    let mut by_day: BTreeMap<NaiveDate, Vec<ShiftSpan>> = BTreeMap::new();

    for shift in shifts {
        let color = *palette.entry(shift.user()).or_insert_with(|| {
            let color = colors.next_color();
            legend.push((shift.user().to_string(), color));
            color
        });

        let shown = shift.with_timezone(display_tz);
        let (first, last) = covered_days(shown.start().naive_local(), shown.end().naive_local());

        for date in first.iter_days().take_while(|date| *date <= last) {
            by_day.entry(date).or_default().push(ShiftSpan {
                user: shown.user().to_string(),
                color,
                start: shown.start(),
                end: shown.end(),
                continues_from_previous_day: date > first,
                continues_to_next_day: date < last,
            });
        }
    }

    let (Some(first), Some(last)) = (
        by_day.first_key_value().map(|(date, _)| *date),
        by_day.last_key_value().map(|(date, _)| *date),
    ) else {
        tracing::debug!("No shifts to render");
        return CalendarGrid::empty(display_tz);
    };

    let months: Vec<MonthGrid> = month_starts(first, last)
        .map(|first_day| lay_out_month(first_day, &mut by_day))
        .collect();

    tracing::debug!(
        timezone = display_tz.name(),
        months = months.len(),
        users = legend.len(),
        "Calendar rendered"
    );

    CalendarGrid {
        timezone: display_tz,
        months,
        legend,
    }
}

/// First and last local dates touched by `[start, end)`.
fn covered_days(start: NaiveDateTime, end: NaiveDateTime) -> (NaiveDate, NaiveDate) {
    let first = start.date();
    let last = end
        .checked_sub_signed(TimeDelta::nanoseconds(1))
        .map_or(first, |last_instant| last_instant.date());
    (first, last.max(first))
}

fn month_starts(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(first.with_day(1), |month| {
        month.checked_add_months(Months::new(1))
    })
    .take_while(move |month| *month <= last)
}

fn lay_out_month(first_day: NaiveDate, by_day: &mut BTreeMap<NaiveDate, Vec<ShiftSpan>>) -> MonthGrid {
    let mut weeks: Vec<[Option<DayCell>; 7]> = Vec::new();

    for date in first_day
        .iter_days()
        .take_while(|date| date.month() == first_day.month())
    {
        let column = date.weekday().num_days_from_monday() as usize;
        if column == 0 || weeks.is_empty() {
            weeks.push(std::array::from_fn(|_| None));
        }
        if let Some(week) = weeks.last_mut() {
            week[column] = Some(DayCell {
                date,
                spans: by_day.remove(&date).unwrap_or_default(),
            });
        }
    }

    MonthGrid { first_day, weeks }
}
