use std::fmt::Write as _;

use chrono::Datelike;

use super::grid::{CalendarGrid, DayCell};

const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const CELL_STYLE: &str = "vertical-align: top; height: 100px; width: 14%;";

/// ## Summary
/// Renders `grid` as an HTML fragment: one heading and bordered table per
/// month, each shift listed as `User: 09:00 AM - 12:00 PM` in the user's
/// color.
///
/// An empty grid renders as an empty string.
#[must_use]
pub fn to_html(grid: &CalendarGrid) -> String {
    if grid.is_empty() {
        return String::new();
    }

    let mut html = String::from("<style>.shift { margin: 1px 0; }</style>");

    for month in &grid.months {
        let _ = write!(html, "<h3>{}</h3>", escape_html(&month.title()));
        html.push_str("<table border='1' style='border-collapse: collapse; width: 100%;'>");

        html.push_str("<tr>");
        for header in WEEKDAY_HEADERS {
            let _ = write!(html, "<th>{header}</th>");
        }
        html.push_str("</tr>");

        for week in &month.weeks {
            html.push_str("<tr>");
            for cell in week {
                match cell {
                    Some(day) => push_day(&mut html, day),
                    None => html.push_str("<td></td>"),
                }
            }
            html.push_str("</tr>");
        }

        html.push_str("</table><br>");
    }

    html
}

fn push_day(html: &mut String, day: &DayCell) {
    let _ = write!(html, "<td style='{CELL_STYLE}'><strong>{}</strong>", day.date.day());
    for span in &day.spans {
        let _ = write!(
            html,
            "<br><span class='shift' style='color: {};'>{}: {} - {}</span>",
            span.color.to_hex(),
            escape_html(&span.user),
            span.start.format("%I:%M %p"),
            span.end.format("%I:%M %p"),
        );
    }
    html.push_str("</td>");
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
