//! Output formatting and writing.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use rota_model::{ScheduleConfig, ShiftInstance, ShiftRecord};
use rota_service::calendar::{CalendarGrid, to_html};

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct ScheduleSummary<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    timezone: &'static str,
}

#[derive(Debug, Serialize)]
struct ExpansionReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<ScheduleSummary<'a>>,
    shifts: Vec<ShiftRecord>,
}

/// ## Summary
/// Serializes shifts as a pretty-printed JSON report.
///
/// ## Errors
/// Returns `JsonError` if serialization fails.
pub fn shifts_json(schedule: Option<&ScheduleConfig>, shifts: &[ShiftInstance]) -> AppResult<String> {
    let report = ExpansionReport {
        schedule: schedule.map(|schedule| ScheduleSummary {
            name: schedule.name(),
            description: schedule.description(),
            timezone: schedule.timezone().name(),
        }),
        shifts: shifts.iter().map(ShiftInstance::to_record).collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// HTML calendar, or an empty document when there is nothing to show.
#[must_use]
pub fn calendar_html(grid: &CalendarGrid) -> String {
    if grid.is_empty() {
        tracing::warn!("No shifts to display, calendar is empty");
    }
    to_html(grid)
}

/// ## Summary
/// Writes `content` to `path`, or to stdout when no path is given.
///
/// ## Errors
/// Returns `IoError` if the file cannot be written.
pub fn write_output(path: Option<&Path>, content: &str) -> AppResult<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content).map_err(|source| AppError::IoError {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = content.len(), "Output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .map_err(|source| AppError::IoError {
                    path: "<stdout>".into(),
                    source,
                })?;
        }
    }
    Ok(())
}
