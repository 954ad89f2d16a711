//! Subcommand execution.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use chrono_tz::Tz;

use rota_core::config::Settings;
use rota_model::TimezoneValidator;
use rota_service::calendar::{SeededPalette, render};

use crate::book::ScheduleBook;
use crate::cli::{Command, ExpandArgs, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::output::{calendar_html, shifts_json, write_output};
use crate::zones::ZoneFilter;

/// ## Summary
/// Runs `command` and writes its output.
///
/// ## Errors
/// Returns an error if an input cannot be read or validated, or the output
/// cannot be written.
pub fn run(command: &Command, settings: &Settings) -> AppResult<()> {
    match command {
        Command::Expand(args) => {
            let content = expand(args, settings)?;
            write_output(args.output.as_deref(), &content)
        }
        Command::Validate { files } => {
            let content = validate(files, settings)?;
            write_output(None, &content)
        }
    }
}

/// ## Summary
/// Loads `args.files`, expands every rotation group and formats the result.
///
/// Command-line values take precedence over `settings`.
///
/// ## Errors
/// Returns an error if a file cannot be read, a group or timezone is
/// invalid, or serialization fails.
pub fn expand(args: &ExpandArgs, settings: &Settings) -> AppResult<String> {
    let zones = ZoneFilter::from_settings(settings)?;
    let book = load_book(&args.files, &zones)?;

    let weeks = args.horizon_weeks.unwrap_or(settings.rotation.horizon_weeks);
    let shifts = book.expand(TimeDelta::weeks(i64::from(weeks)))?;
    tracing::info!(
        groups = book.len(),
        shifts = shifts.len(),
        horizon_weeks = weeks,
        "Rotations expanded"
    );

    match args.format {
        OutputFormat::Json => shifts_json(book.schedule(), &shifts),
        OutputFormat::Html => {
            let display_tz = display_timezone(args, settings, &book, &zones)?;
            let mut palette = args
                .seed
                .or(settings.calendar.color_seed)
                .map_or_else(SeededPalette::from_entropy, SeededPalette::new);
            let grid = render(&shifts, display_tz, &mut palette);
            Ok(calendar_html(&grid))
        }
    }
}

/// ## Summary
/// Loads and validates `files` and summarizes each rotation group.
///
/// ## Errors
/// Returns the first read or validation error.
pub fn validate(files: &[PathBuf], settings: &Settings) -> AppResult<String> {
    let zones = ZoneFilter::from_settings(settings)?;
    let book = load_book(files, &zones)?;

    let mut lines = Vec::with_capacity(book.len() + 1);
    if let Some(schedule) = book.schedule() {
        lines.push(format!(
            "schedule {}: {}",
            schedule.name().unwrap_or("(unnamed)"),
            schedule.timezone().name()
        ));
    }
    for (index, group) in book.groups().iter().enumerate() {
        lines.push(format!(
            "group {index}: {} users, {} windows ({}), cadence {} in {}",
            group.users().len(),
            group.restrictions().len(),
            group.kind(),
            group.cadence(),
            group.timezone_name(),
        ));
    }
    lines.push(format!("{} rotation groups valid", book.len()));
    Ok(lines.join("\n"))
}

fn load_book(files: &[PathBuf], zones: &ZoneFilter) -> AppResult<ScheduleBook> {
    let mut book = ScheduleBook::new();
    for path in files {
        let json = read_input(path)?;
        let added = book.load_document(&json, zones)?;
        tracing::debug!(path = %path.display(), added, "Input loaded");
    }
    Ok(book)
}

fn read_input(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::IoError {
        path: path.to_path_buf(),
        source,
    })
}

/// `--display-timezone`, then config, then the schedule, then UTC.
fn display_timezone(
    args: &ExpandArgs,
    settings: &Settings,
    book: &ScheduleBook,
    zones: &ZoneFilter,
) -> AppResult<Tz> {
    let requested = args
        .display_timezone
        .as_deref()
        .or(settings.calendar.display_timezone.as_deref());

    match requested {
        Some(name) => Ok(zones.require(name)?),
        None => Ok(book.default_timezone().unwrap_or(Tz::UTC)),
    }
}
