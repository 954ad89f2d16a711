//! Calendar rendering.
//!
//! Projects expanded shifts into a display timezone and lays them out as
//! Monday-first month grids. Rendering never fails: an empty shift list
//! gives an empty calendar.

mod color;
mod grid;
mod html;


pub use color::{Color, ColorSource, SeededPalette};
pub use grid::{CalendarGrid, DayCell, MonthGrid, ShiftSpan, render};
pub use html::to_html;
