//! The `rota` command-line tool.
//!
//! Reads rotation groups from JSON documents, expands them into shifts and
//! writes the result as JSON records or an HTML calendar.

pub mod book;
pub mod cli;
pub mod command;
pub mod error;
pub mod output;
pub mod zones;

pub use command::run;
