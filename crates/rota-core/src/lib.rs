//! Shared configuration, constants and error types for the rota workspace.

pub mod config;
pub mod constants;
pub mod error;
