//! Rotation data model.
//!
//! This crate defines the validated, immutable rotation description that the
//! expansion engine consumes, the shift instances it produces, and the raw
//! serde shapes used at the input boundary.
//!
//! ## Overview
//!
//! - [`spec`] - `RotationSpec`, `Restriction`, schedule config and raw input
//! - [`shift`] - `ShiftInstance` and its serializable `ShiftRecord`
//! - [`timezone`] - timezone validation, normalization and localization
//!
//! A `RotationSpec` can only be obtained through validation, so any value of
//! the type satisfies the rotation invariants.

pub mod error;
pub mod shift;
pub mod spec;
pub mod timezone;

pub use error::{ModelError, ModelResult, SpecViolation};
pub use shift::{ShiftInstance, ShiftRecord};
pub use spec::{
    RawRestriction, RawRotationSpec, RawScheduleConfig, RawScheduleDocument, RawUser, Restriction,
    RestrictionKind, RotationSpec, RotationSpecBuilder, ScheduleConfig,
};
pub use timezone::{AllowListTimezones, IanaTimezones, TimezoneValidator};
