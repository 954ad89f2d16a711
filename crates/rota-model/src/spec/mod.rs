//! Rotation specification types.
//!
//! - [`RotationSpec`] - the validated, immutable rotation description
//! - [`Restriction`] / [`RestrictionKind`] - weekly on-call windows
//! - [`ScheduleConfig`] - schedule name, description and timezone
//! - `Raw*` - unvalidated serde input shapes

mod raw;
mod restriction;
mod rotation;
mod schedule;


pub use raw::{RawRestriction, RawRotationSpec, RawScheduleConfig, RawScheduleDocument, RawUser};
pub use restriction::{Restriction, RestrictionKind, iso_weekday};
pub use rotation::{RotationSpec, RotationSpecBuilder};
pub use schedule::ScheduleConfig;
