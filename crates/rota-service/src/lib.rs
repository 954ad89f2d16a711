//! Rotation expansion and calendar rendering.
//!
//! - [`expand`] walks a [`RotationSpec`](rota_model::RotationSpec) day by
//!   day and assigns every window to a user.
//! - [`calendar`] lays the resulting shifts out as month grids and HTML.
//!
//! Both are pure functions of their inputs.

pub mod calendar;
pub mod error;
pub mod expand;
