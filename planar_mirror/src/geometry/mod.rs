//! Geometry module - plane math and viewer frustum side planes.
//!
//! All functions here work in viewer-relative space: points are expressed
//! relative to the viewer position, so every side plane passes through the
//! origin and is described by its outward normal alone.

mod plane;
mod view_frustum;

pub use plane::{line_plane_intersection, is_outside_plane};
pub use view_frustum::{FrustumBounds, ViewFrustum};
