/// Oblique projection for reflection viewpoints.
///
/// The reflection viewpoint sits behind the mirror plane, oriented like the
/// mirror. Its frustum is cut so the near plane coincides with the
/// reflective face and the four side planes pass through the quad edges:
/// the rendered image maps exactly onto the quad.

use glam::{Mat4, Vec3, Vec4};
use super::surface_transform::MirrorFrame;

/// Position of the viewer mirrored through the reflective face.
pub fn reflect_viewer_position(frame: &MirrorFrame, viewer: Vec3) -> Vec3 {
    let distance = frame.forward.dot(viewer - frame.center) - frame.half_extents.z;
    viewer - frame.forward * (2.0 * distance)
}

/// Far distance that keeps everything the viewer could see.
///
/// `forward_offset` is the reflection's signed distance from the mirror
/// centre along the mirror forward axis (negative behind the mirror).
pub fn derived_far(viewer_far: f32, forward_offset: f32) -> f32 {
    viewer_far - 2.0 * forward_offset
}

/// Six `glFrustum` parameters of the reflection viewpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObliqueFrustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl ObliqueFrustum {
    /// Frustum for a reflection at `reflection_position` through the quad
    /// described by `frame` (normally the shrunk quad).
    ///
    /// `far_override` replaces the far distance derived from `viewer_far`.
    pub fn from_mirror(
        frame: &MirrorFrame,
        reflection_position: Vec3,
        viewer_far: f32,
        far_override: Option<f32>,
    ) -> Self {
        let offset = reflection_position - frame.center;
        let right_offset = frame.right.dot(offset);
        let up_offset = frame.up.dot(offset);
        let forward_offset = frame.forward.dot(offset);
        let he = frame.half_extents;

        Self {
            left: -he.x - right_offset,
            right: he.x - right_offset,
            bottom: -he.y - up_offset,
            top: he.y - up_offset,
            near: he.z - forward_offset,
            far: far_override.unwrap_or_else(|| derived_far(viewer_far, forward_offset)),
        }
    }

    /// `true` if the matrix would be singular or flipped.
    pub fn is_degenerate(&self) -> bool {
        let values = [self.left, self.right, self.bottom, self.top, self.near, self.far];
        if values.iter().any(|v| !v.is_finite()) {
            return true;
        }
        self.right - self.left <= f32::EPSILON
            || self.top - self.bottom <= f32::EPSILON
            || self.near <= 0.0
            || self.far <= self.near
    }

    /// Column-major OpenGL off-axis projection.
    pub fn to_projection_matrix(&self) -> Mat4 {
        let (l, r, b, t, n, f) = (self.left, self.right, self.bottom, self.top, self.near, self.far);
        Mat4::from_cols(
            Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
            Vec4::new((r + l) / (r - l), (t + b) / (t - b), (f + n) / (n - f), -1.0),
            Vec4::new(0.0, 0.0, 2.0 * f * n / (n - f), 0.0),
        )
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
