/// ViewFrustum - outward side planes of a perspective viewpoint.
///
/// Unlike a clip-space frustum, the planes here live in world orientation
/// but viewer-relative position: a point `p` must be passed as
/// `world_point - viewer_position`. Each side plane passes through the
/// viewer, so it is stored as a unit outward normal only.

use glam::{Mat4, Vec3};
use super::plane::is_outside_plane;

/// Near-plane bounds of an OpenGL-style perspective projection.
///
/// `left`/`right`/`bottom`/`top` are measured on the near plane, in view
/// space units, exactly as passed to a `glFrustum`-style builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl FrustumBounds {
    /// Recover the off-axis bounds from a right-handed OpenGL projection
    /// (`perspective_rh_gl` or an off-axis matrix of the same layout).
    ///
    /// Returns `None` for orthographic or degenerate matrices.
    pub fn from_projection(projection: &Mat4) -> Option<Self> {
        // m[row][col] notation; glam stores columns
        let m00 = projection.x_axis.x;
        let m11 = projection.y_axis.y;
        let m02 = projection.z_axis.x;
        let m12 = projection.z_axis.y;
        let m22 = projection.z_axis.z;
        let m32 = projection.z_axis.w;
        let m23 = projection.w_axis.z;

        if (m32 + 1.0).abs() > 1e-5 || m00 == 0.0 || m11 == 0.0 {
            return None;
        }
        if (m22 - 1.0).abs() < f32::EPSILON || (m22 + 1.0).abs() < f32::EPSILON {
            return None;
        }

        let near = m23 / (m22 - 1.0);
        let far = m23 / (m22 + 1.0);

        let bounds = Self {
            left: near * (m02 - 1.0) / m00,
            right: near * (m02 + 1.0) / m00,
            bottom: near * (m12 - 1.0) / m11,
            top: near * (m12 + 1.0) / m11,
            near,
            far,
        };

        let finite = [bounds.left, bounds.right, bounds.bottom, bounds.top, near, far]
            .iter()
            .all(|v| v.is_finite());
        if !finite || near <= 0.0 {
            return None;
        }

        Some(bounds)
    }
}

/// Outward side-plane normals plus the near plane of a viewpoint.
#[derive(Debug, Clone, Copy)]
pub struct ViewFrustum {
    pub top: Vec3,
    pub bottom: Vec3,
    pub left: Vec3,
    pub right: Vec3,
    /// Unit viewing direction
    pub forward: Vec3,
    /// Distance from the viewer to the near plane
    pub near: f32,
}

impl ViewFrustum {
    /// Build side planes from near-plane bounds and the viewer's world axes.
    pub fn from_bounds(bounds: &FrustumBounds, right: Vec3, up: Vec3, forward: Vec3) -> Self {
        let n = bounds.near;
        Self {
            right: (right * n - forward * bounds.right).normalize_or_zero(),
            left: (-right * n + forward * bounds.left).normalize_or_zero(),
            top: (up * n - forward * bounds.top).normalize_or_zero(),
            bottom: (-up * n + forward * bounds.bottom).normalize_or_zero(),
            forward,
            near: n,
        }
    }

    /// Extract the side planes of `projection` oriented by the given axes.
    ///
    /// Returns `None` if the projection is not a usable perspective matrix.
    pub fn from_projection(projection: &Mat4, right: Vec3, up: Vec3, forward: Vec3) -> Option<Self> {
        FrustumBounds::from_projection(projection)
            .map(|bounds| Self::from_bounds(&bounds, right, up, forward))
    }

    /// The four side normals in top, right, bottom, left order.
    pub fn side_planes(&self) -> [Vec3; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// `true` if the viewer-relative point lies behind the near plane.
    pub fn is_behind_near(&self, relative: Vec3) -> bool {
        (relative - self.forward * self.near).dot(self.forward) < 0.0
    }

    /// `true` if the viewer-relative point is strictly inside every side
    /// plane and in front of the near plane.
    pub fn contains_point(&self, relative: Vec3) -> bool {
        !self.is_behind_near(relative)
            && self.side_planes().iter().all(|n| relative.dot(*n) < 0.0)
    }

    /// `true` if the viewer-relative point is outside at least one side plane.
    pub fn is_outside_any_side(&self, relative: Vec3) -> bool {
        self.side_planes().iter().any(|n| is_outside_plane(relative, *n))
    }
}

#[cfg(test)]
#[path = "view_frustum_tests.rs"]
mod tests;
