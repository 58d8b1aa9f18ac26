/// Viewpoint - passive camera data.
///
/// Orientation is split into a parent rotation and a local rotation so a
/// reflection viewpoint can be "parented" to its mirror: the core sets the
/// parent rotation to the mirror's world rotation and resets the local
/// rotation to identity. Host viewers normally leave the parent at identity.
///
/// Conventions: right-handed, looking along local -Z, OpenGL clip space.

use glam::{Mat4, Quat, Vec3};
use slotmap::new_key_type;
use crate::geometry::{FrustumBounds, ViewFrustum};
use crate::target::RenderTargetKey;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a Viewpoint within a RenderContext.
    pub struct ViewpointKey;
}

#[derive(Debug, Clone)]
pub struct Viewpoint {
    position: Vec3,
    parent_rotation: Quat,
    local_rotation: Quat,
    projection: Mat4,
    near: f32,
    far: f32,
    enabled: bool,
    target: Option<RenderTargetKey>,
}

impl Viewpoint {
    /// Create a viewpoint from a position, world rotation and projection.
    ///
    /// Near/far are read back from the projection when it is a perspective
    /// matrix, and left at zero otherwise.
    pub fn new(position: Vec3, rotation: Quat, projection: Mat4) -> Self {
        let (near, far) = FrustumBounds::from_projection(&projection)
            .map(|b| (b.near, b.far))
            .unwrap_or((0.0, 0.0));
        Self {
            position,
            parent_rotation: Quat::IDENTITY,
            local_rotation: rotation,
            projection,
            near,
            far,
            enabled: true,
            target: None,
        }
    }

    /// Create a symmetric perspective viewpoint (`perspective_rh_gl`).
    pub fn perspective(
        position: Vec3,
        rotation: Quat,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut viewpoint = Self::new(position, rotation, Mat4::perspective_rh_gl(fov_y, aspect, near, far));
        viewpoint.near = near;
        viewpoint.far = far;
        viewpoint
    }

    // ===== GETTERS =====

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// World rotation (parent * local).
    pub fn rotation(&self) -> Quat {
        self.parent_rotation * self.local_rotation
    }

    pub fn parent_rotation(&self) -> Quat {
        self.parent_rotation
    }

    pub fn local_rotation(&self) -> Quat {
        self.local_rotation
    }

    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Viewing direction (local -Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// View matrix (inverse of the viewpoint's world transform).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position).inverse()
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Near clip distance.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip distance.
    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render target this viewpoint renders into, if any.
    pub fn target(&self) -> Option<RenderTargetKey> {
        self.target
    }

    /// Outward side planes in world orientation.
    ///
    /// `None` for orthographic or degenerate projections.
    pub fn frustum(&self) -> Option<ViewFrustum> {
        ViewFrustum::from_projection(&self.projection, self.right(), self.up(), self.forward())
    }

    // ===== SETTERS - store, compute nothing =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the world rotation, keeping the parent rotation.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.local_rotation = self.parent_rotation.inverse() * rotation;
    }

    pub fn set_parent_rotation(&mut self, rotation: Quat) {
        self.parent_rotation = rotation;
    }

    pub fn set_local_rotation(&mut self, rotation: Quat) {
        self.local_rotation = rotation;
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Bind the render target this viewpoint outputs to.
    pub fn set_target(&mut self, target: Option<RenderTargetKey>) {
        self.target = target;
    }
}

#[cfg(test)]
#[path = "viewpoint_tests.rs"]
mod tests;
