/// Transform node of a mirror quad.
///
/// The quad is a unit square in its local XY plane, so its world half
/// extents are half the lossy scale. The parent matrix is whatever the
/// host attaches the mirror to; local values are what the core shrinks
/// and restores.

use glam::{Mat4, Quat, Vec3};

/// World-space description of a mirror quad at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorFrame {
    /// World position of the quad centre
    pub center: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// Reflective side normal (local -Z)
    pub forward: Vec3,
    /// Half of the lossy scale on each axis
    pub half_extents: Vec3,
}

impl MirrorFrame {
    /// Centre of the reflective face (offset by the half depth).
    pub fn front_center(&self) -> Vec3 {
        self.center + self.forward * self.half_extents.z
    }

    /// Signed distances of `point` from the reflective face centre along
    /// the right, up and forward axes.
    pub fn offsets_of(&self, point: Vec3) -> Vec3 {
        let d = point - self.front_center();
        Vec3::new(self.right.dot(d), self.up.dot(d), self.forward.dot(d))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    parent: Mat4,
    local_position: Vec3,
    local_rotation: Quat,
    local_scale: Vec3,
}

impl SurfaceTransform {
    /// Unparented transform.
    pub fn new(local_position: Vec3, local_rotation: Quat, local_scale: Vec3) -> Self {
        Self {
            parent: Mat4::IDENTITY,
            local_position,
            local_rotation,
            local_scale,
        }
    }

    /// Attach to a parent world matrix (rotation, uniform or per-axis scale, translation).
    pub fn with_parent(mut self, parent: Mat4) -> Self {
        self.parent = parent;
        self
    }

    // ===== LOCAL VALUES =====

    pub fn parent(&self) -> &Mat4 {
        &self.parent
    }

    pub fn local_position(&self) -> Vec3 {
        self.local_position
    }

    pub fn local_rotation(&self) -> Quat {
        self.local_rotation
    }

    pub fn local_scale(&self) -> Vec3 {
        self.local_scale
    }

    pub fn set_parent(&mut self, parent: Mat4) {
        self.parent = parent;
    }

    pub fn set_local_position(&mut self, position: Vec3) {
        self.local_position = position;
    }

    pub fn set_local_rotation(&mut self, rotation: Quat) {
        self.local_rotation = rotation;
    }

    pub fn set_local_scale(&mut self, scale: Vec3) {
        self.local_scale = scale;
    }

    // ===== WORLD VALUES =====

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.local_scale, self.local_rotation, self.local_position)
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.parent * self.local_matrix()
    }

    pub fn world_position(&self) -> Vec3 {
        self.parent.transform_point3(self.local_position)
    }

    /// Move so the world position becomes `position`.
    ///
    /// No-op when the parent matrix is singular.
    pub fn set_world_position(&mut self, position: Vec3) {
        if self.parent.determinant() == 0.0 {
            return;
        }
        self.local_position = self.parent.inverse().transform_point3(position);
    }

    pub fn parent_rotation(&self) -> Quat {
        let (_, rotation, _) = self.parent.to_scale_rotation_translation();
        rotation
    }

    pub fn world_rotation(&self) -> Quat {
        self.parent_rotation() * self.local_rotation
    }

    /// Per-axis scale of the parent.
    pub fn parent_lossy_scale(&self) -> Vec3 {
        Vec3::new(
            self.parent.x_axis.truncate().length(),
            self.parent.y_axis.truncate().length(),
            self.parent.z_axis.truncate().length(),
        )
    }

    /// World scale, ignoring skew.
    pub fn lossy_scale(&self) -> Vec3 {
        self.parent_lossy_scale() * self.local_scale
    }

    pub fn right(&self) -> Vec3 {
        self.world_rotation() * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.world_rotation() * Vec3::Y
    }

    pub fn forward(&self) -> Vec3 {
        self.world_rotation() * Vec3::NEG_Z
    }

    pub fn frame(&self) -> MirrorFrame {
        let rotation = self.world_rotation();
        MirrorFrame {
            center: self.world_position(),
            right: rotation * Vec3::X,
            up: rotation * Vec3::Y,
            forward: rotation * Vec3::NEG_Z,
            half_extents: self.lossy_scale().abs() * 0.5,
        }
    }
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::new(1.0, 1.0, 0.0))
    }
}

#[cfg(test)]
#[path = "surface_transform_tests.rs"]
mod tests;
