/// MirrorSurface - a reflective quad registered in a RenderContext.
///
/// The surface keeps its canonical local position and scale. The core may
/// shrink the transform while preparing one reflection, and a snapshot may
/// apply the shrunk values while one viewer samples, but after every render
/// pass the transform is back to canonical.

use glam::{Mat4, Quat, Vec2, Vec3};
use slotmap::{new_key_type, SlotMap};
use crate::target::RenderTargetKey;
use crate::viewpoint::ViewpointKey;
use super::mirror_config::{MirrorConfig, MirrorOptions};
use super::surface_transform::SurfaceTransform;

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Stable key for a MirrorSurface within a RenderContext.
    pub struct MirrorKey;

    /// Key of one pre-render observer within its mirror.
    pub struct ObserverKey;
}

// ===== MATERIAL =====

/// Texture slot of the mirror material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialBinding {
    main_texture: Option<RenderTargetKey>,
}

impl MaterialBinding {
    pub fn main_texture(&self) -> Option<RenderTargetKey> {
        self.main_texture
    }

    pub fn set_main_texture(&mut self, texture: Option<RenderTargetKey>) {
        self.main_texture = texture;
    }
}

// ===== PRE-RENDER EVENT =====

/// Sent to observers right before a reflection viewpoint renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreRenderEvent {
    pub mirror: MirrorKey,
    /// Viewer the reflection is rendered for
    pub viewer: ViewpointKey,
    /// Reflection viewpoint about to render
    pub reflection: ViewpointKey,
    /// Current / canonical local scale (x, y)
    pub shrink_scale_ratio: Vec2,
    /// (current - canonical local position) / canonical local scale (x, y)
    pub position_change_ratio: Vec2,
}

pub type PreRenderObserver = Box<dyn FnMut(&PreRenderEvent)>;

// ===== MIRROR SURFACE =====

pub struct MirrorSurface {
    canonical_position: Vec3,
    canonical_scale: Vec3,
    transform: SurfaceTransform,
    material: MaterialBinding,
    default_viewpoint: ViewpointKey,
    default_target: RenderTargetKey,
    owns_default_target: bool,
    config: MirrorConfig,
    observers: SlotMap<ObserverKey, PreRenderObserver>,
}

impl MirrorSurface {
    /// Internal only - created via RenderContext::create_mirror()
    pub(crate) fn new(
        transform: SurfaceTransform,
        default_viewpoint: ViewpointKey,
        default_target: RenderTargetKey,
        owns_default_target: bool,
        config: MirrorConfig,
    ) -> Self {
        let mut material = MaterialBinding::default();
        material.set_main_texture(Some(default_target));
        Self {
            canonical_position: transform.local_position(),
            canonical_scale: transform.local_scale(),
            transform,
            material,
            default_viewpoint,
            default_target,
            owns_default_target,
            config,
            observers: SlotMap::with_key(),
        }
    }

    // ===== ACCESSORS =====

    pub fn transform(&self) -> &SurfaceTransform {
        &self.transform
    }

    pub fn canonical_position(&self) -> Vec3 {
        self.canonical_position
    }

    pub fn canonical_scale(&self) -> Vec3 {
        self.canonical_scale
    }

    /// Current transform with the canonical local position and scale.
    pub fn canonical_transform(&self) -> SurfaceTransform {
        let mut transform = self.transform;
        transform.set_local_position(self.canonical_position);
        transform.set_local_scale(self.canonical_scale);
        transform
    }

    pub fn is_canonical(&self) -> bool {
        self.transform.local_position() == self.canonical_position
            && self.transform.local_scale() == self.canonical_scale
    }

    pub fn material(&self) -> &MaterialBinding {
        &self.material
    }

    /// Host-provided viewpoint used as the first reflection viewpoint and
    /// as the template for pool clones.
    pub fn default_viewpoint(&self) -> ViewpointKey {
        self.default_viewpoint
    }

    pub fn default_target(&self) -> RenderTargetKey {
        self.default_target
    }

    /// `true` if the default target was created for this mirror (and is
    /// destroyed with it).
    pub fn owns_default_target(&self) -> bool {
        self.owns_default_target
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn options(&self) -> &MirrorOptions {
        &self.config.options
    }

    pub fn options_mut(&mut self) -> &mut MirrorOptions {
        &mut self.config.options
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ===== RATIOS =====

    /// Current local scale over canonical local scale (x, y).
    ///
    /// `None` when a canonical scale component is zero.
    pub fn shrink_scale_ratio(&self) -> Option<Vec2> {
        let (current, canonical) = (self.transform.local_scale(), self.canonical_scale);
        if canonical.x == 0.0 || canonical.y == 0.0 {
            return None;
        }
        Some(Vec2::new(current.x / canonical.x, current.y / canonical.y))
    }

    /// Local position change over canonical local scale (x, y).
    ///
    /// `None` when a canonical scale component is zero.
    pub fn position_change_ratio(&self) -> Option<Vec2> {
        let canonical = self.canonical_scale;
        if canonical.x == 0.0 || canonical.y == 0.0 {
            return None;
        }
        let delta = self.transform.local_position() - self.canonical_position;
        Some(Vec2::new(delta.x / canonical.x, delta.y / canonical.y))
    }

    // ===== HOST-SIDE EDITS =====

    /// Move the node the mirror is attached to. Canonical local values are kept.
    pub fn set_parent_transform(&mut self, parent: Mat4) {
        self.transform.set_parent(parent);
    }

    pub fn set_local_rotation(&mut self, rotation: Quat) {
        self.transform.set_local_rotation(rotation);
    }

    // ===== CORE-SIDE EDITS =====

    pub(crate) fn set_transient_transform(&mut self, transform: SurfaceTransform) {
        self.transform = transform;
    }

    pub(crate) fn set_local_position_and_scale(&mut self, position: Vec3, scale: Vec3) {
        self.transform.set_local_position(position);
        self.transform.set_local_scale(scale);
    }

    pub(crate) fn restore_canonical(&mut self) {
        self.transform.set_local_position(self.canonical_position);
        self.transform.set_local_scale(self.canonical_scale);
    }

    pub(crate) fn material_mut(&mut self) -> &mut MaterialBinding {
        &mut self.material
    }

    pub(crate) fn add_observer(&mut self, observer: PreRenderObserver) -> ObserverKey {
        self.observers.insert(observer)
    }

    pub(crate) fn remove_observer(&mut self, key: ObserverKey) -> bool {
        self.observers.remove(key).is_some()
    }

    pub(crate) fn notify_observers(&mut self, event: &PreRenderEvent) {
        for observer in self.observers.values_mut() {
            observer(event);
        }
    }
}

#[cfg(test)]
#[path = "mirror_surface_tests.rs"]
mod tests;
