/// Render snapshots - per-viewer deferred mirror state.
///
/// A mirror renders its reflection before the viewer that sees it draws.
/// The shrunk transform and the bound texture are recorded here and only
/// applied while that viewer samples, so nested passes for other viewers
/// never observe them.
///
/// Snapshots for one viewer are appended in render order and drained FIFO.

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::mirror::{MirrorKey, MirrorSurface};
use crate::target::RenderTargetKey;
use crate::viewpoint::ViewpointKey;

/// State of one mirror as one viewer must see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
    pub mirror: MirrorKey,
    pub local_position: Vec3,
    pub local_scale: Vec3,
    /// Texture the reflection was rendered (or filled) into
    pub target: RenderTargetKey,
    applied: bool,
    previous_texture: Option<RenderTargetKey>,
}

impl RenderSnapshot {
    pub fn new(mirror: MirrorKey, local_position: Vec3, local_scale: Vec3, target: RenderTargetKey) -> Self {
        Self {
            mirror,
            local_position,
            local_scale,
            target,
            applied: false,
            previous_texture: None,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Main texture the mirror had before the first apply, `None` if the
    /// snapshot was never applied.
    pub fn previous_texture(&self) -> Option<Option<RenderTargetKey>> {
        self.applied.then_some(self.previous_texture)
    }

    /// Push the recorded transform and texture onto `mirror`.
    ///
    /// The pre-apply texture is saved on the first call only.
    pub fn apply(&mut self, mirror: &mut MirrorSurface) {
        if !self.applied {
            self.previous_texture = mirror.material().main_texture();
            self.applied = true;
        }
        mirror.set_local_position_and_scale(self.local_position, self.local_scale);
        mirror.material_mut().set_main_texture(Some(self.target));
    }
}

/// Pending snapshots, keyed by the viewer they were recorded for
#[derive(Debug, Clone, Default)]
pub struct SnapshotStack {
    by_viewer: FxHashMap<ViewpointKey, Vec<RenderSnapshot>>,
}

impl SnapshotStack {
    pub fn new() -> Self {
        Self { by_viewer: FxHashMap::default() }
    }

    pub fn push(&mut self, viewer: ViewpointKey, snapshot: RenderSnapshot) {
        self.by_viewer.entry(viewer).or_default().push(snapshot);
    }

    pub fn get(&self, viewer: ViewpointKey) -> &[RenderSnapshot] {
        self.by_viewer.get(&viewer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_mut(&mut self, viewer: ViewpointKey) -> Option<&mut Vec<RenderSnapshot>> {
        self.by_viewer.get_mut(&viewer)
    }

    /// Remove and return the snapshots of `viewer` in recording order.
    pub fn take(&mut self, viewer: ViewpointKey) -> Vec<RenderSnapshot> {
        self.by_viewer.remove(&viewer).unwrap_or_default()
    }

    /// Drop every snapshot that references `mirror`. Returns how many.
    pub fn purge_mirror(&mut self, mirror: MirrorKey) -> usize {
        let mut purged = 0;
        for list in self.by_viewer.values_mut() {
            let before = list.len();
            list.retain(|snapshot| snapshot.mirror != mirror);
            purged += before - list.len();
        }
        self.by_viewer.retain(|_, list| !list.is_empty());
        purged
    }

    /// Viewers that still have pending snapshots.
    pub fn viewers(&self) -> Vec<ViewpointKey> {
        self.by_viewer.keys().copied().collect()
    }

    pub fn len(&self, viewer: ViewpointKey) -> usize {
        self.by_viewer.get(&viewer).map_or(0, Vec::len)
    }

    pub fn total_len(&self) -> usize {
        self.by_viewer.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_viewer.is_empty()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
