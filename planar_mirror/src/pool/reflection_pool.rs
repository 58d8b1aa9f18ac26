/// Per-mirror pool of reflection viewpoints and render targets.
///
/// The default instance (the mirror's own viewpoint and target) is always
/// first and never evicted. Clones are only made when every existing entry
/// is in use, which happens when the same mirror is visible at several
/// recursion levels or from several viewers in one frame.

use std::time::Duration;
use crate::error::Result;
use crate::target::RenderTargetKey;
use crate::viewpoint::ViewpointKey;
use super::usage_record::UsageRecord;

/// Result of an acquire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquired<K> {
    pub key: K,
    /// `true` if the entry was cloned for this acquire
    pub generated: bool,
}

/// Linear pool: first free entry wins.
#[derive(Debug, Clone)]
struct Entries<K: Copy + PartialEq> {
    entries: Vec<(K, UsageRecord)>,
}

impl<K: Copy + PartialEq> Entries<K> {
    fn new(default: K) -> Self {
        Self { entries: vec![(default, UsageRecord::infinite())] }
    }

    fn acquire<F>(&mut self, now: Duration, ttl: Duration, clone_default: F) -> Result<Acquired<K>>
    where
        F: FnOnce(K) -> Result<K>,
    {
        if let Some((key, record)) = self.entries.iter_mut().find(|(_, r)| !r.is_in_use()) {
            record.mark_used(now);
            return Ok(Acquired { key: *key, generated: false });
        }

        let key = clone_default(self.entries[0].0)?;
        let mut record = UsageRecord::with_ttl(now, ttl);
        record.mark_used(now);
        self.entries.push((key, record));
        Ok(Acquired { key, generated: true })
    }

    fn record(&self, key: K) -> Option<&UsageRecord> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, r)| r)
    }

    fn record_mut(&mut self, key: K) -> Option<&mut UsageRecord> {
        self.entries.iter_mut().find(|(k, _)| *k == key).map(|(_, r)| r)
    }

    /// Remove a generated entry. The default entry cannot be removed.
    fn remove(&mut self, key: K) -> bool {
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(0) | None => false,
            Some(index) => {
                self.entries.remove(index);
                true
            }
        }
    }

    fn generated(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().skip(1).map(|(k, _)| *k)
    }
}

#[derive(Debug, Clone)]
pub struct ReflectionPool {
    viewpoints: Entries<ViewpointKey>,
    targets: Entries<RenderTargetKey>,
}

impl ReflectionPool {
    /// Pool seeded with the mirror's default instance (infinite TTL).
    pub fn new(default_viewpoint: ViewpointKey, default_target: RenderTargetKey) -> Self {
        Self {
            viewpoints: Entries::new(default_viewpoint),
            targets: Entries::new(default_target),
        }
    }

    pub fn default_viewpoint(&self) -> ViewpointKey {
        self.viewpoints.entries[0].0
    }

    pub fn default_target(&self) -> RenderTargetKey {
        self.targets.entries[0].0
    }

    // ===== VIEWPOINTS =====

    /// First free viewpoint, or a clone of the default one.
    ///
    /// The returned viewpoint is marked in use at `now`.
    pub fn acquire_viewpoint<F>(&mut self, now: Duration, ttl: Duration, clone_default: F) -> Result<Acquired<ViewpointKey>>
    where
        F: FnOnce(ViewpointKey) -> Result<ViewpointKey>,
    {
        self.viewpoints.acquire(now, ttl, clone_default)
    }

    pub fn contains_viewpoint(&self, key: ViewpointKey) -> bool {
        self.viewpoints.record(key).is_some()
    }

    pub fn viewpoint_record(&self, key: ViewpointKey) -> Option<&UsageRecord> {
        self.viewpoints.record(key)
    }

    pub fn viewpoint_record_mut(&mut self, key: ViewpointKey) -> Option<&mut UsageRecord> {
        self.viewpoints.record_mut(key)
    }

    pub fn remove_viewpoint(&mut self, key: ViewpointKey) -> bool {
        self.viewpoints.remove(key)
    }

    pub fn viewpoint_count(&self) -> usize {
        self.viewpoints.entries.len()
    }

    pub fn generated_viewpoints(&self) -> Vec<ViewpointKey> {
        self.viewpoints.generated().collect()
    }

    // ===== RENDER TARGETS =====

    /// First free render target, or a clone of the default one.
    ///
    /// The returned target is marked in use at `now`.
    pub fn acquire_render_target<F>(&mut self, now: Duration, ttl: Duration, clone_default: F) -> Result<Acquired<RenderTargetKey>>
    where
        F: FnOnce(RenderTargetKey) -> Result<RenderTargetKey>,
    {
        self.targets.acquire(now, ttl, clone_default)
    }

    pub fn contains_target(&self, key: RenderTargetKey) -> bool {
        self.targets.record(key).is_some()
    }

    pub fn target_record(&self, key: RenderTargetKey) -> Option<&UsageRecord> {
        self.targets.record(key)
    }

    pub fn target_record_mut(&mut self, key: RenderTargetKey) -> Option<&mut UsageRecord> {
        self.targets.record_mut(key)
    }

    pub fn remove_target(&mut self, key: RenderTargetKey) -> bool {
        self.targets.remove(key)
    }

    pub fn target_count(&self) -> usize {
        self.targets.entries.len()
    }

    pub fn generated_targets(&self) -> Vec<RenderTargetKey> {
        self.targets.generated().collect()
    }
}

#[cfg(test)]
#[path = "reflection_pool_tests.rs"]
mod tests;
