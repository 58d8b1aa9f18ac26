/// RenderContext - per-scene state of the mirror core.
///
/// Owns every viewpoint, render target and mirror of one scene, plus the
/// recursion guard, the per-mirror reflection pools, pending snapshots,
/// the eviction queue and the frame clock. Nothing is process-wide: two
/// contexts never see each other's state.
///
/// The host drives it through its `Renderer` implementation:
///
/// ```text
/// render_viewpoint(ctx, V)
///   ctx.on_surface_about_to_render(self, mirror, V)   // per visible mirror
///     -> render_viewpoint(ctx, R)                      // nested reflection
///   ctx.on_viewer_pre_render(V)
///   draw
///   ctx.on_viewer_post_render(V)
/// ```

use std::time::Duration;
use glam::Quat;
use rustc_hash::FxHashSet;
use slotmap::{SecondaryMap, SlotMap};
use crate::error::{log_and_return_error, Error, Result};
use crate::{mirror_debug, mirror_info, mirror_trace, mirror_warn};
use crate::mirror::{
    apply_shrink, cull, reflect_viewer_position, shrink_bounds, CullDecision, MirrorConfig,
    MirrorKey, MirrorSurface, ObliqueFrustum, ObserverKey, PreRenderEvent, SurfaceTransform,
};
use crate::pool::{EvictionQueue, EvictionTask, PooledResource, ReflectionPool};
use crate::renderer::Renderer;
use crate::target::{RenderTargetDesc, RenderTargetKey, TargetManager};
use crate::viewpoint::{Viewpoint, ViewpointKey};
use super::recursion_guard::RecursionGuard;
use super::snapshot::{RenderSnapshot, SnapshotStack};

const SOURCE: &str = "mirror3d::RenderContext";

/// Nested reflection renders allowed in one chain
pub const DEFAULT_MAX_RECURSION_DEPTH: u32 = 7;

// ============================================================================
// Configuration and results
// ============================================================================

/// Context-wide settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextConfig {
    /// Nested reflection renders allowed in one chain (0 = fallback only)
    pub max_recursion_depth: u32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}

/// Everything create_mirror() needs
///
/// `transform` and `default_viewpoint` are required; they are options so
/// a missing collaborator is reported as a configuration error.
#[derive(Debug, Clone, Default)]
pub struct MirrorDesc {
    pub transform: Option<SurfaceTransform>,
    /// Host viewpoint used as the first reflection viewpoint
    pub default_viewpoint: Option<ViewpointKey>,
    pub config: MirrorConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The viewer is one of the mirror's own reflection viewpoints
    SelfView,
    ViewerBehind,
    OutOfView,
    /// The oblique frustum would be singular or flipped
    DegenerateProjection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A reflection was rendered into `target`
    Rendered { reflection: ViewpointKey, target: RenderTargetKey },
    /// Recursion limit reached, `target` holds the no-reflection color
    Fallback { target: RenderTargetKey },
    Skipped(SkipReason),
}

/// Handle returned by subscribe_pre_render()
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    mirror: MirrorKey,
    observer: ObserverKey,
}

impl SubscriptionHandle {
    pub fn mirror(&self) -> MirrorKey {
        self.mirror
    }
}

// ============================================================================
// RenderContext
// ============================================================================

pub struct RenderContext {
    /// Frame clock, advanced by the host
    clock: Duration,
    viewpoints: SlotMap<ViewpointKey, Viewpoint>,
    targets: TargetManager,
    mirrors: SlotMap<MirrorKey, MirrorSurface>,
    /// One pool per mirror, seeded with its default instance
    pools: SecondaryMap<MirrorKey, ReflectionPool>,
    recursion: RecursionGuard,
    snapshots: SnapshotStack,
    evictions: EvictionQueue,
    /// Reflection viewpoints currently rendering, innermost last
    active_viewpoints: Vec<ViewpointKey>,
}

impl RenderContext {
    pub fn new(config: ContextConfig) -> Self {
        Self {
            clock: Duration::ZERO,
            viewpoints: SlotMap::with_key(),
            targets: TargetManager::new(),
            mirrors: SlotMap::with_key(),
            pools: SecondaryMap::new(),
            recursion: RecursionGuard::new(config.max_recursion_depth),
            snapshots: SnapshotStack::new(),
            evictions: EvictionQueue::new(),
            active_viewpoints: Vec::new(),
        }
    }

    // ===== FRAME CLOCK =====

    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn advance_time(&mut self, delta: Duration) {
        self.clock += delta;
    }

    // ===== RECURSION =====

    pub fn recursion_depth(&self) -> u32 {
        self.recursion.depth()
    }

    pub fn max_recursion_depth(&self) -> u32 {
        self.recursion.max_depth()
    }

    pub fn set_max_recursion_depth(&mut self, max_depth: u32) {
        self.recursion.set_max_depth(max_depth);
    }

    /// Deepest reflection nesting reached since the last end_frame()
    pub fn deepest_recursion(&self) -> u32 {
        self.recursion.deepest()
    }

    /// Reflection viewpoint currently rendering, if any
    pub fn active_viewpoint(&self) -> Option<ViewpointKey> {
        self.active_viewpoints.last().copied()
    }

    // ===== VIEWPOINTS =====

    pub fn create_viewpoint(&mut self, viewpoint: Viewpoint) -> ViewpointKey {
        self.viewpoints.insert(viewpoint)
    }

    pub fn viewpoint(&self, key: ViewpointKey) -> Option<&Viewpoint> {
        self.viewpoints.get(key)
    }

    pub fn viewpoint_mut(&mut self, key: ViewpointKey) -> Option<&mut Viewpoint> {
        self.viewpoints.get_mut(key)
    }

    pub fn viewpoint_count(&self) -> usize {
        self.viewpoints.len()
    }

    /// Destroy a host viewpoint
    ///
    /// Pending snapshots recorded for it are reverted first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` for an unknown key or a viewpoint owned by
    /// a mirror (destroy the mirror instead).
    pub fn destroy_viewpoint(&mut self, key: ViewpointKey) -> Result<Viewpoint> {
        if self.pools.values().any(|pool| pool.contains_viewpoint(key)) {
            return Err(log_and_return_error(SOURCE, Error::InvalidResource(format!(
                "Viewpoint {:?} is owned by a MirrorSurface", key))));
        }
        let pending = self.snapshots.take(key);
        self.revert_snapshots(&pending);
        self.viewpoints.remove(key).ok_or_else(|| unknown_viewpoint(key))
    }

    // ===== RENDER TARGETS =====

    /// Create a host render target (e.g. for a primary viewer)
    pub fn create_render_target(
        &mut self,
        renderer: &mut dyn Renderer,
        desc: &RenderTargetDesc,
    ) -> Result<RenderTargetKey> {
        self.targets.create_render_target(renderer, desc)
    }

    /// Destroy a host render target
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` for an unknown key or a target owned by a
    /// mirror pool.
    pub fn destroy_render_target(
        &mut self,
        renderer: &mut dyn Renderer,
        key: RenderTargetKey,
    ) -> Result<()> {
        if self.pools.values().any(|pool| pool.contains_target(key)) {
            return Err(log_and_return_error(SOURCE, Error::InvalidResource(format!(
                "RenderTarget {:?} is owned by a MirrorSurface", key))));
        }
        match self.targets.destroy_render_target(renderer, key) {
            Some(_) => Ok(()),
            None => Err(log_and_return_error(SOURCE, Error::InvalidResource(format!(
                "Unknown RenderTarget {:?}", key)))),
        }
    }

    pub fn targets(&self) -> &TargetManager {
        &self.targets
    }

    // ===== MIRRORS =====

    /// Register a mirror surface
    ///
    /// If the default viewpoint already renders into a target, that target
    /// becomes the mirror's default target. Otherwise one is created at the
    /// configured resolution and bound to the viewpoint. Either way it is
    /// the material's main texture and seeds the pool.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` for a missing transform or viewpoint, a zero
    /// resolution, or a viewpoint or target already used by another mirror.
    /// `InvalidResource` for unknown keys. Host allocation errors are
    /// returned unchanged.
    pub fn create_mirror(
        &mut self,
        renderer: &mut dyn Renderer,
        desc: MirrorDesc,
    ) -> Result<MirrorKey> {
        let transform = desc.transform.ok_or_else(|| init_failed(
            "MirrorSurface has no surface transform".to_string()))?;
        let viewpoint_key = desc.default_viewpoint.ok_or_else(|| init_failed(
            "MirrorSurface has no default viewpoint".to_string()))?;
        let config = desc.config;
        if config.width == 0 || config.height == 0 {
            return Err(init_failed(format!(
                "MirrorSurface resolution {}x{} is invalid", config.width, config.height)));
        }

        let existing_target = match self.viewpoints.get(viewpoint_key) {
            Some(viewpoint) => viewpoint.target(),
            None => return Err(unknown_viewpoint(viewpoint_key)),
        };
        if self.pools.values().any(|pool| pool.contains_viewpoint(viewpoint_key)) {
            return Err(init_failed(format!(
                "Viewpoint {:?} already reflects another MirrorSurface", viewpoint_key)));
        }

        let (target, owns_target) = match existing_target {
            Some(target) => {
                if !self.targets.contains(target) {
                    return Err(log_and_return_error(SOURCE, Error::InvalidResource(format!(
                        "Viewpoint {:?} renders into unknown RenderTarget {:?}", viewpoint_key, target))));
                }
                if self.pools.values().any(|pool| pool.contains_target(target)) {
                    return Err(init_failed(format!(
                        "RenderTarget {:?} already belongs to another MirrorSurface", target)));
                }
                (target, false)
            }
            None => (self.targets.create_render_target(renderer, &config.target_desc())?, true),
        };

        if let Some(viewpoint) = self.viewpoints.get_mut(viewpoint_key) {
            viewpoint.set_target(Some(target));
            viewpoint.set_enabled(false);
        }

        let key = self.mirrors.insert(MirrorSurface::new(
            transform, viewpoint_key, target, owns_target, config,
        ));
        self.pools.insert(key, ReflectionPool::new(viewpoint_key, target));

        mirror_info!(SOURCE, "MirrorSurface {:?} created ({}x{} {:?}, viewpoint {:?})",
            key, config.width, config.height, config.format, viewpoint_key);
        Ok(key)
    }

    /// Unregister a mirror surface
    ///
    /// Cancels its pending evictions, destroys the pool-generated
    /// viewpoints and targets and the default target if the mirror created
    /// it, purges snapshots that reference it and drops its observers. The
    /// default viewpoint goes back to the host, enabled.
    pub fn destroy_mirror(&mut self, renderer: &mut dyn Renderer, key: MirrorKey) -> Result<()> {
        let (default_viewpoint, default_target, owns_target) = match self.mirrors.get(key) {
            Some(surface) => (surface.default_viewpoint(), surface.default_target(), surface.owns_default_target()),
            None => return Err(unknown_mirror(key)),
        };

        let cancelled = self.evictions.cancel_owner(key);
        self.snapshots.purge_mirror(key);

        if let Some(pool) = self.pools.remove(key) {
            for viewpoint in pool.generated_viewpoints() {
                self.viewpoints.remove(viewpoint);
                let orphaned = self.snapshots.take(viewpoint);
                self.revert_snapshots(&orphaned);
            }
            for target in pool.generated_targets() {
                self.targets.destroy_render_target(renderer, target);
            }
        }

        if owns_target {
            self.targets.destroy_render_target(renderer, default_target);
        }
        if let Some(viewpoint) = self.viewpoints.get_mut(default_viewpoint) {
            if owns_target {
                viewpoint.set_target(None);
            }
            viewpoint.set_enabled(true);
        }

        self.mirrors.remove(key);
        mirror_info!(SOURCE, "MirrorSurface {:?} destroyed ({} pending eviction(s) cancelled)",
            key, cancelled);
        Ok(())
    }

    pub fn mirror(&self, key: MirrorKey) -> Option<&MirrorSurface> {
        self.mirrors.get(key)
    }

    pub fn mirror_mut(&mut self, key: MirrorKey) -> Option<&mut MirrorSurface> {
        self.mirrors.get_mut(key)
    }

    pub fn mirror_keys(&self) -> impl Iterator<Item = MirrorKey> + '_ {
        self.mirrors.keys()
    }

    pub fn mirror_count(&self) -> usize {
        self.mirrors.len()
    }

    pub fn pool(&self, key: MirrorKey) -> Option<&ReflectionPool> {
        self.pools.get(key)
    }

    pub fn pending_snapshot_count(&self, viewer: ViewpointKey) -> usize {
        self.snapshots.len(viewer)
    }

    pub fn pending_eviction_count(&self) -> usize {
        self.evictions.len()
    }

    // ===== OBSERVERS =====

    /// Call `observer` right before each reflection render of `mirror`
    pub fn subscribe_pre_render<F>(&mut self, mirror: MirrorKey, observer: F) -> Result<SubscriptionHandle>
    where
        F: FnMut(&PreRenderEvent) + 'static,
    {
        let surface = self.mirrors.get_mut(mirror).ok_or_else(|| unknown_mirror(mirror))?;
        let observer = surface.add_observer(Box::new(observer));
        Ok(SubscriptionHandle { mirror, observer })
    }

    /// Returns false if the subscription (or its mirror) no longer exists.
    pub fn unsubscribe_pre_render(&mut self, handle: SubscriptionHandle) -> bool {
        match self.mirrors.get_mut(handle.mirror) {
            Some(surface) => surface.remove_observer(handle.observer),
            None => false,
        }
    }

    // ===== RENDER HOOKS =====

    /// `viewer` is about to sample `mirror`: render its reflection now
    ///
    /// Culls, shrinks and places a reflection viewpoint, then renders it
    /// through `renderer` (which may re-enter this method for mirrors
    /// visible in the reflection). The result is bound to the mirror only
    /// while `viewer` itself renders, between `on_viewer_pre_render` and
    /// `on_viewer_post_render`.
    ///
    /// # Errors
    ///
    /// `InvalidResource` for unknown keys. Host failures (target creation,
    /// fill, nested render) are returned unchanged.
    pub fn on_surface_about_to_render(
        &mut self,
        renderer: &mut dyn Renderer,
        mirror: MirrorKey,
        viewer: ViewpointKey,
    ) -> Result<RenderOutcome> {
        let pool = self.pools.get(mirror).ok_or_else(|| unknown_mirror(mirror))?;
        if !self.viewpoints.contains_key(viewer) {
            return Err(unknown_viewpoint(viewer));
        }
        if pool.contains_viewpoint(viewer) {
            mirror_trace!(SOURCE, "{:?} skipped: viewer {:?} is its own reflection", mirror, viewer);
            return Ok(RenderOutcome::Skipped(SkipReason::SelfView));
        }

        if self.recursion.is_exhausted() {
            return self.render_fallback(renderer, mirror, viewer);
        }

        self.recursion.enter();
        let result = self.render_reflection(renderer, mirror, viewer);
        self.recursion.exit();
        result
    }

    /// Bind every pending snapshot of `viewer` to its mirror.
    ///
    /// Returns the number of snapshots applied.
    pub fn on_viewer_pre_render(&mut self, viewer: ViewpointKey) -> usize {
        let Some(pending) = self.snapshots.get_mut(viewer) else {
            return 0;
        };
        let mut applied = 0;
        for snapshot in pending.iter_mut() {
            if let Some(surface) = self.mirrors.get_mut(snapshot.mirror) {
                snapshot.apply(surface);
                applied += 1;
            }
        }
        applied
    }

    /// Restore every mirror `viewer` sampled and release its textures.
    pub fn on_viewer_post_render(&mut self, viewer: ViewpointKey) {
        let pending = self.snapshots.take(viewer);
        self.revert_snapshots(&pending);
    }

    // ===== FRAME END =====

    /// Per-frame housekeeping
    ///
    /// Reverts snapshots whose viewer never reached post-render, evicts
    /// expired pool instances and resets the recursion statistics.
    pub fn end_frame(&mut self, renderer: &mut dyn Renderer) {
        for viewer in self.snapshots.viewers() {
            let stray = self.snapshots.take(viewer);
            mirror_warn!(SOURCE, "{} snapshot(s) of viewer {:?} were never reverted", stray.len(), viewer);
            self.revert_snapshots(&stray);
        }
        self.sweep_evictions(renderer);
        self.recursion.reset_stats();
    }

    /// Destroy everything the context owns
    pub fn clear(&mut self, renderer: &mut dyn Renderer) {
        self.snapshots = SnapshotStack::new();
        self.evictions.clear();
        self.pools.clear();
        self.mirrors.clear();
        self.targets.clear(renderer);
        self.viewpoints.clear();
        self.active_viewpoints.clear();
    }

    // ===== INTERNALS =====

    fn render_reflection(
        &mut self,
        renderer: &mut dyn Renderer,
        mirror_key: MirrorKey,
        viewer_key: ViewpointKey,
    ) -> Result<RenderOutcome> {
        let now = self.clock;
        let viewer = self.viewpoints.get(viewer_key).ok_or_else(|| unknown_viewpoint(viewer_key))?;
        let viewer_position = viewer.position();
        let viewer_far = viewer.far();
        let frustum = viewer.frustum();

        let surface = self.mirrors.get(mirror_key).ok_or_else(|| unknown_mirror(mirror_key))?;
        let options = *surface.options();
        let ttl = surface.config().pool_ttl;
        let canonical = surface.canonical_transform();
        let frame = canonical.frame();

        match cull(&frame, viewer_position, frustum.as_ref(), &options) {
            CullDecision::Visible => {}
            CullDecision::ViewerBehind => {
                mirror_trace!(SOURCE, "{:?} skipped: viewer {:?} is behind it", mirror_key, viewer_key);
                return Ok(RenderOutcome::Skipped(SkipReason::ViewerBehind));
            }
            CullDecision::OutOfView => {
                mirror_trace!(SOURCE, "{:?} skipped: outside the view of {:?}", mirror_key, viewer_key);
                return Ok(RenderOutcome::Skipped(SkipReason::OutOfView));
            }
        }

        let reflection_position = reflect_viewer_position(&frame, viewer_position);

        let mut shrunk = canonical;
        if options.shrink_when_viewer_close {
            if let Some(frustum) = frustum.as_ref() {
                let bounds = shrink_bounds(&frame, viewer_position, frustum);
                apply_shrink(&mut shrunk, &frame, &bounds);
            }
        }

        let oblique = ObliqueFrustum::from_mirror(
            &shrunk.frame(), reflection_position, viewer_far, options.far_clip_override,
        );
        if oblique.is_degenerate() {
            mirror_trace!(SOURCE, "{:?} skipped: degenerate reflection frustum {:?}", mirror_key, oblique);
            return Ok(RenderOutcome::Skipped(SkipReason::DegenerateProjection));
        }

        let reflection = self.acquire_viewpoint(mirror_key, now, ttl)?;
        let target = match self.acquire_target(renderer, mirror_key, now, ttl) {
            Ok(target) => target,
            Err(err) => {
                self.release_viewpoint(mirror_key, reflection);
                return Err(err);
            }
        };

        if let Some(viewpoint) = self.viewpoints.get_mut(reflection) {
            viewpoint.set_position(reflection_position);
            viewpoint.set_parent_rotation(shrunk.world_rotation());
            viewpoint.set_local_rotation(Quat::IDENTITY);
            viewpoint.set_projection(oblique.to_projection_matrix());
            viewpoint.set_clip_planes(oblique.near, oblique.far);
            viewpoint.set_target(Some(target));
            viewpoint.set_enabled(true);
        }

        if let Some(surface) = self.mirrors.get_mut(mirror_key) {
            surface.set_transient_transform(shrunk);
            if let (Some(shrink_scale_ratio), Some(position_change_ratio)) =
                (surface.shrink_scale_ratio(), surface.position_change_ratio())
            {
                surface.notify_observers(&PreRenderEvent {
                    mirror: mirror_key,
                    viewer: viewer_key,
                    reflection,
                    shrink_scale_ratio,
                    position_change_ratio,
                });
            }
            surface.restore_canonical();
        }

        self.snapshots.push(viewer_key, RenderSnapshot::new(
            mirror_key, shrunk.local_position(), shrunk.local_scale(), target,
        ));

        self.active_viewpoints.push(reflection);
        let result = renderer.render_viewpoint(self, reflection);
        self.active_viewpoints.pop();

        if let Some(viewpoint) = self.viewpoints.get_mut(reflection) {
            viewpoint.set_enabled(false);
        }
        self.release_viewpoint(mirror_key, reflection);
        result?;

        Ok(RenderOutcome::Rendered { reflection, target })
    }

    fn render_fallback(
        &mut self,
        renderer: &mut dyn Renderer,
        mirror_key: MirrorKey,
        viewer_key: ViewpointKey,
    ) -> Result<RenderOutcome> {
        let now = self.clock;
        let surface = self.mirrors.get(mirror_key).ok_or_else(|| unknown_mirror(mirror_key))?;
        let ttl = surface.config().pool_ttl;
        let color = surface.options().no_reflection_color;
        let (position, scale) = (surface.canonical_position(), surface.canonical_scale());

        let target = self.acquire_target(renderer, mirror_key, now, ttl)?;
        if let Err(err) = renderer.fill_render_target(target, color) {
            self.release_target(mirror_key, target);
            return Err(log_and_return_error(SOURCE, err));
        }
        self.snapshots.push(viewer_key, RenderSnapshot::new(mirror_key, position, scale, target));

        mirror_debug!(SOURCE, "Recursion limit {} reached: {:?} shows the no-reflection color for {:?}",
            self.recursion.max_depth(), mirror_key, viewer_key);
        Ok(RenderOutcome::Fallback { target })
    }

    /// Free reflection viewpoint of `mirror`, cloning the default if all
    /// are busy. Clones never inherit the default's render target.
    fn acquire_viewpoint(&mut self, mirror: MirrorKey, now: Duration, ttl: Duration) -> Result<ViewpointKey> {
        let Self { pools, viewpoints, evictions, .. } = self;
        let pool = pools.get_mut(mirror).ok_or_else(|| unknown_mirror(mirror))?;
        let acquired = pool.acquire_viewpoint(now, ttl, |source| {
            let mut clone = viewpoints.get(source).cloned().ok_or_else(|| unknown_viewpoint(source))?;
            clone.set_target(None);
            Ok(viewpoints.insert(clone))
        })?;

        if acquired.generated {
            evictions.schedule(EvictionTask {
                owner: mirror,
                resource: PooledResource::Viewpoint(acquired.key),
                due: now + ttl,
            });
            mirror_debug!(SOURCE, "Pool of {:?} grew to {} viewpoint(s)", mirror, pool.viewpoint_count());
        }
        Ok(acquired.key)
    }

    /// Free render target of `mirror`, cloning the default if all are busy.
    fn acquire_target(
        &mut self,
        renderer: &mut dyn Renderer,
        mirror: MirrorKey,
        now: Duration,
        ttl: Duration,
    ) -> Result<RenderTargetKey> {
        let Self { pools, targets, evictions, .. } = self;
        let pool = pools.get_mut(mirror).ok_or_else(|| unknown_mirror(mirror))?;
        let acquired = pool.acquire_render_target(now, ttl, |source| targets.clone_render_target(renderer, source))?;

        if acquired.generated {
            evictions.schedule(EvictionTask {
                owner: mirror,
                resource: PooledResource::RenderTarget(acquired.key),
                due: now + ttl,
            });
            mirror_debug!(SOURCE, "Pool of {:?} grew to {} render target(s)", mirror, pool.target_count());
        }
        Ok(acquired.key)
    }

    fn release_viewpoint(&mut self, mirror: MirrorKey, key: ViewpointKey) {
        if let Some(record) = self.pools.get_mut(mirror).and_then(|pool| pool.viewpoint_record_mut(key)) {
            record.release();
        }
    }

    fn release_target(&mut self, mirror: MirrorKey, key: RenderTargetKey) {
        if let Some(record) = self.pools.get_mut(mirror).and_then(|pool| pool.target_record_mut(key)) {
            record.release();
        }
    }

    /// Undo `snapshots` in order
    ///
    /// Every mirror goes back to its canonical transform. Its texture goes
    /// back to the value saved by the first snapshot that was applied to it.
    fn revert_snapshots(&mut self, snapshots: &[RenderSnapshot]) {
        let mut restored: FxHashSet<MirrorKey> = FxHashSet::default();
        for snapshot in snapshots {
            self.release_target(snapshot.mirror, snapshot.target);
            let Some(surface) = self.mirrors.get_mut(snapshot.mirror) else {
                continue;
            };
            surface.restore_canonical();
            if let Some(previous) = snapshot.previous_texture() {
                if restored.insert(snapshot.mirror) {
                    surface.material_mut().set_main_texture(previous);
                }
            }
        }
    }

    /// Destroy pool instances whose TTL elapsed unused; re-arm the others.
    fn sweep_evictions(&mut self, renderer: &mut dyn Renderer) {
        let now = self.clock;
        for task in self.evictions.take_due(now) {
            let Some(pool) = self.pools.get_mut(task.owner) else {
                continue;
            };
            let record = match task.resource {
                PooledResource::Viewpoint(key) => pool.viewpoint_record(key).copied(),
                PooledResource::RenderTarget(key) => pool.target_record(key).copied(),
            };
            let Some(record) = record else {
                continue;
            };

            if !record.is_expired(now) {
                if let Some(due) = record.next_check(now) {
                    self.evictions.schedule(task.rearmed(due));
                }
                continue;
            }

            match task.resource {
                PooledResource::Viewpoint(key) => {
                    pool.remove_viewpoint(key);
                    self.viewpoints.remove(key);
                    let orphaned = self.snapshots.take(key);
                    self.revert_snapshots(&orphaned);
                    mirror_debug!(SOURCE, "Evicted viewpoint {:?} from the pool of {:?}", key, task.owner);
                }
                PooledResource::RenderTarget(key) => {
                    pool.remove_target(key);
                    for viewpoint in self.viewpoints.values_mut() {
                        if viewpoint.target() == Some(key) {
                            viewpoint.set_target(None);
                        }
                    }
                    self.targets.destroy_render_target(renderer, key);
                    mirror_debug!(SOURCE, "Evicted render target {:?} from the pool of {:?}", key, task.owner);
                }
            }
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}

fn unknown_mirror(key: MirrorKey) -> Error {
    log_and_return_error(SOURCE, Error::InvalidResource(format!("Unknown MirrorSurface {:?}", key)))
}

fn unknown_viewpoint(key: ViewpointKey) -> Error {
    log_and_return_error(SOURCE, Error::InvalidResource(format!("Unknown Viewpoint {:?}", key)))
}

fn init_failed(message: String) -> Error {
    log_and_return_error(SOURCE, Error::InitializationFailed(message))
}

#[cfg(test)]
#[path = "render_context_tests.rs"]
mod tests;
