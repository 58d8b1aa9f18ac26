/// Registry of render targets owned by a RenderContext.
///
/// Keeps the CPU-side description of every target and forwards allocation
/// and destruction to the host renderer under the same key.

use slotmap::SlotMap;
use crate::error::{log_and_return_error, Result};
use crate::mirror_bail;
use crate::renderer::Renderer;
use super::render_target::{RenderTarget, RenderTargetDesc, RenderTargetKey};

pub struct TargetManager {
    render_targets: SlotMap<RenderTargetKey, RenderTarget>,
}

impl TargetManager {
    /// Create a new empty target manager
    pub fn new() -> Self {
        Self {
            render_targets: SlotMap::with_key(),
        }
    }

    /// Create a new render target
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor has a zero dimension, or the
    /// host allocation error unchanged (logged, the key is released).
    pub fn create_render_target(
        &mut self,
        renderer: &mut dyn Renderer,
        desc: &RenderTargetDesc,
    ) -> Result<RenderTargetKey> {
        if desc.width == 0 || desc.height == 0 {
            mirror_bail!("mirror3d::TargetManager",
                "RenderTarget resolution {}x{} is invalid", desc.width, desc.height);
        }

        let key = self.render_targets.insert(RenderTarget::new(*desc));
        if let Err(err) = renderer.create_render_target(key, desc) {
            self.render_targets.remove(key);
            return Err(log_and_return_error("mirror3d::TargetManager", err));
        }
        Ok(key)
    }

    /// Create a new render target with the same format and resolution as `source`
    pub fn clone_render_target(
        &mut self,
        renderer: &mut dyn Renderer,
        source: RenderTargetKey,
    ) -> Result<RenderTargetKey> {
        let desc = match self.render_targets.get(source) {
            Some(target) => *target.desc(),
            None => mirror_bail!("mirror3d::TargetManager",
                "Cannot clone unknown RenderTarget {:?}", source),
        };
        self.create_render_target(renderer, &desc)
    }

    /// Destroy a render target
    ///
    /// Returns the removed render target, or None if not found.
    pub fn destroy_render_target(
        &mut self,
        renderer: &mut dyn Renderer,
        key: RenderTargetKey,
    ) -> Option<RenderTarget> {
        let removed = self.render_targets.remove(key);
        if removed.is_some() {
            renderer.destroy_render_target(key);
        }
        removed
    }

    /// Get a render target by key
    pub fn render_target(&self, key: RenderTargetKey) -> Option<&RenderTarget> {
        self.render_targets.get(key)
    }

    pub fn contains(&self, key: RenderTargetKey) -> bool {
        self.render_targets.contains_key(key)
    }

    /// Get the number of render targets
    pub fn render_target_count(&self) -> usize {
        self.render_targets.len()
    }

    /// Destroy all render targets
    pub fn clear(&mut self, renderer: &mut dyn Renderer) {
        for (key, _) in self.render_targets.drain() {
            renderer.destroy_render_target(key);
        }
    }
}

impl Default for TargetManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
