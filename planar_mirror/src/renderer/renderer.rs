/// Renderer trait - host rendering interface

use glam::Vec4;
use crate::context::RenderContext;
use crate::error::Result;
use crate::target::{RenderTargetDesc, RenderTargetKey};
use crate::viewpoint::ViewpointKey;

// ============================================================================
// Renderer trait
// ============================================================================

/// Host renderer contract
///
/// The mirror core never touches the GPU. It asks the host to allocate,
/// clear and render into targets, addressed by keys the core hands out.
/// Implemented by the host application's rendering backend.
pub trait Renderer {
    /// Allocate the GPU resource backing `key`
    ///
    /// # Arguments
    ///
    /// * `key` - Key under which the core registered the target
    /// * `desc` - Resolution, color format and depth bits
    fn create_render_target(&mut self, key: RenderTargetKey, desc: &RenderTargetDesc) -> Result<()>;

    /// Release the GPU resource backing `key`
    fn destroy_render_target(&mut self, key: RenderTargetKey);

    /// Fill a target with a uniform color (the "no reflection" blit)
    fn fill_render_target(&mut self, key: RenderTargetKey, color: Vec4) -> Result<()>;

    /// Render `viewpoint` into its bound target right now
    ///
    /// The host is expected to:
    /// 1. call `ctx.on_surface_about_to_render(self, mirror, viewpoint)`
    ///    for each mirror it is about to draw,
    /// 2. call `ctx.on_viewer_pre_render(viewpoint)`,
    /// 3. draw the scene,
    /// 4. call `ctx.on_viewer_post_render(viewpoint)`.
    ///
    /// This call is re-entered when a mirror visible from `viewpoint`
    /// renders its own reflection.
    fn render_viewpoint(&mut self, ctx: &mut RenderContext, viewpoint: ViewpointKey) -> Result<()>;
}
