/// Mock Renderer for unit tests (no GPU required)
///
/// Records every call the mirror core makes and plays the host's part in
/// render_viewpoint(): it visits its scene mirrors, brackets a fake draw
/// with the pre/post hooks and records what each mirror looks like while
/// the viewer samples it.

#[cfg(test)]
use glam::{Vec3, Vec4};
#[cfg(test)]
use crate::context::{RenderContext, RenderOutcome};
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::mirror::MirrorKey;
#[cfg(test)]
use crate::mirror_bail;
#[cfg(test)]
use crate::renderer::Renderer;
#[cfg(test)]
use crate::target::{RenderTargetDesc, RenderTargetKey};
#[cfg(test)]
use crate::viewpoint::ViewpointKey;

// ============================================================================
// Records
// ============================================================================

/// One render_viewpoint() call
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRecord {
    pub viewpoint: ViewpointKey,
    /// Nesting level, 1 = outermost call
    pub depth: u32,
    pub target: Option<RenderTargetKey>,
}

/// State of one mirror while one viewer draws
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRecord {
    pub viewer: ViewpointKey,
    pub mirror: MirrorKey,
    pub local_position: Vec3,
    pub local_scale: Vec3,
    pub main_texture: Option<RenderTargetKey>,
}

// ============================================================================
// Mock Renderer
// ============================================================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockRenderer {
    pub created_targets: Vec<(RenderTargetKey, RenderTargetDesc)>,
    pub destroyed_targets: Vec<RenderTargetKey>,
    pub filled_targets: Vec<(RenderTargetKey, Vec4)>,
    pub rendered: Vec<RenderRecord>,
    pub outcomes: Vec<(ViewpointKey, MirrorKey, RenderOutcome)>,
    pub samples: Vec<SampleRecord>,
    /// Mirrors visited by every render_viewpoint() call, in order
    pub scene: Vec<MirrorKey>,
    pub fail_target_creation: bool,
    pub fail_fill: bool,
    pub fail_render_at_depth: Option<u32>,
    pub max_nesting: u32,
    depth: u32,
}

#[cfg(test)]
impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(scene: Vec<MirrorKey>) -> Self {
        Self { scene, ..Self::default() }
    }

    /// Samples recorded for `viewer`
    pub fn samples_of(&self, viewer: ViewpointKey) -> Vec<SampleRecord> {
        self.samples.iter().filter(|s| s.viewer == viewer).copied().collect()
    }

    fn render_scene(&mut self, ctx: &mut RenderContext, viewpoint: ViewpointKey) -> Result<()> {
        self.rendered.push(RenderRecord {
            viewpoint,
            depth: self.depth,
            target: ctx.viewpoint(viewpoint).and_then(|v| v.target()),
        });
        if self.fail_render_at_depth == Some(self.depth) {
            mirror_bail!("mirror3d::MockRenderer", "Render failed at depth {}", self.depth);
        }

        for mirror in self.scene.clone() {
            let outcome = ctx.on_surface_about_to_render(self, mirror, viewpoint)?;
            self.outcomes.push((viewpoint, mirror, outcome));
        }

        ctx.on_viewer_pre_render(viewpoint);
        for &mirror in &self.scene {
            if let Some(surface) = ctx.mirror(mirror) {
                self.samples.push(SampleRecord {
                    viewer: viewpoint,
                    mirror,
                    local_position: surface.transform().local_position(),
                    local_scale: surface.transform().local_scale(),
                    main_texture: surface.material().main_texture(),
                });
            }
        }
        ctx.on_viewer_post_render(viewpoint);
        Ok(())
    }
}

#[cfg(test)]
impl Renderer for MockRenderer {
    fn create_render_target(&mut self, key: RenderTargetKey, desc: &RenderTargetDesc) -> Result<()> {
        if self.fail_target_creation {
            mirror_bail!("mirror3d::MockRenderer", "Out of texture memory");
        }
        self.created_targets.push((key, *desc));
        Ok(())
    }

    fn destroy_render_target(&mut self, key: RenderTargetKey) {
        self.destroyed_targets.push(key);
    }

    fn fill_render_target(&mut self, key: RenderTargetKey, color: Vec4) -> Result<()> {
        if self.fail_fill {
            mirror_bail!("mirror3d::MockRenderer", "Fill of {:?} failed", key);
        }
        self.filled_targets.push((key, color));
        Ok(())
    }

    fn render_viewpoint(&mut self, ctx: &mut RenderContext, viewpoint: ViewpointKey) -> Result<()> {
        self.depth += 1;
        self.max_nesting = self.max_nesting.max(self.depth);
        let result = self.render_scene(ctx, viewpoint);
        self.depth -= 1;
        result
    }
}
