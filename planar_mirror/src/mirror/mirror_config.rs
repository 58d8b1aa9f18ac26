/// Mirror configuration.
///
/// Resolution, format and pool lifetime are fixed when the mirror is
/// created. `MirrorOptions` stays editable through
/// `MirrorSurface::options_mut()`.

use std::time::Duration;
use glam::Vec4;
use crate::target::{RenderTargetDesc, TextureFormat};

/// Lifetime of pool-generated viewpoints and render targets after last use
pub const DEFAULT_POOL_TTL: Duration = Duration::from_secs(10);

/// Far distance suggested when a fixed far clip is wanted
pub const DEFAULT_FAR_CLIP_OVERRIDE: f32 = 100.0;

/// Per-mirror behaviour toggles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorOptions {
    /// Skip the reflection when the quad is fully outside the viewer frustum
    pub stop_render_when_not_viewed: bool,
    /// Skip the reflection when the viewer is behind the reflective face
    pub stop_render_when_viewer_behind: bool,
    /// Shrink the quad to its visible part before rendering the reflection
    pub shrink_when_viewer_close: bool,
    /// Fixed far clip for the reflection (None = derived from the viewer)
    pub far_clip_override: Option<f32>,
    /// Fill color of the "no reflection" fallback
    pub no_reflection_color: Vec4,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            stop_render_when_not_viewed: true,
            stop_render_when_viewer_behind: true,
            shrink_when_viewer_close: true,
            far_clip_override: None,
            no_reflection_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Mirror configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorConfig {
    /// Reflection texture width in pixels
    pub width: u32,
    /// Reflection texture height in pixels
    pub height: u32,
    /// Reflection texture color format
    pub format: TextureFormat,
    /// Reflection depth buffer bits
    pub depth_bits: u32,
    /// Lifetime of pool-generated instances after last use
    pub pool_ttl: Duration,
    /// Runtime toggles
    pub options: MirrorOptions,
}

impl MirrorConfig {
    /// Descriptor of the default render target created for this mirror.
    pub fn target_desc(&self) -> RenderTargetDesc {
        RenderTargetDesc {
            width: self.width,
            height: self.height,
            format: self.format,
            depth_bits: self.depth_bits,
        }
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        let desc = RenderTargetDesc::default();
        Self {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            depth_bits: desc.depth_bits,
            pool_ttl: DEFAULT_POOL_TTL,
            options: MirrorOptions::default(),
        }
    }
}
