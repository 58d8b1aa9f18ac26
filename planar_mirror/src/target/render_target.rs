/// Render target - where a reflection gets rendered to.
///
/// Render targets can only be created via `TargetManager::create_render_target()`
/// or `TargetManager::clone_render_target()`. The GPU-side resource is owned by
/// the host renderer and addressed by the same key.

use slotmap::new_key_type;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a RenderTarget.
    ///
    /// Keys remain valid even after other targets are removed.
    pub struct RenderTargetKey;
}

/// Color formats usable for reflection textures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,
    R16G16B16A16_SFLOAT,
}

/// Render target descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Color format
    pub format: TextureFormat,
    /// Depth buffer bits (0 = no depth buffer)
    pub depth_bits: u32,
}

impl Default for RenderTargetDesc {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            format: TextureFormat::R8G8B8A8_UNORM,
            depth_bits: 32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderTarget {
    desc: RenderTargetDesc,
}

impl RenderTarget {
    /// Internal only - created via TargetManager
    pub(crate) fn new(desc: RenderTargetDesc) -> Self {
        Self { desc }
    }

    pub fn desc(&self) -> &RenderTargetDesc {
        &self.desc
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn format(&self) -> TextureFormat {
        self.desc.format
    }
}
