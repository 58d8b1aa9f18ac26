//! Render target management module
//!
//! Provides render target creation and management.
//! A render target is the texture a reflection viewpoint renders into and
//! a mirror material samples from.

mod render_target;
mod target_manager;

pub use render_target::{RenderTarget, RenderTargetDesc, RenderTargetKey, TextureFormat};
pub use target_manager::TargetManager;
