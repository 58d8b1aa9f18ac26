/// Renderer module - the host contract the mirror core renders through

pub mod renderer;
pub mod mock_renderer;

pub use renderer::*;
