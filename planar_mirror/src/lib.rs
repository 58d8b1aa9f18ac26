/*!
# Planar Mirror

Geometry and resource-lifecycle core for recursive planar-mirror rendering.

A mirror surface is drawn by rendering a second, reflected viewpoint into a
render target and sampling that target as the surface texture. This crate owns
everything between "a viewer is about to see a mirror" and "the viewer is done
with it"; the host renderer owns draw calls and GPU resources.

## Architecture

- **Renderer**: Host contract (render target allocation, fills, render-now)
- **RenderContext**: Per-scene state (recursion guard, pools, snapshots, clock)
- **MirrorSurface**: Planar quad with canonical transform and reflection options
- **Viewpoint**: Passive camera data (position, rotation, projection, target)
- **ObliqueFrustum**: Off-axis projection aligning the reflection with the quad
- **ReflectionPool**: Per-mirror reusable viewpoints and render targets

The host implements `Renderer`; its `render_viewpoint` calls back into
`RenderContext::on_surface_about_to_render` for every visible mirror, then
brackets its own draw with `on_viewer_pre_render` / `on_viewer_post_render`.
*/

// Internal modules
mod error;
pub mod log;
pub mod geometry;
pub mod viewpoint;
pub mod target;
pub mod renderer;
pub mod mirror;
pub mod pool;
pub mod context;

// Main mirror3d namespace module
pub mod mirror3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Host renderer contract
    pub use crate::renderer::Renderer;

    // Orchestration
    pub use crate::context::{
        RenderContext, ContextConfig, MirrorDesc, RenderOutcome, SkipReason, SubscriptionHandle,
    };

    // Logging sub-module (types and functions; macros live at the crate root)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
        };
    }

    // Geometry sub-module
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Viewpoint sub-module
    pub mod viewpoint {
        pub use crate::viewpoint::*;
    }

    // Render target sub-module
    pub mod target {
        pub use crate::target::*;
    }

    // Mirror sub-module
    pub mod mirror {
        pub use crate::mirror::*;
    }

    // Pool sub-module
    pub mod pool {
        pub use crate::pool::*;
    }

    // Context sub-module
    pub mod context {
        pub use crate::context::*;
    }
}

// Re-export math library at crate root
pub use glam;
