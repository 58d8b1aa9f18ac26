//! Mirror module - the reflective surface and the math that prepares its
//! reflection: culling, shrinking and the oblique projection.

mod mirror_config;
mod mirror_surface;
mod projection;
mod shrink;
mod surface_transform;

pub use mirror_config::{MirrorConfig, MirrorOptions, DEFAULT_POOL_TTL, DEFAULT_FAR_CLIP_OVERRIDE};
pub use mirror_surface::{
    MirrorSurface, MirrorKey, ObserverKey, MaterialBinding, PreRenderEvent, PreRenderObserver,
};
pub use projection::{ObliqueFrustum, reflect_viewer_position, derived_far};
pub use shrink::{
    MirrorCorners, ViewerOffset, CullDecision, ShrinkBounds,
    cull, shrink_bounds, apply_shrink,
    VIEWER_BEHIND_DISTANCE, CLOSE_VIEWER_DISTANCE,
};
pub use surface_transform::{SurfaceTransform, MirrorFrame};
