//! Viewpoint module - the camera abstraction the mirror core drives.
//!
//! A viewpoint is a passive data container: the host positions its own
//! viewers, the core positions reflection viewpoints. Neither renders here;
//! rendering is requested through `Renderer::render_viewpoint`.

mod viewpoint;

pub use viewpoint::{Viewpoint, ViewpointKey};
