//! Context module - the per-scene orchestrator and its render bookkeeping.

mod recursion_guard;
mod render_context;
mod snapshot;

pub use recursion_guard::RecursionGuard;
pub use render_context::{
    RenderContext, ContextConfig, MirrorDesc, RenderOutcome, SkipReason, SubscriptionHandle,
    DEFAULT_MAX_RECURSION_DEPTH,
};
pub use snapshot::{RenderSnapshot, SnapshotStack};
