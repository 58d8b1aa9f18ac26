/// Frustum culling and shrinking of a mirror quad.
///
/// Corners are named from the viewer's point of view: the viewer faces the
/// reflective side, so the viewer's left is the mirror's `+right`. This
/// holds only while the mirror is not rolled about its forward axis
/// relative to the viewer; otherwise culling may keep a mirror that is out
/// of view (never the reverse).

use glam::Vec3;
use crate::geometry::{ViewFrustum, is_outside_plane, line_plane_intersection};
use super::mirror_config::MirrorOptions;
use super::surface_transform::{MirrorFrame, SurfaceTransform};

/// At or below this forward distance the viewer counts as behind the mirror
pub const VIEWER_BEHIND_DISTANCE: f32 = -0.1;

/// Below this forward distance an out-of-view mirror may still be visible
/// (the viewer may be pressed against the glass)
pub const CLOSE_VIEWER_DISTANCE: f32 = 0.5;

// ===== CORNERS =====

/// Reflective-face corners relative to the viewer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorCorners {
    pub left_top: Vec3,
    pub left_bottom: Vec3,
    pub right_top: Vec3,
    pub right_bottom: Vec3,
}

impl MirrorCorners {
    pub fn relative_to(frame: &MirrorFrame, viewer: Vec3) -> Self {
        let center = frame.front_center() - viewer;
        let r = frame.right * frame.half_extents.x;
        let u = frame.up * frame.half_extents.y;
        Self {
            left_top: center + r + u,
            left_bottom: center + r - u,
            right_top: center - r + u,
            right_bottom: center - r - u,
        }
    }

    pub fn all(&self) -> [Vec3; 4] {
        [self.left_top, self.right_top, self.right_bottom, self.left_bottom]
    }

    /// Conservative full-outside test.
    ///
    /// `true` if every corner is behind the near plane, or every corner is
    /// outside the same side plane.
    pub fn is_fully_outside(&self, frustum: &ViewFrustum) -> bool {
        let corners = self.all();
        if corners.iter().all(|c| frustum.is_behind_near(*c)) {
            return true;
        }
        frustum
            .side_planes()
            .iter()
            .any(|n| corners.iter().all(|c| is_outside_plane(*c, *n)))
    }
}

// ===== CULLING =====

/// Signed distances of the viewer from the reflective face centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerOffset {
    pub right: f32,
    pub up: f32,
    pub forward: f32,
}

impl ViewerOffset {
    pub fn new(frame: &MirrorFrame, viewer: Vec3) -> Self {
        let o = frame.offsets_of(viewer);
        Self { right: o.x, up: o.y, forward: o.z }
    }

    pub fn is_behind(&self) -> bool {
        self.forward <= VIEWER_BEHIND_DISTANCE
    }

    /// Viewer close to the glass and within its rectangle.
    ///
    /// The corner test is unreliable in that region, so culling is
    /// suppressed there.
    pub fn is_pressed_against(&self, half_extents: Vec3) -> bool {
        self.forward < CLOSE_VIEWER_DISTANCE
            && self.right.abs() <= half_extents.x
            && self.up.abs() <= half_extents.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullDecision {
    Visible,
    ViewerBehind,
    OutOfView,
}

/// Decide whether the reflection is needed at all.
///
/// Without a usable frustum the out-of-view test is skipped.
pub fn cull(
    frame: &MirrorFrame,
    viewer: Vec3,
    frustum: Option<&ViewFrustum>,
    options: &MirrorOptions,
) -> CullDecision {
    let offset = ViewerOffset::new(frame, viewer);

    if options.stop_render_when_viewer_behind && offset.is_behind() {
        return CullDecision::ViewerBehind;
    }

    if options.stop_render_when_not_viewed {
        if let Some(frustum) = frustum {
            let outside = MirrorCorners::relative_to(frame, viewer).is_fully_outside(frustum);
            if outside && !offset.is_pressed_against(frame.half_extents) {
                return CullDecision::OutOfView;
            }
        }
    }

    CullDecision::Visible
}

// ===== SHRINK =====

/// World-space end points of the visible span on each mirror axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkBounds {
    /// Visible span along `right`: (minus side, plus side)
    pub horizontal: (Vec3, Vec3),
    /// Visible span along `up`: (minus side, plus side)
    pub vertical: (Vec3, Vec3),
}

/// Pick between two candidates; `prefer_first(a, b)` decides when both exist.
fn pick(a: Option<Vec3>, b: Option<Vec3>, prefer_first: impl Fn(Vec3, Vec3) -> bool) -> Option<Vec3> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if prefer_first(a, b) { a } else { b }),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// Reset a boundary that left the canonical span (or is not finite).
fn clamp_to_extent(point: Vec3, center: Vec3, axis: Vec3, half_extent: f32, canonical: Vec3) -> Vec3 {
    let along = axis.dot(point - center);
    if !point.is_finite() || !along.is_finite() || along.abs() > half_extent {
        canonical
    } else {
        point
    }
}

/// Span along one axis, clamped; an inverted span falls back to canonical.
fn clamp_span(
    minus: Vec3,
    plus: Vec3,
    center: Vec3,
    axis: Vec3,
    half_extent: f32,
) -> (Vec3, Vec3) {
    let canonical_minus = center - axis * half_extent;
    let canonical_plus = center + axis * half_extent;
    let minus = clamp_to_extent(minus, center, axis, half_extent, canonical_minus);
    let plus = clamp_to_extent(plus, center, axis, half_extent, canonical_plus);
    if axis.dot(plus - minus) < 0.0 {
        (canonical_minus, canonical_plus)
    } else {
        (minus, plus)
    }
}

/// Visible span of the quad on both axes.
///
/// Each side plane the quad crosses cuts the span at the intersection of
/// that plane with the quad's top/bottom (or left/right) edges, keeping the
/// candidate that leaves more of the quad visible.
pub fn shrink_bounds(frame: &MirrorFrame, viewer: Vec3, frustum: &ViewFrustum) -> ShrinkBounds {
    let corners = MirrorCorners::relative_to(frame, viewer);
    let c = frame.center;
    let r = frame.right;
    let u = frame.up;
    let he = frame.half_extents;

    // Horizontal
    let mut minus = c - r * he.x;
    let mut plus = c + r * he.x;

    if is_outside_plane(corners.right_top, frustum.right) || is_outside_plane(corners.right_bottom, frustum.right) {
        let bottom = line_plane_intersection(corners.right_bottom, corners.left_bottom, frustum.right);
        let top = line_plane_intersection(corners.right_top, corners.left_top, frustum.right);
        if let Some(p) = pick(bottom, top, |b, t| r.dot(b - t) < 0.0) {
            minus = viewer + p;
        }
    }

    if is_outside_plane(corners.left_top, frustum.left) || is_outside_plane(corners.left_bottom, frustum.left) {
        let bottom = line_plane_intersection(corners.right_bottom, corners.left_bottom, frustum.left);
        let top = line_plane_intersection(corners.right_top, corners.left_top, frustum.left);
        if let Some(p) = pick(bottom, top, |b, t| r.dot(b - t) > 0.0) {
            plus = viewer + p;
        }
    }

    let horizontal = clamp_span(minus, plus, c, r, he.x);

    // Vertical
    let mut minus = c - u * he.y;
    let mut plus = c + u * he.y;

    if is_outside_plane(corners.left_top, frustum.top) || is_outside_plane(corners.right_top, frustum.top) {
        let right = line_plane_intersection(corners.right_top, corners.right_bottom, frustum.top);
        let left = line_plane_intersection(corners.left_top, corners.left_bottom, frustum.top);
        if let Some(p) = pick(right, left, |a, b| u.dot(a - b) > 0.0) {
            plus = viewer + p;
        }
    }

    if is_outside_plane(corners.left_bottom, frustum.bottom) || is_outside_plane(corners.right_bottom, frustum.bottom) {
        let right = line_plane_intersection(corners.right_top, corners.right_bottom, frustum.bottom);
        let left = line_plane_intersection(corners.left_top, corners.left_bottom, frustum.bottom);
        if let Some(p) = pick(right, left, |a, b| u.dot(a - b) < 0.0) {
            minus = viewer + p;
        }
    }

    let vertical = clamp_span(minus, plus, c, u, he.y);

    ShrinkBounds { horizontal, vertical }
}

/// Resize and recentre `transform` along one world axis.
fn apply_axis(transform: &mut SurfaceTransform, index: usize, axis: Vec3, minus: Vec3, plus: Vec3) {
    let parent_scale = transform.parent_lossy_scale()[index];
    if parent_scale != 0.0 {
        let mut scale = transform.local_scale();
        // Width is unsigned; a mirrored quad keeps its flip
        scale[index] = scale[index].signum() * axis.dot(plus - minus) / parent_scale;
        transform.set_local_scale(scale);
    }

    let mid = (minus + plus) * 0.5;
    let position = transform.world_position();
    transform.set_world_position(position + axis * axis.dot(mid - position));
}

/// Apply both spans to `transform`.
pub fn apply_shrink(transform: &mut SurfaceTransform, frame: &MirrorFrame, bounds: &ShrinkBounds) {
    let (minus, plus) = bounds.horizontal;
    apply_axis(transform, 0, frame.right, minus, plus);
    let (minus, plus) = bounds.vertical;
    apply_axis(transform, 1, frame.up, minus, plus);
}

#[cfg(test)]
#[path = "shrink_tests.rs"]
mod tests;
