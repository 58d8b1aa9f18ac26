/// Plane helpers for planes passing through the origin.
///
/// A plane is given by its normal only; the viewer sits at the origin.

use glam::Vec3;

/// Denominators smaller than this are treated as "line parallel to plane"
const PARALLEL_EPSILON: f32 = 1e-6;

/// Intersect the infinite line through `p1` and `p2` with the plane through
/// the origin with normal `normal`.
///
/// Returns `None` when the line is parallel to the plane or the result is
/// not finite.
pub fn line_plane_intersection(p1: Vec3, p2: Vec3, normal: Vec3) -> Option<Vec3> {
    let direction = p2 - p1;
    let denominator = normal.dot(direction);
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = -normal.dot(p1) / denominator;
    let point = p1 + direction * t;
    if point.is_finite() { Some(point) } else { None }
}

/// `true` if `point` lies strictly on the side `normal` points to.
#[inline]
pub fn is_outside_plane(point: Vec3, normal: Vec3) -> bool {
    point.dot(normal) > 0.0
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
