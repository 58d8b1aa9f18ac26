use glam::{Mat4, Quat, Vec3, Vec4};
use crate::geometry::FrustumBounds;
use crate::mirror::surface_transform::SurfaceTransform;
use super::*;

fn two_by_two_mirror() -> SurfaceTransform {
    SurfaceTransform::new(Vec3::ZERO, Quat::IDENTITY, Vec3::new(2.0, 2.0, 0.0))
}

fn ndc(view_projection: &Mat4, point: Vec3) -> Vec3 {
    let clip = *view_projection * Vec4::new(point.x, point.y, point.z, 1.0);
    clip.truncate() / clip.w
}

// ============================================================================
// Reflection placement
// ============================================================================

#[test]
fn test_reflect_viewer_in_front() {
    let frame = two_by_two_mirror().frame();
    let reflected = reflect_viewer_position(&frame, Vec3::new(0.0, 0.0, -5.0));
    assert!((reflected - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
}

#[test]
fn test_reflect_keeps_lateral_offsets() {
    let frame = two_by_two_mirror().frame();
    let reflected = reflect_viewer_position(&frame, Vec3::new(0.3, 0.2, -5.0));
    assert!((reflected - Vec3::new(0.3, 0.2, 5.0)).length() < 1e-5);
}

#[test]
fn test_reflect_through_thick_mirror_face() {
    // Depth 1: reflective face at z = -0.5
    let t = SurfaceTransform::new(Vec3::ZERO, Quat::IDENTITY, Vec3::new(2.0, 2.0, 1.0));
    let reflected = reflect_viewer_position(&t.frame(), Vec3::new(0.0, 0.0, -4.5));
    assert!((reflected - Vec3::new(0.0, 0.0, 3.5)).length() < 1e-5);
}

#[test]
fn test_derived_far() {
    // Reflection 5 behind the mirror: far grows by 10
    assert_eq!(derived_far(100.0, -5.0), 110.0);
}

// ============================================================================
// ObliqueFrustum
// ============================================================================

#[test]
fn test_centred_frustum_parameters() {
    let frame = two_by_two_mirror().frame();
    let reflection = Vec3::new(0.0, 0.0, 5.0);
    let f = ObliqueFrustum::from_mirror(&frame, reflection, 100.0, None);

    assert!((f.left + 1.0).abs() < 1e-5);
    assert!((f.right - 1.0).abs() < 1e-5);
    assert!((f.bottom + 1.0).abs() < 1e-5);
    assert!((f.top - 1.0).abs() < 1e-5);
    assert!((f.near - 5.0).abs() < 1e-5);
    assert!((f.far - 110.0).abs() < 1e-4);
    assert!(!f.is_degenerate());
}

#[test]
fn test_far_override() {
    let frame = two_by_two_mirror().frame();
    let f = ObliqueFrustum::from_mirror(&frame, Vec3::new(0.0, 0.0, 5.0), 100.0, Some(42.0));
    assert_eq!(f.far, 42.0);
}

#[test]
fn test_off_axis_frustum_parameters() {
    let frame = two_by_two_mirror().frame();
    let f = ObliqueFrustum::from_mirror(&frame, Vec3::new(0.3, 0.2, 5.0), 100.0, None);

    assert!((f.left + 1.3).abs() < 1e-5);
    assert!((f.right - 0.7).abs() < 1e-5);
    assert!((f.bottom + 1.2).abs() < 1e-5);
    assert!((f.top - 0.8).abs() < 1e-5);
}

#[test]
fn test_matrix_round_trips_through_bounds() {
    let f = ObliqueFrustum { left: -1.3, right: 0.7, bottom: -1.2, top: 0.8, near: 5.0, far: 110.0 };
    let bounds = FrustumBounds::from_projection(&f.to_projection_matrix()).unwrap();

    assert!((bounds.left - f.left).abs() < 1e-3);
    assert!((bounds.right - f.right).abs() < 1e-3);
    assert!((bounds.bottom - f.bottom).abs() < 1e-3);
    assert!((bounds.top - f.top).abs() < 1e-3);
    assert!((bounds.near - f.near).abs() < 1e-3);
    assert!((bounds.far - f.far).abs() < 1e-1);
}

#[test]
fn test_degenerate_frustums() {
    let ok = ObliqueFrustum { left: -1.0, right: 1.0, bottom: -1.0, top: 1.0, near: 1.0, far: 10.0 };
    assert!(!ok.is_degenerate());

    assert!(ObliqueFrustum { right: -1.0, ..ok }.is_degenerate());
    assert!(ObliqueFrustum { top: -1.0, ..ok }.is_degenerate());
    assert!(ObliqueFrustum { near: 0.0, ..ok }.is_degenerate());
    assert!(ObliqueFrustum { near: -2.0, ..ok }.is_degenerate());
    assert!(ObliqueFrustum { far: 0.5, ..ok }.is_degenerate());
    assert!(ObliqueFrustum { left: f32::NAN, ..ok }.is_degenerate());
}

#[test]
fn test_viewer_behind_gives_degenerate_frustum() {
    let frame = two_by_two_mirror().frame();
    // Viewer behind the glass: its reflection lands in front
    let reflection = reflect_viewer_position(&frame, Vec3::new(0.0, 0.0, 2.0));
    let f = ObliqueFrustum::from_mirror(&frame, reflection, 100.0, None);
    assert!(f.is_degenerate());
}

// ============================================================================
// Projection alignment
// ============================================================================

#[test]
fn test_mirror_corners_map_to_ndc_corners() {
    let transform = SurfaceTransform::new(Vec3::new(1.0, 0.5, -2.0), Quat::from_rotation_y(0.3), Vec3::new(3.0, 2.0, 0.0));
    let frame = transform.frame();
    let viewer = frame.center + frame.forward * 4.0 + frame.right * 0.7 - frame.up * 0.4;

    let reflection = reflect_viewer_position(&frame, viewer);
    let f = ObliqueFrustum::from_mirror(&frame, reflection, 100.0, None);
    assert!(!f.is_degenerate());

    // Reflection viewpoint oriented like the mirror
    let view = Mat4::from_rotation_translation(transform.world_rotation(), reflection).inverse();
    let view_projection = f.to_projection_matrix() * view;

    let he = frame.half_extents;
    let expected = [
        (frame.right * he.x + frame.up * he.y, Vec3::new(1.0, 1.0, -1.0)),
        (frame.right * he.x - frame.up * he.y, Vec3::new(1.0, -1.0, -1.0)),
        (-frame.right * he.x + frame.up * he.y, Vec3::new(-1.0, 1.0, -1.0)),
        (-frame.right * he.x - frame.up * he.y, Vec3::new(-1.0, -1.0, -1.0)),
    ];
    for (offset, ndc_corner) in expected {
        let p = ndc(&view_projection, frame.center + offset);
        assert!((p - ndc_corner).length() < 1e-3, "corner mapped to {:?}", p);
    }
}

#[test]
fn test_facing_viewer_example() {
    // Viewer 5 in front of a 2x2 mirror, looking at it
    let frame = two_by_two_mirror().frame();
    let viewer = Vec3::new(0.0, 0.0, -5.0);

    let reflection = reflect_viewer_position(&frame, viewer);
    assert!((reflection.z - 5.0).abs() < 1e-5);
    // 5 units behind the plane, on the non-reflective side
    assert!(frame.forward.dot(reflection - frame.center) < 0.0);
}
