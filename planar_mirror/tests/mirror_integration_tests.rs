//! Integration tests for the mirror render flow
//!
//! These tests drive RenderContext through a CPU-only host renderer the
//! way an engine would. No GPU required.
//!
//! Run with: cargo test --test mirror_integration_tests


use host_test_utils::{add_mirror, assert_scene_restored, create_viewer, TestHost};
use planar_mirror::glam::{Mat4, Quat, Vec3};
use planar_mirror::mirror3d::{ContextConfig, Error, RenderContext, RenderOutcome, Renderer};
use std::f32::consts::PI;
use std::time::Duration;

/// Looking along +Z
fn towards_positive_z() -> Quat {
    Quat::from_rotation_y(PI)
}

// ============================================================================
// SINGLE MIRROR
// ============================================================================

#[test]
fn test_integration_reflection_image_matches_mirror_quad() {
    let mut ctx = RenderContext::default();
    let mut host = TestHost::new();
    let mirror = add_mirror(&mut ctx, &mut host, Vec3::ZERO, Quat::IDENTITY);
    let viewer = ctx.create_viewpoint(create_viewer(Vec3::new(0.0, 0.0, -5.0), towards_positive_z()));

    host.render_viewpoint(&mut ctx, viewer).unwrap();

    let reflection = ctx.mirror(mirror).unwrap().default_viewpoint();
    let reflection = ctx.viewpoint(reflection).unwrap();
    assert!((reflection.position() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);

    // Every quad corner lands on a corner of the reflection image, on the near plane
    let view_projection = reflection.view_projection_matrix();
    for (x, y) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
        let clip = view_projection * Vec3::new(x, y, 0.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!((ndc.x.abs() - 1.0).abs() < 1e-3, "corner ({}, {}) -> {:?}", x, y, ndc);
        assert!((ndc.y.abs() - 1.0).abs() < 1e-3, "corner ({}, {}) -> {:?}", x, y, ndc);
        assert!((ndc.z + 1.0).abs() < 1e-3, "corner ({}, {}) -> {:?}", x, y, ndc);
    }

    assert_scene_restored(&ctx);
}

#[test]
fn test_integration_viewers_see_their_own_shrink() {
    let mut ctx = RenderContext::default();
    let mut host = TestHost::new();
    let mirror = add_mirror(&mut ctx, &mut host, Vec3::ZERO, Quat::IDENTITY);
    let close = ctx.create_viewpoint(create_viewer(Vec3::new(0.0, 0.0, -0.5), towards_positive_z()));
    let far = ctx.create_viewpoint(create_viewer(Vec3::new(0.0, 0.0, -5.0), towards_positive_z()));

    host.render_viewpoint(&mut ctx, close).unwrap();
    host.render_viewpoint(&mut ctx, far).unwrap();

    let close_sample = host.samples_of(close)[0];
    let far_sample = host.samples_of(far)[0];
    assert_eq!(close_sample.mirror, mirror);
    assert!((close_sample.local_scale - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-3);
    assert!((far_sample.local_scale - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-3);
    assert_scene_restored(&ctx);
}

#[test]
fn test_integration_moving_parent_moves_reflection() {
    let mut ctx = RenderContext::default();
    let mut host = TestHost::new();
    let mirror = add_mirror(&mut ctx, &mut host, Vec3::ZERO, Quat::IDENTITY);
    ctx.mirror_mut(mirror).unwrap()
        .set_parent_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0)));
    let viewer = ctx.create_viewpoint(create_viewer(Vec3::new(0.0, 0.0, -5.0), towards_positive_z()));

    host.render_viewpoint(&mut ctx, viewer).unwrap();

    let surface = ctx.mirror(mirror).unwrap();
    assert_eq!(surface.canonical_position(), Vec3::ZERO);
    let reflection = ctx.viewpoint(surface.default_viewpoint()).unwrap();
    assert!((reflection.position() - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
}

// ============================================================================
// RECURSION
// ============================================================================

#[test]
fn test_integration_facing_mirrors_bounded_by_max_depth() {
    for max_depth in 1..=5 {
        let mut ctx = RenderContext::new(ContextConfig { max_recursion_depth: max_depth });
        let mut host = TestHost::new();
        add_mirror(&mut ctx, &mut host, Vec3::ZERO, Quat::IDENTITY);
        add_mirror(&mut ctx, &mut host, Vec3::new(0.0, 0.0, -10.0), Quat::from_rotation_y(PI));
        let viewer = ctx.create_viewpoint(create_viewer(Vec3::new(0.0, 0.0, -5.0), towards_positive_z()));

        host.render_viewpoint(&mut ctx, viewer).unwrap();

        assert_eq!(host.deepest_render(), max_depth + 1, "max depth {}", max_depth);
        assert_eq!(ctx.deepest_recursion(), max_depth);
        assert_eq!(host.fills.len(), 1, "max depth {}", max_depth);
        assert_scene_restored(&ctx);
        ctx.end_frame(&mut host);
    }
}

#[test]
fn test_integration_disabled_reflections_fill_every_mirror() {
    let mut ctx = RenderContext::new(ContextConfig { max_recursion_depth: 0 });
    let mut host = TestHost::new();
    add_mirror(&mut ctx, &mut host, Vec3::ZERO, Quat::IDENTITY);
    add_mirror(&mut ctx, &mut host, Vec3::new(0.0, 0.0, -10.0), Quat::from_rotation_y(PI));
    let viewer = ctx.create_viewpoint(create_viewer(Vec3::new(0.0, 0.0, -5.0), towards_positive_z()));

    host.render_viewpoint(&mut ctx, viewer).unwrap();

    assert_eq!(host.renders.len(), 1);
    assert_eq!(host.fills.len(), 2);
    assert!(host.outcomes.iter().all(|(_, _, outcome)| matches!(outcome, RenderOutcome::Fallback { .. })));
}

// ============================================================================
// POOL LIFETIME
// ============================================================================

#[test]
fn test_integration_clones_live_until_ttl() {
    let mut ctx = RenderContext::new(ContextConfig { max_recursion_depth: 3 });
    let mut host = TestHost::new();
    add_mirror(&mut ctx, &mut host, Vec3::ZERO, Quat::IDENTITY);
    add_mirror(&mut ctx, &mut host, Vec3::new(0.0, 0.0, -10.0), Quat::from_rotation_y(PI));
    let viewer = ctx.create_viewpoint(create_viewer(Vec3::new(0.0, 0.0, -5.0), towards_positive_z()));

    // One second per frame, rendering every frame keeps the clones alive
    for _ in 0..15 {
        host.render_viewpoint(&mut ctx, viewer).unwrap();
        ctx.end_frame(&mut host);
        ctx.advance_time(Duration::from_secs(1));
    }
    assert_eq!(host.live_targets.len(), 4);

    // Stop rendering: clones go once their TTL elapses
    for _ in 0..12 {
        ctx.end_frame(&mut host);
        ctx.advance_time(Duration::from_secs(1));
    }
    assert_eq!(host.live_targets.len(), 2);
    assert_eq!(ctx.pending_eviction_count(), 0);
}

#[test]
fn test_integration_allocation_failure_propagates_and_recovers() {
    let mut ctx = RenderContext::new(ContextConfig { max_recursion_depth: 3 });
    let mut host = TestHost::new();
    add_mirror(&mut ctx, &mut host, Vec3::ZERO, Quat::IDENTITY);
    add_mirror(&mut ctx, &mut host, Vec3::new(0.0, 0.0, -10.0), Quat::from_rotation_y(PI));
    let viewer = ctx.create_viewpoint(create_viewer(Vec3::new(0.0, 0.0, -5.0), towards_positive_z()));
    host.target_budget = Some(2);

    let result = host.render_viewpoint(&mut ctx, viewer);

    assert!(matches!(result, Err(Error::OutOfMemory)));
    assert_eq!(ctx.recursion_depth(), 0);

    ctx.end_frame(&mut host);
    assert_scene_restored(&ctx);
    assert_eq!(ctx.pending_snapshot_count(viewer), 0);

    // With memory available the same frame renders
    host.target_budget = None;
    host.render_viewpoint(&mut ctx, viewer).unwrap();
    assert_scene_restored(&ctx);
}

#[test]
fn test_integration_teardown_releases_all_targets() {
    let mut ctx = RenderContext::new(ContextConfig { max_recursion_depth: 3 });
    let mut host = TestHost::new();
    let a = add_mirror(&mut ctx, &mut host, Vec3::ZERO, Quat::IDENTITY);
    let b = add_mirror(&mut ctx, &mut host, Vec3::new(0.0, 0.0, -10.0), Quat::from_rotation_y(PI));
    let viewer = ctx.create_viewpoint(create_viewer(Vec3::new(0.0, 0.0, -5.0), towards_positive_z()));
    host.render_viewpoint(&mut ctx, viewer).unwrap();

    ctx.destroy_mirror(&mut host, a).unwrap();
    ctx.destroy_mirror(&mut host, b).unwrap();

    assert!(host.live_targets.is_empty());
    assert_eq!(ctx.pending_eviction_count(), 0);
    assert_eq!(ctx.mirror_count(), 0);
}
