//! Placement Tests - Discovery, Stability, Resolution, Interaction, Commit/Retract
//!
//! End-to-end behavior of the placement core through its public API.

use glam::Vec3;
use snapforge_engine::camera::AimRay;
use snapforge_engine::game::builder::{
    ActionOutcome, BuildEvent, BuilderMode, PieceRegistry, PlacementResolver, ResolutionState,
    SnapStabilityFilter, StabilityOutcome, StaticScene, discover_candidates,
};
use snapforge_engine::game::config::BuildConfig;
use snapforge_engine::game::input::BuildAction;
use snapforge_engine::game::pieces::{AlwaysValid, PartNode, Piece, PieceTypeId, default_catalog};
use snapforge_engine::game::render::INVALID_TINT;
use snapforge_engine::physics::Transform;

fn assert_close(a: Vec3, b: Vec3, tolerance: f32) {
    assert!((a - b).length() < tolerance, "{:?} != {:?}", a, b);
}

fn down_at(x: f32, y: f32, z: f32) -> AimRay {
    AimRay::new(Vec3::new(x, y + 10.0, z), Vec3::NEG_Y)
}

/// Piece with point connectors and no colliders.
fn connector_piece(offsets: &[Vec3]) -> Piece {
    let mut root = PartNode::group("test");
    for (i, offset) in offsets.iter().enumerate() {
        root = root.with_child(PartNode::connector(format!("c{i}"), *offset));
    }
    Piece::from_parts(PieceTypeId(0), &root)
}

fn committed_at(registry: &mut PieceRegistry, offsets: &[Vec3], at: Vec3) {
    let mut piece = connector_piece(offsets);
    piece.set_transform(Transform::from_translation(at));
    registry.commit(piece);
}

fn foundation_builder() -> BuilderMode {
    let mut builder = BuilderMode::new(default_catalog(), BuildConfig::default());
    builder.enter();
    builder.select_piece_by_key("foundation").unwrap();
    builder
}

// ============================================================================
// Candidate discovery
// ============================================================================

#[test]
fn test_candidates_are_capped_in_range_and_sorted() {
    let mut registry = PieceRegistry::new();
    // A ring of connectors at assorted distances, some out of range
    let offsets: Vec<Vec3> = (0..12)
        .map(|i| {
            let angle = i as f32 * 0.7;
            let radius = 0.2 + 0.15 * i as f32;
            Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect();
    committed_at(&mut registry, &offsets, Vec3::ZERO);
    committed_at(&mut registry, &offsets[..5], Vec3::new(0.3, 0.0, 0.0));

    let found = discover_candidates(Vec3::ZERO, &registry, 1.5, 4);
    assert_eq!(found.len(), 4);
    assert!(found.iter().all(|c| c.distance <= 1.5));
    assert!(found.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn test_builder_preview_is_never_a_candidate() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();

    // The preview sits at the origin with connectors all around the next hit
    builder.update(&down_at(0.0, 0.0, 0.0), &scene).unwrap();
    let resolution = builder.update(&down_at(2.0, 0.0, 0.0), &scene).unwrap();
    assert!(builder.state().candidates().is_empty());
    assert!(resolution.snap.is_none());
}

// ============================================================================
// Stability
// ============================================================================

#[test]
fn test_sub_threshold_motion_keeps_candidates_and_selection() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();

    builder.update(&down_at(0.0, 0.0, 0.0), &scene);
    builder.commit().unwrap();

    // Between the east top edge and the east base edge of the foundation
    builder.update(&down_at(2.2, 0.0, 0.0), &scene).unwrap();
    let held = builder.state().candidates().to_vec();
    assert!(held.len() >= 2, "held={:?}", held);

    assert!(matches!(
        builder.handle_action(BuildAction::RotateRight, &down_at(2.2, 0.0, 0.0), &scene),
        ActionOutcome::Cycled(1)
    ));

    builder.update(&down_at(2.25, 0.0, 0.05), &scene).unwrap();
    assert_eq!(builder.state().candidates(), held.as_slice());
    assert_eq!(builder.state().selected_index(), 1);
}

#[test]
fn test_filter_recomputes_past_threshold() {
    let mut registry = PieceRegistry::new();
    committed_at(&mut registry, &[Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)], Vec3::ZERO);

    let filter = SnapStabilityFilter::default();
    let mut state = ResolutionState::new();
    assert_eq!(filter.refresh(&mut state, Vec3::ZERO, &registry), StabilityOutcome::Recomputed);
    state.cycle(true);
    assert_eq!(filter.refresh(&mut state, Vec3::new(0.29, 0.0, 0.0), &registry), StabilityOutcome::Held);
    assert_eq!(filter.refresh(&mut state, Vec3::new(0.31, 0.0, 0.0), &registry), StabilityOutcome::Recomputed);
    assert_eq!(state.selected_index(), 0);
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_free_placement_on_floor() {
    let registry = PieceRegistry::new();
    let moving = connector_piece(&[Vec3::ZERO]);
    let mut state = ResolutionState::new();
    state.set_hit(Vec3::ZERO, Vec3::Y);

    let resolution = PlacementResolver::new(&AlwaysValid, &registry, 0.05)
        .resolve(&moving, &state)
        .unwrap();
    assert!(resolution.valid);
    assert_close(resolution.transform.translation, Vec3::ZERO, 1e-6);
    assert_close(resolution.transform.up(), Vec3::Y, 1e-6);
}

#[test]
fn test_snap_alignment_lands_on_target_connector() {
    let mut registry = PieceRegistry::new();
    committed_at(&mut registry, &[Vec3::new(2.0, 0.0, 0.0)], Vec3::ZERO);

    let moving = connector_piece(&[
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ]);
    let hit = Vec3::new(2.05, 0.0, 0.02);
    let mut state = ResolutionState::new();
    state.set_hit(hit, Vec3::Y);
    SnapStabilityFilter::default().refresh(&mut state, hit, &registry);
    assert_eq!(state.selected_candidate().map(|c| c.connector), Some(0));

    let resolution = PlacementResolver::new(&AlwaysValid, &registry, 0.05)
        .resolve(&moving, &state)
        .unwrap();
    let snap = resolution.snap.unwrap();
    let landed = moving.connectors()[snap.moving_connector].world_position(&resolution.transform);
    assert_close(landed, Vec3::new(2.0, 0.0, 0.0), 1e-4);
}

#[test]
fn test_snap_exactness_across_cycled_candidates() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();
    builder.update(&down_at(0.0, 0.0, 0.0), &scene);
    builder.commit().unwrap();

    // On the foundation top, near its east edge: top and base east connectors
    let ray = down_at(1.9, 0.0, 0.1);
    let mut targets = Vec::new();
    for _ in 0..4 {
        let resolution = builder.update(&ray, &scene).unwrap();
        let snap = resolution.snap.expect("should snap near an edge");
        let preview = builder.preview().unwrap();
        let landed = preview.connectors()[snap.moving_connector].world_position(&resolution.transform);
        assert_close(landed, snap.candidate.position, 1e-4);
        targets.push(snap.candidate.connector);

        assert!(matches!(
            builder.handle_action(BuildAction::RotateRight, &ray, &scene),
            ActionOutcome::Cycled(_)
        ));
    }
    assert_eq!(targets[0], targets[2]);
    assert_ne!(targets[0], targets[1]);
}

// ============================================================================
// Interaction
// ============================================================================

#[test]
fn test_eight_rotations_return_to_start() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();
    let ray = down_at(-20.0, 0.0, -20.0);
    builder.update(&ray, &scene);

    let start = builder.state().yaw_degrees();
    for _ in 0..8 {
        match builder.handle_action(BuildAction::RotateRight, &ray, &scene) {
            ActionOutcome::Rotated(yaw) => assert!((0.0..360.0).contains(&yaw)),
            other => panic!("expected rotation, got {:?}", other),
        }
    }
    assert!((builder.state().yaw_degrees() - start).abs() < 1e-3);

    assert_eq!(
        builder.handle_action(BuildAction::RotateLeft, &ray, &scene),
        ActionOutcome::Rotated(315.0)
    );
}

#[test]
fn test_cycle_wraps_and_ignores_single_candidate() {
    let mut state = ResolutionState::new();
    let mut registry = PieceRegistry::new();
    committed_at(
        &mut registry,
        &[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)],
        Vec3::ZERO,
    );
    state.replace_candidates(discover_candidates(Vec3::ZERO, &registry, 1.5, 4));

    state.cycle(false);
    assert_eq!(state.selected_index(), 2);
    state.cycle(true);
    assert_eq!(state.selected_index(), 0);

    state.replace_candidates(discover_candidates(Vec3::new(-1.0, 0.0, 0.0), &registry, 1.2, 4));
    assert_eq!(state.candidates().len(), 1);
    assert!(!state.cycle(true));
    assert_eq!(state.selected_index(), 0);
}

// ============================================================================
// Commit / Retract
// ============================================================================

#[test]
fn test_commit_grows_registry_by_one_and_keeps_catalog() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();
    let listing_before = builder.catalog().by_category();
    let len_before = builder.catalog().len();

    builder.update(&down_at(0.0, 0.0, 0.0), &scene).unwrap();
    let outcome = builder.handle_action(BuildAction::Place, &down_at(0.0, 0.0, 0.0), &scene);
    let placed = builder.registry().iter().next().map(|(id, _)| id).unwrap();
    assert_eq!(outcome, ActionOutcome::Placed(placed));

    assert_eq!(builder.registry().len(), 1);
    assert_eq!(builder.catalog().len(), len_before);
    assert_eq!(builder.catalog().by_category(), listing_before);
}

#[test]
fn test_overlapping_foundation_is_refused() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();
    builder.update(&down_at(0.0, 0.0, 0.0), &scene);
    builder.commit().unwrap();

    // Stacking on top touches but does not overlap
    let on_top = builder.update(&down_at(0.0, 0.0, 0.0), &scene).unwrap();
    assert!(on_top.snap.is_none());
    assert!(on_top.valid);

    // Ground beside the corner, out of snap range, half inside the first foundation
    let ray = down_at(2.5, 0.0, 1.9);
    let beside = builder.update(&ray, &scene).unwrap();
    assert!(beside.snap.is_none());
    assert!(!beside.valid);
    assert_eq!(builder.preview_instance().map(|p| p.tint), Some(INVALID_TINT));

    assert_eq!(builder.handle_action(BuildAction::Place, &ray, &scene), ActionOutcome::Refused);
    assert_eq!(builder.registry().len(), 1);
}

#[test]
fn test_retract_removes_hit_piece_then_noops() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();
    builder.update(&down_at(0.0, 0.0, 0.0), &scene);
    let placed = builder.commit().unwrap();
    builder.drain_events();

    let ray = down_at(0.5, 0.0, 0.5);
    assert_eq!(builder.retract(&ray, &scene), Some(placed));
    assert!(builder.registry().is_empty());
    assert!(matches!(
        builder.drain_events().as_slice(),
        [BuildEvent::Removed { id, .. }] if *id == placed
    ));

    assert_eq!(builder.retract(&ray, &scene), None);
    assert_eq!(
        builder.handle_action(BuildAction::Remove, &ray, &scene),
        ActionOutcome::Missed
    );
    assert!(builder.drain_events().is_empty());
}

#[test]
fn test_retract_invalidates_held_candidates() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();
    builder.update(&down_at(0.0, 0.0, 0.0), &scene);
    builder.commit().unwrap();

    builder.update(&down_at(2.2, 0.0, 0.0), &scene).unwrap();
    assert!(!builder.state().candidates().is_empty());

    builder.retract(&down_at(0.0, 0.0, 0.0), &scene).unwrap();
    assert!(builder.state().candidates().is_empty());

    let resolution = builder.update(&down_at(2.2, 0.0, 0.0), &scene).unwrap();
    assert!(resolution.snap.is_none());
}

#[test]
fn test_place_after_retract_in_same_frame_is_refused() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();
    builder.update(&down_at(0.0, 0.0, 0.0), &scene);
    let foundation = builder.commit().unwrap();

    builder.select_piece_by_key("wall").unwrap();
    let aim = down_at(2.2, 0.0, 0.0);
    let snapped = builder.update(&aim, &scene).unwrap();
    assert!(snapped.valid);
    assert_eq!(snapped.snap.map(|s| s.candidate.piece), Some(foundation));

    // Remove the support and place before the next resolution pass
    assert_eq!(
        builder.handle_action(BuildAction::Remove, &down_at(0.0, 0.0, 0.0), &scene),
        ActionOutcome::Removed(foundation)
    );
    assert!(builder.resolution().is_none());
    assert_eq!(builder.handle_action(BuildAction::Place, &aim, &scene), ActionOutcome::Refused);
    assert!(builder.registry().is_empty());

    // Next pass resolves freely, and a wall on bare ground is still refused
    let free = builder.update(&aim, &scene).unwrap();
    assert!(free.snap.is_none());
    assert!(!free.valid);
    assert_eq!(builder.handle_action(BuildAction::Place, &aim, &scene), ActionOutcome::Refused);
    assert!(builder.registry().is_empty());
}

#[test]
fn test_rotate_after_miss_turns_instead_of_cycling() {
    let scene = StaticScene::with_ground(0.0);
    let mut builder = foundation_builder();
    builder.update(&down_at(0.0, 0.0, 0.0), &scene);
    builder.commit().unwrap();

    builder.update(&down_at(2.2, 0.0, 0.0), &scene).unwrap();
    assert!(builder.state().candidates().len() > 1);

    let sky = AimRay::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
    assert!(builder.update(&sky, &scene).is_none());
    assert!(builder.preview_instance().is_none());
    assert!(builder.state().candidates().is_empty());

    assert_eq!(
        builder.handle_action(BuildAction::RotateRight, &sky, &scene),
        ActionOutcome::Rotated(45.0)
    );
    assert_eq!(builder.state().selected_index(), 0);
}
