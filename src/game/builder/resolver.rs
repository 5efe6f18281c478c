//! Placement Resolver
//!
//! Turns the resolution state into a rigid transform for the moving piece.
//!
//! Free placement stands the piece on the hit surface: its up axis follows
//! the hit normal and its origin sits on the hit point. Snapped placement
//! takes the selected candidate's up as the normal, then shifts the piece so
//! that its connector closest to the target lands exactly on it. Yaw turns
//! the piece about its up axis in both cases.

use glam::{Mat3, Quat, Vec3};

use super::discovery::Candidate;
use super::registry::PieceRegistry;
use super::state::{ResolutionState, SurfaceHit};
use crate::game::pieces::{Connector, Piece, PlacementCheck, PlacementRule};
use crate::physics::Transform;

/// Above this |dot| the up axis is treated as parallel to -Z.
const PARALLEL_EPSILON: f32 = 0.999;

/// Which connector pair a snapped placement used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapMatch {
    /// Fixed connector on a committed piece
    pub candidate: Candidate,
    /// Index of the moving piece's connector placed onto it
    pub moving_connector: usize,
}

/// Output of one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub transform: Transform,
    pub valid: bool,
    pub snap: Option<SnapMatch>,
}

/// Rotation taking +Y to `up` while keeping the piece's -Z as close to world
/// -Z as possible.
///
/// A zero or non-finite `up` falls back to world up. When `up` is nearly
/// parallel to -Z, world +X is used as the reference instead so the result
/// never contains NaN.
pub fn orientation_from_up(up: Vec3) -> Quat {
    let up = up.try_normalize().unwrap_or(Vec3::Y);

    let reference = if up.dot(Vec3::NEG_Z).abs() > PARALLEL_EPSILON {
        Vec3::X
    } else {
        Vec3::NEG_Z
    };
    let forward = (reference - up * reference.dot(up)).normalize();
    let back = -forward;
    let right = up.cross(back);

    Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize()
}

/// Pure transform computation, no validity.
///
/// Returns the transform and, for a snapped placement, the index of the
/// moving connector that was aligned. A moving piece without connectors is
/// placed freely even when a target is given.
pub fn resolve_transform(
    connectors: &[Connector],
    hit: &SurfaceHit,
    target: Option<&Candidate>,
    yaw_degrees: f32,
) -> (Transform, Option<usize>) {
    let yaw = Quat::from_rotation_y(yaw_degrees.to_radians());

    let Some(target) = target.filter(|_| !connectors.is_empty()) else {
        let rotation = orientation_from_up(hit.normal) * yaw;
        return (Transform::new(hit.position, rotation), None);
    };

    let rotation = orientation_from_up(target.up) * yaw;

    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (index, connector) in connectors.iter().enumerate() {
        let tentative = hit.position + rotation * connector.offset();
        let distance = tentative.distance(target.position);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }

    let offset = rotation * connectors[best].offset();
    (Transform::new(target.position - offset, rotation), Some(best))
}

/// Resolves placements against the committed world with one piece type's rule.
pub struct PlacementResolver<'a> {
    rule: &'a dyn PlacementRule,
    registry: &'a PieceRegistry,
    overlap_tolerance: f32,
}

impl<'a> PlacementResolver<'a> {
    pub fn new(rule: &'a dyn PlacementRule, registry: &'a PieceRegistry, overlap_tolerance: f32) -> Self {
        Self {
            rule,
            registry,
            overlap_tolerance,
        }
    }

    /// `None` when there is no surface hit to place on.
    pub fn resolve(&self, moving: &Piece, state: &ResolutionState) -> Option<Resolution> {
        let hit = state.hit()?;
        let target = state.selected_candidate();

        let (transform, moving_connector) =
            resolve_transform(moving.connectors(), hit, target, state.yaw_degrees());

        let snap = target
            .zip(moving_connector)
            .map(|(candidate, moving_connector)| SnapMatch {
                candidate: *candidate,
                moving_connector,
            });

        let valid = transform.is_finite()
            && self.rule.allows(&PlacementCheck {
                transform,
                snap: snap.as_ref(),
                moving,
                registry: self.registry,
                overlap_tolerance: self.overlap_tolerance,
            });

        Some(Resolution { transform, valid, snap })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::pieces::{AlwaysValid, PartNode, PieceId, PieceTypeId, RequireSnapTo};

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    fn target(position: Vec3, up: Vec3) -> Candidate {
        Candidate {
            piece: PieceId(0),
            connector: 0,
            position,
            up,
            distance: 0.0,
        }
    }

    fn hit(position: Vec3, normal: Vec3) -> SurfaceHit {
        SurfaceHit { position, normal }
    }

    #[test]
    fn world_up_is_identity() {
        let q = orientation_from_up(Vec3::Y);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-5), "q={:?}", q);
    }

    #[test]
    fn orientation_maps_y_onto_up() {
        for up in [Vec3::X, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z, Vec3::new(1.0, 1.0, 0.0)] {
            let q = orientation_from_up(up);
            assert!(q.is_finite());
            assert_close(q * Vec3::Y, up.normalize());
        }
    }

    #[test]
    fn degenerate_normal_falls_back_to_world_up() {
        let q = orientation_from_up(Vec3::ZERO);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-5));
        let q = orientation_from_up(Vec3::new(0.0, 0.0, -1.0 + 1e-6));
        assert!(q.is_finite());
    }

    #[test]
    fn free_placement_on_flat_ground() {
        let connectors = [Connector::at("base", Vec3::ZERO)];
        let (t, matched) = resolve_transform(&connectors, &hit(Vec3::ZERO, Vec3::Y), None, 0.0);
        assert!(matched.is_none());
        assert_close(t.translation, Vec3::ZERO);
        assert_close(t.up(), Vec3::Y);
    }

    #[test]
    fn yaw_turns_about_up() {
        let connectors = [Connector::at("east", Vec3::X)];
        let (t, _) = resolve_transform(&connectors, &hit(Vec3::ZERO, Vec3::Y), None, 90.0);
        assert_close(t.transform_vector(Vec3::X), Vec3::NEG_Z);
        assert_close(t.up(), Vec3::Y);
    }

    #[test]
    fn snapped_connector_lands_on_target() {
        let connectors = [
            Connector::at("west", Vec3::new(-2.0, 0.0, 0.0)),
            Connector::at("east", Vec3::new(2.0, 0.0, 0.0)),
        ];
        let fixed = target(Vec3::new(2.0, 0.0, 0.0), Vec3::Y);
        let (t, matched) = resolve_transform(
            &connectors,
            &hit(Vec3::new(2.05, 0.0, 0.02), Vec3::Y),
            Some(&fixed),
            0.0,
        );
        let index = matched.unwrap();
        assert_close(connectors[index].world_position(&t), fixed.position);
    }

    #[test]
    fn snapping_with_yaw_still_lands_exactly() {
        let connectors = [
            Connector::at("a", Vec3::new(1.0, 0.0, 0.5)),
            Connector::at("b", Vec3::new(-1.0, 0.5, 0.0)),
            Connector::at("c", Vec3::new(0.0, 2.0, -1.0)),
        ];
        let fixed = target(Vec3::new(3.0, 1.0, -2.0), Vec3::new(0.0, 1.0, 1.0));
        for yaw in [0.0, 45.0, 135.0, 270.0] {
            let (t, matched) = resolve_transform(
                &connectors,
                &hit(Vec3::new(2.5, 1.2, -2.1), Vec3::Y),
                Some(&fixed),
                yaw,
            );
            let index = matched.unwrap();
            assert_close(connectors[index].world_position(&t), fixed.position);
            assert_close(t.up(), fixed.up.normalize());
        }
    }

    #[test]
    fn piece_without_connectors_places_freely() {
        let fixed = target(Vec3::new(5.0, 0.0, 0.0), Vec3::X);
        let (t, matched) = resolve_transform(&[], &hit(Vec3::ONE, Vec3::Y), Some(&fixed), 0.0);
        assert!(matched.is_none());
        assert_close(t.translation, Vec3::ONE);
        assert_close(t.up(), Vec3::Y);
    }

    #[test]
    fn resolver_reports_nothing_without_a_hit() {
        let registry = PieceRegistry::new();
        let piece = Piece::from_parts(PieceTypeId(0), &PartNode::group("empty"));
        let resolver = PlacementResolver::new(&AlwaysValid, &registry, 0.05);
        assert!(resolver.resolve(&piece, &ResolutionState::new()).is_none());
    }

    #[test]
    fn resolver_applies_the_rule() {
        let registry = PieceRegistry::new();
        let piece = Piece::from_parts(
            PieceTypeId(1),
            &PartNode::group("wall").with_child(PartNode::connector("base", Vec3::ZERO)),
        );
        let mut state = ResolutionState::new();
        state.set_hit(Vec3::ZERO, Vec3::Y);

        let free = PlacementResolver::new(&AlwaysValid, &registry, 0.05)
            .resolve(&piece, &state)
            .unwrap();
        assert!(free.valid);
        assert!(free.snap.is_none());

        let rule = RequireSnapTo::new([PieceTypeId(0)]);
        let strict = PlacementResolver::new(&rule, &registry, 0.05)
            .resolve(&piece, &state)
            .unwrap();
        assert!(!strict.valid);
    }
}
