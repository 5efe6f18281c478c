//! Placement Rules
//!
//! Validity hook consulted by the resolver after the transform is known.
//! The default rule accepts everything; piece types attach stricter rules in
//! the catalog (walls need something to stand on, solid blocks must not
//! overlap existing pieces).

use super::catalog::PieceTypeId;
use super::piece::Piece;
use crate::game::builder::registry::PieceRegistry;
use crate::game::builder::resolver::SnapMatch;
use crate::physics::Transform;

/// Everything a rule may look at for one candidate placement.
pub struct PlacementCheck<'a> {
    /// Resolved transform of the moving piece
    pub transform: Transform,
    /// Connector pair used, if the placement snapped
    pub snap: Option<&'a SnapMatch>,
    /// The preview piece being placed
    pub moving: &'a Piece,
    /// Committed pieces
    pub registry: &'a PieceRegistry,
    /// Collider faces are pulled in by this much before overlap tests
    pub overlap_tolerance: f32,
}

pub trait PlacementRule: Send + Sync {
    fn allows(&self, check: &PlacementCheck<'_>) -> bool;

    fn name(&self) -> &'static str;
}

/// Pass-through rule: every resolved placement is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl PlacementRule for AlwaysValid {
    fn allows(&self, _check: &PlacementCheck<'_>) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "always_valid"
    }
}

/// Requires the placement to be snapped onto a connector owned by one of the
/// listed piece types.
#[derive(Debug, Clone, Default)]
pub struct RequireSnapTo {
    pub allowed: Vec<PieceTypeId>,
}

impl RequireSnapTo {
    pub fn new(allowed: impl IntoIterator<Item = PieceTypeId>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

impl PlacementRule for RequireSnapTo {
    fn allows(&self, check: &PlacementCheck<'_>) -> bool {
        check
            .snap
            .and_then(|snap| check.registry.get(snap.candidate.piece))
            .is_some_and(|target| self.allowed.contains(&target.type_id()))
    }

    fn name(&self) -> &'static str {
        "require_snap_to"
    }
}

/// Rejects placements whose collider bounds overlap a committed piece.
///
/// Works on world-space AABBs of each collider, so rotated pieces are
/// treated conservatively.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlap;

impl PlacementRule for NoOverlap {
    fn allows(&self, check: &PlacementCheck<'_>) -> bool {
        let tolerance = check.overlap_tolerance;
        let moving: Vec<_> = check
            .moving
            .world_colliders_at(check.transform)
            .map(|obb| obb.world_aabb().shrink(tolerance))
            .collect();

        !check.registry.iter().any(|(_, placed)| {
            placed
                .world_colliders()
                .map(|obb| obb.world_aabb().shrink(tolerance))
                .any(|other| moving.iter().any(|mine| mine.intersects(&other)))
        })
    }

    fn name(&self) -> &'static str {
        "no_overlap"
    }
}

/// Conjunction of rules; an empty list allows everything.
#[derive(Default)]
pub struct AllOf(pub Vec<Box<dyn PlacementRule>>);

impl AllOf {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, rule: impl PlacementRule + 'static) -> Self {
        self.0.push(Box::new(rule));
        self
    }
}

impl PlacementRule for AllOf {
    fn allows(&self, check: &PlacementCheck<'_>) -> bool {
        self.0.iter().all(|rule| rule.allows(check))
    }

    fn name(&self) -> &'static str {
        "all_of"
    }
}
