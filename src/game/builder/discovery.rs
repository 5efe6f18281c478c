//! Candidate Discovery
//!
//! Finds the connectors of committed pieces near a world point, nearest
//! first. Pure: reads the registry, never mutates anything.

use glam::Vec3;

use super::registry::PieceRegistry;
use crate::game::config::MAX_SNAP_CANDIDATES;
use crate::game::pieces::PieceId;

/// A connector on a committed piece that the preview could snap to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Owning piece
    pub piece: PieceId,
    /// Connector index within the owning piece
    pub connector: usize,
    /// Connector world position at discovery time
    pub position: Vec3,
    /// Connector world up at discovery time
    pub up: Vec3,
    /// Distance from the query point
    pub distance: f32,
}

/// Up to `max_candidates` connectors within `radius` of `point`.
///
/// Sorted by ascending distance. Equal distances keep registry order, then
/// connector order within a piece. The cap never exceeds four.
pub fn discover_candidates(
    point: Vec3,
    registry: &PieceRegistry,
    radius: f32,
    max_candidates: usize,
) -> Vec<Candidate> {
    let cap = max_candidates.min(MAX_SNAP_CANDIDATES);
    if cap == 0 || !point.is_finite() {
        return Vec::new();
    }

    let mut found: Vec<Candidate> = registry
        .iter()
        .filter(|(_, piece)| piece.is_committed())
        .flat_map(|(id, piece)| {
            let transform = *piece.transform();
            piece
                .connectors()
                .iter()
                .enumerate()
                .map(move |(index, connector)| {
                    let position = connector.world_position(&transform);
                    Candidate {
                        piece: id,
                        connector: index,
                        position,
                        up: connector.world_up(&transform),
                        distance: position.distance(point),
                    }
                })
        })
        .filter(|candidate| candidate.distance <= radius)
        .collect();

    // sort_by is stable, which is what keeps ties in input order
    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    found.truncate(cap);
    found
}
