//! Pieces
//!
//! A piece is a structural element with a world transform, a flat list of
//! connectors and a list of box colliders. It starts life as a preview (no
//! collision, never registered) and becomes a committed obstacle when the
//! registry takes ownership of it.

use std::fmt;

use glam::Vec3;

use super::catalog::PieceTypeId;
use super::connector::Connector;
use super::parts::{Collider, PartNode};
use crate::physics::{Aabb, OrientedBox, Transform};

/// Registry-assigned identity of a committed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    /// Follows the cursor; excluded from collision and from the registry
    Preview,
    /// Placed in the world; collidable
    Committed,
}

#[derive(Debug, Clone)]
pub struct Piece {
    type_id: PieceTypeId,
    transform: Transform,
    connectors: Vec<Connector>,
    colliders: Vec<Collider>,
    state: PieceState,
    collision_enabled: bool,
    visible: bool,
    placement_valid: bool,
}

impl Piece {
    /// Create a preview piece from already flattened parts.
    pub fn new(type_id: PieceTypeId, connectors: Vec<Connector>, colliders: Vec<Collider>) -> Self {
        Self {
            type_id,
            transform: Transform::IDENTITY,
            connectors,
            colliders,
            state: PieceState::Preview,
            collision_enabled: false,
            visible: false,
            placement_valid: false,
        }
    }

    /// Create a preview piece by flattening a part tree.
    pub fn from_parts(type_id: PieceTypeId, root: &PartNode) -> Self {
        Self::new(type_id, root.connectors(), root.colliders())
    }

    pub fn type_id(&self) -> PieceTypeId {
        self.type_id
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    pub fn is_committed(&self) -> bool {
        self.state == PieceState::Committed
    }

    pub fn has_collision(&self) -> bool {
        self.collision_enabled
    }

    /// Switch between preview (no collision) and committed (collidable).
    pub fn set_preview(&mut self, preview: bool) {
        if preview {
            self.state = PieceState::Preview;
            self.collision_enabled = false;
        } else {
            self.state = PieceState::Committed;
            self.collision_enabled = true;
        }
    }

    /// Record the validity flag a renderer uses to tint the preview.
    pub fn set_placement_feedback(&mut self, valid: bool) {
        self.placement_valid = valid;
    }

    pub fn placement_valid(&self) -> bool {
        self.placement_valid
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn connector_world_position(&self, index: usize) -> Option<Vec3> {
        self.connectors
            .get(index)
            .map(|c| c.world_position(&self.transform))
    }

    pub fn connector_world_up(&self, index: usize) -> Option<Vec3> {
        self.connectors.get(index).map(|c| c.world_up(&self.transform))
    }

    /// Colliders placed at the piece's current transform.
    pub fn world_colliders(&self) -> impl Iterator<Item = OrientedBox> + '_ {
        self.world_colliders_at(self.transform)
    }

    /// Colliders placed as if the piece sat at `transform`.
    pub fn world_colliders_at(&self, transform: Transform) -> impl Iterator<Item = OrientedBox> + '_ {
        self.colliders.iter().map(move |c| c.world_box(&transform))
    }

    /// Union of collider bounds at `transform`, `None` for a piece without colliders.
    pub fn world_bounds_at(&self, transform: Transform) -> Option<Aabb> {
        self.world_colliders_at(transform)
            .map(|obb| obb.world_aabb())
            .reduce(|a, b| Aabb::new(a.min.min(b.min), a.max.max(b.max)))
    }
}
