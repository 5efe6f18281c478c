//! Piece Part Trees
//!
//! Pieces are authored as a small hierarchy of named parts. Some parts are
//! tagged as connectors or colliders; a piece flattens its tree once at
//! creation and never walks it again.

use glam::{Quat, Vec3};

use super::connector::Connector;
use crate::physics::{OrientedBox, Transform};

/// What a part contributes to the piece.
#[derive(Debug, Clone, PartialEq)]
pub enum PartTag {
    /// Pure grouping node; only its transform matters
    Group,
    /// Attachment point
    Connector,
    /// Box collider with the given half extents
    Collider { half_extents: Vec3 },
}

/// A flattened collider in piece-local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub name: String,
    pub local: Transform,
    pub half_extents: Vec3,
}

impl Collider {
    /// The collider placed in the world with its piece at `piece`.
    pub fn world_box(&self, piece: &Transform) -> OrientedBox {
        let world = piece.mul_transform(&self.local);
        OrientedBox::new(world.translation, world.rotation, self.half_extents)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartNode {
    pub name: String,
    pub local: Transform,
    pub tag: PartTag,
    pub children: Vec<PartNode>,
}

impl PartNode {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local: Transform::IDENTITY,
            tag: PartTag::Group,
            children: Vec::new(),
        }
    }

    pub fn connector(name: impl Into<String>, offset: Vec3) -> Self {
        Self {
            name: name.into(),
            local: Transform::from_translation(offset),
            tag: PartTag::Connector,
            children: Vec::new(),
        }
    }

    pub fn collider(name: impl Into<String>, center: Vec3, half_extents: Vec3) -> Self {
        Self {
            name: name.into(),
            local: Transform::from_translation(center),
            tag: PartTag::Collider { half_extents },
            children: Vec::new(),
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.local.rotation = rotation;
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.local.translation = translation;
        self
    }

    pub fn with_child(mut self, child: PartNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first, pre-order walk collecting whatever `pick` extracts.
    ///
    /// `pick` receives each node with its transform accumulated from the root
    /// (the root's own transform included). Output order follows the tree.
    pub fn collect_tagged<T>(&self, mut pick: impl FnMut(&PartNode, Transform) -> Option<T>) -> Vec<T> {
        let mut out = Vec::new();
        self.walk(Transform::IDENTITY, &mut pick, &mut out);
        out
    }

    fn walk<T>(
        &self,
        parent: Transform,
        pick: &mut impl FnMut(&PartNode, Transform) -> Option<T>,
        out: &mut Vec<T>,
    ) {
        let accumulated = parent.mul_transform(&self.local);
        if let Some(item) = pick(self, accumulated) {
            out.push(item);
        }
        for child in &self.children {
            child.walk(accumulated, pick, out);
        }
    }

    pub fn connectors(&self) -> Vec<Connector> {
        self.collect_tagged(|node, transform| match node.tag {
            PartTag::Connector => Some(Connector::new(node.name.clone(), transform)),
            _ => None,
        })
    }

    pub fn colliders(&self) -> Vec<Collider> {
        self.collect_tagged(|node, transform| match node.tag {
            PartTag::Collider { half_extents } => Some(Collider {
                name: node.name.clone(),
                local: transform,
                half_extents,
            }),
            _ => None,
        })
    }
}
