//! Built-in Piece Templates
//!
//! Part trees for the stock building set. Every piece has its origin at the
//! center of its base so free placement sets it flush on the hit surface.
//!
//! | Piece      | Size (x × y × z) | Connectors                         |
//! |------------|------------------|------------------------------------|
//! | Foundation | 4 × 1 × 4        | 4 top edges, 4 base edges          |
//! | Floor      | 4 × 0.2 × 4      | 4 edges                            |
//! | Wall       | 4 × 3 × 0.2      | base, top, left, right             |
//! | Pillar     | 0.4 × 3 × 0.4    | base, top                          |
//! | Ramp       | 4 × 1 × 4        | low edge, high edge                |

use glam::{Quat, Vec3};

use super::catalog::{PieceCatalog, PieceMeta, TemplateFactory};
use super::parts::PartNode;
use super::rules::{NoOverlap, RequireSnapTo};

pub const FOUNDATION_SIZE: Vec3 = Vec3::new(4.0, 1.0, 4.0);
pub const FLOOR_THICKNESS: f32 = 0.2;
pub const WALL_HEIGHT: f32 = 3.0;
pub const WALL_THICKNESS: f32 = 0.2;

/// Four edge-midpoint connectors of a square of half width `half` at height `y`.
fn edge_connectors(prefix: &str, half: f32, y: f32) -> [PartNode; 4] {
    [
        PartNode::connector(format!("{prefix}_east"), Vec3::new(half, y, 0.0)),
        PartNode::connector(format!("{prefix}_west"), Vec3::new(-half, y, 0.0)),
        PartNode::connector(format!("{prefix}_south"), Vec3::new(0.0, y, half)),
        PartNode::connector(format!("{prefix}_north"), Vec3::new(0.0, y, -half)),
    ]
}

pub fn foundation_template() -> PartNode {
    let half = FOUNDATION_SIZE * 0.5;
    let mut root = PartNode::group("foundation").with_child(PartNode::collider(
        "body",
        Vec3::new(0.0, half.y, 0.0),
        half,
    ));
    for connector in edge_connectors("top", half.x, FOUNDATION_SIZE.y) {
        root = root.with_child(connector);
    }
    for connector in edge_connectors("base", half.x, 0.0) {
        root = root.with_child(connector);
    }
    root
}

pub fn floor_template() -> PartNode {
    let half = FOUNDATION_SIZE.x * 0.5;
    let mut root = PartNode::group("floor").with_child(PartNode::collider(
        "deck",
        Vec3::new(0.0, FLOOR_THICKNESS * 0.5, 0.0),
        Vec3::new(half, FLOOR_THICKNESS * 0.5, half),
    ));
    for connector in edge_connectors("edge", half, 0.0) {
        root = root.with_child(connector);
    }
    root
}

pub fn wall_template() -> PartNode {
    let half_width = FOUNDATION_SIZE.x * 0.5;
    PartNode::group("wall")
        .with_child(PartNode::collider(
            "panel",
            Vec3::new(0.0, WALL_HEIGHT * 0.5, 0.0),
            Vec3::new(half_width, WALL_HEIGHT * 0.5, WALL_THICKNESS * 0.5),
        ))
        .with_child(PartNode::connector("base", Vec3::ZERO))
        .with_child(PartNode::connector("top", Vec3::new(0.0, WALL_HEIGHT, 0.0)))
        .with_child(PartNode::connector("left", Vec3::new(-half_width, 0.0, 0.0)))
        .with_child(PartNode::connector("right", Vec3::new(half_width, 0.0, 0.0)))
}

pub fn pillar_template() -> PartNode {
    PartNode::group("pillar")
        .with_child(PartNode::collider(
            "shaft",
            Vec3::new(0.0, WALL_HEIGHT * 0.5, 0.0),
            Vec3::new(0.2, WALL_HEIGHT * 0.5, 0.2),
        ))
        .with_child(PartNode::connector("base", Vec3::ZERO))
        .with_child(PartNode::connector("top", Vec3::new(0.0, WALL_HEIGHT, 0.0)))
}

/// Rises from +Z (low) to -Z (high) by one meter over four.
pub fn ramp_template() -> PartNode {
    let half = FOUNDATION_SIZE.x * 0.5;
    let rise = 1.0_f32;
    let slope = rise.atan2(FOUNDATION_SIZE.z);
    let deck_length = (FOUNDATION_SIZE.z * FOUNDATION_SIZE.z + rise * rise).sqrt();

    PartNode::group("ramp")
        .with_child(
            PartNode::group("incline")
                .with_translation(Vec3::new(0.0, rise * 0.5, 0.0))
                .with_rotation(Quat::from_rotation_x(slope))
                .with_child(PartNode::collider(
                    "deck",
                    Vec3::ZERO,
                    Vec3::new(half, FLOOR_THICKNESS * 0.5, deck_length * 0.5),
                )),
        )
        .with_child(PartNode::connector("low", Vec3::new(0.0, 0.0, half)))
        .with_child(PartNode::connector("high", Vec3::new(0.0, rise, -half)))
}

/// Stock catalog: foundations, floors, walls, pillars and ramps.
///
/// Foundations may not overlap other pieces; walls must stand on a
/// foundation, floor or another wall.
pub fn default_catalog() -> PieceCatalog {
    let mut catalog = PieceCatalog::new();

    let foundation = catalog.register_with_rule(
        "foundation",
        PieceMeta::new("Foundation", "Foundations"),
        TemplateFactory::new(foundation_template()),
        NoOverlap,
    );
    let floor = catalog.register(
        "floor",
        PieceMeta::new("Floor", "Floors"),
        TemplateFactory::new(floor_template()),
    );
    catalog.register_with(
        "wall",
        PieceMeta::new("Wall", "Walls"),
        TemplateFactory::new(wall_template()),
        |wall| RequireSnapTo::new([foundation, floor, wall]),
    );
    catalog.register(
        "pillar",
        PieceMeta::new("Pillar", "Walls"),
        TemplateFactory::new(pillar_template()),
    );
    catalog.register(
        "ramp",
        PieceMeta::new("Ramp", "Floors"),
        TemplateFactory::new(ramp_template()),
    );

    catalog
}
