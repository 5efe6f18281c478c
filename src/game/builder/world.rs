//! World Queries
//!
//! The single physics query the build core needs: a masked ray cast that
//! reports where it hit, the surface normal and what it hit. Committed pieces
//! answer through the registry; ground and static props through
//! [`StaticScene`]; [`SceneQuery`] layers the two.

use std::ops::BitOr;

use glam::Vec3;

use super::registry::PieceRegistry;
use crate::game::pieces::PieceId;
use crate::camera::ray_plane_intersection;
use crate::physics::Aabb;

/// Collision layers a ray cast considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryMask(pub u32);

impl QueryMask {
    pub const NONE: QueryMask = QueryMask(0);
    pub const TERRAIN: QueryMask = QueryMask(1 << 0);
    pub const PIECES: QueryMask = QueryMask(1 << 1);
    pub const PROPS: QueryMask = QueryMask(1 << 2);
    pub const ALL: QueryMask = QueryMask(0b111);

    /// Surfaces a preview may rest on.
    pub const PLACEMENT: QueryMask = QueryMask(Self::TERRAIN.0 | Self::PIECES.0);
    /// Things a removal ray may stop at. Props block the ray but are never removed.
    pub const REMOVAL: QueryMask = QueryMask(Self::PIECES.0 | Self::PROPS.0);

    #[inline]
    pub fn contains(self, other: QueryMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for QueryMask {
    type Output = QueryMask;

    fn bitor(self, rhs: QueryMask) -> QueryMask {
        QueryMask(self.0 | rhs.0)
    }
}

/// What a ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Terrain,
    /// Static scenery, by index in its scene
    Prop(u32),
    /// A collider sub-part of a committed piece
    PiecePart { piece: PieceId, part: usize },
}

impl HitTarget {
    /// The piece that owns the hit collider, if any.
    pub fn owning_piece(&self) -> Option<PieceId> {
        match self {
            HitTarget::PiecePart { piece, .. } => Some(*piece),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub position: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    pub target: HitTarget,
}

/// Synchronous, side-effect free ray cast against the world.
pub trait WorldQuery {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: QueryMask) -> Option<RayHit>;
}

impl<T: WorldQuery + ?Sized> WorldQuery for &T {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: QueryMask) -> Option<RayHit> {
        (**self).cast_ray(origin, direction, max_distance, mask)
    }
}

fn closer(best: Option<RayHit>, hit: RayHit) -> Option<RayHit> {
    match best {
        Some(current) if current.distance <= hit.distance => Some(current),
        _ => Some(hit),
    }
}

impl WorldQuery for PieceRegistry {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: QueryMask) -> Option<RayHit> {
        if !mask.contains(QueryMask::PIECES) {
            return None;
        }
        let direction = direction.try_normalize()?;

        let mut best = None;
        for (id, piece) in self.iter() {
            if !piece.has_collision() {
                continue;
            }
            for (part, collider) in piece.world_colliders().enumerate() {
                if let Some((t, normal)) = collider.ray_cast(origin, direction, max_distance) {
                    best = closer(
                        best,
                        RayHit {
                            position: origin + direction * t,
                            normal,
                            distance: t,
                            target: HitTarget::PiecePart { piece: id, part },
                        },
                    );
                }
            }
        }
        best
    }
}

/// Flat ground plus axis-aligned props.
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    ground_height: Option<f32>,
    props: Vec<Aabb>,
}

impl StaticScene {
    /// An empty scene: every ray misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene with an infinite horizontal ground plane at `height`.
    pub fn with_ground(height: f32) -> Self {
        Self {
            ground_height: Some(height),
            props: Vec::new(),
        }
    }

    pub fn add_prop(&mut self, bounds: Aabb) -> u32 {
        self.props.push(bounds);
        (self.props.len() - 1) as u32
    }
}

impl WorldQuery for StaticScene {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: QueryMask) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        let mut best = None;

        if let Some(height) = self.ground_height.filter(|_| mask.contains(QueryMask::TERRAIN)) {
            let plane_point = Vec3::new(0.0, height, 0.0);
            if let Some(t) = ray_plane_intersection(origin, direction, plane_point, Vec3::Y) {
                if t <= max_distance {
                    best = Some(RayHit {
                        position: origin + direction * t,
                        normal: Vec3::Y,
                        distance: t,
                        target: HitTarget::Terrain,
                    });
                }
            }
        }

        if mask.contains(QueryMask::PROPS) {
            for (index, prop) in self.props.iter().enumerate() {
                if let Some((t, normal)) = prop.ray_cast(origin, direction, max_distance) {
                    best = closer(
                        best,
                        RayHit {
                            position: origin + direction * t,
                            normal,
                            distance: t,
                            target: HitTarget::Prop(index as u32),
                        },
                    );
                }
            }
        }

        best
    }
}

/// Static world and committed pieces queried together; the closest hit wins.
pub struct SceneQuery<'a> {
    world: &'a dyn WorldQuery,
    registry: &'a PieceRegistry,
}

impl<'a> SceneQuery<'a> {
    pub fn new(world: &'a dyn WorldQuery, registry: &'a PieceRegistry) -> Self {
        Self { world, registry }
    }
}

impl WorldQuery for SceneQuery<'_> {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: QueryMask) -> Option<RayHit> {
        let from_world = self.world.cast_ray(origin, direction, max_distance, mask);
        let from_pieces = self.registry.cast_ray(origin, direction, max_distance, mask);
        match (from_world, from_pieces) {
            (Some(a), Some(b)) => closer(Some(a), b),
            (a, b) => a.or(b),
        }
    }
}
