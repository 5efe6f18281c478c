//! Collision detection module
//!
//! Ray casting and overlap primitives for placed building pieces. Pieces are
//! described by oriented boxes; rays are tested against them by moving the ray
//! into the box's local frame and running the slab test against an AABB.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use snapforge_engine::physics::collision::{ray_aabb_intersect, OrientedBox};
//! use glam::{Quat, Vec3};
//!
//! let origin = Vec3::new(0.0, 0.0, -5.0);
//! let direction = Vec3::new(0.0, 0.0, 1.0);
//!
//! if let Some(t) = ray_aabb_intersect(origin, direction, Vec3::splat(-1.0), Vec3::ONE) {
//!     println!("Hit at distance {}", t);
//! }
//!
//! let wall = OrientedBox::new(Vec3::ZERO, Quat::from_rotation_y(0.5), Vec3::new(2.0, 1.5, 0.1));
//! if let Some((t, normal)) = wall.ray_cast(origin, direction, 100.0) {
//!     println!("Wall hit at {} facing {:?}", t, normal);
//! }
//! ```

use glam::{Mat3, Quat, Vec3};

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero direction components become huge inverse values so the slab
    // for that axis is either always or never entered.
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// Computes the outward surface normal for a point on an AABB surface.
///
/// Picks the face whose normalized coordinate has the largest magnitude.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(f32::EPSILON));
    let normalized = (point - center) / half_extents;
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

// =============================================================================
// Aabb
// =============================================================================

/// World-space axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Shrink every face inward by `amount`, collapsing to the center rather than inverting.
    pub fn shrink(&self, amount: f32) -> Aabb {
        let half = (self.half_extents() - Vec3::splat(amount)).max(Vec3::ZERO);
        Aabb::from_center_half_extents(self.center(), half)
    }

    /// Strict overlap: boxes that only touch do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn ray_cast(&self, origin: Vec3, direction: Vec3, max_dist: f32) -> Option<(f32, Vec3)> {
        let t = ray_aabb_intersect(origin, direction, self.min, self.max)?;
        if t > max_dist {
            return None;
        }
        let normal = aabb_surface_normal(origin + direction * t, self.min, self.max);
        Some((t, normal))
    }
}

// =============================================================================
// OrientedBox
// =============================================================================

/// A box with arbitrary orientation, used for piece colliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// World-space center
    pub center: Vec3,
    /// World-space orientation
    pub rotation: Quat,
    /// Half size along each local axis
    pub half_extents: Vec3,
}

impl OrientedBox {
    pub fn new(center: Vec3, rotation: Quat, half_extents: Vec3) -> Self {
        Self {
            center,
            rotation,
            half_extents: half_extents.abs(),
        }
    }

    /// Casts a ray against the box.
    ///
    /// Returns the hit distance and the world-space outward normal of the face hit.
    pub fn ray_cast(&self, origin: Vec3, direction: Vec3, max_dist: f32) -> Option<(f32, Vec3)> {
        let inv = self.rotation.inverse();
        let local_origin = inv * (origin - self.center);
        let local_dir = inv * direction;

        let t = ray_aabb_intersect(local_origin, local_dir, -self.half_extents, self.half_extents)?;
        if t > max_dist {
            return None;
        }

        let local_hit = local_origin + local_dir * t;
        let local_normal = aabb_surface_normal(local_hit, -self.half_extents, self.half_extents);
        Some((t, (self.rotation * local_normal).normalize()))
    }

    /// Tight world-space AABB enclosing the rotated box.
    pub fn world_aabb(&self) -> Aabb {
        let basis = Mat3::from_quat(self.rotation);
        let extent = basis.x_axis.abs() * self.half_extents.x
            + basis.y_axis.abs() * self.half_extents.y
            + basis.z_axis.abs() * self.half_extents.z;
        Aabb::from_center_half_extents(self.center, extent)
    }
}
