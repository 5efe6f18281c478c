//! Physics module
//!
//! The build core needs exactly one physics query: a synchronous ray cast
//! against piece colliders and the ground. Everything else (rigid bodies,
//! load simulation) is left to the host.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**
//!
//! # Submodules
//!
//! - [`types`] - glam re-exports and the rigid [`Transform`]
//! - [`collision`] - Ray-AABB / ray-OBB tests and AABB overlap

pub mod collision;
pub mod types;

pub use collision::{Aabb, OrientedBox, aabb_surface_normal, ray_aabb_intersect};
pub use types::{Quat, Transform, Vec3};
