//! Camera Module
//!
//! Aiming and raycasting for build mode. Window-system agnostic: only camera
//! state and ray math live here.

pub mod aim_camera;
pub mod raycast;

pub use aim_camera::AimCamera;
pub use raycast::{AimRay, RaycastConfig, get_ray_direction, ray_plane_intersection};
