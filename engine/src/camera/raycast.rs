//! Raycast Module
//!
//! Builds world-space rays from the camera, either through the crosshair or
//! through an arbitrary screen point, and intersects them with planes.

use glam::Vec3;

/// A world-space ray with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl AimRay {
    /// Create a ray, normalizing `direction`. A zero direction falls back to -Z.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        Self { origin, direction }
    }

    /// Ray from `origin` towards `target`.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Intersect a ray with an infinite plane.
///
/// # Returns
/// * `Some(t)` - Distance along the ray (t >= 0)
/// * `None` - Ray is parallel to the plane or the plane is behind the origin
pub fn ray_plane_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<f32> {
    let denom = plane_normal.dot(ray_dir);
    if denom.abs() < 0.0001 {
        return None;
    }

    let t = (plane_point - ray_origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(t)
}

/// Calculate ray direction from screen UV coordinates
///
/// # Arguments
/// * `camera_pos` - Camera position in world space
/// * `camera_target` - Point the camera is looking at
/// * `uv` - Normalized screen coordinates (0-1, 0-1), (0,0) bottom-left
/// * `aspect_ratio` - Screen aspect ratio (width / height)
/// * `fov` - Vertical field of view in radians
///
/// # Returns
/// Normalized ray direction in world space. The screen center maps to the
/// camera's forward direction.
pub fn get_ray_direction(
    camera_pos: Vec3,
    camera_target: Vec3,
    uv: (f32, f32),
    aspect_ratio: f32,
    fov: f32,
) -> Vec3 {
    let ndc = (uv.0 * 2.0 - 1.0, uv.1 * 2.0 - 1.0);
    let half_fov = (fov * 0.5_f32).tan();

    let forward = (camera_target - camera_pos).try_normalize().unwrap_or(Vec3::NEG_Z);

    // Looking straight up or down: world up is degenerate, use world X
    let (right, up) = if forward.y.abs() > 0.99 {
        let right = Vec3::X;
        let up = right.cross(forward).normalize();
        (right, up)
    } else {
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (right, up)
    };

    (forward + right * ndc.0 * aspect_ratio * half_fov + up * ndc.1 * half_fov).normalize()
}

/// Raycast configuration for convenience
#[derive(Clone, Copy, Debug)]
pub struct RaycastConfig {
    /// Screen aspect ratio (width / height)
    pub aspect_ratio: f32,
    /// Field of view in radians
    pub fov: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            fov: 1.2, // ~69 degrees
        }
    }
}

impl RaycastConfig {
    pub fn with_aspect(aspect_ratio: f32) -> Self {
        Self {
            aspect_ratio,
            ..Default::default()
        }
    }

    /// Ray through a screen point.
    pub fn screen_ray(&self, camera_pos: Vec3, camera_target: Vec3, uv: (f32, f32)) -> AimRay {
        AimRay {
            origin: camera_pos,
            direction: get_ray_direction(camera_pos, camera_target, uv, self.aspect_ratio, self.fov),
        }
    }

    /// Ray through the center of the screen (the crosshair).
    pub fn crosshair_ray(&self, camera_pos: Vec3, camera_target: Vec3) -> AimRay {
        self.screen_ray(camera_pos, camera_target, (0.5, 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_direction_normalized() {
        let camera_pos = Vec3::new(0.0, 5.0, 10.0);
        let camera_target = Vec3::ZERO;

        for x in [0.0, 0.25, 0.5, 0.75, 1.0] {
            for y in [0.0, 0.25, 0.5, 0.75, 1.0] {
                let ray = get_ray_direction(camera_pos, camera_target, (x, y), 16.0 / 9.0, 1.2);
                assert!(
                    (ray.length() - 1.0).abs() < 0.001,
                    "Ray should be normalized, got length {}",
                    ray.length()
                );
            }
        }
    }

    #[test]
    fn test_center_of_screen_is_forward() {
        let config = RaycastConfig::default();
        let ray = config.crosshair_ray(Vec3::new(0.0, 5.0, 5.0), Vec3::ZERO);
        let expected = Vec3::new(0.0, -5.0, -5.0).normalize();
        assert!((ray.direction - expected).length() < 1e-5);
    }

    #[test]
    fn test_right_half_of_screen_points_right() {
        let dir = get_ray_direction(Vec3::ZERO, Vec3::NEG_Z, (1.0, 0.5), 1.0, 1.2);
        assert!(dir.x > 0.0, "dir={:?}", dir);
    }

    #[test]
    fn test_plane_parallel_returns_none() {
        assert!(ray_plane_intersection(Vec3::Y, Vec3::X, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_plane_behind_returns_none() {
        assert!(ray_plane_intersection(Vec3::Y, Vec3::Y, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_plane_hit_distance() {
        let t = ray_plane_intersection(Vec3::new(0.0, 4.0, 0.0), Vec3::NEG_Y, Vec3::ZERO, Vec3::Y);
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn test_aim_ray_zero_direction_falls_back() {
        let ray = AimRay::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(ray.direction, Vec3::NEG_Z);
    }
}
