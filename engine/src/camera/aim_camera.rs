//! Aim Camera Module
//!
//! First-person camera used in build mode. The crosshair sits at the screen
//! center, so the placement ray is simply the camera's forward direction.
//!
//! - Direct mouse input → rotation, no smoothing
//! - Pitch clamped to ±89 degrees
//! - yaw=0, pitch=0 looks toward -Z

use glam::Vec3;

use super::raycast::AimRay;

/// Pitch limit: ±89 degrees in radians
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// First-person aim camera.
///
/// ```rust,ignore
/// let mut camera = AimCamera::with_position(Vec3::new(0.0, 1.7, 6.0));
/// camera.apply_mouse_delta(mouse_dx, mouse_dy);
/// let ray = camera.aim_ray();
/// ```
#[derive(Clone, Debug)]
pub struct AimCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Horizontal angle (radians), unrestricted
    pub yaw: f32,
    /// Vertical angle (radians), clamped to ±89°
    pub pitch: f32,
    /// Mouse sensitivity in radians per pixel
    pub sensitivity: f32,
}

impl Default for AimCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.002,
        }
    }
}

impl AimCamera {
    pub fn with_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Positive dx looks right, positive dy looks down.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Point the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        let distance = to_target.length();

        if distance > 0.001 {
            self.yaw = to_target.x.atan2(-to_target.z);
            self.pitch = (to_target.y / distance).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    /// Crosshair ray used for placement and removal.
    pub fn aim_ray(&self) -> AimRay {
        AimRay::new(self.position, self.forward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_at_rest_is_neg_z() {
        let camera = AimCamera::default();
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = AimCamera::default();
        camera.apply_mouse_delta(0.0, -1_000_000.0);
        assert!(camera.pitch <= PITCH_LIMIT + 1e-6);
        camera.apply_mouse_delta(0.0, 1_000_000.0);
        assert!(camera.pitch >= -PITCH_LIMIT - 1e-6);
    }

    #[test]
    fn test_look_at_aims_ray_at_target() {
        let mut camera = AimCamera::with_position(Vec3::new(0.0, 2.0, 5.0));
        let target = Vec3::new(1.0, 0.0, 0.0);
        camera.look_at(target);

        let ray = camera.aim_ray();
        let expected = (target - camera.position).normalize();
        assert!((ray.direction - expected).length() < 1e-4, "dir={:?}", ray.direction);
        assert_eq!(ray.origin, camera.position);
    }
}
