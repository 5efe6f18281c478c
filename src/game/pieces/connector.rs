//! Connectors
//!
//! A connector is an oriented attachment point in a piece's local space.
//! Its "up" is the local rotation applied to +Y; when a piece snaps onto a
//! connector, that up direction becomes the placement normal.

use glam::{Quat, Vec3};

use crate::physics::Transform;

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Part name the connector was collected from
    pub name: String,
    /// Offset and orientation relative to the piece origin
    pub local: Transform,
}

impl Connector {
    pub fn new(name: impl Into<String>, local: Transform) -> Self {
        Self {
            name: name.into(),
            local,
        }
    }

    /// Connector at `offset` whose up matches the piece's up.
    pub fn at(name: impl Into<String>, offset: Vec3) -> Self {
        Self::new(name, Transform::from_translation(offset))
    }

    /// Connector at `offset` whose up points along `up` (piece-local).
    pub fn facing(name: impl Into<String>, offset: Vec3, up: Vec3) -> Self {
        let up = up.try_normalize().unwrap_or(Vec3::Y);
        Self::new(name, Transform::new(offset, Quat::from_rotation_arc(Vec3::Y, up)))
    }

    /// Local offset from the piece origin.
    #[inline]
    pub fn offset(&self) -> Vec3 {
        self.local.translation
    }

    /// World position when the owning piece sits at `piece`.
    #[inline]
    pub fn world_position(&self, piece: &Transform) -> Vec3 {
        piece.transform_point(self.local.translation)
    }

    /// World up when the owning piece sits at `piece`.
    #[inline]
    pub fn world_up(&self, piece: &Transform) -> Vec3 {
        (piece.rotation * self.local.rotation * Vec3::Y).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_position_applies_piece_rotation() {
        let connector = Connector::at("east", Vec3::new(2.0, 0.0, 0.0));
        let piece = Transform::new(
            Vec3::new(10.0, 0.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        // +X rotated 90° about Y lands on -Z
        let world = connector.world_position(&piece);
        assert!((world - Vec3::new(10.0, 0.0, -2.0)).length() < 1e-5, "world={:?}", world);
    }

    #[test]
    fn facing_connector_reports_its_up() {
        let connector = Connector::facing("side", Vec3::ZERO, Vec3::X);
        let up = connector.world_up(&Transform::IDENTITY);
        assert!((up - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn zero_up_falls_back_to_piece_up() {
        let connector = Connector::facing("bad", Vec3::ZERO, Vec3::ZERO);
        assert!((connector.world_up(&Transform::IDENTITY) - Vec3::Y).length() < 1e-6);
    }
}
