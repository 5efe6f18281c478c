//! Input Actions
//!
//! Discrete build-mode inputs. Which physical key or button produces them is
//! up to the host application.

use serde::{Deserialize, Serialize};

use crate::game::builder::RotateDirection;

/// High-level build action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildAction {
    /// Step yaw down, or retreat through several snap candidates
    RotateLeft,
    /// Step yaw up, or advance through several snap candidates
    RotateRight,
    /// Commit the preview if its placement is valid
    Place,
    /// Remove the committed piece under the aim ray
    Remove,
    /// Drop the preview and leave build mode
    Cancel,
}

impl BuildAction {
    /// The rotate direction, for the two overloaded rotate inputs.
    pub fn rotation(self) -> Option<RotateDirection> {
        match self {
            BuildAction::RotateLeft => Some(RotateDirection::Left),
            BuildAction::RotateRight => Some(RotateDirection::Right),
            _ => None,
        }
    }
}
