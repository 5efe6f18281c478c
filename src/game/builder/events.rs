//! Build Events
//!
//! Queued by commit and retract for whoever mirrors the registry (renderer,
//! audio, networking). Drained once per frame.

use crate::game::pieces::{PieceId, PieceTypeId};
use crate::physics::Transform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildEvent {
    /// A preview was committed into the registry
    Placed {
        id: PieceId,
        type_id: PieceTypeId,
        transform: Transform,
    },
    /// A committed piece was removed and destroyed
    Removed { id: PieceId, type_id: PieceTypeId },
}

impl BuildEvent {
    pub fn piece(&self) -> PieceId {
        match self {
            BuildEvent::Placed { id, .. } | BuildEvent::Removed { id, .. } => *id,
        }
    }
}
