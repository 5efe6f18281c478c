//! Snap Stability Filter
//!
//! Hysteresis on candidate discovery. Small hit-point jitter must not reshuffle
//! the candidate list under the player's cursor (and with it the selection
//! they cycled to), so the held list survives until the hit point moves away
//! from the first held connector.

use glam::Vec3;

use super::discovery::discover_candidates;
use super::registry::PieceRegistry;
use super::state::ResolutionState;
use crate::game::config::SnapConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityOutcome {
    /// Previous candidates and selection kept
    Held,
    /// Candidates queried again, selection reset to 0
    Recomputed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapStabilityFilter {
    pub threshold: f32,
    pub radius: f32,
    pub max_candidates: usize,
}

impl From<&SnapConfig> for SnapStabilityFilter {
    fn from(config: &SnapConfig) -> Self {
        Self {
            threshold: config.stability_threshold,
            radius: config.radius,
            max_candidates: config.max_candidates,
        }
    }
}

impl Default for SnapStabilityFilter {
    fn default() -> Self {
        Self::from(&SnapConfig::default())
    }
}

impl SnapStabilityFilter {
    /// Keep or recompute the candidates in `state` for the new hit point.
    pub fn refresh(&self, state: &mut ResolutionState, point: Vec3, registry: &PieceRegistry) -> StabilityOutcome {
        if self.should_hold(state, point, registry) {
            tracing::trace!("[Snap] Holding {} candidates", state.candidates().len());
            return StabilityOutcome::Held;
        }

        let candidates = discover_candidates(point, registry, self.radius, self.max_candidates);
        tracing::trace!("[Snap] Recomputed {} candidates", candidates.len());
        state.replace_candidates(candidates);
        StabilityOutcome::Recomputed
    }

    fn should_hold(&self, state: &ResolutionState, point: Vec3, registry: &PieceRegistry) -> bool {
        let Some(first) = state.candidates().first() else {
            return false;
        };
        // A removed owner means the held list is stale no matter how close we are
        registry.contains(first.piece) && point.distance(first.position) < self.threshold
    }
}
