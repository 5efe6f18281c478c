//! Resolution State
//!
//! Everything the resolver reads between frames: the last surface hit, the
//! held snap candidates, the selected candidate and the yaw. Rotation and
//! candidate cycling are plain mutations here and take effect on the next
//! resolution pass.

use glam::Vec3;

use super::discovery::Candidate;
use super::resolver::Resolution;

/// Surface point and normal under the aim ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub position: Vec3,
    pub normal: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    /// Counter-clockwise seen from above; retreats when cycling
    Left,
    /// Clockwise seen from above; advances when cycling
    Right,
}

impl RotateDirection {
    fn sign(self) -> f32 {
        match self {
            RotateDirection::Left => -1.0,
            RotateDirection::Right => 1.0,
        }
    }
}

/// What a rotate input ended up doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotateOutcome {
    /// Yaw changed to the contained value (degrees)
    Rotated(f32),
    /// Selected candidate changed to the contained index
    Cycled(usize),
}

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[derive(Debug, Clone, Default)]
pub struct ResolutionState {
    hit: Option<SurfaceHit>,
    candidates: Vec<Candidate>,
    selected: usize,
    yaw_degrees: f32,
    last: Option<Resolution>,
}

impl ResolutionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to a fresh state: no hit, no candidates, zero yaw.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn hit(&self) -> Option<&SurfaceHit> {
        self.hit.as_ref()
    }

    pub fn set_hit(&mut self, position: Vec3, normal: Vec3) {
        self.hit = Some(SurfaceHit { position, normal });
    }

    /// The aim ray found nothing. Nothing is shown, so neither the previous
    /// resolution nor the held candidates apply any more.
    pub fn clear_hit(&mut self) {
        self.hit = None;
        self.last = None;
        self.candidates.clear();
        self.selected = 0;
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Replace the candidate list with a fresh query result; selection goes back to 0.
    pub fn replace_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.selected = 0;
    }

    /// The committed world changed under the held state. Candidates are
    /// recomputed and nothing can be committed until the next resolution pass.
    pub fn invalidate(&mut self) {
        self.candidates.clear();
        self.selected = 0;
        self.last = None;
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.candidates.get(self.selected)
    }

    pub fn is_multi_snap(&self) -> bool {
        self.candidates.len() > 1
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn set_yaw_degrees(&mut self, degrees: f32) {
        self.yaw_degrees = normalize_degrees(degrees);
    }

    /// Add `step` degrees (may be negative) to the yaw.
    pub fn rotate_by(&mut self, step: f32) -> f32 {
        self.set_yaw_degrees(self.yaw_degrees + step);
        self.yaw_degrees
    }

    /// Advance (or retreat) the selected candidate with wraparound.
    ///
    /// Returns `false` without touching anything when there is nothing to
    /// cycle between.
    pub fn cycle(&mut self, forward: bool) -> bool {
        let len = self.candidates.len();
        if len <= 1 {
            return false;
        }
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
        true
    }

    /// The overloaded rotate input: cycles when several candidates are held,
    /// otherwise steps the yaw.
    pub fn rotate_or_cycle(&mut self, direction: RotateDirection, step_degrees: f32) -> RotateOutcome {
        if self.is_multi_snap() {
            self.cycle(direction == RotateDirection::Right);
            RotateOutcome::Cycled(self.selected)
        } else {
            RotateOutcome::Rotated(self.rotate_by(direction.sign() * step_degrees))
        }
    }

    pub fn last(&self) -> Option<&Resolution> {
        self.last.as_ref()
    }

    pub fn record(&mut self, resolution: Option<Resolution>) {
        self.last = resolution;
    }

    /// Whether the last resolution exists and is valid.
    pub fn is_valid(&self) -> bool {
        self.last.as_ref().is_some_and(|r| r.valid)
    }
}
