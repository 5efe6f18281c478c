//! Builder Module
//!
//! Grid-free placement: candidate discovery, the snap stability filter, the
//! placement resolver and the build-mode session that drives them.

pub mod discovery;
pub mod error;
pub mod events;
pub mod mode;
pub mod registry;
pub mod resolver;
pub mod stability;
pub mod state;
pub mod world;

pub use discovery::{Candidate, discover_candidates};
pub use error::{BuildError, FactoryError};
pub use events::BuildEvent;
pub use mode::{ActionOutcome, BuilderMode};
pub use registry::PieceRegistry;
pub use resolver::{PlacementResolver, Resolution, SnapMatch, orientation_from_up, resolve_transform};
pub use stability::{SnapStabilityFilter, StabilityOutcome};
pub use state::{ResolutionState, RotateDirection, RotateOutcome, SurfaceHit, normalize_degrees};
pub use world::{HitTarget, QueryMask, RayHit, SceneQuery, StaticScene, WorldQuery};
