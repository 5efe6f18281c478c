//! Game Module
//!
//! Build-mode systems that sit on top of the engine's math, collision and
//! camera code.

pub mod builder;
pub mod config;
pub mod input;
pub mod pieces;
pub mod render;

pub use builder::{ActionOutcome, BuildError, BuildEvent, BuilderMode, PieceRegistry, StaticScene};
pub use config::BuildConfig;
pub use input::BuildAction;
pub use pieces::{PieceCatalog, PieceId, PieceTypeId, default_catalog};
pub use render::PreviewInstance;
