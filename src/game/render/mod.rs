//! Game Render Module
//!
//! GPU-ready feedback data for the build preview. Drawing it is the host
//! renderer's job.

pub mod preview;

pub use preview::{INVALID_TINT, PreviewInstance, VALID_TINT};
