//! Input Module
//!
//! Build-mode action definitions.

pub mod actions;

pub use actions::BuildAction;
