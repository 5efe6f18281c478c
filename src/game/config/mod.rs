//! Config Module
//!
//! Centralized configuration for build mode.

pub mod build_config;

pub use build_config::{
    BuildConfig, ConfigError, InteractionConfig, MAX_SNAP_CANDIDATES, QueryConfig, SnapConfig,
};
