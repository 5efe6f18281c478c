//! Snapforge Engine Library
//!
//! A grid-free building core: aim at the world, preview a structural piece,
//! and let it land either freely on a surface or snapped onto a connector of
//! an already placed piece.
//!
//! # Modules
//!
//! - [`physics`] - Rigid transforms, ray/box tests, overlap checks
//! - [`camera`] - Aim camera and screen/crosshair rays
//! - [`game`] - Pieces, catalog, placement resolution and build mode
//!
//! # Example
//!
//! ```ignore
//! use snapforge_engine::camera::AimCamera;
//! use snapforge_engine::game::builder::{BuilderMode, StaticScene};
//! use snapforge_engine::game::config::BuildConfig;
//! use snapforge_engine::game::input::BuildAction;
//! use snapforge_engine::game::pieces::default_catalog;
//!
//! let scene = StaticScene::with_ground(0.0);
//! let camera = AimCamera::with_position(Vec3::new(0.0, 6.0, 8.0));
//! let mut builder = BuilderMode::new(default_catalog(), BuildConfig::default());
//! builder.enter();
//! builder.select_piece_by_key("foundation")?;
//!
//! // Every frame: input first, then one resolution pass
//! let ray = camera.aim_ray();
//! builder.handle_action(BuildAction::RotateRight, &ray, &scene);
//! builder.update(&ray, &scene);
//!
//! for event in builder.drain_events() {
//!     // hand placed/removed pieces to the renderer
//! }
//! ```

pub mod camera;
pub mod physics;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use camera::{AimCamera, AimRay};
pub use physics::{Transform, Vec3};
