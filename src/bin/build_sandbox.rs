//! Build Sandbox - Headless Build Mode Session
//!
//! Runs a scripted building session against a flat ground scene and logs what
//! the placement core does at each step: free placement, edge snapping,
//! candidate cycling, rotation, refused placements and removal.
//!
//! Run with: `cargo run --bin build_sandbox [config.json]`
//!
//! Set `RUST_LOG=debug` (or `trace`) to see rotation and snap details.

use std::path::Path;
use std::process::ExitCode;

use snapforge_engine::camera::{AimCamera, AimRay};
use snapforge_engine::game::builder::{ActionOutcome, BuildEvent, BuilderMode, StaticScene};
use snapforge_engine::game::config::BuildConfig;
use snapforge_engine::game::input::BuildAction;
use snapforge_engine::game::pieces::default_catalog;
use snapforge_engine::physics::Aabb;
use snapforge_engine::Vec3;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One scripted beat: optionally switch piece, aim somewhere, press things.
struct Step {
    label: &'static str,
    select: Option<&'static str>,
    aim_at: Vec3,
    actions: &'static [BuildAction],
}

const SCRIPT: &[Step] = &[
    Step {
        label: "foundation on open ground",
        select: Some("foundation"),
        aim_at: Vec3::new(0.0, 0.0, 0.0),
        actions: &[BuildAction::Place],
    },
    Step {
        label: "second foundation snapped to the east edge",
        select: None,
        aim_at: Vec3::new(2.5, 0.0, 0.0),
        actions: &[BuildAction::Place],
    },
    Step {
        label: "wall in open field is refused",
        select: Some("wall"),
        aim_at: Vec3::new(-8.0, 0.0, -8.0),
        actions: &[BuildAction::Place],
    },
    Step {
        label: "wall on the foundation edge, cycling candidates",
        select: None,
        aim_at: Vec3::new(0.1, 1.0, -1.9),
        actions: &[BuildAction::RotateRight, BuildAction::RotateLeft, BuildAction::Place],
    },
    Step {
        label: "pillar turned 90 degrees",
        select: Some("pillar"),
        aim_at: Vec3::new(-6.0, 0.0, 2.0),
        actions: &[BuildAction::RotateRight, BuildAction::RotateRight, BuildAction::Place],
    },
    Step {
        label: "remove the pillar",
        select: None,
        aim_at: Vec3::new(-6.0, 1.5, 2.0),
        actions: &[BuildAction::Remove],
    },
    Step {
        label: "remove against the rock does nothing",
        select: None,
        aim_at: Vec3::new(8.0, 1.0, 6.0),
        actions: &[BuildAction::Remove],
    },
];

fn load_config() -> Result<BuildConfig, String> {
    match std::env::args().nth(1) {
        Some(path) => BuildConfig::load(Path::new(&path)).map_err(|e| format!("{path}: {e}")),
        None => Ok(BuildConfig::default()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("[Sandbox] Failed to load config: {}", err);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "[Sandbox] Snap radius {:.2}m, {} candidates max, stability {:.2}m, step {:.0}°",
        config.snap.radius,
        config.snap.max_candidates,
        config.snap.stability_threshold,
        config.interaction.rotation_step_degrees
    );

    let mut scene = StaticScene::with_ground(0.0);
    scene.add_prop(Aabb::new(Vec3::new(7.0, 0.0, 5.0), Vec3::new(9.0, 2.0, 7.0)));

    let mut camera = AimCamera::with_position(Vec3::new(0.0, 6.0, 10.0));
    let mut builder = BuilderMode::new(default_catalog(), config);
    builder.enter();

    for (index, step) in SCRIPT.iter().enumerate() {
        tracing::info!("[Sandbox] Step {}: {}", index + 1, step.label);

        if let Some(key) = step.select {
            if let Err(err) = builder.select_piece_by_key(key) {
                tracing::error!("[Sandbox] {}", err);
                continue;
            }
        }

        camera.look_at(step.aim_at);
        let ray: AimRay = camera.aim_ray();

        // Settle the preview before acting, the way a player hovers first
        builder.update(&ray, &scene);
        for &action in step.actions {
            let outcome = builder.handle_action(action, &ray, &scene);
            if action != BuildAction::Place && action != BuildAction::Remove {
                builder.update(&ray, &scene);
            }
            report(action, outcome);
        }

        for event in builder.drain_events() {
            match event {
                BuildEvent::Placed { id, type_id, transform } => tracing::info!(
                    "[Sandbox]   placed {} ({}) up=({:.2}, {:.2}, {:.2})",
                    id,
                    type_id,
                    transform.up().x,
                    transform.up().y,
                    transform.up().z
                ),
                BuildEvent::Removed { id, type_id } => {
                    tracing::info!("[Sandbox]   removed {} ({})", id, type_id)
                }
            }
        }
    }

    tracing::info!("[Sandbox] Finished with {} pieces placed", builder.registry().len());
    ExitCode::SUCCESS
}

fn report(action: BuildAction, outcome: ActionOutcome) {
    match outcome {
        ActionOutcome::Refused => tracing::warn!("[Sandbox]   {:?}: placement invalid", action),
        ActionOutcome::Missed => tracing::info!("[Sandbox]   {:?}: nothing to remove", action),
        other => tracing::debug!("[Sandbox]   {:?}: {:?}", action, other),
    }
}
