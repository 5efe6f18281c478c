//! Builder Mode
//!
//! Free-form building session: one preview piece follows the aim ray, snaps to
//! connectors of committed pieces and is committed or discarded on input.
//!
//! Per frame, the host calls [`BuilderMode::handle_action`] for each pending
//! input, then [`BuilderMode::update`] once. Interaction only mutates the
//! resolution state; the next update resolves it.

use super::error::BuildError;
use super::events::BuildEvent;
use super::registry::PieceRegistry;
use super::resolver::{PlacementResolver, Resolution};
use super::stability::SnapStabilityFilter;
use super::state::{ResolutionState, RotateOutcome};
use super::world::{QueryMask, SceneQuery, WorldQuery};
use crate::camera::AimRay;
use crate::game::config::BuildConfig;
use crate::game::input::BuildAction;
use crate::game::pieces::{Piece, PieceCatalog, PieceId, PieceTypeId};
use crate::game::render::PreviewInstance;

/// What a single [`BuildAction`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    /// Yaw is now the contained value (degrees)
    Rotated(f32),
    /// Selected snap candidate is now the contained index
    Cycled(usize),
    Placed(PieceId),
    /// Place was pressed but the current placement is invalid (or missing)
    Refused,
    Removed(PieceId),
    /// Remove was pressed but nothing removable is under the aim ray
    Missed,
    /// Build mode was left
    Exited,
    /// Build mode is inactive
    Ignored,
}

pub struct BuilderMode {
    catalog: PieceCatalog,
    registry: PieceRegistry,
    config: BuildConfig,
    filter: SnapStabilityFilter,
    active: bool,
    selected_type: Option<PieceTypeId>,
    preview: Option<Piece>,
    state: ResolutionState,
    events: Vec<BuildEvent>,
}

impl BuilderMode {
    pub fn new(catalog: PieceCatalog, config: BuildConfig) -> Self {
        let filter = SnapStabilityFilter::from(&config.snap);
        Self {
            catalog,
            registry: PieceRegistry::new(),
            config,
            filter,
            active: false,
            selected_type: None,
            preview: None,
            state: ResolutionState::new(),
            events: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &PieceRegistry {
        &self.registry
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn selected_type(&self) -> Option<PieceTypeId> {
        self.selected_type
    }

    pub fn preview(&self) -> Option<&Piece> {
        self.preview.as_ref()
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Last resolution, if the preview currently has somewhere to go.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.state.last()
    }

    /// Enter build mode, restoring the preview of the last selected type.
    pub fn enter(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        tracing::info!("[Builder] Build mode enabled");

        if let Some(type_id) = self.selected_type {
            if let Err(err) = self.spawn_preview(type_id) {
                tracing::warn!("[Builder] Could not restore preview: {}", err);
            }
        }
    }

    /// Leave build mode. The preview is dropped and resolution state reset
    /// before this returns; the selected type is remembered.
    pub fn exit(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.preview = None;
        self.state.reset();
        tracing::info!("[Builder] Build mode disabled");
    }

    pub fn toggle(&mut self) {
        if self.active {
            self.exit();
        } else {
            self.enter();
        }
    }

    /// Switch the moving piece to a new type.
    ///
    /// On error nothing changes: the previous selection and preview stay.
    pub fn select_piece(&mut self, type_id: PieceTypeId) -> Result<(), BuildError> {
        let piece = self.catalog.instantiate(type_id)?;
        self.selected_type = Some(type_id);
        self.state.reset();
        self.preview = self.active.then_some(piece);

        if let Ok(entry) = self.catalog.lookup(type_id) {
            tracing::info!("[Builder] Selected '{}' ({})", entry.meta.name, type_id);
        }
        Ok(())
    }

    pub fn select_piece_by_key(&mut self, key: &str) -> Result<PieceTypeId, BuildError> {
        let type_id = self.catalog.id_for(key)?;
        self.select_piece(type_id)?;
        Ok(type_id)
    }

    /// Clear the selection; the preview is dropped immediately.
    pub fn deselect(&mut self) {
        self.selected_type = None;
        self.preview = None;
        self.state.reset();
        tracing::debug!("[Builder] Selection cleared");
    }

    fn spawn_preview(&mut self, type_id: PieceTypeId) -> Result<(), BuildError> {
        self.preview = None;
        self.state.reset();
        self.preview = Some(self.catalog.instantiate(type_id)?);
        Ok(())
    }

    /// One resolution pass: cast, refresh candidates, resolve, update the preview.
    pub fn update(&mut self, ray: &AimRay, world: &dyn WorldQuery) -> Option<Resolution> {
        if !self.active {
            return None;
        }
        let preview = self.preview.as_mut()?;

        let scene = SceneQuery::new(world, &self.registry);
        let Some(hit) = scene.cast_ray(
            ray.origin,
            ray.direction,
            self.config.query.max_ray_distance,
            QueryMask::PLACEMENT,
        ) else {
            self.state.clear_hit();
            preview.set_visible(false);
            preview.set_placement_feedback(false);
            return None;
        };

        self.state.set_hit(hit.position, hit.normal);
        self.filter.refresh(&mut self.state, hit.position, &self.registry);

        let resolver = PlacementResolver::new(
            self.catalog.rule_for(preview.type_id()),
            &self.registry,
            self.config.query.overlap_tolerance,
        );
        let resolution = resolver.resolve(preview, &self.state);
        self.state.record(resolution);

        match resolution {
            Some(resolution) => {
                preview.set_transform(resolution.transform);
                preview.set_visible(true);
                preview.set_placement_feedback(resolution.valid);
            }
            None => {
                preview.set_visible(false);
                preview.set_placement_feedback(false);
            }
        }
        resolution
    }

    /// Apply one discrete input. Takes effect on the next [`update`](Self::update).
    pub fn handle_action(&mut self, action: BuildAction, ray: &AimRay, world: &dyn WorldQuery) -> ActionOutcome {
        if !self.active {
            return ActionOutcome::Ignored;
        }

        match action {
            BuildAction::RotateLeft | BuildAction::RotateRight => {
                let Some(direction) = action.rotation() else {
                    return ActionOutcome::Ignored;
                };
                let step = self.config.interaction.rotation_step_degrees;
                match self.state.rotate_or_cycle(direction, step) {
                    RotateOutcome::Rotated(yaw) => {
                        tracing::debug!("[Builder] Yaw {:.0}°", yaw);
                        ActionOutcome::Rotated(yaw)
                    }
                    RotateOutcome::Cycled(index) => {
                        tracing::debug!(
                            "[Builder] Snap candidate {}/{}",
                            index + 1,
                            self.state.candidates().len()
                        );
                        ActionOutcome::Cycled(index)
                    }
                }
            }
            BuildAction::Place => self.commit().map_or(ActionOutcome::Refused, ActionOutcome::Placed),
            BuildAction::Remove => self.retract(ray, world).map_or(ActionOutcome::Missed, ActionOutcome::Removed),
            BuildAction::Cancel => {
                self.exit();
                ActionOutcome::Exited
            }
        }
    }

    /// Commit the preview at its last resolved transform.
    ///
    /// Refused (returns `None`) unless the last resolution is valid. On success
    /// a fresh preview of the same type replaces the committed one, with fresh
    /// resolution state.
    pub fn commit(&mut self) -> Option<PieceId> {
        if !self.active {
            return None;
        }
        let Some(resolution) = self.state.last().copied().filter(|r| r.valid) else {
            tracing::debug!("[Builder] Placement refused");
            return None;
        };
        let mut piece = self.preview.take()?;

        piece.set_transform(resolution.transform);
        let type_id = piece.type_id();
        let id = self.registry.commit(piece);
        self.events.push(BuildEvent::Placed {
            id,
            type_id,
            transform: resolution.transform,
        });
        tracing::info!(
            "[Builder] Placed {} {} at ({:.2}, {:.2}, {:.2}){}",
            type_id,
            id,
            resolution.transform.translation.x,
            resolution.transform.translation.y,
            resolution.transform.translation.z,
            if resolution.snap.is_some() { " (snapped)" } else { "" }
        );

        if let Err(err) = self.spawn_preview(type_id) {
            tracing::warn!("[Builder] Could not create next preview: {}", err);
        }
        Some(id)
    }

    /// Remove the committed piece under the aim ray, if any.
    pub fn retract(&mut self, ray: &AimRay, world: &dyn WorldQuery) -> Option<PieceId> {
        if !self.active {
            return None;
        }

        let scene = SceneQuery::new(world, &self.registry);
        let id = scene
            .cast_ray(
                ray.origin,
                ray.direction,
                self.config.query.max_ray_distance,
                QueryMask::REMOVAL,
            )?
            .target
            .owning_piece()?;

        let piece = self.registry.remove(id)?;
        self.state.invalidate();
        self.events.push(BuildEvent::Removed {
            id,
            type_id: piece.type_id(),
        });
        tracing::info!("[Builder] Removed {} {}", piece.type_id(), id);
        Some(id)
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<BuildEvent> {
        std::mem::take(&mut self.events)
    }

    /// Instance data for drawing the preview, `None` when nothing is shown.
    pub fn preview_instance(&self) -> Option<PreviewInstance> {
        self.preview.as_ref().and_then(PreviewInstance::from_piece)
    }
}
