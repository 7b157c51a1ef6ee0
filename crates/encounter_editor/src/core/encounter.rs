//! The encounter being edited: scene state plus its undo history.
//!
//! All modifications go through the named command methods (see
//! `crate::commands`), which record a [`Memento`] for every change. Each
//! command returns whether observable state changed, so callers can decide
//! whether to redraw.

use super::{Background, EntityId, History, Memento, SceneEntity, SceneState};
use crate::commands::{CommandError, CommandResult, Edit};

pub struct Encounter {
    scene: SceneState,
    history: History<Edit>,
}

impl Encounter {
    pub fn new(background: Background, min_units: u32) -> Self {
        Self::from_scene(SceneState::new(background, min_units))
    }

    /// Start editing an already assembled scene with an empty history.
    pub fn from_scene(scene: SceneState) -> Self {
        Self {
            scene,
            history: History::new(),
        }
    }

    /// Bound the number of undoable steps kept.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history = match limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };
        self
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn history(&self) -> &History<Edit> {
        &self.history
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn entity(&self, id: EntityId) -> Option<&SceneEntity> {
        self.scene.entities.get(id)
    }

    /// Tokens front to back.
    pub fn entities(&self) -> &[SceneEntity] {
        self.scene.entities.as_slice()
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.scene.entities.selected()
    }

    /// Front-most token under a pixel point.
    pub fn entity_at(&self, px: f64, py: f64) -> Option<EntityId> {
        self.scene.entity_at(px, py)
    }

    pub fn is_hovering(&self, id: EntityId, px: f64, py: f64) -> bool {
        self.entity(id)
            .map(|e| e.contains(px, py, self.scene.cell_size()))
            .unwrap_or(false)
    }

    pub fn min_units(&self) -> u32 {
        self.scene.min_units()
    }

    pub fn cell_size(&self) -> f64 {
        self.scene.cell_size()
    }

    pub fn window_size(&self) -> [u32; 2] {
        self.scene.window_size()
    }

    pub fn undoable_count(&self) -> usize {
        self.history.undoable_count()
    }

    pub fn redoable_count(&self) -> usize {
        self.history.redoable_count()
    }

    /// Whether anything changed since the encounter was loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.history.is_dirty()
    }

    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Revert the last command.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.scene) {
            Ok(applied) => {
                log::info!("Undo: {}", applied.memento.label);
                applied.changed
            }
            Err(err) => {
                CommandError::from(err).report("undo");
                false
            }
        }
    }

    /// Re-apply the last undone command.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.scene) {
            Ok(applied) => {
                log::info!("Redo: {}", applied.memento.label);
                applied.changed
            }
            Err(err) => {
                CommandError::from(err).report("redo");
                false
            }
        }
    }

    /// Build a command's edits from the current scene and submit them.
    ///
    /// A failed build is reported and leaves both scene and history as
    /// they were.
    pub(crate) fn run<F>(&mut self, label: &'static str, build: F) -> bool
    where
        F: FnOnce(&SceneState) -> CommandResult<(Edit, Edit)>,
    {
        match build(&self.scene) {
            Ok((forward, reverse)) => {
                let applied = self
                    .history
                    .submit(&mut self.scene, Memento::new(label, forward, reverse));
                log::info!("{}", label);
                applied.changed
            }
            Err(err) => {
                err.report(label);
                false
            }
        }
    }

    /// Handle for a token about to be created.
    pub(crate) fn allocate_id(&mut self) -> EntityId {
        self.scene.entities.allocate_id()
    }
}
