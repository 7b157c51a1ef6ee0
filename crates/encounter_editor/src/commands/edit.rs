//! Primitive scene edits and the dispatcher that applies them.
//!
//! Each command pairs two of these values in a [`Memento`]. They carry
//! everything needed to apply them as literal arguments, captured from the
//! scene at the time the command ran, so applying a reverse edit never has to
//! recompute anything.
//!
//! [`Memento`]: crate::core::Memento

use std::path::PathBuf;

use crate::core::{
    Apply, CreatureStatus, CreatureTeam, EntityId, EntityKind, EntitySize, ImageShape, SceneEntity,
    SceneState,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    SetBackgroundImage {
        image: PathBuf,
        native_size: [u32; 2],
    },
    SetScale(f64),
    SetGrid(u32),
    /// Move to the front of the z-order and select.
    Select { entity: EntityId },
    /// Put a token back at `index` and restore the previous selection.
    Unselect {
        entity: EntityId,
        index: usize,
        previous: Option<EntityId>,
    },
    SetSelected(Option<EntityId>),
    InsertFront {
        entity: Box<SceneEntity>,
        select: bool,
    },
    /// Remove a token and restore the selection it replaced.
    Withdraw {
        entity: EntityId,
        selected: Option<EntityId>,
    },
    Remove { entity: EntityId },
    Reinsert {
        entity: Box<SceneEntity>,
        index: usize,
        selected: bool,
    },
    /// Swap in a token with the same handle.
    Replace(Box<SceneEntity>),
    SetPosition { entity: EntityId, x: i32, y: i32 },
    SetPositions(Vec<(EntityId, i32, i32)>),
    SetSize { entity: EntityId, size: EntitySize },
    SetShape { entity: EntityId, shape: ImageShape },
    SetTeam { entity: EntityId, team: CreatureTeam },
    SetStatus { entity: EntityId, status: CreatureStatus },
}

impl Edit {
    pub fn name(&self) -> &'static str {
        match self {
            Edit::SetBackgroundImage { .. } => "set_background_image",
            Edit::SetScale(_) => "set_scale",
            Edit::SetGrid(_) => "set_grid",
            Edit::Select { .. } => "select",
            Edit::Unselect { .. } => "unselect",
            Edit::SetSelected(_) => "set_selected",
            Edit::InsertFront { .. } => "insert_front",
            Edit::Withdraw { .. } => "withdraw",
            Edit::Remove { .. } => "remove",
            Edit::Reinsert { .. } => "reinsert",
            Edit::Replace(_) => "replace",
            Edit::SetPosition { .. } => "set_position",
            Edit::SetPositions(_) => "set_positions",
            Edit::SetSize { .. } => "set_size",
            Edit::SetShape { .. } => "set_shape",
            Edit::SetTeam { .. } => "set_team",
            Edit::SetStatus { .. } => "set_status",
        }
    }
}

impl Apply<Edit> for SceneState {
    fn apply(&mut self, edit: &Edit) -> bool {
        let changed = match edit {
            Edit::SetBackgroundImage { image, native_size } => {
                self.set_background_image(image.clone(), *native_size)
            }
            Edit::SetScale(scale) => self.set_background_scale(*scale),
            Edit::SetGrid(min_units) => self.set_grid(*min_units),
            Edit::Select { entity } => {
                let moved = self.entities.move_to(*entity, 0);
                let was_selected = self.entities.is_selected(*entity);
                self.entities.set_selected(Some(*entity));
                moved || (!was_selected && self.entities.is_selected(*entity))
            }
            Edit::Unselect {
                entity,
                index,
                previous,
            } => {
                let moved = self.entities.move_to(*entity, *index);
                let before = self.entities.selected();
                self.entities.set_selected(*previous);
                moved || before != self.entities.selected()
            }
            Edit::SetSelected(selected) => {
                let before = self.entities.selected();
                self.entities.set_selected(*selected);
                before != self.entities.selected()
            }
            Edit::InsertFront { entity, select } => {
                let id = entity.id;
                self.entities.insert_front(entity.as_ref().clone());
                if *select {
                    self.entities.set_selected(Some(id));
                }
                true
            }
            Edit::Withdraw { entity, selected } => {
                let removed = self.entities.remove(*entity).is_some();
                self.entities.set_selected(*selected);
                removed
            }
            Edit::Remove { entity } => self.entities.remove(*entity).is_some(),
            Edit::Reinsert {
                entity,
                index,
                selected,
            } => {
                let id = entity.id;
                self.entities.reinsert_at(entity.as_ref().clone(), *index);
                if *selected {
                    self.entities.set_selected(Some(id));
                }
                true
            }
            Edit::Replace(entity) => self
                .entities
                .replace(entity.as_ref().clone())
                .map(|old| old != **entity)
                .unwrap_or(false),
            Edit::SetPosition { entity, x, y } => self.set_position(*entity, *x, *y),
            Edit::SetPositions(positions) => positions
                .iter()
                .fold(false, |changed, &(id, x, y)| self.set_position(id, x, y) || changed),
            Edit::SetSize { entity, size } => match self.entities.get_mut(*entity) {
                Some(e) => std::mem::replace(&mut e.size, *size) != *size,
                None => false,
            },
            Edit::SetShape { entity, shape } => match self.entities.get_mut(*entity) {
                Some(e) => std::mem::replace(&mut e.shape, *shape) != *shape,
                None => false,
            },
            Edit::SetTeam { entity, team } => match self.entities.get_mut(*entity) {
                Some(SceneEntity {
                    kind: EntityKind::Creature { team: current, .. },
                    ..
                }) => std::mem::replace(current, *team) != *team,
                _ => false,
            },
            Edit::SetStatus { entity, status } => match self.entities.get_mut(*entity) {
                Some(SceneEntity {
                    kind: EntityKind::Creature { status: current, .. },
                    ..
                }) => std::mem::replace(current, *status) != *status,
                _ => false,
            },
        };
        log::trace!("Applied {} (changed: {})", edit.name(), changed);
        changed
    }
}

impl SceneState {
    fn set_position(&mut self, id: EntityId, x: i32, y: i32) -> bool {
        match self.entities.get_mut(id) {
            Some(entity) if entity.position() != (x, y) => {
                entity.x = x;
                entity.y = y;
                true
            }
            _ => false,
        }
    }
}
