//! Selection, creation, deletion and per-token property commands.

use std::path::PathBuf;

use super::{CommandError, CommandResult, Edit};
use crate::core::{Cyclic, EntityId, EntityKind, Encounter, SceneEntity, SceneState};

/// Look up a token the command acts on.
fn find(scene: &SceneState, id: EntityId) -> CommandResult<&SceneEntity> {
    scene.entities.get(id).ok_or(CommandError::EntityNotFound(id))
}

impl Encounter {
    /// Bring a token to the front and select it.
    pub fn select_entity(&mut self, id: EntityId) -> bool {
        self.run("select_entity", |scene| {
            let index = scene
                .entities
                .index_of(id)
                .ok_or(CommandError::EntityNotFound(id))?;
            if scene.entities.is_selected(id) {
                return Err(CommandError::AlreadySelected(id));
            }
            let reverse = Edit::Unselect {
                entity: id,
                index,
                previous: scene.entities.selected(),
            };
            Ok((Edit::Select { entity: id }, reverse))
        })
    }

    pub fn deselect_entity(&mut self) -> bool {
        self.run("deselect_entity", |scene| {
            let previous = scene.entities.selected().ok_or(CommandError::NothingSelected)?;
            Ok((Edit::SetSelected(None), Edit::SetSelected(Some(previous))))
        })
    }

    /// Place a new creature at the top-left cell and select it.
    pub fn create_creature(&mut self, image: impl Into<PathBuf>) -> bool {
        let entity = SceneEntity::creature(self.allocate_id(), image);
        self.create("create_creature", entity)
    }

    /// Place a new item at the top-left cell and select it.
    pub fn create_item(&mut self, image: impl Into<PathBuf>) -> bool {
        let entity = SceneEntity::item(self.allocate_id(), image);
        self.create("create_item", entity)
    }

    fn create(&mut self, label: &'static str, entity: SceneEntity) -> bool {
        self.run(label, |scene| {
            let reverse = Edit::Withdraw {
                entity: entity.id,
                selected: scene.entities.selected(),
            };
            let forward = Edit::InsertFront {
                entity: Box::new(entity),
                select: true,
            };
            Ok((forward, reverse))
        })
    }

    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        self.run("destroy_entity", |scene| {
            let entity = find(scene, id)?;
            let index = scene
                .entities
                .index_of(id)
                .ok_or(CommandError::EntityNotFound(id))?;
            let reverse = Edit::Reinsert {
                entity: Box::new(entity.clone()),
                index,
                selected: scene.entities.is_selected(id),
            };
            Ok((Edit::Remove { entity: id }, reverse))
        })
    }

    /// Turn a creature into an item or an item into a creature.
    ///
    /// The token keeps its handle, slot and selection.
    pub fn change_entity_type(&mut self, id: EntityId) -> bool {
        self.run("change_entity_type", |scene| {
            let entity = find(scene, id)?;
            Ok((
                Edit::Replace(Box::new(entity.converted())),
                Edit::Replace(Box::new(entity.clone())),
            ))
        })
    }

    pub fn change_creature_team(&mut self, id: EntityId) -> bool {
        self.run("change_creature_team", |scene| {
            let team = find(scene, id)?.team().ok_or(CommandError::NotACreature(id))?;
            Ok((
                Edit::SetTeam {
                    entity: id,
                    team: team.next(),
                },
                Edit::SetTeam { entity: id, team },
            ))
        })
    }

    pub fn change_creature_status(&mut self, id: EntityId) -> bool {
        self.run("change_creature_status", |scene| {
            let status = find(scene, id)?
                .status()
                .ok_or(CommandError::NotACreature(id))?;
            Ok((
                Edit::SetStatus {
                    entity: id,
                    status: status.next(),
                },
                Edit::SetStatus { entity: id, status },
            ))
        })
    }

    /// Toggle between the original image outline and a circular crop.
    pub fn change_entity_shape(&mut self, id: EntityId) -> bool {
        self.run("change_entity_shape", |scene| {
            let entity = find(scene, id)?;
            Ok((
                Edit::SetShape {
                    entity: id,
                    shape: entity.next_shape(),
                },
                Edit::SetShape {
                    entity: id,
                    shape: entity.shape,
                },
            ))
        })
    }

    pub fn grow_entity(&mut self, id: EntityId) -> bool {
        self.run("grow_entity", |scene| {
            let size = find(scene, id)?.size;
            Ok((
                Edit::SetSize {
                    entity: id,
                    size: size.grown(),
                },
                Edit::SetSize { entity: id, size },
            ))
        })
    }

    pub fn shrink_entity(&mut self, id: EntityId) -> bool {
        self.run("shrink_entity", |scene| {
            let size = find(scene, id)?.size;
            Ok((
                Edit::SetSize {
                    entity: id,
                    size: size.shrunk(),
                },
                Edit::SetSize { entity: id, size },
            ))
        })
    }

    /// Whether the token is a creature, for callers deciding which
    /// commands apply.
    pub fn is_creature(&self, id: EntityId) -> bool {
        matches!(
            self.entity(id).map(|e| e.kind),
            Some(EntityKind::Creature { .. })
        )
    }
}
