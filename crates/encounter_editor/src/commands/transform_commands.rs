//! Position commands.

use super::{CommandError, Edit};
use crate::core::{EntityId, Encounter};

impl Encounter {
    /// Drop a token on the cell under a pixel point.
    pub fn move_entity(&mut self, id: EntityId, px: f64, py: f64) -> bool {
        self.run("move_entity", |scene| {
            let entity = scene.entities.get(id).ok_or(CommandError::EntityNotFound(id))?;
            let (x, y) = scene.drop_cell(entity, px, py);
            Ok((
                Edit::SetPosition { entity: id, x, y },
                Edit::SetPosition {
                    entity: id,
                    x: entity.x,
                    y: entity.y,
                },
            ))
        })
    }

    pub fn move_entity_left(&mut self, id: EntityId) -> bool {
        self.step("move_entity_left", id, -1, 0)
    }

    pub fn move_entity_right(&mut self, id: EntityId) -> bool {
        self.step("move_entity_right", id, 1, 0)
    }

    pub fn move_entity_up(&mut self, id: EntityId) -> bool {
        self.step("move_entity_up", id, 0, -1)
    }

    pub fn move_entity_down(&mut self, id: EntityId) -> bool {
        self.step("move_entity_down", id, 0, 1)
    }

    fn step(&mut self, label: &'static str, id: EntityId, dx: i32, dy: i32) -> bool {
        self.run(label, |scene| {
            let entity = scene.entities.get(id).ok_or(CommandError::EntityNotFound(id))?;
            let (x, y) = entity
                .x
                .checked_add(dx)
                .zip(entity.y.checked_add(dy))
                .ok_or(CommandError::PositionLimit(id))?;
            Ok((
                Edit::SetPosition { entity: id, x, y },
                Edit::SetPosition {
                    entity: id,
                    x: entity.x,
                    y: entity.y,
                },
            ))
        })
    }

    /// Pull a token back inside the visible grid.
    ///
    /// Recorded even when the token is already home.
    pub fn bring_home(&mut self, id: EntityId) -> bool {
        self.run("bring_home", |scene| {
            let entity = scene.entities.get(id).ok_or(CommandError::EntityNotFound(id))?;
            let (x, y) = scene.home_position(entity);
            Ok((
                Edit::SetPosition { entity: id, x, y },
                Edit::SetPosition {
                    entity: id,
                    x: entity.x,
                    y: entity.y,
                },
            ))
        })
    }

    /// Pull every token back inside the visible grid as one step.
    pub fn bring_all_home(&mut self) -> bool {
        self.run("bring_all_home", |scene| {
            let (home, previous): (Vec<_>, Vec<_>) = scene
                .entities
                .iter()
                .map(|e| {
                    let (x, y) = scene.home_position(e);
                    ((e.id, x, y), (e.id, e.x, e.y))
                })
                .unzip();
            Ok((Edit::SetPositions(home), Edit::SetPositions(previous)))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Background, EntityId, Encounter, SceneEntity, SceneState};

    /// 800x600 window, 100px cells, 8x6 grid, one token selected.
    fn encounter() -> (Encounter, EntityId) {
        let mut enc = Encounter::new(Background::new("map.png", [800, 600]), 6);
        enc.create_creature("goblin.png");
        let id = enc.selected().unwrap();
        (enc, id)
    }

    fn position(enc: &Encounter, id: EntityId) -> (i32, i32) {
        enc.entity(id).unwrap().position()
    }

    #[test]
    fn test_arrow_steps() {
        let (mut enc, id) = encounter();
        enc.move_entity_right(id);
        enc.move_entity_right(id);
        enc.move_entity_down(id);
        enc.move_entity_left(id);
        enc.move_entity_up(id);
        enc.move_entity_up(id);
        assert_eq!(position(&enc, id), (1, -1));
        enc.undo();
        enc.undo();
        assert_eq!(position(&enc, id), (1, 1));
    }

    #[test]
    fn test_move_missing_entity_is_noop() {
        let (mut enc, _) = encounter();
        let before = enc.undoable_count();
        assert!(!enc.move_entity_right(EntityId(42)));
        assert!(!enc.move_entity(EntityId(42), 10.0, 10.0));
        assert_eq!(enc.undoable_count(), before);
    }

    #[test]
    fn test_step_past_integer_bounds_is_noop() {
        let mut scene = SceneState::new(Background::new("map.png", [800, 600]), 6);
        let id = scene.entities.allocate_id();
        scene
            .entities
            .push_back(SceneEntity::creature(id, "goblin.png").with_position(i32::MAX, i32::MIN));
        let mut enc = Encounter::from_scene(scene);

        assert!(!enc.move_entity_right(id));
        assert!(!enc.move_entity_up(id));
        assert_eq!(enc.undoable_count(), 0);
        assert_eq!(position(&enc, id), (i32::MAX, i32::MIN));

        assert!(enc.move_entity_left(id));
        assert!(enc.move_entity_down(id));
        assert!(enc.undo());
        assert_eq!(position(&enc, id), (i32::MAX - 1, i32::MIN));
    }

    #[test]
    fn test_move_to_pixel() {
        let (mut enc, id) = encounter();
        assert!(enc.move_entity(id, 350.0, 220.0));
        assert_eq!(position(&enc, id), (3, 2));
        enc.undo();
        assert_eq!(position(&enc, id), (0, 0));
    }

    #[test]
    fn test_move_large_token_centres_on_pointer() {
        let (mut enc, id) = encounter();
        enc.grow_entity(id);
        enc.grow_entity(id);
        // size 3: pointer shifted back by one cell
        enc.move_entity(id, 350.0, 220.0);
        assert_eq!(position(&enc, id), (2, 1));
    }

    #[test]
    fn test_bring_home_is_idempotent() {
        let (mut enc, id) = encounter();
        for _ in 0..10 {
            enc.move_entity_right(id);
        }
        assert!(enc.bring_home(id));
        assert_eq!(position(&enc, id), (7, 0));

        let before = enc.undoable_count();
        assert!(!enc.bring_home(id));
        assert_eq!(position(&enc, id), (7, 0));
        assert_eq!(enc.undoable_count(), before + 1);
    }

    #[test]
    fn test_bring_all_home_is_one_step() {
        let (mut enc, a) = encounter();
        enc.create_item("chest.png");
        let b = enc.selected().unwrap();
        enc.move_entity_up(a);
        for _ in 0..9 {
            enc.move_entity_down(b);
        }
        assert!(enc.bring_all_home());
        assert_eq!(position(&enc, a), (0, 0));
        assert_eq!(position(&enc, b), (0, 5));

        assert!(enc.undo());
        assert_eq!(position(&enc, a), (0, -1));
        assert_eq!(position(&enc, b), (0, 9));
    }
}
