//! Ordered token storage with single selection.
//!
//! Order is z-order: index 0 is the front-most token. The selection is a
//! handle, never an index, and always names a token currently stored.
//!
//! Every method here is a raw state transition. Preconditions are checked by
//! the command layer before anything reaches the registry.

use super::entity::SceneEntity;
use super::EntityId;

#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<SceneEntity>,
    selected: Option<EntityId>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a handle no stored token uses.
    pub fn allocate_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Tokens front to back.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SceneEntity> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[SceneEntity] {
        &self.entities
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn selected_entity(&self) -> Option<&SceneEntity> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected == Some(id)
    }

    /// Select a stored token, or clear the selection.
    ///
    /// Handles that are not stored clear the selection instead.
    pub fn set_selected(&mut self, id: Option<EntityId>) {
        self.selected = id.filter(|&id| self.contains(id));
    }

    pub fn insert_front(&mut self, entity: SceneEntity) {
        self.reinsert_at(entity, 0);
    }

    /// Insert at `index`, clamped to the current length.
    pub fn reinsert_at(&mut self, entity: SceneEntity, index: usize) {
        self.bump_next_id(entity.id);
        let index = index.min(self.entities.len());
        self.entities.insert(index, entity);
    }

    /// Append at the back of the z-order.
    pub fn push_back(&mut self, entity: SceneEntity) {
        self.bump_next_id(entity.id);
        self.entities.push(entity);
    }

    /// Remove a token, dropping it from the selection if needed.
    pub fn remove(&mut self, id: EntityId) -> Option<(usize, SceneEntity)> {
        let index = self.index_of(id)?;
        let entity = self.entities.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some((index, entity))
    }

    /// Move a stored token to `index` in the z-order.
    pub fn move_to(&mut self, id: EntityId, index: usize) -> bool {
        match self.index_of(id) {
            Some(current) => {
                let entity = self.entities.remove(current);
                let index = index.min(self.entities.len());
                self.entities.insert(index, entity);
                current != index
            }
            None => false,
        }
    }

    /// Swap a token for another with the same handle, in the same slot.
    pub fn replace(&mut self, entity: SceneEntity) -> Option<SceneEntity> {
        let index = self.index_of(entity.id)?;
        Some(std::mem::replace(&mut self.entities[index], entity))
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.selected = None;
    }

    fn bump_next_id(&mut self, id: EntityId) {
        self.next_id = self.next_id.max(id.0);
    }
}
