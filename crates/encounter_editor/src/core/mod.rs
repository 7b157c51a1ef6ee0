//! Core editor types and state management.
//!
//! This module contains the central [`Encounter`] and the scene, registry
//! and history types it is built from.

pub mod encounter;
pub mod entity;
pub mod history;
mod preferences;
pub mod registry;
pub mod scene_state;
pub mod values;

pub use encounter::Encounter;
pub use entity::{EntityKind, EntitySize, SceneEntity};
pub use history::{Applied, Apply, History, HistoryError, Memento};
pub use preferences::{EditorPreferences, PreferencesError};
pub use registry::EntityRegistry;
pub use scene_state::{Background, SceneState, DEFAULT_MIN_UNITS};
pub use values::{CreatureStatus, CreatureTeam, Cyclic, ImageShape};

/// Stable token handle.
///
/// Survives reordering, removal/reinsertion and variant conversion, so
/// history entries can always name the token they act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
