//! Encounter Manager
//!
//! Editor for tabletop encounter scenes: a background image, a square grid
//! and creature and item tokens placed on it.
//!
//! ## Features
//!
//! - **Undo/Redo**: every edit is recorded as a forward/reverse pair
//! - **Stable handles**: tokens keep their [`EntityId`] through reordering,
//!   deletion and conversion between creature and item
//! - **JSON documents**: sparse encounter files, defaults left out
//! - **Key bindings**: default table with overrides from the preferences
//!
//! ## Architecture
//!
//! ```text
//! Input Event → Session → Encounter command → Memento → History → SceneState
//! ```
//!
//! Commands never fail loudly: a command whose preconditions do not hold is
//! logged and returns `false`, leaving scene and history untouched.

pub mod commands;
pub mod core;
pub mod input;
pub mod render;
pub mod scene;

// Re-export commonly used types
pub use core::{
    Background, CreatureStatus, CreatureTeam, EditorPreferences, Encounter, EntityId, EntityKind,
    EntitySize, History, HistoryError, ImageShape, Memento, SceneEntity, SceneState,
};

pub use commands::{CommandError, Edit};

pub use scene::{
    DocumentError, DocumentStore, EncounterDocument, ImageDirectory, ImageLibrary, JsonFileStore,
};

pub use render::{FramePlan, LogRenderer, Renderer};

pub use input::{InputEvent, KeyBindings, Session};

/// Editor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor name
pub const NAME: &str = "Encounter Manager";
