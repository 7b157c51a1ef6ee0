//! Encounter persistence and image lookup.
//!
//! Encounters are saved as JSON documents; images are looked up under the
//! editor data directory.

mod document;
mod images;
mod store;

pub use document::{BackgroundRecord, DocumentError, EncounterDocument, EntityRecord};
pub use images::{ImageDirectory, ImageError, ImageLibrary};
pub use store::{DocumentStore, JsonFileStore};
