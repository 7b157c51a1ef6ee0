//! Loading and saving encounter documents.

use std::path::{Path, PathBuf};

use super::document::{DocumentError, EncounterDocument};

/// Persistence backend for encounter documents.
pub trait DocumentStore {
    fn load(&self) -> Result<EncounterDocument, DocumentError>;
    fn save(&self, document: &EncounterDocument) -> Result<(), DocumentError>;
}

/// A JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at `path`, with the extension forced to `.json`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into().with_extension("json"),
        }
    }

    /// Store in `dir` named after an image's file stem.
    ///
    /// Dots inside the stem are kept: `crypt.v2.png` saves as
    /// `crypt.v2.json`.
    pub fn for_image(dir: &Path, image: &Path) -> Self {
        let stem = image
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "encounter".to_string());
        Self {
            path: dir.join(format!("{}.json", stem)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a path names an encounter document rather than an image.
    pub fn is_document(path: &Path) -> bool {
        match path.extension() {
            Some(ext) => ext.eq_ignore_ascii_case("json"),
            None => true,
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<EncounterDocument, DocumentError> {
        let content = std::fs::read_to_string(&self.path)?;
        let document = EncounterDocument::from_json(&content)?;
        log::info!("Loaded encounter from {:?}", self.path);
        Ok(document)
    }

    fn save(&self, document: &EncounterDocument) -> Result<(), DocumentError> {
        document.validate()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, document.to_json()?)?;
        log::info!("Saved encounter to {:?}", self.path);
        Ok(())
    }
}
