//! Image lookup under the editor data directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image {0:?} not found")]
    NotFound(PathBuf),
    #[error("Cannot read image {path:?}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves image references and reports their pixel sizes.
pub trait ImageLibrary {
    /// Canonical reference for an image: relative to the image directory
    /// when the image lives there, otherwise the path it was found at.
    fn resolve(&self, reference: &Path) -> Result<PathBuf, ImageError>;

    /// Pixel size of a resolved image.
    fn dimensions(&self, reference: &Path) -> Result<[u32; 2], ImageError>;
}

/// Images stored below a data directory.
///
/// Layout:
/// ```text
/// <root>/
///   images/       default location for every image
///   encounters/   saved encounter documents
/// ```
#[derive(Clone, Debug)]
pub struct ImageDirectory {
    root: PathBuf,
}

impl ImageDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// Create the directory layout if it is missing.
    pub fn ensure_layout(&self) -> Result<(), ImageError> {
        std::fs::create_dir_all(self.images_dir())?;
        std::fs::create_dir_all(self.root.join("encounters"))?;
        Ok(())
    }

    /// Filesystem path of a reference.
    pub fn locate(&self, reference: &Path) -> PathBuf {
        // absolute references replace the base on join
        self.images_dir().join(reference)
    }

    fn canonical(&self, path: PathBuf) -> PathBuf {
        match path.strip_prefix(self.images_dir()) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => path,
        }
    }

    /// Depth-first search for a file name, visiting `images/` first.
    fn search(&self, name: &std::ffi::OsStr) -> Result<Option<PathBuf>, ImageError> {
        if !self.root.is_dir() {
            return Ok(None);
        }
        let images_dir = self.images_dir();
        let mut stack = sorted_entries(&self.root)?;
        if let Some(idx) = stack.iter().position(|p| *p == images_dir) {
            let images = stack.remove(idx);
            stack.push(images);
        }

        while let Some(current) = stack.pop() {
            if current.is_dir() {
                stack.extend(sorted_entries(&current)?);
            } else if current.is_file() && current.file_name() == Some(name) {
                return Ok(Some(current));
            }
        }
        Ok(None)
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, ImageError> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    // popped from the back, so reverse order visits names ascending
    entries.sort_by(|a, b| b.cmp(a));
    Ok(entries)
}

impl ImageLibrary for ImageDirectory {
    fn resolve(&self, reference: &Path) -> Result<PathBuf, ImageError> {
        let direct = self.locate(reference);
        if direct.is_file() {
            return Ok(self.canonical(direct));
        }

        let name = reference
            .file_name()
            .ok_or_else(|| ImageError::NotFound(reference.to_path_buf()))?;
        match self.search(name)? {
            Some(found) => {
                log::debug!("Found {:?} at {:?}", reference, found);
                Ok(self.canonical(found))
            }
            None => Err(ImageError::NotFound(reference.to_path_buf())),
        }
    }

    fn dimensions(&self, reference: &Path) -> Result<[u32; 2], ImageError> {
        let path = self.locate(reference);
        if !path.is_file() {
            return Err(ImageError::NotFound(reference.to_path_buf()));
        }
        let (w, h) = image::image_dimensions(&path)
            .map_err(|source| ImageError::Probe { path, source })?;
        Ok([w, h])
    }
}
