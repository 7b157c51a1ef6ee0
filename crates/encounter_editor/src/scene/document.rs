//! Encounter documents in JSON format.
//!
//! ```json
//! {
//!   "background": {"img": "maps/crypt.png", "scale": 0.85},
//!   "min_units": 8,
//!   "creatures": [{"img": "goblin.png", "x": 2, "y": 3, "team": "enemy"}],
//!   "items": [{"img": "chest.png", "size": 0.5}]
//! }
//! ```
//!
//! Fields equal to their defaults are left out when saving and filled in when
//! loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use super::images::{ImageError, ImageLibrary};
use crate::core::{
    Background, CreatureStatus, CreatureTeam, EntityKind, EntitySize, Encounter, ImageShape,
    SceneEntity, SceneState, DEFAULT_MIN_UNITS,
};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(serde_json::Error),
    #[error("Invalid encounter: {0}")]
    Invalid(String),
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        // wrong types, unknown enum values and missing fields
        if err.is_data() {
            DocumentError::Invalid(err.to_string())
        } else {
            DocumentError::Parse(err)
        }
    }
}

/// Top-level encounter file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterDocument {
    pub background: BackgroundRecord,
    #[serde(default = "default_min_units")]
    pub min_units: u32,
    #[serde(default)]
    pub creatures: Vec<EntityRecord>,
    #[serde(default)]
    pub items: Vec<EntityRecord>,
}

fn default_min_units() -> u32 {
    DEFAULT_MIN_UNITS
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundRecord {
    pub img: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// One creature or item. `status` and `team` only apply to creatures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub img: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_size"
    )]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ImageShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CreatureStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<CreatureTeam>,
}

/// Whole-cell sizes are written as integers.
fn serialize_size<S: Serializer>(size: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match size {
        Some(v) if v.fract() == 0.0 && v.abs() <= i64::MAX as f64 => serializer.serialize_i64(*v as i64),
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}

impl EntityRecord {
    pub fn new(img: impl Into<PathBuf>) -> Self {
        Self {
            img: img.into(),
            x: None,
            y: None,
            size: None,
            shape: None,
            status: None,
            team: None,
        }
    }

    fn from_entity(entity: &SceneEntity) -> Self {
        let moved = entity.position() != (0, 0);
        let (status, team) = match entity.kind {
            EntityKind::Creature { status, team } => (
                (status != CreatureStatus::Alive).then_some(status),
                (team != CreatureTeam::None).then_some(team),
            ),
            EntityKind::Item => (None, None),
        };
        Self {
            img: entity.image.clone(),
            x: moved.then_some(entity.x),
            y: moved.then_some(entity.y),
            size: (entity.size != EntitySize::UNIT).then_some(entity.size.get()),
            shape: (entity.shape != entity.kind.default_shape()).then_some(entity.shape),
            status,
            team,
        }
    }

    fn into_entity(
        self,
        scene: &mut SceneState,
        kind: EntityKind,
        images: &dyn ImageLibrary,
    ) -> Result<SceneEntity, DocumentError> {
        let size = match self.size {
            Some(v) => EntitySize::new(v).ok_or_else(|| {
                DocumentError::Invalid(format!("size of {:?} must be positive, not {}", self.img, v))
            })?,
            None => EntitySize::UNIT,
        };
        let image = match images.resolve(&self.img) {
            Ok(image) => image,
            Err(err) => {
                log::warn!("Keeping unresolved image reference: {}", err);
                self.img.clone()
            }
        };
        let mut entity = SceneEntity::new(scene.entities.allocate_id(), image, kind)
            .with_position(self.x.unwrap_or(0), self.y.unwrap_or(0))
            .with_size(size);
        if let Some(shape) = self.shape {
            entity.shape = shape;
        }
        if let Some(status) = self.status {
            entity = entity.with_status(status);
        }
        if let Some(team) = self.team {
            entity = entity.with_team(team);
        }
        Ok(entity)
    }
}

impl EncounterDocument {
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(content)?;
        document.validate()?;
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the value ranges the field types alone do not enforce.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.min_units < 1 {
            return Err(DocumentError::Invalid(
                "min_units must be at least 1".to_string(),
            ));
        }
        if let Some(scale) = self.background.scale {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(DocumentError::Invalid(format!(
                    "background scale must be bigger than 0, not {}",
                    scale
                )));
            }
        }
        for record in self.creatures.iter().chain(&self.items) {
            if let Some(size) = record.size {
                if EntitySize::new(size).is_none() {
                    return Err(DocumentError::Invalid(format!(
                        "size of {:?} must be positive, not {}",
                        record.img, size
                    )));
                }
            }
        }
        Ok(())
    }

    /// Capture a scene. Creatures and items are listed front to back.
    pub fn from_scene(scene: &SceneState) -> Self {
        let (creatures, items): (Vec<&SceneEntity>, Vec<&SceneEntity>) =
            scene.entities.iter().partition(|e| e.is_creature());
        let scale = scene.background.scale;
        Self {
            background: BackgroundRecord {
                img: scene.background.image.clone(),
                scale: (scale != 1.0).then_some(scale),
            },
            min_units: scene.min_units(),
            creatures: creatures.into_iter().map(EntityRecord::from_entity).collect(),
            items: items.into_iter().map(EntityRecord::from_entity).collect(),
        }
    }

    /// Build the scene, resolving every image through `images`.
    ///
    /// The background must resolve, since its size defines the window;
    /// tokens whose images are missing keep their stored reference.
    pub fn into_scene(self, images: &dyn ImageLibrary) -> Result<SceneState, DocumentError> {
        self.validate()?;
        let image = images.resolve(&self.background.img)?;
        let native_size = images.dimensions(&image)?;
        let background =
            Background::new(image, native_size).with_scale(self.background.scale.unwrap_or(1.0));

        let mut scene = SceneState::new(background, self.min_units);
        for record in self.creatures {
            let entity = record.into_entity(&mut scene, EntityKind::creature(), images)?;
            scene.entities.push_back(entity);
        }
        for record in self.items {
            let entity = record.into_entity(&mut scene, EntityKind::Item, images)?;
            scene.entities.push_back(entity);
        }
        log::info!(
            "Loaded encounter: {} tokens, {} grid units",
            scene.entities.len(),
            scene.min_units()
        );
        Ok(scene)
    }
}

impl Encounter {
    pub fn from_document(
        document: EncounterDocument,
        images: &dyn ImageLibrary,
    ) -> Result<Self, DocumentError> {
        Ok(Self::from_scene(document.into_scene(images)?))
    }

    /// Fresh encounter over a bare background image.
    pub fn from_image(
        image: &Path,
        images: &dyn ImageLibrary,
        min_units: u32,
    ) -> Result<Self, DocumentError> {
        let image = images.resolve(image)?;
        let native_size = images.dimensions(&image)?;
        Ok(Self::new(Background::new(image, native_size), min_units))
    }

    pub fn to_document(&self) -> EncounterDocument {
        EncounterDocument::from_scene(self.scene())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;

    /// Every image exists and is 800x600.
    struct FixedImages;

    impl ImageLibrary for FixedImages {
        fn resolve(&self, reference: &Path) -> Result<PathBuf, ImageError> {
            Ok(reference.to_path_buf())
        }

        fn dimensions(&self, _reference: &Path) -> Result<[u32; 2], ImageError> {
            Ok([800, 600])
        }
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        let doc = EncounterDocument::from_json(r#"{"background": {"img": "map.png"}}"#).unwrap();
        assert_eq!(doc.min_units, 8);
        let scene = doc.into_scene(&FixedImages).unwrap();
        assert_eq!(scene.background.scale, 1.0);
        assert!(scene.entities.is_empty());
        assert_eq!(scene.cell_size(), 75.0);
    }

    #[test]
    fn test_load_order_and_variant_defaults() {
        let doc = EncounterDocument::from_json(
            r#"{
                "background": {"img": "map.png", "scale": 0.5},
                "min_units": 6,
                "items": [{"img": "chest.png", "x": 1, "y": 2}],
                "creatures": [
                    {"img": "goblin.png", "size": 2, "team": "enemy"},
                    {"img": "bat.png", "size": 0.5, "shape": "original", "status": "sleep"}
                ]
            }"#,
        )
        .unwrap();
        let scene = doc.into_scene(&FixedImages).unwrap();
        let entities = scene.entities.as_slice();
        assert_eq!(entities.len(), 3);

        assert_eq!(entities[0].image, PathBuf::from("goblin.png"));
        assert_eq!(entities[0].team(), Some(CreatureTeam::Enemy));
        assert_eq!(entities[0].shape, ImageShape::Circular);
        assert_eq!(entities[0].size.get(), 2.0);

        assert_eq!(entities[1].status(), Some(CreatureStatus::Sleep));
        assert_eq!(entities[1].shape, ImageShape::Original);

        assert!(!entities[2].is_creature());
        assert_eq!(entities[2].position(), (1, 2));
        assert_eq!(entities[2].shape, ImageShape::Original);
    }

    #[test]
    fn test_save_is_sparse() {
        let mut scene = SceneState::new(Background::new("map.png", [800, 600]), 8);
        scene.entities.push_back(SceneEntity::creature(EntityId(1), "goblin.png"));
        scene.entities.push_back(
            SceneEntity::item(EntityId(2), "coin.png")
                .with_position(3, 0)
                .with_size(EntitySize::new(0.5).unwrap()),
        );
        scene.entities.push_back(
            SceneEntity::creature(EntityId(3), "ogre.png").with_size(EntitySize::new(3.0).unwrap()),
        );

        let json: serde_json::Value =
            serde_json::from_str(&EncounterDocument::from_scene(&scene).to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "background": {"img": "map.png"},
                "min_units": 8,
                "creatures": [{"img": "goblin.png"}, {"img": "ogre.png", "size": 3}],
                "items": [{"img": "coin.png", "x": 3, "y": 0, "size": 0.5}]
            })
        );
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            r#"{"background": {"img": "map.png", "scale": 0}}"#,
            r#"{"background": {"img": "map.png"}, "min_units": 0}"#,
            r#"{"background": {"img": "map.png"}, "creatures": [{"img": "a.png", "x": 1.5}]}"#,
            r#"{"background": {"img": "map.png"}, "creatures": [{"img": "a.png", "team": "foe"}]}"#,
            r#"{"background": {"img": "map.png"}, "items": [{"x": 1}]}"#,
            r#"{"background": {"img": "map.png"}, "items": [{"img": "a.png", "size": -1}]}"#,
            r#"{"min_units": 3}"#,
        ];
        for case in cases {
            assert!(
                matches!(EncounterDocument::from_json(case), Err(DocumentError::Invalid(_))),
                "accepted {}",
                case
            );
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            EncounterDocument::from_json("{\"background\": "),
            Err(DocumentError::Parse(_))
        ));
    }
}
