//! Integration tests for encounter documents on disk

use std::path::{Path, PathBuf};

use encounter_editor::scene::{DocumentError, DocumentStore, ImageDirectory, JsonFileStore};
use encounter_editor::*;

fn write_png(path: &Path, w: u32, h: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbaImage::new(w, h).save(path).unwrap();
}

/// Data directory with a 400x300 map and two token images.
fn data_dir() -> (tempfile::TempDir, ImageDirectory) {
    let dir = tempfile::tempdir().unwrap();
    let images = ImageDirectory::new(dir.path());
    images.ensure_layout().unwrap();
    write_png(&images.images_dir().join("maps/crypt.png"), 400, 300);
    write_png(&images.images_dir().join("tokens/goblin.png"), 16, 16);
    write_png(&images.images_dir().join("tokens/chest.png"), 16, 16);
    (dir, images)
}

#[test]
fn test_new_encounter_from_image() {
    let (_dir, images) = data_dir();
    let enc = Encounter::from_image(Path::new("maps/crypt.png"), &images, 8).unwrap();
    assert_eq!(enc.window_size(), [400, 300]);
    assert_eq!(enc.cell_size(), 37.5);
    assert!(!enc.is_modified());
}

#[test]
fn test_edit_save_reload() {
    let (dir, images) = data_dir();
    let mut enc = Encounter::from_image(Path::new("crypt.png"), &images, 6).unwrap();
    assert_eq!(enc.scene().background.image, PathBuf::from("maps/crypt.png"));

    enc.create_creature("tokens/goblin.png");
    let goblin = enc.selected().unwrap();
    enc.move_entity_right(goblin);
    enc.change_creature_team(goblin);
    enc.change_creature_team(goblin);
    enc.grow_entity(goblin);
    enc.create_item("tokens/chest.png");
    let chest = enc.selected().unwrap();
    enc.shrink_entity(chest);
    enc.change_entity_shape(chest);
    enc.shrink_window(0.85);
    enc.reduce_grid();

    let store = JsonFileStore::new(dir.path().join("encounters/crypt"));
    store.save(&enc.to_document()).unwrap();
    enc.mark_saved();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["min_units"], 7);
    assert_eq!(raw["background"]["scale"], 0.85);
    assert_eq!(
        raw["creatures"][0],
        serde_json::json!({"img": "tokens/goblin.png", "x": 1, "y": 0, "size": 2, "team": "enemy"})
    );
    assert_eq!(
        raw["items"][0],
        serde_json::json!({"img": "tokens/chest.png", "size": 0.5, "shape": "circular"})
    );

    let reloaded = Encounter::from_document(store.load().unwrap(), &images).unwrap();
    assert_eq!(reloaded.min_units(), 7);
    assert_eq!(reloaded.window_size(), enc.window_size());
    assert_eq!(reloaded.entities().len(), 2);
    assert_eq!(reloaded.undoable_count(), 0);

    let goblin = &reloaded.entities()[0];
    assert_eq!(goblin.position(), (1, 0));
    assert_eq!(goblin.team(), Some(CreatureTeam::Enemy));
    assert_eq!(goblin.size.get(), 2.0);
    let chest = &reloaded.entities()[1];
    assert!(!chest.is_creature());
    assert_eq!(chest.shape, ImageShape::Circular);
    assert_eq!(chest.size.get(), 0.5);
}

#[test]
fn test_moved_images_are_found_by_name() {
    let (dir, images) = data_dir();
    let store = JsonFileStore::new(dir.path().join("encounters/old.json"));
    std::fs::write(
        store.path(),
        r#"{"background": {"img": "/somewhere/else/crypt.png"}, "min_units": 4,
            "creatures": [{"img": "goblin.png", "status": "dead"}]}"#,
    )
    .unwrap();

    let enc = Encounter::from_document(store.load().unwrap(), &images).unwrap();
    assert_eq!(enc.scene().background.image, PathBuf::from("maps/crypt.png"));
    assert_eq!(enc.entities()[0].image, PathBuf::from("tokens/goblin.png"));
    assert_eq!(enc.entities()[0].status(), Some(CreatureStatus::Dead));
}

#[test]
fn test_missing_background_fails_load() {
    let (_dir, images) = data_dir();
    let document = EncounterDocument::from_json(r#"{"background": {"img": "lost.png"}}"#).unwrap();
    assert!(matches!(
        Encounter::from_document(document, &images),
        Err(DocumentError::Image(_))
    ));
}

#[test]
fn test_invalid_document_fails_load() {
    let (dir, _images) = data_dir();
    let store = JsonFileStore::new(dir.path().join("encounters/bad.json"));
    std::fs::write(
        store.path(),
        r#"{"background": {"img": "crypt.png"}, "creatures": [{"img": "goblin.png", "status": "undead"}]}"#,
    )
    .unwrap();
    assert!(matches!(store.load(), Err(DocumentError::Invalid(_))));
}

#[test]
fn test_extreme_document_values_are_editable() {
    let (_dir, images) = data_dir();
    let document = EncounterDocument::from_json(
        r#"{"background": {"img": "crypt.png"}, "min_units": 4294967295,
            "creatures": [{"img": "goblin.png", "x": 2147483647, "y": 3}]}"#,
    )
    .unwrap();
    let mut enc = Encounter::from_document(document, &images).unwrap();
    let goblin = enc.entities()[0].id;

    assert!(!enc.reduce_grid());
    assert!(!enc.move_entity_right(goblin));
    assert_eq!(enc.undoable_count(), 0);
    assert_eq!(enc.min_units(), u32::MAX);
    assert_eq!(enc.entities()[0].position(), (i32::MAX, 3));

    assert!(FramePlan::build(enc.scene(), true).grid.is_empty());
    // grid extent saturates, so the token only steps back by its footprint
    assert!(enc.bring_home(goblin));
    assert_eq!(enc.entities()[0].position(), (i32::MAX - 1, 3));
}
