//! An interactive editing session: input events in, commands out.

use std::path::Path;

use super::bindings::{Action, KeyBindings};
use super::events::{InputEvent, KeyChord, MouseButton};
use crate::core::{EditorPreferences, Encounter};
use crate::render::FramePlan;
use crate::scene::ImageLibrary;

/// An image the session is waiting for, and what it will be used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageRequest {
    Background,
    Creature,
    Item,
}

impl ImageRequest {
    pub fn title(&self) -> &'static str {
        match self {
            ImageRequest::Background => "Choose a background image",
            ImageRequest::Creature => "Choose a creature image",
            ImageRequest::Item => "Choose an item image",
        }
    }
}

pub struct Session {
    encounter: Encounter,
    images: Box<dyn ImageLibrary>,
    bindings: KeyBindings,
    show_grid: bool,
    pointer: [f64; 2],
    /// Left button held: the selected token follows the pointer as a ghost
    dragging: bool,
    pending: Option<ImageRequest>,
    window_enlarge_factor: f64,
    window_shrink_factor: f64,
    running: bool,
}

impl Session {
    pub fn new(encounter: Encounter, images: Box<dyn ImageLibrary>) -> Self {
        let defaults = EditorPreferences::default();
        Self {
            encounter,
            images,
            bindings: KeyBindings::default(),
            show_grid: defaults.show_grid,
            pointer: [0.0, 0.0],
            dragging: false,
            pending: None,
            window_enlarge_factor: defaults.window_enlarge_factor,
            window_shrink_factor: defaults.window_shrink_factor,
            running: true,
        }
    }

    /// Apply the view settings and window steps from the preferences.
    pub fn with_preferences(mut self, prefs: &EditorPreferences) -> Self {
        self.show_grid = prefs.show_grid;
        self.window_enlarge_factor = prefs.window_enlarge_factor;
        self.window_shrink_factor = prefs.window_shrink_factor;
        self
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn encounter_mut(&mut self) -> &mut Encounter {
        &mut self.encounter
    }

    pub fn into_encounter(self) -> Encounter {
        self.encounter
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// Image the session is waiting for, if any.
    pub fn pending_request(&self) -> Option<ImageRequest> {
        self.pending
    }

    pub fn frame(&self) -> FramePlan {
        let scene = self.encounter.scene();
        let frame = FramePlan::build(scene, self.show_grid);
        if self.dragging {
            frame.with_ghost(scene, self.pointer)
        } else {
            frame
        }
    }

    /// Process one event. Returns whether the frame needs redrawing.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerMove { position } => {
                self.pointer = *position;
                // the ghost follows the pointer
                self.dragging && self.encounter.selected().is_some()
            }
            InputEvent::PointerDown { position, button } => {
                self.pointer = *position;
                if *button != MouseButton::Left {
                    return false;
                }
                self.dragging = true;
                let selected = match self.encounter.entity_at(position[0], position[1]) {
                    Some(id) => self.encounter.select_entity(id),
                    None => false,
                };
                selected || self.encounter.selected().is_some()
            }
            InputEvent::PointerUp { position, button } => {
                self.pointer = *position;
                if *button != MouseButton::Left {
                    return false;
                }
                let was_dragging = std::mem::replace(&mut self.dragging, false);
                let moved = match self.encounter.selected() {
                    Some(id) => self.encounter.move_entity(id, position[0], position[1]),
                    None => false,
                };
                moved || (was_dragging && self.encounter.selected().is_some())
            }
            InputEvent::Key(chord) => self.key(chord),
            InputEvent::ImagePicked(path) => self.image_chosen(path),
            InputEvent::Resize => true,
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.running = false;
                false
            }
        }
    }

    fn key(&mut self, chord: &KeyChord) -> bool {
        match self.bindings.action(chord) {
            Some(action) => self.perform(action),
            None => {
                log::debug!("No action bound to {}", chord);
                false
            }
        }
    }

    /// Run one bound action.
    pub fn perform(&mut self, action: Action) -> bool {
        match action {
            Action::ChangeBackground => return self.request(ImageRequest::Background),
            Action::AddCreature => return self.request(ImageRequest::Creature),
            Action::AddItem => return self.request(ImageRequest::Item),
            Action::ToggleGrid => {
                self.show_grid = !self.show_grid;
                return true;
            }
            _ => {}
        }

        let enc = &mut self.encounter;
        match action {
            Action::ReduceGrid => enc.reduce_grid(),
            Action::EnlargeGrid => enc.enlarge_grid(),
            Action::EnlargeWindow => enc.enlarge_window(self.window_enlarge_factor),
            Action::ShrinkWindow => enc.shrink_window(self.window_shrink_factor),
            Action::BringAllHome => enc.bring_all_home(),
            Action::Undo => enc.undo(),
            Action::Redo => enc.redo(),
            Action::Deselect => enc.deselect_entity(),
            _ => {
                let Some(id) = enc.selected() else {
                    log::info!("{} skipped: nothing is selected", action.name());
                    return false;
                };
                match action {
                    Action::ChangeType => enc.change_entity_type(id),
                    Action::ChangeTeam => enc.change_creature_team(id),
                    Action::ChangeStatus => enc.change_creature_status(id),
                    Action::ChangeShape => enc.change_entity_shape(id),
                    Action::Grow => enc.grow_entity(id),
                    Action::Shrink => enc.shrink_entity(id),
                    Action::BringHome => enc.bring_home(id),
                    Action::MoveLeft => enc.move_entity_left(id),
                    Action::MoveRight => enc.move_entity_right(id),
                    Action::MoveUp => enc.move_entity_up(id),
                    Action::MoveDown => enc.move_entity_down(id),
                    Action::Destroy => enc.destroy_entity(id),
                    _ => false,
                }
            }
        }
    }

    fn request(&mut self, request: ImageRequest) -> bool {
        if let Some(previous) = self.pending.replace(request) {
            log::debug!("Replacing pending request {:?}", previous);
        }
        log::info!("{}", request.title());
        false
    }

    /// Fulfil the pending image request.
    pub fn image_chosen(&mut self, path: &Path) -> bool {
        let Some(request) = self.pending.take() else {
            log::info!("Ignoring image {:?}: nothing requested one", path);
            return false;
        };
        let image = match self.images.resolve(path) {
            Ok(image) => image,
            Err(err) => {
                log::warn!("{}", err);
                return false;
            }
        };
        match request {
            ImageRequest::Background => match self.images.dimensions(&image) {
                Ok(native_size) => self.encounter.change_background(image, native_size),
                Err(err) => {
                    log::warn!("{}", err);
                    false
                }
            },
            ImageRequest::Creature => self.encounter.create_creature(image),
            ImageRequest::Item => self.encounter.create_item(image),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::{Background, CreatureTeam};
    use crate::input::events::Key;
    use crate::scene::ImageError;

    struct FixedImages;

    impl ImageLibrary for FixedImages {
        fn resolve(&self, reference: &Path) -> Result<PathBuf, ImageError> {
            if reference.as_os_str().is_empty() {
                return Err(ImageError::NotFound(reference.to_path_buf()));
            }
            Ok(reference.to_path_buf())
        }

        fn dimensions(&self, _reference: &Path) -> Result<[u32; 2], ImageError> {
            Ok([400, 400])
        }
    }

    /// 800x600 window with 100px cells.
    fn session() -> Session {
        let encounter = Encounter::new(Background::new("map.png", [800, 600]), 6);
        Session::new(encounter, Box::new(FixedImages))
    }

    fn key(s: &str) -> InputEvent {
        InputEvent::Key(s.parse().unwrap())
    }

    fn add_creature(session: &mut Session, image: &str) {
        session.handle(&key("a"));
        assert_eq!(session.pending_request(), Some(ImageRequest::Creature));
        assert!(session.handle(&InputEvent::ImagePicked(PathBuf::from(image))));
    }

    #[test]
    fn test_add_creature_through_request() {
        let mut session = session();
        add_creature(&mut session, "goblin.png");
        assert_eq!(session.pending_request(), None);
        let id = session.encounter().selected().unwrap();
        assert!(session.encounter().is_creature(id));
    }

    #[test]
    fn test_image_without_request_is_ignored() {
        let mut session = session();
        assert!(!session.handle(&InputEvent::ImagePicked(PathBuf::from("goblin.png"))));
        assert!(session.encounter().entities().is_empty());
    }

    #[test]
    fn test_background_request_rescales_window() {
        let mut session = session();
        session.handle(&key("b"));
        assert!(session.handle(&InputEvent::ImagePicked(PathBuf::from("cave.png"))));
        assert_eq!(session.encounter().window_size(), [400, 400]);
    }

    #[test]
    fn test_click_selects_and_release_moves() {
        let mut session = session();
        add_creature(&mut session, "goblin.png");
        let id = session.encounter().selected().unwrap();
        session.handle(&key("escape"));
        assert_eq!(session.encounter().selected(), None);

        let down = InputEvent::PointerDown {
            position: [50.0, 50.0],
            button: MouseButton::Left,
        };
        let up = InputEvent::PointerUp {
            position: [420.0, 310.0],
            button: MouseButton::Left,
        };
        assert!(session.handle(&down));
        assert!(session.handle(&up));
        assert_eq!(session.encounter().entity(id).unwrap().position(), (4, 3));

        session.handle(&key("ctrl+z"));
        assert_eq!(session.encounter().entity(id).unwrap().position(), (0, 0));
    }

    #[test]
    fn test_drag_shows_ghost_until_release() {
        let mut session = session();
        add_creature(&mut session, "goblin.png");
        let id = session.encounter().selected().unwrap();
        assert_eq!(session.frame().ghost, None);

        let moved = |x, y| InputEvent::PointerMove { position: [x, y] };
        assert!(!session.handle(&moved(30.0, 30.0)));

        session.handle(&InputEvent::PointerDown {
            position: [50.0, 50.0],
            button: MouseButton::Left,
        });
        assert!(session.handle(&moved(250.0, 150.0)));
        let ghost = session.frame().ghost.unwrap();
        assert_eq!(ghost.entity, id);
        assert_eq!((ghost.rect.x, ghost.rect.y), (200.0, 100.0));

        session.handle(&InputEvent::PointerUp {
            position: [250.0, 150.0],
            button: MouseButton::Left,
        });
        assert_eq!(session.frame().ghost, None);
        assert_eq!(session.encounter().entity(id).unwrap().position(), (2, 1));
        assert!(!session.handle(&moved(10.0, 10.0)));
    }

    #[test]
    fn test_entity_keys_need_selection() {
        let mut session = session();
        add_creature(&mut session, "goblin.png");
        let id = session.encounter().selected().unwrap();

        assert!(session.handle(&key("t")));
        assert_eq!(session.encounter().entity(id).unwrap().team(), Some(CreatureTeam::Ally));
        assert!(session.handle(&key("right")));

        session.handle(&key("escape"));
        let before = session.encounter().undoable_count();
        assert!(!session.handle(&key("t")));
        assert!(!session.handle(&key("delete")));
        assert_eq!(session.encounter().undoable_count(), before);
    }

    #[test]
    fn test_grid_toggle_is_view_only() {
        let mut session = session();
        assert!(session.frame().grid.is_empty());
        assert!(session.handle(&key("d")));
        assert!(session.show_grid());
        assert!(!session.frame().grid.is_empty());
        assert_eq!(session.encounter().undoable_count(), 0);
    }

    #[test]
    fn test_window_keys_use_preferences() {
        let mut prefs = EditorPreferences::default();
        prefs.window_enlarge_factor = 1.5;
        prefs.window_shrink_factor = 0.5;
        let mut session = session().with_preferences(&prefs);
        session.handle(&key("w"));
        assert_eq!(session.encounter().window_size(), [1200, 900]);
        session.handle(&key("ctrl+w"));
        assert_eq!(session.encounter().window_size(), [600, 450]);
    }

    #[test]
    fn test_quit_stops_session() {
        let mut session = session();
        assert!(session.is_running());
        assert!(!session.handle(&InputEvent::Quit));
        assert!(!session.is_running());
        assert!(!session.handle(&InputEvent::Key(KeyChord::plain(Key::Char('q')))));
    }
}
