//! Key bindings: which chord triggers which editor action.

use std::collections::{BTreeMap, HashMap};

use super::events::{InputError, Key, KeyChord};

/// Everything a key can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    ChangeBackground,
    ToggleGrid,
    ReduceGrid,
    EnlargeGrid,
    EnlargeWindow,
    ShrinkWindow,
    ChangeType,
    ChangeTeam,
    ChangeStatus,
    ChangeShape,
    Grow,
    Shrink,
    BringHome,
    BringAllHome,
    AddCreature,
    AddItem,
    Undo,
    Redo,
    Deselect,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Destroy,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[
            Action::ChangeBackground,
            Action::ToggleGrid,
            Action::ReduceGrid,
            Action::EnlargeGrid,
            Action::EnlargeWindow,
            Action::ShrinkWindow,
            Action::ChangeType,
            Action::ChangeTeam,
            Action::ChangeStatus,
            Action::ChangeShape,
            Action::Grow,
            Action::Shrink,
            Action::BringHome,
            Action::BringAllHome,
            Action::AddCreature,
            Action::AddItem,
            Action::Undo,
            Action::Redo,
            Action::Deselect,
            Action::MoveLeft,
            Action::MoveRight,
            Action::MoveUp,
            Action::MoveDown,
            Action::Destroy,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::ChangeBackground => "change_background",
            Action::ToggleGrid => "toggle_grid",
            Action::ReduceGrid => "reduce_grid",
            Action::EnlargeGrid => "enlarge_grid",
            Action::EnlargeWindow => "enlarge_window",
            Action::ShrinkWindow => "shrink_window",
            Action::ChangeType => "change_entity_type",
            Action::ChangeTeam => "change_creature_team",
            Action::ChangeStatus => "change_creature_status",
            Action::ChangeShape => "change_entity_shape",
            Action::Grow => "grow_entity",
            Action::Shrink => "shrink_entity",
            Action::BringHome => "bring_home",
            Action::BringAllHome => "bring_all_home",
            Action::AddCreature => "create_creature",
            Action::AddItem => "create_item",
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::Deselect => "deselect_entity",
            Action::MoveLeft => "move_entity_left",
            Action::MoveRight => "move_entity_right",
            Action::MoveUp => "move_entity_up",
            Action::MoveDown => "move_entity_down",
            Action::Destroy => "destroy_entity",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Self::all().iter().copied().find(|a| a.name() == name)
    }
}

#[derive(Clone, Debug)]
pub struct KeyBindings {
    map: HashMap<KeyChord, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let c = |ch| Key::Char(ch);
        let table = [
            (KeyChord::plain(c('b')), Action::ChangeBackground),
            (KeyChord::plain(c('d')), Action::ToggleGrid),
            (KeyChord::plain(c('g')), Action::ReduceGrid),
            (KeyChord::ctrl(c('g')), Action::EnlargeGrid),
            (KeyChord::plain(c('w')), Action::EnlargeWindow),
            (KeyChord::ctrl(c('w')), Action::ShrinkWindow),
            (KeyChord::plain(c('c')), Action::ChangeType),
            (KeyChord::plain(c('t')), Action::ChangeTeam),
            (KeyChord::plain(c('s')), Action::ChangeStatus),
            (KeyChord::plain(c('o')), Action::ChangeShape),
            (KeyChord::plain(c('l')), Action::Grow),
            (KeyChord::ctrl(c('l')), Action::Shrink),
            (KeyChord::plain(c('h')), Action::BringHome),
            (KeyChord::ctrl(c('h')), Action::BringAllHome),
            (KeyChord::plain(c('a')), Action::AddCreature),
            (KeyChord::plain(c('i')), Action::AddItem),
            (KeyChord::ctrl(c('z')), Action::Undo),
            (KeyChord::ctrl(c('y')), Action::Redo),
            (KeyChord::plain(Key::Escape), Action::Deselect),
            (KeyChord::plain(Key::Left), Action::MoveLeft),
            (KeyChord::plain(Key::Right), Action::MoveRight),
            (KeyChord::plain(Key::Up), Action::MoveUp),
            (KeyChord::plain(Key::Down), Action::MoveDown),
            (KeyChord::plain(Key::Backspace), Action::Destroy),
            (KeyChord::plain(Key::Delete), Action::Destroy),
        ];
        Self {
            map: table.into_iter().collect(),
        }
    }
}

impl KeyBindings {
    /// Default table with `overrides` (chord to action name) applied on top.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, InputError> {
        let mut bindings = Self::default();
        for (chord, action) in overrides {
            let chord: KeyChord = chord.parse()?;
            let action =
                Action::from_name(action).ok_or_else(|| InputError::UnknownAction(action.clone()))?;
            bindings.bind(chord, action);
        }
        Ok(bindings)
    }

    pub fn bind(&mut self, chord: KeyChord, action: Action) {
        if let Some(previous) = self.map.insert(chord, action) {
            log::debug!("Rebound {} from {} to {}", chord, previous.name(), action.name());
        }
    }

    pub fn action(&self, chord: &KeyChord) -> Option<Action> {
        self.map.get(chord).copied()
    }

    /// Chords bound to an action, sorted for display.
    pub fn chords_for(&self, action: Action) -> Vec<String> {
        let mut chords: Vec<String> = self
            .map
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(chord, _)| chord.to_string())
            .collect();
        chords.sort();
        chords
    }
}
