//! Input handling: decoded events, key bindings and the editing session.

mod bindings;
mod events;
mod script;
mod session;

pub use bindings::{Action, KeyBindings};
pub use events::{InputError, InputEvent, Key, KeyChord, Modifiers, MouseButton};
pub use script::{parse_line, parse_script};
pub use session::{ImageRequest, Session};
