//! Text scripts of input events, one per line.
//!
//! ```text
//! # comments and blank lines are skipped
//! key a
//! pick monsters/goblin.png
//! down 120 40
//! up 200 40
//! move 10 10
//! key ctrl+z
//! resize
//! quit
//! ```
//!
//! `down` and `up` take an optional button name after the coordinates.

use std::path::PathBuf;

use super::events::{InputError, InputEvent, MouseButton};

/// Parse one line. Blank lines and comments give `None`.
pub fn parse_line(line: &str) -> Result<Option<InputEvent>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command {
        "key" => InputEvent::Key(rest.parse().map_err(|e: InputError| e.to_string())?),
        "down" => {
            let (position, button) = pointer_args(rest)?;
            InputEvent::PointerDown { position, button }
        }
        "up" => {
            let (position, button) = pointer_args(rest)?;
            InputEvent::PointerUp { position, button }
        }
        "move" => {
            let (position, _) = pointer_args(rest)?;
            InputEvent::PointerMove { position }
        }
        "pick" if !rest.is_empty() => InputEvent::ImagePicked(PathBuf::from(rest)),
        "pick" => return Err("pick needs an image path".to_string()),
        "resize" => InputEvent::Resize,
        "quit" => InputEvent::Quit,
        _ => return Err(format!("unknown command {:?}", command)),
    };
    Ok(Some(event))
}

fn pointer_args(args: &str) -> Result<([f64; 2], MouseButton), String> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let coordinate = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| format!("invalid coordinate {:?}", s))
    };
    match parts.as_slice() {
        [x, y] => Ok(([coordinate(x)?, coordinate(y)?], MouseButton::Left)),
        [x, y, button] => Ok((
            [coordinate(x)?, coordinate(y)?],
            button.parse().map_err(|e: InputError| e.to_string())?,
        )),
        _ => Err(format!("expected \"x y [button]\", got {:?}", args)),
    }
}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<InputEvent>, InputError> {
    let mut events = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let parsed = parse_line(line).map_err(|message| InputError::Script {
            line: index + 1,
            message,
        })?;
        events.extend(parsed);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::{Key, KeyChord};

    #[test]
    fn test_parse_script() {
        let events = parse_script(
            "# setup\n\
             key a\n\
             pick monsters/goblin king.png\n\
             \n\
             down 120 40\n\
             up 200.5 40 right\n\
             key ctrl+z\n\
             quit\n",
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::Key(KeyChord::plain(Key::Char('a'))),
                InputEvent::ImagePicked(PathBuf::from("monsters/goblin king.png")),
                InputEvent::PointerDown {
                    position: [120.0, 40.0],
                    button: MouseButton::Left
                },
                InputEvent::PointerUp {
                    position: [200.5, 40.0],
                    button: MouseButton::Right
                },
                InputEvent::Key(KeyChord::ctrl(Key::Char('z'))),
                InputEvent::Quit,
            ]
        );
    }

    #[test]
    fn test_errors_name_the_line() {
        let err = parse_script("key a\ndown 1\n").unwrap_err();
        assert!(matches!(err, InputError::Script { line: 2, .. }));

        assert!(parse_line("jump 1 2").is_err());
        assert!(parse_line("pick").is_err());
        assert!(parse_line("key hyper+a").is_err());
    }
}
