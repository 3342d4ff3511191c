use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::input::Command;

// Key names bound to each command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub rotate: Vec<String>,
    pub down: Vec<String>,
    pub drop: Vec<String>,
    pub pause: Vec<String>,
    pub reset: Vec<String>,
    pub quit: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_left: keys(&["Left", "a"]),
            move_right: keys(&["Right", "d"]),
            rotate: keys(&["Up", "w"]),
            down: keys(&["Down", "s"]),
            drop: keys(&["Space"]),
            pause: keys(&["p"]),
            reset: keys(&["r"]),
            quit: keys(&["q", "Esc"]),
        }
    }
}

impl ControlsConfig {
    /// Each command paired with its configured key names, in help-panel order.
    #[must_use]
    pub fn entries(&self) -> [(Command, &[String]); 8] {
        [
            (Command::MoveLeft, self.move_left.as_slice()),
            (Command::MoveRight, self.move_right.as_slice()),
            (Command::Rotate, self.rotate.as_slice()),
            (Command::Down, self.down.as_slice()),
            (Command::Drop, self.drop.as_slice()),
            (Command::TogglePause, self.pause.as_slice()),
            (Command::Reset, self.reset.as_slice()),
            (Command::Quit, self.quit.as_slice()),
        ]
    }
}

/// Parses a key name such as `"Left"`, `"Space"`, `"F5"` or `"x"`.
///
/// Letters are case-insensitive and always map to their lowercase form.
#[must_use]
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }

    let code = match name.to_ascii_lowercase().as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "enter" | "return" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        other => {
            let number: u8 = other.strip_prefix('f')?.parse().ok()?;
            if !(1..=12).contains(&number) {
                return None;
            }
            KeyCode::F(number)
        }
    };
    Some(code)
}

/// Display name for a key, the inverse of [`parse_key`].
#[must_use]
pub fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(number) => format!("F{number}"),
        KeyCode::Esc => "Esc".to_string(),
        other => format!("{other:?}"),
    }
}
