#![warn(clippy::all, clippy::pedantic)]

use std::collections::HashMap;
use std::fmt;

use bevy_ecs::prelude::Resource;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, trace};

use crate::board::{Board, BoardState};
use crate::config::ConfigError;
use crate::config::controls::{ControlsConfig, key_name, parse_key};

/// Board operations a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    Down,
    Drop,
    TogglePause,
    Reset,
    Quit,
}

impl Command {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Command::MoveLeft => "Move left",
            Command::MoveRight => "Move right",
            Command::Rotate => "Rotate",
            Command::Down => "Soft drop",
            Command::Drop => "Hard drop",
            Command::TogglePause => "Pause",
            Command::Reset => "Restart",
            Command::Quit => "Quit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Applied,
    Ignored,
    Quit,
}

/// Validated key-to-command table.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct KeyBindings {
    commands: HashMap<KeyCode, Command>,
    // Keys per command in configuration order, for the help panel
    keys: Vec<(Command, Vec<KeyCode>)>,
}

impl KeyBindings {
    /// # Errors
    ///
    /// [`ConfigError::InvalidKey`] for an unparseable key name and
    /// [`ConfigError::DuplicateBinding`] when one key is bound to two commands.
    pub fn from_config(config: &ControlsConfig) -> Result<Self, ConfigError> {
        let mut commands = HashMap::new();
        let mut keys = Vec::new();

        for (command, names) in config.entries() {
            let mut codes = Vec::with_capacity(names.len());
            for name in names {
                let code = parse_key(name).ok_or_else(|| ConfigError::InvalidKey {
                    command,
                    key: name.clone(),
                })?;
                match commands.insert(code, command) {
                    Some(first) if first != command => {
                        return Err(ConfigError::DuplicateBinding {
                            key: key_name(code),
                            first,
                            second: command,
                        });
                    }
                    // Repeating a key within one command is harmless
                    Some(_) => continue,
                    None => codes.push(code),
                }
            }
            keys.push((command, codes));
        }

        Ok(Self { commands, keys })
    }

    #[must_use]
    pub fn resolve(&self, code: KeyCode) -> Option<Command> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.commands.get(&code).copied()
    }

    /// Command for a key press; releases, repeats and modified chords map to nothing.
    #[must_use]
    pub fn resolve_event(&self, key: &KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            // Ctrl-C always quits, regardless of bindings
            let ctrl_c = key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL);
            return ctrl_c.then_some(Command::Quit);
        }
        self.resolve(key.code)
    }

    /// Help lines like `"Left/a: Move left"`.
    #[must_use]
    pub fn help_lines(&self) -> Vec<String> {
        self.keys
            .iter()
            .filter(|(_, codes)| !codes.is_empty())
            .map(|(command, codes)| {
                let names: Vec<String> = codes.iter().copied().map(key_name).collect();
                format!("{}: {command}", names.join("/"))
            })
            .collect()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_config(&ControlsConfig::default())
            .unwrap_or_else(|e| unreachable!("built-in key bindings are invalid: {e}"))
    }
}

/// Applies one command to the board.
///
/// After game over only `Reset` and `Quit` are accepted.
pub fn apply_command(board: &mut Board, command: Command) -> InputOutcome {
    if command == Command::Quit {
        return InputOutcome::Quit;
    }
    if board.state() == BoardState::GameOver && command != Command::Reset {
        trace!("Ignoring {command} after game over");
        return InputOutcome::Ignored;
    }

    let changed = match command {
        Command::MoveLeft => board.move_left(),
        Command::MoveRight => board.move_right(),
        Command::Rotate => board.rotate(),
        Command::Down => board.down(),
        Command::Drop => board.hard_drop(),
        Command::TogglePause => board.toggle_pause(),
        Command::Reset => {
            board.reset();
            true
        }
        Command::Quit => unreachable!(),
    };

    if changed {
        debug!("Applied {command}");
        InputOutcome::Applied
    } else {
        InputOutcome::Ignored
    }
}
