use std::time::Duration;

use bevy_ecs::prelude::World;
use crossterm::event::KeyEvent;
use log::{debug, trace};

use crate::board::Board;
use crate::input::{Command, InputOutcome, KeyBindings, apply_command};
use crate::timer::DropTimer;
use crate::view::BoardView;

/// Advances the drop timer and applies the tick if one came due.
///
/// Returns whether the board accepted a tick.
pub fn drop_timer_system(world: &mut World, delta: Duration) -> bool {
    if !world.resource_mut::<DropTimer>().advance(delta) {
        return false;
    }
    trace!("Drop tick due");
    world.resource_mut::<Board>().tick()
}

/// Resolves a key event through the bindings and applies it to the board.
pub fn key_input_system(world: &mut World, key: &KeyEvent) -> InputOutcome {
    let Some(command) = world.resource::<KeyBindings>().resolve_event(key) else {
        return InputOutcome::Ignored;
    };
    command_system(world, command)
}

pub fn command_system(world: &mut World, command: Command) -> InputOutcome {
    let outcome = {
        let mut board = world.resource_mut::<Board>();
        apply_command(&mut board, command)
    };

    // A fresh game gets a full interval before its first automatic drop
    if command == Command::Reset && outcome == InputOutcome::Applied {
        world.resource_mut::<DropTimer>().restart();
    }
    outcome
}

/// Focus loss stops the drop timer; regaining focus starts it again.
pub fn focus_system(world: &mut World, focused: bool) {
    debug!("Focus {}", if focused { "gained" } else { "lost" });
    let mut timer = world.resource_mut::<DropTimer>();
    if focused {
        timer.start();
    } else {
        timer.stop();
    }
}

/// Pulls pending board events into the view before drawing.
pub fn view_sync_system(world: &mut World) -> usize {
    world.resource_mut::<BoardView>().sync()
}
