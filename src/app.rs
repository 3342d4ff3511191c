#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

use bevy_ecs::prelude::World;
use crossterm::event::KeyEvent;
use log::info;

use crate::Time;
use crate::board::Board;
use crate::components::{PieceSource, RandomSource};
use crate::config::GameSettings;
use crate::config::palette::Palette;
use crate::input::{InputOutcome, KeyBindings};
use crate::systems::{drop_timer_system, focus_system, key_input_system, view_sync_system};
use crate::timer::DropTimer;
use crate::view::BoardView;

/// Game session: the board and its collaborators as resources of one `World`.
///
/// The main loop drives everything through this type on a single thread, so
/// timer ticks and key presses reach the board one at a time.
pub struct App {
    pub world: World,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_source(settings, Box::new(RandomSource::new()))
    }

    /// Builds the session with an explicit spawn policy.
    #[must_use]
    pub fn with_source(settings: GameSettings, source: Box<dyn PieceSource>) -> Self {
        let GameSettings {
            width,
            height,
            drop_interval,
            bindings,
            palette,
        } = settings;

        let mut board = Board::new(width, height, source);
        let view = BoardView::attach(&mut board);
        let mut timer = DropTimer::new(drop_interval);
        timer.start();

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(board);
        world.insert_resource(view);
        world.insert_resource(timer);
        world.insert_resource(bindings);
        world.insert_resource(palette);

        info!(
            "New {width}x{height} game, drop every {} ms",
            drop_interval.as_millis()
        );

        Self {
            world,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.world.resource::<Board>()
    }

    #[must_use]
    pub fn view(&self) -> &BoardView {
        self.world.resource::<BoardView>()
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        self.world.resource::<Palette>()
    }

    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        self.world.resource::<KeyBindings>()
    }

    #[must_use]
    pub fn timer(&self) -> &DropTimer {
        self.world.resource::<DropTimer>()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> InputOutcome {
        let outcome = key_input_system(&mut self.world, key);
        if outcome == InputOutcome::Quit {
            self.should_quit = true;
        }
        outcome
    }

    pub fn set_focus(&mut self, focused: bool) {
        focus_system(&mut self.world, focused);
    }

    /// Measures time since the previous call and runs a due drop tick.
    pub fn on_tick(&mut self) -> bool {
        let delta = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.delta()
        };
        self.advance(delta)
    }

    /// Runs the drop timer forward by `delta`.
    pub fn advance(&mut self, delta: Duration) -> bool {
        drop_timer_system(&mut self.world, delta)
    }

    /// Brings the view up to date with everything the board has published.
    pub fn sync_view(&mut self) -> usize {
        view_sync_system(&mut self.world)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}
