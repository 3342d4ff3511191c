#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

use crate::board::{Board, BoardState};
use crate::events::{BoardEvent, Snapshot};

/// What the renderer knows about the game, built only from published events.
#[derive(Resource, Debug)]
pub struct BoardView {
    events: Receiver<BoardEvent>,
    snapshot: Option<Snapshot>,
    top_of_game: usize,
    game_over: bool,
}

impl BoardView {
    #[must_use]
    pub fn new(events: Receiver<BoardEvent>) -> Self {
        Self {
            events,
            snapshot: None,
            top_of_game: 0,
            game_over: false,
        }
    }

    /// Subscribes to `board` and takes in its current state.
    #[must_use]
    pub fn attach(board: &mut Board) -> Self {
        let mut view = Self::new(board.subscribe());
        view.sync();
        view
    }

    /// Drains pending events; returns how many were applied.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Board event stream closed");
                    break;
                }
            }
        }
        applied
    }

    pub fn apply(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::GridChanged(snapshot) => {
                self.top_of_game = snapshot.playable_offset();
                if snapshot.state() != BoardState::GameOver {
                    self.game_over = false;
                }
                self.snapshot = Some(snapshot);
            }
            BoardEvent::GameOver => {
                debug!("View received game over");
                self.game_over = true;
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Offset of the first playable row in the latest snapshot text.
    #[must_use]
    pub fn top_of_game(&self) -> usize {
        self.top_of_game
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.state() == BoardState::Paused)
    }

    #[must_use]
    pub fn lines_cleared(&self) -> u32 {
        self.snapshot.as_ref().map_or(0, Snapshot::lines_cleared)
    }
}
