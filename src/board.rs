#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are capped well below i32::MAX
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use std::fmt;

use bevy_ecs::prelude::Resource;
use crossbeam_channel::Receiver;
use log::{debug, info, trace};

use crate::components::{Piece, PieceSource, Position, TetrominoType};
use crate::events::{BoardEvent, EventBus, Snapshot};
use crate::game::{
    EMPTY_CELL, FRAME_CORNER, FRAME_EDGE, MAX_BOARD_HEIGHT, MAX_BOARD_WIDTH, MIN_BOARD_HEIGHT,
    MIN_BOARD_WIDTH, ROW_BORDER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    AwaitingSpawn,
    PieceActive,
    Paused,
    GameOver,
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoardState::AwaitingSpawn => "awaiting spawn",
            BoardState::PieceActive => "piece active",
            BoardState::Paused => "paused",
            BoardState::GameOver => "game over",
        };
        f.write_str(name)
    }
}

// Result of moving the active piece one row down
enum Step {
    Moved,
    Locked,
}

/// The playfield and its gameplay state machine.
///
/// All mutating operations are expected to be called from one thread in
/// sequence. Each one that changes the grid, the active piece or the state
/// publishes a [`BoardEvent::GridChanged`] before returning; the transition
/// into [`BoardState::GameOver`] additionally publishes [`BoardEvent::GameOver`].
#[derive(Resource)]
pub struct Board {
    width: usize,
    height: usize,
    // Column-major: cells[x][y], y = 0 is the top row
    cells: Vec<Vec<Option<TetrominoType>>>,
    active: Option<Piece>,
    state: BoardState,
    lines_cleared: u32,
    source: Box<dyn PieceSource>,
    events: EventBus,
}

impl Board {
    /// Creates an empty board and spawns the first piece.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions are outside the supported range. Callers are
    /// expected to validate user-supplied dimensions beforehand
    /// (see [`crate::config::Config::validate`]).
    #[must_use]
    pub fn new(width: usize, height: usize, source: Box<dyn PieceSource>) -> Self {
        assert!(
            (MIN_BOARD_WIDTH..=MAX_BOARD_WIDTH).contains(&width)
                && (MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&height),
            "board dimensions {width}x{height} are outside the supported range"
        );

        let mut board = Self {
            width,
            height,
            cells: vec![vec![None; height]; width],
            active: None,
            state: BoardState::AwaitingSpawn,
            lines_cleared: 0,
            source,
            events: EventBus::new(),
        };
        board.spawn_piece();
        board
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn state(&self) -> BoardState {
        self.state
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Locked block at (x, y); `None` if empty or off the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<TetrominoType> {
        self.cells.get(x).and_then(|column| column.get(y)).copied().flatten()
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Places a locked block directly, for setting up positions.
    ///
    /// Returns `false` if (x, y) is off the grid or covered by the active piece.
    pub fn fill_cell(&mut self, x: usize, y: usize, kind: TetrominoType) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        if let Some(piece) = &self.active {
            if piece.cells().contains(&(x as i32, y as i32)) {
                return false;
            }
        }
        self.cells[x][y] = Some(kind);
        self.publish_snapshot();
        true
    }

    /// Opens a new event subscription.
    ///
    /// The receiver starts out holding the current snapshot, followed by
    /// [`BoardEvent::GameOver`] when the game has already ended.
    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        let mut initial = vec![BoardEvent::GridChanged(self.snapshot())];
        if self.state == BoardState::GameOver {
            initial.push(BoardEvent::GameOver);
        }
        self.events.subscribe(initial)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.to_string(),
            self.width,
            self.height,
            self.state,
            self.lines_cleared,
        )
    }

    #[must_use]
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            self.contains(x, y) && self.cells[x as usize][y as usize].is_none()
        })
    }

    pub fn move_left(&mut self) -> bool {
        self.try_replace(|piece| piece.moved(-1, 0))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_replace(|piece| piece.moved(1, 0))
    }

    /// Quarter turn clockwise. Blocked rotations are rejected outright.
    pub fn rotate(&mut self) -> bool {
        self.try_replace(Piece::rotated)
    }

    /// Moves the active piece one row down, locking it when it cannot move.
    pub fn down(&mut self) -> bool {
        if self.state != BoardState::PieceActive {
            return false;
        }
        self.step_down();
        self.publish_changes();
        true
    }

    /// Drops the active piece to its resting row and locks it in one step.
    pub fn hard_drop(&mut self) -> bool {
        if self.state != BoardState::PieceActive {
            return false;
        }
        let mut rows = 0;
        while let Step::Moved = self.step_down() {
            rows += 1;
        }
        debug!("Hard drop fell {rows} row(s)");
        self.publish_changes();
        true
    }

    /// Timer entry point: one automatic step down while a piece is in play.
    pub fn tick(&mut self) -> bool {
        if self.state != BoardState::PieceActive {
            trace!("Tick ignored while {}", self.state);
            return false;
        }
        self.down()
    }

    pub fn pause(&mut self) -> bool {
        if self.state != BoardState::PieceActive {
            return false;
        }
        self.state = BoardState::Paused;
        debug!("Board paused");
        self.publish_snapshot();
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != BoardState::Paused {
            return false;
        }
        self.state = BoardState::PieceActive;
        debug!("Board resumed");
        self.publish_snapshot();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            BoardState::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Empties the grid and starts over with a fresh piece. Accepted in every state.
    pub fn reset(&mut self) {
        for column in &mut self.cells {
            column.fill(None);
        }
        self.active = None;
        self.lines_cleared = 0;
        self.state = BoardState::AwaitingSpawn;
        info!("Board reset");
        self.spawn_piece();
        self.publish_changes();
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn try_replace(&mut self, transform: impl FnOnce(&Piece) -> Piece) -> bool {
        if self.state != BoardState::PieceActive {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };
        let candidate = transform(&piece);
        if !self.is_valid_position(&candidate) {
            trace!("Rejected move of {} to {:?}", candidate.kind, candidate.position);
            return false;
        }
        self.active = Some(candidate);
        self.publish_snapshot();
        true
    }

    fn step_down(&mut self) -> Step {
        let Some(piece) = self.active else {
            unreachable!("no active piece while {}", self.state);
        };
        let below = piece.moved(0, 1);
        if self.is_valid_position(&below) {
            self.active = Some(below);
            return Step::Moved;
        }

        self.lock_piece(&piece);
        let cleared = self.clear_lines();
        if cleared > 0 {
            self.lines_cleared += cleared as u32;
            debug!("Cleared {cleared} line(s), {} total", self.lines_cleared);
        }
        self.spawn_piece();
        Step::Locked
    }

    fn lock_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            assert!(
                self.contains(x, y),
                "locking {} with a cell outside the grid at ({x}, {y})",
                piece.kind
            );
            self.cells[x as usize][y as usize] = Some(piece.kind);
        }
        self.active = None;
        self.state = BoardState::AwaitingSpawn;
        debug!("Locked {} at {:?}", piece.kind, piece.position);
    }

    /// Removes every full row in one pass and returns how many were removed.
    fn clear_lines(&mut self) -> usize {
        let full_rows: Vec<usize> = (0..self.height)
            .filter(|&y| self.cells.iter().all(|column| column[y].is_some()))
            .collect();
        if full_rows.is_empty() {
            return 0;
        }

        for column in &mut self.cells {
            let mut compacted = vec![None; full_rows.len()];
            compacted.extend(
                column
                    .iter()
                    .enumerate()
                    .filter(|(y, _)| !full_rows.contains(y))
                    .map(|(_, cell)| *cell),
            );
            *column = compacted;
        }
        full_rows.len()
    }

    fn spawn_piece(&mut self) {
        debug_assert!(self.active.is_none());
        let kind = self.source.next_kind();
        let position = Position {
            x: (self.width as i32 - kind.box_size()) / 2,
            y: 0,
        };
        let piece = Piece::new(kind, position);
        assert!(
            piece.cells().iter().all(|&(x, y)| self.contains(x, y)),
            "{kind} spawned partly outside a {}x{} board",
            self.width,
            self.height
        );

        if self.is_valid_position(&piece) {
            self.active = Some(piece);
            self.state = BoardState::PieceActive;
            debug!("Spawned {kind} at {position:?}");
        } else {
            self.state = BoardState::GameOver;
            info!(
                "Game over: {kind} collided at spawn after {} line(s)",
                self.lines_cleared
            );
        }
    }

    fn publish_snapshot(&mut self) {
        let event = BoardEvent::GridChanged(self.snapshot());
        self.events.publish(&event);
    }

    // Snapshot first, then the terminal signal if this mutation ended the game
    fn publish_changes(&mut self) {
        self.publish_snapshot();
        if self.state == BoardState::GameOver {
            self.events.publish(&BoardEvent::GameOver);
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("state", &self.state)
            .field("active", &self.active)
            .field("lines_cleared", &self.lines_cleared)
            .field("subscribers", &self.events.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame: String = std::iter::once(FRAME_CORNER)
            .chain(std::iter::repeat_n(FRAME_EDGE, self.width))
            .chain(std::iter::once(FRAME_CORNER))
            .collect();
        let active = self.active.map(|piece| (piece.kind, piece.cells()));

        writeln!(f, "{frame}")?;
        for y in 0..self.height {
            let mut row = String::with_capacity(self.width + 2);
            row.push(ROW_BORDER);
            for x in 0..self.width {
                let falling = active.and_then(|(kind, cells)| {
                    cells
                        .contains(&(x as i32, y as i32))
                        .then_some(kind)
                });
                let block = self.cells[x][y].or(falling);
                row.push(block.map_or(EMPTY_CELL, TetrominoType::key));
            }
            row.push(ROW_BORDER);
            writeln!(f, "{row}")?;
        }
        write!(f, "{frame}")
    }
}
