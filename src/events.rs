#![warn(clippy::all, clippy::pedantic)]

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::trace;

use crate::board::BoardState;
use crate::game::{EMPTY_CELL, HEADER_ROWS, ROW_BORDER};

/// Notifications published by the board to its subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    GridChanged(Snapshot),
    GameOver,
}

/// Immutable picture of the board at one point in time.
///
/// `text` is row-major with `'\n'` between rows. The first [`HEADER_ROWS`]
/// lines are the top frame, then one `|cells|` line per grid row, then the
/// bottom frame. Empty cells are spaces, every other cell is a block key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    text: String,
    width: usize,
    height: usize,
    state: BoardState,
    lines_cleared: u32,
}

impl Snapshot {
    #[must_use]
    pub fn new(
        text: String,
        width: usize,
        height: usize,
        state: BoardState,
        lines_cleared: u32,
    ) -> Self {
        Self {
            text,
            width,
            height,
            state,
            lines_cleared,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
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
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Byte offset of the first playable row inside [`Snapshot::text`].
    #[must_use]
    pub fn playable_offset(&self) -> usize {
        // Each frame line is the corner, `width` edges, the corner and '\n'
        (self.width + 3) * HEADER_ROWS
    }

    /// Cell characters of each playable row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.text
            .get(self.playable_offset()..)
            .unwrap_or_default()
            .split('\n')
            .take(self.height)
            .map(|line| {
                line.strip_prefix(ROW_BORDER)
                    .and_then(|line| line.strip_suffix(ROW_BORDER))
                    .unwrap_or(line)
            })
    }

    /// Block key at (x, y), `None` for an empty cell or a position off the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        self.rows()
            .nth(y)
            .and_then(|row| row.chars().nth(x))
            .filter(|c| *c != EMPTY_CELL)
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows()
            .map(|row| row.chars().filter(|c| *c != EMPTY_CELL).count())
            .sum()
    }
}

/// Fan-out of board events to channel subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    senders: Vec<Sender<BoardEvent>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber and primes it with `initial` events.
    pub fn subscribe(
        &mut self,
        initial: impl IntoIterator<Item = BoardEvent>,
    ) -> Receiver<BoardEvent> {
        let (sender, receiver) = unbounded();
        for event in initial {
            // The receiver is alive in this scope, so the send cannot fail
            let _ = sender.send(event);
        }
        self.senders.push(sender);
        receiver
    }

    /// Delivers `event` to every live subscriber before returning.
    pub fn publish(&mut self, event: &BoardEvent) {
        self.senders.retain(|sender| sender.send(event.clone()).is_ok());
        trace!(
            "Published {} to {} subscriber(s)",
            match event {
                BoardEvent::GridChanged(_) => "grid snapshot",
                BoardEvent::GameOver => "game over",
            },
            self.senders.len()
        );
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}
