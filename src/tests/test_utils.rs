use crossbeam_channel::Receiver;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;

use crate::app::App;
use crate::board::Board;
use crate::components::{SequenceSource, TetrominoType};
use crate::config::GameSettings;
use crate::events::BoardEvent;

/// Creates a board that spawns `kinds` in order, cycling.
#[must_use]
pub fn sequence_board(width: usize, height: usize, kinds: &[TetrominoType]) -> Board {
    Board::new(width, height, Box::new(SequenceSource::new(kinds.to_vec())))
}

/// Creates a default-sized app whose pieces come from `kinds`.
#[must_use]
pub fn create_test_app(kinds: &[TetrominoType]) -> App {
    App::with_source(
        GameSettings::default(),
        Box::new(SequenceSource::new(kinds.to_vec())),
    )
}

// Fill row `y` with `kind`, leaving the listed columns empty
pub fn fill_row_except(board: &mut Board, y: usize, kind: TetrominoType, gaps: &[usize]) {
    for x in 0..board.width() {
        if !gaps.contains(&x) {
            assert!(board.fill_cell(x, y, kind), "could not fill ({x}, {y})");
        }
    }
}

// Collect everything currently queued on a subscription
#[must_use]
pub fn drain(events: &Receiver<BoardEvent>) -> Vec<BoardEvent> {
    events.try_iter().collect()
}

#[must_use]
pub fn game_over_count(events: &[BoardEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, BoardEvent::GameOver))
        .count()
}

/// Asserts the active piece lies on the board and off every locked cell.
pub fn assert_active_piece_legal(board: &Board) {
    if let Some(piece) = board.active_piece() {
        for (x, y) in piece.cells() {
            assert!(
                x >= 0 && y >= 0 && (x as usize) < board.width() && (y as usize) < board.height(),
                "cell ({x}, {y}) of {piece:?} is off the board"
            );
            assert!(
                board.cell(x as usize, y as usize).is_none(),
                "cell ({x}, {y}) of {piece:?} overlaps a locked block"
            );
        }
    }
}

#[must_use]
pub fn key_press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

// Buffer contents as one line of text per terminal row
#[must_use]
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
