#![warn(clippy::all, clippy::pedantic)]

// Default board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Accepted board dimensions; every kind must fit its bounding box at spawn
pub const MIN_BOARD_WIDTH: usize = 4;
pub const MIN_BOARD_HEIGHT: usize = 4;
pub const MAX_BOARD_WIDTH: usize = 64;
pub const MAX_BOARD_HEIGHT: usize = 64;

// Game timing
pub const DROP_INTERVAL_MS: u64 = 1000; // Automatic drop every second
pub const MIN_DROP_INTERVAL_MS: u64 = 10;

// Main loop pacing
pub const RENDER_INTERVAL_MS: u64 = 33; // ~30 FPS
pub const INPUT_POLL_MS: u64 = 5;

// Snapshot text layout
pub const EMPTY_CELL: char = ' ';
pub const ROW_BORDER: char = '|';
pub const FRAME_CORNER: char = '+';
pub const FRAME_EDGE: char = '-';
pub const HEADER_ROWS: usize = 1;

// Terminal cell size of one board cell
pub const CELL_WIDTH: u16 = 2;
pub const CELL_HEIGHT: u16 = 1;
