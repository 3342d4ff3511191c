#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow potential wrapping when casting small box sizes and indices to i32
    clippy::cast_possible_wrap
)]

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::O,
        TetrominoType::S,
        TetrominoType::T,
        TetrominoType::Z,
    ];

    #[must_use]
    pub fn random_with(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(0..Self::ALL.len())]
    }

    /// Block-type key written into grid snapshots for this kind.
    #[must_use]
    pub fn key(self) -> char {
        match self {
            TetrominoType::I => 'I',
            TetrominoType::J => 'J',
            TetrominoType::L => 'L',
            TetrominoType::O => 'O',
            TetrominoType::S => 'S',
            TetrominoType::T => 'T',
            TetrominoType::Z => 'Z',
        }
    }

    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Side length of the square box the kind rotates in.
    #[must_use]
    pub fn box_size(self) -> i32 {
        match self {
            TetrominoType::I => 4,
            TetrominoType::O => 2,
            _ => 3,
        }
    }

    /// Cells of rotation 0, as (column, row) offsets inside the bounding box.
    #[must_use]
    pub fn get_blocks(self) -> [(i32, i32); 4] {
        match self {
            TetrominoType::I => [(0, 1), (1, 1), (2, 1), (3, 1)],
            TetrominoType::J => [(0, 0), (0, 1), (1, 1), (2, 1)],
            TetrominoType::L => [(2, 0), (0, 1), (1, 1), (2, 1)],
            TetrominoType::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            TetrominoType::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
            TetrominoType::T => [(1, 0), (0, 1), (1, 1), (2, 1)],
            TetrominoType::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
        }
    }
}

impl fmt::Display for TetrominoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The active tetromino: kind, rotation index and anchor on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: TetrominoType,
    pub rotation: usize,
    pub position: Position,
}

impl Piece {
    #[must_use]
    pub fn new(kind: TetrominoType, position: Position) -> Self {
        Self {
            kind,
            rotation: 0,
            position,
        }
    }

    /// Offsets of the occupied cells at the current rotation.
    #[must_use]
    pub fn get_blocks(&self) -> [(i32, i32); 4] {
        let size = self.kind.box_size();
        let mut blocks = self.kind.get_blocks();
        for _ in 0..self.rotation % 4 {
            for block in &mut blocks {
                // Clockwise quarter turn inside the box
                *block = (size - 1 - block.1, block.0);
            }
        }
        blocks
    }

    /// Absolute board coordinates of the occupied cells.
    #[must_use]
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.get_blocks()
            .map(|(dx, dy)| (self.position.x + dx, self.position.y + dy))
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }
}

/// Chooses the kind of every spawned piece.
pub trait PieceSource: Send + Sync {
    fn next_kind(&mut self) -> TetrominoType;
}

/// Uniform selection over the seven kinds.
pub struct RandomSource {
    rng: fastrand::Rng,
}

impl RandomSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSource for RandomSource {
    fn next_kind(&mut self) -> TetrominoType {
        TetrominoType::random_with(&mut self.rng)
    }
}

/// Replays a fixed list of kinds, wrapping around at the end.
pub struct SequenceSource {
    kinds: Vec<TetrominoType>,
    next: usize,
}

impl SequenceSource {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: Vec<TetrominoType>) -> Self {
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, next: 0 }
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> TetrominoType {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}
