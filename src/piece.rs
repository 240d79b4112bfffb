use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest bounding box any shape may occupy.
pub const MAX_SHAPE_SIZE: usize = 4;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum TetrominoType {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::L,
        TetrominoType::J,
        TetrominoType::S,
        TetrominoType::Z,
    ];

    /// Spawn orientation.
    pub fn shape(&self) -> Shape {
        let pattern: &[&str] = match self {
            TetrominoType::I => &["####"],
            TetrominoType::O => &["##", "##"],
            TetrominoType::T => &[".#.", "###"],
            TetrominoType::L => &["#..", "###"],
            TetrominoType::J => &["..#", "###"],
            TetrominoType::S => &[".##", "##."],
            TetrominoType::Z => &["##.", ".##"],
        };
        Shape::from_pattern(pattern)
    }
}

/// Boolean occupancy matrix of at most 4×4 cells.
///
/// Cells outside `rows × cols` are always empty, so two shapes compare equal
/// exactly when their bounding boxes and occupied cells match.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from row slices. Returns None for empty, ragged or
    /// oversized input.
    pub fn from_rows(rows: &[&[bool]]) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0
            || cols > MAX_SHAPE_SIZE
            || rows.len() > MAX_SHAPE_SIZE
            || rows.iter().any(|row| row.len() != cols)
        {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            cells[r][..cols].copy_from_slice(row);
        }
        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    // Patterns are fixed literals in this module, always within bounds.
    fn from_pattern(pattern: &[&str]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, line) in pattern.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                cells[r][c] = ch == '#';
            }
        }
        Self {
            rows: pattern.len(),
            cols: pattern[0].len(),
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row][col]
    }

    /// Occupied cells as `(col, row)` offsets from the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i32, r as i32))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Transpose then reverse each row: `new[c][rows-1-r] = old[r][c]`.
    pub fn rotated_clockwise(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[c][self.rows - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: TetrominoType,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Centered horizontally on a board of `width` columns, top row.
    pub fn spawn(kind: TetrominoType, width: usize) -> Self {
        let shape = kind.shape();
        let x = (width / 2) as i32 - (shape.cols() / 2) as i32;
        Self::new_at(kind, x, 0)
    }

    pub fn new_at(kind: TetrominoType, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x,
            y,
        }
    }

    /// Absolute grid coordinates of every occupied cell.
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub(crate) fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub(crate) fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            ..*self
        }
    }
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> TetrominoType;
}

/// Uniform draw over the seven kinds.
pub struct RandomPieceProvider {
    rng: StdRng,
}

impl RandomPieceProvider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPieceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceProvider for RandomPieceProvider {
    fn next_piece(&mut self) -> TetrominoType {
        TetrominoType::ALL[self.rng.gen_range(0..TetrominoType::ALL.len())]
    }
}

/// Cycles through a fixed list. Falls back to `O` when the list is empty.
pub struct SequencePieceProvider {
    pieces: Vec<TetrominoType>,
    index: usize,
}

impl SequencePieceProvider {
    pub fn new(pieces: Vec<TetrominoType>) -> Self {
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> TetrominoType {
        if self.pieces.is_empty() {
            return TetrominoType::O;
        }
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}
