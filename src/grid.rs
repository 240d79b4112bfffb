use crate::piece::TetrominoType;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    Empty,
    Filled(TetrominoType),
}

impl CellState {
    pub fn is_filled(&self) -> bool {
        matches!(self, CellState::Filled(_))
    }
}

/// Locked cells, row-major: `rows[y][x]`. Dimensions are fixed at construction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: Vec<Vec<CellState>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![CellState::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<CellState>] {
        &self.rows
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((x, y))
    }

    /// Returns None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<CellState> {
        self.index(x, y).map(|(x, y)| self.rows[y][x])
    }

    /// Out-of-range coordinates count as occupied.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, |cell| cell.is_filled())
    }

    /// Writes a filled cell. Returns false (and writes nothing) if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, kind: TetrominoType) -> bool {
        match self.index(x, y) {
            Some((x, y)) => {
                self.rows[y][x] = CellState::Filled(kind);
                true
            }
            None => false,
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(CellState::is_filled))
    }

    pub fn filled_in_row(&self, y: usize) -> usize {
        self.rows
            .get(y)
            .map_or(0, |row| row.iter().filter(|cell| cell.is_filled()).count())
    }

    pub fn filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_filled()).count()
    }

    /// Removes every full row and pads the top with empty rows.
    ///
    /// Surviving rows keep their relative order and the row count never
    /// changes. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let before = self.rows.len();
        self.rows.retain(|row| !row.iter().all(CellState::is_filled));
        let cleared = before - self.rows.len();

        let mut rows = vec![vec![CellState::Empty; self.width]; cleared];
        rows.append(&mut self.rows);
        self.rows = rows;

        cleared as u32
    }

    pub fn reset(&mut self) {
        for cell in self.rows.iter_mut().flatten() {
            *cell = CellState::Empty;
        }
    }
}
