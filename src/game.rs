use std::time::Duration;

use crate::collision::collides;
use crate::config::{ConfigError, GameConfig};
use crate::grid::{CellState, Grid};
use crate::piece::{Piece, PieceProvider, RandomPieceProvider};
use crate::score::ScoreTracker;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Playing,
    GameOver,
}

/// What a single command did, for the host to react to after each call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Moved,
    Rotated,
    /// The move or rotation collided and was reverted.
    Blocked,
    /// The piece locked and a fresh one spawned.
    Locked { lines_cleared: u32 },
    /// The piece locked and the next one could not spawn.
    GameOver,
    /// Command ignored because the game is over.
    Inactive,
    Restarted,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceMoved,
    PieceRotated,
    PieceLocked,
    LinesCleared(u32),
    StatusChanged(&'static str),
    LevelUp(u32),
    GameRestarted,
    GameOver,
}

// ============================================================================
// Game
// ============================================================================

pub struct Game {
    config: GameConfig,
    grid: Grid,
    current_piece: Piece,
    scores: ScoreTracker,
    state: GameState,
    piece_provider: Box<dyn PieceProvider + Send>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_provider(Box::new(RandomPieceProvider::new()))
    }

    pub fn with_provider(provider: Box<dyn PieceProvider + Send>) -> Self {
        let config = GameConfig::default();
        let grid = Grid::new(config.width, config.height);
        Self::assemble(config, grid, provider)
    }

    pub fn with_config(
        config: GameConfig,
        provider: Box<dyn PieceProvider + Send>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        Ok(Self::assemble(config, grid, provider))
    }

    /// Starts from a prepared board and piece. Later spawns use `provider`.
    pub fn with_grid(grid: Grid, current_piece: Piece, provider: Box<dyn PieceProvider + Send>) -> Self {
        let config = GameConfig::with_size(grid.width(), grid.height());
        Self {
            config,
            grid,
            current_piece,
            scores: ScoreTracker::new(),
            state: GameState::Playing,
            piece_provider: provider,
            events: Vec::new(),
        }
    }

    fn assemble(config: GameConfig, grid: Grid, mut provider: Box<dyn PieceProvider + Send>) -> Self {
        let current_piece = Piece::spawn(provider.next_piece(), config.width);
        Self {
            config,
            ..Self::with_grid(grid, current_piece, provider)
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn status(&self) -> &'static str {
        self.scores.status()
    }

    pub fn level(&self) -> u32 {
        self.scores.level()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.scores.lines_cleared()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// How long the host should wait between gravity ticks at the current level.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms(self.level()))
    }

    /// Locked cells with the falling piece overlaid, clipped to the board.
    pub fn render_grid(&self) -> Vec<Vec<CellState>> {
        let mut visual_grid = self.grid.rows().to_vec();
        let (width, height) = (self.grid.width() as i32, self.grid.height() as i32);

        for (x, y) in self.current_piece.blocks() {
            if (0..width).contains(&x) && (0..height).contains(&y) {
                visual_grid[y as usize][x as usize] = CellState::Filled(self.current_piece.kind);
            }
        }

        visual_grid
    }

    /// Takes and clears all pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Gravity step.
    pub fn tick(&mut self) -> Outcome {
        if self.is_game_over() {
            return Outcome::Inactive;
        }
        match self.try_move(0, 1) {
            Outcome::Blocked => self.lock_and_spawn(),
            outcome => outcome,
        }
    }

    pub fn soft_drop(&mut self) -> Outcome {
        self.tick()
    }

    pub fn move_left(&mut self) -> Outcome {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> Outcome {
        self.shift(1)
    }

    /// Clockwise, in place. Rejected outright on collision.
    pub fn rotate(&mut self) -> Outcome {
        if self.is_game_over() {
            return Outcome::Inactive;
        }
        let rotated = self.current_piece.rotated();
        if collides(&self.grid, &rotated) {
            return Outcome::Blocked;
        }
        self.current_piece = rotated;
        self.events.push(GameEvent::PieceRotated);
        Outcome::Rotated
    }

    pub fn restart(&mut self) -> Outcome {
        self.grid.reset();
        self.scores.reset();
        self.events.clear();
        self.current_piece = Piece::spawn(self.piece_provider.next_piece(), self.config.width);
        self.state = GameState::Playing;
        self.events.push(GameEvent::GameRestarted);
        Outcome::Restarted
    }

    fn shift(&mut self, dx: i32) -> Outcome {
        if self.is_game_over() {
            return Outcome::Inactive;
        }
        self.try_move(dx, 0)
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> Outcome {
        let moved = self.current_piece.moved(dx, dy);
        if collides(&self.grid, &moved) {
            return Outcome::Blocked;
        }
        self.current_piece = moved;
        self.events.push(GameEvent::PieceMoved);
        Outcome::Moved
    }

    fn lock_piece(&mut self) {
        let kind = self.current_piece.kind;
        for (x, y) in self.current_piece.blocks() {
            // Cells still above the top edge have nowhere to go.
            self.grid.set(x, y, kind);
        }
        self.events.push(GameEvent::PieceLocked);
    }

    fn lock_and_spawn(&mut self) -> Outcome {
        self.lock_piece();

        let lines = self.grid.clear_full_rows();
        if lines > 0 {
            self.events.push(GameEvent::LinesCleared(lines));
            let update = self.scores.on_lines_cleared(lines);
            if update.status_changed {
                self.events.push(GameEvent::StatusChanged(self.scores.status()));
            }
            if update.level_changed {
                self.events.push(GameEvent::LevelUp(self.scores.level()));
            }
        }

        self.current_piece = Piece::spawn(self.piece_provider.next_piece(), self.config.width);
        if collides(&self.grid, &self.current_piece) {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
            return Outcome::GameOver;
        }

        Outcome::Locked { lines_cleared: lines }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;
    use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use crate::piece::{SequencePieceProvider, TetrominoType};

    pub fn empty_grid() -> Grid {
        Grid::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn fill_row(grid: &mut Grid, y: usize) {
        for x in 0..grid.width() {
            grid.set(x as i32, y as i32, TetrominoType::T);
        }
    }

    pub fn fill_row_with_gap(grid: &mut Grid, y: usize, gap_x: usize) {
        for x in (0..grid.width()).filter(|&x| x != gap_x) {
            grid.set(x as i32, y as i32, TetrominoType::T);
        }
    }

    pub fn sequence(pieces: &[TetrominoType]) -> Box<dyn PieceProvider + Send> {
        Box::new(SequencePieceProvider::new(pieces.to_vec()))
    }

    /// Default-sized game whose every spawn is `kind`.
    pub fn game_of(kind: TetrominoType) -> Game {
        Game::with_provider(sequence(&[kind]))
    }
}
