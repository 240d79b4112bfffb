use std::fmt;

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 20;

// Timing (in milliseconds)
pub const BASE_TICK_MS: u64 = 1000;
pub const MIN_TICK_MS: u64 = 100;

/// Smallest board every tetromino fits on at spawn.
pub const MIN_DIMENSION: usize = 4;
/// Largest board the terminal host can lay out.
pub const MAX_DIMENSION: usize = 256;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub base_tick_ms: u64,
    pub min_tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            base_tick_ms: BASE_TICK_MS,
            min_tick_ms: MIN_TICK_MS,
        }
    }
}

impl GameConfig {
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_DIMENSION {
            return Err(ConfigError::BoardTooNarrow(self.width));
        }
        if self.height < MIN_DIMENSION {
            return Err(ConfigError::BoardTooShort(self.height));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_tick_ms == 0 || self.min_tick_ms > self.base_tick_ms {
            return Err(ConfigError::TickBounds {
                base: self.base_tick_ms,
                min: self.min_tick_ms,
            });
        }
        Ok(())
    }

    /// Gravity interval for `level`: `base / level`, never below the floor.
    pub fn tick_interval_ms(&self, level: u32) -> u64 {
        (self.base_tick_ms / u64::from(level.max(1))).max(self.min_tick_ms)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfigError {
    BoardTooNarrow(usize),
    BoardTooShort(usize),
    BoardTooLarge { width: usize, height: usize },
    TickBounds { base: u64, min: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooNarrow(w) => {
                write!(f, "board width {w} is below the minimum of {MIN_DIMENSION}")
            }
            ConfigError::BoardTooShort(h) => {
                write!(f, "board height {h} is below the minimum of {MIN_DIMENSION}")
            }
            ConfigError::BoardTooLarge { width, height } => {
                write!(f, "board {width}x{height} exceeds the maximum of {MAX_DIMENSION}x{MAX_DIMENSION}")
            }
            ConfigError::TickBounds { base, min } => {
                write!(f, "tick floor {min}ms must be non-zero and not exceed base {base}ms")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
