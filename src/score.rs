//! Line-clear bonuses, status labels and the score-derived level.

// Scoring
pub const SCORE_SINGLE: u32 = 100;
pub const SCORE_DOUBLE: u32 = 300;
pub const SCORE_TRIPLE: u32 = 500;
pub const SCORE_TETRIS: u32 = 800;
/// Flat bonus for anything beyond four rows at once.
pub const SCORE_OVERFLOW: u32 = 1000;

pub const POINTS_PER_LEVEL: u32 = 1000;

/// `(threshold, label)`, ascending by threshold.
pub const STATUS_LEVELS: [(u32, &str); 8] = [
    (0, "Noob [Baby]"),
    (50, "Beginner [School]"),
    (100, "Intermediate [Controller]"),
    (200, "Skilled [Cool]"),
    (300, "Advanced [Strong]"),
    (500, "Expert [Rocket]"),
    (800, "Master [Trophy]"),
    (1000, "Tetris God [Star]"),
];

pub fn line_bonus(lines: u32) -> u32 {
    match lines {
        0 => 0,
        1 => SCORE_SINGLE,
        2 => SCORE_DOUBLE,
        3 => SCORE_TRIPLE,
        4 => SCORE_TETRIS,
        _ => SCORE_OVERFLOW,
    }
}

/// Last label whose threshold the score has reached.
pub fn status_for(score: u32) -> &'static str {
    STATUS_LEVELS
        .iter()
        .take_while(|(threshold, _)| *threshold <= score)
        .last()
        .map_or(STATUS_LEVELS[0].1, |&(_, label)| label)
}

pub fn level_for(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Result of crediting one lock's worth of cleared rows.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ScoreUpdate {
    pub bonus: u32,
    pub status_changed: bool,
    pub level_changed: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ScoreTracker {
    score: u32,
    lines_cleared: u32,
    status: &'static str,
    level: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines_cleared: 0,
            status: status_for(0),
            level: level_for(0),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn status(&self) -> &'static str {
        self.status
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn on_lines_cleared(&mut self, lines: u32) -> ScoreUpdate {
        if lines == 0 {
            return ScoreUpdate::default();
        }

        let bonus = line_bonus(lines);
        self.score = self.score.saturating_add(bonus);
        self.lines_cleared = self.lines_cleared.saturating_add(lines);

        let status = status_for(self.score);
        let level = level_for(self.score);
        let update = ScoreUpdate {
            bonus,
            status_changed: status != self.status,
            level_changed: level != self.level,
        };
        self.status = status;
        self.level = level;
        update
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}
