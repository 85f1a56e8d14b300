/// Points for a single-row clear; every extra simultaneous row doubles the award.
const BASE_LINE_SCORE: u32 = 100;

/// Points awarded for clearing `rows` rows with a single anchor.
///
/// `100 × 2^(rows − 1)`: 1 → 100, 2 → 200, 3 → 400, 4 → 800. Zero rows score nothing.
#[must_use]
pub fn line_clear_score(rows: usize) -> u32 {
    match rows {
        0 => 0,
        n => BASE_LINE_SCORE << (n - 1).min(31),
    }
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// # Example
///
/// ```
/// use termtris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: u32,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Returns the total number of pieces that have been anchored.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of anchors by number of rows cleared.
    ///
    /// Index 0 counts anchors that cleared nothing, index 4 counts four-row clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece is anchored and returns the points awarded.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> u32 {
        let points = line_clear_score(cleared_lines);
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score = self.score.saturating_add(points);
        points
    }
}
