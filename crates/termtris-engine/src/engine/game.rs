use std::time::Duration;

use log::{debug, info};

use crate::{
    Board, ConfigError, FallingPiece, GameConfig, GameStats, PieceBag, PieceKind, SpeedCurve,
    Vector,
};

use super::{
    event::{Dispatch, GameEvent},
    snapshot::{GameSnapshot, LineClear, PiecePreview},
};

/// Lifecycle of a game.
///
/// ```text
/// Playing ⇄ Paused
///    ↓
///  Over   (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Playing,
    Paused,
    Over,
}

/// Horizontal or downward translation of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    fn delta(self) -> Vector {
        match self {
            Direction::Left => Vector::LEFT,
            Direction::Right => Vector::RIGHT,
            Direction::Down => Vector::DOWN,
        }
    }
}

/// The authoritative state of one play session.
///
/// `Game` ties the [`Board`] to the [`PieceBag`], keeps the lookahead piece, the
/// score and the gravity interval, and enforces the pause/over state machine. It is a
/// plain value: whoever owns it (the event loop) is the only one mutating it.
///
/// # Example
///
/// ```
/// use termtris_engine::{Game, GameConfig, GameEvent};
///
/// let mut game = Game::new(&GameConfig::default()).unwrap();
/// game.handle(GameEvent::MoveLeft);
/// game.handle(GameEvent::QuickDrop);
/// assert_eq!(game.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    bag: PieceBag,
    next_piece: PieceKind,
    state: GameState,
    stats: GameStats,
    speed: SpeedCurve,
    gravity_interval: Duration,
    line_clear: Option<LineClear>,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut bag = config.seed.map_or_else(PieceBag::new, PieceBag::with_seed);
        let first = bag.draw();
        let board = Board::new(config.width, config.height, FallingPiece::spawn(first));
        let game = Self::with_board(board, bag, config.speed);
        info!(
            "new {}x{} game, first piece {first:?}, next {:?}",
            config.width, config.height, game.next_piece
        );
        Ok(game)
    }

    /// Starts a game on a prepared board; its falling piece is kept as the current one.
    ///
    /// The lookahead piece is drawn from `bag`.
    #[must_use]
    pub fn with_board(board: Board, mut bag: PieceBag, speed: SpeedCurve) -> Self {
        let next_piece = bag.draw();
        let state = if board.current_piece_in_collision() {
            GameState::Over
        } else {
            GameState::Playing
        };
        Self {
            board,
            bag,
            next_piece,
            state,
            stats: GameStats::new(),
            speed,
            gravity_interval: speed.interval_for(0),
            line_clear: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next_piece
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.stats.score()
    }

    /// Time between two gravity ticks at the current score.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        self.gravity_interval
    }

    /// Takes the rows cleared by the latest anchor, if they have not been taken yet.
    pub fn take_line_clear(&mut self) -> Option<LineClear> {
        self.line_clear.take()
    }

    /// Applies one event under the pause/over rules.
    ///
    /// - `Quit` is always honoured
    /// - once the game is over every other event is ignored
    /// - while paused only `PauseToggle` and `Redraw` have an effect
    pub fn handle(&mut self, event: GameEvent) -> Dispatch {
        match (self.state, event) {
            (_, GameEvent::Quit) => return Dispatch::Quit,
            (GameState::Over, _) => return Dispatch::Ignored,
            (_, GameEvent::PauseToggle) => self.toggle_pause(),
            (_, GameEvent::Redraw) => return Dispatch::Redraw,
            (GameState::Paused, _) => return Dispatch::Ignored,
            (GameState::Playing, GameEvent::MoveLeft) => self.move_piece(Direction::Left),
            (GameState::Playing, GameEvent::MoveRight) => self.move_piece(Direction::Right),
            (GameState::Playing, GameEvent::MoveDown) => self.move_piece(Direction::Down),
            (GameState::Playing, GameEvent::RotateCw) => self.rotate_cw(),
            (GameState::Playing, GameEvent::RotateCcw) => self.rotate_ccw(),
            (GameState::Playing, GameEvent::Rotate180) => self.rotate_180(),
            (GameState::Playing, GameEvent::QuickDrop) => self.quick_drop(),
        }
        Dispatch::Updated
    }

    /// Flips between playing and paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            GameState::Over => GameState::Over,
        };
        debug!("pause toggled, now {:?}", self.state);
    }

    /// Translates the falling piece one cell.
    ///
    /// A blocked downward move anchors the piece; blocked sideways moves do nothing.
    pub fn move_piece(&mut self, direction: Direction) {
        if !self.state.is_playing() {
            return;
        }
        let moved = self.board.move_if_possible(direction.delta());
        if direction == Direction::Down && !moved {
            self.anchor();
        }
    }

    /// Drops the piece as far as it goes and anchors it.
    pub fn quick_drop(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        while self.board.move_if_possible(Vector::DOWN) {}
        self.anchor();
    }

    pub fn rotate_cw(&mut self) {
        self.try_rotate(Board::rotate, Board::unrotate);
    }

    pub fn rotate_ccw(&mut self) {
        self.try_rotate(Board::unrotate, Board::rotate);
    }

    pub fn rotate_180(&mut self) {
        self.try_rotate(Board::rotate_half, Board::rotate_half);
    }

    // Optimistic rotation: apply, then roll back if the new state collides.
    fn try_rotate(&mut self, apply: fn(&mut Board), revert: fn(&mut Board)) {
        if !self.state.is_playing() {
            return;
        }
        apply(&mut self.board);
        if self.board.current_piece_in_collision() {
            revert(&mut self.board);
        }
    }

    /// Locks the falling piece, clears full rows, scores and brings in the next piece.
    fn anchor(&mut self) {
        self.board.merge_current_piece();

        let rows = self.board.cleared_rows();
        if !rows.is_empty() {
            self.line_clear = Some(LineClear::new(rows.clone(), self.board.settled_grid()));
        }
        let points = self.stats.complete_piece_drop(rows.len());
        if !rows.is_empty() {
            self.board.clear_rows();
            debug!(
                "anchored {}, cleared rows {rows:?} for {points} points (score {})",
                self.board.falling_piece(),
                self.stats.score()
            );
        }

        self.gravity_interval = self.speed.interval_for(self.stats.score());
        self.spawn_next();
    }

    /// Puts the lookahead piece into play and draws a new lookahead.
    ///
    /// Ends the game if the new piece collides where it spawns.
    fn spawn_next(&mut self) {
        self.board
            .set_falling_piece(FallingPiece::spawn(self.next_piece));
        self.next_piece = self.bag.draw();
        if self.board.current_piece_in_collision() {
            self.state = GameState::Over;
            info!(
                "game over: score {}, {} pieces, {} lines",
                self.stats.score(),
                self.stats.completed_pieces(),
                self.stats.total_cleared_lines()
            );
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            grid: self.board.render_grid(),
            next: PiecePreview::new(self.next_piece),
            stats: self.stats.clone(),
            bag_count: self.bag.bag_count(),
            paused: self.state.is_paused(),
            over: self.state.is_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Block, PieceColor, PieceSeed};

    const F: Block = Block::Filled(PieceColor::Green);

    fn seed() -> PieceSeed {
        "00112233445566778899aabbccddeeff".parse().unwrap()
    }

    fn game_with(board: Board) -> Game {
        Game::with_board(board, PieceBag::with_seed(seed()), SpeedCurve::default())
    }

    /// Board whose bottom `rows` rows are full except column 0, with a vertical I
    /// piece ready to drop into that column.
    fn well_board(rows: i32) -> Board {
        let piece = FallingPiece::new(PieceKind::I, 1, Vector::new(-1, 0));
        let mut board = Board::new(10, 20, piece);
        for y in 20 - rows..20 {
            for x in 1..10 {
                board.set_block(Vector::new(x, y), F);
            }
        }
        board
    }

    #[test]
    fn test_new_game_is_playing() {
        let config = GameConfig {
            seed: Some(seed()),
            ..GameConfig::default()
        };
        let game = Game::new(&config).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.gravity_interval(), Duration::from_millis(800));
        assert_eq!(game.board().falling_piece().rotation(), 0);
    }

    #[test]
    fn test_new_game_rejects_invalid_config() {
        let config = GameConfig {
            width: 3,
            ..GameConfig::default()
        };
        assert!(Game::new(&config).is_err());
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let config = GameConfig {
            seed: Some(seed()),
            ..GameConfig::default()
        };
        let mut a = Game::new(&config).unwrap();
        let mut b = Game::new(&config).unwrap();
        for _ in 0..10 {
            assert_eq!(a.next_piece(), b.next_piece());
            a.handle(GameEvent::QuickDrop);
            b.handle(GameEvent::QuickDrop);
        }
    }

    #[test]
    fn test_scoring_table_by_construction() {
        for (rows, expected) in [(1, 100), (2, 200), (3, 400), (4, 800)] {
            let mut game = game_with(well_board(rows));
            assert_eq!(game.handle(GameEvent::QuickDrop), Dispatch::Updated);
            assert_eq!(game.score(), expected, "clearing {rows} rows");
            assert_eq!(game.stats().total_cleared_lines(), usize::try_from(rows).unwrap());

            let clear = game.take_line_clear().unwrap();
            let expected_rows: Vec<usize> = (20 - usize::try_from(rows).unwrap()..20).collect();
            assert_eq!(clear.rows(), expected_rows.as_slice());
            assert!(game.take_line_clear().is_none());
        }
    }

    #[test]
    fn test_remaining_cells_shift_after_clear() {
        let mut game = game_with(well_board(2));
        game.handle(GameEvent::QuickDrop);
        // The I occupied rows 16..=19 in column 0; rows 18 and 19 were cleared.
        let board = game.board();
        assert_eq!(board.block_at(Vector::new(0, 19)), Block::Filled(PieceColor::Cyan));
        assert_eq!(board.block_at(Vector::new(0, 18)), Block::Filled(PieceColor::Cyan));
        assert!(board.block_at(Vector::new(0, 17)).is_empty());
        assert!(board.block_at(Vector::new(1, 19)).is_empty());
    }

    #[test]
    fn test_anchor_without_clear_scores_nothing() {
        let mut game = game_with(well_board(0));
        game.handle(GameEvent::QuickDrop);
        assert_eq!(game.score(), 0);
        assert_eq!(game.stats().completed_pieces(), 1);
        assert!(game.take_line_clear().is_none());
    }

    #[test]
    fn test_gravity_interval_recomputed_at_anchor() {
        let mut game = game_with(well_board(4));
        game.handle(GameEvent::QuickDrop);
        assert_eq!(game.gravity_interval(), Duration::from_millis(800 - 800 / 5));
    }

    #[test]
    fn test_failed_move_down_anchors() {
        let mut game = game_with(well_board(0));
        for _ in 0..16 {
            game.handle(GameEvent::MoveDown);
        }
        assert_eq!(game.stats().completed_pieces(), 0);
        assert_eq!(game.board().falling_piece().position(), Vector::new(-1, 16));

        game.handle(GameEvent::MoveDown);
        assert_eq!(game.stats().completed_pieces(), 1);
        assert_eq!(game.board().falling_piece().position(), game.board().falling_piece().kind().spawn_offset());
    }

    #[test]
    fn test_blocked_side_move_is_absorbed() {
        let mut game = game_with(well_board(0));
        let before = *game.board().falling_piece();
        assert_eq!(game.handle(GameEvent::MoveLeft), Dispatch::Updated);
        assert_eq!(*game.board().falling_piece(), before);
        assert_eq!(game.stats().completed_pieces(), 0);
    }

    #[test]
    fn test_rotation_reverts_on_collision() {
        // Vertical I against the left wall cannot turn horizontal.
        let mut game = game_with(well_board(0));
        game.handle(GameEvent::RotateCw);
        assert_eq!(game.board().falling_piece().rotation(), 1);
        game.handle(GameEvent::RotateCcw);
        assert_eq!(game.board().falling_piece().rotation(), 1);
        game.handle(GameEvent::Rotate180);
        assert_eq!(game.board().falling_piece().rotation(), 1);

        game.handle(GameEvent::MoveRight);
        game.handle(GameEvent::RotateCw);
        assert_eq!(game.board().falling_piece().rotation(), 0);
    }

    #[test]
    fn test_rotate_180() {
        let piece = FallingPiece::new(PieceKind::T, 0, Vector::new(3, 5));
        let mut game = game_with(Board::new(10, 20, piece));
        game.handle(GameEvent::Rotate180);
        assert_eq!(game.board().falling_piece().rotation(), 2);
        game.handle(GameEvent::RotateCcw);
        assert_eq!(game.board().falling_piece().rotation(), 1);
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let piece = FallingPiece::new(PieceKind::O, 0, Vector::new(0, 18));
        let mut board = Board::new(10, 20, piece);
        for y in 0..2 {
            for x in 3..7 {
                board.set_block(Vector::new(x, y), F);
            }
        }
        let mut game = game_with(board);
        assert_eq!(game.handle(GameEvent::QuickDrop), Dispatch::Updated);
        assert!(game.is_over());
        assert_eq!(game.score(), 0);

        let grid = game.board().settled_grid();
        let falling = *game.board().falling_piece();
        for event in [
            GameEvent::MoveLeft,
            GameEvent::MoveDown,
            GameEvent::QuickDrop,
            GameEvent::RotateCw,
            GameEvent::PauseToggle,
            GameEvent::Redraw,
        ] {
            assert_eq!(game.handle(event), Dispatch::Ignored);
        }
        assert_eq!(game.board().settled_grid(), grid);
        assert_eq!(*game.board().falling_piece(), falling);
        assert_eq!(game.score(), 0);
        assert!(game.is_over());
        assert_eq!(game.handle(GameEvent::Quit), Dispatch::Quit);
    }

    #[test]
    fn test_paused_game_ignores_movement() {
        let mut game = game_with(well_board(2));
        assert_eq!(game.handle(GameEvent::PauseToggle), Dispatch::Updated);
        assert!(game.is_paused());

        let grid = game.board().settled_grid();
        let falling = *game.board().falling_piece();
        for event in [
            GameEvent::MoveLeft,
            GameEvent::MoveRight,
            GameEvent::MoveDown,
            GameEvent::RotateCw,
            GameEvent::RotateCcw,
            GameEvent::Rotate180,
            GameEvent::QuickDrop,
        ] {
            assert_eq!(game.handle(event), Dispatch::Ignored);
        }
        assert_eq!(game.board().settled_grid(), grid);
        assert_eq!(*game.board().falling_piece(), falling);
        assert_eq!(game.score(), 0);

        assert_eq!(game.handle(GameEvent::Redraw), Dispatch::Redraw);
        assert_eq!(game.handle(GameEvent::Quit), Dispatch::Quit);
        assert!(game.is_paused());

        assert_eq!(game.handle(GameEvent::PauseToggle), Dispatch::Updated);
        assert_eq!(game.state(), GameState::Playing);
        game.handle(GameEvent::QuickDrop);
        assert_eq!(game.score(), 200);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = game_with(well_board(1));
        let snapshot = game.snapshot();
        assert_eq!((snapshot.width, snapshot.height), (10, 20));
        assert_eq!(snapshot.grid[0][0], Block::Filled(PieceColor::Cyan));
        assert_eq!(snapshot.next.kind, game.next_piece());
        assert_eq!(snapshot.bag_count, 1);
        assert!(!snapshot.paused && !snapshot.over);

        game.handle(GameEvent::PauseToggle);
        let snapshot = game.snapshot();
        assert!(snapshot.paused);
        assert_eq!(snapshot.score(), 0);
    }
}
