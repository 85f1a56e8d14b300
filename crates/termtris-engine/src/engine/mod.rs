//! Game rules on top of the core board.
//!
//! - [`Game`] - one play session: falling piece, lookahead, score, pause and game over
//! - [`GameEvent`] / [`Dispatch`] - the input vocabulary and what the game did with it
//! - [`GameSnapshot`] - read-only copy handed to renderers
//! - [`GameStats`] - score and line counters
//! - [`PieceBag`] - 7-bag piece generation, seeded by [`PieceSeed`]
//! - [`GameConfig`] / [`SpeedCurve`] - board size, seed and gravity speed
//!
//! # Game Flow
//!
//! 1. [`Game::new`] draws the first piece and the lookahead
//! 2. Events move, rotate or drop the falling piece
//! 3. A piece that cannot move down is anchored, full rows are cleared and scored
//! 4. The lookahead piece spawns; if it collides the game is over
//!
//! ```
//! use termtris_engine::{Dispatch, Game, GameConfig, GameEvent};
//!
//! let mut game = Game::new(&GameConfig::default()).unwrap();
//! assert_eq!(game.handle(GameEvent::RotateCw), Dispatch::Updated);
//! assert_eq!(game.handle(GameEvent::PauseToggle), Dispatch::Updated);
//! assert_eq!(game.handle(GameEvent::QuickDrop), Dispatch::Ignored);
//! assert_eq!(game.handle(GameEvent::Quit), Dispatch::Quit);
//! ```

pub use self::{config::*, event::*, game::*, game_stats::*, piece_bag::*, snapshot::*};

mod config;
mod event;
mod game;
mod game_stats;
mod piece_bag;
mod snapshot;
