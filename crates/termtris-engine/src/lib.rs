pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected [`GameConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board width {width} is below the minimum of {min}")]
    BoardTooNarrow { width: usize, min: usize },
    #[display("board height {height} is below the minimum of {min}")]
    BoardTooShort { height: usize, min: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid seed length: expected 32 hex digits, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex digit in seed {seed:?}")]
    InvalidDigit { seed: String },
}
