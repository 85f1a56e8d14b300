pub use self::{board::*, piece::*, vector::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod vector;
