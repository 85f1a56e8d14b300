use super::{
    piece::{FallingPiece, PieceColor},
    vector::Vector,
};

/// A single cell of the settled grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Settled cell carrying the color of the piece that left it.
    Filled(PieceColor),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }
}

/// A single row of the settled grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRow {
    cells: Vec<Block>,
}

impl BlockRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Block::Empty; width],
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Block] {
        &self.cells
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }
}

/// The playing field: a fixed-size grid of settled blocks plus the falling piece.
///
/// The board owns every collision rule. A move is committed only after
/// [`can_place`](Self::can_place) accepted it, so settled cells never overlap the
/// falling piece.
///
/// # Bounds
///
/// A cell is in bounds when `0 <= x < width` and `y < height`. There is no upper bound:
/// pieces spawn partially above row 0 and may rotate there.
///
/// # Example
///
/// ```
/// use termtris_engine::{Board, FallingPiece, PieceKind, Vector};
///
/// let mut board = Board::new(10, 20, FallingPiece::spawn(PieceKind::O));
/// assert!(board.move_if_possible(Vector::LEFT));
/// while board.move_if_possible(Vector::DOWN) {}
/// board.merge_current_piece();
/// assert!(!board.block_at(Vector::new(3, 19)).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<BlockRow>,
    falling_piece: FallingPiece,
}

impl Board {
    /// Creates an empty board.
    ///
    /// Both dimensions must be non-zero: an empty row would count as full and be cleared
    /// on every anchor. [`GameConfig::validate`](crate::GameConfig::validate) enforces
    /// stricter minimums for games.
    #[must_use]
    pub fn new(width: usize, height: usize, falling_piece: FallingPiece) -> Self {
        debug_assert!(width > 0 && height > 0, "board must be at least 1x1");
        Self {
            width,
            height,
            rows: vec![BlockRow::empty(width); height],
            falling_piece,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns an iterator over the settled rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BlockRow> {
        self.rows.iter()
    }

    #[must_use]
    pub fn falling_piece(&self) -> &FallingPiece {
        &self.falling_piece
    }

    /// Replaces the falling piece wholesale, without any collision check.
    pub fn set_falling_piece(&mut self, piece: FallingPiece) {
        self.falling_piece = piece;
    }

    fn index(&self, pos: Vector) -> Option<(usize, usize)> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Returns the settled block at `pos`; anything off the grid reads as empty.
    #[must_use]
    pub fn block_at(&self, pos: Vector) -> Block {
        self.index(pos)
            .map_or(Block::Empty, |(x, y)| self.rows[y].cells[x])
    }

    /// Overwrites a settled cell. Positions off the grid are ignored.
    pub fn set_block(&mut self, pos: Vector, block: Block) {
        if let Some((x, y)) = self.index(pos) {
            self.rows[y].cells[x] = block;
        }
    }

    fn is_free(&self, pos: Vector) -> bool {
        let x_in_bounds = usize::try_from(pos.x).is_ok_and(|x| x < self.width);
        // Negative rows are above the visible top and always in bounds.
        let y_in_bounds = usize::try_from(pos.y).ok().is_none_or(|y| y < self.height);
        x_in_bounds && y_in_bounds && self.block_at(pos).is_empty()
    }

    /// Returns whether the falling piece fits at its position plus `delta` under
    /// rotation state `rotation`.
    #[must_use]
    pub fn can_place(&self, delta: Vector, rotation: usize) -> bool {
        self.falling_piece
            .cells_at(delta, rotation)
            .all(|pos| self.is_free(pos))
    }

    /// Moves the falling piece by `delta` if it fits there.
    ///
    /// Returns `false` and leaves the board untouched otherwise.
    pub fn move_if_possible(&mut self, delta: Vector) -> bool {
        if !self.can_place(delta, self.falling_piece.rotation()) {
            return false;
        }
        self.falling_piece.translate(delta);
        true
    }

    /// Advances the falling piece's rotation without a collision check.
    pub fn rotate(&mut self) {
        self.falling_piece.rotate();
    }

    /// Retreats the falling piece's rotation without a collision check.
    pub fn unrotate(&mut self) {
        self.falling_piece.unrotate();
    }

    /// Turns the falling piece by two rotation states without a collision check.
    pub fn rotate_half(&mut self) {
        self.falling_piece.rotate_half();
    }

    /// Returns whether the falling piece, as it stands, overlaps settled cells or
    /// leaves the side or bottom bounds.
    #[must_use]
    pub fn current_piece_in_collision(&self) -> bool {
        !self.can_place(Vector::ZERO, self.falling_piece.rotation())
    }

    /// Copies the falling piece's cells into the settled grid.
    ///
    /// Cells above the top row are dropped. The falling piece itself is left in place;
    /// the caller replaces it.
    pub fn merge_current_piece(&mut self) {
        let block = Block::Filled(self.falling_piece.color());
        let piece = self.falling_piece;
        for pos in piece.cells() {
            self.set_block(pos, block);
        }
    }

    /// Indices of the rows whose every cell is settled, in ascending order.
    #[must_use]
    pub fn cleared_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(y, row)| row.is_filled().then_some(y))
            .collect()
    }

    /// Removes every full row and shifts the rows above down, in one pass.
    ///
    /// Rows are compacted from the bottom up against the pre-clear grid, so several
    /// simultaneous full rows move everything above by the number of full rows below
    /// it. The vacated top rows are empty.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    pub fn clear_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..self.height).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows.swap(y + count, y);
            }
        }
        for row in &mut self.rows[..count] {
            *row = BlockRow::empty(self.width);
        }
        count
    }

    /// Copies the settled grid with the falling piece painted on top.
    #[must_use]
    pub fn render_grid(&self) -> Vec<Vec<Block>> {
        let mut grid = self.settled_grid();
        let block = Block::Filled(self.falling_piece.color());
        for pos in self.falling_piece.cells() {
            if let Some((x, y)) = self.index(pos) {
                grid[y][x] = block;
            }
        }
        grid
    }

    /// Copies the settled grid only.
    #[must_use]
    pub fn settled_grid(&self) -> Vec<Vec<Block>> {
        self.rows.iter().map(|row| row.cells.clone()).collect()
    }
}
