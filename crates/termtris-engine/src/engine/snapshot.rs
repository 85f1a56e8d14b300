use crate::{Block, GameStats, PieceColor, PieceKind, Shape};

/// Read-only copy of everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Rows top to bottom, with the falling piece painted in.
    pub grid: Vec<Vec<Block>>,
    pub next: PiecePreview,
    pub stats: GameStats,
    pub bag_count: u64,
    pub paused: bool,
    pub over: bool,
}

impl GameSnapshot {
    #[must_use]
    pub fn score(&self) -> u32 {
        self.stats.score()
    }

    /// Returns the same snapshot showing `grid` instead.
    #[must_use]
    pub fn with_grid(self, grid: Vec<Vec<Block>>) -> Self {
        Self { grid, ..self }
    }
}

/// The lookahead piece as shown in the preview pane (rotation 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePreview {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub cells: Shape,
}

impl PiecePreview {
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            color: kind.color(),
            cells: *kind.shape(0),
        }
    }

    /// Bounding box size `(width, height)` of the preview cells.
    #[must_use]
    pub fn size(&self) -> (usize, usize) {
        let (w, h) = self.cells.iter().fold((0, 0), |(w, h), cell| {
            (w.max(cell.x + 1), h.max(cell.y + 1))
        });
        (
            usize::try_from(w).unwrap_or(0),
            usize::try_from(h).unwrap_or(0),
        )
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cells.iter().any(|cell| {
            usize::try_from(cell.x).is_ok_and(|cx| cx == x)
                && usize::try_from(cell.y).is_ok_and(|cy| cy == y)
        })
    }
}

/// Rows removed by the latest anchor, kept for the flicker animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    rows: Vec<usize>,
    grid: Vec<Vec<Block>>,
}

impl LineClear {
    /// Number of frames in the flicker animation.
    pub const FLICKER_FRAMES: usize = 5;

    pub(crate) fn new(rows: Vec<usize>, grid: Vec<Vec<Block>>) -> Self {
        Self { rows, grid }
    }

    /// Indices of the cleared rows in the pre-clear grid, ascending.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Grid shown in flicker frame `index`: cleared rows are blanked on even frames.
    #[must_use]
    pub fn frame(&self, index: usize) -> Vec<Vec<Block>> {
        let mut grid = self.grid.clone();
        if index % 2 == 0 {
            for &y in &self.rows {
                grid[y].fill(Block::Empty);
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_size() {
        assert_eq!(PiecePreview::new(PieceKind::O).size(), (2, 2));
        assert_eq!(PiecePreview::new(PieceKind::I).size(), (4, 2));
        assert_eq!(PiecePreview::new(PieceKind::T).size(), (3, 2));
        assert_eq!(PiecePreview::new(PieceKind::L).size(), (3, 3));
    }

    #[test]
    fn test_preview_is_occupied() {
        let preview = PiecePreview::new(PieceKind::T);
        assert!(preview.is_occupied(0, 0));
        assert!(preview.is_occupied(1, 1));
        assert!(!preview.is_occupied(0, 1));
        assert_eq!(preview.color, PieceColor::Magenta);
    }

    #[test]
    fn test_line_clear_frames_alternate() {
        let full = Block::Filled(PieceColor::Red);
        let grid = vec![vec![Block::Empty, full], vec![full, full]];
        let clear = LineClear::new(vec![1], grid.clone());

        for i in 0..LineClear::FLICKER_FRAMES {
            let frame = clear.frame(i);
            assert_eq!(frame[0], grid[0]);
            if i % 2 == 0 {
                assert_eq!(frame[1], vec![Block::Empty, Block::Empty]);
            } else {
                assert_eq!(frame[1], grid[1]);
            }
        }
    }
}
