use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use termtris_engine::Block;

use crate::ui::widgets::BlockDisplay;

/// The playing field, drawn from a snapshot grid (rows top to bottom).
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a [Vec<Block>],
    width: usize,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a [Vec<Block>], width: usize) -> Self {
        Self {
            grid,
            width,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cells(self.width).saturating_mul(BlockDisplay::width())
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells(self.grid.len()).saturating_mul(BlockDisplay::height())
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..self.width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.grid.len()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.grid) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                BlockDisplay::from_block(*block, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use termtris_engine::PieceColor;

    use super::*;

    #[test]
    fn test_renders_filled_cells() {
        let red = Block::Filled(PieceColor::Red);
        let grid = vec![vec![Block::Empty, red], vec![red, Block::Empty]];
        let board = BoardDisplay::new(&grid, 2);
        assert_eq!((board.width(), board.height()), (4, 2));

        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        board.render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), ".");
        assert_eq!(buf[(2, 0)].bg, crate::ui::widgets::color::RED);
        assert_eq!(buf[(0, 1)].bg, crate::ui::widgets::color::RED);
        assert_eq!(buf[(2, 1)].symbol(), ".");
    }

    #[test]
    fn test_border_adds_margin() {
        let grid = vec![vec![Block::Empty; 10]; 20];
        let board = BoardDisplay::new(&grid, 10).block(BlockWidget::bordered());
        assert_eq!((board.width(), board.height()), (22, 22));
    }
}
