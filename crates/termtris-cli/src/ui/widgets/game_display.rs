use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use termtris_engine::{Block as Cell, GameSnapshot};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, StatsDisplay, color, style};

/// Whole play screen: board in the middle, next piece and stats on the side, and a
/// popup over the board while paused or after the game is over.
///
/// A paused game hides the board contents and the next piece.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    snapshot: &'a GameSnapshot,
    hidden_grid: Option<Vec<Vec<Cell>>>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> GameDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot) -> Self {
        let hidden_grid = snapshot
            .paused
            .then(|| vec![vec![Cell::Empty; snapshot.width]; snapshot.height]);
        Self {
            snapshot,
            hidden_grid,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn board(&self) -> BoardDisplay<'_> {
        let grid = self.hidden_grid.as_deref().unwrap_or(&self.snapshot.grid);
        BoardDisplay::new(grid, self.snapshot.width)
            .block(Block::bordered().border_style(self.border_style()).style(style::DEFAULT))
    }

    fn border_style(&self) -> Style {
        let color = if self.snapshot.over {
            color::RED
        } else if self.snapshot.paused {
            color::YELLOW
        } else {
            color::WHITE
        };
        Style::new().fg(color)
    }

    pub fn height(&self) -> u16 {
        self.board().height()
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = self.border_style();
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = self.board();
        let next_panel = if self.hidden_grid.is_some() {
            PieceDisplay::new()
        } else {
            PieceDisplay::new().piece(self.snapshot.next)
        }
        .block(panel("NEXT"));
        let stats = StatsDisplay::new(self.snapshot).block(panel("STATS"));

        let [center_column, right_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(u16::max(next_panel.width(), stats.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area, stats_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(stats.height()),
        ])
        .spacing(1)
        .areas(right_column);
        let next_area = next_area.layout::<1>(&Layout::horizontal([Constraint::Length(
            next_panel.width(),
        )]))[0];

        let game_board_width = game_board.width();
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);
        stats.render(stats_area, buf);

        let popup = if self.snapshot.over {
            Some(("GAME OVER", Style::new().fg(color::WHITE).bg(color::RED)))
        } else if self.snapshot.paused {
            Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
        } else {
            None
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
