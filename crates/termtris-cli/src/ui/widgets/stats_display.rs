use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use termtris_engine::GameSnapshot;

use crate::ui::widgets::style;

pub struct StatsDisplay<'a> {
    snapshot: &'a GameSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot) -> Self {
        Self {
            snapshot,
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
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells(ROWS.len()) + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&GameSnapshot) -> String),
    LabelValue(&'static str, &'static dyn Fn(&GameSnapshot) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|snapshot| snapshot.score().to_string()),
    Row::Empty,
    Row::LabelValue("LINES:", &|snapshot| {
        snapshot.stats.total_cleared_lines().to_string()
    }),
    Row::LabelValue("PIECES:", &|snapshot| {
        snapshot.stats.completed_pieces().to_string()
    }),
    Row::LabelValue("BAGS:", &|snapshot| snapshot.bag_count.to_string()),
    Row::Empty,
    Row::LabelValue("SINGLES:", &|snapshot| {
        snapshot.stats.line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", &|snapshot| {
        snapshot.stats.line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", &|snapshot| {
        snapshot.stats.line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("QUADS:", &|snapshot| {
        snapshot.stats.line_cleared_counter()[4].to_string()
    }),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
