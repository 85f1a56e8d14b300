use std::io;

use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use termtris_engine::GameSnapshot;
use termtris_runtime::Frontend;

use crate::ui::widgets::GameDisplay;

/// Draws snapshots on the alternate screen set up by `ratatui::init`.
#[derive(Debug)]
pub(crate) struct TerminalFrontend {
    terminal: DefaultTerminal,
}

impl TerminalFrontend {
    pub(crate) fn new(terminal: DefaultTerminal) -> Self {
        Self { terminal }
    }
}

impl Frontend for TerminalFrontend {
    fn render(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
        self.terminal.draw(|frame| draw(frame, snapshot))?;
        Ok(())
    }
}

fn draw(frame: &mut Frame<'_>, snapshot: &GameSnapshot) {
    let game_display = GameDisplay::new(snapshot);
    let help_text = if snapshot.over {
        "Controls: Q (Quit)"
    } else if snapshot.paused {
        "Controls: P (Resume) | Q (Quit)"
    } else {
        "Controls: ← → (Move) | ↓ (Down) | ↑ X (Rotate) | Z (Rotate Back) | A (Flip) | Space (Drop) | P (Pause) | Q (Quit)"
    };
    let help_text = Text::from(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .centered();

    let [main_area, help_area] =
        Layout::vertical([Constraint::Length(game_display.height()), Constraint::Length(1)])
            .areas::<2>(frame.area());
    frame.render_widget(game_display, main_area);
    frame.render_widget(help_text, help_area);
}
