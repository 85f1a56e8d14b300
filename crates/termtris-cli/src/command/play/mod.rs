use log::info;
use termtris_engine::{Game, GameConfig, PieceSeed};
use termtris_runtime::Runtime;

use crate::{
    command::play::{frontend::TerminalFrontend, input::read_event},
    logging::{self, LogArg},
};

mod frontend;
mod input;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Board width in cells
    #[clap(long, default_value_t = GameConfig::DEFAULT_WIDTH)]
    pub(crate) width: usize,
    /// Board height in cells
    #[clap(long, default_value_t = GameConfig::DEFAULT_HEIGHT)]
    pub(crate) height: usize,
    #[clap(flatten)]
    log: LogArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        width,
        height,
        log,
    } = arg;

    logging::init(log)?;

    let config = GameConfig {
        width: *width,
        height: *height,
        seed: *seed,
        ..GameConfig::default()
    };
    let game = Game::new(&config)?;

    let mut frontend = TerminalFrontend::new(ratatui::init());
    let result = Runtime::new(game).run(&mut frontend, read_event);
    ratatui::restore();

    let stats = result?;
    info!(
        "session ended: score {}, {} pieces, {} lines",
        stats.score(),
        stats.completed_pieces(),
        stats.total_cleared_lines()
    );
    println!("Score: {}", stats.score());
    Ok(())
}
