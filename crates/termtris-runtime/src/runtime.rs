use std::io;

use log::info;
use termtris_engine::{Game, GameEvent, GameStats};

use crate::{EventLoop, Frontend, GravityTimer, InputThread, RuntimeError, event_queue};

/// Wires the queue, the two producer threads and the event loop together.
///
/// ```no_run
/// use std::io;
///
/// use termtris_engine::{Game, GameConfig, GameSnapshot};
/// use termtris_runtime::{Frontend, Runtime};
///
/// struct Headless;
///
/// impl Frontend for Headless {
///     fn render(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
///         println!("score {}", snapshot.score());
///         Ok(())
///     }
/// }
///
/// let game = Game::new(&GameConfig::default()).unwrap();
/// let stats = Runtime::new(game)
///     .run(&mut Headless, || Ok(None))
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct Runtime {
    game: Game,
}

impl Runtime {
    #[must_use]
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    /// Plays the game until the player quits.
    ///
    /// `read_input` is polled on the input thread; see [`InputThread`] for its contract.
    pub fn run<F, R>(self, frontend: &mut F, read_input: R) -> Result<GameStats, RuntimeError>
    where
        F: Frontend,
        R: FnMut() -> io::Result<Option<GameEvent>> + Send + 'static,
    {
        let (sender, receiver) = event_queue();
        let gravity = GravityTimer::new(sender.clone());
        let mut input = InputThread::spawn(sender, read_input).map_err(RuntimeError::Input)?;

        info!("game started");
        let result = EventLoop::new(self.game, receiver, gravity).run(frontend);
        input.stop();
        result
    }
}
