use std::{sync::mpsc::Receiver, thread, time::Duration};

use log::{debug, error, info, trace};
use termtris_engine::{Dispatch, Game, GameEvent, GameStats, LineClear};

use crate::{Frontend, Gravity, QueuedEvent, RuntimeError};

/// The single consumer of the event queue.
///
/// Owns the [`Game`] and processes exactly one queued event per iteration:
///
/// 1. gravity ticks from a stale schedule are dropped, fresh ones become `MoveDown`
/// 2. the event is applied with [`Game::handle`]
/// 3. a line clear plays the flicker animation with gravity stopped
/// 4. the new state is rendered
/// 5. gravity is re-armed if the interval or the pause state changed
///
/// Once the game is over the final frame stays on screen and only `Quit` is honoured.
#[derive(Debug)]
pub struct EventLoop<G> {
    game: Game,
    events: Receiver<QueuedEvent>,
    gravity: G,
    generation: Option<u64>,
    flicker_interval: Duration,
}

impl<G> EventLoop<G>
where
    G: Gravity,
{
    /// Delay between two frames of the line-clear flicker.
    pub const FLICKER_INTERVAL: Duration = Duration::from_millis(80);

    pub fn new(game: Game, events: Receiver<QueuedEvent>, gravity: G) -> Self {
        Self {
            game,
            events,
            gravity,
            generation: None,
            flicker_interval: Self::FLICKER_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_flicker_interval(mut self, interval: Duration) -> Self {
        self.flicker_interval = interval;
        self
    }

    /// Runs until the player quits and returns the final statistics.
    pub fn run<F>(mut self, frontend: &mut F) -> Result<GameStats, RuntimeError>
    where
        F: Frontend,
    {
        render(frontend, &self.game)?;
        if self.game.is_over() {
            self.wait_for_quit()?;
            return Ok(self.game.stats().clone());
        }
        self.arm();

        loop {
            let Some(event) = self.next_event()? else {
                continue;
            };

            let was_paused = self.game.is_paused();
            let interval = self.game.gravity_interval();
            match self.game.handle(event) {
                Dispatch::Quit => {
                    info!("quit with score {}", self.game.score());
                    break;
                }
                Dispatch::Ignored => continue,
                Dispatch::Updated | Dispatch::Redraw => {}
            }

            let flickered = match self.game.take_line_clear() {
                Some(clear) => {
                    self.flicker(frontend, &clear)?;
                    true
                }
                None => false,
            };
            render(frontend, &self.game)?;

            if self.game.is_over() {
                self.disarm();
                self.wait_for_quit()?;
                break;
            }
            if self.game.is_paused() {
                if !was_paused {
                    self.disarm();
                }
            } else if was_paused || flickered || interval != self.game.gravity_interval() {
                self.arm();
            }
        }

        self.disarm();
        Ok(self.game.stats().clone())
    }

    /// Receives the next event, translating fresh gravity ticks into `MoveDown`.
    ///
    /// Returns `None` for a stale tick.
    fn next_event(&mut self) -> Result<Option<GameEvent>, RuntimeError> {
        match self.events.recv() {
            Ok(QueuedEvent::Gravity { generation }) if Some(generation) == self.generation => {
                Ok(Some(GameEvent::MoveDown))
            }
            Ok(QueuedEvent::Gravity { generation }) => {
                trace!("dropped stale gravity tick of generation {generation}");
                Ok(None)
            }
            Ok(QueuedEvent::Input(event)) => Ok(Some(event)),
            Ok(QueuedEvent::InputFailed(err)) => {
                error!("input source failed: {err}");
                Err(RuntimeError::Input(err))
            }
            Err(_) => Err(RuntimeError::QueueClosed),
        }
    }

    fn arm(&mut self) {
        self.generation = Some(self.gravity.start(self.game.gravity_interval()));
    }

    fn disarm(&mut self) {
        self.gravity.stop();
        self.generation = None;
    }

    fn flicker<F>(&mut self, frontend: &mut F, clear: &LineClear) -> Result<(), RuntimeError>
    where
        F: Frontend,
    {
        debug!("flickering rows {:?}", clear.rows());
        self.disarm();
        for index in 0..LineClear::FLICKER_FRAMES {
            let snapshot = self.game.snapshot().with_grid(clear.frame(index));
            frontend.render(&snapshot).map_err(RuntimeError::Render)?;
            thread::sleep(self.flicker_interval);
        }
        Ok(())
    }

    /// Drops everything but `Quit`.
    fn wait_for_quit(&mut self) -> Result<(), RuntimeError> {
        info!("game over with score {}, waiting for quit", self.game.score());
        loop {
            match self.events.recv() {
                Ok(QueuedEvent::Input(GameEvent::Quit)) => return Ok(()),
                Ok(QueuedEvent::InputFailed(err)) => return Err(RuntimeError::Input(err)),
                Ok(event) => trace!("ignored {event:?} after game over"),
                Err(_) => return Err(RuntimeError::QueueClosed),
            }
        }
    }
}

fn render<F>(frontend: &mut F, game: &Game) -> Result<(), RuntimeError>
where
    F: Frontend,
{
    frontend
        .render(&game.snapshot())
        .map_err(RuntimeError::Render)
}
