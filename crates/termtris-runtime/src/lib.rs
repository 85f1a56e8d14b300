//! Threads and the event loop that drive a [`Game`](termtris_engine::Game).
//!
//! Two producers feed one bounded queue: the [`GravityTimer`] and the [`InputThread`].
//! The [`EventLoop`] owns the game, takes one event at a time and hands snapshots to a
//! [`Frontend`].

use std::io;

pub use self::{
    event::{QUEUE_CAPACITY, QueuedEvent, event_queue},
    event_loop::EventLoop,
    frontend::Frontend,
    input::InputThread,
    runtime::Runtime,
    timer::{Gravity, GravityTimer},
};

mod event;
mod event_loop;
mod frontend;
mod input;
mod runtime;
mod timer;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RuntimeError {
    #[display("failed to read terminal input")]
    Input(io::Error),
    #[display("failed to render the game")]
    Render(io::Error),
    #[display("event queue closed unexpectedly")]
    QueueClosed,
}
