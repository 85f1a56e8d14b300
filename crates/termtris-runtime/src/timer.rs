use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender, SyncSender, TrySendError},
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, trace, warn};

use crate::QueuedEvent;

/// A restartable source of gravity ticks.
///
/// Every schedule gets a fresh generation number. Ticks carry the generation of the
/// schedule that produced them so the loop can drop ticks left over from an older one.
pub trait Gravity {
    /// Replaces any running schedule with one firing every `interval`.
    ///
    /// Returns the generation of the new schedule.
    fn start(&mut self, interval: Duration) -> u64;

    /// Cancels the running schedule, if any.
    fn stop(&mut self);
}

/// Gravity backed by a dedicated thread per schedule.
#[derive(Debug)]
pub struct GravityTimer {
    sender: SyncSender<QueuedEvent>,
    generation: u64,
    worker: Option<Worker>,
}

#[derive(Debug)]
struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl GravityTimer {
    #[must_use]
    pub fn new(sender: SyncSender<QueuedEvent>) -> Self {
        Self {
            sender,
            generation: 0,
            worker: None,
        }
    }
}

impl Gravity for GravityTimer {
    fn start(&mut self, interval: Duration) -> u64 {
        self.stop();
        self.generation += 1;
        let generation = self.generation;

        let (stop, stop_rx) = mpsc::channel();
        let sender = self.sender.clone();
        let handle = thread::spawn(move || tick_thread(generation, interval, &sender, &stop_rx));
        self.worker = Some(Worker { stop, handle });

        debug!("gravity armed: generation {generation}, every {interval:?}");
        generation
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        // The thread may already have exited, in which case the send fails harmlessly.
        let _ = worker.stop.send(());
        if worker.handle.join().is_err() {
            warn!("gravity thread of generation {} panicked", self.generation);
        }
        trace!("gravity stopped: generation {}", self.generation);
    }
}

impl Drop for GravityTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tick_thread(
    generation: u64,
    interval: Duration,
    sender: &SyncSender<QueuedEvent>,
    stop: &mpsc::Receiver<()>,
) {
    loop {
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
        // Never block on a full queue: the loop may be joining this thread.
        match sender.try_send(QueuedEvent::Gravity { generation }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => trace!("queue full, gravity tick skipped"),
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}
