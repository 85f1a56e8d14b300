use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::SyncSender,
    },
    thread::{self, JoinHandle},
};

use log::{error, trace, warn};
use termtris_engine::GameEvent;

use crate::QueuedEvent;

/// Producer thread that turns raw input into queued [`GameEvent`]s.
///
/// The reader closure is called in a loop. It returns `Ok(Some(event))` for a classified
/// key, `Ok(None)` when nothing relevant arrived (it should not block for long, so that
/// [`stop`](Self::stop) is noticed), and `Err` on a fatal failure. A failure is forwarded
/// once as [`QueuedEvent::InputFailed`] and ends the thread.
#[derive(Debug)]
pub struct InputThread {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    pub fn spawn<F>(sender: SyncSender<QueuedEvent>, mut read: F) -> io::Result<Self>
    where
        F: FnMut() -> io::Result<Option<GameEvent>> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let handle = thread::Builder::new().name("input".into()).spawn({
            let stop = Arc::clone(&stop);
            move || {
                while !stop.load(Ordering::Relaxed) {
                    let event = match read() {
                        Ok(Some(event)) => QueuedEvent::Input(event),
                        Ok(None) => continue,
                        Err(err) => {
                            error!("input read failed: {err}");
                            let _ = sender.send(QueuedEvent::InputFailed(err));
                            return;
                        }
                    };
                    trace!("queued {event:?}");
                    if sender.send(event).is_err() {
                        return;
                    }
                }
            }
        })?;
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Asks the thread to finish and waits for it.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("input thread panicked");
        }
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop();
    }
}
