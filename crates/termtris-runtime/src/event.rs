use std::{
    io,
    sync::mpsc::{self, Receiver, SyncSender},
};

use termtris_engine::GameEvent;

/// Number of events the queue holds before producers block.
pub const QUEUE_CAPACITY: usize = 100;

/// Entries of the event queue, in arrival order.
#[derive(Debug, derive_more::IsVariant)]
pub enum QueuedEvent {
    /// Gravity tick from the timer schedule numbered `generation`.
    Gravity { generation: u64 },
    /// A classified key press.
    Input(GameEvent),
    /// The input source failed; no more input follows.
    InputFailed(io::Error),
}

/// Creates the bounded queue shared by the producers and the event loop.
#[must_use]
pub fn event_queue() -> (SyncSender<QueuedEvent>, Receiver<QueuedEvent>) {
    mpsc::sync_channel(QUEUE_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order() {
        let (tx, rx) = event_queue();
        tx.send(QueuedEvent::Input(GameEvent::MoveLeft)).unwrap();
        tx.send(QueuedEvent::Gravity { generation: 3 }).unwrap();
        tx.send(QueuedEvent::Input(GameEvent::Quit)).unwrap();

        assert!(matches!(
            rx.recv().unwrap(),
            QueuedEvent::Input(GameEvent::MoveLeft)
        ));
        assert!(matches!(
            rx.recv().unwrap(),
            QueuedEvent::Gravity { generation: 3 }
        ));
        assert!(matches!(
            rx.recv().unwrap(),
            QueuedEvent::Input(GameEvent::Quit)
        ));
    }

    #[test]
    fn test_queue_is_bounded() {
        let (tx, _rx) = event_queue();
        for _ in 0..QUEUE_CAPACITY {
            tx.try_send(QueuedEvent::Input(GameEvent::MoveDown)).unwrap();
        }
        assert!(matches!(
            tx.try_send(QueuedEvent::Input(GameEvent::MoveDown)),
            Err(mpsc::TrySendError::Full(_))
        ));
    }
}
