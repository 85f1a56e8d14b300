/// Classified player intents consumed by [`Game::handle`](crate::Game::handle).
///
/// Producers translate raw input into these; gravity ticks arrive as [`GameEvent::MoveDown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GameEvent {
    MoveLeft,
    MoveRight,
    MoveDown,
    RotateCw,
    RotateCcw,
    Rotate180,
    QuickDrop,
    PauseToggle,
    Quit,
    /// No state change; the screen should be repainted (e.g. after a resize).
    Redraw,
}

/// What the game did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Dropped without touching the game (paused or over).
    Ignored,
    /// The event was applied; the state may have changed.
    Updated,
    /// Nothing changed but the screen must be repainted.
    Redraw,
    /// The session should end.
    Quit,
}
