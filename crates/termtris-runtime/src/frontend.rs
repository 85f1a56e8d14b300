use std::io;

use termtris_engine::GameSnapshot;

/// Renderer driven by the [`EventLoop`](crate::EventLoop).
///
/// `render` is called once before the first event, after every event that changed
/// something or asked for a redraw, and once per line-clear flicker frame.
pub trait Frontend {
    /// Draws one frame.
    fn render(&mut self, snapshot: &GameSnapshot) -> io::Result<()>;
}
