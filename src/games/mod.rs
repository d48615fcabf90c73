pub mod space_cleanup;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// What the host screen needs from a mounted game.
pub trait Game {
    fn update(&mut self);
    fn handle_input(&mut self, key: KeyEvent);
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn reset(&mut self);
    /// Stops timers and the frame loop. Must be idempotent.
    fn teardown(&mut self);
}
