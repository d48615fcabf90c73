use std::sync::mpsc::Sender;

/// Snapshot of the publicly observable counters, pushed to the host after
/// every change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub level: u32,
    /// Percent toward the next level, 0..=100.
    pub progress: u8,
    /// Resources that left the field uncollected, 0..=max misses.
    pub missed: u8,
    pub game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            progress: 0,
            missed: 0,
            game_over: false,
        }
    }
}

impl GameState {
    pub fn lives(&self, max_misses: u8) -> u8 {
        max_misses.saturating_sub(self.missed)
    }
}

pub trait StateListener {
    fn on_update(&mut self, state: GameState);
}

impl<F: FnMut(GameState)> StateListener for F {
    fn on_update(&mut self, state: GameState) {
        self(state)
    }
}

/// Forwards snapshots over a channel. A dropped receiver means the host is
/// gone, so send failures are ignored.
pub fn channel_listener(tx: Sender<GameState>) -> impl StateListener {
    move |state: GameState| {
        let _ = tx.send(state);
    }
}
