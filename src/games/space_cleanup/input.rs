use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::entity::MoveInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Which directions are currently held.
///
/// Terminals with keyboard enhancement report releases, so a direction is
/// held from press to release. Otherwise only presses and auto-repeats
/// arrive, and a direction counts as held for `hold` after the last one.
#[derive(Clone, Debug)]
pub struct HeldKeys {
    last_seen: [Option<Instant>; 4],
    release_events: bool,
    hold: Duration,
}

impl HeldKeys {
    pub fn new(release_events: bool, hold: Duration) -> Self {
        Self {
            last_seen: [None; 4],
            release_events,
            hold,
        }
    }

    /// Records a key event. Returns `true` if it was a movement key.
    pub fn handle(&mut self, key: &KeyEvent, now: Instant) -> bool {
        let Some(dir) = Direction::from_key(key.code) else {
            return false;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(dir, now),
            KeyEventKind::Release => self.release(dir),
        }
        true
    }

    pub fn press(&mut self, dir: Direction, now: Instant) {
        self.last_seen[dir.slot()] = Some(now);
    }

    pub fn release(&mut self, dir: Direction) {
        self.last_seen[dir.slot()] = None;
    }

    pub fn clear(&mut self) {
        self.last_seen = [None; 4];
    }

    fn is_held(&self, dir: Direction, now: Instant) -> bool {
        match self.last_seen[dir.slot()] {
            None => false,
            Some(_) if self.release_events => true,
            Some(at) => now.saturating_duration_since(at) <= self.hold,
        }
    }

    pub fn snapshot(&self, now: Instant) -> MoveInput {
        MoveInput {
            up: self.is_held(Direction::Up, now),
            down: self.is_held(Direction::Down, now),
            left: self.is_held(Direction::Left, now),
            right: self.is_held(Direction::Right, now),
        }
    }
}
