use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent};
use tracing::warn;

pub enum Event {
    /// Press, repeat or release. Consumers decide which kinds they care about.
    Key(KeyEvent),
    Tick,
}

/// Reads terminal input on a background thread and interleaves it with
/// frame ticks over a channel. Ticks keep their rate while keys are held.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("input".into())
            .spawn(move || {
                let mut last_tick = Instant::now();
                loop {
                    let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                    let ready = event::poll(timeout).unwrap_or_else(|err| {
                        warn!(error = %err, "input poll failed");
                        false
                    });
                    if ready {
                        if let Ok(crossterm::event::Event::Key(key)) = event::read() {
                            if tx.send(Event::Key(key)).is_err() {
                                return;
                            }
                        }
                    }
                    if last_tick.elapsed() >= tick_rate {
                        if tx.send(Event::Tick).is_err() {
                            return;
                        }
                        last_tick = Instant::now();
                    }
                }
            })?;

        Ok(Self { rx })
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
