pub mod collision;
pub mod entity;
pub mod input;
pub mod session;
pub mod spawner;
pub mod state;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle};
use ratatui::widgets::*;
use tracing::info;

use crate::config::GameConfig;
use crate::games::Game;

use self::input::HeldKeys;
use self::session::Session;
use self::spawner::Spawner;
use self::state::StateListener;

const FIELD_BG: Color = Color::Rgb(10, 10, 35);
const PLAYER_COLOR: Color = Color::Rgb(255, 255, 0);
const DEBRIS_COLOR: Color = Color::Rgb(255, 0, 0);
const RESOURCE_COLOR: Color = Color::Rgb(0, 255, 0);
const GAME_OVER_TEXT: &str = "Game Over! Press R to Restart";

/// A mounted game: the session plus the timers and held keys that drive it.
pub struct SpaceCleanup {
    session: Session,
    spawner: Spawner,
    keys: HeldKeys,
    last_update: Option<Instant>,
    frame_count: u64,
    active: bool,
}

impl SpaceCleanup {
    pub fn new(
        config: GameConfig,
        release_events: bool,
        listener: impl StateListener + 'static,
    ) -> Self {
        let spawner = Spawner::new(config.debris_interval(), config.resource_interval());
        let keys = HeldKeys::new(release_events, config.key_hold());
        info!(release_events, "game mounted");
        Self {
            session: Session::new(config, listener),
            spawner,
            keys,
            last_update: None,
            frame_count: 0,
            active: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        self.active && self.spawner.is_running()
    }

    /// One frame: hand due spawns to the session, then advance it.
    fn step(&mut self, dt: Duration, now: Instant) {
        if !self.active {
            return;
        }
        for kind in self.spawner.advance(dt) {
            self.session.queue_spawn(kind);
        }
        self.session.tick(self.keys.snapshot(now));
        self.frame_count += 1;
    }

    fn draw_field(&self, ctx: &mut Context, cell_width: f64) {
        let cfg = self.session.config();
        let height = cfg.field_height as f64;
        let state = self.session.state();

        if state.game_over {
            let text_width = GAME_OVER_TEXT.chars().count() as f64 * cell_width;
            let x = ((cfg.field_width as f64 - text_width) / 2.0).max(0.0);
            ctx.print(
                x,
                height / 2.0,
                Span::styled(
                    GAME_OVER_TEXT,
                    Style::default().fg(DEBRIS_COLOR).add_modifier(Modifier::BOLD),
                ),
            );
            return;
        }

        // Player: a filled disc with an opening mouth, facing right.
        let p = self.session.player();
        let radius = p.size as f64 / 2.0;
        let cx = p.x as f64 + radius;
        let cy = height - (p.y as f64 + radius);
        for ring in [1.0, 0.66, 0.33] {
            ctx.draw(&Circle {
                x: cx,
                y: cy,
                radius: radius * ring,
                color: PLAYER_COLOR,
            });
        }
        let mouth = ((self.frame_count as f64 * 0.1).sin() * 30.0 + 15.0).to_radians();
        for angle in [mouth, -mouth] {
            ctx.draw(&CanvasLine {
                x1: cx,
                y1: cy,
                x2: cx + radius * angle.cos(),
                y2: cy + radius * angle.sin(),
                color: FIELD_BG,
            });
        }

        for d in self.session.debris() {
            let size = d.size as f64;
            let x = d.x as f64;
            let y = height - d.y as f64 - size;
            ctx.draw(&Rectangle {
                x,
                y,
                width: size,
                height: size,
                color: DEBRIS_COLOR,
            });
            ctx.draw(&CanvasLine {
                x1: x,
                y1: y,
                x2: x + size,
                y2: y + size,
                color: DEBRIS_COLOR,
            });
        }

        for r in self.session.resources() {
            let radius = r.diameter as f64 / 2.0;
            ctx.draw(&Circle {
                x: r.x as f64 + radius,
                y: height - (r.y as f64 + radius),
                radius,
                color: RESOURCE_COLOR,
            });
        }
    }
}

impl Game for SpaceCleanup {
    fn update(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_update
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_update = Some(now);
        self.step(dt, now);
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if !self.active {
            return;
        }
        if self.keys.handle(&key, Instant::now()) {
            return;
        }
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let KeyCode::Char('r') | KeyCode::Char('R') = key.code {
            self.reset();
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(255, 255, 255)))
            .title(" 🚀 Space Cleanup ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(4),    // Play field
                Constraint::Length(1), // Help
            ])
            .split(inner);

        let cfg = self.session.config();
        let (width, height) = (cfg.field_width as f64, cfg.field_height as f64);
        let cell_width = width / chunks[0].width.max(1) as f64;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(FIELD_BG)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| self.draw_field(ctx, cell_width));
        frame.render_widget(canvas, chunks[0]);

        let help = if self.session.state().game_over {
            Line::from(vec![
                Span::styled(
                    " 💀 GAME OVER ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled("R Restart ", Style::default().fg(Color::Gray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Esc Exit", Style::default().fg(Color::Gray)),
            ])
        } else {
            Line::from(vec![
                Span::styled(" ←↑↓→ / WASD Move ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Collect ", Style::default().fg(RESOURCE_COLOR)),
                Span::styled("● ", Style::default().fg(RESOURCE_COLOR)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Dodge ", Style::default().fg(DEBRIS_COLOR)),
                Span::styled("■ ", Style::default().fg(DEBRIS_COLOR)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Esc Exit", Style::default().fg(Color::DarkGray)),
            ])
        };
        frame.render_widget(Paragraph::new(help), chunks[1]);
    }

    fn reset(&mut self) {
        if self.session.restart() {
            self.keys.clear();
        }
    }

    fn teardown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.spawner.stop();
        self.keys.clear();
        info!(
            frames = self.frame_count,
            score = self.session.state().score,
            "game torn down"
        );
    }
}

impl Drop for SpaceCleanup {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use std::sync::mpsc;

    use self::spawner::SpawnKind;
    use self::state::{channel_listener, GameState};

    fn seeded() -> GameConfig {
        GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn mount_emits_fresh_snapshot() {
        let (tx, rx) = mpsc::channel();
        let _game = SpaceCleanup::new(seeded(), true, channel_listener(tx));
        assert_eq!(rx.try_recv(), Ok(GameState::default()));
    }

    #[test]
    fn timers_feed_the_session() {
        let (tx, _rx) = mpsc::channel();
        let mut game = SpaceCleanup::new(seeded(), true, channel_listener(tx));
        let now = Instant::now();
        game.step(Duration::from_millis(1499), now);
        assert!(game.session().debris().is_empty());
        game.step(Duration::from_millis(1), now);
        assert_eq!(game.session().debris().len(), 1);
        assert_eq!(game.session().debris()[0].x, 794.0);
        assert!(game.session().resources().is_empty());
    }

    #[test]
    fn held_key_moves_player() {
        let (tx, _rx) = mpsc::channel();
        let mut game = SpaceCleanup::new(seeded(), true, channel_listener(tx));
        game.handle_input(press(KeyCode::Right));
        game.step(Duration::from_millis(16), Instant::now());
        assert_eq!(game.session().player().x, 105.0);
    }

    #[test]
    fn restart_key_only_works_after_game_over() {
        let (tx, rx) = mpsc::channel();
        let mut game = SpaceCleanup::new(seeded(), true, channel_listener(tx));
        let _ = rx.try_recv();
        game.handle_input(press(KeyCode::Char('r')));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn teardown_is_idempotent_and_stops_everything() {
        let (tx, _rx) = mpsc::channel();
        let mut game = SpaceCleanup::new(seeded(), true, channel_listener(tx));
        game.teardown();
        game.teardown();
        assert!(!game.is_active());
        game.step(Duration::from_millis(5000), Instant::now());
        game.step(Duration::from_millis(16), Instant::now());
        assert!(game.session().debris().is_empty());
        assert_eq!(game.session().player().x, 100.0);
    }

    #[test]
    fn spawns_are_dropped_while_game_over() {
        let (tx, rx) = mpsc::channel();
        // Fast enough to jump past the player in a single frame.
        let config = GameConfig {
            resource_speed: 500.0,
            ..seeded()
        };
        let mut game = SpaceCleanup::new(config, true, channel_listener(tx));
        for _ in 0..3 {
            game.session.queue_spawn(SpawnKind::Resource);
        }
        let now = Instant::now();
        game.step(Duration::ZERO, now);
        game.step(Duration::ZERO, now);
        assert!(game.session().state().game_over);
        game.step(Duration::from_millis(10_000), now);
        assert!(game.session().debris().is_empty());

        game.handle_input(press(KeyCode::Char('R')));
        let last = rx.try_iter().last();
        assert_eq!(last, Some(GameState::default()));
    }
}
