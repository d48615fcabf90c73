use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;

use crate::config::GameConfig;
use crate::games::space_cleanup::state::{channel_listener, GameState};
use crate::games::space_cleanup::SpaceCleanup;
use crate::games::Game;
use crate::ui::starfield::{PanelStars, StartBackground};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Play,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[Screen::Start, Screen::Play]
    }

    pub fn title(&self) -> &str {
        match self {
            Screen::Start => " Start ",
            Screen::Play => " Play ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Screen::Start => 0,
            Screen::Play => 1,
        }
    }
}

/// The host screen. Mounts a fresh game when entering play and tears it
/// down when leaving; the HUD only ever sees the snapshots the game emits.
pub struct App {
    pub should_quit: bool,
    pub current_screen: Screen,
    pub hud: GameState,
    pub game: Option<SpaceCleanup>,
    pub background: StartBackground,
    pub panel_stars: PanelStars,
    config: GameConfig,
    release_events: bool,
    updates_tx: Sender<GameState>,
    updates: Receiver<GameState>,
    last_tick: Option<Instant>,
}

impl App {
    pub fn new(config: GameConfig, release_events: bool) -> Self {
        let (updates_tx, updates) = mpsc::channel();
        Self {
            should_quit: false,
            current_screen: Screen::Start,
            hud: GameState::default(),
            game: None,
            background: StartBackground::new(),
            panel_stars: PanelStars::new(),
            config,
            release_events,
            updates_tx,
            updates,
            last_tick: None,
        }
    }

    pub fn max_misses(&self) -> u8 {
        self.config.max_misses
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);

        match self.current_screen {
            Screen::Start => self.background.advance(dt),
            Screen::Play => self.panel_stars.advance(dt),
        }
        if let Some(game) = self.game.as_mut() {
            game.update();
        }
        self.drain_updates();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let pressed = key.kind == KeyEventKind::Press;

        // Ctrl+C always quits
        if pressed && key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.current_screen {
            Screen::Start => {
                if !pressed {
                    return;
                }
                match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Tab | KeyCode::BackTab => self.mount(),
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
                    _ => {}
                }
            }
            Screen::Play => {
                let leave = matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Tab | KeyCode::BackTab
                );
                if leave {
                    if pressed {
                        self.unmount();
                    }
                    return;
                }
                if let Some(game) = self.game.as_mut() {
                    game.handle_input(key);
                }
            }
        }
        self.drain_updates();
    }

    fn mount(&mut self) {
        self.unmount();
        let listener = channel_listener(self.updates_tx.clone());
        self.game = Some(SpaceCleanup::new(self.config.clone(), self.release_events, listener));
        self.current_screen = Screen::Play;
        self.drain_updates();
    }

    fn unmount(&mut self) {
        if let Some(mut game) = self.game.take() {
            game.teardown();
            info!(score = self.hud.score, level = self.hud.level, "left the run");
        }
        self.hud = GameState::default();
        self.current_screen = Screen::Start;
    }

    fn drain_updates(&mut self) {
        for state in self.updates.try_iter() {
            self.hud = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyEventKind::Press)
    }

    fn new_app() -> App {
        App::new(
            GameConfig {
                seed: Some(11),
                ..GameConfig::default()
            },
            true,
        )
    }

    #[test]
    fn starts_on_start_screen_without_a_game() {
        let app = new_app();
        assert_eq!(app.current_screen, Screen::Start);
        assert!(app.game.is_none());
        assert_eq!(app.hud, GameState::default());
    }

    #[test]
    fn enter_mounts_a_game() {
        let mut app = new_app();
        app.on_key(press(KeyCode::Enter));
        assert_eq!(app.current_screen, Screen::Play);
        assert!(app.game.as_ref().is_some_and(|g| g.is_active()));
        assert_eq!(app.hud, GameState::default());
    }

    #[test]
    fn escape_tears_the_game_down() {
        let mut app = new_app();
        app.on_key(press(KeyCode::Enter));
        app.on_key(press(KeyCode::Esc));
        assert_eq!(app.current_screen, Screen::Start);
        assert!(app.game.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn hud_follows_emitted_snapshots() {
        let mut app = new_app();
        app.on_key(press(KeyCode::Enter));
        app.on_key(press(KeyCode::Right));
        app.on_tick();
        let x = app.game.as_ref().map(|g| g.session().player().x);
        assert_eq!(x, Some(105.0));
        assert_eq!(app.hud, GameState::default());
    }

    #[test]
    fn release_events_reach_the_game() {
        let mut app = new_app();
        app.on_key(press(KeyCode::Enter));
        app.on_key(press(KeyCode::Right));
        app.on_key(key(KeyCode::Right, KeyEventKind::Release));
        app.on_tick();
        let x = app.game.as_ref().map(|g| g.session().player().x);
        assert_eq!(x, Some(100.0));
    }

    #[test]
    fn releases_do_not_navigate() {
        let mut app = new_app();
        app.on_key(key(KeyCode::Enter, KeyEventKind::Release));
        assert_eq!(app.current_screen, Screen::Start);
        app.on_key(press(KeyCode::Enter));
        app.on_key(key(KeyCode::Esc, KeyEventKind::Release));
        assert_eq!(app.current_screen, Screen::Play);
    }

    #[test]
    fn quit_keys() {
        let mut app = new_app();
        app.on_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = new_app();
        app.on_key(press(KeyCode::Enter));
        app.on_key(KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('c'))
        });
        assert!(app.should_quit);
    }
}
