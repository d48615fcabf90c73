pub mod hud;
pub mod starfield;
pub mod start;
pub mod tabs;

use ratatui::prelude::*;

use crate::app::{App, Screen};
use crate::games::Game;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match app.current_screen {
        Screen::Start => start::render_start(frame, chunks[1], &mut app.background),
        Screen::Play => render_play(frame, chunks[1], app),
    }
}

fn render_play(frame: &mut Frame, area: Rect, app: &mut App) {
    let max_misses = app.max_misses();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(4), // Stat cards
            Constraint::Length(1), // Lives
            Constraint::Min(8),    // Play field
        ])
        .split(area);

    hud::render_header(frame, rows[0], &app.hud, &mut app.panel_stars);
    hud::render_stat_cards(frame, rows[1], &app.hud, max_misses);
    hud::render_lives(frame, rows[2], &app.hud, max_misses);

    if let Some(game) = app.game.as_mut() {
        game.render(frame, rows[3]);
    }
}
