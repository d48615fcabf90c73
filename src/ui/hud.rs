use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::space_cleanup::state::GameState;
use crate::ui::starfield::PanelStars;

#[derive(Clone, Copy)]
enum Tone {
    Primary,
    Neutral,
    Danger,
}

impl Tone {
    fn border(self) -> Color {
        match self {
            Tone::Primary => Color::Rgb(80, 200, 255),
            Tone::Neutral => Color::Rgb(100, 100, 130),
            Tone::Danger => Color::Rgb(220, 80, 80),
        }
    }

    fn value(self) -> Color {
        match self {
            Tone::Primary => Color::Rgb(80, 200, 255),
            Tone::Neutral => Color::Rgb(255, 255, 255),
            Tone::Danger => Color::Rgb(255, 120, 120),
        }
    }
}

fn render_stat_card(frame: &mut Frame, area: Rect, icon: &str, label: &str, value: String, hint: &str, tone: Tone) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(tone.border()))
        .title(format!(" {} {} ", icon, label))
        .title_style(Style::default().fg(Color::Rgb(180, 180, 200)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(value, Style::default().fg(tone.value()).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(hint.to_string(), Style::default().fg(Color::Rgb(100, 100, 120)))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_progress_card(frame: &mut Frame, area: Rect, progress: u8) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Tone::Neutral.border()))
        .title(" 📈 Progress ")
        .title_style(Style::default().fg(Color::Rgb(180, 180, 200)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Rgb(80, 220, 120)).bg(Color::Rgb(30, 30, 45)))
        .percent(u16::from(progress.min(100)))
        .label(format!("{}%", progress));
    frame.render_widget(gauge, rows[0]);
    frame.render_widget(
        Paragraph::new(Span::styled("Next level at 100%", Style::default().fg(Color::Rgb(100, 100, 120)))),
        rows[1],
    );
}

/// Badge, title and the "game over" marker, over twinkling panel stars.
pub fn render_header(frame: &mut Frame, area: Rect, state: &GameState, stars: &mut PanelStars) {
    stars.resize(area.width, area.height);
    frame.render_widget(Paragraph::new(stars.lines()), area);

    let mut title = vec![
        Span::styled(
            " Reflex Quest ",
            Style::default().fg(Color::Rgb(80, 200, 255)).bg(Color::Rgb(20, 40, 60)),
        ),
        Span::raw("  "),
        Span::styled(
            "Live Game Status",
            Style::default().fg(Color::Rgb(255, 255, 255)).add_modifier(Modifier::BOLD),
        ),
    ];
    if state.game_over {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            " 💀 GAME OVER ",
            Style::default().fg(Color::Rgb(255, 255, 255)).bg(Color::Rgb(160, 30, 30)).add_modifier(Modifier::BOLD),
        ));
    }
    let lines = vec![
        Line::from(title),
        Line::from(Span::styled(
            "Real-time overview of your session.",
            Style::default().fg(Color::Rgb(120, 120, 140)),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Score, level, progress and missed, in one row.
pub fn render_stat_cards(frame: &mut Frame, area: Rect, state: &GameState, max_misses: u8) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    render_stat_card(frame, cols[0], "🏆", "Score", state.score.to_string(), "Keep the streak going", Tone::Primary);
    render_stat_card(frame, cols[1], "🧱", "Level", state.level.to_string(), "Difficulty scales gradually", Tone::Neutral);
    render_progress_card(frame, cols[2], state.progress);
    render_stat_card(
        frame,
        cols[3],
        "⚠",
        "Missed",
        missed_text(state, max_misses),
        "Three misses end the run",
        Tone::Danger,
    );
}

/// Remaining lives and the exit hint.
pub fn render_lives(frame: &mut Frame, area: Rect, state: &GameState, max_misses: u8) {
    let lives = state.lives(max_misses);
    let mut spans = vec![Span::styled(" Lives ", Style::default().fg(Color::Rgb(180, 180, 200)))];
    for i in 0..max_misses {
        let (glyph, color) = if i < lives {
            ("♥ ", Color::Rgb(255, 80, 100))
        } else {
            ("♡ ", Color::Rgb(70, 70, 90))
        };
        spans.push(Span::styled(glyph, Style::default().fg(color)));
    }
    spans.push(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));
    spans.push(Span::styled("Esc", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)));
    spans.push(Span::styled(" Exit to start screen", Style::default().fg(Color::Rgb(100, 100, 130))));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn missed_text(state: &GameState, max_misses: u8) -> String {
    format!("{}/{}", state.missed, max_misses)
}
