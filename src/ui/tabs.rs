use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};

/// Screen switcher on the left, a compact run summary on the right.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🛰 Space Cleanup ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(34)])
        .split(inner);

    let titles: Vec<Line> = Screen::all().iter().map(|s| Line::from(s.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.current_screen.index())
        .style(Style::default().fg(Color::Rgb(120, 120, 140)))
        .highlight_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));
    frame.render_widget(tabs, cols[0]);

    let summary = match app.current_screen {
        Screen::Start => Line::from(Span::styled(
            "Tab / Enter to play ",
            Style::default().fg(Color::Rgb(100, 100, 130)),
        )),
        Screen::Play => Line::from(vec![
            Span::styled("Lv ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(
                app.hud.level.to_string(),
                Style::default().fg(Color::Rgb(255, 255, 255)).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Score ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(
                format!("{:05} ", app.hud.score),
                Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
            ),
        ]),
    };
    frame.render_widget(Paragraph::new(summary).alignment(Alignment::Right), cols[1]);
}
