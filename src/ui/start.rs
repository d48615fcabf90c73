use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::ui::starfield::StartBackground;

const BANNER: &str = "\
░█▀▀░█▀█░█▀█░█▀▀░█▀▀░░░░█▀▀░█░░░█▀▀░█▀█░█▀█░█░█░█▀█░
░▀▀█░█▀▀░█▀█░█░░░█▀▀░░░░█░░░█░░░█▀▀░█▀█░█░█░█░█░█▀▀░
░▀▀▀░▀░░░▀░▀░▀▀▀░▀▀▀░░░░▀▀▀░▀▀▀░▀▀▀░▀░▀░▀░▀░▀▀▀░▀░░░";

fn control_line(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(action, Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

pub fn render_start(frame: &mut Frame, area: Rect, background: &mut StartBackground) {
    background.resize(area.width, area.height);
    frame.render_widget(Paragraph::new(background.lines()), area);

    let panel_w = 60u16.min(area.width.saturating_sub(2));
    let panel_h = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(panel_w)) / 2;
    let y = area.y + (area.height.saturating_sub(panel_h)) / 2;
    let panel = Rect::new(x, y, panel_w, panel_h);

    frame.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(80, 150, 255)))
        .style(Style::default().bg(Color::Rgb(8, 10, 24)));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Banner
            Constraint::Length(2), // Subtitle
            Constraint::Min(6),    // Controls
            Constraint::Length(2), // Call to action
        ])
        .split(inner);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[1]);

    let subtitle = Paragraph::new(Line::from(vec![Span::styled(
        "Collect the green, dodge the red.",
        Style::default()
            .fg(Color::Rgb(180, 200, 255))
            .add_modifier(Modifier::ITALIC),
    )]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[2]);

    let controls = Paragraph::new(vec![
        control_line("  ←↑↓→ / WASD   ", "Move your ship"),
        control_line("  ● resource     ", "+10 score, +10% progress"),
        control_line("  ■ debris       ", "Instant game over"),
        control_line("  R              ", "Restart after game over"),
        control_line("  Esc            ", "Leave the run"),
        control_line("  q / Ctrl+C     ", "Quit"),
    ]);
    frame.render_widget(controls, chunks[3]);

    let cta = Paragraph::new(Line::from(vec![Span::styled(
        "▶ Press ENTER to launch",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD),
    )]))
    .alignment(Alignment::Center);
    frame.render_widget(cta, chunks[4]);
}
