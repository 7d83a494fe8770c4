//! Score display, status bar and overlays drawn on top of the scene.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Current score, large and centered at the top of the scene, with the best
/// score at the right edge.
pub fn render_score(frame: &mut Frame, area: Rect, score: u32, best: u32) {
    if area.height == 0 {
        return;
    }
    let top = Rect { height: 1, ..area };

    let score_line = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", score),
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(score_line, top);

    let best_line = Paragraph::new(Line::from(Span::styled(
        format!(" Best: {} ", best),
        Style::default().fg(Color::Yellow).bg(Color::Black),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(best_line, top);
}

/// One-line status bar: a message on the left, key hints on the right.
///
/// `controls` is a slice of (key, action) pairs, e.g. `[("[Space]", "Flap")]`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(Span::styled(
        format!(" {}", status_text),
        Style::default().fg(status_color),
    ));
    frame.render_widget(status, area);

    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::raw(" "));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}

/// Small centered banner, used for the pause screen.
pub fn render_banner(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let rect = centered_rect(area, text.chars().count() as u16 + 4, 3);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    frame.render_widget(
        Paragraph::new(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        inner,
    );
}

/// Game-over popup with the final and best scores.
pub fn render_game_over(frame: &mut Frame, area: Rect, score: u32, best: u32, new_best: bool) {
    let rect = centered_rect(area, 36, 9);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let best_line = if new_best {
        Line::from(Span::styled(
            "New best!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!("Best: {}", best),
            Style::default().fg(Color::Yellow),
        ))
    };

    let lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}", score),
            Style::default().fg(Color::White),
        )),
        best_line,
        Line::from(""),
        Line::from(Span::styled(
            "[Space / Click] Restart  [Q] Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let content_height = lines.len() as u16;
    let y = inner.y + inner.height.saturating_sub(content_height) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(inner.x, y, inner.width, content_height.min(inner.height)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_centered_rect() {
        let r = centered_rect(Rect::new(0, 0, 100, 50), 20, 10);
        assert_eq!(r, Rect::new(40, 20, 20, 10));
        let clipped = centered_rect(Rect::new(5, 5, 10, 4), 20, 10);
        assert_eq!(clipped, Rect::new(5, 5, 10, 4));
    }

    #[test]
    fn test_game_over_popup_text() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_game_over(f, area, 12, 30, false);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Score: 12"));
        assert!(text.contains("Best: 30"));
        assert!(text.contains("Restart"));
    }

    #[test]
    fn test_game_over_new_best() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_game_over(f, area, 31, 31, true);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("New best!"));
    }

    #[test]
    fn test_score_and_status_bar() {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_score(f, area, 7, 9);
                render_status_bar(
                    f,
                    Rect { y: 2, height: 1, ..area },
                    "Flying",
                    Color::Green,
                    &[("[Space]", "Flap")],
                );
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains(" 7 "));
        assert!(text.contains("Best: 9"));
        assert!(text.contains("Flying"));
        assert!(text.contains("[Space] Flap"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_game_over(f, area, 1, 2, false);
                render_banner(f, area, "PAUSED", Color::Cyan);
            })
            .unwrap();
    }
}
