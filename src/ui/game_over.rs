//! Game-over window drawn over the frozen level.

use super::game_common::centered_rect;
use flappy::HighscoreReport;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const WINDOW_WIDTH: u16 = 34;
const WINDOW_HEIGHT: u16 = 11;

/// Lines shown in the game-over window.
fn game_over_lines(report: &HighscoreReport) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                report.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", label),
            Span::styled(report.highscore.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    if report.is_new_highscore {
        lines.push(Line::from(Span::styled(
            "NEW HIGHSCORE!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[R]", Style::default().fg(Color::White)),
        Span::styled(" Retry  ", label),
        Span::styled("[Q]", Style::default().fg(Color::White)),
        Span::styled(" Quit", label),
    ]));
    lines
}

/// Draw the window centred in `area`. The level stays visible around it.
pub fn render_game_over(frame: &mut Frame, area: Rect, report: &HighscoreReport) {
    let window = centered_rect(area, WINDOW_WIDTH, WINDOW_HEIGHT);
    frame.render_widget(Clear, window);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(window);
    frame.render_widget(block, window);

    let text = Paragraph::new(game_over_lines(report)).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}
