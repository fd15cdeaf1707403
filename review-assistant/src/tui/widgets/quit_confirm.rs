// Quit confirmation overlay widget.
//
// Centered modal shown on top of the main layout in `InputMode::ConfirmQuit`.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

const DIALOG_WIDTH: u16 = 34;
const DIALOG_HEIGHT: u16 = 4;

/// Render the quit confirmation overlay centered in `area`.
pub fn render(frame: &mut Frame, area: Rect) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Quit Reviewer2? ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let lines = vec![
        Line::from(" Pending requests are dropped."),
        Line::from(vec![
            Span::raw(" Really quit? ("),
            key("y", Color::Green),
            Span::raw("/"),
            key("n", Color::Red),
            Span::raw(")"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn render_shows_prompt() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area()))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Really quit? (y/n)"));
    }

    #[test]
    fn render_in_tiny_area_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(8, 2);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area()))
            .unwrap();
    }
}
