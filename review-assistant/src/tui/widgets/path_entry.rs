// Path entry overlay: the terminal stand-in for a file picker.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::tui::ViewState;

const DIALOG_WIDTH: u16 = 70;
const DIALOG_HEIGHT: u16 = 5;

/// Render the path entry dialog centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Select File ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(dialog_area);

    // Keep the tail of long paths in view.
    let input_width = usize::from(inner.width.saturating_sub(4));
    let chars = state.path_input.chars().count();
    let shown: String = state
        .path_input
        .chars()
        .skip(chars.saturating_sub(input_width))
        .collect();

    let lines = vec![
        Line::from(Span::styled(
            " Path to a PDF paper:",
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled(" > ", Style::default().fg(Color::Cyan)),
            Span::raw(shown),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(
            " Enter select | Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}
