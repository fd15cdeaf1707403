// Help bar widget: key hints for the current input mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{InputMode, ViewState};

/// Render the help bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let hints = hints(state.mode);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key} "), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!("{action} "),
            Style::default().fg(Color::Gray),
        ));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// (key, action) pairs shown for each mode.
pub fn hints(mode: InputMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        InputMode::Normal => &[
            ("o", "open"),
            ("x", "clear"),
            ("g", "prompt"),
            ("e", "edit"),
            ("r", "review"),
            ("v", "version"),
            ("j/k", "scroll"),
            ("[/]", "scroll prompt"),
            ("q", "quit"),
        ],
        InputMode::PathEntry => &[("Enter", "select"), ("Esc", "cancel")],
        InputMode::Editing => &[("Ctrl+S", "save"), ("Esc", "cancel"), ("Ctrl+C", "quit")],
        InputMode::ConfirmQuit => &[("y", "quit"), ("n", "stay")],
    }
}
