// Messages widget: generated reviews, revealed with a typing effect.
//
// Follows the bottom of the list while any review is still being revealed;
// otherwise honors the user's scroll offset.

use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::overflow_rows;
use crate::protocol::Sender;
use crate::tui::input::MESSAGES_SCROLL;
use crate::tui::ViewState;

/// Render the message list into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, now: Instant) {
    let body = body(state, now);
    let max = overflow_rows(&body, area);
    let scroll = if state.is_typing(now) {
        max
    } else {
        state
            .scroll_offset
            .get(MESSAGES_SCROLL)
            .copied()
            .unwrap_or(0)
            .min(max)
    };

    let title = Line::from(vec![
        Span::styled("Reviews", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" ({})", state.workflow.messages.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = body
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

/// Furthest the list can scroll in `area` at `now`.
pub fn max_scroll(area: Rect, state: &ViewState, now: Instant) -> usize {
    overflow_rows(&body(state, now), area)
}

fn body(state: &ViewState, now: Instant) -> Paragraph<'static> {
    Paragraph::new(build_lines(state, now)).wrap(Wrap { trim: false })
}

/// One header line per message, then its revealed text, then a blank line.
fn build_lines(state: &ViewState, now: Instant) -> Vec<Line<'static>> {
    if state.workflow.messages.is_empty() {
        return vec![Line::from(Span::styled(
            "No reviews yet.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = Vec::new();
    for message in &state.workflow.messages {
        let author = match message.sender {
            Sender::Llm => "Reviewer2",
        };
        lines.push(Line::from(vec![
            Span::styled(
                author,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" #{}", message.id),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        let visible = state
            .typing
            .get(&message.id)
            .map_or(message.content.as_str(), |t| t.visible(now));
        lines.extend(visible.split('\n').map(|l| Line::from(l.to_string())));
        lines.push(Line::default());
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
