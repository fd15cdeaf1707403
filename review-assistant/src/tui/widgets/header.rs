// Header widget: app title, description, and the version switch.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::ReviewVersion;
use crate::tui::ViewState;

pub const TITLE: &str = "Reviewer2";
pub const SUBTITLE: &str = "A Two-Stage LLM Framework for Academic Peer Review Generation";

/// Render the header into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {TITLE} "),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let switch = version_switch(state.workflow.version);
    let switch_width = u16::try_from(switch.width()).unwrap_or(u16::MAX);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(switch_width)]).areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
        left,
    );
    frame.render_widget(Paragraph::new(switch), right);
}

/// Two-position switch with the active version highlighted.
///
/// E.g. "(v) [Default Version] Detailed Version "
pub fn version_switch(active: ReviewVersion) -> Line<'static> {
    let mut spans = vec![Span::styled("(v) ", Style::default().fg(Color::DarkGray))];
    for version in [ReviewVersion::Default, ReviewVersion::Detailed] {
        if version == active {
            spans.push(Span::styled(
                format!("[{}]", version.label()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", version.label()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
