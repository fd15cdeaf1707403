// Review bar widget: the Generate Review action.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::{action_style, spinner};
use crate::tui::ViewState;

pub const REVIEW_WAIT_HINT: &str = "This process should take around 20 seconds";

/// Render the review bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let workflow = &state.workflow;
    let line = if workflow.generating_review {
        Line::from(vec![
            Span::styled(
                format!("{} Generating... ", spinner::frame(state.tick)),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(REVIEW_WAIT_HINT, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        let enabled = workflow.review_enabled && workflow.prompt.is_some();
        let mut spans = vec![Span::styled("(r) Generate Review", action_style(enabled))];
        if !enabled {
            spans.push(Span::styled(
                "  generate a new prompt first",
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
