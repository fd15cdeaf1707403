// File panel widget: selected PDF and the Generate Prompt action.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::{action_style, spinner};
use crate::tui::ViewState;

pub const EMPTY_HINT: &str = "Please select a PDF paper to upload";
pub const PROMPT_WAIT_HINT: &str = "This process should take around 1 minute";

/// Render the file panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let workflow = &state.workflow;
    let has_file = workflow.selected_file_name.is_some();

    let file_line = match &state.file_label {
        Some(name) => Line::from(vec![
            Span::styled("▸ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (x) clear", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(vec![
            Span::styled(EMPTY_HINT, Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled("(o) Select File", action_style(true)),
        ]),
    };

    let action_line = if workflow.generating_prompt {
        Line::from(vec![
            Span::styled(
                format!("{} Generating... ", spinner::frame(state.tick)),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(PROMPT_WAIT_HINT, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            "(g) Generate Prompt",
            action_style(has_file),
        ))
    };

    let paragraph = Paragraph::new(vec![file_line, Line::default(), action_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Paper "),
    );
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    fn rendered(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(100, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn empty_state_asks_for_pdf() {
        let text = rendered(&ViewState::default());
        assert!(text.contains(EMPTY_HINT));
        assert!(text.contains("Select File"));
        assert!(text.contains("Generate Prompt"));
    }

    #[test]
    fn shows_file_label() {
        let mut state = ViewState::default();
        state.workflow.selected_file_name = Some("attention.pdf".into());
        state.file_label = Some("attention.pdf".into());
        let text = rendered(&state);
        assert!(text.contains("attention.pdf"));
        assert!(!text.contains(EMPTY_HINT));
    }

    #[test]
    fn generating_shows_wait_hint() {
        let mut state = ViewState::default();
        state.workflow.selected_file_name = Some("a.pdf".into());
        state.file_label = Some("a.pdf".into());
        state.workflow.generating_prompt = true;
        let text = rendered(&state);
        assert!(text.contains("Generating..."));
        assert!(text.contains(PROMPT_WAIT_HINT));
        assert!(!text.contains("(g) Generate Prompt"));
    }

    #[test]
    fn small_area_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(10, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
