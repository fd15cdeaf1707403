// Prompt panel widget: the generated prompt, its editor, or the user guide.
//
// - Editing mode: editor buffer with a visible cursor.
// - Prompt present: read-only prompt text, scrollable with [ and ].
// - Otherwise: version descriptions and the usage steps.

use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::overflow_rows;
use crate::tui::input::PROMPT_SCROLL;
use crate::tui::{InputMode, ViewState};

/// Render the prompt panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if state.mode == InputMode::Editing {
        render_editor(frame, area, state);
        return;
    }

    match &state.workflow.prompt {
        Some(prompt) => {
            let body = prompt_body(prompt);
            let scroll = state
                .scroll_offset
                .get(PROMPT_SCROLL)
                .copied()
                .unwrap_or(0)
                .min(overflow_rows(&body, area));
            let paragraph = body
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(Span::styled(
                            " Generated Prompt ",
                            Style::default().add_modifier(Modifier::BOLD),
                        ))
                        .title_bottom(Line::from(Span::styled(
                            " (e) edit ",
                            Style::default().fg(Color::DarkGray),
                        ))),
                )
                .scroll((to_u16(scroll), 0));
            frame.render_widget(paragraph, area);
        }
        None => {
            let paragraph = Paragraph::new(guide_text())
                .block(Block::default().borders(Borders::ALL).title(" Prompt "))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
    }
}

/// Furthest the read-only prompt can scroll in `area`. Zero while editing
/// or when there is no prompt.
pub fn max_scroll(area: Rect, state: &ViewState) -> usize {
    match &state.workflow.prompt {
        Some(prompt) if state.mode != InputMode::Editing => {
            overflow_rows(&prompt_body(prompt), area)
        }
        _ => 0,
    }
}

fn prompt_body(prompt: &str) -> Paragraph<'_> {
    Paragraph::new(prompt).wrap(Wrap { trim: false })
}

fn render_editor(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Edit Prompt ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " Ctrl+S save | Esc cancel ",
            Style::default().fg(Color::DarkGray),
        )));
    let inner = block.inner(area);

    // Scroll so the cursor row stays visible. Lines are not wrapped in the
    // editor, which keeps cursor placement exact.
    let (row, col) = state.editor.cursor_position();
    let height = usize::from(inner.height.max(1));
    let width = usize::from(inner.width.max(1));
    let row_scroll = row.saturating_sub(height - 1);
    let col_scroll = col.saturating_sub(width - 1);

    let paragraph = Paragraph::new(state.editor.text())
        .block(block)
        .scroll((to_u16(row_scroll), to_u16(col_scroll)));
    frame.render_widget(paragraph, area);

    if inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position(Position::new(
            inner.x + to_u16(col - col_scroll),
            inner.y + to_u16(row - row_scroll),
        ));
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Placeholder shown before any prompt is generated.
pub fn guide_text() -> Text<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    Text::from(vec![
        Line::from(Span::styled("✦ No prompts available ✦", bold)),
        Line::default(),
        Line::from(Span::styled("Default Version:", bold)),
        Line::from("Concise and elegant prompts and reviews."),
        Line::from(Span::styled("Detailed Version:", bold)),
        Line::from("Detailed and elaborated prompts and reviews."),
        Line::default(),
        Line::from(Span::styled("User Guide:", bold)),
        Line::from("1. Select your PDF file;"),
        Line::from("2. Press 'Generate Prompt';"),
        Line::from("3. Edit your prompts (optional);"),
        Line::from("4. Press 'Generate Review'."),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
