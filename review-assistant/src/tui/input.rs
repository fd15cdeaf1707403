// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (path entry, editor
// buffer, scrolling).

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{InputMode, ViewState};
use crate::protocol::UserCommand;

/// Scroll key for the message list.
pub const MESSAGES_SCROLL: &str = "messages";
/// Scroll key for the read-only prompt view.
pub const PROMPT_SCROLL: &str = "prompt";

const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when the key was handled locally or
/// names an action that is currently disabled.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports Release events too.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match view_state.mode {
        InputMode::ConfirmQuit => handle_confirm_quit(key_event, view_state),
        InputMode::PathEntry => handle_path_entry(key_event, view_state),
        InputMode::Editing => handle_editing(key_event, view_state),
        InputMode::Normal => handle_normal(key_event, view_state),
    }
}

/// Handle a bracketed paste. Only path entry and the editor take text.
pub fn handle_paste(text: &str, view_state: &mut ViewState) {
    match view_state.mode {
        InputMode::PathEntry => {
            let line = text.lines().next().unwrap_or_default();
            view_state.path_input.push_str(line);
        }
        InputMode::Editing => view_state.editor.insert_str(text),
        InputMode::Normal | InputMode::ConfirmQuit => {}
    }
}

fn handle_normal(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let workflow = &view_state.workflow;
    match key_event.code {
        KeyCode::Char('o') => {
            view_state.path_input.clear();
            view_state.mode = InputMode::PathEntry;
            None
        }
        KeyCode::Char('x') => {
            if workflow.selected_file_name.is_none() && workflow.prompt.is_none() {
                return None;
            }
            view_state.file_label = None;
            view_state.editor.clear();
            Some(UserCommand::ClearFile)
        }
        KeyCode::Char('g') => {
            let ready = workflow.selected_file_name.is_some() && !workflow.generating_prompt;
            ready.then_some(UserCommand::GeneratePrompt)
        }
        KeyCode::Char('e') => {
            let ready = workflow.prompt.is_some() && !workflow.editing;
            ready.then_some(UserCommand::BeginEdit)
        }
        KeyCode::Char('r') => {
            let ready = workflow.review_enabled
                && workflow.prompt.is_some()
                && !workflow.generating_review;
            ready.then_some(UserCommand::GenerateReview)
        }
        KeyCode::Char('v') => Some(UserCommand::ToggleVersion),

        // Message list scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, MESSAGES_SCROLL, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, MESSAGES_SCROLL, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, MESSAGES_SCROLL, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, MESSAGES_SCROLL, PAGE_SIZE);
            None
        }

        // Prompt panel scrolling
        KeyCode::Char('[') => {
            scroll_up(view_state, PROMPT_SCROLL, 1);
            None
        }
        KeyCode::Char(']') => {
            scroll_down(view_state, PROMPT_SCROLL, 1);
            None
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.mode = InputMode::ConfirmQuit;
            None
        }

        _ => None,
    }
}

/// Quit confirmation: `y`/`q` confirm, `n`/Esc cancel, everything else is
/// blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.mode = InputMode::Normal;
            None
        }
        _ => None,
    }
}

/// Path entry: printable chars append, Backspace deletes, Enter submits the
/// path, Esc abandons it.
fn handle_path_entry(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.path_input.clear();
            view_state.mode = InputMode::Normal;
            None
        }
        KeyCode::Enter => {
            let raw = std::mem::take(&mut view_state.path_input);
            view_state.mode = InputMode::Normal;
            let path = clean_path(&raw);
            if path.is_empty() {
                return None;
            }
            Some(UserCommand::SelectFile(PathBuf::from(path)))
        }
        KeyCode::Backspace => {
            view_state.path_input.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.path_input.push(c);
            None
        }
        _ => None,
    }
}

/// Editor: Ctrl+S saves, Esc cancels, everything else edits the buffer.
fn handle_editing(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let editor = &mut view_state.editor;
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('s') => Some(UserCommand::SaveEdit(editor.text().to_string())),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Esc => return Some(UserCommand::CancelEdit),
        KeyCode::Enter => editor.newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Home => editor.move_home(),
        KeyCode::End => editor.move_end(),
        KeyCode::Tab => editor.insert_str("    "),
        KeyCode::Char(c) => editor.insert_char(c),
        _ => {}
    }
    None
}

/// Trim whitespace and one pair of surrounding quotes, as left behind by
/// drag-and-drop into most terminals.
fn clean_path(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

fn scroll_up(view_state: &mut ViewState, key: &str, lines: usize) {
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

fn scroll_down(view_state: &mut ViewState, key: &str, lines: usize) {
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_add(lines);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
