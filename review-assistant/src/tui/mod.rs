// Terminal UI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the workflow held by the app
// orchestrator. The app pushes `UiUpdate` messages over an mpsc channel;
// the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod editor;
pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use crate::protocol::{UiUpdate, UserCommand, WorkflowSnapshot};

use editor::PromptEditor;
use layout::build_layout;
use widgets::typing_text::TypingText;

// ---------------------------------------------------------------------------
// InputMode
// ---------------------------------------------------------------------------

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key shortcuts.
    Normal,
    /// Typing the path of a PDF to select.
    PathEntry,
    /// Editing the generated prompt.
    Editing,
    /// Waiting for y/n on quit.
    ConfirmQuit,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
pub struct ViewState {
    /// Latest workflow snapshot from the app.
    pub workflow: WorkflowSnapshot,
    pub mode: InputMode,
    /// Path typed so far in path entry mode.
    pub path_input: String,
    pub editor: PromptEditor,
    /// Name shown in the file panel. Survives prompt generation (which
    /// releases the file) until the user clears it.
    pub file_label: Option<String>,
    /// Reveal state per message id.
    pub typing: BTreeMap<usize, TypingText>,
    /// Per-widget scroll offsets (keyed by widget name).
    pub scroll_offset: HashMap<String, usize>,
    /// Render tick counter, drives the spinner.
    pub tick: usize,
    pub chars_per_second: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(1000)
    }
}

impl ViewState {
    pub fn new(chars_per_second: u32) -> Self {
        ViewState {
            workflow: WorkflowSnapshot::default(),
            mode: InputMode::Normal,
            path_input: String::new(),
            editor: PromptEditor::default(),
            file_label: None,
            typing: BTreeMap::new(),
            scroll_offset: HashMap::new(),
            tick: 0,
            chars_per_second,
        }
    }

    /// Apply a workflow snapshot from the app orchestrator.
    pub fn apply_snapshot(&mut self, snapshot: WorkflowSnapshot, now: Instant) {
        if let Some(name) = &snapshot.selected_file_name {
            self.file_label = Some(name.clone());
        } else if snapshot.prompt.is_none() && !snapshot.generating_prompt {
            self.file_label = None;
        }

        for message in &snapshot.messages {
            self.typing
                .entry(message.id)
                .and_modify(|t| t.set_text(&message.content, now))
                .or_insert_with(|| TypingText::new(&message.content, self.chars_per_second, now));
        }
        self.typing
            .retain(|id, _| snapshot.messages.iter().any(|m| m.id == *id));

        if self.mode == InputMode::Editing && !snapshot.editing {
            self.mode = InputMode::Normal;
        }
        if snapshot.prompt.is_none() {
            self.editor.clear();
        }

        if snapshot.prompt != self.workflow.prompt {
            self.scroll_offset.remove(input::PROMPT_SCROLL);
        }
        if snapshot.messages != self.workflow.messages {
            self.scroll_offset.remove(input::MESSAGES_SCROLL);
        }

        self.workflow = snapshot;
    }

    /// Cap the stored scroll offsets to what the panels in `area` can show,
    /// so scrolling back responds on the first key press.
    pub fn clamp_scroll(&mut self, area: Rect, now: Instant) {
        let layout = build_layout(area);
        let limits = [
            (
                input::PROMPT_SCROLL,
                widgets::prompt_panel::max_scroll(layout.prompt_panel, self),
            ),
            (
                input::MESSAGES_SCROLL,
                widgets::messages::max_scroll(layout.messages, self, now),
            ),
        ];
        for (key, max) in limits {
            if let Some(offset) = self.scroll_offset.get_mut(key) {
                *offset = (*offset).min(max);
            }
        }
    }

    /// Whether any message is still being revealed at `now`.
    pub fn is_typing(&self, now: Instant) -> bool {
        self.typing.values().any(|t| !t.is_done(now))
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate, now: Instant) {
    match update {
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot, now),
        UiUpdate::EditStarted(text) => {
            state.editor.set_text(&text);
            state.mode = InputMode::Editing;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState, now: Instant) {
    let area = frame.area();
    let layout = build_layout(area);

    widgets::header::render(frame, layout.header, state);
    widgets::prompt_panel::render(frame, layout.prompt_panel, state);
    widgets::file_panel::render(frame, layout.file_panel, state);
    widgets::messages::render(frame, layout.messages, state, now);
    widgets::review_bar::render(frame, layout.review_bar, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    match state.mode {
        InputMode::PathEntry => widgets::path_entry::render(frame, area, state),
        InputMode::ConfirmQuit => widgets::quit_confirm::render(frame, area),
        InputMode::Normal | InputMode::Editing => {}
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen, bracketed paste).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    chars_per_second: u32,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    if let Err(e) = crossterm::execute!(std::io::stdout(), EnableBracketedPaste) {
        warn!("Could not enable bracketed paste: {}", e);
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(chars_per_second);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update, Instant::now()),
                    // App is shutting down
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                let command = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => input::handle_key(key_event, &mut view_state),
                    Some(Ok(Event::Paste(text))) => {
                        input::handle_paste(&text, &mut view_state);
                        None
                    }
                    // Mouse, focus and resize events need no handling.
                    Some(Ok(_)) => None,
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                };
                if let Some(command) = command {
                    let quit = command == UserCommand::Quit;
                    let _ = cmd_tx.send(command).await;
                    if quit {
                        break Ok(());
                    }
                }
            }

            _ = render_tick.tick() => {
                view_state.tick = view_state.tick.wrapping_add(1);
                let now = Instant::now();
                let drawn = terminal.draw(|frame| {
                    view_state.clamp_scroll(frame.area(), now);
                    render_frame(frame, &view_state, now);
                });
                if let Err(e) = drawn {
                    break Err(e.into());
                }
            }
        }
    };

    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
