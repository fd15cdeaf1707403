// Application state and orchestration logic.
//
// Owns the review workflow: selected PDF, generated prompt (optionally
// edited), extracted paper text, generated reviews and the loading flags.
// User commands arrive from the TUI; backend results arrive as `ApiEvent`s
// from short-lived request tasks. Every change is pushed to the TUI as a
// `WorkflowSnapshot`.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ReviewBackend, ReviewRequest};
use crate::protocol::{
    ApiEvent, Message, ReviewVersion, Sender, UiUpdate, UserCommand, WorkflowSnapshot,
};

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// A PDF chosen by the user, held in memory until it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Reasons a path cannot become the selected file.
#[derive(Debug, thiserror::Error)]
pub enum SelectFileError {
    #[error("{path} is not a PDF file")]
    NotPdf { path: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete workflow state.
pub struct AppState {
    pub selected_file: Option<SelectedFile>,
    /// Text the backend extracted from the last submitted PDF.
    pub paper_content: Option<String>,
    pub prompt: Option<String>,
    pub editing: bool,
    pub review: Option<String>,
    pub review_enabled: bool,
    pub generating_prompt: bool,
    pub generating_review: bool,
    pub version: ReviewVersion,
    pub messages: Vec<Message>,
    /// Bumped whenever the file is cleared. Request results carrying an
    /// older generation are discarded in `handle_api_event`.
    pub generation: u64,
    pub backend: Arc<dyn ReviewBackend>,
    /// Request tasks report back through clones of this sender.
    pub api_tx: mpsc::Sender<ApiEvent>,
    pub prompt_task: Option<JoinHandle<()>>,
    pub review_task: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn ReviewBackend>,
        version: ReviewVersion,
        api_tx: mpsc::Sender<ApiEvent>,
    ) -> Self {
        AppState {
            selected_file: None,
            paper_content: None,
            prompt: None,
            editing: false,
            review: None,
            review_enabled: false,
            generating_prompt: false,
            generating_review: false,
            version,
            messages: Vec::new(),
            generation: 0,
            backend,
            api_tx,
            prompt_task: None,
            review_task: None,
        }
    }

    /// Build the snapshot the TUI renders from.
    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            selected_file_name: self.selected_file.as_ref().map(|f| f.name.clone()),
            prompt: self.prompt.clone(),
            editing: self.editing,
            review_enabled: self.review_enabled,
            generating_prompt: self.generating_prompt,
            generating_review: self.generating_review,
            version: self.version,
            messages: self.messages.clone(),
        }
    }

    // -- file selection --

    /// Make `file` the selected file. The review action is disabled until a
    /// prompt is generated for it.
    pub fn select_file(&mut self, file: SelectedFile) {
        info!("Selected {} ({} bytes)", file.name, file.bytes.len());
        self.selected_file = Some(file);
        self.review_enabled = false;
    }

    /// Drop the selected file and everything generated downstream of it.
    ///
    /// In-flight requests are aborted and their results, should any still
    /// arrive, are ignored.
    pub fn clear_file(&mut self) {
        self.cancel_requests();
        self.generation += 1;
        self.selected_file = None;
        self.prompt = None;
        self.editing = false;
        self.review = None;
        self.review_enabled = false;
        info!("Cleared selected file (gen: {})", self.generation);
    }

    pub fn toggle_version(&mut self) {
        self.version = self.version.toggled();
        info!("Switched to {}", self.version.label());
    }

    // -- prompt editing --

    /// Open the editor. Returns the text to seed it with, or `None` when
    /// there is no prompt to edit.
    pub fn begin_edit(&mut self) -> Option<String> {
        let prompt = self.prompt.clone()?;
        self.editing = true;
        Some(prompt)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
    }

    pub fn save_edit(&mut self, text: String) {
        if !self.editing {
            debug!("SaveEdit received while not editing, ignoring");
            return;
        }
        self.prompt = Some(text);
        self.editing = false;
    }

    // -- backend requests --

    /// Abort any in-flight request tasks and reset their loading flags.
    pub fn cancel_requests(&mut self) {
        if let Some(handle) = self.prompt_task.take() {
            handle.abort();
            info!("Cancelled in-flight prompt request");
        }
        if let Some(handle) = self.review_task.take() {
            handle.abort();
            info!("Cancelled in-flight review request");
        }
        self.generating_prompt = false;
        self.generating_review = false;
    }

    /// Submit the selected PDF for prompt generation.
    ///
    /// Returns `false` without doing anything when no file is selected or a
    /// prompt request is already running.
    pub fn trigger_prompt_generation(&mut self) -> bool {
        if self.generating_prompt {
            debug!("Prompt generation already in flight");
            return false;
        }
        let Some(file) = self.selected_file.clone() else {
            debug!("GeneratePrompt without a selected file, ignoring");
            return false;
        };

        self.generating_prompt = true;
        let backend = Arc::clone(&self.backend);
        let tx = self.api_tx.clone();
        let version = self.version;
        let generation = self.generation;

        let handle = tokio::spawn(async move {
            let event = match backend.submit_pdf(&file.name, file.bytes, version).await {
                Ok(response) => ApiEvent::PromptReady {
                    response,
                    generation,
                },
                Err(e) => ApiEvent::PromptFailed {
                    message: e.to_string(),
                    generation,
                },
            };
            let _ = tx.send(event).await;
        });

        self.prompt_task = Some(handle);
        info!("Requested prompt generation ({}, gen: {})", version, generation);
        true
    }

    /// Request a review for the current prompt and paper content.
    ///
    /// Returns `false` without doing anything unless the review action is
    /// enabled, both inputs are present, and no review request is running.
    pub fn trigger_review_generation(&mut self) -> bool {
        if !self.review_enabled || self.generating_review {
            debug!("GenerateReview not available right now");
            return false;
        }
        let (Some(prompt), Some(paper_content)) = (&self.prompt, &self.paper_content) else {
            debug!("GenerateReview without prompt or paper content, ignoring");
            return false;
        };

        self.generating_review = true;
        let request = ReviewRequest::new(paper_content, prompt, self.version);
        let backend = Arc::clone(&self.backend);
        let tx = self.api_tx.clone();
        let generation = self.generation;

        let handle = tokio::spawn(async move {
            let event = match backend.generate_review(&request).await {
                Ok(response) => ApiEvent::ReviewReady {
                    response,
                    generation,
                },
                Err(e) => ApiEvent::ReviewFailed {
                    message: e.to_string(),
                    generation,
                },
            };
            let _ = tx.send(event).await;
        });

        self.review_task = Some(handle);
        info!("Requested review generation ({}, gen: {})", self.version, generation);
        true
    }

    /// Fold a backend result into the workflow. Returns `false` when the
    /// event was stale and ignored.
    pub fn apply_api_event(&mut self, event: ApiEvent) -> bool {
        if event.generation() != self.generation {
            debug!(
                "Discarding stale API event (event gen: {}, current gen: {})",
                event.generation(),
                self.generation
            );
            return false;
        }

        match event {
            ApiEvent::PromptReady { response, .. } => {
                info!(
                    "Prompt ready ({} chars, paper content {} chars)",
                    response.gen_prompt.len(),
                    response.paper_content.len()
                );
                self.prompt = Some(response.gen_prompt);
                self.paper_content = Some(response.paper_content);
                self.selected_file = None;
                self.editing = false;
                self.review_enabled = true;
                self.generating_prompt = false;
                self.prompt_task = None;
            }
            ApiEvent::PromptFailed { message, .. } => {
                warn!("Error generating prompt: {}", message);
                self.generating_prompt = false;
                self.prompt_task = None;
            }
            ApiEvent::ReviewReady { response, .. } => {
                info!("Review ready ({} chars)", response.gen_review.len());
                self.messages.push(Message {
                    id: self.messages.len() + 1,
                    sender: Sender::Llm,
                    content: response.gen_review.clone(),
                });
                self.review = Some(response.gen_review);
                self.review_enabled = false;
                self.generating_review = false;
                self.review_task = None;
            }
            ApiEvent::ReviewFailed { message, .. } => {
                warn!("Error generating review: {}", message);
                self.generating_review = false;
                self.review_task = None;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// Read a PDF from disk. Only paths with a `.pdf` extension are accepted.
pub async fn load_pdf(path: &Path) -> Result<SelectedFile, SelectFileError> {
    let display = path.display().to_string();
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(SelectFileError::NotPdf { path: display });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SelectFileError::Read {
            path: display.clone(),
            source,
        })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(display);

    Ok(SelectedFile { name, bytes })
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. Backend results from request tasks
/// 2. User commands from the TUI
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut api_rx: mpsc::Receiver<ApiEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_snapshot(&state, &ui_tx).await;

    // AppState holds a sender, so api_rx only closes if that is dropped.
    // Guard anyway so select! never spins on a closed channel.
    let mut api_open = true;

    loop {
        tokio::select! {
            api_event = api_rx.recv(), if api_open => {
                match api_event {
                    Some(event) => handle_api_event(&mut state, event, &ui_tx).await,
                    None => {
                        info!("API channel closed");
                        api_open = false;
                    }
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => handle_user_command(&mut state, cmd, &ui_tx).await,
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    state.cancel_requests();
    info!("Application event loop exiting");
    Ok(())
}

/// Apply a backend result and push the new state to the TUI.
pub async fn handle_api_event(
    state: &mut AppState,
    event: ApiEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    if state.apply_api_event(event) {
        send_snapshot(state, ui_tx).await;
    }
}

/// Handle a user command from the TUI.
pub async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SelectFile(path) => match load_pdf(&path).await {
            Ok(file) => state.select_file(file),
            Err(e) => {
                warn!("File selection rejected: {}", e);
                return;
            }
        },
        UserCommand::ClearFile => state.clear_file(),
        UserCommand::ToggleVersion => state.toggle_version(),
        UserCommand::GeneratePrompt => {
            if !state.trigger_prompt_generation() {
                return;
            }
        }
        UserCommand::BeginEdit => match state.begin_edit() {
            Some(text) => {
                let _ = ui_tx.send(UiUpdate::EditStarted(text)).await;
            }
            None => return,
        },
        UserCommand::CancelEdit => state.cancel_edit(),
        UserCommand::SaveEdit(text) => state.save_edit(text),
        UserCommand::GenerateReview => {
            if !state.trigger_review_generation() {
                return;
            }
        }
        UserCommand::Quit => {
            // Handled in the main loop
            return;
        }
    }
    send_snapshot(state, ui_tx).await;
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.snapshot())))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, DemoBackend, PromptResponse, ReviewResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend that always fails with a 500, recording what it was asked.
    #[derive(Default)]
    struct FailingBackend {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReviewBackend for FailingBackend {
        async fn submit_pdf(
            &self,
            file_name: &str,
            _bytes: Vec<u8>,
            _version: ReviewVersion,
        ) -> Result<PromptResponse, ApiError> {
            self.calls.lock().unwrap().push(format!("submit:{file_name}"));
            Err(ApiError::Status {
                status: 500,
                message: "Failed to parse PDF into JSON".into(),
            })
        }

        async fn generate_review(
            &self,
            request: &ReviewRequest,
        ) -> Result<ReviewResponse, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("review:{}", request.version));
            Err(ApiError::Status {
                status: 500,
                message: "CUDA out of memory".into(),
            })
        }
    }

    fn demo_state() -> (AppState, mpsc::Receiver<ApiEvent>) {
        let (api_tx, api_rx) = mpsc::channel(16);
        let state = AppState::new(Arc::new(DemoBackend), ReviewVersion::Default, api_tx);
        (state, api_rx)
    }

    fn pdf(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            bytes: b"%PDF-1.4 test".to_vec(),
        }
    }

    /// Run the prompt step to completion against the demo backend.
    async fn with_prompt(state: &mut AppState, api_rx: &mut mpsc::Receiver<ApiEvent>) {
        state.select_file(pdf("paper.pdf"));
        assert!(state.trigger_prompt_generation());
        let event = api_rx.recv().await.unwrap();
        assert!(state.apply_api_event(event));
    }

    #[test]
    fn new_state_is_empty() {
        let (state, _rx) = demo_state();
        assert!(state.selected_file.is_none());
        assert!(state.prompt.is_none());
        assert!(state.paper_content.is_none());
        assert!(state.review.is_none());
        assert!(!state.editing);
        assert!(!state.review_enabled);
        assert!(!state.generating_prompt);
        assert!(!state.generating_review);
        assert!(state.messages.is_empty());
        assert_eq!(state.version, ReviewVersion::Default);
    }

    #[test]
    fn select_file_disables_review() {
        let (mut state, _rx) = demo_state();
        state.review_enabled = true;
        state.select_file(pdf("a.pdf"));
        assert_eq!(state.selected_file.as_ref().unwrap().name, "a.pdf");
        assert!(!state.review_enabled);
    }

    #[test]
    fn toggle_version_flips() {
        let (mut state, _rx) = demo_state();
        state.toggle_version();
        assert_eq!(state.version, ReviewVersion::Detailed);
        state.toggle_version();
        assert_eq!(state.version, ReviewVersion::Default);
    }

    #[test]
    fn generate_prompt_without_file_is_noop() {
        let (mut state, _rx) = demo_state();
        assert!(!state.trigger_prompt_generation());
        assert!(!state.generating_prompt);
        assert!(state.prompt_task.is_none());
    }

    #[test]
    fn review_disabled_until_prompt_exists() {
        let (mut state, _rx) = demo_state();
        assert!(!state.trigger_review_generation());
        // Even forcing the flag does nothing without prompt and paper text.
        state.review_enabled = true;
        assert!(!state.trigger_review_generation());
        assert!(!state.generating_review);
    }

    #[tokio::test]
    async fn prompt_success_updates_workflow() {
        let (mut state, mut api_rx) = demo_state();
        state.select_file(pdf("paper.pdf"));
        assert!(state.trigger_prompt_generation());
        assert!(state.generating_prompt);
        // A second press while in flight is ignored.
        assert!(!state.trigger_prompt_generation());

        let event = api_rx.recv().await.unwrap();
        assert!(state.apply_api_event(event));

        assert!(!state.generating_prompt);
        assert!(state.prompt.as_deref().unwrap().starts_with("Default Version Prompt"));
        assert!(state.paper_content.is_some());
        assert!(state.selected_file.is_none());
        assert!(state.review_enabled);
        assert!(!state.editing);
    }

    #[tokio::test]
    async fn prompt_uses_selected_version() {
        let (mut state, mut api_rx) = demo_state();
        state.toggle_version();
        with_prompt(&mut state, &mut api_rx).await;
        assert!(state.prompt.as_deref().unwrap().starts_with("Detailed Version Prompt"));
    }

    #[tokio::test]
    async fn review_success_appends_message() {
        let (mut state, mut api_rx) = demo_state();
        with_prompt(&mut state, &mut api_rx).await;

        assert!(state.trigger_review_generation());
        assert!(state.generating_review);
        assert!(!state.trigger_review_generation());

        let event = api_rx.recv().await.unwrap();
        assert!(state.apply_api_event(event));

        assert!(!state.generating_review);
        assert!(!state.review_enabled);
        assert!(state.review.as_deref().unwrap().starts_with("Default Version Review"));
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].id, 1);
        assert_eq!(state.messages[0].sender, Sender::Llm);
        assert_eq!(Some(&state.messages[0].content), state.review.as_ref());
    }

    #[tokio::test]
    async fn second_review_needs_new_prompt_and_gets_next_id() {
        let (mut state, mut api_rx) = demo_state();
        with_prompt(&mut state, &mut api_rx).await;
        state.trigger_review_generation();
        let event = api_rx.recv().await.unwrap();
        state.apply_api_event(event);

        assert!(!state.trigger_review_generation());

        with_prompt(&mut state, &mut api_rx).await;
        assert!(state.trigger_review_generation());
        let event = api_rx.recv().await.unwrap();
        state.apply_api_event(event);
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].id, 2);
    }

    #[tokio::test]
    async fn prompt_failure_only_resets_loading_flag() {
        let (api_tx, mut api_rx) = mpsc::channel(16);
        let backend = Arc::new(FailingBackend::default());
        let mut state = AppState::new(backend.clone(), ReviewVersion::Default, api_tx);
        state.select_file(pdf("broken.pdf"));

        assert!(state.trigger_prompt_generation());
        let event = api_rx.recv().await.unwrap();
        assert!(matches!(event, ApiEvent::PromptFailed { .. }));
        state.apply_api_event(event);

        assert!(!state.generating_prompt);
        assert!(state.prompt.is_none());
        assert!(!state.review_enabled);
        // The file stays selected so the user can retry.
        assert_eq!(state.selected_file.as_ref().unwrap().name, "broken.pdf");
        assert_eq!(*backend.calls.lock().unwrap(), vec!["submit:broken.pdf"]);
    }

    #[tokio::test]
    async fn review_failure_keeps_review_enabled() {
        let (api_tx, mut api_rx) = mpsc::channel(16);
        let backend = Arc::new(FailingBackend::default());
        let mut state = AppState::new(backend.clone(), ReviewVersion::Detailed, api_tx);
        state.prompt = Some("1. Is it novel?".into());
        state.paper_content = Some("text".into());
        state.review_enabled = true;

        assert!(state.trigger_review_generation());
        let event = api_rx.recv().await.unwrap();
        state.apply_api_event(event);

        assert!(!state.generating_review);
        assert!(state.review_enabled);
        assert!(state.messages.is_empty());
        assert_eq!(*backend.calls.lock().unwrap(), vec!["review:detailed"]);
    }

    #[tokio::test]
    async fn clear_file_resets_downstream_state() {
        let (mut state, mut api_rx) = demo_state();
        with_prompt(&mut state, &mut api_rx).await;
        state.begin_edit();
        state.select_file(pdf("next.pdf"));

        state.clear_file();

        assert!(state.selected_file.is_none());
        assert!(state.prompt.is_none());
        assert!(!state.editing);
        assert!(state.review.is_none());
        assert!(!state.review_enabled);
        // Extracted text is left alone.
        assert!(state.paper_content.is_some());
    }

    #[tokio::test]
    async fn stale_prompt_after_clear_is_ignored() {
        let (mut state, mut api_rx) = demo_state();
        state.select_file(pdf("paper.pdf"));
        state.trigger_prompt_generation();
        let stale = ApiEvent::PromptReady {
            response: PromptResponse {
                state: None,
                gen_prompt: "old".into(),
                paper_content: "old".into(),
            },
            generation: state.generation,
        };

        state.clear_file();
        assert!(!state.generating_prompt);
        assert!(!state.apply_api_event(stale));
        assert!(state.prompt.is_none());
        assert!(!state.review_enabled);

        // The aborted task never reports.
        tokio::task::yield_now().await;
        assert!(api_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn stale_review_after_clear_is_ignored() {
        let (mut state, mut api_rx) = demo_state();
        with_prompt(&mut state, &mut api_rx).await;
        assert!(state.trigger_review_generation());
        let stale = ApiEvent::ReviewReady {
            response: ReviewResponse {
                gen_review: "review of the old paper".into(),
            },
            generation: state.generation,
        };

        state.clear_file();
        assert!(!state.generating_review);
        assert!(!state.apply_api_event(stale));
        assert!(state.messages.is_empty());
        assert!(state.review.is_none());
        assert!(!state.review_enabled);

        tokio::task::yield_now().await;
        assert!(api_rx.try_recv().is_err());
    }

    #[test]
    fn begin_edit_requires_prompt() {
        let (mut state, _rx) = demo_state();
        assert!(state.begin_edit().is_none());
        assert!(!state.editing);
    }

    #[test]
    fn edit_save_replaces_prompt() {
        let (mut state, _rx) = demo_state();
        state.prompt = Some("original".into());
        assert_eq!(state.begin_edit().as_deref(), Some("original"));
        assert!(state.editing);
        state.save_edit("edited".into());
        assert!(!state.editing);
        assert_eq!(state.prompt.as_deref(), Some("edited"));
    }

    #[test]
    fn edit_cancel_keeps_prompt() {
        let (mut state, _rx) = demo_state();
        state.prompt = Some("original".into());
        state.begin_edit();
        state.cancel_edit();
        assert!(!state.editing);
        assert_eq!(state.prompt.as_deref(), Some("original"));
    }

    #[test]
    fn save_without_editing_is_ignored() {
        let (mut state, _rx) = demo_state();
        state.prompt = Some("original".into());
        state.save_edit("sneaky".into());
        assert_eq!(state.prompt.as_deref(), Some("original"));
    }

    #[tokio::test]
    async fn edited_prompt_is_sent_for_review() {
        let (api_tx, mut api_rx) = mpsc::channel(16);
        let backend = Arc::new(FailingBackend::default());
        let mut state = AppState::new(backend, ReviewVersion::Default, api_tx);
        state.prompt = Some("generated".into());
        state.paper_content = Some("paper".into());
        state.review_enabled = true;
        state.begin_edit();
        state.save_edit("my questions".into());

        assert!(state.trigger_review_generation());
        let _ = api_rx.recv().await.unwrap();
        assert_eq!(state.prompt.as_deref(), Some("my questions"));
    }

    #[test]
    fn snapshot_mirrors_state() {
        let (mut state, _rx) = demo_state();
        state.select_file(pdf("a.pdf"));
        state.prompt = Some("p".into());
        state.editing = true;
        state.version = ReviewVersion::Detailed;
        let snap = state.snapshot();
        assert_eq!(snap.selected_file_name.as_deref(), Some("a.pdf"));
        assert_eq!(snap.prompt.as_deref(), Some("p"));
        assert!(snap.editing);
        assert_eq!(snap.version, ReviewVersion::Detailed);
    }

    #[tokio::test]
    async fn load_pdf_rejects_other_extensions() {
        let err = load_pdf(Path::new("notes.txt")).await.unwrap_err();
        assert!(matches!(err, SelectFileError::NotPdf { .. }));
    }

    #[tokio::test]
    async fn load_pdf_reads_file_and_name() {
        let dir = std::env::temp_dir().join("review_app_load_pdf");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Paper.PDF");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let file = load_pdf(&path).await.unwrap();
        assert_eq!(file.name, "Paper.PDF");
        assert_eq!(file.bytes, b"%PDF-1.7");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn load_pdf_missing_file_is_read_error() {
        let err = load_pdf(Path::new("/definitely/not/here.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, SelectFileError::Read { .. }));
    }

    #[tokio::test]
    async fn begin_edit_command_seeds_editor() {
        let (mut state, _api_rx) = demo_state();
        state.prompt = Some("seed".into());
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_user_command(&mut state, UserCommand::BeginEdit, &ui_tx).await;

        assert_eq!(ui_rx.recv().await, Some(UiUpdate::EditStarted("seed".into())));
        match ui_rx.recv().await {
            Some(UiUpdate::Snapshot(snap)) => assert!(snap.editing),
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ignored_commands_send_nothing() {
        let (mut state, _api_rx) = demo_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_user_command(&mut state, UserCommand::GeneratePrompt, &ui_tx).await;
        handle_user_command(&mut state, UserCommand::GenerateReview, &ui_tx).await;
        handle_user_command(&mut state, UserCommand::BeginEdit, &ui_tx).await;
        handle_user_command(
            &mut state,
            UserCommand::SelectFile("missing.txt".into()),
            &ui_tx,
        )
        .await;

        assert!(ui_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn run_sends_initial_snapshot_and_quits() {
        let (mut state, api_rx) = demo_state();
        state.version = ReviewVersion::Detailed;
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        run(api_rx, cmd_rx, ui_tx, state).await.unwrap();

        match ui_rx.recv().await {
            Some(UiUpdate::Snapshot(snap)) => assert_eq!(snap.version, ReviewVersion::Detailed),
            other => panic!("expected initial snapshot, got {other:?}"),
        }
    }
}
