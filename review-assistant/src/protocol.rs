// Message types exchanged between the TUI, the app orchestrator, and the
// backend request tasks.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::api::{PromptResponse, ReviewResponse};

// ---------------------------------------------------------------------------
// ReviewVersion
// ---------------------------------------------------------------------------

/// Which flavor of prompt and review the backend should generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewVersion {
    /// Concise and elegant prompts and reviews.
    #[default]
    Default,
    /// Detailed and elaborated prompts and reviews.
    Detailed,
}

impl ReviewVersion {
    /// The value sent to the backend in the `version` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewVersion::Default => "default",
            ReviewVersion::Detailed => "detailed",
        }
    }

    /// Label shown next to the version switch.
    pub fn label(self) -> &'static str {
        match self {
            ReviewVersion::Default => "Default Version",
            ReviewVersion::Detailed => "Detailed Version",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ReviewVersion::Default => ReviewVersion::Detailed,
            ReviewVersion::Detailed => ReviewVersion::Default,
        }
    }
}

impl fmt::Display for ReviewVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ReviewVersion::Default),
            "detailed" => Ok(ReviewVersion::Detailed),
            other => Err(format!(
                "unknown review version `{other}` (expected \"default\" or \"detailed\")"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Who produced a message in the message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Llm,
}

/// One entry in the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// 1-based position in the list at the time the message was appended.
    pub id: usize,
    pub sender: Sender,
    pub content: String,
}

// ---------------------------------------------------------------------------
// TUI -> app
// ---------------------------------------------------------------------------

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Load the PDF at this path as the selected file.
    SelectFile(PathBuf),
    /// Drop the selected file and everything derived from it.
    ClearFile,
    ToggleVersion,
    GeneratePrompt,
    /// Open the prompt editor seeded with the current prompt.
    BeginEdit,
    CancelEdit,
    /// Replace the prompt with the editor contents and close the editor.
    SaveEdit(String),
    GenerateReview,
    Quit,
}

// ---------------------------------------------------------------------------
// app -> TUI
// ---------------------------------------------------------------------------

/// Everything the TUI needs to render the workflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowSnapshot {
    pub selected_file_name: Option<String>,
    pub prompt: Option<String>,
    pub editing: bool,
    pub review_enabled: bool,
    pub generating_prompt: bool,
    pub generating_review: bool,
    pub version: ReviewVersion,
    pub messages: Vec<Message>,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full workflow state after any change.
    Snapshot(Box<WorkflowSnapshot>),
    /// The editor was opened; seed it with this text.
    EditStarted(String),
}

// ---------------------------------------------------------------------------
// request tasks -> app
// ---------------------------------------------------------------------------

/// Results of backend requests, tagged with the generation that issued them
/// so results from requests issued before a file clear can be discarded.
#[derive(Debug)]
pub enum ApiEvent {
    PromptReady {
        response: PromptResponse,
        generation: u64,
    },
    PromptFailed {
        message: String,
        generation: u64,
    },
    ReviewReady {
        response: ReviewResponse,
        generation: u64,
    },
    ReviewFailed {
        message: String,
        generation: u64,
    },
}

impl ApiEvent {
    pub fn generation(&self) -> u64 {
        match self {
            ApiEvent::PromptReady { generation, .. }
            | ApiEvent::PromptFailed { generation, .. }
            | ApiEvent::ReviewReady { generation, .. }
            | ApiEvent::ReviewFailed { generation, .. } => *generation,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
