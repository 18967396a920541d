mod diff;
mod history;
mod language;
mod operation;

pub use diff::line_diff;
pub use history::{AiHistory, HISTORY_LIMIT, HistoryEntry};
pub use language::{detect_language, infer_framework};
pub use operation::Operation;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::OpenedFile;
use crate::error::Error;

/// Shown when the backend answers with an empty body.
pub const NO_CONTENT: &str = "No content";

/// Body sent to the AI backend.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRequest {
    #[serde(rename = "type")]
    pub operation: Operation,
    pub code: String,
    pub context: String,
    /// Language the answer should be written in (e.g. "en").
    pub language: String,
    pub file_name: String,
    pub file_path: String,
    pub editor_language: String,
    /// Framework hint derived from the file path, possibly empty.
    pub framework: String,
}

impl AiRequest {
    /// Builds the request for `operation` on the editor state.
    ///
    /// `buffer` is the editor's current text and `selection` the selected
    /// part of it. Selection-only operations fail on a blank selection;
    /// `document` sends the live buffer as context, everything else the
    /// saved file content.
    pub fn build(
        operation: Operation,
        file: &OpenedFile,
        buffer: &str,
        selection: Option<&str>,
        language: &str,
    ) -> crate::error::Result<Self> {
        let code = if operation.requires_selection() {
            match selection {
                Some(selected) if !selected.trim().is_empty() => selected.to_owned(),
                _ => return Err(Error::SelectionRequired(operation)),
            }
        } else {
            buffer.to_owned()
        };

        let context = match operation {
            Operation::Document => buffer.to_owned(),
            _ => file.content.clone(),
        };

        Ok(Self {
            operation,
            code,
            context,
            language: language.to_owned(),
            file_name: file.name.clone(),
            file_path: file.path.clone(),
            editor_language: file.editor_language().to_owned(),
            framework: infer_framework(&file.path).to_owned(),
        })
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct AiResponse {
    pub content: String,
}

/// Remote service that processes code.
#[async_trait]
pub trait AiBackend: Send + Sync {
    async fn process(&self, request: &AiRequest) -> Result<AiResponse>;
}

/// What the editor should do with an answer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Show `content` in the result panel.
    Display { title: &'static str, content: String },
    /// Replace the current selection with `replacement`.
    ReplaceSelection {
        title: &'static str,
        replacement: String,
    },
    /// Show a diff and keep `replacement` until the user applies it.
    RewritePreview {
        title: &'static str,
        replacement: String,
        diff: String,
    },
    Failed { title: &'static str, message: String },
}

impl Outcome {
    pub fn title(&self) -> &'static str {
        match self {
            Outcome::Display { title, .. }
            | Outcome::ReplaceSelection { title, .. }
            | Outcome::RewritePreview { title, .. }
            | Outcome::Failed { title, .. } => *title,
        }
    }

    /// Markdown for the result panel.
    pub fn panel_text(&self) -> String {
        match self {
            Outcome::Display { content, .. } => content.clone(),
            Outcome::ReplaceSelection { replacement, .. } => replacement.clone(),
            Outcome::RewritePreview { diff, .. } => format!("```diff\n{diff}\n```"),
            Outcome::Failed { message, .. } => message.clone(),
        }
    }
}

pub struct Assistant<B> {
    backend: B,
}

impl<B: AiBackend> Assistant<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Sends the request and turns the answer into an editor action.
    /// Backend errors become [`Outcome::Failed`] with a readable message.
    pub async fn run(&self, request: &AiRequest) -> Outcome {
        let operation = request.operation;
        let title = operation.title();

        let content = match self.backend.process(request).await {
            Ok(response) if response.content.is_empty() => NO_CONTENT.to_owned(),
            Ok(response) => response.content,
            Err(err) => {
                warn!(%operation, file = %request.file_path, error = %err, "AI request failed");
                return Outcome::Failed {
                    title,
                    message: format!("**Error:** {err}"),
                };
            }
        };

        match operation {
            Operation::Comment => Outcome::ReplaceSelection {
                title,
                replacement: content,
            },
            Operation::Rewrite => Outcome::RewritePreview {
                title,
                diff: line_diff(&request.code, &content),
                replacement: content,
            },
            Operation::Explain | Operation::Document | Operation::Test => {
                Outcome::Display { title, content }
            }
        }
    }
}
