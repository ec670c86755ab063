//! UI/backend events and error modeling for the studio controller.

use shared::protocol::CompileOutcome;

pub enum UiEvent {
    Info(String),
    SourceFileLoaded { name: String, text: String },
    CompileFinished(CompileOutcome),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Io,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Compile,
    LoadFile,
    SaveFile,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Io => "File",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

pub fn describe_startup_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("failed to build runtime") {
        "Backend worker startup failure; the editor remains usable but compiles are disabled."
            .to_string()
    } else {
        format!("Backend startup error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("unsupported")
            || message_lower.contains("invalid")
            || message_lower.contains("expected")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("failed to read")
            || message_lower.contains("failed to write")
            || message_lower.contains("permission")
            || message_lower.contains("not found")
            || message_lower.contains("directory")
        {
            UiErrorCategory::Io
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}
