//! User-facing notices (progress indicators, confirmations, failure alerts)
//!
//! The core emits notices as fire-and-forget values; each surface (TUI,
//! console) decides how to present them.

use serde::Serialize;

/// How a notice should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeStyle {
    /// Animated/in-progress indicator, stays until dismissed or replaced
    Progress,
    /// Brief terminal confirmation
    Success,
    /// Failure alert with a title/message pair
    Failure,
}

/// A transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub style: NoticeStyle,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Notice {
    pub fn progress(title: impl Into<String>) -> Self {
        Self {
            style: NoticeStyle::Progress,
            title: title.into(),
            message: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self {
            style: NoticeStyle::Success,
            title: title.into(),
            message: None,
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: NoticeStyle::Failure,
            title: title.into(),
            message: Some(message.into()),
        }
    }

    pub fn is_progress(&self) -> bool {
        self.style == NoticeStyle::Progress
    }

    /// Single-line rendering, `title: message` when a message is present
    pub fn display_line(&self) -> String {
        match &self.message {
            Some(message) => format!("{}: {}", self.title, message),
            None => self.title.clone(),
        }
    }
}
