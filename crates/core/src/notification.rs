//! User-facing notifications raised after a submit attempt.

use serde::{Deserialize, Serialize};

const SENT_TITLE: &str = "Message sent successfully!";
const SENT_DESCRIPTION: &str = "Thank you for your message. I'll get back to you soon.";
const FAILED_TITLE: &str = "Error sending message";
const FAILED_FALLBACK: &str = "Please try again later or contact me directly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Success,
    Error,
}

/// A toast-style message for the presentation layer to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    /// Confirmation that the message was accepted.
    pub fn sent() -> Self {
        Self {
            title: SENT_TITLE.into(),
            description: SENT_DESCRIPTION.into(),
            variant: NotificationVariant::Success,
        }
    }

    /// Failure report carrying `reason` verbatim. A blank reason falls back
    /// to a generic hint.
    pub fn failed(reason: &str) -> Self {
        let description = if reason.trim().is_empty() {
            FAILED_FALLBACK.to_string()
        } else {
            reason.to_string()
        };
        Self {
            title: FAILED_TITLE.into(),
            description,
            variant: NotificationVariant::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.variant == NotificationVariant::Success
    }
}
