//! Front-end seams: view routing and transient notifications.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum View {
    Login,
    Register,
    Dashboard,
}

impl View {
    /// Entry views are reachable without a session.
    pub fn is_entry(&self) -> bool {
        matches!(self, View::Login | View::Register)
    }

    pub fn requires_auth(&self) -> bool {
        !self.is_entry()
    }
}

/// Receives navigation decisions made by the session store.
pub trait Navigator: Send + Sync {
    fn navigate(&self, view: View);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Shows transient notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}
