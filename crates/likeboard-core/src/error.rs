//! Error types for the Likeboard client.

use crate::like::LikeRule;
use crate::user::UserId;
use thiserror::Error;

/// A shared error type for the entire Likeboard client.
///
/// Variants follow the failure taxonomy of the dashboard: transport failures,
/// server-reported failures, local precondition violations and session
/// invalidation, plus the ambient storage/config errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LikeboardError {
    /// The request never produced a response (connection refused, timeout...)
    #[error("Connection error: {message}")]
    Transport { message: String },

    /// The server answered with a non-success status
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// Local like preconditions failed; every violated rule is listed
    #[error("{}", join_rules(.0))]
    LikeRejected(Vec<LikeRule>),

    /// Attempted to remove a like that the session does not hold
    #[error("You have not liked marketer {marketer_id}")]
    NotLiked { marketer_id: UserId },

    /// Client-side form validation error
    #[error("{0}")]
    Validation(String),

    /// An authenticated call was attempted without a session
    #[error("Not logged in")]
    NotAuthenticated,

    /// The server rejected the credential (401); the session was cleared
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Durable storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

fn join_rules(rules: &[LikeRule]) -> String {
    rules
        .iter()
        .map(|rule| rule.message())
        .collect::<Vec<_>>()
        .join(", ")
}

impl LikeboardError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Server error
    pub fn server(status: u16, detail: impl Into<String>) -> Self {
        Self::Server {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error means the session is gone (anonymous or 401).
    ///
    /// The session store has already navigated away when one of these is
    /// returned, so front ends should not surface it a second time.
    pub fn is_session_error(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::SessionExpired)
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a server-reported error
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Returns the violated like rules, if this is a rejection.
    pub fn rejected_rules(&self) -> Option<&[LikeRule]> {
        match self {
            Self::LikeRejected(rules) => Some(rules),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LikeboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LikeboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LikeboardError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}


/// A type alias for `Result<T, LikeboardError>`.
pub type Result<T> = std::result::Result<T, LikeboardError>;
