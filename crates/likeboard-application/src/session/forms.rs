//! Login and registration payloads.

use likeboard_core::user::{Credential, UserProfile};
use likeboard_core::{LikeboardError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration form as filled in by the user.
///
/// `confirm_password` is checked locally and never sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub invitation_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub bio: String,
    /// Avatar already encoded as a `data:` URI.
    pub avatar: Option<String>,
}

impl RegistrationForm {
    /// Client-side checks run before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.password != self.confirm_password {
            return Err(LikeboardError::validation("Passwords do not match"));
        }
        Ok(())
    }

    pub(crate) fn to_request(&self) -> RegistrationRequest<'_> {
        RegistrationRequest {
            invitation_code: &self.invitation_code,
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            password: &self.password,
            bio: &self.bio,
            avatar: self.avatar.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RegistrationRequest<'a> {
    invitation_code: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
    bio: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<&'a str>,
}

/// Successful login/registration body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthResponse {
    pub access: Credential,
    pub user: UserProfile,
}
