use super::forms::{AuthResponse, LoginRequest, RegistrationForm};
use crate::endpoints;
use likeboard_core::http::{ApiRequest, ApiResponse, HttpTransport, merge_headers};
use likeboard_core::navigation::{Navigator, View};
use likeboard_core::storage::KeyValueStore;
use likeboard_core::user::{Credential, UserId, UserProfile, UserStatsPatch};
use likeboard_core::{LikeboardError, Result};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage key of the raw bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key of the JSON-encoded profile.
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, Default)]
struct SessionState {
    credential: Option<Credential>,
    user: Option<UserProfile>,
}

/// Holds the credential and profile of the signed-in user.
///
/// Every authenticated call in the client goes through
/// [`SessionStore::authenticated_request`], which attaches the bearer header
/// and turns a 401 into a forced logout. The session is either fully present
/// (credential and profile) or fully absent, in memory and on disk.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn KeyValueStore>,
    transport: Arc<dyn HttpTransport>,
    navigator: Arc<dyn Navigator>,
}

impl SessionStore {
    /// Creates the store and eagerly loads any persisted session.
    ///
    /// A half-written session (token without profile or vice versa) or an
    /// unreadable profile is discarded and both keys are cleared.
    pub fn load(
        storage: Arc<dyn KeyValueStore>,
        transport: Arc<dyn HttpTransport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let state = match Self::read_persisted(storage.as_ref()) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding persisted session");
                if let Err(e) = storage.remove_all(&[TOKEN_KEY, USER_KEY]) {
                    tracing::warn!(error = %e, "Failed to clear persisted session");
                }
                SessionState::default()
            }
        };

        if let Some(user) = &state.user {
            tracing::info!(user_id = %user.id, "Restored session");
        }

        Self {
            state: RwLock::new(state),
            storage,
            transport,
            navigator,
        }
    }

    fn read_persisted(storage: &dyn KeyValueStore) -> Result<SessionState> {
        let token = storage.get(TOKEN_KEY)?;
        let user = storage.get(USER_KEY)?;

        match (token, user) {
            (Some(token), Some(user)) => Ok(SessionState {
                credential: Some(Credential::new(token)),
                user: Some(serde_json::from_str(&user)?),
            }),
            (None, None) => Ok(SessionState::default()),
            _ => Err(LikeboardError::storage(
                "credential and profile must be stored together",
            )),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.credential.is_some()
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.state.read().await.user.clone()
    }

    pub async fn current_user_id(&self) -> Option<UserId> {
        self.state.read().await.user.as_ref().map(|u| u.id)
    }

    /// Replaces the session after a successful login or registration.
    pub async fn set_auth_data(&self, credential: Credential, user: UserProfile) -> Result<()> {
        // Profile first: a crash between the writes leaves a profile without
        // a token, which `load` discards.
        self.storage.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.storage.set(TOKEN_KEY, credential.as_str())?;

        tracing::info!(user_id = %user.id, "Session established");

        let mut state = self.state.write().await;
        state.credential = Some(credential);
        state.user = Some(user);
        Ok(())
    }

    /// Clears the session everywhere and returns to the login view.
    pub async fn logout(&self) {
        {
            let mut state = self.state.write().await;
            *state = SessionState::default();
        }
        if let Err(e) = self.storage.remove_all(&[TOKEN_KEY, USER_KEY]) {
            tracing::error!(error = %e, "Failed to clear persisted session");
        }

        tracing::info!("Logged out");
        self.navigator.navigate(View::Login);
    }

    /// Sends `request` with the session credential.
    ///
    /// Caller headers are layered over the defaults (`Authorization`,
    /// `Content-Type`) and override them on a name clash.
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` without a session; nothing is sent and the
    ///   login view is requested.
    /// - `SessionExpired` on a 401; the session is cleared first.
    /// - `Transport` when no response was received.
    ///
    /// Any other status, success or not, is returned for the caller to read.
    pub async fn authenticated_request(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        let credential = self.state.read().await.credential.clone();
        let Some(credential) = credential else {
            tracing::debug!(path = %request.path, "Blocked unauthenticated request");
            self.navigator.navigate(View::Login);
            return Err(LikeboardError::NotAuthenticated);
        };

        let defaults = vec![
            ("Authorization".to_string(), credential.bearer()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        request.headers = merge_headers(defaults, &request.headers);

        let path = request.path.clone();
        let response = self.transport.send(request).await?;

        if response.is_unauthorized() {
            tracing::warn!(%path, "Credential rejected, ending session");
            self.logout().await;
            return Err(LikeboardError::SessionExpired);
        }

        Ok(response)
    }

    /// Shallow-merges stats into the profile and persists it.
    pub async fn update_user_stats(&self, patch: &UserStatsPatch) -> Result<()> {
        let mut state = self.state.write().await;
        let Some(user) = state.user.as_mut() else {
            return Ok(());
        };

        user.apply_stats(patch);
        self.storage.set(USER_KEY, &serde_json::to_string(user)?)?;
        Ok(())
    }

    /// Routing policy for the view a front end is about to show.
    ///
    /// Returns the view to go to instead, if any, after telling the navigator.
    pub async fn route(&self, view: View) -> Option<View> {
        let authenticated = self.is_authenticated().await;

        let target = if view.requires_auth() && !authenticated {
            Some(View::Login)
        } else if view.is_entry() && authenticated {
            Some(View::Dashboard)
        } else {
            None
        };

        if let Some(target) = target {
            self.navigator.navigate(target);
        }
        target
    }

    /// Logs in with email and password.
    ///
    /// On failure the session is left untouched.
    pub async fn login(&self, request: &LoginRequest) -> Result<UserProfile> {
        let request = ApiRequest::post(endpoints::LOGIN)
            .with_header("Content-Type", "application/json")
            .json(request)?;
        self.authenticate(request, "Login failed").await
    }

    /// Registers with an invitation code and signs the new user in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<UserProfile> {
        form.validate()?;

        let request = ApiRequest::post(endpoints::REGISTER)
            .with_header("Content-Type", "application/json")
            .json(&form.to_request())?;
        self.authenticate(request, "Registration failed").await
    }

    async fn authenticate(&self, request: ApiRequest, fallback: &str) -> Result<UserProfile> {
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(response.into_error(fallback));
        }

        let auth: AuthResponse = response.json()?;
        let user = auth.user.clone();
        self.set_auth_data(auth.access, auth.user).await?;
        self.navigator.navigate(View::Dashboard);
        Ok(user)
    }

    /// Checks an invitation code before registering.
    ///
    /// Returns the server's confirmation message.
    pub async fn validate_invitation(&self, code: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct InvitationStatus {
            #[serde(default)]
            message: Option<String>,
        }

        let request = ApiRequest::post(endpoints::VALIDATE_INVITATION)
            .with_header("Content-Type", "application/json")
            .json(&serde_json::json!({ "code": code }))?;
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(response.into_error("Invalid invitation code"));
        }

        let status: InvitationStatus = response.json()?;
        Ok(status
            .message
            .unwrap_or_else(|| "Invitation code is valid".to_string()))
    }
}
