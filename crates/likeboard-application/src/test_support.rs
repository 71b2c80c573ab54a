//! Test doubles shared by the application tests.

use crate::session::SessionStore;
use async_trait::async_trait;
use likeboard_core::http::{ApiRequest, ApiResponse, HttpTransport};
use likeboard_core::navigation::{Navigator, Notification, Notifier, View};
use likeboard_core::user::{Credential, UserProfile};
use likeboard_core::{LikeboardError, Result};
use likeboard_infrastructure::MemoryStore;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub fn ok(body: Value) -> ApiResponse {
    status(200, body)
}

pub fn status(code: u16, body: Value) -> ApiResponse {
    ApiResponse::new(code, body.to_string())
}

pub fn profile(id: i64) -> UserProfile {
    serde_json::from_value(json!({
        "id": id,
        "first_name": format!("User{}", id),
        "last_name": "Test",
        "email": format!("user{}@example.com", id),
    }))
    .unwrap()
}

/// Replays queued responses in order and records every request.
/// An empty queue behaves like an unreachable server.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
    yield_first: AtomicBool,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, response: ApiResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(LikeboardError::transport(message)));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Hands control back to the runtime before each reply, so concurrent
    /// callers interleave the way they would over a real connection.
    pub fn yield_before_reply(&self) {
        self.yield_first.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        if self.yield_first.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LikeboardError::transport("no scripted response")))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    views: Mutex<Vec<View>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn views(&self) -> Vec<View> {
        self.views.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, view: View) {
        self.views.lock().unwrap().push(view);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// A session store wired to in-memory doubles.
pub struct SessionFixture {
    pub session: Arc<SessionStore>,
    pub storage: Arc<MemoryStore>,
    pub transport: Arc<ScriptedTransport>,
    pub navigator: Arc<RecordingNavigator>,
}

impl SessionFixture {
    pub fn anonymous() -> Self {
        let storage = Arc::new(MemoryStore::new());
        let transport = ScriptedTransport::new();
        let navigator = RecordingNavigator::new();
        let session = Arc::new(SessionStore::load(
            storage.clone(),
            transport.clone(),
            navigator.clone(),
        ));
        Self {
            session,
            storage,
            transport,
            navigator,
        }
    }

    /// Signed in as user `id` with credential `token-{id}`.
    pub async fn authenticated(id: i64) -> Self {
        let fixture = Self::anonymous();
        fixture
            .session
            .set_auth_data(Credential::new(format!("token-{}", id)), profile(id))
            .await
            .unwrap();
        fixture
    }
}
