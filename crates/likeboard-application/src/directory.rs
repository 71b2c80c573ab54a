//! DirectoryView - the marketer directory on the dashboard.
//!
//! Owns the fetched marketer list, the active filter and search term, and the
//! cached aggregate stats of the session user. Rendering is delegated to the
//! pure [`render_cards`] projection; this type only sequences fetches,
//! optimistic patches and user notifications.

use crate::endpoints;
use crate::session::SessionStore;
use likeboard_core::http::ApiRequest;
use likeboard_core::like::LikeRule;
use likeboard_core::marketer::{
    DirectoryFilter, DirectoryRender, Marketer, MarketerCard, MarketerPage, UserStats,
    filter_marketers, render_cards,
};
use likeboard_core::navigation::Notifier;
use likeboard_core::user::UserId;
use likeboard_core::{LikeboardError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

const LOAD_FAILED: &str = "Failed to load marketers";
const LOAD_CONNECTION_ERROR: &str = "Connection error while loading marketers";
const LIKE_FAILED: &str = "Failed to send like";
const LIKE_CONNECTION_ERROR: &str = "Connection error while sending like";
const LIKE_SENT: &str = "Like sent successfully!";

#[derive(Debug, Default)]
struct DirectoryState {
    marketers: Vec<Marketer>,
    filter: DirectoryFilter,
    search: Option<String>,
    stats: UserStats,
}

pub struct DirectoryView {
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<DirectoryState>,
}

impl DirectoryView {
    pub fn new(session: Arc<SessionStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            state: RwLock::new(DirectoryState::default()),
        }
    }

    /// Fetches the directory, replacing the current list.
    ///
    /// The list is cleared before the request so a failed load never leaves
    /// stale cards behind. Failures are notified and returned; session errors
    /// are only returned, the session store has already navigated away.
    pub async fn load_marketers(&self) -> Result<()> {
        self.state.write().await.marketers.clear();

        let page = match self.fetch_marketers().await {
            Ok(page) => page,
            Err(e) => {
                self.notify_failure(&e, LOAD_CONNECTION_ERROR, LOAD_FAILED);
                return Err(e);
            }
        };

        let (marketers, stats) = page.into_parts();
        tracing::debug!(count = marketers.len(), "Loaded marketers");

        let mut state = self.state.write().await;
        state.marketers = marketers;
        if let Some(stats) = stats {
            state.stats = stats;
        }
        Ok(())
    }

    async fn fetch_marketers(&self) -> Result<MarketerPage> {
        let response = self
            .session
            .authenticated_request(ApiRequest::get(endpoints::MARKETERS))
            .await?;
        if !response.is_success() {
            return Err(response.into_error(LOAD_FAILED));
        }
        response.json()
    }

    /// Refreshes the cached stats. Best effort: failures are logged only.
    pub async fn load_user_stats(&self) {
        match self.fetch_user_stats().await {
            Ok(stats) => self.state.write().await.stats = stats,
            Err(e) => tracing::warn!(error = %e, "Failed to load user stats"),
        }
    }

    async fn fetch_user_stats(&self) -> Result<UserStats> {
        let response = self
            .session
            .authenticated_request(ApiRequest::get(endpoints::USER_STATS))
            .await?;
        if !response.is_success() {
            return Err(response.into_error("Failed to load user stats"));
        }
        response.json()
    }

    /// Sends a like from the directory and patches local state on success.
    ///
    /// Only the remaining-quota guard runs locally; duplicate and self-like
    /// checks are left to the server here.
    pub async fn handle_like(&self, target: UserId) -> Result<()> {
        if self.state.read().await.stats.remaining_likes == 0 {
            let rule = LikeRule::QuotaExhausted;
            self.notifier.error(rule.message());
            return Err(LikeboardError::LikeRejected(vec![rule]));
        }

        if let Err(e) = self.send_like(target).await {
            self.notify_failure(&e, LIKE_CONNECTION_ERROR, LIKE_FAILED);
            return Err(e);
        }

        let stats = {
            let mut state = self.state.write().await;
            if let Some(marketer) = state.marketers.iter_mut().find(|m| m.id == target) {
                marketer.has_liked = true;
                marketer.likes_count = Some(marketer.likes() + 1);
            }
            state.stats.remaining_likes = state.stats.remaining_likes.saturating_sub(1);
            state.stats.likes_given += 1;
            state.stats
        };

        if let Err(e) = self.session.update_user_stats(&stats.as_patch()).await {
            tracing::warn!(error = %e, "Failed to persist user stats");
        }

        tracing::info!(%target, remaining = stats.remaining_likes, "Like sent from directory");
        self.notifier.success(LIKE_SENT);
        Ok(())
    }

    async fn send_like(&self, target: UserId) -> Result<()> {
        let request = ApiRequest::post(endpoints::LIKES)
            .json(&serde_json::json!({ "marketer_id": target }))?;
        let response = self.session.authenticated_request(request).await?;
        if !response.is_success() {
            return Err(response.into_error(LIKE_FAILED));
        }
        Ok(())
    }

    fn notify_failure(&self, error: &LikeboardError, connection_message: &str, fallback: &str) {
        if error.is_session_error() {
            return;
        }
        tracing::warn!(error = %error, "{}", fallback);

        if error.is_transport() {
            self.notifier.error(connection_message);
        } else if error.is_server() {
            self.notifier.error(&error.to_string());
        } else {
            self.notifier.error(fallback);
        }
    }

    pub async fn filtered_marketers(&self) -> Vec<Marketer> {
        let state = self.state.read().await;
        filter_marketers(&state.marketers, state.filter, state.search.as_deref())
    }

    /// Cards for the current list, filter, search term and stats.
    pub async fn render(&self) -> DirectoryRender {
        let current_user = self.session.current_user_id().await;
        let state = self.state.read().await;
        render_cards(
            &state.marketers,
            state.filter,
            state.search.as_deref(),
            current_user,
            &state.stats,
        )
    }

    /// Card for the profile overlay of `target`, if it is in the list.
    pub async fn profile_detail(&self, target: UserId) -> Option<MarketerCard> {
        let current_user = self.session.current_user_id().await;
        let state = self.state.read().await;
        state
            .marketers
            .iter()
            .find(|m| m.id == target)
            .map(|m| MarketerCard::from_marketer(m, current_user, &state.stats))
    }

    pub async fn set_filter(&self, filter: DirectoryFilter) {
        self.state.write().await.filter = filter;
    }

    /// Sets the search term; a blank term clears it.
    pub async fn set_search(&self, term: Option<&str>) {
        self.state.write().await.search = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
    }

    pub async fn filter(&self) -> DirectoryFilter {
        self.state.read().await.filter
    }

    pub async fn total_members(&self) -> usize {
        self.state.read().await.marketers.len()
    }

    pub async fn stats(&self) -> UserStats {
        self.state.read().await.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use likeboard_core::like::ButtonState;
    use likeboard_core::navigation::Notification;
    use serde_json::{Value, json};

    fn marketer_json(id: i64, name: &str, likes: u32, rank: Option<u32>) -> Value {
        json!({
            "id": id,
            "first_name": name,
            "last_name": "Test",
            "email": format!("{}@example.com", name.to_lowercase()),
            "bio": format!("{} does growth marketing", name),
            "likes_count": likes,
            "rank": rank,
            "has_liked": false
        })
    }

    async fn loaded_directory() -> (SessionFixture, Arc<RecordingNotifier>, DirectoryView) {
        let fixture = SessionFixture::authenticated(1).await;
        let notifier = RecordingNotifier::new();
        let directory = DirectoryView::new(fixture.session.clone(), notifier.clone());

        fixture.transport.push(ok(json!({
            "results": [
                marketer_json(1, "Self", 0, None),
                marketer_json(2, "Ana", 3, Some(2)),
                marketer_json(3, "Bruno", 7, Some(1)),
                marketer_json(4, "Carla", 3, None),
            ],
            "user_stats": {"likes_given": 1, "likes_received": 0, "remaining_likes": 4}
        })));
        directory.load_marketers().await.unwrap();
        fixture.transport.clear_requests();

        (fixture, notifier, directory)
    }

    fn card_ids(render: &DirectoryRender) -> Vec<i64> {
        render.cards().iter().map(|c| c.id.0).collect()
    }

    #[tokio::test]
    async fn test_load_marketers_reads_envelope_and_stats() {
        let (_fixture, notifier, directory) = loaded_directory().await;

        assert_eq!(directory.total_members().await, 4);
        assert_eq!(directory.stats().await.remaining_likes, 4);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_load_marketers_accepts_bare_list() {
        let fixture = SessionFixture::authenticated(1).await;
        let directory = DirectoryView::new(fixture.session.clone(), RecordingNotifier::new());
        fixture.transport.push(ok(json!([marketer_json(2, "Ana", 1, None)])));

        directory.load_marketers().await.unwrap();

        assert_eq!(directory.total_members().await, 1);
        assert_eq!(directory.stats().await, UserStats::default());
    }

    #[tokio::test]
    async fn test_failed_load_clears_stale_list() {
        let (fixture, notifier, directory) = loaded_directory().await;
        fixture.transport.push(status(500, json!({})));

        assert!(directory.load_marketers().await.is_err());

        assert_eq!(directory.total_members().await, 0);
        assert_eq!(directory.render().await, DirectoryRender::Empty);
        assert_eq!(notifier.notifications(), vec![Notification::error(LOAD_FAILED)]);
    }

    #[tokio::test]
    async fn test_connection_error_on_load() {
        let (fixture, notifier, directory) = loaded_directory().await;
        fixture.transport.push_error("connection refused");

        let err = directory.load_marketers().await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(notifier.messages(), vec![LOAD_CONNECTION_ERROR.to_string()]);
    }

    #[tokio::test]
    async fn test_expired_session_is_not_renotified() {
        let (fixture, notifier, directory) = loaded_directory().await;
        fixture.transport.push(status(401, json!({})));

        let err = directory.load_marketers().await.unwrap_err();

        assert_eq!(err, LikeboardError::SessionExpired);
        assert!(notifier.notifications().is_empty());
        assert!(!fixture.session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_default_order_is_by_likes_descending() {
        let (_fixture, _notifier, directory) = loaded_directory().await;

        let ids: Vec<i64> = directory.filtered_marketers().await.iter().map(|m| m.id.0).collect();
        // Ana and Carla tie on 3 likes and keep server order.
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[tokio::test]
    async fn test_top_filter_and_search() {
        let (_fixture, _notifier, directory) = loaded_directory().await;

        directory.set_filter(DirectoryFilter::Top).await;
        assert_eq!(card_ids(&directory.render().await), vec![3, 2]);

        directory.set_filter(DirectoryFilter::All).await;
        directory.set_search(Some("  CARLA ")).await;
        assert_eq!(card_ids(&directory.render().await), vec![4]);

        directory.set_search(Some("nobody")).await;
        assert_eq!(directory.render().await, DirectoryRender::Empty);

        directory.set_search(Some("   ")).await;
        assert_eq!(directory.render().await.cards().len(), 4);
    }

    #[tokio::test]
    async fn test_render_marks_own_profile() {
        let (_fixture, _notifier, directory) = loaded_directory().await;

        let render = directory.render().await;
        let own = render.cards().iter().find(|c| c.id == UserId(1)).unwrap();
        assert!(own.is_own_profile);
        assert_eq!(own.button, ButtonState::OwnProfile);

        let other = render.cards().iter().find(|c| c.id == UserId(2)).unwrap();
        assert_eq!(other.button, ButtonState::Actionable);
    }

    #[tokio::test]
    async fn test_handle_like_patches_optimistically() {
        let (fixture, notifier, directory) = loaded_directory().await;
        fixture.transport.push(status(201, json!({"like": {"id": 40}})));

        directory.handle_like(UserId(2)).await.unwrap();

        let card = directory.profile_detail(UserId(2)).await.unwrap();
        assert!(card.has_liked);
        assert_eq!(card.likes_count, 4);
        assert_eq!(card.button, ButtonState::AlreadyLiked);

        let stats = directory.stats().await;
        assert_eq!(stats.remaining_likes, 3);
        assert_eq!(stats.likes_given, 2);

        let user = fixture.session.current_user().await.unwrap();
        assert_eq!(user.remaining_likes, Some(3));
        assert_eq!(user.likes_given, Some(2));

        assert_eq!(notifier.notifications(), vec![Notification::success(LIKE_SENT)]);
        assert_eq!(fixture.transport.requests()[0].body, Some(json!({"marketer_id": 2})));
    }

    #[tokio::test]
    async fn test_handle_like_failure_leaves_state() {
        let (fixture, notifier, directory) = loaded_directory().await;
        let detail = json!({"detail": "You have already liked this marketer"});
        fixture.transport.push(status(400, detail));
        fixture.transport.push_error("timed out");

        directory.handle_like(UserId(2)).await.unwrap_err();
        directory.handle_like(UserId(2)).await.unwrap_err();

        let card = directory.profile_detail(UserId(2)).await.unwrap();
        assert!(!card.has_liked);
        assert_eq!(card.likes_count, 3);
        assert_eq!(directory.stats().await.remaining_likes, 4);
        assert_eq!(
            notifier.messages(),
            vec![
                "You have already liked this marketer".to_string(),
                LIKE_CONNECTION_ERROR.to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_handle_like_with_no_quota_left() {
        let fixture = SessionFixture::authenticated(1).await;
        let notifier = RecordingNotifier::new();
        let directory = DirectoryView::new(fixture.session.clone(), notifier.clone());
        fixture.transport.push(ok(json!({
            "results": [marketer_json(2, "Ana", 0, None)],
            "user_stats": {"likes_given": 5, "remaining_likes": 0}
        })));
        directory.load_marketers().await.unwrap();
        fixture.transport.clear_requests();

        let err = directory.handle_like(UserId(2)).await.unwrap_err();

        assert_eq!(err, LikeboardError::LikeRejected(vec![LikeRule::QuotaExhausted]));
        assert!(fixture.transport.requests().is_empty());
        assert_eq!(
            notifier.messages(),
            vec!["You have used all your available likes".to_string()]
        );
        assert_eq!(
            directory.render().await.cards()[0].button,
            ButtonState::QuotaExhausted
        );
    }

    #[tokio::test]
    async fn test_load_user_stats_is_best_effort() {
        let (fixture, _notifier, directory) = loaded_directory().await;
        let stats = json!({"likes_given": 2, "likes_received": 9, "remaining_likes": 3});
        fixture.transport.push(ok(stats));
        fixture.transport.push(status(500, json!({})));

        directory.load_user_stats().await;
        assert_eq!(directory.stats().await.likes_received, 9);

        directory.load_user_stats().await;
        assert_eq!(directory.stats().await.remaining_likes, 3);
    }
}
