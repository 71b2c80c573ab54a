//! LikeLedger - the session user's outgoing likes.
//!
//! Holds the local copy of the likes given by the signed-in user, bounded at
//! the like quota. The server stays authoritative: the local checks only
//! save a round-trip for requests it would reject anyway, and the ledger is
//! re-hydrated from `/likes/my-likes/` on load.

use crate::endpoints;
use crate::session::SessionStore;
use likeboard_core::http::ApiRequest;
use likeboard_core::like::{
    ButtonState, LIKE_QUOTA, LikeId, LikeRecord, LikeRule, LikeValidation, RankingEntry,
};
use likeboard_core::user::UserId;
use likeboard_core::{LikeboardError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Deserialize)]
struct MyLikes {
    #[serde(default)]
    likes: Vec<LikeRecord>,
}

#[derive(Debug, Deserialize)]
struct LikeRef {
    id: LikeId,
}

/// Body of a successful create-like call: either `{"like": {"id": ..}}`
/// or the bare record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatedLike {
    Wrapped { like: LikeRef },
    Flat(LikeRef),
}

impl CreatedLike {
    fn id(&self) -> LikeId {
        match self {
            CreatedLike::Wrapped { like } => like.id,
            CreatedLike::Flat(like) => like.id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RankingPage {
    Wrapped { ranking: Vec<RankingEntry> },
    Bare(Vec<RankingEntry>),
}

/// Counters and per-target button states for the like widgets on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    pub likes_given: usize,
    pub remaining: usize,
    pub buttons: Vec<(UserId, ButtonState)>,
}

pub struct LikeLedger {
    session: Arc<SessionStore>,
    records: RwLock<Vec<LikeRecord>>,
    quota: usize,
    // Held across the whole give flow so two overlapping likes cannot both
    // pass the quota check before either is recorded.
    give_gate: Mutex<()>,
}

impl LikeLedger {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            records: RwLock::new(Vec::new()),
            quota: LIKE_QUOTA,
            give_gate: Mutex::new(()),
        }
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }

    /// Replaces the local records with the server's list.
    ///
    /// Best effort: any failure is logged and the previous records are kept.
    pub async fn load_own_likes(&self) {
        match self.fetch_own_likes().await {
            Ok(likes) => {
                tracing::debug!(count = likes.len(), "Loaded own likes");
                *self.records.write().await = likes;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load own likes"),
        }
    }

    async fn fetch_own_likes(&self) -> Result<Vec<LikeRecord>> {
        let page: MyLikes = self
            .fetch_json(ApiRequest::get(endpoints::MY_LIKES), "Failed to load likes")
            .await?;
        Ok(page.likes)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<T> {
        let response = self.session.authenticated_request(request).await?;
        if !response.is_success() {
            return Err(response.into_error(fallback));
        }
        response.json()
    }

    /// Checks every like rule against `target`. No side effects.
    pub async fn validate(&self, target: UserId) -> LikeValidation {
        let current_user = self.session.current_user_id().await;
        let records = self.records.read().await;
        let liked: BTreeSet<UserId> = records.iter().map(|r| r.marketer_id).collect();

        LikeValidation::evaluate(records.len(), self.quota, &liked, current_user, target)
    }

    /// Likes `target`.
    ///
    /// # Errors
    ///
    /// - `LikeRejected` when a local rule fails; nothing is sent.
    /// - `Server` with the server's detail on a non-2xx response.
    /// - Session and transport errors from the authenticated request.
    ///
    /// No local state changes on error. Concurrent calls are served one at a
    /// time, so the quota holds across overlapping likes.
    pub async fn give_like(&self, target: UserId) -> Result<LikeRecord> {
        let _gate = self.give_gate.lock().await;
        let validation = self.validate(target).await;
        if !validation.is_valid() {
            return Err(LikeboardError::LikeRejected(validation.violations));
        }

        let request = ApiRequest::post(endpoints::LIKES)
            .json(&serde_json::json!({ "marketer_id": target }))?;
        let response = self.session.authenticated_request(request).await?;

        if !response.is_success() {
            return Err(response.into_error("Failed to send like"));
        }

        let created = match response.json::<CreatedLike>() {
            Ok(created) => created,
            Err(e) => {
                // The like exists server-side; resync instead of guessing its id.
                tracing::warn!(%target, error = %e, "Unreadable create-like response");
                self.load_own_likes().await;
                return Err(e);
            }
        };

        let record = LikeRecord::new(created.id(), target);
        let mut records = self.records.write().await;
        if records.len() >= self.quota {
            return Err(LikeboardError::LikeRejected(vec![LikeRule::QuotaExhausted]));
        }
        if !records.iter().any(|r| r.marketer_id == target) {
            records.push(record.clone());
        }
        tracing::info!(%target, like_id = %record.id, given = records.len(), "Like given");
        Ok(record)
    }

    /// Withdraws the like on `target`.
    ///
    /// Fails with `NotLiked` before any network call when the ledger holds no
    /// like for `target`.
    pub async fn remove_like(&self, target: UserId) -> Result<()> {
        let like = self
            .get_like(target)
            .await
            .ok_or(LikeboardError::NotLiked { marketer_id: target })?;

        let response = self
            .session
            .authenticated_request(ApiRequest::delete(endpoints::like(like.id)))
            .await?;

        if !response.is_success() {
            return Err(response.into_error("Failed to remove like"));
        }

        self.records.write().await.retain(|r| r.id != like.id);
        tracing::info!(%target, like_id = %like.id, "Like removed");
        Ok(())
    }

    pub async fn likes_given(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn remaining(&self) -> usize {
        self.quota.saturating_sub(self.likes_given().await)
    }

    pub async fn liked_marketer_ids(&self) -> BTreeSet<UserId> {
        self.records.read().await.iter().map(|r| r.marketer_id).collect()
    }

    pub async fn has_liked(&self, target: UserId) -> bool {
        self.records.read().await.iter().any(|r| r.marketer_id == target)
    }

    pub async fn get_like(&self, target: UserId) -> Option<LikeRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.marketer_id == target)
            .cloned()
    }

    pub async fn given_likes(&self) -> Vec<LikeRecord> {
        self.records.read().await.clone()
    }

    /// Computes the counters and the button state of every bound target.
    pub async fn reflect(&self, bound_targets: &[UserId]) -> LedgerView {
        let current_user = self.session.current_user_id().await;
        let records = self.records.read().await;
        let remaining = self.quota.saturating_sub(records.len());

        let buttons = bound_targets
            .iter()
            .map(|&target| {
                let has_liked = records.iter().any(|r| r.marketer_id == target);
                let own = current_user == Some(target);
                (target, ButtonState::resolve(own, has_liked, remaining))
            })
            .collect();

        LedgerView {
            likes_given: records.len(),
            remaining,
            buttons,
        }
    }

    /// Detailed like statistics as the server reports them.
    pub async fn detailed_stats(&self) -> Option<Value> {
        let request = ApiRequest::get(endpoints::LIKE_STATS);
        self.fetch_json::<Value>(request, "Failed to load like stats")
            .await
            .map_err(|e| tracing::warn!(error = %e, "Failed to load like stats"))
            .ok()
    }

    /// Top marketers by received likes. Empty on failure.
    pub async fn ranking(&self, limit: Option<u32>) -> Vec<RankingEntry> {
        let mut request = ApiRequest::get(endpoints::RANKING);
        if let Some(limit) = limit {
            request = request.with_query("limit", limit.to_string());
        }

        match self.fetch_json::<RankingPage>(request, "Failed to load ranking").await {
            Ok(RankingPage::Wrapped { ranking }) | Ok(RankingPage::Bare(ranking)) => ranking,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load ranking");
                Vec::new()
            }
        }
    }

    /// Asks the server to drop every like (admin only).
    ///
    /// Clears the local records and returns `true` on success.
    pub async fn reset_all(&self) -> bool {
        let response = match self
            .session
            .authenticated_request(ApiRequest::post(endpoints::RESET_LIKES))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reset likes");
                return false;
            }
        };

        if !response.is_success() {
            tracing::warn!(status = response.status, "Like reset refused");
            return false;
        }

        self.records.write().await.clear();
        tracing::info!("All likes reset");
        true
    }
}
