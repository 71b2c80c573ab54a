use crate::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned id of a like edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikeId(pub i64);

impl fmt::Display for LikeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed like from the session user to a marketer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeRecord {
    pub id: LikeId,
    #[serde(alias = "target_id", alias = "target")]
    pub marketer_id: UserId,
    /// Client-stamped when the like is created locally, so only approximate.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_avatar: Option<String>,
}

impl LikeRecord {
    pub fn new(id: LikeId, marketer_id: UserId) -> Self {
        Self {
            id,
            marketer_id,
            created_at: Utc::now(),
            target_name: None,
            target_avatar: None,
        }
    }
}

/// One row of `GET /marketers/ranking/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub rank: Option<u32>,
}
