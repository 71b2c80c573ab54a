use crate::like::LIKE_QUOTA;
use crate::user::{UserId, UserStatsPatch};
use serde::{Deserialize, Serialize};

/// A user profile eligible to receive likes, as listed by `GET /marketers/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marketer {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, alias = "likes_received")]
    pub likes_count: Option<u32>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub has_liked: bool,
}

impl Marketer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn likes(&self) -> u32 {
        self.likes_count.unwrap_or(0)
    }

    /// Case-insensitive substring match over name, email and bio.
    /// `term` must already be lowercased.
    pub fn matches(&self, term: &str) -> bool {
        self.full_name().to_lowercase().contains(term)
            || self.email.to_lowercase().contains(term)
            || self
                .bio
                .as_deref()
                .is_some_and(|bio| bio.to_lowercase().contains(term))
    }
}

/// Aggregate stats of the session user as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub likes_given: u32,
    #[serde(default)]
    pub likes_received: u32,
    #[serde(default = "default_remaining_likes")]
    pub remaining_likes: u32,
}

fn default_remaining_likes() -> u32 {
    LIKE_QUOTA as u32
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            likes_given: 0,
            likes_received: 0,
            remaining_likes: default_remaining_likes(),
        }
    }
}

impl UserStats {
    pub fn as_patch(&self) -> UserStatsPatch {
        UserStatsPatch {
            likes_given: Some(self.likes_given),
            likes_received: Some(self.likes_received),
            remaining_likes: Some(self.remaining_likes),
        }
    }
}

/// Body of `GET /marketers/`: either the paged envelope or a bare list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MarketerPage {
    Paged {
        results: Vec<Marketer>,
        #[serde(default)]
        user_stats: Option<UserStats>,
    },
    Bare(Vec<Marketer>),
}

impl MarketerPage {
    pub fn into_parts(self) -> (Vec<Marketer>, Option<UserStats>) {
        match self {
            MarketerPage::Paged {
                results,
                user_stats,
            } => (results, user_stats),
            MarketerPage::Bare(results) => (results, None),
        }
    }
}
