//! Like preconditions and the like-button predicate.
//!
//! Both the ledger and the directory decide whether a like affordance is
//! actionable; they share [`ButtonState::resolve`] so the two never drift.

use crate::user::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum number of outgoing likes per user.
pub const LIKE_QUOTA: usize = 5;

/// A like precondition. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeRule {
    QuotaExhausted,
    AlreadyLiked,
    SelfLike,
}

impl LikeRule {
    pub fn message(&self) -> &'static str {
        match self {
            LikeRule::QuotaExhausted => "You have used all your available likes",
            LikeRule::AlreadyLiked => "You have already liked this marketer",
            LikeRule::SelfLike => "You cannot like yourself",
        }
    }
}

/// Outcome of checking every like rule against a target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeValidation {
    pub violations: Vec<LikeRule>,
}

impl LikeValidation {
    /// Evaluates all rules; every violated rule is reported, not just the first.
    pub fn evaluate(
        given: usize,
        quota: usize,
        liked: &BTreeSet<UserId>,
        current_user: Option<UserId>,
        target: UserId,
    ) -> Self {
        let mut violations = Vec::new();

        if given >= quota {
            violations.push(LikeRule::QuotaExhausted);
        }
        if liked.contains(&target) {
            violations.push(LikeRule::AlreadyLiked);
        }
        if current_user == Some(target) {
            violations.push(LikeRule::SelfLike);
        }

        Self { violations }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has(&self, rule: LikeRule) -> bool {
        self.violations.contains(&rule)
    }

    /// Messages of all violated rules, joined for display.
    pub fn message(&self) -> String {
        self.violations
            .iter()
            .map(|rule| rule.message())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Display state of a like button. Exactly one applies to any target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    OwnProfile,
    AlreadyLiked,
    QuotaExhausted,
    Actionable,
}

impl ButtonState {
    /// Own profile wins over already-liked, which wins over quota exhaustion.
    pub fn resolve(is_own_profile: bool, has_liked: bool, remaining: usize) -> Self {
        if is_own_profile {
            ButtonState::OwnProfile
        } else if has_liked {
            ButtonState::AlreadyLiked
        } else if remaining == 0 {
            ButtonState::QuotaExhausted
        } else {
            ButtonState::Actionable
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ButtonState::Actionable)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ButtonState::OwnProfile => "Your profile",
            ButtonState::AlreadyLiked => "Already liked",
            ButtonState::QuotaExhausted => "No likes left",
            ButtonState::Actionable => "Like",
        }
    }
}
