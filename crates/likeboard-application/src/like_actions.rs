//! Click handlers for like widgets bound to the [`LikeLedger`].

use crate::ledger::LikeLedger;
use likeboard_core::like::LikeRecord;
use likeboard_core::navigation::Notifier;
use likeboard_core::user::UserId;
use likeboard_core::{LikeboardError, Result};
use std::sync::Arc;

const LIKE_SENT: &str = "Like sent successfully!";
const LIKE_REMOVED: &str = "Like removed";

pub struct LikeActions {
    notifier: Arc<dyn Notifier>,
}

impl LikeActions {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Validates, then gives the like. Every outcome is notified except a
    /// lost session, which the session store already handled.
    pub async fn handle_like_click(
        &self,
        ledger: &LikeLedger,
        target: UserId,
    ) -> Result<LikeRecord> {
        let validation = ledger.validate(target).await;
        if !validation.is_valid() {
            self.notifier.error(&validation.message());
            return Err(LikeboardError::LikeRejected(validation.violations));
        }

        match ledger.give_like(target).await {
            Ok(record) => {
                self.notifier.success(LIKE_SENT);
                Ok(record)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    pub async fn handle_unlike_click(&self, ledger: &LikeLedger, target: UserId) -> Result<()> {
        match ledger.remove_like(target).await {
            Ok(()) => {
                self.notifier.success(LIKE_REMOVED);
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    fn report(&self, error: LikeboardError) -> LikeboardError {
        if !error.is_session_error() {
            self.notifier.error(&error.to_string());
        }
        error
    }
}
