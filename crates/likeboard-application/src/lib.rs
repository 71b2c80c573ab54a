//! Application layer of the likes dashboard.
//!
//! The [`SessionStore`] is built first and handed to the [`LikeLedger`] and
//! the [`DirectoryView`]; neither of those depends on the other.

pub mod directory;
pub mod endpoints;
pub mod ledger;
pub mod like_actions;
pub mod session;

#[cfg(test)]
mod test_support;

pub use directory::DirectoryView;
pub use ledger::{LedgerView, LikeLedger};
pub use like_actions::LikeActions;
pub use session::{LoginRequest, RegistrationForm, SessionStore};
