//! Like domain module.
//!
//! # Module Structure
//!
//! - `model`: like records and ranking entries as exchanged with the server
//! - `rules`: quota, duplicate and self-like rules plus the shared button predicate

mod model;
mod rules;

pub use model::{LikeId, LikeRecord, RankingEntry};
pub use rules::{ButtonState, LIKE_QUOTA, LikeRule, LikeValidation};
