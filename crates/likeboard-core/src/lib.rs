//! Domain layer of the Likeboard client.
//!
//! Holds the models exchanged with the backend, the pure like and directory
//! rules, and the seam traits that the infrastructure and interaction crates
//! implement.

pub mod error;
pub mod http;
pub mod like;
pub mod marketer;
pub mod navigation;
pub mod storage;
pub mod user;

// Re-export common error type
pub use error::{LikeboardError, Result};
