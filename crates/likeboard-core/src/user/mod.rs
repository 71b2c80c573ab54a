//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: identity, credential and profile models
//!
//! # Usage
//!
//! ```ignore
//! use likeboard_core::user::{Credential, UserId, UserProfile, UserStatsPatch};
//! ```

mod model;

pub use model::{Credential, UserId, UserProfile, UserStatsPatch};
