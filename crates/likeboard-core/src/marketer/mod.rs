//! Marketer directory module.
//!
//! # Module Structure
//!
//! - `model`: marketer profiles, aggregate stats and the list payload
//! - `directory`: filter/search/sort projection and card view models

mod directory;
mod model;

pub use directory::{
    DirectoryFilter, DirectoryRender, MarketerCard, RankBadge, filter_marketers, render_cards,
};
pub use model::{Marketer, MarketerPage, UserStats};
