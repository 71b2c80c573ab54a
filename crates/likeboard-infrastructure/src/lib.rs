pub mod config;
pub mod paths;
pub mod storage;

pub use crate::config::{ApiSettings, ConfigLoader, LikeSettings, LikeboardConfig, LoggingSettings};
pub use crate::paths::LikeboardPaths;
pub use crate::storage::{JsonFileStore, MemoryStore};
