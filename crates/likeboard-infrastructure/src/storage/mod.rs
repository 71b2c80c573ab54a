//! Durable key-value stores backing the session.

mod json_store;
mod memory_store;

pub use json_store::{JsonFileStore, JsonStoreError};
pub use memory_store::MemoryStore;
