//! Durable key-value surface used to persist the session.

use crate::error::Result;

/// String key-value persistence, shaped after browser local storage.
///
/// Implementations must make `set`/`remove` durable before returning.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Removes several keys in one write. The default removes them one by one.
    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
