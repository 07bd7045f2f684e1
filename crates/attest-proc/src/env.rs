//! A LIFO cache of environment-variable changes.

use std::env;

use tracing::debug;

/// Records the prior state of every variable it sets and restores it all
/// in reverse order on [`reset`](EnvCache::reset) or drop. Variables that
/// did not exist before are removed again, not set to an empty string.
#[derive(Debug, Default)]
pub struct EnvCache {
    saved: Vec<(String, Option<String>)>,
}

impl EnvCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, remembering what it was first.
    pub fn set(&mut self, key: &str, value: &str) {
        let prior = env::var(key).ok();
        debug!(key, value, "setting an environment variable");
        self.saved.push((key.to_string(), prior));
        env::set_var(key, value);
    }

    /// Restore every cached variable in reverse order and clear the cache.
    pub fn reset(&mut self) {
        while let Some((key, prior)) = self.saved.pop() {
            match prior {
                Some(value) => {
                    debug!(key, "restoring an environment variable");
                    env::set_var(&key, value);
                }
                None => {
                    debug!(key, "removing an environment variable");
                    env::remove_var(&key);
                }
            }
        }
    }

    /// The number of changes waiting to be restored.
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

impl Drop for EnvCache {
    fn drop(&mut self) {
        self.reset();
    }
}
