use std::sync::Arc;

use storage::repository::{StorageError, StreakStore};
use tracing::warn;
use trivia_core::model::{BEST_STREAK_KEY, parse_best_streak};

/// Reads and writes the persisted best streak.
#[derive(Clone)]
pub struct StreakService {
    store: Arc<dyn StreakStore>,
}

impl StreakService {
    #[must_use]
    pub fn new(store: Arc<dyn StreakStore>) -> Self {
        Self { store }
    }

    /// Load the best streak, treating absent, malformed or unreadable values as 0.
    pub async fn load_best(&self) -> u32 {
        match self.store.get(BEST_STREAK_KEY).await {
            Ok(raw) => {
                let best = parse_best_streak(raw.as_deref());
                if best == 0 {
                    if let Some(raw) = raw.filter(|raw| raw.trim() != "0") {
                        warn!(value = %raw, "ignoring malformed best streak");
                    }
                }
                best
            }
            Err(err) => {
                warn!(error = %err, "best streak unavailable, defaulting to 0");
                0
            }
        }
    }

    /// Persist a new best streak.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store rejects the write.
    pub async fn save_best(&self, best: u32) -> Result<(), StorageError> {
        self.store.set(BEST_STREAK_KEY, &best.to_string()).await
    }
}
