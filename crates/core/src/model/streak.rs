/// Store key under which the best streak is persisted.
pub const BEST_STREAK_KEY: &str = "triviaStreakBest";

/// Parse a persisted best-streak value.
///
/// Absent, blank, negative or non-numeric values all read as 0.
#[must_use]
pub fn parse_best_streak(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Current and best streak counters.
///
/// `best` never decreases; `current` only ever grows by one or resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    current: u32,
    best: u32,
}

impl Streaks {
    /// Fresh counters seeded with a previously persisted best.
    #[must_use]
    pub fn with_best(best: u32) -> Self {
        Self { current: 0, best }
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn reset_current(&mut self) {
        self.current = 0;
    }

    /// Count a correct answer. Returns `true` when this set a new best.
    pub fn record_correct(&mut self) -> bool {
        self.current = self.current.saturating_add(1);
        if self.current > self.best {
            self.best = self.current;
            return true;
        }
        false
    }
}
