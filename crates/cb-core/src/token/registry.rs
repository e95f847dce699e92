//! The token registry: active count table, usage counters, and the draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{CountTable, UsageTable};

/// Holds the active count table and the usage table, and draws tokens.
///
/// Draws are *with replacement*: counts describe a persistent inventory and
/// are never consumed. The probability of drawing `x` is
/// `count(x) / total()`.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    counts: CountTable,
    usages: UsageTable,
    rng: StdRng,
}

impl TokenRegistry {
    /// Create a registry over `counts`, seeded from OS entropy.
    pub fn new(counts: CountTable) -> Self {
        Self::with_rng(counts, StdRng::from_os_rng())
    }

    /// Create a registry with a fixed seed (reproducible draws).
    pub fn with_seed(counts: CountTable, seed: u64) -> Self {
        Self::with_rng(counts, StdRng::seed_from_u64(seed))
    }

    /// Create a registry drawing from the given RNG.
    pub fn with_rng(counts: CountTable, rng: StdRng) -> Self {
        let usages = zeroed(&counts);
        Self {
            counts,
            usages,
            rng,
        }
    }

    /// Set the count for `token` to `max(0, value)`.
    ///
    /// Unknown tokens are ignored. Returns whether the token exists.
    pub fn set_count(&mut self, token: &str, value: i64) -> bool {
        match self.counts.get_mut(token) {
            Some(count) => {
                *count = u32::try_from(value.max(0)).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    /// Configured count for `token`, or 0 if unknown.
    pub fn count(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Draws of `token` since the last reset, or 0 if unknown.
    pub fn usage(&self, token: &str) -> u32 {
        self.usages.get(token).copied().unwrap_or(0)
    }

    /// Snapshot of the active count table.
    pub fn counts(&self) -> &CountTable {
        &self.counts
    }

    /// Snapshot of the usage table (same keys as [`Self::counts`]).
    pub fn usages(&self) -> &UsageTable {
        &self.usages
    }

    /// Sum of all counts in the active table.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Returns true if a draw would yield no token.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Draw one token, weighted by count, and record its usage.
    ///
    /// Picks a uniform index in `0..total` and walks the cumulative counts,
    /// so large counts cost nothing extra. Returns `None` without touching
    /// usage when every count is zero or the table is empty.
    pub fn draw(&mut self) -> Option<String> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        let mut pick = self.rng.random_range(0..total);
        let token = self
            .counts
            .iter()
            .find(|&(_, &count)| {
                let count = u64::from(count);
                if pick < count {
                    true
                } else {
                    pick -= count;
                    false
                }
            })
            .map(|(token, _)| token.clone())?;

        let used = self.usages.entry(token.clone()).or_insert(0);
        *used = used.saturating_add(1);
        debug!(token = %token, drawn = *used, total, "drew token");
        Some(token)
    }

    /// Clear every usage counter to 0 without touching counts.
    pub fn reset_usage(&mut self) {
        self.usages = zeroed(&self.counts);
    }

    /// Make `counts` the active table and reset usage.
    pub fn replace_counts(&mut self, counts: CountTable) {
        self.usages = zeroed(&counts);
        self.counts = counts;
    }
}

fn zeroed(counts: &CountTable) -> UsageTable {
    counts.keys().map(|t| (t.clone(), 0)).collect()
}
