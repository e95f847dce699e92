//! Configuration for building a chaos bag.

use std::path::{Path, PathBuf};

/// How a [`ChaosBag`](crate::ChaosBag) is constructed.
#[derive(Debug, Clone, Default)]
pub struct BagConfig {
    /// Preset document to load. `None` gives a standalone bag with the
    /// default token set.
    pub presets: Option<PathBuf>,
    /// Fixed RNG seed. `None` seeds from OS entropy so draws differ
    /// between runs.
    pub seed: Option<u64>,
}

impl BagConfig {
    /// Load presets from this file.
    pub fn with_presets(mut self, path: impl AsRef<Path>) -> Self {
        self.presets = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
