//! The chaos bag: a token registry with an optional preset catalog on top.
//!
//! Without a catalog the registry's own table (the default token set) is
//! always active. With a catalog the active table is a working copy of the
//! selected difficulty's table; it is empty until both a scenario and a
//! difficulty are selected. Every selection change resets usage.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::catalog::{Difficulty, NO_DIFFICULTY, NO_SCENARIO, PresetCatalog, Scenario};
use crate::config::BagConfig;
use crate::error::{BagError, BagResult};
use crate::token::{CountTable, TokenRegistry, UsageTable, default_table};

/// Token registry plus optional scenario/difficulty presets.
#[derive(Debug, Clone)]
pub struct ChaosBag {
    registry: TokenRegistry,
    catalog: Option<PresetCatalog>,
}

impl ChaosBag {
    /// A bag without presets, drawing from `counts`.
    pub fn standalone(counts: CountTable) -> Self {
        Self::from_parts(TokenRegistry::new(counts), None)
    }

    /// A bag driven by `catalog`. Nothing is selected yet.
    pub fn with_catalog(catalog: PresetCatalog) -> Self {
        Self::from_parts(TokenRegistry::new(CountTable::new()), Some(catalog))
    }

    /// Assemble a bag from an existing registry and catalog.
    ///
    /// When a catalog is given, the registry is switched to the catalog's
    /// active table (empty unless a difficulty is already selected).
    pub fn from_parts(mut registry: TokenRegistry, catalog: Option<PresetCatalog>) -> Self {
        if let Some(catalog) = &catalog {
            registry.replace_counts(catalog.active_table().cloned().unwrap_or_default());
        }
        Self { registry, catalog }
    }

    /// Build a bag as described by `config`.
    pub fn from_config(config: &BagConfig) -> BagResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let catalog = match &config.presets {
            Some(path) => Some(PresetCatalog::from_json(&read_presets(path)?)?),
            None => None,
        };
        let counts = if catalog.is_some() {
            CountTable::new()
        } else {
            default_table()
        };
        Ok(Self::from_parts(TokenRegistry::with_rng(counts, rng), catalog))
    }

    /// The underlying registry.
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// The preset catalog, if one is loaded.
    pub fn catalog(&self) -> Option<&PresetCatalog> {
        self.catalog.as_ref()
    }

    /// Replace the catalog from a JSON preset document.
    ///
    /// On failure nothing changes. On success the selection is cleared and
    /// the active table becomes empty.
    pub fn load_presets(&mut self, source: &str) -> BagResult<()> {
        if let Some(catalog) = self.catalog.as_mut() {
            catalog.load(source)?;
        } else {
            self.catalog = Some(PresetCatalog::from_json(source)?);
        }
        info!(scenarios = self.scenarios().len(), "loaded presets");
        self.registry.replace_counts(CountTable::new());
        Ok(())
    }

    /// Replace the catalog from a preset file.
    pub fn load_presets_file(&mut self, path: &Path) -> BagResult<()> {
        self.load_presets(&read_presets(path)?)
    }

    /// Scenarios in load order (empty without a catalog).
    pub fn scenarios(&self) -> &[Scenario] {
        self.catalog
            .as_ref()
            .map(PresetCatalog::scenarios)
            .unwrap_or_default()
    }

    /// Difficulties of the selected scenario.
    pub fn difficulties(&self) -> BagResult<&[Difficulty]> {
        self.catalog
            .as_ref()
            .ok_or(BagError::NoCatalog)?
            .difficulties()
    }

    /// Select a scenario. The active table becomes empty and usage resets.
    pub fn select_scenario(&mut self, id: &str) -> BagResult<&Scenario> {
        let catalog = self.catalog.as_mut().ok_or(BagError::NoCatalog)?;
        let scenario = catalog.select_scenario(id)?;
        self.registry.replace_counts(CountTable::new());
        Ok(scenario)
    }

    /// Select a difficulty of the current scenario. Its table becomes
    /// active and usage resets.
    pub fn select_difficulty(&mut self, id: &str) -> BagResult<&Difficulty> {
        let catalog = self.catalog.as_mut().ok_or(BagError::NoCatalog)?;
        let difficulty = catalog.select_difficulty(id)?;
        self.registry.replace_counts(difficulty.tokens.clone());
        debug!(tokens = difficulty.tokens.len(), "activated difficulty table");
        Ok(difficulty)
    }

    /// Display name of the selected scenario, or a sentinel.
    pub fn scenario_name(&self) -> &str {
        self.catalog
            .as_ref()
            .map_or(NO_SCENARIO, |c| c.current_scenario_name())
    }

    /// Display name of the selected difficulty, or a sentinel.
    pub fn difficulty_name(&self) -> &str {
        self.catalog
            .as_ref()
            .map_or(NO_DIFFICULTY, |c| c.current_difficulty_name())
    }

    /// Set the active count for `token` to `max(0, value)`; unknown tokens
    /// are ignored. Returns whether the token exists.
    pub fn set_count(&mut self, token: &str, value: i64) -> bool {
        self.registry.set_count(token, value)
    }

    /// Active count for `token`, or 0.
    pub fn count(&self, token: &str) -> u32 {
        self.registry.count(token)
    }

    /// Draws of `token` since the last reset, or 0.
    pub fn usage(&self, token: &str) -> u32 {
        self.registry.usage(token)
    }

    /// Snapshot of the active count table.
    pub fn counts(&self) -> &CountTable {
        self.registry.counts()
    }

    /// Snapshot of the usage table.
    pub fn usages(&self) -> &UsageTable {
        self.registry.usages()
    }

    /// Draw a token from the active table.
    pub fn draw(&mut self) -> Option<String> {
        self.registry.draw()
    }

    /// Reset all usage counters to zero.
    pub fn reset_usage(&mut self) {
        self.registry.reset_usage();
    }
}

fn read_presets(path: &Path) -> BagResult<String> {
    std::fs::read_to_string(path).map_err(|source| BagError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })
}
