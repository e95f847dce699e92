//! Scenario/difficulty presets and the current selection.
//!
//! A [`PresetCatalog`] is populated wholesale from a preset document (see
//! [`document`]) and never edited piecemeal afterwards. Selecting a
//! scenario and then one of its difficulties decides which token table is
//! active; until both are selected the active table is empty.

pub mod document;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BagError, BagResult};
use crate::token::CountTable;

/// Shown when no scenario is selected.
pub const NO_SCENARIO: &str = "No Scenario Selected";

/// Shown when no difficulty is selected.
pub const NO_DIFFICULTY: &str = "No Difficulty Selected";

/// A named preset containing an ordered list of difficulties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique identifier within the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Difficulties in document order.
    pub difficulties: Vec<Difficulty>,
}

impl Scenario {
    /// Find a difficulty of this scenario by id.
    pub fn difficulty(&self, id: &str) -> Option<&Difficulty> {
        self.difficulties.iter().find(|d| d.id == id)
    }
}

/// A difficulty level carrying its own token count table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Unique identifier within the parent scenario.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Token counts used while this difficulty is selected.
    pub tokens: CountTable,
}

/// All loaded scenarios plus the current scenario/difficulty selection.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    scenarios: Vec<Scenario>,
    scenario: Option<usize>,
    difficulty: Option<usize>,
}

impl PresetCatalog {
    /// Create an empty catalog with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-validated scenarios.
    pub fn from_scenarios(scenarios: Vec<Scenario>) -> BagResult<Self> {
        document::validate(&scenarios)?;
        Ok(Self {
            scenarios,
            scenario: None,
            difficulty: None,
        })
    }

    /// Parse a JSON preset document into a fresh catalog.
    pub fn from_json(source: &str) -> BagResult<Self> {
        Self::from_scenarios(document::parse(source)?)
    }

    /// Replace the catalog with the contents of a JSON preset document.
    ///
    /// On failure the current catalog and selection are left untouched.
    /// On success the selection is cleared.
    pub fn load(&mut self, source: &str) -> BagResult<()> {
        let loaded = Self::from_json(source)?;
        debug!(scenarios = loaded.scenarios.len(), "replaced preset catalog");
        *self = loaded;
        Ok(())
    }

    /// Scenarios in load order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Returns true if no scenarios are loaded.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Find a scenario by id.
    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Select a scenario, clearing the current difficulty.
    pub fn select_scenario(&mut self, id: &str) -> BagResult<&Scenario> {
        let index = self
            .scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| BagError::UnknownScenario(id.to_string()))?;
        self.scenario = Some(index);
        self.difficulty = None;
        info!(scenario = id, "selected scenario");
        Ok(&self.scenarios[index])
    }

    /// Select a difficulty of the current scenario.
    pub fn select_difficulty(&mut self, id: &str) -> BagResult<&Difficulty> {
        let scenario_index = self.scenario.ok_or(BagError::NoScenarioSelected)?;
        let scenario = &self.scenarios[scenario_index];
        let index = scenario
            .difficulties
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| BagError::UnknownDifficulty(id.to_string()))?;
        self.difficulty = Some(index);
        info!(scenario = %scenario.id, difficulty = id, "selected difficulty");
        Ok(&scenario.difficulties[index])
    }

    /// The selected scenario, if any.
    pub fn current_scenario(&self) -> Option<&Scenario> {
        self.scenario.map(|i| &self.scenarios[i])
    }

    /// The selected difficulty, if any.
    pub fn current_difficulty(&self) -> Option<&Difficulty> {
        let scenario = self.current_scenario()?;
        self.difficulty.map(|i| &scenario.difficulties[i])
    }

    /// Difficulties of the selected scenario.
    pub fn difficulties(&self) -> BagResult<&[Difficulty]> {
        self.current_scenario()
            .map(|s| s.difficulties.as_slice())
            .ok_or(BagError::NoScenarioSelected)
    }

    /// Display name of the selected scenario, or [`NO_SCENARIO`].
    pub fn current_scenario_name(&self) -> &str {
        self.current_scenario()
            .map_or(NO_SCENARIO, |s| s.name.as_str())
    }

    /// Display name of the selected difficulty, or [`NO_DIFFICULTY`].
    pub fn current_difficulty_name(&self) -> &str {
        self.current_difficulty()
            .map_or(NO_DIFFICULTY, |d| d.name.as_str())
    }

    /// The token table of the selected difficulty, if both are selected.
    pub fn active_table(&self) -> Option<&CountTable> {
        self.current_difficulty().map(|d| &d.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESETS: &str = r#"{
        "scenarios": [
            {
                "id": "S1",
                "name": "The Gathering",
                "difficulties": [
                    { "id": "easy", "name": "Easy", "tokens": { "a": 3 } },
                    { "id": "hard", "name": "Hard", "tokens": { "a": 1, "skull": 2 } }
                ]
            },
            {
                "id": "S2",
                "name": "Midnight Masks",
                "difficulties": [
                    { "id": "standard", "name": "Standard", "tokens": {} }
                ]
            }
        ]
    }"#;

    fn catalog() -> PresetCatalog {
        PresetCatalog::from_json(PRESETS).unwrap()
    }

    #[test]
    fn loads_in_document_order() {
        let cat = catalog();
        let ids: Vec<_> = cat.scenarios().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
        assert!(cat.current_scenario().is_none());
        assert!(cat.active_table().is_none());
    }

    #[test]
    fn sentinels_when_nothing_selected() {
        let cat = catalog();
        assert_eq!(cat.current_scenario_name(), NO_SCENARIO);
        assert_eq!(cat.current_difficulty_name(), NO_DIFFICULTY);
    }

    #[test]
    fn select_scenario_then_difficulty() {
        let mut cat = catalog();
        cat.select_scenario("S1").unwrap();
        assert_eq!(cat.current_scenario_name(), "The Gathering");
        assert_eq!(cat.current_difficulty_name(), NO_DIFFICULTY);
        assert!(cat.active_table().is_none());

        let diff = cat.select_difficulty("easy").unwrap();
        assert_eq!(diff.name, "Easy");
        assert_eq!(cat.current_difficulty_name(), "Easy");
        assert_eq!(cat.active_table().unwrap().get("a"), Some(&3));
    }

    #[test]
    fn reselecting_scenario_clears_difficulty() {
        let mut cat = catalog();
        cat.select_scenario("S1").unwrap();
        cat.select_difficulty("hard").unwrap();
        cat.select_scenario("S2").unwrap();
        assert!(cat.current_difficulty().is_none());
        assert!(cat.active_table().is_none());
    }

    #[test]
    fn unknown_scenario_leaves_selection() {
        let mut cat = catalog();
        cat.select_scenario("S1").unwrap();
        cat.select_difficulty("easy").unwrap();
        let err = cat.select_scenario("nope").unwrap_err();
        assert!(matches!(err, BagError::UnknownScenario(id) if id == "nope"));
        assert_eq!(cat.current_scenario_name(), "The Gathering");
        assert_eq!(cat.current_difficulty_name(), "Easy");
    }

    #[test]
    fn unknown_difficulty_leaves_selection() {
        let mut cat = catalog();
        cat.select_scenario("S1").unwrap();
        cat.select_difficulty("easy").unwrap();
        assert!(matches!(
            cat.select_difficulty("standard"),
            Err(BagError::UnknownDifficulty(_))
        ));
        assert_eq!(cat.current_difficulty_name(), "Easy");
    }

    #[test]
    fn difficulty_requires_scenario() {
        let mut cat = catalog();
        assert!(matches!(
            cat.select_difficulty("easy"),
            Err(BagError::NoScenarioSelected)
        ));
        assert!(matches!(cat.difficulties(), Err(BagError::NoScenarioSelected)));
    }

    #[test]
    fn failed_load_keeps_previous_catalog() {
        let mut cat = catalog();
        cat.select_scenario("S1").unwrap();
        assert!(cat.load("{ not json").is_err());
        assert_eq!(cat.scenarios().len(), 2);
        assert_eq!(cat.current_scenario_name(), "The Gathering");
    }

    #[test]
    fn successful_load_clears_selection() {
        let mut cat = catalog();
        cat.select_scenario("S1").unwrap();
        cat.load(r#"{"scenarios":[{"id":"X","name":"X","difficulties":[]}]}"#)
            .unwrap();
        assert_eq!(cat.scenarios().len(), 1);
        assert!(cat.current_scenario().is_none());
    }
}
