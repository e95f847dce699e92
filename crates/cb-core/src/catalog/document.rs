//! The JSON preset document.
//!
//! ```json
//! {
//!   "scenarios": [
//!     {
//!       "id": "gathering",
//!       "name": "The Gathering",
//!       "difficulties": [
//!         { "id": "easy", "name": "Easy", "tokens": { "skull": 2, "+1": 2 } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Every field shown is required; `tokens` may be empty but must be present.

use std::collections::HashSet;

use serde::Deserialize;

use super::Scenario;
use crate::error::{BagError, BagResult};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetDocument {
    scenarios: Vec<Scenario>,
}

/// Parse and validate a preset document.
pub fn parse(source: &str) -> BagResult<Vec<Scenario>> {
    let doc: PresetDocument =
        serde_json::from_str(source).map_err(|e| BagError::InvalidConfig(e.to_string()))?;
    validate(&doc.scenarios)?;
    Ok(doc.scenarios)
}

/// Check id/name presence and id uniqueness.
pub fn validate(scenarios: &[Scenario]) -> BagResult<()> {
    let mut scenario_ids = HashSet::new();
    for scenario in scenarios {
        require_non_empty("scenario id", &scenario.id, "")?;
        require_non_empty("scenario name", &scenario.name, &scenario.id)?;
        if !scenario_ids.insert(scenario.id.as_str()) {
            return Err(BagError::InvalidConfig(format!(
                "duplicate scenario id '{}'",
                scenario.id
            )));
        }

        let mut difficulty_ids = HashSet::new();
        for difficulty in &scenario.difficulties {
            require_non_empty("difficulty id", &difficulty.id, &scenario.id)?;
            require_non_empty("difficulty name", &difficulty.name, &difficulty.id)?;
            if !difficulty_ids.insert(difficulty.id.as_str()) {
                return Err(BagError::InvalidConfig(format!(
                    "duplicate difficulty id '{}' in scenario '{}'",
                    difficulty.id, scenario.id
                )));
            }
        }
    }
    Ok(())
}

fn require_non_empty(field: &str, value: &str, context: &str) -> BagResult<()> {
    if !value.trim().is_empty() {
        return Ok(());
    }
    let msg = if context.is_empty() {
        format!("empty {field}")
    } else {
        format!("empty {field} (near '{context}')")
    };
    Err(BagError::InvalidConfig(msg))
}
