//! Investigator profiles: a name plus the counters tracked at the table.
//!
//! Actions are bounded by a per-profile maximum; damage, horror, clues, and
//! resources only have a floor of zero.

pub mod roster;

pub use roster::ProfileRoster;

use serde::{Deserialize, Serialize};

/// Default maximum actions per round.
pub const DEFAULT_MAX_ACTIONS: u32 = 3;

/// A counter on a profile that can be adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Actions remaining this round.
    Actions,
    /// Damage taken.
    Damage,
    /// Horror taken.
    Horror,
    /// Clues held.
    Clues,
    /// Resources held.
    Resources,
}

impl Resource {
    /// Parse a resource name (case-insensitive, singular or plural).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "actions" | "action" => Some(Self::Actions),
            "damage" => Some(Self::Damage),
            "horror" => Some(Self::Horror),
            "clues" | "clue" => Some(Self::Clues),
            "resources" | "resource" => Some(Self::Resources),
            _ => None,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Actions => write!(f, "actions"),
            Self::Damage => write!(f, "damage"),
            Self::Horror => write!(f, "horror"),
            Self::Clues => write!(f, "clues"),
            Self::Resources => write!(f, "resources"),
        }
    }
}

/// One investigator's tracked state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    name: String,
    max_actions: u32,
    actions: u32,
    damage: u32,
    horror: u32,
    clues: u32,
    resources: u32,
}

impl Profile {
    /// Create a profile with full actions. `max_actions` is at least 1.
    pub fn new(name: impl Into<String>, max_actions: u32) -> Self {
        let max_actions = max_actions.max(1);
        Self {
            name: name.into(),
            max_actions,
            actions: max_actions,
            damage: 0,
            horror: 0,
            clues: 0,
            resources: 0,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the profile.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Maximum actions per round.
    pub fn max_actions(&self) -> u32 {
        self.max_actions
    }

    /// Set the maximum (at least 1); current actions clamp down to it.
    pub fn set_max_actions(&mut self, max: u32) {
        self.max_actions = max.max(1);
        self.actions = self.actions.min(self.max_actions);
    }

    /// Set current actions, clamped to `0..=max_actions`.
    pub fn set_actions(&mut self, actions: u32) {
        self.actions = actions.min(self.max_actions);
    }

    /// Refill actions to the maximum.
    pub fn reset_actions(&mut self) {
        self.actions = self.max_actions;
    }

    /// Current value of a counter.
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Actions => self.actions,
            Resource::Damage => self.damage,
            Resource::Horror => self.horror,
            Resource::Clues => self.clues,
            Resource::Resources => self.resources,
        }
    }

    /// Add one to a counter. Actions stop at the maximum.
    pub fn increment(&mut self, resource: Resource) -> u32 {
        self.adjust(resource, 1)
    }

    /// Remove one from a counter, stopping at zero.
    pub fn decrement(&mut self, resource: Resource) -> u32 {
        self.adjust(resource, -1)
    }

    /// Adjust a counter by `delta`, clamping to its bounds. Returns the new value.
    pub fn adjust(&mut self, resource: Resource, delta: i64) -> u32 {
        let max = match resource {
            Resource::Actions => self.max_actions,
            _ => u32::MAX,
        };
        let slot = match resource {
            Resource::Actions => &mut self.actions,
            Resource::Damage => &mut self.damage,
            Resource::Horror => &mut self.horror,
            Resource::Clues => &mut self.clues,
            Resource::Resources => &mut self.resources,
        };
        let next = (i64::from(*slot) + delta).clamp(0, i64::from(max));
        *slot = u32::try_from(next).unwrap_or(max);
        *slot
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("Investigator", DEFAULT_MAX_ACTIONS)
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: actions {}/{}, damage {}, horror {}, clues {}, resources {}",
            self.name,
            self.actions,
            self.max_actions,
            self.damage,
            self.horror,
            self.clues,
            self.resources
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_with_full_actions() {
        let p = Profile::default();
        assert_eq!(p.name(), "Investigator");
        assert_eq!(p.max_actions(), 3);
        assert_eq!(p.get(Resource::Actions), 3);
        assert_eq!(p.get(Resource::Damage), 0);
    }

    #[test]
    fn max_actions_at_least_one() {
        let mut p = Profile::new("Roland", 0);
        assert_eq!(p.max_actions(), 1);
        p.set_max_actions(0);
        assert_eq!(p.max_actions(), 1);
    }

    #[test]
    fn lowering_max_clamps_current() {
        let mut p = Profile::new("Daisy", 4);
        p.set_max_actions(2);
        assert_eq!(p.get(Resource::Actions), 2);
        p.set_actions(10);
        assert_eq!(p.get(Resource::Actions), 2);
    }

    #[test]
    fn actions_capped_at_max() {
        let mut p = Profile::default();
        assert_eq!(p.increment(Resource::Actions), 3);
        assert_eq!(p.decrement(Resource::Actions), 2);
        p.reset_actions();
        assert_eq!(p.get(Resource::Actions), 3);
    }

    #[test]
    fn counters_floor_at_zero() {
        let mut p = Profile::default();
        assert_eq!(p.decrement(Resource::Horror), 0);
        assert_eq!(p.increment(Resource::Horror), 1);
        assert_eq!(p.adjust(Resource::Clues, 5), 5);
        assert_eq!(p.adjust(Resource::Clues, -9), 0);
        for _ in 0..3 {
            p.decrement(Resource::Actions);
        }
        assert_eq!(p.decrement(Resource::Actions), 0);
    }

    #[test]
    fn resource_parse() {
        assert_eq!(Resource::parse("Damage"), Some(Resource::Damage));
        assert_eq!(Resource::parse("clue"), Some(Resource::Clues));
        assert_eq!(Resource::parse("sanity"), None);
        assert_eq!(Resource::Resources.to_string(), "resources");
    }

    #[test]
    fn display() {
        let p = Profile::new("Agnes", 3);
        assert_eq!(
            p.to_string(),
            "Agnes: actions 3/3, damage 0, horror 0, clues 0, resources 0"
        );
    }
}
