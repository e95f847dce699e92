//! A bounded list of investigator profiles.

use super::{DEFAULT_MAX_ACTIONS, Profile};
use crate::error::{BagError, BagResult};

/// Most profiles a roster can hold.
pub const MAX_PROFILES: usize = 4;

/// Between one and [`MAX_PROFILES`] profiles, in creation order.
///
/// Positions in the public API are zero-based indices; front ends that show
/// 1-based numbers convert at their boundary.
#[derive(Debug, Clone)]
pub struct ProfileRoster {
    profiles: Vec<Profile>,
}

impl ProfileRoster {
    /// A roster holding a single "Investigator 1".
    pub fn new() -> Self {
        Self {
            profiles: vec![Profile::new("Investigator 1", DEFAULT_MAX_ACTIONS)],
        }
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always false: a roster keeps at least one profile.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Append a profile. Fails when the roster is full.
    pub fn add(&mut self, name: impl Into<String>) -> BagResult<&mut Profile> {
        if self.profiles.len() >= MAX_PROFILES {
            return Err(BagError::ProfileLimit(MAX_PROFILES));
        }
        self.profiles.push(Profile::new(name, DEFAULT_MAX_ACTIONS));
        let last = self.profiles.len() - 1;
        Ok(&mut self.profiles[last])
    }

    /// Remove the profile at `index`. The last profile cannot be removed.
    pub fn remove(&mut self, index: usize) -> BagResult<Profile> {
        if index >= self.profiles.len() {
            return Err(BagError::UnknownProfile(index + 1));
        }
        if self.profiles.len() <= 1 {
            return Err(BagError::LastProfile);
        }
        Ok(self.profiles.remove(index))
    }

    /// Profile at `index`.
    pub fn get(&self, index: usize) -> Option<&Profile> {
        self.profiles.get(index)
    }

    /// Mutable profile at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Profile> {
        self.profiles.get_mut(index)
    }

    /// All profiles in order.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }
}

impl Default for ProfileRoster {
    fn default() -> Self {
        Self::new()
    }
}
