//! Chaos bag core for Arkham Horror style token draws.
//!
//! Provides the token registry (counts, usage, weighted draw), the
//! scenario/difficulty preset catalog that decides which token table is
//! active, read-only draw statistics, investigator profiles, and a
//! text-command session that front ends drive.

pub mod bag;
pub mod catalog;
pub mod config;
pub mod error;
pub mod profile;
pub mod session;
pub mod stats;
pub mod token;

pub use bag::ChaosBag;
pub use catalog::{Difficulty, PresetCatalog, Scenario};
pub use config::BagConfig;
pub use error::{BagError, BagResult};
pub use profile::{Profile, ProfileRoster, Resource};
pub use session::{BagSession, Response};
pub use stats::{TokenStat, decay_projection, draw_odds};
pub use token::{CountTable, TokenRegistry, UsageTable};
