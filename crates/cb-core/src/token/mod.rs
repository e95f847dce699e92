//! Token tables and the token registry.
//!
//! A token is identified by an opaque string such as `"skull"` or `"-2"`.
//! Tables are ordered maps so that every snapshot iterates in the same
//! (lexicographic) order and front ends can present stable rows.

pub mod registry;

pub use registry::TokenRegistry;

use std::collections::BTreeMap;

/// Token identifier to configured count ("copies in the bag").
pub type CountTable = BTreeMap<String, u32>;

/// Token identifier to number of times it was drawn since the last reset.
pub type UsageTable = BTreeMap<String, u32>;

/// The Arkham Horror chaos tokens a standalone bag starts with.
pub const DEFAULT_TOKENS: &[&str] = &[
    "skull",
    "cultist",
    "elder_thing",
    "tablet",
    "tentacle",
    "elder_sign",
    "-1",
    "0",
    "+1",
    "-2",
    "-3",
    "-4",
];

/// A count table holding every default token at count 0.
pub fn default_table() -> CountTable {
    DEFAULT_TOKENS.iter().map(|t| (t.to_string(), 0)).collect()
}

/// Build a count table from `(token, count)` pairs.
pub fn table_from<I, S>(entries: I) -> CountTable
where
    I: IntoIterator<Item = (S, u32)>,
    S: Into<String>,
{
    entries.into_iter().map(|(t, c)| (t.into(), c)).collect()
}
