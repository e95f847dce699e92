pub mod counts;
pub mod draw;
pub mod play;
pub mod ports;
pub mod scenarios;

use std::path::PathBuf;

use cb_core::{BagConfig, ChaosBag};
use clap::Args;

/// Options shared by every command that builds a bag.
#[derive(Args, Debug, Clone)]
pub struct BagArgs {
    /// Preset file (JSON) with scenarios and difficulties
    #[arg(short, long)]
    pub presets: Option<PathBuf>,

    /// Scenario id to select (requires --presets)
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Difficulty id to select (requires --scenario)
    #[arg(short, long)]
    pub difficulty: Option<String>,

    /// Override a token count, e.g. --set skull=2 (repeatable)
    #[arg(long = "set", value_name = "TOKEN=N", allow_hyphen_values = true)]
    pub set: Vec<String>,

    /// RNG seed for reproducible draws
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Build a bag from the shared options: load presets, apply the selection,
/// then the count overrides.
fn build_bag(args: &BagArgs) -> Result<ChaosBag, String> {
    let mut config = BagConfig::default();
    if let Some(path) = &args.presets {
        config = config.with_presets(path);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let mut bag = ChaosBag::from_config(&config).map_err(|e| e.to_string())?;

    if let Some(scenario) = &args.scenario {
        bag.select_scenario(scenario).map_err(|e| e.to_string())?;
    }
    if let Some(difficulty) = &args.difficulty {
        bag.select_difficulty(difficulty)
            .map_err(|e| e.to_string())?;
    }

    for assignment in &args.set {
        let (token, value) = parse_assignment(assignment)?;
        if !bag.set_count(token, value) {
            return Err(format!("unknown token: {token}"));
        }
    }
    Ok(bag)
}

/// Parse `token=N`.
fn parse_assignment(s: &str) -> Result<(&str, i64), String> {
    let (token, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TOKEN=N, got '{s}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid count in '{s}'"))?;
    Ok((token.trim(), value))
}

/// Header line naming the current selection, if presets are in use.
fn selection_line(bag: &ChaosBag) -> Option<String> {
    bag.catalog()?;
    Some(format!("{} / {}", bag.scenario_name(), bag.difficulty_name()))
}
