//! Interactive chaos bag session.
//!
//! `BagSession` owns the [`ChaosBag`] and the [`ProfileRoster`] and turns one
//! line of user input into one [`Response`]. Front ends stay thin: they read
//! lines (or hardware triggers), call [`BagSession::process`] or
//! [`BagSession::draw`], print the text, and play a sound for
//! [`Response::drawn`].

use std::fmt::Write as _;

use tracing::debug;

use crate::bag::ChaosBag;
use crate::error::{BagError, BagResult};
use crate::profile::{Profile, ProfileRoster, Resource};
use crate::stats::{decay_projection, draw_odds, total_draws};

/// Informational text for a draw from an empty bag.
pub const EMPTY_BAG: &str = "No tokens available to draw";

/// The outcome of one processed command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Text to show the user.
    pub text: String,
    /// The token drawn by this command, if any.
    pub drawn: Option<String>,
    /// The user asked to end the session.
    pub quit: bool,
}

impl Response {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A chaos bag plus investigator profiles, driven by text commands.
#[derive(Debug, Clone)]
pub struct BagSession {
    bag: ChaosBag,
    roster: ProfileRoster,
}

impl BagSession {
    /// Start a session around `bag` with a fresh roster.
    pub fn new(bag: ChaosBag) -> Self {
        Self {
            bag,
            roster: ProfileRoster::new(),
        }
    }

    /// The chaos bag.
    pub fn bag(&self) -> &ChaosBag {
        &self.bag
    }

    /// Mutable access to the chaos bag.
    pub fn bag_mut(&mut self) -> &mut ChaosBag {
        &mut self.bag
    }

    /// The profile roster.
    pub fn roster(&self) -> &ProfileRoster {
        &self.roster
    }

    /// Process a line of user input.
    pub fn process(&mut self, input: &str) -> BagResult<Response> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Response::default());
        }

        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let rest = parts.next().map(str::trim).unwrap_or("");
        debug!(command = %cmd, "processing command");

        match cmd.as_str() {
            "draw" | "d" => Ok(self.draw()),
            "counts" => Ok(Response::text(self.render_counts())),
            "set" => self.do_set(rest),
            "usage" | "stats" => Ok(Response::text(self.render_usage())),
            "odds" => Ok(Response::text(self.render_odds())),
            "reset" => {
                self.bag.reset_usage();
                Ok(Response::text("Usage counters reset."))
            }
            "scenarios" => Ok(Response::text(self.render_scenarios())),
            "scenario" => self.do_scenario(rest),
            "difficulties" => self.render_difficulties().map(Response::text),
            "difficulty" => self.do_difficulty(rest),
            "status" => Ok(Response::text(self.render_status())),
            "profiles" => Ok(Response::text(self.render_profiles())),
            "profile" => self.do_profile(rest),
            "help" | "?" => Ok(Response::text(HELP)),
            "quit" | "q" | "exit" => Ok(Response {
                text: "Goodbye!".to_string(),
                quit: true,
                ..Response::default()
            }),
            _ => Err(BagError::UnknownCommand(cmd)),
        }
    }

    /// Draw a token. An empty bag is reported as text, not as an error.
    pub fn draw(&mut self) -> Response {
        match self.bag.draw() {
            Some(token) => {
                let times = self.bag.usage(&token);
                Response {
                    text: format!(
                        "Drew: {token} (drawn {times} time{})",
                        if times == 1 { "" } else { "s" }
                    ),
                    drawn: Some(token),
                    quit: false,
                }
            }
            None => Response::text(EMPTY_BAG),
        }
    }

    fn do_set(&mut self, rest: &str) -> BagResult<Response> {
        let usage = || BagError::InvalidCommand("usage: set <token> <count>".to_string());
        let mut args = rest.split_whitespace();
        let token = args.next().ok_or_else(usage)?;
        let value: i64 = args
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(usage)?;
        if !self.bag.set_count(token, value) {
            return Err(BagError::UnknownToken(token.to_string()));
        }
        Ok(Response::text(format!("{token} = {}", self.bag.count(token))))
    }

    fn do_scenario(&mut self, rest: &str) -> BagResult<Response> {
        if rest.is_empty() {
            return Err(BagError::InvalidCommand(
                "usage: scenario <id>".to_string(),
            ));
        }
        let scenario = self.bag.select_scenario(rest)?;
        Ok(Response::text(format!(
            "Scenario: {} ({} difficult{}). Choose one with 'difficulty <id>'.",
            scenario.name,
            scenario.difficulties.len(),
            if scenario.difficulties.len() == 1 { "y" } else { "ies" }
        )))
    }

    fn do_difficulty(&mut self, rest: &str) -> BagResult<Response> {
        if rest.is_empty() {
            return Err(BagError::InvalidCommand(
                "usage: difficulty <id>".to_string(),
            ));
        }
        let difficulty = self.bag.select_difficulty(rest)?;
        let name = difficulty.name.clone();
        Ok(Response::text(format!(
            "Difficulty: {name} ({} tokens in the bag)",
            self.bag.registry().total()
        )))
    }

    fn do_profile(&mut self, rest: &str) -> BagResult<Response> {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let head = parts.next().unwrap_or("");
        let tail = parts.next().map(str::trim).unwrap_or("");

        match head {
            "add" => {
                let name = if tail.is_empty() {
                    format!("Investigator {}", self.roster.len() + 1)
                } else {
                    tail.to_string()
                };
                let profile = self.roster.add(name)?;
                Ok(Response::text(format!("Added {}", profile.name())))
            }
            "remove" => {
                let index = parse_position(tail)?;
                let removed = self.roster.remove(index)?;
                Ok(Response::text(format!("Removed {}", removed.name())))
            }
            "" => Ok(Response::text(self.render_profiles())),
            number => {
                let index = parse_position(number)?;
                let profile = self
                    .roster
                    .get_mut(index)
                    .ok_or(BagError::UnknownProfile(index + 1))?;
                edit_profile(profile, tail)?;
                Ok(Response::text(profile.to_string()))
            }
        }
    }

    fn render_counts(&self) -> String {
        let counts = self.bag.counts();
        if counts.is_empty() {
            return "  (no tokens in the active table)".to_string();
        }
        let mut out = String::new();
        for (token, count) in counts {
            let _ = writeln!(
                out,
                "  {token:<12} {count:>3}   drawn {}",
                self.bag.usage(token)
            );
        }
        let _ = write!(out, "  {} tokens in the bag", self.bag.registry().total());
        out
    }

    fn render_usage(&self) -> String {
        let rows = decay_projection(self.bag.counts(), self.bag.usages());
        if rows.is_empty() {
            return "  (no tokens in the active table)".to_string();
        }
        let mut out = String::from("  token        count  drawn  likelihood\n");
        for row in &rows {
            let _ = writeln!(
                out,
                "  {:<12} {:>5}  {:>5}  {:>9.1}%",
                row.token, row.count, row.drawn, row.probability
            );
        }
        let _ = write!(out, "  {} draws total", total_draws(self.bag.usages()));
        out
    }

    fn render_odds(&self) -> String {
        let odds = draw_odds(self.bag.counts());
        if odds.is_empty() {
            return "  (no tokens in the active table)".to_string();
        }
        odds.iter()
            .map(|(token, pct)| format!("  {token:<12} {pct:>5.1}%"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_scenarios(&self) -> String {
        let scenarios = self.bag.scenarios();
        if scenarios.is_empty() {
            return "  No scenarios loaded.".to_string();
        }
        let current = self
            .bag
            .catalog()
            .and_then(|c| c.current_scenario())
            .map(|s| s.id.as_str());
        scenarios
            .iter()
            .map(|s| {
                let marker = if Some(s.id.as_str()) == current { "*" } else { " " };
                format!(
                    " {marker} {:<12} {} ({} difficulties)",
                    s.id,
                    s.name,
                    s.difficulties.len()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_difficulties(&self) -> BagResult<String> {
        let difficulties = self.bag.difficulties()?;
        if difficulties.is_empty() {
            return Ok("  No difficulties in this scenario.".to_string());
        }
        let current = self
            .bag
            .catalog()
            .and_then(|c| c.current_difficulty())
            .map(|d| d.id.as_str());
        Ok(difficulties
            .iter()
            .map(|d| {
                let marker = if Some(d.id.as_str()) == current { "*" } else { " " };
                let total: u64 = d.tokens.values().map(|&c| u64::from(c)).sum();
                format!(" {marker} {:<12} {} ({total} tokens)", d.id, d.name)
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn render_status(&self) -> String {
        format!(
            "  Scenario:   {}\n  Difficulty: {}\n  Tokens:     {}\n  Draws:      {}\n  Profiles:   {}",
            self.bag.scenario_name(),
            self.bag.difficulty_name(),
            self.bag.registry().total(),
            total_draws(self.bag.usages()),
            self.roster.len()
        )
    }

    fn render_profiles(&self) -> String {
        self.roster
            .iter()
            .enumerate()
            .map(|(i, p)| format!("  #{} {p}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse a 1-based profile number into an index.
fn parse_position(s: &str) -> BagResult<usize> {
    match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(BagError::InvalidCommand(format!(
            "expected a profile number, got '{s}'"
        ))),
    }
}

/// Apply `<field> <op>` to a profile.
///
/// `name <text>`, `max <n>`, or `<resource> <+|-|reset|n>`.
fn edit_profile(profile: &mut Profile, args: &str) -> BagResult<()> {
    let mut parts = args.splitn(2, char::is_whitespace);
    let field = parts.next().unwrap_or("");
    let op = parts.next().map(str::trim).unwrap_or("");
    let usage = || {
        BagError::InvalidCommand(
            "usage: profile <n> <actions|damage|horror|clues|resources> <+|-|reset|N>".to_string(),
        )
    };

    match field {
        "name" if !op.is_empty() => {
            profile.set_name(op);
            return Ok(());
        }
        "max" => {
            let max = op.parse().map_err(|_| usage())?;
            profile.set_max_actions(max);
            return Ok(());
        }
        _ => {}
    }

    let resource = Resource::parse(field).ok_or_else(usage)?;
    match op {
        "+" => {
            profile.increment(resource);
        }
        "-" => {
            profile.decrement(resource);
        }
        "reset" if resource == Resource::Actions => profile.reset_actions(),
        "reset" => {
            profile.adjust(resource, -i64::from(profile.get(resource)));
        }
        value => {
            let target: i64 = value.parse().map_err(|_| usage())?;
            let delta = target - i64::from(profile.get(resource));
            profile.adjust(resource, delta);
        }
    }
    Ok(())
}

const HELP: &str = "\
Bag:
  draw                      draw a token
  counts                    show token counts and draws
  set <token> <n>           change a token count
  usage                     draws per token with decaying likelihood
  odds                      exact odds of the next draw
  reset                     clear draw counters
Presets:
  scenarios                 list scenarios
  scenario <id>             select a scenario
  difficulties              list difficulties of the scenario
  difficulty <id>           select a difficulty
Profiles:
  profiles                  list investigators
  profile add [name]        add an investigator (max 4)
  profile remove <n>        remove investigator #n
  profile <n> <field> <op>  field: actions damage horror clues resources,
                            op: + - reset or a number; also 'name <text>', 'max <n>'
Other:
  status                    current selection and totals
  help                      this text
  quit                      leave the session";
