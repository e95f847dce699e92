//! Read-only statistics derived from the count and usage tables.
//!
//! Two different views are offered and they must not be confused:
//!
//! - [`draw_odds`] is the true single-draw distribution, `count / total`.
//! - [`decay_projection`] is a display-only estimate where every past draw
//!   makes a token look less likely: `weight = count / (1 + usage)`,
//!   normalised to percentages. It never influences the actual draw.

use serde::Serialize;

use crate::token::{CountTable, UsageTable};

/// One row of the decaying-likelihood projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenStat {
    /// Token identifier.
    pub token: String,
    /// Configured count.
    pub count: u32,
    /// Draws since the last reset.
    pub drawn: u32,
    /// `count / (1 + drawn)`.
    pub weight: f64,
    /// Share of the total weight, in percent.
    pub probability: f64,
}

/// Compute the decaying-likelihood projection, one row per counted token.
///
/// Rows follow the order of `counts`. If every weight is zero all
/// probabilities are zero.
pub fn decay_projection(counts: &CountTable, usages: &UsageTable) -> Vec<TokenStat> {
    let mut rows: Vec<TokenStat> = counts
        .iter()
        .map(|(token, &count)| {
            let drawn = usages.get(token).copied().unwrap_or(0);
            TokenStat {
                token: token.clone(),
                count,
                drawn,
                weight: f64::from(count) / (1.0 + f64::from(drawn)),
                probability: 0.0,
            }
        })
        .collect();

    let total: f64 = rows.iter().map(|r| r.weight).sum();
    if total > 0.0 {
        for row in &mut rows {
            row.probability = 100.0 * row.weight / total;
        }
    }
    rows
}

/// The exact single-draw probability of each token, in percent.
pub fn draw_odds(counts: &CountTable) -> Vec<(String, f64)> {
    let total: u64 = counts.values().map(|&c| u64::from(c)).sum();
    counts
        .iter()
        .map(|(token, &count)| {
            let pct = if total == 0 {
                0.0
            } else {
                100.0 * f64::from(count) / total as f64
            };
            (token.clone(), pct)
        })
        .collect()
}

/// Total number of draws recorded in a usage table.
pub fn total_draws(usages: &UsageTable) -> u64 {
    usages.values().map(|&u| u64::from(u)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::table_from;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn projection_without_draws_matches_odds() {
        let counts = table_from([("skull", 2), ("cultist", 1)]);
        let usages = UsageTable::new();
        let rows = decay_projection(&counts, &usages);
        let odds = draw_odds(&counts);
        for (row, (token, pct)) in rows.iter().zip(odds.iter()) {
            assert_eq!(&row.token, token);
            assert!(approx(row.probability, *pct));
        }
    }

    #[test]
    fn projection_decays_with_usage() {
        let counts = table_from([("a", 2), ("b", 2)]);
        let usages = table_from([("a", 3), ("b", 0)]);
        let rows = decay_projection(&counts, &usages);
        // weights: a = 2/4 = 0.5, b = 2/1 = 2.0
        assert!(approx(rows[0].weight, 0.5));
        assert!(approx(rows[1].weight, 2.0));
        assert!(approx(rows[0].probability, 20.0));
        assert!(approx(rows[1].probability, 80.0));
        // the true odds ignore usage
        let odds = draw_odds(&counts);
        assert!(approx(odds[0].1, 50.0));
    }

    #[test]
    fn projection_sums_to_hundred() {
        let counts = table_from([("a", 5), ("b", 1), ("c", 7), ("d", 0)]);
        let usages = table_from([("a", 1), ("c", 9)]);
        let sum: f64 = decay_projection(&counts, &usages)
            .iter()
            .map(|r| r.probability)
            .sum();
        assert!(approx(sum, 100.0));
    }

    #[test]
    fn zero_weights_give_zero_probabilities() {
        let counts = table_from([("a", 0), ("b", 0)]);
        let rows = decay_projection(&counts, &UsageTable::new());
        assert!(rows.iter().all(|r| r.probability == 0.0));
        assert!(draw_odds(&counts).iter().all(|(_, p)| *p == 0.0));
    }

    #[test]
    fn counts_total_draws() {
        let usages = table_from([("a", 4), ("b", 6)]);
        assert_eq!(total_draws(&usages), 10);
    }
}
