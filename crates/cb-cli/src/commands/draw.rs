use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use cb_core::session::EMPTY_BAG;
use cb_core::stats::total_draws;

use super::BagArgs;

pub fn run(args: &BagArgs, times: u32) -> Result<(), String> {
    let mut bag = super::build_bag(args)?;

    if let Some(selection) = super::selection_line(&bag) {
        println!("  {}", selection.dimmed());
    }

    let mut last = None;
    for _ in 0..times {
        match bag.draw() {
            Some(token) => last = Some(token),
            None => {
                println!("  {EMPTY_BAG}");
                return Ok(());
            }
        }
    }

    if times == 1 {
        if let Some(token) = last {
            println!("  {} {}", "Drew:".bold(), token.bold());
        }
        return Ok(());
    }

    let draws = total_draws(bag.usages());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Token", "Count", "Drawn", "Share"]);

    for (token, count) in bag.counts() {
        let drawn = bag.usage(token);
        let share = if draws == 0 {
            0.0
        } else {
            100.0 * f64::from(drawn) / draws as f64
        };
        table.add_row(vec![
            token.clone(),
            count.to_string(),
            drawn.to_string(),
            format!("{share:.1}%"),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {draws} draws");

    Ok(())
}
