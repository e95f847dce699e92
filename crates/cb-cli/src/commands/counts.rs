use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use cb_core::draw_odds;

use super::BagArgs;

pub fn run(args: &BagArgs) -> Result<(), String> {
    let bag = super::build_bag(args)?;

    if let Some(selection) = super::selection_line(&bag) {
        println!("  {}", selection.dimmed());
    }

    let counts = bag.counts();
    if counts.is_empty() {
        println!("  No tokens in the active table.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Token", "Count", "Odds"]);

    for ((token, count), (_, pct)) in counts.iter().zip(draw_odds(counts)) {
        table.add_row(vec![token.clone(), count.to_string(), format!("{pct:.1}%")]);
    }

    println!("{table}");
    println!();
    println!("  {} tokens in the bag", bag.registry().total());

    Ok(())
}
