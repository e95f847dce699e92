use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use cb_core::{BagConfig, ChaosBag};

fn load(presets: &Path) -> Result<ChaosBag, String> {
    ChaosBag::from_config(&BagConfig::default().with_presets(presets)).map_err(|e| e.to_string())
}

pub fn run(presets: &Path) -> Result<(), String> {
    let bag = load(presets)?;
    let scenarios = bag.scenarios();

    if scenarios.is_empty() {
        println!("  No scenarios found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Difficulties"]);

    for scenario in scenarios {
        let difficulties = if scenario.difficulties.is_empty() {
            "—".to_string()
        } else {
            scenario
                .difficulties
                .iter()
                .map(|d| d.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![&scenario.id, &scenario.name, &difficulties]);
    }

    println!("{table}");
    println!();
    println!("  {} scenarios", scenarios.len());

    Ok(())
}

pub fn difficulties(presets: &Path, scenario: &str) -> Result<(), String> {
    let mut bag = load(presets)?;
    let name = bag
        .select_scenario(scenario)
        .map_err(|e| e.to_string())?
        .name
        .clone();
    let difficulties = bag.difficulties().map_err(|e| e.to_string())?;

    println!("  {name}");
    if difficulties.is_empty() {
        println!("  No difficulties found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Tokens"]);

    for difficulty in difficulties {
        let total: u64 = difficulty.tokens.values().map(|&c| u64::from(c)).sum();
        table.add_row(vec![
            difficulty.id.clone(),
            difficulty.name.clone(),
            total.to_string(),
        ]);
    }

    println!("{table}");

    Ok(())
}
