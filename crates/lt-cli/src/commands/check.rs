use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path) -> Result<(), String> {
    let world = super::load_world(path)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Scene", "Title", "Exits", "Items"]);

    for scene in world.scenes.values() {
        let exits = scene
            .exits
            .keys()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", ");
        let exits = if exits.is_empty() { "-".to_string() } else { exits };
        table.add_row(vec![
            scene.id.to_string(),
            scene.title.clone(),
            exits,
            scene.items.len().to_string(),
        ]);
    }

    let title = if world.title.is_empty() {
        path.display().to_string()
    } else {
        world.title.clone()
    };
    let treasures = world.items.values().filter(|item| item.treasure).count();

    println!("{table}");
    println!();
    println!("  {} All checks passed for '{title}'.", "ok".green().bold());
    println!(
        "  {} scenes, {} items ({treasures} treasures), start: {}, max score: {}",
        world.scenes.len(),
        world.items.len(),
        world.start_scene,
        world.scoring.max_score,
    );

    Ok(())
}
