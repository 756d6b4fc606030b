//! Player-facing text for scenes, items, and inventory.

use std::collections::HashSet;

use lt_core::{CoreResult, GameState, ItemId};

use crate::config::EngineConfig;

/// Describe the current scene.
///
/// Uses the first-visit text when `first_visit` is set. Contents of
/// accessible containers are listed under the container.
pub fn describe_scene(
    state: &GameState,
    config: &EngineConfig,
    first_visit: bool,
) -> CoreResult<String> {
    let scene = state.current_scene()?;
    let mut output = scene.title.clone();

    let description = scene.description_for(first_visit);
    if !description.is_empty() {
        output.push('\n');
        output.push_str(description);
    }

    if !scene.atmosphere.is_empty() {
        let line = &scene.atmosphere[state.moves as usize % scene.atmosphere.len()];
        output.push('\n');
        output.push_str(line);
    }

    let mut listing = Vec::new();
    let mut seen = HashSet::new();
    for id in &scene.items {
        let item = state.item(id)?;
        if item.description.is_empty() {
            listing.push(format!("There is a {} here.", item.name));
        } else {
            listing.push(item.description.clone());
        }
        push_contents(state, id, 1, &mut listing, &mut seen)?;
    }
    if !listing.is_empty() {
        output.push_str("\n\n");
        output.push_str(&listing.join("\n"));
    }

    if config.list_exits && !scene.exits.is_empty() {
        let exits: Vec<&str> = scene.exits.keys().map(|d| d.name()).collect();
        output.push_str(&format!("\n\nExits: {}.", exits.join(", ")));
    }

    Ok(output)
}

// Nested listing of what can be seen inside `id`, one indent step per level.
// Each container is expanded at most once.
fn push_contents<'a>(
    state: &'a GameState,
    id: &'a ItemId,
    depth: usize,
    lines: &mut Vec<String>,
    seen: &mut HashSet<&'a ItemId>,
) -> CoreResult<()> {
    let item = state.item(id)?;
    if !item.contents_accessible() || item.state.contents.is_empty() || !seen.insert(id) {
        return Ok(());
    }
    let indent = "  ".repeat(depth);
    lines.push(format!("{indent}The {} contains:", item.name));
    for inner in &item.state.contents {
        lines.push(format!("{indent}  {}", state.item(inner)?.name));
        push_contents(state, inner, depth + 2, lines, seen)?;
    }
    Ok(())
}

/// Describe a single item, as for `examine`.
pub fn describe_item(state: &GameState, id: &ItemId) -> CoreResult<String> {
    let item = state.item(id)?;
    let mut output = match (&item.examine_text, item.description.is_empty()) {
        (Some(text), _) => text.clone(),
        (None, false) => item.description.clone(),
        (None, true) => format!("You see nothing special about the {}.", item.name),
    };

    if item.openable {
        let open = if item.is_open() { "open" } else { "closed" };
        output.push_str(&format!(" The {} is {open}.", item.name));
    }
    if item.contents_accessible() && !item.state.contents.is_empty() {
        output.push('\n');
        output.push_str(&list_contents(state, id)?);
    }
    Ok(output)
}

/// List a container's contents, one per line.
pub fn list_contents(state: &GameState, id: &ItemId) -> CoreResult<String> {
    let item = state.item(id)?;
    if item.state.contents.is_empty() {
        return Ok(format!("The {} is empty.", item.name));
    }
    let mut lines = vec![format!("The {} contains:", item.name)];
    for inner in &item.state.contents {
        lines.push(format!("  {}", state.item(inner)?.name));
    }
    Ok(lines.join("\n"))
}

/// Join item names as prose: "a", "a and b", "a, b and c".
pub fn join_names(state: &GameState, ids: &[ItemId]) -> CoreResult<String> {
    let names = ids
        .iter()
        .map(|id| state.item(id).map(|item| item.name.as_str()))
        .collect::<CoreResult<Vec<_>>>()?;
    Ok(match names.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    })
}

/// Describe what the player carries.
pub fn describe_inventory(state: &GameState) -> CoreResult<String> {
    if state.inventory.is_empty() {
        return Ok("You are empty-handed.".to_string());
    }
    let mut lines = vec!["You are carrying:".to_string()];
    let mut seen = HashSet::new();
    for id in &state.inventory {
        lines.push(format!("  {}", state.item(id)?.name));
        push_contents(state, id, 2, &mut lines, &mut seen)?;
    }
    Ok(lines.join("\n"))
}

/// Report the score.
pub fn describe_score(state: &GameState, max_score: u32) -> String {
    let moves = if state.moves == 1 { "move" } else { "moves" };
    format!(
        "Your score is {} (total of {max_score} points), in {} {moves}.",
        state.score, state.moves
    )
}
