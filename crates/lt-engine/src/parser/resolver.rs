//! Entity name resolution against the player's scope.

use lt_core::alias::normalize;
use lt_core::{AliasIndex, GameState, ItemId};

use crate::error::CommandError;

/// Resolve a typed phrase to the first in-scope item it names.
///
/// Scope order is inventory, then the current scene, with open containers'
/// contents directly after the container. The first match wins.
pub fn resolve_item(
    index: &AliasIndex,
    state: &GameState,
    phrase: &str,
) -> Result<ItemId, CommandError> {
    let found = state
        .scope()
        .into_iter()
        .find(|id| index.matches(id, phrase));
    match found {
        Some(id) => Ok(id),
        None => Err(CommandError::NotHere(display_name(index, state, phrase))),
    }
}

/// Name used when a phrase cannot be resolved in scope.
///
/// If the phrase names an item anywhere in the world, that item's canonical
/// name; otherwise the phrase as typed, minus any leading article.
pub fn display_name(index: &AliasIndex, state: &GameState, phrase: &str) -> String {
    index
        .lookup(phrase)
        .first()
        .and_then(|id| state.items.get(id))
        .map(|item| item.name.clone())
        .unwrap_or_else(|| strip_articles(phrase))
}

fn strip_articles(phrase: &str) -> String {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let normalized = normalize(phrase);
    let kept = normalized.split(' ').count();
    words[words.len().saturating_sub(kept)..].join(" ")
}
