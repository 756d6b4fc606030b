//! The alias index: typed words and phrases to canonical item ids.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::id::ItemId;
use crate::item::Item;

/// Words dropped from the front of a phrase before lookup.
const ARTICLES: &[&str] = &["the", "a", "an"];

/// Words that never identify an item on their own.
const FILLER: &[&str] = &[
    "the", "a", "an", "of", "in", "into", "on", "at", "to", "from", "with", "for", "and",
];

fn is_filler(word: &str) -> bool {
    FILLER.contains(&word)
}

/// Normalize a typed phrase: lowercase, collapse whitespace, drop leading articles.
pub fn normalize(phrase: &str) -> String {
    let lower = phrase.to_lowercase();
    let mut words: Vec<&str> = lower.split_whitespace().collect();
    while words.len() > 1 && ARTICLES.contains(&words[0]) {
        words.remove(0);
    }
    words.join(" ")
}

/// Bidirectional index between phrases and canonical item ids.
///
/// Built once from item definitions. Forward entries map a whole phrase
/// (canonical name, alias, or id with `_` read as a space) to every item it
/// names, in definition order. Reverse entries hold every single word an item
/// can be called by, which lets "brown sack" match an item whose name is
/// "sack" and whose aliases include "brown".
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    phrases: HashMap<String, Vec<ItemId>>,
    terms: HashMap<ItemId, BTreeSet<String>>,
    order: Vec<ItemId>,
}

impl AliasIndex {
    /// Build the index from item definitions.
    pub fn build(items: &BTreeMap<ItemId, Item>) -> Self {
        let mut index = Self::default();
        for item in items.values() {
            index.insert(item);
        }
        tracing::debug!(
            items = index.order.len(),
            phrases = index.phrases.len(),
            "built alias index"
        );
        index
    }

    fn insert(&mut self, item: &Item) {
        let id_phrase = item.id.as_str().replace('_', " ");
        let phrases = std::iter::once(item.name.as_str())
            .chain(item.aliases.iter().map(String::as_str))
            .chain(std::iter::once(id_phrase.as_str()));

        let terms = self.terms.entry(item.id.clone()).or_default();
        for phrase in phrases {
            let phrase = normalize(phrase);
            if phrase.is_empty() {
                continue;
            }
            terms.extend(
                phrase
                    .split(' ')
                    .filter(|word| !is_filler(word))
                    .map(str::to_string),
            );
            let ids = self.phrases.entry(phrase).or_default();
            if !ids.contains(&item.id) {
                ids.push(item.id.clone());
            }
        }
        self.order.push(item.id.clone());
    }

    /// Whether `phrase` names `item`.
    pub fn matches(&self, item: &ItemId, phrase: &str) -> bool {
        let phrase = normalize(phrase);
        if phrase.is_empty() {
            return false;
        }
        if self
            .phrases
            .get(&phrase)
            .is_some_and(|ids| ids.contains(item))
        {
            return true;
        }
        let Some(terms) = self.terms.get(item) else {
            return false;
        };
        let mut words = phrase.split(' ').filter(|word| !is_filler(word)).peekable();
        words.peek().is_some() && words.all(|word| terms.contains(word))
    }

    /// Every item `phrase` names, regardless of scope, in definition order.
    pub fn lookup(&self, phrase: &str) -> Vec<ItemId> {
        self.order
            .iter()
            .filter(|id| self.matches(id, phrase))
            .cloned()
            .collect()
    }

    /// The words an item can be referred to by.
    pub fn terms_of(&self, item: &ItemId) -> impl Iterator<Item = &str> {
        self.terms
            .get(item)
            .into_iter()
            .flat_map(|terms| terms.iter().map(String::as_str))
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> AliasIndex {
        let mut items = BTreeMap::new();
        for item in [
            Item::new("brown_sack", "sack").with_aliases(["bag", "brown"]),
            Item::new("lunch", "lunch").with_aliases(["food", "sandwich"]),
            Item::new("jewel_egg", "jewel-encrusted egg").with_aliases(["egg"]),
            Item::new("bird_egg", "small egg").with_aliases(["egg"]),
        ] {
            items.insert(item.id.clone(), item);
        }
        AliasIndex::build(&items)
    }

    #[test]
    fn normalize_strips_articles_and_case() {
        assert_eq!(normalize("  The  Brown   SACK "), "brown sack");
        assert_eq!(normalize("a"), "a");
    }

    #[test]
    fn name_alias_and_id_all_match() {
        let index = index();
        let sack = ItemId::new("brown_sack");
        assert!(index.matches(&sack, "sack"));
        assert!(index.matches(&sack, "BAG"));
        assert!(index.matches(&sack, "brown sack"));
        assert!(index.matches(&sack, "the brown bag"));
        assert!(!index.matches(&sack, "lunch"));
    }

    #[test]
    fn every_word_must_be_a_term() {
        let index = index();
        assert!(!index.matches(&ItemId::new("brown_sack"), "brown lunch"));
    }

    #[test]
    fn filler_words_are_not_terms() {
        let mut items = BTreeMap::new();
        let garlic = Item::new("garlic", "clove of garlic");
        items.insert(garlic.id.clone(), garlic);
        let index = AliasIndex::build(&items);
        let garlic = ItemId::new("garlic");

        assert!(index.matches(&garlic, "clove of garlic"));
        assert!(index.matches(&garlic, "garlic clove"));
        assert!(!index.matches(&garlic, "of"));
        assert!(!index.matches(&garlic, "the of"));
        assert!(index.lookup("of").is_empty());
        assert!(!index.terms_of(&garlic).any(|term| term == "of"));
    }

    #[test]
    fn shared_alias_lists_all_items_in_order() {
        let index = index();
        assert_eq!(
            index.lookup("egg"),
            vec![ItemId::new("bird_egg"), ItemId::new("jewel_egg")]
        );
        assert!(index.lookup("lantern").is_empty());
    }

    #[test]
    fn terms_include_alias_words() {
        let index = index();
        let terms: Vec<&str> = index.terms_of(&ItemId::new("jewel_egg")).collect();
        assert!(terms.contains(&"jewel-encrusted"));
        assert!(terms.contains(&"egg"));
        assert!(terms.contains(&"jewel"));
    }
}
