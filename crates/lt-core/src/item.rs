use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// Broad category of an item, used for rendering and scoring hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A valuable object worth points when deposited.
    #[serde(alias = "TREASURE")]
    Treasure,
    /// Something to fight with.
    #[serde(alias = "WEAPON")]
    Weapon,
    /// A lamp, torch or similar.
    #[serde(alias = "LIGHT_SOURCE")]
    LightSource,
    /// A sack, case, box or similar.
    #[serde(alias = "CONTAINER")]
    Container,
    /// Something edible or drinkable.
    #[serde(alias = "FOOD")]
    Food,
    /// A door, window, grating or other passage fixture.
    #[serde(alias = "DOOR")]
    Door,
    /// Anything else.
    #[default]
    #[serde(alias = "TOOL")]
    Tool,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treasure => write!(f, "treasure"),
            Self::Weapon => write!(f, "weapon"),
            Self::LightSource => write!(f, "light source"),
            Self::Container => write!(f, "container"),
            Self::Food => write!(f, "food"),
            Self::Door => write!(f, "door"),
            Self::Tool => write!(f, "tool"),
        }
    }
}

/// Mutable runtime state of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemState {
    /// Whether the item is open. Only meaningful for openable items.
    pub is_open: bool,
    /// Whether the item is locked. Only meaningful for lockable items.
    pub is_locked: bool,
    /// Items held inside this one, in insertion order.
    pub contents: Vec<ItemId>,
}

/// An item definition together with its runtime state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Canonical identifier. Filled from the map key when loading world data.
    #[serde(default)]
    pub id: ItemId,
    /// Canonical display name.
    pub name: String,
    /// Alternative words or phrases that refer to this item.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Broad category.
    #[serde(default, rename = "type")]
    pub kind: ItemKind,
    /// Line shown when the item is listed in a scene.
    #[serde(default)]
    pub description: String,
    /// Text shown by `examine`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examine_text: Option<String>,
    /// Whether the player can pick the item up.
    #[serde(default)]
    pub portable: bool,
    /// Weight of the item.
    #[serde(default)]
    pub weight: u32,
    /// Size of the item, compared against container capacity.
    #[serde(default)]
    pub size: u32,
    /// Largest item size this container accepts. `None` accepts anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Whether the item can be opened and closed.
    #[serde(default)]
    pub openable: bool,
    /// Whether the item can hold other items.
    #[serde(default)]
    pub container: bool,
    /// Whether the item is a treasure.
    #[serde(default)]
    pub treasure: bool,
    /// Whether the item can be locked.
    #[serde(default)]
    pub lockable: bool,
    /// Item that locks and unlocks this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<ItemId>,
    /// Flag kept equal to this item's open state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binds_flag: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Runtime state. World data supplies it as `initialState`.
    #[serde(default, alias = "initialState")]
    pub state: ItemState,
}

impl Item {
    /// Create a plain, fixed item.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            kind: ItemKind::default(),
            description: String::new(),
            examine_text: None,
            portable: false,
            weight: 0,
            size: 0,
            capacity: None,
            openable: false,
            container: false,
            treasure: false,
            lockable: false,
            key_id: None,
            binds_flag: None,
            tags: Vec::new(),
            state: ItemState::default(),
        }
    }

    /// Add aliases.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Make the item portable with the given size.
    pub fn portable(mut self, size: u32) -> Self {
        self.portable = true;
        self.size = size;
        self.weight = size;
        self
    }

    /// Make the item openable, starting closed.
    pub fn openable(mut self) -> Self {
        self.openable = true;
        self
    }

    /// Make the item a container with an optional capacity.
    pub fn container(mut self, capacity: Option<u32>) -> Self {
        self.container = true;
        self.capacity = capacity;
        if self.kind == ItemKind::Tool {
            self.kind = ItemKind::Container;
        }
        self
    }

    /// Mark the item as a treasure.
    pub fn treasure(mut self) -> Self {
        self.treasure = true;
        self.kind = ItemKind::Treasure;
        self
    }

    /// Make the item lockable with the given key, starting locked.
    pub fn locked_with(mut self, key: impl Into<ItemId>) -> Self {
        self.lockable = true;
        self.key_id = Some(key.into());
        self.state.is_locked = true;
        self
    }

    /// Bind a flag to this item's open state.
    pub fn binds(mut self, flag: impl Into<String>) -> Self {
        self.binds_flag = Some(flag.into());
        self
    }

    /// Set the initial open state.
    pub fn opened(mut self, open: bool) -> Self {
        self.state.is_open = open;
        self
    }

    /// Set the initial contents.
    pub fn with_contents<I, S>(mut self, contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        self.state.contents = contents.into_iter().map(Into::into).collect();
        self
    }

    /// Set the examine text.
    pub fn with_examine_text(mut self, text: impl Into<String>) -> Self {
        self.examine_text = Some(text.into());
        self
    }

    /// Whether the item is open. Always false for items that cannot open.
    pub fn is_open(&self) -> bool {
        self.openable && self.state.is_open
    }

    /// Whether the item is locked. Always false for items that cannot lock.
    pub fn is_locked(&self) -> bool {
        self.lockable && self.state.is_locked
    }

    /// Whether this item's contents can be seen and reached.
    ///
    /// Containers that cannot be closed are always accessible.
    pub fn contents_accessible(&self) -> bool {
        self.container && (!self.openable || self.state.is_open)
    }
}

/// Whether `needle` is somewhere inside `container`, at any depth.
///
/// Terminates on cyclic containment; `contains_recursively(items, x, x)` is
/// true exactly when `x` sits on a cycle.
pub fn contains_recursively(
    items: &BTreeMap<ItemId, Item>,
    container: &ItemId,
    needle: &ItemId,
) -> bool {
    let mut stack = vec![container];
    let mut seen = HashSet::new();
    while let Some(current) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        let Some(item) = items.get(current) else {
            continue;
        };
        for inner in &item.state.contents {
            if inner == needle {
                return true;
            }
            stack.push(inner);
        }
    }
    false
}
