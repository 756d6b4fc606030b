//! The state store: everything that changes while a game is played.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::flag::{FlagState, Scalar, flag_from_json};
use crate::id::{ItemId, SceneId};
use crate::item::Item;
use crate::scene::Scene;
use crate::world::WorldData;

/// Runtime overrides for a scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneState {
    /// Whether the player has been here.
    pub visited: bool,
    /// Number of times the player has entered.
    pub visits: u32,
}

/// Where an item currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLocation {
    /// Lying in a scene.
    Scene(SceneId),
    /// Carried by the player.
    Inventory,
    /// Inside another item.
    Container(ItemId),
    /// Out of play.
    Nowhere,
}

/// The mutable game state.
///
/// Owns a copy of every scene and item so that a snapshot of this struct is a
/// complete save. Each item is in at most one of: a scene's item list, the
/// inventory, or a container's contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Scene the player is in.
    pub current_scene_id: SceneId,
    /// Carried items, in pickup order.
    pub inventory: Vec<ItemId>,
    /// Boolean flags. Absent means unset.
    pub flags: BTreeMap<String, bool>,
    /// Free-form variables.
    #[serde(default)]
    pub variables: BTreeMap<String, Scalar>,
    /// Per-scene runtime state.
    #[serde(default)]
    pub scene_states: BTreeMap<SceneId, SceneState>,
    /// Number of move-counted commands processed.
    pub moves: u32,
    /// Points earned.
    pub score: u32,
    /// Items, including their runtime state.
    pub items: BTreeMap<ItemId, Item>,
    /// Scenes, including their current item lists.
    pub scenes: BTreeMap<SceneId, Scene>,
}

impl GameState {
    /// Seed a fresh game from world data.
    ///
    /// The start scene counts as visited. Flags bound to an item's open state
    /// are synced from that item, overriding `initialFlags`.
    pub fn new(world: &WorldData) -> Self {
        let mut state = Self {
            current_scene_id: world.start_scene.clone(),
            inventory: world.initial_inventory.clone(),
            flags: world.initial_flags.clone(),
            variables: world.initial_variables.clone(),
            scene_states: BTreeMap::new(),
            moves: 0,
            score: 0,
            items: world.items.clone(),
            scenes: world.scenes.clone(),
        };
        for item in state.items.values() {
            if let Some(flag) = &item.binds_flag {
                state.flags.insert(flag.clone(), item.is_open());
            }
        }
        let start = state.current_scene_id.clone();
        state.mark_visited(&start);
        state
    }

    // --- flags and variables ---

    /// Current value of a flag, `None` if it was never set.
    pub fn get_flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Current state of a flag.
    pub fn flag_state(&self, name: &str) -> FlagState {
        self.get_flag(name).into()
    }

    /// Set a flag.
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    /// Set a flag from a loosely typed value. Non-booleans are rejected and
    /// leave the flag untouched.
    pub fn set_flag_value(&mut self, name: &str, value: &serde_json::Value) -> CoreResult<()> {
        let value = flag_from_json(name, value)?;
        self.set_flag(name, value);
        Ok(())
    }

    /// Return a flag to the unset state.
    pub fn clear_flag(&mut self, name: &str) -> Option<bool> {
        self.flags.remove(name)
    }

    /// Current value of a variable.
    pub fn variable(&self, name: &str) -> Option<&Scalar> {
        self.variables.get(name)
    }

    /// Set a variable.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Scalar) {
        self.variables.insert(name.into(), value);
    }

    // --- scenes ---

    /// The scene the player is in.
    pub fn current_scene(&self) -> CoreResult<&Scene> {
        self.scene(&self.current_scene_id)
    }

    /// Look up a scene.
    pub fn scene(&self, id: &SceneId) -> CoreResult<&Scene> {
        self.scenes
            .get(id)
            .ok_or_else(|| CoreError::SceneNotFound(id.clone()))
    }

    /// Whether the player has been in `scene`.
    pub fn is_visited(&self, scene: &SceneId) -> bool {
        self.scene_states.get(scene).is_some_and(|s| s.visited)
    }

    /// Record an entry into `scene`. Returns `true` on the first visit.
    pub fn mark_visited(&mut self, scene: &SceneId) -> bool {
        let entry = self.scene_states.entry(scene.clone()).or_default();
        let first = !entry.visited;
        entry.visited = true;
        entry.visits += 1;
        first
    }

    /// Move the player to `scene`.
    pub fn enter_scene(&mut self, scene: &SceneId) -> CoreResult<bool> {
        if !self.scenes.contains_key(scene) {
            return Err(CoreError::SceneNotFound(scene.clone()));
        }
        self.current_scene_id = scene.clone();
        Ok(self.mark_visited(scene))
    }

    // --- items ---

    /// Look up an item.
    pub fn item(&self, id: &ItemId) -> CoreResult<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.clone()))
    }

    /// Look up an item for mutation.
    pub fn item_mut(&mut self, id: &ItemId) -> CoreResult<&mut Item> {
        self.items
            .get_mut(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.clone()))
    }

    /// Whether the player carries `item` directly.
    pub fn has_item(&self, item: &ItemId) -> bool {
        self.inventory.contains(item)
    }

    /// Where `item` is.
    pub fn location_of(&self, item: &ItemId) -> ItemLocation {
        if self.has_item(item) {
            return ItemLocation::Inventory;
        }
        if let Some(container) = self
            .items
            .values()
            .find(|c| c.state.contents.contains(item))
        {
            return ItemLocation::Container(container.id.clone());
        }
        if let Some(scene) = self.scenes.values().find(|s| s.items.contains(item)) {
            return ItemLocation::Scene(scene.id.clone());
        }
        ItemLocation::Nowhere
    }

    /// Take `item` out of wherever it is. Returns where it was.
    pub fn detach(&mut self, item: &ItemId) -> ItemLocation {
        let location = self.location_of(item);
        match &location {
            ItemLocation::Inventory => self.inventory.retain(|i| i != item),
            ItemLocation::Container(container) => {
                if let Some(c) = self.items.get_mut(container) {
                    c.state.contents.retain(|i| i != item);
                }
            }
            ItemLocation::Scene(scene) => {
                if let Some(s) = self.scenes.get_mut(scene) {
                    s.items.retain(|i| i != item);
                }
            }
            ItemLocation::Nowhere => {}
        }
        location
    }

    /// Move `item` to the end of `to`, removing it from its previous location.
    pub fn move_item(&mut self, item: &ItemId, to: ItemLocation) -> CoreResult<()> {
        self.item(item)?;
        match &to {
            ItemLocation::Scene(scene) => {
                self.scene(scene)?;
            }
            ItemLocation::Container(container) => {
                if container == item || self.contains_recursively(item, container) {
                    return Err(CoreError::Validation(format!(
                        "\"{item}\" cannot be placed inside itself"
                    )));
                }
                if !self.item(container)?.container {
                    return Err(CoreError::Validation(format!(
                        "\"{container}\" is not a container"
                    )));
                }
            }
            ItemLocation::Inventory | ItemLocation::Nowhere => {}
        }

        self.detach(item);
        match to {
            ItemLocation::Inventory => self.inventory.push(item.clone()),
            ItemLocation::Scene(scene) => {
                if let Some(s) = self.scenes.get_mut(&scene) {
                    s.items.push(item.clone());
                }
            }
            ItemLocation::Container(container) => {
                if let Some(c) = self.items.get_mut(&container) {
                    c.state.contents.push(item.clone());
                }
            }
            ItemLocation::Nowhere => {}
        }
        Ok(())
    }

    /// Whether `needle` is somewhere inside `container`, at any depth.
    pub fn contains_recursively(&self, container: &ItemId, needle: &ItemId) -> bool {
        crate::item::contains_recursively(&self.items, container, needle)
    }

    /// Set an item's open state, keeping any bound flag in step.
    pub fn set_open(&mut self, id: &ItemId, open: bool) -> CoreResult<()> {
        let item = self.item_mut(id)?;
        item.state.is_open = open;
        if let Some(flag) = item.binds_flag.clone() {
            self.set_flag(flag, open);
        }
        Ok(())
    }

    /// Items the player can refer to right now.
    ///
    /// Inventory first, then the current scene's items, each container
    /// immediately followed by its contents while they are accessible.
    pub fn scope(&self) -> Vec<ItemId> {
        let scene_items = self
            .scenes
            .get(&self.current_scene_id)
            .map(|s| s.items.as_slice())
            .unwrap_or_default();

        let mut scope = Vec::new();
        let mut seen = HashSet::new();
        for id in self.inventory.iter().chain(scene_items) {
            self.push_with_contents(id, &mut scope, &mut seen);
        }
        scope
    }

    fn push_with_contents<'a>(
        &'a self,
        id: &'a ItemId,
        scope: &mut Vec<ItemId>,
        seen: &mut HashSet<&'a ItemId>,
    ) {
        if !seen.insert(id) {
            return;
        }
        scope.push(id.clone());
        let Some(item) = self.items.get(id) else {
            return;
        };
        if item.contents_accessible() {
            for inner in &item.state.contents {
                self.push_with_contents(inner, scope, seen);
            }
        }
    }

    /// Whether `item` is in scope.
    pub fn in_scope(&self, item: &ItemId) -> bool {
        self.scope().contains(item)
    }

    /// Move the player's score up by `points`.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Count one move.
    pub fn count_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }
}
