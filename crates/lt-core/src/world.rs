use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::flag::Scalar;
use crate::id::{ItemId, SceneId};
use crate::item::{Item, contains_recursively};
use crate::scene::Scene;

/// Rules for one-time score awards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRules {
    /// Container treasures must be deposited in to score.
    #[serde(default)]
    pub deposit_receptacle: Option<ItemId>,
    /// Factor applied to a treasure's value when deposited.
    #[serde(default = "default_multiplier")]
    pub deposit_multiplier: u32,
    /// Base value of each treasure.
    #[serde(default)]
    pub treasure_values: BTreeMap<ItemId, u32>,
    /// Points for the first visit to a scene.
    #[serde(default)]
    pub scene_values: BTreeMap<SceneId, u32>,
    /// Highest achievable score, reported by `score`.
    #[serde(default)]
    pub max_score: u32,
}

fn default_multiplier() -> u32 {
    1
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            deposit_receptacle: None,
            deposit_multiplier: default_multiplier(),
            treasure_values: BTreeMap::new(),
            scene_values: BTreeMap::new(),
            max_score: 0,
        }
    }
}

impl ScoringRules {
    /// Points awarded the first time `item` is deposited, if it is worth any.
    pub fn deposit_value(&self, item: &ItemId) -> Option<u32> {
        self.treasure_values
            .get(item)
            .map(|value| value.saturating_mul(self.deposit_multiplier))
            .filter(|points| *points > 0)
    }

    /// Points awarded for the first visit to `scene`, if it is worth any.
    pub fn visit_value(&self, scene: &SceneId) -> Option<u32> {
        self.scene_values.get(scene).copied().filter(|p| *p > 0)
    }
}

/// Static world content: the scene graph, item definitions and starting state.
///
/// Supplied once at startup and never mutated; [`crate::GameState::new`]
/// copies what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldData {
    /// Title of the adventure.
    #[serde(default)]
    pub title: String,
    /// Scene the player starts in.
    pub start_scene: SceneId,
    /// Items the player starts with.
    #[serde(default)]
    pub initial_inventory: Vec<ItemId>,
    /// Flags set before the first command.
    #[serde(default)]
    pub initial_flags: BTreeMap<String, bool>,
    /// Variables set before the first command.
    #[serde(default)]
    pub initial_variables: BTreeMap<String, Scalar>,
    /// Scoring rules.
    #[serde(default)]
    pub scoring: ScoringRules,
    /// Scene definitions keyed by id.
    pub scenes: BTreeMap<SceneId, Scene>,
    /// Item definitions keyed by id.
    #[serde(default)]
    pub items: BTreeMap<ItemId, Item>,
}

impl WorldData {
    /// Create an empty world starting in `start_scene`.
    pub fn new(start_scene: impl Into<SceneId>) -> Self {
        Self {
            title: String::new(),
            start_scene: start_scene.into(),
            initial_inventory: Vec::new(),
            initial_flags: BTreeMap::new(),
            initial_variables: BTreeMap::new(),
            scoring: ScoringRules::default(),
            scenes: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    /// Add a scene, keyed by its id.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.insert(scene.id.clone(), scene);
        self
    }

    /// Add an item, keyed by its id.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    /// Set an initial flag.
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.initial_flags.insert(name.into(), value);
        self
    }

    /// Parse world data from JSON and validate it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let mut world: WorldData = serde_json::from_str(json)?;
        world.fill_ids();
        world.validate()?;
        tracing::debug!(
            scenes = world.scenes.len(),
            items = world.items.len(),
            "loaded world data"
        );
        Ok(world)
    }

    // Map keys are authoritative; definitions may omit their own id.
    fn fill_ids(&mut self) {
        for (id, scene) in &mut self.scenes {
            scene.id = id.clone();
        }
        for (id, item) in &mut self.items {
            item.id = id.clone();
        }
    }

    /// Check references and placement invariants.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.scenes.contains_key(&self.start_scene) {
            return Err(CoreError::SceneNotFound(self.start_scene.clone()));
        }

        for scene in self.scenes.values() {
            for (direction, exit) in &scene.exits {
                let Some(to) = exit.destination() else {
                    continue;
                };
                if !self.scenes.contains_key(to) {
                    return Err(CoreError::Validation(format!(
                        "exit {direction} from \"{}\" leads to unknown scene \"{to}\"",
                        scene.id
                    )));
                }
            }
        }

        for item in self.items.values() {
            if !item.container && !item.state.contents.is_empty() {
                return Err(CoreError::Validation(format!(
                    "\"{}\" has contents but is not a container",
                    item.id
                )));
            }
            if !item.openable && item.state.is_open {
                return Err(CoreError::Validation(format!(
                    "\"{}\" is open but not openable",
                    item.id
                )));
            }
            if let Some(key) = item.key_id.as_ref().filter(|k| !self.items.contains_key(*k)) {
                return Err(CoreError::ItemNotFound(key.clone()));
            }
        }

        if let Some(receptacle) = &self.scoring.deposit_receptacle {
            match self.items.get(receptacle) {
                Some(item) if item.container => {}
                Some(_) => {
                    return Err(CoreError::Validation(format!(
                        "deposit receptacle \"{receptacle}\" is not a container"
                    )));
                }
                None => return Err(CoreError::ItemNotFound(receptacle.clone())),
            }
        }

        self.check_placements()
    }

    // Every item may appear in at most one of: a scene, the inventory, a container.
    fn check_placements(&self) -> CoreResult<()> {
        let mut placed: HashMap<&ItemId, String> = HashMap::new();
        let mut place = |item: &ItemId, location: String| -> CoreResult<()> {
            let (key, _) = self
                .items
                .get_key_value(item)
                .ok_or_else(|| CoreError::ItemNotFound(item.clone()))?;
            if let Some(first) = placed.get(key) {
                return Err(CoreError::DuplicatePlacement {
                    item: item.clone(),
                    first: first.clone(),
                    second: location,
                });
            }
            placed.insert(key, location);
            Ok(())
        };

        for item in &self.initial_inventory {
            place(item, "the inventory".to_string())?;
        }
        for scene in self.scenes.values() {
            for item in &scene.items {
                place(item, format!("scene \"{}\"", scene.id))?;
            }
        }
        for container in self.items.values() {
            for item in &container.state.contents {
                place(item, format!("container \"{}\"", container.id))?;
            }
        }
        for id in self.items.keys() {
            if contains_recursively(&self.items, id, id) {
                return Err(CoreError::ContainmentCycle(id.clone()));
            }
        }
        Ok(())
    }
}
