//! Configuration for a game engine.

use lt_core::SceneId;

/// Configuration for a [`crate::GameEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Scene to start in instead of the world's own start scene.
    pub start_scene: Option<SceneId>,
    /// Maximum score reported when the world declares none.
    pub default_max_score: u32,
    /// Whether scene descriptions end with a list of exits.
    pub list_exits: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_scene: None,
            default_max_score: 0,
            list_exits: true,
        }
    }
}

impl EngineConfig {
    /// Start in the given scene.
    pub fn with_start_scene(mut self, scene: impl Into<SceneId>) -> Self {
        self.start_scene = Some(scene.into());
        self
    }

    /// Set the fallback maximum score.
    pub fn with_default_max_score(mut self, max: u32) -> Self {
        self.default_max_score = max;
        self
    }

    /// Show or hide the exit list in scene descriptions.
    pub fn with_exit_list(mut self, list_exits: bool) -> Self {
        self.list_exits = list_exits;
        self
    }
}
