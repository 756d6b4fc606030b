//! The command dispatcher.

use lt_core::{
    AliasIndex, CoreResult, Direction, GameState, ItemId, ItemLocation, ScoringRules, WorldData,
};

use crate::config::EngineConfig;
use crate::container;
use crate::describe::{
    describe_inventory, describe_item, describe_scene, describe_score, join_names, list_contents,
};
use crate::error::{CommandError, EngineError, EngineResult};
use crate::exits::{ExitDecision, evaluate_exit};
use crate::parser::{Command, parse_command, resolve_item};
use crate::result::CommandResult;
use crate::scoring::{ScoreEvent, award};

const HELP_TEXT: &str = "\
Move with compass directions (north, ne, up, in) or \"go <direction>\".
Look around with \"look\"; \"examine <thing>\" or \"look in <container>\" for detail.
\"take\", \"drop\", \"open\", \"close\" and \"put <thing> in <container>\" handle objects.
\"unlock <thing> with <key>\" and \"lock <thing> with <key>\" work on locks.
\"inventory\" lists what you carry; \"score\" shows your progress.";

/// What a successful handler produced.
struct Outcome {
    message: String,
    score_change: Option<u32>,
}

impl From<String> for Outcome {
    fn from(message: String) -> Self {
        Self {
            message,
            score_change: None,
        }
    }
}

impl From<&str> for Outcome {
    fn from(message: &str) -> Self {
        message.to_string().into()
    }
}

/// Owns the game state and applies player commands to it.
///
/// Each call to [`GameEngine::process`] runs to completion before the next;
/// the engine is the only writer of its state.
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    index: AliasIndex,
    scoring: ScoringRules,
    config: EngineConfig,
}

impl GameEngine {
    /// Start a new game in `world` with the default configuration.
    pub fn new(world: &WorldData) -> EngineResult<Self> {
        Self::with_config(world, EngineConfig::default())
    }

    /// Start a new game in `world`.
    pub fn with_config(world: &WorldData, config: EngineConfig) -> EngineResult<Self> {
        world.validate()?;
        let mut state = GameState::new(world);
        if let Some(start) = &config.start_scene {
            if !state.scenes.contains_key(start) {
                return Err(EngineError::StartSceneNotFound(start.clone()));
            }
            state.current_scene_id = start.clone();
            state.mark_visited(start);
        }
        Ok(Self::from_state(state, world.scoring.clone(), config))
    }

    /// Resume from an existing state.
    pub fn from_state(state: GameState, scoring: ScoringRules, config: EngineConfig) -> Self {
        let index = AliasIndex::build(&state.items);
        Self {
            state,
            index,
            scoring,
            config,
        }
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the whole game state, e.g. after a restore.
    pub fn replace_state(&mut self, state: GameState) {
        self.index = AliasIndex::build(&state.items);
        self.state = state;
        tracing::debug!(scene = %self.state.current_scene_id, "replaced game state");
    }

    /// Consume the engine, returning its state.
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// The scoring rules in effect.
    pub fn scoring(&self) -> &ScoringRules {
        &self.scoring
    }

    /// Highest achievable score.
    pub fn max_score(&self) -> u32 {
        if self.scoring.max_score > 0 {
            self.scoring.max_score
        } else {
            self.config.default_max_score
        }
    }

    /// Current value of a flag, `None` if unset.
    pub fn get_flag(&self, name: &str) -> Option<bool> {
        self.state.get_flag(name)
    }

    /// Set a flag.
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.state.set_flag(name, value);
    }

    /// Set a flag from a loosely typed value, rejecting anything but a boolean.
    pub fn set_flag_value(&mut self, name: &str, value: &serde_json::Value) -> EngineResult<()> {
        self.state
            .set_flag_value(name, value)
            .map_err(EngineError::from)
    }

    /// Describe the current scene without taking a turn.
    pub fn look(&self) -> String {
        let first_visit = self
            .state
            .scene_states
            .get(&self.state.current_scene_id)
            .is_some_and(|s| s.visits <= 1);
        describe_scene(&self.state, &self.config, first_visit)
            .unwrap_or_else(|e| CommandError::from(e).to_string())
    }

    /// Parse and run one line of player input.
    pub fn process(&mut self, input: &str) -> CommandResult {
        let command = parse_command(input);
        self.execute(command)
    }

    /// Run a parsed command.
    ///
    /// Move-counted commands advance the move counter whether or not they
    /// succeed. A failed command changes nothing else.
    pub fn execute(&mut self, command: Command) -> CommandResult {
        let counts_as_move = command.counts_as_move();
        if counts_as_move {
            self.state.count_move();
        }
        tracing::debug!(?command, moves = self.state.moves, "dispatching command");

        let outcome = match command {
            Command::Move { direction } => self.do_move(direction),
            Command::Look => self.do_look(),
            Command::LookIn { target } => self.do_look_in(&target),
            Command::Examine { target } => self.do_examine(&target),
            Command::Take { target } => self.do_take(&target),
            Command::Drop { target } => self.do_drop(&target),
            Command::Put { item, container } => self.do_put(&item, &container),
            Command::Open { target } => self.do_open(&target),
            Command::Close { target } => self.do_close(&target),
            Command::Unlock { target, key } => self.do_unlock(&target, &key),
            Command::Lock { target, key } => self.do_lock(&target, &key),
            Command::Inventory => self.do_inventory(),
            Command::Score => Ok(describe_score(&self.state, self.max_score()).into()),
            Command::Help => Ok(HELP_TEXT.into()),
            Command::System(system) => Err(CommandError::SystemCommand(system.name())),
            Command::Incomplete { prompt } => Err(CommandError::Incomplete(prompt)),
            Command::Empty => Err(CommandError::Empty),
            Command::Unknown { .. } => Err(CommandError::NotUnderstood),
        };

        match outcome {
            Ok(outcome) => CommandResult::ok(outcome.message, counts_as_move)
                .with_score_change(outcome.score_change),
            Err(error) => {
                if let CommandError::State(inner) = &error {
                    tracing::warn!(error = %inner, "command hit inconsistent state");
                }
                tracing::debug!(%error, "command failed");
                CommandResult::failed(&error, counts_as_move)
            }
        }
    }

    fn resolve(&self, phrase: &str) -> Result<ItemId, CommandError> {
        resolve_item(&self.index, &self.state, phrase)
    }

    fn name_of(&self, id: &ItemId) -> CoreResult<String> {
        Ok(self.state.item(id)?.name.clone())
    }

    fn do_move(&mut self, direction: Direction) -> Result<Outcome, CommandError> {
        let to = match evaluate_exit(&self.state, direction)? {
            ExitDecision::Allowed(to) => to,
            ExitDecision::Blocked(reason) => return Err(reason.into()),
        };
        let first_visit = self.state.enter_scene(&to)?;
        let score_change = if first_visit {
            award(&mut self.state, &self.scoring, &ScoreEvent::Visit(to))
        } else {
            None
        };
        Ok(Outcome {
            message: describe_scene(&self.state, &self.config, first_visit)?,
            score_change,
        })
    }

    fn do_look(&self) -> Result<Outcome, CommandError> {
        Ok(describe_scene(&self.state, &self.config, false)?.into())
    }

    fn do_look_in(&self, target: &str) -> Result<Outcome, CommandError> {
        let id = self.resolve(target)?;
        container::look_in(&self.state, &id)?;
        Ok(list_contents(&self.state, &id)?.into())
    }

    fn do_examine(&self, target: &str) -> Result<Outcome, CommandError> {
        let id = self.resolve(target)?;
        Ok(describe_item(&self.state, &id)?.into())
    }

    fn do_take(&mut self, target: &str) -> Result<Outcome, CommandError> {
        let id = self.resolve(target)?;
        let item = self.state.item(&id)?;
        if self.state.has_item(&id) {
            return Err(CommandError::AlreadyCarried(item.name.clone()));
        }
        if !item.portable {
            return Err(CommandError::NotPortable(item.name.clone()));
        }
        self.state.move_item(&id, ItemLocation::Inventory)?;
        Ok("Taken.".into())
    }

    fn do_drop(&mut self, target: &str) -> Result<Outcome, CommandError> {
        let id = self.resolve(target)?;
        if !self.state.has_item(&id) {
            return Err(CommandError::NotCarried(self.name_of(&id)?));
        }
        let here = ItemLocation::Scene(self.state.current_scene_id.clone());
        self.state.move_item(&id, here)?;
        Ok("Dropped.".into())
    }

    fn do_put(&mut self, item: &str, target: &str) -> Result<Outcome, CommandError> {
        let item_id = self.resolve(item)?;
        let container_id = self.resolve(target)?;
        container::put(&mut self.state, &item_id, &container_id)?;

        let message = format!(
            "You put the {} in the {}.",
            self.name_of(&item_id)?,
            self.name_of(&container_id)?
        );
        let score_change = if self.scoring.deposit_receptacle.as_ref() == Some(&container_id) {
            award(&mut self.state, &self.scoring, &ScoreEvent::Deposit(item_id))
        } else {
            None
        };
        Ok(Outcome {
            message,
            score_change,
        })
    }

    fn do_open(&mut self, target: &str) -> Result<Outcome, CommandError> {
        let id = self.resolve(target)?;
        let revealed = container::open(&mut self.state, &id)?;
        if revealed.is_empty() {
            return Ok(format!("You open the {}.", self.name_of(&id)?).into());
        }
        Ok(format!(
            "Opening the {} reveals {}.",
            self.name_of(&id)?,
            join_names(&self.state, &revealed)?
        )
        .into())
    }

    fn do_close(&mut self, target: &str) -> Result<Outcome, CommandError> {
        let id = self.resolve(target)?;
        container::close(&mut self.state, &id)?;
        Ok(format!("You close the {}.", self.name_of(&id)?).into())
    }

    fn do_unlock(&mut self, target: &str, key: &str) -> Result<Outcome, CommandError> {
        let target_id = self.resolve(target)?;
        let key_id = self.resolve(key)?;
        container::unlock(&mut self.state, &target_id, &key_id)?;
        Ok(format!("You unlock the {}.", self.name_of(&target_id)?).into())
    }

    fn do_lock(&mut self, target: &str, key: &str) -> Result<Outcome, CommandError> {
        let target_id = self.resolve(target)?;
        let key_id = self.resolve(key)?;
        container::lock(&mut self.state, &target_id, &key_id)?;
        Ok(format!("You lock the {}.", self.name_of(&target_id)?).into())
    }

    fn do_inventory(&self) -> Result<Outcome, CommandError> {
        Ok(describe_inventory(&self.state)?.into())
    }
}
