//! Command parsing for player input.

use lt_core::Direction;

/// Commands handled outside the game world by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    /// Save the game.
    Save,
    /// Restore the last save.
    Restore,
    /// Leave the game.
    Quit,
}

impl SystemCommand {
    /// The verb the player typed for this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Restore => "restore",
            Self::Quit => "quit",
        }
    }
}

/// A parsed player command.
///
/// Object phrases are kept as typed; resolution to item ids happens at
/// dispatch time against the current scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move in a direction.
    Move {
        /// The direction to move.
        direction: Direction,
    },
    /// Describe the current scene.
    Look,
    /// List the contents of a container.
    LookIn {
        /// The container phrase.
        target: String,
    },
    /// Examine an item.
    Examine {
        /// The item phrase.
        target: String,
    },
    /// Pick an item up.
    Take {
        /// The item phrase.
        target: String,
    },
    /// Put a carried item down.
    Drop {
        /// The item phrase.
        target: String,
    },
    /// Put an item into a container.
    Put {
        /// The item phrase.
        item: String,
        /// The container phrase.
        container: String,
    },
    /// Open an item.
    Open {
        /// The item phrase.
        target: String,
    },
    /// Close an item.
    Close {
        /// The item phrase.
        target: String,
    },
    /// Unlock an item with a key.
    Unlock {
        /// The item phrase.
        target: String,
        /// The key phrase.
        key: String,
    },
    /// Lock an item with a key.
    Lock {
        /// The item phrase.
        target: String,
        /// The key phrase.
        key: String,
    },
    /// List carried items.
    Inventory,
    /// Report score and moves.
    Score,
    /// Show help.
    Help,
    /// A command for the front end.
    System(SystemCommand),
    /// A known verb missing its object, e.g. bare "open".
    Incomplete {
        /// The question to put to the player.
        prompt: String,
    },
    /// Nothing was typed.
    Empty,
    /// Input that matches no known verb.
    Unknown {
        /// The original input.
        input: String,
    },
}

impl Command {
    /// Whether processing this command advances the move counter,
    /// whatever its outcome.
    pub fn counts_as_move(&self) -> bool {
        matches!(
            self,
            Self::Move { .. }
                | Self::Take { .. }
                | Self::Drop { .. }
                | Self::Put { .. }
                | Self::Open { .. }
                | Self::Close { .. }
                | Self::Unlock { .. }
                | Self::Lock { .. }
        )
    }
}

/// Verb synonyms for command parsing.
const MOVE_VERBS: &[&str] = &["go", "move", "walk", "head", "travel", "run"];
const LOOK_VERBS: &[&str] = &["look", "l"];
const SEARCH_VERBS: &[&str] = &["search"];
const EXAMINE_VERBS: &[&str] = &["examine", "x", "inspect", "read", "describe"];
const TAKE_VERBS: &[&str] = &["take", "get", "grab", "carry", "pick"];
const DROP_VERBS: &[&str] = &["drop", "discard"];
const PUT_VERBS: &[&str] = &["put", "place", "insert"];
const OPEN_VERBS: &[&str] = &["open"];
const CLOSE_VERBS: &[&str] = &["close", "shut"];
const UNLOCK_VERBS: &[&str] = &["unlock"];
const LOCK_VERBS: &[&str] = &["lock"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i"];
const SCORE_VERBS: &[&str] = &["score"];
const HELP_VERBS: &[&str] = &["help", "h", "?"];
const SAVE_VERBS: &[&str] = &["save"];
const RESTORE_VERBS: &[&str] = &["restore", "load"];
const QUIT_VERBS: &[&str] = &["quit", "q"];

const CONTAINER_PREPOSITIONS: &[&str] = &["in", "into", "inside"];

/// Parse a player input string into a command.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Empty;
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let verb = words[0].to_lowercase();
    let verb = verb.as_str();
    let rest = &words[1..];

    // Bare direction
    if let ([], Some(direction)) = (rest, Direction::parse(verb)) {
        return Command::Move { direction };
    }

    if MOVE_VERBS.contains(&verb) {
        return parse_move(verb, rest, input);
    }
    if LOOK_VERBS.contains(&verb) {
        return parse_look(rest);
    }
    if SEARCH_VERBS.contains(&verb) {
        return with_object(verb, rest, |target| Command::LookIn { target });
    }
    if EXAMINE_VERBS.contains(&verb) {
        return with_object(verb, rest, |target| Command::Examine { target });
    }
    if TAKE_VERBS.contains(&verb) {
        return parse_take(verb, rest);
    }
    if DROP_VERBS.contains(&verb) {
        return with_object(verb, rest, |target| Command::Drop { target });
    }
    if PUT_VERBS.contains(&verb) {
        return parse_put(verb, rest);
    }
    if OPEN_VERBS.contains(&verb) {
        return with_object(verb, rest, |target| Command::Open { target });
    }
    if CLOSE_VERBS.contains(&verb) {
        return with_object(verb, rest, |target| Command::Close { target });
    }
    if UNLOCK_VERBS.contains(&verb) {
        return parse_keyed(verb, rest, |target, key| Command::Unlock { target, key });
    }
    if LOCK_VERBS.contains(&verb) {
        return parse_keyed(verb, rest, |target, key| Command::Lock { target, key });
    }
    if INVENTORY_VERBS.contains(&verb) {
        return Command::Inventory;
    }
    if SCORE_VERBS.contains(&verb) {
        return Command::Score;
    }
    if HELP_VERBS.contains(&verb) {
        return Command::Help;
    }
    if SAVE_VERBS.contains(&verb) {
        return Command::System(SystemCommand::Save);
    }
    if RESTORE_VERBS.contains(&verb) {
        return Command::System(SystemCommand::Restore);
    }
    if QUIT_VERBS.contains(&verb) {
        return Command::System(SystemCommand::Quit);
    }

    Command::Unknown {
        input: input.to_string(),
    }
}

fn is_word(word: &str, set: &[&str]) -> bool {
    set.iter().any(|w| word.eq_ignore_ascii_case(w))
}

const ARTICLES: &[&str] = &["the", "a", "an"];

fn incomplete(verb: &str) -> Command {
    Command::Incomplete {
        prompt: format!("What do you want to {verb}?"),
    }
}

// "put the egg in", for asking after the missing second object
fn incomplete_second(verb: &str, object: &[&str], preposition: &str) -> Command {
    let start = object
        .iter()
        .take_while(|w| is_word(w, ARTICLES))
        .count()
        .min(object.len().saturating_sub(1));
    incomplete(&format!(
        "{verb} the {} {preposition}",
        object[start..].join(" ")
    ))
}

fn with_object(verb: &str, rest: &[&str], build: impl FnOnce(String) -> Command) -> Command {
    if rest.is_empty() {
        incomplete(verb)
    } else {
        build(rest.join(" "))
    }
}

fn parse_move(verb: &str, rest: &[&str], input: &str) -> Command {
    match rest {
        [] => Command::Incomplete {
            prompt: format!("Where do you want to {verb}?"),
        },
        [word] => match Direction::parse(word) {
            Some(direction) => Command::Move { direction },
            None => Command::Unknown {
                input: input.to_string(),
            },
        },
        _ => Command::Unknown {
            input: input.to_string(),
        },
    }
}

fn parse_look(rest: &[&str]) -> Command {
    match rest {
        [] => Command::Look,
        [word] if word.eq_ignore_ascii_case("around") => Command::Look,
        [prep, target @ ..] if prep.eq_ignore_ascii_case("at") => {
            with_object("look at", target, |target| Command::Examine { target })
        }
        [prep, target @ ..] if is_word(prep, CONTAINER_PREPOSITIONS) => {
            with_object("look in", target, |target| Command::LookIn { target })
        }
        target => Command::Examine {
            target: target.join(" "),
        },
    }
}

fn parse_take(verb: &str, rest: &[&str]) -> Command {
    // "pick up the lamp" and "pick the lamp up"
    let item_words = match rest {
        [first, tail @ ..] if first.eq_ignore_ascii_case("up") => tail,
        [head @ .., last] if last.eq_ignore_ascii_case("up") => head,
        _ => rest,
    };
    let verb = if verb == "pick" { "pick up" } else { verb };
    with_object(verb, item_words, |target| Command::Take { target })
}

fn parse_put(verb: &str, rest: &[&str]) -> Command {
    // "put down the lamp" and "put the lamp down"
    match rest {
        [first, tail @ ..] if first.eq_ignore_ascii_case("down") => {
            return with_object("put down", tail, |target| Command::Drop { target });
        }
        [head @ .., last] if last.eq_ignore_ascii_case("down") && !head.is_empty() => {
            return Command::Drop {
                target: head.join(" "),
            };
        }
        _ => {}
    }

    let Some(split) = rest.iter().position(|w| is_word(w, CONTAINER_PREPOSITIONS)) else {
        return match rest {
            [] => incomplete(verb),
            item => incomplete_second(verb, item, "in"),
        };
    };
    let (item, container) = (&rest[..split], &rest[split + 1..]);
    if item.is_empty() {
        return incomplete(verb);
    }
    if container.is_empty() {
        return incomplete_second(verb, item, "in");
    }
    Command::Put {
        item: item.join(" "),
        container: container.join(" "),
    }
}

fn parse_keyed(
    verb: &str,
    rest: &[&str],
    build: impl FnOnce(String, String) -> Command,
) -> Command {
    if rest.is_empty() {
        return incomplete(verb);
    }
    let Some(split) = rest.iter().position(|w| w.eq_ignore_ascii_case("with")) else {
        return incomplete_second(verb, rest, "with");
    };
    let (target, key) = (&rest[..split], &rest[split + 1..]);
    if target.is_empty() {
        return incomplete(verb);
    }
    if key.is_empty() {
        return incomplete_second(verb, target, "with");
    }
    build(target.join(" "), key.join(" "))
}
