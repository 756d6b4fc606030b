use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::flag::FlagState;
use crate::id::{Direction, ItemId, SceneId};

/// Message used when an exit definition carries none of its own.
pub const DEFAULT_BLOCKED_MESSAGE: &str = "You can't go that way.";

/// How a scene is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lighting {
    /// Outdoors in daylight.
    Daylight,
    /// Lit indoors.
    #[default]
    Lit,
    /// Dark.
    Dark,
}

/// A predicate of the form `flag == expected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagPredicate {
    /// Name of the flag being tested.
    pub flag: String,
    /// Value the flag must hold.
    pub expected: bool,
}

impl FlagPredicate {
    /// A predicate requiring the flag to be `true`.
    pub fn is_true(flag: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            expected: true,
        }
    }

    /// Evaluate against the flag's current state. Unset fails closed.
    pub fn holds(&self, state: FlagState) -> bool {
        state.satisfies(self.expected)
    }
}

/// A directed edge out of a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExit", into = "RawExit")]
pub enum Exit {
    /// Always passable.
    Simple(SceneId),
    /// Passable only while a flag predicate holds.
    Conditional {
        /// Destination scene.
        to: SceneId,
        /// Gate that must hold.
        predicate: FlagPredicate,
        /// Message shown when the gate does not hold.
        failure_message: String,
    },
    /// Never passable.
    Blocked {
        /// Message shown on every attempt.
        failure_message: String,
    },
}

impl Exit {
    /// A conditional exit gated on `flag == true`.
    pub fn gated(
        to: impl Into<SceneId>,
        flag: impl Into<String>,
        failure_message: impl Into<String>,
    ) -> Self {
        Self::Conditional {
            to: to.into(),
            predicate: FlagPredicate::is_true(flag),
            failure_message: failure_message.into(),
        }
    }

    /// Destination scene, if the exit leads anywhere.
    pub fn destination(&self) -> Option<&SceneId> {
        match self {
            Self::Simple(to) | Self::Conditional { to, .. } => Some(to),
            Self::Blocked { .. } => None,
        }
    }
}

// World files write exits either as a bare destination string or as an object.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawExit {
    To(SceneId),
    Detailed(DetailedExit),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailedExit {
    #[serde(default)]
    to: Option<SceneId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<String>,
    #[serde(default = "default_expected")]
    expected: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failure_message: Option<String>,
}

fn default_expected() -> bool {
    true
}

impl TryFrom<RawExit> for Exit {
    type Error = String;

    fn try_from(raw: RawExit) -> Result<Self, Self::Error> {
        let detailed = match raw {
            RawExit::To(to) => return Ok(Self::Simple(to)),
            RawExit::Detailed(detailed) => detailed,
        };

        let failure_message = detailed
            .failure_message
            .unwrap_or_else(|| DEFAULT_BLOCKED_MESSAGE.to_string());

        match (detailed.to, detailed.condition) {
            (None, Some(flag)) => Err(format!("conditional exit on \"{flag}\" has no destination")),
            (None, None) => Ok(Self::Blocked { failure_message }),
            (Some(_), _) if detailed.blocked => Ok(Self::Blocked { failure_message }),
            (Some(to), Some(flag)) => Ok(Self::Conditional {
                to,
                predicate: FlagPredicate {
                    flag,
                    expected: detailed.expected,
                },
                failure_message,
            }),
            (Some(to), None) => Ok(Self::Simple(to)),
        }
    }
}

impl From<Exit> for RawExit {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Simple(to) => RawExit::To(to),
            Exit::Conditional {
                to,
                predicate,
                failure_message,
            } => RawExit::Detailed(DetailedExit {
                to: Some(to),
                condition: Some(predicate.flag),
                expected: predicate.expected,
                blocked: false,
                failure_message: Some(failure_message),
            }),
            Exit::Blocked { failure_message } => RawExit::Detailed(DetailedExit {
                to: None,
                condition: None,
                expected: true,
                blocked: true,
                failure_message: Some(failure_message),
            }),
        }
    }
}

/// A location node in the world graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Canonical identifier. Filled from the map key when loading world data.
    #[serde(default)]
    pub id: SceneId,
    /// Short title shown as a heading.
    pub title: String,
    /// Description shown on repeat visits.
    #[serde(default)]
    pub description: String,
    /// Description shown on the first visit, if different.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_visit_description: Option<String>,
    /// Lighting condition.
    #[serde(default)]
    pub lighting: Lighting,
    /// Ambient lines, one of which is shown with the description.
    #[serde(default)]
    pub atmosphere: Vec<String>,
    /// Exits keyed by direction.
    #[serde(default)]
    pub exits: BTreeMap<Direction, Exit>,
    /// Items lying in the scene, in display order.
    #[serde(default)]
    pub items: Vec<ItemId>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(id: impl Into<SceneId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            first_visit_description: None,
            lighting: Lighting::default(),
            atmosphere: Vec::new(),
            exits: BTreeMap::new(),
            items: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Set the repeat-visit description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an exit.
    pub fn with_exit(mut self, direction: Direction, exit: Exit) -> Self {
        self.exits.insert(direction, exit);
        self
    }

    /// Place items in the scene.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    /// The description to show, picking the first-visit variant when present.
    pub fn description_for(&self, first_visit: bool) -> &str {
        match &self.first_visit_description {
            Some(text) if first_visit => text,
            _ => &self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exits_parse_all_three_forms() {
        let scene: Scene = serde_json::from_value(json!({
            "title": "Behind House",
            "exits": {
                "north": "north_of_house",
                "west": {
                    "to": "kitchen",
                    "condition": "door_open",
                    "failureMessage": "The kitchen window is closed."
                },
                "up": { "to": null, "blocked": true, "failureMessage": "The walls are too steep." }
            }
        }))
        .unwrap();

        assert_eq!(
            scene.exits[&Direction::North],
            Exit::Simple(SceneId::new("north_of_house"))
        );
        assert_eq!(
            scene.exits[&Direction::West],
            Exit::gated("kitchen", "door_open", "The kitchen window is closed.")
        );
        assert_eq!(
            scene.exits[&Direction::Up],
            Exit::Blocked {
                failure_message: "The walls are too steep.".to_string()
            }
        );
    }

    #[test]
    fn conditional_without_destination_is_rejected() {
        let result: Result<Exit, _> =
            serde_json::from_value(json!({ "condition": "door_open" }));
        assert!(result.is_err());
    }

    #[test]
    fn exit_json_round_trips() {
        let exit = Exit::Conditional {
            to: SceneId::new("cellar"),
            predicate: FlagPredicate {
                flag: "trap_door_open".to_string(),
                expected: true,
            },
            failure_message: "The trap door is closed.".to_string(),
        };
        let json = serde_json::to_value(&exit).unwrap();
        let back: Exit = serde_json::from_value(json).unwrap();
        assert_eq!(back, exit);
    }

    #[test]
    fn first_visit_description_only_on_first_visit() {
        let mut scene = Scene::new("attic", "Attic").with_description("The attic.");
        scene.first_visit_description = Some("A dusty attic, seen for the first time.".into());
        assert!(scene.description_for(true).starts_with("A dusty"));
        assert_eq!(scene.description_for(false), "The attic.");
    }
}
