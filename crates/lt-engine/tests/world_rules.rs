//! Integration tests for world rules.
use lt_core::{Exit, ItemId, SceneId, WorldData};
use lt_engine::container;
use lt_engine::{
    CommandError, EngineConfig, ExitDecision, GameEngine, evaluate_exit, parse_command,
};

const WORLD: &str = include_str!("../../../worlds/white_house.json");

fn world() -> WorldData {
    WorldData::from_json(WORLD).unwrap()
}

fn engine() -> GameEngine {
    GameEngine::new(&world()).unwrap()
}

fn engine_in(scene: &str) -> GameEngine {
    GameEngine::with_config(&world(), EngineConfig::default().with_start_scene(scene)).unwrap()
}

fn contents(engine: &GameEngine, id: &str) -> Vec<ItemId> {
    engine.state().items[&ItemId::new(id)].state.contents.clone()
}

// --- Exits ---

#[test]
fn closed_window_blocks_west_until_flag_set() {
    let mut engine = engine();
    assert_eq!(engine.state().current_scene_id, "behind_house");
    assert_eq!(engine.get_flag("door_open"), Some(false));

    let result = engine.process("west");
    assert!(!result.success);
    assert!(result.message.contains("is closed"));
    assert!(result.counts_as_move);
    assert_eq!(engine.state().current_scene_id, "behind_house");

    engine.set_flag("door_open", true);
    let result = engine.process("west");
    assert!(result.success);
    assert!(result.counts_as_move);
    assert_eq!(engine.state().current_scene_id, "kitchen");
    assert_eq!(engine.state().moves, 2);
}

#[test]
fn unset_gate_flag_blocks() {
    let mut engine = engine();
    let mut state = engine.state().clone();
    state.clear_flag("door_open");
    engine.replace_state(state);

    let result = engine.process("west");
    assert!(!result.success);
    assert_eq!(engine.state().current_scene_id, "behind_house");
}

#[test]
fn repeated_blocked_attempts_are_identical() {
    let mut engine = engine();
    let first = engine.process("west");
    let second = engine.process("go west");
    assert_eq!(first.message, second.message);
    assert_eq!(engine.state().moves, 2);
}

#[test]
fn opening_the_window_opens_the_passage() {
    let mut engine = engine();
    let result = engine.process("open window");
    assert!(result.success, "{}", result.message);
    assert_eq!(engine.get_flag("door_open"), Some(true));
    assert!(engine.process("w").success);
    assert_eq!(engine.state().current_scene_id, "kitchen");
}

#[test]
fn every_conditional_exit_opens_only_on_its_flag() {
    let engine = engine();
    let mut checked = 0;
    for (scene_id, scene) in &engine.state().scenes {
        for (direction, exit) in &scene.exits {
            let Exit::Conditional { to, predicate, .. } = exit else {
                continue;
            };
            let mut state = engine.state().clone();
            state.current_scene_id = scene_id.clone();

            state.clear_flag(&predicate.flag);
            let unset = evaluate_exit(&state, *direction).unwrap();
            assert!(matches!(unset, ExitDecision::Blocked(_)), "{scene_id} {direction}");

            state.set_flag(predicate.flag.clone(), !predicate.expected);
            let wrong = evaluate_exit(&state, *direction).unwrap();
            assert!(matches!(wrong, ExitDecision::Blocked(_)), "{scene_id} {direction}");
            assert_eq!(state.current_scene_id, *scene_id);

            state.set_flag(predicate.flag.clone(), predicate.expected);
            let open = evaluate_exit(&state, *direction).unwrap();
            assert_eq!(open, ExitDecision::Allowed(to.clone()));
            checked += 1;
        }
    }
    assert_eq!(checked, 3);
}

#[test]
fn simple_exit_ignores_unrelated_gates() {
    let mut engine = engine();
    engine.set_flag("door_open", false);
    assert!(engine.process("north").success);
    assert_eq!(engine.state().current_scene_id, "north_of_house");
}

#[test]
fn blocked_and_missing_exits() {
    let mut engine = engine();
    let up = engine.process("up");
    assert_eq!(up.message, "The walls of the house are too smooth to climb.");
    let down = engine.process("down");
    assert_eq!(down.message, "You can't go down from here.");
    assert!(down.counts_as_move);
    assert_eq!(engine.state().moves, 2);
}

// --- Containers ---

#[test]
fn open_sack_then_look_in_then_close() {
    let mut engine = engine_in("kitchen");
    let before = contents(&engine, "sack");
    assert_eq!(before.len(), 2);

    let opened = engine.process("open sack");
    assert!(opened.success);
    assert_eq!(
        opened.message,
        "Opening the brown sack reveals lunch and clove of garlic."
    );
    assert_eq!(contents(&engine, "sack"), before);

    let look = engine.process("look in sack");
    assert!(look.success);
    assert!(look.message.contains("lunch"));
    assert!(look.message.contains("clove of garlic"));
    assert!(!look.counts_as_move);

    assert!(engine.process("close sack").success);
    let look = engine.process("look in sack");
    assert!(!look.success);
    assert_eq!(look.message, "The brown sack is closed.");
}

#[test]
fn double_open_fails_and_keeps_contents() {
    let mut engine = engine_in("kitchen");
    assert!(engine.process("open the bag").success);
    let before = contents(&engine, "sack");
    let again = engine.process("open sack");
    assert!(!again.success);
    assert_eq!(again.message, "The brown sack is already open.");
    assert!(again.counts_as_move);
    assert_eq!(contents(&engine, "sack"), before);
}

#[test]
fn every_openable_item_opens_once() {
    let engine = engine();
    for (id, item) in &engine.state().items {
        if !item.openable || item.is_locked() {
            continue;
        }
        let mut state = engine.state().clone();
        let before = item.state.contents.clone();
        container::open(&mut state, id).unwrap();
        let err = container::open(&mut state, id).unwrap_err();
        assert!(matches!(err, CommandError::AlreadyOpen(_)), "{id}");
        assert_eq!(state.items[id].state.contents, before, "{id}");
    }
}

#[test]
fn closed_sack_hides_lunch() {
    let mut engine = engine_in("kitchen");
    let result = engine.process("take sandwich");
    assert_eq!(result.message, "You don't see any lunch here.");
    assert!(result.counts_as_move);

    engine.process("open sack");
    let result = engine.process("take sandwich");
    assert!(result.success);
    assert!(engine.state().has_item(&ItemId::new("lunch")));
    assert_eq!(contents(&engine, "sack"), vec![ItemId::new("garlic")]);
}

#[test]
fn rug_wont_fit_in_sack() {
    let mut engine = engine_in("living_room");
    engine.process("take rug");
    let mut state = engine.state().clone();
    state
        .move_item(
            &ItemId::new("sack"),
            lt_core::ItemLocation::Scene(SceneId::new("living_room")),
        )
        .unwrap();
    engine.replace_state(state);

    engine.process("open sack");
    let result = engine.process("put rug in sack");
    assert!(!result.success);
    assert_eq!(result.message, "The oriental rug won't fit in the brown sack.");
    assert!(result.counts_as_move);
    assert!(engine.state().has_item(&ItemId::new("rug")));
}

#[test]
fn cabinet_needs_the_key_in_hand() {
    let mut engine = engine_in("attic");
    assert_eq!(engine.process("open cabinet").message, "The wooden cabinet is locked.");
    assert_eq!(
        engine.process("unlock cabinet with key").message,
        "You don't have the skeleton key."
    );
    engine.process("take key");
    assert!(engine.process("unlock the wooden cabinet with the skeleton key").success);
    assert!(engine.process("open cabinet").success);
    assert_eq!(engine.process("look in cabinet").message, "The wooden cabinet is empty.");
}

// --- Resolution ---

#[test]
fn out_of_scope_items_use_canonical_names() {
    let mut engine = engine_in("kitchen");
    assert_eq!(
        engine.process("take lantern").message,
        "You don't see any brass lantern here."
    );
    assert_eq!(
        engine.process("take the Grue").message,
        "You don't see any Grue here."
    );
}

#[test]
fn bare_verbs_prompt_without_a_move() {
    let mut engine = engine();
    let result = engine.process("open");
    assert!(!result.success);
    assert_eq!(result.message, "What do you want to open?");
    assert!(!result.counts_as_move);

    let result = engine.process("dance");
    assert_eq!(result.message, "I don't understand that.");
    assert_eq!(engine.state().moves, 0);
}

// --- Scoring ---

#[test]
fn first_visit_scores_once() {
    let mut engine = engine_in("kitchen");
    let first = engine.process("up");
    assert_eq!(first.score_change, Some(10));
    engine.process("down");
    let again = engine.process("up");
    assert!(again.success);
    assert_eq!(again.score_change, None);
    assert_eq!(engine.state().score, 10);
}

#[test]
fn treasure_deposit_scores_once() {
    let mut engine = engine_in("attic");
    assert!(engine.process("take egg").success);
    engine.process("down");
    engine.process("west");
    assert!(engine.process("open case").success);

    let deposit = engine.process("put egg in case");
    assert!(deposit.success, "{}", deposit.message);
    assert_eq!(deposit.score_change, Some(10));

    assert!(engine.process("take egg").success);
    let again = engine.process("put egg in trophy case");
    assert!(again.success);
    assert_eq!(again.score_change, None);
    assert_eq!(engine.state().score, 10);
    assert_eq!(
        engine.process("score").message,
        "Your score is 10 (total of 350 points), in 7 moves."
    );
}

#[test]
fn scene_text_on_first_look() {
    let engine = engine();
    insta::assert_snapshot!(engine.look(), @r"
    Behind House
    You are behind the white house. A path leads into the forest to the east. In one corner of the house there is a small window which is slightly ajar.
    A songbird chirps somewhere nearby.

    In one corner of the house there is a small window.

    Exits: north, west, up.
    ");
}

// --- Properties ---

mod properties {
    use super::*;
    use proptest::prelude::*;

    const INPUTS: &[&str] = &[
        "north", "south", "east", "west", "up", "down", "look", "inventory", "score",
        "open window", "close window", "take sack", "drop sack", "open sack", "close sack",
        "look in sack", "take lunch", "drop lunch", "put lunch in sack", "take egg",
        "open case", "put egg in case", "take egg", "take key", "unlock cabinet with key",
        "open cabinet", "put egg in cabinet", "take lamp", "examine egg", "open trap door",
    ];

    fn placements(engine: &GameEngine, id: &ItemId) -> usize {
        let state = engine.state();
        state.inventory.iter().filter(|i| *i == id).count()
            + state
                .scenes
                .values()
                .map(|s| s.items.iter().filter(|i| *i == id).count())
                .sum::<usize>()
            + state
                .items
                .values()
                .map(|c| c.state.contents.iter().filter(|i| *i == id).count())
                .sum::<usize>()
    }

    proptest! {
        #[test]
        fn counters_follow_the_rules(
            picks in prop::collection::vec(0..INPUTS.len(), 1..60)
        ) {
            let mut engine = engine();
            engine.set_flag("door_open", true);
            for pick in picks {
                let input = INPUTS[pick];
                let moves = engine.state().moves;
                let score = engine.state().score;
                let counted = parse_command(input).counts_as_move();

                let result = engine.process(input);

                prop_assert_eq!(result.counts_as_move, counted);
                prop_assert_eq!(engine.state().moves, moves + u32::from(counted));
                let gained = result.score_change.unwrap_or(0);
                prop_assert_eq!(engine.state().score, score + gained);
            }

            let ids: Vec<ItemId> = engine.state().items.keys().cloned().collect();
            for id in &ids {
                prop_assert!(placements(&engine, id) <= 1, "{} placed twice", id);
            }
        }
    }
}
