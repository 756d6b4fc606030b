//! Integration tests for save persistence.
use lt_core::{GameState, ItemId, WorldData};
use lt_engine::{EngineConfig, GameEngine};
use lt_save::{
    FileStorage, MemoryStorage, SaveConfig, SaveManager, StorageBackend, StorageError,
    StorageResult, ValidationError, validate_payload,
};
use serde_json::{Value, json};

const WORLD: &str = include_str!("../../../worlds/white_house.json");

fn engine() -> GameEngine {
    GameEngine::new(&WorldData::from_json(WORLD).unwrap()).unwrap()
}

fn engine_in_kitchen() -> GameEngine {
    let world = WorldData::from_json(WORLD).unwrap();
    GameEngine::with_config(&world, EngineConfig::default().with_start_scene("kitchen")).unwrap()
}

/// Engine a few commands into the game.
fn played() -> GameEngine {
    let mut engine = engine();
    for input in ["open window", "west", "open sack", "take lunch", "up"] {
        assert!(engine.process(input).success, "{input}");
    }
    engine
}

/// A backend that accepts nothing.
struct Broken;

impl StorageBackend for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
    fn remove(&self, _key: &str) -> StorageResult<bool> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
}

/// Memory storage whose contents the test can tamper with.
fn shared_memory() -> (SaveManager, std::sync::Arc<MemoryStorage>) {
    struct Shared(std::sync::Arc<MemoryStorage>);
    impl StorageBackend for Shared {
        fn name(&self) -> &'static str {
            "shared"
        }
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> StorageResult<bool> {
            self.0.remove(key)
        }
    }

    let memory = std::sync::Arc::new(MemoryStorage::new());
    let manager = SaveManager::with_storage(
        SaveConfig::default(),
        Box::new(Shared(std::sync::Arc::clone(&memory))),
    );
    (manager, memory)
}

#[test]
fn save_and_restore_a_played_game() {
    let manager = SaveManager::default();
    let mut engine = played();
    let saved = engine.state().clone();
    assert!(manager.save(&saved));

    engine.process("down");
    engine.process("drop lunch");
    assert_ne!(engine.state(), &saved);

    let mut state = engine.state().clone();
    assert!(manager.restore(&mut state));
    engine.replace_state(state);
    assert_eq!(engine.state(), &saved);
    assert_eq!(engine.state().current_scene_id, "attic");
    assert!(engine.state().has_item(&ItemId::new("lunch")));
    assert_eq!(engine.get_flag("door_open"), Some(true));

    let result = engine.process("down");
    assert!(result.success);
    assert_eq!(engine.state().moves, saved.moves + 1);
}

#[test]
fn corrupt_payloads_leave_state_untouched() {
    let (manager, memory) = shared_memory();
    let engine = played();
    assert!(manager.save(engine.state()));
    let good: Value = serde_json::from_str(&memory.get("lantern-save").unwrap().unwrap()).unwrap();

    let mut without_state = good.clone();
    without_state.as_object_mut().unwrap().remove("gameState");
    let mut string_inventory = good.clone();
    string_inventory["gameState"]["inventory"] = json!("lunch");
    let mut string_flag = good.clone();
    string_flag["gameState"]["flags"]["door_open"] = json!("true");
    let mut unknown_scene = good.clone();
    unknown_scene["gameState"]["currentSceneId"] = json!("narnia");

    let payloads = [
        without_state.to_string(),
        string_inventory.to_string(),
        string_flag.to_string(),
        unknown_scene.to_string(),
        "null".to_string(),
        String::new(),
        "not json at all".to_string(),
    ];

    let fresh = engine.state().clone();
    for payload in payloads {
        memory.set("lantern-save", &payload).unwrap();
        let mut state = fresh.clone();
        assert!(!manager.restore(&mut state), "{payload}");
        assert_eq!(state, fresh, "{payload}");
    }
}

#[test]
fn broken_placements_are_refused() {
    let (manager, memory) = shared_memory();
    let mut engine = engine_in_kitchen();
    assert!(engine.process("open sack").success);
    assert!(manager.save(engine.state()));
    let good: Value = serde_json::from_str(&memory.get("lantern-save").unwrap().unwrap()).unwrap();

    // lunch is still in the sack
    let mut carried_twice = good.clone();
    carried_twice["gameState"]["inventory"] = json!(["lunch"]);

    let mut dangling = good.clone();
    dangling["gameState"]["items"]["sack"]["state"]["contents"] = json!(["lunch", "phantom"]);

    // sack and trophy case inside each other, the sack still in the kitchen
    let mut cyclic = good.clone();
    cyclic["gameState"]["items"]["sack"]["state"]["contents"] = json!(["trophy_case"]);
    cyclic["gameState"]["items"]["trophy_case"]["state"]["contents"] = json!(["sack"]);
    cyclic["gameState"]["items"]["trophy_case"]["state"]["isOpen"] = json!(true);

    // the same cycle, out of play
    let mut orphan_cycle = cyclic.clone();
    orphan_cycle["gameState"]["scenes"]["kitchen"]["items"] = json!(["bottle"]);
    orphan_cycle["gameState"]["scenes"]["living_room"]["items"] =
        json!(["lamp", "rug", "trap_door"]);

    assert!(matches!(
        validate_payload(&carried_twice.to_string()),
        Err(ValidationError::DuplicatePlacement { .. })
    ));
    assert!(matches!(
        validate_payload(&dangling.to_string()),
        Err(ValidationError::UnknownItem { .. })
    ));
    assert!(validate_payload(&cyclic.to_string()).is_err());
    assert!(matches!(
        validate_payload(&orphan_cycle.to_string()),
        Err(ValidationError::ContainmentCycle(_))
    ));

    let live = engine.state().clone();
    for payload in [carried_twice, dangling, cyclic, orphan_cycle] {
        memory.set("lantern-save", &payload.to_string()).unwrap();
        let mut state = live.clone();
        assert!(!manager.restore(&mut state));
        assert_eq!(state, live);
    }
    assert!(engine.process("look").success);
}

#[test]
fn missing_version_is_accepted() {
    let (manager, memory) = shared_memory();
    let engine = played();
    assert!(manager.save(engine.state()));

    let mut payload: Value =
        serde_json::from_str(&memory.get("lantern-save").unwrap().unwrap()).unwrap();
    payload.as_object_mut().unwrap().remove("version");
    memory.set("lantern-save", &payload.to_string()).unwrap();

    let mut state = self::engine().state().clone();
    assert!(manager.restore(&mut state));
    assert_eq!(&state, engine.state());
}

#[test]
fn failing_backend_falls_back_to_memory() {
    let manager = SaveManager::with_storage(SaveConfig::default(), Box::new(Broken));
    assert_eq!(manager.storage_name(), "memory");

    let engine = played();
    assert!(manager.save(engine.state()));
    assert!(manager.has_save());

    let mut state = self::engine().state().clone();
    assert!(manager.restore(&mut state));
    assert_eq!(&state, engine.state());
}

#[test]
fn file_saves_survive_a_new_manager() {
    let dir = tempfile::tempdir().unwrap();
    let config = SaveConfig::default().with_dir(dir.path()).with_key("slot-1");
    let engine = played();

    {
        let manager = SaveManager::new(config.clone());
        assert_eq!(manager.storage_name(), "file");
        assert!(manager.save(engine.state()));
    }
    assert!(dir.path().join("slot-1.json").exists());

    let manager = SaveManager::new(config);
    assert!(manager.has_save());
    let restored: GameState = manager.load().unwrap();
    assert_eq!(&restored, engine.state());

    assert!(manager.delete_save());
    assert!(!manager.delete_save());
    assert!(!manager.has_save());
}

#[test]
fn file_storage_rejects_bad_keys_by_falling_back() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::with_storage(
        SaveConfig::default().with_key("../escape"),
        Box::new(FileStorage::new(dir.path()).unwrap()),
    );
    assert!(manager.save(engine().state()));
    assert_eq!(manager.storage_name(), "memory");
    assert!(!dir.path().join("../escape.json").exists());
}

#[test]
fn last_write_wins() {
    let manager = SaveManager::default();
    let first = engine();
    let second = played();
    assert!(manager.save(first.state()));
    assert!(manager.save(second.state()));
    assert_eq!(&manager.load().unwrap(), second.state());
}
