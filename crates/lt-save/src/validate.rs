//! Structural validation of saved payloads.
//!
//! A payload is checked field by field before it is deserialized, so a
//! corrupt save is reported precisely and never reaches the live state.

use std::collections::HashMap;

use lt_core::{GameState, ItemId};
use serde_json::{Map, Value};

use crate::envelope::SaveEnvelope;
use crate::error::ValidationError;

type Object = Map<String, Value>;

/// Parse and validate a stored payload.
pub fn validate_payload(payload: &str) -> Result<SaveEnvelope, ValidationError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(ValidationError::Empty);
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    let root = value.as_object().ok_or_else(|| wrong_type("(root)", "an object"))?;

    match root.get("version") {
        None => tracing::warn!("save has no version, assuming the current format"),
        Some(Value::String(_)) => {}
        Some(_) => return Err(wrong_type("version", "a string")),
    }
    if let Some(ts) = root.get("timestamp") {
        if !ts.is_number() {
            return Err(wrong_type("timestamp", "a number"));
        }
    }

    let state = match root.get("gameState") {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingField("gameState".to_string()));
        }
        Some(Value::Object(state)) => state,
        Some(_) => return Err(wrong_type("gameState", "an object")),
    };
    check_state_fields(state)?;

    let envelope: SaveEnvelope =
        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    check_references(&envelope)?;
    Ok(envelope)
}

fn check_state_fields(state: &Object) -> Result<(), ValidationError> {
    let scene = required(state, "currentSceneId")?;
    if !scene.is_string() {
        return Err(wrong_type("gameState.currentSceneId", "a string"));
    }

    let inventory = required(state, "inventory")?
        .as_array()
        .ok_or_else(|| wrong_type("gameState.inventory", "an array"))?;
    if inventory.iter().any(|entry| !entry.is_string()) {
        return Err(wrong_type("gameState.inventory", "an array of strings"));
    }

    let flags = object_field(state, "flags")?;
    for (name, flag) in flags {
        if !flag.is_boolean() {
            return Err(wrong_type(&format!("gameState.flags.{name}"), "a boolean"));
        }
    }

    object_field(state, "variables")?;
    object_field(state, "items")?;
    object_field(state, "scenes")?;
    if let Some(scene_states) = state.get("sceneStates") {
        if !scene_states.is_object() {
            return Err(wrong_type("gameState.sceneStates", "an object"));
        }
    }

    for counter in ["moves", "score"] {
        if !required(state, counter)?.is_u64() {
            return Err(wrong_type(
                &format!("gameState.{counter}"),
                "a non-negative integer",
            ));
        }
    }
    Ok(())
}

fn check_references(envelope: &SaveEnvelope) -> Result<(), ValidationError> {
    let state = &envelope.game_state;
    if !state.scenes.contains_key(&state.current_scene_id) {
        return Err(ValidationError::UnknownScene(
            state.current_scene_id.to_string(),
        ));
    }
    check_placements(state)
}

// Each item is in at most one of: the inventory, a scene, a container.
fn check_placements(state: &GameState) -> Result<(), ValidationError> {
    let mut placed: HashMap<&ItemId, String> = HashMap::new();
    let mut place = |item: &ItemId, location: String| {
        let Some((key, _)) = state.items.get_key_value(item) else {
            return Err(ValidationError::UnknownItem {
                item: item.to_string(),
                location,
            });
        };
        if let Some(first) = placed.get(key) {
            return Err(ValidationError::DuplicatePlacement {
                item: item.to_string(),
                first: first.clone(),
                second: location,
            });
        }
        placed.insert(key, location);
        Ok(())
    };

    for item in &state.inventory {
        place(item, "the inventory".to_string())?;
    }
    for (id, scene) in &state.scenes {
        for item in &scene.items {
            place(item, format!("scene \"{id}\""))?;
        }
    }
    for (id, container) in &state.items {
        for item in &container.state.contents {
            place(item, format!("container \"{id}\""))?;
        }
    }

    match state.items.keys().find(|id| state.contains_recursively(id, id)) {
        Some(id) => Err(ValidationError::ContainmentCycle(id.to_string())),
        None => Ok(()),
    }
}

fn required<'a>(state: &'a Object, field: &str) -> Result<&'a Value, ValidationError> {
    match state.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(format!("gameState.{field}"))),
        Some(value) => Ok(value),
    }
}

fn object_field<'a>(state: &'a Object, field: &str) -> Result<&'a Object, ValidationError> {
    required(state, field)?
        .as_object()
        .ok_or_else(|| wrong_type(&format!("gameState.{field}"), "an object"))
}

fn wrong_type(field: &str, expected: &'static str) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "version": "1.0",
            "timestamp": 1_700_000_000_000_i64,
            "gameState": {
                "currentSceneId": "hall",
                "inventory": ["lamp"],
                "flags": { "door_open": false },
                "variables": {},
                "sceneStates": {},
                "moves": 3,
                "score": 0,
                "items": { "lamp": { "id": "lamp", "name": "brass lantern" } },
                "scenes": { "hall": { "id": "hall", "title": "Hall" } }
            }
        })
    }

    fn check(value: &Value) -> Result<SaveEnvelope, ValidationError> {
        validate_payload(&value.to_string())
    }

    #[test]
    fn accepts_a_well_formed_save() {
        let envelope = check(&payload()).unwrap();
        assert_eq!(envelope.version.as_deref(), Some("1.0"));
        assert_eq!(envelope.game_state.moves, 3);
        assert_eq!(envelope.game_state.current_scene_id, "hall");
    }

    #[test]
    fn empty_and_null_are_rejected() {
        for text in ["", "   ", "null"] {
            assert_eq!(validate_payload(text).unwrap_err(), ValidationError::Empty);
        }
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(
            validate_payload("{not json").unwrap_err(),
            ValidationError::Malformed(_)
        ));
        assert!(matches!(
            validate_payload("[1, 2]").unwrap_err(),
            ValidationError::WrongType { .. }
        ));
    }

    #[test]
    fn missing_game_state() {
        let mut value = payload();
        value.as_object_mut().unwrap().remove("gameState");
        assert_eq!(
            check(&value).unwrap_err(),
            ValidationError::MissingField("gameState".to_string())
        );
    }

    #[test]
    fn missing_version_is_tolerated() {
        let mut value = payload();
        value.as_object_mut().unwrap().remove("version");
        let envelope = check(&value).unwrap();
        assert_eq!(envelope.version, None);
    }

    #[test]
    fn wrong_field_types() {
        let cases = [
            ("inventory", json!("lamp"), "gameState.inventory"),
            ("inventory", json!([1]), "gameState.inventory"),
            ("flags", json!({ "door_open": "yes" }), "gameState.flags.door_open"),
            ("moves", json!(-1), "gameState.moves"),
            ("scenes", json!([]), "gameState.scenes"),
            ("sceneStates", json!(7), "gameState.sceneStates"),
        ];
        for (field, bad, path) in cases {
            let mut value = payload();
            value["gameState"][field] = bad;
            match check(&value).unwrap_err() {
                ValidationError::WrongType { field, .. } => assert_eq!(field, path),
                other => panic!("{path}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn missing_required_field() {
        let mut value = payload();
        value["gameState"].as_object_mut().unwrap().remove("score");
        assert_eq!(
            check(&value).unwrap_err(),
            ValidationError::MissingField("gameState.score".to_string())
        );
    }

    #[test]
    fn dangling_references() {
        let mut value = payload();
        value["gameState"]["currentSceneId"] = json!("void");
        assert_eq!(
            check(&value).unwrap_err(),
            ValidationError::UnknownScene("void".to_string())
        );

        let mut value = payload();
        value["gameState"]["inventory"] = json!(["sword"]);
        assert_eq!(
            check(&value).unwrap_err(),
            ValidationError::UnknownItem {
                item: "sword".to_string(),
                location: "the inventory".to_string(),
            }
        );

        let mut value = payload();
        value["gameState"]["scenes"]["hall"]["items"] = json!(["ghost"]);
        assert!(matches!(
            check(&value).unwrap_err(),
            ValidationError::UnknownItem { item, .. } if item == "ghost"
        ));
    }

    #[test]
    fn item_placed_twice() {
        let mut value = payload();
        value["gameState"]["scenes"]["hall"]["items"] = json!(["lamp"]);
        assert_eq!(
            check(&value).unwrap_err(),
            ValidationError::DuplicatePlacement {
                item: "lamp".to_string(),
                first: "the inventory".to_string(),
                second: "scene \"hall\"".to_string(),
            }
        );
    }

    #[test]
    fn containment_cycle() {
        let mut value = payload();
        value["gameState"]["inventory"] = json!([]);
        value["gameState"]["items"]["box"] = json!({
            "id": "box", "name": "box", "container": true,
            "state": { "contents": ["chest"] }
        });
        value["gameState"]["items"]["chest"] = json!({
            "id": "chest", "name": "chest", "container": true,
            "state": { "contents": ["box"] }
        });
        assert!(matches!(
            check(&value).unwrap_err(),
            ValidationError::ContainmentCycle(_)
        ));
    }
}
