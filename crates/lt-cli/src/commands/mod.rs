pub mod check;
pub mod play;

use std::path::Path;

use lt_core::WorldData;

/// Read and validate a world file.
fn load_world(path: &Path) -> Result<WorldData, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    WorldData::from_json(&json).map_err(|e| format!("'{}': {e}", path.display()))
}
