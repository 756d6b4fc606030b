//! Interactive play over stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;

use lt_engine::{Command, EngineConfig, GameEngine, SystemCommand, parse_command};
use lt_save::{SaveConfig, SaveManager};

/// Run a game session until `quit` or end of input.
pub fn run(
    path: &Path,
    save_dir: Option<PathBuf>,
    slot: &str,
    start: Option<&str>,
) -> Result<(), String> {
    let world = super::load_world(path)?;

    let mut config = EngineConfig::default();
    if let Some(scene) = start {
        config = config.with_start_scene(scene);
    }
    let mut engine = GameEngine::with_config(&world, config)
        .map_err(|e| format!("failed to start game: {e}"))?;

    let mut save_config = SaveConfig::default().with_key(slot);
    if let Some(dir) = save_dir {
        save_config = save_config.with_dir(dir);
    }
    let saves = SaveManager::new(save_config);
    tracing::debug!(
        world = %path.display(),
        scene = %engine.state().current_scene_id,
        storage = saves.storage_name(),
        "starting session"
    );

    if !world.title.is_empty() {
        println!("  {}", world.title.bold());
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    println!("{}\n", engine.look());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        match parse_command(&line) {
            Command::System(SystemCommand::Quit) => {
                println!("{}", engine.process("score").message);
                break;
            }
            Command::System(SystemCommand::Save) => {
                if saves.save(engine.state()) {
                    println!("Saved.\n");
                } else {
                    println!("{}\n", "Save failed.".yellow());
                }
            }
            Command::System(SystemCommand::Restore) => {
                let mut state = engine.state().clone();
                if saves.restore(&mut state) {
                    engine.replace_state(state);
                    println!("Restored.\n\n{}\n", engine.look());
                } else {
                    println!("{}\n", "Restore failed.".yellow());
                }
            }
            command => {
                let result = engine.execute(command);
                if result.success {
                    println!("{}", result.message);
                } else {
                    println!("{}", result.message.yellow());
                }
                if let Some(points) = result.score_change {
                    let plural = if points == 1 { "" } else { "s" };
                    println!(
                        "{}",
                        format!("[Your score has gone up by {points} point{plural}.]").green()
                    );
                }
                println!();
            }
        }
    }

    Ok(())
}
