//! Keybind Arena entry point
//!
//! Headless host: loads settings, runs a scripted session through the same
//! frame loop a windowed shell would (input batch, update, read snapshot,
//! cleanup) and logs what happened.
//!
//! Usage: `keybind-arena [settings.json]` (defaults to
//! `keybind_arena_settings.json` in the working directory when present)

use std::path::PathBuf;

use keybind_arena::Settings;
use keybind_arena::audio::SoundBoard;
use keybind_arena::sim::{Game, GameError, InputKey};
use keybind_arena::ui::Hud;

/// Simulated frame time (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Safety cap on the scripted session
const MAX_FRAMES: u32 = 60 * 30;

/// One scripted input edge
struct ScriptedInput {
    frame: u32,
    key: InputKey,
    down: bool,
}

fn script(settings: &Settings) -> Vec<ScriptedInput> {
    let keys = &settings.key_bindings;
    let fire = InputKey::from_char('1');
    let edge = |frame, key, down| ScriptedInput { frame, key, down };
    vec![
        // Try to pick something up, then wander right and down
        edge(1, fire, true),
        edge(2, fire, false),
        edge(10, keys.right, true),
        edge(70, keys.down, true),
        edge(130, keys.right, false),
        edge(160, keys.down, false),
        edge(170, fire, true),
        edge(171, fire, false),
        edge(200, fire, true),
        edge(201, fire, false),
        // Drop whatever is on '1'
        edge(300, keys.drop, true),
        edge(301, fire, true),
        edge(302, keys.drop, false),
        edge(303, fire, false),
        edge(400, keys.menu, true),
    ]
}

fn run(settings: Settings) -> Result<(), GameError> {
    let sounds = SoundBoard::new(&std::env::current_dir().unwrap_or_default());
    let inputs = script(&settings);
    let mut game = Game::new(settings);
    game.new_game()?;

    let mut frame = 0;
    while game.state.running && frame < MAX_FRAMES {
        for input in inputs.iter().filter(|i| i.frame == frame) {
            game.process_key_input(input.key, input.down)?;
        }

        game.update(FRAME_DT);

        // This is where a renderer would draw the snapshot
        let hud = Hud::from_state(&game.state);
        for cue in sounds.cues_for(&game.drain_events()) {
            log::debug!("Play {}", cue.display());
        }
        if frame % 60 == 0 {
            log::debug!("[{:.1}s] {} | {}", game.state.wallclock, hud.mode, hud.hint);
        }

        game.remove_dead_items();
        frame += 1;
    }

    let state = &game.state;
    log::info!(
        "Session over after {:.2}s: player at ({:.0}, {:.0}), {} hp, {} items held, {} items / {} monsters left",
        state.wallclock,
        state.player.position.x,
        state.player.position.y,
        state.player.health.current,
        state.player.inventory.len(),
        state.world_items.len(),
        state.world_monsters.len()
    );
    for line in Hud::from_state(state).inventory {
        log::info!("  {}", line.label);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    log::info!("Keybind Arena (headless) starting...");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from(Settings::FILE_NAME)).filter(|p| p.is_file()));
    let settings = Settings::load(path.as_deref());
    if !settings.debug {
        log::set_max_level(log::LevelFilter::Info);
    }

    if let Err(e) = run(settings) {
        log::error!("Game aborted: {e}");
        std::process::exit(1);
    }
}
