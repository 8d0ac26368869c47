use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::info;

use brawl_core::{ArchetypeRegistry, GameLoop, InputEvent, SimConfig, Stage, StageDefinition};

/// Simulated seconds before the demo gives up
const TIME_LIMIT: f32 = 90.0;
/// Ticks between scripted punches
const PUNCH_INTERVAL: u64 = 24;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting brawl-core headless demo...");

    let registry = Arc::new(ArchetypeRegistry::builtin());
    let config = match std::env::var("BRAWL_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Failed to read config '{}': {}", path, e))?;
            SimConfig::from_json(&json)?
        }
        Err(_) => SimConfig::default(),
    };

    let mut stage = Stage::new(StageDefinition::town(), registry, config, 0x5eed);
    stage.enter()?;

    let mut game_loop = GameLoop::new();
    // One fixed step per frame
    let frame_time = Duration::from_micros(16_667);

    stage.handle_input(&InputEvent::key_down("right"));

    while game_loop.simulated().as_secs_f32() < TIME_LIMIT {
        let updates = game_loop.begin_frame(frame_time);
        for _ in 0..updates {
            script_input(&mut stage);
            stage.step(game_loop.fixed_timestep());
        }

        if game_loop.frame_count() % 60 == 0 {
            report(&stage);
        }

        if stage.cleared() {
            info!(
                "Stage '{}' cleared after {:.1}s, next: {}",
                stage.name(),
                game_loop.simulated().as_secs_f32(),
                stage.next_stage().unwrap_or("none")
            );
            return Ok(());
        }

        if stage.players().is_empty() {
            info!("All players down after {:.1}s", game_loop.simulated().as_secs_f32());
            return Ok(());
        }
    }

    info!("Time limit reached with {} enemies left", stage.enemy_count());
    Ok(())
}

/// Walk right and throw punches at a fixed rhythm
fn script_input(stage: &mut Stage) {
    let tick = stage.ticks();
    if tick > 0 && tick % PUNCH_INTERVAL == 0 {
        stage.handle_input(&InputEvent::key_down("x"));
        stage.handle_input(&InputEvent::key_up("x"));
    }
}

fn report(stage: &Stage) {
    for state in stage.render_states() {
        log::debug!(
            "{:>8} {:?} at {} clip {} frame {}",
            state.archetype,
            state.id,
            state.position,
            state.clip,
            state.frame_index
        );
    }
    let health: Vec<i32> = stage
        .players()
        .iter()
        .filter_map(|id| stage.actor(*id))
        .map(|player| player.health())
        .collect();
    info!(
        "tick {}: {} actors, {} enemies, player health {:?}",
        stage.ticks(),
        stage.actor_count(),
        stage.enemy_count(),
        health
    );
}
