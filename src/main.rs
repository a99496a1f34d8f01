//! Sky Scroller headless driver
//!
//! Runs the simulation for a fixed number of ticks with a simple autopilot
//! and prints the final snapshot as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sky_scroller::consts::*;
use sky_scroller::sim::{GamePhase, GameState, TickInput, tick};
use sky_scroller::{ConfigError, LevelTable};
use thiserror::Error;

/// Headless run of the side-scrolling shooter simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed for the run
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Number of 16 ms ticks to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// JSON level table to use instead of the built-in campaign
    #[arg(short, long)]
    levels: Option<PathBuf>,

    /// Level to start on
    #[arg(long, default_value_t = 1)]
    start_level: u32,
}

/// Idle/demo mode: keep firing, hop over walkers, duck under missiles,
/// and restart after dying
fn autopilot(state: &GameState) -> TickInput {
    if state.phase == GamePhase::GameOver {
        return TickInput {
            restart: true,
            ..Default::default()
        };
    }

    let world = &state.world;
    let player = world.player.bounds();
    let danger_ahead = world.enemies.iter().any(|enemy| {
        let gap = enemy.pos.x - player.right();
        (0.0..120.0).contains(&gap) && enemy.pos.y + enemy.size().y > player.top()
    });
    let missile_close = world
        .missiles
        .iter()
        .any(|missile| missile.pos.distance(world.player.center()) < 100.0);
    let pickup = world.power_ups.first().map(|p| p.pos.x);

    TickInput {
        move_left: pickup.is_some_and(|x| x + 15.0 < player.left()),
        move_right: pickup.is_some_and(|x| x + 15.0 > player.right()),
        jump: danger_ahead || pickup.is_some(),
        crouch: missile_close && !danger_ahead,
        fire: true,
        restart: false,
    }
}

#[derive(Debug, Error)]
enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid level table: {0}")]
    Config(#[from] ConfigError),
}

fn load_levels(path: Option<&PathBuf>) -> Result<LevelTable, LoadError> {
    let Some(path) = path else {
        return Ok(LevelTable::standard());
    };
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(LevelTable::from_json(&json)?)
}

fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let args = Args::parse();
    let levels = match load_levels(args.levels.as_ref()) {
        Ok(levels) => levels,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Sky Scroller (headless) seed={} ticks={} levels={}",
        args.seed,
        args.ticks,
        levels.len()
    );

    let mut state = GameState::with_levels(args.seed, levels);
    if args.start_level > 1 {
        state.jump_to_level(args.start_level);
    }

    let mut deaths = 0u32;
    for _ in 0..args.ticks {
        let input = autopilot(&state);
        let was_over = state.is_game_over();
        tick(&mut state, &input, TICK_MS);
        if !was_over && state.is_game_over() {
            deaths += 1;
        }
        if state.time_ticks % 600 == 0 {
            log::info!(
                "t={}s level={} score={} hp={} actors={}",
                state.now() / 1000,
                state.level,
                state.score,
                state.world.player.hp,
                state.world.transient_count()
            );
        }
    }

    log::info!(
        "Finished: level {} (best {}), score {}, deaths {}",
        state.level,
        state.max_level_reached,
        state.score,
        deaths
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to serialize snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}
