//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Only takes effect while grounded
    pub jump: bool,
    /// Held, not toggled
    pub crouch: bool,
    pub fire: bool,
    /// Accepted only during game over
    pub restart: bool,
}

/// Advance the game state by one fixed timestep of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    state.clock.advance(dt_ms);
    state.time_ticks += 1;
    let now = state.now();

    match state.phase {
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
            return;
        }
        GamePhase::Transitioning => {
            if !state.update_transition() {
                return;
            }
        }
        GamePhase::Playing => {}
    }

    // Death from the previous tick (or from outside) halts before any update
    if state.check_game_over() {
        return;
    }

    let config = state.levels.get(state.level);
    let world = &mut state.world;

    world
        .player
        .update(input, config.platforms.rects(), config.has_floor, now);
    let shots = world.player.try_fire(input.fire, now);
    world.projectiles.extend(shots);

    world.update_actors(now, &mut state.rng);
    state.score += world.resolve_projectile_hits(now);
    world.resolve_player_contacts(now);

    if state.check_game_over() || state.check_level_progress() {
        return;
    }

    let config = state.levels.get(state.level);
    state
        .spawner
        .update(config, now, &mut state.world, &mut state.rng);
}
