//! Time-gated spawning
//!
//! One timestamp per spawn category. A category fires when more than its
//! configured delay has passed since its last spawn, and only when the
//! current level enables it.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::projectile::PowerUp;
use super::world::World;
use crate::config::{LevelConfig, SpawnCategory};
use crate::consts::*;

/// Ground enemies walk on this line (top-left y)
pub const GROUND_SPAWN_Y: f32 = SCREEN_HEIGHT - 140.0;
/// Bosses sway around a height rolled from this band
pub const BOSS_SPAWN_BAND: (f32, f32) = (80.0, 350.0);
/// Jumping bosses drop in from just above the ground line
pub const JUMPING_BOSS_SPAWN_Y: f32 = SCREEN_HEIGHT - 200.0;

/// Per-category last-spawn timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    last_spawn_ms: [u64; SpawnCategory::ALL.len()],
}

impl SpawnScheduler {
    pub fn new(now: u64) -> Self {
        Self {
            last_spawn_ms: [now; SpawnCategory::ALL.len()],
        }
    }

    /// Restart every category's timer (entering a level)
    pub fn reset(&mut self, now: u64) {
        self.last_spawn_ms = [now; SpawnCategory::ALL.len()];
    }

    pub fn last_spawn_ms(&self, category: SpawnCategory) -> u64 {
        self.last_spawn_ms[category.index()]
    }

    /// Spawn at most one actor per category whose delay has elapsed
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        config: &LevelConfig,
        now: u64,
        world: &mut World,
        rng: &mut R,
    ) {
        for category in SpawnCategory::ALL {
            if !config.is_enabled(category) {
                continue;
            }
            let last = self.last_spawn_ms[category.index()];
            if now.saturating_sub(last) <= config.spawn_delay_ms(category) {
                continue;
            }
            if spawn_one(category, config, now, world, rng) {
                self.last_spawn_ms[category.index()] = now;
            }
        }
    }
}

/// Place a single actor of `category`; false when nothing could be placed
fn spawn_one<R: Rng + ?Sized>(
    category: SpawnCategory,
    config: &LevelConfig,
    now: u64,
    world: &mut World,
    rng: &mut R,
) -> bool {
    let kind = match category {
        SpawnCategory::GroundEnemy => EnemyKind::Ground,
        SpawnCategory::FlyingEnemy => EnemyKind::Flying,
        SpawnCategory::BossEnemy => EnemyKind::Boss,
        SpawnCategory::JumpingBoss => EnemyKind::JumpingBoss,
        SpawnCategory::PowerUp => return spawn_power_up(config, world, rng),
    };
    let y = match kind {
        EnemyKind::Ground => GROUND_SPAWN_Y,
        EnemyKind::Flying => config.flying_band.sample(rng),
        EnemyKind::Boss => rng.random_range(BOSS_SPAWN_BAND.0..=BOSS_SPAWN_BAND.1),
        EnemyKind::JumpingBoss => JUMPING_BOSS_SPAWN_Y,
    };
    world.spawn_enemy(kind, Vec2::new(SCREEN_WIDTH, y), rng, now);
    true
}

fn spawn_power_up<R: Rng + ?Sized>(config: &LevelConfig, world: &mut World, rng: &mut R) -> bool {
    let Some(platform) = config.platforms.choose(rng) else {
        return false;
    };
    let Some(mode) = config.power_ups.choose(rng) else {
        return false;
    };
    log::debug!("Spawned {} power-up", mode.as_str());
    world.power_ups.push(PowerUp::above(platform, *mode));
    true
}
