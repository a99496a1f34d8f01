//! Sky Scroller - simulation core for a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, collisions, spawning, level flow)
//! - `config`: Per-level rules and platform layouts

pub mod config;
pub mod sim;

pub use config::{ConfigError, LevelConfig, LevelTable, PlatformLayout, SpawnCategory};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;

    /// Play field dimensions
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Floor line for levels that have one
    pub const FLOOR_Y: f32 = SCREEN_HEIGHT - 100.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_VELOCITY: f32 = -20.0;
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT - 160.0;
    pub const PLAYER_MAX_HP: u32 = 100;
    /// Gravity per tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.8;
    pub const INVULNERABILITY_MS: u64 = 1000;
    /// Heal granted by any power-up pickup
    pub const POWER_UP_HEAL: u32 = 25;

    /// Shot cooldowns
    pub const SHOT_COOLDOWN_MS: u64 = 200;
    pub const MACHINE_GUN_COOLDOWN_MS: u64 = 20;

    /// Projectile defaults
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 4.0;
    pub const SHOTGUN_SPREAD_DEG: [f32; 5] = [-30.0, -15.0, 0.0, 15.0, 30.0];
    pub const PENETRATOR_OFFSET: f32 = 6.0;
    pub const RAIN_COUNT: usize = 15;
    pub const RAIN_START_Y: f32 = -20.0;

    /// Hit flash duration for health-bearing enemies
    pub const HIT_FLASH_MS: u64 = 200;

    /// Level transition banner duration
    pub const TRANSITION_MS: u64 = 3000;
    /// Fallback spawn delay when a level leaves one unset
    pub const DEFAULT_SPAWN_DELAY_MS: u64 = 2000;
}

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn center_of(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}

/// Unit direction for an angle in degrees (0 = right, positive = down)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
