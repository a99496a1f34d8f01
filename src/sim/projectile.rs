//! Projectiles, enemy ordnance and pickups
//!
//! Player shots (straight, penetrating, rain), the bombs bosses drop, homing
//! missiles, and the power-ups that float above platforms.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind};
use super::collision::Rect;
use super::player::WeaponMode;
use crate::consts::*;

/// Player shot variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bullet,
    /// Keeps flying through enemies; remembers who it already hit
    Penetrating { hit: Vec<u32> },
    /// Falls from above the screen
    Rain,
}

/// A player shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub kind: ProjectileKind,
    /// Used up by a hit this tick; swept after the collision pass
    #[serde(skip)]
    pub consumed: bool,
}

impl Projectile {
    /// Straight shot travelling along `dir` (unit vector)
    pub fn bullet(origin: Vec2, dir: Vec2) -> Self {
        Self {
            pos: origin,
            vel: dir * BULLET_SPEED,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            kind: ProjectileKind::Bullet,
            consumed: false,
        }
    }

    pub fn penetrating(origin: Vec2) -> Self {
        Self {
            kind: ProjectileKind::Penetrating { hit: Vec::new() },
            ..Self::bullet(origin, Vec2::X)
        }
    }

    /// The `slot`-th drop of a rain volley, spread evenly across the width
    pub fn rain(slot: usize) -> Self {
        let spacing = SCREEN_WIDTH / RAIN_COUNT as f32;
        let x = spacing * (slot as f32 + 0.5) - BULLET_HEIGHT / 2.0;
        Self {
            pos: Vec2::new(x, RAIN_START_Y),
            vel: Vec2::new(0.0, BULLET_SPEED),
            size: Vec2::new(BULLET_HEIGHT, BULLET_WIDTH),
            kind: ProjectileKind::Rain,
            consumed: false,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_penetrating(&self) -> bool {
        matches!(self.kind, ProjectileKind::Penetrating { .. })
    }

    /// Record a hit on `enemy_id`. Returns false when this shot already hit
    /// that enemy (penetrating) or is already spent (others).
    pub fn register_hit(&mut self, enemy_id: u32) -> bool {
        match &mut self.kind {
            ProjectileKind::Penetrating { hit } => {
                if hit.contains(&enemy_id) {
                    return false;
                }
                hit.push(enemy_id);
                true
            }
            _ => {
                if self.consumed {
                    return false;
                }
                self.consumed = true;
                true
            }
        }
    }

    /// Outside the play field. Rain starts above the screen, so only the
    /// sides and bottom count for it.
    pub fn is_out_of_bounds(&self) -> bool {
        let bounds = self.bounds();
        let off_sides = bounds.left() > SCREEN_WIDTH || bounds.right() < 0.0;
        let below = bounds.top() > SCREEN_HEIGHT;
        match self.kind {
            ProjectileKind::Rain => off_sides || below,
            _ => off_sides || below || bounds.bottom() < 0.0,
        }
    }
}

impl Actor for Projectile {
    fn kind(&self) -> ActorKind {
        match self.kind {
            ProjectileKind::Bullet => ActorKind::Bullet,
            ProjectileKind::Penetrating { .. } => ActorKind::PenetratingBullet,
            ProjectileKind::Rain => ActorKind::RainBullet,
        }
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

pub const BOMB_SIZE: Vec2 = Vec2::new(15.0, 20.0);
pub const BOMB_FALL_SPEED: f32 = 2.0;
pub const BOMB_MAX_DRIFT: f32 = 1.0;

/// Dropped by boss enemies; drifts down until it leaves the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Bomb {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            pos,
            vel: Vec2::new(
                rng.random_range(-BOMB_MAX_DRIFT..=BOMB_MAX_DRIFT),
                BOMB_FALL_SPEED,
            ),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT
    }
}

impl Actor for Bomb {
    fn kind(&self) -> ActorKind {
        ActorKind::Bomb
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, BOMB_SIZE)
    }
}

pub const MISSILE_SIZE: Vec2 = Vec2::new(12.0, 6.0);
pub const MISSILE_SPEED: f32 = 3.0;
/// Fraction of the velocity error corrected each tick
pub const MISSILE_HOMING_STRENGTH: f32 = 0.1;
pub const MISSILE_LIFETIME_MS: u64 = 4000;
/// How far off-screen a missile may wander before it is dropped
pub const MISSILE_MARGIN: f32 = 50.0;

/// Fired by jumping bosses; steers toward the player's center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomingMissile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub target: Vec2,
    pub lifetime_ms: u64,
}

impl HomingMissile {
    pub fn new(pos: Vec2, target: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            target,
            lifetime_ms: 0,
        }
    }

    /// Retarget, blend velocity toward full speed along the line of sight,
    /// then move. The blend gives a curving pursuit instead of a snap turn.
    pub fn steer(&mut self, target: Vec2) {
        self.target = target;
        let to_target = self.target - self.pos;
        let distance = to_target.length();
        if distance > 0.0 {
            let desired = to_target / distance * MISSILE_SPEED;
            self.vel += (desired - self.vel) * MISSILE_HOMING_STRENGTH;
        }
        self.pos += self.vel;
        self.lifetime_ms += TICK_MS;
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime_ms >= MISSILE_LIFETIME_MS
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.x < -MISSILE_MARGIN
            || self.pos.x > SCREEN_WIDTH + MISSILE_MARGIN
            || self.pos.y < -MISSILE_MARGIN
            || self.pos.y > SCREEN_HEIGHT + MISSILE_MARGIN
    }
}

impl Actor for HomingMissile {
    fn kind(&self) -> ActorKind {
        ActorKind::HomingMissile
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, MISSILE_SIZE)
    }
}

pub const POWER_UP_SIZE: Vec2 = Vec2::new(30.0, 30.0);
/// Gap between a power-up's top and its platform's top
pub const POWER_UP_HOVER: f32 = 35.0;
const POWER_UP_BOB_STEP: f32 = 0.1;
const POWER_UP_BOB_AMPLITUDE: f32 = 5.0;

/// A weapon pickup hovering over a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Resting position; the bob is drawn, never collided
    pub pos: Vec2,
    pub mode: WeaponMode,
    pub bob_phase: f32,
    pub collected: bool,
}

impl PowerUp {
    /// Centered over `platform`
    pub fn above(platform: &Rect, mode: WeaponMode) -> Self {
        Self {
            pos: Vec2::new(
                platform.x + platform.w / 2.0 - POWER_UP_SIZE.x / 2.0,
                platform.y - POWER_UP_HOVER,
            ),
            mode,
            bob_phase: 0.0,
            collected: false,
        }
    }

    pub fn update(&mut self) {
        self.bob_phase += POWER_UP_BOB_STEP;
    }

    /// Cosmetic vertical offset for drawing
    pub fn bob_offset(&self) -> f32 {
        self.bob_phase.sin() * POWER_UP_BOB_AMPLITUDE
    }
}

impl Actor for PowerUp {
    fn kind(&self) -> ActorKind {
        ActorKind::PowerUp
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, POWER_UP_SIZE)
    }
}
