//! Enemy and boss behavior
//!
//! One `Enemy` struct covers every hostile kind; the per-kind movement and
//! attack timing live in `Behavior`. All kinds scroll left at a speed rolled
//! at spawn and are culled once fully past the left edge.

use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind};
use super::clock::{Cooldown, Timed};
use super::collision::Rect;
use super::projectile::{Bomb, HomingMissile};
use crate::consts::*;

/// Hostile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Ground,
    Flying,
    Boss,
    JumpingBoss,
}

impl EnemyKind {
    pub fn size(&self) -> Vec2 {
        match self {
            EnemyKind::Ground => Vec2::new(30.0, 40.0),
            EnemyKind::Flying => Vec2::new(25.0, 25.0),
            EnemyKind::Boss => Vec2::new(60.0, 45.0),
            EnemyKind::JumpingBoss => Vec2::new(80.0, 60.0),
        }
    }

    pub fn max_health(&self) -> u8 {
        match self {
            EnemyKind::Ground | EnemyKind::Flying => 1,
            EnemyKind::Boss => 2,
            EnemyKind::JumpingBoss => 5,
        }
    }

    /// Score credited on the killing hit
    pub fn score(&self) -> u64 {
        match self {
            EnemyKind::Ground => 10,
            EnemyKind::Flying => 15,
            EnemyKind::Boss => 50,
            EnemyKind::JumpingBoss => 100,
        }
    }

    /// Damage dealt to the player on touch
    pub fn contact_damage(&self) -> u32 {
        match self {
            EnemyKind::Ground => 15,
            EnemyKind::Flying => 20,
            EnemyKind::Boss => 25,
            EnemyKind::JumpingBoss => 30,
        }
    }

    /// Small fry vanish when they hurt the player; bosses stay
    pub fn removed_on_contact(&self) -> bool {
        matches!(self, EnemyKind::Ground | EnemyKind::Flying)
    }

    /// Leftward scroll speed range (pixels/tick)
    pub fn speed_range(&self) -> RangeInclusive<f32> {
        match self {
            EnemyKind::Ground => 1.0..=3.0,
            EnemyKind::Flying => 2.0..=4.0,
            EnemyKind::Boss => 1.0..=2.0,
            EnemyKind::JumpingBoss => 1.25..=1.75,
        }
    }

    pub fn actor_kind(&self) -> ActorKind {
        match self {
            EnemyKind::Ground => ActorKind::GroundEnemy,
            EnemyKind::Flying => ActorKind::FlyingEnemy,
            EnemyKind::Boss => ActorKind::BossEnemy,
            EnemyKind::JumpingBoss => ActorKind::JumpingBoss,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Ground => "ground enemy",
            EnemyKind::Flying => "flying enemy",
            EnemyKind::Boss => "boss enemy",
            EnemyKind::JumpingBoss => "jumping boss",
        }
    }
}

/// Vertical clamp for flying enemies
pub const FLYING_BAND: (f32, f32) = (50.0, SCREEN_HEIGHT - 150.0);
/// Vertical clamp for boss enemies
pub const BOSS_BAND: (f32, f32) = (50.0, SCREEN_HEIGHT - 200.0);

const BOMB_DELAY_MS: RangeInclusive<u64> = 2000..=4000;
const JUMP_DELAY_MS: RangeInclusive<u64> = 2000..=4000;
const MISSILE_DELAY_MS: RangeInclusive<u64> = 3000..=5000;

/// Line the jumping boss lands on (its bottom edge)
pub const JUMPING_BOSS_GROUND_Y: f32 = SCREEN_HEIGHT - 140.0;
pub const JUMPING_BOSS_GRAVITY: f32 = 0.8;
pub const JUMPING_BOSS_JUMP_VELOCITY: f32 = -18.0;

/// Sinusoidal vertical sway around the spawn height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sway {
    pub start_y: f32,
    pub amplitude: f32,
    /// Phase advance per tick
    pub phase_speed: f32,
    pub phase_offset: f32,
    pub phase: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Sway {
    fn roll<R: Rng + ?Sized>(
        rng: &mut R,
        start_y: f32,
        amplitude: RangeInclusive<f32>,
        phase_speed: RangeInclusive<f32>,
        band: (f32, f32),
    ) -> Self {
        Self {
            start_y,
            amplitude: rng.random_range(amplitude),
            phase_speed: rng.random_range(phase_speed),
            phase_offset: rng.random_range(0.0..TAU),
            phase: 0.0,
            min_y: band.0,
            max_y: band.1,
        }
    }

    /// Advance one tick and return the clamped height
    fn step(&mut self) -> f32 {
        self.phase += self.phase_speed;
        let y = self.start_y + self.amplitude * (self.phase + self.phase_offset).sin();
        y.clamp(self.min_y, self.max_y)
    }
}

/// Per-kind state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Ground,
    Flying {
        sway: Sway,
    },
    Boss {
        sway: Sway,
        bomb: Cooldown,
    },
    Jumping {
        vel_y: f32,
        on_ground: bool,
        jump: Cooldown,
        missile: Cooldown,
    },
}

/// Something an enemy launched this tick
#[derive(Debug, Clone)]
pub enum EnemyAttack {
    Bomb(Bomb),
    Missile(HomingMissile),
}

/// A hostile actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub speed: f32,
    pub health: u8,
    pub flash: Timed,
    pub behavior: Behavior,
}

impl Enemy {
    /// Roll a fresh instance of `kind` at `pos`; attack timers start at `now`
    pub fn spawn<R: Rng + ?Sized>(id: u32, kind: EnemyKind, pos: Vec2, rng: &mut R, now: u64) -> Self {
        let speed = rng.random_range(kind.speed_range());
        let behavior = match kind {
            EnemyKind::Ground => Behavior::Ground,
            EnemyKind::Flying => Behavior::Flying {
                sway: Sway::roll(rng, pos.y, 30.0..=60.0, 0.02..=0.05, FLYING_BAND),
            },
            EnemyKind::Boss => Behavior::Boss {
                sway: Sway::roll(rng, pos.y, 40.0..=80.0, 0.01..=0.03, BOSS_BAND),
                bomb: Cooldown::new(now, rng.random_range(BOMB_DELAY_MS)),
            },
            EnemyKind::JumpingBoss => Behavior::Jumping {
                vel_y: 0.0,
                on_ground: false,
                jump: Cooldown::new(now, rng.random_range(JUMP_DELAY_MS)),
                missile: Cooldown::new(now, rng.random_range(MISSILE_DELAY_MS)),
            },
        };
        Self {
            id,
            kind,
            pos,
            speed,
            health: kind.max_health(),
            flash: Timed::default(),
            behavior,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.kind.size()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size().x < 0.0
    }

    /// Move one tick. `target` is the player's center, used for aiming.
    /// Returns an attack when one of this enemy's cooldowns fired; enemies
    /// that just scrolled off never attack.
    pub fn update<R: Rng + ?Sized>(&mut self, now: u64, target: Vec2, rng: &mut R) -> Option<EnemyAttack> {
        self.pos.x -= self.speed;
        self.flash.expire(now);
        let size = self.size();
        let off_screen = self.is_off_screen();

        match &mut self.behavior {
            Behavior::Ground => None,
            Behavior::Flying { sway } => {
                self.pos.y = sway.step();
                None
            }
            Behavior::Boss { sway, bomb } => {
                self.pos.y = sway.step();
                if off_screen || !bomb.is_ready(now) {
                    return None;
                }
                bomb.trigger(now, rng.random_range(BOMB_DELAY_MS));
                let drop_at = Vec2::new(self.pos.x + size.x / 2.0, self.pos.y + size.y);
                Some(EnemyAttack::Bomb(Bomb::new(drop_at, rng)))
            }
            Behavior::Jumping {
                vel_y,
                on_ground,
                jump,
                missile,
            } => {
                *vel_y += JUMPING_BOSS_GRAVITY;
                self.pos.y += *vel_y;
                if self.pos.y + size.y >= JUMPING_BOSS_GROUND_Y {
                    self.pos.y = JUMPING_BOSS_GROUND_Y - size.y;
                    *vel_y = 0.0;
                    *on_ground = true;
                } else {
                    *on_ground = false;
                }

                if *on_ground && jump.is_ready(now) {
                    *vel_y = JUMPING_BOSS_JUMP_VELOCITY;
                    *on_ground = false;
                    jump.trigger(now, rng.random_range(JUMP_DELAY_MS));
                }

                if off_screen || !missile.is_ready(now) {
                    return None;
                }
                missile.trigger(now, rng.random_range(MISSILE_DELAY_MS));
                let launch_at = crate::center_of(self.pos, size);
                Some(EnemyAttack::Missile(HomingMissile::new(launch_at, target)))
            }
        }
    }

    /// One hit: lose a point of health and flash. Returns true on the
    /// killing hit only; a dead enemy ignores further hits.
    pub fn take_hit(&mut self, now: u64) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health -= 1;
        self.flash.start(now, HIT_FLASH_MS);
        self.health == 0
    }
}

impl Actor for Enemy {
    fn kind(&self) -> ActorKind {
        self.kind.actor_kind()
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }

    fn health(&self) -> Option<u8> {
        Some(self.health)
    }

    fn is_flashing(&self) -> bool {
        self.flash.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_spawn_rolls_within_ranges() {
        let mut rng = rng();
        for kind in [
            EnemyKind::Ground,
            EnemyKind::Flying,
            EnemyKind::Boss,
            EnemyKind::JumpingBoss,
        ] {
            for id in 0..20 {
                let enemy = Enemy::spawn(id, kind, Vec2::new(SCREEN_WIDTH, 200.0), &mut rng, 0);
                assert!(kind.speed_range().contains(&enemy.speed));
                assert_eq!(enemy.health, kind.max_health());
            }
        }
    }

    #[test]
    fn test_ground_enemy_removed_only_past_left_edge() {
        let mut rng = rng();
        let mut enemy = Enemy::spawn(1, EnemyKind::Ground, Vec2::new(SCREEN_WIDTH, 460.0), &mut rng, 0);
        let mut ticks = 0;
        while !enemy.is_off_screen() {
            assert!(enemy.pos.x + enemy.size().x >= 0.0);
            enemy.update(ticks * TICK_MS, Vec2::ZERO, &mut rng);
            ticks += 1;
            assert!(ticks < 2000);
        }
        assert!(enemy.pos.x + enemy.size().x < 0.0);
        assert_eq!(enemy.pos.y, 460.0);
    }

    #[test]
    fn test_flying_sway_stays_in_band() {
        let mut rng = rng();
        let mut enemy = Enemy::spawn(1, EnemyKind::Flying, Vec2::new(SCREEN_WIDTH, 420.0), &mut rng, 0);
        let mut ys = Vec::new();
        for t in 0..300 {
            enemy.update(t * TICK_MS, Vec2::ZERO, &mut rng);
            assert!(enemy.pos.y >= FLYING_BAND.0 && enemy.pos.y <= FLYING_BAND.1);
            ys.push(enemy.pos.y);
        }
        let min = ys.iter().cloned().fold(f32::MAX, f32::min);
        let max = ys.iter().cloned().fold(f32::MIN, f32::max);
        assert!(max - min > 1.0);
    }

    #[test]
    fn test_boss_takes_two_hits_and_flashes() {
        let mut rng = rng();
        let mut boss = Enemy::spawn(1, EnemyKind::Boss, Vec2::new(500.0, 200.0), &mut rng, 0);

        assert!(!boss.take_hit(100));
        assert_eq!(boss.health, 1);
        assert!(boss.is_flashing());

        boss.update(100 + HIT_FLASH_MS, Vec2::ZERO, &mut rng);
        assert!(boss.is_flashing());
        boss.update(100 + HIT_FLASH_MS + 1, Vec2::ZERO, &mut rng);
        assert!(!boss.is_flashing());

        assert!(boss.take_hit(500));
        assert_eq!(boss.health, 0);
        // Already dead: no second kill
        assert!(!boss.take_hit(501));
        assert_eq!(boss.health, 0);
    }

    #[test]
    fn test_boss_drops_bombs_on_cooldown() {
        let mut rng = rng();
        let mut boss = Enemy::spawn(1, EnemyKind::Boss, Vec2::new(900.0, 200.0), &mut rng, 0);
        // Slow it down so it stays on screen for the whole run
        boss.speed = 0.0;

        let mut drops = Vec::new();
        for t in 0..1000u64 {
            let now = t * TICK_MS;
            if let Some(EnemyAttack::Bomb(bomb)) = boss.update(now, Vec2::ZERO, &mut rng) {
                assert!(bomb.pos.y >= boss.pos.y);
                drops.push(now);
            }
        }
        assert!(drops.len() >= 3);
        assert!(drops[0] > 2000);
        for pair in drops.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap > 2000 && gap <= 4000 + TICK_MS);
        }
    }

    #[test]
    fn test_jumping_boss_lands_jumps_and_fires() {
        let mut rng = rng();
        let start = Vec2::new(900.0, SCREEN_HEIGHT - 200.0);
        let mut boss = Enemy::spawn(1, EnemyKind::JumpingBoss, start, &mut rng, 0);
        boss.speed = 0.0;
        let target = Vec2::new(70.0, 470.0);

        let mut missiles = 0;
        let mut left_ground = false;
        for t in 1..600u64 {
            let attack = boss.update(t * TICK_MS, target, &mut rng);
            assert!(boss.pos.y + boss.size().y <= JUMPING_BOSS_GROUND_Y);
            if boss.pos.y + boss.size().y < JUMPING_BOSS_GROUND_Y - 1.0 {
                left_ground = true;
            }
            if let Some(EnemyAttack::Missile(missile)) = attack {
                assert_eq!(missile.target, target);
                assert_eq!(missile.vel, Vec2::ZERO);
                missiles += 1;
            }
        }
        assert!(left_ground);
        assert!(missiles >= 1);
        assert_eq!(boss.health, 5);
    }

    #[test]
    fn test_off_screen_boss_does_not_attack() {
        let mut rng = rng();
        let mut boss = Enemy::spawn(1, EnemyKind::Boss, Vec2::new(-100.0, 200.0), &mut rng, 0);
        assert!(boss.update(10_000, Vec2::ZERO, &mut rng).is_none());
    }
}
