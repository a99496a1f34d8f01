//! The controllable avatar: movement, damage, weapon modes and firing

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind};
use super::clock::Timed;
use super::collision::{Rect, resolve_horizontal, resolve_vertical};
use super::projectile::Projectile;
use super::tick::TickInput;
use crate::consts::*;
use crate::direction_from_degrees;

/// Timed weapon upgrades granted by power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponMode {
    Shotgun,
    MachineGun,
    Penetrator,
    Rain,
}

impl WeaponMode {
    pub const ALL: [WeaponMode; 4] = [
        WeaponMode::Shotgun,
        WeaponMode::MachineGun,
        WeaponMode::Penetrator,
        WeaponMode::Rain,
    ];

    /// Modes that change the shot pattern, highest priority first.
    /// Machine gun only changes the cooldown, so it never appears here.
    pub const FIRING_PRECEDENCE: [WeaponMode; 3] =
        [WeaponMode::Rain, WeaponMode::Penetrator, WeaponMode::Shotgun];

    pub fn duration_ms(&self) -> u64 {
        match self {
            WeaponMode::Shotgun => 15_000,
            WeaponMode::MachineGun => 7_000,
            WeaponMode::Penetrator => 10_000,
            WeaponMode::Rain => 8_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponMode::Shotgun => "shotgun",
            WeaponMode::MachineGun => "machine_gun",
            WeaponMode::Penetrator => "penetrator",
            WeaponMode::Rain => "rain",
        }
    }
}

/// One timer per weapon mode; any combination may be active at once
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponModes {
    shotgun: Timed,
    machine_gun: Timed,
    penetrator: Timed,
    rain: Timed,
}

impl WeaponModes {
    fn slot(&self, mode: WeaponMode) -> &Timed {
        match mode {
            WeaponMode::Shotgun => &self.shotgun,
            WeaponMode::MachineGun => &self.machine_gun,
            WeaponMode::Penetrator => &self.penetrator,
            WeaponMode::Rain => &self.rain,
        }
    }

    fn slot_mut(&mut self, mode: WeaponMode) -> &mut Timed {
        match mode {
            WeaponMode::Shotgun => &mut self.shotgun,
            WeaponMode::MachineGun => &mut self.machine_gun,
            WeaponMode::Penetrator => &mut self.penetrator,
            WeaponMode::Rain => &mut self.rain,
        }
    }

    pub fn is_active(&self, mode: WeaponMode) -> bool {
        self.slot(mode).active
    }

    /// (Re)start a mode's full duration
    pub fn activate(&mut self, mode: WeaponMode, now: u64) {
        self.slot_mut(mode).start(now, mode.duration_ms());
    }

    /// Each mode expires against its own duration only
    pub fn expire(&mut self, now: u64) {
        for mode in WeaponMode::ALL {
            if self.slot_mut(mode).expire(now) {
                log::debug!("Weapon mode {} expired", mode.as_str());
            }
        }
    }

    pub fn remaining_ms(&self, mode: WeaponMode, now: u64) -> u64 {
        self.slot(mode).remaining(now)
    }

    /// Pattern to fire: first active mode in precedence order, None = single shot
    pub fn firing_mode(&self) -> Option<WeaponMode> {
        WeaponMode::FIRING_PRECEDENCE
            .into_iter()
            .find(|mode| self.is_active(*mode))
    }

    pub fn active(&self) -> impl Iterator<Item = WeaponMode> + '_ {
        WeaponMode::ALL.into_iter().filter(|mode| self.is_active(*mode))
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the standing box
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    pub on_ground: bool,
    pub crouching: bool,
    pub invulnerable: Timed,
    pub weapons: WeaponModes,
    /// Time of the last volley (None = never fired)
    pub last_shot_ms: Option<u64>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            on_ground: false,
            crouching: false,
            invulnerable: Timed::default(),
            weapons: WeaponModes::default(),
            last_shot_ms: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Collision box; crouching halves the height and keeps the feet in place
    pub fn bounds(&self) -> Rect {
        let height = if self.crouching {
            PLAYER_HEIGHT / 2.0
        } else {
            PLAYER_HEIGHT
        };
        Rect::new(
            self.pos.x,
            self.pos.y + (PLAYER_HEIGHT - height),
            PLAYER_WIDTH,
            height,
        )
    }

    /// Center of the standing box (what missiles home on)
    pub fn center(&self) -> Vec2 {
        crate::center_of(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Back to the level-start spot, at rest
    pub fn reset_position(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.crouching = false;
    }

    /// Advance timers, apply intent, then move and resolve one axis at a time
    pub fn update(&mut self, input: &TickInput, platforms: &[Rect], has_floor: bool, now: u64) {
        self.invulnerable.expire(now);
        self.weapons.expire(now);

        self.vel.x = 0.0;
        if input.move_left {
            self.vel.x = -PLAYER_SPEED;
        }
        if input.move_right {
            self.vel.x = PLAYER_SPEED;
        }
        if input.jump && self.on_ground {
            self.vel.y = PLAYER_JUMP_VELOCITY;
            self.on_ground = false;
        }
        self.crouching = input.crouch;
        self.vel.y += GRAVITY;

        // Horizontal pass
        self.pos.x += self.vel.x;
        self.pos.x = resolve_horizontal(self.bounds(), self.vel.x, platforms);

        // Vertical pass (box top may sit below pos.y while crouching)
        self.pos.y += self.vel.y;
        let body = self.bounds();
        let (box_y, contact) = resolve_vertical(body, self.vel.y, platforms);
        self.pos.y = box_y - (PLAYER_HEIGHT - body.h);
        self.on_ground = contact.landed;
        if contact.landed || contact.bumped {
            self.vel.y = 0.0;
        }

        if has_floor {
            if self.pos.y + PLAYER_HEIGHT >= FLOOR_Y {
                self.pos.y = FLOOR_Y - PLAYER_HEIGHT;
                self.vel.y = 0.0;
                self.on_ground = true;
            }
        } else if self.pos.y > SCREEN_HEIGHT && self.hp > 0 {
            log::info!("Player fell out of the level");
            self.hp = 0;
        }

        self.pos.x = self.pos.x.clamp(0.0, SCREEN_WIDTH - PLAYER_WIDTH);
    }

    /// Apply damage unless invulnerable. Returns whether damage was applied;
    /// callers only consume the damage source when it was.
    pub fn take_damage(&mut self, amount: u32, now: u64) -> bool {
        if self.invulnerable.active {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount);
        self.invulnerable.start(now, INVULNERABILITY_MS);
        true
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Pick up a power-up of the given mode
    pub fn collect(&mut self, mode: WeaponMode, now: u64) {
        self.heal(POWER_UP_HEAL);
        self.weapons.activate(mode, now);
        log::debug!("Picked up {}", mode.as_str());
    }

    /// Cooldown in effect for the current mode set
    pub fn shot_cooldown_ms(&self) -> u64 {
        if self.weapons.is_active(WeaponMode::MachineGun) {
            MACHINE_GUN_COOLDOWN_MS
        } else {
            SHOT_COOLDOWN_MS
        }
    }

    /// Fire if requested (or machine gun is active) and the cooldown allows.
    /// Returns the projectiles produced, empty when nothing fired.
    pub fn try_fire(&mut self, fire_requested: bool, now: u64) -> Vec<Projectile> {
        let auto_fire = self.weapons.is_active(WeaponMode::MachineGun);
        if !fire_requested && !auto_fire {
            return Vec::new();
        }
        if let Some(last) = self.last_shot_ms {
            if now.saturating_sub(last) <= self.shot_cooldown_ms() {
                return Vec::new();
            }
        }
        self.last_shot_ms = Some(now);

        let muzzle = Vec2::new(self.pos.x + PLAYER_WIDTH, self.pos.y + PLAYER_HEIGHT / 2.0);
        match self.weapons.firing_mode() {
            Some(WeaponMode::Rain) => (0..RAIN_COUNT).map(Projectile::rain).collect(),
            Some(WeaponMode::Penetrator) => vec![
                Projectile::penetrating(muzzle - Vec2::new(0.0, PENETRATOR_OFFSET)),
                Projectile::penetrating(muzzle + Vec2::new(0.0, PENETRATOR_OFFSET)),
            ],
            Some(WeaponMode::Shotgun) => SHOTGUN_SPREAD_DEG
                .iter()
                .map(|deg| Projectile::bullet(muzzle, direction_from_degrees(*deg)))
                .collect(),
            Some(WeaponMode::MachineGun) | None => {
                vec![Projectile::bullet(muzzle, Vec2::X)]
            }
        }
    }
}

impl Actor for Player {
    fn kind(&self) -> ActorKind {
        ActorKind::Player
    }

    fn bounds(&self) -> Rect {
        Player::bounds(self)
    }
}
