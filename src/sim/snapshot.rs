//! Read-only per-tick view of the simulation
//!
//! Renderers and UIs draw from a `WorldSnapshot`; they never hold references
//! into the live collections.

use glam::Vec2;
use serde::Serialize;

use super::actor::{Actor, ActorKind};
use super::player::WeaponMode;
use super::state::{GamePhase, GameState};

/// One active weapon mode and how long it has left
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeaponView {
    pub mode: WeaponMode,
    pub remaining_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// Collision box origin (moves down while crouching)
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    pub invulnerable: bool,
    pub crouching: bool,
    pub weapons: Vec<WeaponView>,
}

/// Anything other than the player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub kind: ActorKind,
    pub pos: Vec2,
    pub size: Vec2,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<u8>,
    pub flashing: bool,
    pub collected: bool,
    /// Weapon a power-up grants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<WeaponMode>,
    /// Cosmetic draw offset (power-up bob)
    pub draw_offset_y: f32,
}

impl ActorView {
    fn of(actor: &impl Actor) -> Self {
        let bounds = actor.bounds();
        Self {
            kind: actor.kind(),
            pos: Vec2::new(bounds.x, bounds.y),
            size: Vec2::new(bounds.w, bounds.h),
            health: actor.health(),
            flashing: actor.is_flashing(),
            collected: false,
            power: None,
            draw_offset_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub time_ms: u64,
    pub score: u64,
    pub level: u32,
    pub max_level: u32,
    pub game_over: bool,
    /// Level being announced, while a transition is running
    pub transition: Option<u32>,
    pub player: PlayerView,
    pub actors: Vec<ActorView>,
}

impl WorldSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let now = state.now();
        let world = &state.world;
        let player = &world.player;
        let body = ActorView::of(player);

        let player_view = PlayerView {
            pos: body.pos,
            size: body.size,
            hp: player.hp,
            max_hp: player.max_hp,
            invulnerable: player.invulnerable.active,
            crouching: player.crouching,
            weapons: player
                .weapons
                .active()
                .map(|mode| WeaponView {
                    mode,
                    remaining_ms: player.weapons.remaining_ms(mode, now),
                })
                .collect(),
        };

        let mut actors = Vec::with_capacity(world.transient_count());
        actors.extend(world.enemies.iter().map(ActorView::of));
        actors.extend(world.projectiles.iter().map(ActorView::of));
        actors.extend(world.bombs.iter().map(ActorView::of));
        actors.extend(world.missiles.iter().map(ActorView::of));
        actors.extend(world.power_ups.iter().map(|power_up| ActorView {
            collected: power_up.collected,
            power: Some(power_up.mode),
            draw_offset_y: power_up.bob_offset(),
            ..ActorView::of(power_up)
        }));

        Self {
            tick: state.time_ticks,
            time_ms: now,
            score: state.score,
            level: state.level,
            max_level: state.max_level_reached,
            game_over: state.phase == GamePhase::GameOver,
            transition: state.transition_level(),
            player: player_view,
            actors,
        }
    }

    /// Number of actors of `kind` in view
    pub fn count(&self, kind: ActorKind) -> usize {
        self.actors.iter().filter(|a| a.kind == kind).count()
    }
}
