//! Shared capability set for everything that moves

use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Kind tag carried by every actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    GroundEnemy,
    FlyingEnemy,
    BossEnemy,
    JumpingBoss,
    Bullet,
    PenetratingBullet,
    RainBullet,
    HomingMissile,
    Bomb,
    PowerUp,
}

/// What the collision pass and the snapshot need from any actor
pub trait Actor {
    fn kind(&self) -> ActorKind;

    /// Axis-aligned collision box
    fn bounds(&self) -> Rect;

    /// Remaining hit points for kinds that have them
    fn health(&self) -> Option<u8> {
        None
    }

    /// Hit-flash currently showing
    fn is_flashing(&self) -> bool {
        false
    }
}
