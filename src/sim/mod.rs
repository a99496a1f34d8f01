//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time read from the shared `Clock`, never a wall clock
//! - No rendering or platform dependencies

pub mod actor;
pub mod clock;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod world;

pub use actor::{Actor, ActorKind};
pub use clock::{Clock, Cooldown, Timed};
pub use collision::{Rect, overlaps};
pub use enemy::{Enemy, EnemyAttack, EnemyKind};
pub use player::{Player, WeaponMode, WeaponModes};
pub use projectile::{Bomb, HomingMissile, PowerUp, Projectile, ProjectileKind};
pub use snapshot::{ActorView, PlayerView, WeaponView, WorldSnapshot};
pub use spawn::SpawnScheduler;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use world::World;
