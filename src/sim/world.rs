//! Entity collections and the per-tick collision passes
//!
//! Every live actor is owned by exactly one collection here. Passes that can
//! remove actors mark them first and sweep with `retain` afterwards, so no
//! collection is ever mutated while it is being scanned.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::enemy::{Enemy, EnemyAttack, EnemyKind};
use super::player::Player;
use super::projectile::{Bomb, HomingMissile, PowerUp, Projectile};

/// Contact damage of a falling bomb
pub const BOMB_DAMAGE: u32 = 25;
/// Contact damage of a homing missile
pub const MISSILE_DAMAGE: u32 = 10;

/// All actors of the running level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    /// Sorted by id (spawn order)
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub missiles: Vec<HomingMissile>,
    pub power_ups: Vec<PowerUp>,
    next_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            player: Player::new(),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            bombs: Vec::new(),
            missiles: Vec::new(),
            power_ups: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an enemy of `kind` with its top-left at `pos`; returns its id
    pub fn spawn_enemy<R: Rng + ?Sized>(&mut self, kind: EnemyKind, pos: Vec2, rng: &mut R, now: u64) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::spawn(id, kind, pos, rng, now));
        log::debug!("Spawned {} #{} at ({:.0}, {:.0})", kind.as_str(), id, pos.x, pos.y);
        id
    }

    /// Number of non-player actors alive
    pub fn transient_count(&self) -> usize {
        self.projectiles.len()
            + self.enemies.len()
            + self.bombs.len()
            + self.missiles.len()
            + self.power_ups.len()
    }

    /// Drop every non-player actor (level change, restart)
    pub fn clear_transient(&mut self) {
        self.projectiles.clear();
        self.enemies.clear();
        self.bombs.clear();
        self.missiles.clear();
        self.power_ups.clear();
    }

    /// Move every non-player actor one tick and cull the ones that left.
    /// Ordnance launched this tick is appended after the scan and first
    /// moves on the next tick.
    pub fn update_actors<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) {
        let target = self.player.center();

        for projectile in &mut self.projectiles {
            projectile.update();
        }
        self.projectiles.retain(|p| !p.is_out_of_bounds());

        for bomb in &mut self.bombs {
            bomb.update();
        }
        self.bombs.retain(|b| !b.is_out_of_bounds());

        for missile in &mut self.missiles {
            missile.steer(target);
        }
        self.missiles
            .retain(|m| !m.is_expired() && !m.is_out_of_bounds());

        for power_up in &mut self.power_ups {
            power_up.update();
        }

        let mut launched = Vec::new();
        for enemy in &mut self.enemies {
            if let Some(attack) = enemy.update(now, target, rng) {
                launched.push(attack);
            }
        }
        self.enemies.retain(|e| !e.is_off_screen());

        for attack in launched {
            match attack {
                EnemyAttack::Bomb(bomb) => self.bombs.push(bomb),
                EnemyAttack::Missile(missile) => self.missiles.push(missile),
            }
        }
    }

    /// Pair every player shot with every live enemy. Returns the score
    /// earned by kills this tick.
    pub fn resolve_projectile_hits(&mut self, now: u64) -> u64 {
        let mut earned = 0;

        for projectile in &mut self.projectiles {
            let shot = projectile.bounds();
            for enemy in &mut self.enemies {
                if !enemy.is_alive() || !shot.intersects(&enemy.bounds()) {
                    continue;
                }
                if !projectile.register_hit(enemy.id) {
                    continue;
                }
                if enemy.take_hit(now) {
                    earned += enemy.kind.score();
                    log::debug!("Killed {} #{} (+{})", enemy.kind.as_str(), enemy.id, enemy.kind.score());
                }
                if projectile.consumed {
                    break;
                }
            }
        }

        self.projectiles.retain(|p| !p.consumed);
        self.enemies.retain(|e| e.is_alive());
        earned
    }

    /// Player against pickups and hazards. Hazards are only consumed when
    /// their damage actually landed.
    pub fn resolve_player_contacts(&mut self, now: u64) {
        let player = &mut self.player;

        self.power_ups.retain_mut(|power_up| {
            if power_up.collected || !power_up.bounds().intersects(&player.bounds()) {
                return !power_up.collected;
            }
            power_up.collected = true;
            player.collect(power_up.mode, now);
            false
        });

        self.enemies.retain(|enemy| {
            if !enemy.bounds().intersects(&player.bounds()) {
                return true;
            }
            let applied = player.take_damage(enemy.kind.contact_damage(), now);
            !(applied && enemy.kind.removed_on_contact())
        });

        self.bombs.retain(|bomb| {
            !(bomb.bounds().intersects(&player.bounds()) && player.take_damage(BOMB_DAMAGE, now))
        });

        self.missiles.retain(|missile| {
            !(missile.bounds().intersects(&player.bounds())
                && player.take_damage(MISSILE_DAMAGE, now))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::collision::Rect;
    use crate::sim::player::WeaponMode;
    use crate::sim::projectile::ProjectileKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    /// Park an enemy so it does not move during the test
    fn parked(world: &mut World, kind: EnemyKind, pos: Vec2, rng: &mut Pcg32) -> u32 {
        let id = world.spawn_enemy(kind, pos, rng, 0);
        if let Some(enemy) = world.enemies.iter_mut().find(|e| e.id == id) {
            enemy.speed = 0.0;
        }
        id
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut world = World::new();
        let a = world.next_entity_id();
        let b = world.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_bullet_consumed_by_one_enemy_only() {
        let mut rng = rng();
        let mut world = World::new();
        // Two overlapping ground enemies; one shot covering both
        parked(&mut world, EnemyKind::Ground, Vec2::new(500.0, 400.0), &mut rng);
        parked(&mut world, EnemyKind::Ground, Vec2::new(505.0, 400.0), &mut rng);
        world
            .projectiles
            .push(Projectile::bullet(Vec2::new(510.0, 410.0), Vec2::X));

        let earned = world.resolve_projectile_hits(100);
        assert_eq!(earned, EnemyKind::Ground.score());
        assert_eq!(world.enemies.len(), 1);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_penetrating_shot_hits_each_enemy_once() {
        let mut rng = rng();
        let mut world = World::new();
        parked(&mut world, EnemyKind::JumpingBoss, Vec2::new(500.0, 300.0), &mut rng);
        parked(&mut world, EnemyKind::Boss, Vec2::new(510.0, 300.0), &mut rng);
        world
            .projectiles
            .push(Projectile::penetrating(Vec2::new(520.0, 320.0)));

        for t in 0..5 {
            world.resolve_projectile_hits(100 + t);
        }
        // Each boss lost exactly one point of health
        assert_eq!(world.enemies.len(), 2);
        let healths: Vec<u8> = world.enemies.iter().map(|e| e.health).collect();
        assert_eq!(healths, vec![4, 1]);

        assert_eq!(world.projectiles.len(), 1);
        match &world.projectiles[0].kind {
            ProjectileKind::Penetrating { hit } => assert_eq!(hit.len(), 2),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_boss_kill_scores_on_final_hit() {
        let mut rng = rng();
        let mut world = World::new();
        parked(&mut world, EnemyKind::Boss, Vec2::new(500.0, 300.0), &mut rng);

        world
            .projectiles
            .push(Projectile::bullet(Vec2::new(510.0, 310.0), Vec2::X));
        assert_eq!(world.resolve_projectile_hits(100), 0);
        assert_eq!(world.enemies.len(), 1);

        world
            .projectiles
            .push(Projectile::bullet(Vec2::new(510.0, 310.0), Vec2::X));
        assert_eq!(world.resolve_projectile_hits(200), EnemyKind::Boss.score());
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn test_boss_survives_player_contact() {
        let mut rng = rng();
        let mut world = World::new();
        let at = world.player.pos;
        parked(&mut world, EnemyKind::Boss, at, &mut rng);
        parked(&mut world, EnemyKind::JumpingBoss, at, &mut rng);

        world.resolve_player_contacts(100);
        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.player.hp, PLAYER_MAX_HP - EnemyKind::Boss.contact_damage());
    }

    #[test]
    fn test_ground_enemy_removed_only_when_damage_lands() {
        let mut rng = rng();
        let mut world = World::new();
        let at = world.player.pos;
        parked(&mut world, EnemyKind::Ground, at, &mut rng);
        parked(&mut world, EnemyKind::Ground, at, &mut rng);

        world.resolve_player_contacts(100);
        // The first touch landed; the second was absorbed by invulnerability
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.player.hp, PLAYER_MAX_HP - EnemyKind::Ground.contact_damage());
    }

    #[test]
    fn test_hazards_consumed_on_damage() {
        let mut rng = rng();
        let mut world = World::new();
        let center = world.player.center();
        world.bombs.push(Bomb::new(center, &mut rng));
        world.missiles.push(HomingMissile::new(center, center));

        world.resolve_player_contacts(100);
        assert!(world.bombs.is_empty());
        assert_eq!(world.missiles.len(), 1);
        assert_eq!(world.player.hp, PLAYER_MAX_HP - BOMB_DAMAGE);

        let later = 100 + INVULNERABILITY_MS + 1;
        assert!(world.player.invulnerable.expire(later));
        world.resolve_player_contacts(later);
        assert!(world.missiles.is_empty());
        assert_eq!(world.player.hp, PLAYER_MAX_HP - BOMB_DAMAGE - MISSILE_DAMAGE);
    }

    #[test]
    fn test_power_up_collected_once() {
        let mut world = World::new();
        world.player.hp = 50;
        let bounds = world.player.bounds();
        let platform = Rect::new(bounds.x - 20.0, bounds.y + 40.0, 80.0, 20.0);
        world.power_ups.push(PowerUp::above(&platform, WeaponMode::Shotgun));

        world.resolve_player_contacts(100);
        assert!(world.power_ups.is_empty());
        assert_eq!(world.player.hp, 50 + POWER_UP_HEAL);
        assert!(world.player.weapons.is_active(WeaponMode::Shotgun));

        world.resolve_player_contacts(116);
        assert_eq!(world.player.hp, 50 + POWER_UP_HEAL);
    }

    #[test]
    fn test_boss_bombs_appear_after_scan() {
        let mut rng = rng();
        let mut world = World::new();
        parked(&mut world, EnemyKind::Boss, Vec2::new(700.0, 100.0), &mut rng);

        let mut now = 0;
        while world.bombs.is_empty() {
            now += TICK_MS;
            world.update_actors(now, &mut rng);
            assert!(now < 10_000);
        }
        // Freshly dropped bomb has not moved yet
        let boss = &world.enemies[0];
        assert_eq!(world.bombs[0].pos.y, boss.pos.y + boss.size().y);
    }

    #[test]
    fn test_clear_transient_keeps_player() {
        let mut rng = rng();
        let mut world = World::new();
        world.spawn_enemy(EnemyKind::Flying, Vec2::new(900.0, 200.0), &mut rng, 0);
        world
            .projectiles
            .push(Projectile::bullet(Vec2::new(100.0, 100.0), Vec2::X));
        world.player.hp = 40;

        world.clear_transient();
        assert_eq!(world.transient_count(), 0);
        assert_eq!(world.player.hp, 40);
    }
}
