//! Per-level rules and platform layouts
//!
//! A `LevelTable` is handed to the simulation already parsed; the built-in
//! table reproduces the shipped seven-level campaign. Levels past the end of
//! a table reuse its last entry.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::player::WeaponMode;

/// Categories the spawn scheduler times independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnCategory {
    GroundEnemy,
    FlyingEnemy,
    BossEnemy,
    JumpingBoss,
    PowerUp,
}

impl SpawnCategory {
    pub const ALL: [SpawnCategory; 5] = [
        SpawnCategory::GroundEnemy,
        SpawnCategory::FlyingEnemy,
        SpawnCategory::BossEnemy,
        SpawnCategory::JumpingBoss,
        SpawnCategory::PowerUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnCategory::GroundEnemy => "ground_enemy",
            SpawnCategory::FlyingEnemy => "flying_enemy",
            SpawnCategory::BossEnemy => "boss_enemy",
            SpawnCategory::JumpingBoss => "jumping_boss",
            SpawnCategory::PowerUp => "power_up",
        }
    }

    /// Slot in per-category arrays
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Errors from parsing an externally supplied level table
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level table contains no levels")]
    Empty,
    #[error("level {level} enables power-ups but has no platforms to place them on")]
    NoPlatforms { level: u32 },
}

/// Static walkable rectangles for one level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformLayout(Vec<Rect>);

impl PlatformLayout {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self(rects)
    }

    pub fn rects(&self) -> &[Rect] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uniformly pick one platform
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Rect> {
        self.0.choose(rng)
    }
}

/// Spawn delays in milliseconds; unset or unreadable entries fall back to
/// `DEFAULT_SPAWN_DELAY_MS`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnDelays {
    #[serde(default, deserialize_with = "lenient_delay")]
    pub ground_enemy: Option<u64>,
    #[serde(default, deserialize_with = "lenient_delay")]
    pub flying_enemy: Option<u64>,
    #[serde(default, deserialize_with = "lenient_delay")]
    pub boss_enemy: Option<u64>,
    #[serde(default, deserialize_with = "lenient_delay")]
    pub jumping_boss: Option<u64>,
    #[serde(default, deserialize_with = "lenient_delay")]
    pub power_up: Option<u64>,
}

impl SpawnDelays {
    /// The shipped defaults for every category
    pub fn standard() -> Self {
        Self {
            ground_enemy: Some(2000),
            flying_enemy: Some(3000),
            boss_enemy: Some(8000),
            jumping_boss: Some(12000),
            power_up: Some(10000),
        }
    }

    pub fn get(&self, category: SpawnCategory) -> Option<u64> {
        match category {
            SpawnCategory::GroundEnemy => self.ground_enemy,
            SpawnCategory::FlyingEnemy => self.flying_enemy,
            SpawnCategory::BossEnemy => self.boss_enemy,
            SpawnCategory::JumpingBoss => self.jumping_boss,
            SpawnCategory::PowerUp => self.power_up,
        }
    }
}

/// Accept a non-negative integer; anything else reads as "unset"
fn lenient_delay<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDelay {
        Millis(u64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match RawDelay::deserialize(deserializer)? {
        RawDelay::Millis(ms) => Some(ms),
        RawDelay::Other(_) => None,
    })
}

/// Vertical spawn band (inclusive, top-left y)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBand {
    pub min_y: f32,
    pub max_y: f32,
}

impl SpawnBand {
    pub const fn new(min_y: f32, max_y: f32) -> Self {
        Self { min_y, max_y }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max_y <= self.min_y {
            return self.min_y;
        }
        rng.random_range(self.min_y..=self.max_y)
    }
}

fn default_flying_band() -> SpawnBand {
    SpawnBand::new(100.0, SCREEN_HEIGHT - 200.0)
}

fn default_has_floor() -> bool {
    true
}

/// Immutable ruleset for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    /// Categories allowed to spawn
    #[serde(default)]
    pub enabled: Vec<SpawnCategory>,
    #[serde(default)]
    pub spawn_delays: SpawnDelays,
    /// Cumulative score that advances to the next level (None = final level)
    #[serde(default)]
    pub score_threshold: Option<u64>,
    /// HP restored when advancing out of this level
    #[serde(default)]
    pub health_bonus: u32,
    #[serde(default = "default_has_floor")]
    pub has_floor: bool,
    #[serde(default)]
    pub platforms: PlatformLayout,
    /// Weapon modes power-ups may grant
    #[serde(default)]
    pub power_ups: Vec<WeaponMode>,
    #[serde(default = "default_flying_band")]
    pub flying_band: SpawnBand,
}

impl LevelConfig {
    /// Power-ups additionally need at least one unlocked type
    pub fn is_enabled(&self, category: SpawnCategory) -> bool {
        let listed = self.enabled.contains(&category);
        match category {
            SpawnCategory::PowerUp => listed && !self.power_ups.is_empty(),
            _ => listed,
        }
    }

    pub fn spawn_delay_ms(&self, category: SpawnCategory) -> u64 {
        self.spawn_delays
            .get(category)
            .unwrap_or(DEFAULT_SPAWN_DELAY_MS)
    }
}

/// Ordered list of levels, 1-based. Deserializing goes through the same
/// validation as `from_levels`, so a table is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelConfig>", into = "Vec<LevelConfig>")]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl TryFrom<Vec<LevelConfig>> for LevelTable {
    type Error = ConfigError;

    fn try_from(levels: Vec<LevelConfig>) -> Result<Self, Self::Error> {
        Self::from_levels(levels)
    }
}

impl From<LevelTable> for Vec<LevelConfig> {
    fn from(table: LevelTable) -> Self {
        table.levels
    }
}

impl LevelTable {
    /// Parse and validate a table supplied by the asset layer
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        Self::from_levels(levels)
    }

    pub fn from_levels(levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::Empty);
        }
        for config in &levels {
            if config.is_enabled(SpawnCategory::PowerUp) && config.platforms.is_empty() {
                return Err(ConfigError::NoPlatforms {
                    level: config.level,
                });
            }
            for category in SpawnCategory::ALL {
                if config.is_enabled(category) && config.spawn_delays.get(category).is_none() {
                    log::warn!(
                        "Level {}: no usable {} spawn delay, using {} ms",
                        config.level,
                        category.as_str(),
                        DEFAULT_SPAWN_DELAY_MS
                    );
                }
            }
        }
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    /// Config for a 1-based level number; clamps past the last entry
    pub fn get(&self, level: u32) -> &LevelConfig {
        let idx = (level.max(1) as usize - 1).min(self.levels.len() - 1);
        &self.levels[idx]
    }

    /// Score a restarted run resumes at: the threshold that unlocked `level`
    pub fn entry_score(&self, level: u32) -> u64 {
        if level <= 1 {
            return 0;
        }
        self.get(level - 1).score_threshold.unwrap_or(0)
    }

    /// The built-in seven-level campaign
    pub fn standard() -> Self {
        use SpawnCategory::*;
        use WeaponMode::*;

        let rect = |x: f32, y: f32, w: f32| Rect::new(x, y, w, 20.0);
        let upper_layout = || {
            PlatformLayout::new(vec![
                rect(150.0, 400.0, 140.0),
                rect(400.0, 300.0, 140.0),
                rect(650.0, 200.0, 140.0),
                rect(250.0, 150.0, 140.0),
            ])
        };
        let level = |level: u32,
                     enabled: Vec<SpawnCategory>,
                     threshold: Option<u64>,
                     bonus: u32,
                     platforms: PlatformLayout,
                     power_ups: Vec<WeaponMode>| LevelConfig {
            level,
            enabled,
            spawn_delays: SpawnDelays::standard(),
            score_threshold: threshold,
            health_bonus: bonus,
            has_floor: true,
            platforms,
            power_ups,
            flying_band: default_flying_band(),
        };
        let all_weapons = vec![Shotgun, MachineGun, Penetrator, Rain];

        let mut levels = vec![
            level(
                1,
                vec![GroundEnemy],
                Some(75),
                30,
                PlatformLayout::new(vec![rect(200.0, 400.0, 120.0), rect(400.0, 350.0, 100.0)]),
                Vec::new(),
            ),
            level(
                2,
                vec![GroundEnemy, FlyingEnemy],
                Some(175),
                40,
                PlatformLayout::new(vec![
                    rect(300.0, 350.0, 150.0),
                    rect(600.0, 250.0, 150.0),
                    rect(150.0, 150.0, 150.0),
                ]),
                Vec::new(),
            ),
            level(
                3,
                vec![GroundEnemy, FlyingEnemy, BossEnemy, PowerUp],
                Some(500),
                50,
                PlatformLayout::new(vec![
                    rect(200.0, 400.0, 120.0),
                    rect(500.0, 300.0, 120.0),
                    rect(100.0, 200.0, 120.0),
                    rect(700.0, 150.0, 120.0),
                ]),
                vec![Shotgun, MachineGun],
            ),
            level(
                4,
                vec![GroundEnemy, JumpingBoss, PowerUp],
                Some(1000),
                60,
                PlatformLayout::new(vec![
                    rect(100.0, 450.0, 100.0),
                    rect(300.0, 380.0, 120.0),
                    rect(550.0, 300.0, 100.0),
                    rect(750.0, 220.0, 120.0),
                    rect(200.0, 150.0, 100.0),
                ]),
                vec![Shotgun, MachineGun, Penetrator],
            ),
            level(
                5,
                vec![BossEnemy, JumpingBoss, PowerUp],
                Some(1500),
                70,
                upper_layout(),
                all_weapons.clone(),
            ),
            level(
                6,
                vec![FlyingEnemy, PowerUp],
                Some(2000),
                80,
                PlatformLayout::new(vec![
                    rect(50.0, 480.0, 120.0),
                    rect(250.0, 380.0, 130.0),
                    rect(450.0, 280.0, 140.0),
                    rect(680.0, 380.0, 130.0),
                    rect(830.0, 480.0, 120.0),
                ]),
                all_weapons.clone(),
            ),
            level(
                7,
                vec![GroundEnemy, FlyingEnemy, BossEnemy, JumpingBoss, PowerUp],
                None,
                0,
                upper_layout(),
                all_weapons,
            ),
        ];

        levels[4].spawn_delays.boss_enemy = Some(3000);
        levels[4].spawn_delays.jumping_boss = Some(3000);
        levels[5].spawn_delays.flying_enemy = Some(1500);
        levels[5].has_floor = false;
        levels[5].flying_band = SpawnBand::new(50.0, SCREEN_HEIGHT - 100.0);

        Self { levels }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}
