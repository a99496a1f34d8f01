//! Game state and the level progression state machine
//!
//! `GameState` owns everything a run needs: the seeded RNG, the clock, the
//! level table, the entity world and the spawn timers. Only `tick` mutates it
//! during play.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::collision::Rect;
use super::snapshot::WorldSnapshot;
use super::spawn::SpawnScheduler;
use super::world::World;
use crate::config::{LevelConfig, LevelTable};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Banner pause after clearing a level; nothing moves
    Transitioning,
    /// Player is dead; waiting for a restart
    GameOver,
}

/// Complete state of one run (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The only source of randomness
    pub rng: Pcg32,
    pub clock: Clock,
    pub levels: LevelTable,
    /// Current level (1-based)
    pub level: u32,
    /// Highest level entered this session; restarts resume here
    pub max_level_reached: u32,
    pub score: u64,
    pub phase: GamePhase,
    /// When the current transition started
    pub transition_started_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: World,
    pub spawner: SpawnScheduler,
}

impl GameState {
    /// Create a new game state with the given seed and the built-in campaign
    pub fn new(seed: u64) -> Self {
        Self::with_levels(seed, LevelTable::standard())
    }

    pub fn with_levels(seed: u64, levels: LevelTable) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: Clock::new(),
            levels,
            level: 1,
            max_level_reached: 1,
            score: 0,
            phase: GamePhase::Playing,
            transition_started_ms: 0,
            time_ticks: 0,
            world: World::new(),
            spawner: SpawnScheduler::new(0),
        }
    }

    #[inline]
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn current_config(&self) -> &LevelConfig {
        self.levels.get(self.level)
    }

    pub fn platforms(&self) -> &[Rect] {
        self.current_config().platforms.rects()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Level being announced while transitioning
    pub fn transition_level(&self) -> Option<u32> {
        (self.phase == GamePhase::Transitioning).then_some(self.level)
    }

    /// Read-only view for renderers and UIs
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self)
    }

    fn enter_level(&mut self, level: u32) {
        self.level = level;
        self.max_level_reached = self.max_level_reached.max(level);
        self.spawner.reset(self.now());
    }

    /// Start playing `level` directly, with the score it would be entered at
    pub fn jump_to_level(&mut self, level: u32) {
        let level = level.max(1);
        self.world = World::new();
        self.score = self.levels.entry_score(level);
        self.phase = GamePhase::Playing;
        self.enter_level(level);
        log::info!("Starting at level {} with score {}", self.level, self.score);
    }

    /// Advance when the score reaches the current threshold. Returns true if
    /// a transition started.
    pub fn check_level_progress(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let config = self.current_config();
        let Some(threshold) = config.score_threshold else {
            return false;
        };
        if self.score < threshold {
            return false;
        }
        let bonus = config.health_bonus;

        self.world.clear_transient();
        self.world.player.reset_position();
        self.world.player.heal(bonus);
        self.enter_level(self.level + 1);
        self.phase = GamePhase::Transitioning;
        self.transition_started_ms = self.now();
        log::info!(
            "Level {} reached at score {} (+{} hp, now {})",
            self.level,
            self.score,
            bonus,
            self.world.player.hp
        );
        true
    }

    /// Leave the transition once it has run its course. Returns true when
    /// play resumed.
    pub fn update_transition(&mut self) -> bool {
        if self.phase != GamePhase::Transitioning {
            return false;
        }
        if self.clock.elapsed_since(self.transition_started_ms) <= TRANSITION_MS {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.spawner.reset(self.now());
        log::debug!("Level {} underway", self.level);
        true
    }

    /// Enter game over once the player is dead. Returns true on the tick it
    /// happened.
    pub fn check_game_over(&mut self) -> bool {
        if self.phase == GamePhase::GameOver || self.world.player.is_alive() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over on level {} with score {} (best level {})",
            self.level,
            self.score,
            self.max_level_reached
        );
        true
    }

    /// Start over at the highest level reached. Ignored unless the game is
    /// over; returns whether the restart happened.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        let level = self.max_level_reached;
        self.world = World::new();
        self.score = self.levels.entry_score(level);
        self.phase = GamePhase::Playing;
        self.enter_level(level);
        log::info!("Restarted at level {} with score {}", self.level, self.score);
        true
    }
}
