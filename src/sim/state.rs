//! Game state and phase transitions
//!
//! `GameState` is the single owner of everything that changes while playing:
//! the live level, score, camera, timers and the per-tick event queue.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::level::{Level, LevelData, LevelPack};
use crate::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Title,
    /// Active gameplay
    Playing,
    /// Goal reached, waiting to advance
    Victory,
    /// Player died, waiting for retry
    GameOver,
}

/// Things that happened during a tick, for sound and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    LevelLoaded { index: u32 },
    Jumped,
    /// A question block was spent
    BlockStruck { row: usize, col: usize },
    CoinCollected,
    PowerupCollected,
    EnemyStomped,
    /// Big player shrank
    PlayerHurt,
    PlayerDied,
    GoalReached,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for shake jitter
    pub seed: u64,
    pub tuning: Tuning,
    pub pack: LevelPack,
    /// Zero-based index into the pack (wraps)
    pub level_index: u32,
    pub level: Level,
    pub phase: GamePhase,
    /// Carried across levels, reset by `start_game`
    pub score: u64,
    pub camera: Camera,
    /// Ticks remaining before a retry is accepted after death
    pub retry_lockout: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

fn build_level(pack: &LevelPack, index: u32, tuning: &Tuning) -> Level {
    match pack.level(index) {
        Some(data) => Level::load(data, tuning),
        None => {
            log::warn!("Level pack '{}' is empty, loading a blank level", pack.name);
            Level::load(&LevelData::default(), tuning)
        }
    }
}

impl GameState {
    /// New game on the title screen with the first level loaded behind it
    pub fn new(pack: LevelPack, tuning: Tuning, seed: u64) -> Self {
        let level = build_level(&pack, 0, &tuning);
        Self {
            seed,
            tuning,
            pack,
            level_index: 0,
            level,
            phase: GamePhase::Title,
            score: 0,
            camera: Camera::default(),
            retry_lockout: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Built-in levels with default tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::new(LevelPack::builtin(), Tuning::default(), seed)
    }

    /// Replace the live level with a fresh copy of the current index
    fn load_level(&mut self) {
        self.level = build_level(&self.pack, self.level_index, &self.tuning);
        self.camera.reset();
        self.events.push(GameEvent::LevelLoaded {
            index: self.level_index,
        });
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Fresh run from the first level with zero score
    pub fn start_game(&mut self) {
        self.level_index = 0;
        self.score = 0;
        self.events.push(GameEvent::GameStarted);
        self.load_level();
        self.set_phase(GamePhase::Playing);
    }

    /// Move on to the next level after a victory. Returns false if not in victory.
    pub fn advance_level(&mut self) -> bool {
        if self.phase != GamePhase::Victory {
            return false;
        }
        self.level_index += 1;
        self.load_level();
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Retry the current level after death. Refused until the lockout elapses.
    pub fn restart_level(&mut self) -> bool {
        if !self.can_retry() {
            return false;
        }
        self.load_level();
        self.set_phase(GamePhase::Playing);
        true
    }

    pub fn can_retry(&self) -> bool {
        self.phase == GamePhase::GameOver && self.retry_lockout == 0
    }

    /// End the run on the current level
    pub fn kill_player(&mut self) {
        self.level.player.die();
        self.retry_lockout = self.tuning.retry_lockout_ticks;
        self.camera.shake(self.tuning.shake_death_ticks);
        self.events.push(GameEvent::PlayerDied);
        self.set_phase(GamePhase::GameOver);
    }

    /// Level complete; waits for confirm before advancing
    pub fn reach_goal(&mut self) {
        if self.phase == GamePhase::Playing {
            self.set_phase(GamePhase::Victory);
        }
    }

    pub fn award(&mut self, points: u64) {
        self.score += points;
    }

    /// Screen shake offset for rendering this frame
    pub fn shake_offset(&self) -> Vec2 {
        self.camera.shake_offset(self.seed, self.time_ticks)
    }
}
