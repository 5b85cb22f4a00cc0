//! Game state machine: lives, score, level and run status
//!
//! Only collisions and elapsed time move this state forward. Once the run is
//! over, nothing but `reset` changes it.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Status of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Active gameplay
    Playing,
    /// Run ended (terminal until reset)
    GameOver,
}

/// Why an entity left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalCause {
    /// Projectile outlived its lifetime
    Expired,
    /// Projectile struck an enemy
    HitEnemy,
    /// Enemy destroyed by a projectile
    ShotDown,
    /// Enemy reached the player
    HitPlayer,
}

/// Notifications for the renderer and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    EnemyRemoved { id: u32, cause: RemovalCause },
    ProjectileFired { id: u32 },
    ProjectileRemoved { id: u32, cause: RemovalCause },
    LifeLost { remaining: u32 },
    LevelUp { level: u32 },
    /// Emitted exactly once per run
    GameOver { score: u64, level: u32 },
}

/// Read-only per-tick view for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub lives: u32,
    pub level: u32,
    pub score: u64,
    pub status: GameStatus,
}

/// Lives, score and difficulty level for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    lives: u32,
    /// Difficulty level, starts at 1 and never decreases
    level: u32,
    score: u64,
    status: GameStatus,
    /// Timestamp (ms) the run started; level is derived from time since
    start_ms: u64,
}

impl GameState {
    pub fn new(tuning: &Tuning, now_ms: u64) -> Self {
        Self {
            lives: tuning.player_lives,
            level: 1,
            score: 0,
            status: GameStatus::Playing,
            start_ms: now_ms,
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn hud(&self) -> Hud {
        Hud {
            lives: self.lives,
            level: self.level,
            score: self.score,
            status: self.status,
        }
    }

    /// Take one life; returns true if this call ended the run
    ///
    /// Every call while playing costs a life, so callers invoke it once per
    /// qualifying hit.
    pub fn lose_life(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        log::info!("Life lost! Lives remaining: {}", self.lives);

        if self.lives == 0 {
            self.status = GameStatus::GameOver;
            log::info!("Game over! Score {}, level {}", self.score, self.level);
            return true;
        }
        false
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Derive the level from elapsed time; returns true if it went up
    pub fn update_level(&mut self, now_ms: u64, tuning: &Tuning) -> bool {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let steps = elapsed / tuning.difficulty_interval_ms.max(1);
        let new_level = steps
            .saturating_add(1)
            .min(u64::from(tuning.max_difficulty)) as u32;

        if new_level > self.level {
            self.level = new_level;
            log::info!("Level up! Now level {}", self.level);
            return true;
        }
        false
    }

    /// Start a fresh run at `now_ms`
    pub fn reset(&mut self, tuning: &Tuning, now_ms: u64) {
        *self = Self::new(tuning, now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning, 1234);
        assert_eq!(state.lives(), tuning.player_lives);
        assert_eq!(state.level(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.start_ms(), 1234);
    }

    #[test]
    fn test_game_over_on_third_life() {
        let tuning = Tuning {
            player_lives: 3,
            ..Default::default()
        };
        let mut state = GameState::new(&tuning, 0);

        assert!(!state.lose_life());
        assert_eq!(state.status(), GameStatus::Playing);
        assert!(!state.lose_life());
        assert_eq!(state.status(), GameStatus::Playing);
        assert!(state.lose_life());
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.lives(), 0);

        // Further calls are no-ops
        assert!(!state.lose_life());
        assert_eq!(state.lives(), 0);
    }

    #[test]
    fn test_add_score() {
        let mut state = GameState::new(&Tuning::default(), 0);
        state.add_score(10);
        state.add_score(10);
        assert_eq!(state.score(), 20);
    }

    #[test]
    fn test_level_follows_elapsed_time() {
        let tuning = Tuning {
            difficulty_interval_ms: 1000,
            max_difficulty: 3,
            ..Default::default()
        };
        let mut state = GameState::new(&tuning, 500);

        assert!(!state.update_level(1499, &tuning));
        assert_eq!(state.level(), 1);
        assert!(state.update_level(1500, &tuning));
        assert_eq!(state.level(), 2);
        assert!(!state.update_level(1600, &tuning));
        assert!(state.update_level(10_000, &tuning));
        assert_eq!(state.level(), 3);

        // Capped, and never decreases when the clock goes backwards
        assert!(!state.update_level(100_000, &tuning));
        assert!(!state.update_level(0, &tuning));
        assert_eq!(state.level(), 3);
    }

    #[test]
    fn test_reset() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        state.add_score(50);
        state.update_level(120_000, &tuning);
        for _ in 0..tuning.player_lives {
            state.lose_life();
        }
        assert!(state.is_game_over());

        state.reset(&tuning, 200_000);
        assert_eq!(state, GameState::new(&tuning, 200_000));
        assert_eq!(state.hud().status, GameStatus::Playing);
    }
}
