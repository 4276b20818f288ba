//! Ninja Rescue - A side-on arcade dash
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, shop)
//! - `platform`: Input mapping and the browser binding
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted leaderboard

pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

use std::time::Duration;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Canvas dimensions (16:9)
    pub const CANVAS_WIDTH: f32 = 960.0;
    pub const CANVAS_HEIGHT: f32 = 540.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_GRAVITY: f32 = 0.2;
    pub const PLAYER_LIFE: u32 = 3;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -8.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 50.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_LIFE: i32 = 1;
    /// Spawn exclusion zone, in player sizes per axis
    pub const SPAWN_EXCLUSION: f32 = 5.0;
    /// Rejection sampling attempts before the corner fallback
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

    /// Dagger defaults
    pub const DAGGER_SIZE: f32 = 20.0;
    pub const DAGGER_SPEED: f32 = 10.0;
    pub const DAGGER_DAMAGE: i32 = 1;

    /// Money bag defaults
    pub const BAG_SIZE: f32 = 30.0;
    pub const BAG_FALL_SPEED: f32 = 0.1;
    pub const BAG_MAGNET_SPEED: f32 = 5.0;
    pub const BAG_DROP_CHANCE: f64 = 0.2;

    /// Goal (princess) size and inset from the bottom-right corner
    pub const GOAL_SIZE: f32 = 50.0;
    pub const GOAL_INSET: f32 = 70.0;

    /// Shop
    pub const UPGRADE_COST: u32 = 10;
    pub const ENEMY_SLOW_STEP: f32 = 0.5;
    pub const GOLD_REFUND_MAX: u32 = 10;

    /// Timer periods in milliseconds
    pub const SPAWN_INTERVAL_MS: u64 = 3_000;
    pub const DIFFICULTY_INTERVAL_MS: u64 = 10_000;
    /// Extra life granted to every enemy per difficulty step
    pub const DIFFICULTY_LIFE_STEP: i32 = 1;
}

/// Simulation ticks per second of virtual time
pub const TICK_RATE: u32 = 60;

/// One tick of virtual time, rounded up to the nanosecond. Stepping a clock by
/// this always covers the next tick; the scheduler keeps tick due times exact.
pub const TICK_PERIOD: Duration = Duration::from_nanos(16_666_667);

/// Largest slice of virtual time a single frame may advance
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(250);
