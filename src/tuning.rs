//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a level can be rebalanced
//! from JSON without a rebuild. Persisted in LocalStorage on the web.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_gravity: f32,
    pub player_life: u32,
    pub jump_impulse: f32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_speed: f32,
    pub enemy_life: i32,
    /// Exclusion zone around the player, in player sizes per axis
    pub spawn_exclusion: f32,
    pub max_spawn_attempts: u32,
    pub difficulty_life_step: i32,

    // === Daggers ===
    pub dagger_size: f32,
    pub dagger_speed: f32,
    pub dagger_damage: i32,

    // === Money bags ===
    pub bag_size: f32,
    pub bag_fall_speed: f32,
    pub bag_magnet_speed: f32,
    /// Probability (0-1) that a defeated enemy drops a bag
    pub bag_drop_chance: f64,

    // === Goal ===
    pub goal_size: f32,
    pub goal_inset: f32,

    // === Shop ===
    pub upgrade_cost: u32,
    pub enemy_slow_step: f32,
    pub gold_refund_max: u32,

    // === Timers ===
    pub spawn_interval_ms: u64,
    pub difficulty_interval_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_gravity: PLAYER_GRAVITY,
            player_life: PLAYER_LIFE,
            jump_impulse: JUMP_IMPULSE,

            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED,
            enemy_life: ENEMY_LIFE,
            spawn_exclusion: SPAWN_EXCLUSION,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            difficulty_life_step: DIFFICULTY_LIFE_STEP,

            dagger_size: DAGGER_SIZE,
            dagger_speed: DAGGER_SPEED,
            dagger_damage: DAGGER_DAMAGE,

            bag_size: BAG_SIZE,
            bag_fall_speed: BAG_FALL_SPEED,
            bag_magnet_speed: BAG_MAGNET_SPEED,
            bag_drop_chance: BAG_DROP_CHANCE,

            goal_size: GOAL_SIZE,
            goal_inset: GOAL_INSET,

            upgrade_cost: UPGRADE_COST,
            enemy_slow_step: ENEMY_SLOW_STEP,
            gold_refund_max: GOLD_REFUND_MAX,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            difficulty_interval_ms: DIFFICULTY_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut tuning: Self = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would break the simulation
    pub fn sanitize(&mut self) {
        self.player_size = self.player_size.max(1.0);
        self.canvas_width = self.canvas_width.max(self.player_size);
        self.canvas_height = self.canvas_height.max(self.player_size);
        self.bag_drop_chance = self.bag_drop_chance.clamp(0.0, 1.0);
        self.max_spawn_attempts = self.max_spawn_attempts.max(1);
        self.enemy_life = self.enemy_life.max(1);
        // Negative damage would heal, a negative ramp would shrink enemies
        self.dagger_damage = self.dagger_damage.max(0);
        self.difficulty_life_step = self.difficulty_life_step.max(0);
        self.enemy_slow_step = self.enemy_slow_step.max(0.0);
        self.spawn_interval_ms = self.spawn_interval_ms.max(1);
        self.difficulty_interval_ms = self.difficulty_interval_ms.max(1);
    }

    #[inline]
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Where the player starts and respawns after a hit
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(
            self.canvas_width / 2.0,
            self.canvas_height - self.player_size,
        )
    }

    /// Top-left corner of the goal
    pub fn goal_pos(&self) -> Vec2 {
        Vec2::new(
            self.canvas_width - self.goal_inset,
            self.canvas_height - self.goal_inset,
        )
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ninja_rescue_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = crate::platform::web::local_storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored.map(|json| Self::from_json(&json)) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning from LocalStorage");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored tuning: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = crate::platform::web::local_storage() else {
            return;
        };
        if let Ok(json) = serde_json::to_string(self) {
            if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
