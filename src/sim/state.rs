//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`], which is passed
//! explicitly to the tick, the spawner and the shop.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Out of lives (terminal until restart)
    GameOver,
    /// Player reached the goal (terminal until restart)
    Won,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// One-way notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    LifeChanged { life: u32 },
    ScoreChanged { score: u64 },
    GoldChanged { gold: u32 },
    EnemySpawned { id: u32, pos: Vec2 },
    EnemyKilled { id: u32, pos: Vec2 },
    PickupDropped { id: u32, value: u32 },
    PickupCollected { id: u32, value: u32 },
    GameOver,
    Won,
    Restarted,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal pixels per tick
    pub speed: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    pub vel_y: f32,
    pub life: u32,
    pub max_life: u32,
    pub gold: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.spawn_point(),
            size: Vec2::splat(tuning.player_size),
            speed: tuning.player_speed,
            gravity: tuning.player_gravity,
            vel_y: 0.0,
            life: tuning.player_life,
            max_life: tuning.player_life,
            gold: 0,
        }
    }

    /// Y coordinate of the player's top edge when standing on the ground
    #[inline]
    pub fn ground_y(&self, canvas_height: f32) -> f32 {
        canvas_height - self.size.y
    }

    #[inline]
    pub fn on_ground(&self, canvas_height: f32) -> bool {
        self.pos.y >= self.ground_y(canvas_height)
    }

    /// Move back to the spawn point after taking a hit
    pub fn respawn(&mut self, spawn_point: Vec2) {
        self.pos = spawn_point;
        self.vel_y = 0.0;
    }
}

impl Body for Player {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A chasing skull
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub life: i32,
}

impl Enemy {
    /// Step toward `target` along each axis independently
    pub fn chase(&mut self, target: Vec2) {
        self.pos.x += if self.pos.x < target.x { self.speed } else { -self.speed };
        self.pos.y += if self.pos.y < target.y { self.speed } else { -self.speed };
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }
}

impl Body for Enemy {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A thrown dagger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub damage: i32,
}

impl Body for Projectile {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A money bag dropped by a defeated enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels fallen per tick
    pub fall_speed: f32,
    pub value: u32,
    /// Magnet velocity from the last pull toward the player
    pub vel: Vec2,
}

impl Body for Pickup {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The static win trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Goal {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.goal_pos(),
            size: Vec2::splat(tuning.goal_size),
        }
    }
}

impl Body for Goal {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance knobs this run was started with
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Enemies defeated this run
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// In-flight daggers (fire order)
    pub projectiles: Vec<Projectile>,
    /// Uncollected money bags (drop order)
    pub pickups: Vec<Pickup>,
    pub goal: Goal,
    /// Notifications not yet drained by the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state; one enemy is on the field from the start
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            time_ticks: 0,
            player: Player::new(&tuning),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            goal: Goal::new(&tuning),
            events: Vec::new(),
            next_id: 1,
            tuning,
        };

        super::spawn::spawn_enemy(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Canvas rectangle in world space
    pub fn bounds(&self) -> Rect {
        Rect::new(Vec2::ZERO, self.tuning.canvas_size())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset the run: default player, empty field, one fresh enemy
    pub fn restart(&mut self) {
        self.player = Player::new(&self.tuning);
        self.goal = Goal::new(&self.tuning);
        self.score = 0;
        self.enemies.clear();
        self.projectiles.clear();
        self.pickups.clear();
        self.phase = GamePhase::Running;

        self.emit(GameEvent::Restarted);
        self.emit(GameEvent::LifeChanged {
            life: self.player.life,
        });
        self.emit(GameEvent::ScoreChanged { score: 0 });
        self.emit(GameEvent::GoldChanged { gold: 0 });

        super::spawn::spawn_enemy(self);
        log::info!("Game restarted (seed {})", self.seed);
    }
}
