//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod schedule;
pub mod shop;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Body, Rect};
pub use schedule::{Scheduler, Task};
pub use shop::{UpgradeKind, buy_upgrade};
pub use snapshot::{Snapshot, Sprite, SpriteKind};
pub use spawn::{escalate_difficulty, spawn_enemy};
pub use state::{Enemy, GameEvent, GamePhase, GameState, Goal, Pickup, Player, Projectile};
pub use tick::{TickInput, fire, tick};
