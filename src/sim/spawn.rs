//! Enemy and money bag spawning, plus the difficulty ramp

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState, Pickup};

/// True if `pos` is far enough from the player on at least one axis
pub fn outside_exclusion(state: &GameState, pos: Vec2) -> bool {
    let player = &state.player;
    let zone = player.size * state.tuning.spawn_exclusion;
    (pos.x - player.pos.x).abs() >= zone.x || (pos.y - player.pos.y).abs() >= zone.y
}

/// Canvas corner farthest from the player
fn fallback_position(state: &GameState, size: Vec2) -> Vec2 {
    let max = (state.tuning.canvas_size() - size).max(Vec2::ZERO);
    let player = state.player.pos;
    let x = if player.x > max.x - player.x { 0.0 } else { max.x };
    let y = if player.y > max.y - player.y { 0.0 } else { max.y };
    Vec2::new(x, y)
}

/// Pick a spawn point by rejection sampling, falling back to the far corner
/// once the attempt budget runs out
pub fn pick_spawn_position(state: &mut GameState, size: Vec2) -> Vec2 {
    let range = (state.tuning.canvas_size() - size).max(Vec2::ZERO);
    for _ in 0..state.tuning.max_spawn_attempts {
        let pos = Vec2::new(
            state.rng.random::<f32>() * range.x,
            state.rng.random::<f32>() * range.y,
        );
        if outside_exclusion(state, pos) {
            return pos;
        }
    }

    let pos = fallback_position(state, size);
    log::warn!(
        "No spawn point found in {} attempts, using corner {:?}",
        state.tuning.max_spawn_attempts,
        pos
    );
    pos
}

/// Spawn a fresh enemy away from the player. No-op once the run has ended.
pub fn spawn_enemy(state: &mut GameState) -> Option<u32> {
    if !state.is_running() {
        return None;
    }

    let size = Vec2::splat(state.tuning.enemy_size);
    let pos = pick_spawn_position(state, size);
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        size,
        speed: state.tuning.enemy_speed,
        life: state.tuning.enemy_life,
    });

    log::debug!("Enemy {} spawned at {:?}", id, pos);
    state.emit(GameEvent::EnemySpawned { id, pos });
    Some(id)
}

/// Toughen every live enemy. No-op once the run has ended.
pub fn escalate_difficulty(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    let step = state.tuning.difficulty_life_step;
    for enemy in &mut state.enemies {
        enemy.life = enemy.life.saturating_add(step);
    }
    log::debug!("Difficulty up: {} enemies gained {} life", state.enemies.len(), step);
}

/// Bag value: uniform in `[1, gold + 1]`, so richer players find fatter bags
pub fn roll_bag_value(state: &mut GameState) -> u32 {
    let gold = state.player.gold;
    state.rng.random_range(1..=gold.saturating_add(1))
}

/// Drop a money bag at `pos`
pub fn spawn_pickup(state: &mut GameState, pos: Vec2) -> u32 {
    let value = roll_bag_value(state);
    let id = state.next_entity_id();
    state.pickups.push(Pickup {
        id,
        pos,
        size: Vec2::splat(state.tuning.bag_size),
        fall_speed: state.tuning.bag_fall_speed,
        value,
        vel: Vec2::ZERO,
    });
    state.emit(GameEvent::PickupDropped { id, value });
    id
}
