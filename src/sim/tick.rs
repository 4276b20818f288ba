//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use rand::Rng;

use super::collision::{Body, pull_toward};
use super::spawn::spawn_pickup;
use super::state::{Enemy, GameEvent, GamePhase, GameState, Projectile};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump (held; only acts on the ground)
    pub jump: bool,
    /// Throw a dagger at this world position (one-shot)
    pub fire_at: Option<Vec2>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase.is_terminal() {
        return;
    }

    if let Some(target) = input.fire_at {
        fire(state, target);
    }

    state.time_ticks += 1;

    move_player(state, input);

    let target = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.chase(target);
    }

    resolve_enemy_contacts(state);
    if state.phase == GamePhase::GameOver {
        return;
    }

    update_projectiles(state);
    update_pickups(state);

    if state.player.overlaps(&state.goal) {
        state.phase = GamePhase::Won;
        state.emit(GameEvent::Won);
        log::info!("Princess rescued! Score {} in {} ticks", state.score, state.time_ticks);
    }
}

/// Throw a dagger from the player toward `target`. No-op once the run has
/// ended.
pub fn fire(state: &mut GameState, target: Vec2) -> Option<u32> {
    if !state.is_running() {
        return None;
    }

    let origin = state.player.pos;
    let delta = target - origin;
    let angle = delta.y.atan2(delta.x);
    let vel = Vec2::from_angle(angle) * state.tuning.dagger_speed;

    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: origin,
        size: Vec2::splat(state.tuning.dagger_size),
        vel,
        damage: state.tuning.dagger_damage,
    });
    Some(id)
}

/// Gravity, walking and jumping, kept inside the canvas
fn move_player(state: &mut GameState, input: &TickInput) {
    let canvas = state.tuning.canvas_size();
    let jump_impulse = state.tuning.jump_impulse;
    let player = &mut state.player;

    player.vel_y += player.gravity;

    if input.left {
        player.pos.x -= player.speed;
    }
    if input.right {
        player.pos.x += player.speed;
    }
    player.pos.x = player.pos.x.clamp(0.0, (canvas.x - player.size.x).max(0.0));

    if input.jump && player.on_ground(canvas.y) {
        player.vel_y = jump_impulse;
    }

    player.pos.y += player.vel_y;

    let ground = player.ground_y(canvas.y);
    if player.pos.y > ground {
        player.pos.y = ground;
        player.vel_y = 0.0;
    }
    // Ceiling
    if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.vel_y = player.vel_y.max(0.0);
    }
}

/// Each touching enemy costs a life and sends the player back to spawn
fn resolve_enemy_contacts(state: &mut GameState) {
    let spawn_point = state.tuning.spawn_point();

    for i in 0..state.enemies.len() {
        if !state.player.overlaps(&state.enemies[i]) {
            continue;
        }

        state.player.life = state.player.life.saturating_sub(1);
        state.emit(GameEvent::LifeChanged {
            life: state.player.life,
        });

        if state.player.life == 0 {
            state.phase = GamePhase::GameOver;
            state.emit(GameEvent::GameOver);
            log::info!("Game over! Score {} after {} ticks", state.score, state.time_ticks);
            return;
        }

        state.player.respawn(spawn_point);
    }
}

/// Move daggers, drop the ones that leave the canvas, and let each remaining
/// dagger strike the first enemy it touches
fn update_projectiles(state: &mut GameState) {
    let bounds = state.bounds();
    let mut daggers = std::mem::take(&mut state.projectiles);

    daggers.retain_mut(|dagger| {
        dagger.pos += dagger.vel;
        if !bounds.contains_point(dagger.pos) {
            return false;
        }

        let rect = dagger.rect();
        let Some(idx) = state.enemies.iter().position(|e| e.rect().overlaps(&rect)) else {
            return true;
        };

        state.enemies[idx].life = state.enemies[idx].life.saturating_sub(dagger.damage);
        if state.enemies[idx].is_dead() {
            let enemy = state.enemies.remove(idx);
            defeat_enemy(state, enemy);
        }
        false
    });

    state.projectiles = daggers;
}

/// Score the kill and maybe drop a money bag where the enemy fell
fn defeat_enemy(state: &mut GameState, enemy: Enemy) {
    state.score += 1;
    state.emit(GameEvent::EnemyKilled {
        id: enemy.id,
        pos: enemy.pos,
    });
    state.emit(GameEvent::ScoreChanged { score: state.score });

    if state.rng.random::<f64>() < state.tuning.bag_drop_chance {
        spawn_pickup(state, enemy.pos);
    }
}

/// Bags fall, get magnetized near the player, and pay out on contact
fn update_pickups(state: &mut GameState) {
    let canvas_height = state.tuning.canvas_height;
    let magnet_speed = state.tuning.bag_magnet_speed;
    let player_pos = state.player.pos;
    let player_rect = state.player.rect();
    let reach = state.player.size.x;

    let mut collected = Vec::new();
    state.pickups.retain_mut(|bag| {
        bag.pos.y = (bag.pos.y + bag.fall_speed).min(canvas_height - bag.size.y);

        if bag.pos.distance(player_pos) < reach {
            if let Some(vel) = pull_toward(bag.pos, player_pos, magnet_speed) {
                bag.vel = vel;
                bag.pos += vel;
            }
        }

        if bag.rect().overlaps(&player_rect) {
            collected.push((bag.id, bag.value));
            return false;
        }
        true
    });

    for (id, value) in collected {
        state.player.gold = state.player.gold.saturating_add(value);
        state.emit(GameEvent::PickupCollected { id, value });
        state.emit(GameEvent::GoldChanged {
            gold: state.player.gold,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Pickup;
    use proptest::prelude::*;

    /// A running state with no enemies on the field
    fn empty_field(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.enemies.clear();
        state.drain_events();
        state
    }

    fn add_enemy(state: &mut GameState, pos: Vec2, speed: f32, life: i32) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            size: Vec2::splat(50.0),
            speed,
            life,
        });
        id
    }

    fn add_dagger(state: &mut GameState, pos: Vec2, vel: Vec2, damage: i32) {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            size: Vec2::splat(20.0),
            vel,
            damage,
        });
    }

    #[test]
    fn test_idle_player_rests_on_ground() {
        let mut state = empty_field(1);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.pos, Vec2::new(480.0, 490.0));
        assert_eq!(state.player.vel_y, 0.0);
        assert_eq!(state.time_ticks, 10);
    }

    #[test]
    fn test_jump_arc() {
        let mut state = empty_field(1);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert_eq!(state.player.vel_y, -8.0);
        assert_eq!(state.player.pos.y, 482.0);

        // Holding jump mid-air does nothing
        tick(&mut state, &jump);
        assert!((state.player.vel_y + 7.8).abs() < 1e-5);

        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.pos.y, 490.0);
    }

    #[test]
    fn test_walk_is_clamped_to_canvas() {
        let mut state = empty_field(1);
        state.player.pos.x = 2.0;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left);
        assert_eq!(state.player.pos.x, 0.0);

        state.goal.pos = Vec2::new(-500.0, -500.0);
        state.player.pos.x = 908.0;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right);
        assert_eq!(state.player.pos.x, 910.0);
    }

    #[test]
    fn test_enemy_hit_costs_life_and_respawns() {
        let mut state = empty_field(2);
        state.player.pos = Vec2::new(100.0, 490.0);
        add_enemy(&mut state, Vec2::new(100.0, 490.0), 2.0, 1);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.life, 2);
        assert_eq!(state.player.pos, Vec2::new(480.0, 490.0));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.drain_events(), vec![GameEvent::LifeChanged { life: 2 }]);
    }

    #[test]
    fn test_game_over_triggers_once() {
        let mut state = empty_field(3);
        state.player.life = 1;
        let pos = state.player.pos;
        add_enemy(&mut state, pos, 0.0, 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.life, 0);
        let events = state.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::GameOver).count(), 1);

        let ticks = state.time_ticks;
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.life, 0);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_fire_velocity() {
        let mut state = empty_field(4);
        state.player.pos = Vec2::new(100.0, 100.0);
        fire(&mut state, Vec2::new(110.0, 100.0)).unwrap();
        let dagger = &state.projectiles[0];
        assert_eq!(dagger.vel, Vec2::new(10.0, 0.0));
        assert_eq!(dagger.pos, Vec2::new(100.0, 100.0));
        assert_eq!(dagger.damage, 1);

        fire(&mut state, Vec2::new(100.0, 50.0)).unwrap();
        let dagger = &state.projectiles[1];
        assert!(dagger.vel.x.abs() < 1e-5);
        assert!((dagger.vel.y + 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_fire_ignored_when_terminal() {
        let mut state = empty_field(4);
        state.phase = GamePhase::Won;
        assert!(fire(&mut state, Vec2::ZERO).is_none());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_fire_input_is_applied_in_tick() {
        let mut state = empty_field(4);
        let input = TickInput {
            fire_at: Some(Vec2::new(0.0, 490.0)),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(470.0, 490.0));
    }

    #[test]
    fn test_dagger_kills_enemy() {
        let mut state = empty_field(5);
        let id = add_enemy(&mut state, Vec2::new(300.0, 300.0), 0.0, 1);
        add_dagger(&mut state, Vec2::new(290.0, 300.0), Vec2::new(10.0, 0.0), 1);

        tick(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 1);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::EnemyKilled {
            id,
            pos: Vec2::new(300.0, 300.0)
        }));
        assert!(events.contains(&GameEvent::ScoreChanged { score: 1 }));
    }

    #[test]
    fn test_dagger_wounds_tough_enemy() {
        let mut state = empty_field(5);
        add_enemy(&mut state, Vec2::new(300.0, 300.0), 0.0, 3);
        add_dagger(&mut state, Vec2::new(290.0, 300.0), Vec2::new(10.0, 0.0), 1);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.enemies[0].life, 2);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_dagger_only_hits_first_enemy() {
        let mut state = empty_field(6);
        let first = add_enemy(&mut state, Vec2::new(300.0, 300.0), 0.0, 1);
        let second = add_enemy(&mut state, Vec2::new(310.0, 300.0), 0.0, 1);
        add_dagger(&mut state, Vec2::new(300.0, 300.0), Vec2::new(10.0, 0.0), 1);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, second);
        assert_ne!(state.enemies[0].id, first);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_off_canvas_dagger_removed() {
        let mut state = empty_field(7);
        add_dagger(&mut state, Vec2::new(955.0, 100.0), Vec2::new(10.0, 0.0), 1);
        add_dagger(&mut state, Vec2::new(100.0, 5.0), Vec2::new(0.0, -10.0), 1);
        add_dagger(&mut state, Vec2::new(100.0, 100.0), Vec2::new(10.0, 0.0), 1);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(110.0, 100.0));
    }

    #[test]
    fn test_kills_drop_bags_sometimes() {
        let mut drops = 0;
        for seed in 0..200 {
            let mut state = empty_field(seed);
            add_enemy(&mut state, Vec2::new(300.0, 300.0), 0.0, 1);
            add_dagger(&mut state, Vec2::new(300.0, 300.0), Vec2::ZERO, 1);
            tick(&mut state, &TickInput::default());
            if let Some(bag) = state.pickups.first() {
                assert_eq!(bag.value, 1, "no gold means one-coin bags");
                drops += 1;
            }
        }
        // 20% of 200 kills, with a generous margin
        assert!((15..=70).contains(&drops), "drops = {drops}");
    }

    #[test]
    fn test_bag_collected_on_contact() {
        let mut state = empty_field(8);
        state.player.gold = 3;
        let id = state.next_entity_id();
        let pos = state.player.pos;
        state.pickups.push(Pickup {
            id,
            pos,
            size: Vec2::splat(30.0),
            fall_speed: 0.1,
            value: 4,
            vel: Vec2::ZERO,
        });

        tick(&mut state, &TickInput::default());

        assert!(state.pickups.is_empty());
        assert_eq!(state.player.gold, 7);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PickupCollected { id, value: 4 }));
        assert!(events.contains(&GameEvent::GoldChanged { gold: 7 }));
    }

    #[test]
    fn test_bag_magnet_pull() {
        let mut state = empty_field(8);
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            pos: Vec2::new(480.0, 445.0),
            size: Vec2::splat(30.0),
            fall_speed: 0.1,
            value: 1,
            vel: Vec2::ZERO,
        });

        tick(&mut state, &TickInput::default());

        let bag = &state.pickups[0];
        assert!((bag.vel - Vec2::new(0.0, 5.0)).length() < 1e-4);
        assert!((bag.pos.y - 450.1).abs() < 1e-3);
    }

    #[test]
    fn test_distant_bag_falls_and_rests_on_ground() {
        let mut state = empty_field(8);
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            pos: Vec2::new(50.0, 509.95),
            size: Vec2::splat(30.0),
            fall_speed: 0.1,
            value: 1,
            vel: Vec2::ZERO,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.pickups[0].pos.y, 510.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.pickups[0].pos.y, 510.0);
        assert_eq!(state.pickups[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_walk_to_goal_wins() {
        let mut state = empty_field(9);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &right);
        }
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(
            state.drain_events().iter().filter(|e| **e == GameEvent::Won).count(),
            1
        );
        let x = state.player.pos.x;
        tick(&mut state, &right);
        assert_eq!(state.player.pos.x, x);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                fire_at: Some(Vec2::new(100.0, 100.0)),
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
            crate::sim::spawn::spawn_enemy(&mut state1);
            crate::sim::spawn::spawn_enemy(&mut state2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.drain_events(), state2.drain_events());
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            proptest::option::weighted(0.2, (0.0f32..960.0, 0.0f32..540.0)),
        )
            .prop_map(|(left, right, jump, fire)| TickInput {
                left,
                right,
                jump,
                fire_at: fire.map(|(x, y)| Vec2::new(x, y)),
            })
    }

    proptest! {
        #[test]
        fn prop_tick_invariants(seed in any::<u64>(), inputs in proptest::collection::vec(arb_input(), 1..300)) {
            let mut state = GameState::new(seed);
            for (i, input) in inputs.iter().enumerate() {
                if i % 30 == 0 {
                    crate::sim::spawn::spawn_enemy(&mut state);
                }
                tick(&mut state, input);

                let bounds = state.bounds();
                if state.phase == GamePhase::Running {
                    let p = &state.player;
                    prop_assert!(p.pos.x >= 0.0 && p.pos.x + p.size.x <= bounds.size.x);
                    prop_assert!(p.pos.y >= 0.0 && p.pos.y + p.size.y <= bounds.size.y);
                }
                prop_assert!(state.player.life <= state.player.max_life);
                prop_assert!(state.enemies.iter().all(|e| e.life > 0));
                prop_assert!(state.projectiles.iter().all(|d| bounds.contains_point(d.pos)));
            }
        }
    }
}
