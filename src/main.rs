//! Ninja Rescue entry point
//!
//! On the web the page script drives `platform::web::WebGame`. Natively this
//! runs a headless demo: a simple autopilot plays one run on a virtual clock
//! and the event stream goes to the log.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ninja_rescue::sim::{GameEvent, GamePhase, GameState, Scheduler, UpgradeKind, buy_upgrade};
    use ninja_rescue::{TICK_PERIOD, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ninja Rescue (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => load_tuning(&path),
        None => Tuning::default(),
    };

    let seed = 0x5EED;
    let mut state = GameState::with_tuning(seed, tuning);
    let mut scheduler = Scheduler::new(&state.tuning);
    let max_ticks = 60 * 60 * 2;

    for _ in 0..max_ticks {
        let mut input = autopilot(&state);
        scheduler.advance(&mut state, &mut input, TICK_PERIOD);

        if state.player.gold >= state.tuning.upgrade_cost {
            buy_upgrade(&mut state, UpgradeKind::Life);
        }

        for event in state.drain_events() {
            match event {
                GameEvent::EnemySpawned { .. } | GameEvent::PickupDropped { .. } => {
                    log::debug!("{:?}", event)
                }
                _ => log::info!("{:?}", event),
            }
        }

        if state.phase != GamePhase::Running {
            break;
        }
    }

    log::info!(
        "Run finished: {:?} after {} ticks, score {}, gold {}, life {}",
        state.phase,
        state.time_ticks,
        state.score,
        state.player.gold,
        state.player.life
    );
}

/// Walk toward the goal, hop when a skull closes in, and throw at the
/// nearest one every half second
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &ninja_rescue::sim::GameState) -> ninja_rescue::sim::TickInput {
    use ninja_rescue::sim::TickInput;

    let player = state.player.pos;
    let nearest = state
        .enemies
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos);

    let threatened = nearest.is_some_and(|pos| pos.distance(player) < 120.0);
    let throw = state.time_ticks % 30 == 0;

    TickInput {
        left: false,
        right: !threatened,
        jump: threatened,
        fire_at: nearest.filter(|_| throw),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> ninja_rescue::Tuning {
    use ninja_rescue::Tuning;

    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Bad tuning in {}: {}, using defaults", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Can't read {}: {}, using defaults", path, e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame, this is just to satisfy the compiler
}
