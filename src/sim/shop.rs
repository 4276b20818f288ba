//! Gold-for-upgrades shop
//!
//! Dagger and slow upgrades only touch what is on the field at purchase time;
//! daggers thrown later and enemies spawned later use the base tuning.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

/// Upgrades for sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKind {
    /// +1 max and current life
    Life,
    /// +1 movement speed
    Speed,
    /// +1 damage on daggers currently in flight
    Dagger,
    /// Slow every live enemy
    EnemySlow,
    /// Gamble for a small gold refund
    Gold,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::Life,
        UpgradeKind::Speed,
        UpgradeKind::Dagger,
        UpgradeKind::EnemySlow,
        UpgradeKind::Gold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Life => "life",
            UpgradeKind::Speed => "speed",
            UpgradeKind::Dagger => "dagger",
            UpgradeKind::EnemySlow => "enemySlow",
            UpgradeKind::Gold => "gold",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "life" => Some(UpgradeKind::Life),
            "speed" => Some(UpgradeKind::Speed),
            "dagger" => Some(UpgradeKind::Dagger),
            "enemySlow" | "enemy_slow" => Some(UpgradeKind::EnemySlow),
            "gold" => Some(UpgradeKind::Gold),
            _ => None,
        }
    }
}

/// Buy an upgrade. Returns false (and changes nothing) if the player can't
/// afford it.
pub fn buy_upgrade(state: &mut GameState, kind: UpgradeKind) -> bool {
    let cost = state.tuning.upgrade_cost;
    if state.player.gold < cost {
        log::debug!(
            "Can't afford {} ({} < {})",
            kind.as_str(),
            state.player.gold,
            cost
        );
        return false;
    }
    state.player.gold -= cost;

    match kind {
        UpgradeKind::Life => {
            state.player.max_life += 1;
            state.player.life += 1;
            state.emit(GameEvent::LifeChanged {
                life: state.player.life,
            });
        }
        UpgradeKind::Speed => {
            state.player.speed += 1.0;
        }
        UpgradeKind::Dagger => {
            for dagger in &mut state.projectiles {
                dagger.damage = dagger.damage.saturating_add(1);
            }
        }
        UpgradeKind::EnemySlow => {
            let step = state.tuning.enemy_slow_step;
            for enemy in &mut state.enemies {
                enemy.speed = (enemy.speed - step).max(0.0);
            }
        }
        UpgradeKind::Gold => {
            let max = state.tuning.gold_refund_max.max(1);
            let refund = state.rng.random_range(1..=max);
            state.player.gold += refund;
        }
    }

    state.emit(GameEvent::GoldChanged {
        gold: state.player.gold,
    });
    log::debug!("Bought {} ({} gold left)", kind.as_str(), state.player.gold);
    true
}
