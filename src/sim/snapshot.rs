//! Render-facing view of the world
//!
//! The renderer owns glyphs and canvas clearing; it only gets boxes and kinds.

use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect};
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteKind {
    Player,
    Enemy,
    Goal,
    Dagger,
    Bag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Sprite {
    fn new(kind: SpriteKind, rect: Rect) -> Self {
        Self {
            kind,
            x: rect.pos.x,
            y: rect.pos.y,
            w: rect.size.x,
            h: rect.size.y,
        }
    }
}

/// Everything needed to draw one frame and refresh the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub life: u32,
    pub score: u64,
    pub gold: u32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Back-to-front draw order
    pub sprites: Vec<Sprite>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut sprites = Vec::with_capacity(
            2 + state.enemies.len() + state.projectiles.len() + state.pickups.len(),
        );
        sprites.push(Sprite::new(SpriteKind::Player, state.player.rect()));
        sprites.extend(
            state
                .enemies
                .iter()
                .map(|e| Sprite::new(SpriteKind::Enemy, e.rect())),
        );
        sprites.push(Sprite::new(SpriteKind::Goal, state.goal.rect()));
        sprites.extend(
            state
                .projectiles
                .iter()
                .map(|d| Sprite::new(SpriteKind::Dagger, d.rect())),
        );
        sprites.extend(
            state
                .pickups
                .iter()
                .map(|b| Sprite::new(SpriteKind::Bag, b.rect())),
        );

        Self {
            phase: state.phase,
            life: state.player.life,
            score: state.score,
            gold: state.player.gold,
            canvas_width: state.tuning.canvas_width,
            canvas_height: state.tuning.canvas_height,
            sprites,
        }
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_capture_fresh_game() {
        let state = GameState::new(1);
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.life, 3);
        assert_eq!(snap.count(SpriteKind::Player), 1);
        assert_eq!(snap.count(SpriteKind::Enemy), 1);
        assert_eq!(snap.count(SpriteKind::Goal), 1);
        assert_eq!(snap.count(SpriteKind::Dagger), 0);
        assert_eq!(snap.sprites[0].x, 480.0);
        assert_eq!(snap.sprites[0].y, 490.0);
    }

    #[test]
    fn test_capture_includes_daggers() {
        let mut state = GameState::new(1);
        crate::sim::tick::fire(&mut state, Vec2::new(0.0, 0.0));
        let snap = Snapshot::capture(&state);
        let dagger = snap
            .sprites
            .iter()
            .find(|s| s.kind == SpriteKind::Dagger)
            .unwrap();
        assert_eq!((dagger.w, dagger.h), (20.0, 20.0));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = GameState::new(1);
        let json = serde_json::to_value(Snapshot::capture(&state)).unwrap();
        assert_eq!(json["phase"], "Running");
        assert_eq!(json["sprites"][0]["kind"], "player");
    }
}
