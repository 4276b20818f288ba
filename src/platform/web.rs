//! Browser binding
//!
//! The page script owns the canvas, the DOM panels and requestAnimationFrame.
//! It forwards key and pointer events here, calls `frame` once per animation
//! frame, applies the returned events to the HUD, and draws `snapshot`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::highscores::HighScores;
use crate::platform::InputState;
use crate::sim::{GameEvent, GameState, Scheduler, Snapshot, UpgradeKind, buy_upgrade};
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    scheduler: Scheduler,
    input: InputState,
    high_scores: HighScores,
    /// Time of the previous frame (ms), 0 before the first frame
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        console_error_panic_hook::set_once();
        // A second instance finds the logger already installed
        let _ = console_log::init_with_level(log::Level::Info);

        let seed = js_sys::Date::now() as u64;
        let tuning = Tuning::load();
        let scheduler = Scheduler::new(&tuning);
        let high_scores = HighScores::load();
        log::info!("Ninja Rescue starting with seed: {}", seed);
        if let Some(best) = high_scores.top_score() {
            log::info!("Best run so far: {} enemies", best);
        }

        WebGame {
            state: GameState::with_tuning(seed, tuning),
            scheduler,
            input: InputState::new(),
            high_scores,
            last_time: 0.0,
        }
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key, self.state.player.pos);
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer_move(Vec2::new(x, y));
    }

    /// Click at world coordinates
    pub fn click(&mut self, x: f32, y: f32) {
        self.input.click(Vec2::new(x, y));
    }

    /// Drop held keys (window blur)
    pub fn blur(&mut self) {
        self.input.release_all();
    }

    /// Advance to `time` (ms, from requestAnimationFrame). Returns the
    /// frame's events as a JSON array.
    pub fn frame(&mut self, time: f64) -> String {
        let dt = if self.last_time > 0.0 {
            (time - self.last_time) / 1000.0
        } else {
            0.0
        };
        self.last_time = time;

        self.scheduler
            .advance_secs(&mut self.state, &mut self.input.current, dt);

        let events = self.state.drain_events();
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver | GameEvent::Won))
        {
            let first = self.high_scores.is_empty();
            if let Some(rank) = self.high_scores.record(&self.state, js_sys::Date::now()) {
                if first {
                    log::info!("First run on the leaderboard");
                } else {
                    log::info!("New high score, rank {}", rank);
                }
                self.high_scores.save();
            }
        }

        events_json(&events)
    }

    /// Current world as JSON for the renderer
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&Snapshot::capture(&self.state)).unwrap_or_default()
    }

    /// Shop entry point; returns whether the purchase went through. Events
    /// it raises are delivered with the next frame.
    pub fn buy(&mut self, kind: &str) -> bool {
        match UpgradeKind::parse(kind) {
            Some(kind) => buy_upgrade(&mut self.state, kind),
            None => {
                log::warn!("Unknown upgrade: {}", kind);
                false
            }
        }
    }

    pub fn restart(&mut self) {
        // Timers keep their phase across restarts
        self.state.restart();
        self.input.release_all();
    }

    #[wasm_bindgen(js_name = highScores)]
    pub fn high_scores(&self) -> String {
        serde_json::to_string(&self.high_scores).unwrap_or_default()
    }

    /// Best score on the leaderboard, for the HUD
    #[wasm_bindgen(js_name = bestScore)]
    pub fn best_score(&self) -> Option<u32> {
        self.high_scores
            .top_score()
            .map(|s| u32::try_from(s).unwrap_or(u32::MAX))
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

/// The page's LocalStorage, if the browser allows it
pub(crate) fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn events_json(events: &[GameEvent]) -> String {
    match serde_json::to_string(events) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to encode events: {}", e);
            "[]".to_string()
        }
    }
}
