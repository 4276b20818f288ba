//! Virtual-clock scheduler for the three fixed-period tasks
//!
//! The tick, enemy spawner and difficulty ramp each fire on their own period.
//! Nothing here reads the wall clock: callers feed elapsed frame time into
//! [`Scheduler::advance`], which makes the whole loop testable by stepping a
//! clock by hand.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::spawn::{escalate_difficulty, spawn_enemy};
use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::tuning::Tuning;
use crate::{MAX_FRAME_TIME, TICK_RATE};

/// The scheduled jobs, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    Tick,
    SpawnEnemy,
    Difficulty,
}

/// A task that fires `per_span` times every `span`, its n-th run due at
/// `n * span / per_span`. Keeping the period as a ratio lets 1/60 s ticks land
/// exactly on whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodicTask {
    pub task: Task,
    pub span: Duration,
    pub per_span: u32,
    /// Completed runs
    pub runs: u32,
}

impl PeriodicTask {
    /// Once every `period`
    pub fn new(task: Task, period: Duration) -> Self {
        Self::with_rate(task, period, 1)
    }

    /// `per_span` runs spread evenly over each `span`
    pub fn with_rate(task: Task, span: Duration, per_span: u32) -> Self {
        Self {
            task,
            span,
            per_span: per_span.max(1),
            runs: 0,
        }
    }

    /// Virtual time of the next run
    pub fn next_due(&self) -> Duration {
        self.span * (self.runs + 1) / self.per_span
    }
}

/// Drives a [`GameState`] through virtual time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler {
    /// Virtual time elapsed since start
    pub clock: Duration,
    pub tasks: [PeriodicTask; 3],
}

impl Scheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            clock: Duration::ZERO,
            tasks: [
                PeriodicTask::with_rate(Task::Tick, Duration::from_secs(1), TICK_RATE),
                PeriodicTask::new(
                    Task::SpawnEnemy,
                    Duration::from_millis(tuning.spawn_interval_ms.max(1)),
                ),
                PeriodicTask::new(
                    Task::Difficulty,
                    Duration::from_millis(tuning.difficulty_interval_ms.max(1)),
                ),
            ],
        }
    }

    /// Number of completed runs of `task`
    pub fn runs(&self, task: Task) -> u32 {
        self.tasks
            .iter()
            .find(|t| t.task == task)
            .map(|t| t.runs)
            .unwrap_or(0)
    }

    /// Advance virtual time by `dt` (clamped to [`MAX_FRAME_TIME`]) and run
    /// every task that falls due, earliest first. The one-shot fire request
    /// in `input` is cleared once a tick has consumed it.
    ///
    /// Returns the number of simulation ticks run.
    pub fn advance(&mut self, state: &mut GameState, input: &mut TickInput, dt: Duration) -> u32 {
        self.clock += dt.min(MAX_FRAME_TIME);

        let mut ticks = 0;
        while let Some(task) = self.pop_due() {
            match task {
                Task::Tick => {
                    tick(state, input);
                    input.fire_at = None;
                    ticks += 1;
                }
                Task::SpawnEnemy => {
                    spawn_enemy(state);
                }
                Task::Difficulty => escalate_difficulty(state),
            }
        }
        ticks
    }

    /// Claim the earliest task due at or before the clock, counting it as
    /// run. Equal due times resolve tick, then spawn, then difficulty.
    pub fn pop_due(&mut self) -> Option<Task> {
        let idx = self.next_due_task()?;
        self.tasks[idx].runs += 1;
        Some(self.tasks[idx].task)
    }

    /// Seconds-based convenience for frame loops
    pub fn advance_secs(&mut self, state: &mut GameState, input: &mut TickInput, dt: f64) -> u32 {
        let dt = if dt.is_finite() && dt > 0.0 {
            Duration::from_secs_f64(dt.min(MAX_FRAME_TIME.as_secs_f64()))
        } else {
            Duration::ZERO
        };
        self.advance(state, input, dt)
    }

    /// Index of the earliest task due at or before the current clock
    fn next_due_task(&self) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.next_due() <= self.clock)
            .min_by_key(|(i, t)| (t.next_due(), *i))
            .map(|(i, _)| i)
    }
}
