//! Cancellable recurring tasks owned by the session
//!
//! The host event loop calls back into the session on its own schedule. Every
//! start hands out a `TaskHandle` stamped with a fresh generation, so a
//! callback scheduled during an earlier run cannot act on a later one.

use serde::{Deserialize, Serialize};

/// Which recurring callback a handle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Per-frame simulation step
    Frame,
    /// Fixed-period bubble spawn
    Spawn,
}

/// Token the host passes back when its callback fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    pub kind: TaskKind,
    pub generation: u32,
}

/// A recurring task that is either active under one generation or cancelled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledTask {
    kind: TaskKind,
    generation: u32,
    active: bool,
}

impl ScheduledTask {
    pub fn new(kind: TaskKind) -> Self {
        Self {
            kind,
            generation: 0,
            active: false,
        }
    }

    /// Start (or restart) the task. Any previously issued handle goes stale.
    pub fn start(&mut self) -> TaskHandle {
        self.generation = self.generation.wrapping_add(1);
        self.active = true;
        self.handle()
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current handle, if the task is running
    pub fn current(&self) -> Option<TaskHandle> {
        self.active.then(|| self.handle())
    }

    /// True only for a handle issued by the current, still active start
    pub fn accepts(&self, handle: TaskHandle) -> bool {
        self.active && handle.kind == self.kind && handle.generation == self.generation
    }

    fn handle(&self) -> TaskHandle {
        TaskHandle {
            kind: self.kind,
            generation: self.generation,
        }
    }
}

/// A scheduled task that fires once per `period_ms` of host time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interval {
    pub task: ScheduledTask,
    period_ms: f64,
    accumulated_ms: f64,
}

impl Interval {
    pub fn new(kind: TaskKind, period_ms: f64) -> Self {
        debug_assert!(
            period_ms.is_finite() && period_ms > 0.0,
            "interval period must be positive, got {period_ms}"
        );
        Self {
            task: ScheduledTask::new(kind),
            period_ms,
            accumulated_ms: 0.0,
        }
    }

    pub fn start(&mut self) -> TaskHandle {
        self.accumulated_ms = 0.0;
        self.task.start()
    }

    /// Cancel and drop any partially accumulated period
    pub fn cancel(&mut self) {
        self.task.cancel();
        self.accumulated_ms = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.task.is_active()
    }

    /// Accumulate host time and return how many periods elapsed.
    /// A cancelled interval, or a non-finite or non-positive `dt_ms`,
    /// accumulates nothing.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.task.is_active() || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.accumulated_ms += dt_ms;
        let mut fires = 0;
        while self.accumulated_ms >= self.period_ms {
            self.accumulated_ms -= self.period_ms;
            fires += 1;
        }
        fires
    }
}
