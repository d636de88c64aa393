//! Session state machine
//!
//! One `Session` owns the play field, the RNG and both recurring tasks.
//! The host drives it through `click`, `advance` (or `run_task`) and the
//! move operations, then reads entities back for rendering.
//!
//! ```text
//! Idle --click--> Running --mismatch--> GameOver --click--> Idle
//! ```
//!
//! The restart click only re-arms the start flow; a second click is needed
//! to play again.

use glam::Vec2;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::palette::BubbleColor;
use super::schedule::{Interval, ScheduledTask, TaskHandle, TaskKind};
use super::spawner::spawn_bubble;
use super::state::{
    FallingBubble, GameEvent, Message, PlayField, Player, SessionPhase, StackedBubble,
};
use super::tick::step;
use crate::settings::Settings;

/// A complete play session
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    phase: SessionPhase,
    message: Option<Message>,
    /// Persistent listener: a click while not Running starts play
    start_armed: bool,
    /// One-shot listener armed on game over
    restart_armed: bool,
    /// Player and bubbles
    pub field: PlayField,
    frame: ScheduledTask,
    spawner: Interval,
    rng: Pcg32,
    next_id: u32,
}

impl Session {
    /// Create a session in Idle with the start listener armed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.validated();
        let home = Vec2::new(
            settings.canvas_width / 2.0,
            settings.canvas_height - settings.bubble_radius * 2.0,
        );
        let mut rng = Pcg32::seed_from_u64(seed);
        let color = BubbleColor::random(&mut rng);

        info!("Session created with seed {} (player color {})", seed, color.index());

        Self {
            field: PlayField::new(home, settings.bubble_radius, color),
            spawner: Interval::new(TaskKind::Spawn, settings.spawn_period_ms),
            frame: ScheduledTask::new(TaskKind::Frame),
            settings,
            phase: SessionPhase::Idle,
            message: Some(Message::ClickToStart),
            start_armed: true,
            restart_armed: false,
            rng,
            next_id: 1,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Message to show over the canvas, if any
    pub fn message(&self) -> Option<Message> {
        self.message
    }

    pub fn player(&self) -> &Player {
        &self.field.player
    }

    pub fn falling(&self) -> &[FallingBubble] {
        &self.field.falling
    }

    pub fn stacked(&self) -> &[StackedBubble] {
        &self.field.stacked
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Handle for the host's frame callback while Running
    pub fn frame_handle(&self) -> Option<TaskHandle> {
        self.frame.current()
    }

    /// Handle for the host's spawn timer while Running
    pub fn spawn_handle(&self) -> Option<TaskHandle> {
        self.spawner.task.current()
    }

    /// Pointer click on the canvas.
    ///
    /// The one-shot restart listener takes precedence; otherwise the start
    /// listener begins play if the session is not already Running.
    pub fn click(&mut self) -> Vec<GameEvent> {
        if self.restart_armed {
            self.restart_armed = false;
            self.enter_idle();
            return vec![GameEvent::Armed];
        }

        if self.start_armed && !self.is_running() {
            self.enter_running();
            return vec![GameEvent::Started {
                player_color: self.field.player.color,
            }];
        }

        Vec::new()
    }

    /// One simulation frame. Does nothing unless Running.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let outcome = step(&mut self.field, self.settings.fall_speed);
        if outcome.mismatch {
            self.enter_game_over();
        }
        outcome.events
    }

    /// Spawn one falling bubble. Does nothing unless Running.
    pub fn spawn_tick(&mut self) -> Option<GameEvent> {
        if !self.is_running() {
            return None;
        }

        let id = self.next_entity_id();
        let bubble = spawn_bubble(
            &mut self.rng,
            id,
            self.settings.canvas_width,
            self.settings.bubble_radius,
        );
        debug!(
            "Spawned bubble {} color {} (player color {})",
            id,
            bubble.color.index(),
            self.field.player.color.index()
        );
        let event = GameEvent::Spawned {
            id,
            color: bubble.color,
        };
        self.field.falling.push(bubble);
        Some(event)
    }

    /// Move left by one step, clamped to the canvas. Returns the distance moved.
    pub fn move_left(&mut self) -> f32 {
        self.shift(-self.settings.player_step)
    }

    /// Move right by one step, clamped to the canvas. Returns the distance moved.
    pub fn move_right(&mut self) -> f32 {
        self.shift(self.settings.player_step)
    }

    /// Keyboard input by DOM key name. Returns true for keys the game owns,
    /// whether or not they moved the player, so the host can suppress the
    /// browser's default scrolling.
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" => {
                self.move_left();
                true
            }
            "ArrowRight" => {
                self.move_right();
                true
            }
            _ => false,
        }
    }

    fn shift(&mut self, dx: f32) -> f32 {
        if !self.is_running() {
            return 0.0;
        }
        self.field.shift_player(dx, self.settings.canvas_width)
    }

    /// Per-frame host entry point: fire any spawns that came due during
    /// `dt_ms`, then run one simulation frame.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let due = self.spawner.advance(dt_ms);
        for _ in 0..due {
            match self.spawn_tick() {
                Some(event) => events.push(event),
                None => break,
            }
        }
        if self.frame.is_active() {
            events.extend(self.tick());
        }
        events
    }

    /// Dispatch a host-scheduled callback. Handles from a cancelled or
    /// earlier run are ignored.
    pub fn run_task(&mut self, handle: TaskHandle) -> Vec<GameEvent> {
        match handle.kind {
            TaskKind::Frame if self.frame.accepts(handle) => self.tick(),
            TaskKind::Spawn if self.spawner.task.accepts(handle) => {
                self.spawn_tick().into_iter().collect()
            }
            _ => {
                debug!("Ignoring stale {:?} callback", handle);
                Vec::new()
            }
        }
    }

    fn enter_idle(&mut self) {
        self.field.reset();
        self.field.player.color = BubbleColor::random(&mut self.rng);
        self.phase = SessionPhase::Idle;
        self.message = Some(Message::ClickToStart);
        self.start_armed = true;
        info!("Idle (player color {})", self.field.player.color.index());
    }

    fn enter_running(&mut self) {
        self.phase = SessionPhase::Running;
        self.message = None;
        self.frame.start();
        self.spawner.start();
        info!("Running");
    }

    fn enter_game_over(&mut self) {
        self.frame.cancel();
        self.spawner.cancel();
        let caught = self.field.stacked.len();
        self.field.reset();
        self.phase = SessionPhase::GameOver;
        self.message = Some(Message::GameOver);
        self.start_armed = false;
        self.restart_armed = true;
        info!("Game over after {} catches", caught);
    }
}
