//! Bubble Stack - catch falling bubbles of your own color
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, collisions, session state)
//! - `scene`: Read-only draw list for whatever renders the session
//! - `settings`: Data-driven configuration

pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{BubbleColor, GameEvent, Session, SessionPhase};

/// Game configuration constants
pub mod consts {
    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Radius shared by the player and every bubble
    pub const BUBBLE_RADIUS: f32 = 20.0;

    /// Milliseconds between spawn ticks
    pub const SPAWN_PERIOD_MS: f64 = 1000.0;

    /// Horizontal distance per move input
    pub const PLAYER_STEP: f32 = 5.0;

    /// Downward distance per simulation tick
    pub const FALL_SPEED: f32 = 1.0;
}
