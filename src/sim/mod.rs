//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Host time enters only through `Session::advance`
//! - No rendering or platform dependencies

pub mod collision;
pub mod palette;
pub mod schedule;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Circle, is_colliding};
pub use palette::{BubbleColor, PALETTE};
pub use schedule::{Interval, ScheduledTask, TaskHandle, TaskKind};
pub use session::Session;
pub use spawner::spawn_bubble;
pub use state::{
    FallingBubble, GameEvent, Message, PlayField, Player, SessionPhase, StackedBubble,
};
pub use tick::{StepOutcome, step};
