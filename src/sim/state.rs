//! Session phases and entity types
//!
//! Plain data. Rules that mutate these live in `tick` and `session`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use super::palette::BubbleColor;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the start click
    Idle,
    /// Simulation and spawner active
    Running,
    /// Mismatch caught; waiting for the restart click
    GameOver,
}

/// Text the adapter should show over the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    ClickToStart,
    GameOver,
}

impl Message {
    pub fn text(self) -> &'static str {
        match self {
            Message::ClickToStart => "Click to start",
            Message::GameOver => "Game Over!",
        }
    }
}

/// The player bubble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Fixed for the whole run once the session leaves Idle
    pub color: BubbleColor,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, color: BubbleColor) -> Self {
        Self { pos, radius, color }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }
}

/// A bubble dropping from the top edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingBubble {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: BubbleColor,
}

impl FallingBubble {
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Top edge has left the canvas
    pub fn above_top(&self) -> bool {
        self.pos.y + self.radius < 0.0
    }
}

/// A caught bubble, rigidly attached to the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackedBubble {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: BubbleColor,
}

/// Things that happened during an operation, for the adapter to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Idle -> Running
    Started { player_color: BubbleColor },
    Spawned { id: u32, color: BubbleColor },
    /// Color match; `at` is where the player stood before climbing
    Stacked { id: u32, at: Vec2 },
    Pruned { id: u32 },
    /// Color mismatch; Running -> GameOver
    GameOver {
        bubble_color: BubbleColor,
        player_color: BubbleColor,
    },
    /// Restart click re-armed the start listener (GameOver -> Idle)
    Armed,
}

/// Everything the simulation step reads and writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayField {
    pub player: Player,
    /// Falling bubbles in spawn order
    pub falling: Vec<FallingBubble>,
    /// Caught bubbles in catch order
    pub stacked: Vec<StackedBubble>,
    /// Player position on Idle entry
    pub home: Vec2,
}

impl PlayField {
    pub fn new(home: Vec2, radius: f32, color: BubbleColor) -> Self {
        Self {
            player: Player::new(home, radius, color),
            falling: Vec::new(),
            stacked: Vec::new(),
            home,
        }
    }

    /// Drop every bubble and send the player home
    pub fn reset(&mut self) {
        self.falling.clear();
        self.stacked.clear();
        self.player.pos = self.home;
    }

    /// True when nothing is in play and the player is home
    pub fn is_clear(&self) -> bool {
        self.falling.is_empty() && self.stacked.is_empty() && self.player.pos == self.home
    }

    /// Move the player and every stacked bubble by the same horizontal delta,
    /// keeping the player within `[radius, width - radius]`.
    ///
    /// Returns the delta actually applied.
    pub fn shift_player(&mut self, dx: f32, canvas_width: f32) -> f32 {
        let radius = self.player.radius;
        let x = self.player.pos.x;
        let target = (x + dx).clamp(radius, canvas_width - radius);
        let applied = target - x;
        if applied != 0.0 {
            self.player.pos.x = target;
            for bubble in &mut self.stacked {
                bubble.pos.x += applied;
            }
        }
        applied
    }
}
