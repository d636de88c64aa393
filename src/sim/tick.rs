//! Per-frame simulation step
//!
//! Advances every falling bubble, resolves player collisions by color and
//! prunes bubbles that have left through the top edge.

use log::debug;

use super::collision::is_colliding;
use super::state::{GameEvent, PlayField, StackedBubble};

/// Result of one step
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    pub events: Vec<GameEvent>,
    /// Set when a mismatched bubble hit the player. The caller owns the
    /// phase change; the field is left as it was at the moment of impact.
    pub mismatch: bool,
}

/// Advance the play field by one frame.
///
/// Bubbles are rebuilt into a retained list so removing one never skips or
/// revisits another. A mismatch stops processing immediately.
pub fn step(field: &mut PlayField, fall_speed: f32) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    let mut retained = Vec::with_capacity(field.falling.len());
    let mut pending = std::mem::take(&mut field.falling).into_iter();

    for mut bubble in pending.by_ref() {
        bubble.pos.y += fall_speed;

        if is_colliding(bubble.circle(), field.player.circle()) {
            if bubble.color == field.player.color {
                // Record where the player was, then climb one diameter
                let at = field.player.pos;
                field.stacked.push(StackedBubble {
                    id: bubble.id,
                    pos: at,
                    radius: bubble.radius,
                    color: bubble.color,
                });
                field.player.pos.y -= field.player.diameter();
                debug!(
                    "Stacked bubble {} ({} caught, player y -> {})",
                    bubble.id,
                    field.stacked.len(),
                    field.player.pos.y
                );
                outcome.events.push(GameEvent::Stacked { id: bubble.id, at });
                continue;
            }

            debug!(
                "Mismatch: bubble color {} vs player color {}",
                bubble.color.index(),
                field.player.color.index()
            );
            outcome.events.push(GameEvent::GameOver {
                bubble_color: bubble.color,
                player_color: field.player.color,
            });
            outcome.mismatch = true;
            retained.push(bubble);
            break;
        }

        // Only reachable if a bubble ever travels upward
        if bubble.above_top() {
            debug!("Pruned bubble {}", bubble.id);
            outcome.events.push(GameEvent::Pruned { id: bubble.id });
            continue;
        }

        retained.push(bubble);
    }

    retained.extend(pending);
    field.falling = retained;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::palette::BubbleColor;
    use crate::sim::state::FallingBubble;
    use glam::Vec2;

    fn field(color: BubbleColor) -> PlayField {
        PlayField::new(Vec2::new(400.0, 560.0), 20.0, color)
    }

    fn bubble(id: u32, x: f32, y: f32, color: BubbleColor) -> FallingBubble {
        FallingBubble {
            id,
            pos: Vec2::new(x, y),
            radius: 20.0,
            color,
        }
    }

    #[test]
    fn test_bubbles_fall_by_fall_speed() {
        let mut f = field(BubbleColor::Red);
        f.falling.push(bubble(1, 100.0, 0.0, BubbleColor::Blue));
        f.falling.push(bubble(2, 700.0, 50.0, BubbleColor::Red));

        let outcome = step(&mut f, 1.0);
        assert!(outcome.events.is_empty());
        assert!(!outcome.mismatch);
        assert_eq!(f.falling[0].pos.y, 1.0);
        assert_eq!(f.falling[1].pos.y, 51.0);
    }

    #[test]
    fn test_match_stacks_at_pre_move_position() {
        let mut f = field(BubbleColor::Green);
        // 40 above the player: touching now, overlapping after one step
        f.falling.push(bubble(3, 400.0, 520.0, BubbleColor::Green));

        let outcome = step(&mut f, 1.0);
        assert!(!outcome.mismatch);
        assert!(f.falling.is_empty());
        assert_eq!(f.stacked.len(), 1);
        assert_eq!(f.stacked[0].pos, Vec2::new(400.0, 560.0));
        assert_eq!(f.player.pos, Vec2::new(400.0, 520.0));
        assert_eq!(
            outcome.events,
            vec![GameEvent::Stacked {
                id: 3,
                at: Vec2::new(400.0, 560.0)
            }]
        );
    }

    #[test]
    fn test_mismatch_flags_and_stops() {
        let mut f = field(BubbleColor::Red);
        f.falling.push(bubble(1, 400.0, 530.0, BubbleColor::Blue));
        f.falling.push(bubble(2, 100.0, 10.0, BubbleColor::Red));

        let outcome = step(&mut f, 1.0);
        assert!(outcome.mismatch);
        assert_eq!(
            outcome.events,
            vec![GameEvent::GameOver {
                bubble_color: BubbleColor::Blue,
                player_color: BubbleColor::Red,
            }]
        );
        // Second bubble was not advanced
        assert_eq!(f.falling.len(), 2);
        assert_eq!(f.falling[1].pos.y, 10.0);
    }

    #[test]
    fn test_prune_above_top() {
        let mut f = field(BubbleColor::Red);
        f.falling.push(bubble(1, 100.0, -30.0, BubbleColor::Red));
        f.falling.push(bubble(2, 200.0, 0.0, BubbleColor::Red));

        // Negative speed drifts bubbles upward
        let outcome = step(&mut f, -1.0);
        assert_eq!(outcome.events, vec![GameEvent::Pruned { id: 1 }]);
        assert_eq!(f.falling.len(), 1);
        assert_eq!(f.falling[0].id, 2);
    }

    #[test]
    fn test_removal_does_not_skip_neighbours() {
        let mut f = field(BubbleColor::Yellow);
        f.falling.push(bubble(1, 400.0, 525.0, BubbleColor::Yellow));
        f.falling.push(bubble(2, 50.0, 100.0, BubbleColor::Blue));
        f.falling.push(bubble(3, 750.0, 200.0, BubbleColor::Green));

        step(&mut f, 1.0);
        let ids: Vec<u32> = f.falling.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(f.falling[0].pos.y, 101.0);
        assert_eq!(f.falling[1].pos.y, 201.0);
    }

    #[test]
    fn test_two_catches_in_one_step() {
        let mut f = field(BubbleColor::Magenta);
        f.falling.push(bubble(1, 400.0, 525.0, BubbleColor::Magenta));
        // Overlaps the player only after the first catch lifts it to y=520
        f.falling.push(bubble(2, 400.0, 485.0, BubbleColor::Magenta));

        step(&mut f, 1.0);
        assert_eq!(f.stacked.len(), 2);
        assert_eq!(f.stacked[0].pos.y, 560.0);
        assert_eq!(f.stacked[1].pos.y, 520.0);
        assert_eq!(f.player.pos.y, 480.0);
    }
}
