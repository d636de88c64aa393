//! Falling bubble creation

use glam::Vec2;
use rand::Rng;

use super::palette::BubbleColor;
use super::state::FallingBubble;

/// Create a bubble on the top edge at a uniformly random x in `[0, canvas_width)`
/// with a uniformly random palette color.
pub fn spawn_bubble(rng: &mut impl Rng, id: u32, canvas_width: f32, radius: f32) -> FallingBubble {
    let x = rng.random_range(0.0..canvas_width);
    FallingBubble {
        id,
        pos: Vec2::new(x, 0.0),
        radius,
        color: BubbleColor::random(rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_on_top_edge_within_width() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..200 {
            let bubble = spawn_bubble(&mut rng, id, 800.0, 20.0);
            assert_eq!(bubble.id, id);
            assert_eq!(bubble.pos.y, 0.0);
            assert!(bubble.pos.x >= 0.0 && bubble.pos.x < 800.0);
            assert_eq!(bubble.radius, 20.0);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for id in 0..10 {
            let x = spawn_bubble(&mut a, id, 800.0, 20.0);
            let y = spawn_bubble(&mut b, id, 800.0, 20.0);
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.color, y.color);
        }
    }
}
