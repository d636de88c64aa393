//! Draw list for the render adapter
//!
//! Flattens a session into circles in paint order so the platform layer
//! never needs to know about entity types.

use glam::Vec2;

use crate::sim::{BubbleColor, Message, Session};

/// What a circle represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Falling,
    Stacked,
    Player,
}

/// One filled circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCircle {
    pub center: Vec2,
    pub radius: f32,
    pub color: BubbleColor,
    pub layer: Layer,
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    /// Back to front
    pub circles: Vec<DrawCircle>,
    pub message: Option<Message>,
}

/// Falling bubbles first, then the stack, then the player on top
pub fn draw_list(session: &Session) -> Vec<DrawCircle> {
    let falling = session.falling().iter().map(|b| DrawCircle {
        center: b.pos,
        radius: b.radius,
        color: b.color,
        layer: Layer::Falling,
    });
    let stacked = session.stacked().iter().map(|b| DrawCircle {
        center: b.pos,
        radius: b.radius,
        color: b.color,
        layer: Layer::Stacked,
    });
    let player = session.player();
    let player = std::iter::once(DrawCircle {
        center: player.pos,
        radius: player.radius,
        color: player.color,
        layer: Layer::Player,
    });

    falling.chain(stacked).chain(player).collect()
}

pub fn frame(session: &Session) -> Frame {
    let settings = session.settings();
    Frame {
        width: settings.canvas_width,
        height: settings.canvas_height,
        circles: draw_list(session),
        message: session.message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::FallingBubble;

    #[test]
    fn test_idle_frame_shows_player_and_prompt() {
        let session = Session::new(Settings::default(), 5);
        let f = frame(&session);
        assert_eq!(f.width, 800.0);
        assert_eq!(f.height, 600.0);
        assert_eq!(f.message, Some(Message::ClickToStart));
        assert_eq!(f.circles.len(), 1);
        assert_eq!(f.circles[0].layer, Layer::Player);
        assert_eq!(f.circles[0].center, Vec2::new(400.0, 560.0));
    }

    #[test]
    fn test_player_painted_last() {
        let mut session = Session::new(Settings::default(), 5);
        session.field.player.color = BubbleColor::Red;
        session.click();
        session.field.falling.push(FallingBubble {
            id: 1,
            pos: Vec2::new(400.0, 525.0),
            radius: 20.0,
            color: BubbleColor::Red,
        });
        session.field.falling.push(FallingBubble {
            id: 2,
            pos: Vec2::new(100.0, 50.0),
            radius: 20.0,
            color: BubbleColor::Blue,
        });
        session.tick();

        let layers: Vec<Layer> = draw_list(&session).iter().map(|c| c.layer).collect();
        assert_eq!(layers, vec![Layer::Falling, Layer::Stacked, Layer::Player]);
        assert_eq!(frame(&session).message, None);
    }
}
