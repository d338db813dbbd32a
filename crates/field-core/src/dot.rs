use crate::color::DotColor;
use glam::Vec2;

/// One animated particle. Velocity is fixed for the dot's lifetime; there is
/// no acceleration.
#[derive(Clone, Debug)]
pub struct Dot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: DotColor,
}

impl Dot {
    /// Move one frame and reflect off the surface edges. The bounce test runs
    /// on the post-move position, so a dot can sit slightly outside the
    /// surface for one frame before the flipped velocity pulls it back.
    pub fn advance(&mut self, width: f32, height: f32) {
        self.position += self.velocity;
        if self.position.x <= 0.0 || self.position.x >= width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y <= 0.0 || self.position.y >= height {
            self.velocity.y = -self.velocity.y;
        }
    }
}
