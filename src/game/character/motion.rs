// Character position, velocity and facing

use glam::Vec2;

use super::state::{Axis, Direction};
use crate::core::math::clamp_center;

/// Walking speed in pixels per tick
pub const WALK_SPEED: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    /// Center of the character in canvas pixels
    pub center: Vec2,
    /// Pixels per tick
    pub velocity: Vec2,
    pub facing_right: bool,
}

impl MotionState {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            velocity: Vec2::ZERO,
            facing_right: true,
        }
    }

    /// Start moving along `direction`'s axis
    ///
    /// Axes are independent, so holding two perpendicular keys moves diagonally
    /// at `speed * sqrt(2)`.
    pub fn push(&mut self, direction: Direction, speed: f32) {
        let value = direction.sign() * speed;
        match direction.axis() {
            Axis::Horizontal => self.velocity.x = value,
            Axis::Vertical => self.velocity.y = value,
        }
        if let Some(facing_right) = direction.facing_right() {
            self.facing_right = facing_right;
        }
    }

    /// Stop the axis `direction` belongs to
    pub fn release(&mut self, direction: Direction) {
        match direction.axis() {
            Axis::Horizontal => self.velocity.x = 0.0,
            Axis::Vertical => self.velocity.y = 0.0,
        }
    }

    /// Move by one tick of velocity
    pub fn step(&mut self) {
        self.center += self.velocity;
    }

    /// Pin the frame box inside the canvas; velocity is left alone
    pub fn clamp_to(&mut self, frame_size: Vec2, canvas: Vec2) {
        self.center = clamp_center(self.center, frame_size, canvas);
    }
}
