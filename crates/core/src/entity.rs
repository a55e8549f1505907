//! Moving objects of a level: falling hazards and the player's avatar.

use crate::types::{Direction, Rect};

/// Playfield dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// A falling pumpkin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hazard {
    pub rect: Rect,
    /// Cells per frame, downwards.
    pub speed: f32,
}

impl Hazard {
    /// Spawn at the top of the playfield, horizontally centered on `center_x`
    /// and kept inside the playfield.
    pub fn spawn(center_x: f32, size: (f32, f32), speed: f32, field: Playfield) -> Self {
        let max_x = (field.width - size.0).max(0.0);
        let x = (center_x - size.0 / 2.0).clamp(0.0, max_x);
        Self {
            rect: Rect::new(x, 0.0, size.0, size.1),
            speed,
        }
    }

    pub fn advance(&mut self) {
        self.rect.y += self.speed;
    }

    /// Past the bottom edge; the hazard leaves the active set.
    pub fn is_gone(&self, field: Playfield) -> bool {
        self.rect.y > field.height
    }
}

/// The player-controlled avatar standing on the bottom row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    pub rect: Rect,
    /// Cells per frame, horizontally.
    pub speed: f32,
    direction: Direction,
    max_x: f32,
}

impl Avatar {
    pub fn new(size: (f32, f32), speed: f32, field: Playfield) -> Self {
        let max_x = (field.width - size.0).max(0.0);
        let x = (max_x / 2.0).floor();
        let y = (field.height - size.1).max(0.0);
        Self {
            rect: Rect::new(x, y, size.0, size.1),
            speed,
            direction: Direction::None,
            max_x,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steer(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Move one step in the current direction, clamp to the playfield, and
    /// drop the direction until the next key press.
    pub fn advance(&mut self) {
        let x = self.rect.x + self.direction.sign() * self.speed;
        self.rect.x = x.clamp(0.0, self.max_x);
        self.direction = Direction::None;
    }

    pub fn hits(&self, hazard: &Hazard) -> bool {
        self.rect.intersects(&hazard.rect)
    }
}
