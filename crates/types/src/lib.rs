//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (stage logic, terminal rendering, input mapping).
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed frame interval (20 Hz) |
//! | `COUNTDOWN_INTERVAL_MS` | 1000 | Preparation countdown step |
//!
//! # Examples
//!
//! ```
//! use tui_squash_types::{Key, InputEvent, Rect, Transition};
//!
//! let event = InputEvent::KeyDown(Key::Enter);
//! assert!(event.is_key_down());
//!
//! let a = Rect::new(0.0, 0.0, 2.0, 2.0);
//! let b = Rect::new(1.0, 1.0, 2.0, 2.0);
//! assert!(a.intersects(&b));
//!
//! assert_eq!(Transition::NextLevel.as_str(), "nextLevel");
//! ```

/// Fixed frame interval in milliseconds (50ms = 20 Hz)
pub const TICK_MS: u32 = 50;

/// Interval of the preparation countdown timer (one step per second)
pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;

/// Keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Space,
    Left,
    Right,
    Char(char),
    Other,
}

/// Timers a stage can arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Preparation countdown (one tick per second).
    Countdown,
    /// Hazard spawn interval inside a level.
    Spawn,
}

impl TimerId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerId::Countdown => "countdown",
            TimerId::Spawn => "spawn",
        }
    }
}

/// Typed input events, delivered in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    MouseButtonDown,
    TimerTick(TimerId),
}

impl InputEvent {
    pub fn is_key_down(&self) -> bool {
        matches!(self, InputEvent::KeyDown(_))
    }

    /// Events that dismiss a cleared/failed level or the end screen.
    ///
    /// Enter counts as a click since not every terminal reports mouse buttons.
    pub fn is_click(&self) -> bool {
        matches!(
            self,
            InputEvent::MouseButtonDown | InputEvent::KeyDown(Key::Enter)
        )
    }
}

/// Transition codes emitted by a stage's input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Quit,
    StartGame,
    Prepared,
    Pause,
    Resume,
    NextLevel,
    Restart,
    Reset,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Quit => "quit",
            Transition::StartGame => "startGame",
            Transition::Prepared => "prepared",
            Transition::Pause => "pause",
            Transition::Resume => "resume",
            Transition::NextLevel => "nextLevel",
            Transition::Restart => "restart",
            Transition::Reset => "reset",
        }
    }
}

/// Horizontal movement direction of the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Sign applied to the avatar speed
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
            Direction::None => 0.0,
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle in playfield cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Overlap test; rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_rate_is_twenty_hz() {
        assert_eq!(1000 / TICK_MS, 20);
        assert_eq!(COUNTDOWN_INTERVAL_MS, 1000);
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 4.0, 2.0);
        assert!(a.intersects(&Rect::new(3.5, 1.5, 1.0, 1.0)));
        assert!(a.intersects(&Rect::new(1.0, 0.5, 1.0, 1.0)));
        assert!(!a.intersects(&Rect::new(4.0, 0.0, 1.0, 1.0)));
        assert!(!a.intersects(&Rect::new(0.0, 2.0, 4.0, 1.0)));
        assert!(!a.intersects(&Rect::new(-5.0, -5.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rect_geometry() {
        let r = Rect::new(2.0, 4.0, 6.0, 2.0);
        assert_eq!(r.right(), 8.0);
        assert_eq!(r.bottom(), 6.0);
        assert_eq!(r.center_x(), 5.0);
        assert_eq!(r.center_y(), 5.0);
    }

    #[test]
    fn test_transition_log_names() {
        assert_eq!(Transition::StartGame.as_str(), "startGame");
        assert_eq!(Transition::NextLevel.as_str(), "nextLevel");
        assert_eq!(Transition::Quit.as_str(), "quit");
    }

    #[test]
    fn test_click_events() {
        assert!(InputEvent::MouseButtonDown.is_click());
        assert!(InputEvent::KeyDown(Key::Enter).is_click());
        assert!(!InputEvent::KeyDown(Key::Space).is_click());
        assert!(!InputEvent::TimerTick(TimerId::Spawn).is_click());
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Left.sign(), -1.0);
        assert_eq!(Direction::Right.sign(), 1.0);
        assert_eq!(Direction::None.sign(), 0.0);
        assert_eq!(Direction::default(), Direction::None);
    }
}
