// Math utilities and helper functions

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D float vector used for positions, velocities and movement intents
pub type Vector2 = Vec2;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Normalize a vector, returning the zero vector when its length is zero
pub fn normalize_or_zero(v: Vector2) -> Vector2 {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        v / length
    } else {
        Vector2::ZERO
    }
}

/// Horizontal mirror flag of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing for a horizontal direction; `None` when the direction is zero
    pub fn from_direction(dx: f32) -> Option<Self> {
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle. `x`/`y` is the minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vector2 {
        Vector2::new(self.x + self.width, self.y + self.height)
    }

    /// Move the rectangle by an offset
    pub fn translated(&self, offset: Vector2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Mirror the rectangle around the local origin's vertical axis when facing left
    pub fn mirrored(&self, facing: Facing) -> Self {
        match facing {
            Facing::Right => *self,
            Facing::Left => Self::new(-(self.x + self.width), self.y, self.width, self.height),
        }
    }

    /// Standard AABB overlap test; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize_or_zero(Vector2::ZERO), Vector2::ZERO);
    }

    #[test]
    fn test_normalize_diagonal() {
        let n = normalize_or_zero(Vector2::new(1.0, 1.0));
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(n.x, n.y);
    }

    #[test]
    fn test_facing() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.flipped(), Facing::Left);
        assert_eq!(Facing::from_direction(0.0), None);
        assert_eq!(Facing::from_direction(-3.0), Some(Facing::Left));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 5.0, 5.0)));
        // Shared edge only
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_rect_mirrored() {
        let probe = Rect::new(2.0, -3.0, 8.0, 6.0);
        let left = probe.mirrored(Facing::Left);
        assert_eq!(left, Rect::new(-10.0, -3.0, 8.0, 6.0));
        assert_eq!(probe.mirrored(Facing::Right), probe);
    }
}
