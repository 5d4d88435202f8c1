//! Axis-aligned rectangles in surface coordinates.
//!
//! The surface coordinate system has its origin at the top-left corner with
//! the y axis pointing down, matching the circle renderer in [`crate::window`].

use glam::Vec2;

/// Round a density-independent length to whole surface pixels.
///
/// All reference lengths in this crate (particle radii, center spread,
/// expansion insets) are expressed in density-independent units and scaled
/// by the display density before use.
///
/// # Example
///
/// ```
/// assert_eq!(shatter::dp(2.0, 1.0), 2.0);
/// assert_eq!(shatter::dp(2.0, 2.625), 5.0);
/// ```
pub fn dp(units: f32, density: f32) -> f32 {
    (units * density).round()
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle centered on `center`.
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow the rectangle by `dx`/`dy` on each side.
    ///
    /// Negative values shrink it; shrinking past zero clamps the size to zero
    /// around the original corner.
    pub fn expand(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x - dx,
            y: self.y - dy,
            width: (self.width + 2.0 * dx).max(0.0),
            height: (self.height + 2.0 * dy).max(0.0),
        }
    }

    /// Whether the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn test_from_center_round_trips() {
        let rect = Rect::from_center(Vec2::new(60.0, 45.0), 100.0, 50.0);
        assert_eq!(rect, Rect::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_expand_keeps_center() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        let expanded = rect.expand(32.0, 16.0);
        assert_eq!(expanded.center(), rect.center());
        assert_eq!(expanded.width, 84.0);
        assert_eq!(expanded.height, 52.0);
    }

    #[test]
    fn test_expand_clamps_negative_size() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let shrunk = rect.expand(-20.0, -20.0);
        assert_eq!(shrunk.width, 0.0);
        assert_eq!(shrunk.height, 0.0);
        assert!(shrunk.is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_dp_rounds_to_whole_pixels() {
        assert_eq!(dp(1.0, 1.0), 1.0);
        assert_eq!(dp(20.0, 1.5), 30.0);
        assert_eq!(dp(5.0, 2.625), 13.0);
    }
}
