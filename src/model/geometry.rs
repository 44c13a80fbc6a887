//! Rectangle geometry in ALTO pixel units.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle taken verbatim from HPOS/VPOS/WIDTH/HEIGHT.
///
/// Positions are signed: scanning pipelines occasionally place a box a few
/// pixels outside the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the left edge (HPOS)
    pub x: i32,

    /// Vertical position of the top edge (VPOS)
    pub y: i32,

    /// Width (WIDTH)
    pub width: u32,

    /// Height (HEIGHT)
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from position and size.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle with every coordinate multiplied by the per-axis factors.
    pub fn scaled(&self, scale_x: f64, scale_y: f64) -> (f64, f64, f64, f64) {
        (
            self.x as f64 * scale_x,
            self.y as f64 * scale_y,
            self.width as f64 * scale_x,
            self.height as f64 * scale_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_scaled() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.scaled(0.5, 2.0), (5.0, 40.0, 15.0, 80.0));
    }

    #[test]
    fn test_negative_position_scales() {
        let rect = Rect::new(-4, -2, 8, 6);
        assert_eq!(rect.scaled(0.5, 0.5), (-2.0, -1.0, 4.0, 3.0));
    }
}
