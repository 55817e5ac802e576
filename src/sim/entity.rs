//! Falling pixels and score popups

use glam::Vec2;

use crate::consts::*;

/// A falling pixel
#[derive(Debug, Clone, PartialEq)]
pub struct Pixel {
    /// Column (grid units)
    pub x: u32,
    /// Row (grid units, fractional while falling)
    pub y: f32,
    /// Descent speed (grid units per ms)
    pub speed: f32,
}

impl Pixel {
    pub fn new(x: u32, y: f32, speed: f32) -> Self {
        Self { x, y, speed }
    }

    /// Move down by `dt` ms. Returns true once the pixel has reached the floor.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.y += self.speed * dt;
        self.y >= GRID_HEIGHT as f32
    }

    /// Whether a grid cell is within one unit of this pixel on both axes
    pub fn is_near(&self, gx: i32, gy: i32) -> bool {
        (self.x as f32 - gx as f32).abs() < 1.0 && (self.y - gy as f32).abs() < 1.0
    }

    /// Points awarded for popping this pixel at `level`
    ///
    /// Pixels caught lower on the screen are worth up to three times as much.
    pub fn points(&self, level: u32) -> u64 {
        let multiplier = 1.0 + 2.0 * self.y / GRID_HEIGHT as f32;
        (HIT_BASE_POINTS * multiplier * (level + 1) as f32).floor() as u64
    }
}

/// Floating "+points" text left behind by a hit
#[derive(Debug, Clone, PartialEq)]
pub struct ScorePopup {
    /// Position (grid units)
    pub pos: Vec2,
    pub points: u64,
    /// Age (ms)
    pub age: f32,
    /// Lifetime (ms)
    pub max_age: f32,
}

impl ScorePopup {
    pub fn new(pos: Vec2, points: u64) -> Self {
        Self {
            pos,
            points,
            age: 0.0,
            max_age: POPUP_MAX_AGE_MS,
        }
    }

    /// Age and float upward. Returns false once expired.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.pos.y -= POPUP_RISE_PER_MS * dt;
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.max_age
    }

    /// Opacity, fading linearly to zero over the lifetime
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_advance_reaches_floor() {
        let mut pixel = Pixel::new(0, 8.0, 0.001);
        assert!(!pixel.advance(500.0));
        assert!((pixel.y - 8.5).abs() < 1e-5);
        assert!(pixel.advance(500.0));
    }

    #[test]
    fn test_points_by_row_and_level() {
        assert_eq!(Pixel::new(3, 2.0, 0.001).points(0), 144);
        assert_eq!(Pixel::new(3, 0.0, 0.001).points(0), 100);
        assert_eq!(Pixel::new(3, 0.0, 0.001).points(2), 300);
        assert_eq!(Pixel::new(3, 4.5, 0.001).points(1), 400);
    }

    #[test]
    fn test_is_near_is_strict() {
        let pixel = Pixel::new(3, 2.5, 0.001);
        assert!(pixel.is_near(3, 2));
        assert!(pixel.is_near(3, 3));
        assert!(!pixel.is_near(4, 2));
        assert!(!pixel.is_near(3, 4));
    }

    #[test]
    fn test_popup_rises_fades_and_expires() {
        let mut popup = ScorePopup::new(Vec2::new(3.0, 2.0), 144);
        assert_eq!(popup.alpha(), 1.0);
        assert!(popup.advance(500.0));
        assert!((popup.pos.y - 0.5).abs() < 1e-5);
        assert!((popup.alpha() - 0.5).abs() < 1e-6);
        assert!(!popup.advance(500.0));
        assert_eq!(popup.alpha(), 0.0);
    }
}
