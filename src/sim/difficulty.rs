//! Difficulty curve
//!
//! A single level index drives everything that gets harder over time:
//! spawn interval, descent speed and foreground/background contrast.

use crate::consts::*;

/// Foreground lightness per level; background is `1 - foreground`
pub const CONTRAST_LEVELS: [f32; 10] = [1.0, 0.9, 0.75, 0.6, 0.55, 0.54, 0.53, 0.52, 0.51, 0.505];

/// Highest reachable level
pub const MAX_LEVEL: u32 = CONTRAST_LEVELS.len() as u32 - 1;

/// Clamp a level into the table range
#[inline]
pub fn clamp_level(level: u32) -> u32 {
    level.min(MAX_LEVEL)
}

/// Foreground lightness (0-1)
pub fn contrast(level: u32) -> f32 {
    CONTRAST_LEVELS[clamp_level(level) as usize]
}

/// Background lightness (0-1)
pub fn background(level: u32) -> f32 {
    1.0 - contrast(level)
}

/// Time between spawns (ms)
pub fn spawn_interval_ms(level: u32) -> f32 {
    (BASE_SPAWN_INTERVAL_MS - clamp_level(level) as f32 * SPAWN_INTERVAL_STEP_MS)
        .max(MIN_SPAWN_INTERVAL_MS)
}

/// Descent speed before per-pixel jitter (grid units per ms)
pub fn base_speed(level: u32) -> f32 {
    BASE_SPEED * (1.0 + clamp_level(level) as f32 * SPEED_STEP_PER_LEVEL)
}

/// Advance the hue by one tick, wrapping at 360
#[inline]
pub fn advance_hue(hue: f32) -> f32 {
    (hue + HUE_STEP) % 360.0
}

/// Colors for the current frame as plain numbers
///
/// Saturation is always full; the renderer decides how to express these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Hue in degrees [0, 360)
    pub hue: f32,
    /// Foreground lightness (0-1)
    pub foreground: f32,
    /// Background lightness (0-1)
    pub background: f32,
}

pub fn palette(level: u32, hue: f32) -> Palette {
    Palette {
        hue,
        foreground: contrast(level),
        background: background(level),
    }
}
