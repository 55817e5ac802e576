//! Pixel Pop - 1-BIT, 1-PIXEL, HELL
//!
//! Core modules:
//! - `sim`: Game state machine, difficulty curve, entities and click handling
//! - `game`: Frame loop driver owning the session, leaderboard and store
//! - `renderer`: Surface abstraction, frame composition and the WebGPU backend
//! - `platform`: Host clock and confirmation prompt
//! - `persistence`: Key-value storage backends
//! - `highscores`: Top-5 leaderboard

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::{HighScoreEntry, HighScores};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Virtual grid dimensions (grid units)
    pub const GRID_WIDTH: u32 = 16;
    pub const GRID_HEIGHT: u32 = 9;

    /// Logical drawing surface (pixels)
    pub const SURFACE_WIDTH: f32 = 640.0;
    pub const SURFACE_HEIGHT: f32 = 360.0;

    /// Largest frame delta fed to the simulation (ms)
    pub const MAX_FRAME_DT_MS: f32 = 50.0;

    /// Playing time between difficulty steps (ms)
    pub const DIFFICULTY_INTERVAL_MS: f32 = 10_000.0;
    /// Spawn interval at level 0 (ms)
    pub const BASE_SPAWN_INTERVAL_MS: f32 = 1000.0;
    /// Spawn interval reduction per level (ms)
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 200.0;
    /// Spawn interval floor (ms)
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 400.0;

    /// Pixel descent speed at level 0 (grid units per ms)
    pub const BASE_SPEED: f32 = 0.001;
    /// Speed increase per level (fraction of base)
    pub const SPEED_STEP_PER_LEVEL: f32 = 0.05;
    /// Upper bound (exclusive) of the per-pixel random speed bonus
    pub const SPEED_JITTER: f32 = 0.0005;

    /// Hue advance per playing tick (degrees)
    pub const HUE_STEP: f32 = 0.1;

    /// Score popup lifetime (ms) and upward drift (grid units per ms)
    pub const POPUP_MAX_AGE_MS: f32 = 1000.0;
    pub const POPUP_RISE_PER_MS: f32 = 0.003;

    /// Base points for a hit before position and level multipliers
    pub const HIT_BASE_POINTS: f32 = 100.0;

    /// Minimum time on the game over screen before a click restarts (ms)
    pub const RESTART_DELAY_MS: f64 = 1000.0;

    /// Leaderboard size
    pub const MAX_HIGH_SCORES: usize = 5;

    /// Reset-leaderboard button (surface pixels)
    pub const RESET_BUTTON_X: f32 = SURFACE_WIDTH - 150.0;
    pub const RESET_BUTTON_Y: f32 = 10.0;
    pub const RESET_BUTTON_WIDTH: f32 = 140.0;
    pub const RESET_BUTTON_HEIGHT: f32 = 30.0;
}

/// Scale a point from the displayed element size to the logical surface
#[inline]
pub fn display_to_surface(pos: Vec2, display_size: Vec2) -> Vec2 {
    if display_size.x <= 0.0 || display_size.y <= 0.0 {
        return pos;
    }
    pos * Vec2::new(consts::SURFACE_WIDTH, consts::SURFACE_HEIGHT) / display_size
}

/// Convert a displayed-element point to integer grid cell coordinates
#[inline]
pub fn display_to_grid(pos: Vec2, display_size: Vec2) -> (i32, i32) {
    let surface = display_to_surface(pos, display_size);
    let cell_w = consts::SURFACE_WIDTH / consts::GRID_WIDTH as f32;
    let cell_h = consts::SURFACE_HEIGHT / consts::GRID_HEIGHT as f32;
    (
        (surface.x / cell_w).floor() as i32,
        (surface.y / cell_h).floor() as i32,
    )
}

/// Size of one grid cell on the logical surface
#[inline]
pub fn cell_size() -> Vec2 {
    Vec2::new(
        consts::SURFACE_WIDTH / consts::GRID_WIDTH as f32,
        consts::SURFACE_HEIGHT / consts::GRID_HEIGHT as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_to_grid_identity_size() {
        let display = Vec2::new(consts::SURFACE_WIDTH, consts::SURFACE_HEIGHT);
        assert_eq!(display_to_grid(Vec2::new(0.0, 0.0), display), (0, 0));
        assert_eq!(display_to_grid(Vec2::new(139.0, 99.0), display), (3, 2));
        assert_eq!(display_to_grid(Vec2::new(639.9, 359.9), display), (15, 8));
    }

    #[test]
    fn test_display_to_grid_scaled_element() {
        // Canvas stretched to twice its logical size
        let display = Vec2::new(1280.0, 720.0);
        assert_eq!(display_to_grid(Vec2::new(280.0, 200.0), display), (3, 2));
    }

    #[test]
    fn test_display_to_surface_zero_size_passthrough() {
        let p = Vec2::new(12.0, 34.0);
        assert_eq!(display_to_surface(p, Vec2::ZERO), p);
    }
}
