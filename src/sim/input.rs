//! Pointer and focus handling
//!
//! Clicks are resolved against the current phase: resume, reset the
//! leaderboard, start, restart, or pop a pixel.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::persistence::KeyValueStore;
use crate::platform::ConfirmPrompt;
use crate::{display_to_grid, display_to_surface};

/// Question asked before wiping the leaderboard
pub const RESET_PROMPT: &str = "Do you really want to reset the local leaderboard?";

/// A click/tap on the game surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    /// Position relative to the displayed element's top-left corner
    pub pos: Vec2,
    /// Size the element is currently displayed at
    pub display_size: Vec2,
}

impl PointerClick {
    pub fn new(x: f32, y: f32, display_w: f32, display_h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            display_size: Vec2::new(display_w, display_h),
        }
    }

    /// A click on an element displayed at the logical surface size
    pub fn at_surface(x: f32, y: f32) -> Self {
        Self::new(x, y, SURFACE_WIDTH, SURFACE_HEIGHT)
    }

    /// Click position on the logical surface
    pub fn surface_pos(&self) -> Vec2 {
        display_to_surface(self.pos, self.display_size)
    }

    /// Grid cell under the click
    pub fn grid_cell(&self) -> (i32, i32) {
        display_to_grid(self.pos, self.display_size)
    }
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Left the pause screen
    Resumed,
    /// Reset button confirmed, leaderboard wiped
    LeaderboardReset,
    /// Reset button pressed but the player backed out
    ResetDeclined,
    /// Title screen -> playing
    Started,
    /// Game over -> title screen
    Restarted,
    /// Game over click inside the restart delay
    RestartTooEarly,
    /// Popped a pixel
    Hit { points: u64 },
    /// Clicked empty space while playing
    Miss,
}

impl ClickOutcome {
    /// Whether the host must re-synchronise its frame clock
    pub fn resyncs_clock(&self) -> bool {
        matches!(self, ClickOutcome::Resumed)
    }
}

/// Whether a surface position lies on the reset-leaderboard button
pub fn on_reset_button(surface_pos: Vec2) -> bool {
    surface_pos.x >= RESET_BUTTON_X
        && surface_pos.x <= RESET_BUTTON_X + RESET_BUTTON_WIDTH
        && surface_pos.y >= RESET_BUTTON_Y
        && surface_pos.y <= RESET_BUTTON_Y + RESET_BUTTON_HEIGHT
}

/// Resolve a click against the current phase
pub fn handle_click<S, C>(
    state: &mut GameState,
    high_scores: &mut HighScores,
    store: &mut S,
    prompt: &mut C,
    click: PointerClick,
    now: f64,
) -> ClickOutcome
where
    S: KeyValueStore + ?Sized,
    C: ConfirmPrompt + ?Sized,
{
    match state.phase {
        GamePhase::Paused => {
            state.resume();
            ClickOutcome::Resumed
        }
        GamePhase::Start | GamePhase::GameOver if on_reset_button(click.surface_pos()) => {
            if prompt.confirm(RESET_PROMPT) {
                high_scores.clear(store);
                ClickOutcome::LeaderboardReset
            } else {
                ClickOutcome::ResetDeclined
            }
        }
        GamePhase::Start => {
            state.start(now);
            ClickOutcome::Started
        }
        GamePhase::GameOver => {
            if state.return_to_start(now) {
                ClickOutcome::Restarted
            } else {
                ClickOutcome::RestartTooEarly
            }
        }
        GamePhase::Playing => {
            let (gx, gy) = click.grid_cell();
            match state.pop_pixel_at(gx, gy) {
                Some(points) => ClickOutcome::Hit { points },
                None => ClickOutcome::Miss,
            }
        }
    }
}

/// Window lost focus. Returns whether the game paused.
pub fn focus_lost(state: &mut GameState, pause_on_blur: bool) -> bool {
    pause_on_blur && state.pause()
}

/// Window regained focus. Returns whether the game resumed (host must
/// re-synchronise its frame clock).
pub fn focus_gained(state: &mut GameState) -> bool {
    state.resume()
}
