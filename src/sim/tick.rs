//! Per-frame simulation step
//!
//! Variable timestep, clamped: the host passes the real frame delta and the
//! tick caps it so a stalled tab never teleports pixels through the floor.

use super::difficulty::{self, MAX_LEVEL};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Clamp a raw frame delta (ms) into the range the simulation accepts
#[inline]
pub fn clamp_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_nan() {
        return 0.0;
    }
    dt_ms.clamp(0.0, MAX_FRAME_DT_MS)
}

/// Advance the game state by one frame
///
/// Only the Playing phase simulates; other phases are left untouched.
/// `now` is the host timestamp (ms) used to stamp a game over.
pub fn tick(state: &mut GameState, dt_ms: f32, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }
    let dt = clamp_dt(dt_ms);

    // Age popups
    state.popups.retain_mut(|popup| popup.advance(dt));

    // Difficulty
    state.difficulty_timer += dt;
    if state.difficulty_timer >= DIFFICULTY_INTERVAL_MS {
        state.difficulty_timer = 0.0;
        if state.level < MAX_LEVEL {
            state.level += 1;
            log::debug!("Difficulty level {}", state.level);
            events.push(GameEvent::LevelUp { level: state.level });
        }
    }

    // Spawning
    state.spawn_timer += dt;
    if state.spawn_timer >= difficulty::spawn_interval_ms(state.level) {
        state.spawn_timer = 0.0;
        let pixel = state.spawn_pixel();
        events.push(GameEvent::Spawned {
            x: pixel.x,
            y: pixel.y,
        });
    }

    // Falling; every pixel moves, the round ends if any of them landed
    let mut landed = false;
    for pixel in &mut state.pixels {
        landed |= pixel.advance(dt);
    }
    if landed {
        state.end_round(now);
        events.push(GameEvent::GameOver { score: state.score });
        return events;
    }

    state.hue = difficulty::advance_hue(state.hue);

    events
}
