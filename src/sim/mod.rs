//! Game simulation module
//!
//! All gameplay logic lives here, free of rendering and platform code:
//! - Host-supplied timestamps only (no clock reads)
//! - Seeded RNG only
//! - Pixels kept in spawn order (newest last)

pub mod difficulty;
pub mod entity;
pub mod input;
pub mod state;
pub mod tick;

pub use difficulty::{CONTRAST_LEVELS, MAX_LEVEL, Palette};
pub use entity::{Pixel, ScorePopup};
pub use input::{ClickOutcome, PointerClick, focus_gained, focus_lost, handle_click};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{clamp_dt, tick};
