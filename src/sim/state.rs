//! Game state and session lifecycle
//!
//! One `GameState` lives for the whole program; rounds reset it in place.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::{self, Palette};
use super::entity::{Pixel, ScorePopup};
use crate::consts::*;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::persistence::KeyValueStore;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first click
    Start,
    /// Active gameplay
    Playing,
    /// Round ended, leaderboard shown
    GameOver,
    /// Playing, but frozen until focus returns or the player clicks
    Paused,
}

/// Events emitted by a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    LevelUp { level: u32 },
    Spawned { x: u32, y: f32 },
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Difficulty level, 0..=MAX_LEVEL
    pub level: u32,
    /// Playing time since the last level change (ms)
    pub difficulty_timer: f32,
    /// Playing time since the last spawn (ms)
    pub spawn_timer: f32,
    /// Current hue (degrees)
    pub hue: f32,
    /// Host time the current round started (ms)
    pub session_start: f64,
    /// Host time the current round ended (ms)
    pub game_over_at: Option<f64>,
    /// Whether this round's score has been written to the leaderboard
    pub score_committed: bool,
    /// Length of the last finished round (seconds)
    pub elapsed_secs: f64,
    /// Leaderboard rank reached by the last finished round
    pub last_rank: Option<usize>,
    /// Falling pixels, oldest first
    pub pixels: Vec<Pixel>,
    pub popups: Vec<ScorePopup>,
}

impl GameState {
    /// Create a new game state on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            level: 0,
            difficulty_timer: 0.0,
            spawn_timer: 0.0,
            hue: 0.0,
            session_start: 0.0,
            game_over_at: None,
            score_committed: false,
            elapsed_secs: 0.0,
            last_rank: None,
            pixels: Vec::new(),
            popups: Vec::new(),
        }
    }

    /// Clear everything round-specific; the RNG stream carries on
    fn reset_round(&mut self) {
        self.score = 0;
        self.level = 0;
        self.difficulty_timer = 0.0;
        self.spawn_timer = 0.0;
        self.hue = 0.0;
        self.game_over_at = None;
        self.score_committed = false;
        self.elapsed_secs = 0.0;
        self.last_rank = None;
        self.pixels.clear();
        self.popups.clear();
    }

    /// Start -> Playing
    pub fn start(&mut self, now: f64) {
        self.reset_round();
        self.session_start = now;
        self.phase = GamePhase::Playing;
        log::info!("Round started");
    }

    /// Whether enough time has passed on the game over screen to restart
    pub fn restart_ready(&self, now: f64) -> bool {
        match (self.phase, self.game_over_at) {
            (GamePhase::GameOver, Some(t)) => now - t >= RESTART_DELAY_MS,
            _ => false,
        }
    }

    /// GameOver -> Start, only once the restart delay has elapsed.
    /// Returns whether the reset happened.
    pub fn return_to_start(&mut self, now: f64) -> bool {
        if !self.restart_ready(now) {
            return false;
        }
        self.reset_round();
        self.phase = GamePhase::Start;
        true
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        log::info!("Paused");
        true
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        log::info!("Resumed");
        true
    }

    /// Playing -> GameOver. Remaining entities are discarded in the same step.
    pub(crate) fn end_round(&mut self, now: f64) {
        self.phase = GamePhase::GameOver;
        self.game_over_at = Some(now);
        self.elapsed_secs = ((now - self.session_start) / 1000.0).max(0.0);
        self.pixels.clear();
        self.popups.clear();
        log::info!(
            "Game over: score {} after {:.1}s at level {}",
            self.score,
            self.elapsed_secs,
            self.level
        );
    }

    /// Write the finished round to the leaderboard, once per round
    pub fn commit_score<S: KeyValueStore + ?Sized>(
        &mut self,
        high_scores: &mut HighScores,
        store: &mut S,
        recorded_at: impl Into<String>,
    ) -> Option<usize> {
        if self.phase != GamePhase::GameOver || self.score_committed {
            return None;
        }
        self.score_committed = true;

        let entry = HighScoreEntry::new(self.score, self.elapsed_secs, recorded_at);
        self.last_rank = high_scores.record(entry, store);
        if let Some(rank) = self.last_rank {
            log::info!("Leaderboard rank #{rank}");
        }
        self.last_rank
    }

    /// Add a pixel in a random column somewhere in the top half
    pub fn spawn_pixel(&mut self) -> &Pixel {
        let x = self.rng.random_range(0..GRID_WIDTH);
        let y = (self.rng.random::<f32>() * (GRID_HEIGHT as f32 / 2.0)).floor();
        let speed = difficulty::base_speed(self.level) + self.rng.random::<f32>() * SPEED_JITTER;
        self.pixels.push(Pixel::new(x, y, speed));
        &self.pixels[self.pixels.len() - 1]
    }

    /// Remove the newest pixel near grid cell (gx, gy), award points and
    /// leave a popup. Returns the points scored.
    pub fn pop_pixel_at(&mut self, gx: i32, gy: i32) -> Option<u64> {
        let idx = self.pixels.iter().rposition(|p| p.is_near(gx, gy))?;
        let pixel = self.pixels.remove(idx);
        let points = pixel.points(self.level);
        self.score += points;
        self.popups
            .push(ScorePopup::new(Vec2::new(pixel.x as f32, pixel.y), points));
        Some(points)
    }

    /// Colors for the current frame
    pub fn palette(&self) -> Palette {
        difficulty::palette(self.level, self.hue)
    }

    /// Whether the simulation advances on tick
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
