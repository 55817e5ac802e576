//! Frame loop driver
//!
//! `Game` owns everything that outlives a single frame: the session, the
//! leaderboard, settings and the store they persist to. The host calls
//! [`Game::frame`] once per animation frame and forwards pointer and focus
//! events; nothing in here schedules frames or reads a clock.

use crate::highscores::HighScores;
use crate::persistence::KeyValueStore;
use crate::platform::{self, ConfirmPrompt};
use crate::renderer::Surface;
use crate::renderer::frame::{FrameContext, draw_frame};
use crate::settings::Settings;
use crate::sim::{self, ClickOutcome, GameEvent, GamePhase, GameState, PointerClick};

/// Frames averaged for the FPS counter
const FPS_WINDOW: usize = 60;

/// Result of one simulation step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStep {
    /// Delta actually fed to the simulation (ms)
    pub dt: f32,
    pub events: Vec<GameEvent>,
}

/// Game instance holding all state
pub struct Game<S: KeyValueStore> {
    pub state: GameState,
    pub high_scores: HighScores,
    settings: Settings,
    store: S,
    /// Host time of the previous frame (ms)
    last_time: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl<S: KeyValueStore> Game<S> {
    /// Load the leaderboard and settings from `store` and sit on the title screen
    pub fn new(seed: u64, store: S) -> Self {
        let high_scores = HighScores::load(&store);
        let settings = Settings::load(&store);
        log::info!("Game initialized with seed: {seed}");
        Self {
            state: GameState::new(seed),
            high_scores,
            settings,
            store,
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace and persist settings
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Failed to save settings: {e}");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Make `now` the reference for the next frame delta
    pub fn resync_clock(&mut self, now: f64) {
        self.last_time = Some(now);
    }

    /// One update + render pass
    pub fn frame<R: Surface + ?Sized>(&mut self, now: f64, surface: &mut R) -> FrameStep {
        let step = self.update(now);
        self.render(surface, now);
        step
    }

    /// Advance the simulation to `now` and commit a finished round
    pub fn update(&mut self, now: f64) -> FrameStep {
        let raw_dt = match self.last_time {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        self.last_time = Some(now);
        self.track_fps(now);

        let dt = sim::clamp_dt(raw_dt);
        let events = sim::tick(&mut self.state, dt, now);
        for event in &events {
            match event {
                GameEvent::Spawned { x, y } => log::trace!("Spawned pixel at ({x}, {y})"),
                GameEvent::LevelUp { level } => log::debug!("Level up: {level}"),
                GameEvent::GameOver { score } => log::debug!("Round over with {score} points"),
            }
        }

        if self.state.phase == GamePhase::GameOver && !self.state.score_committed {
            self.state.commit_score(
                &mut self.high_scores,
                &mut self.store,
                platform::iso_timestamp(),
            );
        }

        FrameStep {
            dt: if self.state.is_running() || !events.is_empty() {
                dt
            } else {
                0.0
            },
            events,
        }
    }

    /// Draw the current state
    pub fn render<R: Surface + ?Sized>(&self, surface: &mut R, now: f64) {
        let ctx = FrameContext {
            state: &self.state,
            high_scores: &self.high_scores,
            settings: &self.settings,
            now,
            fps: self.fps,
        };
        draw_frame(surface, &ctx);
    }

    /// Forward a click to the controller
    pub fn click<C: ConfirmPrompt + ?Sized>(
        &mut self,
        click: PointerClick,
        now: f64,
        prompt: &mut C,
    ) -> ClickOutcome {
        let outcome = sim::handle_click(
            &mut self.state,
            &mut self.high_scores,
            &mut self.store,
            prompt,
            click,
            now,
        );
        if outcome.resyncs_clock() {
            self.resync_clock(now);
        }
        log::debug!("Click -> {outcome:?}");
        outcome
    }

    /// Window lost focus
    pub fn focus_lost(&mut self) -> bool {
        let paused = sim::focus_lost(&mut self.state, self.settings.pause_on_blur);
        if paused {
            log::info!("Auto-paused (window blur)");
        }
        paused
    }

    /// Window regained focus
    pub fn focus_gained(&mut self, now: f64) -> bool {
        let resumed = sim::focus_gained(&mut self.state);
        if resumed {
            self.resync_clock(now);
        }
        resumed
    }

    fn track_fps(&mut self, now: f64) {
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScoreEntry;
    use crate::persistence::MemoryStore;
    use crate::renderer::RecordingSurface;
    use crate::sim::Pixel;

    fn game() -> Game<MemoryStore> {
        Game::new(2024, MemoryStore::new())
    }

    fn no(_: &str) -> bool {
        false
    }

    fn anywhere() -> PointerClick {
        PointerClick::at_surface(100.0, 200.0)
    }

    #[test]
    fn test_loads_existing_leaderboard() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        board.record(HighScoreEntry::new(777, 1.0, "t"), &mut store);

        let game = Game::new(1, store);
        assert_eq!(game.high_scores.top_score(), Some(777));
        assert_eq!(game.settings(), &Settings::default());
    }

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut game = game();
        game.click(anywhere(), 0.0, &mut no);
        let step = game.update(123_456.0);
        assert_eq!(step.dt, 0.0);
    }

    #[test]
    fn test_frame_delta_clamped() {
        let mut game = game();
        game.click(anywhere(), 0.0, &mut no);
        game.update(0.0);
        assert_eq!(game.update(16.0).dt, 16.0);
        assert_eq!(game.update(2016.0).dt, 50.0);
    }

    #[test]
    fn test_resume_after_long_pause_applies_small_delta() {
        let mut game = game();
        game.click(anywhere(), 0.0, &mut no);
        game.update(0.0);
        game.update(16.0);
        assert!(game.focus_lost());

        // Host stops delivering frames while hidden
        assert!(game.focus_gained(60_000.0));
        let step = game.update(60_016.0);
        assert_eq!(step.dt, 16.0);
        assert_eq!(game.state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_click_resume_resyncs_clock() {
        let mut game = game();
        game.click(anywhere(), 0.0, &mut no);
        game.update(0.0);
        game.focus_lost();

        let timer_before = game.state.spawn_timer;
        // Paused frames keep rendering but don't simulate
        game.update(5_000.0);
        assert_eq!(game.state.spawn_timer, timer_before);

        assert_eq!(game.click(anywhere(), 90_000.0, &mut no), ClickOutcome::Resumed);
        let step = game.update(90_010.0);
        assert_eq!(step.dt, 10.0);
        assert!(step.dt <= crate::consts::MAX_FRAME_DT_MS);
    }

    #[test]
    fn test_pause_on_blur_setting() {
        let mut game = game();
        game.set_settings(Settings {
            pause_on_blur: false,
            ..Settings::default()
        });
        game.click(anywhere(), 0.0, &mut no);
        assert!(!game.focus_lost());
        assert_eq!(game.state.phase, GamePhase::Playing);
        assert!(!Settings::load(game.store()).pause_on_blur);
    }

    #[test]
    fn test_game_over_commits_once() {
        let mut game = game();
        game.click(anywhere(), 1_000.0, &mut no);
        game.update(1_000.0);
        game.state.score = 4321;
        game.state.pixels.push(Pixel::new(2, 8.999, 0.01));

        let step = game.update(11_000.0);
        assert!(step.events.contains(&GameEvent::GameOver { score: 4321 }));
        assert_eq!(game.state.phase, GamePhase::GameOver);
        assert_eq!(game.high_scores.top_score(), Some(4321));
        assert_eq!(game.high_scores.entries()[0].elapsed_secs, 10.0);
        assert_eq!(game.state.last_rank, Some(1));

        // Further frames on the game over screen don't record again
        game.update(11_100.0);
        game.update(11_200.0);
        assert_eq!(game.high_scores.len(), 1);
        assert_eq!(HighScores::load(game.store()).len(), 1);
    }

    #[test]
    fn test_full_round_trip_back_to_start() {
        let mut game = game();
        let mut surface = RecordingSurface::new();

        game.click(anywhere(), 0.0, &mut no);
        game.state.pixels.push(Pixel::new(0, 8.999, 0.01));
        game.frame(0.0, &mut surface);
        game.frame(16.0, &mut surface);
        assert_eq!(game.state.phase, GamePhase::GameOver);
        assert!(surface.has_text("GAME OVER"));

        assert_eq!(game.click(anywhere(), 500.0, &mut no), ClickOutcome::RestartTooEarly);
        assert_eq!(game.click(anywhere(), 1_016.0, &mut no), ClickOutcome::Restarted);
        game.frame(1_032.0, &mut surface);
        assert_eq!(game.state.phase, GamePhase::Start);
        assert_eq!(game.state.score, 0);
        assert!(surface.has_text("Best: 0"));
    }

    #[test]
    fn test_fps_counter() {
        let mut game = game();
        let mut now = 0.0;
        for _ in 0..(FPS_WINDOW * 2) {
            now += 1000.0 / 60.0;
            game.update(now);
        }
        assert_eq!(game.fps(), 60);
    }
}
