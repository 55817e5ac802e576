//! Frame composition
//!
//! Turns the game state into surface calls. One function per screen; the
//! paused screen is the playfield with a dimmed overlay on top.

use super::{Hsla, Surface, TextAlign};
use crate::consts::*;
use crate::highscores::{HighScores, format_time};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

const TITLE: &str = "1-BIT, 1-PIXEL, HELL";

/// Everything a frame needs besides the surface
pub struct FrameContext<'a> {
    pub state: &'a GameState,
    pub high_scores: &'a HighScores,
    pub settings: &'a Settings,
    /// Host time (ms)
    pub now: f64,
    pub fps: u32,
}

/// Foreground and background for this frame
struct Colors {
    fg: Hsla,
    bg: Hsla,
}

impl Colors {
    fn for_frame(ctx: &FrameContext) -> Self {
        let palette = ctx.state.palette();
        let hue = if ctx.settings.reduced_motion {
            0.0
        } else {
            palette.hue
        };
        Self {
            fg: Hsla::vivid(hue, palette.foreground),
            bg: Hsla::vivid(hue, palette.background),
        }
    }
}

/// Draw the current screen
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, ctx: &FrameContext) {
    let colors = Colors::for_frame(ctx);
    match ctx.state.phase {
        GamePhase::Start => draw_start(surface, ctx, &colors),
        GamePhase::Playing => draw_playfield(surface, ctx, &colors),
        GamePhase::Paused => {
            draw_playfield(surface, ctx, &colors);
            draw_pause_overlay(surface, &colors);
        }
        GamePhase::GameOver => draw_game_over(surface, ctx, &colors),
    }
}

fn draw_start<S: Surface + ?Sized>(surface: &mut S, ctx: &FrameContext, colors: &Colors) {
    surface.clear(colors.bg);

    let cx = SURFACE_WIDTH / 2.0;
    let cy = SURFACE_HEIGHT / 2.0;
    surface.draw_text(TITLE, cx, cy - 40.0, 48.0, TextAlign::Center, colors.fg);
    surface.draw_text(
        "Click anywhere to play",
        cx,
        cy + 20.0,
        24.0,
        TextAlign::Center,
        colors.fg,
    );
    if let Some(best) = ctx.high_scores.top_score() {
        surface.draw_text(
            &format!("Best: {best}"),
            cx,
            cy + 60.0,
            20.0,
            TextAlign::Center,
            colors.fg,
        );
    }

    draw_reset_button(surface, colors);
}

fn draw_reset_button<S: Surface + ?Sized>(surface: &mut S, colors: &Colors) {
    surface.fill_rect(
        RESET_BUTTON_X,
        RESET_BUTTON_Y,
        RESET_BUTTON_WIDTH,
        RESET_BUTTON_HEIGHT,
        colors.fg,
    );
    surface.draw_text(
        "Reset Leaderboard",
        RESET_BUTTON_X + RESET_BUTTON_WIDTH / 2.0,
        RESET_BUTTON_Y + RESET_BUTTON_HEIGHT / 2.0 + 5.0,
        14.0,
        TextAlign::Center,
        colors.bg,
    );
}

fn draw_playfield<S: Surface + ?Sized>(surface: &mut S, ctx: &FrameContext, colors: &Colors) {
    surface.clear(colors.bg);

    let cell = crate::cell_size();
    for pixel in &ctx.state.pixels {
        surface.fill_rect(
            pixel.x as f32 * cell.x,
            pixel.y * cell.y,
            cell.x,
            cell.y,
            colors.fg,
        );
    }

    for popup in &ctx.state.popups {
        let mut pos = popup.pos;
        if ctx.settings.reduced_motion {
            // Undo the drift so the text stays where the pixel was
            pos.y += POPUP_RISE_PER_MS * popup.age;
        }
        surface.draw_text(
            &format!("+{}", popup.points),
            pos.x * cell.x,
            pos.y * cell.y,
            20.0,
            TextAlign::Center,
            colors.fg.with_alpha(popup.alpha()),
        );
    }

    surface.draw_text(
        &format!("Score: {}", ctx.state.score),
        10.0,
        30.0,
        24.0,
        TextAlign::Left,
        colors.fg,
    );

    if ctx.settings.show_fps {
        surface.draw_text(
            &format!("{} fps", ctx.fps),
            SURFACE_WIDTH - 10.0,
            24.0,
            14.0,
            TextAlign::Right,
            colors.fg,
        );
    }
}

fn draw_pause_overlay<S: Surface + ?Sized>(surface: &mut S, colors: &Colors) {
    surface.shade(Hsla::shade(0.5));

    let cx = SURFACE_WIDTH / 2.0;
    let cy = SURFACE_HEIGHT / 2.0;
    surface.draw_text("PAUSED", cx, cy, 36.0, TextAlign::Center, colors.fg);
    surface.draw_text(
        "Click to resume",
        cx,
        cy + 40.0,
        24.0,
        TextAlign::Center,
        colors.fg,
    );
}

fn draw_game_over<S: Surface + ?Sized>(surface: &mut S, ctx: &FrameContext, colors: &Colors) {
    let state = ctx.state;
    surface.clear(colors.bg);
    surface.shade(Hsla::shade(0.8));

    // Left: this round
    surface.draw_text("GAME OVER", 40.0, 80.0, 48.0, TextAlign::Left, colors.fg);
    surface.draw_text("Your Score:", 40.0, 140.0, 24.0, TextAlign::Left, colors.fg);
    surface.draw_text(
        &state.score.to_string(),
        40.0,
        180.0,
        36.0,
        TextAlign::Left,
        colors.fg,
    );
    surface.draw_text("Time:", 40.0, 220.0, 24.0, TextAlign::Left, colors.fg);
    surface.draw_text(
        &format_time(state.elapsed_secs),
        40.0,
        260.0,
        36.0,
        TextAlign::Left,
        colors.fg,
    );

    // Right: leaderboard
    let half = SURFACE_WIDTH / 2.0;
    let score_column = half + half * 0.8;
    let time_column = half + half * 0.4;
    surface.draw_text(
        "TOP SCORES",
        half + half / 2.0,
        80.0,
        32.0,
        TextAlign::Center,
        colors.fg,
    );
    surface.draw_text("SCORE", score_column, 120.0, 20.0, TextAlign::Right, colors.fg);
    surface.draw_text("TIME", time_column, 120.0, 20.0, TextAlign::Right, colors.fg);

    for (index, entry) in ctx.high_scores.entries().iter().enumerate() {
        let y = 160.0 + index as f32 * 40.0;
        if state.last_rank == Some(index + 1) {
            surface.draw_text(">", half + 20.0, y, 20.0, TextAlign::Left, colors.fg);
        }
        surface.draw_text(
            &entry.score.to_string(),
            score_column,
            y,
            20.0,
            TextAlign::Right,
            colors.fg,
        );
        surface.draw_text(
            &format_time(entry.elapsed_secs),
            time_column,
            y,
            20.0,
            TextAlign::Right,
            colors.fg,
        );
    }

    if state.restart_ready(ctx.now) {
        surface.draw_text(
            "Click anywhere to play again",
            40.0,
            SURFACE_HEIGHT - 40.0,
            24.0,
            TextAlign::Left,
            colors.fg,
        );
    }

    draw_reset_button(surface, colors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScoreEntry;
    use crate::persistence::MemoryStore;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::{Pixel, ScorePopup};
    use glam::Vec2;

    fn render(state: &GameState, board: &HighScores, settings: &Settings, now: f64) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        let ctx = FrameContext {
            state,
            high_scores: board,
            settings,
            now,
            fps: 60,
        };
        draw_frame(&mut surface, &ctx);
        surface
    }

    #[test]
    fn test_start_screen() {
        let state = GameState::new(1);
        let surface = render(&state, &HighScores::new(), &Settings::default(), 0.0);
        assert!(matches!(surface.commands[0], DrawCommand::Clear(_)));
        assert!(surface.has_text(TITLE));
        assert!(surface.has_text("Click anywhere to play"));
        assert!(surface.has_text("Reset Leaderboard"));
        assert!(!surface.has_text("Best:"));
    }

    #[test]
    fn test_playfield_draws_pixels_score_and_popups() {
        let mut state = GameState::new(1);
        state.start(0.0);
        state.score = 144;
        state.pixels.push(Pixel::new(3, 2.0, 0.001));
        state.pixels.push(Pixel::new(5, 4.5, 0.001));
        state.popups.push(ScorePopup::new(Vec2::new(1.0, 1.0), 100));

        let surface = render(&state, &HighScores::new(), &Settings::default(), 0.0);
        assert_eq!(surface.rect_count(), 2);
        assert!(surface.commands.contains(&DrawCommand::FillRect {
            x: 120.0,
            y: 80.0,
            w: 40.0,
            h: 40.0,
            color: Hsla::vivid(0.0, 1.0),
        }));
        assert!(surface.has_text("Score: 144"));
        assert!(surface.has_text("+100"));
        assert!(!surface.has_text("fps"));
    }

    #[test]
    fn test_colors_follow_level_and_hue() {
        let mut state = GameState::new(1);
        state.start(0.0);
        state.level = 9;
        state.hue = 200.0;
        let surface = render(&state, &HighScores::new(), &Settings::default(), 0.0);
        match surface.commands[0] {
            DrawCommand::Clear(bg) => {
                assert_eq!(bg.h, 200.0);
                assert!((bg.l - 0.495).abs() < 1e-6);
            }
            ref other => panic!("expected clear, got {other:?}"),
        }
    }

    #[test]
    fn test_reduced_motion_fixes_hue() {
        let mut state = GameState::new(1);
        state.start(0.0);
        state.hue = 200.0;
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let surface = render(&state, &HighScores::new(), &settings, 0.0);
        assert_eq!(surface.commands[0], DrawCommand::Clear(Hsla::vivid(0.0, 0.0)));
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = GameState::new(1);
        state.start(0.0);
        state.pause();
        let surface = render(&state, &HighScores::new(), &Settings::default(), 0.0);
        assert!(surface.has_text("Score: 0"));
        assert!(surface.has_text("PAUSED"));
        assert!(surface.has_text("Click to resume"));

        // HUD text sits under the dimming, the pause banner above it
        assert!(surface.is_shaded("Score: 0"));
        assert!(!surface.is_shaded("PAUSED"));
        assert!(surface.commands.contains(&DrawCommand::Shade(Hsla::shade(0.5))));
    }

    #[test]
    fn test_game_over_screen_and_restart_hint() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        board.record(HighScoreEntry::new(1500, 75.0, "t"), &mut store);

        let mut state = GameState::new(1);
        state.start(0.0);
        state.score = 900;
        state.end_round(30_000.0);
        state.commit_score(&mut board, &mut store, "t");

        let surface = render(&state, &board, &Settings::default(), 30_500.0);
        assert!(surface.has_text("GAME OVER"));
        assert!(surface.has_text("900"));
        assert!(surface.has_text("0:30"));
        assert!(surface.has_text("1500"));
        assert!(surface.has_text("1:15"));
        assert!(surface.has_text(">"));
        assert!(!surface.has_text("play again"));

        let surface = render(&state, &board, &Settings::default(), 31_000.0);
        assert!(surface.has_text("Click anywhere to play again"));
    }
}
