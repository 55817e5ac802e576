//! Rendering
//!
//! The game draws through the [`Surface`] trait: clear, filled rectangles and
//! text on a 640x360 logical surface. `frame` turns game state into those
//! calls; backends decide how they reach the screen.
//!
//! Browser backend: WebGPU for rectangles (`pipeline`), a 2D canvas stacked
//! on top for text (`text`), combined in `web::WebSurface`.

pub mod color;
pub mod frame;
pub mod pipeline;
pub mod recording;
pub mod vertex;

#[cfg(target_arch = "wasm32")]
pub mod text;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use color::Hsla;
pub use frame::draw_frame;
pub use pipeline::RenderState;
pub use recording::{DrawCommand, RecordingSurface};

#[cfg(target_arch = "wasm32")]
pub use web::WebSurface;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A 2D drawing target in logical surface pixels (origin top-left, y down)
pub trait Surface {
    /// Fill the whole surface and discard everything drawn so far
    fn clear(&mut self, color: Hsla);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Hsla);

    /// Draw `text` with its baseline at `y`, anchored at `x` per `align`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_px: f32, align: TextAlign, color: Hsla);

    /// Cover everything drawn so far, text included, with a translucent `color`
    fn shade(&mut self, color: Hsla);
}
