//! Text layer: a 2D canvas stacked above the WebGPU canvas

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Hsla, TextAlign};
use crate::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};

pub struct TextLayer {
    ctx: CanvasRenderingContext2d,
}

impl TextLayer {
    /// Take over `canvas` for text; `None` if it has no 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(SURFACE_WIDTH as u32);
        canvas.set_height(SURFACE_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    pub fn clear(&self) {
        self.ctx
            .clear_rect(0.0, 0.0, SURFACE_WIDTH as f64, SURFACE_HEIGHT as f64);
    }

    /// Translucent fill over the whole layer
    pub fn shade(&self, color: Hsla) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(0.0, 0.0, SURFACE_WIDTH as f64, SURFACE_HEIGHT as f64);
    }

    pub fn draw(&self, text: &str, x: f32, y: f32, font_px: f32, align: TextAlign, color: Hsla) {
        self.ctx.set_font(&format!("{font_px}px Arial"));
        self.ctx.set_text_align(align.as_str());
        self.ctx.set_fill_style_str(&color.css());
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
