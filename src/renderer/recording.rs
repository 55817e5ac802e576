//! Surface that records draw calls instead of drawing

use super::{Hsla, Surface, TextAlign};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Hsla),
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Hsla,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        font_px: f32,
        align: TextAlign,
        color: Hsla,
    },
    Shade(Hsla),
}

/// Keeps the draw calls of the current frame; `clear` starts a new one
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every `draw_text` call, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    /// Whether a shade was drawn after the first text matching `needle`
    pub fn is_shaded(&self, needle: &str) -> bool {
        let text_at = self.commands.iter().position(
            |c| matches!(c, DrawCommand::Text { text, .. } if text.contains(needle)),
        );
        let shade_at = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Shade(_)));
        matches!((text_at, shade_at), (Some(t), Some(s)) if s > t)
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Hsla) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Hsla) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_px: f32, align: TextAlign, color: Hsla) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font_px,
            align,
            color,
        });
    }

    fn shade(&mut self, color: Hsla) {
        self.commands.push(DrawCommand::Shade(color));
    }
}
