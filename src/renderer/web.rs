//! Browser surface: WebGPU rectangles under a 2D text layer

use super::pipeline::RenderState;
use super::text::TextLayer;
use super::vertex::{self, Vertex};
use super::{Hsla, Surface, TextAlign};

pub struct WebSurface {
    gpu: RenderState,
    text: TextLayer,
    clear_color: [f32; 4],
    vertices: Vec<Vertex>,
}

impl WebSurface {
    pub fn new(gpu: RenderState, text: TextLayer) -> Self {
        Self {
            gpu,
            text,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vertices: Vec::with_capacity(6 * 64),
        }
    }

    /// Submit the rectangles collected since the last `clear`
    pub fn present(&mut self) {
        match self.gpu.render(&self.vertices, self.clear_color) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                self.gpu.resize(self.gpu.size.0, self.gpu.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl Surface for WebSurface {
    fn clear(&mut self, color: Hsla) {
        self.clear_color = color.to_rgba();
        self.vertices.clear();
        self.text.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Hsla) {
        self.vertices.extend_from_slice(&vertex::rect(x, y, w, h, color));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_px: f32, align: TextAlign, color: Hsla) {
        self.text.draw(text, x, y, font_px, align, color);
    }

    // The text canvas sits above the GPU canvas, so shading it dims both
    fn shade(&mut self, color: Hsla) {
        self.text.shade(color);
    }
}
