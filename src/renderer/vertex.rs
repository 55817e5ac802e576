//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::color::Hsla;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Two triangles covering an axis-aligned rectangle (surface pixels, y down)
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: Hsla) -> [Vertex; 6] {
    let c = color.to_rgba();
    let (x1, y1) = (x + w, y + h);
    [
        Vertex::new(x, y, c),
        Vertex::new(x, y1, c),
        Vertex::new(x1, y1, c),
        Vertex::new(x, y, c),
        Vertex::new(x1, y1, c),
        Vertex::new(x1, y, c),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let quad = rect(10.0, 20.0, 30.0, 40.0, Hsla::vivid(0.0, 1.0));
        let xs: Vec<f32> = quad.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = quad.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
        assert!(quad.iter().all(|v| v.color == [1.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
