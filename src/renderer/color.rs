//! Hue/saturation/lightness colors
//!
//! The simulation hands out hue and lightness as plain numbers; this is where
//! they become something a backend can draw with.

/// HSL color with alpha. Hue in degrees, the rest in 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Fully saturated, opaque color
    pub const fn vivid(h: f32, l: f32) -> Self {
        Self::new(h, 1.0, l, 1.0)
    }

    /// Black at the given opacity (dimming overlays)
    pub const fn shade(a: f32) -> Self {
        Self::new(0.0, 0.0, 0.0, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `hsla()` string for canvas/DOM backends
    pub fn css(&self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.h,
            self.s * 100.0,
            self.l * 100.0,
            self.a
        )
    }

    /// sRGB channels (0-1) plus alpha
    pub fn to_rgba(&self) -> [f32; 4] {
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        [r + m, g + m, b + m, self.a.clamp(0.0, 1.0)]
    }
}
