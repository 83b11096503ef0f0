//! Rendering module
//!
//! The render stage paints the simulation onto any [`Surface`]; the browser
//! build backs it with a 2D canvas.

pub mod palette;
pub mod stage;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use stage::render;

use glam::Vec2;

/// 8-bit RGB color with a 0-1 alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// From a packed `0xRRGGBB` value
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Subtract `amount` from every channel (saturating at 0)
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
            a: self.a,
        }
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Abstract 2D drawing target in world coordinates
pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_unpacks_channels() {
        assert_eq!(Color::hex(0xE74C3C), Color::rgb(0xE7, 0x4C, 0x3C));
    }

    #[test]
    fn test_darken_saturates() {
        let c = Color::rgb(10, 100, 255).darken(30);
        assert_eq!((c.r, c.g, c.b), (0, 70, 225));
    }

    #[test]
    fn test_css_string() {
        assert_eq!(
            Color::rgb(1, 2, 3).with_alpha(0.5).to_css(),
            "rgba(1, 2, 3, 0.5)"
        );
    }
}
