//! Fixed game colors and the background rotation

use super::Color;
use crate::consts::BACKGROUND_COUNT;
use crate::sim::{GravityDir, Tint};

pub const STONE: Color = Color::hex(0x8B7355);
pub const OBSTACLE_FILL: Color = Color::hex(0xE74C3C);
pub const OBSTACLE_BORDER: Color = Color::hex(0xC0392B);
pub const GRAVITY_DOWN: Color = Color::hex(0xFF6B6B);
pub const GRAVITY_UP: Color = Color::hex(0x4ECDC4);

/// Page backgrounds, purples then blues
pub const BACKGROUNDS: [Color; BACKGROUND_COUNT] = [
    Color::hex(0x1E3C72),
    Color::hex(0x2D1B4E),
    Color::hex(0x4A148C),
    Color::hex(0x6A1B9A),
    Color::hex(0x7B1FA2),
    Color::hex(0x8E24AA),
    Color::hex(0xAB47BC),
    Color::hex(0xBA68C8),
    Color::hex(0xCE93D8),
    Color::hex(0xE1BEE7),
    Color::hex(0x1A237E),
    Color::hex(0x283593),
    Color::hex(0x303F9F),
    Color::hex(0x3949AB),
    Color::hex(0x3F51B5),
    Color::hex(0x5C6BC0),
    Color::hex(0x7986CB),
    Color::hex(0x9FA8DA),
    Color::hex(0xC5CAE9),
    Color::hex(0xE8EAF6),
];

/// How much darker the canvas is than the page behind it
const CANVAS_SHADE: u8 = 30;

pub fn background(index: usize) -> Color {
    BACKGROUNDS[index % BACKGROUND_COUNT]
}

pub fn canvas_background(index: usize) -> Color {
    background(index).darken(CANVAS_SHADE)
}

pub fn tint(tint: Tint) -> Color {
    match tint {
        Tint::Flip => Color::hex(0x4A90E2),
        Tint::Score => Color::hex(0xFFD700),
        Tint::Explosion => Color::hex(0xFF6B6B),
    }
}

pub fn gravity_indicator(dir: GravityDir) -> Color {
    match dir {
        GravityDir::Down => GRAVITY_DOWN,
        GravityDir::Up => GRAVITY_UP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_wraps() {
        assert_eq!(background(0), Color::hex(0x1E3C72));
        assert_eq!(background(BACKGROUND_COUNT), background(0));
    }

    #[test]
    fn test_canvas_is_darker() {
        let c = canvas_background(0);
        assert_eq!((c.r, c.g, c.b), (0x1E - 30, 0x3C - 30, 0x72 - 30));
    }
}
