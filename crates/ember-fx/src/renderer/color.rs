//! Solid RGB colors for particles, overlays, and sprite palettes.

/// An opaque RGB color. Alpha is supplied separately at draw time
/// (the surface's global alpha), so the color itself never carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// Ring color for level-up effects.
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    /// Ring color for everything that is not a level-up.
    pub const VIOLET: Color = Color::rgb(138, 43, 226);
    /// Ground dust kicked up while sprinting.
    pub const DUST_BROWN: Color = Color::rgb(139, 115, 85);

    /// Parse a `#rrggbb` hex string. Returns None for anything else.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }

    /// Pack into a little-endian RGBA8888 word (0xAABBGGRR) with the
    /// given alpha, the layout `Bitmap` stores.
    pub fn packed(self, alpha: u8) -> u32 {
        (alpha as u32) << 24 | (self.b as u32) << 16 | (self.g as u32) << 8 | self.r as u32
    }
}
