use palette::{FromColor, LinSrgba, Srgba};

use crate::scene::Color;

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Convert to premultiplied linear RGBA floats, the form GPU renderers consume.
    #[inline]
    pub fn to_lin_premul(&self) -> [f32; 4] {
        let s = Srgba::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        [
            lin.red * lin.alpha,
            lin.green * lin.alpha,
            lin.blue * lin.alpha,
            lin.alpha,
        ]
    }

    /// Format as `#RRGGBB`, dropping alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}
