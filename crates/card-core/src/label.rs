//! Text labels that become textures (cake plaque, wall banner).
//!
//! The core only describes the label; hosts rasterize it with whatever 2D
//! drawing surface they have. A host without one returns `None` and the
//! label is simply not drawn.

use crate::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct LabelSpec {
    pub text: String,
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub foreground: Color,
    /// CSS font shorthand.
    pub font: String,
}

impl LabelSpec {
    pub fn plaque(text: &str) -> Self {
        Self {
            text: text.to_string(),
            width: 1024,
            height: 256,
            background: Color::hex(0xffb6c1),
            foreground: Color::hex(0x8b0000),
            font: "bold 80px Arial".to_string(),
        }
    }

    pub fn banner(text: &str) -> Self {
        Self {
            text: text.to_string(),
            width: 2048,
            height: 384,
            background: Color::hex(0xfff0f5),
            foreground: Color::hex(0xc71585),
            font: "bold 150px Georgia".to_string(),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Tightly packed RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    pub fn is_well_formed(&self) -> bool {
        self.pixels.len() == (self.width as usize) * (self.height as usize) * 4
    }
}

pub trait LabelRasterizer {
    fn rasterize(&mut self, spec: &LabelSpec) -> Option<Bitmap>;
}
