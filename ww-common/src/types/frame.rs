//! Frame buffer for the 8x8 RGB matrix.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_4X6},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};

use super::color::BLACK;

pub const MATRIX_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: [[Rgb888; MATRIX_SIZE]; MATRIX_SIZE],
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            pixels: [[BLACK; MATRIX_SIZE]; MATRIX_SIZE],
        }
    }

    pub fn fill(&mut self, color: Rgb888) {
        for row in self.pixels.iter_mut() {
            row.fill(color);
        }
    }

    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Set one pixel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: Rgb888) {
        if x < MATRIX_SIZE && y < MATRIX_SIZE {
            self.pixels[y][x] = color;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb888> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn rows(&self) -> &[[Rgb888; MATRIX_SIZE]; MATRIX_SIZE] {
        &self.pixels
    }

    /// Draw up to two characters over the current contents, top-left aligned.
    pub fn draw_text(&mut self, text: &str, color: Rgb888) {
        let style = MonoTextStyle::new(&FONT_4X6, color);
        Text::with_baseline(text, Point::zero(), style, Baseline::Top)
            .draw(self)
            .ok();
    }

    pub fn count(&self, color: Rgb888) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| **c == color)
            .count()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(MATRIX_SIZE as u32, MATRIX_SIZE as u32)
    }
}

impl DrawTarget for Frame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set(point.x as usize, point.y as usize, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::color::{ORANGE, YELLOW};

    #[test]
    fn test_fill_and_clear() {
        let mut frame = Frame::new();
        frame.fill(ORANGE);
        assert_eq!(frame.count(ORANGE), 64);
        frame.clear();
        assert_eq!(frame.count(BLACK), 64);
    }

    #[test]
    fn test_text_stays_on_background() {
        let mut frame = Frame::new();
        frame.fill(ORANGE);
        frame.draw_text("??", YELLOW);
        let lit = frame.count(YELLOW);
        assert!(lit > 0);
        assert_eq!(lit + frame.count(ORANGE), 64);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut frame = Frame::new();
        frame.set(8, 0, ORANGE);
        frame.set(0, 9, ORANGE);
        assert_eq!(frame.count(ORANGE), 0);
        assert_eq!(frame.pixel(8, 0), None);
    }
}
