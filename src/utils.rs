use image::{DynamicImage, Rgb, RgbImage};

use crate::text::{TextMeasurer, TextPainter};

/// Font stand-in where every char advances by the same width. Drawing fills the text box.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceFont {
    pub advance: u32,
    pub height: u32,
}

impl TextMeasurer for FixedAdvanceFont {
    fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.advance
    }

    fn line_height(&self) -> u32 {
        self.height
    }
}

impl TextPainter for FixedAdvanceFont {
    fn draw_text(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        let width = self.text_width(text) as i32;
        for py in y.max(0)..(y + self.height as i32).min(canvas.height() as i32) {
            for px in x.max(0)..(x + width).min(canvas.width() as i32) {
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

pub fn solid_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

pub fn assert_region_eq(image: &RgbImage, origin: (u32, u32), size: (u32, u32), color: [u8; 3]) {
    let (x0, y0) = origin;
    let (w, h) = size;
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            assert_eq!(image.get_pixel(x, y).0, color, "pixel ({x}, {y}) must be {color:?}");
        }
    }
}
