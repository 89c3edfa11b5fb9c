/*!
# Text

Measuring, wrapping and drawing label text.
 */

use image::{Rgb, RgbImage};

/// Reports rendered text sizes for one font at one size.
pub trait TextMeasurer {
    /// Width in pixels of `text` rendered on one line.
    fn text_width(&self, text: &str) -> u32;

    /// Vertical distance in pixels between two stacked lines.
    fn line_height(&self) -> u32;
}

/// A [`TextMeasurer`] that can also draw onto an RGB canvas.
pub trait TextPainter: TextMeasurer {
    /// Draw `text` with its top left corner at `(x, y)`. Parts outside the canvas are clipped.
    fn draw_text(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str);
}

/**
Greedily wrap `text` into lines no wider than `max_width`.

Words are split on whitespace and kept in order. A line grows one word at a
time while `line + " " + word` measures at most `max_width`. A word wider than
`max_width` on its own is put alone on a line and is never split.

The space separating two lines stays at the end of the first one, so every
line but the last ends with a single space. A line holding an overflowing word
is the word itself, without the space.

# Arguments
- text: &str - The text to wrap
- measurer: &M - The measurer of the font the text will be drawn with
- max_width: u32 - The maximum line width in pixels

# Returns
Vec<String> - The wrapped lines, empty if `text` has no words

# Example
```rust
# use tch_image_utils::text::{wrap_text, TextMeasurer};
struct Mono;
impl TextMeasurer for Mono {
    fn text_width(&self, text: &str) -> u32 { text.chars().count() as u32 * 10 }
    fn line_height(&self) -> u32 { 10 }
}
let lines = wrap_text("the quick brown fox", &Mono, 90);
assert_eq!(lines, vec!["the quick ", "brown fox"]);
```
 */
pub fn wrap_text<M: TextMeasurer + ?Sized>(text: &str, measurer: &M, max_width: u32) -> Vec<String> {
    // (line, holds a single word wider than max_width)
    let mut lines: Vec<(String, bool)> = Vec::new();
    let mut words = text.split_whitespace().peekable();

    while let Some(word) = words.next() {
        let mut line = word.to_owned();
        let overflows = measurer.text_width(&line) > max_width;
        if !overflows {
            while let Some(next) =
                words.next_if(|next| measurer.text_width(&format!("{line} {next}")) <= max_width)
            {
                line.push(' ');
                line.push_str(next);
            }
        }
        lines.push((line, overflows));
    }

    if let Some((_, closed)) = lines.split_last_mut() {
        for (line, _) in closed.iter_mut().filter(|(_, overflows)| !overflows) {
            line.push(' ');
        }
    }
    let lines: Vec<String> = lines.into_iter().map(|(line, _)| line).collect();
    tracing::trace!(lines = lines.len(), max_width, "wrapped label text");
    lines
}
