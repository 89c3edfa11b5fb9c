/*!
# Image grid

Compose a batch of same-size images into one labeled grid image.

```text
0 ------ Y ------ Y+w ---- Y+2w
|        | col A  | col B  |    <- label strip (L)
|  row 1 | img 0  | img 1  |    <- h
|        | col A  | col B  |    <- label strip (L), headers only on the first row
|  row 2 | img 2  | img 3  |
```
 */

use std::borrow::Cow;
use std::path::PathBuf;

use image::{imageops, DynamicImage, GenericImageView, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::font::{check_font_size, LabelFont};
use crate::interpolation::Interpolation;
use crate::text::{wrap_text, TextPainter};

/// Layout and styling of a labeled grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Height of the strip reserved above each row of images.
    pub label_height: u32,

    /// Width of the left margin holding the row labels. Row labels wrap to this width.
    pub y_label_width: u32,

    /// Label font file. A bare file name is also looked up in the system font directories.
    pub font_path: PathBuf,

    /// Label font em size in pixels.
    pub font_size: f32,

    /// Filter used when a resize is requested.
    pub resize_filter: Interpolation,

    /// Fill of the canvas around and between the images.
    pub background: Rgb<u8>,

    /// Color of the column and row labels.
    pub text_color: Rgb<u8>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            label_height: 100,
            y_label_width: 300,
            font_path: PathBuf::from("arial.ttf"),
            font_size: 150.0,
            resize_filter: Interpolation::Bicubic,
            background: Rgb([255, 255, 255]),
            text_color: Rgb([0, 0, 0]),
        }
    }
}

impl GridConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the font size is not a positive number.
    pub fn validate(&self) -> Result<()> {
        check_font_size(self.font_size)
    }

    /// Load the label font named by this configuration.
    pub fn load_font(&self) -> Result<LabelFont> {
        LabelFont::from_file(&self.font_path, self.font_size)
    }
}

/**
Compose images into a grid with column labels on top and row labels on the left.

The label font is loaded from `config.font_path` for this call only.
See [`make_image_grid_with_font`] for the layout.

# Errors
Everything [`make_image_grid_with_font`] rejects, plus font loading errors.
 */
pub fn make_image_grid<X, Y>(
    images: &[DynamicImage],
    x_labels: &[X],
    y_labels: &[Y],
    resize: Option<u32>,
    config: &GridConfig,
) -> Result<RgbImage>
where
    X: AsRef<str>,
    Y: AsRef<str>,
{
    config.validate()?;
    check_grid_len(images.len(), x_labels.len(), y_labels.len())?;
    let font = config.load_font()?;
    make_image_grid_with_font(images, x_labels, y_labels, resize, config, &font)
}

/**
Compose images into a grid, drawing labels with `font`.

# Arguments
- images: &[DynamicImage] - The cells in row major order, image `i` goes to row `i / cols` and column `i % cols`
- x_labels: &[X] - One label per column
- y_labels: &[Y] - One label per row
- resize: Option<u32> - Resize every image to a `resize` x `resize` square first
- config: &GridConfig - Layout constants
- font: &F - Measures and draws the labels

# Returns
RgbImage - The grid of size `(cols * w + y_label_width, rows * (h + label_height))`

# Errors
- `LabelCountMismatch` if `images.len() != x_labels.len() * y_labels.len()`
- `EmptyGrid` if there are no images
- `NonUniformImageSize` if an image differs in size from the first one
- `InvalidParameter` for a zero resize or a grid too large for an image
 */
pub fn make_image_grid_with_font<X, Y, F>(
    images: &[DynamicImage],
    x_labels: &[X],
    y_labels: &[Y],
    resize: Option<u32>,
    config: &GridConfig,
    font: &F,
) -> Result<RgbImage>
where
    X: AsRef<str>,
    Y: AsRef<str>,
    F: TextPainter + ?Sized,
{
    let cols = x_labels.len();
    let rows = y_labels.len();
    check_grid_len(images.len(), cols, rows)?;

    let images: Vec<Cow<DynamicImage>> = match resize {
        Some(0) => {
            return Err(Error::InvalidParameter {
                name: "resize".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        }
        Some(side) => {
            tracing::debug!("Resizing {} images to {side}x{side}", images.len());
            let filter = config.resize_filter.filter_type();
            images
                .iter()
                .map(|img| Cow::Owned(img.resize_exact(side, side, filter)))
                .collect()
        }
        None => images.iter().map(Cow::Borrowed).collect(),
    };

    let (w, h) = images[0].dimensions();
    if let Some((index, img)) = images
        .iter()
        .enumerate()
        .find(|(_, img)| img.dimensions() != (w, h))
    {
        return Err(Error::NonUniformImageSize {
            index,
            expected: (w, h),
            actual: img.dimensions(),
        });
    }

    let label_height = config.label_height;
    let y_label_width = config.y_label_width;
    let width = grid_extent(cols, u64::from(w), u64::from(y_label_width), "width")?;
    let height = grid_extent(rows, u64::from(h) + u64::from(label_height), 0, "height")?;
    tracing::debug!("Composing {rows}x{cols} grid of {w}x{h} cells into {width}x{height}");

    let mut grid = RgbImage::from_pixel(width, height, config.background);

    for (i, img) in images.iter().enumerate() {
        let (row, col) = ((i / cols) as u32, (i % cols) as u32);
        let x_offset = col * w + y_label_width;
        let y_offset = row * (h + label_height);

        imageops::replace(
            &mut grid,
            &img.to_rgb8(),
            i64::from(x_offset),
            i64::from(y_offset + label_height),
        );

        if i < cols {
            let label = x_labels[i].as_ref();
            let text_x = i64::from(x_offset) + centered(w, font.text_width(label));
            font.draw_text(&mut grid, config.text_color, coord(text_x), coord(i64::from(y_offset)), label);
        }

        if i % cols == 0 {
            let lines = wrap_text(y_labels[i / cols].as_ref(), font, y_label_width);
            let line_height = i64::from(font.line_height());
            let block_height = lines.len() as i64 * line_height;
            let mut text_y = i64::from(y_offset + label_height) + i64::from(h / 2) - block_height / 2;
            for line in &lines {
                let line = line.trim_end();
                let text_x = centered(y_label_width, font.text_width(line));
                font.draw_text(&mut grid, config.text_color, coord(text_x), coord(text_y), line);
                text_y += line_height;
            }
        }
    }

    Ok(grid)
}

fn check_grid_len(images: usize, cols: usize, rows: usize) -> Result<()> {
    if cols.checked_mul(rows) != Some(images) {
        return Err(Error::LabelCountMismatch { images, cols, rows });
    }
    if images == 0 {
        return Err(Error::EmptyGrid);
    }
    Ok(())
}

/// `count * cell + margin`, if it fits an image dimension.
fn grid_extent(count: usize, cell: u64, margin: u64, name: &str) -> Result<u32> {
    u64::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(cell))
        .and_then(|extent| extent.checked_add(margin))
        .and_then(|extent| u32::try_from(extent).ok())
        .ok_or_else(|| Error::InvalidParameter {
            name: name.to_string(),
            reason: format!("{count} cells of {cell}px plus {margin}px do not fit an image"),
        })
}

/// Offset that centers `inner` in `outer`, negative when `inner` overflows.
fn centered(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)) / 2
}

#[allow(clippy::cast_possible_truncation)]
fn coord(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
