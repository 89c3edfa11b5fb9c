/*!
 * # Tch-image-utils - Image post-processing for generative model outputs
 *
 * ## Features
 * - Conversions : turn float image batches (ndarray, or tch tensors with the `tch` feature) into 8-bit images
 * - Text : greedy word wrapping of label text against a font
 * - Grid : compose a batch of images into one grid with column and row labels
 *
 * ## Conventions
 *
 * ### Shapes
 * - N : The number of samples
 * - C : The number of channels
 * - H : The height of the image
 * - W : The width of the image
 *
 * - [N, H, W, C] : channel last batch, values in [0, 1], the layout of [`ndarray::array_to_images`]
 * - [N, C, H, W] : channel first batch, values in [-1, 1], the layout of model outputs
 *   and of [`ndarray::denormalize_to_images`]
 * - [H, W, C] : a single image, treated as a batch of one
 *
 * ### Axis
 *
 * the y axis will always be top to bottom
 * the x axis will always be left to right
 *
 * ```text
 * 0 ----> 1 (x)
 * |
 * |
 * v
 * 1
 * (y)
 * ```
 *
 * ## Example
 *
 * ```no_run
 * use ndarray::Array4;
 * use tch_image_utils::{grid::{make_image_grid, GridConfig}, ndarray::array_to_images};
 *
 * # fn main() -> tch_image_utils::Result<()> {
 * let outputs = Array4::<f32>::zeros((4, 64, 64, 3));
 * let images = array_to_images(&outputs)?;
 * let grid = make_image_grid(&images, &["cfg 5", "cfg 9"], &["seed 1", "seed 2"], None, &GridConfig::default())?;
 * assert_eq!(grid.dimensions(), (428, 328));
 * # Ok(())
 * # }
 * ```
 */

pub mod error;
pub mod font;
pub mod grid;
#[cfg(feature = "tch")]
pub mod image;
pub mod interpolation;
pub mod ndarray;
pub mod text;
#[cfg(test)]
mod utils;

pub use error::{Error, Result};
pub use font::LabelFont;
pub use grid::{make_image_grid, make_image_grid_with_font, GridConfig};
pub use interpolation::Interpolation;
pub use text::{wrap_text, TextMeasurer, TextPainter};
