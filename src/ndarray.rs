/*!
# ndarray conversions

Convert float image batches into 8-bit images and back.
 */

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use ndarray::{Array3, ArrayBase, ArrayView3, Axis, Data, Dimension, Ix4};

use crate::error::{Error, Result};

/**
Convert a batch of images with values in [0, 1] to 8-bit images.

# Arguments
- images: [N, H, W, C] or [H, W, C] float array. A 3d array is a batch of one image.

# Returns
Vec<DynamicImage> - One image per batch element, in batch order.
A single channel gives a luma image, 2 luma + alpha, 3 RGB and 4 RGBA.

# Example
```rust
# use ndarray::Array4;
# use tch_image_utils::ndarray::array_to_images;
let images = array_to_images(&Array4::<f32>::ones((1, 2, 2, 1))).unwrap();
assert_eq!(images.len(), 1);
assert!(images[0].to_luma8().pixels().all(|p| p.0 == [255]));
```
 */
pub fn array_to_images<S, D>(images: &ArrayBase<S, D>) -> Result<Vec<DynamicImage>>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let images = images.view().into_dyn();
    let batch = match images.ndim() {
        3 => images.insert_axis(Axis(0)),
        4 => images,
        _ => {
            return Err(Error::ShapeMismatch {
                expected: "[N, H, W, C] or [H, W, C]".to_string(),
                actual: format!("{:?}", images.shape()),
            })
        }
    };
    let batch = batch
        .into_dimensionality::<Ix4>()
        .map_err(|err| Error::ShapeMismatch {
            expected: "[N, H, W, C]".to_string(),
            actual: err.to_string(),
        })?;
    tracing::debug!("Converting {:?} array to images", batch.shape());

    let slices: Vec<ArrayView3<f32>> = batch.outer_iter().collect();

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        slices.into_par_iter().map(slice_to_image).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        slices.into_iter().map(slice_to_image).collect()
    }
}

/**
Convert a batch of images with values in about [-1, 1] to 8-bit images.

Values are mapped with `x / 2 + 0.5`, clamped to [0, 1] and moved to channel last
before going through [`array_to_images`].

# Arguments
- images: [N, C, H, W] float array

# Returns
Vec<DynamicImage> - One image per batch element, in batch order.
 */
pub fn denormalize_to_images<S, D>(images: &ArrayBase<S, D>) -> Result<Vec<DynamicImage>>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let images = images
        .view()
        .into_dyn()
        .into_dimensionality::<Ix4>()
        .map_err(|_| Error::ShapeMismatch {
            expected: "[N, C, H, W]".to_string(),
            actual: format!("{:?}", images.shape()),
        })?;
    let images = images
        .mapv(|x| (x / 2.0 + 0.5).clamp(0.0, 1.0))
        .permuted_axes([0, 2, 3, 1]);
    array_to_images(&images)
}

/**
Convert an image to a [H, W, C] float array with values in [0, 1].

The channel count follows the image color type: 1 for luma, 2 for luma + alpha,
3 for RGB and 4 for RGBA. Other color types are converted to RGB or RGBA.
 */
pub fn image_to_array(image: &DynamicImage) -> Array3<f32> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let (channels, raw) = match image {
        DynamicImage::ImageLuma8(img) => (1, img.as_raw().clone()),
        DynamicImage::ImageLumaA8(img) => (2, img.as_raw().clone()),
        DynamicImage::ImageRgb8(img) => (3, img.as_raw().clone()),
        img if img.color().has_alpha() => (4, img.to_rgba8().into_raw()),
        img => (3, img.to_rgb8().into_raw()),
    };
    Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
        f32::from(raw[(y * width + x) * channels + c]) / 255.0
    })
}

fn slice_to_image(slice: ArrayView3<f32>) -> Result<DynamicImage> {
    let (height, width, channels) = slice.dim();
    let size = |value: usize, name: &str| {
        u32::try_from(value).map_err(|_| Error::InvalidParameter {
            name: name.to_string(),
            reason: format!("{value} does not fit an image dimension"),
        })
    };
    let (width, height) = (size(width, "width")?, size(height, "height")?);
    // iter() walks the logical [H, W, C] order whatever the memory layout
    let raw: Vec<u8> = slice.iter().copied().map(quantize).collect();

    let image = match channels {
        1 => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, raw).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
        other => return Err(Error::UnsupportedChannels(other)),
    };
    image.ok_or_else(|| Error::ShapeMismatch {
        expected: format!("{height}x{width}x{channels} pixel buffer"),
        actual: format!("{:?}", slice.shape()),
    })
}

/// Scale a value in [0, 1] to the nearest 8-bit level.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(value: f32) -> u8 {
    // float to int casts saturate, NaN becomes 0
    (value * 255.0).round() as u8
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::{arr3, Array, Array2, Array4};

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(1.5), 255);
        assert_eq!(quantize(-0.5), 0);
        assert_eq!(quantize(f32::NAN), 0);
    }

    #[test]
    fn test_single_channel_batch() {
        let images = array_to_images(&Array4::<f32>::ones((1, 2, 2, 1))).unwrap();
        assert_eq!(images.len(), 1);
        let DynamicImage::ImageLuma8(image) = &images[0] else {
            panic!("expected a luma image, got {:?}", images[0].color());
        };
        assert_eq!(image.dimensions(), (2, 2));
        assert!(image.pixels().all(|p| p.0 == [255]));
    }

    #[test]
    fn test_unbatched_rgb() {
        // [H=1, W=2, C=3]
        let array = arr3(&[[[1.0f32, 0.0, 0.0], [0.0, 0.5, 1.0]]]);
        let images = array_to_images(&array).unwrap();
        assert_eq!(images.len(), 1);
        let DynamicImage::ImageRgb8(image) = &images[0] else {
            panic!("expected an RGB image, got {:?}", images[0].color());
        };
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 128, 255]);
    }

    #[test]
    fn test_batch_order_and_encodings() {
        let mut array = Array4::<f32>::zeros((3, 4, 5, 4));
        for n in 0..3 {
            array.index_axis_mut(Axis(0), n).fill(n as f32 / 2.0);
        }
        let images = array_to_images(&array).unwrap();
        assert_eq!(images.len(), 3);
        for (n, image) in images.iter().enumerate() {
            let DynamicImage::ImageRgba8(image) = image else {
                panic!("expected an RGBA image");
            };
            assert_eq!(image.dimensions(), (5, 4));
            let level = quantize(n as f32 / 2.0);
            assert!(image.pixels().all(|p| p.0 == [level; 4]));
        }

        let images = array_to_images(&Array4::<f32>::zeros((1, 2, 2, 2))).unwrap();
        assert!(matches!(images[0], DynamicImage::ImageLumaA8(_)));
    }

    #[test]
    fn test_non_standard_layout() {
        // channel first array viewed as channel last
        let chw = Array::from_shape_fn((3, 2, 2), |(c, y, x)| (c * 4 + y * 2 + x) as f32 / 11.0);
        let hwc = chw.view().permuted_axes([1, 2, 0]);
        let images = array_to_images(&hwc).unwrap();
        let image = images[0].to_rgb8();
        for y in 0..2 {
            for x in 0..2 {
                let expected: Vec<u8> = (0..3).map(|c| quantize(chw[[c, y, x]])).collect();
                assert_eq!(image.get_pixel(x as u32, y as u32).0.to_vec(), expected);
            }
        }
    }

    #[test]
    fn test_bad_shapes() {
        let err = array_to_images(&Array2::<f32>::zeros((4, 4))).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));

        let err = array_to_images(&Array4::<f32>::zeros((1, 2, 2, 5))).unwrap_err();
        assert!(matches!(err, Error::UnsupportedChannels(5)));

        let err = denormalize_to_images(&Array::<f32, _>::zeros((3, 2, 2))).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_denormalize() {
        // [N=1, C=3, H=1, W=2]
        let mut array = Array4::<f32>::zeros((1, 3, 1, 2));
        array[[0, 0, 0, 0]] = 1.0;
        array[[0, 1, 0, 0]] = -1.0;
        array[[0, 2, 0, 0]] = 3.0;
        array[[0, 0, 0, 1]] = -4.0;
        let images = denormalize_to_images(&array).unwrap();
        assert_eq!(images.len(), 1);
        let image = images[0].to_rgb8();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 128, 128]);
    }

    #[test]
    fn test_image_to_array() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(1, 0, image::Rgb([255, 0, 51]));
        let array = image_to_array(&DynamicImage::ImageRgb8(image));
        assert_eq!(array.dim(), (1, 2, 3));
        assert_eq!(array[[0, 1, 0]], 1.0);
        assert_eq!(array[[0, 1, 2]], 0.2);
        assert_eq!(array[[0, 0, 0]], 0.0);

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, image::Luma([255])));
        let array = image_to_array(&gray);
        assert_eq!(array.dim(), (2, 3, 1));
        let back = array_to_images(&array).unwrap();
        assert_eq!(back[0].to_luma8(), gray.to_luma8());
    }
}
