/*!
# Tensor images

Conversions between `tch` tensors, ndarray arrays and images.
Only available with the `tch` feature.
 */

use image::DynamicImage;
use ndarray::{ArrayD, IxDyn};
use tch::{Device, Kind, Tensor};

use crate::error::{Error, Result};
use crate::ndarray::{denormalize_to_images, image_to_array};

pub trait NDATensorExt: Sized {
    fn to_ndarray(&self) -> Result<ArrayD<f32>>;

    fn from_ndarray(array: &ArrayD<f32>) -> Self;
}

impl NDATensorExt for Tensor {
    fn to_ndarray(&self) -> Result<ArrayD<f32>> {
        let dims: Vec<usize> = self.size().iter().map(|&d| d as usize).collect();
        let flat = self
            .to_device(Device::Cpu)
            .to_kind(Kind::Float)
            .contiguous()
            .view([-1]);
        let data = Vec::<f32>::from(&flat);
        ArrayD::from_shape_vec(IxDyn(&dims), data).map_err(|err| Error::ShapeMismatch {
            expected: format!("{dims:?}"),
            actual: err.to_string(),
        })
    }

    fn from_ndarray(array: &ArrayD<f32>) -> Self {
        let shape: Vec<i64> = array.shape().iter().map(|&d| d as i64).collect();
        let data: Vec<f32> = array.iter().copied().collect();
        Tensor::of_slice(&data).reshape(shape.as_slice())
    }
}

pub trait ImageTensorExt: Sized {
    /**
    Convert a batch of images with values in about [-1, 1] to 8-bit images.

    # Arguments
    - self: Tensor - The images [N, C, H, W], any kind and device

    # Returns
    Vec<DynamicImage> - One image per batch element
     */
    fn to_images(&self) -> Result<Vec<DynamicImage>>;

    /**
    Convert an image to a tensor with values in [-1, 1].

    # Returns
    Tensor - The image [1, C, H, W] as float
     */
    fn from_image(image: &DynamicImage) -> Self;
}

impl ImageTensorExt for Tensor {
    fn to_images(&self) -> Result<Vec<DynamicImage>> {
        let array = self.to_ndarray()?;
        denormalize_to_images(&array)
    }

    fn from_image(image: &DynamicImage) -> Self {
        let array = image_to_array(image).into_dyn();
        let hwc = Tensor::from_ndarray(&array);
        hwc.permute(&[2, 0, 1]).unsqueeze(0) * 2.0 - 1.0
    }
}
