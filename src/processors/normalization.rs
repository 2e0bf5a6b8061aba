//! Resize-and-normalize transform for recognition inputs.
//!
//! Converts a decoded RGB image into a fixed-shape CHW tensor whose values
//! are rescaled from `[0, 255]` to `[-1, 1]` via `(x/255 - 0.5) / 0.5`.
//! The affine is precomputed per channel as `alpha = scale / std` and
//! `beta = -mean / std` with `scale = 1/255`, `mean = std = 0.5`.

use crate::core::errors::DatasetResult;
use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::{stack, Array3, Array4, Axis};
use rayon::prelude::*;

const CHANNELS: usize = 3;

/// Resizes images to a fixed size and normalizes them into CHW tensors.
#[derive(Debug, Clone)]
pub struct ResizeNormalize {
    width: u32,
    height: u32,
    filter: FilterType,
    alpha: [f32; CHANNELS],
    beta: [f32; CHANNELS],
}

impl ResizeNormalize {
    /// Creates a transform targeting `width x height` with bilinear
    /// resampling.
    pub fn new(width: u32, height: u32) -> Self {
        // Triangle (bilinear) matches PIL's Image.BILINEAR
        Self::with_filter(width, height, FilterType::Triangle)
    }

    /// Creates a transform with an explicit resampling filter.
    pub fn with_filter(width: u32, height: u32, filter: FilterType) -> Self {
        let scale = 1.0 / 255.0;
        let mean = 0.5;
        let std = 0.5;
        Self {
            width,
            height,
            filter,
            alpha: [scale / std; CHANNELS],
            beta: [-mean / std; CHANNELS],
        }
    }

    /// Target size as `(width, height)`.
    pub fn target_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resizes and normalizes one image into a `(3, height, width)` tensor.
    pub fn apply(&self, img: &RgbImage) -> Array3<f32> {
        let resized;
        let source = if img.dimensions() == (self.width, self.height) {
            img
        } else {
            resized = imageops::resize(img, self.width, self.height, self.filter);
            &resized
        };

        let mut tensor = Array3::zeros((CHANNELS, self.height as usize, self.width as usize));
        for (x, y, pixel) in source.enumerate_pixels() {
            for c in 0..CHANNELS {
                tensor[[c, y as usize, x as usize]] =
                    f32::from(pixel[c]) * self.alpha[c] + self.beta[c];
            }
        }
        tensor
    }

    /// Resizes and normalizes a batch into a `(n, 3, height, width)` tensor.
    ///
    /// Images are processed in parallel; all outputs share the fixed target
    /// shape, so stacking cannot ragged-fail.
    ///
    /// # Errors
    ///
    /// Returns a tensor error if stacking fails.
    pub fn apply_batch(&self, imgs: &[RgbImage]) -> DatasetResult<Array4<f32>> {
        if imgs.is_empty() {
            return Ok(Array4::zeros((
                0,
                CHANNELS,
                self.height as usize,
                self.width as usize,
            )));
        }

        let tensors: Vec<Array3<f32>> = imgs.par_iter().map(|img| self.apply(img)).collect();
        let views: Vec<_> = tensors.iter().map(Array3::view).collect();
        Ok(stack(Axis(0), &views)?)
    }
}
