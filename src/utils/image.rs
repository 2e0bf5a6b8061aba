//! Decoding raw image bytes into in-memory images.

use image::RgbImage;

/// Decodes encoded image bytes (any format the `image` crate detects) and
/// converts the result to 3-channel RGB.
///
/// The raw [`image::ImageError`] is returned so callers can attach record
/// context; the dataset layer treats this failure as recoverable.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, image::ImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgb8())
}
