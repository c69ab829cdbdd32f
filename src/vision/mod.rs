//! Turns uploaded bytes into classifier input and back into a displayable JPEG.

use crate::{Error, Result};
use base64::{Engine, prelude::BASE64_STANDARD};
use image::{DynamicImage, codecs::jpeg::JpegEncoder, imageops::FilterType};
use std::io::Cursor;
use tract_onnx::prelude::tract_ndarray::Array4;
use tracing::debug;

/// Side length of the square classifier input.
pub const INPUT_SIZE: u32 = 224;
pub const CHANNELS: usize = 3;
/// JPEG quality used when echoing the upload back to the client.
pub const JPEG_QUALITY: u8 = 95;

/// Batched NHWC tensor, shape `[1, 224, 224, 3]`, RGB, scaled to [-1, 1].
pub type InputTensor = Array4<f32>;

pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(bytes).map_err(|e| Error::decode(e.to_string()))?;
    debug!("Decoded {}x{} image", image.width(), image.height());
    Ok(image)
}

/// Resizes to the classifier's input size and applies MobileNet scaling.
pub fn to_tensor(image: &DynamicImage) -> InputTensor {
    let side = INPUT_SIZE as usize;
    let rgb = image
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        .to_rgb8();

    Array4::from_shape_fn((1, side, side, CHANNELS), |(_, y, x, c)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        scale(pixel[c])
    })
}

pub fn normalize(bytes: &[u8]) -> Result<InputTensor> {
    decode(bytes).map(|image| to_tensor(&image))
}

/// Re-encodes as RGB JPEG and returns standard base64 text.
pub fn encode_jpeg_base64(image: &DynamicImage) -> Result<String> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY))
        .map_err(|e| Error::encode(e.to_string()))?;

    Ok(BASE64_STANDARD.encode(buffer.into_inner()))
}

fn scale(value: u8) -> f32 {
    value as f32 / 127.5 - 1.0
}
