// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

const GAMMA: Float = 2.2;

/// Clamp to [0, 1] and gamma encode into an 8-bit channel.
pub fn to_srgb8(value: Float) -> u8 {
    let encoded = value.clamp(0.0, 1.0).powf(1.0 / GAMMA);
    (encoded * 255.0).round() as u8
}

pub fn write_png_to_file(image: &Bitmap, file_path: &str) -> image::ImageResult<()> {
    log::info!("Starting writing png image: {}.", file_path);

    let width = image.width();
    let output = image::RgbImage::from_fn(width as u32, image.height() as u32, |x, y| {
        let pixel = image.pixels()[y as usize * width + x as usize];
        image::Rgb([to_srgb8(pixel.x), to_srgb8(pixel.y), to_srgb8(pixel.z)])
    });
    output.save(file_path)
}
