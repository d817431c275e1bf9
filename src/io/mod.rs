// Copyright @yucwang 2026

pub mod exr_utils;
pub mod png_utils;

use crate::math::bitmap::Bitmap;

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum OutputError {
    Exr(exr::error::Error),
    Image(image::ImageError),
    UnknownFormat(String),
    EmptyImage,
}

impl From<exr::error::Error> for OutputError {
    fn from(err: exr::error::Error) -> Self {
        OutputError::Exr(err)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(err: image::ImageError) -> Self {
        OutputError::Image(err)
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Exr(err) => write!(f, "exr error: {}", err),
            OutputError::Image(err) => write!(f, "image error: {}", err),
            OutputError::UnknownFormat(path) => write!(f, "unsupported output format: {}", path),
            OutputError::EmptyImage => write!(f, "image has no pixels"),
        }
    }
}

impl std::error::Error for OutputError {}

/// Write `image` in the format named by the file extension (`.exr` or `.png`).
pub fn write_image(image: &Bitmap, file_path: &str) -> Result<(), OutputError> {
    if image.is_empty() {
        return Err(OutputError::EmptyImage);
    }
    let extension = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("exr") => Ok(exr_utils::write_exr_to_file(image, file_path)?),
        Some("png") => Ok(png_utils::write_png_to_file(image, file_path)?),
        _ => Err(OutputError::UnknownFormat(file_path.to_string())),
    }
}
