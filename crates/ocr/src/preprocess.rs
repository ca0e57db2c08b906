use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Contrast gain applied around mid-gray. Statement scans are low
/// contrast; doubling the distance from mid-gray makes the glyph edges
/// crisp enough for Tesseract.
const CONTRAST_GAIN: f32 = 2.0;

/// Load a statement image file and return enhanced PNG bytes ready for OCR.
pub fn prepare_for_ocr(path: &Path) -> Result<Vec<u8>, PreprocessError> {
    let img = image::open(path)?;
    encode_as_png(enhance(img))
}

/// Same as [`prepare_for_ocr`] but starting from raw JPEG/PNG/WEBP bytes.
pub fn prepare_for_ocr_from_bytes(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    encode_as_png(enhance(img))
}

/// Grayscale + fixed-gain contrast boost.
fn enhance(img: DynamicImage) -> DynamicImage {
    // Tesseract degrades above ~300 DPI equivalents; cap very large scans.
    let img = if img.width() > 2800 || img.height() > 2800 {
        img.resize(2800, 2800, image::imageops::FilterType::Lanczos3)
    } else {
        img
    };

    let gray: GrayImage = img.to_luma8();
    let boosted: GrayImage = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let p = gray.get_pixel(x, y)[0] as f32;
        let v = (128.0 + (p - 128.0) * CONTRAST_GAIN).clamp(0.0, 255.0) as u8;
        Luma([v])
    });

    DynamicImage::ImageLuma8(boosted)
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
