//! QR code generation
//!
//! Encodes a URL into a PNG image.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::utils::{AppError, AppResult};

/// Minimum rendered size in pixels (quiet zone included)
const MIN_SIZE: u32 = 256;

/// Encode `url` as a PNG QR code
pub fn encode_png(url: &str) -> AppResult<Vec<u8>> {
    let code = QrCode::new(url.as_bytes())
        .map_err(|e| AppError::internal(format!("QR encoding failed: {}", e)))?;

    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_SIZE, MIN_SIZE)
        .build();

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| AppError::internal(format!("Failed to write QR PNG: {}", e)))?;

    Ok(buffer.into_inner())
}
