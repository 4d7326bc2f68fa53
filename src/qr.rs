use ::image::imageops::{self, FilterType};
use ::image::{GrayImage, Luma};
use qrcode::QrCode;

use crate::error::AppError;

/// Builds the profile link for a handle. The handle is appended verbatim.
pub fn profile_url(base: &str, handle: &str) -> String {
    format!("{}{}", base, handle)
}

/// Encodes `url` as a QR code scaled to exactly `size` x `size` pixels.
///
/// Modules are rendered one pixel each (with the standard four-module quiet
/// zone) and then scaled with nearest-neighbour sampling, which keeps module
/// edges hard at any target size.
pub fn generate_qr(url: &str, size: u32) -> Result<GrayImage, AppError> {
    let code = QrCode::new(url.as_bytes())
        .map_err(|e| AppError::Encoding(format!("{}: {}", url, e)))?;

    let modules = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(1, 1)
        .build();

    Ok(imageops::resize(&modules, size, size, FilterType::Nearest))
}
