//! Screenshot validation before vision-API calls.
//!
//! Uploaded screenshots are sniffed (magic bytes) and size-capped before
//! the raw bytes are forwarded to the completion API. Decoding is left to
//! the vendor; we only refuse obvious garbage.

use image::ImageFormat;

use crate::error::CoreError;

/// Maximum accepted screenshot payload, in bytes (8 MiB).
pub const MAX_SCREENSHOT_BYTES: usize = 8 * 1024 * 1024;

/// Formats the vision endpoint accepts.
const ACCEPTED_FORMATS: &[ImageFormat] =
    &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// Validate screenshot bytes, returning the detected format's MIME type.
pub fn validate_screenshot(bytes: &[u8]) -> Result<&'static str, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("Screenshot is empty".to_string()));
    }
    if bytes.len() > MAX_SCREENSHOT_BYTES {
        return Err(CoreError::Validation(format!(
            "Screenshot exceeds maximum size of {MAX_SCREENSHOT_BYTES} bytes"
        )));
    }

    let format = image::guess_format(bytes).map_err(|_| {
        CoreError::Validation("Screenshot is not a recognized image format".to_string())
    })?;

    if !ACCEPTED_FORMATS.contains(&format) {
        return Err(CoreError::Validation(format!(
            "Unsupported image format {format:?}. Use PNG, JPEG, or WebP"
        )));
    }

    Ok(match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        _ => "image/webp",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// PNG magic followed by arbitrary data; guess_format only reads the
    /// signature.
    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    #[test]
    fn test_png_signature_accepted() {
        assert_eq!(validate_screenshot(PNG_HEADER).unwrap(), "image/png");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(validate_screenshot(&[]).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_screenshot(b"this is not an image at all").is_err());
    }

    #[test]
    fn test_oversized_rejected() {
        let mut big = PNG_HEADER.to_vec();
        big.resize(MAX_SCREENSHOT_BYTES + 1, 0);
        assert!(validate_screenshot(&big).is_err());
    }
}
