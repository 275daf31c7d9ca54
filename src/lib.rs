//! qrgen - QR Code (Model 2) encoder
//!
//! A pure Rust library that encodes arbitrary byte content into the QR Code
//! module matrix defined by ISO/IEC 18004:2006, covering versions 1-40, all
//! four error correction levels and the numeric, alphanumeric and byte
//! modes. The encoder emits a boolean bitmap plus metadata; rendering to
//! images or text is layered on top in [`render`].

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod debug;
/// Encoding stages (bit buffer, data modes, versions, error correction)
pub mod encoder;
/// Core data structures (QrCode, BitMatrix, ECLevel, MaskPattern)
pub mod models;
mod pipeline;
/// Bitmap consumers (text art, raster images)
pub mod render;
/// Symbol matrix construction (function patterns, masking, penalties)
pub mod symbol;

pub use models::{BitMatrix, ECLevel, MaskPattern, QrCode};

use std::error::Error;
use std::fmt;

/// Encoding failure reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The payload exceeds the capacity of version 40 at the requested
    /// level, or of a forced version
    ContentTooLong,
    /// A forced version outside 1..=40
    InvalidVersion,
    /// A mask override outside 0..=7
    InvalidOption,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::ContentTooLong => write!(f, "content too long to encode"),
            EncodeError::InvalidVersion => write!(f, "version must be between 1 and 40"),
            EncodeError::InvalidOption => write!(f, "mask override must be between 0 and 7"),
        }
    }
}

impl Error for EncodeError {}

/// Optional encoding parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Quiet zone width in modules added on every side (default 4)
    pub quiet_zone: usize,
    /// Force a specific version 1-40 instead of choosing the smallest
    pub version: Option<u8>,
    /// Skip mask selection and apply this mask index 0-7
    pub mask: Option<u8>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quiet_zone: 4,
            version: None,
            mask: None,
        }
    }
}

/// Encode content at the given error correction level with default options.
///
/// The smallest version able to hold the payload is chosen and the mask with
/// the lowest penalty score is applied.
///
/// # Example
///
/// ```
/// let qr = qrgen::encode(b"HELLO WORLD", qrgen::ECLevel::Q).unwrap();
/// assert_eq!(qr.version, 1);
/// assert_eq!(qr.size, 21);
/// ```
pub fn encode(content: &[u8], level: ECLevel) -> Result<QrCode, EncodeError> {
    encode_with_options(content, level, &EncodeOptions::default())
}

/// Encode content with explicit options
pub fn encode_with_options(
    content: &[u8],
    level: ECLevel,
    options: &EncodeOptions,
) -> Result<QrCode, EncodeError> {
    pipeline::encode_to_qr_code(content, level, options)
}

/// Encode content into a specific version, failing with
/// [`EncodeError::ContentTooLong`] if the payload does not fit it
pub fn encode_fixed_version(
    content: &[u8],
    level: ECLevel,
    version: u8,
) -> Result<QrCode, EncodeError> {
    encode_with_options(
        content,
        level,
        &EncodeOptions {
            version: Some(version),
            ..EncodeOptions::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_smoke() {
        let qr = encode(b"HELLO WORLD", ECLevel::Q).unwrap();
        assert_eq!(qr.version, 1);
        assert_eq!(qr.size, 21);
        assert_eq!(qr.quiet_zone, 4);
        assert_eq!(qr.width(), 29);
    }

    #[test]
    fn test_invalid_version() {
        assert_eq!(
            encode_fixed_version(b"x", ECLevel::L, 0),
            Err(EncodeError::InvalidVersion)
        );
        assert_eq!(
            encode_fixed_version(b"x", ECLevel::L, 41),
            Err(EncodeError::InvalidVersion)
        );
    }

    #[test]
    fn test_invalid_mask_override() {
        let options = EncodeOptions {
            mask: Some(8),
            ..EncodeOptions::default()
        };
        assert_eq!(
            encode_with_options(b"x", ECLevel::L, &options),
            Err(EncodeError::InvalidOption)
        );
    }

    #[test]
    fn test_content_too_long() {
        let content = vec![b'a'; 2954];
        assert_eq!(
            encode(&content, ECLevel::L),
            Err(EncodeError::ContentTooLong)
        );
    }
}
