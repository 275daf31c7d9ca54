//! QR code encoding modules
//!
//! This module contains the stages that turn a payload into the final
//! message bit stream:
//! - Bit buffer assembly
//! - Mode analysis and segment encoding (numeric, alphanumeric, byte)
//! - Version catalog and version selection
//! - GF(256) arithmetic and Reed-Solomon error correction
//! - Format and version information words

/// Append-only bit buffer
pub mod bits;
/// Mode analysis and segment bit emission
pub mod data;
/// Format info BCH(15,5) and version info BCH(18,6) words
pub mod format;
/// GF(256) field tables and generator polynomials
pub mod galois;
/// Reed-Solomon error correction encoder
pub mod reed_solomon;
/// Version capacity tables, block layouts and version selection
pub mod version;
