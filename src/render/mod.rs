//! Renderers consuming the emitted bitmap
//!
//! The encoder hands renderers a finished module matrix; nothing here feeds
//! back into encoding. Text art suits terminals, raster output suits files
//! and HTTP responses.

pub mod image;
pub mod text;
