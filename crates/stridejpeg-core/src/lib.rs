//! stridejpeg Core - Strided pixel buffer to JPEG encoding
//!
//! This crate turns an arbitrarily laid out in-memory pixel buffer (any of
//! seven numeric sample formats, any channel count, any stride, optionally a
//! sub-rectangle of a larger buffer) into 8-bit scanlines and streams them
//! into a JPEG encoder.
//!
//! # Module Structure
//!
//! - `format` - Color modes, sample formats, and 8-bit quantization
//! - `half` - Half-precision float conversion
//! - `layout` - Buffer layout description and validation
//! - `sampler` - Strided per-channel sample access
//! - `scanline` - Row streaming and the compression backend trait
//! - `encode` - JPEG backend and encode entry points
//!
//! # Usage
//!
//! ```ignore
//! use stridejpeg_core::{encode, ColorMode, FrameLayout};
//!
//! // Write the alpha channel of an RGBA buffer as a grayscale JPEG
//! let layout = FrameLayout::new(width, height)
//!     .with_color_mode(ColorMode::Grayscale)
//!     .with_source_channels(4)
//!     .with_channel_offset(3);
//! let jpeg = encode(&rgba, &layout)?;
//! ```

pub mod encode;
pub mod error;
pub mod format;
pub mod half;
pub mod layout;
pub mod sampler;
pub mod scanline;

pub use encode::{
    encode, encode_to_writer, encode_with_backend, EncodeOptions, Encoder, JpegBackend,
};
pub use error::{BackendError, EncodeError, LayoutError};
pub use format::{ColorMode, PixelFormat};
pub use layout::{FrameLayout, ResolvedLayout};
pub use sampler::BufferSampler;
pub use scanline::{FrameHeader, MetadataTag, ScanlineBackend, ScanlineProducer, StreamState};
