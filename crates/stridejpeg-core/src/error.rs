//! Error types for layout validation, backend failures and encoding.

use thiserror::Error;

/// A frame layout that cannot be scanned safely.
///
/// All of these are detected once, before the first row is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// An explicit source channel count of zero
    #[error("Source channel count must be non-zero")]
    ZeroChannels,

    /// The channels read for one pixel would spill into the next pixel
    #[error("Channel window of {window} bytes does not fit in a pixel stride of {pixel_stride} bytes")]
    ChannelWindowExceedsStride { window: usize, pixel_stride: usize },

    /// Consecutive rows would overlap
    #[error("Row stride of {row_stride} bytes is smaller than one row ({minimum} bytes)")]
    RowStrideTooSmall { row_stride: usize, minimum: usize },

    /// The scan would read past the end of the source buffer
    #[error("Source buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Offset arithmetic does not fit in `usize`
    #[error("Layout offsets overflow the addressable range")]
    Overflow,
}

/// A failure reported by a compression backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// A backend call arrived out of order (e.g. a row before `begin`)
    #[error("Backend call out of order: {0}")]
    InvalidState(&'static str),

    /// A submitted scanline has the wrong number of bytes
    #[error("Invalid scanline: expected {expected} bytes, got {actual}")]
    RowLength { expected: usize, actual: usize },

    /// The backend cannot honor a request (e.g. metadata it cannot embed)
    #[error("Unsupported by backend: {0}")]
    Unsupported(String),

    /// The underlying codec failed
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

/// Errors that can occur while encoding a frame.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The frame layout is invalid for the given source buffer
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The compression backend failed
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Writing the encoded bytes to the output sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
