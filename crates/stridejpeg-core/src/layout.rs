//! Source buffer layout description and validation.
//!
//! [`FrameLayout`] is what callers configure: dimensions, formats, and
//! optional strides/offsets. [`ResolvedLayout`] is the same description with
//! every default filled in and checked against a concrete buffer length. It is
//! immutable for the duration of a scan.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::format::{ColorMode, PixelFormat};

/// Layout of a source pixel buffer.
///
/// Strides are in bytes. `None` strides and channel count are resolved to
/// tight packing:
///
/// * `source_channels`: `color_mode.channels()`
/// * `pixel_stride`: `channel_size * source_channels`
/// * `row_stride`: `pixel_stride * width`
///
/// `pixel_offset` and `row_offset` select the origin of a sub-rectangle inside
/// a larger buffer; combined with an explicit `row_stride` this extracts a
/// slice without copying.
///
/// The channels read from each pixel must fit inside `pixel_stride`. A source
/// with fewer channels than the output mode reads (for example RGB output
/// from a single-channel buffer) is rejected with the auto stride; set
/// `pixel_stride` explicitly to the padded pixel size to read it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameLayout {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Output color mode (RGB or grayscale)
    pub color_mode: ColorMode,
    /// Numeric encoding of each source sample
    pub source_format: PixelFormat,
    /// Interleaved channels per source pixel (`None` = auto)
    pub source_channels: Option<u32>,
    /// First source channel to read
    pub channel_offset: u32,
    /// Bytes between consecutive pixels (`None` = auto)
    pub pixel_stride: Option<usize>,
    /// Bytes between consecutive rows (`None` = auto)
    pub row_stride: Option<usize>,
    /// Horizontal origin, in pixels
    pub pixel_offset: u32,
    /// Vertical origin, in rows
    pub row_offset: u32,
}

impl FrameLayout {
    /// A tightly packed RGB8 layout of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn with_source_format(mut self, format: PixelFormat) -> Self {
        self.source_format = format;
        self
    }

    pub fn with_source_channels(mut self, channels: u32) -> Self {
        self.source_channels = Some(channels);
        self
    }

    pub fn with_channel_offset(mut self, offset: u32) -> Self {
        self.channel_offset = offset;
        self
    }

    pub fn with_pixel_stride(mut self, stride: usize) -> Self {
        self.pixel_stride = Some(stride);
        self
    }

    pub fn with_row_stride(mut self, stride: usize) -> Self {
        self.row_stride = Some(stride);
        self
    }

    /// Start reading at pixel `x` of row `y`.
    pub fn with_origin(mut self, x: u32, y: u32) -> Self {
        self.pixel_offset = x;
        self.row_offset = y;
        self
    }

    /// Resolve defaults and check the layout's internal consistency.
    ///
    /// This does not look at a buffer; see [`FrameLayout::resolve_for`].
    pub fn resolve(&self) -> Result<ResolvedLayout, LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let output_channels = self.color_mode.channels();
        let source_channels = match self.source_channels {
            Some(0) => return Err(LayoutError::ZeroChannels),
            Some(n) => n as usize,
            None => output_channels,
        };
        let channel_size = self.source_format.channel_size();
        let width = self.width as usize;

        let pixel_stride = match self.pixel_stride {
            Some(stride) => stride,
            None => channel_size
                .checked_mul(source_channels)
                .ok_or(LayoutError::Overflow)?,
        };
        let row_stride = match self.row_stride {
            Some(stride) => stride,
            None => pixel_stride.checked_mul(width).ok_or(LayoutError::Overflow)?,
        };

        let resolved = ResolvedLayout {
            width,
            height: self.height as usize,
            color_mode: self.color_mode,
            source_format: self.source_format,
            output_channels,
            source_channels,
            channel_size,
            channel_offset: self.channel_offset as usize,
            pixel_stride,
            row_stride,
            pixel_offset: self.pixel_offset as usize,
            row_offset: self.row_offset as usize,
        };

        let window = resolved.channel_window()?;
        if window > pixel_stride {
            return Err(LayoutError::ChannelWindowExceedsStride {
                window,
                pixel_stride,
            });
        }

        if resolved.height > 1 {
            let minimum = pixel_stride.checked_mul(width).ok_or(LayoutError::Overflow)?;
            if row_stride < minimum {
                return Err(LayoutError::RowStrideTooSmall {
                    row_stride,
                    minimum,
                });
            }
        }

        Ok(resolved)
    }

    /// Resolve defaults and check that every read stays inside a buffer of
    /// `buffer_len` bytes.
    pub fn resolve_for(&self, buffer_len: usize) -> Result<ResolvedLayout, LayoutError> {
        let resolved = self.resolve()?;
        let needed = resolved.required_len()?;
        if needed > buffer_len {
            return Err(LayoutError::BufferTooSmall {
                needed,
                actual: buffer_len,
            });
        }
        Ok(resolved)
    }
}

/// A [`FrameLayout`] with all defaults resolved. All sizes are in bytes
/// except where noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLayout {
    /// Pixels per row
    pub width: usize,
    /// Rows
    pub height: usize,
    pub color_mode: ColorMode,
    pub source_format: PixelFormat,
    /// Channels per output pixel
    pub output_channels: usize,
    /// Channels per source pixel
    pub source_channels: usize,
    pub channel_size: usize,
    /// First source channel read, in channels
    pub channel_offset: usize,
    pub pixel_stride: usize,
    pub row_stride: usize,
    /// Horizontal origin, in pixels
    pub pixel_offset: usize,
    /// Vertical origin, in rows
    pub row_offset: usize,
}

impl ResolvedLayout {
    /// Bytes of one source pixel that a scan touches, measured from the start
    /// of the pixel.
    pub fn channel_window(&self) -> Result<usize, LayoutError> {
        self.channel_offset
            .checked_add(self.output_channels)
            .and_then(|n| n.checked_mul(self.channel_size))
            .ok_or(LayoutError::Overflow)
    }

    /// Minimum source buffer length: one past the furthest byte read.
    pub fn required_len(&self) -> Result<usize, LayoutError> {
        let last_row = self
            .row_offset
            .checked_add(self.height - 1)
            .and_then(|r| r.checked_mul(self.row_stride));
        let last_pixel = self
            .pixel_offset
            .checked_add(self.width - 1)
            .and_then(|p| p.checked_mul(self.pixel_stride));

        match (last_row, last_pixel) {
            (Some(row), Some(pixel)) => row
                .checked_add(pixel)
                .and_then(|n| n.checked_add(self.channel_window().ok()?))
                .ok_or(LayoutError::Overflow),
            _ => Err(LayoutError::Overflow),
        }
    }

    /// Byte offset of `channel` of `pixel` in `row`, all relative to the
    /// layout's origin.
    #[inline]
    pub fn offset(&self, row: usize, pixel: usize, channel: usize) -> usize {
        self.row_stride * (row + self.row_offset)
            + self.pixel_stride * (pixel + self.pixel_offset)
            + self.channel_size * (channel + self.channel_offset)
    }

    /// Length of one output scanline in bytes.
    #[inline]
    pub fn scanline_len(&self) -> usize {
        self.width * self.output_channels
    }
}
