//! JPEG compression backend.
//!
//! Collects scanlines and hands the finished frame to the `image` crate's
//! JPEG encoder on [`ScanlineBackend::finish`].

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use crate::error::BackendError;
use crate::format::ColorMode;
use crate::scanline::{FrameHeader, MetadataTag, ScanlineBackend};

/// Default JPEG quality, matching libjpeg's defaults.
pub const DEFAULT_QUALITY: u8 = 75;

/// A single-use JPEG backend.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
#[derive(Debug)]
pub struct JpegBackend {
    quality: u8,
    header: Option<FrameHeader>,
    streaming: bool,
    icc_profile: Option<Vec<u8>>,
    pixels: Vec<u8>,
    rows: usize,
}

impl JpegBackend {
    /// Create a backend. Quality is clamped to 1-100.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            header: None,
            streaming: false,
            icc_profile: None,
            pixels: Vec::new(),
            rows: 0,
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    fn streaming_header(&self) -> Result<FrameHeader, BackendError> {
        match (self.streaming, self.header) {
            (true, Some(header)) => Ok(header),
            _ => Err(BackendError::InvalidState("stream not started")),
        }
    }
}

impl Default for JpegBackend {
    fn default() -> Self {
        Self::new(DEFAULT_QUALITY)
    }
}

fn color_type(mode: ColorMode) -> ExtendedColorType {
    match mode {
        ColorMode::Rgb => ExtendedColorType::Rgb8,
        ColorMode::Grayscale => ExtendedColorType::L8,
    }
}

impl ScanlineBackend for JpegBackend {
    fn configure(&mut self, header: &FrameHeader) -> Result<(), BackendError> {
        if self.streaming {
            return Err(BackendError::InvalidState("configure after begin"));
        }
        if header.width == 0 || header.height == 0 {
            return Err(BackendError::Encoding(format!(
                "invalid dimensions {}x{}",
                header.width, header.height
            )));
        }
        if header.channels != header.color_mode.channels() {
            return Err(BackendError::Unsupported(format!(
                "{} channels for {:?}",
                header.channels, header.color_mode
            )));
        }

        let frame_len = header
            .row_len()
            .checked_mul(header.height as usize)
            .ok_or_else(|| BackendError::Encoding("frame too large".to_string()))?;
        self.pixels.clear();
        self.pixels
            .try_reserve_exact(frame_len)
            .map_err(|e| BackendError::Encoding(e.to_string()))?;
        self.header = Some(*header);
        Ok(())
    }

    fn begin(&mut self) -> Result<(), BackendError> {
        if self.header.is_none() {
            return Err(BackendError::InvalidState("begin before configure"));
        }
        if self.streaming {
            return Err(BackendError::InvalidState("stream already started"));
        }
        self.streaming = true;
        Ok(())
    }

    fn embed_metadata(&mut self, tag: MetadataTag, data: &[u8]) -> Result<(), BackendError> {
        self.streaming_header()?;
        if self.rows > 0 {
            return Err(BackendError::InvalidState(
                "metadata must be embedded before the first row",
            ));
        }
        match tag {
            MetadataTag::IccProfile if self.icc_profile.is_some() => {
                Err(BackendError::InvalidState("ICC profile already embedded"))
            }
            MetadataTag::IccProfile => {
                self.icc_profile = Some(data.to_vec());
                Ok(())
            }
        }
    }

    fn submit_row(&mut self, row: &[u8]) -> Result<(), BackendError> {
        let header = self.streaming_header()?;
        if self.rows >= header.height as usize {
            return Err(BackendError::InvalidState("all rows already submitted"));
        }
        if row.len() != header.row_len() {
            return Err(BackendError::RowLength {
                expected: header.row_len(),
                actual: row.len(),
            });
        }
        self.pixels.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, BackendError> {
        let header = self.streaming_header()?;
        if self.rows != header.height as usize {
            return Err(BackendError::InvalidState(
                "finish called before all rows were submitted",
            ));
        }

        let mut buffer = Cursor::new(Vec::new());
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        if let Some(icc) = self.icc_profile {
            encoder
                .set_icc_profile(icc)
                .map_err(|e| BackendError::Unsupported(e.to_string()))?;
        }
        encoder
            .write_image(
                &self.pixels,
                header.width,
                header.height,
                color_type(header.color_mode),
            )
            .map_err(|e| BackendError::Encoding(e.to_string()))?;

        Ok(buffer.into_inner())
    }
}
