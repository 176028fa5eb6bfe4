//! Frame encoding entry points.
//!
//! This module provides functionality for:
//! - Encoding a strided source buffer to JPEG bytes ([`encode`], [`Encoder`])
//! - Writing the encoded frame to any `std::io::Write` sink
//! - Driving a caller-supplied [`ScanlineBackend`] instead of JPEG
//!
//! # Architecture
//!
//! Every encode call validates the layout, builds a [`BufferSampler`], and
//! streams rows through a fresh backend via [`ScanlineProducer`]. Nothing is
//! retained between calls, so one [`Encoder`] may be shared across threads.
//! All operations are synchronous.
//!
//! # Examples
//!
//! ```ignore
//! use stridejpeg_core::encode::encode;
//! use stridejpeg_core::{FrameLayout, PixelFormat};
//!
//! let pixels: Vec<u8> = vec![0u8; 64 * 64 * 3 * 2]; // RGB, 16-bit
//! let layout = FrameLayout::new(64, 64).with_source_format(PixelFormat::UInt16);
//! let jpeg = encode(&pixels, &layout).unwrap();
//! ```

mod jpeg;

use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::EncodeError;
use crate::layout::FrameLayout;
use crate::sampler::BufferSampler;
use crate::scanline::{MetadataTag, ScanlineBackend, ScanlineProducer};

pub use jpeg::{JpegBackend, DEFAULT_QUALITY};

/// Settings applied to every frame an [`Encoder`] produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncodeOptions {
    /// JPEG quality (1-100, clamped)
    pub quality: u8,
    /// ICC profile to embed, if any
    pub icc_profile: Option<Vec<u8>>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            icc_profile: None,
        }
    }
}

/// A reusable JPEG encoder.
///
/// Holds only settings; each [`Encoder::encode`] call owns its own
/// compression state for its whole duration.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Encoder with the given quality and no ICC profile.
    pub fn with_quality(quality: u8) -> Self {
        Self::new(EncodeOptions {
            quality,
            ..Default::default()
        })
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode `source`, laid out as described by `layout`, to JPEG bytes.
    ///
    /// # Errors
    ///
    /// * [`EncodeError::Layout`] if the layout is invalid or addresses bytes
    ///   outside `source`; nothing is encoded in that case.
    /// * [`EncodeError::Backend`] if JPEG compression fails.
    pub fn encode(&self, source: &[u8], layout: &FrameLayout) -> Result<Vec<u8>, EncodeError> {
        let backend = JpegBackend::new(self.options.quality);
        drive(source, layout, backend, self.options.icc_profile.as_deref())
    }

    /// Encode and write the JPEG bytes to `writer`.
    ///
    /// Nothing is written if encoding fails.
    pub fn encode_to_writer<W: Write>(
        &self,
        source: &[u8],
        layout: &FrameLayout,
        mut writer: W,
    ) -> Result<usize, EncodeError> {
        let bytes = self.encode(source, layout)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(bytes.len())
    }
}

/// Encode `source` to JPEG with default options (quality 75, no ICC profile).
///
/// # Example
///
/// ```ignore
/// use stridejpeg_core::{encode, FrameLayout};
///
/// let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
/// let jpeg = encode(&pixels, &FrameLayout::new(100, 100)).unwrap();
///
/// // Verify JPEG magic bytes
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode(source: &[u8], layout: &FrameLayout) -> Result<Vec<u8>, EncodeError> {
    Encoder::default().encode(source, layout)
}

/// Encode `source` with `options` and write the result to `writer`.
///
/// Returns the number of bytes written.
pub fn encode_to_writer<W: Write>(
    source: &[u8],
    layout: &FrameLayout,
    options: &EncodeOptions,
    writer: W,
) -> Result<usize, EncodeError> {
    Encoder::new(options.clone()).encode_to_writer(source, layout, writer)
}

/// Stream `source` through a caller-supplied backend.
pub fn encode_with_backend<B: ScanlineBackend>(
    source: &[u8],
    layout: &FrameLayout,
    backend: B,
) -> Result<Vec<u8>, EncodeError> {
    drive(source, layout, backend, None)
}

fn drive<B: ScanlineBackend>(
    source: &[u8],
    layout: &FrameLayout,
    backend: B,
    icc_profile: Option<&[u8]>,
) -> Result<Vec<u8>, EncodeError> {
    let sampler = BufferSampler::new(source, layout)?;
    debug!("Encoding frame: {:?}", sampler.layout());

    let mut producer = ScanlineProducer::new(sampler, backend);
    producer.start()?;
    if let Some(icc) = icc_profile {
        producer.embed_metadata(MetadataTag::IccProfile, icc)?;
    }
    producer.stream_rows()?;
    let bytes = producer.finish()?;

    debug!("Encoded {} bytes", bytes.len());
    Ok(bytes)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
