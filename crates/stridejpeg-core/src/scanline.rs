//! Row-by-row streaming of sampled pixels into a compression backend.
//!
//! [`ScanlineProducer`] owns one reusable scanline buffer, fills it from a
//! [`BufferSampler`] one row at a time, and submits each row to a
//! [`ScanlineBackend`] in strictly ascending order. The backend sees exactly
//! `height` rows between `begin` and `finish`.
//!
//! The producer moves through three states:
//!
//! ```text
//! Configuring --start--> Streaming { next_row } --finish--> (consumed)
//!                              |
//!                              +--any backend error--> Failed
//! ```

use log::trace;

use crate::error::BackendError;
use crate::format::ColorMode;
use crate::sampler::BufferSampler;

/// Frame parameters handed to a backend before streaming starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub width: u32,
    pub height: u32,
    /// Channels per output pixel (3 for RGB, 1 for grayscale)
    pub channels: usize,
    pub color_mode: ColorMode,
}

impl FrameHeader {
    /// Length of one scanline in bytes.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels
    }
}

/// Auxiliary data a backend may embed alongside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataTag {
    /// An ICC color profile
    IccProfile,
}

/// A stateful, order-dependent compression backend.
///
/// Call order: `configure`, `begin`, optionally `embed_metadata`, then
/// `submit_row` exactly `height` times, then `finish`. A backend is used for
/// one frame only.
pub trait ScanlineBackend {
    /// Establish frame parameters.
    fn configure(&mut self, header: &FrameHeader) -> Result<(), BackendError>;

    /// Start accepting scanlines.
    fn begin(&mut self) -> Result<(), BackendError>;

    /// Attach auxiliary data. Only valid after `begin` and before the first row.
    fn embed_metadata(&mut self, tag: MetadataTag, _data: &[u8]) -> Result<(), BackendError> {
        Err(BackendError::Unsupported(format!("{tag:?} metadata")))
    }

    /// Accept the next scanline.
    fn submit_row(&mut self, row: &[u8]) -> Result<(), BackendError>;

    /// Complete the stream and return the compressed bytes.
    fn finish(self) -> Result<Vec<u8>, BackendError>
    where
        Self: Sized;
}

/// Where a [`ScanlineProducer`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Layout resolved, backend not yet started
    Configuring,
    /// Rows `0..next_row` have been submitted
    Streaming { next_row: usize },
    /// A backend call failed; no further calls are made
    Failed,
}

/// Drives one frame from a [`BufferSampler`] through a [`ScanlineBackend`].
pub struct ScanlineProducer<'a, B> {
    sampler: BufferSampler<'a>,
    backend: B,
    row: Vec<u8>,
    state: StreamState,
    embedded: Vec<MetadataTag>,
}

impl<'a, B: ScanlineBackend> ScanlineProducer<'a, B> {
    pub fn new(sampler: BufferSampler<'a>, backend: B) -> Self {
        let row = vec![0u8; sampler.layout().scanline_len()];
        Self {
            sampler,
            backend,
            row,
            state: StreamState::Configuring,
            embedded: Vec::new(),
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Frame parameters derived from the sampler's layout.
    pub fn header(&self) -> FrameHeader {
        let layout = self.sampler.layout();
        FrameHeader {
            width: layout.width as u32,
            height: layout.height as u32,
            channels: layout.output_channels,
            color_mode: layout.color_mode,
        }
    }

    /// Rows not yet submitted.
    pub fn rows_remaining(&self) -> usize {
        let height = self.sampler.layout().height;
        match self.state {
            StreamState::Configuring => height,
            StreamState::Streaming { next_row } => height - next_row,
            StreamState::Failed => 0,
        }
    }

    /// Configure the backend and begin streaming.
    pub fn start(&mut self) -> Result<(), BackendError> {
        if self.state != StreamState::Configuring {
            return Err(BackendError::InvalidState("stream already started"));
        }
        let header = self.header();
        trace!("Configuring backend: {header:?}");
        self.guard(|backend| {
            backend.configure(&header)?;
            backend.begin()
        })?;
        self.state = StreamState::Streaming { next_row: 0 };
        Ok(())
    }

    /// Hand auxiliary data to the backend. Must follow `start` and precede
    /// the first row. Each tag may be embedded once.
    pub fn embed_metadata(&mut self, tag: MetadataTag, data: &[u8]) -> Result<(), BackendError> {
        if self.state != (StreamState::Streaming { next_row: 0 }) {
            return Err(BackendError::InvalidState(
                "metadata must be embedded before the first row",
            ));
        }
        if self.embedded.contains(&tag) {
            return Err(BackendError::InvalidState("metadata tag already embedded"));
        }
        trace!("Embedding {tag:?} ({} bytes)", data.len());
        self.guard(|backend| backend.embed_metadata(tag, data))?;
        self.embedded.push(tag);
        Ok(())
    }

    /// Sample and submit the next row. Returns the index of the row written.
    pub fn write_next_row(&mut self) -> Result<usize, BackendError> {
        let row = match self.state {
            StreamState::Streaming { next_row } if next_row < self.sampler.layout().height => {
                next_row
            }
            StreamState::Streaming { .. } => {
                return Err(BackendError::InvalidState("all rows already submitted"))
            }
            StreamState::Configuring => return Err(BackendError::InvalidState("stream not started")),
            StreamState::Failed => return Err(BackendError::InvalidState("stream failed")),
        };

        self.sampler.fill_row(row, &mut self.row);
        if let Err(e) = self.backend.submit_row(&self.row) {
            self.state = StreamState::Failed;
            return Err(e);
        }
        self.state = StreamState::Streaming { next_row: row + 1 };
        Ok(row)
    }

    /// Finalize the backend once every row has been submitted.
    pub fn finish(self) -> Result<Vec<u8>, BackendError> {
        match self.state {
            StreamState::Streaming { next_row } if next_row == self.sampler.layout().height => {
                trace!("Finalizing after {next_row} rows");
                self.backend.finish()
            }
            StreamState::Streaming { .. } => Err(BackendError::InvalidState(
                "finish called before all rows were submitted",
            )),
            StreamState::Configuring => Err(BackendError::InvalidState("stream not started")),
            StreamState::Failed => Err(BackendError::InvalidState("stream failed")),
        }
    }

    /// Run the whole frame: start, every row in order, finish.
    pub fn run(mut self) -> Result<Vec<u8>, BackendError> {
        self.start()?;
        self.stream_rows()?;
        self.finish()
    }

    /// Submit all remaining rows.
    pub fn stream_rows(&mut self) -> Result<(), BackendError> {
        while self.rows_remaining() > 0 {
            self.write_next_row()?;
        }
        Ok(())
    }

    fn guard<T>(
        &mut self,
        f: impl FnOnce(&mut B) -> Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        f(&mut self.backend).inspect_err(|_| self.state = StreamState::Failed)
    }
}
