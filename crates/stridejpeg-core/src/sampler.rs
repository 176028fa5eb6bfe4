//! Strided sample access over a source byte buffer.

use crate::error::LayoutError;
use crate::format::SampleFn;
use crate::layout::{FrameLayout, ResolvedLayout};

/// A read-only view of a source pixel buffer through a validated layout.
///
/// Construction checks that the furthest byte the layout can address lies
/// inside `source`, so every in-range `sample` call stays in bounds.
#[derive(Debug, Clone, Copy)]
pub struct BufferSampler<'a> {
    source: &'a [u8],
    layout: ResolvedLayout,
    convert: SampleFn,
}

impl<'a> BufferSampler<'a> {
    /// Create a sampler, resolving and validating `layout` against `source`.
    pub fn new(source: &'a [u8], layout: &FrameLayout) -> Result<Self, LayoutError> {
        let layout = layout.resolve_for(source.len())?;
        Ok(Self::from_resolved(source, layout))
    }

    fn from_resolved(source: &'a [u8], layout: ResolvedLayout) -> Self {
        Self {
            source,
            layout,
            convert: layout.source_format.sample_fn(),
        }
    }

    /// The resolved layout this sampler reads through.
    pub fn layout(&self) -> &ResolvedLayout {
        &self.layout
    }

    /// Read one output channel of one pixel as an 8-bit value.
    ///
    /// Requires `row < height`, `pixel < width` and
    /// `channel < output_channels`; out-of-range coordinates may read
    /// unrelated bytes or panic.
    #[inline]
    pub fn sample(&self, row: usize, pixel: usize, channel: usize) -> u8 {
        debug_assert!(row < self.layout.height, "row {row} out of range");
        debug_assert!(pixel < self.layout.width, "pixel {pixel} out of range");
        debug_assert!(
            channel < self.layout.output_channels,
            "channel {channel} out of range"
        );
        let offset = self.layout.offset(row, pixel, channel);
        (self.convert)(&self.source[offset..offset + self.layout.channel_size])
    }

    /// Fill `out` with one output scanline (channel-interleaved).
    ///
    /// `out` must be exactly [`ResolvedLayout::scanline_len`] bytes.
    pub fn fill_row(&self, row: usize, out: &mut [u8]) {
        let channels = self.layout.output_channels;
        debug_assert_eq!(out.len(), self.layout.scanline_len());
        for (pixel, dst) in out.chunks_exact_mut(channels).enumerate() {
            for (channel, value) in dst.iter_mut().enumerate() {
                *value = self.sample(row, pixel, channel);
            }
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Sampling is a pure function of its inputs.
        #[test]
        fn prop_sample_is_deterministic(
            (width, height) in (1u32..=8, 1u32..=8),
            seed in any::<u8>(),
        ) {
            let len = (width * height * 3) as usize;
            let pixels: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
            let sampler = BufferSampler::new(&pixels, &FrameLayout::new(width, height)).unwrap();

            for row in 0..height as usize {
                for pixel in 0..width as usize {
                    for channel in 0..3 {
                        let first = sampler.sample(row, pixel, channel);
                        prop_assert_eq!(first, sampler.sample(row, pixel, channel));
                        prop_assert_eq!(first, pixels[(row * width as usize + pixel) * 3 + channel]);
                    }
                }
            }
        }

        /// Property: Grayscale channel selection equals the chosen source channel.
        #[test]
        fn prop_channel_selection(
            (width, height) in (1u32..=8, 1u32..=8),
            channel in 0u32..3,
        ) {
            let len = (width * height * 3) as usize;
            let pixels: Vec<u8> = (0..len).map(|i| (i * 7 % 251) as u8).collect();
            let layout = FrameLayout::new(width, height)
                .with_color_mode(crate::format::ColorMode::Grayscale)
                .with_source_channels(3)
                .with_channel_offset(channel);
            let sampler = BufferSampler::new(&pixels, &layout).unwrap();

            for row in 0..height as usize {
                for pixel in 0..width as usize {
                    let expected = pixels[(row * width as usize + pixel) * 3 + channel as usize];
                    prop_assert_eq!(sampler.sample(row, pixel, 0), expected);
                }
            }
        }
    }
}
