//! Output color modes, source sample formats, and per-format quantization.
//!
//! Every source sample ends up as one 8-bit output value:
//!
//! - `UInt8` is copied as-is.
//! - Wider integers keep only their most significant byte (truncation).
//! - Floats are treated as normalized intensity in `[0, 1]`, scaled by 256,
//!   capped at 255 and floored. Negative values and NaN become 0.
//! - `Float16` is expanded to `f32` first, then quantized like `Float32`.
//!
//! Multi-byte samples are read in the host's native byte order.

use serde::{Deserialize, Serialize};

use crate::half::f16_bits_to_f32;

/// Output color mode. Determines how many channels each output pixel has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Three output channels (red, green, blue).
    #[default]
    Rgb,
    /// One output channel (intensity).
    Grayscale,
}

impl ColorMode {
    /// Number of channels per output pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Grayscale => 1,
        }
    }
}

/// Numeric encoding of one channel sample in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    #[default]
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    /// Half-precision float (no infinity/NaN, see [`crate::half`]).
    Float16,
    Float32,
    Float64,
}

/// Converts the bytes of one source sample to an output byte.
///
/// The slice must hold at least [`PixelFormat::channel_size`] bytes.
pub type SampleFn = fn(&[u8]) -> u8;

impl PixelFormat {
    /// All supported formats.
    pub const ALL: [PixelFormat; 7] = [
        PixelFormat::UInt8,
        PixelFormat::UInt16,
        PixelFormat::UInt32,
        PixelFormat::UInt64,
        PixelFormat::Float16,
        PixelFormat::Float32,
        PixelFormat::Float64,
    ];

    /// Size of one channel sample in bytes.
    #[inline]
    pub fn channel_size(self) -> usize {
        match self {
            PixelFormat::UInt8 => 1,
            PixelFormat::UInt16 | PixelFormat::Float16 => 2,
            PixelFormat::UInt32 | PixelFormat::Float32 => 4,
            PixelFormat::UInt64 | PixelFormat::Float64 => 8,
        }
    }

    /// Whether samples are floating point (normalized to `[0, 1]`).
    pub fn is_float(self) -> bool {
        matches!(
            self,
            PixelFormat::Float16 | PixelFormat::Float32 | PixelFormat::Float64
        )
    }

    /// The conversion function for this format.
    ///
    /// Selected once per encode so the per-sample loop does not branch on the
    /// format.
    pub fn sample_fn(self) -> SampleFn {
        match self {
            PixelFormat::UInt8 => sample_u8,
            PixelFormat::UInt16 => sample_u16,
            PixelFormat::UInt32 => sample_u32,
            PixelFormat::UInt64 => sample_u64,
            PixelFormat::Float16 => sample_f16,
            PixelFormat::Float32 => sample_f32,
            PixelFormat::Float64 => sample_f64,
        }
    }
}

/// Quantize a normalized `f32` intensity to 8 bits.
///
/// `v * 256` capped at 255, floored. Values at or above 255/256 saturate.
#[inline]
pub fn quantize_f32(v: f32) -> u8 {
    // `clamp` keeps NaN, and `as` maps NaN to 0
    (v * 256.0).clamp(0.0, 255.0) as u8
}

/// Quantize a normalized `f64` intensity to 8 bits.
#[inline]
pub fn quantize_f64(v: f64) -> u8 {
    (v * 256.0).clamp(0.0, 255.0) as u8
}

#[inline]
fn read<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

fn sample_u8(bytes: &[u8]) -> u8 {
    bytes[0]
}

fn sample_u16(bytes: &[u8]) -> u8 {
    (u16::from_ne_bytes(read(bytes)) >> 8) as u8
}

fn sample_u32(bytes: &[u8]) -> u8 {
    (u32::from_ne_bytes(read(bytes)) >> 24) as u8
}

fn sample_u64(bytes: &[u8]) -> u8 {
    (u64::from_ne_bytes(read(bytes)) >> 56) as u8
}

fn sample_f16(bytes: &[u8]) -> u8 {
    quantize_f32(f16_bits_to_f32(u16::from_ne_bytes(read(bytes))))
}

fn sample_f32(bytes: &[u8]) -> u8 {
    quantize_f32(f32::from_ne_bytes(read(bytes)))
}

fn sample_f64(bytes: &[u8]) -> u8 {
    quantize_f64(f64::from_ne_bytes(read(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::half::f32_to_f16_bits;

    #[test]
    fn test_color_mode_channels() {
        assert_eq!(ColorMode::Rgb.channels(), 3);
        assert_eq!(ColorMode::Grayscale.channels(), 1);
    }

    #[test]
    fn test_channel_sizes() {
        assert_eq!(PixelFormat::UInt8.channel_size(), 1);
        assert_eq!(PixelFormat::UInt16.channel_size(), 2);
        assert_eq!(PixelFormat::Float16.channel_size(), 2);
        assert_eq!(PixelFormat::UInt32.channel_size(), 4);
        assert_eq!(PixelFormat::Float32.channel_size(), 4);
        assert_eq!(PixelFormat::UInt64.channel_size(), 8);
        assert_eq!(PixelFormat::Float64.channel_size(), 8);
    }

    #[test]
    fn test_integer_truncation_keeps_top_byte() {
        let f = PixelFormat::UInt16.sample_fn();
        assert_eq!(f(&0xABCDu16.to_ne_bytes()), 0xAB);

        let f = PixelFormat::UInt32.sample_fn();
        assert_eq!(f(&0xDEAD_BEEFu32.to_ne_bytes()), 0xDE);
        assert_eq!(f(&0x00FF_FFFFu32.to_ne_bytes()), 0x00);

        let f = PixelFormat::UInt64.sample_fn();
        assert_eq!(f(&0x7F00_0000_0000_00FFu64.to_ne_bytes()), 0x7F);
    }

    #[test]
    fn test_uint8_copies() {
        let f = PixelFormat::UInt8.sample_fn();
        for v in [0u8, 1, 127, 200, 255] {
            assert_eq!(f(&[v]), v);
        }
    }

    #[test]
    fn test_float_quantization() {
        assert_eq!(quantize_f32(0.0), 0);
        assert_eq!(quantize_f32(0.5), 128);
        assert_eq!(quantize_f32(1.0), 255);
        assert_eq!(quantize_f32(255.0 / 256.0), 255);
        assert_eq!(quantize_f32(254.99 / 256.0), 254);
        assert_eq!(quantize_f64(0.25), 64);
        assert_eq!(quantize_f64(1.0), 255);
    }

    #[test]
    fn test_float_out_of_range_is_clamped_not_rejected() {
        assert_eq!(quantize_f32(-0.5), 0);
        assert_eq!(quantize_f32(42.0), 255);
        assert_eq!(quantize_f32(f32::NAN), 0);
        assert_eq!(quantize_f64(f64::INFINITY), 255);
        assert_eq!(quantize_f64(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_float_sample_fns() {
        let f = PixelFormat::Float32.sample_fn();
        assert_eq!(f(&0.5f32.to_ne_bytes()), 128);

        let f = PixelFormat::Float64.sample_fn();
        assert_eq!(f(&0.75f64.to_ne_bytes()), 192);

        let f = PixelFormat::Float16.sample_fn();
        assert_eq!(f(&f32_to_f16_bits(0.5).to_ne_bytes()), 128);
        assert_eq!(f(&f32_to_f16_bits(1.0).to_ne_bytes()), 255);
        assert_eq!(f(&f32_to_f16_bits(0.0).to_ne_bytes()), 0);
    }

    #[test]
    fn test_float_nan_samples_are_zero() {
        assert_eq!(quantize_f64(f64::NAN), 0);
        assert_eq!(PixelFormat::Float32.sample_fn()(&f32::NAN.to_ne_bytes()), 0);
        assert_eq!(PixelFormat::Float64.sample_fn()(&f64::NAN.to_ne_bytes()), 0);
        // Half NaN patterns decode as large normals in this variant and saturate
        assert_eq!(PixelFormat::Float16.sample_fn()(&0x7E00u16.to_ne_bytes()), 255);
        assert_eq!(PixelFormat::Float16.sample_fn()(&0xFE00u16.to_ne_bytes()), 0);
    }

    #[test]
    fn test_is_float() {
        let floats: Vec<_> = PixelFormat::ALL.into_iter().filter(|f| f.is_float()).collect();
        assert_eq!(
            floats,
            [PixelFormat::Float16, PixelFormat::Float32, PixelFormat::Float64]
        );
    }

    #[test]
    fn test_sample_fn_ignores_trailing_bytes() {
        let mut bytes = 0x1234u16.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFF]);
        assert_eq!(PixelFormat::UInt16.sample_fn()(&bytes), 0x12);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PixelFormat::Float16).unwrap();
        assert_eq!(json, "\"float16\"");
        let mode: ColorMode = serde_json::from_str("\"grayscale\"").unwrap();
        assert_eq!(mode, ColorMode::Grayscale);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
