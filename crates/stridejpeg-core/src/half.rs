//! Half-precision (16-bit) float conversion.
//!
//! Layout of a half: sign bit 15, 5-bit exponent in bits 10-14 (bias 15),
//! 10-bit mantissa in bits 0-9. This variant has no infinity or NaN: an
//! all-ones exponent decodes as an ordinary normalized value, so the largest
//! magnitude is `0x7FFF` (131008.0).

/// Largest representable half magnitude (all exponent and mantissa bits set).
pub const F16_MAX_BITS: u16 = 0x7FFF;

/// Decode a half-precision bit pattern to an `f32`.
#[inline]
pub fn f16_bits_to_f32(half: u16) -> f32 {
    f32::from_bits(f16_bits_to_f32_bits(half))
}

/// Decode a half-precision bit pattern to the bit pattern of an `f32`.
///
/// Bit-exact: normals rebias the exponent from 15 to 127 and left-align the
/// mantissa; denormals are renormalized; zero keeps its sign.
pub fn f16_bits_to_f32_bits(half: u16) -> u32 {
    let sign = u32::from(half & 0x8000) << 16;
    let exponent = u32::from((half >> 10) & 0x1F);
    let mantissa = u32::from(half & 0x03FF);

    if exponent != 0 {
        return sign | ((exponent + 112) << 23) | (mantissa << 13);
    }
    if mantissa == 0 {
        return sign;
    }

    // Denormal: shift the leading one up to the implicit bit position (bit 10)
    let shift = mantissa.leading_zeros() - 21;
    let mantissa = (mantissa << shift) & 0x03FF;
    sign | ((113 - shift) << 23) | (mantissa << 13)
}

/// Encode an `f32` as a half-precision bit pattern.
///
/// Rounds to nearest, ties to even. Magnitudes above the half range (and
/// infinities or NaN) saturate to [`F16_MAX_BITS`]; magnitudes below the
/// smallest denormal flush to signed zero.
pub fn f32_to_f16_bits(value: f32) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 16) & 0x8000) as u16;
    let exponent = ((bits >> 23) & 0xFF) as i32;
    let mantissa = bits & 0x007F_FFFF;

    if exponent == 0xFF {
        return sign | F16_MAX_BITS;
    }

    let half_exponent = exponent - 127 + 15;
    if half_exponent >= 32 {
        return sign | F16_MAX_BITS;
    }

    if half_exponent <= 0 {
        if half_exponent < -10 {
            return sign;
        }
        // Denormal result: restore the implicit bit and shift into 10 bits.
        // Rounding up into 0x400 correctly yields the smallest normal.
        let full = mantissa | 0x0080_0000;
        let shift = (14 - half_exponent) as u32;
        let rounded = round_shift(full, shift);
        return sign | rounded as u16;
    }

    let packed = ((half_exponent as u32) << 10) | (mantissa >> 13);
    // A mantissa carry propagates into the exponent field, which is correct
    let rounded = packed + round_increment(mantissa, 13, packed);
    if rounded > u32::from(F16_MAX_BITS) {
        return sign | F16_MAX_BITS;
    }
    sign | rounded as u16
}

/// Convert a slice of `f32` values into native-endian half-precision bytes.
///
/// Useful for building Float16 source buffers.
pub fn f32_slice_to_f16_bytes(values: &[f32]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|&v| f32_to_f16_bits(v).to_ne_bytes())
        .collect()
}

#[inline]
fn round_shift(value: u32, shift: u32) -> u32 {
    let truncated = value >> shift;
    truncated + round_increment(value, shift, truncated)
}

/// 1 if dropping the low `shift` bits of `value` should round `truncated` up.
#[inline]
fn round_increment(value: u32, shift: u32, truncated: u32) -> u32 {
    let remainder = value & ((1 << shift) - 1);
    let halfway = 1 << (shift - 1);
    u32::from(remainder > halfway || (remainder == halfway && truncated & 1 == 1))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
