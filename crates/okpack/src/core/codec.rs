use crate::{Float, PackedColor};

/// The byte value of A and B for neutral colors.
pub(crate) const NEUTRAL: i32 = 127;

/// The position of the seven significant alpha bits.
pub(crate) const ALPHA_SHIFT: u32 = 25;

/// Quantize a normalized channel value to a byte.
///
/// Out-of-range values are not clamped but masked to their least significant
/// eight bits, and not-a-number becomes zero.
#[inline]
pub(crate) fn encode_byte(value: Float) -> u32 {
    ((value * 255.0).round() as i64 & 0xff) as u32
}

/// Quantize a normalized alpha value to a byte with a cleared least
/// significant bit.
///
/// With that bit zero, the float exponent of the packed word can never be all
/// ones, so no encoded color is NaN or infinity.
#[inline]
pub(crate) fn encode_alpha(value: Float) -> u32 {
    encode_byte(value) & 0xfe
}

/// Scale the given alpha byte back to unit range.
///
/// The missing least significant bit is restored from the most significant
/// bit, so that `0xfe` maps to exactly one and `0x00` to exactly zero.
#[inline]
pub(crate) fn decode_alpha(byte: u32) -> Float {
    let byte = byte & 0xff;
    (byte | byte >> 7) as Float / 255.0
}

/// Assemble a packed color from its bytes.
#[inline]
pub(crate) fn from_bytes(l: u32, a: u32, b: u32, alpha: u32) -> PackedColor {
    PackedColor::from_bits((alpha & 0xff) << 24 | (b & 0xff) << 16 | (a & 0xff) << 8 | (l & 0xff))
}

/// Replace the A and B bytes with the given offsets from neutral.
///
/// The offsets are clamped so that the bytes stay within `0..=255`. All other
/// bits are preserved.
#[inline]
pub(crate) fn with_chroma_offsets(color: PackedColor, a: i32, b: i32) -> PackedColor {
    let a = (NEUTRAL + a).clamp(0, 255) as u32;
    let b = (NEUTRAL + b).clamp(0, 255) as u32;
    PackedColor::from_bits(color.to_bits() & 0xff00_00ff | b << 16 | a << 8)
}

/// Interpolate from the byte value toward the target value.
///
/// The fraction is clamped to unit range and the result truncated, so that a
/// fraction of zero leaves the value untouched and a fraction of one reaches
/// the target.
#[inline]
pub(crate) fn lerp_byte(value: u32, target: u32, fraction: Float) -> u32 {
    let value = value as Float;
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    ((target as Float - value).mul_add(fraction, value) as u32).min(0xff)
}
