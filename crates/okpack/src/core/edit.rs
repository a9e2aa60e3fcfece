use super::codec::{decode_alpha, encode_alpha, encode_byte, lerp_byte, with_chroma_offsets};
use super::codec::{ALPHA_SHIFT, NEUTRAL};
use super::gamut::{chroma_offsets, gamut_table};
use crate::{Float, PackedColor};

/// The mask for the seven significant bits of alpha.
const ALPHA_FIELD: u32 = 0x7f;

/// Clamp the fraction to unit range, turning not-a-number into zero.
#[inline]
fn unit(fraction: Float) -> Float {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Replace the byte at the given shift.
#[inline]
fn with_byte(color: PackedColor, shift: u32, byte: u32) -> PackedColor {
    let bits = color.to_bits() & !(0xff << shift);
    PackedColor::from_bits(bits | (byte & 0xff) << shift)
}

/// Interpolate the byte at the given shift toward the target.
#[inline]
fn shift_byte(color: PackedColor, shift: u32, target: u32, fraction: Float) -> PackedColor {
    let byte = color.to_bits() >> shift & 0xff;
    with_byte(color, shift, lerp_byte(byte, target, fraction))
}

/// Interpolate the seven significant alpha bits toward the target.
#[inline]
fn shift_alpha(color: PackedColor, target: u32, fraction: Float) -> PackedColor {
    let field = color.to_bits() >> ALPHA_SHIFT;
    let field = lerp_byte(field, target, fraction) & ALPHA_FIELD;
    PackedColor::from_bits(color.to_bits() & !(ALPHA_FIELD << ALPHA_SHIFT) | field << ALPHA_SHIFT)
}

// --------------------------------------------------------------------------------------------------------------------

/// Move lightness toward white by the given fraction.
pub(crate) fn lighten(color: PackedColor, fraction: Float) -> PackedColor {
    shift_byte(color, 0, 0xff, fraction)
}

/// Move lightness toward black by the given fraction.
pub(crate) fn darken(color: PackedColor, fraction: Float) -> PackedColor {
    shift_byte(color, 0, 0, fraction)
}

/// Move the A byte toward its maximum by the given fraction.
pub(crate) fn raise_a(color: PackedColor, fraction: Float) -> PackedColor {
    shift_byte(color, 8, 0xff, fraction)
}

/// Move the A byte toward its minimum by the given fraction.
pub(crate) fn lower_a(color: PackedColor, fraction: Float) -> PackedColor {
    shift_byte(color, 8, 0, fraction)
}

/// Move the B byte toward its maximum by the given fraction.
pub(crate) fn raise_b(color: PackedColor, fraction: Float) -> PackedColor {
    shift_byte(color, 16, 0xff, fraction)
}

/// Move the B byte toward its minimum by the given fraction.
pub(crate) fn lower_b(color: PackedColor, fraction: Float) -> PackedColor {
    shift_byte(color, 16, 0, fraction)
}

/// Move alpha toward opaque by the given fraction.
pub(crate) fn blot(color: PackedColor, fraction: Float) -> PackedColor {
    shift_alpha(color, ALPHA_FIELD, fraction)
}

/// Move alpha toward transparent by the given fraction.
pub(crate) fn fade(color: PackedColor, fraction: Float) -> PackedColor {
    shift_alpha(color, 0, fraction)
}

// --------------------------------------------------------------------------------------------------------------------

/// Pull the chroma toward neutral by the given fraction.
///
/// The offsets from neutral are scaled by `1 - fraction` and truncated, which
/// never moves a coordinate away from neutral. Truncation may still shift the
/// hue into a neighboring table bin with a smaller limit, so the result is
/// limited to the gamut as well. For nearly all in-gamut inputs, that is a
/// no-op.
pub(crate) fn dullen(color: PackedColor, fraction: Float) -> PackedColor {
    let factor = 1.0 - unit(fraction);
    let (a, b) = chroma_offsets(color);
    let color = with_chroma_offsets(color, (a * factor) as i32, (b * factor) as i32);
    gamut_table().limit_to_gamut(color)
}

/// Push the chroma away from neutral by the given fraction and then limit the
/// result to the gamut.
pub(crate) fn enrich(color: PackedColor, fraction: Float) -> PackedColor {
    let factor = 1.0 + unit(fraction);
    let (a, b) = chroma_offsets(color);
    let color = with_chroma_offsets(color, (a * factor) as i32, (b * factor) as i32);
    gamut_table().limit_to_gamut(color)
}

/// Scale and offset each channel.
///
/// Lightness and alpha are computed in unit range. A and B are computed in
/// `-1..=1`, i.e., twice the chroma point, with the offset doubled to match.
/// All values are clamped, and the result is limited to the gamut.
#[allow(clippy::too_many_arguments)]
pub(crate) fn edit_oklab(
    color: PackedColor,
    add_l: Float,
    add_a: Float,
    add_b: Float,
    add_alpha: Float,
    mul_l: Float,
    mul_a: Float,
    mul_b: Float,
    mul_alpha: Float,
) -> PackedColor {
    #[inline]
    fn edit(value: Float, mul: Float, add: Float, min: Float) -> Float {
        let value = value.mul_add(mul, add);
        if value.is_nan() {
            0.0
        } else {
            value.clamp(min, 1.0)
        }
    }

    #[inline]
    fn colorness_byte(value: Float) -> u32 {
        ((value * 127.5).round() as i32 + NEUTRAL).clamp(0, 255) as u32
    }

    let (a, b) = chroma_offsets(color);
    let l = edit(color.l_byte() as Float / 255.0, mul_l, add_l, 0.0);
    let a = edit(a / 127.5, mul_a, 2.0 * add_a, -1.0);
    let b = edit(b / 127.5, mul_b, 2.0 * add_b, -1.0);
    let alpha = edit(decode_alpha(color.alpha_byte()), mul_alpha, add_alpha, 0.0);

    let bits = encode_alpha(alpha) << 24
        | colorness_byte(b) << 16
        | colorness_byte(a) << 8
        | encode_byte(l);
    gamut_table().limit_to_gamut(PackedColor::from_bits(bits))
}

// --------------------------------------------------------------------------------------------------------------------

/// Interpolate between two packed colors, one byte at a time.
///
/// Lightness, A, and B are interpolated as bytes, alpha as its seven
/// significant bits. The result is not limited to the gamut.
pub(crate) fn lerp(start: PackedColor, end: PackedColor, fraction: Float) -> PackedColor {
    let (start, end) = (start.to_bits(), end.to_bits());

    let mut bits = 0;
    for shift in [0, 8, 16] {
        let byte = lerp_byte(start >> shift & 0xff, end >> shift & 0xff, fraction);
        bits |= byte << shift;
    }

    let alpha = lerp_byte(start >> ALPHA_SHIFT, end >> ALPHA_SHIFT, fraction) & ALPHA_FIELD;
    PackedColor::from_bits(bits | alpha << ALPHA_SHIFT)
}
