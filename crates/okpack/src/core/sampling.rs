use super::codec::{from_bytes, NEUTRAL};
use super::gamut::{chroma_offsets, gamut_table};
use crate::{Float, PackedColor};

/// The maximum number of trials before giving up.
const MAX_TRIALS: usize = 50;

/// The increment of the counter between trials, i.e., 2⁶⁴ divided by the
/// golden ratio.
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// The odd multipliers for the three independent taps.
const TAPS: [u64; 3] = [
    0xD1B5_4A32_D192_ED03,
    0xABC9_8388_FB8F_AC03,
    0x8CB9_2BA7_2F3D_8DD7,
];

/// The center of the 23-bit tap range.
const TAP_CENTER: Float = 0x7F_FFFF as Float / 2.0;

/// The scale mapping a centered tap onto `-1..1`.
const TAP_SCALE: Float = 1.0 / (1_u64 << 22) as Float;

/// Draw one offset in `-variance..variance` from the counter.
#[inline]
fn tap(counter: u64, multiplier: u64, variance: Float) -> Float {
    let value = (counter.wrapping_mul(multiplier) >> 41) as Float;
    (value - TAP_CENTER) * TAP_SCALE * variance
}

/// Randomly perturb the color's lightness and chroma.
///
/// Each trial draws offsets for L, A, and B from a counter-based stream
/// seeded with the given seed. A trial succeeds if the offsets fall within a
/// sphere of the given variance, the lightness stays within unit range, and
/// the result is in gamut. After [`MAX_TRIALS`] failed trials, the original
/// color is returned. The same seed always yields the same result.
pub(crate) fn random_edit(color: PackedColor, seed: u64, variance: Float) -> PackedColor {
    let table = gamut_table();
    let (a, b) = chroma_offsets(color);
    let l = color.l_byte() as Float / 255.0;
    let a = a / 255.0;
    let b = b / 255.0;
    let budget = variance * variance;

    let mut counter = seed;
    for _ in 0..MAX_TRIALS {
        counter = counter.wrapping_add(GOLDEN_GAMMA);
        let [dl, da, db] = TAPS.map(|multiplier| tap(counter, multiplier, variance));

        if budget < dl.mul_add(dl, da.mul_add(da, db * db)) {
            continue;
        }

        let lightness = l + dl;
        if !(0.0..=1.0).contains(&lightness) {
            continue;
        }

        let candidate = from_bytes(
            (lightness * 255.0).round() as u32,
            colorness_byte(a + da),
            colorness_byte(b + db),
            color.alpha_byte(),
        );
        if table.in_gamut(candidate) {
            return candidate;
        }
    }

    color
}

/// Quantize a chroma point coordinate back to a byte.
#[inline]
fn colorness_byte(value: Float) -> u32 {
    ((value * 255.0).round() as i32 + NEUTRAL).clamp(0, 255) as u32
}
