use super::codec::{decode_alpha, from_bytes};
use super::math::cbrt_positive;
use crate::{Float, PackedColor};

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = *matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Linearize a gamma-encoded RGB coordinate. Squaring is close enough to
/// sRGB's transfer function for 8-bit colors.
#[inline]
pub(crate) fn forward_gamma(value: Float) -> Float {
    value * value
}

/// Gamma-encode a linear RGB coordinate.
#[inline]
pub(crate) fn reverse_gamma(value: Float) -> Float {
    value.sqrt()
}

/// Remap Oklab lightness before quantization. This curve spends more of the
/// 256 levels on darker tones than plain Oklab would.
#[inline]
pub(crate) fn forward_light(value: Float) -> Float {
    (value - 1.0) / (-0.4285714 as Float).mul_add(value, 1.0) + 1.0
}

/// Undo [`forward_light`] after dequantization.
#[inline]
pub(crate) fn reverse_light(value: Float) -> Float {
    (value - 1.0) / (0.75 as Float).mul_add(value, 1.0) + 1.0
}

// --------------------------------------------------------------------------------------------------------------------
// https://bottosson.github.io/posts/oklab/

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_RGB_TO_LMS: [[Float; 3]; 3] = [
    [ 0.4121656120, 0.5362752080, 0.0514575653 ],
    [ 0.2118591070, 0.6807189584, 0.1074065790 ],
    [ 0.0883097947, 0.2818474174, 0.6302613616 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LMS_TO_OKLAB: [[Float; 3]; 3] = [
    [ 0.2104542553,  0.7936177850, -0.0040720468 ],
    [ 1.9779984951, -2.4285922050,  0.4505937099 ],
    [ 0.0259040371,  0.7827717662, -0.8086757660 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLAB_TO_LMS: [[Float; 3]; 3] = [
    [ 1.0,  0.3963377774,  0.2158037573 ],
    [ 1.0, -0.1055613458, -0.0638541728 ],
    [ 1.0, -0.0894841775, -1.2914855480 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LMS_TO_LINEAR_RGB: [[Float; 3]; 3] = [
    [  4.0767245293, -3.3072168827,  0.2307590544 ],
    [ -1.2681437731,  2.6093323231, -0.3411344290 ],
    [ -0.0041119885, -0.7034763098,  1.7068625689 ],
];

/// Convert gamma-encoded RGB coordinates to Oklab. The lightness is plain
/// Oklab lightness, i.e., it has not been remapped with [`forward_light`].
pub(crate) fn rgb_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = *value;
    let linear = [forward_gamma(r), forward_gamma(g), forward_gamma(b)];
    let [l, m, s] = multiply(&LINEAR_RGB_TO_LMS, &linear);
    multiply(
        &LMS_TO_OKLAB,
        &[cbrt_positive(l), cbrt_positive(m), cbrt_positive(s)],
    )
}

/// Convert Oklab coordinates to linear RGB coordinates. The result is not
/// clamped and hence may fall outside unit range.
pub(crate) fn oklab_to_linear_rgb(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&OKLAB_TO_LMS, value);
    multiply(&LMS_TO_LINEAR_RGB, &[l * l * l, m * m * m, s * s * s])
}

// --------------------------------------------------------------------------------------------------------------------

/// Quantize Oklab lightness after remapping its curve.
#[inline]
fn quantize_lightness(value: Float) -> u32 {
    (forward_light(value) * 255.0).round().clamp(0.0, 255.0) as u32
}

/// Quantize an Oklab colorness coordinate by recentering `-1..=1` on a byte.
#[inline]
fn quantize_colorness(value: Float) -> u32 {
    value.mul_add(127.999, 127.5).floor().clamp(0.0, 255.0) as u32
}

/// Scale a quantized colorness byte back to Oklab units. The neutral byte 127
/// maps to zero, which is the center of its quantization bin.
#[inline]
pub(crate) fn dequantize_colorness(byte: u32) -> Float {
    (byte as Float - 127.0) / 127.999
}

/// Recover the Oklab coordinates of the packed color.
pub(crate) fn to_oklab(color: PackedColor) -> [Float; 3] {
    [
        reverse_light(color.l_byte() as Float / 255.0),
        dequantize_colorness(color.a_byte()),
        dequantize_colorness(color.b_byte()),
    ]
}

/// Create a packed color from gamma-encoded RGB coordinates and an alpha byte.
fn from_rgb_and_alpha(rgb: &[Float; 3], alpha: u32) -> PackedColor {
    let [l, a, b] = rgb_to_oklab(rgb);
    from_bytes(
        quantize_lightness(l),
        quantize_colorness(a),
        quantize_colorness(b),
        alpha & 0xfe,
    )
}

/// Create a packed color from RGBA8888, i.e., red in the most significant
/// byte and alpha in the least significant byte.
pub(crate) fn from_rgba8888(rgba: u32) -> PackedColor {
    let r = (rgba >> 24) as Float / 255.0;
    let g = (rgba >> 16 & 0xff) as Float / 255.0;
    let b = (rgba >> 8 & 0xff) as Float / 255.0;
    from_rgb_and_alpha(&[r, g, b], rgba & 0xff)
}

/// Create a packed color from gamma-encoded RGBA coordinates in unit range.
/// Out-of-range coordinates are clamped.
pub(crate) fn from_rgba(r: Float, g: Float, b: Float, alpha: Float) -> PackedColor {
    #[inline]
    fn clamp(value: Float) -> Float {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }

    let alpha = (clamp(alpha) * 255.0).round() as u32;
    from_rgb_and_alpha(&[clamp(r), clamp(g), clamp(b)], alpha)
}

/// Convert the packed color to gamma-encoded RGB coordinates, clamped to unit
/// range.
pub(crate) fn to_srgb(color: PackedColor) -> [Float; 3] {
    let [r, g, b] = oklab_to_linear_rgb(&to_oklab(color));
    [
        reverse_gamma(r.clamp(0.0, 1.0)),
        reverse_gamma(g.clamp(0.0, 1.0)),
        reverse_gamma(b.clamp(0.0, 1.0)),
    ]
}

/// Convert the packed color to gamma-encoded RGBA coordinates in unit range.
pub(crate) fn to_rgba(color: PackedColor) -> [Float; 4] {
    let [r, g, b] = to_srgb(color);
    [r, g, b, decode_alpha(color.alpha_byte())]
}

/// Convert the packed color to RGBA8888. Alpha's least significant bit is
/// restored from its most significant bit.
pub(crate) fn to_rgba8888(color: PackedColor) -> u32 {
    let [r, g, b] = to_srgb(color);
    let alpha = color.alpha_byte();

    ((r * 255.0).round() as u32) << 24
        | ((g * 255.0).round() as u32) << 16
        | ((b * 255.0).round() as u32) << 8
        | alpha
        | alpha >> 7
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_light_curves() {
        for step in 0..=100 {
            let value = step as Float / 100.0;
            let there = forward_light(value);
            let back = reverse_light(there);
            assert!(
                (back - value).abs() < 1e-5,
                "lightness {} comes back as {}",
                value,
                back
            );
        }

        assert!(forward_light(0.0).abs() < 1e-9, "black stays black");
        assert!((forward_light(1.0) - 1.0).abs() < 1e-9, "white stays white");
        assert!(forward_light(0.5) < 0.5, "curve bends toward dark tones");
    }

    #[test]
    fn test_known_colors() {
        let black = from_rgba8888(0x0000_00ff);
        assert_eq!(black.to_bits(), 0xfe7f_7f00, "black");

        let white = from_rgba8888(0xffff_ffff);
        assert_eq!(white.to_bits(), 0xfe7f_7fff, "white");

        let red = from_rgba8888(0xff00_00ff);
        assert_eq!(
            [red.l_byte(), red.a_byte(), red.b_byte()],
            [125, 156, 143],
            "red"
        );

        let green = from_rgba8888(0x00ff_00ff);
        assert_eq!(
            [green.l_byte(), green.a_byte(), green.b_byte()],
            [201, 97, 150],
            "green"
        );

        let blue = from_rgba8888(0x0000_ffff);
        assert_eq!(
            [blue.l_byte(), blue.a_byte(), blue.b_byte()],
            [82, 123, 87],
            "blue"
        );
    }

    #[test]
    fn test_gray_round_trip() {
        for value in 0..=255_u32 {
            let rgba = value << 24 | value << 16 | value << 8 | 0xff;
            let color = from_rgba8888(rgba);
            assert_eq!(color.a_byte(), 127, "gray {} has neutral a", value);
            assert_eq!(color.b_byte(), 127, "gray {} has neutral b", value);

            let back = to_rgba8888(color);
            for shift in [8, 16, 24] {
                let expected = (rgba >> shift & 0xff) as i32;
                let actual = (back >> shift & 0xff) as i32;
                assert!(
                    (expected - actual).abs() <= 1,
                    "gray {:#010x} comes back as {:#010x}",
                    rgba,
                    back
                );
            }
            assert_eq!(back & 0xff, 0xff, "alpha is restored");
        }
    }

    #[test]
    fn test_repacking() {
        // Packing is lossy, but unpacking and repacking stays within a few
        // quantization steps of the first packing.
        for r in (0..=255_u32).step_by(15) {
            for g in (0..=255_u32).step_by(15) {
                for b in (0..=255_u32).step_by(15) {
                    let color = from_rgba8888(r << 24 | g << 16 | b << 8 | 0xff);
                    let again = from_rgba8888(to_rgba8888(color));

                    for (c1, c2) in [
                        (color.l_byte(), again.l_byte()),
                        (color.a_byte(), again.a_byte()),
                        (color.b_byte(), again.b_byte()),
                    ] {
                        assert!(
                            c1.abs_diff(c2) <= REPACKING_TOLERANCE,
                            "color {:?} repacks as {:?}",
                            color,
                            again
                        );
                    }
                    assert_eq!(color.alpha_byte(), again.alpha_byte(), "alpha");
                }
            }
        }
    }

    const REPACKING_TOLERANCE: u32 = 2;

    #[test]
    fn test_float_rgba() {
        let color = from_rgba(1.0, 128.0 / 255.0, 64.0 / 255.0, 1.0);
        assert_eq!(color, from_rgba8888(0xff80_40ff), "floats match bytes");

        let clamped = from_rgba(2.0, -1.0, Float::NAN, 7.0);
        assert_eq!(clamped, from_rgba8888(0xff00_00ff), "floats are clamped");

        let [r, g, b, alpha] = to_rgba(from_rgba8888(0x8080_80ff));
        for c in [r, g, b] {
            assert!((c - 128.0 / 255.0).abs() < 1.0 / 255.0, "gray is {}", c);
        }
        assert_eq!(alpha, 1.0, "opaque");
    }
}
