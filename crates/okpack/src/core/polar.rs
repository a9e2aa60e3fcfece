use super::codec::{encode_alpha, encode_byte, from_bytes, NEUTRAL};
use super::conversion::to_srgb;
use super::gamut::{chroma_offsets, gamut_table, offset_hue};
use crate::{Float, PackedColor};

/// Guard against division by zero when computing HSL-style lightness.
const LIGHTNESS_EPSILON: Float = 1e-10;

/// Determine the extremes of the gamma-encoded RGB coordinates and their
/// difference.
#[inline]
fn extremes(rgb: &[Float; 3]) -> (Float, Float, Float) {
    let [r, g, b] = *rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    (max, min, max - min)
}

/// Determine the HSL-style hue in turns.
///
/// This is the standard six-way formula over gamma-encoded RGB, keyed by the
/// largest coordinate. Grays have hue zero.
pub(crate) fn hsl_hue(color: PackedColor) -> Float {
    let rgb = to_srgb(color);
    let [r, g, b] = rgb;
    let (max, _, delta) = extremes(&rgb);
    if delta <= 0.0 {
        return 0.0;
    }

    let sextant = if max == r {
        (g - b) / delta
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let hue = sextant / 6.0;
    let hue = hue - hue.floor();
    if hue < 1.0 {
        hue
    } else {
        0.0
    }
}

/// Determine the HSL-style saturation, which is the RGB range.
///
/// This is not the saturation of the HSL color model, which divides by
/// `1 - |2L - 1|`.
pub(crate) fn hsl_saturation(color: PackedColor) -> Float {
    let (_, _, delta) = extremes(&to_srgb(color));
    delta
}

/// Determine the HSL-style lightness.
pub(crate) fn hsl_lightness(color: PackedColor) -> Float {
    let (max, _, delta) = extremes(&to_srgb(color));
    max * (1.0 - delta / (2.0 as Float).mul_add(max, LIGHTNESS_EPSILON))
}

// --------------------------------------------------------------------------------------------------------------------

/// Determine the Oklab hue in turns.
pub(crate) fn oklab_hue(color: PackedColor) -> Float {
    let (a, b) = chroma_offsets(color);
    offset_hue(a, b)
}

/// Determine the Oklab chroma.
pub(crate) fn chroma(color: PackedColor) -> Float {
    let (a, b) = chroma_offsets(color);
    a.hypot(b) / 127.999
}

/// Determine the Oklab saturation, which is the fraction of the maximum
/// chroma for the color's lightness and hue.
///
/// The result is one on the gamut boundary and exceeds one outside the gamut.
/// It divides by the boundary radius in A/B bytes, as the in-gamut test does,
/// not by [`chroma_limit`](super::chroma_limit). Since A/B bytes are chroma
/// times 127.999 and the radius is table distance times 255/512, the result
/// is 255.998/255 times `chroma / chroma_limit`.
/// It is zero when the boundary has zero chroma.
pub(crate) fn oklab_saturation(color: PackedColor) -> Float {
    let (a, b) = chroma_offsets(color);
    let radius = gamut_table().radius(color.l_byte(), offset_hue(a, b));
    if radius <= 0.0 {
        0.0
    } else {
        a.hypot(b) / radius
    }
}

/// Determine the Oklab lightness in unit range, without undoing the curve
/// applied during conversion.
pub(crate) fn oklab_lightness(color: PackedColor) -> Float {
    color.l_byte() as Float / 255.0
}

// --------------------------------------------------------------------------------------------------------------------

/// Create a neutral packed color with the given lightness and alpha.
#[inline]
fn neutral(lightness: Float, alpha: Float) -> PackedColor {
    let lightness = if lightness.is_nan() {
        0.0
    } else {
        lightness.clamp(0.0, 1.0)
    };
    let alpha = if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    };

    from_bytes(
        encode_byte(lightness),
        NEUTRAL as u32,
        NEUTRAL as u32,
        encode_alpha(alpha),
    )
}

/// Create a packed color from Oklab hue, saturation, and lightness.
///
/// The saturation is the fraction of the maximum chroma for the lightness and
/// hue and hence is clamped to unit range.
pub(crate) fn oklab_by_hsl(
    hue: Float,
    saturation: Float,
    lightness: Float,
    alpha: Float,
) -> PackedColor {
    let table = gamut_table();
    let color = neutral(lightness, alpha);
    let saturation = if saturation.is_nan() {
        0.0
    } else {
        saturation.clamp(0.0, 1.0)
    };

    let radius = saturation * table.radius(color.l_byte(), hue);
    table.place(color, hue, radius)
}

/// Create a packed color from Oklab hue, chroma, and lightness.
///
/// The chroma is capped at the maximum chroma for the lightness and hue.
pub(crate) fn oklab_by_hcl(hue: Float, chroma: Float, lightness: Float, alpha: Float) -> PackedColor {
    let table = gamut_table();
    let color = neutral(lightness, alpha);
    let chroma = if chroma.is_nan() { 0.0 } else { chroma.max(0.0) };

    let radius = (chroma * 128.0).min(table.radius(color.l_byte(), hue));
    table.place(color, hue, radius)
}
