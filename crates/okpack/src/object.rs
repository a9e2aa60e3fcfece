#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::{
    blot, chroma, darken, decode_alpha, differentiate_lightness, dullen, edit_oklab, encode_alpha,
    encode_byte, enrich, fade, format, from_rgba, from_rgba8888, gamut_table, hsl_hue,
    hsl_lightness, hsl_saturation, inverse_lightness, lerp, lighten, lower_a, lower_b,
    offset_lightness, oklab_by_hcl, oklab_by_hsl, oklab_hue, oklab_lightness, oklab_saturation,
    raise_a, raise_b, random_edit, to_oklab, to_rgba, to_rgba8888,
};
use crate::Float;

/// A packed color.
///
/// A packed color stores a color in the Oklab color space in a single 32-bit
/// word, with one byte each for lightness L, the green-red axis A, and the
/// blue-yellow axis B, from least to most significant byte. The most
/// significant byte holds alpha. Encoding always clears alpha's least
/// significant bit, so that the word doubles as the bit pattern of a finite
/// `f32`. That makes packed colors suitable as vertex colors.
///
/// # Quantization
///
/// Lightness is remapped through a curve before quantization, which spends
/// more levels on darker tones. A and B are recentered, so that byte 127 is
/// neutral. Packing is lossy. Grays round-trip through 8-bit RGB within one
/// step per channel; more colorful colors may be off by a few more.
///
/// # The Gamut
///
/// Not every packed color decodes to a displayable RGB color. A table of the
/// maximum chroma for every lightness level and hue, [`GamutTable`], defines
/// the gamut. [`PackedColor::in_gamut`] tests colors against that table and
/// [`PackedColor::limit_to_gamut`] moves colors into the gamut. Edits that
/// increase chroma limit their result to the gamut. Edits that touch a single
/// byte don't, so callers can combine several edits before limiting the
/// result once.
///
/// # Edits
///
/// All edits return a new packed color and leave every bit they do not change
/// exactly as is. Fractions are clamped to `0..=1` and not-a-number is treated
/// as zero.
///
/// [`GamutTable`]: crate::GamutTable
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, frozen, hash, module = "okpack")
)]
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct PackedColor(u32);

#[cfg_attr(feature = "pyffi", pymethods)]
impl PackedColor {
    // The following constructors come in pairs, once for pyffi and once without
    // pyffi. The #[new] and #[staticmethod] attributes are incompatible with
    // #[cfg_attr()].

    /// Create a new packed color from normalized channels.
    ///
    /// Each channel is scaled by 255 and rounded. Out-of-range values are not
    /// clamped but masked to eight bits, and not-a-number becomes zero. Alpha's
    /// least significant bit is cleared. Since A and B are normalized to
    /// `0..=1`, their neutral value is 127/255, not 0.5.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let gray = PackedColor::new(0.5, 0.5, 0.5, 1.0);
    /// assert_eq!(gray.to_bits(), 0xfe80_8080);
    /// assert_eq!(PackedColor::new(gray.channel_l(), gray.channel_a(),
    ///     gray.channel_b(), gray.alpha()), gray);
    /// ```
    #[cfg(feature = "pyffi")]
    #[new]
    #[inline]
    pub fn new(l: Float, a: Float, b: Float, alpha: Float) -> Self {
        Self(encode_alpha(alpha) << 24 | encode_byte(b) << 16 | encode_byte(a) << 8 | encode_byte(l))
    }

    /// Create a new packed color from normalized channels.
    ///
    /// Each channel is scaled by 255 and rounded. Out-of-range values are not
    /// clamped but masked to eight bits, and not-a-number becomes zero. Alpha's
    /// least significant bit is cleared. Since A and B are normalized to
    /// `0..=1`, their neutral value is 127/255, not 0.5.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let gray = PackedColor::new(0.5, 0.5, 0.5, 1.0);
    /// assert_eq!(gray.to_bits(), 0xfe80_8080);
    /// assert_eq!(PackedColor::new(gray.channel_l(), gray.channel_a(),
    ///     gray.channel_b(), gray.alpha()), gray);
    /// ```
    #[cfg(not(feature = "pyffi"))]
    #[inline]
    pub fn new(l: Float, a: Float, b: Float, alpha: Float) -> Self {
        Self(encode_alpha(alpha) << 24 | encode_byte(b) << 16 | encode_byte(a) << 8 | encode_byte(l))
    }

    /// Create a packed color from its bits. Any bit pattern is acceptable.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Create a packed color from its bits. Any bit pattern is acceptable.
    #[cfg(not(feature = "pyffi"))]
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Create a packed color from the bits of a float.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self(value.to_bits())
    }

    /// Create a packed color from the bits of a float.
    #[cfg(not(feature = "pyffi"))]
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self(value.to_bits())
    }

    /// Convert RGBA8888 to a packed color.
    ///
    /// Red is in the most significant byte and alpha in the least significant
    /// byte.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let red = PackedColor::from_rgba8888(0xff00_00ff);
    /// assert_eq!(red.l_byte(), 125);
    /// assert_eq!(red.a_byte(), 156);
    /// assert_eq!(red.b_byte(), 143);
    /// assert_eq!(red.alpha_byte(), 0xfe);
    /// ```
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn from_rgba8888(rgba: u32) -> Self {
        from_rgba8888(rgba)
    }

    /// Convert gamma-encoded RGBA coordinates to a packed color.
    ///
    /// Coordinates are clamped to unit range.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn from_rgba(r: Float, g: Float, b: Float, alpha: Float) -> Self {
        from_rgba(r, g, b, alpha)
    }

    /// Determine whether the normalized channels are in gamut.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn in_gamut_lab(l: Float, a: Float, b: Float) -> bool {
        Self::new(l, a, b, 1.0).in_gamut()
    }

    /// Create a packed color from normalized channels and limit it to the
    /// gamut.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn limit_to_gamut_lab(l: Float, a: Float, b: Float, alpha: Float) -> Self {
        Self::new(l, a, b, alpha).limit_to_gamut()
    }

    /// Create a packed color from Oklab hue, saturation, and lightness.
    ///
    /// The hue is measured in turns. The saturation is the fraction of the
    /// maximum chroma for the lightness and hue, clamped to unit range. The
    /// lightness is the normalized L channel. The result always is in gamut.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn oklab_by_hsl(hue: Float, saturation: Float, lightness: Float, alpha: Float) -> Self {
        oklab_by_hsl(hue, saturation, lightness, alpha)
    }

    /// Create a packed color from Oklab hue, chroma, and lightness.
    ///
    /// The hue is measured in turns. The chroma is in Oklab units and capped
    /// at the maximum chroma for the lightness and hue. The lightness is the
    /// normalized L channel. The result always is in gamut.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn oklab_by_hcl(hue: Float, chroma: Float, lightness: Float, alpha: Float) -> Self {
        oklab_by_hcl(hue, chroma, lightness, alpha)
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Get the bits.
    #[inline]
    pub const fn to_bits(&self) -> u32 {
        self.0
    }

    /// Get the bits as a float. The result never is not-a-number or infinite
    /// if alpha's least significant bit is zero.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let color = PackedColor::from_rgba8888(0x3366_99ff);
    /// assert!(color.to_f32().is_finite());
    /// assert_eq!(PackedColor::from_f32(color.to_f32()), color);
    /// ```
    #[inline]
    pub fn to_f32(&self) -> f32 {
        f32::from_bits(self.0)
    }

    /// Decode the normalized channels L, A, B, and alpha.
    ///
    /// Each channel is its byte divided by 255. Alpha's least significant bit
    /// is restored from its most significant bit first, so that an opaque
    /// color decodes to one.
    pub fn decode(&self) -> [Float; 4] {
        [
            self.channel_l(),
            self.channel_a(),
            self.channel_b(),
            self.alpha(),
        ]
    }

    /// Get the L byte.
    #[inline]
    pub const fn l_byte(&self) -> u32 {
        self.0 & 0xff
    }

    /// Get the A byte.
    #[inline]
    pub const fn a_byte(&self) -> u32 {
        self.0 >> 8 & 0xff
    }

    /// Get the B byte.
    #[inline]
    pub const fn b_byte(&self) -> u32 {
        self.0 >> 16 & 0xff
    }

    /// Get the alpha byte.
    #[inline]
    pub const fn alpha_byte(&self) -> u32 {
        self.0 >> 24
    }

    /// Get the normalized L channel.
    #[inline]
    pub fn channel_l(&self) -> Float {
        self.l_byte() as Float / 255.0
    }

    /// Get the normalized A channel.
    #[inline]
    pub fn channel_a(&self) -> Float {
        self.a_byte() as Float / 255.0
    }

    /// Get the normalized B channel.
    #[inline]
    pub fn channel_b(&self) -> Float {
        self.b_byte() as Float / 255.0
    }

    /// Get the normalized alpha.
    #[inline]
    pub fn alpha(&self) -> Float {
        decode_alpha(self.alpha_byte())
    }

    /// Convert to RGBA8888.
    ///
    /// Colors outside the gamut are clipped. Alpha's least significant bit is
    /// restored from its most significant bit.
    pub fn to_rgba8888(&self) -> u32 {
        to_rgba8888(*self)
    }

    /// Convert to gamma-encoded RGBA coordinates in unit range.
    pub fn to_rgba(&self) -> [Float; 4] {
        to_rgba(*self)
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Determine whether this packed color is in gamut.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// assert!(PackedColor::from_bits(0xfe7f_7f80).in_gamut());
    /// assert!(!PackedColor::from_bits(0xfe00_ff80).in_gamut());
    /// ```
    pub fn in_gamut(&self) -> bool {
        gamut_table().in_gamut(*self)
    }

    /// Limit this packed color to the gamut.
    ///
    /// If this color is in gamut, this method returns it unchanged. Otherwise,
    /// it moves the color toward neutral along its hue until the color is in
    /// gamut. Lightness and alpha remain unchanged. This method is idempotent.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let color = PackedColor::from_bits(0xfe00_ff80);
    /// let limited = color.limit_to_gamut();
    /// assert!(limited.in_gamut());
    /// assert_eq!(limited.l_byte(), color.l_byte());
    /// assert_eq!(limited.limit_to_gamut(), limited);
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn limit_to_gamut(&self) -> Self {
        gamut_table().limit_to_gamut(*self)
    }

    /// Move this packed color along its hue onto the gamut boundary.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn maximize_saturation(&self) -> Self {
        gamut_table().maximize_saturation(*self)
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Lighten this color by the given fraction.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let gray = PackedColor::from_bits(0xfe7f_7f40);
    /// assert_eq!(gray.lighten(1.0).to_bits(), 0xfe7f_7fff);
    /// assert_eq!(gray.lighten(0.0), gray);
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn lighten(&self, fraction: Float) -> Self {
        lighten(*self, fraction)
    }

    /// Darken this color by the given fraction.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn darken(&self, fraction: Float) -> Self {
        darken(*self, fraction)
    }

    /// Move the A byte toward its maximum, i.e., toward red.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn raise_a(&self, fraction: Float) -> Self {
        raise_a(*self, fraction)
    }

    /// Move the A byte toward its minimum, i.e., toward green.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn lower_a(&self, fraction: Float) -> Self {
        lower_a(*self, fraction)
    }

    /// Move the B byte toward its maximum, i.e., toward yellow.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn raise_b(&self, fraction: Float) -> Self {
        raise_b(*self, fraction)
    }

    /// Move the B byte toward its minimum, i.e., toward blue.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn lower_b(&self, fraction: Float) -> Self {
        lower_b(*self, fraction)
    }

    /// Make this color more opaque.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn blot(&self, fraction: Float) -> Self {
        blot(*self, fraction)
    }

    /// Make this color more transparent.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn fade(&self, fraction: Float) -> Self {
        fade(*self, fraction)
    }

    /// Reduce the chroma by the given fraction. The result always is in gamut.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let gray = PackedColor::from_rgba8888(0xff00_00ff).dullen(1.0);
    /// assert_eq!(gray.a_byte(), 127);
    /// assert_eq!(gray.b_byte(), 127);
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn dullen(&self, fraction: Float) -> Self {
        dullen(*self, fraction)
    }

    /// Increase the chroma by up to twice and limit the result to the gamut.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn enrich(&self, fraction: Float) -> Self {
        enrich(*self, fraction)
    }

    /// Multiply and offset each channel, then limit the result to the gamut.
    ///
    /// Lightness and alpha are normalized to unit range. A and B are
    /// normalized to `-1..=1`, and their offsets count double.
    #[allow(clippy::too_many_arguments)]
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn edit_oklab(
        &self,
        add_l: Float,
        add_a: Float,
        add_b: Float,
        add_alpha: Float,
        mul_l: Float,
        mul_a: Float,
        mul_b: Float,
        mul_alpha: Float,
    ) -> Self {
        edit_oklab(
            *self, add_l, add_a, add_b, add_alpha, mul_l, mul_a, mul_b, mul_alpha,
        )
    }

    /// Interpolate between this and the other color, one byte at a time.
    ///
    /// The result is not limited to the gamut.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn lerp(&self, other: &Self, fraction: Float) -> Self {
        lerp(*self, *other, fraction)
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Determine the HSL-style hue in turns.
    ///
    /// HSL-style hue, saturation, and lightness are computed from
    /// gamma-encoded RGB and differ from their Oklab-native counterparts.
    pub fn hue(&self) -> Float {
        hsl_hue(*self)
    }

    /// Determine the HSL-style saturation, which is the range of the
    /// gamma-encoded RGB coordinates.
    pub fn saturation(&self) -> Float {
        hsl_saturation(*self)
    }

    /// Determine the HSL-style lightness, which is the largest gamma-encoded
    /// RGB coordinate damped by the range.
    pub fn lightness(&self) -> Float {
        hsl_lightness(*self)
    }

    /// Determine the Oklab hue in turns.
    pub fn oklab_hue(&self) -> Float {
        oklab_hue(*self)
    }

    /// Determine the Oklab saturation, which is the chroma as a fraction of
    /// the maximum chroma for lightness and hue.
    ///
    /// The fraction is measured against the gamut boundary in A/B bytes, the
    /// same scale [`PackedColor::in_gamut`] uses, so that one marks the
    /// boundary exactly. That makes the result 255.998/255 times
    /// `chroma() / chroma_limit(oklab_hue(), oklab_lightness())`.
    pub fn oklab_saturation(&self) -> Float {
        oklab_saturation(*self)
    }

    /// Determine the Oklab lightness, which is the normalized L channel.
    pub fn oklab_lightness(&self) -> Float {
        oklab_lightness(*self)
    }

    /// Determine the Oklab chroma.
    pub fn chroma(&self) -> Float {
        chroma(*self)
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Adjust this color's lightness so that it contrasts with the given
    /// color.
    ///
    /// If the two colors differ enough in chroma, this method returns this
    /// color. Otherwise, it moves the lightness into the upper band for a
    /// dark contrast color and into the lower band for a light one.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn inverse_lightness(&self, contrast: &Self) -> Self {
        inverse_lightness(*self, *contrast)
    }

    /// Average this color's lightness with the contrast color's lightness
    /// rotated half way around, then limit to the gamut.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn differentiate_lightness(&self, contrast: &Self) -> Self {
        differentiate_lightness(*self, *contrast)
    }

    /// Differentiate this color's lightness from itself.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn offset_lightness(&self) -> Self {
        offset_lightness(*self)
    }

    /// Randomly perturb this color's lightness and chroma.
    ///
    /// The result is determined by the seed and the variance. It is in gamut
    /// unless no trial succeeds, in which case this method returns this color.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let color = PackedColor::from_rgba8888(0x3366_99ff).limit_to_gamut();
    /// assert_eq!(color.random_edit(42, 0.0), color);
    /// assert_eq!(color.random_edit(42, 0.1), color.random_edit(42, 0.1));
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn random_edit(&self, seed: u64, variance: Float) -> Self {
        random_edit(*self, seed, variance)
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Convert this color to its debug representation. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!("{:?}", self)
    }

    /// Convert this color to its (CSS-based) string representation. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __str__(&self) -> String {
        format!("{}", self)
    }
}

// --------------------------------------------------------------------------------------------------------------------

// Use separate block, so that methods are not exposed to Python.
// Use cfg(), so that methods are not documented again.
#[cfg(not(feature = "pyffi"))]
impl PackedColor {
    /// Convert RGBA8888 to a packed color.
    ///
    /// Red is in the most significant byte and alpha in the least significant
    /// byte.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let red = PackedColor::from_rgba8888(0xff00_00ff);
    /// assert_eq!(red.l_byte(), 125);
    /// assert_eq!(red.a_byte(), 156);
    /// assert_eq!(red.b_byte(), 143);
    /// assert_eq!(red.alpha_byte(), 0xfe);
    /// ```
    pub fn from_rgba8888(rgba: u32) -> Self {
        from_rgba8888(rgba)
    }

    /// Convert gamma-encoded RGBA coordinates to a packed color.
    ///
    /// Coordinates are clamped to unit range.
    pub fn from_rgba(r: Float, g: Float, b: Float, alpha: Float) -> Self {
        from_rgba(r, g, b, alpha)
    }

    /// Determine whether the normalized channels are in gamut.
    pub fn in_gamut_lab(l: Float, a: Float, b: Float) -> bool {
        Self::new(l, a, b, 1.0).in_gamut()
    }

    /// Create a packed color from normalized channels and limit it to the
    /// gamut.
    pub fn limit_to_gamut_lab(l: Float, a: Float, b: Float, alpha: Float) -> Self {
        Self::new(l, a, b, alpha).limit_to_gamut()
    }

    /// Create a packed color from Oklab hue, saturation, and lightness.
    ///
    /// The hue is measured in turns. The saturation is the fraction of the
    /// maximum chroma for the lightness and hue, clamped to unit range. The
    /// lightness is the normalized L channel. The result always is in gamut.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let teal = PackedColor::oklab_by_hsl(0.55, 1.0, 0.6, 1.0);
    /// assert!(teal.in_gamut());
    /// assert!(teal.oklab_saturation() <= 1.0);
    /// ```
    pub fn oklab_by_hsl(hue: Float, saturation: Float, lightness: Float, alpha: Float) -> Self {
        oklab_by_hsl(hue, saturation, lightness, alpha)
    }

    /// Create a packed color from Oklab hue, chroma, and lightness.
    ///
    /// The hue is measured in turns. The chroma is in Oklab units and capped
    /// at the maximum chroma for the lightness and hue. The lightness is the
    /// normalized L channel. The result always is in gamut.
    pub fn oklab_by_hcl(hue: Float, chroma: Float, lightness: Float, alpha: Float) -> Self {
        oklab_by_hcl(hue, chroma, lightness, alpha)
    }
}

// --------------------------------------------------------------------------------------------------------------------

impl Default for PackedColor {
    /// Create a transparent black.
    fn default() -> Self {
        Self(0x007f_7f00)
    }
}

impl From<u32> for PackedColor {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<PackedColor> for u32 {
    fn from(value: PackedColor) -> Self {
        value.0
    }
}

impl ::core::fmt::Debug for PackedColor {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.write_fmt(format_args!("PackedColor({:#010x})", self.0))
    }
}

impl ::core::fmt::Display for PackedColor {
    /// Format this color.
    ///
    /// This method formats the color's Oklab coordinates and alpha with CSS's
    /// `oklab()` function. It respects the formatter's precision, defaulting
    /// to 5 digits past the decimal.
    ///
    /// ```
    /// # use okpack::PackedColor;
    /// let white = PackedColor::from_rgba8888(0xffff_ffff);
    /// assert_eq!(format!("{}", white), "oklab(1 0 0 / 1)");
    /// ```
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        format(&to_oklab(*self), self.alpha(), f)
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::PackedColor;
    use crate::{assert_close_enough, Float, GamutTable};

    #[test]
    fn test_thread_safety() {
        fn is_send_sync<T: Send + Sync>() {}
        is_send_sync::<PackedColor>();
        is_send_sync::<GamutTable>();
    }

    #[test]
    fn test_codec() {
        let gray = PackedColor::new(0.5, 0.5, 0.5, 1.0);
        assert_eq!(gray.to_bits(), 0xfe80_8080, "bytes");

        let [l, a, b, alpha] = gray.decode();
        for channel in [l, a, b] {
            assert!((channel - 0.5).abs() <= 1.0 / 255.0, "channel {}", channel);
        }
        assert_eq!(alpha, 1.0, "opaque");
        assert_eq!(PackedColor::new(l, a, b, alpha), gray, "re-encodes");

        let masked = PackedColor::new(2.0, -1.0 / 255.0, Float::NAN, 1.0);
        assert_eq!(masked.to_bits(), 0xfe00_fffe, "masked bytes");

        for bits in [0x0000_0000, 0xfe7f_7f80, 0x8012_3456, 0xfeff_ffff] {
            let color = PackedColor::from_bits(bits);
            assert!(color.to_f32().is_finite(), "{:?} is finite", color);
            assert_eq!(PackedColor::from_f32(color.to_f32()), color, "f32");
            assert_eq!(u32::from(color), bits, "u32");
            assert_eq!(PackedColor::from(bits), color, "from u32");
        }
    }

    #[test]
    fn test_accessors() {
        let color = PackedColor::from_bits(0x8012_3456);
        assert_eq!(color.l_byte(), 0x56, "l");
        assert_eq!(color.a_byte(), 0x34, "a");
        assert_eq!(color.b_byte(), 0x12, "b");
        assert_eq!(color.alpha_byte(), 0x80, "alpha");
        assert_close_enough!(color.channel_l(), 86.0 / 255.0);
        assert_close_enough!(color.channel_a(), 52.0 / 255.0);
        assert_close_enough!(color.channel_b(), 18.0 / 255.0);
        assert_close_enough!(color.alpha(), 129.0 / 255.0);
    }

    #[test]
    fn test_lab_helpers() {
        let neutral = 127.0 / 255.0;
        assert!(PackedColor::in_gamut_lab(0.5, neutral, neutral), "gray");
        assert!(!PackedColor::in_gamut_lab(0.5, 1.0, 0.0), "extreme");

        let limited = PackedColor::limit_to_gamut_lab(0.5, 1.0, 0.0, 1.0);
        assert!(limited.in_gamut(), "{:?} is in gamut", limited);
        assert_eq!(limited.l_byte(), 128, "lightness");
        assert_eq!(limited.alpha_byte(), 0xfe, "alpha");
    }

    #[test]
    fn test_formatting() {
        let color = PackedColor::from_bits(0xfe7f_7f80);
        assert_eq!(format!("{:?}", color), "PackedColor(0xfe7f7f80)", "debug");
        assert_eq!(PackedColor::default().to_bits(), 0x007f_7f00, "default");
        assert!(PackedColor::default().in_gamut(), "default is in gamut");
    }
}
