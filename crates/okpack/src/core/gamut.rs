use ::alloc::borrow::Cow;
use std::sync::OnceLock;

use super::codec::{with_chroma_offsets, NEUTRAL};
use super::math::{atan2_turns, cos_turns, sin_turns};
use crate::error::GamutTableError;
use crate::{Float, PackedColor};

/// The number of entries in a gamut table.
const TABLE_SIZE: usize = 0x1_0000;

/// The embedded gamut table.
const EMBEDDED: &[u8; TABLE_SIZE] = include_bytes!("../data/gamut.bin");

/// Convert a table distance into a radius measured in A/B bytes around the
/// neutral byte.
///
/// Table distances are Oklab chroma times 256. With A and B offsets divided
/// by 255, the in-gamut test is `d² / 2¹⁸ ≥ A² + B²`, which this factor
/// rescales to offsets in bytes.
const BYTES_PER_DISTANCE: Float = 255.0 / 512.0;

/// Determine the hue index for the given hue measured in turns.
#[inline]
fn hue_index(hue: Float) -> usize {
    ((hue - hue.floor()) * 256.0) as usize & 0xff
}

/// Determine the lightness index for the given normalized lightness.
#[inline]
fn lightness_index(lightness: Float) -> usize {
    if lightness.is_nan() {
        0
    } else {
        (lightness.clamp(0.0, 1.0) * 255.999) as usize
    }
}

/// Determine the hue of the given A/B offsets from neutral.
#[inline]
pub(crate) fn offset_hue(a: Float, b: Float) -> Float {
    atan2_turns(b, a)
}

/// Determine the A/B offsets of the packed color from neutral.
#[inline]
pub(crate) fn chroma_offsets(color: PackedColor) -> (Float, Float) {
    (
        color.a_byte() as Float - NEUTRAL as Float,
        color.b_byte() as Float - NEUTRAL as Float,
    )
}

/// A table with the gamut boundary of packed colors.
///
/// The table has one byte for each of 256 lightness levels and 256 hues. Each
/// byte is the maximum Oklab chroma times 256 that still decodes to an RGB
/// color without clipping, i.e., `table[L << 8 | H]` is the distance from
/// neutral to the gamut boundary. Lightness is quantized over `0..=1` and hue
/// over one full turn. Distances for black and white are zero.
///
/// A gamut table is immutable. The table embedded in this crate is available
/// through [`gamut_table`], which initializes it exactly once and then hands
/// out a shared reference for the remaining lifetime of the process.
/// [`GamutTable::from_bytes`] validates a table produced elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamutTable {
    data: Cow<'static, [u8]>,
}

impl GamutTable {
    /// The version of the embedded table's data. It changes whenever the
    /// transform or the generation procedure changes.
    pub const VERSION: u32 = 1;

    /// The number of entries.
    pub const SIZE: usize = TABLE_SIZE;

    /// The largest distance a valid table may contain.
    pub const MAX_DISTANCE: u8 = 82;

    /// Create a gamut table for the embedded data.
    pub const fn embedded() -> Self {
        Self {
            data: Cow::Borrowed(EMBEDDED.as_slice()),
        }
    }

    /// Create a gamut table from the given bytes.
    ///
    /// This function validates that the table has [`GamutTable::SIZE`]
    /// entries and that no entry exceeds [`GamutTable::MAX_DISTANCE`].
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, GamutTableError> {
        if bytes.len() != TABLE_SIZE {
            return Err(GamutTableError::WrongLength(bytes.len()));
        }
        if let Some(index) = bytes.iter().position(|d| Self::MAX_DISTANCE < *d) {
            return Err(GamutTableError::DistanceTooLarge {
                index,
                distance: bytes[index],
            });
        }

        Ok(Self {
            data: Cow::Owned(bytes),
        })
    }

    /// Access the raw table data.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Look up the distance at the given index. Indices wrap around.
    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.data.get(index & (TABLE_SIZE - 1)).copied().unwrap_or(0)
    }

    /// Compute the table index for the given normalized lightness and hue
    /// measured in turns.
    #[inline]
    pub fn index(lightness: Float, hue: Float) -> usize {
        lightness_index(lightness) << 8 | hue_index(hue)
    }

    /// Determine the maximum Oklab chroma for the given hue and lightness.
    pub fn chroma_limit(&self, hue: Float, lightness: Float) -> Float {
        self.get(Self::index(lightness, hue)) as Float / 256.0
    }

    /// Determine the maximum radius in A/B bytes for the given lightness byte
    /// and hue.
    #[inline]
    pub(crate) fn radius(&self, lightness: u32, hue: Float) -> Float {
        let index = (lightness as usize & 0xff) << 8 | hue_index(hue);
        self.get(index) as Float * BYTES_PER_DISTANCE
    }

    /// Determine whether the packed color is within gamut.
    pub fn in_gamut(&self, color: PackedColor) -> bool {
        let (a, b) = chroma_offsets(color);
        let radius = self.radius(color.l_byte(), offset_hue(a, b));
        a.mul_add(a, b * b) <= radius * radius
    }

    /// Limit the packed color to the gamut.
    ///
    /// An in-gamut color is returned unchanged. Otherwise, the result has the
    /// same lightness, alpha, and (up to quantization) hue, but its chroma is
    /// reduced to the gamut boundary.
    pub fn limit_to_gamut(&self, color: PackedColor) -> PackedColor {
        if self.in_gamut(color) {
            return color;
        }

        self.maximize_saturation(color)
    }

    /// Move the packed color onto the gamut boundary.
    ///
    /// Unlike [`GamutTable::limit_to_gamut`], this method moves colors inside
    /// the gamut outward, too.
    pub fn maximize_saturation(&self, color: PackedColor) -> PackedColor {
        let (a, b) = chroma_offsets(color);
        let hue = offset_hue(a, b);
        self.place(color, hue, self.radius(color.l_byte(), hue))
    }

    /// Place the color at the given hue and radius in A/B bytes.
    ///
    /// Truncating the coordinates may shift the hue into a neighboring table
    /// bin with a smaller limit. Hence this method shrinks the radius in half
    /// byte steps until the result is in gamut. Neutral always is in gamut, so
    /// the loop runs at most 2 × 128 times.
    pub(crate) fn place(&self, color: PackedColor, hue: Float, radius: Float) -> PackedColor {
        let cos = cos_turns(hue);
        let sin = sin_turns(hue);
        let mut radius = if radius.is_nan() {
            0.0
        } else {
            radius.clamp(0.0, 128.0)
        };

        loop {
            let candidate = with_chroma_offsets(color, (cos * radius) as i32, (sin * radius) as i32);
            if radius <= 0.0 || self.in_gamut(candidate) {
                return candidate;
            }
            radius -= 0.5;
        }
    }
}

/// Get the process-wide gamut table.
///
/// The table is initialized from the embedded data on first access and shared
/// by reference thereafter.
pub fn gamut_table() -> &'static GamutTable {
    static TABLE: OnceLock<GamutTable> = OnceLock::new();
    TABLE.get_or_init(GamutTable::embedded)
}

/// Determine the maximum Oklab chroma for the given hue and lightness.
///
/// The hue is measured in turns and the lightness is normalized. The result
/// is zero for black and white and never exceeds 0.31613. It is the table
/// distance divided by 256. The in-gamut test compares A/B bytes against the
/// same distance times 255/512, which admits chroma up to 255.998/255 times
/// this limit.
pub fn chroma_limit(hue: Float, lightness: Float) -> Float {
    gamut_table().chroma_limit(hue, lightness)
}

// ====================================================================================================================

#[cfg(feature = "gamut")]
mod generate {
    use super::{GamutTable, TABLE_SIZE};
    use crate::core::conversion::{oklab_to_linear_rgb, reverse_light};
    use crate::core::math::{cos_turns, sin_turns};
    use crate::Float;

    /// The largest distance written by the generator, i.e., a chroma of 0.3125.
    const MAX_GENERATED_DISTANCE: Float = 80.0;

    /// The tolerance for linear RGB coordinates outside unit range.
    const EPSILON: Float = 1e-6;

    /// The number of bisection steps when searching for the boundary.
    const STEPS: usize = 36;

    fn decodes_without_clipping(lab: &[Float; 3]) -> bool {
        oklab_to_linear_rgb(lab)
            .iter()
            .all(|c| -EPSILON <= *c && *c <= 1.0 + EPSILON)
    }

    /// Find the largest chroma along the hue that decodes without clipping.
    fn max_chroma(lightness: Float, hue: Float) -> Float {
        let (cos, sin) = (cos_turns(hue), sin_turns(hue));
        if !decodes_without_clipping(&[lightness, 0.0, 0.0]) {
            return 0.0;
        }

        let mut low: Float = 0.0;
        let mut high: Float = 0.5;
        for _ in 0..STEPS {
            let middle = (low + high) / 2.0;
            if decodes_without_clipping(&[lightness, cos * middle, sin * middle]) {
                low = middle;
            } else {
                high = middle;
            }
        }
        low
    }

    impl GamutTable {
        /// Generate the gamut table from the color transform. <i
        /// class=gamut-only>Gamut only!</i>
        ///
        /// For every lightness byte and hue bin, this method bisects the
        /// chroma at the bin's start, quarter points, and end and keeps the
        /// smallest result, so that the entry holds across the whole bin.
        /// Black and white have zero chroma. The result reproduces the
        /// embedded table up to floating point noise at bin edges.
        pub fn generate() -> Self {
            let mut data = vec![0_u8; TABLE_SIZE];

            for (row, chunk) in data.chunks_exact_mut(256).enumerate() {
                if row == 0 || row == 255 {
                    continue;
                }

                let lightness = reverse_light(row as Float / 255.0);
                for (column, entry) in chunk.iter_mut().enumerate() {
                    let chroma = (0..=4)
                        .map(|quarter| {
                            max_chroma(lightness, (4 * column + quarter) as Float / 1024.0)
                        })
                        .fold(Float::INFINITY, Float::min);
                    *entry = (chroma * 256.0).floor().min(MAX_GENERATED_DISTANCE) as u8;
                }
            }

            Self {
                data: data.into(),
            }
        }
    }

    #[cfg(test)]
    mod test {
        use crate::GamutTable;

        #[test]
        fn test_generate() {
            let generated = GamutTable::generate();
            let embedded = GamutTable::embedded();

            for index in 0..GamutTable::SIZE {
                assert!(
                    generated.get(index).abs_diff(embedded.get(index)) <= 1,
                    "entry {:#06x} differs: {} vs {}",
                    index,
                    generated.get(index),
                    embedded.get(index)
                );
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{chroma_limit, gamut_table, GamutTable};
    use crate::error::GamutTableError;
    use crate::{Float, PackedColor};

    #[test]
    fn test_table() {
        let table = gamut_table();
        assert_eq!(table.as_bytes().len(), GamutTable::SIZE, "table size");
        assert!(
            ::core::ptr::eq(table, gamut_table()),
            "table is initialized once"
        );
        assert_eq!(table, &GamutTable::embedded(), "table is embedded data");

        let max = table.as_bytes().iter().copied().max().unwrap_or(0);
        assert!(0 < max, "table is not empty");
        assert!(max <= GamutTable::MAX_DISTANCE, "largest distance {}", max);
    }

    #[test]
    fn test_from_bytes() {
        let table = GamutTable::from_bytes(GamutTable::embedded().as_bytes().to_vec());
        assert!(
            matches!(table, Ok(ref t) if t == gamut_table()),
            "copy is valid"
        );

        assert!(
            matches!(
                GamutTable::from_bytes(vec![0_u8; 10]),
                Err(GamutTableError::WrongLength(10))
            ),
            "short table"
        );

        let mut bytes = vec![0_u8; GamutTable::SIZE];
        bytes[665] = 83;
        assert!(
            matches!(
                GamutTable::from_bytes(bytes),
                Err(GamutTableError::DistanceTooLarge {
                    index: 665,
                    distance: 83
                })
            ),
            "oversized distance"
        );
    }

    #[test]
    fn test_chroma_limit() {
        for step in 0..=1_000 {
            let hue = step as Float / 1_000.0;
            assert_eq!(chroma_limit(hue, 0.0), 0.0, "black at hue {}", hue);
            assert_eq!(chroma_limit(hue, 1.0), 0.0, "white at hue {}", hue);

            for lightness in 1..255 {
                let limit = chroma_limit(hue, lightness as Float / 255.0);
                assert!(
                    (0.0..=0.31613).contains(&limit),
                    "limit {} at hue {} and lightness {}",
                    limit,
                    hue,
                    lightness
                );
            }
        }

        // Mid-tones have room for chroma in every direction.
        for step in 0..256 {
            let hue = step as Float / 256.0;
            assert!(0.0 < chroma_limit(hue, 0.5), "mid gray at hue {}", hue);
        }

        // Hues wrap around.
        assert_eq!(chroma_limit(1.25, 0.5), chroma_limit(0.25, 0.5), "wrap");
        assert_eq!(chroma_limit(-0.75, 0.5), chroma_limit(0.25, 0.5), "wrap");
    }

    #[test]
    fn test_neutral_in_gamut() {
        let table = gamut_table();
        for lightness in 0..=255_u32 {
            let gray = PackedColor::from_bits(0xfe7f_7f00 | lightness);
            assert!(table.in_gamut(gray), "gray {} is in gamut", lightness);
            assert_eq!(table.limit_to_gamut(gray), gray, "gray {}", lightness);
        }
    }

    #[test]
    fn test_limit_to_gamut() {
        let table = gamut_table();

        // Sweep the cube of packed colors, with alpha and all other bits
        // varying as well.
        for l in (0..=255_u32).step_by(5) {
            for a in (0..=255_u32).step_by(3) {
                for b in (0..=255_u32).step_by(3) {
                    let color = PackedColor::from_bits(0x5200_0000 | b << 16 | a << 8 | l);
                    let limited = table.limit_to_gamut(color);

                    assert!(table.in_gamut(limited), "{:?} is in gamut", limited);
                    assert_eq!(
                        table.limit_to_gamut(limited),
                        limited,
                        "limiting {:?} is idempotent",
                        color
                    );
                    if table.in_gamut(color) {
                        assert_eq!(limited, color, "{:?} is unchanged", color);
                    }
                    assert_eq!(limited.l_byte(), color.l_byte(), "lightness");
                    assert_eq!(limited.alpha_byte(), color.alpha_byte(), "alpha");
                }
            }
        }
    }

    #[test]
    fn test_maximize_saturation() {
        let table = gamut_table();
        let color = PackedColor::from_rgba8888(0x8060_60ff);
        let saturated = table.maximize_saturation(color);

        assert!(table.in_gamut(saturated), "{:?} is in gamut", saturated);
        assert!(color.chroma() < saturated.chroma(), "more chroma");
        assert!(
            (color.oklab_hue() - saturated.oklab_hue()).abs() < 0.02,
            "about the same hue"
        );
        assert_eq!(saturated.l_byte(), color.l_byte(), "same lightness");
        assert_eq!(table.maximize_saturation(saturated), saturated, "stable");
    }
}
