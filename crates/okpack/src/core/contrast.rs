use super::gamut::gamut_table;
use crate::{Float, PackedColor};

/// The squared A/B distance in bytes beyond which two colors contrast through
/// chroma alone.
pub(crate) const CHROMA_DIFFERENCE_THRESHOLD: i32 = 1024;

/// Replace the lightness byte.
#[inline]
fn with_lightness(color: PackedColor, lightness: u32) -> PackedColor {
    PackedColor::from_bits(color.to_bits() & 0xffff_ff00 | lightness.min(0xff))
}

/// Adjust the lightness of the main color so that it contrasts with the other
/// color.
///
/// If the two colors already differ in chroma, the main color is returned
/// unchanged. Otherwise, a main color against a dark contrast color is moved
/// into the upper band of lightness and one against a light contrast color
/// into the lower band. The result is not limited to the gamut.
pub(crate) fn inverse_lightness(main: PackedColor, contrast: PackedColor) -> PackedColor {
    let da = main.a_byte() as i32 - contrast.a_byte() as i32;
    let db = main.b_byte() as i32 - contrast.b_byte() as i32;
    if CHROMA_DIFFERENCE_THRESHOLD < da * da + db * db {
        return main;
    }

    let lightness = main.l_byte() as Float;
    let lightness = if contrast.l_byte() < 128 {
        lightness.mul_add(0.45, 140.0)
    } else {
        lightness.mul_add(-0.45, 127.0)
    };

    with_lightness(main, lightness as u32)
}

/// Shift the lightness of the main color half way around the lightness range
/// of the contrast color, then limit to the gamut.
///
/// The new lightness byte is the average of the main lightness and the
/// contrast lightness rotated by 128.
pub(crate) fn differentiate_lightness(main: PackedColor, contrast: PackedColor) -> PackedColor {
    let rotated = (contrast.l_byte() + 128) & 0xff;
    let lightness = (rotated + main.l_byte()) >> 1;
    gamut_table().limit_to_gamut(with_lightness(main, lightness))
}

/// Shift the lightness of the color against itself.
pub(crate) fn offset_lightness(color: PackedColor) -> PackedColor {
    differentiate_lightness(color, color)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_inverse_lightness() {
        let main = PackedColor::from_bits(0xfe80_7c64);
        let dark = PackedColor::from_bits(0xfe7f_7f20);
        let light = PackedColor::from_bits(0xfe7f_7fe0);

        // 100 × 0.45 + 140 = 185
        assert_eq!(inverse_lightness(main, dark).to_bits(), 0xfe80_7cb9, "dark");
        // 127 - 100 × 0.45 = 82
        assert_eq!(inverse_lightness(main, light).to_bits(), 0xfe80_7c52, "light");

        let colorful = PackedColor::from_bits(0xfeb0_7f20);
        assert_eq!(inverse_lightness(main, colorful), main, "chroma differs");

        // Exactly at the threshold, lightness still changes.
        let edge = PackedColor::from_bits(0xfe7f_9c20);
        let main = PackedColor::from_bits(0xfe7f_7c64);
        assert_eq!(inverse_lightness(main, edge).l_byte(), 185, "threshold");
    }

    #[test]
    fn test_differentiate_lightness() {
        let table = gamut_table();
        let gray = PackedColor::from_bits(0xfe7f_7f40);
        let light = PackedColor::from_bits(0xfe7f_7fe0);

        // ((0xe0 + 0x80) & 0xff + 0x40) >> 1 = 0x50
        assert_eq!(differentiate_lightness(gray, light).to_bits(), 0xfe7f_7f50, "gray");
        // ((0x40 + 0x80) + 0x40) >> 1 = 0x80
        assert_eq!(offset_lightness(gray).to_bits(), 0xfe7f_7f80, "offset");

        for rgb in (0..0x100_0000_u32).step_by(0x03_0507) {
            let color = PackedColor::from_rgba8888(rgb << 8 | 0xff);
            let offset = offset_lightness(color);
            assert!(table.in_gamut(offset), "{:?} is in gamut", offset);
            assert_eq!(offset.alpha_byte(), color.alpha_byte(), "alpha");
        }
    }
}
