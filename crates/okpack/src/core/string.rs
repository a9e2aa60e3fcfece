use crate::Float;

/// Format Oklab coordinates and alpha as a CSS color.
///
/// This function formats the coordinates with the `oklab()` function, three
/// space-separated coordinates, and a slash-separated alpha. It respects the
/// formatter's precision, defaulting to 5 digits past the decimal.
pub(crate) fn format(
    coordinates: &[Float; 3],
    alpha: Float,
    f: &mut ::core::fmt::Formatter<'_>,
) -> ::core::fmt::Result {
    f.write_str("oklab(")?;

    let factor = (10.0 as Float).powi(f.precision().unwrap_or(5) as i32);
    for (index, value) in coordinates.iter().chain([alpha].iter()).enumerate() {
        match index {
            0 => (),
            3 => f.write_str(" / ")?,
            _ => f.write_str(" ")?,
        }

        // CSS mandates no trailing zeros. Rounding avoids them for the most
        // part. A zero fraction needs an explicit precision of zero.
        let mut value = (value * factor).round() / factor;
        if value == -0.0 {
            value = 0.0;
        }
        if value == value.trunc() {
            f.write_fmt(format_args!("{:.0}", value))?;
        } else {
            f.write_fmt(format_args!("{}", value))?;
        }
    }

    f.write_str(")")
}

#[cfg(test)]
mod test {
    use crate::PackedColor;

    #[test]
    fn test_format() {
        let white = PackedColor::from_bits(0xfe7f_7fff);
        assert_eq!(format!("{}", white), "oklab(1 0 0 / 1)", "white");

        let clear = PackedColor::from_bits(0x007f_7f00);
        assert_eq!(format!("{}", clear), "oklab(0 0 0 / 0)", "transparent");

        let tiny = PackedColor::from_bits(0xfe7e_7e00);
        assert!(!format!("{:.1}", tiny).contains("-0"), "no negative zero");

        let red = PackedColor::from_rgba8888(0xff00_00ff);
        assert_eq!(
            format!("{}", red),
            "oklab(0.62724 0.22656 0.125 / 1)",
            "red"
        );
        assert_eq!(format!("{:.2}", red), "oklab(0.63 0.23 0.13 / 1)", "red");
    }
}
