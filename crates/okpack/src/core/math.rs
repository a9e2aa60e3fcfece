use crate::{Bits, Float};

#[cfg(feature = "f64")]
use ::core::f64::consts::TAU;
#[cfg(not(feature = "f64"))]
use ::core::f32::consts::TAU;

/// Extension trait for floating point numbers.
pub(crate) trait FloatExt {
    /// The factor for rounding off the least significant digits before
    /// comparing floats.
    const ROUNDING_FACTOR: Self;
}

impl FloatExt for f64 {
    const ROUNDING_FACTOR: f64 = 1e14;
}

impl FloatExt for f32 {
    const ROUNDING_FACTOR: f32 = 1e5;
}

// --------------------------------------------------------------------------------------------------------------------

/// Compute the sine of the given angle measured in turns.
#[inline]
pub fn sin_turns(turns: Float) -> Float {
    (turns * TAU).sin()
}

/// Compute the cosine of the given angle measured in turns.
#[inline]
pub fn cos_turns(turns: Float) -> Float {
    (turns * TAU).cos()
}

/// Compute the angle of the vector `(x, y)` measured in turns.
///
/// The result always falls into `0.0..1.0`, never is negative, and never
/// reaches one, so that multiplying by a table width and truncating yields a
/// valid index. Not-a-number inputs as well as the origin produce zero.
#[inline]
pub fn atan2_turns(y: Float, x: Float) -> Float {
    let turns = y.atan2(x) / TAU;
    let turns = if turns < 0.0 { turns + 1.0 } else { turns };

    // Tiny negative angles round up to a full turn and NaN fails both tests.
    if (0.0..1.0).contains(&turns) {
        turns
    } else {
        0.0
    }
}

// --------------------------------------------------------------------------------------------------------------------

#[cfg(feature = "f64")]
const CBRT_MAGIC: Bits = 0x2A9F_7893_782D_A1CE;
#[cfg(not(feature = "f64"))]
const CBRT_MAGIC: Bits = 0x2A51_37A0;

const CBRT_STEPS: usize = 4;

/// Compute the cube root of a positive number.
///
/// Dividing the bit pattern by three seeds the computation with an estimate
/// within a few percent, which four Newton steps refine to full precision.
/// Zero, negative numbers, subnormals, and not-a-number all produce zero.
pub(crate) fn cbrt_positive(x: Float) -> Float {
    if x.is_nan() || x < Float::MIN_POSITIVE {
        return 0.0;
    }

    let mut y = Float::from_bits(x.to_bits() / 3 + CBRT_MAGIC);
    for _ in 0..CBRT_STEPS {
        y = (2.0 as Float).mul_add(y, x / (y * y)) / 3.0;
    }
    y
}

#[cfg(test)]
mod test {
    use super::{atan2_turns, cbrt_positive, cos_turns, sin_turns};
    use crate::Float;

    #[cfg(feature = "f64")]
    const CBRT_TOLERANCE: Float = 1e-9;
    #[cfg(not(feature = "f64"))]
    const CBRT_TOLERANCE: Float = 1e-6;

    #[test]
    fn test_cbrt_positive() {
        assert_eq!(cbrt_positive(0.0), 0.0, "zero has zero cube root");
        assert_eq!(cbrt_positive(-8.0), 0.0, "negative input yields zero");
        assert_eq!(cbrt_positive(Float::NAN), 0.0, "NaN input yields zero");

        for step in 1..=2_000 {
            let x = step as Float * 0.001;
            let expected = x.cbrt();
            let actual = cbrt_positive(x);
            assert!(
                (actual - expected).abs() <= expected * CBRT_TOLERANCE,
                "cube root of {} is {} not {}",
                x,
                expected,
                actual
            );
        }

        for x in [1e-6 as Float, 2.5e-5, 0.0001, 0.125, 27.0] {
            let expected = x.cbrt();
            let actual = cbrt_positive(x);
            assert!(
                (actual - expected).abs() <= expected * CBRT_TOLERANCE,
                "cube root of {} is {} not {}",
                x,
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_atan2_turns() {
        assert_eq!(atan2_turns(0.0, 0.0), 0.0, "origin has zero angle");
        assert_eq!(atan2_turns(0.0, 1.0), 0.0, "positive x axis");
        assert_eq!(atan2_turns(Float::NAN, 1.0), 0.0, "NaN maps to zero");
        assert!((atan2_turns(1.0, 0.0) - 0.25).abs() < 1e-6, "positive y axis");
        assert!((atan2_turns(0.0, -1.0) - 0.5).abs() < 1e-6, "negative x axis");
        assert!((atan2_turns(-1.0, 0.0) - 0.75).abs() < 1e-6, "negative y axis");

        // Just below the positive x axis must not round up to a full turn.
        let turns = atan2_turns(-1e-20, 1.0);
        assert!((0.0..1.0).contains(&turns), "{} is not in 0..1", turns);

        for step in 0..360 {
            let turns = step as Float / 360.0;
            let angle = atan2_turns(sin_turns(turns), cos_turns(turns));
            let error = (angle - turns).abs().min(1.0 - (angle - turns).abs());
            assert!(error < 1e-4, "angle {} comes back as {}", turns, angle);
        }
    }
}
