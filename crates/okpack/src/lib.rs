//! # Ok 🎨 Pack
//!
//! Okpack squeezes a color in the perceptually uniform
//! [Oklab](https://bottosson.github.io/posts/oklab/) color space into 32 bits
//! and edits it in place of a float.
#![cfg_attr(
    not(feature = "pyffi"),
    doc = " This version of the API documentation **covers native Rust interfaces
only**."
)]
#![cfg_attr(
    feature = "pyffi",
    doc = " This version of the API documentation **covers both Rust and Python
interfaces**."
)]
//!
//!
//! ## 1. Overview
//!
//! Okpack's main abstractions are:
//!
//!   * [`PackedColor`] implements **packed colors**, one byte each for Oklab's
//!     lightness L and its two colorness axes A and B plus seven bits of
//!     alpha. Since the word doubles as the bit pattern of an `f32`, packed
//!     colors travel through rendering pipelines as vertex colors. Its methods
//!     expose all of okpack's functionality, including conversion from and to
//!     8-bit RGBA, gamut testing and clamping, channel edits, and polar
//!     parameterizations.
//!   * [`GamutTable`] implements the **gamut boundary**. It stores the maximum
//!     chroma for 256 lightness levels and 256 hues and is embedded in the
//!     crate. [`gamut_table`] provides access to the process-wide instance.
//!
//! All operations are pure functions over `Copy` values. None of them
//! allocates or blocks, and none fails. Out-of-range inputs are clamped or
//! masked instead of rejected, and a random edit that cannot find an in-gamut
//! result simply returns its input. The only fallible function,
//! [`GamutTable::from_bytes`], validates a table loaded from elsewhere.
//!
//!
//! ## 2. Packed Colors in Three Steps
//!
//! ### i. Pack a Color
//!
//! ```
//! # use okpack::PackedColor;
//! let red = PackedColor::from_rgba8888(0xff0000ff);
//! assert_eq!(red.alpha_byte(), 0xfe);
//! ```
//!
//! ### ii. Edit the Color
//!
//! ```
//! # use okpack::PackedColor;
//! # let red = PackedColor::from_rgba8888(0xff0000ff);
//! let pink = red.lighten(0.5).limit_to_gamut();
//! assert!(pink.in_gamut());
//! assert_eq!(pink.alpha_byte(), red.alpha_byte());
//! ```
//!
//! ### iii. Unpack the Color
//!
//! ```
//! # use okpack::PackedColor;
//! # let pink = PackedColor::from_rgba8888(0xff0000ff).lighten(0.5).limit_to_gamut();
//! let rgba = pink.to_rgba8888();
//! assert_eq!(rgba & 0xff, 0xff);
//! ```
//!
//!
//! ## 3. Optional Features
//!
//! Okpack supports three feature flags:
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     and `u64` as [`Bits`] instead of `f32` as [`Float`] and `u32` as
//!     [`Bits`]. This feature is enabled by default. It only affects
//!     intermediate computations; packed colors always are 32 bits.
//!   - **`gamut`** controls [`GamutTable::generate`], which recomputes the
//!     gamut boundary table from the color transform. This feature is
//!     disabled by default.
//!   - **`pyffi`** controls okpack's Python integration through
//!     [PyO3](https://pyo3.rs/). This feature is disabled by default.

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

extern crate alloc;

mod core;
pub mod error;
mod object;

#[cfg(feature = "pyffi")]
pub use core::close_enough;
#[doc(hidden)]
pub use core::to_eq_bits;

pub use core::{atan2_turns, chroma_limit, cos_turns, gamut_table, sin_turns, GamutTable};
pub use object::PackedColor;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn okpack(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PackedColor>()?;
    m.add_function(wrap_pyfunction!(py_chroma_limit, m)?)?;
    m.add_function(wrap_pyfunction!(close_enough, m)?)?;
    m.add("GAMUT_TABLE_VERSION", GamutTable::VERSION)?;
    Ok(())
}

/// Determine the maximum chroma for the given hue and lightness. <i
/// class=python-only>Python only!</i>
#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pyfunction]
#[pyo3(name = "chroma_limit")]
fn py_chroma_limit(hue: Float, lightness: Float) -> Float {
    chroma_limit(hue, lightness)
}
