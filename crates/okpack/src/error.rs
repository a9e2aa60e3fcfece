//! Utility module with okpack's errors.
//!
//! Packed color operations never fail. Out-of-range inputs are clamped or
//! masked instead. The only fallible operation is loading a gamut table from
//! bytes.

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// An invalid gamut table.
///
/// This error indicates that bytes passed to
/// [`GamutTable::from_bytes`](crate::GamutTable::from_bytes) do not form a
/// valid table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GamutTableError {
    /// A table with the wrong number of bytes. Valid tables have
    /// [`GamutTable::SIZE`](crate::GamutTable::SIZE) bytes.
    WrongLength(usize),

    /// A table with a distance larger than
    /// [`GamutTable::MAX_DISTANCE`](crate::GamutTable::MAX_DISTANCE) at the
    /// given index.
    DistanceTooLarge { index: usize, distance: u8 },
}

impl ::core::fmt::Display for GamutTableError {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        use GamutTableError::*;

        match *self {
            WrongLength(length) => f.write_fmt(format_args!(
                "gamut table should have {} bytes but has {}",
                crate::GamutTable::SIZE,
                length
            )),
            DistanceTooLarge { index, distance } => f.write_fmt(format_args!(
                "gamut table entry {:#06x} should be at most {} but is {}",
                index,
                crate::GamutTable::MAX_DISTANCE,
                distance
            )),
        }
    }
}

impl std::error::Error for GamutTableError {}

#[cfg(feature = "pyffi")]
impl From<GamutTableError> for PyErr {
    fn from(value: GamutTableError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}
