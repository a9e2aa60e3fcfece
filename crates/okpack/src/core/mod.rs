mod codec;
mod contrast;
mod conversion;
mod edit;
mod equality;
mod gamut;
mod math;
mod polar;
mod sampling;
mod string;

// codec
pub(crate) use codec::{decode_alpha, encode_alpha, encode_byte};

// contrast
pub(crate) use contrast::{differentiate_lightness, inverse_lightness, offset_lightness};

// conversion
pub(crate) use conversion::{from_rgba, from_rgba8888, to_oklab, to_rgba, to_rgba8888};

// edit
pub(crate) use edit::{
    blot, darken, dullen, edit_oklab, enrich, fade, lerp, lighten, lower_a, lower_b, raise_a,
    raise_b,
};

// equality
#[cfg(feature = "pyffi")]
pub use equality::close_enough;
pub use equality::to_eq_bits;

// gamut
pub use gamut::{chroma_limit, gamut_table, GamutTable};

// math
pub(crate) use math::FloatExt;
pub use math::{atan2_turns, cos_turns, sin_turns};

// polar
pub(crate) use polar::{
    chroma, hsl_hue, hsl_lightness, hsl_saturation, oklab_by_hcl, oklab_by_hsl, oklab_hue,
    oklab_lightness, oklab_saturation,
};

// sampling
pub(crate) use sampling::random_edit;

// string
pub(crate) use string::format;
