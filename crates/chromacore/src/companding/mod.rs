//! Companding (transfer curve) strategies
//!
//! A companding curve converts one normalized channel between its
//! display-encoded form and linear light:
//! - `expand`: encoded → linear
//! - `compress`: linear → encoded
//!
//! Every strategy here is a stateless unit struct (or a plain value), so a
//! single instance can be shared freely across threads.
//!
//! Constants are the published ones. Pipelines are sensitive to drift at
//! the segment boundary, so thresholds are not rounded or re-derived.

mod batch;

pub use batch::{compress_slice, expand_slice};

/// Converts a single channel between encoded and linear representations.
pub trait Companding: Send + Sync {
    /// Encoded → linear
    fn expand(&self, channel: f32) -> f32;

    /// Linear → encoded
    fn compress(&self, channel: f32) -> f32;
}

/// ITU-R BT.709 transfer function
///
/// - Expand: `V / 4.5` if `V < 0.081`, else `((V + 0.099) / 1.099)^(1/0.45)`
/// - Compress: `4.5 * L` if `L < 0.018`, else `1.099 * L^0.45 - 0.099`
///
/// Compress is the published OETF. The `4500 * L` form without the 0.45
/// exponent found in some older code is not the inverse of expand and must
/// not be reintroduced. The two published segments meet with a step of
/// about 3e-4 at `L = 0.018`, so round trips near that point are only exact
/// to ~1e-3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rec709Companding;

impl Companding for Rec709Companding {
    #[inline]
    fn expand(&self, channel: f32) -> f32 {
        if channel < 0.081 {
            channel / 4.5
        } else {
            ((channel as f64 + 0.099) / 1.099).powf(1.0 / 0.45) as f32
        }
    }

    #[inline]
    fn compress(&self, channel: f32) -> f32 {
        if channel < 0.018 {
            4.5 * channel
        } else {
            (1.099 * (channel as f64).powf(0.45) - 0.099) as f32
        }
    }
}

/// ITU-R BT.2020 transfer function, 12-bit system constants
/// (`α = 1.0993`, `β = 0.0181`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rec2020Companding;

impl Companding for Rec2020Companding {
    #[inline]
    fn expand(&self, channel: f32) -> f32 {
        if channel < 0.08145 {
            channel / 4.5
        } else {
            ((channel as f64 + 0.0993) / 1.0993).powf(1.0 / 0.45) as f32
        }
    }

    #[inline]
    fn compress(&self, channel: f32) -> f32 {
        if channel < 0.0181 {
            4.5 * channel
        } else {
            (1.0993 * (channel as f64).powf(0.45) - 0.0993) as f32
        }
    }
}

/// sRGB transfer function (IEC 61966-2-1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SRgbCompanding;

impl Companding for SRgbCompanding {
    #[inline]
    fn expand(&self, channel: f32) -> f32 {
        if channel <= 0.04045 {
            channel / 12.92
        } else {
            ((channel as f64 + 0.055) / 1.055).powf(2.4) as f32
        }
    }

    #[inline]
    fn compress(&self, channel: f32) -> f32 {
        if channel <= 0.0031308 {
            channel * 12.92
        } else {
            (1.055 * (channel as f64).powf(1.0 / 2.4) - 0.055) as f32
        }
    }
}

/// Pure power-law curve, `y = x^gamma`. Non-positive input maps to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaCompanding {
    pub gamma: f32,
}

impl GammaCompanding {
    pub const fn new(gamma: f32) -> Self {
        Self { gamma }
    }
}

impl Companding for GammaCompanding {
    #[inline]
    fn expand(&self, channel: f32) -> f32 {
        if channel <= 0.0 {
            0.0
        } else {
            (channel as f64).powf(self.gamma as f64) as f32
        }
    }

    #[inline]
    fn compress(&self, channel: f32) -> f32 {
        if channel <= 0.0 {
            0.0
        } else {
            (channel as f64).powf(1.0 / self.gamma as f64) as f32
        }
    }
}

/// CIE L* companding (perceptual lightness curve)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LStarCompanding;

/// CIE κ = 24389/27
const CIE_KAPPA: f64 = 24389.0 / 27.0;
/// CIE ε = 216/24389
const CIE_EPSILON: f64 = 216.0 / 24389.0;

impl Companding for LStarCompanding {
    #[inline]
    fn expand(&self, channel: f32) -> f32 {
        let c = channel as f64;
        if c <= 0.08 {
            (100.0 * c / CIE_KAPPA) as f32
        } else {
            ((c + 0.16) / 1.16).powi(3) as f32
        }
    }

    #[inline]
    fn compress(&self, channel: f32) -> f32 {
        let l = channel as f64;
        if l <= CIE_EPSILON {
            (l * CIE_KAPPA / 100.0) as f32
        } else {
            (1.16 * l.cbrt() - 0.16) as f32
        }
    }
}
