//! # chromacore
//!
//! Color-management and pixel-processing core for image libraries.
//!
//! ## Contents
//!
//! - **Packed pixels** ([`pixel`]): compact per-format encodings behind one
//!   [`Pixel`] trait with a normalized [`Vector4`] view.
//! - **Companding** ([`companding`]): Rec. 709, Rec. 2020, sRGB, gamma and
//!   L* transfer curves with scalar and batch entry points.
//! - **ICC profiles** ([`icc`]): profile model, reader and byte-exact writer
//!   with tag payload deduplication and MD5 profile ID.
//! - **Convolution** ([`convolution`]): generic, row-parallel kernel filter
//!   over any [`Pixel`] format.
//!
//! ## Quick Start
//!
//! ```
//! use chromacore::{ConvolutionProcessor, ImageBuffer, Kernel, Rgba32};
//!
//! let mut image = ImageBuffer::filled(16, 16, Rgba32::new(200, 120, 40, 255));
//! ConvolutionProcessor::new(Kernel::gaussian(5, 1.0)?).apply(&mut image)?;
//! assert_eq!(image.get(8, 8), Some(&Rgba32::new(200, 120, 40, 255)));
//! # Ok::<(), chromacore::Error>(())
//! ```
//!
//! ## Features
//!
//! - `rayon` (default): run convolution rows on a rayon pool.
//! - `profile-id` (default): compute the ICC profile ID with MD5; without
//!   it the ID is written as zero.

pub mod companding;
pub mod convolution;
pub mod error;
pub mod icc;
pub mod image;
pub mod pixel;

pub use companding::{
    Companding, GammaCompanding, LStarCompanding, Rec2020Companding, Rec709Companding,
    SRgbCompanding,
};
pub use convolution::{ConvolutionProcessor, Kernel, ParallelOptions};
pub use error::{Error, Result};
pub use icc::{IccProfile, write_profile};
pub use image::{ImageBuffer, Rectangle};
pub use pixel::{PackedVector, Pixel, Rg32, Rgba32, Vector4};

/// Version of chromacore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
