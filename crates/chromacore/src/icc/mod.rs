//! ICC profile model, reader and writer (ICC.1:2022).
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (rows may share a payload)
//!
//! # Example
//!
//! ```
//! use chromacore::icc::{IccProfile, ParametricCurve, TagData, TagSignature, XyzNumber};
//!
//! let trc = TagData::parametric(ParametricCurve::srgb());
//! let profile = IccProfile::default()
//!     .with_tag(TagSignature::MEDIA_WHITE, TagData::xyz(XyzNumber::D50))
//!     .with_tag(TagSignature::RED_TRC, trc.clone())
//!     .with_tag(TagSignature::GREEN_TRC, trc);
//!
//! let bytes = profile.to_bytes()?;
//! assert_eq!(IccProfile::parse(&bytes)?.tag_count(), 3);
//! # Ok::<(), chromacore::Error>(())
//! ```

pub mod data_writer;
pub mod header;
pub mod tags;

mod error;
mod profile;
mod types;
mod writer;

pub use data_writer::IccDataWriter;
pub use error::IccError;
pub use header::{
    ColorSpace, IccHeader, PrimaryPlatform, ProfileClass, ProfileVersion, RenderingIntent,
};
pub use profile::IccProfile;
pub use tags::{
    CurveData, ParametricCurve, ParametricCurveData, ParametricCurveType, TagData, TagDataEntry,
    TagTableEntry, TextData, XyzTagData,
};
pub use types::{
    DateTimeNumber, S15Fixed16, TagSignature, TypeSignature, U8Fixed8, XyzNumber,
    signature_from_ascii,
};
pub use writer::{profile_id_of, write_profile};
