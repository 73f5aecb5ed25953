//! Errors raised while decoding ICC data

use thiserror::Error;

/// Why a byte buffer could not be read as an ICC profile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IccError {
    /// Fewer bytes than the header or tag table needs
    #[error("truncated profile: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// Bytes 36..40 are not `acsp`
    #[error("not an ICC profile: magic 0x{0:08X}")]
    BadMagic(u32),

    /// Declared profile length below the header size or past the buffer
    #[error("declared length {declared} does not fit {available} available bytes")]
    SizeMismatch { declared: u32, available: usize },

    /// A tag table row points outside the profile
    #[error("tag 0x{signature:08X} at {offset}+{size} exceeds profile length {profile_len}")]
    TagOutOfBounds {
        signature: u32,
        offset: u32,
        size: u32,
        profile_len: usize,
    },

    #[error("unknown color space 0x{0:08X}")]
    UnknownColorSpace(u32),

    #[error("unknown profile class 0x{0:08X}")]
    UnknownProfileClass(u32),

    #[error("unknown rendering intent {0}")]
    UnknownRenderingIntent(u32),

    /// Tag payload does not match its type signature
    #[error("malformed tag: {0}")]
    MalformedTag(String),
}
