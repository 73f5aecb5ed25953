//! ICC Profile Header
//!
//! The ICC profile header is exactly 128 bytes and contains basic profile information.
//! See ICC.1:2022 Section 7.2.

use super::data_writer::IccDataWriter;
use super::error::IccError;
use super::types::{DateTimeNumber, XyzNumber};

/// Profile file signature - must be 'acsp' (0x61637370)
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Header length; also the minimum valid profile size
pub const HEADER_SIZE: usize = 128;

/// Byte offset of the 16-byte profile ID
pub const PROFILE_ID_OFFSET: usize = 84;

/// ICC Profile Header (128 bytes)
///
/// `size` reflects what was read; the writer always emits the real length.
/// The 'acsp' file signature is implied and not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct IccHeader {
    /// Profile size in bytes
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    pub version: ProfileVersion,
    pub device_class: ProfileClass,
    /// Color space of data (RGB, CMYK, etc.)
    pub color_space: ColorSpace,
    /// Profile connection space (XYZ or Lab)
    pub pcs: ColorSpace,
    pub creation_date: DateTimeNumber,
    pub platform: PrimaryPlatform,
    pub flags: u32,
    /// Device manufacturer signature
    pub manufacturer: u32,
    /// Device model signature
    pub model: u32,
    /// Device attributes
    pub attributes: u64,
    pub rendering_intent: RenderingIntent,
    /// PCS illuminant (should be D50)
    pub illuminant: XyzNumber,
    /// Profile creator signature
    pub creator: u32,
    /// Profile ID (MD5 hash, or zero)
    pub profile_id: [u8; 16],
}

impl Default for IccHeader {
    /// A v4.3 RGB display profile with an XYZ connection space and D50
    /// illuminant
    fn default() -> Self {
        Self {
            size: 0,
            cmm_type: 0,
            version: ProfileVersion::V4_3,
            device_class: ProfileClass::Display,
            color_space: ColorSpace::Rgb,
            pcs: ColorSpace::Xyz,
            creation_date: DateTimeNumber::default(),
            platform: PrimaryPlatform::NotSet,
            flags: 0,
            manufacturer: 0,
            model: 0,
            attributes: 0,
            rendering_intent: RenderingIntent::Perceptual,
            illuminant: XyzNumber::D50,
            creator: 0,
            profile_id: [0; 16],
        }
    }
}

pub(crate) fn be_u32(data: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

impl IccHeader {
    /// Parse header from bytes
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < HEADER_SIZE {
            return Err(IccError::Truncated {
                needed: HEADER_SIZE,
                available: data.len(),
            });
        }

        let signature = be_u32(data, 36);
        if signature != PROFILE_SIGNATURE {
            return Err(IccError::BadMagic(signature));
        }

        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(&data[PROFILE_ID_OFFSET..PROFILE_ID_OFFSET + 16]);

        let mut attributes = [0u8; 8];
        attributes.copy_from_slice(&data[56..64]);

        Ok(Self {
            size: be_u32(data, 0),
            cmm_type: be_u32(data, 4),
            version: ProfileVersion::from_u32(be_u32(data, 8)),
            device_class: ProfileClass::from_u32(be_u32(data, 12))?,
            color_space: ColorSpace::from_u32(be_u32(data, 16))?,
            pcs: ColorSpace::from_u32(be_u32(data, 20))?,
            creation_date: DateTimeNumber::from_bytes(&data[24..36]).unwrap_or_default(),
            platform: PrimaryPlatform::from_u32(be_u32(data, 40)),
            flags: be_u32(data, 44),
            manufacturer: be_u32(data, 48),
            model: be_u32(data, 52),
            attributes: u64::from_be_bytes(attributes),
            rendering_intent: RenderingIntent::from_u32(be_u32(data, 64))?,
            illuminant: XyzNumber::from_bytes(&data[68..80]).unwrap_or_default(),
            creator: be_u32(data, 80),
            profile_id,
        })
    }

    /// Check the declared size against the available data
    pub fn validate(&self, data_len: usize) -> Result<(), IccError> {
        if (self.size as usize) < HEADER_SIZE || self.size as usize > data_len {
            return Err(IccError::SizeMismatch {
                declared: self.size,
                available: data_len,
            });
        }
        Ok(())
    }

    /// Write the 128 header bytes at offset 0 with the given total size and
    /// profile ID. Bytes 100..128 are reserved and written as zero.
    pub fn write_into(&self, writer: &mut IccDataWriter, size: u32, profile_id: &[u8; 16]) {
        writer.set_index(0);
        writer.write_u32(size);
        writer.write_u32(self.cmm_type);
        writer.write_u32(self.version.to_u32());
        writer.write_u32(self.device_class.to_u32());
        writer.write_u32(self.color_space.to_u32());
        writer.write_u32(self.pcs.to_u32());
        writer.write_bytes(&self.creation_date.to_bytes());
        writer.write_u32(PROFILE_SIGNATURE);
        writer.write_u32(self.platform.to_u32());
        writer.write_u32(self.flags);
        writer.write_u32(self.manufacturer);
        writer.write_u32(self.model);
        writer.write_u64(self.attributes);
        writer.write_u32(self.rendering_intent.to_u32());
        writer.write_xyz_number(&self.illuminant);
        writer.write_u32(self.creator);
        writer.write_bytes(profile_id);
        writer.write_empty(HEADER_SIZE - 100);
    }
}

/// ICC Profile Version, stored as major byte then minor.bugfix nibbles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ProfileVersion {
    pub const V2_1: Self = Self::new(2, 1, 0);
    pub const V4_3: Self = Self::new(4, 3, 0);

    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn from_u32(val: u32) -> Self {
        let [major, minor_patch, _, _] = val.to_be_bytes();
        Self::new(major, minor_patch >> 4, minor_patch & 0x0F)
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes([self.major, (self.minor << 4) | (self.patch & 0x0F), 0, 0])
    }

    /// Check if version is at least the specified version
    pub fn at_least(&self, major: u8, minor: u8) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

/// Primary platform signature (header bytes 40..44)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryPlatform {
    #[default]
    NotSet,
    Apple,
    Microsoft,
    SiliconGraphics,
    Sun,
    Other(u32),
}

impl PrimaryPlatform {
    pub fn from_u32(val: u32) -> Self {
        match &val.to_be_bytes() {
            [0, 0, 0, 0] => Self::NotSet,
            b"APPL" => Self::Apple,
            b"MSFT" => Self::Microsoft,
            b"SGI " => Self::SiliconGraphics,
            b"SUNW" => Self::Sun,
            _ => Self::Other(val),
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::NotSet => 0,
            Self::Apple => u32::from_be_bytes(*b"APPL"),
            Self::Microsoft => u32::from_be_bytes(*b"MSFT"),
            Self::SiliconGraphics => u32::from_be_bytes(*b"SGI "),
            Self::Sun => u32::from_be_bytes(*b"SUNW"),
            Self::Other(v) => *v,
        }
    }
}

/// ICC Profile Class (Device Class)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    DeviceLink,
    ColorSpace,
    Abstract,
    NamedColor,
}

const PROFILE_CLASSES: [(ProfileClass, &[u8; 4]); 7] = [
    (ProfileClass::Input, b"scnr"),
    (ProfileClass::Display, b"mntr"),
    (ProfileClass::Output, b"prtr"),
    (ProfileClass::DeviceLink, b"link"),
    (ProfileClass::ColorSpace, b"spac"),
    (ProfileClass::Abstract, b"abst"),
    (ProfileClass::NamedColor, b"nmcl"),
];

impl ProfileClass {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        PROFILE_CLASSES
            .iter()
            .find(|(_, sig)| **sig == val.to_be_bytes())
            .map(|(class, _)| *class)
            .ok_or(IccError::UnknownProfileClass(val))
    }

    pub fn to_u32(&self) -> u32 {
        PROFILE_CLASSES
            .iter()
            .find(|(class, _)| class == self)
            .map(|(_, sig)| u32::from_be_bytes(**sig))
            .unwrap_or_default()
    }
}

/// ICC Color Space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Xyz,
    Lab,
    Luv,
    YCbCr,
    Yxy,
    Rgb,
    Gray,
    Hsv,
    Hls,
    Cmyk,
    Cmy,
    /// N-channel generic color space (`2CLR` .. `FCLR`), N in 2..=15
    Color(u8),
}

const NAMED_COLOR_SPACES: [(ColorSpace, &[u8; 4]); 11] = [
    (ColorSpace::Xyz, b"XYZ "),
    (ColorSpace::Lab, b"Lab "),
    (ColorSpace::Luv, b"Luv "),
    (ColorSpace::YCbCr, b"YCbr"),
    (ColorSpace::Yxy, b"Yxy "),
    (ColorSpace::Rgb, b"RGB "),
    (ColorSpace::Gray, b"GRAY"),
    (ColorSpace::Hsv, b"HSV "),
    (ColorSpace::Hls, b"HLS "),
    (ColorSpace::Cmyk, b"CMYK"),
    (ColorSpace::Cmy, b"CMY "),
];

impl ColorSpace {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        let bytes = val.to_be_bytes();
        if let Some((space, _)) = NAMED_COLOR_SPACES.iter().find(|(_, sig)| **sig == bytes) {
            return Ok(*space);
        }
        if &bytes[1..] == b"CLR" {
            let n = match bytes[0] {
                b'2'..=b'9' => bytes[0] - b'0',
                b'A'..=b'F' => bytes[0] - b'A' + 10,
                _ => return Err(IccError::UnknownColorSpace(val)),
            };
            return Ok(Self::Color(n));
        }
        Err(IccError::UnknownColorSpace(val))
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Color(n) => {
                let digit = match *n {
                    n @ 0..=9 => b'0' + n,
                    n => b'A' + (n - 10).min(5),
                };
                u32::from_be_bytes([digit, b'C', b'L', b'R'])
            }
            named => NAMED_COLOR_SPACES
                .iter()
                .find(|(space, _)| space == named)
                .map(|(_, sig)| u32::from_be_bytes(**sig))
                .unwrap_or_default(),
        }
    }
}

/// ICC Rendering Intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    /// Perceptual - best for photographs
    #[default]
    Perceptual,
    /// Relative colorimetric - preserves in-gamut colors
    RelativeColorimetric,
    /// Saturation - maintains saturation
    Saturation,
    /// Absolute colorimetric - preserves white point
    AbsoluteColorimetric,
}

impl RenderingIntent {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        match val {
            0 => Ok(Self::Perceptual),
            1 => Ok(Self::RelativeColorimetric),
            2 => Ok(Self::Saturation),
            3 => Ok(Self::AbsoluteColorimetric),
            _ => Err(IccError::UnknownRenderingIntent(val)),
        }
    }

    pub fn to_u32(&self) -> u32 {
        *self as u32
    }
}
