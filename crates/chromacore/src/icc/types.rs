//! ICC Profile Basic Types
//!
//! Fixed-point numbers, signatures and date encoding as laid out in
//! ICC.1:2022 Section 4. All multi-byte values are big-endian.

/// Build a 4-byte signature from ASCII text, padding with spaces.
///
/// Text longer than four bytes is truncated; an empty string yields 0,
/// which ICC uses for "not set".
pub fn signature_from_ascii(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    let mut bytes = [b' '; 4];
    for (dst, src) in bytes.iter_mut().zip(text.bytes()) {
        *dst = src;
    }
    u32::from_be_bytes(bytes)
}

/// ICC Tag Signature (4-byte ASCII code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagSignature(pub u32);

impl TagSignature {
    /// Create from 4 ASCII characters
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    /// Convert to ASCII string (if valid)
    pub fn to_string(&self) -> String {
        let bytes = self.0.to_be_bytes();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub const A2B0: Self = Self::from_bytes(*b"A2B0");
    pub const B2A0: Self = Self::from_bytes(*b"B2A0");
    pub const BLUE_COLORANT: Self = Self::from_bytes(*b"bXYZ");
    pub const BLUE_TRC: Self = Self::from_bytes(*b"bTRC");
    pub const CHAD: Self = Self::from_bytes(*b"chad");
    pub const COPYRIGHT: Self = Self::from_bytes(*b"cprt");
    pub const DESC: Self = Self::from_bytes(*b"desc");
    pub const DMDD: Self = Self::from_bytes(*b"dmdd");
    pub const DMND: Self = Self::from_bytes(*b"dmnd");
    pub const GRAY_TRC: Self = Self::from_bytes(*b"kTRC");
    pub const GREEN_COLORANT: Self = Self::from_bytes(*b"gXYZ");
    pub const GREEN_TRC: Self = Self::from_bytes(*b"gTRC");
    pub const LUMINANCE: Self = Self::from_bytes(*b"lumi");
    pub const MEDIA_WHITE: Self = Self::from_bytes(*b"wtpt");
    pub const MEDIA_BLACK: Self = Self::from_bytes(*b"bkpt");
    pub const RED_COLORANT: Self = Self::from_bytes(*b"rXYZ");
    pub const RED_TRC: Self = Self::from_bytes(*b"rTRC");
    pub const TECH: Self = Self::from_bytes(*b"tech");
}

/// Type signatures for ICC tag data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSignature(pub u32);

impl TypeSignature {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const XYZ: Self = Self::from_bytes(*b"XYZ ");
    pub const CURVE: Self = Self::from_bytes(*b"curv");
    pub const PARA: Self = Self::from_bytes(*b"para");
    pub const TEXT: Self = Self::from_bytes(*b"text");
    pub const MLUC: Self = Self::from_bytes(*b"mluc");
    pub const SF32: Self = Self::from_bytes(*b"sf32");
    pub const SIG: Self = Self::from_bytes(*b"sig ");
    pub const DESC: Self = Self::from_bytes(*b"desc");
}

/// s15Fixed16Number - 16.16 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct S15Fixed16(pub i32);

impl S15Fixed16 {
    /// Create from raw i32 value
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Create from f64 value, rounding to the nearest 1/65536
    pub fn from_f64(val: f64) -> Self {
        Self((val * 65536.0).round() as i32)
    }

    /// Convert to f64
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }

    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(i32::from_be_bytes(bytes))
    }

    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

/// u8Fixed8Number - unsigned 8.8 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U8Fixed8(pub u16);

impl U8Fixed8 {
    pub fn from_f64(val: f64) -> Self {
        Self((val * 256.0).round().clamp(0.0, u16::MAX as f64) as u16)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 256.0
    }

    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
}

/// XYZNumber - ICC XYZ value (3 × s15Fixed16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct XyzNumber {
    pub x: S15Fixed16,
    pub y: S15Fixed16,
    pub z: S15Fixed16,
}

impl XyzNumber {
    /// D50 illuminant as encoded by most profiles (0.9642, 1.0, 0.8249)
    pub const D50: Self = Self {
        x: S15Fixed16::from_raw(0x0000_F6D6),
        y: S15Fixed16::from_raw(0x0001_0000),
        z: S15Fixed16::from_raw(0x0000_D32D),
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: S15Fixed16::from_f64(x),
            y: S15Fixed16::from_f64(y),
            z: S15Fixed16::from_f64(z),
        }
    }

    /// Parse from 12 bytes (big-endian)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 12 {
            return None;
        }
        Some(Self {
            x: S15Fixed16::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            y: S15Fixed16::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            z: S15Fixed16::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }

    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out[0..4].copy_from_slice(&self.x.to_be_bytes());
        out[4..8].copy_from_slice(&self.y.to_be_bytes());
        out[8..12].copy_from_slice(&self.z.to_be_bytes());
        out
    }

    pub fn to_f64(&self) -> [f64; 3] {
        [self.x.to_f64(), self.y.to_f64(), self.z.to_f64()]
    }
}

/// dateTimeNumber - ICC date/time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeNumber {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl DateTimeNumber {
    pub const fn new(year: u16, month: u16, day: u16, hour: u16, minute: u16, second: u16) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Parse from 12 bytes (big-endian)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 12 {
            return None;
        }
        Some(Self {
            year: u16::from_be_bytes([bytes[0], bytes[1]]),
            month: u16::from_be_bytes([bytes[2], bytes[3]]),
            day: u16::from_be_bytes([bytes[4], bytes[5]]),
            hour: u16::from_be_bytes([bytes[6], bytes[7]]),
            minute: u16::from_be_bytes([bytes[8], bytes[9]]),
            second: u16::from_be_bytes([bytes[10], bytes[11]]),
        })
    }

    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        for (chunk, value) in out.chunks_exact_mut(2).zip([
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        ]) {
            chunk.copy_from_slice(&value.to_be_bytes());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s15fixed16() {
        let one = S15Fixed16::from_f64(1.0);
        assert_eq!(one.0, 0x0001_0000);

        let half = S15Fixed16::from_f64(0.5);
        assert!((half.to_f64() - 0.5).abs() < 1e-6);

        let neg = S15Fixed16::from_f64(-1.5);
        assert!((neg.to_f64() - (-1.5)).abs() < 1e-6);

        // Rounds instead of truncating
        assert_eq!(S15Fixed16::from_f64(0.9642).0, 0x0000_F6D6);
        assert_eq!(S15Fixed16::from_f64(0.8249).0, 0x0000_D32D);
    }

    #[test]
    fn test_xyz_number() {
        // D50 white point in ICC encoding
        let bytes: [u8; 12] = [
            0x00, 0x00, 0xF6, 0xD6, // X = 0.9642
            0x00, 0x01, 0x00, 0x00, // Y = 1.0
            0x00, 0x00, 0xD3, 0x2D, // Z = 0.8249
        ];
        let xyz = XyzNumber::from_bytes(&bytes).unwrap();
        assert_eq!(xyz, XyzNumber::D50);
        assert_eq!(xyz.to_bytes(), bytes);

        let [x, y, z] = xyz.to_f64();
        assert!((x - 0.9642).abs() < 0.001);
        assert!((y - 1.0).abs() < 0.001);
        assert!((z - 0.8249).abs() < 0.001);
    }

    #[test]
    fn test_date_time_bytes() {
        let dt = DateTimeNumber::new(2024, 3, 15, 13, 45, 30);
        let bytes = dt.to_bytes();
        assert_eq!(&bytes[0..2], &2024u16.to_be_bytes());
        assert_eq!(bytes[11], 30);
        assert_eq!(DateTimeNumber::from_bytes(&bytes), Some(dt));
    }

    #[test]
    fn test_signature_from_ascii() {
        assert_eq!(signature_from_ascii("lcms"), u32::from_be_bytes(*b"lcms"));
        assert_eq!(signature_from_ascii("ab"), u32::from_be_bytes(*b"ab  "));
        assert_eq!(signature_from_ascii("toolong"), u32::from_be_bytes(*b"tool"));
        assert_eq!(signature_from_ascii(""), 0);
    }

    #[test]
    fn test_tag_signature() {
        assert_eq!(TagSignature::DESC.to_string(), "desc");
        assert_eq!(TagSignature::RED_COLORANT.to_string(), "rXYZ");
    }
}
