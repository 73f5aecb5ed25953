//! In-memory ICC profile: a header plus an ordered list of tag entries.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (rows may share data)
//!
//! # Usage
//!
//! ```ignore
//! let profile = IccProfile::parse(&bytes)?;
//! println!("Profile: {:?}", profile.description());
//! let bytes = profile.to_bytes()?;
//! ```

use super::error::IccError;
use super::header::{HEADER_SIZE, IccHeader, PROFILE_ID_OFFSET, be_u32};
use super::tags::{TagData, TagDataEntry, TagTableEntry};
use super::types::{TagSignature, XyzNumber};
use super::writer;

const TAG_TABLE_ROW_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IccProfile {
    pub header: IccHeader,
    /// Tag entries in table order. Signatures are expected to be unique but
    /// this is not enforced.
    pub entries: Vec<TagDataEntry>,
}

impl IccProfile {
    pub fn new(header: IccHeader) -> Self {
        Self {
            header,
            entries: Vec::new(),
        }
    }

    /// Append a tag, builder style
    pub fn with_tag(mut self, signature: TagSignature, data: TagData) -> Self {
        self.entries.push(TagDataEntry::new(signature, data));
        self
    }

    /// Replace the first tag with this signature, or append it
    pub fn set_tag(&mut self, signature: TagSignature, data: TagData) {
        match self.entries.iter_mut().find(|e| e.signature == signature) {
            Some(entry) => entry.data = data,
            None => self.entries.push(TagDataEntry::new(signature, data)),
        }
    }

    /// Parse an ICC profile from bytes.
    ///
    /// Every table row becomes its own entry, so rows sharing one payload
    /// come back as separate entries with equal data. Tags of a known type
    /// that fail to decode are kept raw.
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let header = IccHeader::parse(data)?;
        header.validate(data.len())?;
        let data = &data[..header.size as usize];

        let rows = Self::parse_tag_table(data)?;
        let mut entries = Vec::with_capacity(rows.len());

        for row in &rows {
            let start = row.offset as usize;
            let end = start + row.size as usize;
            let Some(tag_data) = data.get(start..end) else {
                return Err(IccError::TagOutOfBounds {
                    signature: row.signature.0,
                    offset: row.offset,
                    size: row.size,
                    profile_len: data.len(),
                });
            };

            let parsed = TagData::parse(tag_data).unwrap_or_else(|_| TagData::Unknown {
                type_sig: tag_data
                    .get(..4)
                    .map_or(0, |b| u32::from_be_bytes([b[0], b[1], b[2], b[3]])),
                data: tag_data.to_vec(),
            });
            entries.push(TagDataEntry::new(row.signature, parsed));
        }

        Ok(Self { header, entries })
    }

    fn parse_tag_table(data: &[u8]) -> Result<Vec<TagTableEntry>, IccError> {
        let table_start = HEADER_SIZE + 4;
        if data.len() < table_start {
            return Err(IccError::Truncated {
                needed: table_start,
                available: data.len(),
            });
        }

        let count = be_u32(data, HEADER_SIZE) as usize;
        let required_size = count
            .checked_mul(TAG_TABLE_ROW_SIZE)
            .and_then(|n| n.checked_add(table_start))
            .unwrap_or(usize::MAX);

        if data.len() < required_size {
            return Err(IccError::Truncated {
                needed: required_size,
                available: data.len(),
            });
        }

        let rows = data[table_start..required_size]
            .chunks_exact(TAG_TABLE_ROW_SIZE)
            .map(|row| TagTableEntry {
                signature: TagSignature(be_u32(row, 0)),
                offset: be_u32(row, 4),
                size: be_u32(row, 8),
            })
            .collect();

        Ok(rows)
    }

    /// Serialize to the binary container
    pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        writer::write_profile(Some(self))
    }

    /// Profile ID this profile would carry once serialized
    pub fn compute_profile_id(&self) -> crate::Result<[u8; 16]> {
        let bytes = self.to_bytes()?;
        let mut id = [0u8; 16];
        id.copy_from_slice(&bytes[PROFILE_ID_OFFSET..PROFILE_ID_OFFSET + 16]);
        Ok(id)
    }

    /// Check the profile ID stored in serialized bytes against their
    /// content. Without the `profile-id` feature only an all-zero ID
    /// verifies.
    pub fn verify_profile_id(data: &[u8]) -> bool {
        if data.len() < HEADER_SIZE {
            return false;
        }
        data[PROFILE_ID_OFFSET..PROFILE_ID_OFFSET + 16] == writer::profile_id_of(data)
    }

    /// Get a tag by signature
    pub fn tag(&self, sig: TagSignature) -> Option<&TagData> {
        self.entries
            .iter()
            .find(|e| e.signature == sig)
            .map(|e| &e.data)
    }

    pub fn tag_count(&self) -> usize {
        self.entries.len()
    }

    pub fn tag_signatures(&self) -> impl Iterator<Item = TagSignature> + '_ {
        self.entries.iter().map(|e| e.signature)
    }

    pub fn description(&self) -> Option<String> {
        self.tag(TagSignature::DESC)?.as_text().map(|t| t.text)
    }

    pub fn copyright(&self) -> Option<String> {
        self.tag(TagSignature::COPYRIGHT)?.as_text().map(|t| t.text)
    }

    fn xyz_tag(&self, sig: TagSignature) -> Option<XyzNumber> {
        self.tag(sig)?.as_xyz()?.first().copied()
    }

    pub fn red_colorant(&self) -> Option<XyzNumber> {
        self.xyz_tag(TagSignature::RED_COLORANT)
    }

    pub fn green_colorant(&self) -> Option<XyzNumber> {
        self.xyz_tag(TagSignature::GREEN_COLORANT)
    }

    pub fn blue_colorant(&self) -> Option<XyzNumber> {
        self.xyz_tag(TagSignature::BLUE_COLORANT)
    }

    pub fn media_white_point(&self) -> Option<XyzNumber> {
        self.xyz_tag(TagSignature::MEDIA_WHITE)
    }

    pub fn red_trc(&self) -> Option<&TagData> {
        self.tag(TagSignature::RED_TRC)
    }

    pub fn green_trc(&self) -> Option<&TagData> {
        self.tag(TagSignature::GREEN_TRC)
    }

    pub fn blue_trc(&self) -> Option<&TagData> {
        self.tag(TagSignature::BLUE_TRC)
    }

    pub fn gray_trc(&self) -> Option<&TagData> {
        self.tag(TagSignature::GRAY_TRC)
    }

    pub fn chromatic_adaptation_matrix(&self) -> Option<[[f64; 3]; 3]> {
        self.tag(TagSignature::CHAD)?.as_matrix3()
    }

    /// RGB display profile with colorants, white point and shared TRC
    pub fn is_matrix_shaper(&self) -> bool {
        self.red_colorant().is_some()
            && self.green_colorant().is_some()
            && self.blue_colorant().is_some()
            && self.red_trc().is_some()
            && self.green_trc().is_some()
            && self.blue_trc().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::header::PROFILE_SIGNATURE;
    use crate::icc::tags::{CurveData, ParametricCurve};
    use crate::icc::types::TypeSignature;

    /// Create a minimal valid ICC profile for testing
    fn create_minimal_profile() -> Vec<u8> {
        let mut data = vec![0u8; 128 + 4];

        let size = data.len() as u32;
        data[0..4].copy_from_slice(&size.to_be_bytes());

        // Version 4.3
        data[8] = 4;
        data[9] = 0x30;

        data[12..16].copy_from_slice(b"mntr");
        data[16..20].copy_from_slice(b"RGB ");
        data[20..24].copy_from_slice(b"XYZ ");
        data[36..40].copy_from_slice(&PROFILE_SIGNATURE.to_be_bytes());

        data
    }

    #[test]
    fn test_parse_minimal_profile() {
        let data = create_minimal_profile();
        let profile = IccProfile::parse(&data).unwrap();

        assert_eq!(profile.header.version.major, 4);
        assert_eq!(profile.tag_count(), 0);
    }

    #[test]
    fn test_profile_too_small() {
        let data = vec![0u8; 100];
        assert!(IccProfile::parse(&data).is_err());
    }

    #[test]
    fn test_profile_with_one_tag() {
        let mut data = create_minimal_profile();

        let new_size = (data.len() + 12 + 20) as u32;
        data[0..4].copy_from_slice(&new_size.to_be_bytes());
        data[128..132].copy_from_slice(&1u32.to_be_bytes());

        // cprt at offset 144, size 20
        data.extend_from_slice(b"cprt");
        data.extend_from_slice(&144u32.to_be_bytes());
        data.extend_from_slice(&20u32.to_be_bytes());

        data.extend_from_slice(b"text");
        data.extend_from_slice(&[0u8; 4]);
        data.extend_from_slice(b"Test\0");
        data.extend_from_slice(&[0u8; 7]);

        let profile = IccProfile::parse(&data).unwrap();
        assert_eq!(profile.tag_count(), 1);
        assert_eq!(profile.copyright(), Some("Test".to_string()));
    }

    #[test]
    fn test_tag_out_of_bounds() {
        let mut data = create_minimal_profile();
        data[0..4].copy_from_slice(&(144u32).to_be_bytes());
        data[128..132].copy_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(b"cprt");
        data.extend_from_slice(&140u32.to_be_bytes());
        data.extend_from_slice(&64u32.to_be_bytes());

        assert!(matches!(
            IccProfile::parse(&data),
            Err(IccError::TagOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_malformed_known_type_kept_raw() {
        let mut data = create_minimal_profile();
        data[0..4].copy_from_slice(&(156u32).to_be_bytes());
        data[128..132].copy_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(b"rTRC");
        data.extend_from_slice(&144u32.to_be_bytes());
        data.extend_from_slice(&12u32.to_be_bytes());
        // curv claiming 100 entries with none present
        data.extend_from_slice(b"curv\0\0\0\0\0\0\0\x64");

        let profile = IccProfile::parse(&data).unwrap();
        match profile.red_trc() {
            Some(TagData::Unknown { type_sig, data }) => {
                assert_eq!(TypeSignature(*type_sig), TypeSignature::CURVE);
                assert_eq!(data.len(), 12);
            }
            other => panic!("expected raw tag, got {:?}", other),
        }
    }

    #[test]
    fn test_set_tag_replaces() {
        let mut profile = IccProfile::default()
            .with_tag(TagSignature::RED_TRC, TagData::Curve(CurveData::Identity));
        profile.set_tag(
            TagSignature::RED_TRC,
            TagData::parametric(ParametricCurve::srgb()),
        );
        profile.set_tag(TagSignature::COPYRIGHT, TagData::text("CC0"));

        assert_eq!(profile.tag_count(), 2);
        assert!(profile.red_trc().unwrap().as_parametric_curve().is_some());
        assert_eq!(profile.copyright().as_deref(), Some("CC0"));
    }
}
