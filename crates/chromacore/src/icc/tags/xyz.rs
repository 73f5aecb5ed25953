//! XYZ Tag Type
//!
//! Array of XYZNumbers, used by colorant, white point and black point tags.
//!
//! See ICC.1:2022 Section 10.31

use crate::icc::data_writer::IccDataWriter;
use crate::icc::error::IccError;
use crate::icc::types::{TypeSignature, XyzNumber};

/// XYZ tag data - one or more XYZ values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XyzTagData {
    pub values: Vec<XyzNumber>,
}

impl XyzTagData {
    pub fn new(value: XyzNumber) -> Self {
        Self {
            values: vec![value],
        }
    }

    /// Parse XYZ data from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 12 {
            return Err(IccError::MalformedTag("XYZ tag too small".to_string()));
        }

        let values = data
            .chunks_exact(12)
            .filter_map(XyzNumber::from_bytes)
            .collect();

        Ok(Self { values })
    }

    pub(crate) fn write(&self, writer: &mut IccDataWriter) {
        writer.write_type_header(TypeSignature::XYZ);
        for v in &self.values {
            writer.write_xyz_number(v);
        }
    }

    /// First XYZ value (the only one for colorant and white point tags)
    pub fn first(&self) -> Option<&XyzNumber> {
        self.values.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xyz_tag() {
        // D50 white point
        let data: [u8; 12] = [
            0x00, 0x00, 0xF6, 0xD6, //
            0x00, 0x01, 0x00, 0x00, //
            0x00, 0x00, 0xD3, 0x2D, //
        ];

        let tag = XyzTagData::parse(&data).unwrap();
        assert_eq!(tag.values.len(), 1);
        assert_eq!(tag.first(), Some(&XyzNumber::D50));
    }

    #[test]
    fn test_parse_multiple_xyz() {
        let mut data = XyzNumber::new(1.0, 0.0, 0.0).to_bytes().to_vec();
        data.extend_from_slice(&XyzNumber::new(0.0, 1.0, 0.0).to_bytes());
        // Trailing partial value is ignored
        data.extend_from_slice(&[0, 0]);

        let tag = XyzTagData::parse(&data).unwrap();
        assert_eq!(tag.values.len(), 2);
        assert!((tag.values[1].to_f64()[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_xyz_too_small() {
        let data: [u8; 4] = [0, 0, 0, 0];
        assert!(XyzTagData::parse(&data).is_err());
    }

    #[test]
    fn test_write_xyz() {
        let mut w = IccDataWriter::new();
        XyzTagData::new(XyzNumber::D50).write(&mut w);
        assert_eq!(w.len(), 20);
        assert_eq!(&w.data()[..4], b"XYZ ");
        assert_eq!(&w.data()[8..], &XyzNumber::D50.to_bytes());
    }
}
