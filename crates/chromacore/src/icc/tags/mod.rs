//! ICC Profile Tags
//!
//! Tags contain the actual profile data. Each tag has:
//! - A 4-byte type signature identifying the data format
//! - 4 reserved bytes
//! - Type-specific data
//!
//! Every variant here can be decoded and encoded. Types without a dedicated
//! variant are kept as raw bytes and written back verbatim.
//!
//! See ICC.1:2022 Section 9.

mod curves;
mod text;
mod xyz;

pub use curves::{CurveData, ParametricCurve, ParametricCurveData, ParametricCurveType};
pub use text::TextData;
pub use xyz::XyzTagData;

use super::data_writer::IccDataWriter;
use super::error::IccError;
use super::types::{S15Fixed16, TagSignature, TypeSignature, XyzNumber};

/// Decoded tag payload
#[derive(Debug, Clone, PartialEq)]
pub enum TagData {
    /// XYZ type data (colorants, white point)
    Xyz(XyzTagData),
    /// Curve type (TRC)
    Curve(CurveData),
    /// Parametric curve type
    ParametricCurve(ParametricCurveData),
    /// ASCII text
    Text(TextData),
    /// Multi-localized Unicode text
    MultiLocalizedUnicode(TextData),
    /// s15Fixed16 array (chromatic adaptation and similar)
    S15Fixed16Array(Vec<S15Fixed16>),
    /// Signature type (technology and similar)
    Signature(u32),
    /// Any other type: `data` holds the complete tag bytes including the
    /// type signature
    Unknown { type_sig: u32, data: Vec<u8> },
}

impl TagData {
    /// Parse tag data from the bytes a tag table row points at
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 8 {
            return Err(IccError::MalformedTag(
                "Tag data too small for header".to_string(),
            ));
        }

        let type_sig = TypeSignature(u32::from_be_bytes([data[0], data[1], data[2], data[3]]));
        let type_data = &data[8..];

        match type_sig {
            TypeSignature::XYZ => Ok(TagData::Xyz(XyzTagData::parse(type_data)?)),
            TypeSignature::CURVE => Ok(TagData::Curve(CurveData::parse(type_data)?)),
            TypeSignature::PARA => Ok(TagData::ParametricCurve(ParametricCurveData::parse(
                type_data,
            )?)),
            TypeSignature::TEXT => Ok(TagData::Text(TextData::parse_text(type_data)?)),
            TypeSignature::MLUC => Ok(TagData::MultiLocalizedUnicode(TextData::parse_mluc(
                type_data,
            )?)),
            TypeSignature::SF32 => {
                let values = type_data
                    .chunks_exact(4)
                    .map(|c| S15Fixed16::from_be_bytes([c[0], c[1], c[2], c[3]]))
                    .collect();
                Ok(TagData::S15Fixed16Array(values))
            }
            TypeSignature::SIG => {
                if type_data.len() < 4 {
                    return Err(IccError::MalformedTag(
                        "Signature tag too small".to_string(),
                    ));
                }
                Ok(TagData::Signature(u32::from_be_bytes([
                    type_data[0],
                    type_data[1],
                    type_data[2],
                    type_data[3],
                ])))
            }
            _ => Ok(TagData::Unknown {
                type_sig: type_sig.0,
                data: data.to_vec(),
            }),
        }
    }

    /// Encode at the writer's current index (no trailing padding)
    pub(crate) fn write(&self, writer: &mut IccDataWriter) {
        match self {
            TagData::Xyz(xyz) => xyz.write(writer),
            TagData::Curve(curve) => curve.write(writer),
            TagData::ParametricCurve(curve) => curve.write(writer),
            TagData::Text(text) => text.write_text(writer),
            TagData::MultiLocalizedUnicode(text) => text.write_mluc(writer),
            TagData::S15Fixed16Array(values) => {
                writer.write_type_header(TypeSignature::SF32);
                for &v in values {
                    writer.write_s15_fixed16(v);
                }
            }
            TagData::Signature(sig) => {
                writer.write_type_header(TypeSignature::SIG);
                writer.write_u32(*sig);
            }
            TagData::Unknown { data, .. } => {
                writer.write_bytes(data);
            }
        }
    }

    /// Type signature this payload is encoded with
    pub fn type_signature(&self) -> TypeSignature {
        match self {
            TagData::Xyz(_) => TypeSignature::XYZ,
            TagData::Curve(_) => TypeSignature::CURVE,
            TagData::ParametricCurve(_) => TypeSignature::PARA,
            TagData::Text(_) => TypeSignature::TEXT,
            TagData::MultiLocalizedUnicode(_) => TypeSignature::MLUC,
            TagData::S15Fixed16Array(_) => TypeSignature::SF32,
            TagData::Signature(_) => TypeSignature::SIG,
            TagData::Unknown { type_sig, .. } => TypeSignature(*type_sig),
        }
    }

    pub fn xyz(value: XyzNumber) -> Self {
        TagData::Xyz(XyzTagData::new(value))
    }

    pub fn text(text: impl Into<String>) -> Self {
        TagData::Text(TextData::new(text))
    }

    /// Single en-US record
    pub fn mluc(text: impl Into<String>) -> Self {
        TagData::MultiLocalizedUnicode(TextData::default().with_locale("en-US", text))
    }

    pub fn parametric(curve: ParametricCurve) -> Self {
        TagData::ParametricCurve(ParametricCurveData::new(curve))
    }

    /// 3x3 matrix as a row-major sf32 array (the `chad` layout)
    pub fn chromatic_adaptation(matrix: [[f64; 3]; 3]) -> Self {
        TagData::S15Fixed16Array(
            matrix
                .iter()
                .flatten()
                .map(|&v| S15Fixed16::from_f64(v))
                .collect(),
        )
    }

    pub fn as_xyz(&self) -> Option<&XyzTagData> {
        match self {
            TagData::Xyz(xyz) => Some(xyz),
            _ => None,
        }
    }

    pub fn as_curve(&self) -> Option<&CurveData> {
        match self {
            TagData::Curve(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn as_parametric_curve(&self) -> Option<&ParametricCurveData> {
        match self {
            TagData::ParametricCurve(curve) => Some(curve),
            _ => None,
        }
    }

    /// Text content of text and mluc tags, and of v2 `desc` tags kept raw
    pub fn as_text(&self) -> Option<TextData> {
        match self {
            TagData::Text(text) | TagData::MultiLocalizedUnicode(text) => Some(text.clone()),
            TagData::Unknown { type_sig, data }
                if TypeSignature(*type_sig) == TypeSignature::DESC =>
            {
                TextData::parse_desc(data.get(8..)?).ok()
            }
            _ => None,
        }
    }

    /// sf32 array interpreted as a row-major 3x3 matrix
    pub fn as_matrix3(&self) -> Option<[[f64; 3]; 3]> {
        match self {
            TagData::S15Fixed16Array(values) if values.len() >= 9 => {
                let mut m = [[0.0; 3]; 3];
                for (i, v) in values.iter().take(9).enumerate() {
                    m[i / 3][i % 3] = v.to_f64();
                }
                Some(m)
            }
            _ => None,
        }
    }

    /// Evaluate a TRC tag (curv or para) in the decode direction
    pub fn eval_trc(&self, x: f64) -> Option<f64> {
        match self {
            TagData::Curve(curve) => Some(curve.eval(x)),
            TagData::ParametricCurve(curve) => Some(curve.eval(x)),
            _ => None,
        }
    }
}

/// One logical tag: a signature and its payload
#[derive(Debug, Clone, PartialEq)]
pub struct TagDataEntry {
    pub signature: TagSignature,
    pub data: TagData,
}

impl TagDataEntry {
    pub fn new(signature: TagSignature, data: TagData) -> Self {
        Self { signature, data }
    }

    /// Payload equality, ignoring the signature. Entries that compare equal
    /// here share one encoded payload in the serialized profile.
    #[inline]
    pub fn same_payload(&self, other: &TagDataEntry) -> bool {
        self.data == other.data
    }
}

/// One 12-byte row of the on-disk tag table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagTableEntry {
    pub signature: TagSignature,
    pub offset: u32,
    pub size: u32,
}
