//! Curve Tag Types
//!
//! ICC profiles use curves for tone reproduction (TRC).
//! Two main types:
//! - curv: Simple gamma or lookup table
//! - para: Parametric curves with formula
//!
//! See ICC.1:2022 Sections 10.6 (curv) and 10.18 (para)

use crate::icc::data_writer::IccDataWriter;
use crate::icc::error::IccError;
use crate::icc::types::{S15Fixed16, TypeSignature, U8Fixed8};

/// Curve tag data (curv type)
#[derive(Debug, Clone, PartialEq)]
pub enum CurveData {
    /// Identity curve (count = 0)
    Identity,
    /// Simple gamma (count = 1, value is u8Fixed8)
    Gamma(f64),
    /// Lookup table (count > 1, values are u16)
    Table(Vec<u16>),
}

impl CurveData {
    /// Parse curve data from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 4 {
            return Err(IccError::MalformedTag("Curve tag too small".to_string()));
        }

        let count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;

        match count {
            0 => Ok(CurveData::Identity),
            1 => {
                if data.len() < 6 {
                    return Err(IccError::MalformedTag(
                        "Curve gamma value missing".to_string(),
                    ));
                }
                let gamma = U8Fixed8::from_be_bytes([data[4], data[5]]);
                Ok(CurveData::Gamma(gamma.to_f64()))
            }
            _ => {
                let required_len = 4 + count * 2;
                if data.len() < required_len {
                    return Err(IccError::MalformedTag(format!(
                        "Curve table too small: need {} bytes, have {}",
                        required_len,
                        data.len()
                    )));
                }

                let table = data[4..required_len]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                Ok(CurveData::Table(table))
            }
        }
    }

    pub(crate) fn write(&self, writer: &mut IccDataWriter) {
        writer.write_type_header(TypeSignature::CURVE);
        match self {
            CurveData::Identity => {
                writer.write_u32(0);
            }
            CurveData::Gamma(g) => {
                writer.write_u32(1);
                writer.write_u16(U8Fixed8::from_f64(*g).0);
            }
            CurveData::Table(table) => {
                writer.write_u32(table.len() as u32);
                for &v in table {
                    writer.write_u16(v);
                }
            }
        }
    }

    /// Evaluate the curve at a given input (0.0 to 1.0)
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);

        match self {
            CurveData::Identity => x,
            CurveData::Gamma(g) => x.powf(*g),
            CurveData::Table(table) => {
                if table.is_empty() {
                    return x;
                }
                if table.len() == 1 {
                    return table[0] as f64 / 65535.0;
                }

                let pos = x * (table.len() - 1) as f64;
                let idx = pos.floor() as usize;
                let frac = pos - idx as f64;

                if idx >= table.len() - 1 {
                    return table[table.len() - 1] as f64 / 65535.0;
                }

                let v0 = table[idx] as f64;
                let v1 = table[idx + 1] as f64;
                (v0 + frac * (v1 - v0)) / 65535.0
            }
        }
    }
}

/// ICC Parametric Curve function type (ICC.1:2022 Table 68)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametricCurveType {
    /// Type 0: Y = X^g
    Gamma,
    /// Type 1: Y = (aX + b)^g  if X >= -b/a, else 0
    Cie122,
    /// Type 2: Y = (aX + b)^g + c  if X >= -b/a, else c
    Iec61966_3,
    /// Type 3: Y = (aX + b)^g  if X >= d, else cX
    Iec61966_2_1,
    /// Type 4: Y = (aX + b)^g + e  if X >= d, else cX + f
    Full,
}

impl ParametricCurveType {
    pub fn from_icc(function_type: u16) -> Option<Self> {
        match function_type {
            0 => Some(Self::Gamma),
            1 => Some(Self::Cie122),
            2 => Some(Self::Iec61966_3),
            3 => Some(Self::Iec61966_2_1),
            4 => Some(Self::Full),
            _ => None,
        }
    }

    pub fn to_icc(self) -> u16 {
        match self {
            Self::Gamma => 0,
            Self::Cie122 => 1,
            Self::Iec61966_3 => 2,
            Self::Iec61966_2_1 => 3,
            Self::Full => 4,
        }
    }

    /// Number of stored parameters
    pub fn param_count(self) -> usize {
        match self {
            Self::Gamma => 1,
            Self::Cie122 => 3,
            Self::Iec61966_3 => 4,
            Self::Iec61966_2_1 => 5,
            Self::Full => 7,
        }
    }
}

/// ICC parametric curve with parameters `g, a, b, c, d, e, f`.
///
/// Parameters a type does not use are kept at their neutral values and are
/// not serialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricCurve {
    pub curve_type: ParametricCurveType,
    pub g: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl ParametricCurve {
    /// Type 0 curve `Y = X^g`
    pub fn gamma(g: f64) -> Self {
        Self {
            curve_type: ParametricCurveType::Gamma,
            g,
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// sRGB decode curve (type 3)
    pub fn srgb() -> Self {
        Self {
            curve_type: ParametricCurveType::Iec61966_2_1,
            g: 2.4,
            a: 1.0 / 1.055,
            b: 0.055 / 1.055,
            c: 1.0 / 12.92,
            d: 0.04045,
            e: 0.0,
            f: 0.0,
        }
    }

    /// BT.709 decode curve (type 3)
    ///
    /// L = ((V + 0.099) / 1.099)^(1/0.45)  if V >= 0.081
    /// L = V / 4.5                         if V < 0.081
    pub fn bt709() -> Self {
        Self {
            curve_type: ParametricCurveType::Iec61966_2_1,
            g: 1.0 / 0.45,
            a: 1.0 / 1.099,
            b: 0.099 / 1.099,
            c: 1.0 / 4.5,
            d: 0.081,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create from the parameters stored in a para tag, in `g, a, b, ...` order
    pub fn from_params(curve_type: ParametricCurveType, params: &[f64]) -> Option<Self> {
        if params.len() < curve_type.param_count() {
            return None;
        }

        let mut curve = Self::gamma(params[0]);
        curve.curve_type = curve_type;

        match curve_type {
            ParametricCurveType::Gamma => {}
            ParametricCurveType::Cie122 => {
                curve.a = params[1];
                curve.b = params[2];
            }
            ParametricCurveType::Iec61966_3 => {
                curve.a = params[1];
                curve.b = params[2];
                curve.c = params[3];
            }
            ParametricCurveType::Iec61966_2_1 => {
                curve.a = params[1];
                curve.b = params[2];
                curve.c = params[3];
                curve.d = params[4];
            }
            ParametricCurveType::Full => {
                curve.a = params[1];
                curve.b = params[2];
                curve.c = params[3];
                curve.d = params[4];
                curve.e = params[5];
                curve.f = params[6];
            }
        }

        Some(curve)
    }

    /// Parameters in serialization order, truncated to the type's count
    pub fn params(&self) -> Vec<f64> {
        let all = [self.g, self.a, self.b, self.c, self.d, self.e, self.f];
        all[..self.curve_type.param_count()].to_vec()
    }

    /// Evaluate in the decode direction (encoded → linear)
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        let power = |x: f64| (self.a * x + self.b).max(0.0).powf(self.g);
        let threshold = if self.a.abs() > 1e-10 {
            -self.b / self.a
        } else {
            0.0
        };

        match self.curve_type {
            ParametricCurveType::Gamma => x.powf(self.g),
            ParametricCurveType::Cie122 => {
                if x >= threshold {
                    power(x)
                } else {
                    0.0
                }
            }
            ParametricCurveType::Iec61966_3 => {
                if x >= threshold {
                    power(x) + self.c
                } else {
                    self.c
                }
            }
            ParametricCurveType::Iec61966_2_1 => {
                if x >= self.d {
                    power(x)
                } else {
                    self.c * x
                }
            }
            ParametricCurveType::Full => {
                if x >= self.d {
                    power(x) + self.e
                } else {
                    self.c * x + self.f
                }
            }
        }
    }
}

/// Parametric curve data (para type)
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricCurveData {
    pub curve: ParametricCurve,
}

impl ParametricCurveData {
    pub fn new(curve: ParametricCurve) -> Self {
        Self { curve }
    }

    /// Parse parametric curve from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 4 {
            return Err(IccError::MalformedTag(
                "Parametric curve too small".to_string(),
            ));
        }

        let func_type = u16::from_be_bytes([data[0], data[1]]);
        let curve_type = ParametricCurveType::from_icc(func_type).ok_or_else(|| {
            IccError::MalformedTag(format!("Unknown parametric curve type: {}", func_type))
        })?;

        let count = curve_type.param_count();
        if data.len() < 4 + count * 4 {
            return Err(IccError::MalformedTag(format!(
                "Parametric curve type {} needs {} parameters",
                func_type, count
            )));
        }

        let params: Vec<f64> = data[4..4 + count * 4]
            .chunks_exact(4)
            .map(|c| S15Fixed16::from_be_bytes([c[0], c[1], c[2], c[3]]).to_f64())
            .collect();

        let curve = ParametricCurve::from_params(curve_type, &params).ok_or_else(|| {
            IccError::MalformedTag("Parametric curve parameters missing".to_string())
        })?;
        Ok(Self { curve })
    }

    pub(crate) fn write(&self, writer: &mut IccDataWriter) {
        writer.write_type_header(TypeSignature::PARA);
        writer.write_u16(self.curve.curve_type.to_icc());
        writer.write_u16(0);
        for p in self.curve.params() {
            writer.write_s15_fixed16(S15Fixed16::from_f64(p));
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.curve.eval(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companding::{Companding, Rec709Companding, SRgbCompanding};

    #[test]
    fn test_curve_identity() {
        let data: [u8; 4] = [0, 0, 0, 0];
        let curve = CurveData::parse(&data).unwrap();
        assert_eq!(curve, CurveData::Identity);
        assert!((curve.eval(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_curve_gamma() {
        // Gamma 2.2 as u8Fixed8 = 2.2 * 256 = 563.2 ≈ 563 = 0x0233
        let data: [u8; 6] = [
            0, 0, 0, 1, // count = 1
            0x02, 0x33, // gamma = 563/256 ≈ 2.199
        ];
        let curve = CurveData::parse(&data).unwrap();

        if let CurveData::Gamma(g) = curve {
            assert!((g - 2.199).abs() < 0.01);
        } else {
            panic!("Expected Gamma curve");
        }
    }

    #[test]
    fn test_curve_table() {
        let data: [u8; 10] = [
            0, 0, 0, 3, // count = 3
            0x00, 0x00, // 0
            0x80, 0x00, // 32768
            0xFF, 0xFF, // 65535
        ];
        let curve = CurveData::parse(&data).unwrap();
        assert_eq!(curve, CurveData::Table(vec![0, 0x8000, 0xFFFF]));

        assert!((curve.eval(0.0) - 0.0).abs() < 0.001);
        assert!((curve.eval(0.5) - 0.5).abs() < 0.001);
        assert!((curve.eval(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_write_curve_bytes() {
        let mut w = IccDataWriter::new();
        CurveData::Gamma(2.2).write(&mut w);
        assert_eq!(w.data(), b"curv\0\0\0\0\0\0\0\x01\x02\x33");

        let mut w = IccDataWriter::new();
        CurveData::Table(vec![0, 0xFFFF]).write(&mut w);
        assert_eq!(w.data(), b"curv\0\0\0\0\0\0\0\x02\0\0\xFF\xFF");
    }

    #[test]
    fn test_write_parametric_bytes() {
        let mut w = IccDataWriter::new();
        ParametricCurveData::new(ParametricCurve::gamma(1.0)).write(&mut w);
        assert_eq!(w.data(), b"para\0\0\0\0\0\0\0\0\0\x01\0\0");

        let mut w = IccDataWriter::new();
        ParametricCurveData::new(ParametricCurve::srgb()).write(&mut w);
        assert_eq!(w.len(), 12 + 5 * 4);

        let parsed = ParametricCurveData::parse(&w.data()[8..]).unwrap();
        assert_eq!(parsed.curve.curve_type, ParametricCurveType::Iec61966_2_1);
        assert!((parsed.curve.g - 2.4).abs() < 1e-4);
        assert!((parsed.curve.d - 0.04045).abs() < 1e-4);
    }

    #[test]
    fn test_parametric_type0() {
        let mut data = vec![0, 0, 0, 0];
        // g = 2.2 as s15Fixed16 ≈ 0x00023333
        data.extend_from_slice(&[0x00, 0x02, 0x33, 0x33]);

        let curve = ParametricCurveData::parse(&data).unwrap();
        assert_eq!(curve.curve.curve_type, ParametricCurveType::Gamma);
        assert!((curve.curve.g - 2.2).abs() < 0.001);
        assert!((curve.eval(0.5) - 0.2176).abs() < 0.001);
    }

    #[test]
    fn test_parametric_truncated() {
        // Type 3 declares five parameters, only one present
        let data = [0, 3, 0, 0, 0x00, 0x02, 0x66, 0x66];
        assert!(ParametricCurveData::parse(&data).is_err());
        assert!(ParametricCurveData::parse(&[0, 9, 0, 0]).is_err());
    }

    #[test]
    fn test_bt709_matches_companding() {
        let curve = ParametricCurve::bt709();
        for i in 0..=255 {
            let v = i as f64 / 255.0;
            let expected = Rec709Companding.expand(v as f32) as f64;
            assert!(
                (curve.eval(v) - expected).abs() < 1e-6,
                "bt709 mismatch at {}: {} vs {}",
                i,
                curve.eval(v),
                expected
            );
        }
    }

    #[test]
    fn test_srgb_matches_companding() {
        let curve = ParametricCurve::srgb();
        for i in 0..=255 {
            let v = i as f64 / 255.0;
            let expected = SRgbCompanding.expand(v as f32) as f64;
            assert!((curve.eval(v) - expected).abs() < 1e-6, "srgb mismatch at {}", i);
        }
    }
}
