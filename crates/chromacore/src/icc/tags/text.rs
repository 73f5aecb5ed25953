//! Text Tag Types
//!
//! ICC profiles can contain text in several formats:
//! - text: Simple ASCII text
//! - desc: Profile description (v2 format, read only)
//! - mluc: Multi-localized Unicode (v4 format)
//!
//! See ICC.1:2022 Sections 10.24 (text), 10.14 (desc), 10.15 (mluc)

use crate::icc::data_writer::IccDataWriter;
use crate::icc::error::IccError;
use crate::icc::types::TypeSignature;

/// Size of one mluc name record
const MLUC_RECORD_SIZE: usize = 12;

/// Text tag data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextData {
    /// Primary text content (English or default)
    pub text: String,
    /// Localized versions as (`"ll-CC"` locale, text)
    pub localized: Vec<(String, String)>,
}

impl TextData {
    /// Create from a single string
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            localized: Vec::new(),
        }
    }

    /// Add a localized string. The first one added also becomes the primary
    /// text when none is set.
    pub fn with_locale(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        if self.text.is_empty() {
            self.text = text.clone();
        }
        self.localized.push((locale.into(), text));
        self
    }

    /// Parse 'text' type (simple ASCII)
    pub fn parse_text(data: &[u8]) -> Result<Self, IccError> {
        let text = data
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect::<String>();

        Ok(Self::new(text))
    }

    /// Parse 'desc' type (v2 profile description)
    pub fn parse_desc(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 4 {
            return Err(IccError::MalformedTag(
                "Description tag too small".to_string(),
            ));
        }

        // ASCII description count (includes null)
        let ascii_count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if data.len() < 4 + ascii_count {
            return Err(IccError::MalformedTag(
                "Description ASCII data truncated".to_string(),
            ));
        }

        // Unicode and ScriptCode sections are ignored
        Self::parse_text(&data[4..4 + ascii_count])
    }

    /// Parse 'mluc' type (after type signature and reserved bytes).
    ///
    /// String offsets in the records are relative to the start of the tag,
    /// i.e. eight bytes before `data`.
    pub fn parse_mluc(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 8 {
            return Err(IccError::MalformedTag("mluc tag too small".to_string()));
        }

        let record_count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let record_size = u32::from_be_bytes([data[4], data[5], data[6], data[7]]) as usize;

        if record_size < MLUC_RECORD_SIZE {
            return Err(IccError::MalformedTag(
                "mluc record size too small".to_string(),
            ));
        }

        let mut out = Self::default();

        for i in 0..record_count {
            let record_offset = 8 + i * record_size;
            let Some(record) = data.get(record_offset..record_offset + MLUC_RECORD_SIZE) else {
                return Err(IccError::MalformedTag(format!(
                    "mluc record {} out of bounds",
                    i
                )));
            };

            let locale = locale_from_codes([record[0], record[1]], [record[2], record[3]]);
            let str_len = u32::from_be_bytes([record[4], record[5], record[6], record[7]]) as usize;
            let str_offset =
                u32::from_be_bytes([record[8], record[9], record[10], record[11]]) as usize;

            let text = str_offset
                .checked_sub(8)
                .and_then(|start| data.get(start..start + str_len))
                .and_then(decode_utf16be)
                .ok_or_else(|| {
                    IccError::MalformedTag(format!("mluc string {} is invalid", i))
                })?;

            out = out.with_locale(locale, text);
        }

        Ok(out)
    }

    /// Get text for a specific locale prefix
    pub fn get_locale(&self, lang: &str) -> Option<&str> {
        self.localized
            .iter()
            .find(|(locale, _)| locale.starts_with(lang))
            .map(|(_, text)| text.as_str())
    }

    pub(crate) fn write_text(&self, writer: &mut IccDataWriter) {
        writer.write_type_header(TypeSignature::TEXT);
        writer.write_ascii_nul(&self.text);
    }

    /// Records and strings for an mluc tag. Without localized entries the
    /// primary text is written once as en-US.
    pub(crate) fn write_mluc(&self, writer: &mut IccDataWriter) {
        let fallback = [("en-US".to_string(), self.text.clone())];
        let records: &[(String, String)] = if self.localized.is_empty() {
            &fallback
        } else {
            &self.localized
        };

        let tag_start = writer.index();
        writer.write_type_header(TypeSignature::MLUC);
        writer.write_u32(records.len() as u32);
        writer.write_u32(MLUC_RECORD_SIZE as u32);

        let mut string_offset = 16 + records.len() * MLUC_RECORD_SIZE;
        for (locale, text) in records {
            let (lang, country) = codes_from_locale(locale);
            let byte_len = text.encode_utf16().count() * 2;
            writer.write_bytes(&lang);
            writer.write_bytes(&country);
            writer.write_u32(byte_len as u32);
            writer.write_u32(string_offset as u32);
            string_offset += byte_len;
        }

        for (_, text) in records {
            writer.write_utf16be(text);
        }
        debug_assert_eq!(writer.index() - tag_start, string_offset);
    }
}

fn locale_from_codes(lang: [u8; 2], country: [u8; 2]) -> String {
    let lang: String = lang.iter().map(|&b| b as char).collect();
    if country == [0, 0] {
        lang
    } else {
        let country: String = country.iter().map(|&b| b as char).collect();
        format!("{}-{}", lang, country)
    }
}

fn codes_from_locale(locale: &str) -> ([u8; 2], [u8; 2]) {
    let mut parts = locale.splitn(2, '-');
    let code = |part: Option<&str>| {
        let mut out = [0u8; 2];
        for (dst, b) in out.iter_mut().zip(part.unwrap_or("").bytes()) {
            *dst = b;
        }
        out
    };
    let lang = code(parts.next());
    let country = code(parts.next());
    (lang, country)
}

/// Decode UTF-16BE bytes to String
fn decode_utf16be(data: &[u8]) -> Option<String> {
    if data.len() % 2 != 0 {
        return None;
    }

    let utf16: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&c| c != 0)
        .collect();

    String::from_utf16(&utf16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        let data = b"Hello, World!\0";
        let text = TextData::parse_text(data).unwrap();
        assert_eq!(text.text, "Hello, World!");
    }

    #[test]
    fn test_parse_desc() {
        // Count = 6 (including null)
        let mut data = vec![0, 0, 0, 6];
        data.extend_from_slice(b"sRGB\0\0");

        let text = TextData::parse_desc(&data).unwrap();
        assert_eq!(text.text, "sRGB");
    }

    #[test]
    fn test_write_text() {
        let mut w = IccDataWriter::new();
        TextData::new("No copyright").write_text(&mut w);
        assert_eq!(&w.data()[..8], b"text\0\0\0\0");
        assert_eq!(&w.data()[8..], b"No copyright\0");
    }

    #[test]
    fn test_write_mluc_layout() {
        let mut w = IccDataWriter::new();
        TextData::new("sRGB").write_mluc(&mut w);
        let d = w.data();

        assert_eq!(&d[0..4], b"mluc");
        assert_eq!(&d[8..12], &[0, 0, 0, 1]);
        assert_eq!(&d[12..16], &[0, 0, 0, 12]);
        assert_eq!(&d[16..20], b"enUS");
        assert_eq!(&d[20..24], &[0, 0, 0, 8]);
        assert_eq!(&d[24..28], &[0, 0, 0, 28]);
        assert_eq!(&d[28..], &[0, b's', 0, b'R', 0, b'G', 0, b'B']);
    }

    #[test]
    fn test_mluc_roundtrip_locales() {
        let text = TextData::default()
            .with_locale("en-US", "Display")
            .with_locale("de-DE", "Bildschirm")
            .with_locale("ja", "ディスプレイ");

        let mut w = IccDataWriter::new();
        text.write_mluc(&mut w);
        let parsed = TextData::parse_mluc(&w.data()[8..]).unwrap();

        assert_eq!(parsed, text);
        assert_eq!(parsed.text, "Display");
        assert_eq!(parsed.get_locale("de"), Some("Bildschirm"));
        assert_eq!(parsed.get_locale("ja"), Some("ディスプレイ"));
    }

    #[test]
    fn test_parse_mluc_bad_offset() {
        let data = [
            0, 0, 0, 1, // record count
            0, 0, 0, 12, // record size
            b'e', b'n', b'U', b'S', //
            0, 0, 0, 4, // length
            0, 0, 0, 4, // offset points inside the tag header
        ];
        assert!(TextData::parse_mluc(&data).is_err());
    }
}
