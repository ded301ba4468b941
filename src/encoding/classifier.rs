use serde::Serialize;
use std::fmt;

use crate::config::ClassifierConfig;

/// UTF-8 byte-order-mark
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Best guess at how a buffer is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncodingVerdict {
    Utf8,
    /// Big5 family
    TraditionalByteEncoding,
    /// GB2312/GBK family
    SimplifiedByteEncoding,
    Unknown,
}

impl EncodingVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            EncodingVerdict::Utf8 => "UTF-8",
            EncodingVerdict::TraditionalByteEncoding => "BIG5",
            EncodingVerdict::SimplifiedByteEncoding => "GB2312/GBK",
            EncodingVerdict::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EncodingVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn is_big5_lead(b: u8) -> bool {
    (0xA1..=0xF9).contains(&b)
}

fn is_big5_trail(b: u8) -> bool {
    (0x40..=0x7E).contains(&b) || (0xA1..=0xFE).contains(&b)
}

pub(crate) fn is_gbk_lead(b: u8) -> bool {
    (0x81..=0xFE).contains(&b)
}

pub(crate) fn is_gbk_trail(b: u8) -> bool {
    (0x40..=0xFE).contains(&b)
}

/// Whether any byte falls in the lead range of either double-byte family.
///
/// The GBK lead range 0x81-0xFE contains the Big5 range 0xA1-0xF9.
pub fn has_double_byte_range(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| is_gbk_lead(b))
}

/// Walk `bytes` as single ASCII bytes and lead/trail pairs.
///
/// Returns the number of pairs, or `None` at the first byte that fits
/// neither shape.
fn count_pairs(bytes: &[u8], is_lead: fn(u8) -> bool, is_trail: fn(u8) -> bool) -> Option<usize> {
    let mut pairs = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        if b < 0x80 {
            pos += 1;
            continue;
        }
        match bytes.get(pos + 1) {
            Some(&trail) if is_lead(b) && is_trail(trail) => {
                pairs += 1;
                pos += 2;
            }
            _ => return None,
        }
    }
    Some(pairs)
}

/// Number of Big5 pairs if the whole buffer follows the Big5 byte rules
pub fn big5_pair_count(bytes: &[u8]) -> Option<usize> {
    count_pairs(bytes, is_big5_lead, is_big5_trail)
}

/// Number of GBK pairs if the whole buffer follows the GBK byte rules
pub fn gbk_pair_count(bytes: &[u8]) -> Option<usize> {
    count_pairs(bytes, is_gbk_lead, is_gbk_trail)
}

/// Heuristic encoding detector for UTF-8, Big5 and GBK text.
///
/// Not a certified detector: a buffer without any double-byte-range bytes is
/// always reported as UTF-8, whatever it really is.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingClassifier {
    config: ClassifierConfig,
}

impl EncodingClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ClassifierConfig {
        self.config
    }

    pub fn classify(&self, bytes: &[u8]) -> EncodingVerdict {
        if bytes.starts_with(&UTF8_BOM) {
            return EncodingVerdict::Utf8;
        }

        if std::str::from_utf8(bytes).is_ok()
            && (!self.config.strict_high_bytes || !has_double_byte_range(bytes))
        {
            return EncodingVerdict::Utf8;
        }

        if matches!(big5_pair_count(bytes), Some(n) if n > 0) {
            return EncodingVerdict::TraditionalByteEncoding;
        }

        if matches!(gbk_pair_count(bytes), Some(n) if n > 0) {
            return EncodingVerdict::SimplifiedByteEncoding;
        }

        EncodingVerdict::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> EncodingClassifier {
        EncodingClassifier::new(ClassifierConfig::default().with_strict_high_bytes(true))
    }

    #[test]
    fn test_ascii_is_utf8() {
        let classifier = EncodingClassifier::default();
        assert_eq!(classifier.classify(b"key=value\n"), EncodingVerdict::Utf8);
        assert_eq!(strict().classify(b"key=value\n"), EncodingVerdict::Utf8);
    }

    #[test]
    fn test_empty_buffer_is_utf8() {
        assert_eq!(
            EncodingClassifier::default().classify(b""),
            EncodingVerdict::Utf8
        );
    }

    #[test]
    fn test_bom_wins_even_if_rest_is_invalid() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(&[0xA4, 0xA4]);
        assert_eq!(strict().classify(&bytes), EncodingVerdict::Utf8);
    }

    #[test]
    fn test_utf8_chinese_default() {
        let bytes = "ASD_Country=国家\n".as_bytes();
        assert_eq!(
            EncodingClassifier::default().classify(bytes),
            EncodingVerdict::Utf8
        );
    }

    #[test]
    fn test_utf8_chinese_strict_falls_through() {
        // E5 9B BD E5 AE B6 breaks the Big5 trail rule but pairs up as GBK
        let bytes = "ASD_Country=国家\n".as_bytes();
        assert_eq!(
            strict().classify(bytes),
            EncodingVerdict::SimplifiedByteEncoding
        );
    }

    #[test]
    fn test_big5_bytes() {
        // "中文" in Big5
        let bytes = [b'k', b'=', 0xA4, 0xA4, 0xA4, 0xE5, b'\n'];
        assert_eq!(big5_pair_count(&bytes), Some(2));
        assert_eq!(
            EncodingClassifier::default().classify(&bytes),
            EncodingVerdict::TraditionalByteEncoding
        );
    }

    #[test]
    fn test_gbk_only_bytes() {
        // 0x81 is a GBK lead but not a Big5 lead
        let bytes = [b'k', b'=', 0x81, 0x40, b'\n'];
        assert_eq!(big5_pair_count(&bytes), None);
        assert_eq!(gbk_pair_count(&bytes), Some(1));
        assert_eq!(
            EncodingClassifier::default().classify(&bytes),
            EncodingVerdict::SimplifiedByteEncoding
        );
    }

    #[test]
    fn test_unknown_bytes() {
        assert_eq!(
            EncodingClassifier::default().classify(&[0x80, b'a']),
            EncodingVerdict::Unknown
        );
        // Dangling lead byte at the end
        assert_eq!(
            EncodingClassifier::default().classify(&[b'a', 0xFF]),
            EncodingVerdict::Unknown
        );
    }

    #[test]
    fn test_pair_walk_rejects_truncated_pair() {
        assert_eq!(gbk_pair_count(&[0x81]), None);
        assert_eq!(big5_pair_count(&[0xA4]), None);
        assert_eq!(gbk_pair_count(b"plain"), Some(0));
    }

    #[test]
    fn test_labels() {
        assert_eq!(EncodingVerdict::Utf8.to_string(), "UTF-8");
        assert_eq!(EncodingVerdict::TraditionalByteEncoding.to_string(), "BIG5");
        assert_eq!(
            EncodingVerdict::SimplifiedByteEncoding.to_string(),
            "GB2312/GBK"
        );
    }
}
