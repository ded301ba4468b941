use encoding_rs::{BIG5, GBK};
use serde::Serialize;
use tracing::debug;

use super::classifier::{
    is_gbk_lead, is_gbk_trail, EncodingClassifier, EncodingVerdict, UTF8_BOM,
};
use crate::config::{ClassifierConfig, ScanConfig};

/// A character worth reporting, with where it sits in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedChar {
    /// Line number (1-indexed)
    pub line: usize,
    /// Code point index within the line (1-indexed)
    pub column: usize,
    pub ch: char,
    /// Traditional counterpart when known
    pub traditional: Option<char>,
    /// Up to `context_width` code points either side, same line only
    pub context: String,
}

impl FlaggedChar {
    pub fn code_point(&self) -> String {
        format!("U+{:04X}", self.ch as u32)
    }
}

/// A GBK-shaped byte pair found in a buffer of unknown encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuspectPair {
    pub line: usize,
    /// Byte offset of the lead byte from the start of the buffer
    pub offset: usize,
    pub bytes: [u8; 2],
}

/// What the secondary scan found, by verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Findings {
    /// UTF-8 text: characters from the Simplified-only table
    SimplifiedVariants(Vec<FlaggedChar>),
    /// GBK text: every CJK character, since the whole file is Simplified
    SimplifiedEncoding(Vec<FlaggedChar>),
    /// Big5 text decodes cleanly; only its size is reported
    Traditional { char_count: usize },
    /// Unknown encoding: byte pairs that look like GBK
    BytePairs(Vec<SuspectPair>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub verdict: EncodingVerdict,
    pub findings: Findings,
}

impl ScanReport {
    /// Number of reported characters or byte pairs
    pub fn flagged_count(&self) -> usize {
        match &self.findings {
            Findings::SimplifiedVariants(chars) | Findings::SimplifiedEncoding(chars) => {
                chars.len()
            }
            Findings::Traditional { .. } => 0,
            Findings::BytePairs(pairs) => pairs.len(),
        }
    }

    pub fn flagged_chars(&self) -> &[FlaggedChar] {
        match &self.findings {
            Findings::SimplifiedVariants(chars) | Findings::SimplifiedEncoding(chars) => chars,
            _ => &[],
        }
    }
}

/// Whether `ch` is in the CJK Unified Ideographs block
pub fn is_cjk(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch)
}

pub fn decode_gbk(bytes: &[u8]) -> String {
    let (decoded, had_errors) = GBK.decode_without_bom_handling(bytes);
    if had_errors {
        debug!("GBK decode replaced invalid sequences");
    }
    decoded.into_owned()
}

pub fn decode_big5(bytes: &[u8]) -> String {
    let (decoded, had_errors) = BIG5.decode_without_bom_handling(bytes);
    if had_errors {
        debug!("Big5 decode replaced invalid sequences");
    }
    decoded.into_owned()
}

/// Walk lines of `text` and report every character `select` returns `Some` for.
///
/// `select` yields the Traditional counterpart, if any, for a reported char.
fn scan_text<F>(text: &str, width: usize, select: F) -> Vec<FlaggedChar>
where
    F: Fn(char) -> Option<Option<char>>,
{
    let mut flagged = Vec::new();
    for (idx, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_ascii() {
            continue;
        }
        let chars: Vec<char> = line.chars().collect();
        for (pos, &ch) in chars.iter().enumerate() {
            if let Some(traditional) = select(ch) {
                let start = pos.saturating_sub(width);
                let end = (pos + width + 1).min(chars.len());
                flagged.push(FlaggedChar {
                    line: idx + 1,
                    column: pos + 1,
                    ch,
                    traditional,
                    context: chars[start..end].iter().collect(),
                });
            }
        }
    }
    flagged
}

/// Report every GBK-shaped pair in `bytes`, line by line
pub fn scan_byte_pairs(bytes: &[u8]) -> Vec<SuspectPair> {
    let mut pairs = Vec::new();
    let mut line = 1;
    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        if b == b'\n' {
            line += 1;
            pos += 1;
            continue;
        }
        if let Some(&trail) = bytes.get(pos + 1) {
            if is_gbk_lead(b) && is_gbk_trail(trail) {
                pairs.push(SuspectPair {
                    line,
                    offset: pos,
                    bytes: [b, trail],
                });
                pos += 2;
                continue;
            }
        }
        pos += 1;
    }
    pairs
}

/// Classifies a buffer and then looks for characters in the wrong variant
#[derive(Debug, Clone, Default)]
pub struct VariantScanner {
    classifier: EncodingClassifier,
    config: ScanConfig,
}

impl VariantScanner {
    pub fn new(classifier: ClassifierConfig, config: ScanConfig) -> Self {
        Self {
            classifier: EncodingClassifier::new(classifier),
            config,
        }
    }

    pub fn classifier(&self) -> &EncodingClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn scan(&self, bytes: &[u8]) -> ScanReport {
        let verdict = self.classifier.classify(bytes);
        debug!(verdict = %verdict, bytes = bytes.len(), "classified buffer");

        let findings = match verdict {
            EncodingVerdict::Utf8 => {
                let body = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
                let text = String::from_utf8_lossy(body);
                Findings::SimplifiedVariants(self.scan_variants(&text))
            }
            EncodingVerdict::SimplifiedByteEncoding => {
                Findings::SimplifiedEncoding(self.scan_cjk(&decode_gbk(bytes)))
            }
            EncodingVerdict::TraditionalByteEncoding => Findings::Traditional {
                char_count: decode_big5(bytes).chars().count(),
            },
            EncodingVerdict::Unknown => Findings::BytePairs(scan_byte_pairs(bytes)),
        };

        ScanReport { verdict, findings }
    }

    /// Flag characters from the Simplified-only table
    pub fn scan_variants(&self, text: &str) -> Vec<FlaggedChar> {
        let variants = &self.config.variants;
        scan_text(text, self.config.context_width, |ch| {
            variants.traditional_of(ch).map(Some)
        })
    }

    /// Flag every CJK ideograph
    pub fn scan_cjk(&self, text: &str) -> Vec<FlaggedChar> {
        let variants = &self.config.variants;
        scan_text(text, self.config.context_width, |ch| {
            is_cjk(ch).then(|| variants.traditional_of(ch))
        })
    }
}
