use std::fmt;

use super::translation::TranslationEntry;

/// UTF-8 byte-order-mark as it appears after decoding
pub const BOM: char = '\u{feff}';

const BOM_BYTES: &[u8] = b"\xEF\xBB\xBF";

/// Why a line with content could not be split into a key and a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// No `=` anywhere in the line
    MissingSeparator,
    /// Nothing but whitespace before the first `=`
    EmptyKey,
    /// The line is not UTF-8 text (e.g. a GBK or Big5 file)
    InvalidUtf8,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingSeparator => write!(f, "no '=' separator"),
            MalformedReason::EmptyKey => write!(f, "empty key"),
            MalformedReason::InvalidUtf8 => write!(f, "not UTF-8 text"),
        }
    }
}

/// Classification of a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Malformed(MalformedReason),
    Valid { key: String, value: String },
}

/// One line of an INI-style file after parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// Line number (1-indexed)
    pub line: usize,
    /// Original text with the byte-order-mark removed, lossily decoded when
    /// the line is not UTF-8
    pub raw: String,
    /// Whether a byte-order-mark was stripped from the start of the line
    pub bom: bool,
    pub kind: LineKind,
}

impl LineRecord {
    pub fn is_valid(&self) -> bool {
        matches!(self.kind, LineKind::Valid { .. })
    }

    /// Blank lines and comments carry nothing to translate
    pub fn is_skippable(&self) -> bool {
        matches!(self.kind, LineKind::Blank | LineKind::Comment)
    }

    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Valid { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Valid { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Key and value of a valid line
    pub fn entry(&self) -> Option<TranslationEntry> {
        match &self.kind {
            LineKind::Valid { key, value } => Some(TranslationEntry {
                key: key.clone(),
                value: value.clone(),
                line: self.line,
            }),
            _ => None,
        }
    }

    /// `key=value` with the whitespace around the separator removed
    pub fn normalized(&self) -> Option<String> {
        match &self.kind {
            LineKind::Valid { key, value } => Some(format!("{}={}", key, value)),
            _ => None,
        }
    }

    /// Warning to surface for this line, if any.
    ///
    /// Valid records are re-checked for an empty key because records can be
    /// built by hand and not only through [`parse_line`].
    pub fn warning(&self) -> Option<ParseWarning> {
        let reason = match &self.kind {
            LineKind::Malformed(reason) => *reason,
            LineKind::Valid { key, .. } if key.trim().is_empty() => MalformedReason::EmptyKey,
            _ => return None,
        };
        Some(ParseWarning {
            line: self.line,
            reason,
            content: self.raw.trim().to_string(),
        })
    }
}

/// A line that had content but could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub line: usize,
    pub reason: MalformedReason,
    /// Trimmed text of the offending line
    pub content: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            MalformedReason::MissingSeparator => write!(
                f,
                "Line {} has no '=' separator, skipping: {}",
                self.line, self.content
            ),
            MalformedReason::EmptyKey => write!(f, "Line {} has empty key, skipping", self.line),
            MalformedReason::InvalidUtf8 => write!(
                f,
                "Line {} is not UTF-8 text, skipping: {}",
                self.line, self.content
            ),
        }
    }
}

/// Parse one raw line (without its line terminator).
///
/// Never fails: every input gets a classification.
pub fn parse_line(raw: &str, line: usize) -> LineRecord {
    let (content, bom) = match raw.strip_prefix(BOM) {
        Some(rest) if line == 1 => (rest, true),
        _ => (raw, false),
    };

    let trimmed = content.trim();
    let kind = if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with(['#', ';']) {
        LineKind::Comment
    } else {
        match trimmed.split_once('=') {
            None => LineKind::Malformed(MalformedReason::MissingSeparator),
            Some((key, value)) => {
                let key = key.trim();
                if key.is_empty() {
                    LineKind::Malformed(MalformedReason::EmptyKey)
                } else {
                    LineKind::Valid {
                        key: key.to_string(),
                        value: value.trim().to_string(),
                    }
                }
            }
        }
    };

    LineRecord {
        line,
        raw: content.to_string(),
        bom,
        kind,
    }
}

/// Parse one raw line of bytes (without its line terminator).
///
/// UTF-8 lines go through [`parse_line`]. Anything else is a comment when it
/// starts with `#` or `;`, and `Malformed(InvalidUtf8)` otherwise.
pub fn parse_line_bytes(raw: &[u8], line: usize) -> LineRecord {
    if let Ok(text) = std::str::from_utf8(raw) {
        return parse_line(text, line);
    }

    let (content, bom) = match raw.strip_prefix(BOM_BYTES) {
        Some(rest) if line == 1 => (rest, true),
        _ => (raw, false),
    };
    let kind = match content.iter().copied().find(|b| !b.is_ascii_whitespace()) {
        Some(b'#') | Some(b';') => LineKind::Comment,
        _ => LineKind::Malformed(MalformedReason::InvalidUtf8),
    };

    LineRecord {
        line,
        raw: String::from_utf8_lossy(content).into_owned(),
        bom,
        kind,
    }
}

/// Split a buffer into `(body, terminator)` pairs.
///
/// Works on bytes so files in legacy encodings split the same way. The
/// terminator is `"\n"`, `"\r\n"`, or empty for a last line without a
/// newline. An empty buffer yields no lines.
pub fn split_lines(content: &[u8]) -> impl Iterator<Item = (&[u8], &[u8])> {
    content.split_inclusive(|&b| b == b'\n').map(|segment| {
        if let Some(body) = segment.strip_suffix(b"\r\n") {
            (body, &segment[body.len()..])
        } else if let Some(body) = segment.strip_suffix(b"\n") {
            (body, &segment[body.len()..])
        } else {
            (segment, &segment[segment.len()..])
        }
    })
}

/// Parse every line of a buffer in order
pub fn parse_lines(content: &[u8]) -> impl Iterator<Item = LineRecord> + '_ {
    split_lines(content)
        .enumerate()
        .map(|(idx, (body, _))| parse_line_bytes(body, idx + 1))
}
