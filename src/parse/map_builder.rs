use tracing::{debug, warn};

use super::line::{parse_lines, LineRecord, ParseWarning};
use super::translation::TranslationEntry;
use super::translation_map::TranslationMap;

/// Result of folding a file's lines into a map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub map: TranslationMap,
    pub warnings: Vec<ParseWarning>,
    /// Every valid line in scan order, duplicates included
    pub entries: Vec<TranslationEntry>,
    /// Number of entries whose key had already been seen
    pub duplicates: usize,
}

/// Folds [`LineRecord`]s into a [`TranslationMap`] in scan order.
///
/// A repeated key keeps its first position and takes the value of its last
/// occurrence.
#[derive(Debug, Default)]
pub struct MapBuilder {
    extraction: Extraction,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &LineRecord) {
        if let Some(warning) = record.warning() {
            warn!(line = warning.line, reason = %warning.reason, "{}", warning);
            self.extraction.warnings.push(warning);
            return;
        }

        if let Some(entry) = record.entry() {
            if let Some(previous) = self
                .extraction
                .map
                .insert(entry.key.as_str(), entry.value.as_str())
            {
                debug!(line = entry.line, key = %entry.key, previous = %previous, "duplicate key overwritten");
                self.extraction.duplicates += 1;
            }
            self.extraction.entries.push(entry);
        }
    }

    pub fn finish(self) -> Extraction {
        self.extraction
    }
}

impl Extend<LineRecord> for MapBuilder {
    fn extend<I: IntoIterator<Item = LineRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(&record);
        }
    }
}

/// Parse a whole INI buffer and fold it into a map.
///
/// Lines that are not UTF-8 are reported as warnings and left out.
pub fn extract_entries(content: impl AsRef<[u8]>) -> Extraction {
    let mut builder = MapBuilder::new();
    builder.extend(parse_lines(content.as_ref()));
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::line::{parse_line, LineKind, MalformedReason};

    #[test]
    fn test_skips_blank_and_comments_silently() {
        let extraction = extract_entries("\n# comment\n; other\n\n");
        assert!(extraction.map.is_empty());
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let extraction = extract_entries("a=1\nb=2\na=3\n");
        assert_eq!(extraction.map.get("a"), Some("3"));
        assert_eq!(extraction.map.len(), 2);
        assert_eq!(extraction.duplicates, 1);

        let keys: Vec<_> = extraction.map.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);

        let seen: Vec<_> = extraction
            .entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str(), e.line))
            .collect();
        assert_eq!(seen, vec![("a", "1", 1), ("b", "2", 2), ("a", "3", 3)]);
    }

    #[test]
    fn test_non_utf8_line_is_warned_and_left_out() {
        let extraction = extract_entries(b"K1=V\nK2=\xA4\xA4\xA4\xE5\nK3=W\n");
        assert_eq!(extraction.map.len(), 2);
        assert_eq!(extraction.map.get("K1"), Some("V"));
        assert_eq!(extraction.map.get("K3"), Some("W"));
        assert_eq!(extraction.warnings.len(), 1);
        assert_eq!(extraction.warnings[0].line, 2);
        assert_eq!(extraction.warnings[0].reason, MalformedReason::InvalidUtf8);
    }

    #[test]
    fn test_warns_for_malformed_lines() {
        let extraction = extract_entries("ok=1\nbroken\n =x\n");
        assert_eq!(extraction.map.len(), 1);
        assert_eq!(extraction.warnings.len(), 2);
        assert_eq!(extraction.warnings[0].line, 2);
        assert_eq!(
            extraction.warnings[0].reason,
            MalformedReason::MissingSeparator
        );
        assert_eq!(extraction.warnings[1].line, 3);
        assert_eq!(extraction.warnings[1].reason, MalformedReason::EmptyKey);
    }

    #[test]
    fn test_hand_built_record_with_blank_key_is_rejected() {
        let mut record = parse_line("k=v", 5);
        record.kind = LineKind::Valid {
            key: "  ".to_string(),
            value: "v".to_string(),
        };

        let mut builder = MapBuilder::new();
        builder.push(&record);
        let extraction = builder.finish();
        assert!(extraction.map.is_empty());
        assert_eq!(extraction.warnings.len(), 1);
        assert_eq!(extraction.warnings[0].reason, MalformedReason::EmptyKey);
    }

    #[test]
    fn test_bom_is_not_part_of_first_key() {
        let extraction = extract_entries("\u{feff}first=1\nsecond=2");
        assert_eq!(extraction.map.get("first"), Some("1"));
        assert_eq!(extraction.map.get("second"), Some("2"));
    }
}
