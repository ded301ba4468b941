use std::borrow::Cow;
use tracing::warn;

use super::stats::Stats;
use crate::parse::{
    parse_line, parse_line_bytes, split_lines, LineKind, LineRecord, ParseWarning,
    TranslationMap, BOM,
};

/// Output of a full substitution pass over a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Rewritten bytes; lines that were not UTF-8 are copied through as-is
    pub output: Vec<u8>,
    pub stats: Stats,
    pub warnings: Vec<ParseWarning>,
}

impl Substitution {
    /// Output as text, with any non-UTF-8 bytes replaced for display
    pub fn output_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// Rewrites lines one at a time against a fixed map, counting as it goes
pub struct Substituter<'m> {
    map: &'m TranslationMap,
    stats: Stats,
    warnings: Vec<ParseWarning>,
}

impl<'m> Substituter<'m> {
    pub fn new(map: &'m TranslationMap) -> Self {
        Self {
            map,
            stats: Stats::default(),
            warnings: Vec::new(),
        }
    }

    /// Rewrite a single line (without terminator) at 1-based `line`.
    ///
    /// Only valid lines whose key is in the map change; they become
    /// `key=mapped` with no padding around the separator.
    pub fn rewrite_line(&mut self, raw: &str, line: usize) -> String {
        self.rewrite_record(&parse_line(raw, line))
            .unwrap_or_else(|| raw.to_string())
    }

    /// Byte-level [`rewrite_line`](Self::rewrite_line). Lines that are not
    /// UTF-8 come back untouched and are counted as unchanged.
    pub fn rewrite_bytes<'a>(&mut self, raw: &'a [u8], line: usize) -> Cow<'a, [u8]> {
        match self.rewrite_record(&parse_line_bytes(raw, line)) {
            Some(rewritten) => Cow::Owned(rewritten.into_bytes()),
            None => Cow::Borrowed(raw),
        }
    }

    /// Count `record` and return its replacement, or `None` to keep the line
    fn rewrite_record(&mut self, record: &LineRecord) -> Option<String> {
        self.stats.total += 1;

        if record.is_skippable() {
            self.stats.skipped += 1;
            return None;
        }

        if let Some(warning) = record.warning() {
            warn!(line = warning.line, reason = %warning.reason, "{}", warning);
            self.warnings.push(warning);
            self.stats.unchanged += 1;
            return None;
        }

        let LineKind::Valid { key, .. } = &record.kind else {
            self.stats.unchanged += 1;
            return None;
        };

        match self.map.get(key) {
            Some(mapped) => {
                self.stats.translated += 1;
                let prefix = if record.bom { BOM.len_utf8() } else { 0 };
                let mut out = String::with_capacity(prefix + key.len() + 1 + mapped.len());
                if record.bom {
                    out.push(BOM);
                }
                out.push_str(key);
                out.push('=');
                out.push_str(mapped);
                Some(out)
            }
            None => {
                self.stats.unchanged += 1;
                self.stats.not_found += 1;
                None
            }
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn into_parts(self) -> (Stats, Vec<ParseWarning>) {
        (self.stats, self.warnings)
    }
}

/// Rewrite a sequence of lines, returning exactly one output line per input
pub fn apply_to_lines<'a, I>(lines: I, map: &TranslationMap) -> (Vec<String>, Stats)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut substituter = Substituter::new(map);
    let rewritten = lines
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| substituter.rewrite_line(raw, idx + 1))
        .collect();
    (rewritten, substituter.stats())
}

/// Rewrite a whole buffer, keeping every line terminator as it was.
///
/// The buffer need not be UTF-8: lines in a legacy encoding pass through
/// byte for byte.
pub fn apply_map(content: impl AsRef<[u8]>, map: &TranslationMap) -> Substitution {
    let content = content.as_ref();
    let mut substituter = Substituter::new(map);
    let mut output = Vec::with_capacity(content.len());

    for (idx, (body, terminator)) in split_lines(content).enumerate() {
        output.extend_from_slice(&substituter.rewrite_bytes(body, idx + 1));
        output.extend_from_slice(terminator);
    }

    let (stats, warnings) = substituter.into_parts();
    Substitution {
        output,
        stats,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, &str)]) -> TranslationMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_translates_found_key_and_counts_missing() {
        let result = apply_map("K1=V1\nK2=V2\n", &map_of(&[("K1", "X1")]));
        assert_eq!(result.output_text(), "K1=X1\nK2=V2\n");
        assert_eq!(
            result.stats,
            Stats {
                total: 2,
                translated: 1,
                unchanged: 1,
                skipped: 0,
                not_found: 1,
            }
        );
    }

    #[test]
    fn test_malformed_counts_as_unchanged() {
        let result = apply_map("no_equals_here\n", &map_of(&[]));
        assert_eq!(result.output_text(), "no_equals_here\n");
        assert_eq!(result.stats.unchanged, 1);
        assert_eq!(result.stats.skipped, 0);
        assert_eq!(result.stats.not_found, 0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_comments_and_blanks_are_skipped() {
        let result = apply_map("# title\n\n; x=1\n", &map_of(&[("x", "2")]));
        assert_eq!(result.output_text(), "# title\n\n; x=1\n");
        assert_eq!(result.stats.skipped, 3);
        assert_eq!(result.stats.translated, 0);
    }

    #[test]
    fn test_spacing_is_normalized_only_on_translated_lines() {
        let result = apply_map("  a = 1\n  b = 2", &map_of(&[("a", "one")]));
        assert_eq!(result.output_text(), "a=one\n  b = 2");
    }

    #[test]
    fn test_bom_kept_when_first_line_translated() {
        let result = apply_map("\u{feff}k=v\n", &map_of(&[("k", "w")]));
        assert_eq!(result.output_text(), "\u{feff}k=w\n");
    }

    #[test]
    fn test_bom_kept_when_first_line_untouched() {
        let result = apply_map("\u{feff}# header\nk=v\n", &map_of(&[("k", "w")]));
        assert_eq!(result.output_text(), "\u{feff}# header\nk=w\n");
    }

    #[test]
    fn test_crlf_terminators_preserved() {
        let result = apply_map("a=1\r\nb=2\r\n", &map_of(&[("b", "3")]));
        assert_eq!(result.output_text(), "a=1\r\nb=3\r\n");
    }

    #[test]
    fn test_non_utf8_line_passes_through() {
        let input = b"K1=V\nK2=\xA4\xA4\xA4\xE5\n";
        let result = apply_map(input, &map_of(&[("K1", "X"), ("K2", "Y")]));
        assert_eq!(result.output, b"K1=X\nK2=\xA4\xA4\xA4\xE5\n".to_vec());
        assert_eq!(result.stats.translated, 1);
        assert_eq!(result.stats.unchanged, 1);
        assert_eq!(result.stats.not_found, 0);
        assert!(result.stats.is_consistent());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].line, 2);
    }

    #[test]
    fn test_apply_to_lines_keeps_length() {
        let lines = ["a=1", "", "junk", "b=2"];
        let (out, stats) = apply_to_lines(lines, &map_of(&[("b", "B")]));
        assert_eq!(out, vec!["a=1", "", "junk", "b=B"]);
        assert_eq!(stats.total, 4);
        assert!(stats.is_consistent());
    }
}
