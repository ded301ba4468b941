use colored::Colorize;
use std::fmt::Write as _;

use crate::apply::Stats;
use crate::encoding::{EncodingVerdict, Findings, FlaggedChar, ScanReport, SuspectPair};
use crate::parse::{Extraction, ParseWarning};

/// Renders run results as console text
#[derive(Debug, Default)]
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_warnings(&self, warnings: &[ParseWarning]) -> String {
        let mut output = String::new();
        for warning in warnings {
            let _ = writeln!(output, "{} {}", "Warning:".yellow(), warning);
        }
        output
    }

    pub fn format_extraction(&self, extraction: &Extraction) -> String {
        let mut output = self.format_warnings(&extraction.warnings);
        let _ = writeln!(
            output,
            "Extracted {} key-value pairs",
            extraction.map.len()
        );
        if extraction.duplicates > 0 {
            let _ = writeln!(
                output,
                "Duplicate keys overwritten: {}",
                extraction.duplicates
            );
        }
        output
    }

    pub fn format_stats(&self, stats: &Stats) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "{}", "=== Translation Complete ===".bold());
        let _ = writeln!(output, "Total lines processed: {}", stats.total);
        let _ = writeln!(output, "Lines translated: {}", stats.translated);
        let _ = writeln!(output, "Lines unchanged: {}", stats.unchanged);
        let _ = writeln!(output, "Lines skipped (empty/comment): {}", stats.skipped);
        let _ = writeln!(output, "Keys not found in map: {}", stats.not_found);
        output
    }

    pub fn format_scan(&self, report: &ScanReport) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Overall file encoding: {}\n", report.verdict);

        match &report.findings {
            Findings::SimplifiedVariants(chars) => {
                output.push_str("Scanning for characters that are Simplified-only variants...\n\n");
                if chars.is_empty() {
                    let _ = writeln!(
                        output,
                        "{}",
                        "No common Simplified-only characters found".green()
                    );
                    output.push_str(
                        "\nNote: This check uses a limited set of Simplified-only characters.\n",
                    );
                } else {
                    Self::push_char_table(&mut output, chars);
                    let _ = writeln!(
                        output,
                        "\n{}",
                        format!("Found {} Simplified-only characters", chars.len()).yellow()
                    );
                }
            }
            Findings::SimplifiedEncoding(chars) => {
                let _ = writeln!(
                    output,
                    "{}",
                    "WARNING: Entire file is encoded in GB2312/GBK (Simplified Chinese)!"
                        .red()
                        .bold()
                );
                output.push_str(
                    "This file should be re-encoded to BIG5 or UTF-8 with Traditional Chinese characters.\n\n",
                );
                output.push_str("Simplified Chinese characters found:\n\n");
                Self::push_char_table(&mut output, chars);
                let _ = writeln!(
                    output,
                    "\nTotal Simplified Chinese characters found: {}",
                    chars.len()
                );
            }
            Findings::Traditional { char_count } => {
                let _ = writeln!(
                    output,
                    "{}",
                    "File is encoded in BIG5 (Traditional Chinese)".green()
                );
                let _ = writeln!(output, "Total characters: {}", char_count);
                output.push_str("\nNo Simplified Chinese encoding detected.\n");
            }
            Findings::BytePairs(pairs) => {
                output.push_str("Scanning for encoding inconsistencies...\n\n");
                if pairs.is_empty() {
                    let _ = writeln!(output, "{}", "No encoding issues detected".green());
                } else {
                    Self::push_pair_table(&mut output, pairs);
                    let _ = writeln!(
                        output,
                        "\n{}",
                        format!(
                            "Found {} potential Simplified Chinese byte sequences",
                            pairs.len()
                        )
                        .yellow()
                    );
                }
            }
        }

        if report.verdict == EncodingVerdict::Unknown {
            output.push_str("\nNote: encoding could not be determined; results are a byte-level guess.\n");
        }

        output
    }

    fn push_char_table(output: &mut String, chars: &[FlaggedChar]) {
        output.push_str("Line | Character | Unicode  | Context\n");
        output.push_str("-----|-----------|----------|--------\n");
        for flagged in chars {
            let _ = writeln!(
                output,
                "{:4} | {}         | {:<8} | {}",
                flagged.line,
                flagged.ch,
                flagged.code_point(),
                flagged.context
            );
        }
    }

    fn push_pair_table(output: &mut String, pairs: &[SuspectPair]) {
        output.push_str("Line | Byte Pos | Bytes      | Issue\n");
        output.push_str("-----|----------|------------|-------\n");
        for pair in pairs {
            let _ = writeln!(
                output,
                "{:4} | {:8} | {:02X} {:02X}      | Possible GBK (Simplified)",
                pair.line, pair.offset, pair.bytes[0], pair.bytes[1]
            );
        }
    }
}
