use l10n::config::{ClassifierConfig, ScanConfig};
use l10n::encoding::{Findings, UTF8_BOM};
use l10n::{EncodingClassifier, EncodingVerdict, VariantScanner};
use std::fs;

#[test]
fn test_fixture_is_utf8_with_one_variant() {
    let bytes = fs::read("tests/fixtures/global.ini").unwrap();
    assert!(bytes.starts_with(&UTF8_BOM));

    let report = VariantScanner::default().scan(&bytes);
    assert_eq!(report.verdict, EncodingVerdict::Utf8);
    let chars = report.flagged_chars();
    assert_eq!(chars.len(), 1);
    assert_eq!(chars[0].ch, '国');
    assert_eq!(chars[0].line, 6);
}

#[test]
fn test_ascii_garbage_defaults_to_utf8() {
    // Control bytes and punctuation only: no double-byte range, so UTF-8
    let bytes = b"\x01\x02\x7f~~~\x1b[0m";
    for strict in [false, true] {
        let classifier =
            EncodingClassifier::new(ClassifierConfig::default().with_strict_high_bytes(strict));
        assert_eq!(classifier.classify(bytes), EncodingVerdict::Utf8);
    }
}

#[test]
fn test_gb2312_text_reads_as_big5() {
    // "国家" in GB2312 happens to satisfy the Big5 byte rules too
    let bytes = [0xB9, 0xFA, 0xBC, 0xD2];
    assert_eq!(
        EncodingClassifier::default().classify(&bytes),
        EncodingVerdict::TraditionalByteEncoding
    );
}

#[test]
fn test_gbk_scan_context() {
    let mut bytes = b"title=".to_vec();
    bytes.extend_from_slice(&[0x81, 0x40, 0x81, 0x40]);
    let scanner = VariantScanner::new(
        ClassifierConfig::default(),
        ScanConfig::default().with_context_width(1),
    );
    let report = scanner.scan(&bytes);

    match &report.findings {
        Findings::SimplifiedEncoding(chars) => {
            assert_eq!(chars.len(), 2);
            assert_eq!(chars[0].context, "=\u{4E02}\u{4E02}");
            assert_eq!(chars[1].context, "\u{4E02}\u{4E02}");
        }
        other => panic!("unexpected findings: {:?}", other),
    }
}
