use l10n::parse::{parse_lines, LineKind, MalformedReason};
use l10n::{extract_entries, parse_line};
use std::fs;

#[test]
fn test_fixture_classification() {
    let content = fs::read("tests/fixtures/global.ini").unwrap();
    let records: Vec<_> = parse_lines(&content).collect();

    assert_eq!(records.len(), 8);
    assert!(records[0].bom);
    assert_eq!(records[0].kind, LineKind::Comment);
    assert_eq!(records[1].kind, LineKind::Blank);
    assert_eq!(records[3].key(), Some("ASD_Airlock_Title,P"));
    assert_eq!(records[3].value(), Some("Airlock"));
    assert_eq!(
        records[6].kind,
        LineKind::Malformed(MalformedReason::MissingSeparator)
    );
    assert_eq!(records[7].kind, LineKind::Comment);
}

#[test]
fn test_fixture_extraction() {
    let content = fs::read_to_string("tests/fixtures/global.ini").unwrap();
    let extraction = extract_entries(&content);

    assert_eq!(extraction.map.len(), 4);
    assert_eq!(extraction.warnings.len(), 1);
    assert_eq!(extraction.warnings[0].line, 7);
    assert_eq!(extraction.entries.len(), 4);
    assert_eq!(extraction.entries[0].line, 3);

    let keys: Vec<_> = extraction.map.keys().collect();
    assert_eq!(
        keys,
        vec![
            "ASD_Active,P",
            "ASD_Airlock_Title,P",
            "2019_Ann_Sale_Day1",
            "ASD_Country"
        ]
    );
}

#[test]
fn test_normalized_line_reparses_identically() {
    let record = parse_line("  key =  a = b  ", 3);
    let normalized = record.normalized().unwrap();
    assert_eq!(normalized, "key=a = b");

    let again = parse_line(&normalized, 3);
    assert_eq!(again.kind, record.kind);
}

#[test]
fn test_keys_are_not_case_folded() {
    let extraction = extract_entries("Key=1\nkey=2\n");
    assert_eq!(extraction.map.len(), 2);
    assert_eq!(extraction.map.get("Key"), Some("1"));
    assert_eq!(extraction.map.get("key"), Some("2"));
}
