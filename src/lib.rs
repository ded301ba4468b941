pub mod apply;
pub mod config;
pub mod encoding;
pub mod error;
pub mod output;
pub mod parse;

use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

// Re-export commonly used types
pub use apply::{apply_map, Stats, Substituter, Substitution};
pub use config::{ClassifierConfig, DefaultPaths, ScanConfig, VariantTable};
pub use encoding::{EncodingClassifier, EncodingVerdict, FlaggedChar, ScanReport, VariantScanner};
pub use error::{L10nError, Result};
pub use output::ReportFormatter;
pub use parse::{
    extract_entries, parse_line, Extraction, LineKind, LineRecord, MapBuilder, ParseWarning,
    TranslationEntry, TranslationMap,
};

/// On-disk format for an extracted map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MapFormat {
    #[default]
    Json,
    /// `KEY=VALUE` lines under a comment header
    Text,
}

/// Parameters for extracting a map from an INI file
#[derive(Debug, Clone)]
pub struct ExtractQuery {
    pub source: PathBuf,
    pub output: PathBuf,
    pub format: MapFormat,
}

impl ExtractQuery {
    pub fn new(source: PathBuf, output: PathBuf) -> Self {
        Self {
            source,
            output,
            format: MapFormat::Json,
        }
    }

    pub fn with_format(mut self, format: MapFormat) -> Self {
        self.format = format;
        self
    }
}

/// Read `query.source`, fold it into a map and write the map to `query.output`.
///
/// Lines that are not UTF-8 become warnings rather than errors.
#[must_use = "this function returns a Result that should be handled"]
pub fn run_extract(query: &ExtractQuery) -> Result<Extraction> {
    let content = fs::read(&query.source).map_err(|e| L10nError::read_failed(&query.source, e))?;

    let extraction = extract_entries(&content);
    debug!(
        entries = extraction.map.len(),
        warnings = extraction.warnings.len(),
        "extracted map"
    );

    match query.format {
        MapFormat::Json => extraction.map.save_json(&query.output)?,
        MapFormat::Text => extraction.map.save_plain_text(&query.output)?,
    }

    Ok(extraction)
}

/// Classify and scan the file at `path`
#[must_use = "this function returns a Result that should be handled"]
pub fn run_scan(path: &std::path::Path, scanner: &VariantScanner) -> Result<ScanReport> {
    let bytes = fs::read(path).map_err(|e| L10nError::read_failed(path, e))?;
    Ok(scanner.scan(&bytes))
}

/// Parameters for applying a map to a target file
#[derive(Debug, Clone)]
pub struct ApplyQuery {
    pub target: PathBuf,
    pub map: PathBuf,
    /// When set, `target` is refreshed from this file before translating
    pub source: Option<PathBuf>,
    /// Where the previous `target` is moved during a refresh
    pub backup: Option<PathBuf>,
}

impl ApplyQuery {
    pub fn new(target: PathBuf, map: PathBuf) -> Self {
        Self {
            target,
            map,
            source: None,
            backup: None,
        }
    }

    pub fn with_source(mut self, source: PathBuf) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_backup(mut self, backup: PathBuf) -> Self {
        self.backup = Some(backup);
        self
    }
}

/// What happened to the previous target during a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupStatus {
    /// No refresh, or no backup location given
    Skipped,
    Done(PathBuf),
    /// Backup failed; the run continued
    Failed(String),
}

/// Result of [`run_apply`]
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub backup: BackupStatus,
    /// Whether `target` was overwritten from the source file
    pub refreshed: bool,
    pub map_entries: usize,
    pub stats: Stats,
    pub warnings: Vec<ParseWarning>,
}

/// Apply a translation map to `query.target`.
///
/// With a source configured the previous target is backed up (failures are
/// only logged) and replaced by a fresh copy of the source first. The map is
/// loaded before any file is touched, and the target is rewritten through a
/// temp file, so an error leaves no half-translated output.
#[must_use = "this function returns a Result that should be handled"]
pub fn run_apply(query: &ApplyQuery) -> Result<ApplyOutcome> {
    let map = TranslationMap::load(&query.map)?;
    debug!(entries = map.len(), path = %query.map.display(), "loaded translation map");

    let mut backup = BackupStatus::Skipped;
    let mut refreshed = false;

    if let Some(source) = &query.source {
        if let Some(backup_path) = &query.backup {
            backup = match apply::backup_file(&query.target, backup_path) {
                Ok(()) => BackupStatus::Done(backup_path.clone()),
                Err(e) => {
                    warn!(error = %e, "could not back up previous output, continuing");
                    BackupStatus::Failed(e.to_string())
                }
            };
        }

        apply::copy_file(source, &query.target)?;
        refreshed = true;
    }

    let substitution = apply::rewrite_file(&query.target, &map)?;

    Ok(ApplyOutcome {
        backup,
        refreshed,
        map_entries: map.len(),
        stats: substitution.stats,
        warnings: substitution.warnings,
    })
}
