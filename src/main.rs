use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use l10n::{
    ApplyQuery, BackupStatus, ClassifierConfig, DefaultPaths, ExtractQuery, MapFormat,
    ReportFormatter, ScanConfig, VariantScanner,
};

/// L10n - Maintain INI-style localization files
#[derive(Parser, Debug)]
#[command(name = "l10n")]
#[command(author, version, about, long_about = None)]
#[command(help_template = "{name} {version}\n{about}\n\nUSAGE:\n    {usage}\n\n{all-args}")]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract key/value pairs from an INI file into a translation map
    Extract {
        /// INI file to read (default: ../source/global.ini)
        #[arg(value_name = "SOURCE")]
        source: Option<PathBuf>,

        /// Where to write the map (default: translation_map.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Map file format
        #[arg(long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,
    },

    /// Detect the file encoding and list Simplified Chinese characters
    Scan {
        /// File to scan (default: ../source/global.ini)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Characters of context shown on each side (default: 10, max: 50)
        #[arg(long, default_value = "10", value_parser = validate_context)]
        context: usize,

        /// Apply the byte-range rule even to valid UTF-8.
        ///
        /// Off by default. When set, a UTF-8 file containing non-ASCII text can
        /// be classified as BIG5 or GB2312/GBK, the way the byte ranges alone
        /// would classify it.
        #[arg(long)]
        strict: bool,
    },

    /// Apply a translation map to an INI file
    Apply {
        /// File to translate (default: output/global.ini)
        #[arg(value_name = "TARGET")]
        target: Option<PathBuf>,

        /// Translation map JSON (default: ../init/translation_map_tc.json)
        #[arg(short, long)]
        map: Option<PathBuf>,

        /// Fresh copy of the untranslated file (default: ../source/global.ini)
        #[arg(long, conflicts_with = "in_place")]
        source: Option<PathBuf>,

        /// Where the previous target is moved (default: bak/global_bak.ini)
        #[arg(long, conflicts_with = "in_place")]
        backup: Option<PathBuf>,

        /// Translate TARGET as it is, without backup or refresh
        #[arg(long)]
        in_place: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Text,
}

impl From<FormatArg> for MapFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => MapFormat::Json,
            FormatArg::Text => MapFormat::Text,
        }
    }
}

/// Validate that the context width is between 0 and 50
fn validate_context(s: &str) -> Result<usize, String> {
    let width: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if width > 50 {
        return Err(format!("context must be between 0 and 50, got {}", width));
    }

    Ok(width)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    let defaults = DefaultPaths::default();
    let formatter = ReportFormatter::new();

    match command {
        Commands::Extract {
            source,
            output,
            format,
        } => {
            let query = ExtractQuery::new(
                source.unwrap_or(defaults.source),
                output.unwrap_or(defaults.extracted_map),
            )
            .with_format(format.into());

            println!("{}", "=== INI Key-Value Extractor ===".bold());
            println!("Reading from: {}", query.source.display());

            let extraction = l10n::run_extract(&query).context("Error parsing INI file")?;

            print!("{}", formatter.format_extraction(&extraction));
            println!("{} Written to: {}", "✓".green(), query.output.display());
            println!("\n{}", "=== Extraction Complete ===".bold());
            println!("Total entries processed: {}", extraction.map.len());
        }

        Commands::Scan {
            file,
            context,
            strict,
        } => {
            let path = file.unwrap_or(defaults.source);
            let scanner = VariantScanner::new(
                ClassifierConfig::default().with_strict_high_bytes(strict),
                ScanConfig::default().with_context_width(context),
            );

            println!(
                "{}",
                "=== Scanning for Simplified Chinese Characters ===".bold()
            );
            println!("File: {}\n", path.display());

            let report = l10n::run_scan(&path, &scanner).context("Error reading file")?;
            print!("{}", formatter.format_scan(&report));
        }

        Commands::Apply {
            target,
            map,
            source,
            backup,
            in_place,
        } => {
            let mut query = ApplyQuery::new(
                target.unwrap_or(defaults.output),
                map.unwrap_or(defaults.translation_map),
            );
            if !in_place {
                query = query
                    .with_source(source.unwrap_or(defaults.source))
                    .with_backup(backup.unwrap_or(defaults.backup));
            }

            println!("{}", "=== Translation Processor ===".bold());
            println!();

            let outcome = l10n::run_apply(&query).context("Error translating file")?;

            match &outcome.backup {
                BackupStatus::Done(path) => println!(
                    "{} Backed up {} to {}",
                    "✓".green(),
                    query.target.display(),
                    path.display()
                ),
                BackupStatus::Failed(reason) => println!(
                    "{} Could not backup file: {} (continuing anyway)",
                    "!".yellow(),
                    reason
                ),
                BackupStatus::Skipped => {}
            }
            if let (true, Some(source)) = (outcome.refreshed, &query.source) {
                println!(
                    "{} Copied {} to {}",
                    "✓".green(),
                    source.display(),
                    query.target.display()
                );
            }
            println!(
                "{} Loaded {} translations from {}",
                "✓".green(),
                outcome.map_entries,
                query.map.display()
            );
            println!("{} Translated {}", "✓".green(), query.target.display());
            println!();

            print!("{}", formatter.format_warnings(&outcome.warnings));
            print!("{}", formatter.format_stats(&outcome.stats));
            println!();
            println!("Output file: {}", query.target.display());
            if let Some(backup) = &query.backup {
                println!("Backup file: {}", backup.display());
            }
        }
    }

    Ok(())
}
