use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;

use factnorm_core::verifier::{verify_file, VerificationReport};
use factnorm_core::{digest, ingest, Extraction, IngestConfig, IngestReport, OutputStyle};

/// factnorm — normalize raw animal fact dumps into id-numbered fact lists
///
/// Reads a JSON array of raw facts (objects with a fact field, or bare
/// strings) and writes `[{"id": 0, "fact": "..."}, ...]`.
#[derive(Parser)]
#[command(name = "factnorm", version, about, long_about = None)]
struct Cli {
    /// Print nothing on success
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./factnorm.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize configured categories (all of them when none are named)
    Run {
        /// Category names, e.g. `cat dog`
        categories: Vec<String>,
        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
        /// Print run reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a single file
    Normalize {
        /// Raw fact file
        input: PathBuf,
        /// Where to write the normalized facts
        output: PathBuf,
        /// Read the fact from this field of each object [default: fact]
        #[arg(long, value_name = "NAME", conflicts_with = "strings")]
        field: Option<String>,
        /// Elements are bare fact strings
        #[arg(long)]
        strings: bool,
        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Check that a normalized file has ids 0..N in order
    Check {
        /// Normalized fact file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the SHA-256 digest of a normalized file's facts
    Hash {
        /// Normalized fact file
        file: PathBuf,
    },

    /// Show version information
    Version,
}

struct Output {
    quiet: bool,
}

impl Output {
    fn line(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", msg.as_ref());
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let out = Output { quiet: cli.quiet };

    let result = match cli.command {
        Commands::Run {
            categories,
            pretty,
            json,
        } => cmd_run(&out, cli.config.as_deref(), &categories, pretty, json),
        Commands::Normalize {
            input,
            output,
            field,
            strings,
            pretty,
        } => {
            let rule = if strings {
                Extraction::Identity
            } else {
                field.map(Extraction::Field).unwrap_or_default()
            };
            cmd_normalize(&out, &input, &output, &rule, pretty)
        }
        Commands::Check { file, json } => cmd_check(&out, &file, json),
        Commands::Hash { file } => cmd_hash(&out, &file),
        Commands::Version => {
            out.line(format!(
                "factnorm {} (factnorm-core {})",
                env!("CARGO_PKG_VERSION"),
                factnorm_core::VERSION
            ));
            Ok(0)
        }
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            2
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

// ── Commands ──────────────────────────────────────────────

fn cmd_run(
    out: &Output,
    config_path: Option<&Path>,
    names: &[String],
    pretty: bool,
    json: bool,
) -> factnorm_core::Result<i32> {
    let config = IngestConfig::load(config_path)?;
    let style = OutputStyle::from_pretty(pretty || config.pretty);

    let selected = if names.is_empty() {
        config.categories.iter().collect::<Vec<_>>()
    } else {
        names
            .iter()
            .map(|name| config.category(name))
            .collect::<factnorm_core::Result<Vec<_>>>()?
    };
    tracing::debug!(
        "running {} categories against {}",
        selected.len(),
        config.facts_dir.display()
    );

    let mut reports = Vec::with_capacity(selected.len());
    for category in selected {
        let report = ingest::run_category(category, &config.facts_dir, style)?;
        if !json {
            out.line(describe_report(&report));
        }
        reports.push(report);
    }

    if json {
        out.line(serde_json::to_string_pretty(&reports)?);
    }
    Ok(0)
}

fn cmd_normalize(
    out: &Output,
    input: &Path,
    output: &Path,
    rule: &Extraction,
    pretty: bool,
) -> factnorm_core::Result<i32> {
    let report = ingest::ingest_file(input, output, rule, OutputStyle::from_pretty(pretty))?;
    out.line(describe_report(&report));
    Ok(0)
}

fn cmd_check(out: &Output, file: &Path, json: bool) -> factnorm_core::Result<i32> {
    let (_, report) = verify_file(file)?;

    if json {
        let value = serde_json::json!({
            "file": file.display().to_string(),
            "valid": report.is_valid(),
            "count": report.count,
            "mismatches": report.mismatches,
        });
        out.line(serde_json::to_string_pretty(&value)?);
    } else if report.is_valid() {
        out.line(format!(
            "{} {} ({})",
            "✓".green().bold(),
            file.display(),
            describe_count(&report)
        ));
    } else {
        eprintln!(
            "{} {}: {} of {} ids out of place",
            "error:".red().bold(),
            file.display(),
            report.mismatches.len(),
            report.count
        );
        for m in &report.mismatches {
            eprintln!(
                "  position {}: id {} (expected {})",
                m.position, m.found, m.expected
            );
        }
    }

    Ok(if report.is_valid() { 0 } else { 1 })
}

fn cmd_hash(out: &Output, file: &Path) -> factnorm_core::Result<i32> {
    let (facts, _) = verify_file(file)?;
    out.line(digest::digest_facts(&facts)?);
    Ok(0)
}

// ── Formatting ────────────────────────────────────────────

fn describe_report(report: &IngestReport) -> String {
    let label = match &report.category {
        Some(name) => format!("{}: ", name.bold()),
        None => String::new(),
    };
    format!(
        "{} {}{} facts → {}",
        "✓".green().bold(),
        label,
        report.count,
        report.output.display()
    )
}

fn describe_count(report: &VerificationReport) -> String {
    if report.is_empty() {
        "empty".yellow().to_string()
    } else {
        format!("{} facts, ids 0 to {}", report.count, report.count - 1)
    }
}
