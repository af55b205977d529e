use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::path::PathBuf;
use subtype_core::{CategoryResolver, Normalize, ResolverOptions};
use subtype_table::{Summary, TableReport, builtin, classify, read_descriptions_csv};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::Config;

const UNCLASSIFIED: &str = "Unclassified";

#[derive(Parser, Debug)]
#[command(
    name = "subtype",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SUBTYPE_BUILD_SHA"), ")"),
    about = "Map bank transaction descriptions to categories"
)]
struct Cli {
    /// Mapping table (.csv, .toml or .json). Defaults to the built-in bank table
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Matching mode: none, casefold or casefold+diacritic-strip
    #[arg(long, global = true)]
    normalize: Option<Normalize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify descriptions given on the command line
    Classify {
        #[arg(required = true)]
        descriptions: Vec<String>,

        /// Emit one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Classify one column of a CSV file and summarize by category
    Batch {
        #[arg(long)]
        csv: PathBuf,

        /// Header of the description column
        #[arg(long, default_value = "description")]
        column: String,

        #[arg(long)]
        json: bool,
    },

    /// Validate the active table and list duplicates, overlaps and unknown labels
    Check {
        #[arg(long)]
        json: bool,
    },

    /// Print the active table in definition order
    Table,

    /// Manage ~/.subtype/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

/// The resolver in use and where its table came from
struct ActiveTable {
    resolver: Cow<'static, CategoryResolver>,
    source: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (cfg, config_err) = config_or_default(config::load_config());
    init_tracing(&cfg.log.level);
    if let Some(err) = &config_err {
        tracing::warn!("config unavailable, using defaults: {err:#}");
    }

    match cli.command {
        Command::Classify { descriptions, json } => {
            let active = active_table(&cfg, cli.table, cli.normalize)?;
            let rows = classify(&active.resolver, descriptions);
            for row in &rows {
                if json {
                    println!("{}", serde_json::to_string(row)?);
                } else {
                    println!("{}\t{}", row.result.label_or(UNCLASSIFIED), row.description);
                }
            }
        }

        Command::Batch { csv, column, json } => {
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let active = active_table(&cfg, cli.table, cli.normalize)?;
            let descriptions = read_descriptions_csv(&csv, &column)
                .with_context(|| format!("parsing {}", csv.display()))?;
            let rows = classify(&active.resolver, descriptions);
            let summary = Summary::from_rows(&rows);

            if json {
                let out = serde_json::json!({ "rows": rows, "summary": summary });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            for row in &rows {
                println!("{}\t{}", row.result.label_or(UNCLASSIFIED), row.description);
            }
            println!(
                "\nClassified {} of {} descriptions from {} using {}",
                summary.classified(),
                summary.total,
                csv.display(),
                active.source
            );
            for (category, count) in &summary.by_category {
                println!("  {:<30} {}", category, count);
            }
            println!("  {:<30} {}", UNCLASSIFIED, summary.unclassified);
        }

        Command::Check { json } => {
            let active = active_table(&cfg, cli.table, cli.normalize)?;
            let report = TableReport::for_resolver(&active.resolver);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, &active.source);
            }
        }

        Command::Table => {
            let active = active_table(&cfg, cli.table, cli.normalize)?;
            println!(
                "# {} ({} entries, normalize={})",
                active.source,
                active.resolver.len(),
                active.resolver.normalize()
            );
            for entry in active.resolver.entries() {
                let pattern = format!("{:?}", entry.pattern);
                println!("{:>3}  {:<45} {}", entry.index, pattern, entry.category);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                if let Some(err) = config_err {
                    return Err(err);
                }
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Commands other than `config show` run on defaults when the config can't be read.
fn config_or_default(loaded: Result<Config>) -> (Config, Option<anyhow::Error>) {
    match loaded {
        Ok(cfg) => (cfg, None),
        Err(err) => (Config::default(), Some(err)),
    }
}

fn config_directives(level: &str) -> String {
    format!("subtype={level},subtype_core={level},subtype_table={level}")
}

/// `RUST_LOG` wins when set and valid; otherwise the configured level applies.
fn log_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(config_directives(level)).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn init_tracing(level: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), level))
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line flags take precedence over the config file.
fn active_table(
    cfg: &Config,
    table: Option<PathBuf>,
    normalize: Option<Normalize>,
) -> Result<ActiveTable> {
    let normalize = normalize.unwrap_or(cfg.resolver.normalize);
    let table = table.or_else(|| cfg.resolver.table.clone());
    tracing::debug!(table = ?table, normalize = %normalize, "selecting mapping table");

    match table {
        Some(path) => {
            let options = ResolverOptions::default().with_normalize(normalize);
            let resolver = subtype_table::load_resolver(&path, options)?;
            Ok(ActiveTable {
                resolver: Cow::Owned(resolver),
                source: path.display().to_string(),
            })
        }
        None if normalize == Normalize::None => Ok(ActiveTable {
            resolver: Cow::Borrowed(builtin::shared()?),
            source: "built-in bank table".to_string(),
        }),
        None => Ok(ActiveTable {
            resolver: Cow::Owned(builtin::bank_resolver(normalize)?),
            source: "built-in bank table".to_string(),
        }),
    }
}

fn print_report(report: &TableReport, source: &str) {
    println!(
        "Table: {} ({} entries, normalize={})",
        source, report.entries, report.normalize
    );

    if report.duplicates.is_empty() {
        println!("Duplicates: none");
    } else {
        println!(
            "Duplicates: {} ({} conflicting)",
            report.duplicates.len(),
            report.conflicting_duplicates()
        );
        for d in &report.duplicates {
            println!(
                "  {:?} rows {} and {}: {} -> {}",
                d.pattern, d.first_index, d.duplicate_index, d.previous_category, d.category
            );
        }
    }

    if report.non_canonical.is_empty() {
        println!("Labels: all canonical");
    } else {
        println!("Non-canonical labels: {}", report.non_canonical.len());
        for (pattern, label) in &report.non_canonical {
            println!("  {:?} -> {:?}", pattern, label);
        }
    }

    println!("Overlaps: {}", report.overlaps.len());
    for o in &report.overlaps {
        let note = if o.differs { " (different categories)" } else { "" };
        println!("  {:?} inside {:?}{}", o.shorter, o.longer, note);
    }

    if report.is_clean() {
        println!("\nOK");
    }
}
