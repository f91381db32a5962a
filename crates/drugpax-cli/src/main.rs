//! drugpax CLI
//!
//! - `convert`: DrugBank XML → pathway model JSON snapshot
//! - `inspect`: decode DrugBank XML and report what it contains

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use drugpax_ingest_drugbank::{read_drugbank_file, Conversion, ConvertConfig, Converter, Drug};
use drugpax_model::export::write_json;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "drugpax")]
#[command(author, version, about = "Convert DrugBank drug-target data into pathway models")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DrugBank XML export into a JSON model snapshot.
    Convert {
        /// DrugBank XML file
        #[arg(long)]
        drugs: PathBuf,
        /// Output JSON snapshot
        #[arg(short, long)]
        output: PathBuf,
        /// Namespace prepended to generated ids
        #[arg(long)]
        xml_base: Option<String>,
        /// Converter settings (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Decode a DrugBank XML export and print drug/target counts.
    Inspect {
        /// DrugBank XML file
        #[arg(long)]
        drugs: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            drugs,
            output,
            xml_base,
            config,
        } => cmd_convert(&drugs, &output, xml_base, config.as_deref()),
        Commands::Inspect { drugs } => cmd_inspect(&drugs),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Settings from `--config` (if any), with `--xml-base` taking precedence.
fn load_config(path: Option<&Path>, xml_base: Option<String>) -> Result<ConvertConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ConvertConfig::from_json_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ConvertConfig::default(),
    };
    if let Some(xml_base) = xml_base {
        config.xml_base = xml_base;
    }
    Ok(config)
}

fn read_drugs(path: &Path) -> Result<Vec<Drug>> {
    read_drugbank_file(path).with_context(|| format!("failed to decode {}", path.display()))
}

fn cmd_convert(
    drugs_path: &Path,
    output: &Path,
    xml_base: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path, xml_base)?;
    tracing::debug!(?config, "converter settings");
    println!(
        "{} DrugBank export {}",
        "Converting".green().bold(),
        drugs_path.display()
    );

    let drugs = read_drugs(drugs_path)?;
    let conversion = Converter::new(config).convert(&drugs)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = fs::File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    write_json(&conversion.model, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", output.display()))?;

    print_summary(&conversion);
    println!("  {} {}", "→".cyan(), output.display());
    Ok(())
}

fn print_summary(conversion: &Conversion) {
    let report = &conversion.report;
    println!(
        "  {} {} drugs, {} drug-target pairs ({} skipped)",
        "→".cyan(),
        report.drugs,
        report.drug_targets,
        report.skipped_targets
    );
    for (kind, count) in conversion.model.summary() {
        println!("    {:<32} {}", kind.to_string(), count);
    }
    if report.warnings.is_empty() {
        println!("  {} no warnings", "ok".green().bold());
    } else {
        println!(
            "  {} {} warnings",
            "warn:".yellow().bold(),
            report.warnings.len()
        );
    }
}

fn cmd_inspect(drugs_path: &Path) -> Result<()> {
    let drugs = read_drugs(drugs_path)?;
    let targets: usize = drugs.iter().map(|d| d.targets.len()).sum();
    let polypeptides: usize = drugs
        .iter()
        .flat_map(|d| &d.targets)
        .map(|t| t.polypeptides.len())
        .sum();
    let without_primary = drugs.iter().filter(|d| d.primary_id().is_none()).count();

    println!("{} {}", "DrugBank export".bold(), drugs_path.display());
    println!("  {} {} drugs", "→".cyan(), drugs.len());
    println!("  {} {} targets", "→".cyan(), targets);
    println!("  {} {} polypeptides", "→".cyan(), polypeptides);
    if without_primary > 0 {
        println!(
            "  {} {} drugs without a primary id",
            "warn:".yellow().bold(),
            without_primary
        );
    }
    Ok(())
}
