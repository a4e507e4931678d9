//! Document generator CLI
//!
//! Lists the placeholders a template needs and renders templates against a
//! JSON data fixture.
//!
//! Usage:
//!   cargo run --features cli --bin docgen -- placeholders letters/loa.json
//!
//!   cargo run --features cli --bin docgen -- render letters/loa.json \
//!     --data records.json \
//!     --work 42 \
//!     --all-firms \
//!     --set AGREEMENT_NO=AG/42 \
//!     --set COST=1250000 \
//!     --out out/loa-42.json
//!
//! Values given with `--set` are remembered per template when the engine
//! config names a value store, and offered again on the next run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;

use works_docgen::{
    load_template, save_document, ConfigLoader, DocumentGenerator, FirmSelection,
    GenerationRequest, InMemoryDataSource, PlaceholderInventory, ValueStore, WorkId,
};

/// Generate works documents from templates
#[derive(Parser, Debug)]
#[command(name = "docgen")]
#[command(about = "Resolve template placeholders against works and firm records")]
struct Args {
    /// Engine config file (default: $DOCGEN_CONFIG or docgen.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the placeholders in a template
    Placeholders {
        template: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a template for a work
    Render {
        template: PathBuf,

        /// Data fixture (JSON records: works, firms, documents)
        #[arg(long, short = 'd')]
        data: PathBuf,

        /// Work id
        #[arg(long, short = 'w')]
        work: WorkId,

        /// Render for one firm
        #[arg(long, conflicts_with = "all_firms")]
        firm: Option<String>,

        /// Render one section per registered firm
        #[arg(long)]
        all_firms: bool,

        /// User input values in format KEY=VALUE (can be specified multiple times)
        #[arg(long, short = 's', value_parser = parse_key_val)]
        set: Vec<(String, String)>,

        /// Output document path
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

/// Parse key=value pairs from command line
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("Invalid key=value pair: {}", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

fn template_key(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let loader = match &args.config {
        Some(path) => ConfigLoader::new(path),
        None => ConfigLoader::from_env(),
    };
    let config = loader.load().context("Failed to load engine config")?;

    match args.command {
        Command::Placeholders { template, json } => {
            let document = load_template(&template)?;
            let inventory = PlaceholderInventory::collect(&document);

            if json {
                println!("{}", serde_json::to_string_pretty(&inventory)?);
                return Ok(());
            }

            println!("\n{} {}", "Template:".cyan().bold(), template.display());
            if inventory.is_empty() {
                println!("{} No placeholders found", "WARNING:".yellow());
                return Ok(());
            }
            println!("{}", "User inputs:".cyan());
            for name in inventory.user_inputs_for_entry() {
                println!("  {}", name.yellow());
            }
            println!("{}", "Work fields:".cyan());
            for name in &inventory.work_fields {
                println!("  {}", name);
            }
            println!("{}", "Firm fields:".cyan());
            for name in &inventory.firm_fields {
                println!("  {}", name);
            }
            if inventory.all_firms_block {
                println!("{} {}", "Includes:".cyan(), works_docgen::ALL_FIRMS_PG_DETAILS);
            }
        }

        Command::Render {
            template,
            data,
            work,
            firm,
            all_firms,
            set,
            out,
        } => {
            let source = InMemoryDataSource::from_json_file(&data)
                .with_context(|| format!("Failed to load data from {}", data.display()))?;
            let document = load_template(&template)?;
            let key = template_key(&template);

            let mut store = config
                .value_store_path
                .as_ref()
                .map(|path| ValueStore::load(path.clone()))
                .transpose()?;
            let entered: HashMap<String, String> = set.into_iter().collect();
            let mut overrides = store
                .as_ref()
                .map(|s| s.values_for(&key))
                .unwrap_or_default();
            overrides.extend(entered.clone());

            let firms = match (firm, all_firms) {
                (Some(name), _) => FirmSelection::Single(name),
                (None, true) => FirmSelection::All,
                (None, false) => FirmSelection::None,
            };
            let request = GenerationRequest {
                work_id: work,
                firms,
                overrides,
                now: None,
            };

            let report = DocumentGenerator::new(&source, &config).generate(&document, &request)?;
            save_document(&report.document, &out)?;

            if let Some(store) = store.as_mut() {
                store.remember(&key, &entered);
                store.save()?;
            }

            println!(
                "{} {} ({} replacements)",
                "Written:".green().bold(),
                out.display(),
                report.replacements
            );
            if !report.firms_rendered.is_empty() {
                println!("{} {}", "Firms:".cyan(), report.firms_rendered.join(", "));
            }
            if !report.is_complete() {
                println!(
                    "{} {} placeholder(s) left unresolved:",
                    "WARNING:".yellow(),
                    report.unresolved.len()
                );
                for literal in &report.unresolved {
                    println!("  {}", literal.yellow());
                }
            }
        }
    }

    Ok(())
}
