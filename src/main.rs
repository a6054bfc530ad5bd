use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use reagent_inventory::{
    config::{self, AppConfig},
    models::reagent::DATE_FORMAT,
    services::{
        expiry::{days_until, ExpiryClassifier},
        ingest::{read_payloads, IngestOutcome, RecordIngestor},
        reagent_store::ReagentStore,
    },
    ui::{InventorySession, UiEvent, COLUMNS},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);
    debug!(environment = %cfg.environment, "configuration ready");

    match cli.command {
        Commands::List(args) => handle_list(&cfg, args, cli.json)?,
        Commands::Classify(args) => handle_classify(&cfg, args, cli.json)?,
        Commands::Ingest(args) => handle_ingest(&cfg, args, cli.json)?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "reagents", about = "Laboratory reagent inventory", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the reagents table
    List(ListArgs),
    /// Classify a single expiry date
    Classify(ClassifyArgs),
    /// Normalize a file of form payloads without storing anything
    Ingest(IngestArgs),
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, help = "Case-insensitive search over name and manufacturer")]
    search: Option<String>,
    #[arg(long, value_parser = parse_date_arg, help = "Reference date (YYYY-MM-DD), defaults to today in UTC")]
    today: Option<NaiveDate>,
    #[arg(long, help = "JSON file with an array of form payloads to add before rendering")]
    import: Option<PathBuf>,
}

#[derive(Args)]
struct ClassifyArgs {
    #[arg(value_parser = parse_date_arg, help = "Expiry date (YYYY-MM-DD)")]
    date: NaiveDate,
    #[arg(long, value_parser = parse_date_arg, help = "Reference date (YYYY-MM-DD), defaults to today in UTC")]
    today: Option<NaiveDate>,
}

#[derive(Args)]
struct IngestArgs {
    #[arg(help = "JSON file with an array of form payloads")]
    file: PathBuf,
    #[arg(long, action = ArgAction::SetTrue, help = "Fail on the first payload with warnings")]
    strict: bool,
}

fn handle_list(cfg: &AppConfig, args: ListArgs, json: bool) -> Result<()> {
    let today = args.today.unwrap_or_else(current_date);
    let mut session = InventorySession::from_config(cfg);

    if let Some(path) = args.import.as_deref() {
        let payloads =
            read_payloads(path).with_context(|| format!("failed to read {}", path.display()))?;
        for input in payloads {
            session
                .add(input)
                .with_context(|| format!("failed to import {}", path.display()))?;
        }
    }
    if let Some(term) = args.search {
        session.dispatch(UiEvent::SearchChanged(term))?;
    }

    let rows = session.visible_rows(today);
    if json {
        #[derive(Serialize)]
        struct ListOutput<'a> {
            today: NaiveDate,
            summary: String,
            rows: &'a [reagent_inventory::ui::ReagentRow<'a>],
        }
        return print_json(&ListOutput {
            today,
            summary: session.summary().to_string(),
            rows: &rows,
        });
    }

    println!("{}", COLUMNS.join(" | "));
    for row in &rows {
        let badge = row
            .badge
            .map(|b| format!(" [{}]", b.label))
            .unwrap_or_default();
        let mut cells = row.cells().map(str::to_string);
        cells[4].push_str(&badge);
        println!("{}", cells.join(" | "));
    }
    println!("{}", session.summary());
    Ok(())
}

fn handle_classify(cfg: &AppConfig, args: ClassifyArgs, json: bool) -> Result<()> {
    let today = args.today.unwrap_or_else(current_date);
    let classifier = ExpiryClassifier::new(cfg.expiring_soon_days);
    let status = classifier.classify(args.date, today);

    if json {
        #[derive(Serialize)]
        struct ClassifyOutput {
            date: NaiveDate,
            today: NaiveDate,
            days_until: i64,
            status: String,
        }
        return print_json(&ClassifyOutput {
            date: args.date,
            today,
            days_until: days_until(args.date, today),
            status: status.to_string(),
        });
    }

    match status.badge() {
        Some(badge) => println!("{} ({})", status, badge.label),
        None => println!("{}", status),
    }
    Ok(())
}

fn handle_ingest(cfg: &AppConfig, args: IngestArgs, json: bool) -> Result<()> {
    let ingestor = RecordIngestor::new();
    let mut store = ReagentStore::with_policy(cfg.id_policy);
    let mut outcomes: Vec<IngestOutcome> = Vec::new();

    let payloads = read_payloads(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    for (index, input) in payloads.iter().enumerate() {
        let outcome = if args.strict {
            let record = ingestor
                .ingest_into_strict(&mut store, input)
                .with_context(|| format!("payload #{} rejected", index + 1))?;
            IngestOutcome {
                record,
                warnings: Vec::new(),
            }
        } else {
            ingestor.ingest_into(&mut store, input)
        };
        outcomes.push(outcome);
    }

    if json {
        return print_json(&outcomes);
    }

    for outcome in &outcomes {
        let record = &outcome.record;
        println!(
            "- #{} {} • {} {} • expires {}",
            record.id, record.name, record.quantity, record.unit, record.expiry_date
        );
        for warning in &outcome.warnings {
            println!("    warning: {}", warning);
        }
    }
    println!("{} record(s) normalized", outcomes.len());
    Ok(())
}

fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| format!("invalid date '{raw}'"))
}
