use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use macrolens::config::StoreBackend;
use macrolens::logging;
use macrolens::models::indicators::{IndicatorKey, IndicatorSnapshot};
use macrolens::report;
use macrolens::services::indicators::{load_snapshot, save_snapshot};
use macrolens::signals::engine::SignalEngine;
use macrolens::store::open_store;
use tracing::info;

/// Macro dashboard: stored indicators in, favored/unfavored asset signals out.
#[derive(Debug, Parser)]
#[command(name = "macrolens", version)]
struct Cli {
    /// Store backend: memory, sheet or questdb
    #[arg(long, env = "INDICATOR_STORE", global = true)]
    store: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate the stored indicators and print the signal table (default)
    Show,
    /// Update indicators (KEY=VALUE ...) and save the full snapshot
    Set {
        #[arg(value_parser = parse_assignment, required = true)]
        assignments: Vec<(IndicatorKey, f64)>,
    },
    /// Print the historical reference table
    Reference,
    /// List indicator keys with their labels and defaults
    Keys,
}

fn parse_assignment(s: &str) -> Result<(IndicatorKey, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key: IndicatorKey = key.trim().parse().map_err(|e| format!("{}", e))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((key, value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let backend = match cli.store.as_deref() {
        Some(name) => StoreBackend::parse(name)?,
        None => StoreBackend::from_env()?,
    };

    match cli.command.unwrap_or(Command::Show) {
        Command::Show => {
            let store = open_store(&backend).await?;
            let snapshot = load_snapshot(store.as_ref()).await?;
            print_evaluation(&snapshot, cli.json)?;
        }
        Command::Set { assignments } => {
            let store = open_store(&backend).await?;
            let snapshot = assignments
                .into_iter()
                .fold(load_snapshot(store.as_ref()).await?, |s, (key, value)| {
                    s.with(key, value)
                });
            save_snapshot(store.as_ref(), &snapshot).await?;
            info!(store = %backend, "indicators saved");
            print_evaluation(&snapshot, cli.json)?;
        }
        Command::Reference => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&macrolens::signals::HISTORICAL_REFERENCE)?
                );
            } else {
                print!("{}", report::reference_table());
            }
        }
        Command::Keys => {
            for key in IndicatorKey::ALL {
                println!("{:<10} {:<24} default {}", key.as_str(), key.label(), key.default_value());
            }
        }
    }

    Ok(())
}

fn print_evaluation(
    snapshot: &IndicatorSnapshot,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let evaluation = SignalEngine::evaluate_with_snapshot(snapshot);
    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    println!("Indicators:");
    for (key, value) in snapshot.entries() {
        println!("  {:<24} {}", key.label(), value);
    }
    println!();
    println!("Signals now:");
    print!("{}", report::signals_table(&evaluation.signals));
    Ok(())
}
