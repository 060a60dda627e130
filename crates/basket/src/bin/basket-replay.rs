//! # Action Log Replay
//!
//! Applies newline-delimited JSON cart actions to an empty cart and prints
//! the resulting state.
//!
//! ## Usage
//! ```bash
//! # Read actions from stdin
//! cat actions.ndjson | cargo run -p basket --bin basket-replay
//!
//! # Read actions from a file, totals in EUR
//! cargo run -p basket --bin basket-replay -- --file actions.ndjson --currency EUR
//! ```
//!
//! ## Input Format
//! One action per line. Blank lines and lines starting with `#` are skipped.
//! ```text
//! {"type":"ADD_ITEM","payload":{"item":{"id":"mug","price":[{"currency":"USD","value":500}],"quantity":2}}}
//! {"type":"UPDATE_ITEM","payload":{"id":"mug","patch":{"quantity":3}}}
//! {"type":"REMOVE_ITEM","payload":{"id":"mug"}}
//! ```

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use basket::{init_tracing, CartAction, CartConfig, CartProvider, CartStorage, MemoryStorage};
use tracing::info;

#[derive(Debug, Default)]
struct Args {
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    currency: Option<String>,
}

fn print_help() {
    println!("Basket Action Log Replay");
    println!();
    println!("Usage: basket-replay [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -f, --file <PATH>       Read actions from PATH instead of stdin");
    println!("  -c, --config <PATH>     Config file (default: platform config dir)");
    println!("      --currency <CODE>   Display currency, overrides config");
    println!("  -h, --help              Show this help message");
}

/// Returns `None` when help was requested.
fn parse_args(args: Vec<String>) -> Option<Args> {
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    parsed.file = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--currency" => {
                if i + 1 < args.len() {
                    parsed.currency = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => return None,
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    Some(parsed)
}

/// Dispatches every action in `reader`, stopping at the first rejected one.
///
/// Returns the number of actions applied.
async fn replay<S: CartStorage>(
    cart: &CartProvider<S>,
    reader: impl BufRead,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut applied = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let action: CartAction = serde_json::from_str(trimmed)
            .map_err(|e| format!("line {}: invalid action: {}", index + 1, e))?;

        if let Err(err) = cart.dispatch(action).await {
            let body = serde_json::to_string(&err.to_body())?;
            return Err(format!("line {}: {}", index + 1, body).into());
        }
        applied += 1;
    }

    Ok(applied)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(args) = parse_args(env::args().collect()) else {
        print_help();
        return Ok(());
    };

    init_tracing();

    let mut config = CartConfig::load(args.config)?;
    if let Some(currency) = args.currency {
        config.display_currency = currency;
        config.validate()?;
    }

    let cart = CartProvider::open(&config, MemoryStorage::new()).await?;

    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let applied = replay(&cart, reader).await?;

    info!(applied, currency = %cart.currency(), "Replay complete");
    println!("{}", serde_json::to_string_pretty(&cart.state().await)?);

    Ok(())
}
