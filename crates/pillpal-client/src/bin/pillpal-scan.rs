//! Parse recognized label text and optionally submit it for enrichment.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pillpal_client::{ClientConfig, EnrichmentClient};
use pillpal_core::{LabelParser, ReferenceTables};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "pillpal_scan=info,pillpal_client=info,pillpal_core=info";

#[derive(Parser)]
#[command(name = "pillpal-scan")]
#[command(about = "Extract medications from recognized label text")]
struct Args {
    /// Text file to parse (stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Reference tables JSON (drug_suffixes, excluded_words)
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Send the result to the enrichment backend
    #[arg(long)]
    submit: bool,

    /// Backend base URL (overrides PILLPAL_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let tables = match &args.tables {
        Some(path) => ReferenceTables::from_path(path)
            .with_context(|| format!("failed to load tables from {}", path.display()))?,
        None => ReferenceTables::new(),
    };

    let text = read_input(args.input.as_ref())?;
    let scan = LabelParser::with_tables(tables).parse(Some(&text));
    tracing::info!(found = scan.medications.len(), "parsed label text");

    if !args.submit {
        return print_json(&scan, args.pretty);
    }

    let config = match &args.base_url {
        Some(url) => ClientConfig {
            timeout_secs: ClientConfig::from_env().timeout_secs,
            ..ClientConfig::new(url)
        },
        None => ClientConfig::from_env(),
    };
    let client = EnrichmentClient::new(config).context("failed to build HTTP client")?;
    let response = client
        .submit_scan(&scan)
        .await
        .context("enrichment request failed")?;

    print_json(&response, args.pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_binary_events() {
        let target = module_path!().split("::").next().unwrap();
        assert!(DEFAULT_LOG_FILTER
            .split(',')
            .any(|directive| directive == format!("{}=info", target)));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["pillpal-scan", "label.txt", "--submit", "--pretty"]);
        assert_eq!(args.input, Some(PathBuf::from("label.txt")));
        assert!(args.submit);
        assert!(args.pretty);
        assert!(args.tables.is_none());
    }
}
