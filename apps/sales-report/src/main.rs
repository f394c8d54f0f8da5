//! # Sales Report
//!
//! Command-line caller for sales-core.
//!
//! ## Usage
//! ```bash
//! # Print the report as JSON
//! cargo run -p sales-report -- data/dataset.json
//!
//! # Print a table, pricing lines from the catalog
//! SALES_REPORT_PRICE_SOURCE=catalog cargo run -p sales-report -- data/dataset.json --format table
//!
//! # More logging
//! RUST_LOG=debug cargo run -p sales-report -- data/dataset.json
//! ```
//!
//! ## Run Sequence
//! 1. Initialize tracing (stderr, so stdout stays machine-readable)
//! 2. Parse arguments, load configuration
//! 3. Read and validate the dataset file
//! 4. Compute the report with sales-core
//! 5. Print it

mod config;
mod output;

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use sales_core::validation::{dataset_from_value, discount_violations};
use sales_core::{analyze_sales_data, AnalysisOptions, Money};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{OutputFormat, ReportConfig};

const USAGE: &str = "\
Usage: sales-report <DATASET.json> [OPTIONS]

Options:
  -f, --format <json|table>  Output format (default: json)
  -h, --help                 Show this help message

Environment:
  SALES_REPORT_CONFIG        TOML config file
  SALES_REPORT_PRICE_SOURCE  line_item | catalog
  SALES_REPORT_STRICT        warn on discounts outside 0-100
  SALES_REPORT_FORMAT        json | table
  RUST_LOG                   log filter (default: info)";

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct CliArgs {
    dataset: PathBuf,
    format: Option<OutputFormat>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let Some(args) = parse_args(env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let mut config = ReportConfig::load().context("Failed to load configuration")?;
    if let Some(format) = args.format {
        config.format = format;
    }
    info!(
        dataset = %args.dataset.display(),
        price_source = %config.price_source,
        strict = config.strict,
        format = %config.format,
        "Configuration loaded"
    );

    let contents = std::fs::read_to_string(&args.dataset)
        .with_context(|| format!("Failed to read {}", args.dataset.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", args.dataset.display()))?;
    let dataset = dataset_from_value(&value)?;
    info!(
        sellers = dataset.sellers.len(),
        products = dataset.products.len(),
        purchase_records = dataset.purchase_records.len(),
        "Dataset loaded"
    );

    if config.strict {
        for violation in discount_violations(&dataset) {
            warn!(%violation, "Discount outside 0-100 will be applied as is");
        }
    }

    let options = AnalysisOptions::new().with_revenue(config.price_source);
    let report = analyze_sales_data(&dataset, &options).context("Failed to compute report")?;

    for (rank, seller) in report.iter().enumerate() {
        debug!(
            rank,
            seller_id = %seller.seller_id,
            profit = %seller.profit,
            bonus = %seller.bonus,
            "Ranked seller"
        );
    }
    let total_revenue: Money = report.iter().map(|s| s.revenue).sum();
    let total_bonus: Money = report.iter().map(|s| s.bonus).sum();
    info!(%total_revenue, %total_bonus, "Report computed");

    println!("{}", output::render(&report, config.format)?);
    Ok(())
}

/// Returns `None` when help was requested.
fn parse_args<I>(args: I) -> anyhow::Result<Option<CliArgs>>
where
    I: IntoIterator<Item = String>,
{
    let mut dataset = None;
    let mut format = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-f" | "--format" => {
                let value = args.next().context("--format needs a value")?;
                let parsed = value.parse::<OutputFormat>().map_err(|_| {
                    anyhow!("Invalid value for --format: {value} (expected json or table)")
                })?;
                format = Some(parsed);
            }
            flag if flag.starts_with('-') => bail!("Unknown option {flag}\n\n{USAGE}"),
            path => {
                if dataset.is_some() {
                    bail!("Only one dataset file can be given\n\n{USAGE}");
                }
                dataset = Some(PathBuf::from(path));
            }
        }
    }

    let dataset = dataset.with_context(|| format!("Missing dataset file\n\n{USAGE}"))?;
    Ok(Some(CliArgs { dataset, format }))
}

/// Initializes tracing on stderr.
///
/// ## Log Levels
/// - Set `RUST_LOG` environment variable to control
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(args(&["data.json", "--format", "table"])).unwrap();
        assert_eq!(
            parsed,
            Some(CliArgs {
                dataset: PathBuf::from("data.json"),
                format: Some(OutputFormat::Table),
            })
        );

        let parsed = parse_args(args(&["data.json"])).unwrap().unwrap();
        assert_eq!(parsed.format, None);
    }

    #[test]
    fn test_parse_args_help() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), None);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a.json", "b.json"])).is_err());
        assert!(parse_args(args(&["a.json", "--verbose"])).is_err());
        assert!(parse_args(args(&["a.json", "--format"])).is_err());
        assert!(parse_args(args(&["a.json", "--format", "xml"])).is_err());
    }

    #[test]
    fn test_bad_format_flag_names_the_flag() {
        let err = parse_args(args(&["a.json", "--format", "xml"])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("--format"), "{message}");
        assert!(message.contains("xml"), "{message}");
        assert!(!message.contains("SALES_REPORT_FORMAT"), "{message}");
    }
}
