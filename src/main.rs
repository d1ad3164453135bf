//! nbn-analyzer - Nifty/BankNifty market data and analytics from the command line
//!
//! Fetches live data from NSE and prints it or dumps it under
//! `output/<operation>/<timestamp>.json`, and computes expiry dates, pivot
//! levels and Black-Scholes greeks.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use nbn_analyzer::analytics::{Ohlc, OptionParams, PivotMethod};
use nbn_analyzer::commands::{NBNCommands, greeks_time};
use nbn_analyzer::models::IndexName;
use nbn_analyzer::output::{OutputFormat, OutputWriter, write_banner};
use nbn_analyzer::{NSEClient, config, logging};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "nbn-analyzer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Where results go: stdout or timestamped JSON files
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Std)]
    format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    json: bool,

    /// Index to report on
    #[arg(short, long, global = true, value_enum, default_value_t = IndexName::Nifty)]
    index: IndexName,

    /// Root directory for JSON output (overrides NBN_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capital market status and last index value
    NiftyOverview,

    /// Status of every market segment
    MarketOverview,

    /// Index option chain, optionally limited to the strikes around the money
    OptionChain {
        /// Keep the 2 x LIMIT strikes nearest the underlying (1-100)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Option chain limited to 5 strikes either side
    TopFno,

    /// Snapshot quote of the selected index
    #[command(alias = "nifty-details")]
    IndexDetails,

    /// Snapshot of all indices
    AllIndices,

    /// Equity derivative turnover
    DerivativeTurnover,

    /// Live index constituents
    LiveData,

    /// Live data for securities in F&O
    LiveFno,

    /// Market turnover
    MarketTurnover,

    /// Open/high/low/close of the selected index
    Ohlc,

    /// Pivot support and resistance levels
    #[command(alias = "pivot")]
    SupportResistance {
        /// Single method (classic, woodie, camarilla, demark, fibonacci)
        #[arg(short, long)]
        method: Option<PivotMethod>,

        /// Use this bar instead of the live index bar (requires all four)
        #[arg(long, requires_all = ["high", "low", "close"])]
        open: Option<f64>,

        #[arg(long, requires_all = ["open", "low", "close"])]
        high: Option<f64>,

        #[arg(long, requires_all = ["open", "high", "close"])]
        low: Option<f64>,

        #[arg(long, requires_all = ["open", "high", "low"])]
        close: Option<f64>,
    },

    /// Next weekly and monthly expiry
    Expiry {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Black-Scholes greeks for a call and a put
    Greeks {
        #[arg(long)]
        spot: f64,

        #[arg(long)]
        strike: f64,

        /// Implied volatility as a fraction (0.15 for 15%)
        #[arg(long)]
        iv: f64,

        /// Calendar days to expiry
        #[arg(long, conflicts_with = "expiry")]
        days: Option<f64>,

        /// Expiry date (YYYY-MM-DD), defaults to the next weekly expiry
        #[arg(long)]
        expiry: Option<NaiveDate>,

        /// Annualized risk-free rate (overrides NBN_RISK_FREE_RATE)
        #[arg(long)]
        rate: Option<f64>,

        /// Annualized dividend yield
        #[arg(long, default_value_t = 0.0)]
        dividend: f64,
    },
}

fn print_banner(title: &str) {
    // best effort
    let _ = write_banner(std::io::stderr(), title);
}

fn greeks_params(
    spot: f64,
    strike: f64,
    iv: f64,
    days: Option<f64>,
    expiry: Option<NaiveDate>,
    rate: Option<f64>,
    dividend: f64,
) -> OptionParams {
    let today = Local::now().date_naive();
    let time = greeks_time(today, days, expiry);
    let rate = rate.unwrap_or_else(config::get_risk_free_rate);

    OptionParams::new(spot, strike, time, rate, iv).with_dividend(dividend)
}

async fn run(cli: Cli) -> Result<()> {
    let format = if cli.json { OutputFormat::Json } else { cli.format };
    let writer = match cli.output_dir {
        Some(dir) => OutputWriter::new(format, dir, config::get_json_indent()),
        None => OutputWriter::from_env(format),
    };
    let commands = NBNCommands::new(NSEClient::new()?, writer, cli.index);

    match cli.command {
        Commands::NiftyOverview => {
            print_banner("Nifty Overview");
            commands.nifty_overview().await?;
        }
        Commands::MarketOverview => {
            print_banner("Market Overview");
            commands.market_overview().await?;
        }
        Commands::OptionChain { limit } => {
            print_banner("Option Chain");
            commands.option_chain(limit).await?;
        }
        Commands::TopFno => {
            print_banner("Top F&O Strikes");
            commands.top_fno().await?;
        }
        Commands::IndexDetails => {
            print_banner("Index Details");
            commands.index_details().await?;
        }
        Commands::AllIndices => {
            print_banner("All Indices");
            commands.all_indices().await?;
        }
        Commands::DerivativeTurnover => {
            print_banner("Derivative Turnover");
            commands.derivative_turnover().await?;
        }
        Commands::LiveData => {
            print_banner("Live Index Data");
            commands.live_data().await?;
        }
        Commands::LiveFno => {
            print_banner("Live F&O Data");
            commands.live_fno().await?;
        }
        Commands::MarketTurnover => {
            print_banner("Market Turnover");
            commands.market_turnover().await?;
        }
        Commands::Ohlc => {
            print_banner("OHLC");
            commands.ohlc().await?;
        }
        Commands::SupportResistance { method, open, high, low, close } => {
            print_banner("Support & Resistance");
            let ohlc = match (open, high, low, close) {
                (Some(o), Some(h), Some(l), Some(c)) => Some(Ohlc::new(o, h, l, c)),
                _ => None,
            };
            commands.support_resistance(method, ohlc).await?;
        }
        Commands::Expiry { date } => {
            print_banner("Expiry");
            commands.expiry(date)?;
        }
        Commands::Greeks { spot, strike, iv, days, expiry, rate, dividend } => {
            print_banner("Option Greeks");
            let params = greeks_params(spot, strike, iv, days, expiry, rate, dividend);
            commands.greeks(params)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging().context("Failed to initialise logging")?;

    if let Err(e) = run(cli).await {
        error!(error = %e, "command failed");
        eprintln!("{} {:#}", "✗".red(), e);
        std::process::exit(1);
    }

    Ok(())
}
