//! PreciseMoney command line.
//!
//! Usage:
//!   precise-money parse <CODE> <AMOUNT>          - Parse one amount
//!   precise-money sum <CODE> <AMOUNT>...         - Parse and add amounts
//!   precise-money scale <CODE> <AMOUNT> <FACTOR> - Multiply under a precision scope

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use precise_money_core::{Money, PrecisionContext, with_context};
use precise_money_shared::{CurrencyRegistry, MoneyConfig, Rounding};

/// Parse and compute exact money amounts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file; defaults to `config/` and the environment
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an amount and print its canonical form
    Parse {
        /// ISO currency code
        code: String,
        /// Amount as written, e.g. "1.234,56 €"
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Parse amounts of one currency and print their total
    Sum {
        /// ISO currency code
        code: String,
        /// Amounts as written
        #[arg(required = true, allow_hyphen_values = true)]
        amounts: Vec<String>,
    },
    /// Multiply an amount by a factor
    Scale {
        /// ISO currency code
        code: String,
        /// Amount as written
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Currency-less factor, e.g. 1.0825
        #[arg(allow_hyphen_values = true)]
        factor: Decimal,
        /// Significant digits for the multiplication
        #[arg(short, long)]
        precision: Option<u32>,
        /// Rounding mode, e.g. half_even or half_up
        #[arg(short, long)]
        rounding: Option<Rounding>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<MoneyConfig> {
    let config = match path {
        Some(path) => MoneyConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => MoneyConfig::load().context("Failed to load configuration")?,
    };
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = load_config(cli.config.as_ref())?;
    let registry: CurrencyRegistry = config.registry()?;
    let context = PrecisionContext::from_config(&config.precision)?;
    debug!(
        precision = context.precision(),
        rounding = %context.rounding(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Parse { code, amount } => {
            let money = Money::parse_with(&registry, &code, &amount)?;
            Ok(format!("{money} ({})", money.as_display_string()))
        }
        Commands::Sum { code, amounts } => {
            let moneys = amounts
                .iter()
                .map(|amount| Money::parse_with(&registry, &code, amount))
                .collect::<Result<Vec<_>, _>>()?;
            let currency = registry.lookup(&code)?.currency;
            let total = Money::sum(currency, &moneys)?;
            info!(count = moneys.len(), %total, "Summed amounts");
            Ok(total.to_string())
        }
        Commands::Scale {
            code,
            amount,
            factor,
            precision,
            rounding,
        } => {
            let money = Money::parse_with(&registry, &code, &amount)?;
            let scope = PrecisionContext::new(
                precision.unwrap_or(context.precision()),
                rounding.unwrap_or(context.rounding()),
            )?;
            let scaled = with_context(scope, || money.multiply_by_scalar(factor))?;
            Ok(scaled.to_string())
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "precise_money=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = run(Cli::parse())?;
    println!("{output}");

    Ok(())
}
