//! SmartCart CLI - Headless shopping sessions from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the starter cart and its totals
//! smartcart cart
//!
//! # Add one unit of product 6 and remove product 3 first
//! smartcart cart --add 6 --remove 3
//!
//! # Run a full timed checkout and print the status trail
//! smartcart checkout --method mobile-pay
//!
//! # Scan a shelf and add the recognised product to the cart
//! smartcart scan --add
//!
//! # Featured deals and suggestions
//! smartcart deals
//!
//! # Store map: pick an aisle, or find where something is stocked
//! smartcart map --aisle 2
//! smartcart map --locate vegetables
//!
//! # Product search, typed or by voice
//! smartcart search milk
//! smartcart search --voice
//! ```
//!
//! Every command accepts `--json` for machine-readable output.
//!
//! # Environment Variables
//!
//! - `SMARTCART_TAX_RATE`, `SMARTCART_SAVINGS`, `SMARTCART_CURRENCY` - Pricing
//! - `SMARTCART_*_DELAY_MS` - Simulated latencies
//! - `SENTRY_DSN` - Enables error reporting
//! - `RUST_LOG` - Log filter (logs go to stderr)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use smartcart_companion::CompanionConfig;
use smartcart_core::PaymentMethod;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Output;

#[derive(Parser)]
#[command(name = "smartcart")]
#[command(author, version, about = "SmartCart shopping companion")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart with subtotal, tax, savings and total
    Cart {
        /// Add one unit of a product by ID (repeatable)
        #[arg(short, long)]
        add: Vec<i32>,

        /// Remove a product line by ID (repeatable)
        #[arg(short, long)]
        remove: Vec<i32>,
    },
    /// Pay for the starter cart and follow the checkout to completion
    Checkout {
        /// Payment method (`card`, `mobile-pay`, `qr-code`)
        #[arg(short, long, default_value = "card")]
        method: PaymentMethod,
    },
    /// Scan a shelf with the AR scanner
    Scan {
        /// Add the recognised product to the cart
        #[arg(short, long)]
        add: bool,
    },
    /// Show featured deals and suggestions
    Deals,
    /// Show the store map
    Map {
        /// Select an aisle as the destination
        #[arg(short, long)]
        aisle: Option<i32>,

        /// Find aisles stocking an item
        #[arg(short, long)]
        locate: Option<String>,
    },
    /// Search the catalog
    Search {
        /// Search text
        #[arg(required_unless_present = "voice")]
        query: Option<String>,

        /// Dictate the query instead of typing it
        #[arg(long, conflicts_with = "query")]
        voice: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CompanionConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Map tracing levels to Sentry: errors and warnings become events, info and
/// debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Sentry needs the DSN before the subscriber is installed
    let config = CompanionConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr so stdout stays parseable with --json
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "smartcart_cli=info,smartcart_companion=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: CompanionConfig) -> Result<(), Box<dyn std::error::Error>> {
    let output = if cli.json { Output::Json } else { Output::Text };

    match cli.command {
        Commands::Cart { add, remove } => commands::cart::show(config, &add, &remove, output)?,
        Commands::Checkout { method } => commands::checkout::run(config, method, output).await?,
        Commands::Scan { add } => commands::scan::run(config, add, output).await?,
        Commands::Deals => commands::deals::show(&config, output)?,
        Commands::Map { aisle, locate } => {
            commands::map::show(aisle, locate.as_deref(), output)?;
        }
        Commands::Search { query, voice } => {
            commands::search::run(config, query, voice, output).await?;
        }
    }
    Ok(())
}
