//! Cart CLI - drive the pixel cart from a terminal.
//!
//! Commands:
//! - `cart add` - Add one unit of a product
//! - `cart remove` - Remove a product
//! - `cart show` - Print the cart table
//! - `cart count` - Print the distinct-product count
//! - `cart checkout` - Report checkout initiation
//! - `cart purchase` - Report the purchase and empty the cart
//! - `cart config` - Manage configuration
//!
//! The cart is persisted in a directory store between invocations, and
//! pixel events are written as JSON lines.

mod commands;
mod config;
mod context;
mod output;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ConfigArgs, RemoveArgs};

/// Cart CLI - Manage a persisted shopping cart and its pixel events
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Show the cart table
    Show,

    /// Print the number of distinct products in the cart
    Count,

    /// Initiate checkout
    Checkout,

    /// Complete the purchase and empty the cart
    Purchase,

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Show => commands::cart::show(&ctx),
        Commands::Count => commands::cart::count(&ctx),
        Commands::Checkout => commands::checkout::checkout(&ctx),
        Commands::Purchase => commands::checkout::purchase(&ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
