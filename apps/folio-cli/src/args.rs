//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Price one order against an inventory and print the receipt as JSON
#[derive(Debug, Parser)]
#[command(name = "folio-cli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Order to price (JSON)
    #[arg(short, long)]
    pub order: PathBuf,

    /// Inventory keyed by SKU (JSON)
    #[arg(short, long)]
    pub inventory: PathBuf,

    /// Customer record with store credit (JSON)
    #[arg(short, long)]
    pub customer: Option<PathBuf>,

    /// Checkout rules (TOML)
    #[arg(long, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,
}
