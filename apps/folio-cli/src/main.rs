//! # Folio Checkout CLI
//!
//! Runs one checkout against files on disk.
//!
//! ## Usage
//! ```bash
//! # Standard rules
//! cargo run -p folio-cli -- --order order.json --inventory inventory.json
//!
//! # Store-credit payment with custom rules
//! FOLIO_CONFIG=./checkout.toml cargo run -p folio-cli -- \
//!     -o order.json -i inventory.json -c customer.json
//!
//! # Verbose pipeline logs
//! RUST_LOG=folio_core=debug cargo run -p folio-cli -- -o order.json -i inventory.json
//! ```
//!
//! ## Output
//! ```text
//! stdout ◄── {"receipt": {...}, "inventory": {...}, "customer": {...}}
//! stderr ◄── tracing logs, error message on failure (exit code 1)
//! ```
//!
//! The printed inventory and customer are the state after the checkout;
//! the input files are never rewritten.

mod args;

use clap::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use args::Cli;
use folio_core::{Checkout, CheckoutConfig, Customer, Inventory, Order, Receipt};

/// File-level failures, carrying the path that caused them.
#[derive(Debug, Error)]
enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
struct Output<'a> {
    receipt: &'a Receipt,
    inventory: &'a Inventory,
    customer: Option<&'a Customer>,
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Checkout failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let checkout = match &args.config {
        Some(path) => {
            let text = read(path)?;
            let config = CheckoutConfig::from_toml_str(&text)?;
            info!(path = %path.display(), "Checkout config loaded");
            Checkout::new(config)
        }
        None => Checkout::default(),
    };

    let order: Order = load_json(&args.order)?;
    let mut inventory: Inventory = load_json(&args.inventory)?;
    let mut customer: Option<Customer> = args
        .customer
        .as_deref()
        .map(load_json::<Customer>)
        .transpose()?;
    debug!(
        lines = order.lines.len(),
        skus = inventory.len(),
        customer = customer.is_some(),
        "Inputs loaded"
    );

    let receipt = checkout.run(&order, &mut inventory, customer.as_mut())?;

    let output = Output {
        receipt: &receipt,
        inventory: &inventory,
        customer: customer.as_ref(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Logs go to stderr so stdout carries only the JSON document.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,folio=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: &str = include_str!("../demos/order.json");
    const INVENTORY: &str = include_str!("../demos/inventory.json");
    const CUSTOMER: &str = include_str!("../demos/customer.json");
    const CONFIG: &str = include_str!("../demos/checkout.toml");

    #[test]
    fn test_demo_config_matches_defaults() {
        let config = CheckoutConfig::from_toml_str(CONFIG).unwrap();
        assert_eq!(config, CheckoutConfig::default());
    }

    #[test]
    fn test_demo_checkout_output() {
        let order: Order = serde_json::from_str(ORDER).unwrap();
        let mut inventory: Inventory = serde_json::from_str(INVENTORY).unwrap();
        let mut customer: Customer = serde_json::from_str(CUSTOMER).unwrap();

        let checkout = Checkout::new(CheckoutConfig::from_toml_str(CONFIG).unwrap());
        let receipt = checkout
            .run(&order, &mut inventory, Some(&mut customer))
            .unwrap();

        let output = serde_json::to_value(Output {
            receipt: &receipt,
            inventory: &inventory,
            customer: Some(&customer),
        })
        .unwrap();

        assert_eq!(output["receipt"]["total"], "106.12");
        assert_eq!(output["receipt"]["shipping_cost"], "15.00");
        assert_eq!(output["customer"]["store_credit"], "93.88");
        assert_eq!(output["inventory"]["ST1"]["stock"], 88);
        assert!(output["inventory"]["DG1"].get("stock").is_none());
    }

    #[test]
    fn test_load_error_names_file() {
        let err = load_json::<Order>(Path::new("/nonexistent/order.json")).unwrap_err();
        assert!(err.to_string().starts_with("cannot read /nonexistent/order.json"));
    }
}
