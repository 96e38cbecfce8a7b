//! CLI definition for the `addons` command.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Check product addon submissions against their definitions
#[derive(Parser, Debug)]
#[command(name = "addons")]
#[command(version)]
#[command(about = "Validate product addon submissions and print cart item data")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file (defaults to product-addons.* in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a submission and print the resulting cart item data as JSON
    Check {
        /// YAML or JSON file with a list of addon definitions
        #[arg(long)]
        addons: PathBuf,
        /// JSON file mapping field names to {"value": ..., "file": "path"}
        #[arg(long)]
        submission: PathBuf,
        /// Customer identifier used for the upload directory
        #[arg(long, default_value = "guest")]
        customer_id: String,
        /// Line item quantity
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,
        /// Line item price before addons
        #[arg(long, default_value_t = 0.0)]
        base_amount: f64,
        /// Validate and price without storing uploads
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the upload directory a customer's files are stored in
    UploadDir {
        /// Customer identifier
        customer_id: String,
    },
}
