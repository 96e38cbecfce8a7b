//! `addons` - check product addon submissions from the command line.
//!
//! Commands:
//! - `addons check --addons <file> --submission <file>`: validate and print
//!   cart item data as JSON
//! - `addons upload-dir <customer-id>`: print a customer's upload directory
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error
//! - 2: The submission failed validation or its upload failed

use clap::Parser;
use product_addons::check::{load_config, run_check, upload_dir_for, CheckOptions};
use product_addons::{Cli, Commands, VALIDATION_FAILED_EXIT_CODE};
use product_addons_fields::PriceContext;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("product_addons=debug,product_addons_fields=debug,product_addons_config=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            addons,
            submission,
            customer_id,
            quantity,
            base_amount,
            dry_run,
        } => {
            let options = CheckOptions {
                addons,
                submission,
                customer_id,
                pricing: PriceContext::new(quantity, base_amount),
                dry_run,
            };
            match run_check(&config, &options)? {
                Ok(records) => {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                    Ok(0)
                }
                Err(errors) => {
                    for error in errors.errors() {
                        eprintln!("{error}");
                    }
                    Ok(VALIDATION_FAILED_EXIT_CODE)
                }
            }
        }
        Commands::UploadDir { customer_id } => {
            let dir = upload_dir_for(&config, &customer_id);
            println!("{}", serde_json::to_string_pretty(&dir)?);
            Ok(0)
        }
    }
}
