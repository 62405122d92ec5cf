// ABOUTME: Refreshes the local exercise catalog from the JEFit progress-history flight stream
// ABOUTME: Prints totals for system and custom exercises and exits non-zero on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Catalog Refresh
//!
//! Run manually when exercises were added in JEFit; the server otherwise
//! only fetches the catalog when the file is missing.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use jefit_mcp_server::{
    catalog::ExerciseCatalog, config::ServerConfig, constants::service_names,
    jefit::JefitClient, logging::LoggingConfig,
};
use tracing::error;

#[derive(Parser)]
#[command(name = "update-exercise-db")]
#[command(about = "Refresh the JEFit exercise catalog file")]
pub struct Args {
    /// Catalog file to write (overrides EXERCISE_DB_PATH)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    LoggingConfig::for_service(service_names::UPDATE_EXERCISE_DB).init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(output) = args.output {
        config.catalog.path = output;
    }

    let client = JefitClient::from_config(&config);
    let catalog = ExerciseCatalog::from_config(&config);

    println!("Fetching exercise database from JEFit...");
    match catalog.refresh(&client).await {
        Ok(stats) => {
            println!("Successfully updated {}", catalog.path().display());
            println!("Total exercises: {}", stats.total);
            println!("  - System exercises: {}", stats.system);
            println!("  - Custom exercises: {}", stats.custom);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Error updating exercise database: {e}");
            eprintln!("Error updating exercise database: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
