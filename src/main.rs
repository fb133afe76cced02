//! serverless-prisma-bundle - Prisma client generation for serverless packages.
//!
//! This binary runs after the bundler and prepares every packaging unit's
//! Prisma client, then exits non-zero on the first failure.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match serverless_prisma_bundle::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
