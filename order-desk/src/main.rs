use anyhow::Context;
use order_desk::{Config, init_logger_with_file, process_file, render};

fn main() -> anyhow::Result<()> {
    // 1. Environment (.env) and configuration
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. Logging
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );

    // 3. Input path: first argument, then ORDER_INPUT
    let path = std::env::args()
        .nth(1)
        .or_else(|| config.input_path.clone())
        .context("usage: order-desk <order.json> (or set ORDER_INPUT)")?;

    tracing::info!(path = %path, environment = %config.environment, "Processing order document");

    // 4. Price and print
    let response = process_file(&path)?;
    println!("{}", render(&response, config.pretty_output)?);

    if !response.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
