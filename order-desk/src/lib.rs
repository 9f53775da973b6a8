//! Order desk - command-line runner for the sale order pricing core
//!
//! Reads an order document, prices every line, applies the requested status
//! change and prints the order API submission body in a response envelope.
//!
//! ```text
//! order-desk/src/
//! ├── config.rs   # environment configuration
//! ├── logger.rs   # tracing setup
//! └── desk.rs     # document parsing and processing
//! ```

pub mod config;
pub mod desk;
pub mod logger;

pub use config::Config;
pub use desk::{OrderDocument, OrderReport, process_document, respond};
pub use logger::{init_logger, init_logger_with_file};

use anyhow::Context;
use order_core::error::{ApiResponse, AppError};
use serde::Serialize;
use std::path::Path;

/// Read and process the document at `path`
///
/// I/O failures are returned as errors; document problems are reported
/// inside the envelope.
pub fn process_file(path: impl AsRef<Path>) -> anyhow::Result<ApiResponse<OrderReport>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(respond(&raw))
}

/// Serialize a response envelope for stdout
pub fn render<T: Serialize>(response: &ApiResponse<T>, pretty: bool) -> Result<String, AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };
    rendered.map_err(|e| AppError::internal(format!("failed to serialize response: {}", e)))
}
