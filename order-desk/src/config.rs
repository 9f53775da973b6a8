/// Desk runner configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first by the binary):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | LOG_LEVEL | info | tracing level, overridden by `RUST_LOG` |
/// | LOG_JSON | false | emit JSON log lines |
/// | LOG_DIR | - | daily rolling log files in this directory |
/// | ORDER_INPUT | - | order document path when no argument is given |
/// | PRETTY_OUTPUT | true | pretty-print the response envelope |
/// | ENVIRONMENT | development | runtime environment |
///
/// # Example
///
/// ```ignore
/// LOG_LEVEL=debug PRETTY_OUTPUT=false order-desk order.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_json: bool,
    /// Directory for rolling log files; console logging when unset
    pub log_dir: Option<String>,
    pub input_path: Option<String>,
    pub pretty_output: bool,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: lookup("LOG_DIR").filter(|v| !v.is_empty()),
            input_path: lookup("ORDER_INPUT").filter(|v| !v.is_empty()),
            pretty_output: lookup("PRETTY_OUTPUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
