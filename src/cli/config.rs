use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "microsys-autofill",
    version,
    about = "Seed creation forms from earlier records of the same model"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the application server
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Value of the `sessionid` cookie of a logged-in user
    #[arg(long, global = true)]
    pub session_cookie: Option<String>,

    /// Path of the JSON state store file
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Append resolver decisions to this JSONL file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: microsys-autofill.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the page-load handler on a page snapshot
    Load {
        /// Page snapshot JSON file
        #[arg(long)]
        page: String,

        /// Where to write the updated snapshot (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the submit handler for a page snapshot
    Submit {
        /// Page snapshot JSON file
        #[arg(long)]
        page: String,
    },

    /// Switch autofill on or off for a page snapshot
    Toggle {
        /// Page snapshot JSON file
        #[arg(long)]
        page: String,

        /// New preference
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: bool,

        /// Where to write the updated snapshot (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the newest record of a model
    LastEntry {
        /// Application label
        #[arg(long)]
        app: String,

        /// Model name
        #[arg(long)]
        model: String,

        /// Only consider records with a primary key below this one
        #[arg(long)]
        before_id: Option<String>,
    },

    /// Print one record of a model
    Details {
        /// Application label
        #[arg(long)]
        app: String,

        /// Model name
        #[arg(long)]
        model: String,

        /// Primary key
        #[arg(long)]
        pk: String,
    },

    /// Forget session-scoped state (the submit marker)
    EndSession,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `microsys-autofill.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    pub session_cookie: Option<String>,

    /// Request timeout; absent means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_base_url() -> String { "http://localhost:8000".to_string() }
fn default_store_path() -> String { ".microsys-autofill/state.json".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("microsys-autofill.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings (merge CLI args with config file)
// ============================================================================

/// Effective settings after applying CLI overrides to the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub session_cookie: Option<String>,
    pub timeout: Option<Duration>,
    pub store_path: String,
    pub trace_path: Option<String>,
}

/// CLI flags win over the config file, which wins over defaults.
pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Settings {
    Settings {
        base_url: cli
            .base_url
            .clone()
            .unwrap_or_else(|| config.api.base_url.clone()),
        session_cookie: cli
            .session_cookie
            .clone()
            .or_else(|| config.api.session_cookie.clone()),
        timeout: config.api.timeout_secs.map(Duration::from_secs),
        store_path: cli
            .store
            .clone()
            .unwrap_or_else(|| config.store.path.clone()),
        trace_path: cli.trace.clone().or_else(|| config.trace.path.clone()),
    }
}

/// `RUST_LOG`-style filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
