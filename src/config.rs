//! Environment-driven configuration.
//!
//! Values come from the process environment; binaries call
//! `dotenvy::dotenv()` first so a local `.env` file is honoured.

use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SHEET_PATH: &str = "macro_dashboard.csv";
pub const DEFAULT_QUESTDB_URL: &str = "host=localhost port=8812 user=admin password=quest dbname=qdb";

/// Deployment environment name (`production`, `prod`, `sandbox`, ...).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn get_questdb_url() -> String {
    env::var("QUESTDB_URL").unwrap_or_else(|_| DEFAULT_QUESTDB_URL.to_string())
}

pub fn get_sheet_path() -> PathBuf {
    env::var("SHEET_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SHEET_PATH))
}

/// Which value store backs the indicator snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory,
    Sheet(PathBuf),
    QuestDb(String),
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Sheet(path) => write!(f, "sheet ({})", path.display()),
            StoreBackend::QuestDb(_) => write!(f, "questdb"),
        }
    }
}

impl StoreBackend {
    /// Resolve a backend name as written in `INDICATOR_STORE`.
    pub fn parse(name: &str) -> Result<Self, String> {
        match name.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "sheet" | "csv" => Ok(StoreBackend::Sheet(get_sheet_path())),
            "questdb" => Ok(StoreBackend::QuestDb(get_questdb_url())),
            other => Err(format!(
                "unknown INDICATOR_STORE '{}': expected memory, sheet or questdb",
                other
            )),
        }
    }

    /// Backend selected by the environment; defaults to the sheet store.
    pub fn from_env() -> Result<Self, String> {
        match env::var("INDICATOR_STORE") {
            Ok(name) => Self::parse(&name),
            Err(_) => Ok(StoreBackend::Sheet(get_sheet_path())),
        }
    }
}
