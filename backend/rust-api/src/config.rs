use std::env;
use std::path::PathBuf;

/// Placeholder organizer wallet used when `ORGANIZER_ADDRESS` is not set.
pub const DEFAULT_ORGANIZER: &str = "0x90D9CD66FAdFF1C2Ba32C99A47C76532d08A704B";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub organizer_address: String,
    pub contract_address: String,
    pub rate_limit_requests: u32,
    pub rate_limit_window_secs: u64,
    pub seed_sample_events: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            organizer_address: env::var("ORGANIZER_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_ORGANIZER.to_string()),
            contract_address: env::var("TICKET_MARKETPLACE_ADDRESS").unwrap_or_default(),
            rate_limit_requests: env::var("RATE_LIMIT_REQUESTS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            seed_sample_events: env::var("SEED_SAMPLE_EVENTS")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// Configuration rooted at `data_dir` with every other value at its default.
    /// Rate limiting is disabled.
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: 8000,
            data_dir: data_dir.into(),
            organizer_address: DEFAULT_ORGANIZER.to_string(),
            contract_address: String::new(),
            rate_limit_requests: 0,
            rate_limit_window_secs: 60,
            seed_sample_events: false,
        }
    }
}
