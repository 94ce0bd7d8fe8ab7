use std::path::PathBuf;

use crate::error::{AppError, Result};

pub const FEED_API_URL: &str = "https://api.looksrare.org/graphql";
pub const PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const COLLECTION_ADDRESS: &str = "0x8c186802b1992f7650ac865d4ca94d55ff3c0d17";
pub const EXPLORER_URL: &str = "https://etherscan.io";
pub const MARKETPLACE_URL: &str = "https://looksrare.org";

/// Number of most recent sales requested per run.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound accepted by the feed's pagination input.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Decimal places of the chain's native currency (wei -> ETH).
pub const NATIVE_DECIMALS: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable message followed by a separator line.
    Text,
    /// One JSON object per line.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::Config(format!(
                "OUTPUT_FORMAT must be `text` or `json`, got `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_api_url: String,
    pub price_api_url: String,
    /// Collection whose sales are tracked (COLLECTION_ADDRESS)
    pub collection_address: String,
    /// Sales requested per run (PAGE_SIZE)
    pub page_size: u32,
    /// File holding the last processed event id (WATERMARK_PATH)
    pub watermark_path: PathBuf,
    /// Price service id of the native coin (PRICE_COIN_ID)
    pub price_coin_id: String,
    /// Fiat currency code, lowercase as the price service expects (FIAT_CURRENCY)
    pub fiat_currency: String,
    pub native_symbol: String,
    pub explorer_url: String,
    pub marketplace_url: String,
    pub output_format: OutputFormat,
    pub http_timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Missing keys fall back
    /// to the defaults above.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let page_size = var_or("PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())
            .parse::<u32>()
            .map_err(|_| AppError::Config("PAGE_SIZE must be a positive integer".to_string()))?;
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::Config(format!(
                "PAGE_SIZE must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        let collection_address = var_or("COLLECTION_ADDRESS", COLLECTION_ADDRESS);
        if !is_hex_address(&collection_address) {
            return Err(AppError::Config(format!(
                "COLLECTION_ADDRESS is not a 0x-prefixed 20-byte hex address: {collection_address}"
            )));
        }

        Ok(Self {
            feed_api_url: var_or("FEED_API_URL", FEED_API_URL),
            price_api_url: trim_url(var_or("PRICE_API_URL", PRICE_API_URL)),
            collection_address,
            page_size,
            watermark_path: PathBuf::from(var_or("WATERMARK_PATH", "./lastID.txt")),
            price_coin_id: var_or("PRICE_COIN_ID", "ethereum"),
            fiat_currency: var_or("FIAT_CURRENCY", "usd").to_lowercase(),
            native_symbol: var_or("NATIVE_SYMBOL", "ETH"),
            explorer_url: trim_url(var_or("EXPLORER_URL", EXPLORER_URL)),
            marketplace_url: trim_url(var_or("MARKETPLACE_URL", MARKETPLACE_URL)),
            output_format: var_or("OUTPUT_FORMAT", "text").parse()?,
            http_timeout_secs: var_or("HTTP_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .map_err(|_| {
                    AppError::Config("HTTP_TIMEOUT_SECS must be a whole number of seconds".to_string())
                })?,
            log_level: var_or("LOG_LEVEL", "info"),
        })
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn is_hex_address(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
