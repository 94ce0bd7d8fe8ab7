pub mod activity;
pub mod oracle;

use std::time::Duration;

use crate::config::Config;
use crate::error::Result;

pub use activity::ActivityFeedClient;
pub use oracle::PriceOracleClient;

/// One HTTP client per run, shared by both upstream clients.
pub fn build_http_client(cfg: &Config) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.http_timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Leading slice of a response body for error messages.
pub(crate) fn body_sample(body: &str) -> String {
    body.chars().take(300).collect()
}
