use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::feed::body_sample;

/// Spot price of the native coin in fiat, from a `/simple/price` style API.
#[derive(Debug, Clone)]
pub struct PriceOracleClient {
    http: reqwest::Client,
    base_url: String,
    coin_id: String,
    fiat: String,
}

impl PriceOracleClient {
    pub fn new(http: reqwest::Client, cfg: &Config) -> Self {
        Self {
            http,
            base_url: cfg.price_api_url.clone(),
            coin_id: cfg.price_coin_id.clone(),
            fiat: cfg.fiat_currency.clone(),
        }
    }

    /// Current fiat value of one native unit. Fetched fresh on every call.
    pub async fn fetch_native_to_fiat_rate(&self) -> Result<f64> {
        let url = format!("{}/simple/price", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("ids", self.coin_id.as_str()), ("vs_currencies", self.fiat.as_str())])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "price quote HTTP {status}: {}",
                body_sample(&body)
            )));
        }

        let v: serde_json::Value = serde_json::from_str(&body)?;
        let rate = v
            .get(&self.coin_id)
            .and_then(|c| c.get(&self.fiat))
            .and_then(|r| r.as_f64())
            .ok_or_else(|| {
                AppError::Malformed(format!(
                    "price quote has no numeric {}.{}: {}",
                    self.coin_id,
                    self.fiat,
                    body_sample(&body)
                ))
            })?;

        if !rate.is_finite() || rate < 0.0 {
            return Err(AppError::Malformed(format!("price quote rate {rate} is not usable")));
        }

        debug!(coin = %self.coin_id, fiat = %self.fiat, rate, "Fetched conversion rate");
        Ok(rate)
    }
}
