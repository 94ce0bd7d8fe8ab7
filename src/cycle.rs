use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::feed::{build_http_client, ActivityFeedClient, PriceOracleClient};
use crate::filter::process_page;
use crate::notify::NotificationSink;
use crate::state::WatermarkStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub emitted: usize,
    pub skipped: usize,
    pub watermark_before: u64,
    pub watermark_after: u64,
}

/// One fetch-filter-emit-persist pass over the collection's latest sales.
pub struct SalesCycle {
    cfg: Config,
    feed: ActivityFeedClient,
    oracle: PriceOracleClient,
    store: WatermarkStore,
}

impl SalesCycle {
    pub fn new(cfg: Config) -> Result<Self> {
        let http = build_http_client(&cfg)?;
        Ok(Self {
            feed: ActivityFeedClient::new(http.clone(), &cfg),
            oracle: PriceOracleClient::new(http, &cfg),
            store: WatermarkStore::new(cfg.watermark_path.clone()),
            cfg,
        })
    }

    /// Any error before the final save leaves the persisted watermark as it
    /// was, so the next scheduled run starts from the same point.
    pub async fn run(&self, sink: &mut dyn NotificationSink) -> Result<CycleReport> {
        let watermark_before = self.store.load();
        info!(watermark = watermark_before, path = %self.store.path().display(), "Loaded watermark");

        let rate = self.oracle.fetch_native_to_fiat_rate().await?;
        info!(
            rate,
            "{} price: {:.2} {}",
            self.cfg.native_symbol,
            rate,
            self.cfg.fiat_currency.to_uppercase(),
        );

        let page = self
            .feed
            .fetch_recent_sales(&self.cfg.collection_address, self.cfg.page_size)
            .await?;

        let outcome = process_page(&page, watermark_before, rate, &self.cfg)?;

        for notification in &outcome.notifications {
            sink.emit(notification)?;
            info!(
                event_id = notification.event_id,
                token_id = %notification.token_id,
                price = %notification.price,
                "Sale emitted: {}",
                notification.token_name,
            );
        }

        self.store.save(outcome.watermark)?;

        let report = CycleReport {
            fetched: page.len(),
            emitted: outcome.notifications.len(),
            skipped: outcome.skipped,
            watermark_before,
            watermark_after: outcome.watermark,
        };
        info!(
            fetched = report.fetched,
            emitted = report.emitted,
            skipped = report.skipped,
            "Cycle complete: {} new of {} fetched, watermark {} -> {}",
            report.emitted,
            report.fetched,
            report.watermark_before,
            report.watermark_after,
        );
        Ok(report)
    }
}
