pub mod formatter;
pub mod selector;
pub mod units;

use crate::config::Config;
use crate::error::Result;
use crate::types::{Event, SaleNotification};

pub use selector::select_new;

/// Notifications for one page plus the watermark to persist afterwards.
#[derive(Debug)]
pub struct PageOutcome {
    pub notifications: Vec<SaleNotification>,
    pub skipped: usize,
    pub watermark: u64,
}

/// Select and format every new sale in `page`. Nothing is returned unless the
/// whole page formats cleanly, so a malformed event never leaves a run half
/// emitted.
pub fn process_page(page: &[Event], watermark: u64, rate: f64, cfg: &Config) -> Result<PageOutcome> {
    let selection = select_new(page, watermark)?;

    let notifications = selection
        .fresh
        .iter()
        .map(|(id, event)| formatter::build_notification(*id, event, rate, cfg))
        .collect::<Result<Vec<_>>>()?;

    Ok(PageOutcome {
        notifications,
        skipped: selection.skipped,
        watermark: selection.watermark,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::selector::tests::sale;

    #[test]
    fn formats_new_sales_in_ascending_order() {
        let cfg = Config::from_lookup(|_| None).unwrap();
        let page = vec![sale("12", "100", "80"), sale("11", "80", "100"), sale("10", "1", "1")];
        let out = process_page(&page, 10, 3000.0, &cfg).unwrap();

        let ids: Vec<u64> = out.notifications.iter().map(|n| n.event_id).collect();
        assert_eq!(ids, vec![11, 12]);
        assert_eq!(out.skipped, 1);
        assert_eq!(out.watermark, 12);
    }

    #[test]
    fn bad_price_in_any_new_event_yields_nothing() {
        let cfg = Config::from_lookup(|_| None).unwrap();
        let page = vec![sale("3", "oops", "80"), sale("2", "100", "80")];
        assert!(process_page(&page, 0, 1.0, &cfg).is_err());
    }
}
