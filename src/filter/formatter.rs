use crate::config::{Config, NATIVE_DECIMALS};
use crate::error::Result;
use crate::filter::units::{decimal_to_f64, format_units, parse_raw_amount, round2, to_decimal};
use crate::types::{Event, SaleNotification};

/// Percentage gap between sale and floor, relative to the SALE price:
/// `(price - floor) / price * 100`. `None` when the sale price is zero.
pub fn diff_pct(price_raw: i128, floor_raw: i128) -> Option<f64> {
    if price_raw == 0 {
        return None;
    }
    let price = price_raw as f64;
    let floor = floor_raw as f64;
    Some((price - floor) / price * 100.0)
}

/// `(above %X)` / `(below %X)` with X to two decimals; empty when level.
pub fn qualifier(diff: Option<f64>) -> String {
    match diff {
        Some(d) if d < 0.0 => format!("(below %{:.2})", d.abs()),
        Some(d) if d > 0.0 => format!("(above %{:.2})", d),
        _ => String::new(),
    }
}

pub fn build_notification(id: u64, event: &Event, rate: f64, cfg: &Config) -> Result<SaleNotification> {
    let price_wei = &event.order.price;
    let floor_wei = &event.collection.floor_order.price;

    let diff = diff_pct(parse_raw_amount(price_wei)?, parse_raw_amount(floor_wei)?);
    let floor = to_decimal(floor_wei, NATIVE_DECIMALS)?;
    let floor_fiat = round2(decimal_to_f64(floor)? * rate);

    Ok(SaleNotification {
        event_id: id,
        token_id: event.token.token_id.clone(),
        token_name: event.token.name.clone(),
        seller: event.from.as_ref().map(|u| u.address.clone()),
        buyer: event.to.as_ref().map(|u| u.address.clone()),
        created_at: event.created_at.clone(),
        price_wei: price_wei.clone(),
        price: format_units(price_wei, NATIVE_DECIMALS)?,
        floor_price_wei: floor_wei.clone(),
        floor_price: format_units(floor_wei, NATIVE_DECIMALS)?,
        diff_pct: diff,
        floor_fiat,
        native_symbol: cfg.native_symbol.clone(),
        fiat_symbol: cfg.fiat_currency.to_uppercase(),
        tx_url: format!("{}/tx/{}", cfg.explorer_url, event.hash),
        marketplace_url: format!(
            "{}/collections/{}/{}",
            cfg.marketplace_url, cfg.collection_address, event.token.token_id
        ),
    })
}

/// Human-readable rendering of a notification.
pub fn render_text(n: &SaleNotification) -> String {
    let mut headline = format!(
        "{} sold for {} {} ({:.2} {})",
        n.token_name, n.price, n.native_symbol, n.floor_fiat, n.fiat_symbol,
    );
    let q = qualifier(n.diff_pct);
    if !q.is_empty() {
        headline.push(' ');
        headline.push_str(&q);
    }
    format!("{headline}\nTx: {}\nExplore on {}", n.tx_url, n.marketplace_url)
}
