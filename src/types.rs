use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Feed events: shape of the GraphQL `EventFragment`
// ---------------------------------------------------------------------------

/// One activity event on the collection. Only sale events are requested.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Decimal string of a monotonically increasing integer.
    pub id: String,
    /// Seller.
    pub from: Option<EventUser>,
    /// Buyer.
    pub to: Option<EventUser>,
    #[serde(rename = "type")]
    pub event_type: String,
    /// Transaction hash of the sale.
    pub hash: String,
    pub created_at: String,
    pub token: EventToken,
    pub collection: EventCollection,
    pub order: EventOrder,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUser {
    pub address: String,
    pub name: Option<String>,
    pub is_verified: Option<bool>,
    pub avatar: Option<Avatar>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Avatar {
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventToken {
    pub token_id: String,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCollection {
    pub address: String,
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    /// Cheapest active listing; its price is the collection floor.
    pub floor_order: FloorOrder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloorOrder {
    /// Wei, as a decimal string.
    pub price: String,
}

/// The maker order matched by the sale.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOrder {
    pub is_order_ask: Option<bool>,
    /// Wei, as a decimal string.
    pub price: String,
    pub end_time: Option<serde_json::Value>,
    pub currency: Option<String>,
    pub strategy: Option<String>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Outbound notification
// ---------------------------------------------------------------------------

/// Everything computed for one new sale. Rendered as prose or emitted as JSON
/// depending on the configured output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleNotification {
    pub event_id: u64,
    pub token_id: String,
    pub token_name: String,
    pub seller: Option<String>,
    pub buyer: Option<String>,
    pub created_at: String,
    pub price_wei: String,
    /// Sale price in native units, unrounded.
    pub price: String,
    pub floor_price_wei: String,
    pub floor_price: String,
    /// `(price - floor) / price * 100`; `None` when the sale price is zero.
    pub diff_pct: Option<f64>,
    /// Floor price converted to fiat, rounded to cents.
    pub floor_fiat: f64,
    pub native_symbol: String,
    pub fiat_symbol: String,
    pub tx_url: String,
    pub marketplace_url: String,
}
