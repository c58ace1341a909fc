//! Orders and paginated order listings

use crate::amount::AmountCurrency;
use crate::enums::{OrderSide, OrderState, PriceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An exchange order as returned by the API
///
/// Created server-side; the client observes state transitions by refetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order id
    pub id: u64,
    /// Market the order belongs to (e.g., "BTC-CLP")
    pub market_id: String,
    /// Account id, present on authenticated reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    /// Side ("Bid" or "Ask" on the wire)
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Lifecycle state
    pub state: OrderState,
    /// Limit or market
    pub price_type: PriceType,
    /// Limit price, absent for market orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<AmountCurrency>,
    /// Remaining amount
    pub amount: AmountCurrency,
    /// Amount at creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<AmountCurrency>,
    /// Amount already executed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traded_amount: Option<AmountCurrency>,
    /// Quote currency exchanged so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_exchanged: Option<AmountCurrency>,
    /// Fee paid so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_fee: Option<AmountCurrency>,
    /// Currency fees are charged in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_currency: Option<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Returns true if the order already reached the given state
    pub fn is_in_state(&self, state: OrderState) -> bool {
        self.state == state
    }
}

/// Pagination metadata reported alongside an order listing
///
/// Pages are 0-based; `current_page + 1 < total_pages` means more pages
/// remain to be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page this slice corresponds to
    pub current_page: u32,
    /// Total number of pages
    pub total_pages: u32,
    /// Total number of orders across all pages
    pub total_count: u64,
}

impl PageMeta {
    /// Returns true if pages beyond this one remain
    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }
}

/// One slice of a paginated order listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    /// Orders on this page, in server order
    pub orders: Vec<Order>,
    /// Pagination metadata
    pub meta: PageMeta,
}
