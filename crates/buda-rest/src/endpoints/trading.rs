//! Trading endpoints: quotations, fees, and order management
//!
//! These endpoints require authentication. Beyond the one-call operations,
//! this group carries the two multi-round-trip protocols: fetching every
//! page of an order listing, and polling one order until it reaches a
//! target state.

use crate::error::{RestError, RestResult};
use crate::http::Transport;
use crate::types::{FeePercentage, OrderRequest, Quotation};
use buda_types::{Order, OrderPage, OrderSide, OrderState, QuotationKind};
use rust_decimal::Decimal;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Orders requested per page when walking a full listing
const ORDERS_PER_PAGE: u32 = 300;

/// Delay between order-state polls
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Attempt budget before a poll gives up (5 minutes at the default interval)
const DEFAULT_POLL_ATTEMPTS: u32 = 600;

/// Options for [`TradingEndpoints::poll_order_state`]
///
/// Polling is always bounded: a poll that exhausts `max_attempts` fails with
/// [`RestError::PollTimeout`]. Callers that need to stop a poll early hand in
/// a [`CancellationToken`] and cancel it.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Delay between consecutive refetches
    pub interval: Duration,
    /// Maximum number of refetches before giving up
    pub max_attempts: u32,
    /// Optional token that aborts the poll when cancelled
    pub cancel: Option<CancellationToken>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_POLL_ATTEMPTS,
            cancel: None,
        }
    }
}

impl PollOptions {
    /// Set the delay between refetches
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the refetch budget
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Attach a cancellation token
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Trading endpoints for quotations, fees, and order management
pub struct TradingEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> TradingEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Get the fee percentage a prospective order would pay
    ///
    /// # Arguments
    /// * `market_id` - Market id
    /// * `side` - Order side the fee applies to
    /// * `market_order` - Whether the prospective order executes at market
    #[instrument(skip(self))]
    pub async fn fee_percentage(
        &self,
        market_id: &str,
        side: OrderSide,
        market_order: bool,
    ) -> RestResult<FeePercentage> {
        let path = format!(
            "/markets/{}/fee_percentage?type={}&market_order={}",
            market_id,
            side.as_str(),
            market_order
        );
        debug!("Fetching fee percentage for {}", market_id);
        let response: FeePercentageResponse = self.transport.get(&path).await?;
        Ok(response.fee_percentage)
    }

    /// Get a quotation for a prospective order
    ///
    /// # Arguments
    /// * `market_id` - Market id
    /// * `kind` - What is being quoted (see [`QuotationKind`])
    /// * `amount` - Amount the quotation is computed for
    /// * `limit` - Optional price limit
    #[instrument(skip(self))]
    pub async fn quotation(
        &self,
        market_id: &str,
        kind: QuotationKind,
        amount: Decimal,
        limit: Option<Decimal>,
    ) -> RestResult<Quotation> {
        self.quote(market_id, kind, amount, limit, false).await
    }

    /// Get a reverse quotation for a prospective order
    ///
    /// The fixed and computed legs of the quotation swap roles.
    #[instrument(skip(self))]
    pub async fn reverse_quotation(
        &self,
        market_id: &str,
        kind: QuotationKind,
        amount: Decimal,
        limit: Option<Decimal>,
    ) -> RestResult<Quotation> {
        self.quote(market_id, kind, amount, limit, true).await
    }

    async fn quote(
        &self,
        market_id: &str,
        kind: QuotationKind,
        amount: Decimal,
        limit: Option<Decimal>,
        reverse: bool,
    ) -> RestResult<Quotation> {
        let body = serde_json::json!({
            "quotation": {
                "type": kind,
                "reverse": reverse,
                "amount": amount,
                "limit": limit,
            }
        });

        debug!("Requesting {} quotation for {}", kind.as_str(), market_id);
        let response: QuotationResponse = self
            .transport
            .post(&format!("/markets/{}/quotations", market_id), &body)
            .await?;
        Ok(response.quotation)
    }

    /// Place a new order
    ///
    /// # Arguments
    /// * `market_id` - Market to place the order in
    /// * `request` - Order parameters
    ///
    /// # Returns
    /// The created order, initially in the `received` state
    #[instrument(skip(self, request), fields(side = %request.side, price_type = %request.price_type))]
    pub async fn create_order(&self, market_id: &str, request: &OrderRequest) -> RestResult<Order> {
        debug!(
            "Placing {} {} order for {} in {}",
            request.side, request.price_type, request.amount, market_id
        );
        let response: OrderResponse = self
            .transport
            .post(&format!("/markets/{}/orders", market_id), request)
            .await?;
        Ok(response.order)
    }

    /// Fetch one order by id
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: u64) -> RestResult<Order> {
        let response: OrderResponse = self
            .transport
            .get(&format!("/orders/{}", order_id))
            .await?;
        Ok(response.order)
    }

    /// Cancel an order by id
    ///
    /// The exchange acknowledges a cancel over HTTP even when the order can
    /// no longer be cancelled. The echoed state must be `canceling` or
    /// `canceled`; anything else fails with
    /// [`RestError::OrderNotCancelable`].
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Order> {
        let body = serde_json::json!({ "state": OrderState::Canceling });

        debug!("Cancelling order {}", order_id);
        let response: OrderResponse = self
            .transport
            .put(&format!("/orders/{}", order_id), &body)
            .await?;

        let order = response.order;
        if !order.state.is_cancelable_outcome() {
            return Err(RestError::OrderNotCancelable { id: order.id, state: order.state });
        }
        Ok(order)
    }

    /// Fetch one page of an order listing
    ///
    /// # Arguments
    /// * `market_id` - Market to list orders for
    /// * `page` - 0-based page number
    /// * `per_page` - Orders per page
    /// * `state` - Optional server-side state filter
    #[instrument(skip(self))]
    pub async fn order_pages(
        &self,
        market_id: &str,
        page: u32,
        per_page: u32,
        state: Option<OrderState>,
    ) -> RestResult<OrderPage> {
        let mut path = format!("/markets/{}/orders?page={}&per={}", market_id, page, per_page);
        if let Some(state) = state {
            path.push_str(&format!("&state={}", state.as_str()));
        }

        debug!("Fetching order page {} for {}", page, market_id);
        self.transport.get(&path).await
    }

    /// Fetch every page of a market's order listing
    ///
    /// Walks the listing from page 0, appending each page's orders in server
    /// order. Any page failure aborts the whole fetch; partial accumulation
    /// is discarded and no page is retried.
    ///
    /// With a `state_filter` the returned orders are narrowed to that state
    /// and `total_count` is recomputed from the filtered set, since the
    /// server-reported total only describes the unfiltered listing.
    #[instrument(skip(self))]
    pub async fn fetch_all_orders(
        &self,
        market_id: &str,
        state_filter: Option<OrderState>,
    ) -> RestResult<OrderPage> {
        let first = self
            .order_pages(market_id, 0, ORDERS_PER_PAGE, None)
            .await?;

        let mut orders = first.orders;
        let mut meta = first.meta;
        let mut page = meta.current_page;

        while page + 1 < meta.total_pages {
            page += 1;
            let next = self
                .order_pages(market_id, page, ORDERS_PER_PAGE, None)
                .await?;
            orders.extend(next.orders);
            meta = next.meta;
        }

        if let Some(state) = state_filter {
            orders.retain(|order| order.state == state);
            meta.total_count = orders.len() as u64;
        }

        debug!("Fetched {} orders across {} pages", orders.len(), meta.total_pages.max(1));
        Ok(OrderPage { orders, meta })
    }

    /// Refetch an order until it reaches `target`
    ///
    /// Returns immediately when the order is already in the target state.
    /// Otherwise waits `options.interval` between refetches, up to
    /// `options.max_attempts` times. A fetch error ends the poll with that
    /// error; no transport retry happens here.
    #[instrument(skip(self, order, options), fields(order_id = order.id, target = %target))]
    pub async fn poll_order_state(
        &self,
        order: &Order,
        target: OrderState,
        options: &PollOptions,
    ) -> RestResult<Order> {
        if order.state == target {
            return Ok(order.clone());
        }

        for attempt in 1..=options.max_attempts {
            self.wait_interval(options).await?;

            let current = self.get_order(order.id).await?;
            if current.state == target {
                debug!("Order {} reached {} after {} refetches", order.id, target, attempt);
                return Ok(current);
            }
        }

        Err(RestError::PollTimeout { target, attempts: options.max_attempts })
    }

    /// Place an order and poll it until it trades
    ///
    /// Two sequential steps; the first failure wins.
    #[instrument(skip(self, request, options))]
    pub async fn create_and_trade_order(
        &self,
        market_id: &str,
        request: &OrderRequest,
        options: &PollOptions,
    ) -> RestResult<Order> {
        let order = self.create_order(market_id, request).await?;
        self.poll_order_state(&order, OrderState::Traded, options).await
    }

    /// One inter-poll delay, racing the caller's cancellation token
    async fn wait_interval(&self, options: &PollOptions) -> RestResult<()> {
        match &options.cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => Err(RestError::PollCancelled),
                    _ = tokio::time::sleep(options.interval) => Ok(()),
                }
            }
            None => {
                tokio::time::sleep(options.interval).await;
                Ok(())
            }
        }
    }
}

// Response envelopes specific to trading endpoints

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OrderResponse {
    order: Order,
}

#[derive(Debug, Deserialize)]
struct QuotationResponse {
    quotation: Quotation,
}

#[derive(Debug, Deserialize)]
struct FeePercentageResponse {
    fee_percentage: FeePercentage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_options_defaults() {
        let options = PollOptions::default();
        assert_eq!(options.interval, Duration::from_millis(500));
        assert_eq!(options.max_attempts, 600);
        assert!(options.cancel.is_none());
    }

    #[test]
    fn test_poll_options_builder() {
        let token = CancellationToken::new();
        let options = PollOptions::default()
            .with_interval(Duration::from_millis(10))
            .with_max_attempts(3)
            .with_cancel(token);

        assert_eq!(options.interval, Duration::from_millis(10));
        assert_eq!(options.max_attempts, 3);
        assert!(options.cancel.is_some());
    }

    #[test]
    fn test_order_envelope() {
        let json = r#"{"order": {
            "id": 2061367,
            "market_id": "BTC-CLP",
            "type": "Bid",
            "state": "received",
            "price_type": "limit",
            "limit": ["741000.0", "CLP"],
            "amount": ["0.1", "BTC"]
        }}"#;
        let response: OrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.order.id, 2061367);
        assert_eq!(response.order.state, OrderState::Received);
    }
}
