//! Public market data endpoints
//!
//! These endpoints don't require authentication; requests carry no auth
//! headers at all.

use crate::error::RestResult;
use crate::http::Transport;
use crate::types::{Market, OrderBook, Ticker};
use tracing::{debug, instrument};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// List all tradable markets
    #[instrument(skip(self))]
    pub async fn markets(&self) -> RestResult<Vec<Market>> {
        debug!("Fetching markets");
        let response: MarketsResponse = self.transport.get_public("/markets").await?;
        Ok(response.markets)
    }

    /// Get details for one market
    ///
    /// # Arguments
    /// * `market_id` - Market id (e.g., "BTC-CLP")
    #[instrument(skip(self))]
    pub async fn market_details(&self, market_id: &str) -> RestResult<Market> {
        debug!("Fetching market {}", market_id);
        let response: MarketResponse = self
            .transport
            .get_public(&format!("/markets/{}", market_id))
            .await?;
        Ok(response.market)
    }

    /// Get the ticker for a market
    ///
    /// # Arguments
    /// * `market_id` - Market id (e.g., "BTC-CLP")
    #[instrument(skip(self))]
    pub async fn ticker(&self, market_id: &str) -> RestResult<Ticker> {
        debug!("Fetching ticker for {}", market_id);
        let response: TickerResponse = self
            .transport
            .get_public(&format!("/markets/{}/ticker", market_id))
            .await?;
        Ok(response.ticker)
    }

    /// Get the orderbook for a market
    ///
    /// # Arguments
    /// * `market_id` - Market id (e.g., "BTC-CLP")
    #[instrument(skip(self))]
    pub async fn order_book(&self, market_id: &str) -> RestResult<OrderBook> {
        debug!("Fetching orderbook for {}", market_id);
        let response: OrderBookResponse = self
            .transport
            .get_public(&format!("/markets/{}/order_book", market_id))
            .await?;
        Ok(response.order_book)
    }
}

// Response envelopes specific to market endpoints

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MarketsResponse {
    markets: Vec<Market>,
}

#[derive(Debug, Deserialize)]
struct MarketResponse {
    market: Market,
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    ticker: Ticker,
}

#[derive(Debug, Deserialize)]
struct OrderBookResponse {
    order_book: OrderBook,
}
