//! Types for Buda REST API requests and responses

use buda_types::{AmountCurrency, OrderSide, PriceType, QuotationKind};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Market Data Types
// ============================================================================

/// A tradable market
#[derive(Debug, Clone, Deserialize)]
pub struct Market {
    /// Market id (e.g., "BTC-CLP")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Base currency code
    pub base_currency: String,
    /// Quote currency code
    pub quote_currency: String,
    /// Smallest accepted order
    pub minimum_order_amount: Option<AmountCurrency>,
}

/// Ticker snapshot for one market
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Market id
    pub market_id: Option<String>,
    /// Price of the last trade
    pub last_price: AmountCurrency,
    /// Lowest ask
    pub min_ask: AmountCurrency,
    /// Highest bid
    pub max_bid: AmountCurrency,
    /// 24h traded volume
    pub volume: AmountCurrency,
    /// Price change over 24 hours (fraction, e.g. -0.015)
    pub price_variation_24h: Decimal,
    /// Price change over 7 days
    pub price_variation_7d: Decimal,
}

/// Orderbook snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    /// Ask levels as (price, amount), best first
    pub asks: Vec<(Decimal, Decimal)>,
    /// Bid levels as (price, amount), best first
    pub bids: Vec<(Decimal, Decimal)>,
}

impl OrderBook {
    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|(price, _)| *price)
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|(price, _)| *price)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        let ask = self.best_ask()?;
        let bid = self.best_bid()?;
        Some(ask - bid)
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Balance of one currency
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    /// Currency code
    pub id: String,
    /// Total amount
    pub amount: AmountCurrency,
    /// Amount available for trading
    pub available_amount: AmountCurrency,
    /// Amount frozen in open orders
    pub frozen_amount: Option<AmountCurrency>,
    /// Amount in pending withdrawals
    pub pending_withdraw_amount: Option<AmountCurrency>,
    /// Account id
    pub account_id: Option<u64>,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Parameters for a new order
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Order side
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Limit or market
    pub price_type: PriceType,
    /// Limit price, required for limit orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Decimal>,
    /// Amount of base currency
    pub amount: Decimal,
}

impl OrderRequest {
    /// Create a limit order request
    pub fn limit(side: OrderSide, amount: Decimal, price: Decimal) -> Self {
        Self {
            side,
            price_type: PriceType::Limit,
            limit: Some(price),
            amount,
        }
    }

    /// Create a market order request
    pub fn market(side: OrderSide, amount: Decimal) -> Self {
        Self {
            side,
            price_type: PriceType::Market,
            limit: None,
            amount,
        }
    }
}

/// A quotation: what a prospective order would exchange right now
#[derive(Debug, Clone, Deserialize)]
pub struct Quotation {
    /// Quotation variant
    #[serde(rename = "type")]
    pub kind: QuotationKind,
    /// Quoted amount
    pub amount: AmountCurrency,
    /// Price limit applied, if any
    pub limit: Option<AmountCurrency>,
    /// Base currency that would change hands
    pub base_exchanged: Option<AmountCurrency>,
    /// Quote currency that would change hands
    pub quote_exchanged: Option<AmountCurrency>,
    /// Change to the base balance, fees included
    pub base_balance_change: Option<AmountCurrency>,
    /// Change to the quote balance, fees included
    pub quote_balance_change: Option<AmountCurrency>,
    /// Fee the order would pay
    pub fee: Option<AmountCurrency>,
    /// True when the book cannot fill the full amount
    #[serde(default)]
    pub incomplete: bool,
}

/// Fee percentage for a prospective order
#[derive(Debug, Clone, Deserialize)]
pub struct FeePercentage {
    /// Fee as a percentage (e.g. 0.8)
    pub fee: Decimal,
    /// Flat fee component, when the exchange charges one
    pub base: Option<AmountCurrency>,
}

// ============================================================================
// Funding Types
// ============================================================================

/// A registered bank account
#[derive(Debug, Clone, Deserialize)]
pub struct BankAccount {
    /// Bank account id
    pub id: u64,
    /// Bank code
    pub bank_code: Option<String>,
    /// Account number
    pub account_number: String,
    /// Account type (e.g., "checking")
    pub account_type: Option<String>,
    /// Currency the account holds
    pub currency: String,
    /// Account holder document number
    pub document_number: Option<String>,
    /// Account holder name
    pub full_name: Option<String>,
}

/// Parameters for registering a bank account
#[derive(Debug, Clone, Serialize)]
pub struct BankAccountRequest {
    /// Bank code
    pub bank_code: String,
    /// Account number
    pub account_number: String,
    /// Account type (e.g., "checking")
    pub account_type: String,
    /// Currency the account holds
    pub currency: String,
    /// Account holder document number
    pub document_number: String,
    /// Account holder name
    pub full_name: String,
}

/// A withdrawal as reported by the exchange
#[derive(Debug, Clone, Deserialize)]
pub struct Withdrawal {
    /// Withdrawal id
    pub id: u64,
    /// Processing state (e.g., "pending_preparation")
    pub state: String,
    /// Currency being withdrawn
    pub currency: String,
    /// Withdrawn amount
    pub amount: AmountCurrency,
    /// Destination details
    pub data: Option<WithdrawalData>,
    /// Creation timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// Destination details of a withdrawal
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalData {
    /// Destination address for crypto withdrawals
    pub target_address: Option<String>,
    /// On-chain transaction hash, once broadcast
    pub tx_hash: Option<String>,
}

/// A deposit as reported by the exchange
#[derive(Debug, Clone, Deserialize)]
pub struct Deposit {
    /// Deposit id
    pub id: u64,
    /// Processing state (e.g., "pending_confirmation")
    pub state: String,
    /// Currency being deposited
    pub currency: String,
    /// Deposited amount
    pub amount: AmountCurrency,
    /// Creation timestamp
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_request_body_shape() {
        let req = OrderRequest::limit(OrderSide::Bid, dec!(0.5), dec!(741000));
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["type"], "Bid");
        assert_eq!(json["price_type"], "limit");
        assert_eq!(json["limit"], "741000");
        assert_eq!(json["amount"], "0.5");
    }

    #[test]
    fn test_market_order_omits_limit() {
        let req = OrderRequest::market(OrderSide::Ask, dec!(1));
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("limit").is_none());
        assert_eq!(json["price_type"], "market");
    }

    #[test]
    fn test_parse_order_book() {
        let json = r#"{
            "asks": [["836677.14", "0.32"], ["837000.0", "1.5"]],
            "bids": [["836000.0", "0.7"]]
        }"#;
        let book: OrderBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.best_ask(), Some(dec!(836677.14)));
        assert_eq!(book.best_bid(), Some(dec!(836000.0)));
        assert_eq!(book.spread(), Some(dec!(677.14)));
    }

    #[test]
    fn test_parse_ticker() {
        let json = r#"{
            "market_id": "BTC-CLP",
            "last_price": ["749000.0", "CLP"],
            "min_ask": ["750000.0", "CLP"],
            "max_bid": ["748000.0", "CLP"],
            "volume": ["120.5", "BTC"],
            "price_variation_24h": "-0.015",
            "price_variation_7d": "0.021"
        }"#;
        let ticker: Ticker = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.last_price.amount, dec!(749000.0));
        assert_eq!(ticker.price_variation_24h, dec!(-0.015));
    }
}
