//! REST API client for the Buda cryptocurrency exchange
//!
//! This crate provides a complete REST API client for trading on Buda,
//! including market data, account management, order execution, and funding
//! operations.
//!
//! # Features
//!
//! - **Market Data**: Markets, ticker, orderbook
//! - **Account**: Balances per currency
//! - **Trading**: Quotations, fees, placing/canceling orders, full-listing
//!   pagination, and polling an order until it reaches a target state
//! - **Funding**: Bank accounts, withdrawals (with local Bitcoin address
//!   validation), deposits
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Each request carries an
//! `X-API-KEY`, a strictly increasing `X-NONCE` (epoch milliseconds), and an
//! `X-SIGNATURE`: an HMAC-SHA384 hex digest over the method, path, and
//! base64 of the JSON body. Calling a private endpoint without credentials
//! fails immediately, before any network I/O.
//!
//! # Example
//!
//! ```no_run
//! use buda_rest::{BudaClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BudaClient::new();
//!     let ticker = client.ticker("BTC-CLP").await?;
//!     println!("BTC/CLP last: {}", ticker.last_price);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = BudaClient::with_credentials(creds);
//!     let balances = auth_client.balances().await?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```

pub mod address;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

mod http;

// Re-export main types
pub use client::{BudaClient, ClientConfig, PRODUCTION_API_URL, STAGING_API_URL};
pub use endpoints::PollOptions;
pub use error::{RestError, RestResult};

// Re-export credentials and shared domain types
pub use buda_auth::Credentials;
pub use buda_types::{
    AmountCurrency, BitcoinNetwork, Order, OrderPage, OrderSide, OrderState, PageMeta, PriceType,
    QuotationKind,
};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    Market, OrderBook, Ticker,
    // Account
    Balance,
    // Trading
    FeePercentage, OrderRequest, Quotation,
    // Funding
    BankAccount, BankAccountRequest, Deposit, Withdrawal,
};

// Re-exported so callers can cancel polls without depending on tokio-util
pub use tokio_util::sync::CancellationToken;
