//! API endpoint implementations grouped by concern

pub mod account;
pub mod funding;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use funding::FundingEndpoints;
pub use market::MarketEndpoints;
pub use trading::{PollOptions, TradingEndpoints};
