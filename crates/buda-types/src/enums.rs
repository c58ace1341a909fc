//! OrderSide, PriceType, OrderState, QuotationKind, and BitcoinNetwork enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side as the exchange spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buy order
    Bid,
    /// Sell order
    Ask,
}

impl OrderSide {
    /// Returns the side as used in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bid => "Bid",
            Self::Ask => "Ask",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Bid => Self::Ask,
            Self::Ask => Self::Bid,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price type for new orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// Limit order - executes at the given price or better
    Limit,
    /// Market order - executes immediately at the best available price
    Market,
}

impl PriceType {
    /// Returns the price type as used in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order lifecycle states
///
/// Orders are created server-side and observed client-side; the client only
/// causes transitions indirectly by issuing cancel or trade requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    /// Accepted by the exchange, not yet booked
    Received,
    /// Booked, waiting to trade
    Pending,
    /// Fully executed
    Traded,
    /// Cancellation requested, not yet final
    Canceling,
    /// Cancelled
    Canceled,
    /// Any exchange-defined state outside the lifecycle set
    #[serde(other)]
    Unknown,
}

impl OrderState {
    /// Returns the state as used in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Pending => "pending",
            Self::Traded => "traded",
            Self::Canceling => "canceling",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true if no further transitions can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Traded | Self::Canceled)
    }

    /// Returns true if this state is a valid outcome of a cancel request
    ///
    /// A cancel call that leaves the order in any other state did not take
    /// effect and must be reported as a failure.
    pub fn is_cancelable_outcome(&self) -> bool {
        matches!(self, Self::Canceling | Self::Canceled)
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown order state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order state: {0}")]
pub struct ParseOrderStateError(pub String);

impl FromStr for OrderState {
    type Err = ParseOrderStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(Self::Received),
            "pending" => Ok(Self::Pending),
            "traded" => Ok(Self::Traded),
            "canceling" => Ok(Self::Canceling),
            "canceled" => Ok(Self::Canceled),
            other => Err(ParseOrderStateError(other.to_string())),
        }
    }
}

/// Quotation request variants
///
/// The first word is the side being quoted, the rest names the fixed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationKind {
    /// Buy a given amount of base currency
    BidGivenSize,
    /// Buy whatever a given amount of quote currency purchases
    BidGivenSpentQuote,
    /// Buy until a given amount of base currency has been earned
    BidGivenEarnedBase,
    /// Sell a given amount of base currency
    AskGivenSize,
    /// Sell until a given amount of quote currency has been earned
    AskGivenEarnedQuote,
    /// Sell a given amount of base currency already spent
    AskGivenSpentBase,
}

impl QuotationKind {
    /// Returns the kind as used in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BidGivenSize => "bid_given_size",
            Self::BidGivenSpentQuote => "bid_given_spent_quote",
            Self::BidGivenEarnedBase => "bid_given_earned_base",
            Self::AskGivenSize => "ask_given_size",
            Self::AskGivenEarnedQuote => "ask_given_earned_quote",
            Self::AskGivenSpentBase => "ask_given_spent_base",
        }
    }
}

/// Bitcoin network used to validate withdrawal addresses
///
/// Supplied explicitly at client construction. The staging environment runs
/// against testnet, production against mainnet, but the flag is never
/// inferred from the endpoint URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BitcoinNetwork {
    /// Bitcoin mainnet
    #[default]
    Mainnet,
    /// Bitcoin testnet
    Testnet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_roundtrip() {
        let json = serde_json::to_string(&OrderSide::Bid).unwrap();
        assert_eq!(json, "\"Bid\"");
        let side: OrderSide = serde_json::from_str("\"Ask\"").unwrap();
        assert_eq!(side, OrderSide::Ask);
        assert_eq!(side.opposite(), OrderSide::Bid);
    }

    #[test]
    fn test_state_wire_spelling() {
        let state: OrderState = serde_json::from_str("\"canceling\"").unwrap();
        assert_eq!(state, OrderState::Canceling);
        assert_eq!(serde_json::to_string(&OrderState::Traded).unwrap(), "\"traded\"");
    }

    #[test]
    fn test_unrecognized_state_maps_to_unknown() {
        let state: OrderState = serde_json::from_str("\"filled\"").unwrap();
        assert_eq!(state, OrderState::Unknown);
        assert!(!state.is_cancelable_outcome());
    }

    #[test]
    fn test_state_from_str() {
        assert_eq!("pending".parse::<OrderState>().unwrap(), OrderState::Pending);
        assert!("filled".parse::<OrderState>().is_err());
    }

    #[test]
    fn test_cancelable_outcomes() {
        assert!(OrderState::Canceling.is_cancelable_outcome());
        assert!(OrderState::Canceled.is_cancelable_outcome());
        assert!(!OrderState::Traded.is_cancelable_outcome());
        assert!(!OrderState::Pending.is_cancelable_outcome());
    }

    #[test]
    fn test_quotation_kind_spelling() {
        assert_eq!(
            serde_json::to_string(&QuotationKind::BidGivenSize).unwrap(),
            "\"bid_given_size\""
        );
        assert_eq!(QuotationKind::AskGivenEarnedQuote.as_str(), "ask_given_earned_quote");
    }
}
