//! Private account endpoints
//!
//! These endpoints require authentication.

use crate::error::RestResult;
use crate::http::Transport;
use crate::types::Balance;
use tracing::{debug, instrument};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Get balances for every currency
    #[instrument(skip(self))]
    pub async fn balances(&self) -> RestResult<Vec<Balance>> {
        debug!("Fetching balances");
        let response: BalancesResponse = self.transport.get("/balances").await?;
        Ok(response.balances)
    }

    /// Get the balance of one currency
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "BTC", "CLP")
    #[instrument(skip(self))]
    pub async fn balance(&self, currency: &str) -> RestResult<Balance> {
        debug!("Fetching balance for {}", currency);
        let response: BalanceResponse = self
            .transport
            .get(&format!("/balances/{}", currency))
            .await?;
        Ok(response.balance)
    }
}

// Response envelopes specific to account endpoints

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BalancesResponse {
    balances: Vec<Balance>,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: Balance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_envelope() {
        let json = r#"{"balance": {
            "id": "BTC",
            "amount": ["1.5", "BTC"],
            "available_amount": ["1.0", "BTC"],
            "frozen_amount": ["0.5", "BTC"],
            "pending_withdraw_amount": ["0.0", "BTC"],
            "account_id": 51
        }}"#;
        let response: BalanceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.balance.id, "BTC");
        assert_eq!(response.balance.account_id, Some(51));
    }
}
