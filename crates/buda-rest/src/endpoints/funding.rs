//! Funding endpoints: bank accounts, withdrawals, and deposits
//!
//! These endpoints require authentication. Bitcoin withdrawals validate the
//! destination address locally, against the client's configured network,
//! before any request leaves the process.

use crate::address::is_valid_btc_address;
use crate::error::{RestError, RestResult};
use crate::http::Transport;
use crate::types::{BankAccount, BankAccountRequest, Deposit, Withdrawal};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Funding endpoints for bank accounts, withdrawals, and deposits
pub struct FundingEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> FundingEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Register a bank account for fiat withdrawals
    #[instrument(skip(self, request))]
    pub async fn create_bank_account(&self, request: &BankAccountRequest) -> RestResult<BankAccount> {
        let body = serde_json::json!({ "bank_account": request });

        debug!("Registering bank account at {}", request.bank_code);
        let response: BankAccountResponse = self.transport.post("/bank_accounts", &body).await?;
        Ok(response.bank_account)
    }

    /// List registered bank accounts
    #[instrument(skip(self))]
    pub async fn bank_accounts(&self) -> RestResult<Vec<BankAccount>> {
        debug!("Fetching bank accounts");
        let response: BankAccountsResponse = self.transport.get("/bank_accounts").await?;
        Ok(response.bank_accounts)
    }

    /// Request a withdrawal
    ///
    /// For Bitcoin the destination address is validated against the
    /// configured network before any I/O, and the amount is converted to
    /// satoshis. Amounts below satoshi precision are rejected locally.
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "BTC", "CLP")
    /// * `amount` - Amount in whole currency units
    /// * `target_address` - Destination address for crypto withdrawals
    /// * `simulate` - Compute fees without executing
    #[instrument(skip(self))]
    pub async fn withdraw(
        &self,
        currency: &str,
        amount: Decimal,
        target_address: &str,
        simulate: bool,
    ) -> RestResult<Withdrawal> {
        let amount = if currency.eq_ignore_ascii_case("BTC") {
            let network = self.transport.network();
            if !is_valid_btc_address(target_address, network) {
                return Err(RestError::InvalidBitcoinAddress {
                    address: target_address.to_string(),
                    network,
                });
            }
            btc_to_satoshis(amount)?
        } else {
            amount
        };

        let body = serde_json::json!({
            "amount": amount,
            "currency": currency,
            "simulate": simulate,
            "withdrawal_data": { "target_address": target_address },
        });

        debug!("Requesting {} withdrawal of {}", currency, amount);
        let response: WithdrawalResponse = self
            .transport
            .post(&format!("/currencies/{}/withdrawals", currency), &body)
            .await?;
        Ok(response.withdrawal)
    }

    /// Request a fiat deposit
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "CLP")
    /// * `amount` - Amount in whole currency units
    /// * `simulate` - Compute fees without executing
    #[instrument(skip(self))]
    pub async fn deposit(
        &self,
        currency: &str,
        amount: Decimal,
        simulate: bool,
    ) -> RestResult<Deposit> {
        let body = serde_json::json!({
            "amount": amount,
            "currency": currency,
            "simulate": simulate,
        });

        debug!("Requesting {} deposit of {}", currency, amount);
        let response: DepositResponse = self
            .transport
            .post(&format!("/currencies/{}/deposits", currency), &body)
            .await?;
        Ok(response.deposit)
    }
}

/// Convert a BTC amount to whole satoshis
fn btc_to_satoshis(amount: Decimal) -> RestResult<Decimal> {
    let satoshis = amount * Decimal::from(100_000_000_u64);
    if !satoshis.fract().is_zero() {
        return Err(RestError::InvalidAmount(format!(
            "{} BTC is below satoshi precision",
            amount
        )));
    }
    Ok(satoshis.normalize())
}

// Response envelopes specific to funding endpoints

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BankAccountResponse {
    bank_account: BankAccount,
}

#[derive(Debug, Deserialize)]
struct BankAccountsResponse {
    bank_accounts: Vec<BankAccount>,
}

#[derive(Debug, Deserialize)]
struct WithdrawalResponse {
    withdrawal: Withdrawal,
}

#[derive(Debug, Deserialize)]
struct DepositResponse {
    deposit: Deposit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_btc_to_satoshis() {
        assert_eq!(btc_to_satoshis(dec!(0.1)).unwrap(), dec!(10000000));
        assert_eq!(btc_to_satoshis(dec!(1)).unwrap(), dec!(100000000));
        assert_eq!(btc_to_satoshis(dec!(0.00000001)).unwrap(), dec!(1));
    }

    #[test]
    fn test_sub_satoshi_amount_rejected() {
        let err = btc_to_satoshis(dec!(0.000000001)).unwrap_err();
        assert!(matches!(err, RestError::InvalidAmount(_)));
    }

    #[test]
    fn test_withdrawal_envelope() {
        let json = r#"{"withdrawal": {
            "id": 1087,
            "state": "pending_preparation",
            "currency": "BTC",
            "amount": ["0.1", "BTC"],
            "data": {"target_address": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", "tx_hash": null},
            "created_at": "2017-09-01T14:41:19.000Z"
        }}"#;
        let response: WithdrawalResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.withdrawal.id, 1087);
        assert_eq!(response.withdrawal.state, "pending_preparation");
    }
}
