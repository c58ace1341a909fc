//! Error types for REST API operations

use buda_types::{BitcoinNetwork, OrderState};

/// Errors that can occur during REST API operations
///
/// Every operation returns either data or exactly one of these; local
/// precondition failures are raised before any network I/O happens.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-declared error code, when the body carried one
        code: Option<String>,
        /// Server-declared message, or the status line when absent
        message: String,
    },

    /// Missing API credentials for an authenticated endpoint
    #[error("API key and secret are required for this call")]
    ApiKeyRequired,

    /// Withdrawal address rejected before any request was made
    #[error("Invalid Bitcoin address for {network:?}: {address}")]
    InvalidBitcoinAddress {
        /// The rejected address
        address: String,
        /// Network the address was validated against
        network: BitcoinNetwork,
    },

    /// Amount cannot be represented by the endpoint
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Cancel request succeeded over HTTP but the order did not move
    /// into a canceling state
    #[error("Order {id} is not valid for canceling (state: {state})")]
    OrderNotCancelable {
        /// Order id
        id: u64,
        /// State the server echoed back
        state: OrderState,
    },

    /// Poll loop exhausted its attempt budget
    #[error("Order did not reach state {target} after {attempts} attempts")]
    PollTimeout {
        /// State the poll was waiting for
        target: OrderState,
        /// Attempts made before giving up
        attempts: u32,
    },

    /// Poll loop was cancelled by the caller
    #[error("Polling cancelled")]
    PollCancelled,

    /// Failed to parse a response body
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RestError {
    /// The wire-level error kind string for this error
    ///
    /// Server-declared codes pass through unchanged; local failures map to
    /// fixed kinds.
    pub fn kind(&self) -> String {
        match self {
            Self::ApiKeyRequired => "InvalidRequest:ApiKeyRequired".to_string(),
            Self::InvalidBitcoinAddress { .. } => {
                "InvalidRequest:InvalidBitcoinAddress".to_string()
            }
            Self::OrderNotCancelable { .. } => "order_not_valid_for_canceling".to_string(),
            Self::Api { code: Some(code), .. } => code.clone(),
            Self::Api { status, .. } => format!("http_{}", status),
            Self::Http(_) => "network_error".to_string(),
            Self::InvalidAmount(_) => "InvalidRequest:InvalidAmount".to_string(),
            Self::PollTimeout { .. } => "poll_timeout".to_string(),
            Self::PollCancelled => "poll_cancelled".to_string(),
            Self::Parse(_) => "parse_error".to_string(),
            Self::InvalidParameter(_) => "invalid_parameter".to_string(),
        }
    }

    /// Returns true if the error was raised locally, before any network I/O
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::ApiKeyRequired
                | Self::InvalidBitcoinAddress { .. }
                | Self::InvalidAmount(_)
                | Self::InvalidParameter(_)
        )
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_error_kinds() {
        assert_eq!(RestError::ApiKeyRequired.kind(), "InvalidRequest:ApiKeyRequired");

        let addr = RestError::InvalidBitcoinAddress {
            address: "not-an-address".to_string(),
            network: BitcoinNetwork::Mainnet,
        };
        assert_eq!(addr.kind(), "InvalidRequest:InvalidBitcoinAddress");
        assert!(addr.is_local());
    }

    #[test]
    fn test_server_code_passes_through() {
        let err = RestError::Api {
            status: 422,
            code: Some("insufficient_funds".to_string()),
            message: "Not enough BTC".to_string(),
        };
        assert_eq!(err.kind(), "insufficient_funds");
        assert!(!err.is_local());
    }

    #[test]
    fn test_cancel_validation_kind() {
        let err = RestError::OrderNotCancelable { id: 7, state: OrderState::Traded };
        assert_eq!(err.kind(), "order_not_valid_for_canceling");
        assert!(err.to_string().contains("traded"));
    }
}
