//! Shared fixtures for integration tests

use buda_rest::{BudaClient, ClientConfig, Credentials};
use buda_types::BitcoinNetwork;
use httpmock::MockServer;
use serde_json::{json, Value};

/// Credentials used by every authenticated test
pub fn test_credentials() -> Credentials {
    Credentials::new("test-api-key", "test-api-secret").unwrap()
}

/// Authenticated client pointed at the mock server
pub fn authed_client(server: &MockServer) -> BudaClient {
    BudaClient::with_config(
        ClientConfig::new()
            .with_api_url(format!("{}/api/v2", server.base_url()))
            .with_credentials(test_credentials()),
    )
}

/// Authenticated client with an explicit Bitcoin network
pub fn authed_client_on(server: &MockServer, network: BitcoinNetwork) -> BudaClient {
    BudaClient::with_config(
        ClientConfig::new()
            .with_api_url(format!("{}/api/v2", server.base_url()))
            .with_credentials(test_credentials())
            .with_network(network),
    )
}

/// Unauthenticated client pointed at the mock server
pub fn public_client(server: &MockServer) -> BudaClient {
    BudaClient::with_config(
        ClientConfig::new().with_api_url(format!("{}/api/v2", server.base_url())),
    )
}

/// Minimal order body in the wire shape
pub fn order_json(id: u64, state: &str) -> Value {
    json!({
        "id": id,
        "market_id": "BTC-CLP",
        "type": "Bid",
        "state": state,
        "price_type": "limit",
        "limit": ["741000.0", "CLP"],
        "amount": ["0.1", "BTC"],
        "original_amount": ["0.1", "BTC"],
        "traded_amount": ["0.0", "BTC"],
        "created_at": "2017-09-01T14:41:19.000Z"
    })
}

/// One page of an order listing in the wire shape
pub fn order_page_json(ids_and_states: &[(u64, &str)], page: u32, total_pages: u32, total_count: u64) -> Value {
    let orders: Vec<Value> = ids_and_states
        .iter()
        .map(|(id, state)| order_json(*id, state))
        .collect();
    json!({
        "orders": orders,
        "meta": {
            "current_page": page,
            "total_pages": total_pages,
            "total_count": total_count
        }
    })
}
