//! Main REST client implementation

use crate::endpoints::{
    AccountEndpoints, FundingEndpoints, MarketEndpoints, PollOptions, TradingEndpoints,
};
use crate::error::RestResult;
use crate::http::Transport;
use crate::types::{
    Balance, BankAccount, BankAccountRequest, Deposit, FeePercentage, Market, OrderBook,
    OrderRequest, Quotation, Ticker, Withdrawal,
};
use buda_auth::Credentials;
use buda_types::{BitcoinNetwork, Order, OrderPage, OrderSide, OrderState, QuotationKind};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::info;

/// Production API endpoint
pub const PRODUCTION_API_URL: &str = "https://www.buda.com/api/v2";

/// Staging API endpoint (runs against Bitcoin testnet)
pub const STAGING_API_URL: &str = "https://stg.buda.com/api/v2";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Buda REST API client
///
/// Provides access to both public and private endpoints. The client holds no
/// mutable state beyond its fixed configuration; it is cheap to clone and
/// safe to share across tasks.
///
/// # Example
///
/// ```no_run
/// use buda_rest::{BudaClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BudaClient::new();
///     let ticker = client.ticker("BTC-CLP").await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BudaClient::with_credentials(creds);
///     let balances = auth_client.balances().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BudaClient {
    transport: Transport,
}

impl BudaClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).expect("valid header name");
            let value = HeaderValue::from_str(value).expect("valid header value");
            headers.insert(name, value);
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or("buda-rest/0.1.0"))
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        info!("Created Buda REST client for {}", config.api_url);

        Self {
            transport: Transport::new(
                http_client,
                config.api_url,
                config.credentials,
                config.network,
            ),
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.transport.has_credentials()
    }

    /// Generate a fresh v4 UUID, usable as a withdrawal idempotency key
    pub fn generate_uuid() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.transport)
    }

    /// List all tradable markets
    pub async fn markets(&self) -> RestResult<Vec<Market>> {
        self.market().markets().await
    }

    /// Get details for one market
    pub async fn market_details(&self, market_id: &str) -> RestResult<Market> {
        self.market().market_details(market_id).await
    }

    /// Get the ticker for a market
    pub async fn ticker(&self, market_id: &str) -> RestResult<Ticker> {
        self.market().ticker(market_id).await
    }

    /// Get the orderbook for a market
    pub async fn order_book(&self, market_id: &str) -> RestResult<OrderBook> {
        self.market().order_book(market_id).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        self.transport.require_credentials()?;
        Ok(AccountEndpoints::new(&self.transport))
    }

    /// Get balances for every currency
    pub async fn balances(&self) -> RestResult<Vec<Balance>> {
        self.account()?.balances().await
    }

    /// Get the balance of one currency
    pub async fn balance(&self, currency: &str) -> RestResult<Balance> {
        self.account()?.balance(currency).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        self.transport.require_credentials()?;
        Ok(TradingEndpoints::new(&self.transport))
    }

    /// Get the fee percentage a prospective order would pay
    pub async fn fee_percentage(
        &self,
        market_id: &str,
        side: OrderSide,
        market_order: bool,
    ) -> RestResult<FeePercentage> {
        self.trading()?
            .fee_percentage(market_id, side, market_order)
            .await
    }

    /// Get a quotation for a prospective order
    pub async fn quotation(
        &self,
        market_id: &str,
        kind: QuotationKind,
        amount: Decimal,
        limit: Option<Decimal>,
    ) -> RestResult<Quotation> {
        self.trading()?.quotation(market_id, kind, amount, limit).await
    }

    /// Get a reverse quotation for a prospective order
    pub async fn reverse_quotation(
        &self,
        market_id: &str,
        kind: QuotationKind,
        amount: Decimal,
        limit: Option<Decimal>,
    ) -> RestResult<Quotation> {
        self.trading()?
            .reverse_quotation(market_id, kind, amount, limit)
            .await
    }

    /// Place a new order
    pub async fn create_order(&self, market_id: &str, request: &OrderRequest) -> RestResult<Order> {
        self.trading()?.create_order(market_id, request).await
    }

    /// Fetch one order by id
    pub async fn get_order(&self, order_id: u64) -> RestResult<Order> {
        self.trading()?.get_order(order_id).await
    }

    /// Cancel an order by id
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Order> {
        self.trading()?.cancel_order(order_id).await
    }

    /// Fetch one page of a market's order listing
    pub async fn order_pages(
        &self,
        market_id: &str,
        page: u32,
        per_page: u32,
        state: Option<OrderState>,
    ) -> RestResult<OrderPage> {
        self.trading()?
            .order_pages(market_id, page, per_page, state)
            .await
    }

    /// Fetch every page of a market's order listing
    pub async fn fetch_all_orders(
        &self,
        market_id: &str,
        state_filter: Option<OrderState>,
    ) -> RestResult<OrderPage> {
        self.trading()?.fetch_all_orders(market_id, state_filter).await
    }

    /// Refetch an order until it reaches `target`
    pub async fn poll_order_state(
        &self,
        order: &Order,
        target: OrderState,
        options: &PollOptions,
    ) -> RestResult<Order> {
        self.trading()?.poll_order_state(order, target, options).await
    }

    /// Place an order and poll it until it trades
    pub async fn create_and_trade_order(
        &self,
        market_id: &str,
        request: &OrderRequest,
        options: &PollOptions,
    ) -> RestResult<Order> {
        self.trading()?
            .create_and_trade_order(market_id, request, options)
            .await
    }

    // ========================================================================
    // Private Funding Endpoints
    // ========================================================================

    /// Get funding endpoints (requires credentials)
    pub fn funding(&self) -> RestResult<FundingEndpoints<'_>> {
        self.transport.require_credentials()?;
        Ok(FundingEndpoints::new(&self.transport))
    }

    /// Register a bank account for fiat withdrawals
    pub async fn create_bank_account(
        &self,
        request: &BankAccountRequest,
    ) -> RestResult<BankAccount> {
        self.funding()?.create_bank_account(request).await
    }

    /// List registered bank accounts
    pub async fn bank_accounts(&self) -> RestResult<Vec<BankAccount>> {
        self.funding()?.bank_accounts().await
    }

    /// Request a withdrawal
    pub async fn withdraw(
        &self,
        currency: &str,
        amount: Decimal,
        target_address: &str,
        simulate: bool,
    ) -> RestResult<Withdrawal> {
        self.funding()?
            .withdraw(currency, amount, target_address, simulate)
            .await
    }

    /// Request a fiat deposit
    pub async fn deposit(
        &self,
        currency: &str,
        amount: Decimal,
        simulate: bool,
    ) -> RestResult<Deposit> {
        self.funding()?.deposit(currency, amount, simulate).await
    }
}

impl Default for BudaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BudaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudaClient")
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub api_url: String,
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Bitcoin network withdrawal addresses are validated against
    pub network: BitcoinNetwork,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Extra default headers sent with every request
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: PRODUCTION_API_URL.to_string(),
            credentials: None,
            network: BitcoinNetwork::Mainnet,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            default_headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration targeting production
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration targeting the staging environment
    ///
    /// Staging runs against Bitcoin testnet, so the network flag flips too.
    /// Both remain plain fields and can be overridden independently.
    pub fn staging() -> Self {
        Self {
            api_url: STAGING_API_URL.to_string(),
            network: BitcoinNetwork::Testnet,
            ..Self::default()
        }
    }

    /// Set the API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the Bitcoin network used for address validation
    pub fn with_network(mut self, network: BitcoinNetwork) -> Self {
        self.network = network;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add a default header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestError;

    #[test]
    fn test_client_without_credentials() {
        let client = BudaClient::new();
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_auth_required_error() {
        let client = BudaClient::new();
        assert!(matches!(client.account(), Err(RestError::ApiKeyRequired)));
        assert!(matches!(client.trading(), Err(RestError::ApiKeyRequired)));
        assert!(matches!(client.funding(), Err(RestError::ApiKeyRequired)));
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_header("X-Custom", "1");

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.default_headers.len(), 1);
        assert_eq!(config.network, BitcoinNetwork::Mainnet);
    }

    #[test]
    fn test_staging_preset_flips_network() {
        let config = ClientConfig::staging();
        assert_eq!(config.api_url, STAGING_API_URL);
        assert_eq!(config.network, BitcoinNetwork::Testnet);

        // Explicit override wins over the preset
        let overridden = ClientConfig::staging().with_network(BitcoinNetwork::Mainnet);
        assert_eq!(overridden.network, BitcoinNetwork::Mainnet);
    }

    #[test]
    fn test_generate_uuid_is_unique() {
        let a = BudaClient::generate_uuid();
        let b = BudaClient::generate_uuid();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
