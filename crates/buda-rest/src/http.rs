//! Request dispatch and response normalization
//!
//! One shared transport performs every HTTP round trip: it resolves the URL,
//! signs the path (query string included) with a freshly minted nonce, sends
//! the three authentication headers, and folds the outcome into
//! [`RestResult`]. Authenticated calls made without credentials fail here,
//! before any I/O.

use crate::error::{RestError, RestResult};
use buda_auth::{Credentials, RequestSigner, SignedMethod};
use buda_types::BitcoinNetwork;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

/// Structured error body the server attaches to non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// Shared request dispatcher
///
/// Read-only after construction; cloning the owning client shares the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: Client,
    base_url: String,
    credentials: Option<Credentials>,
    network: BitcoinNetwork,
}

impl Transport {
    pub(crate) fn new(
        http: Client,
        base_url: String,
        credentials: Option<Credentials>,
        network: BitcoinNetwork,
    ) -> Self {
        Self { http, base_url, credentials, network }
    }

    /// Returns true if credentials are configured
    pub(crate) fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Bitcoin network withdrawals validate against
    pub(crate) fn network(&self) -> BitcoinNetwork {
        self.network
    }

    /// Credentials, or the fail-fast error for authenticated endpoints
    pub(crate) fn require_credentials(&self) -> RestResult<&Credentials> {
        self.credentials.as_ref().ok_or(RestError::ApiKeyRequired)
    }

    fn request_url(&self, path: &str) -> RestResult<Url> {
        let full = format!("{}{}", self.base_url, path);
        Url::parse(&full).map_err(|e| RestError::InvalidParameter(format!("bad url {}: {}", full, e)))
    }

    /// Path component signed per request: the resolved URL path plus any
    /// query string, verbatim
    fn signed_path(url: &Url) -> String {
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }

    /// Unauthenticated GET
    pub(crate) async fn get_public<T: DeserializeOwned>(&self, path: &str) -> RestResult<T> {
        let url = self.request_url(path)?;
        debug!("GET {} (public)", path);

        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    /// Authenticated GET
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> RestResult<T> {
        self.send_signed(SignedMethod::Get, path, None).await
    }

    /// Authenticated POST with a JSON body
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> RestResult<T> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
        self.send_signed(SignedMethod::Post, path, Some(bytes)).await
    }

    /// Authenticated PUT with a JSON body
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> RestResult<T> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
        self.send_signed(SignedMethod::Put, path, Some(bytes)).await
    }

    /// Sign and send one request
    ///
    /// The exact bytes that go out on the wire are the bytes that were
    /// signed; one nonce covers all three auth headers of this request.
    async fn send_signed<T: DeserializeOwned>(
        &self,
        method: SignedMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> RestResult<T> {
        let credentials = self.require_credentials()?;
        let url = self.request_url(path)?;

        let signer = RequestSigner::new(credentials, Self::signed_path(&url));
        let signature = signer.sign(method, body.as_deref());

        debug!("{} {} (authenticated)", method, path);

        let mut request = match method {
            SignedMethod::Get => self.http.get(url),
            SignedMethod::Post => self.http.post(url),
            SignedMethod::Put => self.http.put(url),
        };

        request = request
            .header("X-API-KEY", signer.api_key())
            .header("X-NONCE", signer.nonce().to_string())
            .header("X-SIGNATURE", signature);

        if let Some(bytes) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Fold a raw HTTP response into the uniform result shape
    async fn decode<T: DeserializeOwned>(response: Response) -> RestResult<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes).map_err(|e| RestError::Parse(e.to_string()));
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let detail: Option<ApiErrorBody> = serde_json::from_slice(&bytes).ok();

        Err(RestError::Api {
            status: status.as_u16(),
            code: detail.as_ref().and_then(|d| d.code.clone()),
            message: detail
                .and_then(|d| d.message)
                .unwrap_or_else(|| status.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_path_includes_query() {
        let url = Url::parse("https://www.buda.com/api/v2/markets/btc-clp/orders?page=2&per=300")
            .unwrap();
        assert_eq!(
            Transport::signed_path(&url),
            "/api/v2/markets/btc-clp/orders?page=2&per=300"
        );
    }

    #[test]
    fn test_signed_path_without_query() {
        let url = Url::parse("https://www.buda.com/api/v2/balances").unwrap();
        assert_eq!(Transport::signed_path(&url), "/api/v2/balances");
    }

    #[test]
    fn test_missing_credentials_fail_fast() {
        let transport = Transport::new(
            Client::new(),
            "https://www.buda.com/api/v2".to_string(),
            None,
            BitcoinNetwork::Mainnet,
        );
        assert!(matches!(
            transport.require_credentials(),
            Err(RestError::ApiKeyRequired)
        ));
    }
}
