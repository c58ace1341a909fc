//! Authentication credentials for the Buda API
//!
//! Implements the HMAC-SHA384 signing scheme required by authenticated
//! endpoints.
//!
//! # Security
//!
//! API secrets are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha384;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

type HmacSha384 = Hmac<Sha384>;

/// Last nonce handed out, kept strictly increasing across rapid requests
static LAST_NONCE: AtomicU64 = AtomicU64::new(0);

/// Generate a unique nonce for one request
///
/// Nonces are epoch milliseconds, bumped past the previous value when two
/// requests land inside the same millisecond. One nonce is minted per
/// request and reused across that request's header fields only.
pub fn generate_nonce() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64;

    let mut last = LAST_NONCE.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_NONCE.compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => last = observed,
        }
    }
}

/// HTTP methods the exchange signs
///
/// Signing is defined for exactly these three verbs; anything else is
/// rejected at the type level before a signature can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignedMethod {
    /// GET request, no body
    Get,
    /// POST request with a JSON body
    Post,
    /// PUT request with a JSON body
    Put,
}

impl SignedMethod {
    /// Returns the method as spelled in the canonical message
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for SignedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API credentials for authenticated requests
///
/// The secret is automatically zeroized when the Credentials are dropped,
/// preventing sensitive data from remaining in memory.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// API secret (zeroized on drop)
    api_secret: SecretBox<String>,
}

impl Credentials {
    /// Create new credentials from API key and secret
    ///
    /// # Arguments
    /// * `api_key` - Your Buda API key
    /// * `api_secret` - Your Buda API secret
    ///
    /// # Returns
    /// Result containing Credentials, or an error when either value is empty
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretBox::new(Box::new(api_secret)),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BUDA_API_KEY` and `BUDA_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("BUDA_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("BUDA_API_KEY".to_string()))?;
        let api_secret = std::env::var("BUDA_API_SECRET")
            .map_err(|_| AuthError::EnvVarNotSet("BUDA_API_SECRET".to_string()))?;

        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a request
    ///
    /// Canonical message:
    /// - without a body: `"{METHOD} {PATH} {NONCE}"`
    /// - with a body: `"{METHOD} {PATH} {BASE64(body)} {NONCE}"`
    ///
    /// The digest is HMAC-SHA384 keyed by the API secret, emitted as
    /// lowercase hex. The path is signed verbatim, query string included.
    /// Deterministic: the nonce is supplied by the caller, never minted here.
    ///
    /// # Arguments
    /// * `method` - One of the three signed verbs
    /// * `path` - URL path component, including any query string
    /// * `nonce` - Nonce for this request (see [`generate_nonce`])
    /// * `body` - Raw JSON bytes being sent, if any
    ///
    /// # Returns
    /// Lowercase hex signature
    pub fn sign(&self, method: SignedMethod, path: &str, nonce: u64, body: Option<&[u8]>) -> String {
        let message = match body {
            Some(bytes) => format!("{} {} {} {}", method, path, BASE64.encode(bytes), nonce),
            None => format!("{} {} {}", method, path, nonce),
        };

        let mut mac = HmacSha384::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates a new SecretBox with the same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretBox::new(Box::new(self.api_secret.expose_secret().clone())),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", &self.api_key[..8.min(self.api_key.len())]),
            )
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Request signer binding credentials, a path, and one freshly minted nonce
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    path: String,
    nonce: u64,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials, path: impl Into<String>) -> Self {
        Self {
            credentials,
            path: path.into(),
            nonce: generate_nonce(),
        }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request with the given body bytes, if any
    pub fn sign(&self, method: SignedMethod, body: Option<&[u8]>) -> String {
        self.credentials.sign(method, &self.path, self.nonce, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> Credentials {
        Credentials::new("API_KEY", "secret").unwrap()
    }

    #[test]
    fn test_nonce_strictly_increasing() {
        let a = generate_nonce();
        let b = generate_nonce();
        let c = generate_nonce();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(Credentials::new("", "secret").is_err());
        assert!(Credentials::new("key", "").is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = test_credentials();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_get_signature_known_vector() {
        let creds = test_credentials();
        let signature = creds.sign(SignedMethod::Get, "/api/v2/markets", 1616492376594, None);

        assert_eq!(
            signature,
            "25ddb07ace92821e9da15e1e4e7bb0768ac0a3508da7eb7df74f69f831b32d625279a5844622fa37054c7e0bbb4d8314"
        );
    }

    #[test]
    fn test_body_signature_known_vector() {
        let creds = test_credentials();
        let body = br#"{"amount":"1.0"}"#;
        let signature = creds.sign(SignedMethod::Post, "/api/v2/orders", 1616492376594, Some(body));

        assert_eq!(
            signature,
            "1b6be24f959e8b362953baa2a8700e0357735c005c6573c50f5fd9f485761ffe3d1f65b435e6c2ae7b41e68a2266cc08"
        );
    }

    #[test]
    fn test_signature_changes_with_each_input() {
        let creds = test_credentials();
        let base = creds.sign(SignedMethod::Get, "/api/v2/markets", 1616492376594, None);

        assert_ne!(base, creds.sign(SignedMethod::Put, "/api/v2/markets", 1616492376594, None));
        assert_ne!(base, creds.sign(SignedMethod::Get, "/api/v2/balances", 1616492376594, None));
        assert_ne!(base, creds.sign(SignedMethod::Get, "/api/v2/markets", 1616492376595, None));
        assert_ne!(
            base,
            creds.sign(SignedMethod::Get, "/api/v2/markets", 1616492376594, Some(b"{}"))
        );

        let other = Credentials::new("API_KEY", "other-secret").unwrap();
        assert_ne!(base, other.sign(SignedMethod::Get, "/api/v2/markets", 1616492376594, None));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let creds = test_credentials();
        let first = creds.sign(SignedMethod::Get, "/api/v2/markets?page=2", 42, None);
        let second = creds.sign(SignedMethod::Get, "/api/v2/markets?page=2", 42, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_request_signer_reuses_one_nonce() {
        let creds = test_credentials();
        let signer = RequestSigner::new(&creds, "/api/v2/balances");
        let nonce = signer.nonce();

        let direct = creds.sign(SignedMethod::Get, "/api/v2/balances", nonce, None);
        assert_eq!(signer.sign(SignedMethod::Get, None), direct);
        assert_eq!(signer.nonce(), nonce);
    }
}
