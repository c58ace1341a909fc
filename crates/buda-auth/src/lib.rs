//! Credentials and request signing for the Buda exchange API
//!
//! Authenticated endpoints require three headers per request: the API key,
//! a strictly increasing nonce, and an HMAC-SHA384 signature over a canonical
//! message derived from the HTTP method, the request path, and (for requests
//! with a body) the base64 of the JSON payload.
//!
//! # Example
//!
//! ```no_run
//! use buda_auth::{Credentials, RequestSigner, SignedMethod};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!
//!     // Sign one GET request
//!     let signer = RequestSigner::new(&creds, "/api/v2/balances");
//!     let signature = signer.sign(SignedMethod::Get, None);
//!     println!("X-SIGNATURE: {}", signature);
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;

pub use credentials::{generate_nonce, Credentials, RequestSigner, SignedMethod};
pub use error::{AuthError, AuthResult};
