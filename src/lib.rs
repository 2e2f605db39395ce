//! Veryfi API client library for Rust.
//!
//! A blocking client for the [Veryfi](https://www.veryfi.com) document data
//! extraction API: upload receipts and invoices by file or URL, then fetch,
//! list, update and delete the processed documents.
//!
//! Requests are authenticated with an `apikey` header, an HMAC-SHA256
//! request signature derived from the client secret, or both.
//!
//! # Quick Start
//!
//! ```no_run
//! use veryfi_client::{ClientConfig, CreateFromUrlParams, Credentials, VeryfiClient};
//!
//! let creds = Credentials::new("client_id")
//!     .with_client_secret("client_secret")
//!     .with_api_key("username", "api_key");
//! let client = VeryfiClient::new(creds, ClientConfig::default()).unwrap();
//!
//! let doc = client
//!     .documents()
//!     .create_from_url(&CreateFromUrlParams::from_url("https://example.com/receipt.jpg"))
//!     .unwrap();
//! println!("processed document {}", doc["id"]);
//! ```
//!
//! # Errors
//!
//! Failed calls return a [`VeryfiError`] variant chosen from the HTTP status,
//! so callers can branch on the kind:
//!
//! ```no_run
//! # use veryfi_client::{VeryfiClient, VeryfiError};
//! # let client = VeryfiClient::from_env().unwrap();
//! match client.documents().get(42) {
//!     Ok(doc) => println!("{doc}"),
//!     Err(VeryfiError::UnauthorizedAccessToken { message, .. }) => eprintln!("re-auth: {message}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod client;
pub mod config;
mod dispatch;
pub mod encoding;
pub mod error;
pub mod models;
pub mod params;
pub mod signature;
pub mod transport;

// Re-export the main public types at the crate root for convenience.
pub use client::{CreateFromFileParams, CreateFromUrlParams, DocumentsClient, VeryfiClient};
pub use config::{ClientConfig, Credentials};
pub use error::{ErrorEnvelope, Result, VeryfiError};
pub use models::Document;
pub use params::{FileAttachment, RequestParams};
pub use transport::{HttpSend, ReqwestTransport, TransportRequest, TransportResponse};

pub use reqwest::Method;
