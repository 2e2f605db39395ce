use std::time::Duration;

use crate::error::{Result, VeryfiError};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// API root used when no base URL is configured.
pub const BASE_URL: &str = "https://api.veryfi.com/api/";

/// API version segment appended to the base URL.
pub const API_VERSION: &str = "v7";

/// Request timeout in seconds. Bounds the whole round trip.
pub const API_TIMEOUT: u64 = 120;

/// Largest document the service accepts, in megabytes.
///
/// Not checked by this client; callers uploading large files should enforce
/// it themselves.
pub const MAX_FILE_SIZE_MB: u64 = 20;

/// Categories sent with an upload when the caller supplies none.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Advertising & Marketing",
    "Automotive",
    "Bank Charges & Fees",
    "Legal & Professional Services",
    "Insurance",
    "Meals & Entertainment",
    "Office Supplies & Software",
    "Taxes & Licenses",
    "Travel",
    "Rent & Lease",
    "Repairs & Maintenance",
    "Payroll",
    "Utilities",
    "Job Supplies",
    "Grocery",
];

/// Default `User-Agent` header value.
pub fn default_user_agent() -> String {
    format!("veryfi-rust/{}", env!("CARGO_PKG_VERSION"))
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Authentication material for the Veryfi API.
///
/// A client secret enables request signing; a username enables the
/// `Authorization: apikey {username}: {api_key}` header (an unset API key is
/// sent empty). Both may be configured at once, in
/// which case both are sent.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub api_key: Option<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            username: None,
            api_key: None,
        }
    }

    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    pub fn with_api_key(mut self, username: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.api_key = Some(api_key.into());
        self
    }

    /// Read credentials from `VERYFI_CLIENT_ID`, `VERYFI_CLIENT_SECRET`,
    /// `VERYFI_USERNAME` and `VERYFI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let client_id = env_var("VERYFI_CLIENT_ID").ok_or_else(|| {
            VeryfiError::InvalidConfig("VERYFI_CLIENT_ID is not set".into())
        })?;
        let creds = Self {
            client_id,
            client_secret: env_var("VERYFI_CLIENT_SECRET"),
            username: env_var("VERYFI_USERNAME"),
            api_key: env_var("VERYFI_API_KEY"),
        };
        creds.validate()?;
        Ok(creds)
    }

    /// Secret used for signing, if signing is enabled.
    pub(crate) fn signing_secret(&self) -> Option<&str> {
        self.client_secret.as_deref().filter(|s| !s.is_empty())
    }

    /// `(username, api_key)` when API-key authentication is enabled.
    ///
    /// A username alone is enough; a missing API key is sent as empty.
    pub(crate) fn api_key_pair(&self) -> Option<(&str, &str)> {
        match self.username.as_deref() {
            Some(u) if !u.is_empty() => Some((u, self.api_key.as_deref().unwrap_or(""))),
            _ => None,
        }
    }

    /// Check that a client id is present and at least one authentication
    /// mode is configured.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(VeryfiError::InvalidConfig("client_id must not be empty".into()));
        }
        if self.signing_secret().is_none() && self.api_key_pair().is_none() {
            return Err(VeryfiError::InvalidConfig(
                "either a client secret or a username must be configured".into(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Client configuration
// ---------------------------------------------------------------------------

/// Process-level settings: where to send requests and how long to wait.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.veryfi.com/api/`.
    pub base_url: String,
    /// Version segment, e.g. `v7`.
    pub api_version: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.into(),
            api_version: API_VERSION.into(),
            timeout: Duration::from_secs(API_TIMEOUT),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `VERYFI_URL`, `VERYFI_API_VERSION` and
    /// `VERYFI_TIMEOUT` (seconds) when present.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = env_var("VERYFI_URL") {
            config.base_url = url;
        }
        if let Some(version) = env_var("VERYFI_API_VERSION") {
            config.api_version = version;
        }
        if let Some(raw) = env_var("VERYFI_TIMEOUT") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                VeryfiError::InvalidConfig(format!("VERYFI_TIMEOUT is not a number: {raw}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Join base URL, API version, the `partner` segment and `endpoint`.
    ///
    /// `endpoint` is expected to start with `/`, e.g. `/documents/42/`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        let endpoint = if endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{endpoint}")
        };
        if version.is_empty() {
            format!("{base}/partner{endpoint}")
        } else {
            format!("{base}/{version}/partner{endpoint}")
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
