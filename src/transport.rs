use std::fmt::Debug;
use std::time::Duration;

use reqwest::blocking::{multipart, Client};
use reqwest::header::HeaderMap;
use reqwest::Method;

use crate::encoding::{MultipartPart, RequestBody};
use crate::error::{Result, VeryfiError};

/// A fully prepared outbound request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub timeout: Duration,
    pub body: RequestBody,
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends one HTTP request and returns the response, whatever its status.
///
/// Implementations perform exactly one round trip per call. Swap in a custom
/// implementation to route requests through a proxy layer or to test without
/// a network.
pub trait HttpSend: Debug + Send + Sync {
    fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// [`HttpSend`] over a blocking `reqwest` client with a cookie store.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one with custom TLS or proxy settings.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpSend for ReqwestTransport {
    fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let builder = self
            .client
            .request(request.method, request.url.as_str())
            .headers(request.headers)
            .timeout(request.timeout);

        let builder = match request.body {
            RequestBody::Query(pairs) => builder.query(&pairs),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        let resp = builder.send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(TransportResponse { status, body })
    }
}

fn build_form(parts: Vec<MultipartPart>) -> Result<multipart::Form> {
    let mut form = multipart::Form::new();
    for part in parts {
        form = match part {
            MultipartPart::Text { name, value } => form.text(name, value),
            MultipartPart::File {
                name,
                file_name,
                bytes,
            } => {
                let part = multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("application/octet-stream")
                    .map_err(|e| VeryfiError::InvalidHeader(format!("Invalid MIME type: {e}")))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
