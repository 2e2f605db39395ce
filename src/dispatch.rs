use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::Method;
use serde_json::Value;

use crate::config::{ClientConfig, Credentials};
use crate::encoding::{encode, Encoding};
use crate::error::{classify_response, is_success, Result, VeryfiError};
use crate::params::{FileAttachment, RequestParams};
use crate::signature::{sign, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::transport::{HttpSend, TransportRequest};

const CLIENT_ID_HEADER: &str = "Client-Id";

/// Builds, signs, sends and classifies every request.
#[derive(Debug)]
pub(crate) struct Dispatcher {
    credentials: Credentials,
    config: ClientConfig,
    transport: Box<dyn HttpSend>,
}

impl Dispatcher {
    pub(crate) fn new(
        credentials: Credentials,
        config: ClientConfig,
        transport: Box<dyn HttpSend>,
    ) -> Result<Self> {
        credentials.validate()?;
        Ok(Self {
            credentials,
            config,
            transport,
        })
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Static headers for a request; `Content-Type` is left out for multipart.
    fn headers(&self, encoding: Encoding) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(USER_AGENT.as_str(), &self.config.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(ct) = encoding.content_type() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        headers.insert(
            header_name(CLIENT_ID_HEADER)?,
            header_value(CLIENT_ID_HEADER, &self.credentials.client_id)?,
        );
        if let Some((username, api_key)) = self.credentials.api_key_pair() {
            headers.insert(
                AUTHORIZATION,
                header_value(
                    AUTHORIZATION.as_str(),
                    &format!("apikey {username}: {api_key}"),
                )?,
            );
        }
        Ok(headers)
    }

    /// Send one request and return the decoded JSON body.
    ///
    /// Non-success statuses are returned as a classified [`VeryfiError`]. An
    /// empty success body (e.g. `204`) decodes to `Value::Null`.
    pub(crate) fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        params: &RequestParams,
        file: Option<&FileAttachment>,
    ) -> Result<Value> {
        let url = self.config.endpoint_url(endpoint);
        let body = encode(&method, params, file)
            .map_err(|e| VeryfiError::Decode(format!("Cannot encode request body: {e}")))?;
        let mut headers = self.headers(body.encoding())?;

        if let Some(secret) = self.credentials.signing_secret() {
            let timestamp = unix_timestamp();
            let signature = sign(params, secret, timestamp);
            headers.insert(
                header_name(TIMESTAMP_HEADER)?,
                header_value(TIMESTAMP_HEADER, &timestamp.to_string())?,
            );
            headers.insert(
                header_name(SIGNATURE_HEADER)?,
                header_value(SIGNATURE_HEADER, &signature)?,
            );
        }

        debug!("{method} {url} ({:?} body)", body.encoding());

        let resp = self.transport.send(TransportRequest {
            method,
            url,
            headers,
            timeout: self.config.timeout,
            body,
        })?;

        if !is_success(resp.status) {
            return Err(classify_response(resp.status, &resp.body));
        }
        if resp.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&resp.body)
            .map_err(|e| VeryfiError::Decode(format!("Invalid JSON in response: {e}")))
    }
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| VeryfiError::InvalidHeader(format!("{name}: {e}")))
}

// The value is left out of the error: it may be a credential.
fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| VeryfiError::InvalidHeader(format!("{name}: {e}")))
}

fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
