use std::fs;
use std::path::Path;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use reqwest::Method;
use serde_json::Value;

use crate::config::{ClientConfig, Credentials, DEFAULT_CATEGORIES};
use crate::dispatch::Dispatcher;
use crate::error::{Result, VeryfiError};
use crate::models::{unwrap_document_list, Document};
use crate::params::{FileAttachment, RequestParams};
use crate::transport::{HttpSend, ReqwestTransport};

const DOCUMENTS_ENDPOINT: &str = "/documents/";

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// Main entry point for interacting with the Veryfi API.
///
/// ```no_run
/// use veryfi_client::{ClientConfig, Credentials, VeryfiClient};
///
/// let creds = Credentials::new("client_id")
///     .with_client_secret("client_secret")
///     .with_api_key("username", "api_key");
/// let client = VeryfiClient::new(creds, ClientConfig::default()).unwrap();
/// let doc = client.documents().get(42).unwrap();
/// println!("{}", doc["vendor"]["name"]);
/// ```
#[derive(Debug)]
pub struct VeryfiClient {
    dispatcher: Dispatcher,
}

impl VeryfiClient {
    /// Create a client backed by a blocking `reqwest` transport.
    ///
    /// Fails with [`VeryfiError::InvalidConfig`] when neither a client secret
    /// nor a username and API key are configured.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Self::with_transport(credentials, config, ReqwestTransport::new()?)
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(
        credentials: Credentials,
        config: ClientConfig,
        transport: impl HttpSend + 'static,
    ) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::new(credentials, config, Box::new(transport))?,
        })
    }

    /// Create a client from `VERYFI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?, ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    /// Send a signed request to any partner endpoint and return the JSON body.
    ///
    /// `endpoint` is relative to `{base_url}/{api_version}/partner`, e.g.
    /// `/documents/42/`.
    pub fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &RequestParams,
        file: Option<&FileAttachment>,
    ) -> Result<Value> {
        self.dispatcher.dispatch(method, endpoint, params, file)
    }

    pub fn documents(&self) -> DocumentsClient<'_> {
        DocumentsClient { client: self }
    }
}

// ===========================================================================
// Documents
// ===========================================================================

pub struct DocumentsClient<'a> {
    client: &'a VeryfiClient,
}

/// Parameters for uploading a local file.
#[derive(Debug, Clone, Default)]
pub struct CreateFromFileParams {
    /// Categories to pick from; [`DEFAULT_CATEGORIES`] when `None`.
    pub categories: Option<Vec<String>>,
    pub delete_after_processing: bool,
}

/// Parameters for processing a document hosted at a URL.
///
/// Set one of `file_url` or `file_urls`. The two are not checked against
/// each other; the service decides what to do when both are present.
#[derive(Debug, Clone, Default)]
pub struct CreateFromUrlParams {
    pub file_url: Option<String>,
    pub file_urls: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub delete_after_processing: bool,
    /// Non-zero trades extraction accuracy for latency.
    pub boost_mode: u8,
    pub external_id: Option<String>,
    pub max_pages_to_process: Option<u32>,
}

impl CreateFromUrlParams {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            file_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn from_urls(urls: Vec<String>) -> Self {
        Self {
            file_urls: Some(urls),
            ..Default::default()
        }
    }
}

impl DocumentsClient<'_> {
    /// List processed documents.
    ///
    /// Returns the list under the response's `documents` key, or the whole
    /// body when it has none.
    pub fn list(&self) -> Result<Value> {
        let data = self.dispatch(Method::GET, DOCUMENTS_ENDPOINT, &RequestParams::new())?;
        Ok(unwrap_document_list(data))
    }

    /// Get a single processed document.
    pub fn get(&self, document_id: u64) -> Result<Document> {
        self.dispatch(Method::GET, &document_path(document_id), &RequestParams::new())
    }

    /// Upload a local file, sent base64-encoded inside a JSON body.
    ///
    /// The whole file is read into memory. No size limit is enforced here; see
    /// [`MAX_FILE_SIZE_MB`](crate::config::MAX_FILE_SIZE_MB).
    pub fn create_from_file(
        &self,
        path: impl AsRef<Path>,
        params: &CreateFromFileParams,
    ) -> Result<Document> {
        let file = read_file(path.as_ref())?;
        let args = RequestParams::new()
            .with("file_name", file.file_name)
            .with("file_data", BASE64_STANDARD.encode(&file.bytes))
            .with("categories", categories_value(params.categories.as_deref()))
            .with("auto_delete", params.delete_after_processing);
        self.dispatch(Method::POST, DOCUMENTS_ENDPOINT, &args)
    }

    /// Upload a local file as a multipart form.
    ///
    /// The file travels as a binary part named `file` carrying its original
    /// filename; the remaining fields become text parts.
    pub fn upload_file(
        &self,
        path: impl AsRef<Path>,
        params: &CreateFromFileParams,
    ) -> Result<Document> {
        let file = read_file(path.as_ref())?;
        let args = RequestParams::new()
            .with("file_name", file.file_name.clone())
            .with("categories", categories_value(params.categories.as_deref()))
            .with("auto_delete", params.delete_after_processing);
        self.client
            .request(Method::POST, DOCUMENTS_ENDPOINT, &args, Some(&file))
    }

    /// Process a document hosted at one or more URLs.
    pub fn create_from_url(&self, params: &CreateFromUrlParams) -> Result<Document> {
        let mut args = RequestParams::new()
            .with("auto_delete", params.delete_after_processing)
            .with("boost_mode", params.boost_mode);
        if let Some(ref categories) = params.categories {
            args.insert("categories", categories.clone());
        }
        if let Some(ref v) = params.external_id {
            args.insert("external_id", v.clone());
        }
        if let Some(ref v) = params.file_url {
            args.insert("file_url", v.clone());
        }
        if let Some(ref v) = params.file_urls {
            args.insert("file_urls", v.clone());
        }
        if let Some(v) = params.max_pages_to_process {
            args.insert("max_pages_to_process", v);
        }
        self.dispatch(Method::POST, DOCUMENTS_ENDPOINT, &args)
    }

    /// Update fields of a processed document.
    ///
    /// Returns the updated document. Fields the service does not allow to be
    /// written are ignored and the document comes back unchanged.
    pub fn update(&self, document_id: u64, fields: &RequestParams) -> Result<Document> {
        self.dispatch(Method::PUT, &document_path(document_id), fields)
    }

    /// Delete a processed document.
    pub fn delete(&self, document_id: u64) -> Result<()> {
        self.dispatch(Method::DELETE, &document_path(document_id), &RequestParams::new())?;
        Ok(())
    }

    fn dispatch(&self, method: Method, endpoint: &str, params: &RequestParams) -> Result<Value> {
        self.client.request(method, endpoint, params, None)
    }
}

fn document_path(document_id: u64) -> String {
    format!("{DOCUMENTS_ENDPOINT}{document_id}/")
}

fn categories_value(categories: Option<&[String]>) -> Value {
    match categories {
        Some(list) => list.iter().cloned().collect(),
        None => DEFAULT_CATEGORIES.iter().map(|c| Value::from(*c)).collect(),
    }
}

fn read_file(path: &Path) -> Result<FileAttachment> {
    let bytes = fs::read(path).map_err(|source| VeryfiError::LocalIo {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(FileAttachment::new(file_name, bytes))
}
