//! Payload encoding selection.
//!
//! | verb    | file attached | encoding        |
//! |---------|---------------|-----------------|
//! | `GET`   | no            | query string    |
//! | other   | no            | JSON body       |
//! | any     | yes           | multipart form  |

use reqwest::Method;
use serde_json::Value;

use crate::params::{plain_string, FileAttachment, RequestParams};

/// Name of the multipart part carrying the file content.
pub const FILE_PART_NAME: &str = "file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Query,
    Json,
    Multipart,
}

impl Encoding {
    /// `Content-Type` to send, or `None` when the transport must set it
    /// (multipart needs a boundary).
    pub fn content_type(self) -> Option<&'static str> {
        match self {
            Encoding::Query | Encoding::Json => Some("application/json"),
            Encoding::Multipart => None,
        }
    }
}

/// Pick the encoding for a request.
pub fn select_encoding(method: &Method, has_file: bool) -> Encoding {
    if has_file {
        Encoding::Multipart
    } else if *method == Method::GET {
        Encoding::Query
    } else {
        Encoding::Json
    }
}

/// One part of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

/// An encoded request body, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Query(Vec<(String, String)>),
    Json(Value),
    Multipart(Vec<MultipartPart>),
}

impl RequestBody {
    pub fn encoding(&self) -> Encoding {
        match self {
            RequestBody::Query(_) => Encoding::Query,
            RequestBody::Json(_) => Encoding::Json,
            RequestBody::Multipart(_) => Encoding::Multipart,
        }
    }
}

/// Encode `params` (and `file`, if any) for `method`.
pub fn encode(
    method: &Method,
    params: &RequestParams,
    file: Option<&FileAttachment>,
) -> serde_json::Result<RequestBody> {
    let body = match (select_encoding(method, file.is_some()), file) {
        (Encoding::Multipart, Some(file)) => {
            let mut parts: Vec<MultipartPart> = params
                .iter()
                .map(|(name, value)| MultipartPart::Text {
                    name: name.to_string(),
                    value: plain_string(value),
                })
                .collect();
            parts.push(MultipartPart::File {
                name: FILE_PART_NAME.into(),
                file_name: file.file_name.clone(),
                bytes: file.bytes.clone(),
            });
            RequestBody::Multipart(parts)
        }
        (Encoding::Query, _) => RequestBody::Query(params.to_string_pairs()),
        _ => RequestBody::Json(serde_json::to_value(params)?),
    };
    Ok(body)
}
