use serde_json::Value;

/// A processed document as returned by the service.
///
/// The shape is owned by the API; this crate passes it through untouched.
/// Use `serde_json::from_value` to map it onto your own types.
pub type Document = Value;

/// Key the list endpoint may wrap its results under.
pub const DOCUMENTS_KEY: &str = "documents";

/// Unwrap `{ "documents": ... }` when present, otherwise return the body as is.
pub fn unwrap_document_list(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key(DOCUMENTS_KEY) => {
            map.remove(DOCUMENTS_KEY).unwrap_or(Value::Null)
        }
        other => other,
    }
}
