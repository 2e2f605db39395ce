//! Request parameters as an ordered association list.
//!
//! Insertion order is significant: the request signature is computed over
//! the parameters in the order they were added, so a map that reorders keys
//! would produce signatures the service rejects.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Ordered `name -> value` pairs sent with a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    entries: Vec<(String, Value)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. An existing parameter with the same name is
    /// replaced in place, keeping its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Each parameter rendered with [`plain_string`], in order.
    pub fn to_string_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), plain_string(v)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl From<serde_json::Map<String, Value>> for RequestParams {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

// Serialized as a JSON object whose keys keep insertion order.
impl Serialize for RequestParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// The plain string form of a parameter value.
///
/// Strings are used verbatim, numbers in decimal, booleans as `true` or
/// `false`, null as the empty string. Arrays and objects become compact JSON.
pub fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// A file sent as a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct FileAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn keeps_insertion_order() {
        let params = RequestParams::new()
            .with("zeta", 1)
            .with("alpha", "a")
            .with("mid", true);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"zeta":1,"alpha":"a","mid":true}"#
        );
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut params = RequestParams::new().with("a", 1).with("b", 2);
        params.insert("a", 3);
        assert_eq!(params.len(), 2);
        assert_eq!(params.to_string_pairs()[0], ("a".to_string(), "3".to_string()));
    }

    #[test]
    fn plain_string_forms() {
        assert_eq!(plain_string(&json!("Acme")), "Acme");
        assert_eq!(plain_string(&json!(42)), "42");
        assert_eq!(plain_string(&json!(1.5)), "1.5");
        assert_eq!(plain_string(&json!(false)), "false");
        assert_eq!(plain_string(&Value::Null), "");
        assert_eq!(plain_string(&json!(["Travel", "Grocery"])), r#"["Travel","Grocery"]"#);
    }
}
