//! Validated page payloads.

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A page payload that has passed its schema.
///
/// Only [`PayloadSchema::validate`](crate::PayloadSchema::validate) creates
/// one, and there are no mutable accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePayload {
    schema: String,
    fields: Map<String, Value>,
}

impl PagePayload {
    pub(crate) fn new(schema: String, fields: Map<String, Value>) -> Self {
        Self { schema, fields }
    }

    /// Name of the schema that validated this payload.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Get a field value by wire key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check whether a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields, including undeclared pass-through fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over field names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume and return the underlying mapping.
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Copy the payload into a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Decode into a typed props struct.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }
}

impl Serialize for PagePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn payload(value: Value) -> PagePayload {
        match value {
            Value::Object(map) => PagePayload::new("Test".to_string(), map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_accessors() {
        let p = payload(json!({ "id": "abc", "count": 2 }));

        assert_eq!(p.schema(), "Test");
        assert_eq!(p.get("id"), Some(&json!("abc")));
        assert!(p.contains("count"));
        assert!(!p.contains("missing"));
        assert_eq!(p.len(), 2);
        assert!(!p.is_empty());
        assert_eq!(p.iter().count(), 2);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let p = payload(json!({ "id": "abc" }));
        let text = serde_json::to_string(&p).unwrap();
        assert_eq!(text, r#"{"id":"abc"}"#);
    }

    #[test]
    fn test_decode_typed_view() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Props {
            id: String,
            count: u64,
        }

        let p = payload(json!({ "id": "abc", "count": 2, "extra": true }));
        let props: Props = p.decode().unwrap();
        assert_eq!(
            props,
            Props {
                id: "abc".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn test_into_map_preserves_fields() {
        let source = json!({ "a": [1, 2], "b": null });
        let p = payload(source.clone());
        assert_eq!(Value::Object(p.into_map()), source);
    }
}
