//! The value graph the scanner walks.
//!
//! [`Value`] is a closed sum over the five shapes a request argument can take.
//! Anything else (numbers, booleans, binary payloads) is rejected at the
//! boundary where it is converted into a `Value`, never passed through.

use std::{collections::BTreeMap, fmt};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{error::ScanError, record::Record};

/// Keyed mapping with text keys, iterated in key order.
pub type Mapping = BTreeMap<String, Value>;

/// An inbound request value.
pub enum Value {
    /// Absent value.
    Null,
    /// A string leaf.
    Text(String),
    /// Dynamic key set.
    Mapping(Mapping),
    /// Ordered list of values.
    Sequence(Vec<Value>),
    /// Fixed field set discovered through [`Record`].
    Record(Box<dyn Record>),
}

impl Value {
    /// Wraps a concrete record.
    pub fn record<R: Record>(record: R) -> Self {
        Self::Record(Box::new(record))
    }

    /// Name of the variant, for errors and logs.
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Record(_) => "record",
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrows the text of a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrows the entries of a [`Value::Mapping`].
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Borrows the elements of a [`Value::Sequence`].
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows the record of a [`Value::Record`].
    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Self::Record(record) => Some(&**record),
            _ => None,
        }
    }

    /// Recovers a concrete record, or returns the value unchanged.
    pub fn into_record<R: Record>(self) -> Result<R, Self> {
        match self {
            Self::Record(record) => record.downcast::<R>().map_err(Self::Record),
            other => Err(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Mapping(mapping) => f.debug_tuple("Mapping").field(mapping).finish(),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Record(record) => f.debug_tuple("Record").field(record).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a.same_fields(&**b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Option<String>> for Value {
    fn from(text: Option<String>) -> Self {
        text.map_or(Self::Null, Self::Text)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Mapping(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Converts a parsed JSON body.
///
/// Numbers and booleans are not one of the scanned shapes and fail with
/// [`ScanError::UnsupportedShape`].
impl TryFrom<serde_json::Value> for Value {
    type Error = ScanError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Self::Null),
            Json::String(text) => Ok(Self::Text(text)),
            Json::Array(items) => items
                .into_iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Sequence),
            Json::Object(entries) => entries
                .into_iter()
                .map(|(key, value)| Ok((key, Self::try_from(value)?)))
                .collect::<Result<Mapping, ScanError>>()
                .map(Self::Mapping),
            Json::Bool(_) => Err(ScanError::UnsupportedShape { shape: "boolean" }),
            Json::Number(_) => Err(ScanError::UnsupportedShape { shape: "number" }),
        }
    }
}

/// Records serialize as a map of their readable fields.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Mapping(mapping) => {
                let mut map = serializer.serialize_map(Some(mapping.len()))?;
                for (key, value) in mapping {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Record(record) => {
                let readable = record.fields().iter().filter(|field| field.is_readable());
                let mut map = serializer.serialize_map(None)?;
                for field in readable {
                    map.serialize_entry(field.name(), &record.get(field.name()))?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Mapping, Value};
    use crate::{error::ScanError, Record};

    #[derive(Debug, Default, Record)]
    struct Comment {
        author: String,
        body: Option<String>,
    }

    #[test]
    fn shapes_are_named() {
        assert_eq!(Value::Null.shape(), "null");
        assert_eq!(Value::from("x").shape(), "text");
        assert_eq!(Value::from(Mapping::new()).shape(), "mapping");
        assert_eq!(Value::from(Vec::<Value>::new()).shape(), "sequence");
        assert_eq!(Value::record(Comment::default()).shape(), "record");
    }

    #[test]
    fn json_objects_and_arrays_convert() {
        let value = Value::try_from(json!({
            "title": "hello",
            "tags": ["a", "b"],
            "parent": null,
        }))
        .unwrap();

        let expected: Value = [
            ("parent", Value::Null),
            ("tags", Value::from(vec!["a", "b"])),
            ("title", Value::from("hello")),
        ]
        .into_iter()
        .collect();
        assert_eq!(value, expected);
    }

    #[test]
    fn json_numbers_and_booleans_are_rejected() {
        let err = Value::try_from(json!({ "count": 3 })).unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedShape { shape: "number" }));

        let err = Value::try_from(json!([true])).unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedShape { shape: "boolean" }));
    }

    #[test]
    fn records_compare_by_readable_fields() {
        let a = Value::record(Comment {
            author: "ada".to_string(),
            body: None,
        });
        let b = Value::record(Comment {
            author: "ada".to_string(),
            body: None,
        });
        let c = Value::record(Comment {
            author: "bob".to_string(),
            body: None,
        });
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Value::Null);
    }

    #[test]
    fn into_record_recovers_concrete_type() {
        let value = Value::record(Comment {
            author: "ada".to_string(),
            body: Some("hi".to_string()),
        });
        let comment: Comment = value.into_record().unwrap();
        assert_eq!(comment.body.as_deref(), Some("hi"));

        let not_a_record = Value::from("text").into_record::<Comment>().unwrap_err();
        assert_eq!(not_a_record, Value::from("text"));
    }

    #[test]
    fn records_serialize_as_objects() {
        let value = Value::from(vec![Value::record(Comment {
            author: "ada".to_string(),
            body: None,
        })]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, json!([{ "author": "ada", "body": null }]));
    }

    #[test]
    fn optional_text_maps_none_to_null() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("x".to_string())), Value::from("x"));
    }
}
