//! Host value model used by assertions and the deep comparator

use indexmap::IndexMap;
use std::fmt;

/// A value from the scripting host, as seen by assertions
///
/// The host is dynamically typed, so assertion operands arrive as a tagged
/// union. Anything with enumerable key-value slots (sequences, keyed
/// tables, structured records) counts as a container and is compared by
/// keyed membership; everything else is a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Ordered sequence; slots are keyed by their decimal index
    Seq(Vec<Value>),
    /// Keyed table, insertion-ordered
    Map(IndexMap<String, Value>),
    /// Structured record reflected as a named field list
    Record {
        name: String,
        fields: IndexMap<String, Value>,
    },
}

impl Value {
    /// Build a keyed table from `(key, value)` pairs, preserving order
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a structured record from its type name and field pairs
    pub fn record<K, V, I>(name: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Record {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value has enumerable key-value slots
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Seq(_) | Value::Map(_) | Value::Record { .. })
    }

    /// Look up a slot by key
    ///
    /// Sequence keys are decimal indices; a key that does not parse as an
    /// index is simply absent.
    pub fn slot(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Seq(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::Map(entries) => entries.get(key),
            Value::Record { fields, .. } => fields.get(key),
            _ => None,
        }
    }

    /// Enumerate `(key, value)` slot pairs in this value's own order
    ///
    /// Scalars and Null have no slots.
    pub fn slots(&self) -> Vec<(String, &Value)> {
        match self {
            Value::Seq(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            Value::Map(entries) => entries.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Value::Record { fields, .. } => fields.iter().map(|(k, v)| (k.clone(), v)).collect(),
            _ => Vec::new(),
        }
    }

    /// Host-style coerced equality
    ///
    /// Int and Float compare numerically across variants, and a Str
    /// compares equal to a number it parses to - so `1` loosely equals
    /// `"1"`. This coercion is deliberate; tighten at the call site if it
    /// is not wanted. Same-variant values compare structurally.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(s), num) | (num, Value::Str(s)) if num.numeric().is_some() => {
                s.trim().parse::<f64>().ok() == num.numeric()
            }
            _ => self == other,
        }
    }

    fn numeric(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// The string form interpolated into failure messages
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            container => write!(f, "{}", serde_json::Value::from(container.clone())),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    /// JSON surface form; records flatten to objects (their name has no
    /// JSON representation)
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            Value::Float(x) => serde_json::Value::from(x),
            Value::Str(s) => serde_json::Value::String(s),
            Value::Seq(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(entries) | Value::Record {
                fields: entries, ..
            } => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slot_lookup_across_container_kinds() {
        let seq = Value::from(vec![Value::Int(10), Value::Int(20)]);
        assert_eq!(seq.slot("1"), Some(&Value::Int(20)));
        assert_eq!(seq.slot("2"), None);
        assert_eq!(seq.slot("not_an_index"), None);

        let map = Value::map([("a", 1)]);
        assert_eq!(map.slot("a"), Some(&Value::Int(1)));
        assert_eq!(map.slot("b"), None);

        let record = Value::record("Point", [("x", 3), ("y", 4)]);
        assert_eq!(record.slot("y"), Some(&Value::Int(4)));

        assert_eq!(Value::Int(5).slot("0"), None);
    }

    #[test]
    fn test_slots_preserve_insertion_order() {
        let map = Value::map([("b", 1), ("a", 2)]);
        let keys: Vec<String> = map.slots().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_loose_equality_coercions() {
        assert!(Value::Int(1).loose_eq(&Value::from("1")));
        assert!(Value::from("2.5").loose_eq(&Value::Float(2.5)));
        assert!(Value::Int(3).loose_eq(&Value::Float(3.0)));
        assert!(!Value::Int(1).loose_eq(&Value::from("2")));
        assert!(!Value::from("abc").loose_eq(&Value::Int(1)));
        // Strings compare as strings, not as parsed numbers
        assert!(!Value::from("1.0").loose_eq(&Value::from("1")));
        assert!(!Value::Bool(true).loose_eq(&Value::Int(1)));
    }

    #[test]
    fn test_display_string_forms() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Float(10.0).to_string(), "10");
        assert_eq!(Value::Float(10.6).to_string(), "10.6");
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(
            Value::from(json!({"a": [1, 2]})).to_string(),
            r#"{"a":[1,2]}"#
        );
    }

    #[test]
    fn test_json_conversion() {
        let value = Value::from(json!({"n": 1, "f": 1.5, "s": "x", "list": [true, null]}));
        assert_eq!(value.slot("n"), Some(&Value::Int(1)));
        assert_eq!(value.slot("f"), Some(&Value::Float(1.5)));
        assert_eq!(value.slot("s"), Some(&Value::from("x")));
        let list = value.slot("list").expect("list slot");
        assert_eq!(list.slot("0"), Some(&Value::Bool(true)));
        assert_eq!(list.slot("1"), Some(&Value::Null));

        let record = Value::record("Point", [("x", 1)]);
        assert_eq!(serde_json::Value::from(record), json!({"x": 1}));
    }
}
