//! Serde helpers for the tolerant wire schemas

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default instead of failing
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a string-keyed object, accepting `[]` and `null` as empty
pub(crate) fn lenient_map<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList<V> {
        Map(BTreeMap<String, V>),
        List(Vec<IgnoredAny>),
        Null,
    }

    Ok(match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => map,
        MapOrList::List(_) | MapOrList::Null => BTreeMap::new(),
    })
}

/// The `{"units": [...]}` payload shared by the per-unit endpoints
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct UnitsData<T> {
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) units: Vec<T>,
}

impl<T> Default for UnitsData<T> {
    fn default() -> Self {
        Self { units: Vec::new() }
    }
}

/// Keep a string only when it has content
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Same as [`non_empty`] for a borrowed string
pub(crate) fn non_empty_str(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Wire {
        #[serde(default, deserialize_with = "nullable")]
        count: i64,
        #[serde(default, deserialize_with = "lenient_map")]
        tanks: BTreeMap<String, f64>,
    }

    #[test]
    fn test_nullable_defaults() {
        let wire: Wire = serde_json::from_value(json!({"count": null})).unwrap();
        assert_eq!(wire.count, 0);
        let wire: Wire = serde_json::from_value(json!({"count": 4})).unwrap();
        assert_eq!(wire.count, 4);
    }

    #[test]
    fn test_lenient_map_accepts_empty_list() {
        let wire: Wire = serde_json::from_value(json!({"tanks": []})).unwrap();
        assert!(wire.tanks.is_empty());
        let wire: Wire = serde_json::from_value(json!({"tanks": null})).unwrap();
        assert!(wire.tanks.is_empty());
        let wire: Wire = serde_json::from_value(json!({})).unwrap();
        assert!(wire.tanks.is_empty());
    }

    #[test]
    fn test_lenient_map_reads_object() {
        let wire: Wire = serde_json::from_value(json!({"tanks": {"b": 2.0, "a": 1.0}})).unwrap();
        let keys: Vec<&str> = wire.tanks.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(non_empty_str(""), None);
    }
}
