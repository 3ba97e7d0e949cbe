//! Loosely typed JSON values
//!
//! The API is inconsistent about how it encodes numbers: CAN values, IMEIs
//! and ids inside generic `value` slots arrive as JSON numbers in some
//! responses and as strings in others. [`JsonScalar`] captures whatever was
//! sent and offers one coercion rule for every such field.

use serde::{Deserialize, Serialize};

/// A JSON value whose type is not fixed by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonScalar {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Arrays and objects, kept verbatim
    Composite(serde_json::Value),
}

impl JsonScalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric value of the field.
    ///
    /// Strings are parsed after trimming. Anything that does not parse as a
    /// number yields `0.0`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(n) => n.as_f64().unwrap_or(0.0),
            Self::String(s) => s.trim().parse().unwrap_or(0.0),
            Self::Null | Self::Bool(_) | Self::Composite(_) => 0.0,
        }
    }

    /// Integer value of the field, with the same fallback to zero as
    /// [`as_f64`](Self::as_f64). Integral floats such as `12.0` are accepted.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(integral))
                .unwrap_or(0),
            Self::String(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
                    .unwrap_or(0)
            }
            Self::Null | Self::Bool(_) | Self::Composite(_) => 0,
        }
    }

    /// The value only when it was sent as a JSON number
    pub fn as_strict_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Text form of the value; `None` for null
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Composite(v) => Some(v.to_string()),
        }
    }

    /// Boolean flag derived by numeric threshold: true when `value > threshold`
    pub fn above(&self, threshold: f64) -> bool {
        self.as_f64() > threshold
    }

    /// Boolean flag that tolerates `true`/`false`, `0`/`1` and numeric strings
    pub fn as_flag(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::String(s) if s.trim().eq_ignore_ascii_case("true") => true,
            other => other.above(0.0),
        }
    }
}

fn integral(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f.is_finite() {
        Some(f as i64)
    } else {
        None
    }
}

impl From<&str> for JsonScalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<f64> for JsonScalar {
    fn from(f: f64) -> Self {
        serde_json::Number::from_f64(f)
            .map(Self::Number)
            .unwrap_or(Self::Null)
    }
}

impl From<i64> for JsonScalar {
    fn from(i: i64) -> Self {
        Self::Number(i.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn scalar(value: serde_json::Value) -> JsonScalar {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_deserialize_variants() {
        assert_eq!(scalar(json!(null)), JsonScalar::Null);
        assert_eq!(scalar(json!(true)), JsonScalar::Bool(true));
        assert_eq!(scalar(json!("abc")), JsonScalar::from("abc"));
        assert_eq!(scalar(json!(12)), JsonScalar::from(12));
        assert!(matches!(scalar(json!([1, 2])), JsonScalar::Composite(_)));
        assert!(matches!(scalar(json!({"a": 1})), JsonScalar::Composite(_)));
    }

    #[rstest]
    #[case(json!(12.5), 12.5)]
    #[case(json!("12.5"), 12.5)]
    #[case(json!(" 12.5 "), 12.5)]
    #[case(json!(1500), 1500.0)]
    #[case(json!("1500"), 1500.0)]
    #[case(json!("n/a"), 0.0)]
    #[case(json!(""), 0.0)]
    #[case(json!(true), 0.0)]
    #[case(json!(null), 0.0)]
    #[case(json!({"value": 3}), 0.0)]
    fn test_as_f64(#[case] input: serde_json::Value, #[case] expected: f64) {
        assert_eq!(scalar(input).as_f64(), expected);
    }

    #[test]
    fn test_string_and_number_coerce_identically() {
        assert_eq!(scalar(json!("12.5")).as_f64(), scalar(json!(12.5)).as_f64());
    }

    #[rstest]
    #[case(json!(42), 42)]
    #[case(json!("42"), 42)]
    #[case(json!(42.0), 42)]
    #[case(json!("42.0"), 42)]
    #[case(json!(42.5), 0)]
    #[case(json!("x"), 0)]
    fn test_as_i64(#[case] input: serde_json::Value, #[case] expected: i64) {
        assert_eq!(scalar(input).as_i64(), expected);
    }

    #[rstest]
    #[case(json!(356938035643809_i64), Some("356938035643809"))]
    #[case(json!("356938035643809"), Some("356938035643809"))]
    #[case(json!(12.5), Some("12.5"))]
    #[case(json!(false), Some("false"))]
    #[case(json!(null), None)]
    fn test_as_text(#[case] input: serde_json::Value, #[case] expected: Option<&str>) {
        assert_eq!(scalar(input).as_text().as_deref(), expected);
    }

    #[rstest]
    #[case(json!(1), 0.5, true)]
    #[case(json!("1"), 0.5, true)]
    #[case(json!(0.5), 0.5, false)]
    #[case(json!(0), 0.5, false)]
    #[case(json!(0.1), 0.0, true)]
    #[case(json!("garbage"), 0.0, false)]
    fn test_above(#[case] input: serde_json::Value, #[case] threshold: f64, #[case] expected: bool) {
        assert_eq!(scalar(input).above(threshold), expected);
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!(1), true)]
    #[case(json!(0), false)]
    #[case(json!("1"), true)]
    #[case(json!("0"), false)]
    #[case(json!("true"), true)]
    #[case(json!("false"), false)]
    fn test_as_flag(#[case] input: serde_json::Value, #[case] expected: bool) {
        assert_eq!(scalar(input).as_flag(), expected);
    }

    #[test]
    fn test_strict_number() {
        assert_eq!(scalar(json!(80.0)).as_strict_f64(), Some(80.0));
        assert_eq!(scalar(json!("80")).as_strict_f64(), None);
    }
}
