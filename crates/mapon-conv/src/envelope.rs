//! The `{data, error}` envelope shared by every endpoint

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConvError, ConvResult};
use crate::scalar::JsonScalar;

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<JsonScalar>,
    #[serde(default)]
    msg: Option<JsonScalar>,
}

/// Decode a response envelope and the endpoint payload inside it.
///
/// A non-null `error` object wins over any `data` that came with it. An
/// absent or null `data` decodes as `T::default()`.
pub fn decode_envelope<T>(endpoint: &'static str, body: &[u8]) -> ConvResult<T>
where
    T: DeserializeOwned + Default,
{
    let envelope: RawEnvelope =
        serde_json::from_slice(body).map_err(|e| ConvError::decode(endpoint, e))?;

    if let Some(error) = envelope.error {
        return Err(ConvError::Api {
            code: error.code.map(|c| c.as_i64()).unwrap_or_default(),
            message: error.msg.and_then(|m| m.as_text()).unwrap_or_default(),
        });
    }

    match envelope.data {
        None => Ok(T::default()),
        // The API serializes an empty object as `[]`
        Some(Value::Array(items)) if items.is_empty() => {
            Ok(serde_json::from_value(Value::Array(items)).unwrap_or_default())
        }
        Some(data) => serde_json::from_value(data).map_err(|e| ConvError::decode(endpoint, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Payload {
        #[serde(default)]
        units: Vec<i64>,
    }

    #[test]
    fn test_decodes_data() {
        let body = br#"{"data":{"units":[1,2]},"error":null}"#;
        let payload: Payload = decode_envelope("test", body).unwrap();
        assert_eq!(payload.units, vec![1, 2]);
    }

    #[test]
    fn test_error_short_circuits_valid_data() {
        let body = br#"{"data":{"units":[1,2]},"error":{"code":1003,"msg":"Access denied"}}"#;
        let err = decode_envelope::<Payload>("test", body).unwrap_err();
        match err {
            ConvError::Api { code, message } => {
                assert_eq!(code, 1003);
                assert_eq!(message, "Access denied");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_with_string_code() {
        let body = br#"{"error":{"code":"12","msg":"bad key"}}"#;
        let err = decode_envelope::<Payload>("test", body).unwrap_err();
        assert_eq!(err.api_code(), Some(12));
    }

    #[test]
    fn test_missing_data_is_empty() {
        let payload: Payload = decode_envelope("test", br#"{"error":null}"#).unwrap();
        assert_eq!(payload, Payload::default());

        let payload: Payload = decode_envelope("test", br#"{"data":null}"#).unwrap();
        assert_eq!(payload, Payload::default());
    }

    #[test]
    fn test_empty_array_in_place_of_object() {
        let payload: Payload = decode_envelope("test", br#"{"data":[]}"#).unwrap();
        assert_eq!(payload, Payload::default());
    }

    #[test]
    fn test_syntax_error_is_decode_error() {
        let err = decode_envelope::<Payload>("unit/list", b"{\"data\":").unwrap_err();
        assert!(matches!(err, ConvError::Decode { endpoint: "unit/list", .. }));
    }

    #[test]
    fn test_outer_shape_mismatch_is_decode_error() {
        let err = decode_envelope::<Payload>("test", b"[1,2,3]").unwrap_err();
        assert!(matches!(err, ConvError::Decode { .. }));

        let err = decode_envelope::<Payload>("test", br#"{"data":{"units":"x"}}"#).unwrap_err();
        assert!(matches!(err, ConvError::Decode { .. }));
    }
}
