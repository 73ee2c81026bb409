use crate::error::{PrefsError, PrefsResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A single stored preference.
///
/// Persisted externally tagged, so the variant survives a round trip through
/// any store: a stored `Text("42")` never reads back as an `Integer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Any other serializable shape (arrays, maps, structs, null).
    Other(serde_json::Value),
}

impl Value {
    /// Build a value from any serde type, picking the scalar variant when the
    /// type serializes to one.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> PrefsResult<Self> {
        Ok(Self::from(serde_json::to_value(value)?))
    }

    /// Decode this value into a serde type.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> PrefsResult<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Integer(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Other(v) => v.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Fails for NaN and the infinities, which JSON cannot carry.
    ///
    /// `Other` needs no check: `serde_json::Value` never holds a non-finite number.
    pub fn ensure_finite(&self) -> PrefsResult<()> {
        match self {
            Value::Float(f) if !f.is_finite() => Err(PrefsError::Storage(format!(
                "Cannot store non-finite float {}",
                f
            ))),
            _ => Ok(()),
        }
    }

    /// Short variant name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Other(_) => "other",
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if n.is_f64() {
                    // is_f64 guarantees as_f64 succeeds
                    Value::Float(n.as_f64().unwrap_or_default())
                } else {
                    // u64 above i64::MAX
                    Value::Other(serde_json::Value::Number(n))
                }
            }
            other => Value::Other(other),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct WindowState {
        width: u32,
        height: u32,
        maximized: bool,
    }

    #[test]
    fn scalars_pick_their_own_variant() {
        assert_eq!(Value::from("hello"), Value::Text("hello".to_string()));
        assert_eq!(Value::from(42u8), Value::Integer(42));
        assert_eq!(Value::from(-7i32), Value::Integer(-7));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
    }

    #[test]
    fn json_numbers_split_into_integer_and_float() {
        assert_eq!(Value::from(json!(3)), Value::Integer(3));
        assert_eq!(Value::from(json!(3.25)), Value::Float(3.25));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Other(json!(u64::MAX)));
        assert_eq!(Value::from(json!(null)), Value::Other(json!(null)));
    }

    #[test]
    fn structs_are_stored_as_other_and_decode_back() {
        let state = WindowState {
            width: 800,
            height: 600,
            maximized: false,
        };

        let value = Value::from_serializable(&state).unwrap();
        assert_eq!(value.kind(), "other");

        let decoded: WindowState = value.deserialize_into().unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn decoding_into_the_wrong_shape_is_an_error() {
        let value = Value::from("not a window");
        assert!(value.deserialize_into::<WindowState>().is_err());
    }

    #[test]
    fn persisted_encoding_keeps_the_variant() {
        let text = serde_json::to_vec(&Value::from("42")).unwrap();
        let back: Value = serde_json::from_slice(&text).unwrap();
        assert_eq!(back.as_integer(), None);
        assert_eq!(back.as_str(), Some("42"));
    }

    #[test]
    fn only_non_finite_floats_are_refused() {
        assert!(Value::Float(1.5).ensure_finite().is_ok());
        assert!(Value::Float(f64::INFINITY).ensure_finite().is_err());
        assert!(Value::Float(f64::NEG_INFINITY).ensure_finite().is_err());
        assert!(Value::Float(f64::NAN).ensure_finite().is_err());
        assert!(Value::from("inf").ensure_finite().is_ok());
    }

    #[test]
    fn typed_views_do_not_coerce() {
        let value = Value::Integer(1);
        assert_eq!(value.as_integer(), Some(1));
        assert_eq!(value.as_bool(), None);
        assert_eq!(value.as_str(), None);
        assert_eq!(value.as_float(), None);
    }
}
