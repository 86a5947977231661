use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single column value: a scalar or an identifier.
///
/// Equality and hashing are total so values can key hash joins directly.
/// Numbers compare by numeric value across variants: `Int(1)`, `UInt(1)` and
/// `Float(1.0)` are equal, and `-0.0` equals `0.0`. Non-integral floats
/// compare by bit pattern, which makes `NaN == NaN`.
///
/// JSON integers up to `u64::MAX` deserialize exactly; only integers outside
/// both `i64` and `u64` fall back to `Float`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    // Serialized as its hyphenated string; JSON input never produces this variant.
    #[serde(skip_deserializing)]
    Uuid(Uuid),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `Null`, `false`, `0`, `0.0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::UInt(u) => *u != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Uuid(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        match *self {
            Value::Int(i) => Some(Numeric::Integral(i.into())),
            Value::UInt(u) => Some(Numeric::Integral(u.into())),
            Value::Float(f) => Some(Numeric::from_float(f)),
            _ => None,
        }
    }
}

/// Equality class of a number. Integral floats within `i128` range share the
/// class of the integer they equal.
#[derive(PartialEq, Eq, Hash)]
enum Numeric {
    Integral(i128),
    Bits(u64),
}

impl Numeric {
    const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

    fn from_float(f: f64) -> Self {
        // NaN and infinities have a NaN fractional part.
        if f.fract() == 0.0 && f.abs() < Self::I128_BOUND {
            Numeric::Integral(f as i128)
        } else {
            Numeric::Bits(f.to_bits())
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.numeric(), other.numeric()) {
            return a == b;
        }
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(number) = self.numeric() {
            number.hash(state);
            return;
        }
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null | Value::Int(_) | Value::UInt(_) | Value::Float(_) => {}
            Value::Bool(b) => b.hash(state),
            Value::Str(s) => s.hash(state),
            Value::Uuid(u) => u.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Uuid(u) => write!(f, "{u}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UInt(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
