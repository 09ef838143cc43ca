//! Scalar codec
//!
//! Every settable type implements [`Scalar`], which converts between the
//! native value held by a settings definition and the canonical string that
//! appears in the settings file and on the name/string facade.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The closed set of scalar kinds a setting may be declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Text,
    Boolean,
    Integer,
    Decimal,
    Uuid,
    Enum,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Text => "text",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Decimal => "decimal",
            Kind::Uuid => "uuid",
            Kind::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// A string could not be read as a literal of the declared kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot read {input:?} as {kind}: {reason}")]
pub struct ConversionError {
    pub kind: Kind,
    pub input: String,
    pub reason: String,
}

impl ConversionError {
    pub fn new(kind: Kind, input: &str, reason: impl fmt::Display) -> Self {
        Self {
            kind,
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Type-erased setting value, as handed out by name-based lookups
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    Uuid(Uuid),
    Enum(&'static str),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Decimal(_) => Kind::Decimal,
            Value::Uuid(_) => Kind::Uuid,
            Value::Enum(_) => Kind::Enum,
        }
    }
}

/// Formats the value exactly as it is written to the settings file
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Boolean(flag) => write!(f, "{}", flag),
            Value::Integer(number) => write!(f, "{}", number),
            Value::Decimal(number) => write!(f, "{}", number),
            Value::Uuid(id) => write!(f, "{}", id.hyphenated()),
            Value::Enum(variant) => f.write_str(variant),
        }
    }
}

/// A type that can be declared as a setting field.
///
/// `decode(&encode(v))` must yield `v` for every representable `v`.
/// Implement this trait to make a new type settable; enumerations get an
/// implementation from [`setting_enum!`](crate::setting_enum).
pub trait Scalar: Clone + Sized {
    const KIND: Kind;

    fn encode(&self) -> String;

    fn decode(raw: &str) -> Result<Self, ConversionError>;

    fn to_value(&self) -> Value;

    /// Allowed literals for enumerated kinds, empty otherwise
    fn options() -> &'static [&'static str] {
        &[]
    }

    /// Substitutes `token` in place. Only text values carry placeholders.
    fn expand_placeholder(&mut self, _token: &str, _replacement: &str) {}
}

impl Scalar for String {
    const KIND: Kind = Kind::Text;

    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_string())
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn expand_placeholder(&mut self, token: &str, replacement: &str) {
        if self.contains(token) {
            *self = self.replace(token, replacement);
        }
    }
}

impl Scalar for bool {
    const KIND: Kind = Kind::Boolean;

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Result<Self, ConversionError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConversionError::new(
                Kind::Boolean,
                raw,
                "expected `true` or `false`",
            ))
        }
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

macro_rules! integer_scalar {
    ($($ty:ty),*) => {$(
        impl Scalar for $ty {
            const KIND: Kind = Kind::Integer;

            fn encode(&self) -> String {
                self.to_string()
            }

            fn decode(raw: &str) -> Result<Self, ConversionError> {
                raw.trim()
                    .parse::<$ty>()
                    .map_err(|e| ConversionError::new(Kind::Integer, raw, e))
            }

            fn to_value(&self) -> Value {
                Value::Integer(i64::from(*self))
            }
        }
    )*};
}

integer_scalar!(i32, i64, u32);

macro_rules! decimal_scalar {
    ($($ty:ty),*) => {$(
        impl Scalar for $ty {
            const KIND: Kind = Kind::Decimal;

            // Display already yields the shortest string that parses back exactly
            fn encode(&self) -> String {
                self.to_string()
            }

            fn decode(raw: &str) -> Result<Self, ConversionError> {
                raw.trim()
                    .parse::<$ty>()
                    .map_err(|e| ConversionError::new(Kind::Decimal, raw, e))
            }

            // Widen through the stored text so the value prints as it is saved
            fn to_value(&self) -> Value {
                let widened = self.encode().parse().unwrap_or(f64::from(*self));
                Value::Decimal(widened)
            }
        }
    )*};
}

decimal_scalar!(f32, f64);

impl Scalar for Uuid {
    const KIND: Kind = Kind::Uuid;

    fn encode(&self) -> String {
        self.hyphenated().to_string()
    }

    fn decode(raw: &str) -> Result<Self, ConversionError> {
        Uuid::parse_str(raw.trim()).map_err(|e| ConversionError::new(Kind::Uuid, raw, e))
    }

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}
