//! Typed access to value streams.
//!
//! [`StreamValue`] uses the sealed trait pattern so only the primitive types
//! the format defines can be written. [`Value`] and [`ValueKind`] carry the
//! same set at runtime for tools that learn the record layout from a schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::stream::{ValueReadStream, ValueWriteStream};

mod private {
    pub trait Sealed {}

    impl Sealed for u32 {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for i64 {}
    impl Sealed for bool {}
    impl Sealed for i8 {}
}

/// A primitive that can travel through a value stream.
///
/// This trait is sealed: `u32` is an unsigned int, `i32` a sign-folded int,
/// and `f32`, `f64`, `i64`, `bool` and `i8` use their dedicated encodings.
pub trait StreamValue: private::Sealed + Copy {
    const KIND: ValueKind;

    fn write_to<W: ValueWriteStream + ?Sized>(self, stream: &mut W);

    fn read_from<R: ValueReadStream + ?Sized>(stream: &mut R) -> Self;
}

macro_rules! stream_value {
    ($ty:ty, $kind:ident, $write:ident, $read:ident) => {
        impl StreamValue for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            #[inline]
            fn write_to<W: ValueWriteStream + ?Sized>(self, stream: &mut W) {
                stream.$write(self);
            }

            #[inline]
            fn read_from<R: ValueReadStream + ?Sized>(stream: &mut R) -> Self {
                stream.$read()
            }
        }
    };
}

stream_value!(u32, Int, write_int, read_int);
stream_value!(i32, SignedInt, write_signed_int, read_signed_int);
stream_value!(f32, Float, write_float, read_float);
stream_value!(f64, Double, write_double, read_double);
stream_value!(i64, Long, write_long, read_long);
stream_value!(bool, Bool, write_bool, read_bool);
stream_value!(i8, Byte, write_byte, read_byte);

/// Runtime tag for the value types a stream can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int,
    #[value(name = "sint")]
    #[serde(rename = "sint")]
    SignedInt,
    Float,
    Double,
    Long,
    Bool,
    Byte,
}

impl ValueKind {
    pub const ALL: [Self; 7] = [
        Self::Int,
        Self::SignedInt,
        Self::Float,
        Self::Double,
        Self::Long,
        Self::Bool,
        Self::Byte,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::SignedInt => "sint",
            Self::Float => "float",
            Self::Double => "double",
            Self::Long => "long",
            Self::Bool => "bool",
            Self::Byte => "byte",
        }
    }

    /// Decode one value of this kind.
    pub fn read_from(self, stream: &mut dyn ValueReadStream) -> Value {
        match self {
            Self::Int => Value::Int(stream.read_int()),
            Self::SignedInt => Value::SignedInt(stream.read_signed_int()),
            Self::Float => Value::Float(stream.read_float()),
            Self::Double => Value::Double(stream.read_double()),
            Self::Long => Value::Long(stream.read_long()),
            Self::Bool => Value::Bool(stream.read_bool()),
            Self::Byte => Value::Byte(stream.read_byte()),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownKind(s.to_string()))
    }
}

/// A single decoded or parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Int(u32),
    #[serde(rename = "sint")]
    SignedInt(i32),
    Float(f32),
    Double(f64),
    Long(i64),
    Bool(bool),
    Byte(i8),
}

impl Value {
    /// Parse `text` as a value of `kind`.
    ///
    /// Floats and doubles also accept `0x`-prefixed raw bit patterns so exact
    /// NaN payloads can be expressed. Booleans accept `true`/`false`/`1`/`0`.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidValue`] if `text` is not a valid `kind`.
    pub fn parse(kind: ValueKind, text: &str) -> Result<Self, ParseError> {
        let t = text.trim();
        let invalid = || ParseError::InvalidValue {
            kind,
            text: t.to_string(),
        };
        let value = match kind {
            ValueKind::Int => Self::Int(t.parse().map_err(|_| invalid())?),
            ValueKind::SignedInt => Self::SignedInt(t.parse().map_err(|_| invalid())?),
            ValueKind::Float => Self::Float(match t.strip_prefix("0x") {
                Some(hex) => f32::from_bits(u32::from_str_radix(hex, 16).map_err(|_| invalid())?),
                None => t.parse().map_err(|_| invalid())?,
            }),
            ValueKind::Double => Self::Double(match t.strip_prefix("0x") {
                Some(hex) => f64::from_bits(u64::from_str_radix(hex, 16).map_err(|_| invalid())?),
                None => t.parse().map_err(|_| invalid())?,
            }),
            ValueKind::Long => Self::Long(t.parse().map_err(|_| invalid())?),
            ValueKind::Bool => Self::Bool(match t {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return Err(invalid()),
            }),
            ValueKind::Byte => Self::Byte(t.parse().map_err(|_| invalid())?),
        };
        Ok(value)
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::SignedInt(_) => ValueKind::SignedInt,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Long(_) => ValueKind::Long,
            Self::Bool(_) => ValueKind::Bool,
            Self::Byte(_) => ValueKind::Byte,
        }
    }

    /// Encode this value.
    pub fn write_to(&self, stream: &mut dyn ValueWriteStream) {
        match *self {
            Self::Int(v) => stream.write_int(v),
            Self::SignedInt(v) => stream.write_signed_int(v),
            Self::Float(v) => stream.write_float(v),
            Self::Double(v) => stream.write_double(v),
            Self::Long(v) => stream.write_long(v),
            Self::Bool(v) => stream.write_bool(v),
            Self::Byte(v) => stream.write_byte(v),
        }
    }

    /// Bit-exact equality: NaNs with equal payloads match, `0.0` and `-0.0` do not.
    #[must_use]
    pub fn bits_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::SignedInt(v) => write!(f, "{v}"),
            Self::Float(v) if v.is_nan() => write!(f, "0x{:08x}", v.to_bits()),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Double(v) if v.is_nan() => write!(f, "0x{:016x}", v.to_bits()),
            Self::Double(v) => write!(f, "{v:?}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
        }
    }
}

/// Ordered list of value kinds making up one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema(Vec<ValueKind>);

impl Schema {
    /// # Errors
    /// Returns [`ParseError::EmptySchema`] if `kinds` is empty.
    pub fn new(kinds: Vec<ValueKind>) -> Result<Self, ParseError> {
        if kinds.is_empty() {
            return Err(ParseError::EmptySchema);
        }
        Ok(Self(kinds))
    }

    #[must_use]
    pub fn kinds(&self) -> &[ValueKind] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse one comma-separated record of values against this schema.
    ///
    /// # Errors
    /// Returns [`ParseError::ColumnCount`] on a width mismatch, or the first
    /// value's parse error.
    pub fn parse_record(&self, line: &str) -> Result<Vec<Value>, ParseError> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != self.0.len() {
            return Err(ParseError::ColumnCount {
                expected: self.0.len(),
                actual: fields.len(),
            });
        }
        self.0
            .iter()
            .zip(fields)
            .map(|(&kind, text)| Value::parse(kind, text))
            .collect()
    }

    /// Decode one record.
    pub fn read_record(&self, stream: &mut dyn ValueReadStream) -> Vec<Value> {
        self.0.iter().map(|kind| kind.read_from(stream)).collect()
    }
}

impl FromStr for Schema {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kinds = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<ValueKind>, _>>()?;
        Self::new(kinds)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(kind.name())?;
        }
        Ok(())
    }
}
