//! Error types for the text-facing parts of the crate.
//!
//! Encoding and decoding never fail; malformed streams decode to unspecified
//! values. Only parsing schemas and values from text can go wrong.

use thiserror::Error;

use crate::value::ValueKind;

/// Error returned when parsing a schema or a value from text fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not one of `int`, `sint`, `float`, `double`, `long`, `bool`, `byte`
    #[error("unknown value kind '{0}'")]
    UnknownKind(String),
    /// A schema needs at least one kind
    #[error("schema is empty")]
    EmptySchema,
    /// Text is not a valid value of the requested kind
    #[error("invalid {kind} value '{text}'")]
    InvalidValue { kind: ValueKind, text: String },
    /// Record has a different number of fields than the schema
    #[error("expected {expected} fields, got {actual}")]
    ColumnCount { expected: usize, actual: usize },
}
