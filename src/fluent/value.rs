//! Expectation values and their canonical comparable form.
//!
//! Expected and actual arguments arrive in heterogeneous shapes: nothing,
//! text, raw bytes, a readable stream, or a number. [`Value`] is the closed
//! union of those kinds, and normalization collapses every kind into one of
//! two comparable forms: a byte sequence or an `f64`. The normalizer never
//! guesses formats — a string is never parsed as a number unless the
//! comparator explicitly asks for it during a header comparison.

use std::fmt;
use std::io::Read;

use crate::error::Error;

/// An expectation or payload value.
///
/// Construct one through the `From` impls or [`Value::stream`]:
///
/// ```rust
/// use httpexpect::Value;
///
/// let absent = Value::from(());
/// let text = Value::from("hello");
/// let bytes = Value::from(vec![1u8, 2, 3]);
/// let number = Value::from(42);
/// ```
pub enum Value {
    /// No value; normalizes to an empty byte sequence.
    Absent,
    /// Text; normalizes to its UTF-8 bytes.
    Text(String),
    /// A byte sequence; normalizes to itself.
    Bytes(Vec<u8>),
    /// A readable stream, fully drained at normalization time. The reader
    /// is consumed and dropped once drained.
    Stream(Box<dyn Read>),
    /// An integer; widened to `f64` for comparison.
    Int(i64),
    /// A float; compared as `f64`.
    Float(f64),
}

/// Canonical comparable form of a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Normalized {
    Bytes(Vec<u8>),
    Number(f64),
}

impl Value {
    /// Wrap a readable stream as an expectation or payload.
    ///
    /// ```rust
    /// use std::io::Cursor;
    /// use httpexpect::Value;
    ///
    /// let value = Value::stream(Cursor::new(vec![1u8, 2, 3]));
    /// ```
    pub fn stream(reader: impl Read + 'static) -> Self {
        Value::Stream(Box::new(reader))
    }

    /// The kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Stream(_) => "stream",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
        }
    }

    /// Collapse this value into its canonical comparable form.
    ///
    /// A failed stream read is the only fallible path; the caller treats it
    /// as fatal.
    pub(crate) fn normalize(self) -> Result<Normalized, Error> {
        match self {
            Value::Absent => Ok(Normalized::Bytes(Vec::new())),
            Value::Text(text) => Ok(Normalized::Bytes(text.into_bytes())),
            Value::Bytes(bytes) => Ok(Normalized::Bytes(bytes)),
            Value::Stream(mut reader) => {
                let mut drained = Vec::new();
                reader
                    .read_to_end(&mut drained)
                    .map_err(|err| Error::Stream(err.to_string()))?;
                Ok(Normalized::Bytes(drained))
            }
            Value::Int(n) => Ok(Normalized::Number(n as f64)),
            Value::Float(n) => Ok(Normalized::Number(n)),
        }
    }

    /// Normalize into request body bytes. Numeric kinds have no byte
    /// representation and are rejected.
    pub(crate) fn into_body(self) -> Result<Vec<u8>, Error> {
        let kind = self.kind();
        match self.normalize()? {
            Normalized::Bytes(bytes) => Ok(bytes),
            Normalized::Number(_) => Err(Error::BodyKind { kind }),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("Absent"),
            Value::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Value::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            Value::Stream(_) => f.write_str("Stream(..)"),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Absent
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(bytes: &[u8; N]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

macro_rules! value_from_int {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::Int(i64::from(n))
            }
        }
    )*};
}

value_from_int!(i16, i32, i64, u16, u32);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}
