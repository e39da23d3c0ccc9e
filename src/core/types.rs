use chrono::{DateTime, Utc};
use strum::{Display, EnumIter, IntoStaticStr};

/// The kind of a [`Value`].
///
/// Kind names are what scan errors print, both for the expected type of a
/// destination and for the actual type of the offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Bytes,
    Bool,
    Time,
    Null,
}

impl ValueKind {
    /// Static name of this kind, e.g. `"uint64"`.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A single column value in a mock row.
///
/// Values are tagged with their exact width and signedness: a `Uint32` will
/// not scan into a `u64` destination. This mirrors how a driver hands back
/// exactly one concrete type per column.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Value {
    /// Platform-sized signed integer.
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    /// Platform-sized unsigned integer.
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),

    Float32(f32),
    Float64(f64),

    /// A UTF-8 text string.
    Text(String),

    /// Raw column bytes.
    Bytes(Vec<u8>),

    /// A boolean value (true/false).
    Bool(bool),

    /// A point in time, always UTC.
    Timestamp(DateTime<Utc>),

    /// Represents a NULL value (absence of data).
    ///
    /// Only nullable destinations accept it.
    Null,
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Int8(i) => write!(f, "{}", i),
            Value::Int16(i) => write!(f, "{}", i),
            Value::Int32(i) => write!(f, "{}", i),
            Value::Int64(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Uint8(u) => write!(f, "{}", u),
            Value::Uint16(u) => write!(f, "{}", u),
            Value::Uint32(u) => write!(f, "{}", u),
            Value::Uint64(u) => write!(f, "{}", u),
            Value::Float32(fl) => write!(f, "{}", fl),
            Value::Float64(fl) => write!(f, "{}", fl),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "{:?}", b),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Timestamp(t) => write!(f, "{}", t),
            Value::Null => write!(f, "NULL"),
        }
    }
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Int8(_) => ValueKind::Int8,
            Value::Int16(_) => ValueKind::Int16,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Uint(_) => ValueKind::Uint,
            Value::Uint8(_) => ValueKind::Uint8,
            Value::Uint16(_) => ValueKind::Uint16,
            Value::Uint32(_) => ValueKind::Uint32,
            Value::Uint64(_) => ValueKind::Uint64,
            Value::Float32(_) => ValueKind::Float32,
            Value::Float64(_) => ValueKind::Float64,
            Value::Text(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Bool(_) => ValueKind::Bool,
            Value::Timestamp(_) => ValueKind::Time,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive! {
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    String => Text,
    Vec<u8> => Bytes,
    bool => Bool,
    DateTime<Utc> => Timestamp,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
