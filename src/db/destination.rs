use chrono::{DateTime, Utc};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::core::types::{Value, ValueKind};

/// Why a [`CustomSlot`] refused a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The slot understands the value's kind family but not this value.
    Mismatch,

    /// The slot has no decode rule at all.
    Unsupported,
}

/// A caller-defined destination type.
///
/// Built-in destinations are a closed set; anything else has to register
/// itself here. A slot that only names itself and never overrides
/// [`CustomSlot::assign`] is reported as unsupported.
pub trait CustomSlot {
    /// The type name used in error messages.
    fn type_name(&self) -> &'static str;

    /// Copies `value` into the slot.
    fn assign(&mut self, _value: &Value) -> Result<(), Rejection> {
        Err(Rejection::Unsupported)
    }
}

/// The shape of a [`Destination`], used for error reporting and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DestinationKind {
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
    NullString,
    NullInt64,
    NullTime,
    Custom,
}

impl DestinationKind {
    /// The value kind this destination is filled from.
    ///
    /// `None` for custom slots, which decide for themselves.
    pub fn source_kind(self) -> Option<ValueKind> {
        let kind = match self {
            DestinationKind::Int => ValueKind::Int,
            DestinationKind::Int8 => ValueKind::Int8,
            DestinationKind::Int16 => ValueKind::Int16,
            DestinationKind::Int32 => ValueKind::Int32,
            DestinationKind::Int64 | DestinationKind::NullInt64 => ValueKind::Int64,
            DestinationKind::Uint => ValueKind::Uint,
            DestinationKind::Uint8 => ValueKind::Uint8,
            DestinationKind::Uint16 => ValueKind::Uint16,
            DestinationKind::Uint32 => ValueKind::Uint32,
            DestinationKind::Uint64 => ValueKind::Uint64,
            DestinationKind::Float32 => ValueKind::Float32,
            DestinationKind::Float64 => ValueKind::Float64,
            DestinationKind::String | DestinationKind::NullString => ValueKind::String,
            DestinationKind::Bytes => ValueKind::Bytes,
            DestinationKind::Bool => ValueKind::Bool,
            DestinationKind::Time | DestinationKind::NullTime => ValueKind::Time,
            DestinationKind::Custom => return None,
        };
        Some(kind)
    }

    /// Nullable destinations resolve a mismatching value to `None` instead
    /// of failing.
    pub fn is_nullable(self) -> bool {
        matches!(
            self,
            DestinationKind::NullString | DestinationKind::NullInt64 | DestinationKind::NullTime
        )
    }
}

/// A typed, mutable location that receives one scanned value.
///
/// Build these with `From` (`Destination::from(&mut id)`) or the
/// [`dests!`](crate::dests) macro.
pub enum Destination<'a> {
    Int(&'a mut isize),
    Int8(&'a mut i8),
    Int16(&'a mut i16),
    Int32(&'a mut i32),
    Int64(&'a mut i64),
    Uint(&'a mut usize),
    Uint8(&'a mut u8),
    Uint16(&'a mut u16),
    Uint32(&'a mut u32),
    Uint64(&'a mut u64),
    Float32(&'a mut f32),
    Float64(&'a mut f64),
    String(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    Bool(&'a mut bool),
    Time(&'a mut DateTime<Utc>),
    NullString(&'a mut Option<String>),
    NullInt64(&'a mut Option<i64>),
    NullTime(&'a mut Option<DateTime<Utc>>),
    Custom(&'a mut dyn CustomSlot),
}

impl Destination<'_> {
    pub fn kind(&self) -> DestinationKind {
        match self {
            Destination::Int(_) => DestinationKind::Int,
            Destination::Int8(_) => DestinationKind::Int8,
            Destination::Int16(_) => DestinationKind::Int16,
            Destination::Int32(_) => DestinationKind::Int32,
            Destination::Int64(_) => DestinationKind::Int64,
            Destination::Uint(_) => DestinationKind::Uint,
            Destination::Uint8(_) => DestinationKind::Uint8,
            Destination::Uint16(_) => DestinationKind::Uint16,
            Destination::Uint32(_) => DestinationKind::Uint32,
            Destination::Uint64(_) => DestinationKind::Uint64,
            Destination::Float32(_) => DestinationKind::Float32,
            Destination::Float64(_) => DestinationKind::Float64,
            Destination::String(_) => DestinationKind::String,
            Destination::Bytes(_) => DestinationKind::Bytes,
            Destination::Bool(_) => DestinationKind::Bool,
            Destination::Time(_) => DestinationKind::Time,
            Destination::NullString(_) => DestinationKind::NullString,
            Destination::NullInt64(_) => DestinationKind::NullInt64,
            Destination::NullTime(_) => DestinationKind::NullTime,
            Destination::Custom(_) => DestinationKind::Custom,
        }
    }

    /// Name of the type this destination expects, as reported in a
    /// [`TypeError`](crate::TypeError).
    pub fn expected_type(&self) -> &'static str {
        match self {
            Destination::Custom(slot) => slot.type_name(),
            other => other
                .kind()
                .source_kind()
                .map_or("custom", ValueKind::name),
        }
    }
}

impl std::fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Destination({})", self.kind())
    }
}

macro_rules! impl_from_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for Destination<'a> {
                fn from(slot: &'a mut $ty) -> Self {
                    Destination::$variant(slot)
                }
            }
        )*
    };
}

impl_from_slot! {
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
    String => String,
    Vec<u8> => Bytes,
    bool => Bool,
    DateTime<Utc> => Time,
    Option<String> => NullString,
    Option<i64> => NullInt64,
    Option<DateTime<Utc>> => NullTime,
}

impl<'a> From<&'a mut dyn CustomSlot> for Destination<'a> {
    fn from(slot: &'a mut dyn CustomSlot) -> Self {
        Destination::Custom(slot)
    }
}

/// Builds an array of [`Destination`]s from mutable borrows.
///
/// ```
/// use rowscan::{Row, dests, row};
///
/// let mut id = 0u64;
/// let mut name = String::new();
/// row![123u64, "JP"].scan(&mut dests![&mut id, &mut name]).unwrap();
/// assert_eq!((id, name.as_str()), (123, "JP"));
/// ```
#[macro_export]
macro_rules! dests {
    ($($slot:expr),* $(,)?) => {
        [$($crate::Destination::from($slot)),*]
    };
}
