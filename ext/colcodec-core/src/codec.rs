//! Scalar codecs: conversion of one leaf value between its in-memory type
//! and a scalar wire cell.
//!
//! Codec errors are raised as [`CodecError::Conversion`]; the owning
//! [`crate::property::ScalarProperty`] attaches the field identity.

use crate::config::EnumEncoding;
use crate::error::{CodecError, Result};
use crate::schema::{DataType, ScalarType};
use crate::value::WireValue;
use bytes::Bytes;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use num::BigInt;
use ordered_float::OrderedFloat;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

const SECONDS_PER_DAY: i64 = 86_400;
const NANOS_PER_MILLISECOND: i32 = 1_000_000;

/// Converts one scalar value to and from its wire cell
pub trait ScalarCodec: Send + Sync {
    type Value: fmt::Debug + Send + 'static;

    fn data_type(&self) -> DataType;

    fn encode(&self, value: &Self::Value) -> Result<WireValue>;

    fn decode(&self, cell: &WireValue) -> Result<Self::Value>;
}

fn unexpected(expected: ScalarType, cell: &WireValue) -> CodecError {
    CodecError::conversion(format!(
        "Expected {}, got {}",
        expected.type_name(),
        cell.type_name()
    ))
}

/// In-memory types with a native wire representation
pub trait NativeType: fmt::Debug + Send + Sync + Sized + 'static {
    const SCALAR_TYPE: ScalarType;

    fn to_wire(&self) -> Result<WireValue>;

    /// Read a cell. With `widening`, narrower numeric cells are accepted.
    fn from_wire(cell: &WireValue, widening: bool) -> Result<Self>;
}

impl NativeType for bool {
    const SCALAR_TYPE: ScalarType = ScalarType::Boolean;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::Boolean(*self))
    }

    fn from_wire(cell: &WireValue, _widening: bool) -> Result<Self> {
        match cell {
            WireValue::Boolean(b) => Ok(*b),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for i8 {
    const SCALAR_TYPE: ScalarType = ScalarType::TinyInt;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::TinyInt(*self))
    }

    fn from_wire(cell: &WireValue, _widening: bool) -> Result<Self> {
        match cell {
            WireValue::TinyInt(i) => Ok(*i),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for i16 {
    const SCALAR_TYPE: ScalarType = ScalarType::SmallInt;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::SmallInt(*self))
    }

    fn from_wire(cell: &WireValue, widening: bool) -> Result<Self> {
        match cell {
            WireValue::SmallInt(i) => Ok(*i),
            WireValue::TinyInt(i) if widening => Ok(*i as i16),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for i32 {
    const SCALAR_TYPE: ScalarType = ScalarType::Int;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::Int(*self))
    }

    fn from_wire(cell: &WireValue, widening: bool) -> Result<Self> {
        match cell {
            WireValue::Int(i) => Ok(*i),
            WireValue::SmallInt(i) if widening => Ok(*i as i32),
            WireValue::TinyInt(i) if widening => Ok(*i as i32),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for i64 {
    const SCALAR_TYPE: ScalarType = ScalarType::BigInt;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::BigInt(*self))
    }

    fn from_wire(cell: &WireValue, widening: bool) -> Result<Self> {
        match cell {
            WireValue::BigInt(i) => Ok(*i),
            WireValue::Int(i) if widening => Ok(*i as i64),
            WireValue::SmallInt(i) if widening => Ok(*i as i64),
            WireValue::TinyInt(i) if widening => Ok(*i as i64),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for f32 {
    const SCALAR_TYPE: ScalarType = ScalarType::Float;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::Float(OrderedFloat(*self)))
    }

    fn from_wire(cell: &WireValue, _widening: bool) -> Result<Self> {
        match cell {
            WireValue::Float(f) => Ok(f.0),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for f64 {
    const SCALAR_TYPE: ScalarType = ScalarType::Double;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::Double(OrderedFloat(*self)))
    }

    fn from_wire(cell: &WireValue, widening: bool) -> Result<Self> {
        match cell {
            WireValue::Double(f) => Ok(f.0),
            WireValue::Float(f) if widening => Ok(f.0 as f64),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for String {
    const SCALAR_TYPE: ScalarType = ScalarType::Text;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::text(self))
    }

    fn from_wire(cell: &WireValue, _widening: bool) -> Result<Self> {
        match cell {
            WireValue::Text(s) => Ok(s.to_string()),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for Bytes {
    const SCALAR_TYPE: ScalarType = ScalarType::Blob;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::Blob(self.clone()))
    }

    fn from_wire(cell: &WireValue, _widening: bool) -> Result<Self> {
        match cell {
            WireValue::Blob(b) => Ok(b.clone()),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for Vec<u8> {
    const SCALAR_TYPE: ScalarType = ScalarType::Blob;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::Blob(Bytes::copy_from_slice(self)))
    }

    fn from_wire(cell: &WireValue, _widening: bool) -> Result<Self> {
        match cell {
            WireValue::Blob(b) => Ok(b.to_vec()),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for BigInt {
    const SCALAR_TYPE: ScalarType = ScalarType::Varint;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::Varint(self.clone()))
    }

    fn from_wire(cell: &WireValue, widening: bool) -> Result<Self> {
        match cell {
            WireValue::Varint(i) => Ok(i.clone()),
            WireValue::BigInt(i) if widening => Ok(BigInt::from(*i)),
            WireValue::Int(i) if widening => Ok(BigInt::from(*i)),
            WireValue::SmallInt(i) if widening => Ok(BigInt::from(*i)),
            WireValue::TinyInt(i) if widening => Ok(BigInt::from(*i)),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for Uuid {
    const SCALAR_TYPE: ScalarType = ScalarType::Uuid;

    fn to_wire(&self) -> Result<WireValue> {
        Ok(WireValue::Uuid(*self))
    }

    fn from_wire(cell: &WireValue, widening: bool) -> Result<Self> {
        match cell {
            WireValue::Uuid(u) => Ok(*u),
            WireValue::TimeUuid(u) if widening => Ok(*u),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for Timestamp {
    const SCALAR_TYPE: ScalarType = ScalarType::Timestamp;

    /// Sub-millisecond precision is rejected instead of truncated
    fn to_wire(&self) -> Result<WireValue> {
        if self.subsec_nanosecond() % NANOS_PER_MILLISECOND != 0 {
            return Err(CodecError::conversion(format!(
                "Timestamp {} has sub-millisecond precision",
                self
            )));
        }
        Ok(WireValue::Timestamp(self.as_millisecond()))
    }

    fn from_wire(cell: &WireValue, _widening: bool) -> Result<Self> {
        match cell {
            WireValue::Timestamp(millis) => Timestamp::from_millisecond(*millis).map_err(|e| {
                CodecError::conversion(format!("Invalid timestamp {}: {}", millis, e))
            }),
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

impl NativeType for Date {
    const SCALAR_TYPE: ScalarType = ScalarType::Date;

    fn to_wire(&self) -> Result<WireValue> {
        let midnight = self
            .to_zoned(TimeZone::UTC)
            .map_err(|e| CodecError::conversion(format!("Invalid date {}: {}", self, e)))?;
        let days = midnight.timestamp().as_second().div_euclid(SECONDS_PER_DAY);
        let days = i32::try_from(days)
            .map_err(|_| CodecError::conversion(format!("Date {} is out of range", self)))?;
        Ok(WireValue::Date(days))
    }

    fn from_wire(cell: &WireValue, _widening: bool) -> Result<Self> {
        match cell {
            WireValue::Date(days) => {
                let timestamp = Timestamp::from_second(*days as i64 * SECONDS_PER_DAY)
                    .map_err(|e| CodecError::conversion(format!("Invalid date {}: {}", days, e)))?;
                Ok(timestamp.to_zoned(TimeZone::UTC).date())
            }
            other => Err(unexpected(Self::SCALAR_TYPE, other)),
        }
    }
}

/// Codec for any [`NativeType`]
#[derive(Debug, Clone, Copy)]
pub struct NativeCodec<T> {
    widening: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: NativeType> NativeCodec<T> {
    pub fn new() -> Self {
        Self::with_widening(true)
    }

    pub fn with_widening(widening: bool) -> Self {
        Self {
            widening,
            _marker: PhantomData,
        }
    }

    pub fn widening(&self) -> bool {
        self.widening
    }
}

impl<T: NativeType> Default for NativeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NativeType> ScalarCodec for NativeCodec<T> {
    type Value = T;

    fn data_type(&self) -> DataType {
        DataType::Scalar(T::SCALAR_TYPE)
    }

    fn encode(&self, value: &T) -> Result<WireValue> {
        value.to_wire()
    }

    fn decode(&self, cell: &WireValue) -> Result<T> {
        T::from_wire(cell, self.widening)
    }
}

/// Time-based (version 1) UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeUuidCodec;

impl TimeUuidCodec {
    fn check_version(value: &Uuid) -> Result<()> {
        match value.get_version_num() {
            1 => Ok(()),
            v => Err(CodecError::conversion(format!(
                "{} is a version {} UUID, timeuuid requires version 1",
                value, v
            ))),
        }
    }
}

impl ScalarCodec for TimeUuidCodec {
    type Value = Uuid;

    fn data_type(&self) -> DataType {
        DataType::Scalar(ScalarType::TimeUuid)
    }

    fn encode(&self, value: &Uuid) -> Result<WireValue> {
        Self::check_version(value)?;
        Ok(WireValue::TimeUuid(*value))
    }

    fn decode(&self, cell: &WireValue) -> Result<Uuid> {
        match cell {
            WireValue::TimeUuid(u) => {
                Self::check_version(u)?;
                Ok(*u)
            }
            other => Err(unexpected(ScalarType::TimeUuid, other)),
        }
    }
}

/// A field-less enumeration with stable variant names
pub trait EnumValue: Copy + fmt::Debug + Send + Sync + 'static {
    /// All variants in declaration order; the position is the ordinal
    const VARIANTS: &'static [Self];

    fn name(&self) -> &'static str;

    /// Position in [`EnumValue::VARIANTS`], `None` when the variant is not listed
    fn ordinal(&self) -> Option<usize> {
        let name = self.name();
        Self::VARIANTS.iter().position(|v| v.name() == name)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::VARIANTS.get(ordinal).copied()
    }
}

/// Enumeration stored as its variant name (text) or its ordinal (int)
#[derive(Debug, Clone, Copy)]
pub struct EnumCodec<E> {
    encoding: EnumEncoding,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EnumValue> EnumCodec<E> {
    pub fn new(encoding: EnumEncoding) -> Self {
        Self {
            encoding,
            _marker: PhantomData,
        }
    }

    pub fn encoding(&self) -> EnumEncoding {
        self.encoding
    }
}

impl<E: EnumValue> ScalarCodec for EnumCodec<E> {
    type Value = E;

    fn data_type(&self) -> DataType {
        match self.encoding {
            EnumEncoding::Name => DataType::text(),
            EnumEncoding::Ordinal => DataType::int(),
        }
    }

    fn encode(&self, value: &E) -> Result<WireValue> {
        match self.encoding {
            EnumEncoding::Name => Ok(WireValue::text(value.name())),
            EnumEncoding::Ordinal => {
                let ordinal = value.ordinal().ok_or_else(|| {
                    CodecError::conversion(format!(
                        "{:?} is not listed in the variants of {}",
                        value,
                        std::any::type_name::<E>()
                    ))
                })?;
                let ordinal = i32::try_from(ordinal).map_err(|_| {
                    CodecError::conversion(format!("Ordinal of {:?} does not fit an int", value))
                })?;
                Ok(WireValue::Int(ordinal))
            }
        }
    }

    fn decode(&self, cell: &WireValue) -> Result<E> {
        match (self.encoding, cell) {
            (EnumEncoding::Name, WireValue::Text(name)) => E::from_name(name).ok_or_else(|| {
                CodecError::conversion(format!(
                    "Unknown variant '{}' for {}",
                    name,
                    std::any::type_name::<E>()
                ))
            }),
            (EnumEncoding::Ordinal, WireValue::Int(ordinal)) => usize::try_from(*ordinal)
                .ok()
                .and_then(E::from_ordinal)
                .ok_or_else(|| {
                    CodecError::conversion(format!(
                        "Unknown ordinal {} for {}",
                        ordinal,
                        std::any::type_name::<E>()
                    ))
                }),
            (EnumEncoding::Name, other) => Err(unexpected(ScalarType::Text, other)),
            (EnumEncoding::Ordinal, other) => Err(unexpected(ScalarType::Int, other)),
        }
    }
}

/// Any serde value stored as JSON text
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> ScalarCodec for JsonCodec<T>
where
    T: Serialize + DeserializeOwned + fmt::Debug + Send + 'static,
{
    type Value = T;

    fn data_type(&self) -> DataType {
        DataType::text()
    }

    fn encode(&self, value: &T) -> Result<WireValue> {
        let json = serde_json::to_string(value)?;
        Ok(WireValue::text(json))
    }

    fn decode(&self, cell: &WireValue) -> Result<T> {
        match cell {
            WireValue::Text(json) => Ok(serde_json::from_str(json)?),
            other => Err(unexpected(ScalarType::Text, other)),
        }
    }
}

/// Values stored as their `Display` text and parsed back with `FromStr`
#[derive(Debug, Clone, Copy, Default)]
pub struct ToStringCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> ToStringCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> ScalarCodec for ToStringCodec<T>
where
    T: fmt::Display + FromStr + fmt::Debug + Send + 'static,
    T::Err: fmt::Display,
{
    type Value = T;

    fn data_type(&self) -> DataType {
        DataType::text()
    }

    fn encode(&self, value: &T) -> Result<WireValue> {
        Ok(WireValue::text(value.to_string()))
    }

    fn decode(&self, cell: &WireValue) -> Result<T> {
        match cell {
            WireValue::Text(text) => text.parse().map_err(|e: T::Err| {
                CodecError::conversion(format!(
                    "Cannot parse '{}' as {}: {}",
                    text,
                    std::any::type_name::<T>(),
                    e
                ))
            }),
            other => Err(unexpected(ScalarType::Text, other)),
        }
    }
}

/// User-pluggable codec: converts `V` to the value of a base codec and back
pub struct CustomCodec<V, C: ScalarCodec> {
    base: C,
    to_base: fn(&V) -> Result<C::Value>,
    from_base: fn(C::Value) -> Result<V>,
}

impl<V, C: ScalarCodec> CustomCodec<V, C> {
    pub fn new(
        base: C,
        to_base: fn(&V) -> Result<C::Value>,
        from_base: fn(C::Value) -> Result<V>,
    ) -> Self {
        Self {
            base,
            to_base,
            from_base,
        }
    }
}

impl<V, C: ScalarCodec + fmt::Debug> fmt::Debug for CustomCodec<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCodec")
            .field("value_type", &std::any::type_name::<V>())
            .field("base", &self.base)
            .finish()
    }
}

impl<V, C> ScalarCodec for CustomCodec<V, C>
where
    V: fmt::Debug + Send + 'static,
    C: ScalarCodec,
{
    type Value = V;

    fn data_type(&self) -> DataType {
        self.base.data_type()
    }

    fn encode(&self, value: &V) -> Result<WireValue> {
        let base = (self.to_base)(value)?;
        self.base.encode(&base)
    }

    fn decode(&self, cell: &WireValue) -> Result<V> {
        let base = self.base.decode(cell)?;
        (self.from_base)(base)
    }
}
