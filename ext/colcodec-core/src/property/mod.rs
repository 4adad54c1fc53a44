//! The mapping-node contract shared by every property variant.
//!
//! A property knows how to turn one typed value into a [`WireValue`], how to
//! read it back, and which [`DataType`] to declare for it. The closed set of
//! variants is tagged by [`PropertyKind`]:
//!
//! - [`ScalarProperty`]: one scalar through a [`crate::codec::ScalarCodec`]
//! - [`ListProperty`], [`SetProperty`], [`MapProperty`]: collections
//! - [`UdtProperty`]: a user structure bound field by field
//! - [`crate::tuple::TupleProperty`]: fixed-arity composites
//!
//! Properties are immutable once built and are shared across threads.

mod collection;
mod scalar;
mod udt;

pub use collection::{ListProperty, MapProperty, SetProperty};
pub use scalar::ScalarProperty;
pub use udt::{FieldBinding, UdtField, UdtProperty};

use crate::error::{CodecError, Result};
use crate::schema::DataType;
use crate::value::{Row, WireValue};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Identity of a mapped field: its name on the owning structure and its
/// wire column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    field_name: Arc<str>,
    cql_column: Arc<str>,
    quoted_cql_column: Arc<str>,
}

impl FieldInfo {
    pub fn new<F: AsRef<str>, C: AsRef<str>>(field_name: F, cql_column: C) -> Self {
        let cql_column = cql_column.as_ref();
        Self {
            field_name: Arc::from(field_name.as_ref()),
            cql_column: Arc::from(cql_column),
            quoted_cql_column: Arc::from(quote_identifier(cql_column)),
        }
    }

    /// Field whose column carries the same name
    pub fn of<F: AsRef<str>>(field_name: F) -> Self {
        Self::new(field_name.as_ref(), field_name.as_ref())
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn cql_column(&self) -> &str {
        &self.cql_column
    }

    pub fn quoted_cql_column(&self) -> &str {
        &self.quoted_cql_column
    }
}

impl fmt::Display for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field_name)
    }
}

// Case-sensitive or otherwise unusual identifiers must be double-quoted
fn quote_identifier(column: &str) -> String {
    let plain = column
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase())
        && column
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if plain {
        column.to_string()
    } else {
        format!("\"{}\"", column.replace('"', "\"\""))
    }
}

/// Tag of the closed set of property variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Scalar,
    List,
    Set,
    Map,
    Udt,
    Tuple,
}

impl PropertyKind {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Scalar => "scalar",
            PropertyKind::List => "list",
            PropertyKind::Set => "set",
            PropertyKind::Map => "map",
            PropertyKind::Udt => "udt",
            PropertyKind::Tuple => "tuple",
        }
    }

    /// Check if a wire cell has the wire kind this property reads.
    /// Null is accepted by every kind.
    pub fn accepts(&self, cell: &WireValue) -> bool {
        match (self, cell) {
            (_, WireValue::Null) => true,
            (PropertyKind::Scalar, cell) => cell.is_scalar(),
            (PropertyKind::List, WireValue::List(_))
            | (PropertyKind::Set, WireValue::Set(_))
            | (PropertyKind::Map, WireValue::Map(_))
            | (PropertyKind::Udt, WireValue::Udt(_))
            | (PropertyKind::Tuple, WireValue::Tuple(_)) => true,
            _ => false,
        }
    }
}

/// Any value handed to the untyped entry points.
///
/// Implemented for every `'static` type so callers can pass `&value`
/// directly; the runtime type name is kept for error reporting.
pub trait RawValue: Any {
    fn as_any(&self) -> &dyn Any;

    fn raw_type_name(&self) -> &'static str;
}

impl<T: Any> RawValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn raw_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Arity-agnostic view of a property.
///
/// Schema builders and validators walk property trees through this trait
/// without knowing value types.
pub trait PropertyMeta: Send + Sync {
    fn field_info(&self) -> &FieldInfo;

    fn kind(&self) -> PropertyKind;

    /// Wire type descriptor to declare for this property
    fn data_type(&self) -> DataType;

    /// Ordered child properties
    fn components(&self) -> Vec<&dyn PropertyMeta> {
        Vec::new()
    }

    /// Encode a value whose type is only known at runtime
    fn encode_raw(&self, raw: &dyn RawValue) -> Result<WireValue>;
}

/// Typed encode/decode contract
pub trait Property: PropertyMeta {
    type Value: fmt::Debug + Send + 'static;

    fn encode(&self, value: &Self::Value) -> Result<WireValue>;

    fn decode(&self, cell: &WireValue) -> Result<Self::Value>;

    /// Decode from an untyped object, which must be a wire cell of this
    /// property's kind
    fn decode_raw(&self, raw: &dyn RawValue) -> Result<Self::Value> {
        let cell = expect_wire_cell(self, raw)?;
        self.decode(cell)
    }

    fn encode_optional(&self, value: Option<&Self::Value>) -> Result<WireValue> {
        match value {
            Some(value) => self.encode(value),
            None => Ok(WireValue::Null),
        }
    }

    fn decode_optional(&self, cell: &WireValue) -> Result<Option<Self::Value>> {
        if cell.is_null() {
            return Ok(None);
        }
        self.decode(cell).map(Some)
    }

    /// Read this property's column out of a result row
    fn decode_from_row(&self, row: &Row) -> Result<Option<Self::Value>> {
        let field = self.field_info();
        let cell = row.get(field.cql_column()).ok_or_else(|| {
            CodecError::decoding(
                field,
                format!("column {} is missing from the row", field.quoted_cql_column()),
            )
        })?;
        self.decode_optional(cell)
    }
}

/// Downcast an untyped value to the property's value type
pub(crate) fn downcast_raw<'a, P: Property + ?Sized>(
    property: &P,
    raw: &'a dyn RawValue,
) -> Result<&'a P::Value> {
    raw.as_any().downcast_ref::<P::Value>().ok_or_else(|| {
        CodecError::type_mismatch(
            property.field_info(),
            std::any::type_name::<P::Value>(),
            raw.raw_type_name(),
        )
    })
}

/// Check an untyped value is a wire cell this property can read
pub(crate) fn expect_wire_cell<'a, P: PropertyMeta + ?Sized>(
    property: &P,
    raw: &'a dyn RawValue,
) -> Result<&'a WireValue> {
    let kind = property.kind();
    match raw.as_any().downcast_ref::<WireValue>() {
        Some(cell) if kind.accepts(cell) => Ok(cell),
        Some(cell) => Err(CodecError::type_mismatch(
            property.field_info(),
            format!("{} wire cell", kind.name()),
            format!("{} wire cell", cell.type_name()),
        )),
        None => Err(CodecError::type_mismatch(
            property.field_info(),
            std::any::type_name::<WireValue>(),
            raw.raw_type_name(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_info_quoting() {
        let field = FieldInfo::new("complexNestingMap", "complex_nesting_map");
        assert_eq!(field.field_name(), "complexNestingMap");
        assert_eq!(field.cql_column(), "complex_nesting_map");
        assert_eq!(field.quoted_cql_column(), "complex_nesting_map");

        let field = FieldInfo::of("intWrapper");
        assert_eq!(field.quoted_cql_column(), "\"intWrapper\"");

        let field = FieldInfo::of("1st");
        assert_eq!(field.quoted_cql_column(), "\"1st\"");
    }

    #[test]
    fn test_kind_accepts() {
        assert!(PropertyKind::Scalar.accepts(&WireValue::Int(1)));
        assert!(!PropertyKind::Scalar.accepts(&WireValue::List(vec![])));
        assert!(PropertyKind::Set.accepts(&WireValue::Set(vec![])));
        assert!(!PropertyKind::Set.accepts(&WireValue::List(vec![])));
        assert!(PropertyKind::Tuple.accepts(&WireValue::Null));
        assert!(!PropertyKind::Tuple.accepts(&WireValue::text("(1, 2)")));
    }

    #[test]
    fn test_raw_value_type_name() {
        let value = (1i32, String::from("a"));
        let raw: &dyn RawValue = &value;
        assert!(raw.raw_type_name().contains("String"));
        assert!(raw.as_any().downcast_ref::<(i32, String)>().is_some());
    }
}
